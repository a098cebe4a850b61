//! Spiget directory client.
//!
//! Endpoints used:
//! - `GET /search/resources/{name}` (search by name)
//! - `GET /resources/{id}` and `GET /resources/{id}/download`
//! - `GET /resources/{id}/updates/latest`
//! - `GET /authors/{id}`
//!
//! Every request carries the configured user-agent. No retries and no
//! timeout beyond the transport default.

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{Directory, DirectoryError, SortKey};
use crate::config::ResolvedConfig;
use crate::domain::{Author, Candidate, UpdateInfo};
use crate::text;

/// Root of the public Spiget API
pub const DEFAULT_API_URL: &str = "https://api.spiget.org/v2";

/// Fields requested from the search endpoint
const SEARCH_FIELDS: &str = "file,name,tag,version,downloads,id,author";

const DOWNLOAD_FAILED: &str = "Could not download resource due to an unknown error. \
                               This can sometimes happen with external resources.";

/// Resource record as the directory sends it
#[derive(Debug, Deserialize)]
struct ResourceDto {
    id: i64,
    name: String,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    downloads: i64,
    author: IdRef,
    version: IdRef,
}

#[derive(Debug, Deserialize)]
struct IdRef {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct AuthorDto {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct UpdateDto {
    #[serde(default)]
    title: String,
    /// Base64-encoded HTML
    #[serde(default)]
    description: String,
    date: Option<i64>,
    likes: Option<i64>,
}

impl From<ResourceDto> for Candidate {
    fn from(dto: ResourceDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            tag: dto.tag.unwrap_or_default(),
            download_count: dto.downloads,
            author_id: dto.author.id,
            author_name: None,
            latest_version_id: dto.version.id,
        }
    }
}

impl TryFrom<UpdateDto> for UpdateInfo {
    type Error = DirectoryError;

    fn try_from(dto: UpdateDto) -> Result<Self, Self::Error> {
        let html = base64::engine::general_purpose::STANDARD.decode(dto.description.trim())?;

        Ok(Self {
            title: dto.title,
            description: text::clean_description(&String::from_utf8_lossy(&html)),
            date: dto
                .date
                .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0)),
            likes: dto.likes,
        })
    }
}

/// HTTP client for the Spiget resource directory
pub struct SpigetClient {
    /// API root, e.g. `https://api.spiget.org/v2`
    base_url: Url,
    /// HTTP client
    client: reqwest::Client,
}

impl SpigetClient {
    /// Create a client for `base_url` sending `user_agent` with every request
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, DirectoryError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DirectoryError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(DirectoryError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(Self { base_url, client })
    }

    /// Create from resolved configuration
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, DirectoryError> {
        Self::new(&config.api_url, &config.user_agent)
    }

    /// Append path segments to the API root, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Issue a GET. A 5xx is always a service error; other statuses are
    /// left to the caller.
    async fn call(&self, url: Url, query: &[(&str, String)]) -> Result<Response, DirectoryError> {
        debug!(%url, "GET");

        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if status.is_server_error() {
            return Err(DirectoryError::Service {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, DirectoryError> {
        let endpoint = response.url().path().to_string();
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|source| DirectoryError::Decode { endpoint, source })
    }
}

#[async_trait]
impl Directory for SpigetClient {
    #[instrument(skip(self))]
    async fn search_resources(
        &self,
        query: &str,
        size: usize,
        sort: SortKey,
    ) -> Result<Vec<Candidate>, DirectoryError> {
        let url = self.endpoint(&["search", "resources", query]);
        let params = [
            ("field", "name".to_string()),
            ("sort", sort.as_param().to_string()),
            ("size", size.to_string()),
            ("fields", SEARCH_FIELDS.to_string()),
        ];

        let response = self.call(url, &params).await?;
        // The directory answers 404 when nothing matches
        if !response.status().is_success() {
            debug!(status = %response.status(), "No search results");
            return Ok(Vec::new());
        }

        let resources: Vec<ResourceDto> = Self::decode(response).await?;
        Ok(resources.into_iter().map(Candidate::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Candidate, DirectoryError> {
        let url = self.endpoint(&["resources", &id.to_string()]);
        let response = self.call(url, &[]).await?;
        DirectoryError::check_status(response.status(), &format!("Resource {id} not found"))?;

        let resource: ResourceDto = Self::decode(response).await?;
        Ok(resource.into())
    }

    async fn get_author(&self, id: i64) -> Result<Author, DirectoryError> {
        let url = self.endpoint(&["authors", &id.to_string()]);
        let response = self.call(url, &[]).await?;
        DirectoryError::check_status(response.status(), &format!("Author {id} not found"))?;

        let author: AuthorDto = Self::decode(response).await?;
        Ok(Author {
            id: author.id,
            name: author.name,
        })
    }

    async fn download(&self, id: i64) -> Result<Vec<u8>, DirectoryError> {
        let url = self.endpoint(&["resources", &id.to_string(), "download"]);
        let response = self.call(url, &[]).await?;
        DirectoryError::check_status(response.status(), DOWNLOAD_FAILED)?;

        Ok(response.bytes().await?.to_vec())
    }

    async fn latest_update(&self, id: i64) -> Result<UpdateInfo, DirectoryError> {
        let url = self.endpoint(&["resources", &id.to_string(), "updates", "latest"]);
        let response = self.call(url, &[]).await?;
        DirectoryError::check_status(
            response.status(),
            &format!("No update information for resource {id}"),
        )?;

        let update: UpdateDto = Self::decode(response).await?;
        update.try_into()
    }
}
