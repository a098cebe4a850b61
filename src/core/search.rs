//! Resolve a typed query to a ranked, display-ready candidate list.

use tracing::{debug, instrument};

use super::outcome::Lookup;
use super::ranker::rank;
use crate::adapters::{Directory, DirectoryError};
use crate::config::SearchSettings;
use crate::domain::Candidate;
use crate::text::split_title_case;

/// Query variants to search: the query itself, plus its title-case split
/// when that differs.
pub fn query_variants(query: &str) -> Vec<String> {
    let mut variants = vec![query.to_string()];

    let split = split_title_case(query);
    if !split.is_empty() && split != query {
        variants.push(split);
    }

    variants
}

/// Search every query variant and rank the combined results.
///
/// Returns [`Lookup::Empty`] when no variant matched anything. Survivors are
/// sanitized and have their author's name attached, one author lookup each.
#[instrument(skip(directory, settings))]
pub async fn search<D>(
    directory: &D,
    query: &str,
    settings: &SearchSettings,
) -> Result<Lookup<Vec<Candidate>>, DirectoryError>
where
    D: Directory + ?Sized,
{
    let mut pages = Vec::new();
    for variant in query_variants(query) {
        let page = directory
            .search_resources(&variant, settings.page_size, settings.sort)
            .await?;
        debug!(%variant, hits = page.len(), "Searched");
        pages.push(page);
    }

    if pages.iter().all(Vec::is_empty) {
        return Ok(Lookup::Empty);
    }

    let ranked = rank(query, pages, settings.max_candidates);

    let mut candidates = Vec::with_capacity(ranked.len());
    for candidate in ranked {
        let author = directory.get_author(candidate.author_id).await?;
        candidates.push(candidate.sanitized().with_author(author.name));
    }

    Ok(Lookup::Found(candidates))
}
