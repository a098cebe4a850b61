//! Candidate ranking for multi-query search results.
//!
//! Pages from every query variant are merged, ordered by popularity,
//! collapsed, and then re-tiered so names matching the query surface first.

use crate::domain::Candidate;

/// Merge, order, deduplicate and re-tier raw search pages.
///
/// 1. Concatenate all pages.
/// 2. Sort descending by `(download_count, id)`.
/// 3. Collapse consecutive identical records.
/// 4. Surface matches: one exact name match first, then names containing the
///    query, then everything else, each tier in download order.
/// 5. Keep the first `limit`.
pub fn rank(query: &str, pages: Vec<Vec<Candidate>>, limit: usize) -> Vec<Candidate> {
    let mut merged: Vec<Candidate> = pages.into_iter().flatten().collect();

    merged.sort_by(|a, b| (b.download_count, b.id).cmp(&(a.download_count, a.id)));
    merged.dedup();

    let mut surfaced = surface_matches(query, merged);
    surfaced.truncate(limit);
    surfaced
}

/// Re-tier an already ordered list by how well each name matches `query`.
///
/// Comparison is case-insensitive. Only one exact-match slot exists; a second
/// exact match lands in the containing tier.
pub fn surface_matches(query: &str, ordered: Vec<Candidate>) -> Vec<Candidate> {
    let needle = query.to_lowercase();

    let mut exact: Option<Candidate> = None;
    let mut containing = Vec::new();
    let mut rest = Vec::new();

    for candidate in ordered {
        let name = candidate.name.to_lowercase();
        if exact.is_none() && name == needle {
            exact = Some(candidate);
        } else if name.contains(&needle) {
            containing.push(candidate);
        } else {
            rest.push(candidate);
        }
    }

    exact.into_iter().chain(containing).chain(rest).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: i64, name: &str, downloads: i64) -> Candidate {
        Candidate {
            id,
            name: name.to_string(),
            tag: String::new(),
            download_count: downloads,
            author_id: 1,
            author_name: None,
            latest_version_id: 1,
        }
    }

    fn ids(candidates: &[Candidate]) -> Vec<i64> {
        candidates.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_sorts_by_downloads_then_id() {
        let page = vec![
            candidate(1, "a", 10),
            candidate(2, "b", 50),
            candidate(3, "c", 50),
            candidate(4, "d", 5),
        ];

        let ranked = rank("zzz", vec![page], 10);
        assert_eq!(ids(&ranked), vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_surface_keeps_tier_order() {
        let ordered = vec![
            candidate(1, "Other", 100),
            candidate(2, "Vault Extra", 90),
            candidate(3, "vault", 80),
            candidate(4, "VaultAPI", 70),
        ];

        let surfaced = surface_matches("Vault", ordered);
        assert_eq!(ids(&surfaced), vec![3, 2, 4, 1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank("x", vec![], 10).is_empty());
        assert!(rank("x", vec![vec![], vec![]], 10).is_empty());
    }
}
