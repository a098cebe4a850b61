//! Candidate Ranking Tests
//!
//! Ordering, collapsing and match surfacing of merged search pages.

mod common;

use common::candidate;
use spud::core::rank;
use spud::domain::Candidate;

fn ids(candidates: &[Candidate]) -> Vec<i64> {
    candidates.iter().map(|c| c.id).collect()
}

#[test]
fn test_download_count_then_id_descending() {
    let page = vec![
        candidate(1, "Alpha", 10),
        candidate(2, "Beta", 50),
        candidate(3, "Gamma", 50),
        candidate(4, "Delta", 5),
    ];

    let ranked = rank("unrelated", vec![page], 10);
    assert_eq!(ids(&ranked), vec![3, 2, 1, 4]);
}

#[test]
fn test_identical_records_collapse_across_pages() {
    let shared = candidate(7, "Shared", 100);
    let first = vec![shared.clone(), candidate(8, "First", 40)];
    let second = vec![candidate(9, "Second", 60), shared];

    let ranked = rank("unrelated", vec![first, second], 10);
    assert_eq!(ids(&ranked), vec![7, 9, 8]);
}

#[test]
fn test_records_differing_in_any_field_are_kept() {
    let original = candidate(7, "Shared", 100);
    let retagged = Candidate {
        tag: "a different tag".to_string(),
        ..original.clone()
    };

    let ranked = rank("unrelated", vec![vec![original], vec![retagged]], 10);
    assert_eq!(ids(&ranked), vec![7, 7]);
}

#[test]
fn test_exact_match_promoted_to_first() {
    let page = vec![
        candidate(1, "LuckPerms Extra", 900),
        candidate(2, "Permissions", 800),
        candidate(3, "LuckPerms", 100),
    ];

    let ranked = rank("LuckPerms", vec![page], 10);
    assert_eq!(ranked[0].name, "LuckPerms");
    assert_eq!(ids(&ranked), vec![3, 1, 2]);
}

#[test]
fn test_match_is_case_insensitive() {
    let page = vec![candidate(1, "Other", 900), candidate(2, "WORLDEDIT", 10)];

    let ranked = rank("worldedit", vec![page], 10);
    assert_eq!(ids(&ranked), vec![2, 1]);
}

#[test]
fn test_second_exact_match_joins_containing_tier() {
    let page = vec![
        candidate(1, "Vault", 900),
        candidate(2, "Vault Addon", 500),
        candidate(3, "vault", 100),
        candidate(4, "Economy", 50),
    ];

    let ranked = rank("Vault", vec![page], 10);
    assert_eq!(ids(&ranked), vec![1, 2, 3, 4]);
}

#[test]
fn test_truncates_after_surfacing() {
    let mut page: Vec<Candidate> = (1..=12)
        .map(|i| candidate(i, &format!("Filler{i}"), 1000 - i))
        .collect();
    // Least popular, but an exact match
    page.push(candidate(99, "Target", 1));

    let ranked = rank("Target", vec![page], 10);
    assert_eq!(ranked.len(), 10);
    assert_eq!(ranked[0].id, 99);
}
