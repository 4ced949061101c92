//! Record filter/ranker.
//!
//! Matching is literal, case-insensitive substring containment over a
//! record's title, part, section, and content. There is no tokenization
//! and no query-dependent scoring: results are ordered by each record's
//! static `relevance`.
//!
//! # Algorithm
//!
//! 1. Reject empty or whitespace-only queries (empty result).
//! 2. Keep records whose lowercase title/part/section/content contains the
//!    lowercase query.
//! 3. Drop records whose agency does not match the facet (unless `All`).
//! 4. Stable sort by relevance (desc); equal scores keep table order.

use std::cmp::Ordering;

use crate::models::{Facet, Record};

/// Filter `records` by `query` and `facet`, ordered by relevance.
///
/// Pure and total: the same arguments always yield the same sequence.
pub fn search(records: &[Record], query: &str, facet: &Facet) -> Vec<Record> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();

    let mut results: Vec<Record> = records
        .iter()
        .filter(|r| facet.admits(r) && matches_query(r, &needle))
        .cloned()
        .collect();

    // `sort_by` is stable, which is what preserves table order on ties.
    results.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
    });

    results
}

/// [`search`], truncated to at most `limit` results.
pub fn search_with_limit(
    records: &[Record],
    query: &str,
    facet: &Facet,
    limit: usize,
) -> Vec<Record> {
    let mut results = search(records, query, facet);
    results.truncate(limit);
    results
}

/// `needle` must already be lowercase.
fn matches_query(record: &Record, needle: &str) -> bool {
    [
        &record.title,
        &record.part,
        &record.section,
        &record.content,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_records;

    fn make_record(id: u64, agency: &str, content: &str, relevance: f64) -> Record {
        Record {
            id,
            title: format!("Title {}", id),
            part: format!("Part {}", id),
            section: format!("§ {}.1", id),
            agency: agency.to_string(),
            content: content.to_string(),
            relevance,
        }
    }

    fn ids(results: &[Record]) -> Vec<u64> {
        results.iter().map(|r| r.id).collect()
    }

    #[test]
    fn organic_matches_only_agriculture_record() {
        let results = search(&sample_records(), "organic", &Facet::All);
        assert_eq!(ids(&results), vec![4]);
        assert_eq!(results[0].agency, "Department of Agriculture");
        assert!((results[0].relevance - 0.78).abs() < 1e-9);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let lower = search(&sample_records(), "organic", &Facet::All);
        let upper = search(&sample_records(), "ORGANIC", &Facet::All);
        assert_eq!(lower, upper);
    }

    #[test]
    fn matches_part_and_section_fields() {
        let by_part = search(&sample_records(), "part 1910", &Facet::All);
        assert_eq!(ids(&by_part), vec![2]);

        let by_section = search(&sample_records(), "430.32", &Facet::All);
        assert_eq!(ids(&by_section), vec![1]);
    }

    #[test]
    fn results_are_exactly_the_matching_records() {
        let records = sample_records();
        let query = "requirements";
        let results = search(&records, query, &Facet::All);

        for r in &records {
            let hit = [&r.title, &r.part, &r.section, &r.content]
                .iter()
                .any(|f| f.to_lowercase().contains(query));
            assert_eq!(hit, results.iter().any(|x| x.id == r.id), "record {}", r.id);
        }
    }

    #[test]
    fn facet_restricts_to_exact_agency() {
        let facet = Facet::Agency("Department of Energy".into());
        let results = search(&sample_records(), "requirements", &facet);
        assert_eq!(ids(&results), vec![6]);
        assert!(results.iter().all(|r| r.agency == "Department of Energy"));

        let wrong_case = Facet::Agency("department of energy".into());
        assert!(search(&sample_records(), "requirements", &wrong_case).is_empty());
    }

    #[test]
    fn sorted_by_relevance_descending() {
        let results = search(&sample_records(), "requirements", &Facet::All);
        assert_eq!(ids(&results), vec![2, 5, 6, 7, 8]);
        for pair in results.windows(2) {
            assert!(pair[0].relevance >= pair[1].relevance);
        }
    }

    #[test]
    fn equal_relevance_keeps_table_order() {
        let records = vec![
            make_record(10, "A", "shared text", 0.5),
            make_record(3, "A", "shared text", 0.9),
            make_record(7, "A", "shared text", 0.5),
            make_record(1, "A", "shared text", 0.5),
        ];
        let results = search(&records, "shared", &Facet::All);
        assert_eq!(ids(&results), vec![3, 10, 7, 1]);
    }

    #[test]
    fn empty_and_blank_queries_return_nothing() {
        assert!(search(&sample_records(), "", &Facet::All).is_empty());
        assert!(search(&sample_records(), "   ", &Facet::All).is_empty());
    }

    #[test]
    fn no_match_returns_empty() {
        assert!(search(&sample_records(), "xyznonexistent", &Facet::All).is_empty());
    }

    #[test]
    fn search_is_idempotent() {
        let records = sample_records();
        let facet = Facet::Agency("Department of Labor".into());
        let first = search(&records, "annual", &facet);
        let second = search(&records, "annual", &facet);
        assert_eq!(first, second);
        assert_eq!(records, sample_records());
    }

    #[test]
    fn limit_applies_after_ordering() {
        let results = search_with_limit(&sample_records(), "requirements", &Facet::All, 2);
        assert_eq!(ids(&results), vec![2, 5]);
    }
}
