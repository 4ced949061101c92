//! Dashboard summary over the record table.
//!
//! Per-agency counts, mean relevance and content word totals, plus the
//! highest-relevance records. Backs `ecfr stats` and `GET /api/stats`.

use serde::Serialize;

use crate::models::Record;

const TOP_RECORDS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_records: usize,
    pub total_words: usize,
    pub agencies: Vec<AgencySummary>,
    pub top_records: Vec<TopRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgencySummary {
    pub agency: String,
    pub record_count: usize,
    pub average_relevance: f64,
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopRecord {
    pub id: u64,
    pub title: String,
    pub agency: String,
    pub relevance: f64,
}

/// Summarize `records`. Agencies are ordered by record count (desc),
/// ties in first-seen order; top records by relevance (desc), ties in
/// table order.
pub fn summarize(records: &[Record]) -> DashboardSummary {
    let mut agencies: Vec<AgencySummary> = Vec::new();
    let mut relevance_sums: Vec<f64> = Vec::new();

    for r in records {
        let words = word_count(&r.content);
        match agencies.iter().position(|a| a.agency == r.agency) {
            Some(idx) => {
                agencies[idx].record_count += 1;
                agencies[idx].word_count += words;
                relevance_sums[idx] += r.relevance;
            }
            None => {
                agencies.push(AgencySummary {
                    agency: r.agency.clone(),
                    record_count: 1,
                    average_relevance: 0.0,
                    word_count: words,
                });
                relevance_sums.push(r.relevance);
            }
        }
    }

    for (a, sum) in agencies.iter_mut().zip(&relevance_sums) {
        a.average_relevance = sum / a.record_count as f64;
    }
    agencies.sort_by(|a, b| b.record_count.cmp(&a.record_count));

    let mut ranked: Vec<&Record> = records.iter().collect();
    ranked.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let top_records = ranked
        .into_iter()
        .take(TOP_RECORDS)
        .map(|r| TopRecord {
            id: r.id,
            title: r.title.clone(),
            agency: r.agency.clone(),
            relevance: r.relevance,
        })
        .collect();

    DashboardSummary {
        total_records: records.len(),
        total_words: agencies.iter().map(|a| a.word_count).sum(),
        agencies,
        top_records,
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_records;

    #[test]
    fn counts_per_agency() {
        let summary = summarize(&sample_records());
        assert_eq!(summary.total_records, 8);
        assert_eq!(summary.agencies.len(), 5);

        let counts: Vec<(&str, usize)> = summary
            .agencies
            .iter()
            .map(|a| (a.agency.as_str(), a.record_count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("Department of Energy", 2),
                ("Department of Labor", 2),
                ("Department of Transportation", 2),
                ("Environmental Protection Agency", 1),
                ("Department of Agriculture", 1),
            ]
        );
    }

    #[test]
    fn average_relevance_per_agency() {
        let summary = summarize(&sample_records());
        let energy = summary
            .agencies
            .iter()
            .find(|a| a.agency == "Department of Energy")
            .unwrap();
        assert!((energy.average_relevance - (0.95 + 0.82) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn top_records_by_relevance() {
        let summary = summarize(&sample_records());
        let ids: Vec<u64> = summary.top_records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 5, 6]);
    }

    #[test]
    fn word_totals_add_up() {
        let summary = summarize(&sample_records());
        let expected: usize = sample_records()
            .iter()
            .map(|r| r.content.split_whitespace().count())
            .sum();
        assert_eq!(summary.total_words, expected);
    }

    #[test]
    fn empty_table_summarizes_to_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_records, 0);
        assert!(summary.agencies.is_empty());
        assert!(summary.top_records.is_empty());
    }
}
