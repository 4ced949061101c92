//! Dashboard statistics.
//!
//! Summarizes the loaded record table: totals, a per-agency breakdown,
//! and the highest-relevance records. Used by `ecfr stats` and
//! `GET /api/stats`.

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use ecfr_explorer_core::stats::{summarize, DashboardSummary};

use crate::catalog::Catalog;

/// A [`DashboardSummary`] stamped with its generation time.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub generated_at: String,
    #[serde(flatten)]
    pub summary: DashboardSummary,
}

pub fn build_report(catalog: &Catalog) -> StatsReport {
    StatsReport {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        summary: summarize(catalog.records()),
    }
}

/// Run the stats command: summarize and print.
pub fn run_stats(catalog: &Catalog, json: bool) -> Result<()> {
    let report = build_report(catalog);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let s = &report.summary;
    println!("eCFR Explorer — Dashboard");
    println!("=========================");
    println!();
    println!("  Records:     {}", s.total_records);
    println!("  Agencies:    {}", s.agencies.len());
    println!("  Words:       {}", s.total_words);

    if !s.agencies.is_empty() {
        println!();
        println!("  By agency:");
        println!(
            "  {:<36} {:>7} {:>9} {:>7}",
            "AGENCY", "RECORDS", "AVG REL", "WORDS"
        );
        println!("  {}", "-".repeat(62));
        for a in &s.agencies {
            println!(
                "  {:<36} {:>7} {:>9.2} {:>7}",
                a.agency, a.record_count, a.average_relevance, a.word_count
            );
        }
    }

    if !s.top_records.is_empty() {
        println!();
        println!("  Top records:");
        for r in &s.top_records {
            println!("  [{:.2}] #{} {} ({})", r.relevance, r.id, r.title, r.agency);
        }
    }

    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_flattens_summary_fields() {
        let catalog = Catalog::sample().unwrap();
        let json = serde_json::to_value(build_report(&catalog)).unwrap();
        assert_eq!(json["total_records"], 8);
        assert!(json["generated_at"].as_str().unwrap().ends_with('Z'));
        assert_eq!(json["agencies"].as_array().unwrap().len(), 5);
    }
}
