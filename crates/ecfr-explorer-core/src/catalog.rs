//! The record table: built-in sample data, validation, facets, lookup.
//!
//! The table is built once at start-up and never written afterwards.
//! Loading from disk lives in the application crate; everything here
//! works on an already-resident slice.

use anyhow::{bail, Result};
use std::collections::HashSet;

use crate::models::{Facet, Record};

/// The built-in sample table.
pub fn sample_records() -> Vec<Record> {
    vec![
        record(
            1,
            "Energy Conservation Program for Consumer Products",
            "Part 430",
            "§ 430.32",
            "Department of Energy",
            "Energy and water conservation standards and their compliance dates for \
             residential appliances such as refrigerators, water heaters, and furnaces.",
            0.95,
        ),
        record(
            2,
            "Occupational Safety and Health Standards",
            "Part 1910",
            "§ 1910.132",
            "Department of Labor",
            "General requirements for personal protective equipment, including hazard \
             assessment, equipment selection, and employee training.",
            0.92,
        ),
        record(
            3,
            "National Primary Drinking Water Regulations",
            "Part 141",
            "§ 141.62",
            "Environmental Protection Agency",
            "Maximum contaminant levels for chemical contaminants such as arsenic, \
             nitrate, and fluoride in public water systems.",
            0.88,
        ),
        record(
            4,
            "National Organic Program",
            "Part 205",
            "§ 205.105",
            "Department of Agriculture",
            "Allowed and prohibited substances, methods, and ingredients in organic \
             production and handling.",
            0.78,
        ),
        record(
            5,
            "Hazardous Materials Regulations",
            "Part 172",
            "§ 172.101",
            "Department of Transportation",
            "Purpose and use of the hazardous materials table for shipping papers, \
             marking, labeling, and placarding requirements.",
            0.85,
        ),
        record(
            6,
            "Nuclear Safety Management",
            "Part 830",
            "§ 830.120",
            "Department of Energy",
            "Quality assurance requirements for nuclear facilities, including safety \
             basis documentation and the filing of annual updates.",
            0.82,
        ),
        record(
            7,
            "Recording and Reporting Occupational Injuries and Illnesses",
            "Part 1904",
            "§ 1904.32",
            "Department of Labor",
            "Annual summary requirements, including the deadline for posting the \
             summary and certification by a company executive.",
            0.74,
        ),
        record(
            8,
            "Federal Motor Vehicle Safety Standards",
            "Part 571",
            "§ 571.208",
            "Department of Transportation",
            "Occupant crash protection requirements for passenger cars, trucks, and \
             buses, with exemptions for certain low-volume manufacturers.",
            0.74,
        ),
    ]
}

fn record(
    id: u64,
    title: &str,
    part: &str,
    section: &str,
    agency: &str,
    content: &str,
    relevance: f64,
) -> Record {
    Record {
        id,
        title: title.to_string(),
        part: part.to_string(),
        section: section.to_string(),
        agency: agency.to_string(),
        content: content.to_string(),
        relevance,
    }
}

/// Check the table invariants: non-empty, unique ids, relevance in
/// `[0, 1]`, and a non-empty agency on every record.
pub fn validate(records: &[Record]) -> Result<()> {
    if records.is_empty() {
        bail!("record table is empty");
    }

    let mut seen = HashSet::with_capacity(records.len());
    for r in records {
        if !seen.insert(r.id) {
            bail!("duplicate record id: {}", r.id);
        }
        if !(0.0..=1.0).contains(&r.relevance) {
            bail!(
                "record {}: relevance {} must be in [0.0, 1.0]",
                r.id,
                r.relevance
            );
        }
        if r.agency.trim().is_empty() {
            bail!("record {}: agency must not be empty", r.id);
        }
    }
    Ok(())
}

/// `All` followed by each distinct agency, in first-seen table order.
pub fn facets(records: &[Record]) -> Vec<Facet> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = vec![Facet::All];
    for r in records {
        if seen.insert(r.agency.as_str()) {
            out.push(Facet::Agency(r.agency.clone()));
        }
    }
    out
}

pub fn find_record(records: &[Record], id: u64) -> Option<&Record> {
    records.iter().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_table_is_valid() {
        validate(&sample_records()).unwrap();
    }

    #[test]
    fn facets_dedupe_in_first_seen_order() {
        let names: Vec<String> = facets(&sample_records())
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(
            names,
            vec![
                "All",
                "Department of Energy",
                "Department of Labor",
                "Environmental Protection Agency",
                "Department of Agriculture",
                "Department of Transportation",
            ]
        );
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let mut records = sample_records();
        records[1].id = records[0].id;
        let err = validate(&records).unwrap_err();
        assert!(err.to_string().contains("duplicate record id: 1"));
    }

    #[test]
    fn validate_rejects_out_of_range_relevance() {
        let mut records = sample_records();
        records[2].relevance = 1.5;
        let err = validate(&records).unwrap_err();
        assert!(err.to_string().contains("record 3"));
    }

    #[test]
    fn validate_rejects_empty_table() {
        assert!(validate(&[]).is_err());
    }

    #[test]
    fn find_record_by_id() {
        let records = sample_records();
        assert_eq!(find_record(&records, 4).unwrap().title, "National Organic Program");
        assert!(find_record(&records, 99).is_none());
    }
}
