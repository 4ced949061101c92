//! Record search frontend.
//!
//! [`search_records`] resolves the agency facet and limit, then delegates
//! to the core filter/ranker. Used by both `ecfr search` and
//! `POST /api/search`.

use anyhow::Result;
use serde::Serialize;

use ecfr_explorer_core::models::{Facet, Record};
use ecfr_explorer_core::search::search_with_limit;

use crate::catalog::Catalog;
use crate::config::Config;

/// Structured search response (also the `POST /api/search` body).
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub agency: Facet,
    pub results: Vec<Record>,
}

/// Search `catalog`. An unknown agency is an error; an empty query
/// yields an empty result list.
pub fn search_records(
    config: &Config,
    catalog: &Catalog,
    query: &str,
    agency: Option<&str>,
    limit: Option<usize>,
) -> Result<SearchResponse> {
    let facet = catalog.resolve_facet(agency)?;
    let limit = limit.unwrap_or(config.search.final_limit);

    let results = search_with_limit(catalog.records(), query, &facet, limit);
    tracing::debug!(query, agency = %facet, hits = results.len(), "search");

    Ok(SearchResponse {
        query: query.to_string(),
        agency: facet,
        results,
    })
}

/// CLI entry point: search and print to stdout.
pub fn run_search(
    config: &Config,
    catalog: &Catalog,
    query: &str,
    agency: Option<&str>,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let response = search_records(config, catalog, query, agency, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if response.results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, record) in response.results.iter().enumerate() {
        println!(
            "{}. [{:.2}] {} / {}",
            i + 1,
            record.relevance,
            record.agency,
            record.title
        );
        println!("    citation: {} {}", record.part, record.section);
        println!("    excerpt: \"{}\"", excerpt(&record.content, 160));
        println!("    id: {}", record.id);
        println!();
    }

    Ok(())
}

/// First `max_chars` characters of `text`, with an ellipsis if cut.
fn excerpt(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    let flat = flat.trim();
    if flat.chars().count() <= max_chars {
        return flat.to_string();
    }
    let cut: String = flat.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
