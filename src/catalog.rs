//! Record table loading.
//!
//! The table comes from `[data].records_path` (a JSON array of records)
//! or, when unset, the built-in sample table. It is validated once and
//! then held read-only for the life of the process, together with the
//! facet list derived from it.

use anyhow::{bail, Context, Result};
use std::path::Path;

use ecfr_explorer_core::catalog::{facets, find_record, sample_records, validate};
use ecfr_explorer_core::models::{Facet, Record};

use crate::config::Config;

/// The loaded record table and its facets.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<Record>,
    facets: Vec<Facet>,
}

impl Catalog {
    /// Validate `records` and derive the facet list.
    pub fn new(records: Vec<Record>) -> Result<Self> {
        validate(&records)?;
        let facets = facets(&records);
        Ok(Self { records, facets })
    }

    pub fn sample() -> Result<Self> {
        Self::new(sample_records())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// `All` first, then agencies in table order.
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub fn get(&self, id: u64) -> Result<&Record> {
        find_record(&self.records, id).ok_or_else(|| anyhow::anyhow!("record not found: {}", id))
    }

    /// Turn a user-supplied agency name into a facet known to this table.
    ///
    /// `None` and `"All"` select everything; any other name must match an
    /// agency exactly.
    pub fn resolve_facet(&self, agency: Option<&str>) -> Result<Facet> {
        let facet = Facet::parse(agency);
        if !self.facets.contains(&facet) {
            bail!("invalid agency: '{}'", facet);
        }
        Ok(facet)
    }
}

/// Load the catalog configured in `config`.
pub fn load_catalog(config: &Config) -> Result<Catalog> {
    match &config.data.records_path {
        Some(path) => {
            let records = read_records(path)?;
            let catalog = Catalog::new(records)
                .with_context(|| format!("Invalid record file: {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                records = catalog.records().len(),
                "loaded record table"
            );
            Ok(catalog)
        }
        None => {
            let catalog = Catalog::sample()?;
            tracing::debug!(records = catalog.records().len(), "using built-in sample records");
            Ok(catalog)
        }
    }
}

fn read_records(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse record file: {}", path.display()))
}
