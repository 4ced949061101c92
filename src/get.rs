//! Record retrieval by ID.
//!
//! Used by `ecfr get` and `GET /api/records/{id}`.

use anyhow::Result;

use crate::catalog::Catalog;

/// CLI entry point: print one record to stdout.
pub fn run_get(catalog: &Catalog, id: u64) -> Result<()> {
    let record = catalog.get(id)?;

    println!("--- Record ---");
    println!("id:        {}", record.id);
    println!("title:     {}", record.title);
    println!("agency:    {}", record.agency);
    println!("part:      {}", record.part);
    println!("section:   {}", record.section);
    println!("relevance: {:.2}", record.relevance);
    println!();
    println!("--- Content ---");
    println!("{}", record.content);

    Ok(())
}
