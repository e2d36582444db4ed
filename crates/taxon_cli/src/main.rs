//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taxon_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use taxon_core::db::open_db_in_memory;
use taxon_core::{CategoryService, SqliteCategoryRepository};

fn main() {
    println!("taxon_core version={}", taxon_core::core_version());
    match smoke_roundtrip() {
        Ok(count) => println!("taxon_core smoke=ok categories={count}"),
        Err(err) => {
            eprintln!("taxon_core smoke=error detail={err}");
            std::process::exit(1);
        }
    }
}

/// Runs one create/list roundtrip against a throwaway in-memory store.
fn smoke_roundtrip() -> Result<usize, Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let repo = SqliteCategoryRepository::try_new(&conn)?;
    let service = CategoryService::new(repo);

    service.create_category("smoke")?;
    Ok(service.list_categories()?.len())
}
