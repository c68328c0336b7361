//! CLI `doctor` command: inspect the configured store and print a health report.

use anyhow::{Context, Result};

use recall::config::RecallConfig;
use recall::db::BackendConfig;
use recall::entry::HealthReport;

/// Run store diagnostics and print a health report.
pub fn doctor(config: &RecallConfig) -> Result<()> {
    let backend = BackendConfig::parse(&config.storage.db_url)
        .context("invalid storage.db_url")?;

    let Some(report) = health_report(&backend, config)? else {
        if let BackendConfig::Sqlite { path } = &backend {
            println!("Database: not found at {}", path.display());
        }
        println!("Run `recall init` to create it.");
        return Ok(());
    };

    println!("Recall Health Report");
    println!("====================");
    println!();
    println!("Backend:           {}", report.backend);
    if let BackendConfig::Sqlite { path } = &backend {
        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        println!("Database:          {}", path.display());
        println!("File size:         {}", format_bytes(file_size));
        println!("Search strategy:   {}", config.storage.sqlite_search);
    }
    println!(
        "Vector extension:  {}",
        report.vector_extension.as_deref().unwrap_or("(not available)")
    );
    println!("Entries:           {}", report.entry_count);
    println!();
    if report.integrity_ok {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   FAILED ({})", report.integrity_details);
        println!();
        println!("Recovery steps:");
        println!("  1. Restore from a backup of the database file");
        println!("  2. Or export from a good copy and reimport:");
        println!("     recall export > backup.json");
        println!("     recall --db-url sqlite:///path/to/new.db import backup.json");
    }

    Ok(())
}

/// Health of an existing store. Never creates or alters schema; `None` when the
/// SQLite file does not exist yet.
fn health_report(backend: &BackendConfig, config: &RecallConfig) -> Result<Option<HealthReport>> {
    if let BackendConfig::Sqlite { path } = backend {
        if !path.exists() {
            return Ok(None);
        }
    }

    let store = recall::db::open_store(backend, config.storage.sqlite_search);
    let report = store.health().context("failed to run health check")?;
    Ok(Some(report))
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
