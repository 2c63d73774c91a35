//! CLI command handlers.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use docrelay::cache::{FileDirectory, LookupCache, RecordSource};
use docrelay::config::Config;
use docrelay::dispatch::{
    EnvelopeRecognizer, FileRelay, HmacSigner, IncomingFile, OutboxTransport,
};

/// Relay envelope files from disk through the pipeline.
pub(crate) fn cmd_send(config: &Config, paths: &[PathBuf]) -> Result<()> {
    let key_hex = config.signing.resolve_key_hex()?;
    let signer = HmacSigner::from_hex(&key_hex)?;
    let relay = FileRelay::new(
        EnvelopeRecognizer,
        signer,
        OutboxTransport::new(&config.outbox.path),
        config.relay.clone(),
    );

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        files.push(IncomingFile::new(display_name(path), content));
    }

    let outcome = relay.send_files(&files);
    println!(
        "Sent {} of {} file(s) to {}",
        files.len() - outcome.skipped.len(),
        files.len(),
        config.outbox.path.display()
    );
    for file in &outcome.skipped {
        println!("  skipped: {}", file.name);
    }
    Ok(())
}

/// Resolve recipient keys against the directory, through the cache when
/// enabled. Repeated keys in one invocation are served from the cache.
pub(crate) fn cmd_resolve(config: &Config, keys: &[String]) -> Result<()> {
    let directory = FileDirectory::new(&config.directory.path);
    if config.cache.enabled {
        let mut cache = LookupCache::new(directory);
        for key in keys {
            print_resolution(key, cache.get(key)?);
        }
        let stats = cache.stats();
        if keys.len() > 1 {
            println!("(cache: {} hit(s), {} miss(es))", stats.hits, stats.misses);
        }
    } else {
        for key in keys {
            print_resolution(key, directory.try_find(key)?);
        }
    }
    Ok(())
}

/// Print the config file location.
pub(crate) fn cmd_config_path() -> Result<()> {
    println!("{}", Config::path().display());
    Ok(())
}

fn print_resolution(key: &str, record: Option<docrelay::cache::RecipientRecord>) {
    match record {
        Some(record) => println!(
            "{}: {} <{}> (key {})",
            record.id, record.display_name, record.endpoint, record.key_id
        ),
        None => println!("{key}: not found"),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
