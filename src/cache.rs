//! Content-hash-gated family-unit cache.
//!
//! Extracting every eligible family is the expensive part of a run, so
//! the full list is persisted alongside a SHA-256 digest of the source
//! file. While the digest matches, runs reuse the cached list; any byte
//! change to the source (even incidental re-export formatting) forces a
//! full rebuild. Simplicity over semantic diffing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::models::{CacheDoc, FamilyUnit};
use crate::sources::FamilySource;

/// SHA-256 of the file's exact byte content, as lowercase hex.
pub fn hash_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open source file: {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file
            .read(&mut buf)
            .with_context(|| format!("Failed to read source file: {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Load the cache document. A missing or unparseable file is a cache
/// miss, never an error.
pub fn load(path: &Path) -> Option<CacheDoc> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(doc) => Some(doc),
        Err(err) => {
            warn!(path = %path.display(), %err, "discarding unreadable cache file");
            None
        }
    }
}

/// Whether `cache` can be reused for a source file with `current_hash`.
pub fn is_valid(cache: Option<&CacheDoc>, current_hash: &str) -> bool {
    cache.is_some_and(|doc| doc.source_hash == current_hash)
}

/// Extract every eligible family unit, in the source's enumeration
/// order. A source with no eligible individuals is a hard stop: no
/// family unit could ever be selected from it.
pub fn build(source: &dyn FamilySource) -> Result<Vec<FamilyUnit>> {
    let ids = source.eligible_ids();
    if ids.is_empty() {
        anyhow::bail!("No eligible families found in GEDCOM source");
    }
    ids.iter()
        .map(|id| {
            source
                .extract(id)
                .with_context(|| format!("Failed to extract family unit for {}", id))
        })
        .collect()
}

/// Persist the cache document, fully replacing any previous one.
pub fn save(path: &Path, source_hash: &str, families: &[FamilyUnit]) -> Result<()> {
    let doc = CacheDoc {
        source_hash: source_hash.to_string(),
        families: families.to_vec(),
    };
    let json = serde_json::to_string_pretty(&doc)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write cache file: {}", path.display()))?;
    Ok(())
}
