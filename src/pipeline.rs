//! One full pipeline run.
//!
//! Hash the source, rebuild the cache if the hash moved, recover the
//! previous selection from the prior output document, pick the next
//! family, and write the output. Fail-fast: any error leaves the
//! existing cache and output artifacts untouched.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cache;
use crate::config::Config;
use crate::gedcom::RecordStore;
use crate::models::{CacheDoc, FamilyUnit, OutputDoc};
use crate::selector;

pub fn run(config: &Config, force_rebuild: bool, dry_run: bool) -> Result<()> {
    let source_path = config.source_path();
    let cache_path = config.cache_path();
    let current_path = config.current_path();

    let current_hash = cache::hash_file(source_path)?;
    let cached = cache::load(&cache_path);
    let cache_valid = !force_rebuild && cache::is_valid(cached.as_ref(), &current_hash);

    if dry_run {
        return report_dry_run(source_path, cache_valid, cached);
    }

    let families = if cache_valid {
        // is_valid only holds for a loaded document.
        let doc = cached.context("valid cache disappeared")?;
        println!("Using cached data ({} families)", doc.families.len());
        doc.families
    } else {
        rebuild_cache(config, source_path, &cache_path, &current_hash)?
    };

    if families.is_empty() {
        anyhow::bail!("Cache contains no family units; delete {} and rerun", cache_path.display());
    }

    let last_id = read_last_id(&current_path);
    debug!(last_id = last_id.as_deref().unwrap_or("-"), "previous selection");

    let ids: Vec<String> = families.iter().map(|f| f.id.clone()).collect();
    let selected_id = selector::select_family_id(&ids, last_id.as_deref())?;

    let selected = families
        .into_iter()
        .find(|f| f.id == selected_id)
        .context("selected id missing from cache")?;

    write_output(&current_path, selected)?;
    println!("Selected family {} -> {}", selected_id, current_path.display());
    Ok(())
}

fn rebuild_cache(
    config: &Config,
    source_path: &Path,
    cache_path: &Path,
    current_hash: &str,
) -> Result<Vec<FamilyUnit>> {
    println!("Parsing GEDCOM file: {}", source_path.display());
    let store = RecordStore::load(source_path)?;
    info!(
        individuals = store.individual_count(),
        families = store.family_count(),
        "record store loaded"
    );

    let families = cache::build(&store)?;
    std::fs::create_dir_all(&config.output.dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output.dir.display()
        )
    })?;
    cache::save(cache_path, current_hash, &families)?;
    println!("Cached {} families to {}", families.len(), cache_path.display());
    Ok(families)
}

fn report_dry_run(
    source_path: &Path,
    cache_valid: bool,
    cached: Option<CacheDoc>,
) -> Result<()> {
    println!("run (dry-run)");
    if cache_valid {
        let doc = cached.context("valid cache disappeared")?;
        println!("  cache: valid ({} families)", doc.families.len());
        return Ok(());
    }
    let store = RecordStore::load(source_path)?;
    let eligible = crate::eligible::eligible_ids(&store);
    println!("  cache: stale or missing, would rebuild");
    println!("  individuals: {}", store.individual_count());
    println!("  eligible families: {}", eligible.len());
    Ok(())
}

/// Last selected id, recovered from the previous output document. The
/// output doubles as the rotation state record; a missing or corrupt
/// file simply means no prior selection.
fn read_last_id(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let value: serde_json::Value = serde_json::from_str(&content).ok()?;
    value
        .get("last_family_id")
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Serialize first, write once: a failed run must never truncate the
/// previous output document.
fn write_output(path: &Path, unit: FamilyUnit) -> Result<()> {
    let doc = OutputDoc::from(unit);
    let json = serde_json::to_string_pretty(&doc)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    Ok(())
}
