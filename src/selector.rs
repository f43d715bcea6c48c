//! Rotation selector.
//!
//! Picks one family-unit id per run, uniformly at random but avoiding
//! the id shown on the previous run when more than one candidate
//! exists. Memoryless beyond that single last selection: no longer
//! anti-repeat window, no recency weighting.

use anyhow::Result;
use rand::seq::SliceRandom;

/// Choose the next family id from `ids`, avoiding `last_id` when
/// possible. With a single candidate, repetition is unavoidable and
/// that candidate is returned as-is. An empty `ids` is an invariant
/// violation upstream and fails.
pub fn select_family_id(ids: &[String], last_id: Option<&str>) -> Result<String> {
    if ids.is_empty() {
        anyhow::bail!("No family units to select from");
    }
    if ids.len() == 1 {
        return Ok(ids[0].clone());
    }

    let mut pool: Vec<&String> = ids
        .iter()
        .filter(|id| Some(id.as_str()) != last_id)
        .collect();

    // Unreachable with distinct ids and len > 1, but don't panic on
    // malformed input where everything matched last_id.
    if pool.is_empty() {
        pool = ids.iter().collect();
    }

    match pool.choose(&mut rand::thread_rng()) {
        Some(chosen) => Ok((*chosen).clone()),
        None => anyhow::bail!("No family units to select from"),
    }
}
