//! Source abstraction for family data.
//!
//! The pipeline only ever asks a backend two questions: which
//! individuals are eligible, and what is the family unit for one of
//! them. Keeping that seam a trait lets other genealogy backends slot
//! in behind the same cache and selector.

use crate::eligible;
use crate::extract::{self, ExtractError};
use crate::gedcom::RecordStore;
use crate::models::FamilyUnit;

pub trait FamilySource {
    /// Ids of all individuals eligible to anchor a family unit, in the
    /// source's stable enumeration order.
    fn eligible_ids(&self) -> Vec<String>;

    /// The complete family unit anchored at `id`.
    fn extract(&self, id: &str) -> Result<FamilyUnit, ExtractError>;
}

impl FamilySource for RecordStore {
    fn eligible_ids(&self) -> Vec<String> {
        eligible::eligible_ids(self)
    }

    fn extract(&self, id: &str) -> Result<FamilyUnit, ExtractError> {
        extract::extract(self, id)
    }
}
