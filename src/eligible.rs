//! Eligibility filter.
//!
//! An individual can anchor a displayed family unit only when every
//! section of the pedigree chart has at least one populated box: a
//! spousal family, at least one child in it, and at least one known
//! parent on either the subject's or the spouse's side.

use crate::gedcom::{Individual, RecordStore};

/// Whether `indi` qualifies as a display subject.
pub fn is_eligible(store: &RecordStore, indi: &Individual) -> bool {
    // Only the first spouse-family counts as the current marriage.
    let Some(family) = store.first_spouse_family(indi) else {
        return false;
    };

    if store.children_of(family).is_empty() {
        return false;
    }

    let (father, mother) = store.parents_of(indi);
    if father.is_some() || mother.is_some() {
        return true;
    }

    match store.spouse_of(&indi.id, family) {
        Some(spouse) => {
            let (sf, sm) = store.parents_of(spouse);
            sf.is_some() || sm.is_some()
        }
        None => false,
    }
}

/// Ids of all eligible individuals, in the store's file order. Each id
/// appears at most once.
pub fn eligible_ids(store: &RecordStore) -> Vec<String> {
    store
        .individual_ids()
        .filter(|id| {
            store
                .individual(id)
                .is_some_and(|indi| is_eligible(store, indi))
        })
        .map(str::to_string)
        .collect()
}
