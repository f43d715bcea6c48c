//! Family-unit extraction.
//!
//! Walks the record store outward from one subject individual and
//! assembles the complete [`FamilyUnit`]: subject, spouse from the
//! first spouse-family, both parent pairs, and the children of that
//! family in file order (each with their own spouse when one resolves).
//! Extraction either produces the full record or fails; there are no
//! partial results.

use crate::gedcom::{Individual, RecordStore};
use crate::models::{ChildEntry, FamilyUnit, ParentPair};
use crate::project::{project, project_child};

/// Extraction failure. An unknown id is a caller bug — eligible ids are
/// computed against the same store — but it must fail loudly, never
/// produce an empty record.
#[derive(Debug)]
pub enum ExtractError {
    UnknownIndividual(String),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::UnknownIndividual(id) => {
                write!(f, "individual {} not found in record store", id)
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// Assemble the family unit anchored at `id`.
pub fn extract(store: &RecordStore, id: &str) -> Result<FamilyUnit, ExtractError> {
    let subject = store
        .individual(id)
        .ok_or_else(|| ExtractError::UnknownIndividual(id.to_string()))?;

    let family = store.first_spouse_family(subject);
    let spouse = family.and_then(|fam| store.spouse_of(id, fam));

    let children = family
        .map(|fam| {
            store
                .children_of(fam)
                .into_iter()
                .map(|child| child_entry(store, child))
                .collect()
        })
        .unwrap_or_default();

    Ok(FamilyUnit {
        id: id.to_string(),
        subject: project(subject),
        spouse: spouse.map(project),
        subject_parents: parent_pair(store, Some(subject)),
        spouse_parents: parent_pair(store, spouse),
        children,
    })
}

fn parent_pair(store: &RecordStore, indi: Option<&Individual>) -> ParentPair {
    match indi {
        Some(indi) => {
            let (father, mother) = store.parents_of(indi);
            ParentPair {
                father: father.map(project),
                mother: mother.map(project),
            }
        }
        None => ParentPair::empty(),
    }
}

fn child_entry(store: &RecordStore, child: &Individual) -> ChildEntry {
    let spouse = store
        .first_spouse_family(child)
        .and_then(|fam| store.spouse_of(&child.id, fam));
    ChildEntry {
        first: project_child(child),
        second: spouse.map(project),
    }
}
