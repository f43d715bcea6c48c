//! Core data models for extracted family units.
//!
//! These types define the JSON contracts for the two on-disk artifacts:
//! the family-unit cache (`families.json`) and the display output
//! (`current.json`). The rendering template depends on two distinct
//! optionality conventions: parent pairs are always present as objects
//! (members may be `null`), while a child's `second` spouse and the
//! `child` marker are absent keys when unset. Keep them that way.

use serde::{Deserialize, Serialize};

/// Flat projection of one individual for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    /// 4-digit birth year, or `null` when unknown.
    pub birth: Option<String>,
    /// 4-digit death year, or `null` when unknown.
    pub death: Option<String>,
    /// Set to `true` only when this person appears in a children list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child: Option<bool>,
}

/// Father/mother pair. Always serialized as an object, even when both
/// members are unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentPair {
    pub father: Option<Person>,
    pub mother: Option<Person>,
}

impl ParentPair {
    pub fn empty() -> Self {
        ParentPair {
            father: None,
            mother: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.father.is_none() && self.mother.is_none()
    }
}

/// One child of the subject's family, with an optional spouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildEntry {
    pub first: Person,
    /// The child's own spouse. The key is absent (not `null`) when the
    /// child has no recorded spouse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<Person>,
}

/// The unit of extraction, caching, and selection: one subject plus
/// spouse, both parent pairs, and children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyUnit {
    /// The subject individual's GEDCOM xref id (e.g. `@I001@`).
    pub id: String,
    pub subject: Person,
    pub spouse: Option<Person>,
    pub subject_parents: ParentPair,
    pub spouse_parents: ParentPair,
    pub children: Vec<ChildEntry>,
}

/// The cache artifact: all extracted family units, gated by a content
/// hash of the source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheDoc {
    pub source_hash: String,
    pub families: Vec<FamilyUnit>,
}

/// The output artifact consumed by the display template. Identical to a
/// cached [`FamilyUnit`] except the identifier field is renamed from
/// `id` to `last_family_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDoc {
    pub last_family_id: String,
    pub subject: Person,
    pub spouse: Option<Person>,
    pub subject_parents: ParentPair,
    pub spouse_parents: ParentPair,
    pub children: Vec<ChildEntry>,
}

impl From<FamilyUnit> for OutputDoc {
    fn from(unit: FamilyUnit) -> Self {
        OutputDoc {
            last_family_id: unit.id,
            subject: unit.subject,
            spouse: unit.spouse,
            subject_parents: unit.subject_parents,
            spouse_parents: unit.spouse_parents,
            children: unit.children,
        }
    }
}
