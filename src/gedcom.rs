//! GEDCOM record store.
//!
//! Parses a GEDCOM file into two flat, read-only maps (individual id →
//! record, family id → record) plus an insertion-order id list, and
//! exposes the graph traversals the extractor needs (`parents_of`,
//! `spouse_families_of`, `spouse_of`, `children_of`) as lookups over
//! those maps. Records hold only xref ids, never references to each
//! other, so the cyclic parent↔child pointer graph never turns into an
//! ownership problem.
//!
//! Parsing is deliberately permissive: unknown tags are skipped and a
//! pointer to a record that does not exist resolves to absent rather
//! than failing the run. This is not a GEDCOM validator.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// One `INDI` record. Name and date values are kept raw; splitting and
/// year extraction happen at projection time.
#[derive(Debug, Clone, Default)]
pub struct Individual {
    pub id: String,
    /// Raw `NAME` value, e.g. `John /Doe/`. First NAME wins.
    pub name: Option<String>,
    /// Raw `DATE` value under `BIRT`.
    pub birth_date: Option<String>,
    /// Raw `DATE` value under `DEAT`.
    pub death_date: Option<String>,
    /// `FAMS` pointers, in file order.
    pub fams: Vec<String>,
    /// First `FAMC` pointer.
    pub famc: Option<String>,
}

/// One `FAM` (union) record.
#[derive(Debug, Clone, Default)]
pub struct Family {
    pub id: String,
    pub husband: Option<String>,
    pub wife: Option<String>,
    /// `CHIL` pointers, in file order.
    pub children: Vec<String>,
}

/// Immutable lookup store over one parsed GEDCOM file.
#[derive(Debug, Default)]
pub struct RecordStore {
    individuals: HashMap<String, Individual>,
    families: HashMap<String, Family>,
    /// Individual ids in file order; enumeration order for eligibility.
    order: Vec<String>,
}

/// A single tokenized GEDCOM line: `LEVEL [@XREF@] TAG [VALUE]`.
#[derive(Debug, PartialEq)]
struct GedLine<'a> {
    level: u32,
    xref: Option<&'a str>,
    tag: &'a str,
    value: Option<&'a str>,
}

fn parse_line(line: &str) -> Option<GedLine<'_>> {
    let line = line.trim_start_matches('\u{feff}').trim();
    if line.is_empty() {
        return None;
    }

    let mut parts = line.splitn(2, ' ');
    let level: u32 = parts.next()?.parse().ok()?;
    let rest = parts.next()?.trim_start();

    // An xref id (@...@) may sit between the level and the tag.
    if let Some(stripped) = rest.strip_prefix('@') {
        let end = stripped.find('@')?;
        let xref = &rest[..end + 2];
        let tag_and_value = rest[end + 2..].trim_start();
        let mut tv = tag_and_value.splitn(2, ' ');
        let tag = tv.next()?;
        if tag.is_empty() {
            return None;
        }
        return Some(GedLine {
            level,
            xref: Some(xref),
            tag,
            value: tv.next(),
        });
    }

    let mut tv = rest.splitn(2, ' ');
    let tag = tv.next()?;
    Some(GedLine {
        level,
        xref: None,
        tag,
        value: tv.next(),
    })
}

/// Which level-0 record the parser is currently inside.
enum CurrentRecord {
    Individual(Individual),
    Family(Family),
    Other,
}

/// Which level-1 event is awaiting a `DATE` sub-line.
#[derive(PartialEq)]
enum PendingDate {
    None,
    Birth,
    Death,
}

impl RecordStore {
    /// Parse GEDCOM source text into a store. Never fails: lines that
    /// don't tokenize are skipped with a warning.
    pub fn parse(text: &str) -> RecordStore {
        let mut store = RecordStore::default();
        let mut current = CurrentRecord::Other;
        let mut pending = PendingDate::None;

        for (lineno, raw) in text.lines().enumerate() {
            let Some(line) = parse_line(raw) else {
                if !raw.trim().is_empty() {
                    warn!(line = lineno + 1, "skipping malformed GEDCOM line");
                }
                continue;
            };

            if line.level == 0 {
                store.flush(std::mem::replace(&mut current, CurrentRecord::Other));
                pending = PendingDate::None;
                current = match (line.xref, line.tag) {
                    (Some(id), "INDI") => CurrentRecord::Individual(Individual {
                        id: id.to_string(),
                        ..Individual::default()
                    }),
                    (Some(id), "FAM") => CurrentRecord::Family(Family {
                        id: id.to_string(),
                        ..Family::default()
                    }),
                    _ => CurrentRecord::Other,
                };
                continue;
            }

            if line.level == 1 {
                pending = PendingDate::None;
            }

            match &mut current {
                CurrentRecord::Individual(indi) => match (line.level, line.tag) {
                    (1, "NAME") => {
                        if indi.name.is_none() {
                            indi.name = line.value.map(|v| v.trim().to_string());
                        }
                    }
                    (1, "BIRT") => pending = PendingDate::Birth,
                    (1, "DEAT") => pending = PendingDate::Death,
                    (1, "FAMS") => {
                        if let Some(v) = line.value {
                            indi.fams.push(v.trim().to_string());
                        }
                    }
                    (1, "FAMC") => {
                        if indi.famc.is_none() {
                            indi.famc = line.value.map(|v| v.trim().to_string());
                        }
                    }
                    (2, "DATE") => {
                        let slot = match pending {
                            PendingDate::Birth => Some(&mut indi.birth_date),
                            PendingDate::Death => Some(&mut indi.death_date),
                            PendingDate::None => None,
                        };
                        if let Some(slot) = slot {
                            if slot.is_none() {
                                *slot = line.value.map(|v| v.trim().to_string());
                            }
                        }
                    }
                    _ => {}
                },
                CurrentRecord::Family(fam) => match (line.level, line.tag) {
                    (1, "HUSB") => fam.husband = line.value.map(|v| v.trim().to_string()),
                    (1, "WIFE") => fam.wife = line.value.map(|v| v.trim().to_string()),
                    (1, "CHIL") => {
                        if let Some(v) = line.value {
                            fam.children.push(v.trim().to_string());
                        }
                    }
                    _ => {}
                },
                CurrentRecord::Other => {}
            }
        }

        store.flush(current);
        debug!(
            individuals = store.individuals.len(),
            families = store.families.len(),
            "parsed GEDCOM source"
        );
        store
    }

    /// Read and parse a GEDCOM file.
    pub fn load(path: &Path) -> Result<RecordStore> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read GEDCOM file: {}", path.display()))?;
        Ok(RecordStore::parse(&text))
    }

    fn flush(&mut self, record: CurrentRecord) {
        match record {
            CurrentRecord::Individual(indi) => {
                if !self.individuals.contains_key(&indi.id) {
                    self.order.push(indi.id.clone());
                }
                self.individuals.insert(indi.id.clone(), indi);
            }
            CurrentRecord::Family(fam) => {
                self.families.insert(fam.id.clone(), fam);
            }
            CurrentRecord::Other => {}
        }
    }

    pub fn individual(&self, id: &str) -> Option<&Individual> {
        self.individuals.get(id)
    }

    pub fn family(&self, id: &str) -> Option<&Family> {
        self.families.get(id)
    }

    /// Individual ids in file order.
    pub fn individual_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn individual_count(&self) -> usize {
        self.individuals.len()
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// The husband and wife of the family where `indi` is listed as a
    /// child. Either may be absent; no child-family link yields
    /// `(None, None)`.
    pub fn parents_of(&self, indi: &Individual) -> (Option<&Individual>, Option<&Individual>) {
        let Some(fam) = indi.famc.as_deref().and_then(|id| self.family(id)) else {
            return (None, None);
        };
        (
            fam.husband.as_deref().and_then(|id| self.individual(id)),
            fam.wife.as_deref().and_then(|id| self.individual(id)),
        )
    }

    /// All families where `indi` appears as a spouse, in file order.
    /// Dangling `FAMS` pointers are skipped.
    pub fn spouse_families_of(&self, indi: &Individual) -> Vec<&Family> {
        indi.fams
            .iter()
            .filter_map(|id| self.family(id))
            .collect()
    }

    /// The first spouse-family, the one treated as "current" by
    /// eligibility and extraction. Strictly the first `FAMS` pointer: a
    /// dangling first pointer yields `None`, later families never
    /// substitute for it.
    pub fn first_spouse_family(&self, indi: &Individual) -> Option<&Family> {
        indi.fams.first().and_then(|id| self.family(id))
    }

    /// The other spouse in `fam`, or `None` when `indi_id` is not a
    /// spouse there or the other spouse is unrecorded/dangling.
    pub fn spouse_of(&self, indi_id: &str, fam: &Family) -> Option<&Individual> {
        let other = if fam.husband.as_deref() == Some(indi_id) {
            fam.wife.as_deref()
        } else if fam.wife.as_deref() == Some(indi_id) {
            fam.husband.as_deref()
        } else {
            None
        };
        other.and_then(|id| self.individual(id))
    }

    /// Children of `fam` in file order, skipping dangling pointers.
    pub fn children_of(&self, fam: &Family) -> Vec<&Individual> {
        fam.children
            .iter()
            .filter_map(|id| self.individual(id))
            .collect()
    }
}
