//! # GEDCOM Rotor
//!
//! Extracts displayable family units from a GEDCOM genealogy file and
//! rotates one per run into a fixed JSON document for a display
//! template.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌────────────┐   ┌───────────────┐
//! │ GEDCOM file│──▶│ RecordStore │──▶│ Eligibility +  │
//! │  (.ged)    │   │ (id → rec)  │   │ Extraction     │
//! └────────────┘   └────────────┘   └───────┬───────┘
//!                                           │
//!                     ┌─────────────────────┤
//!                     ▼                     ▼
//!               ┌────────────┐       ┌────────────┐
//!               │ families    │──────▶│ current     │
//!               │ .json cache │ select│ .json output│
//!               └────────────┘       └────────────┘
//! ```
//!
//! The cache is gated on a SHA-256 digest of the source file; the
//! previous output document doubles as the rotation state (its
//! `last_family_id` is avoided on the next selection).
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | JSON data types for cache and output |
//! | [`gedcom`] | GEDCOM parsing and record store |
//! | [`project`] | Individual → display projection |
//! | [`eligible`] | Display-subject eligibility filter |
//! | [`extract`] | Family-unit assembly |
//! | [`cache`] | Hash-gated persistence |
//! | [`selector`] | Anti-repeat rotation |
//! | [`pipeline`] | One full run |
//! | [`sources`] | Backend abstraction |

pub mod cache;
pub mod config;
pub mod eligible;
pub mod extract;
pub mod gedcom;
pub mod models;
pub mod pipeline;
pub mod project;
pub mod selector;
pub mod sources;
