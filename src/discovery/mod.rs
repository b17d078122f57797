//! Discovery records.
//!
//! Turns analyses into persisted [`DiscoveredFile`] records, validates and
//! normalizes records read back from disk, gates analyses by policy and
//! summarizes record collections.

pub mod dedup;
pub mod gate;
pub mod record;
pub mod statistics;
pub mod validation;

pub use dedup::fingerprint;
pub use gate::{AcceptancePolicy, GateDecision, RejectReason};
pub use record::{DiscoveredFile, Provenance, extract_snippet};
pub use statistics::{DiscoveryStatistics, compute_statistics};
pub use validation::{
    FieldType, OPTIONAL_FIELDS, REQUIRED_FIELDS, ValidationIssue, ValidationResult,
    normalize_file, validate_file,
};
