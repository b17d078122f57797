//! # Medscan
//!
//! Rule-based medical relevance detection for longevity research discovery.
//!
//! Medscan scores free text against a weighted taxonomy of medical and
//! longevity concepts, detects scholarly citations, classifies the
//! structural type of a document, and blends those signals into a bounded
//! confidence score used to gate inclusion in a research explorer.
//!
//! ## Features
//!
//! - Deterministic, explainable `analyze(text)` with no I/O or shared mutable state
//! - Tier-tagged concept taxonomy (built-in or loaded from TOML)
//! - DOI / PMID / arXiv citation detection and ISO date extraction
//! - Paper / report / memo / protocol / proposal classification
//! - Homonym noise filter reported alongside (not folded into) confidence
//! - Strict validation and lenient normalization of discovered-file records
//!
//! ## Example
//!
//! ```rust
//! use medscan::{DocType, MedicalDetector};
//!
//! let detector = MedicalDetector::with_builtin_taxonomy()?;
//! let result = detector.analyze(
//!     "Abstract. Mitochondria decline with aging. Introduction ... \
//!      Methods ... References: doi 10.1038/s41586-020-1234-5",
//! );
//!
//! assert!(result.medical_terms.contains("mitochondrial function"));
//! assert!(result.citations.has_doi);
//! assert_eq!(result.doc_type, DocType::PaperLike);
//! # Ok::<(), medscan::Error>(())
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod cli;
pub mod config;
pub mod detection;
pub mod discovery;
pub mod io;
pub mod observability;
pub mod taxonomy;

// Re-exports for convenience
pub use config::MedscanConfig;
pub use detection::{
    AnalysisResult, CitationSignals, ConceptExplanation, DocType, Explanation, MedicalDetector,
};
pub use discovery::{
    AcceptancePolicy, DiscoveredFile, DiscoveryStatistics, GateDecision, Provenance,
    RejectReason, ValidationResult, compute_statistics, normalize_file, validate_file,
};
pub use taxonomy::{MedicalConcept, Taxonomy, Tier};

/// Error type for medscan operations.
///
/// The analyzer itself never fails; errors only arise when building a
/// detector, loading configuration, or reading and writing record files.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Malformed CLI arguments, unparseable record files, unknown formats |
/// | `OperationFailed` | I/O errors, serialization failures, subscriber init failures |
/// | `InvalidTaxonomy` | Duplicate concept names, empty alias sets, out-of-range weights |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// The concept taxonomy violates one of its invariants.
    ///
    /// Raised when:
    /// - Two concepts share a name (across any tiers)
    /// - A concept has no surface forms
    /// - A weight lies outside `(0, 1]`
    /// - A surface form cannot be compiled into a pattern
    #[error("invalid taxonomy: {0}")]
    InvalidTaxonomy(String),
}

impl Error {
    /// Builds an [`Error::OperationFailed`] from an operation name and any displayable cause.
    pub fn operation(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }
}

/// Result type alias for medscan operations.
pub type Result<T> = std::result::Result<T, Error>;
