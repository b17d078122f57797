//! Medical relevance detection.
//!
//! # Architecture
//!
//! - [`types`]: `AnalysisResult`, `CitationSignals`, `DocType`
//! - [`matcher`]: escaped, boundary-aware alias matching and weighted hit counts
//! - [`citations`]: DOI / PMID / arXiv presence and ISO date extraction
//! - [`doc_type`]: best-of-five structural archetype classifier
//! - [`noise`]: homonym phrase filter
//! - [`confidence`]: bounded blend of hits, citations and archetype
//! - [`detector`]: [`MedicalDetector`], composing all of the above
//!
//! # Detection Flow
//!
//! ```text
//! text
//!   ├─► concept matcher ──► concept hits ─┐
//!   ├─► citation detector ─► citations ───┼─► confidence scorer ─► AnalysisResult
//!   ├─► doc type classifier ► doc type ───┘
//!   ├─► date extractor ────► dates
//!   └─► noise filter ──────► is_noise (reported, not applied)
//! ```

pub mod citations;
pub mod confidence;
pub mod detector;
pub mod doc_type;
pub mod matcher;
pub mod noise;
pub mod types;

pub use citations::{detect_citations, extract_dates};
pub use confidence::{calculate_confidence, doc_type_bonus, round2};
pub use detector::{Explanation, MedicalDetector};
pub use doc_type::{DocTypePattern, DocTypeScore, classify_document, score_doc_types};
pub use matcher::{ConceptExplanation, ConceptMatcher};
pub use noise::{is_noise, noise_matches};
pub use types::{AnalysisResult, CitationSignals, DocType};
