//! Acceptance gate.
//!
//! Decides whether an analysis is kept as a discovery record. Checks run in
//! a fixed order and the first failing check names the rejection.

use crate::detection::AnalysisResult;
use serde::{Deserialize, Serialize};

/// Why an analysis was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// A noise phrase was present and noise is dropped.
    Noise,
    /// No concept matched.
    NoMedicalTerms,
    /// Confidence fell below the threshold.
    LowConfidence {
        /// The analysis confidence.
        confidence: f64,
        /// The configured minimum.
        threshold: f64,
    },
}

impl RejectReason {
    /// Returns the metric label for this reason.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Noise => "noise",
            Self::NoMedicalTerms => "no_medical_terms",
            Self::LowConfidence { .. } => "low_confidence",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LowConfidence {
                confidence,
                threshold,
            } => write!(f, "confidence {confidence:.2} below {threshold:.2}"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Gate outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GateDecision {
    /// Keep the record.
    Accept,
    /// Drop the record.
    Reject(RejectReason),
}

impl GateDecision {
    /// Whether the record is kept.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

/// Thresholds applied to every analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptancePolicy {
    /// Minimum confidence, inclusive.
    pub min_confidence: f64,
    /// Reject documents containing noise phrases.
    pub drop_noise: bool,
    /// Reject documents without any matched concept.
    pub require_terms: bool,
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            drop_noise: true,
            require_terms: true,
        }
    }
}

impl AcceptancePolicy {
    /// Evaluates noise, then terms, then confidence.
    #[must_use]
    pub fn evaluate(&self, analysis: &AnalysisResult) -> GateDecision {
        let decision = if self.drop_noise && analysis.is_noise {
            GateDecision::Reject(RejectReason::Noise)
        } else if self.require_terms && !analysis.has_terms() {
            GateDecision::Reject(RejectReason::NoMedicalTerms)
        } else if analysis.confidence < self.min_confidence {
            GateDecision::Reject(RejectReason::LowConfidence {
                confidence: analysis.confidence,
                threshold: self.min_confidence,
            })
        } else {
            GateDecision::Accept
        };

        if let GateDecision::Reject(reason) = decision {
            metrics::counter!("medscan_records_rejected_total", "reason" => reason.as_str())
                .increment(1);
        }
        decision
    }
}
