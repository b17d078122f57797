//! Homonym noise filter.
//!
//! Phrases that share vocabulary with the taxonomy but signal a non-medical
//! context. The flag is advisory: it is reported next to confidence and never
//! changes hits or confidence.
// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use regex::Regex;
use std::sync::LazyLock;

/// A known false-positive phrase.
#[derive(Debug)]
pub struct NoisePattern {
    /// The regex pattern to match.
    pub pattern: Regex,
    /// Human-readable description of the phrase.
    pub description: &'static str,
}

/// Static noise phrase patterns.
pub static NOISE_PATTERNS: LazyLock<Vec<NoisePattern>> = LazyLock::new(|| {
    vec![
        NoisePattern {
            pattern: Regex::new(r"(?i)\benergy\s+drinks?\b").expect("static regex: energy drink"),
            description: "energy drink",
        },
        NoisePattern {
            pattern: Regex::new(r"(?i)\btherapy\s+(dogs?|animals?|pets?)\b")
                .expect("static regex: therapy dog"),
            description: "therapy dog/animal",
        },
        NoisePattern {
            pattern: Regex::new(r"(?i)\bretail\s+therapy\b").expect("static regex: retail therapy"),
            description: "retail therapy",
        },
        NoisePattern {
            pattern: Regex::new(r"(?i)\bgas\s+(stations?|pumps?)\b")
                .expect("static regex: gas station"),
            description: "gas station/pump",
        },
        NoisePattern {
            pattern: Regex::new(r"(?i)\bcell\s*phones?\b").expect("static regex: cell phone"),
            description: "cell phone",
        },
        NoisePattern {
            pattern: Regex::new(r"(?i)\bbattery\s+(life|cells?)\b")
                .expect("static regex: battery cell"),
            description: "battery life/cell",
        },
        NoisePattern {
            pattern: Regex::new(r"(?i)\b(aged|aging|ageing)\s+(wine|whiske?y|cheese|beef)\b")
                .expect("static regex: aged food"),
            description: "aged wine/whisky/cheese/beef",
        },
    ]
});

/// Whether `text` contains any known noise phrase.
#[must_use]
pub fn is_noise(text: &str) -> bool {
    NOISE_PATTERNS.iter().any(|n| n.pattern.is_match(text))
}

/// Descriptions of every noise phrase found in `text`.
#[must_use]
pub fn noise_matches(text: &str) -> Vec<&'static str> {
    NOISE_PATTERNS
        .iter()
        .filter(|n| n.pattern.is_match(text))
        .map(|n| n.description)
        .collect()
}
