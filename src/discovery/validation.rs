//! Discovered-file validation and normalization.
//!
//! [`validate_file`] is strict: it reports every schema problem in a candidate
//! JSON record. [`normalize_file`] is lenient: it repairs optional fields
//! first and only rejects records whose required fields are still broken.

use super::record::DiscoveredFile;
use crate::detection::{DocType, round2};
use serde::Serialize;
use serde_json::{Map, Value};

/// Snippets shorter than this many characters draw a warning.
pub const MIN_SNIPPET_CHARS: usize = 20;

/// Expected JSON type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// JSON string.
    String,
    /// JSON array.
    Array,
    /// JSON object.
    Object,
    /// JSON number.
    Number,
    /// JSON boolean.
    Boolean,
}

impl FieldType {
    /// Whether `value` has this type.
    #[must_use]
    pub const fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::String, Value::String(_))
                | (Self::Array, Value::Array(_))
                | (Self::Object, Value::Object(_))
                | (Self::Number, Value::Number(_))
                | (Self::Boolean, Value::Bool(_))
        )
    }

    /// Returns the type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// Fields every record must carry.
pub const REQUIRED_FIELDS: &[(&str, FieldType)] = &[
    ("file_url", FieldType::String),
    ("source", FieldType::String),
    ("title", FieldType::String),
    ("snippet", FieldType::String),
    ("timestamp", FieldType::String),
    ("medical_terms_found", FieldType::Array),
    ("confidence", FieldType::Number),
    ("doc_type", FieldType::String),
];

/// Fields that may be absent; typed when present.
pub const OPTIONAL_FIELDS: &[(&str, FieldType)] = &[
    ("concept_hits", FieldType::Object),
    ("dates_found", FieldType::Array),
    ("has_doi", FieldType::Boolean),
    ("has_pmid", FieldType::Boolean),
    ("has_arxiv", FieldType::Boolean),
    ("is_noise", FieldType::Boolean),
];

/// Citation flags whose absence draws a warning.
pub const CITATION_FLAGS: [&str; 3] = ["has_doi", "has_pmid", "has_arxiv"];

/// A problem found in one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// The field with the problem.
    pub field: String,
    /// Description of the problem.
    pub message: String,
}

impl ValidationIssue {
    /// Creates an issue.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of validating one record.
///
/// `valid` is true iff `errors` is empty. Warnings never invalidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Whether the record passed.
    pub valid: bool,
    /// Blocking problems.
    pub errors: Vec<ValidationIssue>,
    /// Advisory problems.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    fn from_issues(errors: Vec<ValidationIssue>, warnings: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Strictly validates a candidate record.
///
/// # Errors reported
///
/// - the record is not a JSON object
/// - a required field is missing, null or of the wrong type
/// - an optional field is present with the wrong type
/// - `confidence` lies outside `[0, 1]`
/// - `medical_terms_found` holds a non-string element
/// - `concept_hits` holds a non-numeric value
///
/// # Warnings reported
///
/// - `medical_terms_found` is empty
/// - `snippet` is shorter than [`MIN_SNIPPET_CHARS`]
/// - a citation flag is absent
/// - `doc_type` is not a known archetype
/// - `timestamp` is not RFC 3339
#[must_use]
pub fn validate_file(candidate: &Value) -> ValidationResult {
    let Some(record) = candidate.as_object() else {
        return ValidationResult::from_issues(
            vec![ValidationIssue::new("record", "must be a JSON object")],
            Vec::new(),
        );
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for &(field, expected) in REQUIRED_FIELDS {
        match record.get(field) {
            None | Some(Value::Null) => {
                errors.push(ValidationIssue::new(field, "missing required field"));
            },
            Some(value) if !expected.matches(value) => {
                errors.push(type_mismatch(field, expected, value));
            },
            Some(_) => {},
        }
    }

    for &(field, expected) in OPTIONAL_FIELDS {
        if let Some(value) = record.get(field).filter(|v| !v.is_null()) {
            if !expected.matches(value) {
                errors.push(type_mismatch(field, expected, value));
            }
        }
    }

    if let Some(confidence) = record.get("confidence").and_then(Value::as_f64) {
        if !(0.0..=1.0).contains(&confidence) {
            errors.push(ValidationIssue::new(
                "confidence",
                format!("{confidence} is outside [0, 1]"),
            ));
        }
    }

    if let Some(terms) = record.get("medical_terms_found").and_then(Value::as_array) {
        if terms.is_empty() {
            warnings.push(ValidationIssue::new(
                "medical_terms_found",
                "no medical terms found; likely a false positive",
            ));
        }
        for (i, term) in terms.iter().enumerate() {
            if !term.is_string() {
                errors.push(ValidationIssue::new(
                    "medical_terms_found",
                    format!("element {i} must be a string, found {}", json_type(term)),
                ));
            }
        }
    }

    if let Some(hits) = record.get("concept_hits").and_then(Value::as_object) {
        for (name, hit) in hits {
            if !hit.is_number() {
                errors.push(ValidationIssue::new(
                    "concept_hits",
                    format!("value for '{name}' must be a number, found {}", json_type(hit)),
                ));
            }
        }
    }

    if let Some(snippet) = record.get("snippet").and_then(Value::as_str) {
        let len = snippet.chars().count();
        if len < MIN_SNIPPET_CHARS {
            warnings.push(ValidationIssue::new(
                "snippet",
                format!("only {len} characters; at least {MIN_SNIPPET_CHARS} expected"),
            ));
        }
    }

    for flag in CITATION_FLAGS {
        if record.get(flag).is_none_or(Value::is_null) {
            warnings.push(ValidationIssue::new(flag, "optional citation flag is absent"));
        }
    }

    if let Some(doc_type) = record.get("doc_type").and_then(Value::as_str) {
        if DocType::parse(doc_type).is_none() {
            warnings.push(ValidationIssue::new(
                "doc_type",
                format!("unknown document type '{doc_type}'"),
            ));
        }
    }

    if let Some(timestamp) = record.get("timestamp").and_then(Value::as_str) {
        if chrono::DateTime::parse_from_rfc3339(timestamp).is_err() {
            warnings.push(ValidationIssue::new(
                "timestamp",
                format!("'{timestamp}' is not an RFC 3339 timestamp"),
            ));
        }
    }

    ValidationResult::from_issues(errors, warnings)
}

/// Leniently repairs and converts a candidate record.
///
/// Repairs applied before validation:
///
/// - absent, null or non-boolean flags become `false`
/// - absent or non-array `dates_found` becomes `[]`
/// - absent or non-object `concept_hits` becomes `{}`
/// - non-numeric `concept_hits` values are dropped
/// - non-string elements of the list fields are dropped
/// - an unknown `doc_type` becomes `UNKNOWN`
///
/// Returns `None` if a required field is still missing or mistyped, or if
/// `confidence` lies outside `[0, 1]`. Accepted confidence is rounded to two
/// decimals.
#[must_use]
pub fn normalize_file(candidate: &Value) -> Option<DiscoveredFile> {
    let mut record = candidate.as_object()?.clone();
    repair(&mut record);

    let repaired = Value::Object(record);
    let validation = validate_file(&repaired);
    if !validation.valid {
        tracing::debug!(
            errors = ?validation.errors,
            "Rejected record during normalization"
        );
        return None;
    }

    match serde_json::from_value::<DiscoveredFile>(repaired) {
        Ok(mut file) => {
            file.confidence = round2(file.confidence);
            Some(file)
        },
        Err(e) => {
            tracing::debug!(error = %e, "Record did not deserialize after repair");
            None
        },
    }
}

fn repair(record: &mut Map<String, Value>) {
    for field in ["has_doi", "has_pmid", "has_arxiv", "is_noise"] {
        if !record.get(field).is_some_and(Value::is_boolean) {
            record.insert(field.to_string(), Value::Bool(false));
        }
    }

    match record.get_mut("concept_hits") {
        Some(Value::Object(hits)) => hits.retain(|_, v| v.is_number()),
        _ => {
            record.insert("concept_hits".to_string(), Value::Object(Map::new()));
        },
    }

    match record.get_mut("dates_found") {
        Some(Value::Array(dates)) => dates.retain(Value::is_string),
        _ => {
            record.insert("dates_found".to_string(), Value::Array(Vec::new()));
        },
    }

    if let Some(Value::Array(terms)) = record.get_mut("medical_terms_found") {
        terms.retain(Value::is_string);
    }

    if let Some(Value::String(doc_type)) = record.get_mut("doc_type") {
        let parsed = DocType::parse(doc_type).unwrap_or_default();
        *doc_type = parsed.as_str().to_string();
    }
}

fn type_mismatch(field: &str, expected: FieldType, value: &Value) -> ValidationIssue {
    ValidationIssue::new(
        field,
        format!("expected {}, found {}", expected.as_str(), json_type(value)),
    )
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
