//! Per-view metadata directive.
//!
//! # Responsibility
//! - Carry the head content one rendered view asks for.
//! - Validate the caller contract without rejecting construction.
//!
//! # Invariants
//! - A directive is built fresh per render and consumed once.
//! - `title` and `description` must be non-blank to be written.
//! - `canonical_path`, when set, is site-relative (starts with `/`).
//! - `image`, when set, is an absolute URL.
//! - Structured data is always a JSON object once rendered.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

static ABSOLUTE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+\S*$").expect("valid absolute url regex")
});

/// Declarative head content for one rendered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDirective {
    pub title: String,
    pub description: String,
    /// Site-relative path joined onto the location origin.
    pub canonical_path: Option<String>,
    /// Absolute preview image URL.
    pub image: Option<String>,
    /// Linked-data payload written to the structured-data script.
    pub structured_data: Option<StructuredData>,
}

impl MetadataDirective {
    /// Creates a directive with only the required fields set.
    ///
    /// Construction never fails; call `validate()` to check the contract.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            canonical_path: None,
            image: None,
            structured_data: None,
        }
    }

    pub fn with_canonical_path(mut self, path: impl Into<String>) -> Self {
        self.canonical_path = Some(path.into());
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn with_structured_data(mut self, data: StructuredData) -> Self {
        self.structured_data = Some(data);
        self
    }

    /// Returns the first contract violation, if any.
    pub fn validate(&self) -> Result<(), DirectiveError> {
        match self.issues().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Returns every contract violation in field order.
    ///
    /// Structured-data conversion failures are not listed here; they are
    /// isolated and reported by the synchronizer when rendering.
    pub fn issues(&self) -> Vec<DirectiveError> {
        let mut issues = Vec::new();
        if self.title.trim().is_empty() {
            issues.push(DirectiveError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            issues.push(DirectiveError::EmptyDescription);
        }
        if let Some(path) = self.canonical_path.as_deref() {
            if !path.starts_with('/') {
                issues.push(DirectiveError::RelativeCanonicalPath(path.to_string()));
            }
        }
        if let Some(image) = self.image.as_deref() {
            if !ABSOLUTE_URL_RE.is_match(image) {
                issues.push(DirectiveError::RelativeImageUrl(image.to_string()));
            }
        }
        issues
    }
}

/// Directive contract violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    EmptyTitle,
    EmptyDescription,
    RelativeCanonicalPath(String),
    RelativeImageUrl(String),
}

impl DirectiveError {
    /// Stable field name used in log events.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyDescription => "description",
            Self::RelativeCanonicalPath(_) => "canonical_path",
            Self::RelativeImageUrl(_) => "image",
        }
    }
}

impl Display for DirectiveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "directive title must not be empty"),
            Self::EmptyDescription => write!(f, "directive description must not be empty"),
            Self::RelativeCanonicalPath(value) => {
                write!(f, "canonical path must start with `/`, got `{value}`")
            }
            Self::RelativeImageUrl(value) => {
                write!(f, "image must be an absolute URL, got `{value}`")
            }
        }
    }
}

impl Error for DirectiveError {}

/// Linked-data payload for the structured-data slot.
///
/// Conversion is attempted eagerly, but a failure is kept inside the value so
/// the synchronizer can report it without blocking the other slots.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredData {
    payload: Result<Map<String, Value>, StructuredDataError>,
}

impl StructuredData {
    /// Wraps a JSON value. Anything other than an object is a failure.
    pub fn from_value(value: Value) -> Self {
        let payload = match value {
            Value::Object(map) => Ok(map),
            other => Err(StructuredDataError::NotAnObject(json_kind(&other))),
        };
        Self { payload }
    }

    /// Converts any serializable value through `serde_json`.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => Self::from_value(value),
            Err(err) => Self {
                payload: Err(StructuredDataError::Serialize(err.to_string())),
            },
        }
    }

    /// Returns the object when conversion succeeded.
    pub fn as_object(&self) -> Result<&Map<String, Value>, &StructuredDataError> {
        self.payload.as_ref()
    }

    /// Renders the exact compact JSON text written into the script node.
    pub fn to_json(&self) -> Result<String, StructuredDataError> {
        let map = self.payload.as_ref().map_err(Clone::clone)?;
        serde_json::to_string(map).map_err(|err| StructuredDataError::Serialize(err.to_string()))
    }
}

impl From<Map<String, Value>> for StructuredData {
    fn from(value: Map<String, Value>) -> Self {
        Self { payload: Ok(value) }
    }
}

impl Serialize for StructuredData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.payload {
            Ok(map) => map.serialize(serializer),
            Err(_) => serializer.serialize_none(),
        }
    }
}

/// Structured-data rendering failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredDataError {
    /// Payload converted to JSON but is not a mapping.
    NotAnObject(&'static str),
    /// Serializer rejected the payload.
    Serialize(String),
}

impl Display for StructuredDataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject(kind) => {
                write!(f, "structured data must be a JSON object, got {kind}")
            }
            Self::Serialize(message) => {
                write!(f, "structured data is not serializable: {message}")
            }
        }
    }
}

impl Error for StructuredDataError {}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::{DirectiveError, MetadataDirective, StructuredData, StructuredDataError};
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn valid_directive_has_no_issues() {
        let directive = MetadataDirective::new("About", "Who I am")
            .with_canonical_path("/about")
            .with_image("https://example.com/card.png");
        assert!(directive.validate().is_ok());
        assert!(directive.issues().is_empty());
    }

    #[test]
    fn blank_required_fields_are_reported_in_order() {
        let directive = MetadataDirective::new("  ", "");
        assert_eq!(
            directive.issues(),
            vec![DirectiveError::EmptyTitle, DirectiveError::EmptyDescription]
        );
        assert_eq!(
            directive.validate().expect_err("blank title must fail"),
            DirectiveError::EmptyTitle
        );
    }

    #[test]
    fn rejects_relative_canonical_path_and_image() {
        let directive = MetadataDirective::new("t", "d")
            .with_canonical_path("about")
            .with_image("/card.png");
        let issues = directive.issues();
        assert_eq!(
            issues,
            vec![
                DirectiveError::RelativeCanonicalPath("about".to_string()),
                DirectiveError::RelativeImageUrl("/card.png".to_string()),
            ]
        );
        assert_eq!(issues[0].field(), "canonical_path");
        assert_eq!(issues[1].field(), "image");
    }

    #[test]
    fn structured_data_renders_compact_json() {
        let data = StructuredData::from_value(json!({"a": 1}));
        assert_eq!(data.to_json().expect("object renders"), r#"{"a":1}"#);
    }

    #[test]
    fn structured_data_rejects_non_objects() {
        let data = StructuredData::from_value(json!([1, 2]));
        assert_eq!(
            data.to_json().expect_err("array must fail"),
            StructuredDataError::NotAnObject("array")
        );
    }

    #[test]
    fn structured_data_captures_serializer_failures() {
        let mut bad = BTreeMap::new();
        bad.insert((1, 2), "tuple keys are not JSON keys");
        let data = StructuredData::from_serialize(&bad);
        assert!(matches!(
            data.to_json(),
            Err(StructuredDataError::Serialize(_))
        ));
    }

    #[test]
    fn directive_snapshot_uses_camel_case_fields() {
        let directive = MetadataDirective::new("t", "d")
            .with_canonical_path("/x")
            .with_structured_data(StructuredData::from_value(json!({"@type": "Thing"})));
        let value = serde_json::to_value(&directive).expect("directive serializes");
        assert_eq!(value["canonicalPath"], "/x");
        assert_eq!(value["structuredData"]["@type"], "Thing");
        assert_eq!(value["image"], serde_json::Value::Null);
    }
}
