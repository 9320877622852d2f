//! Option and output types exchanged with the ingestion engine.

use serde::{Deserialize, Serialize};

/// Options forwarded to the ingestion engine for a single invocation.
///
/// Every field is optional; an absent field is omitted from the serialized
/// option record entirely rather than emitted as null or zero, so the engine
/// can tell "not supplied" apart from an explicit value. A `max_file_size` of
/// zero is a valid value and is passed through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_patterns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_patterns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size: Option<u64>,
}

impl IngestOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_patterns: None,
            exclude_patterns: None,
            max_file_size: None,
        }
    }

    #[must_use]
    pub fn with_include_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_patterns = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_exclude_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = Some(max_file_size);
        self
    }
}

/// The three opaque text blocks produced by the ingestion engine.
///
/// This layer never parses or validates their internal structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOutput {
    pub summary: String,
    pub tree: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_omitted_from_serialized_options() {
        let options = IngestOptions::new().with_include_patterns(["*.md"]);
        let json = serde_json::to_value(&options).expect("options should serialize");

        let object = json.as_object().expect("options should serialize to object");
        assert!(object.contains_key("include_patterns"));
        assert!(!object.contains_key("exclude_patterns"));
        assert!(!object.contains_key("max_file_size"));
    }

    #[test]
    fn zero_max_file_size_is_preserved() {
        let options = IngestOptions::new().with_max_file_size(0);
        let json = serde_json::to_value(&options).expect("options should serialize");

        assert_eq!(json["max_file_size"], 0);
    }

    #[test]
    fn pattern_order_is_preserved() {
        let options =
            IngestOptions::new().with_include_patterns(["LICENSE*", "*.md", "README*"]);

        assert_eq!(
            options.include_patterns.as_deref(),
            Some(&["LICENSE*".to_string(), "*.md".to_string(), "README*".to_string()][..])
        );
    }
}
