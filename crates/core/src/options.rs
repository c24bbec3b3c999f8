use serde::{Deserialize, Serialize};

use crate::filter::AttributeFilter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Attributes to carry across, in group-expression syntax. `P` is
    /// always converted.
    pub attribute_filter: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            attribute_filter: "*".to_string(),
        }
    }
}

impl ConvertOptions {
    pub fn with_filter(attribute_filter: impl Into<String>) -> Self {
        Self {
            attribute_filter: attribute_filter.into(),
        }
    }

    pub fn filter(&self) -> AttributeFilter {
        AttributeFilter::parse(&self.attribute_filter)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let options = ConvertOptions::from_json("{}").expect("parse");
        assert_eq!(options, ConvertOptions::default());
        assert!(options.filter().matches("anything"));
    }

    #[test]
    fn json_round_trip() {
        let options = ConvertOptions::with_filter("* ^rest");
        let text = options.to_json().expect("serialize");
        assert_eq!(ConvertOptions::from_json(&text).expect("parse"), options);
        assert!(ConvertOptions::from_json("{\"attribute_filter\": 3}").is_err());
    }
}
