use serde_json::{json, Value};

/// Analyzer configuration applied to an index at create time
///
/// `title` and `text` are analyzed with the named analyzer so full-text
/// search is morphology-aware for the content language, while `url` stays a
/// keyword field so the incremental guard's exact lookups never pass through
/// an analyzer. The profile is pluggable to support non-Japanese content
/// sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerProfile {
    /// Name of the analyzer declared in the index settings
    pub analyzer_name: String,

    /// Analyzer type, e.g. a language tokenizer like `kuromoji`
    pub tokenizer: String,
}

impl Default for AnalyzerProfile {
    fn default() -> Self {
        Self::japanese()
    }
}

impl AnalyzerProfile {
    /// Japanese morphological analysis via the kuromoji tokenizer
    pub fn japanese() -> Self {
        Self {
            analyzer_name: "my_japanese_analyzer".to_string(),
            tokenizer: "kuromoji".to_string(),
        }
    }

    pub fn new(analyzer_name: impl Into<String>, tokenizer: impl Into<String>) -> Self {
        Self {
            analyzer_name: analyzer_name.into(),
            tokenizer: tokenizer.into(),
        }
    }

    /// Builds the settings + mappings body for index creation
    pub fn mapping(&self) -> Value {
        json!({
            "settings": {
                "analysis": {
                    "analyzer": {
                        &self.analyzer_name: {
                            "type": &self.tokenizer
                        }
                    }
                }
            },
            "mappings": {
                "properties": {
                    "text": {
                        "type": "text",
                        "analyzer": &self.analyzer_name
                    },
                    "title": {
                        "type": "text",
                        "analyzer": &self.analyzer_name
                    },
                    "url": {
                        "type": "keyword"
                    }
                }
            }
        })
    }
}
