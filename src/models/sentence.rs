use serde::{Deserialize, Serialize};

/// Input to one chain invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInput {
    pub sentence: String,
}

impl ChainInput {
    pub fn new(sentence: impl Into<String>) -> Self {
        Self {
            sentence: sentence.into(),
        }
    }
}

/// Record of a completed chain invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainOutput {
    /// Identifier of this run (UUID v4)
    pub run_id: String,
    /// The sentence as given
    pub sentence: String,
    /// Stage 1 output, exactly as returned by the completion service
    pub punctuated_sentence: String,
    /// Stage 2 output, exactly as returned by the completion service
    pub corrected_sentence: String,
    /// RFC 3339 UTC timestamp of completion
    pub completed_at: String,
}

impl ChainOutput {
    /// Final sentence with surrounding whitespace removed, for display
    pub fn display_text(&self) -> &str {
        self.corrected_sentence.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_deserializes_from_json() {
        let input: ChainInput = serde_json::from_str(r#"{"sentence":"i dont liked mondays"}"#).unwrap();
        assert_eq!(input, ChainInput::new("i dont liked mondays"));
    }

    #[test]
    fn test_display_text_trims() {
        let output = ChainOutput {
            run_id: "r".to_string(),
            sentence: "x".to_string(),
            punctuated_sentence: "X.".to_string(),
            corrected_sentence: "\n X.\n".to_string(),
            completed_at: "2026-01-01T00:00:00Z".to_string(),
        };
        assert_eq!(output.display_text(), "X.");
    }
}
