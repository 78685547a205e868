use std::path::Path;

use crate::error::ConfigurationError;

/// Instruction for the punctuation step
pub const PUNCTUATION_TEMPLATE: &str = "Given a sentence, add punctuation where needed.
sentence: {sentence}
sentence with punctuation:
";

/// Instruction for the grammar step
pub const GRAMMAR_TEMPLATE: &str = "Given a sentence correct the grammar.
sentence: {punctuated_sentence}
sentence with correct grammar:
";

pub const SENTENCE_VAR: &str = "sentence";
pub const PUNCTUATED_SENTENCE_VAR: &str = "punctuated_sentence";

/// A fixed instruction string with exactly one named placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    name: String,
    template: String,
    variable: String,
}

impl PromptTemplate {
    /// Build a template, checking that `{variable}` is its only placeholder
    pub fn new(
        name: impl Into<String>,
        template: impl Into<String>,
        variable: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        let template = template.into();
        let variable = variable.into();

        let found = placeholders(&name, &template)?;
        if let Some(other) = found.iter().find(|p| **p != variable) {
            return Err(ConfigurationError::UnexpectedPlaceholder {
                template: name,
                expected: variable,
                found: other.to_string(),
            });
        }
        if found.is_empty() {
            return Err(ConfigurationError::MissingPlaceholder {
                template: name,
                placeholder: variable,
            });
        }

        Ok(Self {
            name,
            template,
            variable,
        })
    }

    /// Load a template body from a file
    pub fn from_file(
        name: impl Into<String>,
        path: &Path,
        variable: impl Into<String>,
    ) -> anyhow::Result<Self> {
        use anyhow::Context;

        let body = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template file: {:?}", path))?;
        Ok(Self::new(name, body, variable)?)
    }

    /// The built-in punctuation template
    pub fn punctuation() -> Self {
        Self::builtin("punctuation", PUNCTUATION_TEMPLATE, SENTENCE_VAR)
    }

    /// The built-in grammar template
    pub fn grammar() -> Self {
        Self::builtin("grammar", GRAMMAR_TEMPLATE, PUNCTUATED_SENTENCE_VAR)
    }

    // Known-valid; checked in test_builtins_validate
    fn builtin(name: &str, template: &str, variable: &str) -> Self {
        Self {
            name: name.to_string(),
            template: template.to_string(),
            variable: variable.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Substitute `value` for the placeholder named `variable`
    ///
    /// The value is inserted verbatim and never re-scanned, so text that
    /// itself contains braces passes through untouched.
    pub fn format(&self, variable: &str, value: &str) -> Result<String, ConfigurationError> {
        if variable != self.variable {
            return Err(ConfigurationError::MissingPlaceholder {
                template: self.name.clone(),
                placeholder: variable.to_string(),
            });
        }

        let needle = format!("{{{}}}", self.variable);
        Ok(self.template.replace(&needle, value))
    }
}

/// Collect placeholder names appearing in a template
fn placeholders<'a>(name: &str, template: &'a str) -> Result<Vec<&'a str>, ConfigurationError> {
    let mut found = Vec::new();
    let mut rest = template;
    let mut offset = 0;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| ConfigurationError::UnterminatedPlaceholder {
                template: name.to_string(),
                offset: offset + open,
            })?;
        found.push(&after[..close]);
        let consumed = open + 1 + close + 1;
        offset += consumed;
        rest = &rest[consumed..];
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_validate() {
        for template in [PromptTemplate::punctuation(), PromptTemplate::grammar()] {
            let rebuilt =
                PromptTemplate::new(template.name(), template.template(), template.variable())
                    .unwrap();
            assert_eq!(rebuilt, template);
        }
    }

    #[test]
    fn test_format_punctuation() {
        let prompt = PromptTemplate::punctuation()
            .format("sentence", "i dont liked mondays")
            .unwrap();
        assert_eq!(
            prompt,
            "Given a sentence, add punctuation where needed.\n\
             sentence: i dont liked mondays\n\
             sentence with punctuation:\n"
        );
    }

    #[test]
    fn test_format_wrong_variable() {
        let err = PromptTemplate::grammar()
            .format("sentence", "anything")
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingPlaceholder {
                template: "grammar".to_string(),
                placeholder: "sentence".to_string(),
            }
        );
    }

    #[test]
    fn test_value_with_braces_is_not_rescanned() {
        let prompt = PromptTemplate::punctuation()
            .format("sentence", "a {sentence} b {")
            .unwrap();
        assert!(prompt.contains("sentence: a {sentence} b {\n"));
    }

    #[test]
    fn test_repeated_placeholder_replaced_everywhere() {
        let template = PromptTemplate::new("echo", "{x} and {x}", "x").unwrap();
        assert_eq!(template.format("x", "y").unwrap(), "y and y");
    }

    #[test]
    fn test_template_without_placeholder() {
        let err = PromptTemplate::new("bare", "no slots here", "sentence").unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingPlaceholder { .. }));
    }

    #[test]
    fn test_template_with_other_placeholder() {
        let err = PromptTemplate::new("mixed", "{sentence} in {language}", "sentence").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnexpectedPlaceholder {
                template: "mixed".to_string(),
                expected: "sentence".to_string(),
                found: "language".to_string(),
            }
        );
    }

    #[test]
    fn test_unterminated_brace() {
        let err = PromptTemplate::new("broken", "ok {sentence} then {oops", "sentence").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnterminatedPlaceholder {
                template: "broken".to_string(),
                offset: 19,
            }
        );
    }
}
