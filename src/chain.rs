use chrono::{SecondsFormat, Utc};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::config::{Settings, SettingsOverrides};
use crate::error::{ChainError, ConfigurationError};
use crate::llm::{CompletionService, PromptTemplate, PUNCTUATED_SENTENCE_VAR, SENTENCE_VAR};
use crate::models::{ChainInput, ChainOutput};
use crate::stages::{execute_stage1, execute_stage2};

/// Punctuation step followed by grammar step over one completion service
pub struct GrammarChain<C> {
    client: C,
    punctuation: PromptTemplate,
    grammar: PromptTemplate,
}

impl<C: CompletionService> GrammarChain<C> {
    /// Create a chain using the built-in templates
    pub fn new(client: C) -> Self {
        Self {
            client,
            punctuation: PromptTemplate::punctuation(),
            grammar: PromptTemplate::grammar(),
        }
    }

    /// Create a chain with custom templates
    ///
    /// The punctuation template must take `{sentence}` and the grammar
    /// template `{punctuated_sentence}`.
    pub fn with_templates(
        client: C,
        punctuation: PromptTemplate,
        grammar: PromptTemplate,
    ) -> Result<Self, ConfigurationError> {
        expect_variable(&punctuation, SENTENCE_VAR)?;
        expect_variable(&grammar, PUNCTUATED_SENTENCE_VAR)?;
        Ok(Self {
            client,
            punctuation,
            grammar,
        })
    }

    /// Assemble a chain at startup from the process environment
    pub fn from_env<F>(
        overrides: &SettingsOverrides,
        punctuation: PromptTemplate,
        grammar: PromptTemplate,
        connect: F,
    ) -> Result<Self, ConfigurationError>
    where
        F: FnOnce(Settings) -> Result<C, ConfigurationError>,
    {
        Self::from_lookup(|name| std::env::var(name).ok(), overrides, punctuation, grammar, connect)
    }

    /// Assemble a chain at startup from a variable source
    ///
    /// Settings are resolved and validated first; `connect` only ever sees a
    /// complete `Settings`, so a missing credential fails here with no client
    /// built and no request sent.
    pub fn from_lookup<L, F>(
        lookup: L,
        overrides: &SettingsOverrides,
        punctuation: PromptTemplate,
        grammar: PromptTemplate,
        connect: F,
    ) -> Result<Self, ConfigurationError>
    where
        L: Fn(&str) -> Option<String>,
        F: FnOnce(Settings) -> Result<C, ConfigurationError>,
    {
        let settings = overrides.apply(Settings::from_lookup(lookup)?)?;
        info!("Using model {} at {}", settings.model, settings.base_url);

        let client = connect(settings)?;
        Self::with_templates(client, punctuation, grammar)
    }

    /// Correct a sentence, returning only the final text
    pub async fn invoke(&self, sentence: &str) -> Result<String, ChainError> {
        let output = self.run(&ChainInput::new(sentence)).await?;
        Ok(output.corrected_sentence)
    }

    /// Run both stages and return the full record
    ///
    /// Stage 2 is never attempted when Stage 1 fails.
    pub async fn run(&self, input: &ChainInput) -> Result<ChainOutput, ChainError> {
        if input.sentence.trim().is_empty() {
            return Err(ChainError::EmptySentence);
        }

        let run_id = Uuid::new_v4().to_string();
        let span = info_span!("chain", run_id = %run_id);

        async {
            info!("Correcting {:?}", input.sentence);

            let stage1 = execute_stage1(&self.client, &self.punctuation, &input.sentence).await?;
            let stage2 =
                execute_stage2(&self.client, &self.grammar, &stage1.punctuated_sentence).await?;

            Ok::<_, ChainError>(ChainOutput {
                run_id: run_id.clone(),
                sentence: input.sentence.clone(),
                punctuated_sentence: stage1.punctuated_sentence,
                corrected_sentence: stage2.corrected_sentence,
                completed_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            })
        }
        .instrument(span)
        .await
    }
}

fn expect_variable(template: &PromptTemplate, variable: &str) -> Result<(), ConfigurationError> {
    if template.variable() == variable {
        Ok(())
    } else {
        Err(ConfigurationError::MissingPlaceholder {
            template: template.name().to_string(),
            placeholder: variable.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use async_trait::async_trait;

    struct Panics;

    #[async_trait]
    impl CompletionService for Panics {
        async fn complete(&self, _prompt: &str) -> Result<String, ServiceError> {
            panic!("no call expected");
        }
    }

    #[tokio::test]
    async fn test_blank_sentence_rejected_before_any_call() {
        let chain = GrammarChain::new(Panics);
        assert_eq!(chain.invoke("   ").await.unwrap_err(), ChainError::EmptySentence);
    }

    #[test]
    fn test_templates_must_use_expected_variables() {
        let swapped = GrammarChain::with_templates(
            Panics,
            PromptTemplate::grammar(),
            PromptTemplate::punctuation(),
        );
        assert!(matches!(
            swapped,
            Err(ConfigurationError::MissingPlaceholder { ref placeholder, .. }) if placeholder == "sentence"
        ));
    }
}
