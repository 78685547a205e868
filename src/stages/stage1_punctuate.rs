use tracing::{debug, info};

use crate::error::ChainError;
use crate::llm::{CompletionService, PromptTemplate};

/// Result of Stage 1
#[derive(Debug, Clone)]
pub struct Stage1Result {
    /// Instruction text sent to the completion service
    pub prompt: String,
    /// Raw completion text
    pub punctuated_sentence: String,
}

/// Execute Stage 1: add punctuation to the input sentence
pub async fn execute_stage1<C>(
    client: &C,
    template: &PromptTemplate,
    sentence: &str,
) -> Result<Stage1Result, ChainError>
where
    C: CompletionService + ?Sized,
{
    let prompt = template.format(template.variable(), sentence)?;
    debug!("Stage 1 prompt: {}", prompt);

    let punctuated_sentence = client.complete(&prompt).await?;
    info!("Stage 1: punctuated -> {:?}", punctuated_sentence);

    Ok(Stage1Result {
        prompt,
        punctuated_sentence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use async_trait::async_trait;

    struct Fixed(&'static str);

    #[async_trait]
    impl CompletionService for Fixed {
        async fn complete(&self, _prompt: &str) -> Result<String, ServiceError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_stage1_formats_and_returns_raw_text() {
        let result = execute_stage1(
            &Fixed(" I don't liked Mondays.\n"),
            &PromptTemplate::punctuation(),
            "i dont liked mondays",
        )
        .await
        .unwrap();

        assert!(result.prompt.contains("sentence: i dont liked mondays\n"));
        assert_eq!(result.punctuated_sentence, " I don't liked Mondays.\n");
    }
}
