use tracing::{debug, info};

use crate::error::ChainError;
use crate::llm::{CompletionService, PromptTemplate};

/// Result of Stage 2
#[derive(Debug, Clone)]
pub struct Stage2Result {
    /// Instruction text sent to the completion service
    pub prompt: String,
    /// Raw completion text
    pub corrected_sentence: String,
}

/// Execute Stage 2: correct the grammar of Stage 1's output
///
/// `punctuated_sentence` is embedded verbatim.
pub async fn execute_stage2<C>(
    client: &C,
    template: &PromptTemplate,
    punctuated_sentence: &str,
) -> Result<Stage2Result, ChainError>
where
    C: CompletionService + ?Sized,
{
    let prompt = template.format(template.variable(), punctuated_sentence)?;
    debug!("Stage 2 prompt: {}", prompt);

    let corrected_sentence = client.complete(&prompt).await?;
    info!("Stage 2: corrected -> {:?}", corrected_sentence);

    Ok(Stage2Result {
        prompt,
        corrected_sentence,
    })
}
