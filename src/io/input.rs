use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::ChainInput;

/// Read sentences from a file, or stdin when the path is "-"
///
/// A source with no non-blank lines is an error.
pub fn read_sentences_file(path: &Path) -> Result<Vec<ChainInput>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read sentences from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?
    };

    let inputs = parse_sentences(&content);
    if inputs.is_empty() {
        anyhow::bail!("No sentences found in {:?}", path);
    }
    Ok(inputs)
}

/// One sentence per non-blank line
pub fn parse_sentences(content: &str) -> Vec<ChainInput> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ChainInput::new)
        .collect()
}
