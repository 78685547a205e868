use std::io::Write;

use anyhow::{Context, Result};

use crate::models::ChainOutput;

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Corrected sentence only
    #[default]
    Text,
    /// One JSON record per line
    JsonLines,
}

/// Write a single result in the requested format
pub fn write_output<W: Write>(writer: &mut W, output: &ChainOutput, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(writer, "{}", output.display_text()),
        OutputFormat::JsonLines => {
            let line = serde_json::to_string(output).context("Failed to serialize result")?;
            writeln!(writer, "{}", line)
        }
    }
    .context("Failed to write output")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChainOutput {
        ChainOutput {
            run_id: "00000000-0000-4000-8000-000000000000".to_string(),
            sentence: "i dont liked mondays".to_string(),
            punctuated_sentence: "I don't liked Mondays.".to_string(),
            corrected_sentence: "I don't like Mondays.\n".to_string(),
            completed_at: "2026-10-19T12:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_text_output() {
        let mut buf = Vec::new();
        write_output(&mut buf, &sample(), OutputFormat::Text).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "I don't like Mondays.\n");
    }

    #[test]
    fn test_json_lines_output() {
        let mut buf = Vec::new();
        write_output(&mut buf, &sample(), OutputFormat::JsonLines).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["punctuated_sentence"], "I don't liked Mondays.");
        assert_eq!(value["corrected_sentence"], "I don't like Mondays.\n");
        assert_eq!(value["sentence"], "i dont liked mondays");
    }
}
