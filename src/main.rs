use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tidyline::llm::{PUNCTUATED_SENTENCE_VAR, SENTENCE_VAR};
use tidyline::{
    read_sentences_file, write_output, ChainInput, GrammarChain, OpenAiClient, OutputFormat,
    PromptTemplate, SettingsOverrides,
};

#[derive(Parser)]
#[command(name = "tidyline")]
#[command(author, version, about = "Punctuate and grammar-correct sentences with an LLM", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Punctuate then grammar-correct one sentence or a file of sentences
    Correct {
        /// Sentence to correct
        #[arg(required_unless_present = "input", conflicts_with = "input")]
        sentence: Option<String>,

        /// File with one sentence per line ("-" for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Emit one JSON record per sentence instead of plain text
        #[arg(long)]
        json: bool,

        /// Replacement punctuation template (must contain {sentence})
        #[arg(long)]
        punctuation_template: Option<PathBuf>,

        /// Replacement grammar template (must contain {punctuated_sentence})
        #[arg(long)]
        grammar_template: Option<PathBuf>,

        #[command(flatten)]
        service: ServiceArgs,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the prompt templates without calling the service
    Prompts {
        /// Show the punctuation prompt formatted with this sentence
        sentence: Option<String>,
    },
}

#[derive(Args)]
struct ServiceArgs {
    /// Base URL of an OpenAI-compatible API (overrides OPENAI_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Model name (overrides OPENAI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Sampling temperature (0-2)
    #[arg(long)]
    temperature: Option<f64>,

    /// Maximum tokens per completion
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Per-request timeout in seconds [default: 60]
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl ServiceArgs {
    fn into_overrides(self) -> SettingsOverrides {
        SettingsOverrides {
            base_url: self.base_url,
            model: self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Correct {
            sentence,
            input,
            json,
            punctuation_template,
            grammar_template,
            service,
            verbose,
        } => {
            setup_logging(verbose);
            let format = if json {
                OutputFormat::JsonLines
            } else {
                OutputFormat::Text
            };
            correct(sentence, input, format, punctuation_template, grammar_template, service).await
        }
        Commands::Prompts { sentence } => {
            setup_logging(false);
            show_prompts(sentence)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn correct(
    sentence: Option<String>,
    input: Option<PathBuf>,
    format: OutputFormat,
    punctuation_template: Option<PathBuf>,
    grammar_template: Option<PathBuf>,
    service: ServiceArgs,
) -> Result<()> {
    let punctuation = match punctuation_template {
        Some(path) => PromptTemplate::from_file("punctuation", &path, SENTENCE_VAR)?,
        None => PromptTemplate::punctuation(),
    };
    let grammar = match grammar_template {
        Some(path) => PromptTemplate::from_file("grammar", &path, PUNCTUATED_SENTENCE_VAR)?,
        None => PromptTemplate::grammar(),
    };

    let inputs = match (sentence, input) {
        (Some(sentence), _) => vec![ChainInput::new(sentence)],
        (None, Some(path)) => read_sentences_file(&path)?,
        (None, None) => anyhow::bail!("Provide a sentence or --input"),
    };

    let chain = GrammarChain::from_env(
        &service.into_overrides(),
        punctuation,
        grammar,
        OpenAiClient::new,
    )?;
    info!("Correcting {} sentence(s)", inputs.len());

    let stdout = std::io::stdout();
    for (index, input) in inputs.iter().enumerate() {
        let output = chain
            .run(input)
            .await
            .with_context(|| format!("Failed to correct sentence {}", index + 1))?;
        write_output(&mut stdout.lock(), &output, format)?;
    }

    Ok(())
}

fn show_prompts(sentence: Option<String>) -> Result<()> {
    let punctuation = PromptTemplate::punctuation();
    let grammar = PromptTemplate::grammar();

    match sentence {
        Some(sentence) => {
            let prompt = punctuation.format(SENTENCE_VAR, &sentence)?;
            print!("{}", prompt);
        }
        None => {
            println!("# {} ({{{}}})", punctuation.name(), punctuation.variable());
            print!("{}", punctuation.template());
            println!();
            println!("# {} ({{{}}})", grammar.name(), grammar.variable());
            print!("{}", grammar.template());
        }
    }

    Ok(())
}
