pub mod chain;
pub mod config;
pub mod error;
pub mod io;
pub mod llm;
pub mod models;
pub mod stages;

pub use chain::GrammarChain;
pub use config::{ApiKey, Settings, SettingsOverrides};
pub use error::{ChainError, ConfigurationError, ServiceError};
pub use io::{parse_sentences, read_sentences_file, write_output, OutputFormat};
pub use llm::{CompletionService, OpenAiClient, PromptTemplate};
pub use models::{ChainInput, ChainOutput};
pub use stages::{execute_stage1, execute_stage2, Stage1Result, Stage2Result};
