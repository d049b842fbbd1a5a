//! CLI command definitions

use clap::{Parser, ValueEnum};
use council_domain::OutputFormat as DomainOutputFormat;
use std::path::PathBuf;

/// Output format for council results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Consensus banner, individual responses, answer and meta-analysis
    Full,
    /// Only the synthesized answer
    Synthesis,
    /// The whole result as JSON
    Json,
}

impl From<OutputFormat> for DomainOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => DomainOutputFormat::Full,
            OutputFormat::Synthesis => DomainOutputFormat::Synthesis,
            OutputFormat::Json => DomainOutputFormat::Json,
        }
    }
}

/// CLI arguments for llm-council
#[derive(Parser, Debug)]
#[command(name = "llm-council")]
#[command(author, version, about = "LLM Council - Ask several LLMs at once and weigh their consensus")]
#[command(long_about = r#"
LLM Council sends one question to several LLM providers in parallel and
reduces their answers to a single consensus judgment.

Each provider answers independently. Statements shared by most providers
count as agreement, contradicting statements as disagreement, and the
weighted result is classified as strong, moderate, weak or conflicted.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./council.toml      Project-level config
3. ~/.config/llm-council/config.toml   Global config

API keys are read from ANTHROPIC_API_KEY, GEMINI_API_KEY (or GOOGLE_API_KEY)
and OPENROUTER_API_KEY (or OPENAI_API_KEY) unless a provider sets api_key_env.

Example:
  llm-council "What's the best way to handle errors in Rust?"
  llm-council -o json --timeout 30 "Is Rust faster than Go?"
  llm-council --list-models
"#)]
pub struct Cli {
    /// The question to ask the council
    #[arg(required_unless_present_any = ["list_models", "show_config"])]
    pub question: Option<String>,

    /// List configured providers and whether they are usable, then exit
    #[arg(long)]
    pub list_models: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format [default: from config, else full]
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Do not print each provider's answer in full output
    #[arg(long)]
    pub hide_individual: bool,

    /// Maximum tokens per answer
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[arg(long, value_name = "T")]
    pub temperature: Option<f32>,

    /// Per-provider time limit in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Append a JSONL transcript of the run to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// The flag wins over the configured format
    pub fn output_format(&self, configured: Option<DomainOutputFormat>) -> DomainOutputFormat {
        self.output
            .map(Into::into)
            .or(configured)
            .unwrap_or_default()
    }
}
