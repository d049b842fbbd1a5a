//! CLI entrypoint for llm-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use council_application::{
    ConfigIssue, CouncilConfig, NoTranscript, RunCouncilUseCase, Severity, TranscriptLogger,
};
use council_domain::{Prompt, QueryParams};
use council_infrastructure::{ConfigLoader, FileConfig, JsonlTranscriptLogger, ProviderFactory};
use council_presentation::{
    Cli, ConsoleFormatter, ModelTable, OutputFormatter, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG takes precedence.
    // Logs go to stderr so stdout carries only the result.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let (writer, _log_guard) = tracing_appender::non_blocking(std::io::stderr());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(writer)
        .init();

    info!("Starting llm-council");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // === Configuration ===
    let file_config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    let council_config = apply_overrides(file_config.to_council_config(), &cli);

    // Flags can introduce issues of their own (e.g. --timeout 0)
    let mut issues = file_config.validate();
    for issue in council_config.validate() {
        if !issues.iter().any(|i| i.message == issue.message) {
            issues.push(issue);
        }
    }
    report_issues(&issues);
    if CouncilConfig::has_errors(&issues) {
        bail!("invalid configuration");
    }
    let format = cli.output_format(file_config.output.format);

    // === Dependency Injection ===
    let members = ProviderFactory::new().build_all(&file_config)?;

    let transcript: Arc<dyn TranscriptLogger> = match &cli.transcript {
        Some(path) => Arc::new(
            JsonlTranscriptLogger::open(path)
                .with_context(|| format!("cannot open transcript {}", path.display()))?,
        ),
        None => Arc::new(NoTranscript),
    };

    let use_case = RunCouncilUseCase::new(members, council_config.synthesis.clone())?
        .with_default_timeout(council_config.default_timeout)
        .with_transcript(transcript);

    if cli.list_models {
        print!(
            "{}",
            ModelTable::format(use_case.members(), use_case.default_timeout())
        );
        return Ok(());
    }

    // Clap guarantees a question unless --list-models or --show-config
    let Some(question) = cli.question.as_deref() else {
        bail!("a question is required");
    };
    let prompt = Prompt::try_new(question)?;

    let result = if cli.quiet {
        use_case.run_query(&prompt, &council_config.params).await
    } else if std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        use_case
            .run_query_with_progress(&prompt, &council_config.params, &progress)
            .await
    } else {
        use_case
            .run_query_with_progress(&prompt, &council_config.params, &SimpleProgress)
            .await
    };

    // Output results
    let formatter = ConsoleFormatter::new(council_config.show_individual_responses);
    println!("{}", formatter.render(format, prompt.content(), &result));

    Ok(())
}

/// Command-line flags override the loaded configuration
fn apply_overrides(config: CouncilConfig, cli: &Cli) -> CouncilConfig {
    let mut params = QueryParams::new();
    if let Some(max_tokens) = cli.max_tokens {
        params = params.with_max_tokens(max_tokens);
    }
    if let Some(temperature) = cli.temperature {
        params = params.with_temperature(temperature);
    }
    let params = params.or(&config.params);

    let mut config = config.with_params(params);
    if let Some(secs) = cli.timeout {
        config = config.with_default_timeout(Duration::from_secs(secs));
    }
    if cli.hide_individual {
        config = config.with_individual_responses(false);
    }
    config
}

fn report_issues(issues: &[ConfigIssue]) {
    for issue in issues {
        match issue.severity {
            Severity::Error => eprintln!("config error: {}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
}
