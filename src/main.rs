// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use jasweep::app_config::{self, Config, TranslationProvider};
use jasweep::app_controller::Controller;
use jasweep::translation::RunOptions;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    OpenAI,
    Anthropic,
    Ollama,
    LMStudio,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::LMStudio => TranslationProvider::LMStudio,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for jasweep
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Write the default configuration to the config path
    InitConfig {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// jasweep - translate Japanese text in source files to English
///
/// Finds Japanese text in string literals, JSX text and comments of
/// TypeScript and JavaScript files and replaces it with an English
/// translation produced by an AI provider.
#[derive(Parser, Debug)]
#[command(name = "jasweep")]
#[command(version)]
#[command(about = "Translate Japanese text in TypeScript/JavaScript sources to English")]
#[command(long_about = "jasweep rewrites Japanese string literals, JSX text and comments in place.

EXAMPLES:
    jasweep                                    # Translate every source file under the current directory
    jasweep --dry-run src/                     # Report what would be translated, write nothing
    jasweep -p anthropic src/App.tsx           # Use a specific provider
    jasweep -p ollama -m llama3.2:3b src/      # Use a local model
    jasweep init-config                        # Write jasweep.json with defaults
    jasweep completions bash > jasweep.bash    # Generate bash completions

CONFIGURATION:
    Configuration is read from jasweep.json by default. You can specify a different
    file with --config-path. If the file doesn't exist, built-in defaults are used.

SUPPORTED PROVIDERS:
    openai    - OpenAI API (requires API key, default)
    anthropic - Anthropic API (requires API key)
    ollama    - Local Ollama server
    lmstudio  - LM Studio local server (OpenAI-compatible on http://localhost:1234/v1)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Files or directories to process (defaults to the current directory)
    #[arg(value_name = "PATHS")]
    paths: Vec<PathBuf>,

    /// Report candidate nodes without calling the provider or writing files
    #[arg(long)]
    dry_run: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// API key for the selected provider
    #[arg(long, env = "JASWEEP_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "jasweep.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The boxed logger accepts everything; log::max_level does the filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌",
            Level::Warn => "🚧",
            Level::Info => " ",
            Level::Debug => "🔍",
            Level::Trace => "📋",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config or the command line says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let mut cli = CommandLineOptions::parse();

    match cli.command.take() {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "jasweep", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::InitConfig { force }) => init_config(&cli.config_path, force),
        None => run_translate(cli).await,
    }
}

fn init_config(config_path: &str, force: bool) -> Result<()> {
    if Path::new(config_path).exists() && !force {
        warn!("Config file already exists at '{}' (use --force to overwrite)", config_path);
        return Ok(());
    }

    Config::default().save(config_path)?;
    info!("Wrote default configuration to {}", config_path);
    Ok(())
}

fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_default(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        config.translation.active_provider_config_mut().model = model.clone();
    }

    if let Some(api_key) = &options.api_key {
        config.translation.active_provider_config_mut().api_key = api_key.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

async fn run_translate(options: CommandLineOptions) -> Result<()> {
    // If log level is set via command line, apply it before the config is read
    if let Some(cmd_log_level) = &options.log_level {
        let log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(log_level.to_level_filter());
    }

    let config = load_config(&options)?;
    log::set_max_level(config.log_level.to_level_filter());

    let run_options = RunOptions { dry_run: options.dry_run };
    config
        .validate(run_options.dry_run)
        .context("Configuration validation failed")?;

    let paths = if options.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        options.paths.clone()
    };
    debug!("Processing {:?}", paths);

    let controller = Controller::with_config(config)?;
    controller.run(&paths, run_options).await?;

    Ok(())
}
