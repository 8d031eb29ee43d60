pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use stockroom_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};

pub const DEMO_INSTRUCTION: &str = "Add 5 HP Laptops & 3 Iphone in the inventory. Then delete 2 HP Laptops & 1 Iphone. Finally, list the inventory.";

#[derive(Debug, Parser)]
#[command(
    name = "stockroom",
    about = "Inventory manager driven by an LLM with tool calling",
    long_about = "Send a natural-language instruction to an OpenAI-compatible model that manages an in-memory inventory through add/delete/list tools.",
    after_help = "Examples:\n  stockroom run\n  stockroom run \"Add 2 Dell Laptops, then list the inventory\"\n  stockroom tools\n  stockroom config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a stockroom.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Override the model name")]
    model: Option<String>,
    #[arg(long, global = true, help = "Override the log level (trace|debug|info|warn|error)")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run one instruction through the agent and print the final result")]
    Run {
        #[arg(help = "Natural-language instruction; defaults to the demo instruction")]
        instruction: Option<String>,
    },
    #[command(about = "Print the tool declarations sent to the model as JSON")]
    Tools,
    #[command(about = "Inspect effective configuration values with source attribution and redaction")]
    Config,
}

impl Cli {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                log_level: self.log_level.clone(),
                llm_model: self.model.clone(),
                ..ConfigOverrides::default()
            },
        }
    }
}

pub fn run() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let options = cli.load_options();

    let result = match cli.command {
        Command::Run { instruction } => {
            commands::run::run(options, instruction.as_deref().unwrap_or(DEMO_INSTRUCTION))
        }
        Command::Tools => commands::tools::run(),
        Command::Config => commands::config::run(options),
    };

    if result.exit_code == 0 {
        println!("{}", result.output);
    } else {
        eprintln!("{}", result.output);
    }
    ExitCode::from(result.exit_code)
}

/// Installs the global subscriber once; later calls are no-ops.
///
/// Logs go to stderr so stdout only carries the result block.
pub fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::WARN);
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(log_level);

    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
