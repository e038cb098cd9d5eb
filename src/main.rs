use clap::{Parser, Subcommand};
use clap_complete::Shell;
use limit_pack::cmd;
use std::path::PathBuf;
use std::process;

/// Bundler configuration for bundle size checks
///
/// limit-pack turns the checks in `.size-limit.toml` into bundler
/// configurations, one per check, ready to be measured.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate bundler configs for every check
    Config {
        /// Project root (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        cwd: Option<PathBuf>,

        /// Scratch directory for generated configs and entries
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Explain bundle size with an interactive analyzer
        #[arg(long)]
        why: bool,

        /// Save bundle stats for later aggregation
        #[arg(long)]
        save_bundle: bool,

        /// Output as JSON (for CI/CD integration)
        #[arg(long)]
        json: bool,
    },

    /// Create a starter .size-limit.toml
    Init {
        /// Project root (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        cwd: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Whether the process runs under a test environment (`NODE_ENV=test`)
fn is_test_environment() -> bool {
    std::env::var("NODE_ENV").is_ok_and(|env| env == "test")
}

#[tokio::main]
async fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match cli.command {
        Some(Commands::Config {
            cwd,
            out_dir,
            why,
            save_bundle,
            json,
        }) => {
            cmd::cmd_config(cmd::ConfigOptions {
                cwd,
                out_dir,
                why,
                save_bundle,
                test_environment: is_test_environment(),
                json,
            })
            .await
        }
        Some(Commands::Init { cwd }) => match cwd {
            Some(cwd) => cmd::cmd_init(&cwd),
            None => std::env::current_dir()
                .map_err(anyhow::Error::from)
                .and_then(|cwd| cmd::cmd_init(&cwd)),
        },
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(shell);
            Ok(())
        }
        None => {
            println!("limit-pack v{}", env!("CARGO_PKG_VERSION"));
            println!("Bundler configuration for bundle size checks\n");
            println!("Usage: limit-pack <COMMAND>\n");
            println!("Commands:");
            println!("  config       Generate bundler configs for every check");
            println!("  init         Create a starter .size-limit.toml");
            println!("  completions  Generate shell completions");
            println!("\nRun 'limit-pack <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use limit_pack::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
