mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use borderless_core::VisibilityRequest;
use borderless_core::config::ConfigPaths;
use borderless_core::ipc::Command;

#[derive(Parser)]
#[command(
    name = "borderless",
    version,
    about = "Make windowed applications borderless and fill the screen"
)]
struct Cli {
    /// Use DIR instead of ~/.config/borderless for all files
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init {
        /// Overwrite an existing config.toml
        #[arg(long)]
        force: bool,
    },
    /// Run the daemon in the foreground until Ctrl+C
    Run,
    /// Stop the running daemon
    Stop,
    /// Show whether the daemon is running and what it tracks
    Status,
    /// Keep scanning windows but stop applying favorites
    Pause,
    /// Apply favorites again after `pause`
    Resume,
    /// List windows that can be made borderless
    List,
    /// Manage favorite rules
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },
    /// Show or hide the Windows taskbar
    Taskbar {
        #[command(subcommand)]
        state: TaskbarCommands,
    },
    /// Make one window borderless now
    Apply(commands::apply::ApplyArgs),
    /// Put back a window the daemon made borderless
    Restore {
        /// Window handle (decimal or hex with 0x prefix), see `borderless list`
        #[arg(value_parser = commands::parse_handle)]
        handle: usize,
    },
    /// Never track a process's windows again
    Block {
        /// Process name without extension
        process: String,
    },
}

#[derive(Subcommand)]
enum FavoritesCommands {
    /// List favorites in match order
    List,
    /// Add a favorite with default settings
    Add(commands::favorites::AddArgs),
    /// Remove a favorite
    Remove {
        /// The favorite's process name or window title
        text: String,
    },
    /// Change a favorite's settings
    Set(commands::favorites::SetArgs),
}

#[derive(Subcommand)]
enum TaskbarCommands {
    /// Show the taskbar and restore saved workareas
    Show,
    /// Hide the taskbar and extend workareas to the full screen
    Hide,
    /// Flip the current state
    Toggle,
}

fn main() {
    let cli = Cli::parse();
    let paths = config_paths(cli.config_dir);

    match cli.command {
        Commands::Init { force } => commands::init::execute(&paths, force),
        Commands::Run => commands::run::execute(&paths),
        Commands::Stop => commands::control::execute(Command::Stop),
        Commands::Status => commands::control::execute(Command::Status),
        Commands::Pause => commands::control::execute(Command::Pause),
        Commands::Resume => commands::control::execute(Command::Resume),
        Commands::List => commands::list::execute(&paths),
        Commands::Favorites { command } => match command {
            FavoritesCommands::List => commands::favorites::list(&paths),
            FavoritesCommands::Add(args) => commands::favorites::add(&paths, &args),
            FavoritesCommands::Remove { text } => commands::favorites::remove(&paths, &text),
            FavoritesCommands::Set(args) => commands::favorites::set(&paths, &args),
        },
        Commands::Taskbar { state } => {
            let request = match state {
                TaskbarCommands::Show => VisibilityRequest::Show,
                TaskbarCommands::Hide => VisibilityRequest::Hide,
                TaskbarCommands::Toggle => VisibilityRequest::Toggle,
            };
            commands::taskbar::execute(&paths, request);
        }
        Commands::Apply(args) => commands::apply::execute(&paths, &args),
        Commands::Restore { handle } => commands::control::execute(Command::Restore { handle }),
        Commands::Block { process } => commands::block::execute(&paths, &process),
    }
}

/// Resolves `--config-dir` or the default location.
fn config_paths(config_dir: Option<PathBuf>) -> ConfigPaths {
    match config_dir {
        Some(dir) => ConfigPaths::new(dir),
        None => ConfigPaths::default_location().unwrap_or_else(|e| commands::fail(e)),
    }
}
