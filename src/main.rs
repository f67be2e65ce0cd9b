//! # Todoust
//!
//! A terminal client for a personal task tracker. Tasks live on a remote REST
//! service; Todoust renders them in an interactive TUI and offers a small CLI for
//! scripting.
//!
//! ## Features
//!
//! *   **Sorted list**: Incomplete tasks first, oldest first within each group.
//! *   **Instant toggling**: Completion flips on screen before the server answers.
//! *   **Safe deletion**: Every delete asks for confirmation.
//! *   **Color tags**: Each task carries a color from a fixed palette.
//!
//! ## Usage
//!
//! ### Interactive Mode (TUI)
//!
//! ```bash
//! todoust
//! # or start on a specific page
//! todoust ui --route /create
//! todoust ui --route /edit/3
//! ```
//!
//! #### TUI Key Bindings
//!
//! **Task List**
//! *   `q`: Quit
//! *   `a`: Create task
//! *   `Space`: Toggle completion of the selected task
//! *   `e` / `Enter`: Edit the selected task
//! *   `d`: Delete the selected task (asks for confirmation)
//! *   `r`: Refresh
//!
//! **Create / Edit**
//! *   `Tab`: Switch between title and color
//! *   `←` / `→`: Pick a color
//! *   `Enter`: Submit
//! *   `Esc`: Back
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! todoust add "Buy milk" --color 4
//! todoust list
//! todoust toggle 3
//! todoust edit 3 --title "Buy oat milk"
//! todoust remove 3
//! ```
//!
//! ## Configuration
//!
//! The service URL defaults to `http://localhost:8080`. Override it with
//! `--api-url`, the `TODOUST_API_URL` environment variable, or `api_url` in
//! `~/.config/todoust/config.toml` (path overridable with `TODOUST_CONFIG`).

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use todoust::api::HttpTaskApi;
use todoust::commands::*;
use todoust::config::Config;
use todoust::logging::{self, LogLevel};
use todoust::models::{TaskFormData, TASK_COLORS};
use todoust::tui::{route::Route, run_tui};

#[derive(Parser)]
#[command(name = "todoust")]
#[command(about = "Terminal client for a personal task tracker", long_about = None)]
struct Cli {
    /// Base URL of the task service
    #[arg(long, global = true, env = "TODOUST_API_URL")]
    api_url: Option<String>,
    /// Log verbosity (RUST_LOG takes precedence)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
    /// Log file used by the TUI
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all tasks, incomplete first
    List,
    /// Show a single task
    Show {
        id: u64,
    },
    /// Create a new task
    Add {
        /// Task title (quoted if it has spaces)
        title: String,
        /// Palette color as hex (e.g. "#34C759") or 1-based index
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Edit a task's title or color
    Edit {
        id: u64,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New color, hex or 1-based palette index
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Toggle a task between complete and incomplete
    Toggle {
        id: u64,
    },
    /// Delete a task
    Remove {
        id: u64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Print the color palette
    Colors,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Open interactive TUI
    Ui {
        /// Page to open: "/", "/create" or "/edit/<id>"
        #[arg(long, default_value = "/")]
        route: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let is_tui = matches!(cli.command, None | Some(Commands::Ui { .. }));
    let log_init = if is_tui {
        let path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
        logging::init_file(cli.log_level, &path)
    } else {
        logging::init_stderr(cli.log_level)
    };
    if let Err(e) = log_init {
        eprintln!("Failed to initialise logging: {}", e);
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "todoust", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }
    if let Some(Commands::Colors) = cli.command {
        for (i, c) in TASK_COLORS.iter().enumerate() {
            println!("{:>2}  {}", i + 1, c);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load(cli.api_url.as_deref())?;
    tracing::debug!(api_url = %config.api_url, "configuration loaded");
    let api = HttpTaskApi::new(config.api_url.clone(), config.timeout)?;

    // API failures are already reported to the user by the command itself.
    let ok = match cli.command {
        Some(Commands::List) => cmd_list(&api).is_ok(),
        Some(Commands::Show { id }) => cmd_show(&api, id).is_ok(),
        Some(Commands::Add { title, color }) => {
            let color = match color {
                Some(c) => match resolve_color(&c) {
                    Some(c) => c,
                    None => {
                        eprintln!("Unknown color '{}'. Run `todoust colors` to see the palette.", c);
                        return Ok(ExitCode::FAILURE);
                    }
                },
                None => TASK_COLORS[0].to_string(),
            };
            match (TaskFormData { title, color }).validate() {
                Ok(data) => cmd_add(&api, data, false).is_ok(),
                Err(errors) => {
                    for e in errors {
                        eprintln!("{}", e);
                    }
                    false
                }
            }
        }
        Some(Commands::Edit { id, title, color }) => {
            let color = match color.map(|c| resolve_color(&c).ok_or(c)).transpose() {
                Ok(c) => c,
                Err(c) => {
                    eprintln!("Unknown color '{}'. Run `todoust colors` to see the palette.", c);
                    return Ok(ExitCode::FAILURE);
                }
            };
            match edit_patch(title.as_deref(), color) {
                Ok(Some(patch)) => cmd_edit(&api, id, patch, false).is_ok(),
                Ok(None) => {
                    eprintln!("Nothing to update. Pass --title and/or --color.");
                    false
                }
                Err(e) => {
                    eprintln!("{}", e);
                    false
                }
            }
        }
        Some(Commands::Toggle { id }) => cmd_toggle(&api, id, false).is_ok(),
        Some(Commands::Remove { id, force }) => cmd_remove(&api, id, force, false).is_ok(),
        Some(Commands::Ui { route }) => {
            run_tui(api, Route::parse(&route), config.toast_duration)?;
            true
        }
        None => {
            run_tui(api, Route::List, config.toast_duration)?;
            true
        }
        Some(Commands::Completions { .. }) | Some(Commands::Colors) => true,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
