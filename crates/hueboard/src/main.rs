//! hueboard - theme and display helpers for the printer dashboard
//!
//! Renders the active theme as CSS variables, manages the persisted theme
//! selection, and exposes the formatting helpers for scripts.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use hueboard_core::{Config, Theme, logging};

/// hueboard - theme and display helpers for the printer dashboard
#[derive(Parser, Debug)]
#[command(name = "hueboard", version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (uses XDG lookup if not specified)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print example configuration and exit
    #[arg(long)]
    print_example_config: bool,

    /// Validate configuration and exit (returns non-zero on errors)
    #[arg(long)]
    check_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the theme's CSS variables and theme-color meta tag
    Css {
        /// Theme to render (defaults to the saved selection)
        #[arg(short, long, value_parser = parse_theme)]
        theme: Option<Theme>,
    },
    /// Inspect or change the saved theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Title-case a raw temperature sensor name (e.g. heat_index)
    TemperatureName {
        /// Raw sensor name
        name: String,
    },
    /// Build a notification settings key (e.g. email_enabled)
    NotificationKey {
        /// Channel name (e.g. email, telegram)
        channel: String,
        /// Setting key (e.g. enabled)
        key: String,
    },
    /// Look up the normalized score nearest a position in a predictions file
    Percentile {
        /// JSON file holding an array of prediction records
        file: PathBuf,
        /// Position along the series, 0.0 to 1.0
        position: f64,
        /// Read `fields.normalized_p` instead of `p`
        #[arg(long)]
        private: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    /// Show the saved theme and what it resolves to
    Get,
    /// Save a theme selection (Light, Dark or System)
    Set {
        #[arg(value_parser = parse_theme)]
        theme: Theme,
    },
}

fn parse_theme(value: &str) -> Result<Theme, String> {
    value.parse().map_err(|e: hueboard_core::Error| e.to_string())
}

fn main() -> ExitCode {
    let args = Args::parse();

    logging::init(args.verbose);

    // --print-example-config needs no config at all
    if args.print_example_config {
        print!("{}", hueboard_core::config::DEFAULT_CONFIG_TOML);
        return ExitCode::SUCCESS;
    }

    // If --config is specified, it must exist and be valid (no fallback)
    let load_result = match Config::find_and_load(args.config.as_deref()) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(ref source) = load_result.source {
        info!("Loaded configuration from {:?}", source);
    } else if load_result.used_defaults {
        debug!("Using default configuration (no config file found)");
    }

    let config = load_result.config;

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    debug!("Configuration validated successfully");

    if args.check_config {
        if let Some(ref source) = load_result.source {
            println!("Configuration valid: {}", source.display());
        } else {
            println!("Configuration valid (using defaults)");
        }
        println!("{}", config.summary());
        return ExitCode::SUCCESS;
    }

    let command = args.command.unwrap_or(Command::Css { theme: None });

    match handle_command(command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Dispatch a CLI subcommand.
fn handle_command(command: Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::Css { theme } => {
            print!("{}", commands::render_css(config, theme));
        }
        Command::Theme { action } => match action {
            ThemeAction::Get => {
                println!("{}", commands::describe_theme(config));
            }
            ThemeAction::Set { theme } => {
                let path = commands::save_selection(config, theme)?;
                info!("Saved theme {} to {}", theme, path.display());
                println!("{}", theme);
            }
        },
        Command::TemperatureName { name } => {
            println!("{}", hueboard_core::temperature_display_name(&name));
        }
        Command::NotificationKey { channel, key } => {
            let channel = hueboard_core::NotificationChannel::new(channel);
            println!(
                "{}",
                hueboard_core::get_notification_setting_key(&channel, &key)
            );
        }
        Command::Percentile {
            file,
            position,
            private,
        } => {
            let value = commands::percentile_from_file(&file, position, !private)?;
            if value == 0.0 {
                warn!("No score at position {} (missing field or index)", position);
            }
            println!("{}", value);
        }
    }
    Ok(())
}
