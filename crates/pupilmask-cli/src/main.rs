use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{NamingArgs, SessionArgs};

#[derive(Parser)]
#[command(name = "pupilmask", version, about = "Swap pupil names for pseudonyms before text leaves the school, and back again")]
struct Cli {
    /// Log as JSON lines on stderr
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look for pupil names outside the name column
    Check {
        /// Rows as JSON: an array of objects, or {"headers": [...], "rows": [...]}
        rows: PathBuf,
        /// Name column to use instead of the detected one
        #[arg(long)]
        name_column: Option<String>,
    },
    /// Anonymise a text file with names from a list, then reidentify it
    Demo {
        /// One name per line
        #[arg(long)]
        names: PathBuf,
        /// Text to anonymise
        #[arg(long)]
        text: PathBuf,
        #[command(flatten)]
        naming: NamingArgs,
    },
    /// Check and anonymise rows, then reidentify a reply read from stdin
    Session {
        rows: PathBuf,
        /// Comma-separated fields to substitute
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,
        #[arg(long)]
        name_column: Option<String>,
        #[command(flatten)]
        naming: NamingArgs,
        /// Write anonymised rows here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a default config file
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Print the active config
    Show,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.json);

    match &cli.command {
        Commands::Check { rows, name_column } => commands::check(rows, name_column.as_deref()),
        Commands::Demo {
            names,
            text,
            naming,
        } => commands::demo(names, text, naming),
        Commands::Session {
            rows,
            fields,
            name_column,
            naming,
            out,
        } => commands::session(SessionArgs {
            rows,
            fields,
            name_column: name_column.as_deref(),
            naming,
            out: out.as_ref(),
        }),
        Commands::Config { command } => match command {
            ConfigCommands::Init { force } => commands::config_init(*force),
            ConfigCommands::Show => commands::config_show(),
        },
    }
}
