use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use pupilmask_core::{NamingConfig, NamingScheme, PseudonymMap, Record};
use pupilmask_scan::{COMMON_FIRST_NAMES, Session, scan_detailed};
use serde::Deserialize;
use tracing::info;

use crate::config::{self, PupilmaskConfig};

/// A rows file: either a bare array of objects, or an object carrying the
/// header order alongside the rows.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RowsFile {
    Table {
        headers: Vec<String>,
        rows: Vec<Record>,
    },
    Rows(Vec<Record>),
}

/// Naming flags shared by `demo` and `session`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct NamingArgs {
    /// Shuffle seed; the same seed always gives the same labels
    #[arg(long)]
    pub seed: Option<u32>,
    /// Label template such as "Pupil-###", or "greek"
    #[arg(long)]
    pub scheme: Option<String>,
    /// First number used by numbered templates
    #[arg(long)]
    pub start_at: Option<u32>,
}

impl NamingArgs {
    fn resolve(&self, base: &NamingConfig) -> NamingConfig {
        let mut naming = base.clone();
        if let Some(scheme) = &self.scheme {
            naming = naming.with_scheme(scheme.parse::<NamingScheme>().unwrap_or_default());
        }
        if let Some(start_at) = self.start_at {
            naming = naming.with_start_at(start_at);
        }
        if let Some(seed) = self.seed {
            naming = naming.with_seed(seed);
        }
        naming
    }
}

fn read_file(path: &Path) -> eyre::Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))
}

fn load_session(path: &Path, name_column: Option<&str>) -> eyre::Result<Session> {
    let (headers, rows) = match serde_json::from_str::<RowsFile>(&read_file(path)?)? {
        RowsFile::Table { headers, rows } => (headers, rows),
        RowsFile::Rows(rows) => (Vec::new(), rows),
    };
    let session = Session::load(headers, rows)?;
    Ok(match name_column {
        Some(column) => session.with_name_column(column)?,
        None => session,
    })
}

fn common_names(config: &PupilmaskConfig) -> Vec<&str> {
    COMMON_FIRST_NAMES
        .iter()
        .copied()
        .chain(config.extra_common_names.iter().map(String::as_str))
        .collect()
}

pub fn check(rows: &Path, name_column: Option<&str>) -> eyre::Result<ExitCode> {
    let config = config::load_or_default()?;
    let session = load_session(rows, name_column)?;

    let hits = scan_detailed(session.rows(), session.name_column(), &common_names(&config))?;
    println!("Name column: {}", session.name_column());

    if hits.is_empty() {
        println!("No names found outside the name column.");
        return Ok(ExitCode::SUCCESS);
    }

    for hit in &hits {
        println!("Row {}, column '{}': {}", hit.row + 1, hit.column, hit.matched);
    }
    println!(
        "{} possible name(s) found. Fix these cells before anonymising.",
        hits.len()
    );
    Ok(ExitCode::FAILURE)
}

pub fn demo(names: &Path, text: &Path, naming: &NamingArgs) -> eyre::Result<ExitCode> {
    let config = config::load_or_default()?;
    let naming = naming.resolve(&config.naming);

    let names = read_file(names)?;
    let text = read_file(text)?;

    let map = PseudonymMap::build(names.lines(), &naming);
    let anonymised = map.anonymise_text(&text)?;
    let restored = map.reidentify_text(&anonymised)?;

    println!("Pseudonyms:");
    for line in map.display_lines() {
        println!("  {line}");
    }
    println!("\nAnonymised:\n{anonymised}");
    println!("\nReidentified:\n{restored}");
    Ok(ExitCode::SUCCESS)
}

pub struct SessionArgs<'a> {
    pub rows: &'a Path,
    pub fields: &'a [String],
    pub name_column: Option<&'a str>,
    pub naming: &'a NamingArgs,
    pub out: Option<&'a PathBuf>,
}

pub fn session(args: SessionArgs<'_>) -> eyre::Result<ExitCode> {
    let config = config::load_or_default()?;
    let naming = args.naming.resolve(&config.naming);
    let mut session = load_session(args.rows, args.name_column)?;

    let flagged = session.check_names(&common_names(&config))?;
    for cell in flagged {
        eprintln!("Row {}, column '{}' may contain a name", cell.row + 1, cell.column);
    }

    let fields = if !args.fields.is_empty() {
        args.fields.to_vec()
    } else if !config.default_fields.is_empty() {
        config.default_fields.clone()
    } else {
        session
            .headers()
            .iter()
            .filter(|header| *header != session.name_column())
            .cloned()
            .collect()
    };

    let rows = session.anonymise(&naming, &fields)?;
    let json = serde_json::to_string_pretty(&rows)?;
    match args.out {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(session = %session.id(), path = %path.display(), "anonymised rows written");
        }
        None => println!("{json}"),
    }

    if let Some(map) = session.map() {
        eprintln!("Pseudonyms:");
        for line in map.display_lines() {
            eprintln!("  {line}");
        }
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!("Paste the reply, then press Ctrl-D:");
    }
    let mut reply = String::new();
    stdin.read_to_string(&mut reply)?;
    if reply.trim().is_empty() {
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", session.reidentify_text(&reply)?);
    Ok(ExitCode::SUCCESS)
}

pub fn config_init(force: bool) -> eyre::Result<ExitCode> {
    let path = config::config_path()?;
    if config::has_config() && !force {
        return Err(eyre::eyre!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        ));
    }
    config::save_config(&PupilmaskConfig::default())?;
    println!("{}", path.display());
    Ok(ExitCode::SUCCESS)
}

pub fn config_show() -> eyre::Result<ExitCode> {
    let config = config::load_or_default()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(ExitCode::SUCCESS)
}
