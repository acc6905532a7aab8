//! Command-line front end over a settings file.
//!
//! ```text
//! settings-demo app.ini get database port --as int
//! settings-demo app.ini set "" verbose true
//! settings-demo app.ini dump --json
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use simple_settings::{Settings, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "settings-demo")]
#[command(about = "Query and edit INI-like settings files")]
#[command(version)]
struct Cli {
    /// Settings file to load
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print one setting; use "" for the root section
    Get {
        section: String,
        key: String,

        /// Typed view to print
        #[arg(long = "as", value_enum, default_value_t = Kind::Str)]
        kind: Kind,
    },
    /// Store a setting and write the file back
    Set {
        section: String,
        key: String,
        value: String,

        /// Store as this kind instead of plain text
        #[arg(long = "as", value_enum, default_value_t = Kind::Str)]
        kind: Kind,
    },
    /// List section names
    Sections,
    /// Print every setting
    Dump {
        /// Emit JSON instead of the settings text format
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Str,
    Int,
    Bool,
    List,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_file(&cli.file)
        .with_context(|| format!("loading {}", cli.file.display()))?;

    match cli.command {
        Command::Get { section, key, kind } => print_setting(&settings, &section, &key, kind)?,
        Command::Set {
            section,
            key,
            value,
            kind,
        } => {
            store_setting(&settings, &section, key, &value, kind)?;
            settings.save_to_file(&cli.file)?;
            info!(file = %cli.file.display(), "settings saved");
        }
        Command::Sections => {
            for name in settings.section_names() {
                println!("{name:?}");
            }
        }
        Command::Dump { json: false } => print!("{settings}"),
        Command::Dump { json: true } => println!("{}", to_json(&settings)?),
    }

    Ok(())
}

fn print_setting(settings: &Settings, section: &str, key: &str, kind: Kind) -> Result<()> {
    match kind {
        Kind::Str => println!("{}", settings.get(section, key)?),
        Kind::Int => println!("{}", settings.get_int(section, key)?),
        Kind::Bool => println!("{}", settings.get_bool(section, key)?),
        Kind::List => {
            for item in settings.get_string_list(section, key)? {
                println!("{item}");
            }
        }
    }
    Ok(())
}

fn store_setting(
    settings: &Settings,
    section: &str,
    key: String,
    value: &str,
    kind: Kind,
) -> Result<()> {
    // Parse through the typed views so the stored form is canonical.
    let probe = Value::new(key.as_str(), value);
    match kind {
        Kind::Str => settings.set(section, key, value),
        Kind::Int => settings.set(section, key, probe.as_int()?),
        Kind::Bool => settings.set(section, key, probe.as_bool()),
        Kind::List => settings.set(section, key, probe.as_string_list()),
    }
    Ok(())
}

fn to_json(settings: &Settings) -> Result<String> {
    let mut sections: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    for name in settings.section_names() {
        let section = settings.get_section(&name)?;
        let values = section
            .keys()
            .iter()
            .map(|key| section.value(key))
            .collect::<simple_settings::Result<Vec<_>>>()?;
        sections.insert(name, values);
    }
    Ok(serde_json::to_string_pretty(&sections)?)
}
