//! Command-line front end for the notes core.
//!
//! # Responsibility
//! - Load config, start logging and drive `NotesApi` for quick local checks.
//! - Print results as JSON so output stays scriptable.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::info;
use notes_core::{init_logging, read_config, CoreConfig, NoteDraft, NotesApi, TextStyle};
use std::path::PathBuf;

/// Notes backend CLI
#[derive(Parser)]
#[command(name = "notes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, global = true, env = "NOTES_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print core liveness and version
    Ping,
    /// Open the database and apply pending schema migrations
    Migrate,
    /// Register a new user
    Register {
        username: String,
        password: String,
    },
    /// Log in and print a bearer token
    Login {
        username: String,
        password: String,
    },
    /// List the notes of the user owning `token`
    Notes {
        token: String,
    },
    /// Create a note for the user owning `token`
    NewNote {
        token: String,
        title: String,
        content: String,
        /// normal, bold or italic
        #[arg(long)]
        style: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Ping = cli.command {
        print_ping();
        return Ok(());
    }

    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging).map_err(|err| anyhow::anyhow!(err))?;
    let api = open_api(&config)?;

    match cli.command {
        Commands::Ping => print_ping(),
        Commands::Migrate => {
            let conn = api.pool().get()?;
            let version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
            info!("event=cli_migrate module=cli status=ok schema_version={version}");
            println!("schema_version={version}");
        }
        Commands::Register { username, password } => {
            let user = api.create_user(&username, &password)?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Commands::Login { username, password } => {
            let token = api.login(&username, &password)?;
            println!("{token}");
        }
        Commands::Notes { token } => {
            let user_id = api.authenticate(&token)?;
            let notes = api.list_notes(user_id)?;
            println!("{}", serde_json::to_string_pretty(&notes)?);
        }
        Commands::NewNote {
            token,
            title,
            content,
            style,
        } => {
            let user_id = api.authenticate(&token)?;
            let draft = NoteDraft::new(title, content).with_style(parse_style(style.as_deref())?);
            let note = api.create_note(user_id, &draft)?;
            println!("{}", serde_json::to_string_pretty(&note)?);
        }
    }

    Ok(())
}

fn print_ping() {
    println!("notes_core ping={}", notes_core::ping());
    println!("notes_core version={}", notes_core::core_version());
}

/// Every command past `ping` spans processes, so it needs an on-disk store.
fn open_api(config: &CoreConfig) -> anyhow::Result<NotesApi> {
    config.require_database_path()?;
    NotesApi::from_config(config).context("failed to start notes core")
}

fn parse_style(value: Option<&str>) -> anyhow::Result<TextStyle> {
    Ok(value.map(TextStyle::parse).transpose()?.unwrap_or_default())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<CoreConfig> {
    let Some(path) = path else {
        bail!("a config file is required; pass --config or set NOTES_CONFIG");
    };
    read_config(path).with_context(|| format!("failed to load config {}", path.display()))
}
