//! # Pitwall Shell Library
//!
//! Terminal view layer for the Pitwall storefront. Reads commands, feeds
//! them to a [`StateStore`], and prints a frame after every change.
//!
//! ## Module Organization
//! ```text
//! pitwall_shell/
//! ├── lib.rs          ◄─── You are here (CLI, startup, input loop)
//! ├── command.rs      ◄─── Typed command parsing
//! ├── session.rs      ◄─── Command → store operation
//! ├── render.rs       ◄─── Text / JSON frames, store subscription
//! ├── config.rs       ◄─── ShellConfig (file + env)
//! └── error.rs        ◄─── ShellError
//! ```
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin / --script                                                       │
//! │        │ line                                                           │
//! │        ▼                                                                │
//! │  Command::parse ──► Session::execute ──► StateStore (pitwall-core)      │
//! │                                               │ notify                  │
//! │                                               ▼                         │
//! │                                  render::attach listener ──► stdout     │
//! │                                                                         │
//! │  Errors and "nothing changed" notes go to stdout next to the frames.   │
//! │  Logs go to stderr.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod render;
pub mod session;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::Parser;
use pitwall_core::{Outcome, StateStore};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use command::Command;
use config::ShellConfig;
use error::{ShellError, ShellResult};
use render::SharedWriter;
use session::{Reply, Session};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "pitwall-shell")]
#[command(version, about = "Browse the Pitwall storefront from a terminal", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, env = "PITWALL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Print each frame as a JSON snapshot
    #[arg(long)]
    pub json: bool,
}

/// Runs the shell.
///
/// ## Startup Sequence
/// 1. Initialize logging (stderr)
/// 2. Load `ShellConfig`; `--json` overrides `render_json`
/// 3. Build the seeded `StateStore` and attach the renderer
/// 4. Print the first frame, then read commands until EOF or `quit`
pub fn run(cli: Cli) -> ShellResult<()> {
    init_tracing();

    let mut config = ShellConfig::load(cli.config)?;
    if cli.json {
        config.render_json = true;
    }

    info!(store = %config.store_name, json = config.render_json, "Starting Pitwall shell");

    let store = StateStore::seeded()?;
    let session = Session::new(store, config);
    let stdout: Box<dyn Write + Send> = Box::new(io::stdout());
    let writer: SharedWriter = Arc::new(Mutex::new(stdout));

    match cli.script {
        Some(path) => {
            info!(?path, "Running script");
            let input = BufReader::new(File::open(&path)?);
            run_session(session, input, writer, false)
        }
        None => {
            let prompt = !session.config().render_json;
            run_session(session, io::stdin().lock(), writer, prompt)
        }
    }
}

/// The input loop.
///
/// Command errors are reported and the loop continues; only I/O failures
/// on `input` end it early.
pub fn run_session<R: BufRead>(
    mut session: Session,
    input: R,
    writer: SharedWriter,
    prompt: bool,
) -> ShellResult<()> {
    let subscription = render::attach(session.store(), session.config().clone(), writer.clone());
    show(&session, &writer)?;
    if prompt {
        render::write_out(&writer, "> ")?;
    }

    for line in input.lines() {
        let line = line?;
        let reply = Command::parse(&line).and_then(|command| match command {
            Some(command) => session.execute(command).map(Some),
            None => Ok(None),
        });

        match reply {
            Ok(None) => {}
            Ok(Some(Reply::Done(Outcome::Applied))) => {}
            Ok(Some(Reply::Done(Outcome::Ignored))) => {
                note(&session, &writer, "nothing changed")?;
            }
            Ok(Some(Reply::Text(text))) => render::write_out(&writer, &(text + "\n"))?,
            Ok(Some(Reply::Show)) => show(&session, &writer)?,
            Ok(Some(Reply::Quit)) => break,
            Err(err) => report(&session, &writer, &err)?,
        }

        if prompt {
            render::write_out(&writer, "> ")?;
        }
    }

    subscription.unsubscribe();
    info!(revision = session.store().revision(), "Session ended");
    Ok(())
}

fn show(session: &Session, writer: &SharedWriter) -> ShellResult<()> {
    let store = session.store();
    let mut frame = render::render(store.get(), session.config(), store.revision())?;
    if session.config().render_json {
        frame.push('\n');
    }
    render::write_out(writer, &frame)
}

fn note(session: &Session, writer: &SharedWriter, message: &str) -> ShellResult<()> {
    if session.config().render_json {
        let line = json!({ "outcome": "ignored", "message": message });
        render::write_out(writer, &format!("{}\n", line))
    } else {
        render::write_out(writer, &format!("({})\n", message))
    }
}

fn report(session: &Session, writer: &SharedWriter, err: &ShellError) -> ShellResult<()> {
    warn!(code = err.code(), error = %err, "command failed");
    if session.config().render_json {
        let line = json!({ "error": { "code": err.code(), "message": err.to_string() } });
        render::write_out(writer, &format!("{}\n", line))
    } else {
        render::write_out(writer, &format!("error: {}\n", err))
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pitwall_core=trace` - Show every dispatch and notification
/// - Default: INFO, DEBUG for pitwall crates
///
/// Logs go to stderr; stdout carries the rendered frames.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pitwall=debug"));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
