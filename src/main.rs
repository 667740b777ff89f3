//! Demo REPL for the drivesh engine.
//!
//! Hosts the engine over the in-memory reference store with a small
//! seeded hierarchy. Reads one line at a time from stdin, prints the
//! result envelope's output, and honors the advisory UI actions the
//! engine emits (clear, color, exit).

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use drivesh::models::FolderRef;
use drivesh::{
    JsonStateStore, MemoryStateStore, MemoryStore, StateStore, UiAction, execute,
};

#[derive(Parser)]
#[command(name = "drivesh", about = "Terminal for a remote object store (demo)")]
struct Args {
    /// Persist session state (location, clipboard) to this JSON file.
    #[arg(long)]
    state_file: Option<std::path::PathBuf>,

    /// Skip the greeting banner.
    #[arg(long)]
    no_banner: bool,
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut state: Box<dyn StateStore> = match &args.state_file {
        Some(path) => Box::new(JsonStateStore::open(path)),
        None => Box::new(MemoryStateStore::new()),
    };
    let mut store = seeded_store();

    if !args.no_banner {
        println!("drivesh demo - type 'help' for commands, 'exit' to quit");
    }

    let stdin = io::stdin();
    let mut color_prefix = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let result = execute(&line, state.as_mut(), &mut store);

        match result.action {
            Some(UiAction::Clear) => {
                print!("\x1b[2J\x1b[H");
                continue;
            }
            Some(UiAction::Exit) => {
                println!("{}", result.output);
                break;
            }
            Some(UiAction::Color) => {
                if let Some(color) = &result.color {
                    color_prefix = ansi_for(color).to_string();
                }
            }
            Some(UiAction::Reload) => {
                // Nothing to reload in a process-hosted terminal.
            }
            Some(UiAction::Open) | None => {}
        }

        if !result.output.is_empty() {
            println!("{}{}\x1b[0m", color_prefix, result.output);
        }
    }

    Ok(())
}

/// Build the demo hierarchy the REPL starts with.
fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    let documents = store.add_folder(&FolderRef::Root, "Documents");
    let reports = store.add_folder(&FolderRef::Folder(documents.clone()), "Reports");
    store.add_file(
        &FolderRef::Folder(reports.clone()),
        "q1-summary.txt",
        "Q1 revenue was flat.\n",
    );
    store.add_file(
        &FolderRef::Folder(reports),
        "q2-summary.txt",
        "Q2 revenue recovered.\n",
    );
    store.add_file(
        &FolderRef::Folder(documents),
        "notes.txt",
        "Remember to file the quarterly summaries.\n",
    );
    store.add_folder(&FolderRef::Root, "Photos");
    store.add_file(
        &FolderRef::Root,
        "readme.txt",
        "Welcome to the demo drive.\n",
    );
    store
}

fn ansi_for(color: &str) -> &'static str {
    match color {
        "black" => "\x1b[30m",
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        _ => "\x1b[37m",
    }
}
