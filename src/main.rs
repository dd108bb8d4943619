use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use kalimba::config::Config;
use kalimba::export::PdfSink;
use kalimba::logging::init_logging;
use kalimba::render::{to_ansi, to_html};
use kalimba::store::FileStore;
use kalimba::visual::{tine_layout, tines_to_svg, TineDimensions};
use kalimba::Session;

const DEFAULT_CONFIG_FILE: &str = "kalimba.yaml";

const USAGE: &str = "Usage: kalimba [--store <dir>] [--config <file>] <command> [args]

Commands:
  load <notes.txt|->        Save a notes file as the current document
  show                      Print the current document
  preview [--html]          Print the document with note colors
  export [output.pdf]       Export a colorized PDF
  palette                   List note colors
  color <note> <#RRGGBB>    Set the color of a note
  reset                     Restore the default palette
  tines [output.svg]        Draw the kalimba tines as SVG";

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn usage() -> ! {
    fail(USAGE)
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut store_dir: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut rest = args.as_slice();

    // Global flags come before the command
    loop {
        match rest {
            [flag, value, tail @ ..] if flag == "--store" => {
                store_dir = Some(PathBuf::from(value));
                rest = tail;
            }
            [flag, value, tail @ ..] if flag == "--config" => {
                config_path = Some(PathBuf::from(value));
                rest = tail;
            }
            [flag] if flag == "--store" || flag == "--config" => usage(),
            _ => break,
        }
    }

    let (command, command_args) = match rest.split_first() {
        Some((command, tail)) => (command.as_str(), tail),
        None => usage(),
    };

    let config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(&format!("Error: {}", e)),
    };

    let level = env::var("KALIMBA_LOG").unwrap_or_else(|_| config.log_level.clone());
    if let Err(e) = init_logging(&level) {
        eprintln!("Warning: {}", e);
    }

    let store = FileStore::new(store_dir.unwrap_or_else(|| config.store_dir.clone()));
    let mut session = match Session::restore(store) {
        Ok(session) => session,
        Err(e) => fail(&format!("Error reading saved state: {}", e)),
    };

    match (command, command_args) {
        ("load", [path]) => {
            let text = if path == "-" {
                io::read_to_string(io::stdin())
            } else {
                fs::read_to_string(path)
            };
            let text = match text {
                Ok(text) => text,
                Err(e) => fail(&format!("Error reading file '{}': {}", path, e)),
            };
            if let Err(e) = session.set_notes(&text) {
                fail(&format!("Error saving notes: {}", e));
            }
            eprintln!("Loaded {} line(s)", text.split('\n').count());
        }
        ("show", []) => {
            println!("{}", session.notes());
        }
        ("preview", []) => {
            println!("{}", to_ansi(&session.preview()));
        }
        ("preview", [flag]) if flag == "--html" => {
            println!("{}", to_html(&session.preview()));
        }
        ("export", tail) if tail.len() <= 1 => {
            let mut options = config.export.clone();
            if let Some(output) = tail.first() {
                options.filename = output.clone();
            }
            for note in session.unassigned_notes() {
                eprintln!("Note {} has no color; exporting it in black", note);
            }
            let mut sink = PdfSink::new();
            match session.export(&mut sink, &options) {
                Ok(summary) => eprintln!(
                    "Wrote {} page(s) to {}",
                    summary.pages, options.filename
                ),
                Err(e) => fail(&format!("Export failed: {}", e)),
            }
        }
        ("palette", []) => {
            for (note, color) in session.palette().iter() {
                println!("{:<6}{}", note, color);
            }
        }
        ("color", [note, color]) => {
            if let Err(e) = session.set_color(note, color) {
                fail(&format!("Error: {}", e));
            }
        }
        ("reset", []) => {
            if let Err(e) = session.reset_palette() {
                fail(&format!("Error: {}", e));
            }
            eprintln!("Palette reset to defaults");
        }
        ("tines", tail) if tail.len() <= 1 => {
            let dims = TineDimensions::default();
            let svg = match tines_to_svg(&tine_layout(session.palette(), &dims), &dims) {
                Ok(svg) => svg,
                Err(e) => fail(&format!("Error: {}", e)),
            };
            match tail.first() {
                Some(path) => {
                    if let Err(e) = fs::write(path, &svg) {
                        fail(&format!("Error writing to '{}': {}", path, e));
                    }
                    eprintln!("Wrote SVG to {}", path);
                }
                None => println!("{}", svg),
            }
        }
        _ => usage(),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config, kalimba::KalimbaError> {
    match path {
        Some(path) => Config::load(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => Config::load(Path::new(DEFAULT_CONFIG_FILE)),
        None => Ok(Config::default()),
    }
}
