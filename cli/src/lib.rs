//! bonesay command line
//!
//! Shared entry point of the `bonesay` and `bonethink` binaries: parse the
//! flags, resolve a figure, then either print the decorated result or run
//! the super mode animation.

pub mod animation;
pub mod args;
pub mod decoration;
pub mod interrupt;
pub mod screen;

use std::ffi::OsString;
use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use bonesay_core::{Bone, BoneError, FigureLibrary, Location, Settings};

pub use args::Args;

/// Which binary is running
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Program {
    Say,
    Think,
}

impl Program {
    pub fn name(self) -> &'static str {
        match self {
            Self::Say => "bonesay",
            Self::Think => "bonethink",
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`)
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Parse the process arguments, run, and map failures to exit code 1
pub async fn main_for(program: Program) -> ExitCode {
    init_logging();
    let args = Args::parse_from(
        std::iter::once(OsString::from(program.name())).chain(std::env::args_os().skip(1)),
    );

    match run(program, args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e:#}", program.name());
            ExitCode::FAILURE
        }
    }
}

pub async fn run(program: Program, args: Args) -> Result<()> {
    let settings = load_settings().context("Failed to load settings")?;
    let library = FigureLibrary::from_env()?;
    let mut rng = StdRng::from_entropy();

    if args.list {
        let mut stdout = io::stdout().lock();
        write_list(&library, &mut stdout)?;
        return Ok(());
    }

    let phrase = match args.phrase() {
        Some(phrase) => phrase,
        None => read_phrase(io::stdin().lock()).context("Failed to read message from stdin")?,
    };

    let config = args.bone_config(program, &settings);
    let bone = Bone::new(config, &library, &mut rng).map_err(figure_error)?;
    debug!(program = program.name(), figure = %bone.file().name, "Speaking");

    if args.super_mode {
        if !io::stdout().is_terminal() {
            bail!("super mode requires a terminal");
        }
        let outcome = animation::run_super(&bone, &phrase, args.bold(&settings)).await?;
        debug!(?outcome, "Animation finished");
        return Ok(());
    }

    let decoration = args.decoration(&settings, &mut rng);
    let painted = decoration
        .paint(&bone.say(&phrase))
        .map_err(|_| anyhow!("Failed to decorate output"))?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{painted}")?;
    stdout.flush()?;
    Ok(())
}

/// Settings from `BONESAY_CONFIG` or the default location
fn load_settings() -> bonesay_core::Result<Settings> {
    Ok(Settings::load_default()?)
}

/// Read all lines of `input`, joined with `\n`
pub fn read_phrase(input: impl BufRead) -> io::Result<String> {
    let lines = input.lines().collect::<io::Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

/// Figure names grouped by search path
pub fn write_list(library: &FigureLibrary, out: &mut impl Write) -> io::Result<()> {
    for path in library.paths() {
        match path.location {
            Location::Embedded => writeln!(out, "Bone files in binary:")?,
            Location::Directory => writeln!(out, "Bone files in {}:", path.name)?,
        }
        writeln!(out, "{}", textwrap::fill(&path.figures.join(" "), 80))?;
        writeln!(out)?;
    }
    Ok(())
}

fn figure_error(e: BoneError) -> anyhow::Error {
    match e {
        BoneError::NotFound { name } => anyhow!("could not find {name} bonefile"),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_program_names() {
        assert_eq!(Program::Say.name(), "bonesay");
        assert_eq!(Program::Think.name(), "bonethink");
    }

    #[test]
    fn test_read_phrase_joins_lines() {
        let input = io::Cursor::new("first\nsecond\r\nthird\n");
        assert_eq!(read_phrase(input).unwrap(), "first\nsecond\nthird");
        assert_eq!(read_phrase(io::Cursor::new("")).unwrap(), "");
    }

    #[test]
    fn test_missing_figure_message() {
        let err = figure_error(BoneError::NotFound {
            name: "ghost".to_string(),
        });
        assert_eq!(err.to_string(), "could not find ghost bonefile");
    }

    #[test]
    fn test_list_embedded() {
        let mut out = Vec::new();
        write_list(&FigureLibrary::embedded(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Bone files in binary:\n"));
        assert!(text.contains("default"));
        assert!(text.ends_with("\n\n"));
    }
}
