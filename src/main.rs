use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use log::{debug, info};
use notesketch::config::Config;
use notesketch::draw::{Element, Frame, Geometry};
use notesketch::session::{
    FileNoteStore, NoteType, backfill_ids, decode_scene, encode_scene, read_note_file,
    write_note_file,
};
use notesketch::util::now_millis;
use std::path::{Path, PathBuf};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("NOTESKETCH_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "notesketch")]
#[command(version = VERSION, about = "Inspect and maintain drawing notes")]
struct Cli {
    /// Use this config file instead of ~/.config/notesketch/config.toml
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the elements of a stored drawing
    Inspect {
        /// Note file, or the id of a note in the notes directory
        note: String,
    },
    /// Give every element without an id a stable one and rewrite the note
    Migrate {
        /// Note file, or the id of a note in the notes directory
        note: String,

        /// Report what would change without writing
        #[arg(long, action = ArgAction::SetTrue)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Inspect { note } => {
            let path = resolve_note_path(note, cli.config.as_deref())?;
            inspect(&path)
        }
        Command::Migrate { note, dry_run } => {
            let path = resolve_note_path(note, cli.config.as_deref())?;
            migrate(&path, *dry_run)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// An existing file path wins; otherwise the argument is a note id.
fn resolve_note_path(arg: &str, config_path: Option<&Path>) -> Result<PathBuf> {
    let candidate = PathBuf::from(arg);
    if candidate.is_file() {
        return Ok(candidate);
    }

    let config = load_config(config_path)?;
    let store = FileNoteStore::from_config(&config)?;
    let path = store
        .note_path(arg)
        .with_context(|| format!("'{arg}' is neither a file nor a note id"))?;
    if !path.is_file() {
        bail!("Note '{}' not found in {}", arg, store.dir().display());
    }
    debug!("Resolved note '{}' to {}", arg, path.display());
    Ok(path)
}

fn inspect(path: &Path) -> Result<()> {
    let note = read_note_file(path)?;
    if note.note_type != NoteType::Drawing {
        bail!(
            "{} is a {:?} note, not a drawing",
            path.display(),
            note.note_type
        );
    }

    let frame = decode_scene(&note.content, now_millis())
        .with_context(|| format!("Failed to read drawing in {}", path.display()))?;

    println!("Title: {}", note.title);
    println!("Elements: {}", frame.len());
    for (index, element) in frame.iter().enumerate() {
        println!(
            "{:>3}  {:<24} {:<9} {}",
            index,
            element.id,
            element.tool.as_str(),
            describe(element)
        );
    }
    Ok(())
}

fn describe(element: &Element) -> String {
    let mut summary = match element.geometry() {
        Geometry::Polyline { points, .. } => format!("{} points", points.len()),
        Geometry::Arrow { start, end, .. } => format!(
            "({:.1}, {:.1}) -> ({:.1}, {:.1})",
            start.x, start.y, end.x, end.y
        ),
        Geometry::Rect {
            origin,
            width,
            height,
        } => format!(
            "{:.1}x{:.1} at ({:.1}, {:.1})",
            width, height, origin.x, origin.y
        ),
        Geometry::Circle { center, radius } => {
            format!("r={:.1} at ({:.1}, {:.1})", radius, center.x, center.y)
        }
        Geometry::Text {
            text, font_size, ..
        } => format!("{:?} size {:.1}", text, font_size),
    };
    if !element.is_finite() {
        summary.push_str(" [non-finite]");
    }
    summary
}

fn migrate(path: &Path, dry_run: bool) -> Result<()> {
    let mut note = read_note_file(path)?;
    if note.content.trim().is_empty() {
        println!("{}: empty drawing, nothing to migrate", path.display());
        return Ok(());
    }

    let mut frame: Frame = serde_json::from_str(&note.content)
        .with_context(|| format!("Failed to read drawing in {}", path.display()))?;
    let assigned = backfill_ids(&mut frame, now_millis());

    if assigned == 0 {
        println!("{}: every element already has an id", path.display());
        return Ok(());
    }

    if dry_run {
        println!(
            "Dry-run: would assign {} id(s) in {}",
            assigned,
            path.display()
        );
        return Ok(());
    }

    note.content = encode_scene(&frame)?;
    write_note_file(path, &note)?;
    info!("Migrated {}", path.display());
    println!("Assigned {} id(s) in {}", assigned, path.display());
    Ok(())
}
