//! Subcommand implementations

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use perspective_format::{
    read_puzzle_file, read_world_file, write_puzzle_file, write_puzzle_with_schema,
    write_world_file, FormatError, Puzzle, World,
};

use crate::config::{SchemaChoice, ToolConfig};

/// Command errors
#[derive(Debug, Error)]
pub enum CommandError {
    /// Reading or writing a puzzle or world failed
    #[error("{path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
    /// Output could not be written
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// World could not be rendered as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn at(path: &Path) -> impl FnOnce(FormatError) -> CommandError + '_ {
    move |source| CommandError::Format {
        path: path.to_path_buf(),
        source,
    }
}

/// One-line summary of a puzzle
pub fn summary(puzzle: &Puzzle) -> String {
    format!(
        "{} entities ({} blocks, {} goals, {} portals, {} spheres), {} schema, target {}",
        puzzle.entity_count(),
        puzzle.block.len(),
        puzzle.goal.len(),
        puzzle.portal.len(),
        puzzle.sphere.len(),
        puzzle.schema(),
        puzzle.target
    )
}

/// Decode every puzzle and report its contents
pub fn check(paths: &[PathBuf], out: &mut impl Write) -> Result<(), CommandError> {
    for path in paths {
        let puzzle = read_puzzle_file(path).map_err(at(path))?;
        writeln!(out, "{}: {}", path.display(), summary(&puzzle))?;
    }
    Ok(())
}

/// Re-encode a puzzle, to `output` or to `out`
pub fn fmt(
    input: &Path,
    output: Option<&Path>,
    schema: SchemaChoice,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let puzzle = read_puzzle_file(input).map_err(at(input))?;
    let schema = schema.resolve(&puzzle);
    log::info!("Formatting {} as {}", input.display(), schema);

    match output {
        Some(path) => {
            let mut file = io::BufWriter::new(fs::File::create(path)?);
            write_puzzle_with_schema(&mut file, &puzzle, schema).map_err(at(path))?;
            file.flush()?;
        }
        None => write_puzzle_with_schema(out, &puzzle, schema).map_err(at(input))?,
    }
    Ok(())
}

/// Build a world from puzzle files
pub fn pack(world_path: &Path, puzzles: &[PathBuf], name: Option<&str>, config: &ToolConfig) -> Result<(), CommandError> {
    let name = name
        .map(str::to_string)
        .or_else(|| config.world_name.clone())
        .or_else(|| {
            world_path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_default();

    let mut world = World::new(name);
    for path in puzzles {
        world.puzzle.push(read_puzzle_file(path).map_err(at(path))?);
    }

    write_world_file(world_path, &world).map_err(at(world_path))?;
    log::info!(
        "Packed {} puzzles into '{}' at {}",
        world.puzzle.len(),
        world.name,
        world_path.display()
    );
    Ok(())
}

/// Write each puzzle of a world to `dir` as `puzzle_<n>.txt`
pub fn unpack(world_path: &Path, dir: &Path) -> Result<Vec<PathBuf>, CommandError> {
    let world = read_world_file(world_path).map_err(at(world_path))?;
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(world.puzzle.len());
    for (index, puzzle) in world.puzzle.iter().enumerate() {
        let path = dir.join(format!("puzzle_{}.txt", index + 1));
        write_puzzle_file(&path, puzzle).map_err(at(&path))?;
        written.push(path);
    }

    log::info!("Unpacked {} puzzles from '{}'", written.len(), world.name);
    Ok(written)
}

/// Print a world as JSON
pub fn dump(world_path: &Path, out: &mut impl Write) -> Result<(), CommandError> {
    let world = read_world_file(world_path).map_err(at(world_path))?;
    serde_json::to_writer_pretty(&mut *out, &world)?;
    writeln!(out)?;
    Ok(())
}
