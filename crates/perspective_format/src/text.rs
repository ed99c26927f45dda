//! Line-oriented puzzle text format
//!
//! One record per line, columns separated by `:`. Blank lines and lines
//! starting with `#` are ignored. Basic records are a prefix of the extended
//! ones, so both flavours are read by the same decoder:
//!
//! ```text
//! target:3
//! outline:box:grey
//! block:b1:cube:red:1,2,3:tex1:mat1:shade1
//! portal:p1:ring:blue:0,0,0:5,5,5
//! ```
//!
//! Columns are not escaped. A `:` or `,` inside a name or colour corrupts
//! the record; descriptions and dialog content may contain `:` because their
//! position in the record is fixed. A dialog that refers to a single
//! element with an empty name writes an empty column, which reads back as
//! no elements at all.
//!
//! Bytes that are not valid UTF-8 are replaced with U+FFFD on read.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::{FormatError, Result};
use crate::location::{format_location, parse_location, Location};
use crate::puzzle::{Block, Dialog, Goal, Outline, Portal, Puzzle, Schema, Scenery, Sky, Sphere};

/// Number of columns in a dialog record, tag included
const DIALOG_COLUMNS: usize = 9;

/// A split record line
struct Record<'a> {
    line: usize,
    parts: Vec<&'a str>,
}

impl<'a> Record<'a> {
    fn new(line: usize, text: &'a str) -> Self {
        Self {
            line,
            parts: text.split(':').collect(),
        }
    }

    fn tag(&self) -> &'a str {
        self.parts[0]
    }

    /// Column text, empty when the column is missing
    fn text(&self, index: usize) -> String {
        self.parts.get(index).copied().unwrap_or("").to_string()
    }

    /// Every column from `index` on, rejoined
    fn rest(&self, index: usize) -> String {
        self.parts.get(index..).map(|p| p.join(":")).unwrap_or_default()
    }

    fn location(&self, index: usize) -> Result<Location> {
        parse_location(self.parts.get(index).copied().unwrap_or(""))
            .map_err(|source| FormatError::Location { line: self.line, source })
    }

    fn integer(&self, index: usize, field: &'static str) -> Result<u32> {
        let value = self.parts.get(index).copied().unwrap_or("");
        value.parse().map_err(|_| FormatError::Integer {
            line: self.line,
            field,
            value: value.to_string(),
        })
    }
}

/// Read a puzzle from text
pub fn read_puzzle<R: Read>(reader: R) -> Result<Puzzle> {
    let mut reader = BufReader::new(reader);
    let mut puzzle = Puzzle::default();
    let mut skipped = 0usize;
    let mut raw = Vec::new();
    let mut index = 0usize;

    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        index += 1;

        let bytes = raw.strip_suffix(b"\n").unwrap_or(&raw);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        let line = String::from_utf8_lossy(bytes);
        if matches!(line, Cow::Owned(_)) {
            log::warn!("Line {} is not valid UTF-8, decoding lossily", index);
        }
        let line: &str = &line;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let record = Record::new(index, line);
        match record.tag() {
            "description" => puzzle.description = record.rest(1),
            "target" => puzzle.target = record.integer(1, "target")?,
            "outline" => {
                puzzle.outline = Some(Outline {
                    mesh: record.text(1),
                    colour: record.text(2),
                    texture: record.text(3),
                    material: record.text(4),
                    shader: record.text(5),
                })
            }
            "sky" => puzzle.sky.push(Sky {
                name: record.text(1),
                mesh: record.text(2),
                colour: record.text(3),
                texture: record.text(4),
                material: record.text(5),
                shader: record.text(6),
            }),
            "block" => puzzle.block.push(Block {
                name: record.text(1),
                mesh: record.text(2),
                colour: record.text(3),
                location: record.location(4)?,
                texture: record.text(5),
                material: record.text(6),
                shader: record.text(7),
            }),
            "goal" => puzzle.goal.push(Goal {
                name: record.text(1),
                mesh: record.text(2),
                colour: record.text(3),
                location: record.location(4)?,
                texture: record.text(5),
                material: record.text(6),
                shader: record.text(7),
            }),
            "portal" => puzzle.portal.push(Portal {
                name: record.text(1),
                mesh: record.text(2),
                colour: record.text(3),
                location: record.location(4)?,
                link: record.location(5)?,
                texture: record.text(6),
                material: record.text(7),
                shader: record.text(8),
            }),
            "sphere" => puzzle.sphere.push(Sphere {
                name: record.text(1),
                mesh: record.text(2),
                colour: record.text(3),
                location: record.location(4)?,
                texture: record.text(5),
                material: record.text(6),
                shader: record.text(7),
            }),
            "scenery" => puzzle.scenery.push(Scenery {
                name: record.text(1),
                mesh: record.text(2),
                colour: record.text(3),
                location: record.location(4)?,
                texture: record.text(5),
                material: record.text(6),
                shader: record.text(7),
            }),
            "dialog" => puzzle.dialog.push(read_dialog(&record)?),
            tag => {
                log::warn!("Skipping unknown record '{}' on line {}", tag, record.line);
                skipped += 1;
            }
        }
    }

    log::debug!(
        "Read puzzle with {} entities ({} records skipped)",
        puzzle.entity_count(),
        skipped
    );
    Ok(puzzle)
}

fn read_dialog(record: &Record<'_>) -> Result<Dialog> {
    let count = record.parts.len();

    // Surplus columns belong to the content
    let (content, location, elements) = if count > DIALOG_COLUMNS {
        (
            record.parts[6..count - 2].join(":"),
            record.location(count - 2)?,
            record.text(count - 1),
        )
    } else {
        (record.text(6), record.location(7)?, record.text(8))
    };

    Ok(Dialog {
        name: record.text(1),
        kind: record.text(2),
        background_colour: record.text(3),
        foreground_colour: record.text(4),
        author: record.text(5),
        content,
        location,
        elements: if elements.is_empty() {
            Vec::new()
        } else {
            elements.split(',').map(str::to_string).collect()
        },
    })
}

/// Read a puzzle from a text file
pub fn read_puzzle_file(path: impl AsRef<Path>) -> Result<Puzzle> {
    let file = File::open(path.as_ref())?;
    read_puzzle(file)
}

/// Write a puzzle in the schema its fields require
pub fn write_puzzle<W: Write>(writer: W, puzzle: &Puzzle) -> Result<()> {
    write_puzzle_with_schema(writer, puzzle, puzzle.schema())
}

/// Write a puzzle in the given schema
///
/// Writing an extended puzzle as [`Schema::Basic`] drops the sky, scenery
/// and dialog records as well as the texture, material and shader columns.
pub fn write_puzzle_with_schema<W: Write>(mut writer: W, puzzle: &Puzzle, schema: Schema) -> Result<()> {
    for record in encode_records(puzzle, schema) {
        writeln!(writer, "{}", record)?;
    }
    Ok(())
}

/// Encode every record of a puzzle, one line each, in file order
fn encode_records(puzzle: &Puzzle, schema: Schema) -> Vec<String> {
    let extended = schema == Schema::Extended;
    if !extended && puzzle.schema() == Schema::Extended {
        log::warn!("Writing extended puzzle as basic, extended content is dropped");
    }

    let style = |texture: &str, material: &str, shader: &str| -> String {
        if !extended || (texture.is_empty() && material.is_empty() && shader.is_empty()) {
            String::new()
        } else {
            format!(":{}:{}:{}", texture, material, shader)
        }
    };

    let mut records = Vec::new();
    if extended {
        records.push(format!("target:{}", puzzle.target));
    }
    if let Some(o) = &puzzle.outline {
        records.push(format!(
            "outline:{}:{}{}",
            o.mesh,
            o.colour,
            style(&o.texture, &o.material, &o.shader)
        ));
    }
    if extended {
        records.extend(puzzle.sky.iter().map(|s| {
            format!(
                "sky:{}:{}:{}{}",
                s.name,
                s.mesh,
                s.colour,
                style(&s.texture, &s.material, &s.shader)
            )
        }));
    }
    if !puzzle.description.is_empty() {
        records.push(format!("description:{}", puzzle.description));
    }
    records.extend(puzzle.block.iter().map(|b| {
        format!(
            "block:{}:{}:{}:{}{}",
            b.name,
            b.mesh,
            b.colour,
            format_location(&b.location),
            style(&b.texture, &b.material, &b.shader)
        )
    }));
    records.extend(puzzle.goal.iter().map(|g| {
        format!(
            "goal:{}:{}:{}:{}{}",
            g.name,
            g.mesh,
            g.colour,
            format_location(&g.location),
            style(&g.texture, &g.material, &g.shader)
        )
    }));
    records.extend(puzzle.portal.iter().map(|p| {
        format!(
            "portal:{}:{}:{}:{}:{}{}",
            p.name,
            p.mesh,
            p.colour,
            format_location(&p.location),
            format_location(&p.link),
            style(&p.texture, &p.material, &p.shader)
        )
    }));
    records.extend(puzzle.sphere.iter().map(|s| {
        format!(
            "sphere:{}:{}:{}:{}{}",
            s.name,
            s.mesh,
            s.colour,
            format_location(&s.location),
            style(&s.texture, &s.material, &s.shader)
        )
    }));
    if extended {
        records.extend(puzzle.scenery.iter().map(|s| {
            format!(
                "scenery:{}:{}:{}:{}{}",
                s.name,
                s.mesh,
                s.colour,
                format_location(&s.location),
                style(&s.texture, &s.material, &s.shader)
            )
        }));
        records.extend(puzzle.dialog.iter().map(|d| {
            format!(
                "dialog:{}:{}:{}:{}:{}:{}:{}:{}",
                d.name,
                d.kind,
                d.background_colour,
                d.foreground_colour,
                d.author,
                d.content,
                format_location(&d.location),
                d.elements.join(",")
            )
        }));
    }

    records
}

/// Write a puzzle to a file, replacing any previous content
pub fn write_puzzle_file(path: impl AsRef<Path>, puzzle: &Puzzle) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_puzzle(&mut writer, puzzle)?;
    writer.flush()?;
    Ok(())
}

impl Puzzle {
    /// Encode to text in the inferred schema
    pub fn to_text(&self) -> String {
        encode_records(self, self.schema())
            .into_iter()
            .map(|record| record + "\n")
            .collect()
    }
}

impl FromStr for Puzzle {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        read_puzzle(s.as_bytes())
    }
}
