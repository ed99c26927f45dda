//! Perspective Formats - Puzzle and World Files
//!
//! This crate reads and writes the two file formats used by Perspective.
//!
//! # Features
//!
//! - Colon-delimited puzzle text, basic and extended schemas
//! - Comma-joined grid locations with an optional fourth dimension
//! - Varint length-prefixed world files with a pluggable payload codec
//!
//! # Example
//!
//! ```
//! use perspective_format::{read_world, write_world, FormatError, Location, Puzzle, World};
//!
//! let puzzle: Puzzle = "target:3\nblock:b1:cube:red:1,2,3\n".parse()?;
//! assert_eq!(puzzle.block[0].location, Location::new(1, 2, 3));
//!
//! let world = World::new("Tutorial").with_puzzle(puzzle);
//! let mut bytes = Vec::new();
//! write_world(&mut bytes, &world)?;
//! assert_eq!(read_world::<World>(&bytes)?, world);
//! # Ok::<(), FormatError>(())
//! ```

pub mod error;
pub mod location;
pub mod puzzle;
pub mod text;
pub mod varint;
pub mod world;

pub mod prelude {
    pub use crate::error::{FormatError, LocationError, Result};
    pub use crate::location::{format_location, parse_location, Location};
    pub use crate::puzzle::{Block, Dialog, Goal, Outline, Portal, Puzzle, Schema, Scenery, Sky, Sphere};
    pub use crate::text::{
        read_puzzle, read_puzzle_file, write_puzzle, write_puzzle_file, write_puzzle_with_schema,
    };
    pub use crate::varint::{decode_varint, encode_varint};
    pub use crate::world::{
        frame, read_world, read_world_file, read_world_from, unframe, write_world, write_world_file,
        Message, World,
    };
}

pub use prelude::*;
