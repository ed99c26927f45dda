//! Length-prefixed world files
//!
//! A world file holds a single serialized message preceded by its length as
//! a varint: `[varint size][size bytes of payload]`. Bytes after the payload
//! are ignored on read.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::error::{FormatError, Result};
use crate::puzzle::Puzzle;
use crate::varint::{decode_varint, encode_varint, MAX_VARINT_LEN};

/// A serializable payload that can be framed
///
/// Every serde type is a message encoded with bincode. Types without serde
/// support implement it directly.
pub trait Message: Sized {
    /// Serialized size in bytes
    fn encoded_len(&self) -> Result<u64>;
    /// Serialize to bytes
    fn encode(&self) -> Result<Vec<u8>>;
    /// Deserialize from exactly the payload bytes
    fn decode(bytes: &[u8]) -> Result<Self>;
}

/// A collection of puzzles played together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    pub name: String,
    pub background_colour: String,
    pub foreground_colour: String,
    /// Puzzles in play order
    pub puzzle: Vec<Puzzle>,
}

impl World {
    /// Create an empty world
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set colours
    pub fn with_colours(mut self, background: impl Into<String>, foreground: impl Into<String>) -> Self {
        self.background_colour = background.into();
        self.foreground_colour = foreground.into();
        self
    }

    /// Append a puzzle
    pub fn with_puzzle(mut self, puzzle: Puzzle) -> Self {
        self.puzzle.push(puzzle);
        self
    }
}

impl<T: Serialize + DeserializeOwned> Message for T {
    fn encoded_len(&self) -> Result<u64> {
        bincode::serialized_size(self).map_err(|e| FormatError::PayloadEncode(e.to_string()))
    }

    fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| FormatError::PayloadEncode(e.to_string()))
    }

    fn decode(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| FormatError::PayloadDecode(e.to_string()))
    }
}

/// Prefix `payload` with its length
pub fn frame(payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MAX_VARINT_LEN + payload.len());
    encode_varint(payload.len() as u64, &mut buf);
    buf.extend_from_slice(payload);
    buf
}

/// Payload of a framed buffer, trailing bytes excluded
pub fn unframe(bytes: &[u8]) -> Result<&[u8]> {
    let (size, consumed) =
        decode_varint(bytes).ok_or_else(|| FormatError::Framing("could not read size".to_string()))?;

    let available = bytes.len() - consumed;
    let end = usize::try_from(size)
        .ok()
        .filter(|&size| size <= available)
        .map(|size| consumed + size)
        .ok_or_else(|| {
            FormatError::Framing(format!(
                "payload size {} exceeds {} available bytes",
                size, available
            ))
        })?;

    if end < bytes.len() {
        log::debug!("Ignoring {} trailing bytes after payload", bytes.len() - end);
    }
    Ok(&bytes[consumed..end])
}

/// Decode a framed message from memory
pub fn read_world<M: Message>(bytes: &[u8]) -> Result<M> {
    M::decode(unframe(bytes)?)
}

/// Decode a framed message from a reader, consuming it to the end
pub fn read_world_from<R: Read, M: Message>(mut reader: R) -> Result<M> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    read_world(&buffer)
}

/// Read a world file
pub fn read_world_file(path: impl AsRef<Path>) -> Result<World> {
    let buffer = fs::read(path.as_ref())?;
    log::debug!("Read {} bytes from {}", buffer.len(), path.as_ref().display());
    read_world(&buffer)
}

/// Write a message with its length prefix
pub fn write_world<W: Write, M: Message>(mut writer: W, message: &M) -> Result<()> {
    let size = message.encoded_len()?;
    let data = message.encode()?;
    if data.len() as u64 != size {
        return Err(FormatError::PayloadEncode(format!(
            "encoded {} bytes, expected {}",
            data.len(),
            size
        )));
    }

    let mut prefix = Vec::with_capacity(MAX_VARINT_LEN);
    encode_varint(size, &mut prefix);
    writer.write_all(&prefix)?;
    writer.write_all(&data)?;
    Ok(())
}

/// Write a world file, replacing any previous content
pub fn write_world_file(path: impl AsRef<Path>, world: &World) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_world(&mut writer, world)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use crate::puzzle::Block;

    /// Opaque payload passed through unchanged, not a serde type
    #[derive(Debug, PartialEq)]
    struct Raw(Vec<u8>);

    impl Message for Raw {
        fn encoded_len(&self) -> Result<u64> {
            Ok(self.0.len() as u64)
        }

        fn encode(&self) -> Result<Vec<u8>> {
            Ok(self.0.clone())
        }

        fn decode(bytes: &[u8]) -> Result<Self> {
            Ok(Raw(bytes.to_vec()))
        }
    }

    fn sample_world() -> World {
        World::new("Tutorial")
            .with_colours("black", "white")
            .with_puzzle(
                Puzzle::new()
                    .with_description("One block")
                    .with_block(Block::new("b1", "cube", "red", Location::new(1, 2, 3))),
            )
            .with_puzzle(Puzzle::new().with_target(4))
    }

    #[test]
    fn test_frame_layout() {
        let payload = vec![7u8; 300];
        let framed = frame(&payload);

        assert_eq!(&framed[..2], &[0xac, 0x02]);
        assert_eq!(framed.len(), 2 + 300);
        assert_eq!(unframe(&framed).unwrap(), payload.as_slice());
    }

    #[test]
    fn test_unframe_ignores_trailing_bytes() {
        let mut framed = frame(b"abc");
        framed.extend_from_slice(b"garbage");
        assert_eq!(unframe(&framed).unwrap(), b"abc");
    }

    #[test]
    fn test_unframe_errors() {
        assert!(matches!(unframe(&[]), Err(FormatError::Framing(_))));
        assert!(matches!(unframe(&[0x80]), Err(FormatError::Framing(_))));
        assert!(matches!(unframe(&[0x05, 1, 2]), Err(FormatError::Framing(_))));
    }

    #[test]
    fn test_write_raw_message() {
        let mut buffer = Vec::new();
        write_world(&mut buffer, &Raw(b"hello".to_vec())).unwrap();

        assert_eq!(buffer, b"\x05hello");
        assert_eq!(read_world::<Raw>(&buffer).unwrap(), Raw(b"hello".to_vec()));
    }

    #[test]
    fn test_world_round_trip() {
        let world = sample_world();
        let mut buffer = Vec::new();
        write_world(&mut buffer, &world).unwrap();

        let (size, consumed) = decode_varint(&buffer).unwrap();
        assert_eq!(size as usize, buffer.len() - consumed);

        let decoded: World = read_world_from(buffer.as_slice()).unwrap();
        assert_eq!(decoded, world);
    }

    #[test]
    fn test_corrupt_payload() {
        let framed = frame(&[0xff, 0xff, 0xff]);
        assert!(matches!(
            read_world::<World>(&framed),
            Err(FormatError::PayloadDecode(_))
        ));
    }

    #[test]
    fn test_puzzle_as_message() {
        let puzzle = Puzzle::new()
            .with_target(2)
            .with_block(Block::new("b1", "cube", "red", Location::with_w(1, 0, 0, 0)));

        let mut buffer = Vec::new();
        write_world(&mut buffer, &puzzle).unwrap();
        assert_eq!(read_world::<Puzzle>(&buffer).unwrap(), puzzle);
        assert!(matches!(
            read_world::<World>(&buffer[..buffer.len() - 1]),
            Err(FormatError::Framing(_))
        ));
    }
}
