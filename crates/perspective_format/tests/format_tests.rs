//! Integration tests for perspective_format

use perspective_format::*;
use std::fs;

const TUTORIAL: &str = "\
# Tutorial puzzle
outline:box:grey

description:Push the red block onto the pad
block:b1:cube:red:1,0,0
block:b2:cube:red:1,0,1
goal:g1:pad:green:2,0,0
portal:p1:ring:blue:0,0,0:1,5,5,5
sphere:s1:ball:white:0,0,2
";

#[test]
fn test_puzzle_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tutorial.txt");
    fs::write(&path, TUTORIAL).unwrap();

    let puzzle = read_puzzle_file(&path).unwrap();
    assert_eq!(puzzle.schema(), Schema::Basic);
    assert_eq!(puzzle.block.len(), 2);
    assert_eq!(puzzle.portal[0].link, Location::with_w(1, 5, 5, 5));

    let copy = dir.path().join("copy.txt");
    write_puzzle_file(&copy, &puzzle).unwrap();

    let written = fs::read_to_string(&copy).unwrap();
    assert_eq!(
        written,
        "outline:box:grey\n\
         description:Push the red block onto the pad\n\
         block:b1:cube:red:1,0,0\n\
         block:b2:cube:red:1,0,1\n\
         goal:g1:pad:green:2,0,0\n\
         portal:p1:ring:blue:0,0,0:1,5,5,5\n\
         sphere:s1:ball:white:0,0,2\n"
    );
    assert_eq!(read_puzzle_file(&copy).unwrap(), puzzle);
}

#[test]
fn test_windows_line_endings() {
    let text = TUTORIAL.replace('\n', "\r\n");
    let puzzle = read_puzzle(text.as_bytes()).unwrap();
    assert_eq!(puzzle, read_puzzle(TUTORIAL.as_bytes()).unwrap());
}

#[test]
fn test_puzzle_file_overwrite_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("puzzle.txt");
    fs::write(&path, "x".repeat(4096)).unwrap();

    let puzzle = Puzzle::new().with_description("short");
    write_puzzle_file(&path, &puzzle).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "description:short\n");
}

#[test]
fn test_missing_puzzle_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_puzzle_file(dir.path().join("absent.txt"));
    assert!(matches!(result, Err(FormatError::Io(_))));
}

#[test]
fn test_world_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tutorial.world");

    let extended = Puzzle::new()
        .with_target(6)
        .with_sky(Sky::new("night", "dome", "black").with_style("stars", "", ""))
        .with_scenery(Scenery::new("tree", "tree", "green", Location::new(3, 0, 3)))
        .with_dialog(
            Dialog::new("intro", "speech")
                .with_text("Guide", "Welcome")
                .with_element("tree"),
        );
    let world = World::new("Tutorial")
        .with_colours("black", "white")
        .with_puzzle(read_puzzle(TUTORIAL.as_bytes()).unwrap())
        .with_puzzle(extended);

    write_world_file(&path, &world).unwrap();
    let bytes = fs::read(&path).unwrap();
    let (size, consumed) = decode_varint(&bytes).unwrap();
    assert_eq!(consumed + size as usize, bytes.len());

    assert_eq!(read_world_file(&path).unwrap(), world);
}

#[test]
fn test_world_file_with_trailing_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("padded.world");

    let world = World::new("Padded");
    let mut bytes = Vec::new();
    write_world(&mut bytes, &world).unwrap();
    bytes.extend_from_slice(&[0u8; 16]);
    fs::write(&path, &bytes).unwrap();

    assert_eq!(read_world_file(&path).unwrap(), world);
}

#[test]
fn test_truncated_world_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truncated.world");

    let mut bytes = Vec::new();
    write_world(&mut bytes, &World::new("Truncated")).unwrap();
    bytes.truncate(bytes.len() - 1);
    fs::write(&path, &bytes).unwrap();

    assert!(matches!(read_world_file(&path), Err(FormatError::Framing(_))));
}

#[test]
fn test_empty_world_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.world");
    fs::write(&path, b"").unwrap();

    assert!(matches!(read_world_file(&path), Err(FormatError::Framing(_))));
}
