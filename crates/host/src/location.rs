// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable position/range/URI/location value types.
//!
//! These are plain data carried in event payloads and test-item metadata.
//! Equality is by value; nothing here touches the file system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Zero-based line/character coordinate in a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    /// Create a position from zero-based coordinates.
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Half-open span between two positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Create a range from start and end positions.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Empty range collapsed onto a single position.
    pub fn empty(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Whether start and end coincide.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// `file`-scheme resource identifier.
///
/// The simulator only models on-disk resources, so the scheme is fixed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uri {
    path: PathBuf,
}

impl Uri {
    /// Create a `file` URI for the given path.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The URI scheme; always `"file"`.
    pub fn scheme(&self) -> &'static str {
        "file"
    }

    /// The file-system path this URI names.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file://{}", self.path.display())
    }
}

/// A resource plus a span inside it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub uri: Uri,
    pub range: Range,
}

impl Location {
    /// Create a location covering `range` in `uri`.
    pub fn new(uri: Uri, range: Range) -> Self {
        Self { uri, range }
    }

    /// Create a location collapsed onto a single position.
    pub fn at(uri: Uri, position: Position) -> Self {
        Self {
            uri,
            range: Range::empty(position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn value_equality() {
        let a = Location::new(
            Uri::file("/work/app/src/lib.rs"),
            Range::new(Position::new(3, 0), Position::new(3, 12)),
        );
        let b = Location::new(
            Uri::file("/work/app/src/lib.rs"),
            Range::new(Position::new(3, 0), Position::new(3, 12)),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn location_at_collapses_range() {
        let loc = Location::at(Uri::file("/tmp/a.rs"), Position::new(5, 2));
        assert_eq!(loc.range.start, loc.range.end);
        assert!(loc.range.is_empty());
    }

    #[test]
    fn uri_display_uses_file_scheme() {
        let uri = Uri::file("/work/app/main.rs");
        assert_eq!(uri.scheme(), "file");
        assert_eq!(uri.to_string(), "file:///work/app/main.rs");
    }

    #[rstest]
    #[case(Position::new(0, 5), Position::new(1, 0))]
    #[case(Position::new(2, 3), Position::new(2, 4))]
    #[case(Position::new(0, 0), Position::new(0, 1))]
    fn position_orders_by_line_then_character(#[case] lesser: Position, #[case] greater: Position) {
        assert!(lesser < greater);
    }

    #[test]
    fn serde_round_trip() {
        let loc = Location::new(
            Uri::file("/work/app/src/lib.rs"),
            Range::new(Position::new(1, 2), Position::new(3, 4)),
        );
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(json["range"]["start"]["line"], 1);
        let back: Location = serde_json::from_value(json).unwrap();
        assert_eq!(back, loc);
    }
}
