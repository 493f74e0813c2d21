//! Glyph stroke data, and the renderer/layout that turn it into a continuous
//! stroke. See [`crate::glyphs::renderer::GlyphRenderer`] for single lines and
//! [`crate::glyphs::layout::TextBlockLayout`] for centered blocks of text.
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Render characters and strings, measure text.
pub mod renderer;

/// Vertically centered, bounds-checked blocks of text.
pub mod layout;

fn default_width() -> f64 {
    1.0
}

/// Stroke definition for one character.
///
/// `path` is a list of offsets relative to the baseline start of the glyph,
/// in unscaled units. The renderer draws a straight line to each of them in
/// turn, so the whole glyph is a single stroke.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GlyphDefinition {
    #[serde(default = "default_width")]
    pub width: f64,
    /// Horizontal pen shift before drawing. Positive values shift left.
    #[serde(default)]
    pub start_offset: f64,
    pub path: Vec<(f64, f64)>,
}

/// Result of looking a character up in a [`GlyphSource`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlyphLookup<'a> {
    /// No entry at all.
    Absent,
    /// An entry exists, but has no stroke.
    Undefined,
    Defined(&'a GlyphDefinition),
}

/// Read-only provider of glyph strokes.
pub trait GlyphSource: std::fmt::Debug {
    fn lookup(&self, character: char) -> GlyphLookup<'_>;
}

/// # GlyphTable
///
/// The stock [`GlyphSource`]: a map from character to an optional
/// [`GlyphDefinition`], usually loaded from RON.
///
/// ```ron
/// {
///     'L': Some((width: 0.5, path: [(0.0, -1.0), (0.0, 0.0), (0.5, 0.0), (0.0, 0.0)])),
///     '?': None,
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct GlyphTable {
    glyphs: HashMap<char, Option<GlyphDefinition>>,
}

impl GlyphTable {
    pub fn new() -> GlyphTable {
        GlyphTable::default()
    }

    /// The built-in block capitals.
    pub fn block_capitals() -> GlyphTable {
        GlyphTable::from_ron_str(include_str!("../../resources/glyphs/block_capitals.ron"))
            .expect("Bundled glyph table failed to parse") // We know this table is OK
    }

    pub fn from_ron_str(data: &str) -> Result<GlyphTable> {
        Ok(ron::from_str(data)?)
    }

    pub fn from_file(path: &Path) -> Result<GlyphTable> {
        let mut reader = std::fs::File::open(path)?;
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        GlyphTable::from_ron_str(data.as_str())
    }

    pub fn insert(&mut self, character: char, glyph: GlyphDefinition) -> &mut Self {
        self.glyphs.insert(character, Some(glyph));
        self
    }

    /// Mark a character as known but not yet drawable.
    pub fn insert_undefined(&mut self, character: char) -> &mut Self {
        self.glyphs.insert(character, None);
        self
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl GlyphSource for GlyphTable {
    fn lookup(&self, character: char) -> GlyphLookup<'_> {
        match self.glyphs.get(&character) {
            None => GlyphLookup::Absent,
            Some(None) => GlyphLookup::Undefined,
            Some(Some(glyph)) => GlyphLookup::Defined(glyph),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_block_capitals_load() {
        let table = GlyphTable::from_ron_str(include_str!(
            "../../resources/glyphs/block_capitals.ron"
        ))
        .expect("Bundled glyph table should parse");
        assert!(table.len() > 10);
        assert_eq!(table, GlyphTable::block_capitals());
    }

    #[test]
    fn test_block_capitals_return_to_origin() {
        let table = GlyphTable::block_capitals();
        for c in "ABCDEHIKLMNORSTW-.".chars() {
            match table.lookup(c) {
                GlyphLookup::Defined(glyph) => {
                    assert_eq!(glyph.path.last(), Some(&(0.0, 0.0)), "glyph {:?}", c);
                }
                other => panic!("{:?} should be defined, got {:?}", c, other),
            }
        }
    }

    #[test]
    fn test_lookup() {
        let table = GlyphTable::block_capitals();
        assert_eq!(table.lookup('?'), GlyphLookup::Undefined);
        assert_eq!(table.lookup('~'), GlyphLookup::Absent);
        match table.lookup('I') {
            GlyphLookup::Defined(glyph) => {
                assert_eq!(glyph.width, 0.2);
                assert_eq!(glyph.start_offset, -0.1);
            }
            other => panic!("I should be defined, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_and_insert() {
        let table = GlyphTable::from_ron_str("{'x': Some((path: [(1.0, 1.0)]))}").unwrap();
        match table.lookup('x') {
            GlyphLookup::Defined(glyph) => {
                assert_eq!(glyph.width, 1.0);
                assert_eq!(glyph.start_offset, 0.0);
            }
            other => panic!("x should be defined, got {:?}", other),
        }
        let mut table = GlyphTable::new();
        assert!(table.is_empty());
        table
            .insert(
                'y',
                GlyphDefinition {
                    width: 0.5,
                    start_offset: 0.0,
                    path: vec![(0.0, 0.0)],
                },
            )
            .insert_undefined('z');
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup('z'), GlyphLookup::Undefined);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{'-': Some((width: 0.4, path: [(0.4, 0.0), (0.0, 0.0)]))}}").unwrap();
        let table = GlyphTable::from_file(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(GlyphTable::from_file(Path::new("/nonexistent/glyphs.ron")).is_err());
    }
}
