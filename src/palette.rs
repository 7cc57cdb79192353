//! Palette assembly: the builder, CSV ingestion, and the embedded default
//! color list.
//!
//! A palette is an ordered multiset of [`NamedColor`] entries. Sources can
//! be mixed freely: programmatic adds, CSV text, CSV files, and the default
//! list compiled into the library. The first line of any CSV source is a
//! header and is skipped; a malformed record aborts ingestion of that source
//! with a line-numbered error rather than producing a silently wrong color.
//!
//! # Examples
//!
//! ```
//! use color_names::palette::ColorNamesBuilder;
//!
//! let lookup = ColorNamesBuilder::new()
//!     .add("ink", 20, 24, 28)
//!     .add_hex("paper", "#FAFAF0")
//!     .unwrap()
//!     .build();
//! assert_eq!(lookup.len(), 2);
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::debug;

use crate::color::{ColorParseError, NamedColor};
use crate::convert::hex_to_rgb;
use crate::lookup::ColorNames;

static DEFAULT_COLORS: LazyLock<Vec<NamedColor>> = LazyLock::new(|| {
    let mut colors = Vec::new();

    for (line_no, line) in include_str!("default_colors.csv").lines().enumerate() {
        if line_no == 0 {
            continue;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (name, hex) = line
            .split_once(',')
            .expect("src/default_colors.csv: expected comma-separated name + hex");

        let rgb = hex_to_rgb(hex.trim()).unwrap_or_else(|err| {
            panic!("src/default_colors.csv:{}: {err}", line_no + 1);
        });

        colors.push(NamedColor::new(
            name.trim(),
            rgb.red,
            rgb.green,
            rgb.blue,
        ));
    }

    colors
});

/// Accumulates named colors from any mix of sources, then builds the
/// lookup structure.
///
/// Methods consume and return the builder so sources chain; the palette
/// keeps entries in insertion order and never deduplicates.
#[derive(Debug, Clone, Default)]
pub struct ColorNamesBuilder {
    colors: Vec<NamedColor>,
}

impl ColorNamesBuilder {
    /// Create a builder with an empty palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one color from RGB components.
    #[must_use]
    pub fn add(mut self, name: impl Into<String>, red: u8, green: u8, blue: u8) -> Self {
        self.colors.push(NamedColor::new(name, red, green, blue));
        self
    }

    /// Add one color from a `#RRGGBB` hex string.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError::InvalidHex`] for a malformed hex string.
    pub fn add_hex(
        mut self,
        name: impl Into<String>,
        hex: &str,
    ) -> Result<Self, ColorParseError> {
        self.colors.push(NamedColor::from_hex(name, hex)?);
        Ok(self)
    }

    /// Add an already constructed color.
    #[must_use]
    pub fn add_color(mut self, color: NamedColor) -> Self {
        self.colors.push(color);
        self
    }

    /// Ingest CSV text in `name,#RRGGBB` format.
    ///
    /// The first line is a header and is skipped; blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns a line-numbered [`PaletteError`] for a record without a comma
    /// or with a malformed hex value. On error no entries from this source
    /// are kept.
    pub fn add_csv_str(mut self, contents: &str) -> Result<Self, PaletteError> {
        let mut added = Vec::new();

        for (line_no, raw_line) in contents.lines().enumerate() {
            if line_no == 0 {
                continue;
            }
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            let (name, hex) = line.split_once(',').ok_or_else(|| {
                PaletteError::InvalidRecord {
                    line_no: line_no + 1,
                    line: raw_line.to_string(),
                }
            })?;

            let name = name.trim();
            let rgb = hex_to_rgb(hex.trim()).map_err(|err| PaletteError::InvalidColor {
                line_no: line_no + 1,
                name: name.to_string(),
                err,
            })?;

            added.push(NamedColor::new(name, rgb.red, rgb.green, rgb.blue));
        }

        debug!("ingested {} colors from csv source", added.len());
        self.colors.append(&mut added);
        Ok(self)
    }

    /// Ingest a CSV file in `name,#RRGGBB` format.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Io`] if the file cannot be read, otherwise
    /// the same errors as [`add_csv_str`](Self::add_csv_str).
    pub fn add_csv_file(self, path: impl AsRef<Path>) -> Result<Self, PaletteError> {
        let contents = fs::read_to_string(&path).map_err(|err| PaletteError::Io {
            path: path.as_ref().to_path_buf(),
            err,
        })?;
        self.add_csv_str(&contents)
    }

    /// Add the default color list compiled into the library.
    ///
    /// Calling this more than once adds the default entries again; the
    /// palette is a multiset and no deduplication happens.
    #[must_use]
    pub fn load_default(mut self) -> Self {
        self.colors.extend(DEFAULT_COLORS.iter().cloned());
        debug!("loaded {} default colors", DEFAULT_COLORS.len());
        self
    }

    /// The colors accumulated so far, in insertion order.
    #[must_use]
    pub fn colors(&self) -> &[NamedColor] {
        &self.colors
    }

    /// Build the lookup structure from the accumulated palette.
    #[must_use]
    pub fn build(self) -> ColorNames {
        ColorNames::new(self.colors)
    }
}

/// Errors returned by palette ingestion.
#[derive(Debug)]
pub enum PaletteError {
    Io {
        path: PathBuf,
        err: std::io::Error,
    },
    InvalidRecord {
        line_no: usize,
        line: String,
    },
    InvalidColor {
        line_no: usize,
        name: String,
        err: ColorParseError,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, err } => {
                write!(f, "failed to read palette file {}: {err}", path.display())
            }
            Self::InvalidRecord { line_no, line } => {
                write!(f, "invalid palette record at line {line_no}: {line:?}")
            }
            Self::InvalidColor { line_no, name, err } => {
                write!(f, "invalid color for {name:?} at line {line_no}: {err}")
            }
        }
    }
}

impl std::error::Error for PaletteError {}
