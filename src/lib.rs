//! # color_names
//!
//! Nearest named-color lookup backed by a k-d tree in CIE-Lab space.
//!
//! Given a fixed palette of named colors (hundreds to thousands of entries),
//! this library answers "what is the closest named color to this value?"
//! repeatedly and efficiently: the palette is indexed once into a balanced
//! three-dimensional tree over its CIE-Lab coordinates, and each query prunes
//! whole subtrees instead of re-scanning the list.
//!
//! ## Quick Start
//!
//! ```
//! use color_names::ColorNames;
//!
//! let lookup = ColorNames::default_palette();
//! assert_eq!(lookup.closest_name((250, 10, 10)), "red");
//! ```
//!
//! ## Custom Palettes
//!
//! ```
//! use color_names::ColorNamesBuilder;
//!
//! let lookup = ColorNamesBuilder::new()
//!     .add("Signal Red", 255, 0, 0)
//!     .add("Jet Black", 0, 0, 0)
//!     .add_hex("Snow White", "#FFFFFF")
//!     .unwrap()
//!     .build();
//!
//! assert_eq!(lookup.closest_name((10, 10, 10)), "Jet Black");
//! ```
//!
//! ## Core Concepts
//!
//! - **NamedColor**: a palette entry (display name + RGB + derived Lab)
//! - **KdNode**: the immutable spatial index, balanced by median split
//! - **ColorNames**: the query surface (RGB, hex, Lab, or entry inputs)
//! - **ColorNamesBuilder**: palette assembly from code, CSV, or the
//!   embedded default list

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod convert;
pub mod tree;
pub mod palette;
pub mod lookup;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::color::{ColorParseError, Lab, NamedColor, Rgb};
    pub use crate::convert::{hex_to_rgb, rgb_to_lab};
    pub use crate::lookup::ColorNames;
    pub use crate::palette::{ColorNamesBuilder, PaletteError};
    pub use crate::tree::{KdNode, Nearest};
}

// Re-export key types at crate root
pub use color::{ColorParseError, Lab, NamedColor, Rgb};
pub use lookup::ColorNames;
pub use palette::{ColorNamesBuilder, PaletteError};
