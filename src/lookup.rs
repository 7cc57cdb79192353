//! The lookup facade: nearest-color queries over a built palette.
//!
//! [`ColorNames`] owns the palette list and the k-d tree built from it.
//! Queries accept RGB triples, `#RRGGBB` hex strings, Lab triples, or an
//! existing [`NamedColor`]; each form has a variant returning the full
//! matched entry and a variant returning only its name.
//!
//! # Examples
//!
//! ```
//! use color_names::ColorNames;
//!
//! let lookup = ColorNames::default_palette();
//!
//! assert_eq!(lookup.closest_name((255, 0, 0)), "red");
//!
//! let entry = lookup.closest_hex("#FF6347").unwrap().unwrap();
//! assert_eq!(entry.name(), "tomato");
//! ```
//!
//! The index is built once and never mutated, and search state lives on the
//! stack of each call, so a shared `ColorNames` can serve any number of
//! threads; the only lock in the type guards the query cache.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use log::debug;
use lru::LruCache;

use crate::color::{ColorParseError, Lab, NamedColor, Rgb};
use crate::convert;
use crate::tree::KdNode;

/// Name returned by the `closest_name*` entry points for an empty palette.
const UNKNOWN_NAME: &str = "Unknown";

/// Capacity of the per-instance RGB query cache.
const QUERY_CACHE_SIZE: usize = 1024;

/// A fixed palette of named colors with a spatial index for nearest-color
/// queries.
///
/// Build once (directly or via
/// [`ColorNamesBuilder`](crate::palette::ColorNamesBuilder)), query many
/// times. The palette cannot change after construction.
#[derive(Debug)]
pub struct ColorNames {
    palette: Vec<NamedColor>,
    root: Option<Box<KdNode>>,
    cache: Mutex<LruCache<Rgb, NamedColor>>,
}

impl ColorNames {
    /// Build the lookup structure from a palette snapshot.
    ///
    /// The tree takes its own copy of the list; the original order is kept
    /// for [`colors`](Self::colors) and [`random`](Self::random).
    #[must_use]
    pub fn new(colors: Vec<NamedColor>) -> Self {
        let root = KdNode::build(colors.clone(), 0);
        debug!("built k-d tree over {} palette entries", colors.len());
        Self {
            palette: colors,
            root,
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(QUERY_CACHE_SIZE).expect("non-zero"),
            )),
        }
    }

    /// Build a lookup over the default color list compiled into the library.
    #[must_use]
    pub fn default_palette() -> Self {
        crate::palette::ColorNamesBuilder::new().load_default().build()
    }

    /// Number of palette entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.palette.len()
    }

    /// True if the palette has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palette.is_empty()
    }

    /// The palette entries in insertion order.
    #[must_use]
    pub fn colors(&self) -> &[NamedColor] {
        &self.palette
    }

    /// Find the palette entry closest to an RGB color (cached).
    ///
    /// Returns `None` only when the palette is empty. Repeated queries for
    /// the same triple are answered from a bounded LRU cache.
    #[must_use]
    pub fn closest(&self, rgb: impl Into<Rgb>) -> Option<NamedColor> {
        let rgb = rgb.into();

        if let Ok(mut cache) = self.cache.lock()
            && let Some(hit) = cache.get(&rgb)
        {
            return Some(hit.clone());
        }

        let query = convert::rgb_to_lab(rgb.red, rgb.green, rgb.blue);
        let found = self.root.as_ref().map(|root| root.nearest_color(query).clone());

        if let Some(color) = &found
            && let Ok(mut cache) = self.cache.lock()
        {
            cache.put(rgb, color.clone());
        }

        found
    }

    /// Find the palette entry closest to a `#RRGGBB` hex color.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError::InvalidHex`] for a malformed hex string;
    /// an empty palette is `Ok(None)`, never an error.
    pub fn closest_hex(&self, hex: &str) -> Result<Option<NamedColor>, ColorParseError> {
        let rgb = convert::hex_to_rgb(hex)?;
        Ok(self.closest(rgb))
    }

    /// Find the palette entry closest to a Lab coordinate.
    ///
    /// Bypasses the RGB query cache (the cache is keyed by integer triples).
    #[must_use]
    pub fn closest_lab(&self, lab: impl Into<Lab>) -> Option<NamedColor> {
        let query = lab.into();
        self.root.as_ref().map(|root| root.nearest_color(query).clone())
    }

    /// Find the palette entry closest to an existing color's coordinates.
    #[must_use]
    pub fn closest_color(&self, color: &NamedColor) -> Option<NamedColor> {
        self.closest(color.rgb())
    }

    /// Name of the palette entry closest to an RGB color.
    ///
    /// Returns `"Unknown"` for an empty palette.
    #[must_use]
    pub fn closest_name(&self, rgb: impl Into<Rgb>) -> String {
        Self::name_or_unknown(self.closest(rgb))
    }

    /// Name of the palette entry closest to a `#RRGGBB` hex color.
    ///
    /// Returns `"Unknown"` for an empty palette.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError::InvalidHex`] for a malformed hex string.
    pub fn closest_name_hex(&self, hex: &str) -> Result<String, ColorParseError> {
        Ok(Self::name_or_unknown(self.closest_hex(hex)?))
    }

    /// Name of the palette entry closest to a Lab coordinate.
    ///
    /// Returns `"Unknown"` for an empty palette.
    #[must_use]
    pub fn closest_name_lab(&self, lab: impl Into<Lab>) -> String {
        Self::name_or_unknown(self.closest_lab(lab))
    }

    /// Name of the palette entry closest to an existing color's coordinates.
    ///
    /// Returns `"Unknown"` for an empty palette.
    #[must_use]
    pub fn closest_name_color(&self, color: &NamedColor) -> String {
        Self::name_or_unknown(self.closest_color(color))
    }

    /// A uniformly random palette entry, or `None` for an empty palette.
    ///
    /// Samples the raw palette list, not the tree.
    #[must_use]
    pub fn random(&self) -> Option<&NamedColor> {
        if self.palette.is_empty() {
            return None;
        }
        self.palette.get(fastrand::usize(..self.palette.len()))
    }

    fn name_or_unknown(found: Option<NamedColor>) -> String {
        found.map_or_else(|| UNKNOWN_NAME.to_string(), |color| color.name().to_string())
    }
}

impl FromIterator<NamedColor> for ColorNames {
    fn from_iter<I: IntoIterator<Item = NamedColor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
