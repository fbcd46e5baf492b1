//! Named shape catalog
//!
//! The catalog maps shape names to validated, counter-clockwise polygons.
//! Every entry is checked when the catalog is built, so a lookup never hands
//! out a broken ring. The built-in dataset is compiled into the crate; a RON
//! file with the same layout can replace it:
//!
//! ```ron
//! ShapeSet(
//!     shapes: {
//!         "square": [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)],
//!     },
//! )
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use stackplus_geom::Polygon2D;

use crate::CatalogError;

/// The dataset shipped with the game
const BUILTIN_SHAPES: &str = include_str!("../assets/shapes.ron");

/// On-disk layout of a shape dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShapeSet {
    /// Boundary ring per shape name, either winding
    pub shapes: BTreeMap<String, Vec<(f64, f64)>>,
}

/// Validated shapes by name
#[derive(Debug, Clone, Default)]
pub struct ShapeCatalog {
    shapes: BTreeMap<String, Polygon2D>,
}

impl ShapeCatalog {
    /// The built-in dataset
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_ron_str(BUILTIN_SHAPES)
    }

    /// Load a dataset from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_ron_str(&contents)?;
        log::info!("Loaded {} shapes from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parse a dataset from RON text
    pub fn from_ron_str(source: &str) -> Result<Self, CatalogError> {
        let set: ShapeSet = ron::from_str(source)?;
        Self::from_set(set)
    }

    /// Validate every ring of a dataset
    ///
    /// The first invalid entry (in name order) rejects the whole set.
    pub fn from_set(set: ShapeSet) -> Result<Self, CatalogError> {
        let mut shapes = BTreeMap::new();
        for (name, ring) in set.shapes {
            match Polygon2D::new(ring) {
                Ok(polygon) => {
                    shapes.insert(name, polygon);
                }
                Err(source) => return Err(CatalogError::InvalidGeometry { name, source }),
            }
        }
        Ok(Self { shapes })
    }

    /// All shape names, sorted
    pub fn names(&self) -> BTreeSet<String> {
        self.shapes.keys().cloned().collect()
    }

    /// Number of shapes
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.shapes.contains_key(name)
    }

    /// The polygon for `name`, counter-clockwise
    pub fn get(&self, name: &str) -> Result<Polygon2D, CatalogError> {
        self.shapes
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    /// A uniformly chosen name, using the thread-local generator
    pub fn random_name(&self) -> Result<String, CatalogError> {
        self.random_name_with(&mut rand::thread_rng())
    }

    /// A uniformly chosen name from an explicit generator
    pub fn random_name_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, CatalogError> {
        self.shapes
            .keys()
            .choose(rng)
            .cloned()
            .ok_or(CatalogError::Empty)
    }
}
