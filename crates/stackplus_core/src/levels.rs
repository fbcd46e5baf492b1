//! Level table and unlock rules
//!
//! Every shape is a level. A level is either open from the start or unlocks
//! once another level's high score reaches a threshold.

use crate::{ScoreStore, ShapeCatalog};

/// When a level becomes playable
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Unlock {
    /// Open from the start
    Always,
    /// Open once `level` has a high score of at least `score`
    After { level: String, score: u32 },
}

/// A playable level
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    /// Shape name in the catalog
    pub shape: String,
    /// Name shown on the level select page
    pub display_name: String,
    pub unlock: Unlock,
}

impl Level {
    fn open(shape: &str, display_name: &str) -> Self {
        Self {
            shape: shape.to_string(),
            display_name: display_name.to_string(),
            unlock: Unlock::Always,
        }
    }

    fn after(shape: &str, display_name: &str, level: &str, score: u32) -> Self {
        Self {
            shape: shape.to_string(),
            display_name: display_name.to_string(),
            unlock: Unlock::After { level: level.to_string(), score },
        }
    }
}

/// All levels in menu order
#[derive(Clone, Debug)]
pub struct LevelTable {
    levels: Vec<Level>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LevelTable {
    /// The twelve levels of the built-in catalog
    pub fn builtin() -> Self {
        Self {
            levels: vec![
                Level::open("square", "Square"),
                Level::open("triangle", "Triangle"),
                Level::after("rectangle", "Rectangle", "square", 5),
                Level::after("hexagon", "Long Hexagon", "rectangle", 10),
                Level::after("caret", "Caret", "hexagon", 10),
                Level::after("slant", "Slanted Quad", "hexagon", 10),
                Level::after("pentagon", "Pentagon Hat", "slant", 15),
                Level::after("en", "Uppercase N", "pentagon", 15),
                Level::after("kay", "Lowercase K", "pentagon", 15),
                Level::after("mta_arrow", "MTA Arrow", "en", 10),
                Level::after("pi", "Pi", "kay", 10),
                Level::after("double_u", "Uppercase W", "mta_arrow", 15),
            ],
        }
    }

    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, shape: &str) -> Option<&Level> {
        self.levels.iter().find(|level| level.shape == shape)
    }

    /// Display name for a shape, falling back to the shape name
    pub fn display_name<'a>(&'a self, shape: &'a str) -> &'a str {
        self.get(shape).map_or(shape, |level| level.display_name.as_str())
    }

    /// Whether `shape` can be played given the recorded scores
    ///
    /// Unknown levels are locked.
    pub fn is_unlocked(&self, shape: &str, scores: &dyn ScoreStore) -> bool {
        match self.get(shape).map(|level| &level.unlock) {
            Some(Unlock::Always) => true,
            Some(Unlock::After { level, score }) => scores.high_score(level) >= *score,
            None => false,
        }
    }

    /// Levels currently playable, in menu order
    pub fn unlocked<'a>(&'a self, scores: &'a dyn ScoreStore) -> impl Iterator<Item = &'a Level> + 'a {
        self.levels
            .iter()
            .filter(move |level| self.is_unlocked(&level.shape, scores))
    }

    /// Level shapes that the catalog does not contain
    pub fn missing_shapes(&self, catalog: &ShapeCatalog) -> Vec<String> {
        self.levels
            .iter()
            .filter(|level| !catalog.contains(&level.shape))
            .map(|level| level.shape.clone())
            .collect()
    }
}
