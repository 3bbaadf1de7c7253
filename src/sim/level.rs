//! Level fixtures
//!
//! Levels are authored as compact JSON: platforms carry their own size, while
//! goals, hazards and pickups are placed by top-left corner and use the fixed
//! sizes from [`crate::consts`]. Fixtures are immutable once loaded; the
//! session keeps its own live pickup slot per level attempt.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rect::Rect;
use crate::consts::{GOAL_SIZE, HAZARD_SIZE, PICKUP_SIZE, WORLD_HEIGHT, WORLD_WIDTH};

/// Built-in level data (three hand-authored levels)
const BUILTIN_LEVELS: &str = include_str!("levels.json");

/// Errors raised while loading level data
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("invalid level JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level set is empty")]
    Empty,
    #[error("level {level}: {what} has no area")]
    Degenerate { level: usize, what: &'static str },
    #[error("level {level}: {what} lies outside the {width}x{height} world")]
    OutOfBounds {
        level: usize,
        what: &'static str,
        width: f32,
        height: f32,
    },
}

/// Authoring format for one level
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LevelSource {
    /// `[x, y, width, height]`
    platforms: Vec<[f32; 4]>,
    /// `[x, y]`
    goal: [f32; 2],
    /// `[x, y]` each
    #[serde(default)]
    hazards: Vec<[f32; 2]>,
    /// `[x, y]`
    #[serde(default)]
    pickup: Option<[f32; 2]>,
}

impl From<LevelSource> for LevelFixture {
    fn from(src: LevelSource) -> Self {
        Self {
            platforms: src
                .platforms
                .iter()
                .map(|[x, y, w, h]| Rect::new(*x, *y, *w, *h))
                .collect(),
            goal: Rect::new(src.goal[0], src.goal[1], GOAL_SIZE, GOAL_SIZE),
            hazards: src
                .hazards
                .iter()
                .map(|[x, y]| Rect::new(*x, *y, HAZARD_SIZE, HAZARD_SIZE))
                .collect(),
            pickup: src
                .pickup
                .map(|[x, y]| Rect::new(x, y, PICKUP_SIZE, PICKUP_SIZE)),
        }
    }
}

/// Static data for a single level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelFixture {
    /// Landing surfaces, resolved in order
    pub platforms: Vec<Rect>,
    /// Reaching this completes the level
    pub goal: Rect,
    /// Touching one of these costs a life
    pub hazards: Vec<Rect>,
    /// One-shot time bonus
    pub pickup: Option<Rect>,
}

impl LevelFixture {
    fn validate(&self, level: usize, width: f32, height: f32) -> Result<(), LevelError> {
        let named = self
            .platforms
            .iter()
            .map(|r| ("platform", r))
            .chain(std::iter::once(("goal", &self.goal)))
            .chain(self.hazards.iter().map(|r| ("hazard", r)))
            .chain(self.pickup.iter().map(|r| ("pickup", r)));

        for (what, rect) in named {
            if !rect.has_area() {
                return Err(LevelError::Degenerate { level, what });
            }
            if !rect.inside_bounds(width, height) {
                return Err(LevelError::OutOfBounds {
                    level,
                    what,
                    width,
                    height,
                });
            }
        }
        Ok(())
    }
}

/// Ordered sequence of levels played in one session
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSet {
    levels: Vec<LevelFixture>,
}

impl LevelSet {
    /// Build a validated level set from fixtures
    pub fn new(levels: Vec<LevelFixture>, width: f32, height: f32) -> Result<Self, LevelError> {
        let set = Self { levels };
        set.validate(width, height)?;
        Ok(set)
    }

    /// Check every level against a world of `width` x `height`
    pub fn validate(&self, width: f32, height: f32) -> Result<(), LevelError> {
        if self.levels.is_empty() {
            return Err(LevelError::Empty);
        }
        for (i, level) in self.levels.iter().enumerate() {
            level.validate(i, width, height)?;
        }
        Ok(())
    }

    /// Parse and validate a level set from authoring JSON
    pub fn from_json(json: &str, width: f32, height: f32) -> Result<Self, LevelError> {
        let sources: Vec<LevelSource> = serde_json::from_str(json)?;
        Self::new(sources.into_iter().map(LevelFixture::from).collect(), width, height)
    }

    /// The built-in levels
    ///
    /// Panics if the embedded data is malformed; that is a build defect,
    /// not a runtime condition.
    pub fn builtin() -> Self {
        match Self::from_json(BUILTIN_LEVELS, WORLD_WIDTH, WORLD_HEIGHT) {
            Ok(set) => set,
            Err(e) => panic!("built-in level data is invalid: {e}"),
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false for a constructed set
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelFixture> {
        self.levels.get(index)
    }
}
