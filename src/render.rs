//! Rendering boundary
//!
//! The simulation never draws. Once per frame the driver captures a
//! read-only [`FrameView`] of the session and hands it to a [`RenderSink`]:
//! a canvas in the browser, an ASCII grid when running headless.

use glam::Vec2;

use crate::sim::{Rect, Session};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    /// CSS hex form, e.g. `#4444ff`
    pub fn css(&self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }
}

pub mod palette {
    use super::Color;

    pub const ACTOR: Color = Color(0x4444ff);
    pub const PLATFORM: Color = Color(0x00ff00);
    pub const GOAL: Color = Color(0xffd700);
    pub const HAZARD: Color = Color(0xff0000);
    pub const PICKUP: Color = Color(0x00ffff);
    pub const HUD_TEXT: Color = Color(0xff0000);
}

/// What a drawn rectangle represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Platform,
    Goal,
    Hazard,
    Actor,
    Pickup,
}

impl SpriteKind {
    pub fn color(&self) -> Color {
        match self {
            SpriteKind::Platform => palette::PLATFORM,
            SpriteKind::Goal => palette::GOAL,
            SpriteKind::Hazard => palette::HAZARD,
            SpriteKind::Actor => palette::ACTOR,
            SpriteKind::Pickup => palette::PICKUP,
        }
    }

    /// Glyph for text rendering
    pub fn glyph(&self) -> char {
        match self {
            SpriteKind::Platform => '=',
            SpriteKind::Goal => 'G',
            SpriteKind::Hazard => '^',
            SpriteKind::Actor => '@',
            SpriteKind::Pickup => '+',
        }
    }
}

/// A colored rectangle to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
}

impl Sprite {
    pub fn color(&self) -> Color {
        self.kind.color()
    }
}

/// Read-only snapshot of one frame
#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    pub world: Vec2,
    pub actor: Rect,
    pub platforms: &'a [Rect],
    pub goal: Rect,
    pub hazards: &'a [Rect],
    pub pickup: Option<Rect>,
    pub lives: u32,
    pub time_remaining: i32,
    pub frame: u64,
}

impl<'a> FrameView<'a> {
    /// Capture the session's current frame
    pub fn capture(session: &'a Session) -> Option<Self> {
        let level = session.level()?;
        let config = session.config();
        Some(Self {
            world: Vec2::new(config.world_width, config.world_height),
            actor: session.actor().rect(),
            platforms: &level.platforms,
            goal: level.goal,
            hazards: &level.hazards,
            pickup: session.pickup().copied(),
            lives: session.lives(),
            time_remaining: session.time_remaining(),
            frame: session.frame(),
        })
    }

    /// Sprites in draw order (later ones on top)
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        let platforms = self.platforms.iter().map(|&rect| Sprite {
            kind: SpriteKind::Platform,
            rect,
        });
        let hazards = self.hazards.iter().map(|&rect| Sprite {
            kind: SpriteKind::Hazard,
            rect,
        });
        platforms
            .chain(std::iter::once(Sprite {
                kind: SpriteKind::Goal,
                rect: self.goal,
            }))
            .chain(hazards)
            .chain(std::iter::once(Sprite {
                kind: SpriteKind::Actor,
                rect: self.actor,
            }))
            .chain(self.pickup.map(|rect| Sprite {
                kind: SpriteKind::Pickup,
                rect,
            }))
    }

    /// HUD text lines: lives (top left) and time (top right)
    pub fn hud(&self) -> (String, String) {
        (
            format!("Lives: {}", self.lives),
            format!("Time: {}", self.time_remaining),
        )
    }
}

/// Consumer of frame snapshots
pub trait RenderSink {
    fn draw(&mut self, frame: &FrameView<'_>);
}

/// Sink that discards frames
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw(&mut self, _frame: &FrameView<'_>) {}
}

/// Headless sink that rasterizes each frame into a character grid
#[derive(Debug)]
pub struct AsciiCanvas {
    cols: usize,
    rows: usize,
    last: String,
    frames_drawn: u64,
}

impl AsciiCanvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            last: String::new(),
            frames_drawn: 0,
        }
    }

    /// Text of the most recent frame (HUD line followed by the grid)
    pub fn last_frame(&self) -> &str {
        &self.last
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    fn rasterize(&self, frame: &FrameView<'_>) -> String {
        let mut grid = vec![vec!['.'; self.cols]; self.rows];
        let cell = Vec2::new(
            frame.world.x / self.cols as f32,
            frame.world.y / self.rows as f32,
        );

        for sprite in frame.sprites() {
            let r = sprite.rect;
            let c0 = (r.left() / cell.x).floor().max(0.0) as usize;
            let c1 = ((r.right() / cell.x).ceil() as usize).min(self.cols);
            let r0 = (r.top() / cell.y).floor().max(0.0) as usize;
            let r1 = ((r.bottom() / cell.y).ceil() as usize).min(self.rows);
            for row in grid.iter_mut().take(r1).skip(r0) {
                for ch in row.iter_mut().take(c1).skip(c0) {
                    *ch = sprite.kind.glyph();
                }
            }
        }

        let (lives, time) = frame.hud();
        let mut out = format!("{lives}  {time}\n");
        for row in grid {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

impl RenderSink for AsciiCanvas {
    fn draw(&mut self, frame: &FrameView<'_>) {
        self.last = self.rasterize(frame);
        self.frames_drawn += 1;
    }
}
