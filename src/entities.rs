/// Shared entity vocabulary: geometry, intents, per-frame timing and the
/// capability every simulated object implements.

use std::collections::HashSet;

use crate::surface::Surface;

/// Length of one reference frame in milliseconds (60 FPS).  Motion constants
/// are expressed per reference frame and scaled by the real frame delta.
pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in world units.  `y` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

// ── Input intents ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Left,
    Right,
    Up,
    Down,
    /// The special action: roll while held, attack on contact.
    Roll,
}

/// Snapshot of the intents active this frame.  Anything absent is inactive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    active: HashSet<Intent>,
}

impl Intents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, intent: Intent) -> Self {
        self.active.insert(intent);
        self
    }

    pub fn insert(&mut self, intent: Intent) {
        self.active.insert(intent);
    }

    pub fn is_active(&self, intent: Intent) -> bool {
        self.active.contains(&intent)
    }

    /// True when either horizontal direction is held.
    pub fn horizontal(&self) -> bool {
        self.is_active(Intent::Left) || self.is_active(Intent::Right)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl FromIterator<Intent> for Intents {
    fn from_iter<I: IntoIterator<Item = Intent>>(iter: I) -> Self {
        Intents {
            active: iter.into_iter().collect(),
        }
    }
}

// ── Audio triggers ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Dive,
    Hit,
    Score,
}

// ── Frame timing ──────────────────────────────────────────────────────────────

/// Timing handed to every entity update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Elapsed milliseconds since the previous pass, never negative.
    pub dt: f32,
    /// Current horizontal scroll speed of the world, per reference frame.
    pub speed: f32,
}

impl Tick {
    pub fn new(dt: f32, speed: f32) -> Self {
        Tick {
            dt: dt.max(0.0),
            speed,
        }
    }

    /// How many reference frames this pass represents.
    pub fn frames(&self) -> f32 {
        self.dt / REFERENCE_FRAME_MS
    }
}

// ── Entity capability ─────────────────────────────────────────────────────────

/// Anything the world updates, draws and eventually discards.
pub trait Entity {
    fn update(&mut self, tick: &Tick);

    fn draw(&self, surface: &mut dyn Surface, debug: bool);

    /// Set once the entity has flagged itself (or been flagged) for removal.
    fn is_done(&self) -> bool;
}

/// Drop every entity that flagged itself this pass.
pub fn prune<E: Entity>(entities: &mut Vec<E>) {
    entities.retain(|e| !e.is_done());
}
