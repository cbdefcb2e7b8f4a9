//! Cosmetic, self-expiring entities: particles, impact sprites and floating
//! score messages.  None of them affect gameplay.

use std::collections::VecDeque;

use rand::Rng;

use crate::entities::{Entity, Rect, Tick};
use crate::surface::{Sprite, Surface, TextStyle, Tint};

/// Below this size a particle is invisible and removes itself.
const MIN_PARTICLE_SIZE: f32 = 0.5;

// ── Particles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    /// Kicked up at the feet while running.
    Dust,
    /// Thrown out on landing from a dive and on impacts; arcs under gravity.
    Splash,
    /// Trail left while rolling or diving.
    Fire,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub kind: ParticleKind,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    speed_x: f32,
    speed_y: f32,
    gravity: f32,
    angle: f32,
    va: f32,
    pub marked_for_deletion: bool,
}

impl Particle {
    fn build(kind: ParticleKind, x: f32, y: f32, size: f32, speed_x: f32, speed_y: f32) -> Self {
        Particle {
            kind,
            x,
            y,
            size,
            speed_x,
            speed_y,
            gravity: 0.0,
            angle: 0.0,
            va: 0.0,
            marked_for_deletion: false,
        }
    }

    pub fn dust(x: f32, y: f32, rng: &mut impl Rng) -> Self {
        let size = rng.gen::<f32>() * 10.0 + 10.0;
        Self::build(ParticleKind::Dust, x, y, size, rng.gen(), rng.gen())
    }

    pub fn splash(x: f32, y: f32, rng: &mut impl Rng) -> Self {
        let size = rng.gen::<f32>() * 100.0 + 100.0;
        let speed_x = rng.gen::<f32>() * 6.0 - 3.0;
        let speed_y = rng.gen::<f32>() * 2.0 + 2.0;
        Self::build(ParticleKind::Splash, x - size * 0.4, y - size * 0.5, size, speed_x, speed_y)
    }

    pub fn fire(x: f32, y: f32, rng: &mut impl Rng) -> Self {
        let size = rng.gen::<f32>() * 50.0 + 50.0;
        let mut p = Self::build(ParticleKind::Fire, x, y, size, 1.0, 1.0);
        p.va = rng.gen::<f32>() * 0.2 - 0.1;
        p
    }

    fn shrink(&self) -> f32 {
        match self.kind {
            ParticleKind::Dust => 0.97,
            ParticleKind::Splash | ParticleKind::Fire => 0.95,
        }
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

impl Entity for Particle {
    fn update(&mut self, tick: &Tick) {
        let k = tick.frames();
        self.x -= (self.speed_x + tick.speed) * k;
        self.y -= self.speed_y * k;
        self.size *= self.shrink().powf(k);

        match self.kind {
            ParticleKind::Dust => {}
            ParticleKind::Splash => {
                self.gravity += 0.1 * k;
                self.y += self.gravity * k;
            }
            ParticleKind::Fire => {
                self.angle += self.va * k;
                self.x += (self.angle * 5.0).sin() * k;
            }
        }

        if self.size < MIN_PARTICLE_SIZE {
            self.marked_for_deletion = true;
        }
    }

    fn draw(&self, surface: &mut dyn Surface, _debug: bool) {
        let sprite = match self.kind {
            ParticleKind::Dust => Sprite::Dust,
            ParticleKind::Splash => Sprite::Splash,
            ParticleKind::Fire => Sprite::Fire,
        };
        surface.sprite(sprite, 0, self.bounds());
    }

    fn is_done(&self) -> bool {
        self.marked_for_deletion
    }
}

/// Bounded particle collection.  New particles go to the front, so capping
/// the length drops the oldest ones off the tail.
#[derive(Clone, Debug)]
pub struct ParticlePool {
    items: VecDeque<Particle>,
    cap: usize,
}

impl ParticlePool {
    pub fn new(cap: usize) -> Self {
        ParticlePool {
            items: VecDeque::with_capacity(cap),
            cap,
        }
    }

    pub fn emit(&mut self, particle: Particle) {
        self.items.push_front(particle);
    }

    pub fn update(&mut self, tick: &Tick) {
        for p in self.items.iter_mut() {
            p.update(tick);
        }
    }

    /// Remove expired particles, then enforce the hard cap.
    pub fn prune(&mut self) {
        self.items.retain(|p| !p.is_done());
        self.items.truncate(self.cap);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }

    pub fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        for p in &self.items {
            p.draw(surface, debug);
        }
    }
}

// ── Impact sprites ────────────────────────────────────────────────────────────

const IMPACT_FPS: f32 = 15.0;
const IMPACT_LAST_FRAME: u32 = 4;

#[derive(Clone, Debug)]
pub struct CollisionEffect {
    pub body: Rect,
    pub frame: u32,
    frame_timer: f32,
    pub marked_for_deletion: bool,
}

impl CollisionEffect {
    /// Centre a randomly scaled impact on the contact point.
    pub fn new(cx: f32, cy: f32, rng: &mut impl Rng) -> Self {
        let modifier = rng.gen::<f32>() * 0.5 + 0.5;
        let width = 100.0 * modifier;
        let height = 90.0 * modifier;
        CollisionEffect {
            body: Rect::new(cx - width * 0.5, cy - height * 0.5, width, height),
            frame: 0,
            frame_timer: 0.0,
            marked_for_deletion: false,
        }
    }
}

impl Entity for CollisionEffect {
    fn update(&mut self, tick: &Tick) {
        self.body.x -= tick.speed * tick.frames();
        self.frame_timer += tick.dt;
        if self.frame_timer > 1000.0 / IMPACT_FPS {
            self.frame_timer = 0.0;
            self.frame += 1;
            if self.frame > IMPACT_LAST_FRAME {
                self.marked_for_deletion = true;
            }
        }
    }

    fn draw(&self, surface: &mut dyn Surface, _debug: bool) {
        surface.sprite(Sprite::Impact, self.frame, self.body);
    }

    fn is_done(&self) -> bool {
        self.marked_for_deletion
    }
}

// ── Floating messages ─────────────────────────────────────────────────────────

/// Reference frames a message stays on screen.
const MESSAGE_LIFETIME: f32 = 100.0;
const MESSAGE_EASING: f32 = 0.03;

#[derive(Clone, Debug)]
pub struct FloatingMessage {
    pub value: String,
    pub x: f32,
    pub y: f32,
    target_x: f32,
    target_y: f32,
    age: f32,
    pub marked_for_deletion: bool,
}

impl FloatingMessage {
    pub fn new(value: impl Into<String>, x: f32, y: f32, target_x: f32, target_y: f32) -> Self {
        FloatingMessage {
            value: value.into(),
            x,
            y,
            target_x,
            target_y,
            age: 0.0,
            marked_for_deletion: false,
        }
    }
}

impl Entity for FloatingMessage {
    fn update(&mut self, tick: &Tick) {
        let k = tick.frames();
        let ease = (MESSAGE_EASING * k).min(1.0);
        self.x += (self.target_x - self.x) * ease;
        self.y += (self.target_y - self.y) * ease;
        self.age += k;
        if self.age > MESSAGE_LIFETIME {
            self.marked_for_deletion = true;
        }
    }

    fn draw(&self, surface: &mut dyn Surface, _debug: bool) {
        surface.text(self.x + 2.0, self.y + 2.0, &self.value, TextStyle::plain(Tint::Shadow));
        surface.text(self.x, self.y, &self.value, TextStyle::plain(Tint::Yellow));
    }

    fn is_done(&self) -> bool {
        self.marked_for_deletion
    }
}
