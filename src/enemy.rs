//! Enemy variants and the timer-driven spawner.

use rand::Rng;
use tracing::debug;

use crate::config::WorldConfig;
use crate::entities::{Entity, Rect, Tick};
use crate::surface::{Sprite, Surface, Tint};

const ENEMY_FPS: f32 = 20.0;

#[derive(Clone, Debug, PartialEq)]
pub enum EnemyKind {
    /// Drifts left while bobbing on a sine wave.
    Flying { angle: f32, va: f32 },
    /// Sits on the ground line and moves only with the world.
    Ground,
    /// Hangs from a thread, bouncing between the sky and the ground.
    Climbing { vy: f32 },
}

impl EnemyKind {
    pub fn label(&self) -> &'static str {
        match self {
            EnemyKind::Flying { .. } => "flying",
            EnemyKind::Ground => "ground",
            EnemyKind::Climbing { .. } => "climbing",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: Rect,
    /// Own leftward speed on top of the world's scroll speed.
    pub speed_x: f32,
    pub frame: u32,
    frame_timer: f32,
    max_frame: u32,
    /// Set by the collision resolver so overlap fires only once.
    pub collided: bool,
    pub marked_for_deletion: bool,
    ground_y: f32,
}

impl Enemy {
    fn build(kind: EnemyKind, body: Rect, speed_x: f32, max_frame: u32, ground_y: f32) -> Self {
        Enemy {
            kind,
            body,
            speed_x,
            frame: 0,
            frame_timer: 0.0,
            max_frame,
            collided: false,
            marked_for_deletion: false,
            ground_y,
        }
    }

    pub fn flying(arena: &WorldConfig, rng: &mut impl Rng) -> Self {
        let x = arena.width + rng.gen::<f32>() * arena.width * 0.5;
        let y = rng.gen::<f32>() * arena.height * 0.5;
        let speed_x = rng.gen::<f32>() + 1.0;
        let va = rng.gen::<f32>() * 0.1 + 0.1;
        Self::build(
            EnemyKind::Flying { angle: 0.0, va },
            Rect::new(x, y, 60.0, 44.0),
            speed_x,
            5,
            arena.ground_y(),
        )
    }

    pub fn ground(arena: &WorldConfig) -> Self {
        let height = 87.0;
        Self::build(
            EnemyKind::Ground,
            Rect::new(arena.width, arena.ground_y() - height, 60.0, height),
            0.0,
            1,
            arena.ground_y(),
        )
    }

    pub fn climbing(arena: &WorldConfig, rng: &mut impl Rng) -> Self {
        let y = rng.gen::<f32>() * arena.height * 0.5;
        let vy = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        Self::build(
            EnemyKind::Climbing { vy },
            Rect::new(arena.width, y, 120.0, 144.0),
            0.0,
            5,
            arena.ground_y(),
        )
    }

    fn sprite(&self) -> Sprite {
        match self.kind {
            EnemyKind::Flying { .. } => Sprite::FlyingEnemy,
            EnemyKind::Ground => Sprite::GroundEnemy,
            EnemyKind::Climbing { .. } => Sprite::ClimbingEnemy,
        }
    }
}

impl Entity for Enemy {
    fn update(&mut self, tick: &Tick) {
        let k = tick.frames();
        self.body.x -= (self.speed_x + tick.speed) * k;

        match &mut self.kind {
            EnemyKind::Flying { angle, va } => {
                *angle += *va * k;
                self.body.y += angle.sin() * k;
            }
            EnemyKind::Ground => {}
            EnemyKind::Climbing { vy } => {
                self.body.y += *vy * k;
                if self.body.y > self.ground_y - self.body.height {
                    *vy = -vy.abs();
                }
                if self.body.y < -self.body.height {
                    self.marked_for_deletion = true;
                }
            }
        }

        self.frame_timer += tick.dt;
        if self.frame_timer > 1000.0 / ENEMY_FPS {
            self.frame_timer = 0.0;
            self.frame = if self.frame < self.max_frame { self.frame + 1 } else { 0 };
        }

        // Escaped past the left edge.
        if self.body.right() < 0.0 {
            self.marked_for_deletion = true;
        }
    }

    fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        if debug {
            surface.stroke_rect(self.body, Tint::Ink);
        }
        if let EnemyKind::Climbing { .. } = self.kind {
            let cx = self.body.x + self.body.width * 0.5;
            surface.line((cx, 0.0), (cx, self.body.y + 50.0), Tint::Grey);
        }
        surface.sprite(self.sprite(), self.frame, self.body);
    }

    fn is_done(&self) -> bool {
        self.marked_for_deletion
    }
}

// ── Spawner ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Spawner {
    /// Milliseconds accumulated since the last firing.
    pub timer: f32,
    pub interval: f32,
    ground_chance: f64,
}

impl Spawner {
    pub fn new(interval: f32, ground_chance: f64) -> Self {
        Spawner {
            timer: 0.0,
            interval,
            ground_chance: ground_chance.clamp(0.0, 1.0),
        }
    }

    /// Accumulate `dt`; once the interval is reached, reset and return the
    /// new enemies.  A still world only gets flyers; a moving one adds a
    /// ground enemy or a climber on a coin flip.
    pub fn tick(
        &mut self,
        dt: f32,
        speed: f32,
        arena: &WorldConfig,
        rng: &mut impl Rng,
    ) -> Vec<Enemy> {
        self.timer += dt.max(0.0);
        if self.timer < self.interval {
            return Vec::new();
        }
        self.timer = 0.0;

        let mut spawned = vec![Enemy::flying(arena, rng)];
        if speed > 0.0 {
            if rng.gen_bool(self.ground_chance) {
                spawned.push(Enemy::ground(arena));
            } else {
                spawned.push(Enemy::climbing(arena, rng));
            }
        }
        debug!(
            count = spawned.len(),
            kinds = ?spawned.iter().map(|e| e.kind.label()).collect::<Vec<_>>(),
            speed,
            "spawned enemies"
        );
        spawned
    }
}
