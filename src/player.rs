//! Player character: vertical physics plus the movement state machine.
//!
//! The player never moves horizontally; the world scrolls under it at a
//! speed chosen by the current state.  Transitions are a pure function of
//! `(state, intents, conditions)` so they can be tested without a world.

use crate::config::PlayerConfig;
use crate::entities::{Intent, Intents, Rect, Tick};
use crate::surface::{Sprite, Surface, Tint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerState {
    Sitting,
    Running,
    Jumping,
    Falling,
    Rolling,
    Diving,
    Hit,
}

impl PlayerState {
    pub const ALL: [PlayerState; 7] = [
        PlayerState::Sitting,
        PlayerState::Running,
        PlayerState::Jumping,
        PlayerState::Falling,
        PlayerState::Rolling,
        PlayerState::Diving,
        PlayerState::Hit,
    ];

    /// Fraction of the world's max speed the ground scrolls at.
    pub fn speed_factor(self) -> f32 {
        match self {
            PlayerState::Sitting | PlayerState::Diving | PlayerState::Hit => 0.0,
            PlayerState::Running | PlayerState::Jumping | PlayerState::Falling => 0.5,
            PlayerState::Rolling => 1.0,
        }
    }

    /// Frames in this state's animation strip.
    pub fn frame_count(self) -> u32 {
        match self {
            PlayerState::Sitting => 5,
            PlayerState::Running => 9,
            PlayerState::Hit => 11,
            _ => 7,
        }
    }

    /// Contact in an attacking state destroys the enemy instead of hurting.
    pub fn is_attacking(self) -> bool {
        matches!(self, PlayerState::Rolling | PlayerState::Diving)
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayerState::Sitting => "SITTING",
            PlayerState::Running => "RUNNING",
            PlayerState::Jumping => "JUMPING",
            PlayerState::Falling => "FALLING",
            PlayerState::Rolling => "ROLLING",
            PlayerState::Diving => "DIVING",
            PlayerState::Hit => "HIT",
        }
    }
}

/// World facts the state machine consults once per frame, after physics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Conditions {
    pub on_ground: bool,
    /// Falling faster than gravity adds in one frame.
    pub descending: bool,
    /// A damaging collision was detected this frame.
    pub hurt: bool,
    pub hit_recovered: bool,
}

/// Next state for the given inputs, or `None` to stay put.
///
/// Rules are checked in priority order; the first that matches wins.
pub fn transition(
    state: PlayerState,
    intents: &Intents,
    cond: &Conditions,
) -> Option<PlayerState> {
    use PlayerState::*;

    if cond.hurt && state != Hit {
        return Some(Hit);
    }

    let up = intents.is_active(Intent::Up);
    let down = intents.is_active(Intent::Down);
    let roll = intents.is_active(Intent::Roll);
    let grounded = if intents.horizontal() { Running } else { Sitting };

    let next = match state {
        Hit => {
            if !cond.hit_recovered {
                None
            } else if cond.on_ground {
                Some(grounded)
            } else {
                Some(Falling)
            }
        }
        Sitting | Running => {
            if up {
                Some(Jumping)
            } else if roll {
                Some(Rolling)
            } else {
                Some(grounded)
            }
        }
        Jumping | Falling => {
            if down && roll && !cond.on_ground {
                Some(Diving)
            } else if roll {
                Some(Rolling)
            } else if state == Jumping && cond.descending {
                Some(Falling)
            } else if state == Falling && cond.on_ground {
                Some(grounded)
            } else {
                None
            }
        }
        Rolling => {
            if down && roll && !cond.on_ground {
                Some(Diving)
            } else if !roll {
                Some(if cond.on_ground { grounded } else { Falling })
            } else {
                None
            }
        }
        Diving => {
            if cond.on_ground {
                Some(grounded)
            } else {
                None
            }
        }
    };

    next.filter(|&s| s != state)
}

/// A state change that happened during `Player::update`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateChange {
    pub from: PlayerState,
    pub to: PlayerState,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Rect,
    pub vy: f32,
    pub state: PlayerState,
    pub frame: u32,
    frame_timer: f32,
    /// Milliseconds spent in the current Hit state.
    pub hit_timer: f32,
    ground_y: f32,
    config: PlayerConfig,
}

impl Player {
    /// Build a player standing on the ground line and enter the initial state.
    pub fn new(config: &PlayerConfig, ground_y: f32) -> Self {
        let mut player = Player {
            body: Rect::new(
                config.x,
                ground_y - config.height,
                config.width,
                config.height,
            ),
            vy: 0.0,
            state: PlayerState::Sitting,
            frame: 0,
            frame_timer: 0.0,
            hit_timer: 0.0,
            ground_y,
            config: config.clone(),
        };
        player.set_state(PlayerState::Sitting);
        player
    }

    fn ground_line(&self) -> f32 {
        self.ground_y - self.body.height
    }

    pub fn on_ground(&self) -> bool {
        self.body.y >= self.ground_line()
    }

    pub fn set_state(&mut self, state: PlayerState) {
        self.state = state;
        self.enter();
    }

    fn enter(&mut self) {
        self.frame = 0;
        self.frame_timer = 0.0;
        match self.state {
            PlayerState::Jumping => {
                if self.on_ground() {
                    self.vy -= self.config.jump_impulse;
                }
            }
            PlayerState::Diving => self.vy = self.config.dive_velocity,
            PlayerState::Hit => self.hit_timer = 0.0,
            _ => {}
        }
    }

    pub fn conditions(&self, hurt: bool) -> Conditions {
        Conditions {
            on_ground: self.on_ground(),
            descending: self.vy > self.config.weight,
            hurt,
            hit_recovered: self.state == PlayerState::Hit
                && self.hit_timer >= self.config.hit_recovery_ms,
        }
    }

    /// Integrate, then consult the state machine.  `hurt` is the collision
    /// resolver's verdict for this frame.
    pub fn update(&mut self, intents: &Intents, tick: &Tick, hurt: bool) -> Option<StateChange> {
        let k = tick.frames();

        // ── 1. Vertical motion ────────────────────────────────────────────────
        self.body.y += self.vy * k;
        let ground_line = self.ground_line();
        if self.body.y >= ground_line {
            self.body.y = ground_line;
            if self.vy > 0.0 {
                self.vy = 0.0;
            }
        } else {
            self.vy += self.config.weight * k;
        }

        // ── 2. Recovery timer ─────────────────────────────────────────────────
        if self.state == PlayerState::Hit {
            self.hit_timer += tick.dt;
        }

        // ── 3. Transition ─────────────────────────────────────────────────────
        let from = self.state;
        let change = transition(from, intents, &self.conditions(hurt)).map(|to| {
            self.set_state(to);
            StateChange { from, to }
        });

        // Rolling keeps its state through a jump.
        if self.state == PlayerState::Rolling
            && intents.is_active(Intent::Up)
            && self.on_ground()
            && self.vy >= 0.0
        {
            self.vy -= self.config.jump_impulse;
        }

        // ── 4. Animation ──────────────────────────────────────────────────────
        self.frame_timer += tick.dt;
        let frame_interval = 1000.0 / self.config.fps;
        if self.frame_timer > frame_interval {
            self.frame_timer = 0.0;
            self.frame = (self.frame + 1) % self.state.frame_count();
        }

        change
    }

    pub fn draw(&self, surface: &mut dyn Surface, debug: bool) {
        if debug {
            surface.stroke_rect(self.body, Tint::Ink);
        }
        surface.sprite(Sprite::Player(self.state), self.frame, self.body);
    }
}
