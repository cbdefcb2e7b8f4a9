//! The world aggregate: every entity collection plus the session scalars.
//!
//! A `World` is built once per play-through and never reset in place; a
//! restart builds a new one (see `session`).

use rand::Rng;
use tracing::info;

use crate::background::Background;
use crate::collision;
use crate::config::GameConfig;
use crate::effects::{CollisionEffect, FloatingMessage, Particle, ParticlePool};
use crate::enemy::{Enemy, Spawner};
use crate::entities::{prune, Entity, Intents, Sound, Tick};
use crate::player::{Player, PlayerState};
use crate::surface::Surface;
use crate::ui;

/// Splash particles thrown out when a dive lands.
const DIVE_SPLASH_PARTICLES: usize = 30;

#[derive(Clone, Debug)]
pub struct World {
    pub config: GameConfig,
    /// Milliseconds of simulated play.
    pub time: f32,
    /// Current scroll speed, `0 ..= max_speed`.
    pub speed: f32,
    pub score: u32,
    pub lives: u32,
    pub game_over: bool,
    pub debug: bool,
    pub background: Background,
    pub player: Player,
    pub spawner: Spawner,
    pub enemies: Vec<Enemy>,
    pub particles: ParticlePool,
    pub collisions: Vec<CollisionEffect>,
    pub floating_messages: Vec<FloatingMessage>,
    /// Sound triggers raised during the last update pass.
    pub sounds: Vec<Sound>,
}

impl World {
    pub fn new(config: &GameConfig) -> Self {
        let w = &config.world;
        World {
            config: config.clone(),
            time: 0.0,
            speed: 0.0,
            score: 0,
            lives: w.lives,
            game_over: false,
            debug: false,
            background: Background::new(w.width, w.height),
            player: Player::new(&config.player, w.ground_y()),
            spawner: Spawner::new(w.enemy_interval, w.ground_chance),
            enemies: Vec::new(),
            particles: ParticlePool::new(w.max_particles),
            collisions: Vec::new(),
            floating_messages: Vec::new(),
            sounds: Vec::new(),
        }
    }

    pub fn max_speed(&self) -> f32 {
        self.config.world.max_speed
    }

    pub fn has_won(&self) -> bool {
        self.score >= self.config.world.winning_score
    }

    /// Hand the sound triggers of the last pass to the audio collaborator.
    pub fn take_sounds(&mut self) -> Vec<Sound> {
        std::mem::take(&mut self.sounds)
    }

    /// Advance the simulation by `dt` milliseconds.  All randomness comes
    /// through `rng` so callers control determinism.
    pub fn update(&mut self, dt: f32, intents: &Intents, rng: &mut impl Rng) {
        let dt = dt.max(0.0);
        let was_over = self.game_over;
        self.sounds.clear();

        // ── 1. Clock ──────────────────────────────────────────────────────────
        self.time += dt;
        if self.time > self.config.world.max_time {
            self.game_over = true;
        }

        let tick = Tick::new(dt, self.speed);
        self.background.update(&tick);

        // ── 2. Collisions, against last frame's positions ─────────────────────
        let resolution = collision::resolve(self, rng);

        // ── 3. Player physics and state machine ───────────────────────────────
        if let Some(change) = self.player.update(intents, &tick, resolution.hurt) {
            if change.to == PlayerState::Diving {
                self.sounds.push(Sound::Dive);
            }
            if change.from == PlayerState::Diving && self.player.on_ground() {
                let (cx, _) = self.player.body.center();
                let feet = self.player.body.bottom();
                for _ in 0..DIVE_SPLASH_PARTICLES {
                    self.particles.emit(Particle::splash(cx, feet, rng));
                }
            }
        }
        self.speed = self.max_speed() * self.player.state.speed_factor();
        self.emit_trail(rng);

        // ── 4. Spawner ────────────────────────────────────────────────────────
        let spawned = self
            .spawner
            .tick(dt, self.speed, &self.config.world, rng);
        self.enemies.extend(spawned);

        // ── 5. Enemies and effect pools ───────────────────────────────────────
        let tick = Tick::new(dt, self.speed);
        for enemy in &mut self.enemies {
            enemy.update(&tick);
        }
        self.particles.update(&tick);
        for effect in &mut self.collisions {
            effect.update(&tick);
        }
        for message in &mut self.floating_messages {
            message.update(&tick);
        }

        // ── 6. Drop flagged entities, cap particles ───────────────────────────
        prune(&mut self.enemies);
        prune(&mut self.collisions);
        prune(&mut self.floating_messages);
        self.particles.prune();

        // ── 7. End conditions ─────────────────────────────────────────────────
        if self.lives == 0 || self.has_won() {
            self.game_over = true;
        }
        if self.game_over && !was_over {
            info!(
                score = self.score,
                lives = self.lives,
                time_ms = self.time,
                won = self.has_won(),
                "game over"
            );
        }
    }

    /// Particles left behind by the current movement state.
    fn emit_trail(&mut self, rng: &mut impl Rng) {
        let body = self.player.body;
        match self.player.state {
            PlayerState::Running if self.player.on_ground() => {
                self.particles.emit(Particle::dust(
                    body.x + body.width * 0.5,
                    body.bottom(),
                    rng,
                ));
            }
            PlayerState::Rolling | PlayerState::Diving => {
                self.particles.emit(Particle::fire(
                    body.x + body.width * 0.5,
                    body.y + body.height * 0.5,
                    rng,
                ));
            }
            _ => {}
        }
    }

    /// Render back to front.
    pub fn draw(&self, surface: &mut dyn Surface) {
        self.background.draw(surface);
        self.player.draw(surface, self.debug);
        for enemy in &self.enemies {
            enemy.draw(surface, self.debug);
        }
        ui::draw(self, surface);
        self.particles.draw(surface, self.debug);
        for effect in &self.collisions {
            effect.draw(surface, self.debug);
        }
        for message in &self.floating_messages {
            message.draw(surface, self.debug);
        }
    }
}
