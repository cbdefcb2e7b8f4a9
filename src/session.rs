//! One play session: configuration, randomness and the live world.
//!
//! Restart is construct-and-swap: the old `World` and everything it owns is
//! dropped in one assignment, never reset field by field.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::GameConfig;
use crate::entities::Intents;
use crate::world::World;

pub struct Session<R: Rng = StdRng> {
    config: GameConfig,
    world: World,
    rng: R,
    restarts: u32,
}

impl Session<StdRng> {
    /// Seeded sessions replay identically; `None` draws a seed from entropy.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        info!(
            lives = config.world.lives,
            max_time_ms = config.world.max_time,
            winning_score = config.world.winning_score,
            "session started"
        );
        let world = World::new(&config);
        Session {
            config,
            world,
            rng,
            restarts: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    pub fn is_over(&self) -> bool {
        self.world.game_over
    }

    pub fn update(&mut self, dt: f32, intents: &Intents) {
        self.world.update(dt, intents, &mut self.rng);
    }

    pub fn restart(&mut self) {
        self.restarts += 1;
        info!(
            restarts = self.restarts,
            final_score = self.world.score,
            "session restarted"
        );
        self.world = World::new(&self.config);
    }

    pub fn toggle_debug(&mut self) {
        self.world.debug = !self.world.debug;
    }
}
