/// Player ↔ enemy contact resolution and its scoring consequences.
///
/// Contact is edge-triggered per enemy: the first overlapping frame sets the
/// enemy's `collided` flag and flags it for deletion, so later frames never
/// see it again.

use rand::Rng;
use tracing::debug;

use crate::effects::{CollisionEffect, FloatingMessage, Particle};
use crate::entities::Sound;
use crate::player::PlayerState;
use crate::world::World;

/// Where the "+N" messages fly to (the score readout).
const SCORE_ANCHOR: (f32, f32) = (150.0, 50.0);

/// What the resolver did this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// The player took damage and must enter Hit.
    pub hurt: bool,
    /// Enemies destroyed by an attacking player.
    pub kills: u32,
    /// Contacts that cost a life.
    pub hits: u32,
}

pub fn resolve(world: &mut World, rng: &mut impl Rng) -> Resolution {
    let mut resolution = Resolution::default();
    let player_box = world.player.body;
    let state = world.player.state;

    for enemy in world.enemies.iter_mut() {
        if enemy.collided || enemy.marked_for_deletion || !enemy.body.overlaps(&player_box) {
            continue;
        }
        enemy.collided = true;
        enemy.marked_for_deletion = true;

        let (cx, cy) = enemy.body.center();
        world.collisions.push(CollisionEffect::new(cx, cy, rng));
        for _ in 0..world.config.world.impact_particles {
            world.particles.emit(Particle::splash(cx, cy, rng));
        }

        if state.is_attacking() {
            let gain = world.config.world.score_per_kill;
            world.score = world.score.saturating_add(gain);
            world.floating_messages.push(FloatingMessage::new(
                format!("+{gain}"),
                enemy.body.x,
                enemy.body.y,
                SCORE_ANCHOR.0,
                SCORE_ANCHOR.1,
            ));
            world.sounds.push(Sound::Score);
            resolution.kills += 1;
            debug!(kind = enemy.kind.label(), score = world.score, "enemy destroyed");
        } else if state == PlayerState::Hit {
            // Still recovering from an earlier hit: no further damage.
            debug!(kind = enemy.kind.label(), "contact while invulnerable");
        } else {
            world.lives = world.lives.saturating_sub(1);
            world.sounds.push(Sound::Hit);
            resolution.hurt = true;
            resolution.hits += 1;
            debug!(kind = enemy.kind.label(), lives = world.lives, "player hit");
        }
    }

    resolution
}
