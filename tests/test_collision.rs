use night_runner::collision::*;
use night_runner::config::GameConfig;
use night_runner::enemy::Enemy;
use night_runner::entities::*;
use night_runner::player::PlayerState;
use night_runner::world::World;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_world() -> World {
    World::new(&GameConfig::default())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A ground enemy placed squarely on the player.
fn enemy_on_player(world: &World) -> Enemy {
    let mut e = Enemy::ground(&world.config.world);
    e.body.x = world.player.body.x + 10.0;
    e
}

// ── resolve ───────────────────────────────────────────────────────────────────

#[test]
fn contact_costs_a_life_and_flags_the_enemy() {
    let mut world = make_world();
    let enemy = enemy_on_player(&world);
    world.enemies.push(enemy);

    let r = resolve(&mut world, &mut seeded_rng());

    assert!(r.hurt);
    assert_eq!(r.hits, 1);
    assert_eq!(r.kills, 0);
    assert_eq!(world.lives, 4);
    assert_eq!(world.score, 0);
    assert!(world.enemies[0].collided);
    assert!(world.enemies[0].marked_for_deletion);
    assert_eq!(world.sounds, vec![Sound::Hit]);
    assert_eq!(world.collisions.len(), 1);
    assert_eq!(world.particles.len(), world.config.world.impact_particles);
}

#[test]
fn contact_is_edge_triggered() {
    let mut world = make_world();
    let enemy = enemy_on_player(&world);
    world.enemies.push(enemy);
    let mut rng = seeded_rng();

    resolve(&mut world, &mut rng);
    let again = resolve(&mut world, &mut rng);

    assert_eq!(again, Resolution::default());
    assert_eq!(world.lives, 4);
    assert_eq!(world.collisions.len(), 1);
}

#[test]
fn touching_edges_do_not_collide() {
    let mut world = make_world();
    let mut enemy = Enemy::ground(&world.config.world);
    enemy.body.x = world.player.body.right();
    world.enemies.push(enemy);

    let r = resolve(&mut world, &mut seeded_rng());
    assert_eq!(r, Resolution::default());
    assert!(!world.enemies[0].collided);
}

#[test]
fn attacking_contact_scores_instead() {
    let mut world = make_world();
    world.player.set_state(PlayerState::Rolling);
    let enemy = enemy_on_player(&world);
    world.enemies.push(enemy);

    let r = resolve(&mut world, &mut seeded_rng());

    assert!(!r.hurt);
    assert_eq!(r.kills, 1);
    assert_eq!(world.score, 1);
    assert_eq!(world.lives, 5);
    assert_eq!(world.sounds, vec![Sound::Score]);
    assert_eq!(world.floating_messages.len(), 1);
    assert_eq!(world.floating_messages[0].value, "+1");
    assert!(world.enemies[0].marked_for_deletion);
}

#[test]
fn score_per_kill_is_configurable() {
    let mut config = GameConfig::default();
    config.world.score_per_kill = 3;
    let mut world = World::new(&config);
    world.player.set_state(PlayerState::Diving);
    let enemy = enemy_on_player(&world);
    world.enemies.push(enemy);

    resolve(&mut world, &mut seeded_rng());
    assert_eq!(world.score, 3);
    assert_eq!(world.floating_messages[0].value, "+3");
}

#[test]
fn no_damage_while_already_hit() {
    let mut world = make_world();
    world.player.set_state(PlayerState::Hit);
    let enemy = enemy_on_player(&world);
    world.enemies.push(enemy);

    let r = resolve(&mut world, &mut seeded_rng());

    assert!(!r.hurt);
    assert_eq!(world.lives, 5);
    assert!(world.sounds.is_empty());
    assert!(world.enemies[0].marked_for_deletion);
}

#[test]
fn each_fresh_contact_in_one_frame_costs_a_life() {
    let mut world = make_world();
    let first = enemy_on_player(&world);
    let mut second = enemy_on_player(&world);
    second.body.x += 20.0;
    world.enemies.push(first);
    world.enemies.push(second);

    let r = resolve(&mut world, &mut seeded_rng());

    assert!(r.hurt);
    assert_eq!(r.hits, 2);
    assert_eq!(world.lives, 3);
    assert_eq!(world.sounds, vec![Sound::Hit, Sound::Hit]);
    assert!(world.enemies.iter().all(|e| e.marked_for_deletion));
    assert_eq!(world.collisions.len(), 2);
}

#[test]
fn two_fresh_contacts_through_update_enter_hit_once() {
    let mut world = make_world();
    let first = enemy_on_player(&world);
    let mut second = enemy_on_player(&world);
    second.body.x += 20.0;
    world.enemies.push(first);
    world.enemies.push(second);
    let mut rng = seeded_rng();

    world.update(16.0, &Intents::new(), &mut rng);
    assert_eq!(world.lives, 3);
    assert_eq!(world.player.state, PlayerState::Hit);
    assert!(world.enemies.is_empty());

    world.update(16.0, &Intents::new(), &mut rng);
    assert_eq!(world.lives, 3);
}

#[test]
fn lives_never_underflow() {
    let mut world = make_world();
    world.lives = 0;
    let enemy = enemy_on_player(&world);
    world.enemies.push(enemy);
    resolve(&mut world, &mut seeded_rng());
    assert_eq!(world.lives, 0);
}

// ── Through World::update ─────────────────────────────────────────────────────

#[test]
fn one_life_lost_over_many_overlapping_frames() {
    let mut world = make_world();
    let enemy = enemy_on_player(&world);
    world.enemies.push(enemy);
    let mut rng = seeded_rng();

    for _ in 0..10 {
        world.update(16.0, &Intents::new(), &mut rng);
    }

    assert_eq!(world.lives, 4);
    assert_eq!(world.player.state, PlayerState::Hit);
    assert!(world.enemies.is_empty());
}
