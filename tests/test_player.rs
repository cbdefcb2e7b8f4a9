use night_runner::config::PlayerConfig;
use night_runner::entities::*;
use night_runner::player::*;

const GROUND_Y: f32 = 460.0;

fn grounded() -> Conditions {
    Conditions {
        on_ground: true,
        ..Conditions::default()
    }
}

fn airborne() -> Conditions {
    Conditions::default()
}

fn keys(list: &[Intent]) -> Intents {
    list.iter().copied().collect()
}

fn make_player() -> Player {
    Player::new(&PlayerConfig::default(), GROUND_Y)
}

fn one_frame() -> Tick {
    Tick::new(REFERENCE_FRAME_MS, 0.0)
}

// ── transition: grounded states ───────────────────────────────────────────────

#[test]
fn sitting_with_direction_starts_running() {
    let next = transition(PlayerState::Sitting, &keys(&[Intent::Right]), &grounded());
    assert_eq!(next, Some(PlayerState::Running));
}

#[test]
fn running_without_direction_sits() {
    let next = transition(PlayerState::Running, &Intents::new(), &grounded());
    assert_eq!(next, Some(PlayerState::Sitting));
}

#[test]
fn up_beats_roll_on_the_ground() {
    let next = transition(
        PlayerState::Running,
        &keys(&[Intent::Up, Intent::Roll]),
        &grounded(),
    );
    assert_eq!(next, Some(PlayerState::Jumping));
}

#[test]
fn roll_from_sitting() {
    let next = transition(PlayerState::Sitting, &keys(&[Intent::Roll]), &grounded());
    assert_eq!(next, Some(PlayerState::Rolling));
}

// ── transition: airborne states ───────────────────────────────────────────────

#[test]
fn jumping_turns_to_falling_when_descending() {
    let cond = Conditions {
        descending: true,
        ..airborne()
    };
    assert_eq!(
        transition(PlayerState::Jumping, &Intents::new(), &cond),
        Some(PlayerState::Falling)
    );
    assert_eq!(transition(PlayerState::Jumping, &Intents::new(), &airborne()), None);
}

#[test]
fn down_in_the_air_dives() {
    for state in [PlayerState::Jumping, PlayerState::Falling, PlayerState::Rolling] {
        let next = transition(state, &keys(&[Intent::Down, Intent::Roll]), &airborne());
        assert_eq!(next, Some(PlayerState::Diving), "from {state:?}");
    }
}

#[test]
fn down_alone_in_the_air_does_not_dive() {
    for state in [PlayerState::Jumping, PlayerState::Falling] {
        let next = transition(state, &keys(&[Intent::Down]), &airborne());
        assert_ne!(next, Some(PlayerState::Diving), "from {state:?}");
    }
    let next = transition(PlayerState::Rolling, &keys(&[Intent::Down]), &airborne());
    assert_eq!(next, Some(PlayerState::Falling));
}

#[test]
fn down_on_the_ground_does_not_dive() {
    let next = transition(PlayerState::Falling, &keys(&[Intent::Down]), &grounded());
    assert_eq!(next, Some(PlayerState::Sitting));
}

#[test]
fn falling_lands_running_when_direction_held() {
    let next = transition(PlayerState::Falling, &keys(&[Intent::Left]), &grounded());
    assert_eq!(next, Some(PlayerState::Running));
}

#[test]
fn releasing_roll_in_the_air_falls() {
    assert_eq!(
        transition(PlayerState::Rolling, &Intents::new(), &airborne()),
        Some(PlayerState::Falling)
    );
    assert_eq!(
        transition(PlayerState::Rolling, &Intents::new(), &grounded()),
        Some(PlayerState::Sitting)
    );
    assert_eq!(
        transition(PlayerState::Rolling, &keys(&[Intent::Roll]), &grounded()),
        None
    );
}

#[test]
fn diving_holds_until_ground() {
    assert_eq!(transition(PlayerState::Diving, &keys(&[Intent::Up]), &airborne()), None);
    assert_eq!(
        transition(PlayerState::Diving, &keys(&[Intent::Right]), &grounded()),
        Some(PlayerState::Running)
    );
}

// ── transition: damage ────────────────────────────────────────────────────────

#[test]
fn hurt_overrides_everything_except_hit() {
    let cond = Conditions {
        hurt: true,
        ..grounded()
    };
    for state in PlayerState::ALL {
        let next = transition(state, &keys(&[Intent::Up, Intent::Roll]), &cond);
        if state == PlayerState::Hit {
            assert_eq!(next, None);
        } else {
            assert_eq!(next, Some(PlayerState::Hit), "from {state:?}");
        }
    }
}

#[test]
fn hit_waits_for_recovery() {
    assert_eq!(transition(PlayerState::Hit, &keys(&[Intent::Right]), &grounded()), None);

    let recovered = Conditions {
        hit_recovered: true,
        ..grounded()
    };
    assert_eq!(
        transition(PlayerState::Hit, &Intents::new(), &recovered),
        Some(PlayerState::Sitting)
    );

    let recovered_in_air = Conditions {
        hit_recovered: true,
        ..airborne()
    };
    assert_eq!(
        transition(PlayerState::Hit, &Intents::new(), &recovered_in_air),
        Some(PlayerState::Falling)
    );
}

#[test]
fn transition_never_reports_the_current_state() {
    let intent_sets = [
        vec![],
        vec![Intent::Left],
        vec![Intent::Up],
        vec![Intent::Down],
        vec![Intent::Roll],
        vec![Intent::Right, Intent::Roll],
        vec![Intent::Down, Intent::Roll],
    ];
    for state in PlayerState::ALL {
        for set in &intent_sets {
            for on_ground in [true, false] {
                for descending in [true, false] {
                    let cond = Conditions {
                        on_ground,
                        descending,
                        hurt: false,
                        hit_recovered: true,
                    };
                    let intents = keys(set);
                    let first = transition(state, &intents, &cond);
                    assert_ne!(first, Some(state));
                    assert_eq!(first, transition(state, &intents, &cond));
                }
            }
        }
    }
}

// ── speed factors ─────────────────────────────────────────────────────────────

#[test]
fn speed_factors_by_state() {
    assert_eq!(PlayerState::Sitting.speed_factor(), 0.0);
    assert_eq!(PlayerState::Hit.speed_factor(), 0.0);
    assert_eq!(PlayerState::Running.speed_factor(), 0.5);
    assert_eq!(PlayerState::Falling.speed_factor(), 0.5);
    assert_eq!(PlayerState::Rolling.speed_factor(), 1.0);
    assert!(PlayerState::Diving.is_attacking());
    assert!(!PlayerState::Running.is_attacking());
}

// ── Player::update ────────────────────────────────────────────────────────────

#[test]
fn new_player_sits_on_the_ground() {
    let p = make_player();
    assert_eq!(p.state, PlayerState::Sitting);
    assert!(p.on_ground());
    assert!((p.body.bottom() - GROUND_Y).abs() < 1e-3);
    assert_eq!(p.vy, 0.0);
}

#[test]
fn jump_rises_falls_and_lands() {
    let mut p = make_player();
    let change = p.update(&keys(&[Intent::Up]), &one_frame(), false);
    assert_eq!(
        change,
        Some(StateChange {
            from: PlayerState::Sitting,
            to: PlayerState::Jumping
        })
    );
    assert!(p.vy < 0.0);

    let mut seen = vec![p.state];
    let mut min_y = p.body.y;
    for _ in 0..200 {
        p.update(&Intents::new(), &one_frame(), false);
        min_y = min_y.min(p.body.y);
        if seen.last() != Some(&p.state) {
            seen.push(p.state);
        }
    }
    assert_eq!(
        seen,
        vec![PlayerState::Jumping, PlayerState::Falling, PlayerState::Sitting]
    );
    assert!(min_y < GROUND_Y - 200.0);
    assert!(p.on_ground());
    assert_eq!(p.vy, 0.0);
}

#[test]
fn dive_sets_velocity_and_ends_on_landing() {
    let mut p = make_player();
    p.update(&keys(&[Intent::Up]), &one_frame(), false);
    let change = p.update(&keys(&[Intent::Down, Intent::Roll]), &one_frame(), false);
    assert_eq!(change.map(|c| c.to), Some(PlayerState::Diving));
    assert_eq!(p.vy, PlayerConfig::default().dive_velocity);

    let mut landing = None;
    for _ in 0..100 {
        if let Some(change) = p.update(&Intents::new(), &one_frame(), false) {
            landing = Some(change);
            break;
        }
    }
    let landing = landing.expect("dive never landed");
    assert_eq!(landing.from, PlayerState::Diving);
    assert_eq!(landing.to, PlayerState::Sitting);
    assert!(p.on_ground());
}

#[test]
fn hit_recovers_after_recovery_time() {
    let mut p = make_player();
    p.update(&Intents::new(), &Tick::new(0.0, 0.0), true);
    assert_eq!(p.state, PlayerState::Hit);

    let step = Tick::new(100.0, 0.0);
    for _ in 0..4 {
        p.update(&Intents::new(), &step, false);
        assert_eq!(p.state, PlayerState::Hit);
    }
    p.update(&Intents::new(), &step, false);
    assert_eq!(p.state, PlayerState::Sitting);
}

#[test]
fn hurt_again_while_hit_does_not_reset_recovery() {
    let mut p = make_player();
    p.update(&Intents::new(), &Tick::new(0.0, 0.0), true);
    p.update(&Intents::new(), &Tick::new(300.0, 0.0), true);
    assert_eq!(p.state, PlayerState::Hit);
    assert_eq!(p.hit_timer, 300.0);
}

#[test]
fn rolling_can_jump_without_leaving_roll() {
    let mut p = make_player();
    p.update(&keys(&[Intent::Roll]), &one_frame(), false);
    assert_eq!(p.state, PlayerState::Rolling);

    p.update(&keys(&[Intent::Roll, Intent::Up]), &one_frame(), false);
    assert_eq!(p.state, PlayerState::Rolling);
    assert!(p.vy < 0.0);
}

#[test]
fn zero_delta_does_not_move_or_animate() {
    let mut p = make_player();
    p.update(&keys(&[Intent::Up]), &one_frame(), false);
    let before = p.body;
    let frame = p.frame;
    p.update(&Intents::new(), &Tick::new(0.0, 0.0), false);
    assert_eq!(p.body, before);
    assert_eq!(p.frame, frame);
}

#[test]
fn animation_wraps_within_frame_count() {
    let mut p = make_player();
    for _ in 0..500 {
        p.update(&keys(&[Intent::Right]), &one_frame(), false);
        assert!(p.frame < p.state.frame_count());
    }
    assert_eq!(p.state, PlayerState::Running);
}
