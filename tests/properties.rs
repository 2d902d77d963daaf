use glam::Vec2;
use proptest::prelude::*;
use rink_hockey::consts::*;
use rink_hockey::sim::{
    Intent, MatchConfig, MatchState, Puck, PuckPhysics, RinkGeometry, SimulationState, TickInput,
    Tuning, advance, resolve_goal, resolve_wall_collision, tick,
};

fn intent() -> impl Strategy<Value = Intent> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(up, down, left, right)| Intent {
            up,
            down,
            left,
            right,
        },
    )
}

fn velocity(max: f32) -> impl Strategy<Value = Vec2> {
    (-max..max, -max..max).prop_map(|(x, y)| Vec2::new(x, y))
}

proptest! {
    /// Property: paddles never leave their own half, whoever drives them
    #[test]
    fn prop_paddles_stay_on_their_half(
        seed in any::<u64>(),
        puck_velocity in velocity(1.5),
        ai_home in any::<bool>(),
        ai_away in any::<bool>(),
        intents in prop::collection::vec((intent(), intent()), 1..200),
    ) {
        let mut state = SimulationState::new(seed, Tuning::default(), 3);
        state.ai_enabled = ai_away;
        state.puck.velocity = puck_velocity;
        let rink = state.tuning.rink.clone();
        let (_, y_max) = rink.paddle_y_range();

        for (home, away) in intents {
            let input = TickInput {
                home,
                away,
                idle_mode: ai_home,
                ..Default::default()
            };
            tick(&mut state, &input, SIM_DT);

            prop_assert!(state.home.position.x <= -rink.center_margin);
            prop_assert!(state.home.position.x >= -(rink.half_width - rink.paddle_margin));
            prop_assert!(state.away.position.x >= rink.center_margin);
            prop_assert!(state.away.position.x <= rink.half_width - rink.paddle_margin);
            prop_assert!(state.home.position.y.abs() <= y_max);
            prop_assert!(state.away.position.y.abs() <= y_max);
        }
    }

    /// Property: friction strictly slows a moving puck and stops it in bounded ticks
    #[test]
    fn prop_friction_reaches_rest(v in velocity(3.0)) {
        let physics = PuckPhysics::default();
        let mut puck = Puck::new(Vec2::ZERO, v);

        // 3.0 * 0.98^n < 0.01 well before 400 ticks
        for _ in 0..400 {
            let before = puck.speed();
            advance(&mut puck, &physics);
            if before > 0.0 {
                prop_assert!(puck.speed() < before);
            } else {
                prop_assert!(puck.is_at_rest());
            }
        }
        prop_assert!(puck.is_at_rest());
    }

    /// Property: wall bounces never add speed and flip the normal component
    #[test]
    fn prop_wall_bounce_damps_and_reflects(
        x in -16.0f32..16.0,
        y in -8.0f32..8.0,
        v in velocity(2.0),
    ) {
        let rink = RinkGeometry::default();
        let physics = PuckPhysics::default();
        let mut puck = Puck::new(Vec2::new(x, y), v);
        let hit_x = x.abs() > rink.puck_limit_x() && !rink.in_goal_mouth(y);
        let hit_y = y.abs() > rink.puck_limit_y();

        let hit = resolve_wall_collision(&mut puck, &rink, &physics);

        prop_assert_eq!(hit, hit_x || hit_y);
        prop_assert!(puck.speed() <= v.length() + 1e-6);
        if hit_x {
            prop_assert!(puck.velocity.x * v.x <= 0.0);
            prop_assert!(puck.position.x.abs() <= rink.puck_limit_x());
        } else {
            prop_assert_eq!(puck.velocity.x, v.x);
        }
        if hit_y {
            prop_assert!(puck.velocity.y * v.y <= 0.0);
            prop_assert!(puck.position.y.abs() <= rink.puck_limit_y());
        } else {
            prop_assert_eq!(puck.velocity.y, v.y);
        }
    }

    /// Property: a goal scores for exactly one side and re-centers the puck
    #[test]
    fn prop_goal_scores_exactly_one_side(
        x in -17.0f32..17.0,
        y in -7.0f32..7.0,
        v in velocity(1.0),
    ) {
        let rink = RinkGeometry::default();
        let mut match_state = MatchState::new(&MatchConfig::default(), 1);
        let mut puck = Puck::new(Vec2::new(x, y), v);

        match resolve_goal(&mut puck, &rink) {
            Some(side) => {
                prop_assert!(match_state.record_goal(side));
                let score = match_state.score;
                prop_assert_eq!(score.home + score.away, 1);
                prop_assert_eq!(score.get(side), 1);
                prop_assert_eq!(puck, Puck::default());
                // Sign of x decides whose goal it was
                prop_assert_eq!(x > 0.0, side == rink_hockey::sim::Side::Home);
            }
            None => {
                prop_assert_eq!(puck.position, Vec2::new(x, y));
                prop_assert!(x.abs() <= rink.goal_line_x() || !rink.in_goal_mouth(y));
            }
        }
    }

    /// Property: match clocks never run backwards or below zero
    #[test]
    fn prop_match_clock_monotonic(steps in prop::collection::vec(-0.5f32..2.0, 1..300)) {
        let config = MatchConfig {
            period_duration: 3.0,
            intermission_duration: 1.0,
            ..Default::default()
        };
        let mut ms = MatchState::new(&config, 1);

        for dt in steps {
            let before = (ms.phase, ms.period_time_remaining, ms.intermission_time_remaining);
            ms.advance_time(dt);
            prop_assert!(ms.period_time_remaining >= 0.0);
            prop_assert!(ms.intermission_time_remaining >= 0.0);
            prop_assert!(ms.current_period <= ms.max_periods);
            if ms.phase == before.0 {
                prop_assert!(ms.period_time_remaining <= before.1);
                prop_assert!(ms.intermission_time_remaining <= before.2);
            }
        }
    }
}
