//! Controller integration tests: full turns driven through the public API.

mod common;

use std::time::Duration;

use common::ScriptedSource;
use swipe_math::controller::{CommandStatus, Direction, GameController, Hint, Snapshot};
use swipe_math::core::{EndReason, GameConfig, Status};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn secs(v: u64) -> Duration {
    Duration::from_secs(v)
}

/// Controller with commits applied inline.
fn instant(truths: &[bool]) -> GameController<ScriptedSource> {
    let config = GameConfig::default().with_settle_delay_ms(0);
    GameController::with_source(config, ScriptedSource::new(truths)).unwrap()
}

/// Answer the current problem correctly, or swipe right when there is none.
fn answer_right<S: swipe_math::ProblemSource>(game: &mut GameController<S>) -> CommandStatus {
    let direction = match game.snapshot().current_problem {
        Some(problem) => Direction::from_answer(problem.ground_truth),
        None => Direction::Right,
    };
    game.swipe(direction)
}

// =============================================================================
// Scoring Through the Controller
// =============================================================================

#[test]
fn test_instant_correct_answer() {
    let mut game = instant(&[true]);
    game.swipe(Direction::Right);

    let snap = game.snapshot();
    assert_eq!(snap.score, 3);
    assert_eq!(game.session().correct_streak(), 1);
    assert_eq!(snap.round_timer, secs(15));
    assert_eq!(snap.time_left, secs(15));
}

#[test]
fn test_correct_streak_of_three() {
    let mut game = instant(&[true]);
    for _ in 0..3 {
        game.swipe(Direction::Right);
    }

    let snap = game.snapshot();
    assert_eq!(snap.score, 3 + 3 + 8);
    assert_eq!(snap.round_timer, secs(16));
    assert_eq!(snap.time_left, secs(16));
    assert_eq!(game.session().correct_streak(), 3);
}

#[test]
fn test_streak_hints() {
    let mut game = instant(&[true]);
    game.swipe(Direction::Right);
    game.swipe(Direction::Right);
    game.take_hints();

    game.swipe(Direction::Right);
    let hints = game.take_hints();
    assert_eq!(
        hints.as_slice(),
        &[
            Hint::Feedback { correct: true },
            Hint::ScoreChange(8),
            Hint::StreakBonus {
                points: 5,
                timer_secs: 1
            },
            Hint::TimeChange(1),
        ]
    );
}

#[test]
fn test_wrong_streak_of_three() {
    let mut game = instant(&[true, true, true, true, true, false, false, false]);
    for _ in 0..5 {
        game.swipe(Direction::Right);
    }
    assert_eq!(game.snapshot().score, 30);
    assert_eq!(game.snapshot().round_timer, secs(19));
    assert_eq!(game.session().correct_streak(), 0);

    // Answer "true" to three false problems.
    for _ in 0..3 {
        game.swipe(Direction::Right);
    }

    let snap = game.snapshot();
    assert_eq!(snap.score, 30 - 3 - 3 - 8);
    assert_eq!(game.session().wrong_streak(), 3);
    // 19 -> 18 -> 17 -> 13
    assert_eq!(snap.round_timer, secs(13));
    assert_eq!(snap.time_left, secs(13));
    assert_eq!(snap.status, Status::Playing);
}

#[test]
fn test_reaching_max_ceiling_wins() {
    let mut game = instant(&[true]);
    for _ in 0..19 {
        game.swipe(Direction::Right);
    }
    assert_eq!(game.snapshot().round_timer, secs(28));
    assert_eq!(game.snapshot().score, 107);

    game.swipe(Direction::Right);
    let snap = game.snapshot();
    assert_eq!(snap.status, Status::GameOver(EndReason::Win));
    assert_eq!(snap.end_reason, Some(EndReason::Win));
    // 3 band points + 10 streak + 100 + ceil(28.0 * 10)
    assert_eq!(snap.score, 107 + 3 + 10 + 380);
    assert_eq!(snap.high_score, 500);
    assert!(snap.current_problem.is_none());
}

#[test]
fn test_wrong_answer_in_danger_zone_loses() {
    let mut game = instant(&[true, false]);
    game.swipe(Direction::Right);
    game.advance(secs(12));
    assert_eq!(game.snapshot().time_left, secs(3));

    game.swipe(Direction::Right);
    let snap = game.snapshot();
    assert_eq!(snap.status, Status::GameOver(EndReason::Lose));
    assert_eq!(snap.score, 3);
    assert_eq!(snap.round_timer, secs(15));
}

#[test]
fn test_negative_score_loses() {
    let mut game = instant(&[false]);
    game.swipe(Direction::Right);

    let snap = game.snapshot();
    assert_eq!(snap.status, Status::GameOver(EndReason::Lose));
    assert_eq!(snap.score, -3);
}

// =============================================================================
// Timers
// =============================================================================

#[test]
fn test_timeout_keeps_score() {
    let mut game = instant(&[true]);
    game.swipe(Direction::Right);
    game.advance(ms(14_900));
    assert_eq!(game.snapshot().status, Status::Playing);
    assert_eq!(game.snapshot().time_left, ms(100));

    game.advance(ms(100));
    let snap = game.snapshot();
    assert_eq!(snap.status, Status::GameOver(EndReason::Timeout));
    assert_eq!(snap.time_left, Duration::ZERO);
    assert_eq!(snap.score, 3);
    assert!(game
        .take_hints()
        .contains(&Hint::GameOver {
            reason: EndReason::Timeout,
            score: 3
        }));
}

#[test]
fn test_countdown_stops_after_game_over() {
    let mut game = instant(&[true]);
    game.advance(secs(15));
    assert!(!game.is_ticking());

    game.advance(secs(60));
    assert_eq!(game.snapshot().status, Status::GameOver(EndReason::Timeout));
    assert_eq!(game.now(), secs(75));
}

#[test]
fn test_settling_rejects_answers_and_freezes_countdown() {
    let config = GameConfig::default();
    let mut game = GameController::with_source(config, ScriptedSource::all_true()).unwrap();
    game.advance(ms(2_000));

    assert!(game.swipe(Direction::Right).is_accepted());
    assert!(game.snapshot().settling);
    assert_eq!(game.swipe(Direction::Right), CommandStatus::Ignored);

    game.advance(ms(200));
    assert_eq!(game.snapshot().time_left, secs(13));

    game.advance(ms(50));
    let snap = game.snapshot();
    assert!(!snap.settling);
    // 13/15 > 0.75
    assert_eq!(snap.score, 3);
    assert_eq!(snap.time_left, secs(15));
    assert_eq!(game.session().answered(), 1);
}

#[test]
fn test_settle_delay_from_config() {
    let config = GameConfig::default().with_settle_delay_ms(1_000);
    let mut game = GameController::with_source(config, ScriptedSource::all_true()).unwrap();

    game.swipe(Direction::Right);
    game.advance(ms(999));
    assert_eq!(game.snapshot().score, 0);
    game.advance(ms(1));
    assert_eq!(game.snapshot().score, 3);
}

// =============================================================================
// Deck
// =============================================================================

#[test]
fn test_always_a_current_problem_while_playing() {
    // Ceiling goes +1 on each 3-streak and -1 on each miss, so play never ends.
    let config = GameConfig::default();
    let mut game =
        GameController::with_source(config, ScriptedSource::new(&[true, true, true, false]))
            .unwrap();

    for turn in 0..200 {
        assert!(game.snapshot().current_problem.is_some(), "turn {turn}");
        assert!(game.session().remaining_ahead() >= 2, "turn {turn}");
        game.swipe(Direction::Right);
        game.advance(ms(250));
        assert_eq!(game.snapshot().status, Status::Playing, "turn {turn}");
    }

    assert_eq!(game.session().answered(), 200);
    assert_eq!(game.snapshot().score, 50 * 11);
}

#[test]
fn test_answered_problems_are_discarded() {
    let mut game = instant(&[true, true, true, false]);
    for turn in 1..=20u64 {
        game.swipe(Direction::Right);

        let dealt = game.source().dealt();
        assert_eq!((dealt - 10) % 5, 0, "turn {turn}");
        assert_eq!(game.session().answered(), turn);
        assert_eq!(game.session().deck().len() as u64, dealt - turn);
        assert!(game.session().deck().len() <= 10, "turn {turn}");
    }
}

#[test]
fn test_low_water_mark_of_one() {
    let mut config = GameConfig::default()
        .with_settle_delay_ms(0)
        .with_initial_deck_size(3);
    config.low_water_mark = 1;
    let mut game = GameController::with_source(config, ScriptedSource::all_true()).unwrap();

    for turn in 0..12 {
        let problem = game.snapshot().current_problem;
        assert_eq!(problem.map(|p| p.id.raw()), Some(turn), "turn {turn}");
        game.swipe(Direction::Right);
        assert_eq!(game.snapshot().status, Status::Playing, "turn {turn}");
    }
}

// =============================================================================
// Pause and Restart
// =============================================================================

#[test]
fn test_pause_replaces_current_problem() {
    let mut game = instant(&[true]);
    let before = game.snapshot().current_problem.unwrap();

    assert!(game.pause().is_accepted());
    let after = game.snapshot().current_problem.unwrap();
    assert_ne!(before.id, after.id);
    assert_eq!(game.source().dealt(), 11);
    assert_eq!(game.session().deck().len(), 10);

    // Swipes do nothing while paused.
    assert_eq!(game.swipe(Direction::Right), CommandStatus::Ignored);
    game.advance(secs(30));
    assert_eq!(game.snapshot().time_left, secs(15));

    game.unpause();
    game.swipe(Direction::Right);
    assert_eq!(game.snapshot().score, 3);
}

#[test]
fn test_pause_during_settle_commits_first() {
    let mut game =
        GameController::with_source(GameConfig::default(), ScriptedSource::all_true()).unwrap();
    game.swipe(Direction::Right);
    game.pause();

    let snap = game.snapshot();
    assert_eq!(snap.status, Status::Paused);
    assert_eq!(snap.score, 3);
    assert!(!snap.settling);
}

#[test]
fn test_pause_during_losing_settle_ends_game() {
    let mut game =
        GameController::with_source(GameConfig::default(), ScriptedSource::all_false()).unwrap();
    game.swipe(Direction::Right);

    assert_eq!(game.pause(), CommandStatus::Ignored);
    assert_eq!(game.snapshot().status, Status::GameOver(EndReason::Lose));
}

#[test]
fn test_restart_resets_everything_but_high_score() {
    let mut game = instant(&[true, true, false]);
    game.swipe(Direction::Right);
    game.swipe(Direction::Right);
    game.swipe(Direction::Right);
    game.advance(secs(2));
    assert_eq!(game.snapshot().score, 3);

    game.restart();
    let snap = game.snapshot();
    assert_eq!(snap.score, 0);
    assert_eq!(snap.high_score, 6);
    assert_eq!(snap.round_timer, secs(15));
    assert_eq!(snap.time_left, secs(15));
    assert_eq!(snap.status, Status::Playing);
    assert_eq!(game.session().correct_streak(), 0);
    assert_eq!(game.session().wrong_streak(), 0);
    assert_eq!(game.session().deck().len(), 10);
    assert_eq!(game.session().answered(), 0);
}

#[test]
fn test_restart_cancels_pending_restart() {
    let config = GameConfig::default();
    let mut game = GameController::with_source(config, ScriptedSource::all_true()).unwrap();
    game.advance(secs(15));
    game.swipe(Direction::Left);

    game.restart();
    game.swipe(Direction::Right);
    game.advance(ms(250));
    assert_eq!(game.snapshot().score, 3);
    game.advance(secs(1));

    // The deferred restart was cancelled, so the score survives.
    assert_eq!(game.snapshot().score, 3);
}

// =============================================================================
// Game Over
// =============================================================================

#[test]
fn test_dismiss_right_restarts_immediately() {
    let mut game = instant(&[false]);
    game.swipe(Direction::Right);
    assert_eq!(game.snapshot().status, Status::GameOver(EndReason::Lose));

    assert!(game.swipe(Direction::Right).is_accepted());
    let snap = game.snapshot();
    assert_eq!(snap.status, Status::Playing);
    assert_eq!(snap.score, 0);
    assert!(game.take_hints().contains(&Hint::Restarted));
}

#[test]
fn test_dismiss_left_lingers_then_restarts() {
    let config = GameConfig::default();
    let mut game = GameController::with_source(config, ScriptedSource::all_true()).unwrap();
    game.advance(secs(15));

    game.swipe(Direction::Left);
    game.advance(ms(249));
    assert_eq!(game.snapshot().status, Status::GameOver(EndReason::Timeout));

    game.advance(ms(1));
    assert_eq!(game.snapshot().status, Status::Playing);
    assert!(game.is_ticking());
}

#[test]
fn test_dismiss_ignored_while_playing() {
    let mut game = instant(&[true]);
    assert_eq!(game.dismiss_game_over(Direction::Right), CommandStatus::Ignored);
    assert_eq!(game.acknowledge_high_score(), CommandStatus::Ignored);
}

// =============================================================================
// Determinism and Serialization
// =============================================================================

#[test]
fn test_same_seed_same_game() {
    let config = GameConfig::default().with_seed(2024);
    let mut a = GameController::new(config.clone()).unwrap();
    let mut b = GameController::new(config).unwrap();

    for i in 0..30 {
        if i % 4 == 3 {
            a.swipe(Direction::Left);
            b.swipe(Direction::Left);
        } else {
            answer_right(&mut a);
            answer_right(&mut b);
        }
        a.advance(ms(700));
        b.advance(ms(700));
        assert_eq!(a.snapshot(), b.snapshot());
    }
}

#[test]
fn test_snapshot_serializes() {
    let mut game = GameController::new(GameConfig::default().with_seed(5)).unwrap();
    answer_right(&mut game);
    game.advance(ms(250));

    let snap = game.snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    let back: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snap, back);
}
