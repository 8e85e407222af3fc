//! The game controller.

use std::time::Duration;

use smallvec::SmallVec;
use tracing::{debug, info};

use super::hints::Hint;
use super::scheduler::{Scheduler, TimerId, TimerKind};
use super::{CommandStatus, Direction, Snapshot};
use crate::core::{ConfigError, EndReason, GameConfig, GameRng, Problem, Session, Status};
use crate::problems::{ProblemGenerator, ProblemSource};
use crate::rules::{ScoringEngine, TurnOutcome};

/// An evaluated answer waiting for its settle delay.
#[derive(Clone, Debug)]
struct InFlight {
    outcome: TurnOutcome,
    timer: TimerId,
}

/// Owns the session and sequences turns.
///
/// ## Turn lifecycle
///
/// 1. `submit_answer` evaluates the answer with the scoring engine, emits
///    feedback hints and suspends the countdown.
/// 2. After the settle delay the outcome is committed: score, timers and
///    streaks change, the deck advances and is replenished.
/// 3. The countdown resumes, or the game ends.
///
/// While a turn is settling, further answers are ignored and no tick fires.
pub struct GameController<S = ProblemGenerator> {
    engine: ScoringEngine,
    source: S,
    session: Session,
    scheduler: Scheduler,
    in_flight: Option<InFlight>,
    hints: SmallVec<[Hint; 4]>,
}

impl GameController<ProblemGenerator> {
    /// Create a controller with the random problem generator.
    ///
    /// Seeds from `config.seed`, or from entropy when unset.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self::with_source(config, ProblemGenerator::new(rng))
    }
}

impl<S: ProblemSource> GameController<S> {
    /// Create a controller drawing problems from `source`.
    pub fn with_source(config: GameConfig, mut source: S) -> Result<Self, ConfigError> {
        let engine = ScoringEngine::new(config)?;
        let deck = deal(&mut source, engine.config().initial_deck_size);
        let session = Session::new(engine.config(), deck);

        let mut controller = Self {
            engine,
            source,
            session,
            scheduler: Scheduler::new(),
            in_flight: None,
            hints: SmallVec::new(),
        };
        controller.schedule_tick();

        info!(
            round_timer = ?controller.session.round_timer(),
            deck = controller.session.deck().len(),
            "Session started"
        );
        Ok(controller)
    }

    // === Accessors ===

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Virtual time elapsed since the controller was created.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Whether an answer is waiting for its settle delay.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the countdown is currently running.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_pending(TimerKind::Tick)
    }

    /// Read-only view for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_problem: self.session.current_problem().cloned(),
            score: self.session.score(),
            high_score: self.session.high_score(),
            time_left: self.session.time_left(),
            round_timer: self.session.round_timer(),
            status: self.session.status(),
            end_reason: self.session.status().end_reason(),
            settling: self.is_settling(),
        }
    }

    /// Drain pending presentation hints.
    pub fn take_hints(&mut self) -> SmallVec<[Hint; 4]> {
        std::mem::take(&mut self.hints)
    }

    // === Commands ===

    /// Answer the current problem (`true` = right swipe).
    ///
    /// Ignored while a turn is settling or when no problem is current.
    pub fn submit_answer(&mut self, answer: bool) -> CommandStatus {
        if self.in_flight.is_some() {
            debug!(answer, "Answer ignored: turn still settling");
            return CommandStatus::Ignored;
        }
        if self.session.status() != Status::Playing {
            debug!(answer, status = ?self.session.status(), "Answer ignored: not playing");
            return CommandStatus::Ignored;
        }

        if self.deck_exhausted() {
            self.enter_checkpoint();
            return CommandStatus::Accepted;
        }

        let Some(outcome) = self.engine.evaluate_answer(&self.session, answer) else {
            return CommandStatus::Ignored;
        };

        debug!(
            problem = %outcome.problem,
            answer,
            correct = outcome.correct,
            score_delta = outcome.score_delta,
            timer_delta = outcome.timer_ceiling_delta,
            end = ?outcome.end_game,
            "Answer evaluated"
        );

        self.scheduler.cancel_kind(TimerKind::Tick);
        self.push_turn_hints(&outcome);

        let delay = self.config().settle_delay();
        if delay.is_zero() {
            self.commit(outcome);
        } else {
            let timer = self.scheduler.schedule(delay, TimerKind::Settle);
            self.in_flight = Some(InFlight { outcome, timer });
        }

        CommandStatus::Accepted
    }

    /// Freeze the countdown and swap the current problem for a fresh one.
    ///
    /// A settling turn is committed first, so it is never lost and never
    /// lands on a paused session.
    pub fn pause(&mut self) -> CommandStatus {
        if self.session.status() != Status::Playing {
            return CommandStatus::Ignored;
        }

        self.flush_in_flight();
        if self.session.status() != Status::Playing {
            // The flushed turn ended the game.
            return CommandStatus::Ignored;
        }

        self.scheduler.cancel_kind(TimerKind::Tick);
        self.session.set_status(Status::Paused);

        let replacement = self.source.generate();
        let new = replacement.id;
        if let Some(old) = self.session.replace_current(replacement) {
            self.hints.push(Hint::ProblemReplaced { old: old.id, new });
        }

        info!(time_left = ?self.session.time_left(), "Paused");
        CommandStatus::Accepted
    }

    /// Resume the countdown.
    pub fn unpause(&mut self) -> CommandStatus {
        if self.session.status() != Status::Paused {
            return CommandStatus::Ignored;
        }

        self.session.set_status(Status::Playing);
        self.schedule_tick();

        info!(time_left = ?self.session.time_left(), "Unpaused");
        CommandStatus::Accepted
    }

    /// Toggle between playing and paused.
    pub fn toggle_pause(&mut self) -> CommandStatus {
        match self.session.status() {
            Status::Paused => self.unpause(),
            _ => self.pause(),
        }
    }

    /// Full reset: fresh deck, zero score and streaks, initial timers.
    ///
    /// Cancels every pending timer and discards a settling turn. The high
    /// score carries over.
    pub fn restart(&mut self) -> CommandStatus {
        self.scheduler.cancel_all();
        self.in_flight = None;

        let high_score = self.session.high_score();
        let size = self.config().initial_deck_size;
        let deck = deal(&mut self.source, size);
        self.session = Session::new(self.engine.config(), deck).with_high_score(high_score);
        self.schedule_tick();
        self.hints.push(Hint::Restarted);

        info!(high_score, "Session restarted");
        CommandStatus::Accepted
    }

    /// Acknowledge the high-score checkpoint and keep playing.
    pub fn acknowledge_high_score(&mut self) -> CommandStatus {
        if self.session.status() != Status::AwaitingHighScoreAck {
            return CommandStatus::Ignored;
        }

        let size = self.config().initial_deck_size;
        let batch = deal(&mut self.source, size);
        self.session.append(batch);
        self.session.set_status(Status::Playing);
        self.session.refill_time();
        self.schedule_tick();

        info!(deck = self.session.deck().len(), "High score acknowledged");
        CommandStatus::Accepted
    }

    /// Dismiss the game-over card.
    ///
    /// Right restarts at once. Left keeps the final display for the settle
    /// delay, then restarts.
    pub fn dismiss_game_over(&mut self, direction: Direction) -> CommandStatus {
        if !matches!(self.session.status(), Status::GameOver(_))
            || self.scheduler.is_pending(TimerKind::Restart)
        {
            return CommandStatus::Ignored;
        }

        let delay = self.config().settle_delay();
        if direction == Direction::Right || delay.is_zero() {
            return self.restart();
        }

        self.scheduler.schedule(delay, TimerKind::Restart);
        debug!(?delay, "Restart scheduled");
        CommandStatus::Accepted
    }

    /// Route a swipe according to the current status.
    pub fn swipe(&mut self, direction: Direction) -> CommandStatus {
        match self.session.status() {
            Status::Playing => self.submit_answer(direction.as_answer()),
            Status::AwaitingHighScoreAck if direction == Direction::Right => {
                self.acknowledge_high_score()
            }
            Status::GameOver(_) => self.dismiss_game_over(direction),
            Status::AwaitingHighScoreAck | Status::Paused => CommandStatus::Ignored,
        }
    }

    /// Let `elapsed` time pass, firing every timer that falls due.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.scheduler.now() + elapsed;

        while let Some(timer) = self.scheduler.pop_due(until) {
            match timer.kind {
                TimerKind::Tick => self.on_tick(),
                TimerKind::Settle => self.on_settle(timer.id),
                TimerKind::Restart => {
                    self.restart();
                }
            }
        }

        self.scheduler.advance_to(until);
    }

    // === Internals ===

    fn schedule_tick(&mut self) {
        if self.session.status() == Status::Playing
            && self.in_flight.is_none()
            && !self.scheduler.is_pending(TimerKind::Tick)
        {
            let interval = self.config().tick_interval();
            self.scheduler.schedule(interval, TimerKind::Tick);
        }
    }

    fn on_tick(&mut self) {
        let interval = self.config().tick_interval();
        let Some(tick) = self.engine.evaluate_tick(&self.session, interval) else {
            return;
        };

        self.session.set_time_left(tick.time_left_after);

        match tick.end_game {
            Some(reason) => self.end_game(reason),
            None => self.schedule_tick(),
        }
    }

    fn on_settle(&mut self, timer: TimerId) {
        if self.in_flight.as_ref().is_some_and(|f| f.timer == timer) {
            if let Some(in_flight) = self.in_flight.take() {
                self.commit(in_flight.outcome);
            }
        }
    }

    fn flush_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            self.scheduler.cancel(in_flight.timer);
            self.commit(in_flight.outcome);
        }
    }

    fn commit(&mut self, outcome: TurnOutcome) {
        if outcome.end_game.is_none() {
            self.replenish();
        }

        self.session.apply_turn(self.engine.config(), &outcome);

        match outcome.end_game {
            Some(reason) => self.end_game(reason),
            None => self.schedule_tick(),
        }
    }

    fn end_game(&mut self, reason: EndReason) {
        self.scheduler.cancel_all();
        self.in_flight = None;
        self.session.end(reason);

        let score = self.session.score();
        self.hints.push(Hint::GameOver { reason, score });
        info!(%reason, score, high_score = self.session.high_score(), "Game over");
    }

    /// Top up the deck when the unconsumed tail runs low.
    fn replenish(&mut self) {
        let config = self.engine.config();
        let (batch, low_water) = (config.refill_batch, config.low_water_mark);

        if batch > 0 && self.session.remaining_ahead() < low_water {
            let problems = deal(&mut self.source, batch);
            let added = problems.len();
            self.session.append(problems);
            debug!(added, deck = self.session.deck().len(), "Deck replenished");
        }
    }

    fn deck_exhausted(&self) -> bool {
        self.config().refill_batch == 0 && self.session.remaining_ahead() == 0
    }

    fn enter_checkpoint(&mut self) {
        self.scheduler.cancel_kind(TimerKind::Tick);
        self.session.set_status(Status::AwaitingHighScoreAck);

        let high_score = self.session.high_score();
        self.hints.push(Hint::HighScoreCheckpoint { high_score });
        info!(high_score, "Deck exhausted, showing high score");
    }

    fn push_turn_hints(&mut self, outcome: &TurnOutcome) {
        self.hints.push(Hint::Feedback {
            correct: outcome.correct,
        });
        if outcome.score_delta != 0 {
            self.hints.push(Hint::ScoreChange(outcome.score_delta));
        }
        for rule in &outcome.fired_rules {
            self.hints.push(Hint::StreakBonus {
                points: rule.score,
                timer_secs: rule.timer_secs,
            });
        }
        if outcome.timer_ceiling_delta != 0 {
            self.hints.push(Hint::TimeChange(outcome.timer_ceiling_delta));
        }
    }
}

/// Draw `count` problems, falling back to a single one if the source hands
/// back an empty batch, so a deal always leaves a problem to show.
fn deal<S: ProblemSource>(source: &mut S, count: usize) -> Vec<Problem> {
    let mut batch = source.generate_batch(count);
    if batch.is_empty() {
        batch.push(source.generate());
    }
    batch
}
