//! The mini-game state machine
//!
//! Owns the session, the falling balls, the catcher and every timer.
//! Drive it with `advance(now)` from the frame loop and `move_catcher` from
//! input; all mutation happens on that single thread of control.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::catcher::{Catcher, Direction};
use super::collision::{CatchZone, Contact, Verdict, check_contact, judge};
use super::problem::Problem;
use super::spawner;
use super::state::{FallingObject, Feedback, GamePhase, GameSession, ObjectId, StartMode};
use super::timers::{CancelToken, Fired, Scheduler, TimerKind};
use crate::config::GameConfig;
use crate::persistence::{ProgressSnapshot, SharedStore};
use crate::view::RenderSnapshot;

/// One mini-game instance
pub struct Game {
    config: GameConfig,
    store: SharedStore,
    rng: Pcg32,
    phase: GamePhase,
    session: GameSession,
    objects: Vec<FallingObject>,
    catcher: Catcher,
    scheduler: Scheduler,
    /// Canceled on teardown and game over
    session_token: CancelToken,
    /// Child of `session_token`, replaced whenever the problem changes
    cadence_token: CancelToken,
    feedback: Vec<Feedback>,
    next_id: u64,
    /// Latest time seen by `advance`
    now: f64,
}

impl Game {
    /// A config that fails [`GameConfig::validate`] is replaced by the defaults
    pub fn new(config: GameConfig, store: SharedStore, seed: u64) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Unusable game config ({e}), using defaults");
                GameConfig::default()
            }
        };
        let mut rng = Pcg32::seed_from_u64(seed);
        let session = GameSession::new(0, config.max_lives, Problem::generate(&mut rng));
        let catcher = Catcher::new(&config);
        let session_token = CancelToken::new();
        let cadence_token = session_token.child();
        Self {
            config,
            store,
            rng,
            phase: GamePhase::NotStarted,
            session,
            objects: Vec::new(),
            catcher,
            scheduler: Scheduler::new(),
            session_token,
            cadence_token,
            feedback: Vec::new(),
            next_id: 1,
            now: 0.0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn lives(&self) -> u8 {
        self.session.lives
    }

    pub fn problem(&self) -> &Problem {
        &self.session.problem
    }

    pub fn objects(&self) -> &[FallingObject] {
        &self.objects
    }

    pub fn catcher(&self) -> &Catcher {
        &self.catcher
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// Timers that will still fire
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Take the feedback emitted since the last call
    pub fn drain_feedback(&mut self) -> Vec<Feedback> {
        std::mem::take(&mut self.feedback)
    }

    /// Begin a session
    ///
    /// Resume falls back to a fresh game when the snapshot can't be read or
    /// holds an unusable life count. Balls are never restored.
    pub fn start(&mut self, mode: StartMode, now: f64) {
        self.teardown();
        self.now = self.now.max(now);
        self.catcher = Catcher::new(&self.config);

        let (score, lives) = match mode {
            StartMode::Fresh => self.fresh_progress(),
            StartMode::Resume => match ProgressSnapshot::load(&*self.store) {
                Ok(Some(saved))
                    if saved.saved_lives > 0 && saved.saved_lives <= self.config.max_lives =>
                {
                    log::info!(
                        "Resuming with score {} and {} lives",
                        saved.saved_score,
                        saved.saved_lives
                    );
                    (saved.saved_score, saved.saved_lives)
                }
                Ok(Some(saved)) => {
                    log::warn!("Saved lives {} unusable, starting fresh", saved.saved_lives);
                    self.fresh_progress()
                }
                Ok(None) => (0, self.config.max_lives),
                Err(e) => {
                    log::warn!("Can't load saved progress ({e}), starting fresh");
                    self.fresh_progress()
                }
            },
        };

        self.reset_session(score, lives);
        self.begin_running(now);
    }

    /// Play again after game over (or restart mid-game)
    pub fn retry(&mut self, now: f64) {
        self.teardown();
        self.now = self.now.max(now);
        self.reset_session(0, self.config.max_lives);
        self.begin_running(now);
    }

    /// Leave the mini-game
    pub fn exit(&mut self) {
        self.teardown();
        self.objects.clear();
        self.phase = GamePhase::NotStarted;
        log::info!("Left the game with score {}", self.session.score);
    }

    /// Stop every timer; nothing scheduled so far will fire
    pub fn teardown(&mut self) {
        self.session_token.cancel();
        self.scheduler.clear();
    }

    /// Steer the catcher
    pub fn move_catcher(&mut self, direction: Direction, now: f64) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.catcher.move_toward(direction, now);
    }

    /// Fire every timer due at or before `now`, each at its own due time
    pub fn advance(&mut self, now: f64) {
        while let Some(Fired { due, kind }) = self.scheduler.pop_due(now) {
            self.now = self.now.max(due);
            match kind {
                TimerKind::Spawn => self.on_spawn(due),
                TimerKind::CollisionPoll => self.on_poll(due),
                TimerKind::DropComplete(id) => self.on_drop_complete(id),
            }
        }
        self.now = self.now.max(now);
    }

    /// Advance to `now` and capture what to draw
    pub fn frame(&mut self, now: f64) -> RenderSnapshot {
        self.advance(now);
        let feedback = self.drain_feedback();
        RenderSnapshot::capture(self, now, feedback)
    }

    fn fresh_progress(&self) -> (u32, u8) {
        ProgressSnapshot::clear(&*self.store);
        (0, self.config.max_lives)
    }

    fn reset_session(&mut self, score: u32, lives: u8) {
        self.objects.clear();
        self.session = GameSession::new(score, lives, Problem::generate(&mut self.rng));
    }

    fn begin_running(&mut self, now: f64) {
        self.session_token = CancelToken::new();
        self.cadence_token = self.session_token.child();
        self.phase = GamePhase::Running;
        self.scheduler.schedule(
            now + self.config.spawn_period_ms,
            TimerKind::Spawn,
            &self.cadence_token,
        );
        self.scheduler.schedule(
            now + self.config.collision_poll_ms,
            TimerKind::CollisionPoll,
            &self.session_token,
        );
        self.save_progress();
        log::debug!("Running: {}", self.session.problem.prompt());
    }

    fn on_spawn(&mut self, due: f64) {
        if self.phase != GamePhase::Running {
            return;
        }
        let id = self.allocate_id();
        let object = spawner::spawn(&mut self.rng, &self.session.problem, id, due, &self.config);
        self.scheduler.schedule(
            object.drop.end_time(),
            TimerKind::DropComplete(id),
            &self.session_token,
        );
        self.objects.push(object);
        self.scheduler.schedule(
            due + self.config.spawn_period_ms,
            TimerKind::Spawn,
            &self.cadence_token,
        );
    }

    fn on_poll(&mut self, due: f64) {
        if self.phase != GamePhase::Running {
            return;
        }
        let zone = CatchZone::new(self.catcher.current_value(due), &self.config);
        let mut i = 0;
        while i < self.objects.len() && self.phase == GamePhase::Running {
            match check_contact(&self.objects[i], due, &zone, &self.config) {
                Some(contact) => {
                    let object = self.objects.remove(i);
                    self.resolve(&object, contact, due);
                }
                None => i += 1,
            }
        }
        if self.phase == GamePhase::Running {
            self.scheduler.schedule(
                due + self.config.collision_poll_ms,
                TimerKind::CollisionPoll,
                &self.session_token,
            );
        }
    }

    fn on_drop_complete(&mut self, id: ObjectId) {
        if self.phase != GamePhase::Running {
            return;
        }
        // Already caught or floored
        let Some(idx) = self.objects.iter().position(|o| o.id == id) else {
            return;
        };
        let object = self.objects.remove(idx);
        self.resolve(&object, Contact::Expired, self.now);
    }

    fn resolve(&mut self, object: &FallingObject, contact: Contact, now: f64) {
        let correct = object.is_correct(&self.session.problem);
        match judge(contact, correct) {
            Verdict::Score => {
                self.session.score += 1;
                self.feedback.push(Feedback::Pop {
                    position: object.position_at(now),
                });
                self.next_problem(now);
                self.save_progress();
            }
            Verdict::LoseLife => {
                let last = self.session.lose_life();
                self.feedback.push(Feedback::LifeLost {
                    lives: self.session.lives,
                });
                if contact != Contact::Expired {
                    self.feedback.push(Feedback::Shake);
                }
                self.save_progress();
                if last {
                    self.game_over();
                }
            }
            Verdict::NoEffect => {}
        }
    }

    fn next_problem(&mut self, now: f64) {
        self.session.problem = Problem::generate(&mut self.rng);
        self.feedback.push(Feedback::NewProblem);

        // Spawn cadence restarts with the new problem
        self.cadence_token.cancel();
        self.cadence_token = self.session_token.child();
        self.scheduler.schedule(
            now + self.config.spawn_period_ms,
            TimerKind::Spawn,
            &self.cadence_token,
        );
        log::debug!("New problem: {}", self.session.problem.prompt());
    }

    fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.teardown();
        self.feedback.push(Feedback::GameOver {
            final_score: self.session.score,
        });
        log::info!("Game over, final score {}", self.session.score);
    }

    fn allocate_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn save_progress(&self) {
        ProgressSnapshot::new(self.session.score, self.session.lives).save(&*self.store);
    }

    /// Put a ball with a known value and column into play (tests only)
    #[cfg(test)]
    fn drop_ball(&mut self, value: i32, x: f32, now: f64) -> ObjectId {
        use super::motion::Tween;

        let id = self.allocate_id();
        let drop = Tween::new(
            self.config.spawn_y,
            self.config.drop_target_y(),
            now,
            self.config.drop_duration_ms,
        );
        self.scheduler
            .schedule(drop.end_time(), TimerKind::DropComplete(id), &self.session_token);
        self.objects.push(FallingObject { id, value, x, drop });
        id
    }
}
