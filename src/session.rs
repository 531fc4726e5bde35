use log::{info, warn};
use serde::Serialize;
use web_time::{Duration, Instant};

use crate::ai::{HeuristicSelector, MoveSelector, SessionRng};
use crate::config::SessionConfig;
use crate::error::{ConfigError, SessionError};
use crate::game::{DerivedState, derive_state};
use crate::history::History;
use crate::persistence::{MemoryStore, PersistedState, Persistence};
use crate::timer::Countdown;
use crate::types::{BoardState, Player, SessionView};

/// Something that happened during [`GameSession::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    AiMoved { column: usize, row: usize },
    CelebrationEnded,
}

/// Stateful controller the presentation layer drives.
///
/// The move list is the only game state; board and outcome are re-derived
/// after every change. Timed behavior (AI reply delay, win celebration) is
/// expressed as deadlines that fire from [`GameSession::tick`].
pub struct GameSession {
    config: SessionConfig,
    moves: Vec<usize>,
    one_player: bool,
    ai_player: Player,
    state: DerivedState,
    history: History,
    store: Box<dyn Persistence>,
    selector: Box<dyn MoveSelector>,
    ai_timer: Countdown,
    celebration_timer: Countdown,
    celebrating: bool,
    draw_modal_open: bool,
}

impl GameSession {
    /// Restores the saved game from `store` and arms whatever timers the
    /// restored position calls for.
    pub fn new(
        config: SessionConfig,
        store: Box<dyn Persistence>,
        selector: Box<dyn MoveSelector>,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut session = Self::assemble(config, store, selector);
        session.refresh(now);
        Ok(session)
    }

    /// Default geometry, in-memory store and a clock-seeded heuristic AI.
    pub fn with_defaults(now: Instant) -> Self {
        let selector = HeuristicSelector::new(SessionRng::from_clock());
        let mut session = Self::assemble(
            SessionConfig::default(),
            Box::new(MemoryStore::new()),
            Box::new(selector),
        );
        session.refresh(now);
        session
    }

    fn assemble(
        config: SessionConfig,
        store: Box<dyn Persistence>,
        selector: Box<dyn MoveSelector>,
    ) -> Self {
        let saved = store.load();
        Self {
            config,
            history: History::new(&saved.moves),
            moves: saved.moves,
            one_player: saved.one_player,
            ai_player: Player::Two,
            state: derive_state(&config.game, &[]),
            store,
            selector,
            ai_timer: Countdown::idle(),
            celebration_timer: Countdown::idle(),
            celebrating: false,
            draw_modal_open: false,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &DerivedState {
        &self.state
    }

    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    pub fn one_player(&self) -> bool {
        self.one_player
    }

    pub fn ai_player(&self) -> Player {
        self.ai_player
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    pub fn is_draw_modal_open(&self) -> bool {
        self.draw_modal_open
    }

    pub fn is_ai_pending(&self) -> bool {
        self.ai_timer.is_armed()
    }

    /// Time until the next scheduled event, for the caller's timer.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        [self.ai_timer.remaining(now), self.celebration_timer.remaining(now)]
            .into_iter()
            .flatten()
            .min()
    }

    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            moves: self.moves.clone(),
            one_player: self.one_player,
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            game: self.state.to_game_state(),
            one_player: self.one_player,
            ai_player: self.ai_player.number(),
            ai_pending: self.is_ai_pending(),
            celebrating: self.celebrating,
            draw_modal_open: self.draw_modal_open,
            can_undo: self.history.can_undo(),
        }
    }

    /// Human move. Returns the landing row.
    pub fn drop_disc(&mut self, column: usize, now: Instant) -> Result<usize, SessionError> {
        if self.is_ai_turn() {
            return Err(SessionError::NotPlayersTurn);
        }
        self.apply_drop(column, now)
    }

    pub fn restart(&mut self, now: Instant) {
        info!("restarting game after {} moves", self.moves.len());
        self.draw_modal_open = false;
        self.moves.clear();
        self.history.push(&self.moves);
        self.persist();
        self.refresh(now);
    }

    pub fn undo(&mut self, now: Instant) -> Result<(), SessionError> {
        let snapshot = self
            .history
            .undo()
            .ok_or(SessionError::NothingToUndo)?
            .to_vec();
        info!("undo: {} -> {} moves", self.moves.len(), snapshot.len());
        self.moves = snapshot;
        self.persist();
        self.refresh(now);
        Ok(())
    }

    /// Switches between playing against the computer and two humans.
    /// Returns the new mode.
    pub fn toggle_one_player(&mut self, now: Instant) -> bool {
        self.one_player = !self.one_player;
        info!("single-player mode: {}", self.one_player);
        self.persist();
        self.refresh(now);
        self.one_player
    }

    pub fn close_draw_modal(&mut self) {
        self.draw_modal_open = false;
    }

    /// Fires due deadlines: ends the celebration and lets the AI play.
    pub fn tick(&mut self, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        if self.celebration_timer.fire(now) {
            self.celebrating = false;
            events.push(SessionEvent::CelebrationEnded);
        }

        if self.ai_timer.fire(now) && self.is_ai_turn() {
            match self.play_ai(now) {
                Ok(event) => events.push(event),
                Err(err) => warn!("AI move failed: {err}"),
            }
        }

        events
    }

    fn play_ai(&mut self, now: Instant) -> Result<SessionEvent, SessionError> {
        let column = self
            .selector
            .select_column(&self.state.board, self.ai_player)
            .ok_or(SessionError::NoLegalMove)?;
        let row = self.apply_drop(column, now)?;
        Ok(SessionEvent::AiMoved { column, row })
    }

    fn is_ai_turn(&self) -> bool {
        self.one_player
            && !self.state.outcome.is_terminal()
            && self.state.current_player == self.ai_player
    }

    fn apply_drop(&mut self, column: usize, now: Instant) -> Result<usize, SessionError> {
        if self.state.outcome.is_terminal() {
            return Err(SessionError::GameOver);
        }

        let placement = self
            .state
            .board
            .drop_disc(column, self.state.current_player)?;

        self.moves.push(column);
        self.history.push(&self.moves);
        self.persist();
        self.refresh(now);
        Ok(placement.row)
    }

    fn persist(&mut self) {
        let saved = self.persisted();
        if let Err(err) = self.store.save(&saved) {
            warn!("failed to save game: {err}");
        }
    }

    /// Re-derives the game from the move list and re-arms timers.
    fn refresh(&mut self, now: Instant) {
        let previous = self.state.outcome.board_state();
        self.state = derive_state(&self.config.game, &self.moves);

        match self.state.outcome.board_state() {
            BoardState::Win => {
                if previous != BoardState::Win {
                    self.celebrating = true;
                    self.celebration_timer
                        .start(now, Duration::from_millis(self.config.celebration_ms));
                }
            }
            BoardState::Draw => {
                if previous != BoardState::Draw {
                    self.draw_modal_open = true;
                }
            }
            BoardState::Waiting | BoardState::Pending => {
                self.celebrating = false;
                self.celebration_timer.cancel();
                self.draw_modal_open = false;
            }
        }

        if self.is_ai_turn() {
            self.ai_timer
                .start(now, Duration::from_millis(self.config.ai_delay_ms));
        } else {
            self.ai_timer.cancel();
        }
    }
}
