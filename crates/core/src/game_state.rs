//! Game state module - the game session and its lifecycle state machine
//!
//! This module ties together the board, pieces, random source and scoring.
//! It handles timed auto-descent, piece commands, line clears and the
//! Idle / Running / Paused / GameOver lifecycle.
//!
//! Every command runs to completion synchronously. Commands that do not apply
//! in the current lifecycle state are no-ops and return `false`.

use tracing::{debug, info, trace};

use crate::board::Board;
use crate::pieces::{spawn, Piece, Spawn};
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{advance_level, score_delta};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// What happened the last time a piece locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_delta: u32,
    pub level_up: bool,
    /// The replacement piece could not spawn; the session is over
    pub topped_out: bool,
}

/// One play session: playfield, active piece, counters and lifecycle.
#[derive(Debug, Clone)]
pub struct GameSession<R = SimpleRng> {
    board: Board,
    active: Option<Piece>,
    rng: R,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    drop_counter_ms: u32,
    lifecycle: Lifecycle,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameSession<SimpleRng> {
    /// Create an idle session whose spawn sequence is fixed by `seed`
    pub fn new(seed: u32) -> Self {
        Self::with_random(SimpleRng::new(seed))
    }
}

impl Default for GameSession<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Create an idle session drawing piece kinds from `rng`
    pub fn with_random(rng: R) -> Self {
        Self {
            board: Board::new(),
            active: None,
            rng,
            score: 0,
            lines: 0,
            level: INITIAL_LEVEL,
            drop_interval_ms: INITIAL_DROP_INTERVAL_MS,
            drop_counter_ms: 0,
            lifecycle: Lifecycle::Idle,
            last_event: None,
        }
    }

    /// Session with a prepared board, for scenario setups.
    ///
    /// The session is still idle; `start` spawns onto this board.
    pub fn with_board(rng: R, board: Board) -> Self {
        Self {
            board,
            ..Self::with_random(rng)
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_counter_ms(&self) -> u32 {
        self.drop_counter_ms
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn running(&self) -> bool {
        self.lifecycle.running()
    }

    pub fn paused(&self) -> bool {
        self.lifecycle.paused()
    }

    pub fn game_over(&self) -> bool {
        self.lifecycle.game_over()
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Row the active piece would lock at after a hard drop
    pub fn ghost_y(&self) -> Option<i32> {
        let active = self.active.as_ref()?;
        Some(active.position.y + active.drop_distance(&self.board))
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
        out.running = self.running();
        out.paused = self.paused();
        out.game_over = self.game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Leave `Idle` and spawn the first piece.
    ///
    /// No-op in every other state; leaving `GameOver` takes a `restart`.
    pub fn start(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Idle {
            return false;
        }
        info!("session started");
        self.lifecycle = Lifecycle::Running;
        self.drop_counter_ms = 0;
        self.spawn_next();
        true
    }

    /// Reset board and counters and begin a fresh game from any state
    pub fn restart(&mut self) -> bool {
        info!(score = self.score, lines = self.lines, "session restarted");
        self.board.clear();
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.level = INITIAL_LEVEL;
        self.drop_interval_ms = INITIAL_DROP_INTERVAL_MS;
        self.drop_counter_ms = 0;
        self.last_event = None;
        self.lifecycle = Lifecycle::Running;
        self.spawn_next();
        true
    }

    /// Flip between `Running` and `Paused`
    pub fn toggle_pause(&mut self) -> bool {
        self.lifecycle = match self.lifecycle {
            Lifecycle::Running => Lifecycle::Paused,
            Lifecycle::Paused => Lifecycle::Running,
            Lifecycle::Idle | Lifecycle::GameOver => return false,
        };
        debug!(paused = self.paused(), "pause toggled");
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.rotate(RotationDirection::Clockwise)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate(RotationDirection::CounterClockwise)
    }

    /// Move the active piece down one row, locking it if it cannot move.
    ///
    /// Resets the drop counter either way.
    pub fn soft_drop(&mut self) -> bool {
        if !self.lifecycle.playable() {
            return false;
        }
        self.descend();
        self.drop_counter_ms = 0;
        true
    }

    /// Drop the active piece to its resting row and lock it
    pub fn hard_drop(&mut self) -> bool {
        if !self.lifecycle.playable() {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let fallen = active.drop_to_floor(&self.board);
        trace!(fallen, "hard drop");
        self.lock_piece();
        self.drop_counter_ms = 0;
        true
    }

    /// Advance the descent timer by `elapsed_ms`.
    ///
    /// Time only accumulates while `Running`; ticks in any other state are
    /// discarded so resuming never replays a stale delta. At most one forced
    /// descent happens per tick. Returns true if a descent happened.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.lifecycle.playable() {
            return false;
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms <= self.drop_interval_ms {
            return false;
        }

        self.drop_counter_ms = 0;
        if self.active.is_none() {
            return false;
        }
        trace!(interval = self.drop_interval_ms, "forced descent");
        self.descend();
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => self.start(),
            GameAction::Restart => self.restart(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
        }
    }

    fn shift(&mut self, dx: i32) -> bool {
        if !self.lifecycle.playable() {
            return false;
        }
        match self.active.as_mut() {
            Some(active) => active.try_shift(&self.board, dx),
            None => false,
        }
    }

    fn rotate(&mut self, direction: RotationDirection) -> bool {
        if !self.lifecycle.playable() {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        match active.try_rotate(&self.board, direction) {
            Some(shift) => {
                trace!(direction = direction.sign(), shift, "rotated");
                true
            }
            None => false,
        }
    }

    /// One row down, or lock in place when blocked
    fn descend(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if !active.try_descend(&self.board) {
            self.lock_piece();
        }
    }

    /// Merge the active piece, clear rows, score, and spawn the next piece
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.merge(&active.matrix, active.position, active.kind);
        let cleared = self.board.clear_full_rows();

        let delta = score_delta(cleared, self.level);
        let mut level_up = false;
        if cleared > 0 {
            self.score = self.score.saturating_add(delta);
            self.lines = self.lines.saturating_add(cleared as u32);

            let (level, interval) = advance_level(self.lines, self.level, self.drop_interval_ms);
            level_up = level > self.level;
            self.level = level;
            self.drop_interval_ms = interval;
            if level_up {
                info!(level, interval_ms = interval, "level up");
            }
        }
        debug!(
            kind = active.kind.as_str(),
            x = active.position.x,
            y = active.position.y,
            cleared,
            delta,
            "piece locked"
        );

        let topped_out = !self.spawn_next();
        self.last_event = Some(LockEvent {
            lines_cleared: cleared as u32,
            score_delta: delta,
            level_up,
            topped_out,
        });
    }

    /// Spawn a new active piece; on top-out, end the session.
    ///
    /// Returns false on top-out. The board is never touched here.
    fn spawn_next(&mut self) -> bool {
        match spawn(&mut self.rng, &self.board) {
            Spawn::Piece(piece) => {
                self.active = Some(piece);
                true
            }
            Spawn::TopOut(piece) => {
                info!(
                    kind = piece.kind.as_str(),
                    score = self.score,
                    lines = self.lines,
                    "topped out"
                );
                self.active = None;
                self.lifecycle = Lifecycle::GameOver;
                false
            }
        }
    }
}
