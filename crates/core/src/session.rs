//! Session module - the complete game state machine
//!
//! Ties the pit, the piece source, scoring and timers together. Handles
//! spawning, player actions, the automatic fall, landing, the special-block
//! rule, leveling, pause and restart.
//!
//! All calls are synchronous and never block. Time only moves when the host
//! calls [`Session::tick`].

use std::collections::VecDeque;

use crate::config::PitConfig;
use crate::error::EngineError;
use crate::events::{PitEvent, RotationAnimation, SpecialOutcome};
use crate::geometry::Coord;
use crate::pieces::{try_rotate, ShapeCatalog};
use crate::pit::Pit;
use crate::polycube::{PieceCells, Polycube};
use crate::rng::PieceSource;
use crate::scoring::{
    fall_interval_ms, layer_clear_score, level_for_score, line_clear_score, penalized_interval_ms,
    penalty_deduction,
};
use crate::snapshot::{ActiveSnapshot, PitSnapshot};
use crate::timers::{TimerKind, Timers};
use crate::types::{Axis, GameAction};

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Constructed or restarted, not started yet
    #[default]
    Ready,
    Running,
    Paused,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: PitConfig,
    pit: Pit,
    source: PieceSource,
    current: Option<Polycube>,
    /// Upcoming pieces, head first; never empty
    queue: VecDeque<Polycube>,
    phase: Phase,
    score: u32,
    level: u32,
    /// Level-scaled interval, before any penalty
    base_fall_interval_ms: u32,
    penalty_active: bool,
    /// Penalty time left, parked while paused
    penalty_remaining_ms: Option<u32>,
    blocks_placed: u32,
    layers_cleared: u32,
    lines_cleared: u32,
    /// Monotonic episode id (increments on restart)
    episode_id: u32,
    /// Monotonic id for spawned pieces
    piece_id: u32,
    timers: Timers,
    events: Vec<PitEvent>,
}

impl Session {
    /// Session over the standard shape catalog
    pub fn new(config: PitConfig, seed: u32) -> Result<Self, EngineError> {
        Self::with_catalog(config, ShapeCatalog::standard(), seed)
    }

    pub fn with_catalog(
        config: PitConfig,
        catalog: ShapeCatalog,
        seed: u32,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let source = PieceSource::new(catalog, &config, seed)?;
        let pit = Pit::new(config.width, config.depth, config.height);
        let base_fall_interval_ms = fall_interval_ms(&config, 1);

        let mut session = Self {
            config,
            pit,
            source,
            current: None,
            queue: VecDeque::new(),
            phase: Phase::Ready,
            score: 0,
            level: 1,
            base_fall_interval_ms,
            penalty_active: false,
            penalty_remaining_ms: None,
            blocks_placed: 0,
            layers_cleared: 0,
            lines_cleared: 0,
            episode_id: 0,
            piece_id: 0,
            timers: Timers::new(),
            events: Vec::new(),
        };
        session.fill_queue();
        Ok(session)
    }

    fn fill_queue(&mut self) {
        self.queue.clear();
        while self.queue.len() < self.config.queue_len {
            self.queue.push_back(self.source.next_piece());
        }
    }

    /// Start the session and spawn the first piece
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        self.phase = Phase::Running;
        self.events.push(PitEvent::Started);
        tracing::info!(episode = self.episode_id, seed = self.source.seed(), "session started");
        self.spawn_next();
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.phase = Phase::Paused;
        self.timers.cancel(TimerKind::Fall);
        if let Some(deadline) = self.timers.deadline(TimerKind::PenaltyRestore) {
            let remaining = deadline.saturating_sub(self.timers.now_ms());
            self.penalty_remaining_ms = Some(remaining.min(u64::from(u32::MAX)) as u32);
            self.timers.cancel(TimerKind::PenaltyRestore);
        }
        self.events.push(PitEvent::Paused);
        tracing::debug!("session paused");
        true
    }

    /// Resume from pause; the next fall is a full interval from now
    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Running;
        let interval = self.fall_interval_ms();
        self.timers.schedule(TimerKind::Fall, interval);
        if let Some(remaining) = self.penalty_remaining_ms.take() {
            self.timers.schedule(TimerKind::PenaltyRestore, remaining);
        }
        self.events.push(PitEvent::Resumed);
        tracing::debug!("session resumed");
        true
    }

    /// Start, pause or resume depending on the phase
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Ready => self.start(),
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::GameOver => false,
        }
    }

    /// Reset pit, piece source and counters to construction-time values
    ///
    /// Every pending deadline is invalidated; the session is left in
    /// [`Phase::Ready`].
    pub fn restart(&mut self) {
        self.timers.invalidate_all();
        self.pit.reset();
        self.source.reset();
        self.current = None;
        self.fill_queue();
        self.phase = Phase::Ready;
        self.score = 0;
        self.level = 1;
        self.base_fall_interval_ms = fall_interval_ms(&self.config, 1);
        self.penalty_active = false;
        self.penalty_remaining_ms = None;
        self.blocks_placed = 0;
        self.layers_cleared = 0;
        self.lines_cleared = 0;
        self.piece_id = 0;
        self.episode_id = self.episode_id.wrapping_add(1);

        self.events.push(PitEvent::Restarted {
            episode_id: self.episode_id,
        });
        self.events.push(PitEvent::QueueChanged {
            queue: self.queue_names(),
        });
        tracing::info!(episode = self.episode_id, "session restarted");
    }

    /// Pop the queue head and place it at the first free spawn pose
    fn spawn_next(&mut self) -> bool {
        let mut piece = match self.queue.pop_front() {
            Some(piece) => piece,
            None => self.source.next_piece(),
        };
        self.queue.push_back(self.source.next_piece());
        self.events.push(PitEvent::QueueChanged {
            queue: self.queue_names(),
        });

        let Some(position) = self.pit.spawn_position(&piece) else {
            self.enter_game_over();
            return false;
        };

        piece.position = position;
        self.piece_id = self.piece_id.wrapping_add(1);
        tracing::debug!(
            shape = piece.name(),
            special = piece.is_special(),
            position = ?position,
            "piece spawned"
        );
        self.events.push(PitEvent::PieceSpawned {
            shape: piece.name().to_string(),
            position,
            special: piece.is_special(),
        });
        self.current = Some(piece);
        let interval = self.fall_interval_ms();
        self.timers.schedule(TimerKind::Fall, interval);
        true
    }

    fn enter_game_over(&mut self) {
        self.phase = Phase::GameOver;
        self.current = None;
        self.timers.invalidate_all();
        self.penalty_active = false;
        self.penalty_remaining_ms = None;
        tracing::info!(score = self.score, level = self.level, "game over");
        self.events.push(PitEvent::GameOver { score: self.score });
    }

    /// Translate the active piece; rejected moves leave it untouched
    pub fn move_piece(&mut self, dx: i32, dy: i32, dz: i32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(current) = self.current.as_ref() else {
            return false;
        };

        let Some(moved) = current.translated(dx, dy, dz) else {
            return false;
        };
        if !self.pit.can_place(&moved) {
            return false;
        }

        let from = current.position;
        let to = moved.position;
        self.current = Some(moved);
        self.events.push(PitEvent::PieceMoved { from, to });
        true
    }

    /// Rotate the active piece by `turns` quarter turns about `axis`
    ///
    /// Kick offsets are tried in order and the first placement that fits is
    /// committed, including its offset.
    pub fn rotate_piece(&mut self, axis: Axis, turns: i8) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(current) = self.current.as_ref() else {
            return false;
        };

        let pit = &self.pit;
        let Some((rotated, kick)) = try_rotate(current, axis, turns, |p| pit.can_place(p)) else {
            return false;
        };

        let from = current.pose();
        let to = rotated.pose();
        if kick != Coord::ZERO {
            tracing::debug!(axis = axis.as_str(), turns, kick = ?kick, "rotation kicked");
        }
        self.current = Some(rotated);
        self.events.push(PitEvent::PieceRotated(RotationAnimation {
            from,
            to,
            duration_ms: self.config.rotation_animation_ms,
        }));
        true
    }

    /// Hard drop: fall as far as possible, then lock immediately
    pub fn drop_piece(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(current) = self.current.as_mut() else {
            return false;
        };

        let distance = self.pit.drop_distance(current);
        current.translate(0, 0, -distance);
        self.events.push(PitEvent::PieceDropped {
            distance: distance as u32,
            duration_ms: self.config.drop_animation_ms,
        });
        self.land();
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                self.start()
            }
            GameAction::HardDrop => self.drop_piece(),
            other => {
                if let Some((dx, dy, dz)) = other.translation() {
                    self.move_piece(dx, dy, dz)
                } else if let Some((axis, turns)) = other.rotation() {
                    self.rotate_piece(axis, turns)
                } else {
                    false
                }
            }
        }
    }

    /// Advance the session clock by `elapsed_ms`
    ///
    /// Fires due deadlines: at most one automatic fall per call. Returns
    /// whether anything changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.timers.advance(elapsed_ms);

        let mut changed = false;
        if self.timers.take_due(TimerKind::PenaltyRestore) {
            self.end_penalty();
            changed = true;
        }
        if self.timers.take_due(TimerKind::Fall) {
            self.fall_step();
            changed = true;
        }
        changed
    }

    fn fall_step(&mut self) {
        let Some(current) = self.current.as_ref() else {
            return;
        };

        match current.translated(0, 0, -1) {
            Some(lowered) if self.pit.can_place(&lowered) => {
                let from = current.position;
                let to = lowered.position;
                self.current = Some(lowered);
                self.events.push(PitEvent::PieceMoved { from, to });
                let interval = self.fall_interval_ms();
                self.timers.schedule(TimerKind::Fall, interval);
            }
            _ => self.land(),
        }
    }

    /// Lock the active piece, score it, clear, level up and spawn the next
    fn land(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };
        self.timers.cancel(TimerKind::Fall);

        let surface = self.pit.highest_occupied_z();
        let cells = self.pit.lock(&piece);
        let special = piece.is_special();

        self.score = self.score.saturating_add(self.config.points_per_block);
        self.blocks_placed = self.blocks_placed.saturating_add(1);
        self.events.push(PitEvent::PieceLanded {
            cells: cells.to_vec(),
            special,
        });

        if special {
            self.apply_special(&cells, surface);
        }

        let layers = self.pit.check_and_clear_layers();
        if layers > 0 {
            let bonus = layer_clear_score(self.config.points_per_layer, layers);
            self.score = self.score.saturating_add(bonus);
            self.layers_cleared = self.layers_cleared.saturating_add(layers as u32);
            tracing::info!(layers, bonus, "layers cleared");
            self.events.push(PitEvent::LayersCleared {
                count: layers,
                bonus,
            });
        }

        if self.config.line_clears {
            let lines = self.pit.clear_same_color_lines();
            if lines > 0 {
                let bonus = line_clear_score(self.config.points_per_line, lines);
                self.score = self.score.saturating_add(bonus);
                self.lines_cleared = self.lines_cleared.saturating_add(lines as u32);
                tracing::info!(lines, bonus, "lines cleared");
                self.events.push(PitEvent::LinesCleared {
                    count: lines,
                    bonus,
                });
            }
        }

        if self.pit.is_empty() {
            let bonus = self.config.full_clear_bonus;
            self.score = self.score.saturating_add(bonus);
            tracing::info!(bonus, "pit cleared");
            self.events.push(PitEvent::PitCleared { bonus });
        }

        self.events.push(PitEvent::ScoreChanged { score: self.score });
        self.source.note_locked(special);
        self.update_level();
        self.spawn_next();
    }

    /// Resolve a landed special block
    ///
    /// `surface` is the highest occupied layer before the lock. Reaching
    /// below it clears the bottom layer; anything else is a penalty.
    fn apply_special(&mut self, cells: &PieceCells, surface: Option<i32>) {
        let reaches_gap = surface.is_some_and(|top| cells.iter().any(|c| c.z < top));

        if reaches_gap {
            self.pit.remove_cells(cells);
            self.pit.clear_layer(0);
            let bonus = self.config.points_per_layer;
            self.score = self.score.saturating_add(bonus);
            tracing::info!(bonus, "special block cleared bottom layer");
            self.events
                .push(PitEvent::SpecialTriggered(SpecialOutcome::Clearing { bonus }));
        } else {
            let deducted = penalty_deduction(self.config.points_per_block, self.score);
            self.score -= deducted;
            self.penalty_active = true;
            self.timers
                .schedule(TimerKind::PenaltyRestore, self.config.penalty_duration_ms);
            let interval = self.fall_interval_ms();
            tracing::info!(deducted, fall_interval_ms = interval, "special block penalty");
            self.events
                .push(PitEvent::SpecialTriggered(SpecialOutcome::Penalty {
                    deducted,
                    fall_interval_ms: interval,
                }));
        }
    }

    fn end_penalty(&mut self) {
        self.penalty_active = false;
        let interval = self.fall_interval_ms();
        tracing::info!(fall_interval_ms = interval, "penalty expired");
        self.events.push(PitEvent::PenaltyExpired {
            fall_interval_ms: interval,
        });
    }

    fn update_level(&mut self) {
        let level = level_for_score(self.score, self.level, self.config.level_up_threshold);
        if level <= self.level {
            return;
        }
        self.level = level;
        self.base_fall_interval_ms = fall_interval_ms(&self.config, level);
        self.source.advance_level(level);
        tracing::info!(level, fall_interval_ms = self.base_fall_interval_ms, "level up");
        self.events.push(PitEvent::LevelChanged {
            level,
            fall_interval_ms: self.fall_interval_ms(),
        });
    }

    /// Current fall interval, including any active penalty
    pub fn fall_interval_ms(&self) -> u32 {
        if self.penalty_active {
            penalized_interval_ms(self.base_fall_interval_ms, self.config.penalty_interval_factor)
        } else {
            self.base_fall_interval_ms
        }
    }

    /// How far the active piece would fall on a hard drop
    pub fn ghost_offset(&self) -> Option<i32> {
        self.current.as_ref().map(|p| self.pit.drop_distance(p))
    }

    /// Take every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<PitEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn config(&self) -> &PitConfig {
        &self.config
    }

    pub fn pit(&self) -> &Pit {
        &self.pit
    }

    /// Direct grid access for scripted setups
    ///
    /// Writing over the active piece's cells breaks the no-overlap
    /// invariant; callers arrange the grid before `start` or away from it.
    pub fn pit_mut(&mut self) -> &mut Pit {
        &mut self.pit
    }

    pub fn source(&self) -> &PieceSource {
        &self.source
    }

    pub fn current_piece(&self) -> Option<&Polycube> {
        self.current.as_ref()
    }

    pub fn queue(&self) -> impl Iterator<Item = &Polycube> {
        self.queue.iter()
    }

    /// Upcoming shape names, head first
    pub fn queue_names(&self) -> Vec<String> {
        self.queue.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn blocks_placed(&self) -> u32 {
        self.blocks_placed
    }

    pub fn blocks_since_special(&self) -> u32 {
        self.source.blocks_since_special()
    }

    pub fn layers_cleared(&self) -> u32 {
        self.layers_cleared
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn penalty_active(&self) -> bool {
        self.penalty_active
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    /// Session clock in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Whether an automatic fall is scheduled
    pub fn fall_pending(&self) -> bool {
        self.timers.is_pending(TimerKind::Fall)
    }

    pub fn penalty_pending(&self) -> bool {
        self.timers.is_pending(TimerKind::PenaltyRestore) || self.penalty_remaining_ms.is_some()
    }

    pub fn snapshot_into(&self, out: &mut PitSnapshot) {
        out.width = self.pit.width();
        out.depth = self.pit.depth();
        out.height = self.pit.height();
        out.cells.clear();
        out.cells.extend(self.pit.occupied_cells());
        out.active = self.current.as_ref().map(ActiveSnapshot::from);
        out.ghost_offset = self.ghost_offset();
        out.queue.clear();
        out.queue.extend(self.queue.iter().map(|p| p.name().to_string()));
        out.phase = self.phase;
        out.episode_id = self.episode_id;
        out.seed = self.source.seed();
        out.piece_id = self.piece_id;
        out.score = self.score;
        out.level = self.level;
        out.blocks_placed = self.blocks_placed;
        out.blocks_since_special = self.source.blocks_since_special();
        out.layers_cleared = self.layers_cleared;
        out.lines_cleared = self.lines_cleared;
        out.fall_interval_ms = self.fall_interval_ms();
        out.penalty_active = self.penalty_active;
        out.now_ms = self.timers.now_ms();
    }

    pub fn snapshot(&self) -> PitSnapshot {
        let mut s = PitSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
