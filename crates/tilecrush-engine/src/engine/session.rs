use std::collections::BTreeSet;

use log::{debug, info};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::core::{Grid, Position};

use super::{
    connectivity::resolve,
    elimination::{Assessment, EliminationReport, assess, eliminate, remove_single},
    session_seed::SessionSeed,
    session_stats::SessionStats,
    settle::{SettleReport, settle},
};

/// Tool charges a new or reset session starts with.
pub const DEFAULT_TOOL_CHARGES: u32 = 3;

/// Smallest group a click eliminates; smaller results toggle the selection.
pub const MIN_GROUP_SIZE: usize = 2;

/// Tunable session parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Single-tile removal charges granted at start and on reset.
    pub initial_tools: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_tools: DEFAULT_TOOL_CHARGES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum SessionState {
    /// Accepting input.
    Idle,
    /// A click is being resolved, eliminated and settled.
    Resolving,
}

/// Result of a player action.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum ClickOutcome {
    /// A group was eliminated and the grid settled.
    Eliminated {
        report: EliminationReport,
        settle: SettleReport,
    },
    /// The tool removed one tile and the grid settled.
    ToolUsed {
        report: EliminationReport,
        settle: SettleReport,
    },
    /// The click did not form a group; the cell's selection flag flipped.
    SelectionToggled { selected: bool },
    /// Nothing happened.
    Ignored,
}

impl ClickOutcome {
    /// The elimination report, if tiles were removed.
    #[must_use]
    pub fn report(&self) -> Option<&EliminationReport> {
        match self {
            ClickOutcome::Eliminated { report, .. } | ClickOutcome::ToolUsed { report, .. } => {
                Some(report)
            }
            ClickOutcome::SelectionToggled { .. } | ClickOutcome::Ignored => None,
        }
    }
}

/// A single-player game session.
///
/// Owns the grid, score counters, the manual selection and the tool inventory.
/// Every action runs to completion, including promotion and settling, before
/// returning, so the grid is full whenever control is back with the caller.
///
/// All randomness comes from `R`. The default [`Pcg32`] is created from a
/// [`SessionSeed`]; tests may inject any other [`Rng`].
///
/// # Example
///
/// ```
/// use tilecrush_engine::{ClickOutcome, GameSession, Position};
///
/// let mut session = GameSession::new();
/// let outcome = session.on_cell_clicked(Position::new(4, 4));
/// assert!(!outcome.is_ignored());
/// assert!(session.grid().is_full());
///
/// session.reset();
/// assert_eq!(session.stats().score(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession<R = Pcg32> {
    config: SessionConfig,
    grid: Grid,
    stats: SessionStats,
    state: SessionState,
    selection: BTreeSet<Position>,
    tools: u32,
    tool_mode: bool,
    seed: Option<SessionSeed>,
    rng: R,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a session with the default configuration and a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic play.
    #[must_use]
    pub fn with_seed(seed: SessionSeed) -> Self {
        Self::with_config(SessionConfig::default(), seed)
    }

    #[must_use]
    pub fn with_config(config: SessionConfig, seed: SessionSeed) -> Self {
        let mut this = Self::from_rng(config, Pcg32::from_seed(seed.to_bytes()));
        this.seed = Some(seed);
        this
    }
}

impl<R> GameSession<R>
where
    R: Rng,
{
    /// Creates a session whose grid is filled from `rng`.
    pub fn from_rng(config: SessionConfig, mut rng: R) -> Self {
        let grid = Grid::random(&mut rng);
        Self::from_grid(config, grid, rng)
    }

    /// Creates a session starting from a prepared grid.
    ///
    /// # Panics
    ///
    /// Panics if `grid` has empty cells.
    pub fn from_grid(config: SessionConfig, grid: Grid, rng: R) -> Self {
        assert!(grid.is_full(), "a session must start from a full grid");
        Self {
            config,
            grid,
            stats: SessionStats::new(),
            state: SessionState::Idle,
            selection: BTreeSet::new(),
            tools: config.initial_tools,
            tool_mode: false,
            seed: None,
            rng,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Seed the session was created from, if it was created from one.
    #[must_use]
    pub fn seed(&self) -> Option<SessionSeed> {
        self.seed
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.stats.score()
    }

    #[must_use]
    pub fn eliminated_count(&self) -> usize {
        self.stats.eliminated_tiles()
    }

    #[must_use]
    pub fn tool_inventory(&self) -> u32 {
        self.tools
    }

    #[must_use]
    pub fn is_tool_mode(&self) -> bool {
        self.tool_mode
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Cells the player toggled without forming a group.
    #[must_use]
    pub fn selection(&self) -> &BTreeSet<Position> {
        &self.selection
    }

    /// What clicking `pos` would eliminate and score, without changing anything.
    ///
    /// Returns `None` if the click would only toggle the selection.
    #[must_use]
    pub fn preview(&self, pos: Position) -> Option<Assessment> {
        let group = resolve(&self.grid, pos);
        if group.len() < MIN_GROUP_SIZE {
            return None;
        }
        assess(&self.grid, &group)
    }

    /// Toggles tool mode and returns whether it is now active.
    ///
    /// Tool mode can only be entered while charges remain.
    pub fn on_tool_icon_clicked(&mut self) -> bool {
        self.tool_mode = !self.tool_mode && self.tools > 0;
        debug!("tool mode {}", if self.tool_mode { "on" } else { "off" });
        self.tool_mode
    }

    /// Handles a click on a grid cell.
    ///
    /// In tool mode the tile is removed with [`Self::use_tool`]. Otherwise the
    /// group under the cursor is eliminated if it has at least
    /// [`MIN_GROUP_SIZE`] tiles; a smaller result toggles the cell in the
    /// manual selection.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn on_cell_clicked(&mut self, pos: Position) -> ClickOutcome {
        Grid::check_bounds(pos);
        if !self.state.is_idle() {
            return ClickOutcome::Ignored;
        }
        debug!("click at {pos}");
        if self.tool_mode {
            return self.use_tool(pos);
        }

        self.state = SessionState::Resolving;
        let group = resolve(&self.grid, pos);
        let outcome = if group.len() >= MIN_GROUP_SIZE {
            self.eliminate_group(&group)
        } else {
            self.toggle_selection(pos)
        };
        self.state = SessionState::Idle;
        outcome
    }

    /// Removes the single tile at `pos`, spending one tool charge.
    ///
    /// Adds [`TOOL_POINTS`](super::TOOL_POINTS), never spawns a special tile
    /// and leaves tool mode. A no-op when no charges remain or the session is
    /// not idle.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn use_tool(&mut self, pos: Position) -> ClickOutcome {
        Grid::check_bounds(pos);
        if self.tools == 0 || !self.state.is_idle() {
            return ClickOutcome::Ignored;
        }
        self.state = SessionState::Resolving;
        let outcome = match remove_single(&mut self.grid, pos) {
            Some(report) => {
                self.tools -= 1;
                self.tool_mode = false;
                self.stats.record_tool_use(&report);
                let settle = settle(&mut self.grid, &mut self.rng);
                self.selection.clear();
                info!("tool used, {} charge(s) left", self.tools);
                ClickOutcome::ToolUsed { report, settle }
            }
            None => ClickOutcome::Ignored,
        };
        self.state = SessionState::Idle;
        outcome
    }

    /// Overwrites the remaining tool charges. Tool mode is left as is unless
    /// no charges remain.
    pub fn set_tool_inventory(&mut self, charges: u32) {
        self.tools = charges;
        self.tool_mode &= charges > 0;
        info!("tool charges set to {charges}");
    }

    /// Re-randomizes the grid and restores every counter to its initial value.
    pub fn reset(&mut self) {
        self.grid = Grid::random(&mut self.rng);
        self.stats = SessionStats::new();
        self.selection.clear();
        self.tools = self.config.initial_tools;
        self.tool_mode = false;
        self.state = SessionState::Idle;
        info!("session reset");
    }

    fn eliminate_group(&mut self, group: &BTreeSet<Position>) -> ClickOutcome {
        let Some(mut report) = eliminate(&mut self.grid, group, &mut self.rng) else {
            return ClickOutcome::Ignored;
        };
        self.stats.record_elimination(&report);
        let settle = settle(&mut self.grid, &mut self.rng);
        if let Some((pos, _)) = &mut report.spawned {
            *pos = settle.destination(*pos);
        }
        self.selection.clear();
        ClickOutcome::Eliminated { report, settle }
    }

    fn toggle_selection(&mut self, pos: Position) -> ClickOutcome {
        let selected = self.selection.insert(pos);
        if !selected {
            self.selection.remove(&pos);
        }
        debug!(
            "{} {pos}",
            if selected { "selected" } else { "deselected" }
        );
        ClickOutcome::SelectionToggled { selected }
    }
}
