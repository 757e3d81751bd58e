//! Game rules and session state.
//!
//! Builds on the [`core`](crate::core) grid to implement the match-three rules:
//!
//! - [`resolve`] - Which cells a click would eliminate
//! - [`assess`] / [`eliminate`] - Scoring, removal and special-tile promotion
//! - [`settle`] - Gravity compaction and refill
//! - [`GameSession`] - Click handling, selection, tool mode and score
//! - [`SessionStats`] - Running statistics
//! - [`SessionSeed`] - Seed for deterministic sessions
//!
//! # Click Flow
//!
//! 1. [`GameSession::on_cell_clicked`] resolves the group under the click
//! 2. Groups of two or more are eliminated and may spawn one special tile
//! 3. The grid settles: columns compact downward and empty cells refill
//! 4. Smaller results toggle the cell in the manual selection instead
//!
//! In tool mode the clicked tile is removed on its own for a flat score.
//!
//! # Example
//!
//! ```
//! use tilecrush_engine::{GameSession, Position, SessionSeed};
//!
//! let seed: SessionSeed = "0123456789abcdeffedcba9876543210".parse().unwrap();
//! let mut session = GameSession::with_seed(seed);
//!
//! if session.on_tool_icon_clicked() {
//!     session.on_cell_clicked(Position::new(9, 0));
//! }
//! assert_eq!(session.tool_inventory(), 2);
//! assert!(session.grid().is_full());
//! ```

pub use self::{
    connectivity::*, elimination::*, session::*, session_seed::*, session_stats::*, settle::*,
};

mod connectivity;
mod elimination;
mod session;
mod session_seed;
mod session_stats;
mod settle;
