//! # Autoexplore Module
//!
//! Debug autoplay: proposes the next intent for a session by looking at a
//! snapshot. It never touches the session itself; the caller feeds the
//! proposal back through [`Session::handle_input`](crate::Session::handle_input).
//!
//! The planner cheats: it reads the whole grid, not just seen cells.

use crate::{path_to_nearest, shortest_path, Direction, Outcome, PlayerInput, Snapshot};

/// Autoplay policy.
#[derive(Debug, Clone)]
pub struct AutoExplorer {
    /// Drink almond water when sanity drops to this or below
    pub drink_below: i32,
    /// Detour for almond water when it is at most this many steps away
    pub item_detour: usize,
}

impl AutoExplorer {
    pub fn new() -> Self {
        Self {
            drink_below: 40,
            item_detour: 6,
        }
    }

    /// Next intent to try, or None when the game is over or the goal is
    /// unreachable.
    pub fn next_input(&self, snapshot: &Snapshot) -> Option<PlayerInput> {
        if snapshot.outcome != Outcome::InProgress {
            return None;
        }

        if snapshot.inventory > 0 && snapshot.sanity <= self.drink_below {
            return Some(PlayerInput::ConsumeItem);
        }

        let grid = &snapshot.grid;
        let item_path = path_to_nearest(grid, snapshot.player, |pos| {
            grid.get(pos).map(|cell| cell.item.is_some()).unwrap_or(false)
        })
        .filter(|path| path.len() <= self.item_detour + 1);

        let path = match item_path {
            Some(path) => path,
            None => shortest_path(grid, snapshot.player, grid.goal_position()?)?,
        };

        let next = *path.get(1)?;
        Direction::from_delta(next - snapshot.player).map(PlayerInput::Move)
    }
}

impl Default for AutoExplorer {
    fn default() -> Self {
        Self::new()
    }
}
