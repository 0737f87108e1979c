//! # Hounds
//!
//! Pursuing entities and the greedy rule that moves them.
//!
//! Pursuit is deliberately simple: one step per turn toward the target,
//! picking whichever legal cardinal step lowers Manhattan distance the most.
//! There is no global path search, so hounds can stall in dead ends. Far
//! away hounds only move some of the time, which models them losing track
//! of the player.

use crate::{Direction, Grid, MazeRng, Position, TurnRules};
use serde::{Deserialize, Serialize};

/// A pursuing entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hound {
    pub position: Position,
    /// Turns left before this hound may move again
    pub cooldown: u32,
}

impl Hound {
    pub fn new(position: Position, cooldown: u32) -> Self {
        Self { position, cooldown }
    }

    /// Advances this hound by at most one cell toward `target`.
    ///
    /// Draw order against `rng`:
    /// 1. nothing while cooling down;
    /// 2. one draw for the wander check, only when the target is at or
    ///    beyond the chase radius;
    /// 3. three draws to shuffle the four candidate steps.
    ///
    /// Returns the new position when the hound actually moved.
    pub fn advance(
        &mut self,
        grid: &Grid,
        target: Position,
        rng: &mut MazeRng,
        rules: &TurnRules,
    ) -> Option<Position> {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return None;
        }

        let close = self.position.manhattan_distance(target) < rules.hound_chase_radius;
        if !close && !rng.chance(rules.hound_wander_chance) {
            return None;
        }

        let mut steps = Direction::all();
        rng.shuffle(&mut steps);

        let mut candidates: Vec<Position> = steps
            .iter()
            .map(|direction| self.position + direction.to_delta())
            .collect();
        // Stable sort keeps the shuffled order among equal distances.
        candidates.sort_by_key(|candidate| candidate.manhattan_distance(target));

        let next = candidates
            .into_iter()
            .find(|&candidate| grid.is_floor(candidate))?;

        self.position = next;
        Some(next)
    }
}
