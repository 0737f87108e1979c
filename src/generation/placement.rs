//! # Entity Placement
//!
//! Chooses the player spawn, the goal, almond water and hound starting
//! positions on a generated grid.
//!
//! Draw order against the stream, all from a pool of floor cells in
//! row-major order:
//! 1. spawn, one draw without replacement;
//! 2. goal, `goal_samples` draws with replacement from the full floor list,
//!    keeping the first candidate with the strictly greatest Manhattan
//!    distance from the spawn;
//! 3. almond water, without replacement; a draw that lands on the goal is
//!    spent without placing anything;
//! 4. hounds, without replacement, each followed by one cooldown draw.

use crate::{GameError, GameResult, GenerationConfig, Grid, Hound, Item, MazeRng, Position};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Where everything starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub spawn: Position,
    pub goal: Position,
    /// Cells that received almond water
    pub items: Vec<Position>,
    pub hounds: Vec<Hound>,
}

/// Places entities on a generated grid.
#[derive(Debug, Clone, Default)]
pub struct EntityPlacer;

impl EntityPlacer {
    pub fn new() -> Self {
        Self
    }

    /// Places spawn, goal, items and hounds, marking the goal and item
    /// cells on `grid`.
    pub fn place(
        &self,
        grid: &mut Grid,
        config: &GenerationConfig,
        rng: &mut MazeRng,
    ) -> GameResult<Placement> {
        let floors = grid.floor_positions();
        let mut pool = floors.clone();

        let spawn = rng.take_from(&mut pool).ok_or_else(|| {
            GameError::GenerationFailed("No floor cells to place the player on".to_string())
        })?;

        let goal = self.pick_goal(&floors, spawn, config.goal_samples, rng);
        if let Some(cell) = grid.get_mut(goal) {
            cell.is_goal = true;
        }

        let mut items = Vec::new();
        for _ in 0..config.item_count(floors.len()) {
            let Some(pos) = rng.take_from(&mut pool) else {
                break;
            };
            if pos == goal {
                warn!("Item draw landed on the goal at {:?}; skipping", pos);
                continue;
            }
            if let Some(cell) = grid.get_mut(pos) {
                cell.item = Some(Item::AlmondWater);
                items.push(pos);
            }
        }

        let mut hounds = Vec::new();
        for _ in 0..config.hound_count(floors.len()) {
            let Some(pos) = rng.take_from(&mut pool) else {
                break;
            };
            let cooldown = rng.int_in_range(0, config.max_hound_cooldown) as u32;
            hounds.push(Hound::new(pos, cooldown));
        }

        debug!(
            "Placed spawn {:?}, goal {:?} ({} away), {} items, {} hounds",
            spawn,
            goal,
            spawn.manhattan_distance(goal),
            items.len(),
            hounds.len()
        );

        Ok(Placement {
            spawn,
            goal,
            items,
            hounds,
        })
    }

    /// Sampled farthest-point search. Not exact: only `samples` random floor
    /// cells are considered. The spawn is the fallback when no sample is
    /// drawn at all.
    fn pick_goal(
        &self,
        floors: &[Position],
        spawn: Position,
        samples: u32,
        rng: &mut MazeRng,
    ) -> Position {
        let mut best: Option<(Position, u32)> = None;

        for _ in 0..samples {
            let Some(&candidate) = rng.choose(floors) else {
                break;
            };
            let distance = spawn.manhattan_distance(candidate);
            if best.map_or(true, |(_, best_distance)| distance > best_distance) {
                best = Some((candidate, distance));
            }
        }

        best.map(|(pos, _)| pos).unwrap_or(spawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generation::utils, Generator, MazeGenerator};

    fn generated(seed: u32) -> (Grid, Placement) {
        let config = GenerationConfig::new(seed);
        let mut rng = utils::create_rng(&config);
        let mut grid = MazeGenerator::new().generate(&config, &mut rng).unwrap();
        let placement = EntityPlacer::new()
            .place(&mut grid, &config, &mut rng)
            .unwrap();
        (grid, placement)
    }

    #[test]
    fn test_single_goal_without_item() {
        for seed in 0..20 {
            let (grid, placement) = generated(seed);
            let goals: Vec<_> = grid
                .positions()
                .filter(|&pos| grid.get(pos).unwrap().is_goal)
                .collect();
            assert_eq!(goals, vec![placement.goal]);
            assert!(grid.get(placement.goal).unwrap().item.is_none());
        }
    }

    #[test]
    fn test_entities_on_distinct_floor_cells() {
        let (grid, placement) = generated(42);

        assert!(grid.is_floor(placement.spawn));
        assert!(grid.is_floor(placement.goal));
        assert!(placement.items.iter().all(|&pos| grid.is_floor(pos)));
        assert!(placement.hounds.iter().all(|hound| grid.is_floor(hound.position)));

        let mut drawn: Vec<Position> = vec![placement.spawn];
        drawn.extend(placement.items.iter().copied());
        drawn.extend(placement.hounds.iter().map(|hound| hound.position));
        let count = drawn.len();
        drawn.sort_by_key(|pos| (pos.y, pos.x));
        drawn.dedup();
        assert_eq!(drawn.len(), count, "pool draws never repeat");
    }

    #[test]
    fn test_counts_and_cooldowns() {
        let (grid, placement) = generated(7);
        let config = GenerationConfig::new(7);
        let floor_count = grid.floor_count();

        assert!(placement.items.len() <= config.item_count(floor_count));
        assert!(placement.items.len() + 1 >= config.item_count(floor_count));
        assert_eq!(grid.item_positions().len(), placement.items.len());
        assert_eq!(placement.hounds.len(), config.hound_count(floor_count));
        assert!(placement.hounds.iter().all(|hound| hound.cooldown <= 2));
    }

    #[test]
    fn test_goal_is_far_from_spawn() {
        let (grid, placement) = generated(3);
        let distance = placement.spawn.manhattan_distance(placement.goal);
        let farthest = grid
            .floor_positions()
            .into_iter()
            .map(|pos| placement.spawn.manhattan_distance(pos))
            .max()
            .unwrap();
        assert!(distance > 0);
        assert!(distance <= farthest);
    }

    #[test]
    fn test_goal_prefers_first_seen_on_ties() {
        let floors = vec![Position::new(0, 0), Position::new(2, 0), Position::new(0, 2)];
        let placer = EntityPlacer::new();
        let mut rng = MazeRng::new(4);
        let goal = placer.pick_goal(&floors, Position::new(0, 0), 50, &mut rng);

        // Both non-spawn cells are 2 away; the first one drawn must win.
        let mut replay = MazeRng::new(4);
        let first_far = std::iter::from_fn(|| replay.choose(&floors).copied())
            .take(50)
            .find(|pos| *pos != Position::new(0, 0))
            .unwrap();
        assert_eq!(goal, first_far);
    }

    #[test]
    fn test_item_draw_on_goal_is_skipped() {
        // Two floor cells: spawn takes one, the goal must be the other, and
        // the only item draw then lands on the goal.
        let mut grid = Grid::from_ascii(&["#..#"]).unwrap();
        let config = GenerationConfig {
            min_items: 1,
            min_hounds: 0,
            ..GenerationConfig::new(1)
        };
        let mut rng = MazeRng::new(1);
        let placement = EntityPlacer::new().place(&mut grid, &config, &mut rng).unwrap();

        assert_ne!(placement.spawn, placement.goal);
        assert!(placement.items.is_empty());
        assert!(grid.item_positions().is_empty());
        assert!(placement.hounds.is_empty());
    }

    #[test]
    fn test_no_floor_fails() {
        let mut grid = Grid::new(5, 5).unwrap();
        let result = EntityPlacer::new().place(&mut grid, &GenerationConfig::new(1), &mut MazeRng::new(1));
        assert!(matches!(result, Err(GameError::GenerationFailed(_))));
    }
}
