//! # Game State Module
//!
//! The session state machine: one generated world plus everything that
//! changes while it is played.
//!
//! A [`Session`] owns its grid, player, hounds and RNG stream. Collaborators
//! feed it intents ([`Session::apply_move`], [`Session::consume_item`],
//! [`Session::handle_input`]) and read owned [`Snapshot`]s back. Every intent
//! either resolves completely or is ignored without touching any state.

use crate::{
    advance_lighting, config, Direction, EntityPlacer, GameError, GameResult, GenerationConfig,
    Generator, Grid, Hound, Item, MazeGenerator, MazeRng, PlayerInput, Position,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Tunable turn-resolution rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnRules {
    /// Sanity a fresh session starts with
    pub starting_sanity: i32,
    /// Upper clamp for sanity
    pub max_sanity: i32,
    /// Cells brighter than this count as lit
    pub lit_threshold: f64,
    /// Sanity lost per step on a lit cell
    pub lit_drain: i32,
    /// Sanity lost per step on a dark cell
    pub dark_drain: i32,
    /// Sanity restored by one bottle of almond water
    pub almond_water_restore: i32,
    /// Hounds closer than this (Manhattan) always chase
    pub hound_chase_radius: u32,
    /// Chance a hound beyond the chase radius moves anyway
    pub hound_wander_chance: f64,
    /// Whether lights flicker between turns
    pub flicker_enabled: bool,
    /// Maximum per-turn change of a lit cell's light
    pub flicker_amplitude: f64,
    /// Lit cells never flicker below this
    pub flicker_floor: f64,
}

impl TurnRules {
    /// Sanity drained by stepping onto a cell with the given light.
    pub fn drain_for(&self, light: f64) -> i32 {
        if light > self.lit_threshold {
            self.lit_drain
        } else {
            self.dark_drain
        }
    }

    /// Checks that the rules describe a playable game.
    pub fn validate(&self) -> GameResult<()> {
        if self.max_sanity <= 0 {
            return Err(GameError::InvalidConfig(
                "max_sanity must be positive".to_string(),
            ));
        }
        if self.starting_sanity <= 0 || self.starting_sanity > self.max_sanity {
            return Err(GameError::InvalidConfig(format!(
                "starting_sanity must be in 1..={}",
                self.max_sanity
            )));
        }
        if self.lit_drain < 0 || self.dark_drain < 0 || self.almond_water_restore < 0 {
            return Err(GameError::InvalidConfig(
                "drain and restore amounts must not be negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.hound_wander_chance) {
            return Err(GameError::InvalidConfig(
                "hound_wander_chance must be within [0, 1]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.flicker_floor) || self.flicker_amplitude < 0.0 {
            return Err(GameError::InvalidConfig(
                "flicker_floor must be within [0, 1] and flicker_amplitude non-negative"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for TurnRules {
    fn default() -> Self {
        Self {
            starting_sanity: config::STARTING_SANITY,
            max_sanity: config::MAX_SANITY,
            lit_threshold: 0.4,
            lit_drain: 1,
            dark_drain: 3,
            almond_water_restore: config::ALMOND_WATER_RESTORE,
            hound_chase_radius: 10,
            hound_wander_chance: 0.3,
            flicker_enabled: true,
            flicker_amplitude: 0.05,
            flicker_floor: 0.1,
        }
    }
}

/// Why a session was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// A hound reached the player
    Caught,
    /// Sanity hit zero
    SanityDepleted,
}

/// Session outcome. `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won,
    Lost(LossCause),
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Something that happened while resolving an intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted { seed: u32 },
    PlayerMoved { from: Position, to: Position },
    ItemPickedUp { item: Item, at: Position },
    ItemConsumed { item: Item, restored: i32 },
    HoundMoved { hound: usize, from: Position, to: Position },
    SanityDrained { amount: i32, remaining: i32 },
    ReachedGoal { at: Position },
    Caught { hound: usize, at: Position },
    SanityDepleted,
}

/// Why an intent changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Not a single axis-aligned step
    InvalidDirection,
    /// The destination is a wall
    Blocked,
    /// The session already ended
    GameOver,
    /// Nothing to drink
    NoItems,
}

/// Result of handing one intent to the turn engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// No state changed
    Ignored(IgnoreReason),
    /// The intent resolved; events are in resolution order
    Resolved(Vec<GameEvent>),
}

impl TurnOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, TurnOutcome::Ignored(_))
    }

    /// Events produced, empty when ignored.
    pub fn events(&self) -> &[GameEvent] {
        match self {
            TurnOutcome::Ignored(_) => &[],
            TurnOutcome::Resolved(events) => events,
        }
    }
}

/// Running totals for the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatistics {
    pub steps_taken: u64,
    pub items_collected: u32,
    pub items_consumed: u32,
    pub sanity_lost: u64,
}

impl SessionStatistics {
    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PlayerMoved { .. } => {
                self.steps_taken += 1;
            }
            GameEvent::ItemPickedUp { .. } => {
                self.items_collected += 1;
            }
            GameEvent::ItemConsumed { .. } => {
                self.items_consumed += 1;
            }
            GameEvent::SanityDrained { amount, .. } => {
                self.sanity_lost += *amount as u64;
            }
            _ => {}
        }
    }
}

/// Read-only copy of a session for renderers and other collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub seed: u32,
    pub grid: Grid,
    pub player: Position,
    pub hounds: Vec<Position>,
    pub sanity: i32,
    /// Upper clamp for sanity under this session's rules
    pub max_sanity: i32,
    /// Floor brighter than this counts as lit under this session's rules
    pub lit_threshold: f64,
    pub inventory: u32,
    pub turn: u64,
    pub outcome: Outcome,
    pub statistics: SessionStatistics,
}

/// One play-through of one seed.
#[derive(Debug, Clone)]
pub struct Session {
    seed: u32,
    generation: GenerationConfig,
    rules: TurnRules,
    rng: MazeRng,
    grid: Grid,
    player: Position,
    hounds: Vec<Hound>,
    sanity: i32,
    inventory: u32,
    turn: u64,
    outcome: Outcome,
    statistics: SessionStatistics,
}

impl Session {
    /// Creates a session on the default 46×30 grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use liminal::{Outcome, Session};
    ///
    /// let session = Session::new(42).unwrap();
    /// assert_eq!(session.turn(), 0);
    /// assert_eq!(session.sanity(), 100);
    /// assert_eq!(session.outcome(), Outcome::InProgress);
    /// ```
    pub fn new(seed: u32) -> GameResult<Self> {
        Self::with_config(GenerationConfig::new(seed), TurnRules::default())
    }

    /// Generates a world from `generation` and starts a session in it.
    pub fn with_config(generation: GenerationConfig, rules: TurnRules) -> GameResult<Self> {
        generation.validate()?;
        rules.validate()?;

        let mut rng = MazeRng::new(generation.seed);
        let generator = MazeGenerator::new();
        let mut grid = generator.generate(&generation, &mut rng)?;
        generator.validate(&grid, &generation)?;

        let placement = EntityPlacer::new().place(&mut grid, &generation, &mut rng)?;

        info!(
            "Session started: seed {}, {}x{}, spawn {:?}, goal {:?}, {} items, {} hounds",
            generation.seed,
            grid.width(),
            grid.height(),
            placement.spawn,
            placement.goal,
            placement.items.len(),
            placement.hounds.len()
        );

        let mut session = Self {
            seed: generation.seed,
            sanity: rules.starting_sanity,
            generation,
            rules,
            rng,
            grid,
            player: placement.spawn,
            hounds: placement.hounds,
            inventory: 0,
            turn: 0,
            outcome: Outcome::InProgress,
            statistics: SessionStatistics::default(),
        };
        session.mark_seen(placement.spawn);
        Ok(session)
    }

    /// Starts a session on a hand-made grid.
    ///
    /// The grid is used as-is; no goal or items are added.
    pub fn from_layout(
        grid: Grid,
        player: Position,
        hounds: Vec<Hound>,
        seed: u32,
        rules: TurnRules,
    ) -> GameResult<Self> {
        rules.validate()?;

        if !grid.is_floor(player) {
            return Err(GameError::InvalidState(format!(
                "Player position {:?} is not a floor cell",
                player
            )));
        }
        if let Some(hound) = hounds.iter().find(|hound| !grid.is_floor(hound.position)) {
            return Err(GameError::InvalidState(format!(
                "Hound position {:?} is not a floor cell",
                hound.position
            )));
        }

        let generation = GenerationConfig {
            seed,
            width: grid.width(),
            height: grid.height(),
            ..GenerationConfig::default()
        };

        let mut session = Self {
            seed,
            sanity: rules.starting_sanity,
            generation,
            rules,
            rng: MazeRng::new(seed),
            grid,
            player,
            hounds,
            inventory: 0,
            turn: 0,
            outcome: Outcome::InProgress,
            statistics: SessionStatistics::default(),
        };
        session.mark_seen(player);
        Ok(session)
    }

    /// Overrides sanity (clamped to the valid range). Setup helper.
    pub fn with_sanity(mut self, sanity: i32) -> Self {
        self.sanity = sanity.clamp(0, self.rules.max_sanity);
        self
    }

    /// Overrides the almond water count. Setup helper.
    pub fn with_inventory(mut self, inventory: u32) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn hounds(&self) -> &[Hound] {
        &self.hounds
    }

    pub fn sanity(&self) -> i32 {
        self.sanity
    }

    pub fn inventory(&self) -> u32 {
        self.inventory
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn statistics(&self) -> &SessionStatistics {
        &self.statistics
    }

    pub fn rules(&self) -> &TurnRules {
        &self.rules
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation
    }

    /// Owned copy of everything a renderer may show.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seed: self.seed,
            grid: self.grid.clone(),
            player: self.player,
            hounds: self.hounds.iter().map(|hound| hound.position).collect(),
            sanity: self.sanity,
            max_sanity: self.rules.max_sanity,
            lit_threshold: self.rules.lit_threshold,
            inventory: self.inventory,
            turn: self.turn,
            outcome: self.outcome,
            statistics: self.statistics.clone(),
        }
    }

    /// Dispatches a collaborator intent.
    ///
    /// A `NewSession` intent discards this world and generates a fresh one
    /// from the new seed with the same configuration.
    pub fn handle_input(&mut self, input: PlayerInput) -> GameResult<TurnOutcome> {
        match input {
            PlayerInput::Move(direction) => Ok(self.step(direction)),
            PlayerInput::ConsumeItem => Ok(self.consume_item()),
            PlayerInput::NewSession(seed) => {
                let generation = GenerationConfig {
                    seed,
                    ..self.generation.clone()
                };
                *self = Session::with_config(generation, self.rules.clone())?;
                Ok(TurnOutcome::Resolved(vec![GameEvent::SessionStarted { seed }]))
            }
        }
    }

    /// Resolves a raw movement delta. Anything but a single axis-aligned
    /// step is ignored.
    pub fn apply_move(&mut self, dx: i32, dy: i32) -> TurnOutcome {
        match Direction::from_delta(Position::new(dx, dy)) {
            Some(direction) => self.step(direction),
            None => TurnOutcome::Ignored(IgnoreReason::InvalidDirection),
        }
    }

    /// Resolves one movement turn.
    pub fn step(&mut self, direction: Direction) -> TurnOutcome {
        if self.outcome.is_terminal() {
            return TurnOutcome::Ignored(IgnoreReason::GameOver);
        }

        let from = self.player;
        let to = self.grid.clamp(from + direction.to_delta());
        let Some(cell) = self.grid.get_mut(to).filter(|cell| cell.is_floor()) else {
            return TurnOutcome::Ignored(IgnoreReason::Blocked);
        };

        let mut events = Vec::new();

        cell.seen = true;
        if let Some(item) = cell.item.take() {
            self.inventory += 1;
            events.push(GameEvent::ItemPickedUp { item, at: to });
        }
        let reached_goal = cell.is_goal;
        let light = cell.light;

        self.player = to;
        events.push(GameEvent::PlayerMoved { from, to });

        if reached_goal {
            self.turn += 1;
            self.outcome = Outcome::Won;
            events.push(GameEvent::ReachedGoal { at: to });
            info!("Goal reached at {:?} on turn {}", to, self.turn);
            return self.finish(events);
        }

        let drain = self.rules.drain_for(light);

        for (index, hound) in self.hounds.iter_mut().enumerate() {
            let hound_from = hound.position;
            if let Some(hound_to) = hound.advance(&self.grid, to, &mut self.rng, &self.rules) {
                events.push(GameEvent::HoundMoved {
                    hound: index,
                    from: hound_from,
                    to: hound_to,
                });
            }
        }

        if let Some(index) = self.hounds.iter().position(|hound| hound.position == to) {
            self.outcome = Outcome::Lost(LossCause::Caught);
            events.push(GameEvent::Caught { hound: index, at: to });
            info!("Caught by hound {} at {:?}", index, to);
            return self.finish(events);
        }

        let before = self.sanity;
        self.sanity = (self.sanity - drain).clamp(0, self.rules.max_sanity);
        events.push(GameEvent::SanityDrained {
            amount: before - self.sanity,
            remaining: self.sanity,
        });

        if self.sanity <= 0 {
            self.outcome = Outcome::Lost(LossCause::SanityDepleted);
            events.push(GameEvent::SanityDepleted);
            info!("Sanity depleted at {:?}", to);
            return self.finish(events);
        }

        self.turn += 1;
        if self.rules.flicker_enabled {
            self.grid = advance_lighting(&self.grid, &mut self.rng, &self.rules);
        }

        debug!(
            "Turn {}: player {:?}, light {:.2}, drain {}, sanity {}",
            self.turn, to, light, drain, self.sanity
        );
        self.finish(events)
    }

    /// Drinks one bottle of almond water. Does not consume a turn.
    pub fn consume_item(&mut self) -> TurnOutcome {
        if self.outcome.is_terminal() {
            return TurnOutcome::Ignored(IgnoreReason::GameOver);
        }
        if self.inventory == 0 {
            return TurnOutcome::Ignored(IgnoreReason::NoItems);
        }

        self.inventory -= 1;
        let before = self.sanity;
        self.sanity = (self.sanity + self.rules.almond_water_restore).min(self.rules.max_sanity);

        self.finish(vec![GameEvent::ItemConsumed {
            item: Item::AlmondWater,
            restored: self.sanity - before,
        }])
    }

    fn finish(&mut self, events: Vec<GameEvent>) -> TurnOutcome {
        for event in &events {
            self.statistics.update_from_event(event);
        }
        TurnOutcome::Resolved(events)
    }

    fn mark_seen(&mut self, pos: Position) {
        if let Some(cell) = self.grid.get_mut(pos) {
            cell.seen = true;
        }
    }
}
