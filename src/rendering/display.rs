//! # Display Management
//!
//! Plain-text rendering of session snapshots for the CLI.
//!
//! Visibility policy lives here, not in the core: unseen cells stay blank
//! unless `reveal_all` (the minimap view) is on. Walls bordering a seen cell
//! are drawn so the explored trail has edges.

use crate::rendering::status_line;
use crate::{Cell, GameEvent, Grid, LossCause, Position, Snapshot};

/// Text display for snapshots.
#[derive(Debug, Clone)]
pub struct TextDisplay {
    /// Show every cell regardless of `seen`
    pub reveal_all: bool,
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    /// Messages printed under the map
    pub visible_messages: usize,
}

impl Default for TextDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDisplay {
    pub fn new() -> Self {
        Self {
            reveal_all: false,
            messages: Vec::new(),
            max_messages: 100,
            visible_messages: 3,
        }
    }

    /// Renders the map, the status line and the latest messages.
    pub fn render(&self, snapshot: &Snapshot) -> String {
        let mut out = self.render_map(snapshot);
        out.push_str(&status_line(snapshot));
        out.push('\n');

        let start = self.messages.len().saturating_sub(self.visible_messages);
        for message in &self.messages[start..] {
            out.push_str(message);
            out.push('\n');
        }
        out
    }

    /// Renders just the grid, one line per row.
    ///
    /// Glyphs: `@` player, `H` hound, `>` goal, `!` almond water,
    /// `.` lit floor, `,` dark floor, `#` wall.
    pub fn render_map(&self, snapshot: &Snapshot) -> String {
        let grid = &snapshot.grid;
        let mut out = String::with_capacity(((grid.width() + 1) * grid.height()) as usize);

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let pos = Position::new(x, y);
                out.push(self.glyph_at(snapshot, pos));
            }
            out.push('\n');
        }
        out
    }

    fn glyph_at(&self, snapshot: &Snapshot, pos: Position) -> char {
        if pos == snapshot.player {
            return '@';
        }
        let Some(cell) = snapshot.grid.get(pos) else {
            return ' ';
        };
        if !self.is_revealed(&snapshot.grid, pos, cell) {
            return ' ';
        }
        if snapshot.hounds.contains(&pos) {
            return 'H';
        }
        if !cell.is_floor() {
            return '#';
        }
        if cell.is_goal {
            '>'
        } else if cell.item.is_some() {
            '!'
        } else if cell.light > snapshot.lit_threshold {
            '.'
        } else {
            ','
        }
    }

    fn is_revealed(&self, grid: &Grid, pos: Position, cell: &Cell) -> bool {
        if self.reveal_all || cell.seen {
            return true;
        }
        if cell.is_floor() {
            return false;
        }
        (-1..=1).any(|dy| {
            (-1..=1).any(|dx| {
                grid.get(Position::new(pos.x + dx, pos.y + dy))
                    .map(|neighbor| neighbor.seen)
                    .unwrap_or(false)
            })
        })
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        // Keep only the most recent messages
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }

    /// Adds a message for each event worth telling the player about.
    pub fn add_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let Some(message) = describe_event(event) {
                self.add_message(message);
            }
        }
    }
}

/// Player-facing text for an event, if it deserves any.
pub fn describe_event(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::SessionStarted { seed } => Some(format!("You wake up somewhere else. (seed {})", seed)),
        GameEvent::ItemPickedUp { .. } => Some("You find a bottle of almond water.".to_string()),
        GameEvent::ItemConsumed { restored, .. } => {
            Some(format!("The almond water steadies you (+{} sanity).", restored))
        }
        GameEvent::ReachedGoal { .. } => Some("You found the way out.".to_string()),
        GameEvent::Caught { .. } => Some(describe_loss(LossCause::Caught).to_string()),
        GameEvent::SanityDepleted => Some(describe_loss(LossCause::SanityDepleted).to_string()),
        _ => None,
    }
}

fn describe_loss(cause: LossCause) -> &'static str {
    match cause {
        LossCause::Caught => "A hound catches you.",
        LossCause::SanityDepleted => "The hum of the lights is all that is left.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hound, Item, Session, TurnRules};

    fn session() -> Session {
        let mut grid = Grid::from_ascii(&[
            "#######",
            "#.....#",
            "#######",
        ])
        .unwrap();
        grid.get_mut(Position::new(5, 1)).unwrap().is_goal = true;
        grid.get_mut(Position::new(3, 1)).unwrap().item = Some(Item::AlmondWater);
        grid.get_mut(Position::new(2, 1)).unwrap().light = 0.9;
        let rules = TurnRules {
            flicker_enabled: false,
            ..TurnRules::default()
        };
        let hounds = vec![Hound::new(Position::new(4, 1), 2)];
        Session::from_layout(grid, Position::new(1, 1), hounds, 1, rules).unwrap()
    }

    #[test]
    fn test_reveal_all_map() {
        let display = TextDisplay {
            reveal_all: true,
            ..TextDisplay::new()
        };
        assert_eq!(
            display.render_map(&session().snapshot()),
            "#######\n#@.!H>#\n#######\n"
        );
    }

    #[test]
    fn test_unseen_cells_stay_hidden() {
        let display = TextDisplay::new();
        assert_eq!(
            display.render_map(&session().snapshot()),
            "###    \n#@     \n###    \n"
        );
    }

    #[test]
    fn test_trail_is_revealed_after_moving() {
        let mut session = session();
        session.apply_move(1, 0);

        let display = TextDisplay::new();
        assert_eq!(
            display.render_map(&session.snapshot()),
            "####   \n#,@    \n####   \n"
        );
    }

    #[test]
    fn test_lit_glyph_follows_session_threshold() {
        let mut grid = Grid::from_ascii(&["#...#"]).unwrap();
        grid.get_mut(Position::new(2, 0)).unwrap().light = 0.6;
        grid.get_mut(Position::new(3, 0)).unwrap().light = 0.9;
        let rules = TurnRules {
            lit_threshold: 0.75,
            flicker_enabled: false,
            ..TurnRules::default()
        };
        let session = Session::from_layout(grid, Position::new(1, 0), vec![], 1, rules).unwrap();
        let display = TextDisplay {
            reveal_all: true,
            ..TextDisplay::new()
        };

        assert_eq!(display.render_map(&session.snapshot()), "#@,.#\n");
    }

    #[test]
    fn test_messages_are_capped() {
        let mut display = TextDisplay {
            max_messages: 2,
            ..TextDisplay::new()
        };
        display.add_message("one".to_string());
        display.add_message("two".to_string());
        display.add_message("three".to_string());
        assert_eq!(display.messages, vec!["two".to_string(), "three".to_string()]);
    }

    #[test]
    fn test_describe_event() {
        assert!(describe_event(&GameEvent::SanityDepleted).is_some());
        assert!(describe_event(&GameEvent::PlayerMoved {
            from: Position::new(0, 0),
            to: Position::new(1, 0),
        })
        .is_none());
    }
}
