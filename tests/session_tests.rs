//! Integration tests for the session lifecycle and the turn engine.

use liminal::{
    AutoExplorer, Direction, GameEvent, GameResult, GenerationConfig, Grid, Hound, IgnoreReason,
    InputHandler, JsonSeedFile, LossCause, MemorySeedStore, Outcome, PlayerInput, Position,
    SeedStore, Session, TextDisplay, TurnOutcome, TurnRules,
};
use tempfile::tempdir;

fn still_rules() -> TurnRules {
    TurnRules {
        flicker_enabled: false,
        ..TurnRules::default()
    }
}

fn corridor() -> Grid {
    Grid::from_ascii(&[
        "#########",
        "#.......#",
        "#########",
    ])
    .unwrap()
}

#[test]
fn test_consume_with_nothing_to_drink_changes_nothing() -> GameResult<()> {
    let mut session = Session::new(42)?.with_sanity(60);
    assert_eq!(session.inventory(), 0);
    let before = session.snapshot();

    let outcome = session.consume_item();

    assert_eq!(outcome, TurnOutcome::Ignored(IgnoreReason::NoItems));
    assert_eq!(session.snapshot(), before);
    Ok(())
}

#[test]
fn test_dark_step_at_low_sanity_loses_with_zero() -> GameResult<()> {
    // Hound is far enough away that it cannot reach the player this turn.
    let hounds = vec![Hound::new(Position::new(7, 1), 0)];
    let mut session =
        Session::from_layout(corridor(), Position::new(1, 1), hounds, 3, still_rules())?
            .with_sanity(2);

    let outcome = session.apply_move(1, 0);

    assert_eq!(session.outcome(), Outcome::Lost(LossCause::SanityDepleted));
    assert_eq!(session.sanity(), 0);
    assert!(outcome.events().contains(&GameEvent::SanityDrained {
        amount: 2,
        remaining: 0,
    }));
    assert_eq!(outcome.events().last(), Some(&GameEvent::SanityDepleted));
    Ok(())
}

#[test]
fn test_goal_step_wins_and_freezes_hounds() -> GameResult<()> {
    let mut grid = corridor();
    grid.get_mut(Position::new(4, 1)).unwrap().is_goal = true;
    let hounds = vec![
        Hound::new(Position::new(7, 1), 0),
        Hound::new(Position::new(6, 1), 1),
    ];
    let mut session = Session::from_layout(grid, Position::new(3, 1), hounds, 3, still_rules())?;
    let hounds_before: Vec<Position> = session.hounds().iter().map(|h| h.position).collect();
    let turn_before = session.turn();

    session.apply_move(1, 0);

    assert_eq!(session.outcome(), Outcome::Won);
    assert_eq!(session.turn(), turn_before + 1);
    let hounds_after: Vec<Position> = session.hounds().iter().map(|h| h.position).collect();
    assert_eq!(hounds_after, hounds_before);
    Ok(())
}

#[test]
fn test_hounds_may_share_a_cell() -> GameResult<()> {
    let hounds = vec![
        Hound::new(Position::new(6, 1), 0),
        Hound::new(Position::new(6, 1), 0),
    ];
    let mut session =
        Session::from_layout(corridor(), Position::new(1, 1), hounds, 3, still_rules())?;

    session.apply_move(1, 0);
    session.apply_move(-1, 0);

    let positions: Vec<Position> = session.hounds().iter().map(|h| h.position).collect();
    assert_eq!(positions, vec![Position::new(4, 1), Position::new(4, 1)]);
    assert_eq!(session.outcome(), Outcome::InProgress);
    Ok(())
}

#[test]
fn test_boundary_clamp_on_open_edge() -> GameResult<()> {
    let grid = Grid::from_ascii(&["...", "..."]).unwrap();
    let mut session = Session::from_layout(grid, Position::new(2, 0), vec![], 1, still_rules())?;

    session.apply_move(1, 0);
    assert_eq!(session.player(), Position::new(2, 0));
    session.apply_move(0, -1);
    assert_eq!(session.player(), Position::new(2, 0));
    session.apply_move(0, 1);
    assert_eq!(session.player(), Position::new(2, 1));
    Ok(())
}

#[test]
fn test_script_through_input_handler() -> GameResult<()> {
    let mut grid = corridor();
    grid.get_mut(Position::new(7, 1)).unwrap().is_goal = true;
    let mut session = Session::from_layout(grid, Position::new(1, 1), vec![], 1, still_rules())?;

    for input in InputHandler::new().parse_script("dddwdd?ddd") {
        session.handle_input(input)?;
    }

    assert_eq!(session.outcome(), Outcome::Won);
    assert_eq!(session.player(), Position::new(7, 1));
    assert_eq!(session.turn(), 6, "the wall bump and unknown key cost nothing");
    Ok(())
}

#[test]
fn test_new_session_resets_everything() -> GameResult<()> {
    let mut session = Session::new(5)?;
    for direction in Direction::all() {
        session.handle_input(PlayerInput::Move(direction))?;
    }

    session.handle_input(PlayerInput::NewSession(6))?;

    let fresh = Session::new(6)?;
    assert_eq!(session.snapshot(), fresh.snapshot());
    assert_eq!(session.statistics().steps_taken, 0);
    Ok(())
}

#[test]
fn test_stored_seed_reproduces_world() -> GameResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("seed.json");

    let original = Session::new(987_654)?;
    JsonSeedFile::new(&path).remember(&original)?;

    let seed = JsonSeedFile::new(&path).load()?.unwrap_or_default();
    let restored = Session::new(seed)?;
    assert_eq!(restored.snapshot(), original.snapshot());

    let mut memory = MemorySeedStore::new();
    memory.save(seed)?;
    assert_eq!(memory.load()?, Some(987_654));
    Ok(())
}

#[test]
fn test_autoplay_terminates() -> GameResult<()> {
    let explorer = AutoExplorer::new();

    for seed in [1, 42, 777] {
        let mut session = Session::with_config(GenerationConfig::for_testing(seed), TurnRules::default())?;
        let mut guard = 0;
        while let Some(input) = explorer.next_input(&session.snapshot()) {
            let outcome = session.handle_input(input)?;
            assert!(!outcome.is_ignored(), "seed {}: {:?} was ignored", seed, input);
            guard += 1;
            assert!(guard < 5_000, "seed {} autoplay did not finish", seed);
        }
        assert!(session.outcome().is_terminal(), "seed {}", seed);
    }
    Ok(())
}

#[test]
fn test_rendered_board_matches_grid_size() -> GameResult<()> {
    let session = Session::new(42)?;
    let display = TextDisplay {
        reveal_all: true,
        ..TextDisplay::new()
    };

    let map = display.render_map(&session.snapshot());
    let rows: Vec<&str> = map.lines().collect();
    assert_eq!(rows.len(), 30);
    assert!(rows.iter().all(|row| row.chars().count() == 46));
    assert_eq!(map.matches('@').count(), 1);
    Ok(())
}

#[test]
fn test_snapshot_serializes() -> GameResult<()> {
    let session = Session::new(42)?;
    let json = serde_json::to_string(&session.snapshot())?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["seed"], 42);
    assert_eq!(value["sanity"], 100);
    Ok(())
}
