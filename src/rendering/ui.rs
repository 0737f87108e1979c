//! # User Interface Elements
//!
//! Status line and sanity bar shown under the map.

use crate::{LossCause, Outcome, Snapshot};

/// Width of the sanity bar in characters, brackets excluded.
pub const SANITY_BAR_WIDTH: usize = 20;

/// One-line summary of a snapshot.
///
/// # Examples
///
/// ```
/// use liminal::{status_line, Session};
///
/// let session = Session::new(42).unwrap();
/// let line = status_line(&session.snapshot());
/// assert!(line.starts_with("Turn 0"));
/// assert!(line.contains("Sanity 100"));
/// ```
pub fn status_line(snapshot: &Snapshot) -> String {
    format!(
        "Turn {} | Sanity {} {} | Almond water {} | Seed {} | {}",
        snapshot.turn,
        snapshot.sanity,
        sanity_bar(snapshot.sanity, snapshot.max_sanity),
        snapshot.inventory,
        snapshot.seed,
        outcome_label(snapshot.outcome)
    )
}

/// Fixed-width bar, e.g. `[#####-----]`.
pub fn sanity_bar(sanity: i32, max_sanity: i32) -> String {
    let max_sanity = max_sanity.max(1);
    let ratio = sanity.clamp(0, max_sanity) as f64 / max_sanity as f64;
    let filled = (ratio * SANITY_BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(SANITY_BAR_WIDTH - filled)
    )
}

/// Short label for an outcome.
pub fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::InProgress => "Exploring",
        Outcome::Won => "ESCAPED",
        Outcome::Lost(LossCause::Caught) => "CAUGHT",
        Outcome::Lost(LossCause::SanityDepleted) => "LOST TO THE HUM",
    }
}
