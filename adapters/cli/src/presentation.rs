//! Terminal stand-ins for the audio and score-display collaborators.

use std::io::Write;

use hedge_maze_core::{Event, ScoreState};
use tracing::info;

/// Plays the goal chime.
pub(crate) trait ChimePlayer {
    fn play_chime(&mut self);
}

/// Renders the score panel.
pub(crate) trait ScoreDisplay {
    fn render(&mut self, score: ScoreState);
}

/// Routes world events to the presentation collaborators.
pub(crate) fn present(
    events: &[Event],
    chime: &mut dyn ChimePlayer,
    display: &mut dyn ScoreDisplay,
) {
    for event in events {
        match event {
            Event::GoalReached { .. } => chime.play_chime(),
            Event::ScoreChanged { score } => display.render(*score),
            _ => {}
        }
    }
}

/// Writes the chime as a line of text.
#[derive(Debug)]
pub(crate) struct TerminalChime<W> {
    out: W,
}

impl<W: Write> TerminalChime<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ChimePlayer for TerminalChime<W> {
    fn play_chime(&mut self) {
        info!("playing goal chime");
        // output errors are dropped, the chime is fire-and-forget
        let _ = writeln!(self.out, "*chime* You reached the end of the maze!");
    }
}

/// Writes every score change as a line of text.
#[derive(Debug)]
pub(crate) struct TerminalScoreboard<W> {
    out: W,
}

impl<W: Write> TerminalScoreboard<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ScoreDisplay for TerminalScoreboard<W> {
    fn render(&mut self, score: ScoreState) {
        let _ = writeln!(
            self.out,
            "Candy canes: {}/{}",
            score.score(),
            score.win_threshold()
        );
        if score.won() {
            let _ = writeln!(self.out, "You collected them all!");
        }
    }
}
