//! Display-agnostic projection of a [`Session`].
//!
//! The terminal layer paints a [`RenderState`] and nothing else, so any
//! front end (ratatui, a headless test harness) consumes the same data.

use std::time::Duration;

use crate::{
    session::Session,
    stats::{compute_stats, Stats},
};

/// Footer shown while a race is in progress
pub const ACTIVE_PROMPT: &str = "Press Enter when done. ESC/CTRL+C to quit";

/// Hint shown under the results
pub const FINISHED_PROMPT: &str = "Press Enter to restart. ESC/CTRL+C/Q to quit";

/// Cursor blink half-period
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect,
    Cursor,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub status: CharStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Footer {
    Prompt(&'static str),
    Stats(Stats),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    /// One cell per target character, wrap newlines included
    pub cells: Vec<Cell>,
    pub typed: String,
    /// Index of the next character to type; `None` once finished
    pub cursor: Option<usize>,
    pub footer: Footer,
}

impl RenderState {
    pub fn is_finished(&self) -> bool {
        matches!(self.footer, Footer::Stats(_))
    }
}

pub fn project(session: &Session) -> RenderState {
    let finished = session.is_finished();
    let typed = session.typed();
    let cursor = (!finished).then_some(typed.len());

    let cells = session
        .target()
        .iter()
        .enumerate()
        .map(|(idx, &expected)| {
            let status = match typed.get(idx) {
                Some(&c) if c == expected => CharStatus::Correct,
                Some(_) => CharStatus::Incorrect,
                None if cursor == Some(idx) => CharStatus::Cursor,
                None => CharStatus::Pending,
            };
            Cell {
                char: expected,
                status,
            }
        })
        .collect();

    let footer = if finished {
        Footer::Stats(compute_stats(session))
    } else {
        Footer::Prompt(ACTIVE_PROMPT)
    };

    RenderState {
        cells,
        typed: typed.iter().collect(),
        cursor,
        footer,
    }
}

/// Cosmetic cursor blink derived from wall-clock time alone
pub fn cursor_visible(elapsed: Duration) -> bool {
    (elapsed.as_millis() / BLINK_INTERVAL.as_millis()) % 2 == 0
}
