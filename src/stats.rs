use std::cmp::Reverse;
use std::time::Duration;

use itertools::Itertools;

use crate::session::Session;

/// Number of entries reported in [`Stats::top_mistyped`]
pub const TOP_MISTYPED: usize = 5;

/// Standard characters-per-word used for WPM
pub const CHARS_PER_WORD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MistypedChar {
    pub char: char,
    pub count: usize,
}

/// Miss counts keyed by the expected character, kept in first-seen order so
/// that ties in [`MistypedTally::top`] resolve deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MistypedTally {
    entries: Vec<MistypedChar>,
}

impl MistypedTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, expected: char) {
        match self.entries.iter_mut().find(|m| m.char == expected) {
            Some(entry) => entry.count += 1,
            None => self.entries.push(MistypedChar {
                char: expected,
                count: 1,
            }),
        }
    }

    pub fn get(&self, c: char) -> usize {
        self.entries
            .iter()
            .find(|m| m.char == c)
            .map_or(0, |m| m.count)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest counts first; equal counts keep first-seen order
    pub fn top(&self, n: usize) -> Vec<MistypedChar> {
        self.entries
            .iter()
            .copied()
            .sorted_by_key(|m| Reverse(m.count))
            .take(n)
            .collect()
    }
}

impl FromIterator<char> for MistypedTally {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut tally = Self::new();
        for c in iter {
            tally.record(c);
        }
        tally
    }
}

/// Results of a finished session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    pub duration_secs: f64,
    pub accuracy: f64,
    pub wpm: f64,
    pub top_mistyped: Vec<MistypedChar>,
    pub finished: bool,
}

/// Keystroke accuracy in percent; zero when nothing was pressed
pub fn accuracy(correct_keystrokes: usize, total_keystrokes: usize) -> f64 {
    if total_keystrokes == 0 {
        return 0.0;
    }
    correct_keystrokes as f64 / total_keystrokes as f64 * 100.0
}

/// Gross words per minute over `chars` typed characters; zero for a zero duration
pub fn words_per_minute(chars: usize, elapsed: Duration) -> f64 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes == 0.0 {
        return 0.0;
    }
    (chars as f64 / CHARS_PER_WORD) / minutes
}

/// Derive results from `session`. An unfinished session yields
/// `Stats::default()`.
pub fn compute_stats(session: &Session) -> Stats {
    let Some(elapsed) = session.elapsed() else {
        return Stats::default();
    };

    Stats {
        duration_secs: elapsed.as_secs_f64(),
        accuracy: accuracy(session.correct_keystrokes(), session.total_keystrokes()),
        wpm: words_per_minute(session.typed_len(), elapsed),
        top_mistyped: session.mistyped().top(TOP_MISTYPED),
        finished: true,
    }
}
