use std::time::{Duration, Instant};

use crate::{
    stats::{compute_stats, MistypedTally, Stats},
    word_generator::WordGenerator,
};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub number_of_words: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Active,
    Finished,
}

/// One timed attempt at typing a generated target sentence.
///
/// `typed` never grows past `target`; the session finishes when the two
/// lengths meet or when [`Session::handle_early_finish`] is called.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    generator: WordGenerator,
    target: Vec<char>,
    typed: Vec<char>,
    phase: Phase,
    started_at: Instant,
    finished_at: Option<Instant>,
    mistyped: MistypedTally,
    total_keystrokes: usize,
    correct_keystrokes: usize,
}

impl Session {
    pub fn new(config: SessionConfig, mut generator: WordGenerator) -> Self {
        let target = generator.generate(config.number_of_words).chars().collect();
        let session = Self {
            config,
            generator,
            target,
            typed: Vec::new(),
            phase: Phase::Active,
            started_at: Instant::now(),
            finished_at: None,
            mistyped: MistypedTally::new(),
            total_keystrokes: 0,
            correct_keystrokes: 0,
        };
        log::debug!("session started, target is {} chars", session.target.len());
        session
    }

    pub fn handle_char(&mut self, c: char) {
        if self.is_finished() {
            return;
        }
        let Some(&expected) = self.target.get(self.typed.len()) else {
            return;
        };

        self.total_keystrokes += 1;

        if expected == '\n' {
            // wrap newlines are never typed by hand; the keystroke clears them
            self.typed.push('\n');
            self.correct_keystrokes += 1;
        } else if c != expected {
            self.mistyped.record(expected);
            self.typed.push(c);
        } else {
            self.typed.push(c);
            self.correct_keystrokes += 1;
        }

        if self.typed.len() == self.target.len() {
            self.finish();
        }
    }

    /// Raw input chunk; only a chunk of exactly one character is typed
    pub fn handle_input(&mut self, input: &str) {
        let mut chars = input.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            self.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if self.is_finished() || self.typed.pop().is_none() {
            return;
        }
        self.total_keystrokes += 1;
    }

    pub fn handle_early_finish(&mut self) {
        if !self.is_finished() {
            log::debug!(
                "early finish at {}/{} chars",
                self.typed.len(),
                self.target.len()
            );
            self.finish();
        }
    }

    /// Fresh sentence with the same word count; all progress is dropped
    pub fn restart(&mut self) {
        self.target = self
            .generator
            .generate(self.config.number_of_words)
            .chars()
            .collect();
        self.typed.clear();
        self.mistyped = MistypedTally::new();
        self.total_keystrokes = 0;
        self.correct_keystrokes = 0;
        self.started_at = Instant::now();
        self.finished_at = None;
        self.phase = Phase::Active;
        log::debug!("session restarted, target is {} chars", self.target.len());
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        self.finished_at = Some(Instant::now());
        log::debug!(
            "session finished: {}/{} keystrokes correct",
            self.correct_keystrokes,
            self.total_keystrokes
        );
    }

    pub fn stats(&self) -> Stats {
        compute_stats(self)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    pub fn target_text(&self) -> String {
        self.target.iter().collect()
    }

    pub fn typed_text(&self) -> String {
        self.typed.iter().collect()
    }

    pub fn typed_len(&self) -> usize {
        self.typed.len()
    }

    /// Time from start to finish, captured once when the session ends
    pub fn elapsed(&self) -> Option<Duration> {
        self.finished_at
            .map(|finished_at| finished_at.duration_since(self.started_at))
    }

    pub fn mistyped(&self) -> &MistypedTally {
        &self.mistyped
    }

    pub fn total_keystrokes(&self) -> usize {
        self.total_keystrokes
    }

    pub fn correct_keystrokes(&self) -> usize {
        self.correct_keystrokes
    }
}
