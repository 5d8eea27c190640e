use std::fmt;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    error::{Error, Result},
    language::WordSource,
};

/// Word count used when the configured count is zero
pub const DEFAULT_NUMBER_OF_WORDS: usize = 20;

/// Character count at which generated sentences are wrapped onto a new line
pub const MAX_LINE_WIDTH: usize = 80;

/// Sample `number_of_words` words (with replacement) from `corpus`, join them
/// with spaces and wrap the result at [`MAX_LINE_WIDTH`] characters. Blank
/// entries are never sampled; a corpus with nothing else is empty.
pub fn generate_sentence<R: Rng + ?Sized>(
    number_of_words: usize,
    corpus: &[String],
    rng: &mut R,
) -> Result<String> {
    let words = typeable_words(corpus);
    if words.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    Ok(sample_and_wrap(number_of_words, &words, rng))
}

/// Corpus entries with at least one non-whitespace character
fn typeable_words(corpus: &[String]) -> Vec<&str> {
    corpus
        .iter()
        .map(|word| word.trim())
        .filter(|word| !word.is_empty())
        .collect()
}

fn sample_and_wrap<R: Rng + ?Sized>(number_of_words: usize, corpus: &[&str], rng: &mut R) -> String {
    let count = if number_of_words == 0 {
        DEFAULT_NUMBER_OF_WORDS
    } else {
        number_of_words
    };

    let sentence = (0..count)
        .filter_map(|_| corpus.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ");

    wrap_text(&sentence, MAX_LINE_WIDTH)
}

/// Greedy word wrap. A word joins the current line while
/// `line + word + 1 <= max_width`, otherwise it starts the next line.
pub fn wrap_text(text: &str, max_width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.chars().count() + word.chars().count() + 1 <= max_width {
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        } else {
            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
            }
            current_line.push_str(word);
        }
    }
    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines.join("\n")
}

/// Owns the corpus and the random source used to build target sentences
pub struct WordGenerator {
    source: Box<dyn WordSource>,
    rng: StdRng,
}

impl WordGenerator {
    pub fn new(source: Box<dyn WordSource>) -> Result<Self> {
        Self::with_rng(source, StdRng::from_entropy())
    }

    /// Deterministic generator, for tests and reproducible runs
    pub fn seeded(source: Box<dyn WordSource>, seed: u64) -> Result<Self> {
        Self::with_rng(source, StdRng::seed_from_u64(seed))
    }

    fn with_rng(source: Box<dyn WordSource>, rng: StdRng) -> Result<Self> {
        if typeable_words(source.words()).is_empty() {
            return Err(Error::EmptyCorpus);
        }
        Ok(Self { source, rng })
    }

    /// Generate a fresh target sentence. The corpus was checked on
    /// construction so this cannot fail.
    pub fn generate(&mut self, number_of_words: usize) -> String {
        let words = typeable_words(self.source.words());
        sample_and_wrap(number_of_words, &words, &mut self.rng)
    }
}

impl fmt::Debug for WordGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordGenerator")
            .field("corpus_len", &self.source.words().len())
            .finish_non_exhaustive()
    }
}
