pub mod core;

pub use core::Language;

/// Read-only supplier of candidate words for sentence generation.
pub trait WordSource {
    fn words(&self) -> &[String];
}

impl WordSource for Language {
    fn words(&self) -> &[String] {
        &self.words
    }
}

impl WordSource for Vec<String> {
    fn words(&self) -> &[String] {
        self
    }
}
