use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

use crate::error::{Error, Result};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// A bundled word list.
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    pub fn new(file_name: &str) -> Result<Self> {
        read_language_from_file(&format!("{file_name}.json"))
    }

    pub fn english() -> Result<Self> {
        Self::new("english")
    }
}

fn read_language_from_file(file_name: &str) -> Result<Language> {
    let file = LANG_DIR
        .get_file(file_name)
        .ok_or_else(|| Error::UnknownLanguage(file_name.trim_end_matches(".json").to_string()))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| Error::InvalidCorpus(file_name.to_string()))?;

    let lang: Language = from_str(file_as_str)?;
    log::info!("loaded word list `{}` ({} words)", lang.name, lang.words.len());

    Ok(lang)
}
