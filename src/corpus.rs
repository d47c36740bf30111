use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};
use itertools::Itertools;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::{Config, Mode};
use crate::error::{Result, TyperError};

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/words");
static TEXTS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/texts");

/// Supplies the goal text for each new session
pub trait CorpusProvider {
    fn next_goal(&mut self) -> Result<String>;
}

/// Build the provider the config asks for. Read failures surface here,
/// before any session exists.
pub fn from_config(cfg: &Config) -> Result<Box<dyn CorpusProvider>> {
    Ok(match cfg.mode {
        Mode::Classic => Box::new(WordCorpus::load(&cfg.words_filename, cfg.no_words)?),
        Mode::Text => Box::new(TextCorpus::load(&cfg.words_filename)?),
    })
}

/// Shuffled words drawn from an owned word list
#[derive(Debug)]
pub struct WordCorpus {
    words: Vec<String>,
    amount: usize,
    rng: StdRng,
}

impl WordCorpus {
    pub fn new(words: Vec<String>, amount: usize) -> Self {
        Self::with_rng(words, amount, StdRng::from_entropy())
    }

    pub fn with_rng(words: Vec<String>, amount: usize, rng: StdRng) -> Self {
        Self { words, amount, rng }
    }

    /// One word per line. Falls back to the bundled copy when `path` names
    /// a bundled list that is not present on disk.
    pub fn load(path: &Path, amount: usize) -> Result<Self> {
        let contents = read_corpus_file(path)?;
        let words = contents
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(String::from)
            .collect::<Vec<_>>();

        if words.is_empty() && amount > 0 {
            return Err(TyperError::EmptyCorpus {
                path: path.to_path_buf(),
            });
        }
        debug!("loaded {} words from {}", words.len(), path.display());

        Ok(Self::new(words, amount))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn set_amount(&mut self, amount: usize) {
        self.amount = amount;
    }

    /// `amount` words joined by single spaces. Lists shorter than `amount`
    /// are reshuffled and reused until enough words are drawn.
    pub fn generate(&mut self, amount: usize) -> String {
        if self.words.is_empty() {
            return String::new();
        }

        let mut picked: Vec<String> = Vec::with_capacity(amount);
        while picked.len() < amount {
            self.words.shuffle(&mut self.rng);
            let needed = amount - picked.len();
            picked.extend(self.words.iter().take(needed).cloned());
        }
        picked.iter().join(" ")
    }
}

impl CorpusProvider for WordCorpus {
    fn next_goal(&mut self) -> Result<String> {
        Ok(self.generate(self.amount))
    }
}

/// A whole text file as the goal, re-read for every session. Line endings
/// are normalized to `\n`, the only line break a key press produces.
#[derive(Debug, Clone)]
pub struct TextCorpus {
    path: PathBuf,
}

impl TextCorpus {
    /// Fails early if the file cannot be read
    pub fn load(path: &Path) -> Result<Self> {
        read_corpus_file(path)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl CorpusProvider for TextCorpus {
    fn next_goal(&mut self) -> Result<String> {
        let text = read_corpus_file(&self.path)?;
        Ok(normalize_line_endings(text.trim_end()))
    }
}

/// Always the same goal, e.g. from `--prompt`
#[derive(Debug, Clone)]
pub struct FixedCorpus {
    goal: String,
}

impl FixedCorpus {
    pub fn new(goal: impl Into<String>) -> Self {
        Self { goal: goal.into() }
    }
}

impl CorpusProvider for FixedCorpus {
    fn next_goal(&mut self) -> Result<String> {
        Ok(self.goal.clone())
    }
}

fn read_corpus_file(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(err) if err.kind() == io::ErrorKind::NotFound => bundled(path)
            .map(String::from)
            .ok_or_else(|| TyperError::Corpus {
                path: path.to_path_buf(),
                source: err,
            }),
        Err(err) => Err(TyperError::Corpus {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "")
}

fn bundled(path: &Path) -> Option<&'static str> {
    let (dir, relative) = if let Ok(relative) = path.strip_prefix("words") {
        (&WORDS_DIR, relative)
    } else {
        (&TEXTS_DIR, path.strip_prefix("texts").ok()?)
    };
    dir.get_file(relative)?.contents_utf8()
}
