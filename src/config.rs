use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::app_dirs::AppDirs;
use crate::error::{Result, TyperError};
use crate::runtime::RunnerConfig;

pub const DEFAULT_WORDS_FILENAME: &str = "words/words.txt";
pub const DEFAULT_TEXT_FILENAME: &str = "texts/lorem.txt";

/// Where goals come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Mode {
    /// Shuffled words from a word list
    Classic,
    /// A whole text file, verbatim
    Text,
}

impl Mode {
    fn as_value(self) -> &'static str {
        match self {
            Mode::Classic => "0",
            Mode::Text => "1",
        }
    }

    fn from_value(value: &str) -> Option<Self> {
        match value {
            "0" => Some(Mode::Classic),
            "1" => Some(Mode::Text),
            _ => None,
        }
    }

    /// Bundled corpus used when no file is named
    pub fn default_filename(self) -> &'static str {
        match self {
            Mode::Classic => DEFAULT_WORDS_FILENAME,
            Mode::Text => DEFAULT_TEXT_FILENAME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub no_words: usize,
    pub words_filename: PathBuf,
    pub trailing_cursor: bool,
    pub show_stats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Classic,
            no_words: 10,
            words_filename: PathBuf::from(DEFAULT_WORDS_FILENAME),
            trailing_cursor: true,
            show_stats: true,
        }
    }
}

impl Config {
    /// Parse the flat `key=value` format. Unknown keys and lines without
    /// `=` are skipped; missing keys keep their defaults.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut cfg = Config::default();
        let mut named_file = false;

        for (idx, line) in contents.lines().enumerate() {
            let line_no = idx + 1;
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());

            match key {
                "mode" => {
                    cfg.mode = Mode::from_value(value)
                        .ok_or_else(|| invalid(line_no, key, value))?;
                }
                "no_words" => {
                    cfg.no_words = value.parse().map_err(|_| invalid(line_no, key, value))?;
                }
                "words_filename" => {
                    cfg.words_filename = PathBuf::from(value);
                    named_file = true;
                }
                "trailing_cursor" => {
                    cfg.trailing_cursor =
                        parse_switch(value).ok_or_else(|| invalid(line_no, key, value))?;
                }
                "show_stats" => {
                    cfg.show_stats =
                        parse_switch(value).ok_or_else(|| invalid(line_no, key, value))?;
                }
                _ => {}
            }
        }

        if !named_file {
            cfg.words_filename = PathBuf::from(cfg.mode.default_filename());
        }
        Ok(cfg)
    }

    /// Switching modes re-points the file at the new mode's bundled corpus
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            self.mode = mode;
            self.words_filename = PathBuf::from(mode.default_filename());
        }
    }

    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            show_stats: self.show_stats,
            trailing_cursor: self.trailing_cursor,
            ..RunnerConfig::default()
        }
    }
}

/// Serialized in key order, one `key=value` per line
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "mode={}", self.mode.as_value())?;
        writeln!(f, "no_words={}", self.no_words)?;
        writeln!(f, "show_stats={}", switch_value(self.show_stats))?;
        writeln!(f, "trailing_cursor={}", switch_value(self.trailing_cursor))?;
        writeln!(f, "words_filename={}", self.words_filename.display())
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

fn switch_value(on: bool) -> &'static str {
    if on {
        "1"
    } else {
        "0"
    }
}

fn invalid(line: usize, key: &str, value: &str) -> TyperError {
    TyperError::Config {
        line,
        message: format!("unexpected value {value:?} for {key}"),
    }
}

pub trait ConfigStore {
    fn load(&self) -> Result<Config>;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// A missing file is created with the defaults
    fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            let cfg = Config::default();
            self.save(&cfg)?;
            info!("wrote default config to {}", self.path.display());
            return Ok(cfg);
        }
        let contents = fs::read_to_string(&self.path)?;
        Config::parse(&contents)
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, cfg.to_string())?;
        Ok(())
    }
}
