use std::sync::mpsc::Receiver;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info, warn};

use crate::error::{Result, TyperError};
use crate::results::SummaryLog;
use crate::session::Session;
use crate::stats::Stats;
use crate::ui::{ProgressView, Renderer};

pub const ESCAPE: char = '\x1b';
pub const BACKSPACE: char = '\x08';

/// Blocking source of raw characters, one per keystroke
pub trait InputSource {
    /// Waits indefinitely for the next character. Errors are fatal to the
    /// session that is reading.
    fn read_char(&mut self) -> Result<char>;
}

/// Production input using crossterm; the terminal must be in raw mode
#[derive(Debug, Default)]
pub struct CrosstermInputSource;

impl CrosstermInputSource {
    pub fn new() -> Self {
        Self
    }
}

/// Ctrl+C. Raw mode swallows SIGINT, so the key is checked directly.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.kind != KeyEventKind::Release
        && key.code == KeyCode::Char('c')
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Translate a key press into the character the session sees
pub fn key_to_char(key: KeyEvent) -> Option<char> {
    if key.kind == KeyEventKind::Release || is_interrupt(&key) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        KeyCode::Enter => Some('\n'),
        KeyCode::Tab => Some('\t'),
        KeyCode::Backspace => Some(BACKSPACE),
        KeyCode::Esc => Some(ESCAPE),
        _ => None,
    }
}

impl InputSource for CrosstermInputSource {
    fn read_char(&mut self) -> Result<char> {
        loop {
            if let Event::Key(key) = event::read()? {
                if is_interrupt(&key) {
                    return Err(TyperError::Interrupted);
                }
                if let Some(c) = key_to_char(key) {
                    return Ok(c);
                }
            }
        }
    }
}

/// Input fed from a channel, for headless use and tests
pub struct ChannelInputSource {
    rx: Receiver<char>,
}

impl ChannelInputSource {
    pub fn new(rx: Receiver<char>) -> Self {
        Self { rx }
    }
}

impl InputSource for ChannelInputSource {
    fn read_char(&mut self) -> Result<char> {
        self.rx.recv().map_err(|_| TyperError::InputClosed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    pub show_stats: bool,
    pub trailing_cursor: bool,
    pub cancellable: bool,
    pub cancel_key: char,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            show_stats: true,
            trailing_cursor: true,
            cancellable: true,
            cancel_key: ESCAPE,
        }
    }
}

/// How a run ended. `Cancelled` carries the partial, unfinalized stats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunOutcome {
    Completed(Stats),
    Cancelled(Stats),
}

impl RunOutcome {
    pub fn stats(&self) -> &Stats {
        match self {
            RunOutcome::Completed(stats) | RunOutcome::Cancelled(stats) => stats,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }
}

/// Drives one attempt: render, block on a key, feed the session, repeat
pub struct SessionRunner<I: InputSource, R: Renderer> {
    input: I,
    renderer: R,
    config: RunnerConfig,
    summary_log: Option<Box<dyn SummaryLog>>,
}

impl<I: InputSource, R: Renderer> SessionRunner<I, R> {
    pub fn new(input: I, renderer: R, config: RunnerConfig) -> Self {
        Self {
            input,
            renderer,
            config,
            summary_log: None,
        }
    }

    pub fn with_summary_log(mut self, log: Box<dyn SummaryLog>) -> Self {
        self.summary_log = Some(log);
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RunnerConfig) {
        self.config = config;
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn run(&mut self, session: &mut Session) -> Result<RunOutcome> {
        info!(
            "session started: {} words, {} characters",
            word_count(session.goal()),
            session.goal_len()
        );

        while !session.is_complete() {
            if self.config.show_stats {
                session.refresh_elapsed();
            }

            let progress = session.snapshot_progress();
            let view = ProgressView {
                progress: &progress,
                matched: session.matched_count(),
                stats: self.config.show_stats.then(|| session.stats()),
                trailing_cursor: self.config.trailing_cursor,
            };
            self.renderer.render_progress(&view)?;

            let c = self.input.read_char()?;
            if self.config.cancellable && c == self.config.cancel_key {
                session.refresh_elapsed();
                info!(
                    "session cancelled at {}/{} characters",
                    session.matched_count(),
                    session.goal_len()
                );
                return Ok(RunOutcome::Cancelled(session.stats()));
            }

            session.consume(c);
        }

        session.freeze();
        let stats = session.stats();
        self.renderer.render_finish(session.goal(), &stats)?;

        let record = stats.summary_line();
        info!("session completed: {record}");
        if let Some(log) = self.summary_log.as_mut() {
            if let Err(err) = log.append(&record) {
                warn!("unable to write results record: {err}");
            }
        }
        debug!(
            "{} keystrokes for {} characters",
            session.input_count(),
            session.goal_len()
        );

        Ok(RunOutcome::Completed(stats))
    }
}

fn word_count(goal: &str) -> usize {
    goal.split_whitespace().count()
}
