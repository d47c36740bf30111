use std::time::{Duration, Instant};

use crate::stats::{self, Stats};

/// The goal split at the match position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub typed: String,
    pub remaining: String,
}

/// One timed attempt at typing a single goal string.
///
/// The session is a streaming scorer: it keeps cumulative counters only,
/// never a keystroke history. It performs no I/O; callers observe it and
/// report whatever they need.
#[derive(Debug, Clone)]
pub struct Session {
    goal: String,
    chars: Vec<char>,
    matched: usize,
    inputs: usize,
    started_at: Option<Instant>,
    elapsed: Duration,
    frozen: bool,
}

impl Session {
    pub fn new(goal: impl Into<String>) -> Self {
        let goal = goal.into();
        let chars = goal.chars().collect();
        Self {
            goal,
            chars,
            matched: 0,
            inputs: 0,
            started_at: None,
            elapsed: Duration::ZERO,
            frozen: false,
        }
    }

    /// Zero all counters and the clock. An empty `goal` keeps the current
    /// one (retry); anything else installs a new goal.
    pub fn reset(&mut self, goal: impl Into<String>) {
        let goal = goal.into();
        if goal.is_empty() {
            *self = Self::new(std::mem::take(&mut self.goal));
        } else {
            *self = Self::new(goal);
        }
    }

    /// Same goal, fresh attempt
    pub fn retry(&mut self) {
        self.reset(String::new());
    }

    /// Feed one keystroke. The first call arms the timer before the
    /// character is judged. Callers must stop once `is_complete()`.
    pub fn consume(&mut self, c: char) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }

        self.inputs += 1;
        if self.chars.get(self.matched) == Some(&c) {
            self.matched += 1;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.matched == self.chars.len()
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn goal_len(&self) -> usize {
        self.chars.len()
    }

    pub fn matched_count(&self) -> usize {
        self.matched
    }

    pub fn input_count(&self) -> usize {
        self.inputs
    }

    /// Next character the user is expected to type
    pub fn expected_char(&self) -> Option<char> {
        self.chars.get(self.matched).copied()
    }

    pub fn snapshot_progress(&self) -> Progress {
        Progress {
            typed: self.chars[..self.matched].iter().collect(),
            remaining: self.chars[self.matched..].iter().collect(),
        }
    }

    /// Re-measure elapsed time against the live clock. No effect before
    /// the first keystroke or after `freeze`.
    pub fn refresh_elapsed(&mut self) {
        if self.frozen {
            return;
        }
        if let Some(started_at) = self.started_at {
            self.elapsed = started_at.elapsed();
        }
    }

    /// Take a final measurement and stop the clock for good
    pub fn freeze(&mut self) {
        self.refresh_elapsed();
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    pub fn accuracy(&self) -> f64 {
        stats::accuracy(self.matched, self.inputs)
    }

    pub fn words_per_minute(&self) -> f64 {
        stats::words_per_minute(self.matched, self.elapsed)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            matched: self.matched,
            inputs: self.inputs,
            goal_len: self.chars.len(),
            elapsed: self.elapsed,
        }
    }
}
