use std::time::Duration;

/// Standard typing-test convention: five characters make one word.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Share of keystrokes that advanced the goal. Every keystroke counts,
/// so a wrong key followed by the right one still costs accuracy.
pub fn accuracy(matched: usize, inputs: usize) -> f64 {
    if inputs == 0 {
        return 0.0;
    }
    matched as f64 / inputs as f64
}

/// Words per minute over correctly matched characters only.
pub fn words_per_minute(matched: usize, elapsed: Duration) -> f64 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes <= 0.0 {
        return 0.0;
    }
    (matched as f64 / CHARS_PER_WORD) / minutes
}

/// Point-in-time scoring of a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub matched: usize,
    pub inputs: usize,
    pub goal_len: usize,
    pub elapsed: Duration,
}

impl Stats {
    pub fn accuracy(&self) -> f64 {
        accuracy(self.matched, self.inputs)
    }

    pub fn accuracy_percent(&self) -> f64 {
        self.accuracy() * 100.0
    }

    pub fn wpm(&self) -> f64 {
        words_per_minute(self.matched, self.elapsed)
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    /// The single-line record appended to the results log
    pub fn summary_line(&self) -> String {
        format!(
            "{:.4}%   {:.4}s   {:.4}WPM",
            self.accuracy_percent(),
            self.elapsed_secs(),
            self.wpm()
        )
    }
}
