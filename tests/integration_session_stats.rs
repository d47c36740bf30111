use std::time::Duration;

use typer::session::Session;
use typer::stats::{words_per_minute, Stats};

fn replay(goal: &str, keys: &str) -> Session {
    let mut session = Session::new(goal);
    for c in keys.chars() {
        session.consume(c);
    }
    session
}

/// Longest prefix reachable by advancing only on exact next-char matches
fn greedy_prefix(goal: &str, keys: &str) -> usize {
    let goal: Vec<char> = goal.chars().collect();
    keys.chars().fold(0, |matched, c| {
        if goal.get(matched) == Some(&c) {
            matched + 1
        } else {
            matched
        }
    })
}

#[test]
fn matched_count_is_greedy_prefix() {
    let cases = [
        ("cat", "cat"),
        ("cat", "cxat"),
        ("hello world", "hxelo wrold"),
        ("aaa", "baaab"),
        ("", "xyz"),
        ("ab", ""),
    ];
    for (goal, keys) in cases {
        let session = replay(goal, keys);
        assert_eq!(
            session.matched_count(),
            greedy_prefix(goal, keys),
            "goal {goal:?}, keys {keys:?}"
        );
        assert_eq!(session.input_count(), keys.chars().count());
        assert!(session.input_count() >= session.matched_count());
        assert!(session.matched_count() <= session.goal_len());
    }
}

#[test]
fn accuracy_stays_in_unit_interval() {
    for keys in ["a", "zzzz", "abab", "ab"] {
        let accuracy = replay("ab", keys).accuracy();
        assert!((0.0..=1.0).contains(&accuracy), "{keys}: {accuracy}");
    }
    assert_eq!(Session::new("ab").accuracy(), 0.0);
}

#[test]
fn scenario_exact_typing() {
    let session = replay("cat", "cat");
    assert_eq!(session.matched_count(), 3);
    assert_eq!(session.input_count(), 3);
    assert_eq!(session.accuracy(), 1.0);
    assert!(session.is_complete());
}

#[test]
fn scenario_one_mistake() {
    let session = replay("cat", "cxat");
    assert_eq!(session.input_count(), 4);
    assert_eq!(session.matched_count(), 3);
    assert_eq!(session.accuracy(), 0.75);
    assert!(session.is_complete());
}

#[test]
fn scenario_empty_goal() {
    assert!(Session::new("").is_complete());
}

#[test]
fn scenario_single_wrong_key() {
    let session = replay("ab", "b");
    assert_eq!(session.matched_count(), 0);
    assert_eq!(session.input_count(), 1);
    assert_eq!(session.accuracy(), 0.0);
    assert!(!session.is_complete());
}

#[test]
fn wpm_without_elapsed_time_is_zero() {
    let session = replay("cat", "cat");
    // the clock is only read on refresh/freeze
    assert_eq!(session.elapsed(), Duration::ZERO);
    assert_eq!(session.words_per_minute(), 0.0);
    assert_eq!(words_per_minute(100, Duration::ZERO), 0.0);
}

#[test]
fn summary_line_matches_results_log_format() {
    let stats = Stats {
        matched: 60,
        inputs: 60,
        goal_len: 60,
        elapsed: Duration::from_secs(12),
    };
    assert_eq!(stats.summary_line(), "100.0000%   12.0000s   60.0000WPM");
}
