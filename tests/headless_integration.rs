use std::sync::mpsc;

use ratatui::backend::TestBackend;
use typer::runtime::{ChannelInputSource, RunOutcome, RunnerConfig, SessionRunner, ESCAPE};
use typer::session::Session;
use typer::ui::TerminalRenderer;

// Headless integration using the runner + a ratatui TestBackend, no TTY.
fn runner_with(
    keys: &str,
    config: RunnerConfig,
) -> SessionRunner<ChannelInputSource, TerminalRenderer<TestBackend>> {
    let (tx, rx) = mpsc::channel();
    for c in keys.chars() {
        tx.send(c).unwrap();
    }
    let renderer = TerminalRenderer::new(TestBackend::new(60, 16)).unwrap();
    SessionRunner::new(ChannelInputSource::new(rx), renderer, config)
}

fn screen(runner: &SessionRunner<ChannelInputSource, TerminalRenderer<TestBackend>>) -> String {
    let buffer = runner.renderer().terminal().backend().buffer();
    buffer.content.iter().map(|c| c.symbol()).collect()
}

#[test]
fn headless_typing_flow_completes() {
    let mut runner = runner_with("hi", RunnerConfig::default());
    let mut session = Session::new("hi");

    let outcome = runner.run(&mut session).unwrap();

    assert!(outcome.is_completed());
    assert!(session.is_complete());
    assert_eq!(outcome.stats().accuracy(), 1.0);
    assert!(outcome.stats().wpm() >= 0.0);
    assert!(screen(&runner).contains("(a)gain"));
}

#[test]
fn headless_mistakes_cost_accuracy() {
    let mut runner = runner_with("cxat", RunnerConfig::default());
    let mut session = Session::new("cat");

    let outcome = runner.run(&mut session).unwrap();

    assert_eq!(session.matched_count(), 3);
    assert_eq!(session.input_count(), 4);
    assert_eq!(outcome.stats().accuracy(), 0.75);
    assert!(screen(&runner).contains("Accuracy: 75.00%"));
}

#[test]
fn headless_cancel_keeps_partial_stats() {
    let keys = format!("ab{ESCAPE}");
    let mut runner = runner_with(&keys, RunnerConfig::default());
    let mut session = Session::new("abc");

    match runner.run(&mut session).unwrap() {
        RunOutcome::Cancelled(stats) => {
            assert_eq!(stats.matched, 2);
            assert_eq!(stats.inputs, 2);
        }
        other => panic!("expected cancellation, got {other:?}"),
    }
    assert!(!session.is_complete());
    assert_eq!(session.accuracy(), 1.0);
}

#[test]
fn headless_retry_after_completion() {
    let mut runner = runner_with("okok", RunnerConfig::default());
    let mut session = Session::new("ok");

    runner.run(&mut session).unwrap();
    session.reset("");
    assert_eq!(session.input_count(), 0);
    assert!(!session.has_started());

    let outcome = runner.run(&mut session).unwrap();
    assert!(outcome.is_completed());
    assert_eq!(session.goal(), "ok");
}
