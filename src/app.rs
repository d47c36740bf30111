use log::info;

use crate::corpus::CorpusProvider;
use crate::error::{Result, TyperError};
use crate::runtime::{InputSource, RunOutcome, SessionRunner, ESCAPE};
use crate::session::Session;
use crate::ui::Renderer;

/// What the user picked after a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    /// Same goal again
    Again,
    /// Fresh goal from the corpus
    Restart,
    Quit,
}

impl NextAction {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(NextAction::Again),
            'r' => Some(NextAction::Restart),
            'q' | ESCAPE => Some(NextAction::Quit),
            _ => None,
        }
    }
}

/// Ties a corpus, a session and a runner together for repeated attempts
pub struct App<I: InputSource, R: Renderer> {
    corpus: Box<dyn CorpusProvider>,
    runner: SessionRunner<I, R>,
    session: Session,
    history: Vec<RunOutcome>,
}

impl<I: InputSource, R: Renderer> App<I, R> {
    /// Draws the first goal up front, so a failing corpus never yields a session
    pub fn new(mut corpus: Box<dyn CorpusProvider>, runner: SessionRunner<I, R>) -> Result<Self> {
        let goal = corpus.next_goal()?;
        Ok(Self {
            corpus,
            runner,
            session: Session::new(goal),
            history: vec![],
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn runner(&self) -> &SessionRunner<I, R> {
        &self.runner
    }

    /// Outcomes of every attempt so far, oldest first
    pub fn history(&self) -> &[RunOutcome] {
        &self.history
    }

    /// Run attempts until the user quits. Ctrl+C at any point quits too.
    pub fn run(&mut self) -> Result<()> {
        info!("app run");
        match self.attempts() {
            Err(TyperError::Interrupted) => {
                info!("interrupted");
                Ok(())
            }
            other => other,
        }
    }

    fn attempts(&mut self) -> Result<()> {
        loop {
            let outcome = self.runner.run(&mut self.session)?;
            if !outcome.is_completed() {
                let progress = self.session.snapshot_progress();
                self.runner.renderer_mut().render_cancelled(&progress)?;
            }
            self.history.push(outcome);

            match self.read_next_action()? {
                NextAction::Again => {
                    self.session.retry();
                    info!("goal reset");
                }
                NextAction::Restart => {
                    let goal = self.corpus.next_goal()?;
                    self.session.reset(goal);
                    info!("new goal set");
                }
                NextAction::Quit => {
                    info!("quit");
                    return Ok(());
                }
            }
        }
    }

    fn read_next_action(&mut self) -> Result<NextAction> {
        loop {
            let c = self.runner.input_mut().read_char()?;
            if let Some(action) = NextAction::from_char(c) {
                return Ok(action);
            }
        }
    }
}
