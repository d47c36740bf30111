use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{info, warn, LevelFilter};
use ratatui::backend::CrosstermBackend;
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

use typer::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore, Mode},
    corpus::{self, CorpusProvider, FixedCorpus},
    logging,
    results::FileSummaryLog,
    runtime::{CrosstermInputSource, SessionRunner},
    ui::TerminalRenderer,
};

/// terminal typing trainer with live accuracy and wpm scoring
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// config file to read (key=value lines)
    #[clap(long)]
    config: Option<PathBuf>,

    /// number of words to use in classic mode
    #[clap(short = 'w', long)]
    words: Option<usize>,

    /// word list (classic mode) or text file (text mode)
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// where goals come from
    #[clap(short = 'm', long, value_enum)]
    mode: Option<CliMode>,

    /// custom prompt to use instead of the corpus
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// do not move the terminal cursor to the next expected character
    #[clap(long)]
    no_trailing_cursor: bool,

    /// hide live stats while typing
    #[clap(long)]
    no_stats: bool,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,

    /// do not append finished sessions to results.log
    #[clap(long)]
    no_results_log: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum CliMode {
    Classic,
    Text,
}

impl From<CliMode> for Mode {
    fn from(m: CliMode) -> Self {
        match m {
            CliMode::Classic => Mode::Classic,
            CliMode::Text => Mode::Text,
        }
    }
}

impl Cli {
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(mode) = self.mode {
            cfg.set_mode(mode.into());
        }
        if let Some(words) = self.words {
            cfg.no_words = words;
        }
        if let Some(file) = &self.file {
            cfg.words_filename = file.clone();
        }
        if self.no_trailing_cursor {
            cfg.trailing_cursor = false;
        }
        if self.no_stats {
            cfg.show_stats = false;
        }
        cfg
    }
}

fn load_config(store: &FileConfigStore) -> Config {
    match store.load() {
        Ok(cfg) => {
            info!("config loaded from {}", store.path().display());
            cfg
        }
        Err(err) => {
            warn!("falling back to default config: {err}");
            Config::default()
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Err(err) = logging::init_file_logger(&AppDirs::app_log_path(), LevelFilter::Info) {
        eprintln!("logging disabled: {err}");
    }

    let store = cli
        .config
        .as_ref()
        .map(FileConfigStore::with_path)
        .unwrap_or_default();
    let cfg = cli.apply(load_config(&store));
    if cli.save_config {
        store.save(&cfg)?;
    }

    // resolved before touching the terminal so failures print normally
    let corpus: Box<dyn CorpusProvider> = match &cli.prompt {
        Some(prompt) => Box::new(FixedCorpus::new(prompt.clone())),
        None => corpus::from_config(&cfg)?,
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = run(corpus, &cfg, !cli.no_results_log);

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;

    result
}

fn run(
    corpus: Box<dyn CorpusProvider>,
    cfg: &Config,
    results_log: bool,
) -> Result<(), Box<dyn Error>> {
    let renderer = TerminalRenderer::new(CrosstermBackend::new(io::stdout()))?;
    let mut runner =
        SessionRunner::new(CrosstermInputSource::new(), renderer, cfg.runner_config());
    if results_log {
        let log = FileSummaryLog::new(AppDirs::results_log_path());
        runner = runner.with_summary_log(Box::new(log));
    }

    let mut app = App::new(corpus, runner)?;
    app.run()?;
    Ok(())
}
