use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Terminal,
};

use crate::error::Result;
use crate::session::Progress;
use crate::stats::Stats;

const STATS_START_ROW: u16 = 5;
const STATS_WIDTH: u16 = 27;
const STATS_HEIGHT: u16 = 6;

pub const NEXT_ACTION_LEGEND: &str = "What do you want to do next? (a)gain  (r)estart  (q)uit";

/// What the runner hands the renderer before each keystroke
#[derive(Debug, Clone)]
pub struct ProgressView<'a> {
    pub progress: &'a Progress,
    pub matched: usize,
    pub stats: Option<Stats>,
    pub trailing_cursor: bool,
}

/// Paints session state. Nothing a renderer returns feeds back into
/// scoring; errors only report a broken terminal.
pub trait Renderer {
    fn render_progress(&mut self, view: &ProgressView<'_>) -> Result<()>;
    fn render_finish(&mut self, goal: &str, stats: &Stats) -> Result<()>;
    fn render_cancelled(&mut self, progress: &Progress) -> Result<()>;
}

/// 1-based terminal `(row, col)` of the trailing cursor for a terminal
/// `width` columns wide.
pub fn cursor_position(matched: usize, width: u16) -> (usize, usize) {
    let width = usize::from(width.max(1));
    ((matched + 1) / width + 1, (matched + 1) % width)
}

fn visible(c: char) -> char {
    match c {
        '\n' => '↵',
        '\t' | '\r' => ' ',
        c => c,
    }
}

/// Goal text hard-wrapped at the area width so that character `i` lands
/// on row `i / width`, column `i % width`.
struct GoalText<'a> {
    segments: Vec<(&'a str, Style)>,
}

impl GoalText<'_> {
    fn rows(&self, width: u16) -> u16 {
        let len: usize = self.segments.iter().map(|(s, _)| s.chars().count()).sum();
        let width = usize::from(width.max(1));
        u16::try_from(len.div_ceil(width)).unwrap_or(u16::MAX)
    }
}

impl Widget for GoalText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = usize::from(area.width.max(1));
        let mut lines: Vec<Line> = vec![];
        let mut current: Vec<Span> = vec![];

        for (text, style) in &self.segments {
            for c in text.chars() {
                current.push(Span::styled(visible(c).to_string(), *style));
                if current.len() == width {
                    lines.push(Line::from(std::mem::take(&mut current)));
                }
            }
        }
        if !current.is_empty() {
            lines.push(Line::from(current));
        }

        Paragraph::new(lines).render(area, buf);
    }
}

struct StatsBox<'a> {
    stats: &'a Stats,
}

impl Widget for StatsBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let stats = self.stats;
        let lines = vec![
            Line::from(format!("Accuracy: {:.2}%", stats.accuracy_percent())),
            Line::from(format!("Elapsed = {:.2}s", stats.elapsed_secs())),
            Line::from(format!("WPM = {:.2}", stats.wpm())),
            Line::from(format!("Characters:  {}/{}", stats.matched, stats.goal_len)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Right)
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL))
            .render(area, buf);
    }
}

/// Below both the goal text and the fixed stats row
fn stats_area(area: Rect, text_rows: u16) -> Rect {
    let y = area.y + STATS_START_ROW.max(text_rows.saturating_add(1));
    Rect::new(area.x, y, STATS_WIDTH, STATS_HEIGHT).intersection(area)
}

fn legend_area(area: Rect, above: Rect) -> Rect {
    Rect::new(area.x, above.bottom().saturating_add(1), area.width, 1).intersection(area)
}

/// Renders onto any ratatui backend; `TestBackend` in tests
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(backend: B) -> Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
        })
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Clear the screen and show a single line of text
    pub fn render_message(&mut self, message: &str) -> Result<()> {
        self.terminal.draw(|f| {
            let area = f.area();
            f.render_widget(
                Paragraph::new(message).style(Style::default().fg(Color::Blue)),
                Rect::new(area.x, area.y, area.width, 1).intersection(area),
            );
        })?;
        Ok(())
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn render_progress(&mut self, view: &ProgressView<'_>) -> Result<()> {
        let correct = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);

        self.terminal.draw(|f| {
            let area = f.area();
            let goal = GoalText {
                segments: vec![
                    (view.progress.typed.as_str(), correct),
                    (view.progress.remaining.as_str(), Style::default()),
                ],
            };
            let rows = goal.rows(area.width);
            f.render_widget(goal, area);

            if let Some(stats) = &view.stats {
                f.render_widget(StatsBox { stats }, stats_area(area, rows));
            }

            if view.trailing_cursor {
                let (row, col) = cursor_position(view.matched, area.width);
                let x = u16::try_from(col.saturating_sub(1)).unwrap_or(u16::MAX);
                let y = u16::try_from(row - 1).unwrap_or(u16::MAX);
                f.set_cursor_position(Position::new(
                    area.x + x.min(area.width.saturating_sub(1)),
                    area.y + y.min(area.height.saturating_sub(1)),
                ));
            }
        })?;
        Ok(())
    }

    fn render_finish(&mut self, goal: &str, stats: &Stats) -> Result<()> {
        let finished = Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD);

        self.terminal.draw(|f| {
            let area = f.area();
            let text = GoalText {
                segments: vec![(goal, finished)],
            };
            let rows = text.rows(area.width);
            f.render_widget(text, area);

            let stats_rect = stats_area(area, rows);
            f.render_widget(StatsBox { stats }, stats_rect);
            f.render_widget(
                Paragraph::new(NEXT_ACTION_LEGEND),
                legend_area(area, stats_rect),
            );
        })?;
        Ok(())
    }

    fn render_cancelled(&mut self, progress: &Progress) -> Result<()> {
        let typed = Style::default().fg(Color::Yellow);
        let dim = Style::default().add_modifier(Modifier::DIM);

        self.terminal.draw(|f| {
            let area = f.area();
            let text = GoalText {
                segments: vec![
                    (progress.typed.as_str(), typed),
                    (progress.remaining.as_str(), dim),
                ],
            };
            let rows = text.rows(area.width);
            f.render_widget(text, area);

            let notice = Rect::new(
                area.x,
                area.y + STATS_START_ROW.max(rows.saturating_add(1)),
                area.width,
                1,
            )
            .intersection(area);
            f.render_widget(
                Paragraph::new(Span::styled(
                    "cancelled",
                    Style::default().add_modifier(Modifier::ITALIC),
                )),
                notice,
            );
            f.render_widget(Paragraph::new(NEXT_ACTION_LEGEND), legend_area(area, notice));
        })?;
        Ok(())
    }
}
