use std::rc::Rc;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::scoring::LetterGrade;
use crate::session::result::GameSummary;
use crate::ui::layout::pack_hint_lines;
use crate::ui::theme::Theme;

const HINTS: [&str; 4] = [
    "[r/Enter] Play again",
    "[c] Change settings",
    "[\u{2191}\u{2193}] Scroll",
    "[q] Menu",
];

pub struct Dashboard<'a> {
    pub summary: &'a GameSummary,
    pub scroll: usize,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(summary: &'a GameSummary, scroll: usize, theme: &'a Theme) -> Self {
        Self {
            summary,
            scroll,
            theme,
        }
    }

    /// Number of review rows that fit when the dashboard fills `area`.
    pub fn review_height(area: Rect) -> usize {
        let inner = Block::bordered().inner(area);
        sections(inner)[4].height as usize
    }

    fn grade_color(&self) -> Color {
        let colors = &self.theme.colors;
        match self.summary.grade {
            LetterGrade::A | LetterGrade::B => colors.success(),
            LetterGrade::C | LetterGrade::D => colors.warning(),
            LetterGrade::F => colors.error(),
        }
    }
}

fn sections(inner: Rect) -> Rc<[Rect]> {
    let hint_rows = pack_hint_lines(&HINTS, inner.width as usize).len() as u16;
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(hint_rows),
        ])
        .split(inner)
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Game Over! ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let hint_lines = pack_hint_lines(&HINTS, inner.width as usize);
        let layout = sections(inner);

        let grade_color = self.grade_color();
        let pct_text = format!("{:.0}%", self.summary.score.percentage);
        Paragraph::new(Line::from(Span::styled(
            pct_text,
            Style::default()
                .fg(grade_color)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        let grade_line = Line::from(vec![
            Span::styled("Grade ", Style::default().fg(colors.fg())),
            Span::styled(
                self.summary.grade.to_string(),
                Style::default()
                    .fg(grade_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", self.summary.message),
                Style::default().fg(colors.highlight()),
            ),
        ]);
        Paragraph::new(grade_line)
            .alignment(Alignment::Center)
            .render(layout[1], buf);

        Paragraph::new(Line::from(Span::styled(
            self.summary.headline(),
            Style::default().fg(colors.fg()),
        )))
        .alignment(Alignment::Center)
        .render(layout[2], buf);

        Paragraph::new(Line::from(Span::styled(
            "  Review",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .render(layout[3], buf);

        let visible = layout[4].height as usize;
        let start = self
            .scroll
            .min(self.summary.rows.len().saturating_sub(visible));
        let rows: Vec<Line> = self
            .summary
            .rows
            .iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .map(|(i, row)| {
                let verdict_color = if row.correct {
                    colors.success()
                } else {
                    colors.error()
                };
                Line::from(vec![
                    Span::styled(
                        format!("  {:>2}. ", i + 1),
                        Style::default().fg(colors.text_muted()),
                    ),
                    Span::styled(
                        format!("{:<18}", row.equation),
                        Style::default().fg(colors.fg()),
                    ),
                    Span::styled(row.verdict(), Style::default().fg(verdict_color)),
                ])
            })
            .collect();
        Paragraph::new(rows).render(layout[4], buf);

        let hints: Vec<Line> = hint_lines
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.accent()))))
            .collect();
        Paragraph::new(hints).render(layout[5], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scoring::Score;
    use crate::session::result::ReviewRow;

    fn summary() -> GameSummary {
        GameSummary {
            score: Score {
                correct: 1,
                total: 2,
                percentage: 50.0,
            },
            grade: LetterGrade::F,
            message: LetterGrade::F.message(),
            celebrate: false,
            rows: vec![
                ReviewRow {
                    equation: "3 + 4 = 7".to_string(),
                    correct: true,
                    submitted: Some(7.0),
                },
                ReviewRow {
                    equation: "9 - 2 = 7".to_string(),
                    correct: false,
                    submitted: Some(6.0),
                },
            ],
        }
    }

    #[test]
    fn test_dashboard_shows_score_and_review() {
        let theme = Theme::default();
        let summary = summary();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        Dashboard::new(&summary, 0, &theme).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();

        assert!(text.contains("50%"));
        assert!(text.contains("Try Again!"));
        assert!(text.contains("You got 1 out of 2 problems correct."));
        assert!(text.contains("3 + 4 = 7"));
        assert!(text.contains("You answered: 6"));
    }

    #[test]
    fn test_review_height_tracks_area() {
        let short = Dashboard::review_height(Rect::new(0, 0, 60, 20));
        let tall = Dashboard::review_height(Rect::new(0, 0, 60, 30));
        assert!(short > 0);
        assert_eq!(tall - short, 10);
    }
}
