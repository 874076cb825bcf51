use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::problem::Problem;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl Feedback {
    pub fn from_verdict(correct: bool) -> Self {
        if correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        }
    }
}

/// The current problem, the player's answer so far, and the verdict once
/// one is in.
pub struct ProblemCard<'a> {
    pub problem: &'a Problem,
    pub number: usize,
    pub total: usize,
    pub input: &'a str,
    pub feedback: Option<Feedback>,
    pub theme: &'a Theme,
}

impl<'a> ProblemCard<'a> {
    pub fn new(
        problem: &'a Problem,
        number: usize,
        total: usize,
        input: &'a str,
        feedback: Option<Feedback>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            problem,
            number,
            total,
            input,
            feedback,
            theme,
        }
    }
}

impl Widget for ProblemCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let border = match self.feedback {
            Some(Feedback::Correct) => colors.success(),
            Some(Feedback::Incorrect) => colors.error(),
            None => colors.accent(),
        };
        let block = Block::bordered()
            .title(format!(" Problem {} of {} ", self.number, self.total))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        // The answer stays hidden until the verdict is shown.
        let (equation, equation_color) = match self.feedback {
            None => (self.problem.prompt(), colors.problem()),
            Some(Feedback::Correct) => (self.problem.solved(), colors.success()),
            Some(Feedback::Incorrect) => (self.problem.solved(), colors.error()),
        };
        Paragraph::new(Line::from(Span::styled(
            equation,
            Style::default()
                .fg(equation_color)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        let shown = if self.input.is_empty() { " " } else { self.input };
        let input_line = Line::from(vec![
            Span::styled("Your answer: ", Style::default().fg(colors.text_muted())),
            Span::styled(
                format!("[ {shown} ]"),
                Style::default()
                    .fg(colors.highlight())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(input_line)
            .alignment(Alignment::Center)
            .render(layout[3], buf);

        let verdict = match self.feedback {
            Some(Feedback::Correct) => Some(Span::styled(
                "Correct!",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )),
            Some(Feedback::Incorrect) => Some(Span::styled(
                format!("Not quite. The answer is {}.", self.problem.correct_answer),
                Style::default()
                    .fg(colors.error())
                    .add_modifier(Modifier::BOLD),
            )),
            None => None,
        };
        if let Some(span) = verdict {
            Paragraph::new(Line::from(span))
                .alignment(Alignment::Center)
                .render(layout[4], buf);
        }
    }
}
