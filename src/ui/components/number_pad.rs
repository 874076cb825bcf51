use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

pub const PAD_KEYS: [[&str; 3]; 4] = [
    ["1", "2", "3"],
    ["4", "5", "6"],
    ["7", "8", "9"],
    ["-", "0", "\u{232b}"],
];

pub const PAD_HEIGHT: u16 = 13;

/// On-screen keypad mirroring the keys that edit the answer. Dimmed while
/// input is locked during feedback.
pub struct NumberPad<'a> {
    pub enabled: bool,
    pub theme: &'a Theme,
}

impl<'a> NumberPad<'a> {
    pub fn new(enabled: bool, theme: &'a Theme) -> Self {
        Self { enabled, theme }
    }
}

impl Widget for NumberPad<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let (key_fg, key_border) = if self.enabled {
            (colors.fg(), colors.border())
        } else {
            (colors.text_muted(), colors.accent_dim())
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        for (row, keys) in PAD_KEYS.iter().enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                ])
                .split(rows[row]);

            for (col, key) in keys.iter().enumerate() {
                let block = Block::bordered()
                    .border_style(Style::default().fg(key_border));
                let inner = block.inner(cols[col]);
                block.render(cols[col], buf);
                Paragraph::new(Line::from(Span::styled(
                    *key,
                    Style::default().fg(key_fg).add_modifier(Modifier::BOLD),
                )))
                .alignment(Alignment::Center)
                .render(inner, buf);
            }
        }

        let submit_style = if self.enabled {
            Style::default()
                .fg(colors.bg())
                .bg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.text_muted()).bg(colors.accent_dim())
        };
        Paragraph::new(Line::from(Span::styled(" Enter \u{2192} Submit ", submit_style)))
            .alignment(Alignment::Center)
            .render(rows[4], buf);
    }
}
