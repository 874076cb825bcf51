use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::ui::components::number_pad::PAD_HEIGHT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Full,    // ≥60 cols and ≥26 rows: progress, problem, number pad
    Compact, // smaller: progress and problem only, pad hidden
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 60 && area.height >= 26 {
            LayoutTier::Full
        } else {
            LayoutTier::Compact
        }
    }

    pub fn show_number_pad(&self) -> bool {
        *self == LayoutTier::Full
    }
}

pub struct GameLayout {
    pub header: Rect,
    pub progress: Rect,
    pub problem: Rect,
    pub pad: Option<Rect>,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl GameLayout {
    pub fn new(area: Rect) -> Self {
        let tier = LayoutTier::from_area(area);

        let mut constraints = vec![
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(7),
        ];
        if tier.show_number_pad() {
            constraints.push(Constraint::Length(PAD_HEIGHT));
        }
        constraints.push(Constraint::Length(1));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let pad = tier
            .show_number_pad()
            .then(|| centered_columns(rows[3], 34));

        Self {
            header: rows[0],
            progress: rows[1],
            problem: rows[2],
            pad,
            footer: rows[rows.len() - 1],
            tier,
        }
    }
}

/// A horizontally centered slice of `area`, at most `width` columns wide.
pub fn centered_columns(area: Rect, width: u16) -> Rect {
    let w = width.min(area.width);
    Rect::new(area.x + (area.width - w) / 2, area.y, w, area.height)
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 48;
    const MIN_POPUP_HEIGHT: u16 = 16;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 80, 30)), LayoutTier::Full);
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 59, 30)), LayoutTier::Compact);
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 80, 25)), LayoutTier::Compact);
    }

    #[test]
    fn test_game_layout_hides_pad_when_small() {
        let layout = GameLayout::new(Rect::new(0, 0, 50, 15));
        assert!(layout.pad.is_none());
        assert_eq!(layout.footer.y, 14);
    }

    #[test]
    fn test_game_layout_centers_pad() {
        let layout = GameLayout::new(Rect::new(0, 0, 100, 40));
        let pad = layout.pad.unwrap();
        assert_eq!(pad.width, 34);
        assert_eq!(pad.x, 33);
    }

    #[test]
    fn test_pack_hint_lines_wraps() {
        let lines = pack_hint_lines(&["[Enter] Submit", "[Esc] Clear", "[q] Quit"], 30);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.chars().count() <= 30));
    }

    #[test]
    fn test_centered_rect_fits_small_area() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_rect(60, 70, area);
        assert_eq!(r, area);
    }
}
