use crate::engine::scoring::{self, LetterGrade, Score};
use crate::session::game::GameState;
use crate::session::problem::format_number;

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewRow {
    /// `a op b = answer`
    pub equation: String,
    pub correct: bool,
    pub submitted: Option<f64>,
}

impl ReviewRow {
    /// `✓` for right answers, otherwise what the player entered.
    pub fn verdict(&self) -> String {
        if self.correct {
            "\u{2713}".to_string()
        } else {
            let answered = self.submitted.map(format_number).unwrap_or_else(|| "-".into());
            format!("\u{2717} You answered: {answered}")
        }
    }
}

/// Everything the results screen shows about a finished game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSummary {
    pub score: Score,
    pub grade: LetterGrade,
    pub message: &'static str,
    pub celebrate: bool,
    pub rows: Vec<ReviewRow>,
}

impl GameSummary {
    /// `None` when there is nothing to summarize (no problems were played).
    pub fn from_game(game: &GameState, celebration_threshold: f64) -> Option<Self> {
        if game.problems().is_empty() {
            return None;
        }
        let score = game.score();
        let grade = LetterGrade::from_percentage(score.percentage);
        let rows = game
            .problems()
            .iter()
            .map(|p| ReviewRow {
                equation: p.solved(),
                correct: p.is_correct().unwrap_or(false),
                submitted: p.submitted_answer(),
            })
            .collect();

        Some(Self {
            score,
            grade,
            message: grade.message(),
            celebrate: scoring::should_celebrate(score.percentage, celebration_threshold),
            rows,
        })
    }

    /// "You got 7 out of 10 problems correct."
    pub fn headline(&self) -> String {
        format!(
            "You got {} out of {} problems correct.",
            self.score.correct, self.score.total
        )
    }
}
