use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::engine::difficulty;
use crate::engine::scoring::{self, Score};
use crate::generator;
use crate::session::problem::{Answer, Problem};
use crate::settings::Settings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Idle,
    InProgress,
    Over,
}

/// One run of problems from initialization to game over.
///
/// Every operation is a guarded no-op when called in the wrong phase, so the
/// UI never has to check first.
pub struct GameState {
    problems: Vec<Problem>,
    current_index: usize,
    score: Score,
    is_over: bool,
    settings: Settings,
    problem_grade: u8,
    rng: SmallRng,
}

impl GameState {
    pub fn new(rng: SmallRng) -> Self {
        Self {
            problems: Vec::new(),
            current_index: 0,
            score: Score::default(),
            is_over: false,
            settings: Settings::default(),
            problem_grade: Settings::default().grade_level,
            rng,
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }

    pub fn phase(&self) -> GamePhase {
        if self.is_over {
            GamePhase::Over
        } else if self.problems.is_empty() {
            GamePhase::Idle
        } else {
            GamePhase::InProgress
        }
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_problem(&self) -> Option<&Problem> {
        self.problems.get(self.current_index)
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// The session's private copy of the settings, including any difficulty
    /// nudges applied since `initialize`.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Grade the current problems were generated at. Difficulty nudges do
    /// not change it.
    pub fn problem_grade(&self) -> u8 {
        self.problem_grade
    }

    pub fn is_last_problem(&self) -> bool {
        !self.problems.is_empty() && self.current_index + 1 >= self.problems.len()
    }

    pub fn initialize(&mut self, settings: &Settings) {
        self.problems = generator::generate_problems(settings, &mut self.rng);
        self.current_index = 0;
        self.score = Score::default();
        self.is_over = false;
        self.settings = settings.clone();
        self.problem_grade = settings.grade_level;
        info!(
            grade = settings.grade_level,
            problems = self.problems.len(),
            time_limit = settings.time_per_problem_secs,
            "game initialized"
        );
    }

    /// Judges `value` against the current problem. Returns the verdict, or
    /// `None` when the submission was ignored (wrong phase or already
    /// answered).
    pub fn submit_answer(&mut self, value: f64) -> Option<bool> {
        if self.phase() != GamePhase::InProgress {
            return None;
        }
        let problem = self.problems.get_mut(self.current_index)?;
        if problem.is_answered() {
            debug!(index = self.current_index, "duplicate submission ignored");
            return None;
        }

        let correct = scoring::is_correct(value, problem.correct_answer);
        problem.answer = Some(Answer { value, correct });
        self.score.record(correct);
        // Problems are pre-generated, so the new grade only affects a later game.
        self.settings = difficulty::adjust_difficulty(&self.settings, correct);

        info!(
            index = self.current_index,
            value,
            expected = problem.correct_answer,
            correct,
            "answer submitted"
        );
        Some(correct)
    }

    pub fn next_problem(&mut self) {
        if self.phase() != GamePhase::InProgress {
            return;
        }
        if self.current_index + 1 < self.problems.len() {
            self.current_index += 1;
        } else {
            self.end_game();
        }
    }

    /// Unanswered problems are recorded as 0 and wrong. The score is left as
    /// is: it only counts explicit submissions.
    pub fn end_game(&mut self) {
        let mut forced = 0;
        for problem in self.problems.iter_mut().filter(|p| !p.is_answered()) {
            problem.answer = Some(Answer {
                value: 0.0,
                correct: false,
            });
            forced += 1;
        }
        self.is_over = true;
        info!(
            correct = self.score.correct,
            answered = self.score.total,
            unanswered = forced,
            "game over"
        );
    }

    pub fn reset(&mut self) {
        self.problems.clear();
        self.current_index = 0;
        self.score = Score::default();
        self.is_over = false;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::problem::Operation;
    use crate::settings::OperationSet;

    fn game() -> GameState {
        GameState::new(SmallRng::seed_from_u64(42))
    }

    fn addition_settings(count: usize) -> Settings {
        Settings {
            grade_level: 4,
            operations: OperationSet::only(Operation::Addition),
            problem_count: count,
            time_per_problem_secs: 0,
        }
    }

    fn current_answer(game: &GameState) -> f64 {
        game.current_problem().unwrap().correct_answer as f64
    }

    #[test]
    fn test_new_game_is_idle() {
        let g = game();
        assert_eq!(g.phase(), GamePhase::Idle);
        assert!(g.current_problem().is_none());
        assert_eq!(g.score(), Score::default());
    }

    #[test]
    fn test_initialize_starts_fresh() {
        let mut g = game();
        g.initialize(&addition_settings(5));
        assert_eq!(g.phase(), GamePhase::InProgress);
        assert_eq!(g.problems().len(), 5);
        assert_eq!(g.current_index(), 0);
        assert!(g.problems().iter().all(|p| !p.is_answered()));
    }

    #[test]
    fn test_reinitialize_discards_previous_run() {
        let mut g = game();
        g.initialize(&addition_settings(2));
        let v = current_answer(&g);
        g.submit_answer(v);
        g.next_problem();
        g.initialize(&addition_settings(3));
        assert_eq!(g.current_index(), 0);
        assert_eq!(g.score().total, 0);
        assert!(!g.is_over());
        assert_eq!(g.settings().grade_level, 4);
    }

    #[test]
    fn test_submit_correct_and_incorrect() {
        let mut g = game();
        g.initialize(&addition_settings(2));
        let v = current_answer(&g);
        assert_eq!(g.submit_answer(v), Some(true));
        assert_eq!(g.problems()[0].is_correct(), Some(true));
        g.next_problem();
        let v = current_answer(&g);
        assert_eq!(g.submit_answer(v + 1.0), Some(false));
        assert_eq!(g.problems()[1].submitted_answer(), Some(v + 1.0));
        assert_eq!(g.score().correct, 1);
        assert_eq!(g.score().total, 2);
        assert!((g.score().percentage - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let mut g = game();
        g.initialize(&addition_settings(2));
        let v = current_answer(&g);
        assert_eq!(g.submit_answer(v), Some(true));
        let score = g.score();
        assert_eq!(g.submit_answer(v + 5.0), None);
        assert_eq!(g.score(), score);
        assert_eq!(g.problems()[0].submitted_answer(), Some(v));
        // The ignored call must not nudge difficulty either.
        assert_eq!(g.settings().grade_level, 5);
    }

    #[test]
    fn test_submit_in_idle_is_ignored() {
        let mut g = game();
        assert_eq!(g.submit_answer(3.0), None);
        assert_eq!(g.score().total, 0);
    }

    #[test]
    fn test_submit_after_game_over_is_ignored() {
        let mut g = game();
        g.initialize(&addition_settings(1));
        g.end_game();
        assert_eq!(g.submit_answer(1.0), None);
        assert_eq!(g.score().total, 0);
    }

    #[test]
    fn test_difficulty_ramp_does_not_touch_pending_problems() {
        let mut g = game();
        g.initialize(&addition_settings(10));
        let before: Vec<Problem> = g.problems().to_vec();
        for _ in 0..4 {
            let v = current_answer(&g);
            g.submit_answer(v);
            g.next_problem();
        }
        assert_eq!(g.settings().grade_level, 8);
        assert_eq!(g.problem_grade(), 4);
        for (i, p) in g.problems().iter().enumerate().skip(4) {
            assert_eq!(p.first_operand, before[i].first_operand);
            assert_eq!(p.second_operand, before[i].second_operand);
        }
    }

    #[test]
    fn test_wrong_answers_lower_session_grade() {
        let mut g = game();
        let mut s = addition_settings(3);
        s.grade_level = 6;
        g.initialize(&s);
        g.submit_answer(-1.0);
        assert_eq!(g.settings().grade_level, 5);
    }

    #[test]
    fn test_next_problem_on_last_ends_game() {
        let mut g = game();
        g.initialize(&addition_settings(2));
        g.next_problem();
        assert_eq!(g.current_index(), 1);
        assert!(g.is_last_problem());
        g.next_problem();
        assert!(g.is_over());
        assert_eq!(g.current_index(), 1);
        // Advancing past the end stays put.
        g.next_problem();
        assert_eq!(g.current_index(), 1);
    }

    #[test]
    fn test_end_game_forces_unanswered_wrong_without_scoring() {
        let mut g = game();
        g.initialize(&addition_settings(3));
        let v = current_answer(&g);
        g.submit_answer(v);
        g.end_game();
        assert_eq!(g.phase(), GamePhase::Over);
        assert_eq!(g.problems()[0].is_correct(), Some(true));
        for p in &g.problems()[1..] {
            assert_eq!(p.submitted_answer(), Some(0.0));
            assert_eq!(p.is_correct(), Some(false));
        }
        assert_eq!(g.score().total, 1);
        assert_eq!(g.score().correct, 1);
    }

    #[test]
    fn test_reset_returns_to_idle_and_keeps_settings() {
        let mut g = game();
        g.initialize(&addition_settings(2));
        let v = current_answer(&g);
        g.submit_answer(v);
        g.end_game();
        g.reset();
        assert_eq!(g.phase(), GamePhase::Idle);
        assert!(g.problems().is_empty());
        assert_eq!(g.score(), Score::default());
        assert_eq!(g.settings().grade_level, 5);
    }
}
