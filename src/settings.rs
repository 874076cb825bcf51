use serde::{Deserialize, Serialize};

use crate::session::problem::Operation;

pub const MIN_GRADE: u8 = 4;
pub const MAX_GRADE: u8 = 8;
pub const MIN_PROBLEMS: usize = 1;
pub const MAX_PROBLEMS: usize = 50;
pub const MAX_TIME_PER_PROBLEM: u32 = 120;
pub const TIME_STEP: u32 = 5;

/// Which operations a game may draw from. Persisted as four named flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSet {
    #[serde(default)]
    pub addition: bool,
    #[serde(default)]
    pub subtraction: bool,
    #[serde(default)]
    pub multiplication: bool,
    #[serde(default)]
    pub division: bool,
}

impl OperationSet {
    pub fn all() -> Self {
        Self {
            addition: true,
            subtraction: true,
            multiplication: true,
            division: true,
        }
    }

    pub fn only(op: Operation) -> Self {
        let mut set = Self::default();
        set.set(op, true);
        set
    }

    pub fn contains(&self, op: Operation) -> bool {
        match op {
            Operation::Addition => self.addition,
            Operation::Subtraction => self.subtraction,
            Operation::Multiplication => self.multiplication,
            Operation::Division => self.division,
        }
    }

    pub fn set(&mut self, op: Operation, enabled: bool) {
        let flag = match op {
            Operation::Addition => &mut self.addition,
            Operation::Subtraction => &mut self.subtraction,
            Operation::Multiplication => &mut self.multiplication,
            Operation::Division => &mut self.division,
        };
        *flag = enabled;
    }

    pub fn toggle(&mut self, op: Operation) {
        self.set(op, !self.contains(op));
    }

    /// Enabled operations in their canonical order.
    pub fn enabled(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.contains(*op))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        !(self.addition || self.subtraction || self.multiplication || self.division)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_grade_level")]
    pub grade_level: u8,
    #[serde(default = "default_operations")]
    pub operations: OperationSet,
    #[serde(default = "default_problem_count")]
    pub problem_count: usize,
    #[serde(default = "default_time_per_problem_secs")]
    pub time_per_problem_secs: u32,
}

fn default_grade_level() -> u8 {
    MIN_GRADE
}
fn default_operations() -> OperationSet {
    OperationSet::all()
}
fn default_problem_count() -> usize {
    10
}
fn default_time_per_problem_secs() -> u32 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grade_level: default_grade_level(),
            operations: default_operations(),
            problem_count: default_problem_count(),
            time_per_problem_secs: default_time_per_problem_secs(),
        }
    }
}

impl Settings {
    pub fn has_time_limit(&self) -> bool {
        self.time_per_problem_secs > 0
    }

    /// A game can only start with at least one operation enabled.
    pub fn can_start(&self) -> bool {
        !self.operations.is_empty()
    }

    /// Clamp every bounded field into its allowed range.
    pub fn validate(&mut self) {
        self.grade_level = self.grade_level.clamp(MIN_GRADE, MAX_GRADE);
        self.problem_count = self.problem_count.clamp(MIN_PROBLEMS, MAX_PROBLEMS);
        self.time_per_problem_secs = self.time_per_problem_secs.min(MAX_TIME_PER_PROBLEM);
    }

    pub fn next_grade(&mut self) {
        self.grade_level = if self.grade_level >= MAX_GRADE {
            MIN_GRADE
        } else {
            self.grade_level + 1
        };
    }

    pub fn prev_grade(&mut self) {
        self.grade_level = if self.grade_level <= MIN_GRADE {
            MAX_GRADE
        } else {
            self.grade_level - 1
        };
    }

    pub fn more_problems(&mut self) {
        self.problem_count = (self.problem_count + 1).min(MAX_PROBLEMS);
    }

    pub fn fewer_problems(&mut self) {
        self.problem_count = self.problem_count.saturating_sub(1).max(MIN_PROBLEMS);
    }

    pub fn more_time(&mut self) {
        self.time_per_problem_secs =
            (self.time_per_problem_secs + TIME_STEP).min(MAX_TIME_PER_PROBLEM);
    }

    pub fn less_time(&mut self) {
        self.time_per_problem_secs = self.time_per_problem_secs.saturating_sub(TIME_STEP);
    }
}
