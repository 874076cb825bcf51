use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Addition => "+",
            Operation::Subtraction => "-",
            Operation::Multiplication => "\u{00d7}",
            Operation::Division => "\u{00f7}",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operation::Addition => "Addition",
            Operation::Subtraction => "Subtraction",
            Operation::Multiplication => "Multiplication",
            Operation::Division => "Division",
        }
    }

    /// Exact result of applying the operator, before rounding.
    pub fn apply(self, lhs: i64, rhs: i64) -> f64 {
        let (a, b) = (lhs as f64, rhs as f64);
        match self {
            Operation::Addition => a + b,
            Operation::Subtraction => a - b,
            Operation::Multiplication => a * b,
            Operation::Division => {
                if rhs == 0 {
                    return 0.0;
                }
                a / b
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// What the player entered for a problem and how it was judged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Answer {
    pub value: f64,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Problem {
    pub first_operand: i64,
    pub second_operand: i64,
    pub operation: Operation,
    pub correct_answer: i64,
    pub answer: Option<Answer>,
}

impl Problem {
    pub fn new(operation: Operation, first_operand: i64, second_operand: i64) -> Self {
        let correct_answer = operation.apply(first_operand, second_operand).round() as i64;
        Self {
            first_operand,
            second_operand,
            operation,
            correct_answer,
            answer: None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }

    pub fn submitted_answer(&self) -> Option<f64> {
        self.answer.map(|a| a.value)
    }

    pub fn is_correct(&self) -> Option<bool> {
        self.answer.map(|a| a.correct)
    }

    /// `12 + 7 = ?`
    pub fn prompt(&self) -> String {
        format!(
            "{} {} {} = ?",
            self.first_operand, self.operation, self.second_operand
        )
    }

    /// `12 + 7 = 19`
    pub fn solved(&self) -> String {
        format!(
            "{} {} {} = {}",
            self.first_operand, self.operation, self.second_operand, self.correct_answer
        )
    }
}

/// Whole numbers print bare, anything else with two decimals.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}
