use std::fmt;

/// Absolute tolerance when comparing a typed answer against the exact one.
pub const ANSWER_TOLERANCE: f64 = 1e-4;

pub fn is_correct(value: f64, expected: i64) -> bool {
    (value - expected as f64).abs() < ANSWER_TOLERANCE
}

/// Running tally over explicitly submitted answers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
    pub percentage: f64,
}

impl Score {
    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        }
        self.total += 1;
        self.percentage = percentage(self.correct, self.total);
    }
}

pub fn percentage(correct: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    correct as f64 / total as f64 * 100.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 90.0 {
            LetterGrade::A
        } else if pct >= 80.0 {
            LetterGrade::B
        } else if pct >= 70.0 {
            LetterGrade::C
        } else if pct >= 60.0 {
            LetterGrade::D
        } else {
            LetterGrade::F
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            LetterGrade::A => "Excellent Work!",
            LetterGrade::B => "Great Job!",
            LetterGrade::C => "Good Effort!",
            LetterGrade::D => "Keep Practicing!",
            LetterGrade::F => "Try Again!",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        };
        f.write_str(letter)
    }
}

pub fn should_celebrate(pct: f64, threshold: f64) -> bool {
    pct >= threshold
}
