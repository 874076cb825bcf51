use crate::settings::{MAX_GRADE, MIN_GRADE, Settings};

/// One grade harder, capped at the top grade.
pub fn increase_difficulty(settings: &Settings) -> Settings {
    let mut next = settings.clone();
    if settings.grade_level < MAX_GRADE {
        next.grade_level += 1;
    }
    next
}

/// One grade easier, floored at the lowest grade.
pub fn decrease_difficulty(settings: &Settings) -> Settings {
    let mut next = settings.clone();
    if settings.grade_level > MIN_GRADE {
        next.grade_level -= 1;
    }
    next
}

/// Nudge after an answer: up when correct, down otherwise.
pub fn adjust_difficulty(settings: &Settings, correct: bool) -> Settings {
    if correct {
        increase_difficulty(settings)
    } else {
        decrease_difficulty(settings)
    }
}
