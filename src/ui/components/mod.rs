pub mod confetti;
pub mod dashboard;
pub mod menu;
pub mod number_pad;
pub mod problem_card;
pub mod progress_bar;
