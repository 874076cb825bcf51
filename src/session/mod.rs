pub mod game;
pub mod input;
pub mod problem;
pub mod result;
