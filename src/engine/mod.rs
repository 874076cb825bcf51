pub mod difficulty;
pub mod scoring;
