pub mod game;
pub mod report;
