pub mod heuristic;
pub mod inventory;
pub mod quality;
pub mod tables;

pub use heuristic::summarize_heuristic;
pub use quality::{assess, assess_text};
