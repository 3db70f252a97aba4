pub mod json_loader;

pub use json_loader::{load_answers, load_questions, save_answers, save_questions};
