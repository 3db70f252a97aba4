pub mod answer;
pub mod domain;
pub mod level;
pub mod loaders;
pub mod question;

pub use answer::AnswerEvent;
pub use domain::Domain;
pub use level::Level;
pub use loaders::{load_answers, load_questions, save_answers, save_questions};
pub use question::{Question, QuestionOption};
