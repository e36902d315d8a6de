//! Backend-agnostic domain types: keys, backend mode, and quiz records.

pub mod key;
pub mod mode;
pub mod quiz;

pub use key::{Collection, CLASSES_KEY, QUESTIONS_KEY, TOPICS_KEY};
pub use mode::BackendMode;
pub use quiz::{default_questions, default_topics, Question, Topic};
