//! siyaha-core: Course model, quiz engine, and result scoring.
//!
//! This crate defines the course catalog, the state machine that drives a
//! single exam attempt, and the pure derivations that turn a finished attempt
//! into a scored result.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod statistics;
pub mod traits;

pub use engine::{Advance, AnswerFeedback, QuizAttempt, QuizPhase};
pub use error::QuizError;
pub use model::{Course, Exam, Question, QuestionKind, SummaryChapter, SummarySection};
pub use report::{AnswerRecord, QuizResult};
pub use statistics::ResultStats;
