//! Quiz engine error types.
//!
//! Every variant is a local, recoverable condition: the rejected call leaves
//! the attempt untouched and the caller simply re-prompts.

use thiserror::Error;

/// Errors raised by the quiz engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// An answer referenced an option the current question does not have.
    #[error("option {index} is out of range for question {question_id} ({option_count} options)")]
    InvalidOptionIndex {
        question_id: u32,
        index: usize,
        option_count: usize,
    },

    /// The operation is not allowed in the attempt's current phase.
    #[error("cannot {action} while the attempt is {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },

    /// An exam with no questions cannot be attempted.
    #[error("exam {exam_id} has no questions")]
    EmptyExam { exam_id: u32 },

    /// A question's answer key does not point at one of its options.
    #[error("question {question_id} marks option {correct_index} as correct but has {option_count} options")]
    MalformedQuestion {
        question_id: u32,
        correct_index: usize,
        option_count: usize,
    },
}

impl QuizError {
    /// Returns `true` if the caller can retry the same attempt with different input.
    ///
    /// Content errors (`EmptyExam`, `MalformedQuestion`) can only be fixed by
    /// correcting the course data.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            QuizError::InvalidOptionIndex { .. } | QuizError::InvalidTransition { .. }
        )
    }
}
