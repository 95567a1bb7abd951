//! Quiz engine: the state machine for one exam attempt.
//!
//! An attempt moves through `AwaitingAnswer(i)` → `Answered(i, chosen)` →
//! `AwaitingAnswer(i + 1)` … until the last question is advanced past, at
//! which point it becomes `Complete` and yields a [`QuizResult`].
//!
//! Score and the answer log are mutated only inside a successful
//! [`QuizAttempt::submit_answer`]; every rejected call leaves the attempt as
//! it was.

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Exam, Question};
use crate::report::{build_result, AnswerRecord, QuizResult};

/// Where an attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum QuizPhase {
    /// Question `index` is displayed and no option has been chosen yet.
    AwaitingAnswer { index: usize },
    /// Question `index` has been answered with option `chosen`.
    Answered { index: usize, chosen: usize },
    /// Every question has been answered and advanced past.
    Complete,
}

impl QuizPhase {
    fn describe(&self) -> &'static str {
        match self {
            QuizPhase::AwaitingAnswer { .. } => "awaiting an answer",
            QuizPhase::Answered { .. } => "already answered",
            QuizPhase::Complete => "complete",
        }
    }
}

/// Immediate feedback for a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub chosen_index: usize,
    pub correct_index: usize,
    pub correct_answer: String,
    pub explanation: String,
    /// Running score after this answer.
    pub score: u32,
}

/// Outcome of [`QuizAttempt::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Moved on to the question at this index.
    Next(usize),
    /// The last question was advanced past.
    Complete(QuizResult),
}

/// State of one traversal of an exam.
///
/// The attempt borrows the exam for its whole lifetime; the exam itself is
/// never modified.
#[derive(Debug, Clone)]
pub struct QuizAttempt<'a> {
    exam: &'a Exam,
    index: usize,
    selected: Option<usize>,
    score: u32,
    answers: Vec<AnswerRecord>,
    complete: bool,
}

impl<'a> QuizAttempt<'a> {
    /// Start a fresh attempt at question 0.
    ///
    /// Fails with [`QuizError::EmptyExam`] for an exam without questions and
    /// with [`QuizError::MalformedQuestion`] if any answer key is out of range.
    pub fn new(exam: &'a Exam) -> Result<Self, QuizError> {
        if exam.questions.is_empty() {
            return Err(QuizError::EmptyExam { exam_id: exam.id });
        }
        if let Some(q) = exam.questions.iter().find(|q| !q.has_valid_answer_key()) {
            return Err(QuizError::MalformedQuestion {
                question_id: q.id,
                correct_index: q.correct_index,
                option_count: q.options.len(),
            });
        }

        tracing::debug!(exam_id = exam.id, questions = exam.questions.len(), "attempt started");

        Ok(Self {
            exam,
            index: 0,
            selected: None,
            score: 0,
            answers: Vec::with_capacity(exam.questions.len()),
            complete: false,
        })
    }

    pub fn exam(&self) -> &'a Exam {
        self.exam
    }

    pub fn phase(&self) -> QuizPhase {
        if self.complete {
            QuizPhase::Complete
        } else if let Some(chosen) = self.selected {
            QuizPhase::Answered {
                index: self.index,
                chosen,
            }
        } else {
            QuizPhase::AwaitingAnswer { index: self.index }
        }
    }

    /// The question on screen, or `None` once the attempt is complete.
    pub fn current_question(&self) -> Option<&'a Question> {
        if self.complete {
            None
        } else {
            self.exam.questions.get(self.index)
        }
    }

    /// 0-based index of the current question.
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// 1-based question number for display.
    pub fn question_number(&self) -> usize {
        self.index + 1
    }

    pub fn total(&self) -> usize {
        self.exam.questions.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn is_last_question(&self) -> bool {
        self.index + 1 == self.total()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Fraction of questions already advanced past, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.complete {
            1.0
        } else {
            self.index as f64 / self.total() as f64
        }
    }

    /// Lock in an answer for the current question.
    pub fn submit_answer(&mut self, option_index: usize) -> Result<AnswerFeedback, QuizError> {
        let phase = self.phase();
        let QuizPhase::AwaitingAnswer { index } = phase else {
            return Err(QuizError::InvalidTransition {
                action: "submit an answer",
                phase: phase.describe(),
            });
        };

        let question = &self.exam.questions[index];
        let Some(chosen_text) = question.options.get(option_index) else {
            return Err(QuizError::InvalidOptionIndex {
                question_id: question.id,
                index: option_index,
                option_count: question.options.len(),
            });
        };
        // Answer keys were checked in `new`.
        let correct_text = &question.options[question.correct_index];

        let is_correct = option_index == question.correct_index;
        if is_correct {
            self.score += 1;
        }

        self.answers.push(AnswerRecord {
            question_id: question.id,
            text: question.text.clone(),
            user_answer: chosen_text.clone(),
            correct_answer: correct_text.clone(),
            explanation: question.explanation.clone(),
            is_correct,
        });
        self.selected = Some(option_index);

        tracing::debug!(
            question_id = question.id,
            option_index,
            is_correct,
            score = self.score,
            "answer submitted"
        );

        Ok(AnswerFeedback {
            is_correct,
            chosen_index: option_index,
            correct_index: question.correct_index,
            correct_answer: correct_text.clone(),
            explanation: question.explanation.clone(),
            score: self.score,
        })
    }

    /// Move past the answered question.
    ///
    /// On the last question this completes the attempt and returns the result.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        let phase = self.phase();
        let QuizPhase::Answered { index, .. } = phase else {
            return Err(QuizError::InvalidTransition {
                action: "advance",
                phase: phase.describe(),
            });
        };

        if index + 1 == self.total() {
            self.complete = true;
            self.selected = None;
            tracing::debug!(
                exam_id = self.exam.id,
                score = self.score,
                total = self.total(),
                "attempt complete"
            );
            return build_result(self).map(Advance::Complete);
        }

        self.index = index + 1;
        self.selected = None;
        Ok(Advance::Next(self.index))
    }

    /// Abandon the attempt. No result is produced.
    pub fn exit(self) -> Result<(), QuizError> {
        if self.complete {
            return Err(QuizError::InvalidTransition {
                action: "exit",
                phase: "complete",
            });
        }
        tracing::debug!(
            exam_id = self.exam.id,
            answered = self.answers.len(),
            "attempt abandoned"
        );
        Ok(())
    }
}
