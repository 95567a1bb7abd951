//! Quiz results with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::QuizAttempt;
use crate::error::QuizError;

/// The recorded outcome of one answered question. Never modified once logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: u32,
    /// Question text, copied so the result stands on its own.
    pub text: String,
    /// Text of the option the learner chose.
    pub user_answer: String,
    /// Text of the correct option.
    pub correct_answer: String,
    pub explanation: String,
    pub is_correct: bool,
}

/// The finalized summary of a completed attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    /// Unique result identifier.
    pub id: Uuid,
    pub exam_id: u32,
    pub exam_title: String,
    /// Course the exam belongs to. Empty for results saved before it was recorded.
    #[serde(default)]
    pub course_id: String,
    #[serde(default)]
    pub course_title: String,
    pub score: u32,
    /// Number of questions in the exam.
    pub total: u32,
    /// One record per question, in question order.
    pub answers: Vec<AnswerRecord>,
    pub completed_at: DateTime<Utc>,
}

/// Build the result for a completed attempt.
///
/// Only fails if the attempt is not complete yet.
pub fn build_result(attempt: &QuizAttempt<'_>) -> Result<QuizResult, QuizError> {
    if !attempt.is_complete() {
        return Err(QuizError::InvalidTransition {
            action: "build a result",
            phase: "in progress",
        });
    }

    let exam = attempt.exam();
    Ok(QuizResult {
        id: Uuid::new_v4(),
        exam_id: exam.id,
        exam_title: exam.title.clone(),
        course_id: String::new(),
        course_title: String::new(),
        score: attempt.score(),
        total: attempt.total() as u32,
        answers: attempt.answers().to_vec(),
        completed_at: Utc::now(),
    })
}

impl QuizResult {
    pub fn correct_count(&self) -> u32 {
        self.answers.iter().filter(|a| a.is_correct).count() as u32
    }

    /// Records of the questions answered wrongly, in question order.
    pub fn mistakes(&self) -> impl Iterator<Item = &AnswerRecord> {
        self.answers.iter().filter(|a| !a.is_correct)
    }

    /// Tag the result with the course that produced it.
    pub fn with_course(mut self, id: &str, title: &str) -> Self {
        self.course_id = id.to_string();
        self.course_title = title.to_string();
        self
    }

    /// File stem for exported reports: `Report_<title>` with whitespace runs
    /// replaced by underscores.
    ///
    /// Path separators and characters that are not valid in file names also
    /// become underscores, so the stem is always a single path component.
    pub fn report_file_stem(&self) -> String {
        let title = self
            .exam_title
            .split_whitespace()
            .map(|word| word.chars().map(file_name_char).collect::<String>())
            .collect::<Vec<_>>()
            .join("_");
        format!("Report_{title}")
    }

    /// Save the result as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize result")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write result to {}", path.display()))?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read result from {}", path.display()))?;
        let result: QuizResult =
            serde_json::from_str(&content).context("failed to parse result JSON")?;
        anyhow::ensure!(
            result.answers.len() == result.total as usize,
            "result has {} answers but {} questions",
            result.answers.len(),
            result.total
        );
        anyhow::ensure!(
            result.correct_count() == result.score,
            "result score {} does not match {} correct answers",
            result.score,
            result.correct_count()
        );
        Ok(result)
    }
}

fn file_name_char(c: char) -> char {
    match c {
        '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
        c if c.is_control() => '_',
        c => c,
    }
}
