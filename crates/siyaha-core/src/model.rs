//! Core data model types for siyaha.
//!
//! These types describe the read-only course catalog: summary chapters for
//! study and exams for practice. Nothing in the engine mutates them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a question is a regular multiple-choice item or a true/false item.
///
/// True/false is just the two-option case; scoring treats both the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Mcq,
    Tf,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Mcq => write!(f, "mcq"),
            QuestionKind::Tf => write!(f, "tf"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mcq" | "multiple-choice" | "multiple_choice" => Ok(QuestionKind::Mcq),
            "tf" | "true-false" | "true_false" => Ok(QuestionKind::Tf),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

/// A single exam question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within its exam.
    pub id: u32,
    /// The prompt shown to the learner.
    pub text: String,
    /// Options in display order.
    pub options: Vec<String>,
    /// 0-based index of the correct option.
    pub correct_index: usize,
    /// Shown after the question is answered.
    #[serde(default)]
    pub explanation: String,
    pub kind: QuestionKind,
}

impl Question {
    /// Text of the correct option, if the answer key is valid.
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }

    /// Whether `correct_index` points at one of the options.
    pub fn has_valid_answer_key(&self) -> bool {
        self.correct_index < self.options.len()
    }
}

/// An ordered, named collection of questions attempted in one sitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Exam {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// A card inside a `cards` summary section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Optional icon name (Font Awesome style, e.g. `fa-mountain`).
    #[serde(default)]
    pub icon: Option<String>,
    pub title: String,
    pub text: String,
}

/// One entry of a `timeline` summary section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub title: String,
    pub text: String,
}

/// A block of study material inside a chapter.
///
/// Each kind carries its own payload; renderers match on it exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SummarySection {
    Text {
        #[serde(default)]
        title: Option<String>,
        body: String,
    },
    List {
        #[serde(default)]
        title: Option<String>,
        items: Vec<String>,
    },
    Cards {
        #[serde(default)]
        title: Option<String>,
        cards: Vec<Card>,
    },
    Comparison {
        #[serde(default)]
        title: Option<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Timeline {
        #[serde(default)]
        title: Option<String>,
        events: Vec<TimelineEvent>,
    },
}

impl SummarySection {
    pub fn title(&self) -> Option<&str> {
        match self {
            SummarySection::Text { title, .. }
            | SummarySection::List { title, .. }
            | SummarySection::Cards { title, .. }
            | SummarySection::Comparison { title, .. }
            | SummarySection::Timeline { title, .. } => title.as_deref(),
        }
    }

    /// The section's type tag as written in course files.
    pub fn kind(&self) -> &'static str {
        match self {
            SummarySection::Text { .. } => "text",
            SummarySection::List { .. } => "list",
            SummarySection::Cards { .. } => "cards",
            SummarySection::Comparison { .. } => "comparison",
            SummarySection::Timeline { .. } => "timeline",
        }
    }
}

/// A chapter of the course summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryChapter {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<SummarySection>,
}

/// A highlight shown on the home screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub title: String,
    pub text: String,
}

/// Descriptive header of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// Department or faculty offering the course.
    #[serde(default)]
    pub department: String,
    /// Course author or supervisor.
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

/// The full course catalog: study chapters plus exams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub info: CourseInfo,
    #[serde(default)]
    pub chapters: Vec<SummaryChapter>,
    #[serde(default)]
    pub exams: Vec<Exam>,
}

impl Course {
    /// Look up an exam by identifier.
    pub fn exam(&self, id: u32) -> Option<&Exam> {
        self.exams.iter().find(|e| e.id == id)
    }

    /// Look up a chapter by identifier.
    pub fn chapter(&self, id: u32) -> Option<&SummaryChapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    pub fn question_count(&self) -> usize {
        self.exams.iter().map(Exam::question_count).sum()
    }
}
