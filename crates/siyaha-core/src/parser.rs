//! TOML course parser.
//!
//! Loads courses (summary chapters and exams) from TOML files and
//! directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{
    Card, Course, CourseInfo, Exam, Highlight, Question, QuestionKind, SummaryChapter,
    SummarySection, TimelineEvent,
};

/// Intermediate TOML structure for parsing course files.
#[derive(Debug, Deserialize)]
struct TomlCourseFile {
    course: TomlCourseHeader,
    #[serde(default)]
    chapters: Vec<TomlChapter>,
    #[serde(default)]
    exams: Vec<TomlExam>,
}

#[derive(Debug, Deserialize)]
struct TomlCourseHeader {
    id: String,
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    department: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    highlights: Vec<TomlTitledText>,
}

#[derive(Debug, Deserialize)]
struct TomlTitledText {
    title: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct TomlChapter {
    id: u32,
    title: String,
    #[serde(default)]
    sections: Vec<TomlSection>,
}

/// Sections are flat in TOML; the `type` key decides which fields matter.
#[derive(Debug, Deserialize)]
struct TomlSection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    items: Option<Vec<String>>,
    #[serde(default)]
    cards: Option<Vec<TomlCard>>,
    #[serde(default)]
    headers: Option<Vec<String>>,
    #[serde(default)]
    rows: Option<Vec<Vec<String>>>,
    #[serde(default)]
    events: Option<Vec<TomlTitledText>>,
}

#[derive(Debug, Deserialize)]
struct TomlCard {
    #[serde(default)]
    icon: Option<String>,
    title: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct TomlExam {
    id: u32,
    title: String,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: u32,
    text: String,
    options: Vec<String>,
    correct_index: usize,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    kind: Option<String>,
}

/// Parse a single TOML file into a `Course`.
pub fn parse_course(path: &Path) -> Result<Course> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read course file: {}", path.display()))?;

    parse_course_str(&content, path)
}

/// Parse a TOML string into a `Course` (useful for testing and bundled content).
pub fn parse_course_str(content: &str, source_path: &Path) -> Result<Course> {
    let parsed: TomlCourseFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let chapters = parsed
        .chapters
        .into_iter()
        .map(|c| {
            let chapter_id = c.id;
            let sections = c
                .sections
                .into_iter()
                .enumerate()
                .map(|(i, s)| {
                    convert_section(s).with_context(|| {
                        format!("chapter {chapter_id}, section {}", i + 1)
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(SummaryChapter {
                id: c.id,
                title: c.title,
                sections,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let exams = parsed
        .exams
        .into_iter()
        .map(|e| {
            let exam_id = e.id;
            let questions = e
                .questions
                .into_iter()
                .map(|q| {
                    let kind = match q.kind {
                        Some(k) => k.parse::<QuestionKind>().map_err(|e: String| {
                            anyhow::anyhow!("exam {exam_id}, question {}: {e}", q.id)
                        })?,
                        None if q.options.len() == 2 => QuestionKind::Tf,
                        None => QuestionKind::Mcq,
                    };
                    Ok(Question {
                        id: q.id,
                        text: q.text,
                        options: q.options,
                        correct_index: q.correct_index,
                        explanation: q.explanation,
                        kind,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Exam {
                id: e.id,
                title: e.title,
                questions,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let header = parsed.course;
    Ok(Course {
        info: CourseInfo {
            id: header.id,
            title: header.title,
            subtitle: header.subtitle,
            department: header.department,
            author: header.author,
            highlights: header
                .highlights
                .into_iter()
                .map(|h| Highlight {
                    title: h.title,
                    text: h.text,
                })
                .collect(),
        },
        chapters,
        exams,
    })
}

fn convert_section(s: TomlSection) -> Result<SummarySection> {
    fn require<T>(value: Option<T>, kind: &str, field: &str) -> Result<T> {
        value.ok_or_else(|| anyhow::anyhow!("{kind} section is missing `{field}`"))
    }

    let title = s.title;
    let section = match s.kind.as_str() {
        "text" => SummarySection::Text {
            title,
            body: require(s.body, "text", "body")?,
        },
        "list" => SummarySection::List {
            title,
            items: require(s.items, "list", "items")?,
        },
        "cards" => SummarySection::Cards {
            title,
            cards: require(s.cards, "cards", "cards")?
                .into_iter()
                .map(|c| Card {
                    icon: c.icon,
                    title: c.title,
                    text: c.text,
                })
                .collect(),
        },
        "comparison" => SummarySection::Comparison {
            title,
            headers: require(s.headers, "comparison", "headers")?,
            rows: require(s.rows, "comparison", "rows")?,
        },
        "timeline" => SummarySection::Timeline {
            title,
            events: require(s.events, "timeline", "events")?
                .into_iter()
                .map(|e| TimelineEvent {
                    title: e.title,
                    text: e.text,
                })
                .collect(),
        },
        other => anyhow::bail!("unknown section type: {other}"),
    };
    Ok(section)
}

/// Recursively load all `.toml` course files from a directory.
pub fn load_course_directory(dir: &Path) -> Result<Vec<Course>> {
    let mut courses = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            courses.extend(load_course_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_course(&path) {
                Ok(course) => courses.push(course),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(courses)
}

/// A warning from course validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Where the problem is, e.g. "exam 2 / question 5" (if applicable).
    pub location: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn at(location: String, message: impl Into<String>) -> Self {
        Self {
            location: Some(location),
            message: message.into(),
        }
    }
}

/// Validate a course for content problems.
///
/// Anything reported for an exam's questions would make that exam impossible
/// to attempt or score sensibly.
pub fn validate_course(course: &Course) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if course.exams.is_empty() {
        warnings.push(ValidationWarning {
            location: None,
            message: "course has no exams".into(),
        });
    }

    let mut seen_chapters = HashSet::new();
    for chapter in &course.chapters {
        if !seen_chapters.insert(chapter.id) {
            warnings.push(ValidationWarning::at(
                format!("chapter {}", chapter.id),
                format!("duplicate chapter ID: {}", chapter.id),
            ));
        }
        for (i, section) in chapter.sections.iter().enumerate() {
            if let SummarySection::Comparison { headers, rows, .. } = section {
                for (r, row) in rows.iter().enumerate() {
                    if row.len() != headers.len() {
                        warnings.push(ValidationWarning::at(
                            format!("chapter {} / section {}", chapter.id, i + 1),
                            format!(
                                "comparison row {} has {} cells but {} headers",
                                r + 1,
                                row.len(),
                                headers.len()
                            ),
                        ));
                    }
                }
            }
        }
    }

    let mut seen_exams = HashSet::new();
    for exam in &course.exams {
        let exam_loc = format!("exam {}", exam.id);
        if !seen_exams.insert(exam.id) {
            warnings.push(ValidationWarning::at(
                exam_loc.clone(),
                format!("duplicate exam ID: {}", exam.id),
            ));
        }
        if exam.questions.is_empty() {
            warnings.push(ValidationWarning::at(exam_loc.clone(), "exam has no questions"));
        }

        let mut seen_questions = HashSet::new();
        for q in &exam.questions {
            let loc = format!("{exam_loc} / question {}", q.id);
            if !seen_questions.insert(q.id) {
                warnings.push(ValidationWarning::at(
                    loc.clone(),
                    format!("duplicate question ID: {}", q.id),
                ));
            }
            if q.text.trim().is_empty() {
                warnings.push(ValidationWarning::at(loc.clone(), "question text is empty"));
            }
            if q.options.len() < 2 {
                warnings.push(ValidationWarning::at(
                    loc.clone(),
                    format!("question has {} option(s), need at least 2", q.options.len()),
                ));
            }
            if q.kind == QuestionKind::Tf && q.options.len() != 2 {
                warnings.push(ValidationWarning::at(
                    loc.clone(),
                    "true/false question must have exactly 2 options",
                ));
            }
            if !q.has_valid_answer_key() {
                warnings.push(ValidationWarning::at(
                    loc,
                    format!(
                        "correct_index {} is out of range ({} options)",
                        q.correct_index,
                        q.options.len()
                    ),
                ));
            }
        }
    }

    warnings
}
