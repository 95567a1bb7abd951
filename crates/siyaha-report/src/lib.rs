//! siyaha-report: printable result reports.
//!
//! Renders a completed quiz result as a self-contained A4 HTML page (ready
//! for the browser's print-to-PDF) or as Markdown.

pub mod html;
pub mod markdown;

use siyaha_core::model::{Course, CourseInfo};
use siyaha_core::report::QuizResult;
use siyaha_core::statistics::DEFAULT_PASS_MARK;

/// Course details printed in the report header and footer.
#[derive(Debug, Clone)]
pub struct ReportHeader {
    pub course_title: String,
    pub department: String,
    pub author: String,
    /// Percentage at which the result is shown as a pass.
    pub pass_mark: u32,
}

impl Default for ReportHeader {
    fn default() -> Self {
        Self {
            course_title: String::new(),
            department: String::new(),
            author: String::new(),
            pass_mark: DEFAULT_PASS_MARK,
        }
    }
}

impl ReportHeader {
    pub fn from_course(info: &CourseInfo) -> Self {
        Self {
            course_title: info.title.clone(),
            department: info.department.clone(),
            author: info.author.clone(),
            ..Self::default()
        }
    }

    /// Header for a saved result rendered against `course`.
    ///
    /// The course details are used only when the result came from that course.
    /// Otherwise the header carries the course title stored in the result.
    /// Results without a recorded course match when the exam id and title agree.
    pub fn for_result(result: &QuizResult, course: &Course) -> Self {
        let same_course = if result.course_id.is_empty() {
            course
                .exam(result.exam_id)
                .is_some_and(|exam| exam.title == result.exam_title)
        } else {
            result.course_id == course.info.id
        };

        if same_course {
            Self::from_course(&course.info)
        } else {
            Self {
                course_title: result.course_title.clone(),
                ..Self::default()
            }
        }
    }

    pub fn with_pass_mark(mut self, pass_mark: u32) -> Self {
        self.pass_mark = pass_mark;
        self
    }

    /// "department | author", skipping empty parts.
    pub(crate) fn byline(&self) -> String {
        [self.department.as_str(), self.author.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
