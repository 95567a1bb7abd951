//! Markdown report, for pasting into chats and notes.

use std::fmt::Write as _;

use siyaha_core::report::QuizResult;
use siyaha_core::statistics::ResultStats;

use crate::ReportHeader;

/// Keep course text on one Markdown line. A newline would end the heading or
/// list item and a line with pipes can render as a table row.
fn inline(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

/// Render a completed quiz as Markdown.
pub fn generate_markdown(result: &QuizResult, header: &ReportHeader) -> String {
    let stats = ResultStats::from_result(result);
    let mut md = String::new();

    let _ = writeln!(md, "# تقرير نتيجة اختبار\n");
    if !header.course_title.is_empty() {
        let _ = writeln!(md, "**المقرر:** {}  ", inline(&header.course_title));
    }
    let byline = header.byline();
    if !byline.is_empty() {
        let _ = writeln!(md, "{}  ", inline(&byline));
    }
    let _ = writeln!(
        md,
        "**الدرجة النهائية:** {} / {}  ",
        stats.score, stats.total
    );
    let verdict = if stats.passed(header.pass_mark) {
        "ناجح"
    } else {
        "راسب"
    };
    let _ = writeln!(md, "**النتيجة:** {verdict}  ");
    let _ = writeln!(md, "**التاريخ:** {}\n", result.completed_at.format("%Y-%m-%d"));

    let _ = writeln!(md, "## ملخص الأداء - {}\n", inline(&result.exam_title));
    let _ = writeln!(md, "| البيان | القيمة | النسبة المئوية |");
    let _ = writeln!(md, "|---|---|---|");
    let _ = writeln!(
        md,
        "| الإجابات الصحيحة | {} | {}% |",
        stats.score, stats.percentage
    );
    let _ = writeln!(
        md,
        "| الإجابات الخاطئة | {} | {}% |\n",
        stats.incorrect, stats.incorrect_percentage
    );

    let _ = writeln!(md, "## تفاصيل الإجابات\n");
    for (i, answer) in result.answers.iter().enumerate() {
        let mark = if answer.is_correct { "✅" } else { "❌" };
        let _ = writeln!(md, "### س{}: {}\n", i + 1, inline(&answer.text));
        let _ = writeln!(md, "- {mark} إجابتك: {}", inline(&answer.user_answer));
        if !answer.is_correct {
            let _ = writeln!(md, "- الإجابة الصحيحة: {}", inline(&answer.correct_answer));
        }
        if !answer.explanation.is_empty() {
            let _ = writeln!(md, "- التعليل: {}", inline(&answer.explanation));
        }
        md.push('\n');
    }

    md
}
