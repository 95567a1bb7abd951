//! HTML report generator.
//!
//! Produces a self-contained, right-to-left A4 page with all CSS inlined.
//! Printing it from a browser gives the PDF report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use siyaha_core::report::QuizResult;
use siyaha_core::statistics::ResultStats;

use crate::ReportHeader;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report for a completed quiz.
pub fn generate_html(result: &QuizResult, header: &ReportHeader) -> String {
    let stats = ResultStats::from_result(result);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"ar\" dir=\"rtl\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>تقرير نتيجة اختبار - {}</title>\n",
        html_escape(&result.exam_title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n<main class=\"page\">\n");

    // Header
    html.push_str("<header>\n<div>\n");
    html.push_str("<h1>تقرير نتيجة اختبار</h1>\n");
    if !header.course_title.is_empty() {
        html.push_str(&format!(
            "<p class=\"course\">المقرر: {}</p>\n",
            html_escape(&header.course_title)
        ));
    }
    let byline = header.byline();
    if !byline.is_empty() {
        html.push_str(&format!("<p class=\"meta\">{}</p>\n", html_escape(&byline)));
    }
    html.push_str("</div>\n");
    let (verdict_class, verdict) = if stats.passed(header.pass_mark) {
        ("pass", "ناجح")
    } else {
        ("fail", "راسب")
    };
    html.push_str(&format!(
        "<div class=\"score-box\"><p class=\"meta\">الدرجة النهائية</p><p class=\"score\">{} <span>/ {}</span></p><p class=\"verdict {verdict_class}\">{verdict}</p><p class=\"meta\">{}</p></div>\n",
        stats.score,
        stats.total,
        result.completed_at.format("%Y-%m-%d")
    ));
    html.push_str("</header>\n");

    // Summary
    html.push_str("<section class=\"summary\">\n");
    html.push_str(&format!(
        "<h2>ملخص الأداء - {}</h2>\n",
        html_escape(&result.exam_title)
    ));
    html.push_str(&generate_donut_chart(&stats, header.pass_mark));
    html.push_str("<table>\n");
    html.push_str("<thead><tr><th>البيان</th><th>القيمة</th><th>النسبة المئوية</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    html.push_str(&format!(
        "<tr><td>الإجابات الصحيحة</td><td class=\"pass\">{}</td><td>{}%</td></tr>\n",
        stats.score, stats.percentage
    ));
    html.push_str(&format!(
        "<tr><td>الإجابات الخاطئة</td><td class=\"fail\">{}</td><td>{}%</td></tr>\n",
        stats.incorrect, stats.incorrect_percentage
    ));
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Per-question details
    html.push_str("<section class=\"details\">\n");
    html.push_str("<h2>تفاصيل الإجابات</h2>\n");
    for (i, answer) in result.answers.iter().enumerate() {
        let class = if answer.is_correct { "pass" } else { "fail" };
        html.push_str("<article class=\"answer\">\n");
        html.push_str(&format!(
            "<p class=\"question\"><span class=\"num\">س{}:</span> {}</p>\n",
            i + 1,
            html_escape(&answer.text)
        ));
        html.push_str("<div class=\"choices\">\n");
        html.push_str(&format!(
            "<div class=\"choice {class}\"><span class=\"label\">إجابتك:</span> {}</div>\n",
            html_escape(&answer.user_answer)
        ));
        if !answer.is_correct {
            html.push_str(&format!(
                "<div class=\"choice\"><span class=\"label\">الإجابة الصحيحة:</span> {}</div>\n",
                html_escape(&answer.correct_answer)
            ));
        }
        html.push_str("</div>\n");
        if !answer.explanation.is_empty() {
            html.push_str(&format!(
                "<p class=\"explanation\"><strong>التعليل:</strong> {}</p>\n",
                html_escape(&answer.explanation)
            ));
        }
        html.push_str("</article>\n");
    }
    html.push_str("</section>\n");

    // Footer
    html.push_str("<footer>");
    if header.course_title.is_empty() {
        html.push_str("تم استخراج هذا التقرير آلياً.");
    } else {
        html.push_str(&format!(
            "تم استخراج هذا التقرير آلياً من منصة \"{}\" التفاعلية.",
            html_escape(&header.course_title)
        ));
    }
    html.push_str("</footer>\n");

    html.push_str("</main>\n</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(result: &QuizResult, header: &ReportHeader, path: &Path) -> Result<()> {
    let html = generate_html(result, header);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

/// Default report path inside `dir`: `Report_<exam title>.html`.
pub fn report_path(result: &QuizResult, dir: &Path) -> PathBuf {
    dir.join(format!("{}.html", result.report_file_stem()))
}

/// Correct/incorrect ring with the percentage in the middle.
fn generate_donut_chart(stats: &ResultStats, pass_mark: u32) -> String {
    const RADIUS: f64 = 80.0;
    const STROKE: u32 = 20;
    let circumference = 2.0 * std::f64::consts::PI * RADIUS;
    let correct_len = circumference * f64::from(stats.percentage) / 100.0;

    let color = if stats.passed(pass_mark) {
        "#0d9488"
    } else {
        "#ef4444"
    };

    let mut svg = String::from(
        "<svg class=\"chart\" width=\"200\" height=\"200\" viewBox=\"0 0 200 200\" xmlns=\"http://www.w3.org/2000/svg\">\n",
    );
    svg.push_str(&format!(
        "  <circle cx=\"100\" cy=\"100\" r=\"{RADIUS}\" fill=\"none\" stroke=\"#ef4444\" stroke-width=\"{STROKE}\"/>\n"
    ));
    if stats.score > 0 {
        svg.push_str(&format!(
            "  <circle cx=\"100\" cy=\"100\" r=\"{RADIUS}\" fill=\"none\" stroke=\"#10b981\" stroke-width=\"{STROKE}\" stroke-dasharray=\"{correct_len:.2} {circumference:.2}\" transform=\"rotate(-90 100 100)\"/>\n"
        ));
    }
    svg.push_str(&format!(
        "  <text x=\"100\" y=\"100\" font-size=\"32\" font-weight=\"bold\" fill=\"{color}\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}%</text>\n",
        stats.percentage
    ));
    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
@page { size: A4 portrait; margin: 10mm; }
:root { --teal: #0f766e; --border: #d1d5db; --pass: #ecfdf5; --fail: #fef2f2; --muted: #6b7280; }
body { font-family: 'Tajawal', 'Segoe UI', Tahoma, sans-serif; margin: 0; background: #fff; color: #000; }
.page { width: 210mm; min-height: 297mm; padding: 15mm; box-sizing: border-box; margin: 0 auto; }
header { display: flex; justify-content: space-between; align-items: flex-start; border-bottom: 2px solid var(--teal); padding-bottom: 1.5rem; margin-bottom: 2rem; }
h1 { color: var(--teal); margin: 0 0 0.25rem; }
h2 { border-right: 4px solid var(--teal); padding-right: 0.5rem; }
.course { font-weight: bold; color: #4b5563; margin: 0; }
.meta { color: var(--muted); font-size: 0.85rem; margin: 0.25rem 0; }
.score-box { background: #f3f4f6; border: 1px solid var(--border); border-radius: 8px; padding: 0.5rem 1rem; text-align: center; }
.score { font-size: 2rem; font-weight: bold; color: var(--teal); margin: 0; }
.score span { font-size: 1rem; color: #9ca3af; }
.verdict { font-weight: bold; margin: 0.25rem 0 0; }
.verdict.pass { color: #15803d; }
.verdict.fail { color: #dc2626; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: right; }
th { background: #f3f4f6; }
td.pass { color: #15803d; font-weight: bold; }
td.fail { color: #dc2626; font-weight: bold; }
.chart { display: block; margin: 1rem auto; }
.answer { border-bottom: 1px solid #e5e7eb; padding-bottom: 1rem; margin-bottom: 1rem; break-inside: avoid; }
.question { font-weight: bold; font-size: 1.1rem; }
.num { color: var(--teal); }
.choices { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; margin-right: 2rem; }
.choice { padding: 0.5rem; border: 1px solid var(--border); border-radius: 4px; background: #f9fafb; }
.choice.pass { background: var(--pass); border-color: #a7f3d0; }
.choice.fail { background: var(--fail); border-color: #fecaca; }
.label { display: block; font-size: 0.75rem; color: var(--muted); font-weight: bold; }
.explanation { margin-right: 2rem; font-size: 0.9rem; color: #4b5563; background: #f9fafb; padding: 0.5rem; border-radius: 4px; }
footer { margin-top: 2rem; padding-top: 1rem; border-top: 1px solid var(--border); text-align: center; font-size: 0.75rem; color: #9ca3af; }
"#;
