//! The `siyaha quiz` command.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use comfy_table::{Cell, Table};

use siyaha_core::engine::{Advance, AnswerFeedback, QuizAttempt};
use siyaha_core::model::Question;
use siyaha_core::report::QuizResult;
use siyaha_core::statistics::ResultStats;
use siyaha_report::html::{report_path, write_html_report};
use siyaha_report::markdown::generate_markdown;
use siyaha_report::ReportHeader;

use super::Context;

pub fn execute(
    ctx: &Context,
    exam_id: u32,
    answers: Option<String>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = ctx.config()?;
    let course = ctx.course(&config)?;

    let exam = course.exam(exam_id).ok_or_else(|| {
        anyhow::anyhow!(
            "exam {exam_id} not found. Available: {:?}",
            course.exams.iter().map(|e| e.id).collect::<Vec<_>>()
        )
    })?;

    let formats = parse_formats(&format)?;
    let mut attempt = QuizAttempt::new(exam)?;

    println!("{} ({} سؤال)\n", exam.title, attempt.total());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = match answers {
        Some(list) => Some(run_scripted(&mut attempt, &parse_answers(&list)?, &mut out)?),
        None => {
            let stdin = std::io::stdin();
            run_interactive(attempt, stdin.lock(), &mut out)?
        }
    };
    drop(out);

    let Some(result) = result else {
        println!("Quiz abandoned, no result recorded.");
        return Ok(());
    };
    let result = result.with_course(&course.info.id, &course.info.title);

    print_summary(&result, config.pass_mark);

    let output = output.unwrap_or(config.output_dir);
    let header = ReportHeader::from_course(&course.info).with_pass_mark(config.pass_mark);
    save_outputs(&result, &header, &formats, &output)?;

    Ok(())
}

/// Parse `--answers 1,0,2` into option indices.
fn parse_answers(list: &str) -> Result<Vec<usize>> {
    list.split(',')
        .map(|s| {
            s.trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("invalid answer: '{}'", s.trim()))
        })
        .collect()
}

fn parse_formats(format: &str) -> Result<Vec<&str>> {
    if format == "all" {
        return Ok(vec!["json", "html", "md"]);
    }
    let formats: Vec<&str> = format
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();
    for f in &formats {
        anyhow::ensure!(
            matches!(*f, "json" | "html" | "md"),
            "unknown format '{f}' (expected json, html, md or all)"
        );
    }
    Ok(formats)
}

/// Answer every question from a fixed list.
fn run_scripted(
    attempt: &mut QuizAttempt<'_>,
    answers: &[usize],
    out: &mut impl Write,
) -> Result<QuizResult> {
    anyhow::ensure!(
        answers.len() == attempt.total(),
        "expected {} answers, got {}",
        attempt.total(),
        answers.len()
    );

    for &choice in answers {
        let question = attempt
            .current_question()
            .context("attempt ended before all answers were used")?;
        write_question(out, question, attempt.question_number(), attempt.total())?;
        let feedback = attempt.submit_answer(choice)?;
        write_feedback(out, &feedback)?;

        if let Advance::Complete(result) = attempt.advance()? {
            return Ok(result);
        }
    }

    anyhow::bail!("attempt did not complete")
}

/// Drive an attempt from line-based input. Returns `None` if the learner quits.
///
/// `q` exits at any prompt; end of input counts as quitting.
fn run_interactive<'a>(
    mut attempt: QuizAttempt<'a>,
    mut input: impl BufRead,
    out: &mut impl Write,
) -> Result<Option<QuizResult>> {
    let mut line = String::new();

    loop {
        let Some(question) = attempt.current_question() else {
            anyhow::bail!("attempt completed without a result");
        };
        write_question(out, question, attempt.question_number(), attempt.total())?;

        // Ask until a valid option is chosen.
        let feedback = loop {
            write!(out, "اختر رقم الإجابة (q للخروج): ")?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 || line.trim() == "q" {
                attempt.exit()?;
                return Ok(None);
            }
            let Ok(choice) = line.trim().parse::<usize>() else {
                writeln!(out, "Enter an option number or q.")?;
                continue;
            };
            match attempt.submit_answer(choice) {
                Ok(feedback) => break feedback,
                Err(e) if e.is_input_error() => writeln!(out, "{e}")?,
                Err(e) => return Err(e.into()),
            }
        };
        write_feedback(out, &feedback)?;

        let prompt = if attempt.is_last_question() {
            "عرض النتائج النهائية"
        } else {
            "السؤال التالي"
        };
        write!(out, "[Enter] {prompt} ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 || line.trim() == "q" {
            attempt.exit()?;
            return Ok(None);
        }

        if let Advance::Complete(result) = attempt.advance()? {
            return Ok(Some(result));
        }
    }
}

fn write_question(
    out: &mut impl Write,
    question: &Question,
    number: usize,
    total: usize,
) -> Result<()> {
    writeln!(out, "السؤال {number} من {total}")?;
    writeln!(out, "{}", question.text)?;
    for (i, option) in question.options.iter().enumerate() {
        writeln!(out, "  [{i}] {option}")?;
    }
    Ok(())
}

fn write_feedback(out: &mut impl Write, feedback: &AnswerFeedback) -> Result<()> {
    if feedback.is_correct {
        writeln!(out, "أحسنت! إجابة موفقة")?;
    } else {
        writeln!(out, "للأسف، إجابة غير صحيحة")?;
        writeln!(out, "الإجابة الصحيحة: {}", feedback.correct_answer)?;
    }
    if !feedback.explanation.is_empty() {
        writeln!(out, "التعليل: {}", feedback.explanation)?;
    }
    writeln!(out)?;
    Ok(())
}

fn print_summary(result: &QuizResult, pass_mark: u32) {
    let stats = ResultStats::from_result(result);
    let verdict = if stats.passed(pass_mark) {
        "PASS"
    } else {
        "FAIL"
    };

    let mut table = Table::new();
    table.set_header(vec!["البيان", "القيمة", "النسبة المئوية"]);
    table.add_row(vec![
        Cell::new("الإجابات الصحيحة"),
        Cell::new(stats.score),
        Cell::new(format!("{}%", stats.percentage)),
    ]);
    table.add_row(vec![
        Cell::new("الإجابات الخاطئة"),
        Cell::new(stats.incorrect),
        Cell::new(format!("{}%", stats.incorrect_percentage)),
    ]);

    println!("ملخص الأداء - {}", result.exam_title);
    println!("{table}");
    println!(
        "Score: {}/{} ({}%) {verdict}",
        stats.score, stats.total, stats.percentage
    );
}

fn save_outputs(
    result: &QuizResult,
    header: &ReportHeader,
    formats: &[&str],
    output: &Path,
) -> Result<()> {
    if formats.is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let stem = result.report_file_stem();

    for fmt in formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("{stem}.json"));
                result.save_json(&path)?;
                eprintln!("Result saved to: {}", path.display());
            }
            "html" => {
                let path = report_path(result, output);
                write_html_report(result, header, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            "md" => {
                let path = output.join(format!("{stem}.md"));
                std::fs::write(&path, generate_markdown(result, header))
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!("Markdown report: {}", path.display());
            }
            other => eprintln!("Unknown format: {other}"),
        }
    }
    Ok(())
}
