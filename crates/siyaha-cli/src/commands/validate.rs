//! The `siyaha validate` command.

use anyhow::Result;

use siyaha_core::parser::validate_course;

use super::Context;

pub fn execute(ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    let courses = ctx.courses(&config)?;

    let mut total_warnings = 0;

    for course in &courses {
        println!(
            "Course: {} ({} chapters, {} exams, {} questions)",
            course.info.title,
            course.chapters.len(),
            course.exams.len(),
            course.question_count()
        );

        let warnings = validate_course(course);
        for w in &warnings {
            let prefix = w
                .location
                .as_ref()
                .map(|loc| format!("  [{loc}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All courses valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
