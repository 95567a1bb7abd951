//! The `siyaha exams` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::Context;

pub fn execute(ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    let course = ctx.course(&config)?;

    if course.exams.is_empty() {
        println!("No exams in \"{}\".", course.info.title);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Exam", "Questions"]);
    for exam in &course.exams {
        table.add_row(vec![
            Cell::new(exam.id),
            Cell::new(&exam.title),
            Cell::new(format!("{} سؤال", exam.question_count())),
        ]);
    }

    println!("قاعة الاختبارات - {}", course.info.title);
    println!("{table}");
    println!("\nRun `siyaha quiz --exam <ID>` to start.");

    Ok(())
}
