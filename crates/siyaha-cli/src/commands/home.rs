//! The `siyaha home` command.

use anyhow::Result;

use super::Context;

pub fn execute(ctx: &Context) -> Result<()> {
    let config = ctx.config()?;
    let course = ctx.course(&config)?;
    let info = &course.info;

    if !info.department.is_empty() {
        println!("{}", info.department);
    }
    println!("{}", info.title);
    if !info.subtitle.is_empty() {
        println!("{}", info.subtitle);
    }
    if !info.author.is_empty() {
        println!("بإشراف {}", info.author);
    }

    if !info.highlights.is_empty() {
        println!();
        for h in &info.highlights {
            println!("  * {}", h.title);
            println!("    {}", h.text);
        }
    }

    println!(
        "\n{} chapter(s), {} exam(s), {} question(s)",
        course.chapters.len(),
        course.exams.len(),
        course.question_count()
    );
    println!("\nNext steps:");
    println!("  siyaha summary          read the course summary");
    println!("  siyaha exams            list the exams");
    println!("  siyaha quiz --exam 1    take an exam");

    Ok(())
}
