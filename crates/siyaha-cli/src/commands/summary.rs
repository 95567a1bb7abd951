//! The `siyaha summary` command.

use anyhow::Result;
use comfy_table::Table;

use siyaha_core::model::{SummaryChapter, SummarySection};

use super::Context;

pub fn execute(ctx: &Context, chapter_id: Option<u32>) -> Result<()> {
    let config = ctx.config()?;
    let course = ctx.course(&config)?;

    let chapters: Vec<&SummaryChapter> = match chapter_id {
        Some(id) => {
            let chapter = course.chapter(id).ok_or_else(|| {
                anyhow::anyhow!(
                    "chapter {id} not found. Available: {:?}",
                    course.chapters.iter().map(|c| c.id).collect::<Vec<_>>()
                )
            })?;
            vec![chapter]
        }
        None => course.chapters.iter().collect(),
    };

    println!("الملخص الشامل - {}\n", course.info.title);
    for chapter in chapters {
        print!("{}", render_chapter(chapter));
    }

    Ok(())
}

fn render_chapter(chapter: &SummaryChapter) -> String {
    let mut out = format!("[{}] {}\n", chapter.id, chapter.title);
    out.push_str(&"=".repeat(40));
    out.push('\n');
    for section in &chapter.sections {
        out.push_str(&render_section(section));
        out.push('\n');
    }
    out
}

fn render_section(section: &SummarySection) -> String {
    let mut out = String::new();
    if let Some(title) = section.title() {
        out.push_str(&format!("## {title}\n"));
    }

    match section {
        SummarySection::Text { body, .. } => {
            out.push_str(body);
            out.push('\n');
        }
        SummarySection::List { items, .. } => {
            for (i, item) in items.iter().enumerate() {
                out.push_str(&format!("  {}. {item}\n", i + 1));
            }
        }
        SummarySection::Cards { cards, .. } => {
            for card in cards {
                out.push_str(&format!("  * {}: {}\n", card.title, card.text));
            }
        }
        SummarySection::Comparison { headers, rows, .. } => {
            let mut table = Table::new();
            table.set_header(headers.clone());
            for row in rows {
                table.add_row(row.clone());
            }
            out.push_str(&format!("{table}\n"));
        }
        SummarySection::Timeline { events, .. } => {
            for event in events {
                out.push_str(&format!("  | {}\n  |   {}\n", event.title, event.text));
            }
        }
    }
    out
}
