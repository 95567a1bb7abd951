//! The `siyaha report` command.

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use siyaha_core::report::QuizResult;
use siyaha_report::html::{report_path, write_html_report};
use siyaha_report::markdown::generate_markdown;
use siyaha_report::ReportHeader;

use super::Context;

pub fn execute(
    ctx: &Context,
    result_path: PathBuf,
    format: String,
    out: Option<PathBuf>,
) -> Result<()> {
    let result = QuizResult::load_json(&result_path)?;
    let config = ctx.config()?;
    let course = ctx.course(&config)?;
    let header = ReportHeader::for_result(&result, &course).with_pass_mark(config.pass_mark);

    match format.as_str() {
        "html" => {
            let path = out.unwrap_or_else(|| {
                let dir = result_path
                    .parent()
                    .map(PathBuf::from)
                    .unwrap_or_default();
                report_path(&result, &dir)
            });
            write_html_report(&result, &header, &path)?;
            println!("HTML report: {}", path.display());
        }
        "md" | "markdown" => {
            let md = generate_markdown(&result, &header);
            match out {
                Some(path) => {
                    std::fs::write(&path, md)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Markdown report: {}", path.display());
                }
                None => print!("{md}"),
            }
        }
        other => anyhow::bail!("unknown format '{other}' (expected html or md)"),
    }

    Ok(())
}
