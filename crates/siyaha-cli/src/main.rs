//! siyaha CLI: read the course summary and take exams from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "siyaha",
    version,
    about = "Interactive tourism-studies course and quizzes"
)]
struct Cli {
    /// Course TOML file or directory (defaults to the bundled course)
    #[arg(long, global = true)]
    course: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the course landing page
    Home,

    /// Read the course summary
    Summary {
        /// Show a single chapter
        #[arg(long)]
        chapter: Option<u32>,
    },

    /// List available exams
    Exams,

    /// Take an exam
    Quiz {
        /// Exam ID
        #[arg(long)]
        exam: u32,

        /// Answer every question up front (comma-separated 0-based option indices)
        #[arg(long)]
        answers: Option<String>,

        /// Export formats: json, html, md, all
        #[arg(long, default_value = "json,html")]
        format: String,

        /// Output directory (defaults to `output_dir` from the config)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Render a saved result as a report
    Report {
        /// Result JSON written by `siyaha quiz`
        #[arg(long)]
        result: PathBuf,

        /// Output format: html, md
        #[arg(long, default_value = "html")]
        format: String,

        /// Output file (html defaults to next to the result, md to stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Validate course TOML files
    Validate,

    /// Edit a photo with the configured image editor
    EditImage {
        /// Input image (png, jpeg, webp)
        #[arg(long)]
        image: PathBuf,

        /// Edit instruction
        #[arg(long)]
        prompt: String,

        /// Output file (defaults to `<image>_edited.<ext>`)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Create a starter config and course file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("siyaha=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context {
        course: cli.course,
        config: cli.config,
    };

    let result = match cli.command {
        Commands::Home => commands::home::execute(&ctx),
        Commands::Summary { chapter } => commands::summary::execute(&ctx, chapter),
        Commands::Exams => commands::exams::execute(&ctx),
        Commands::Quiz {
            exam,
            answers,
            format,
            output,
        } => commands::quiz::execute(&ctx, exam, answers, format, output),
        Commands::Report {
            result,
            format,
            out,
        } => commands::report::execute(&ctx, result, format, out),
        Commands::Validate => commands::validate::execute(&ctx),
        Commands::EditImage { image, prompt, out } => {
            commands::edit_image::execute(&ctx, image, prompt, out).await
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
