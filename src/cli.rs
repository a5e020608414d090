//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::render::{OutputFormat, RenderConfig};
use crate::passes::PassContext;

/// lessonkit - maintenance passes for numbered Markdown lessons.
#[derive(Parser, Debug)]
#[command(name = "lessonkit")]
#[command(
    author,
    version,
    about,
    long_about = r#"lessonkit runs small, independent passes over a folder of Markdown lessons.

A lesson is a *.md file directly under ROOT whose name starts with a digit
(e.g. "12 Closures.md"). Passes either report (check, sections, duplicates, stubs)
or rewrite lessons in place (nav, dedupe-nav, strip-templates).

Each pass prints a result set in the selected format (default: jsonl) and a short
summary on stderr.

Examples:
    lessonkit nav
    lessonkit check --strict
    lessonkit --format md sections --from 9
    lessonkit strip-templates --dry-run
    lessonkit slug "📚 Дополнительная информация"
"#
)]
pub struct Cli {
    /// Directory holding the lesson files.
    #[arg(
        long,
        global = true,
        default_value = ".",
        env = "LESSONKIT_ROOT",
        value_name = "ROOT",
        long_help = "Directory holding the lesson files (defaults to the current directory).\n\n\
Only files directly inside ROOT are considered; subdirectories are not searched."
    )]
    pub root: PathBuf,

    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for results.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw (excerpts only)"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output on stderr.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no stderr summary).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (per-file diagnostics on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Report what rewriting passes would change without writing.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild the quick navigation block of each lesson.
    #[command(
        long_about = "Regenerate the block under \"## 📖 Быстрая навигация\" from the lesson's\n\
level-2 headings. Everything between that heading and the next '---' line is replaced.\n\n\
Running the pass twice changes nothing the second time.\n\n\
Examples:\n\
  lessonkit nav\n\
  lessonkit nav --from 9 --dry-run\n"
    )]
    Nav {
        /// Only lessons numbered N or higher.
        #[arg(long, default_value = "0", value_name = "N")]
        from: u64,
    },

    /// Check navigation links and the "Additional information" section.
    #[command(
        long_about = "For every lesson, verify that each navigation link resolves to exactly one\n\
heading and that the \"Дополнительная информация\" section exists and is not the\n\
placeholder template.\n\n\
Example:\n\
  lessonkit check --strict\n"
    )]
    Check {
        /// Only lessons numbered N or higher.
        #[arg(long, default_value = "0", value_name = "N")]
        from: u64,

        /// Exit with an error when any lesson has issues.
        #[arg(long)]
        strict: bool,
    },

    /// List lessons with and without the "Additional information" section.
    Sections {
        /// Only lessons numbered N or higher.
        #[arg(long, default_value = "9", value_name = "N")]
        from: u64,
    },

    /// Find lessons where the "Additional information" section appears more than once.
    Duplicates {
        /// Only lessons numbered N or higher.
        #[arg(long, default_value = "9", value_name = "N")]
        from: u64,
    },

    /// Find lessons whose "Additional information" section is still a stub.
    Stubs {
        /// Only lessons numbered N or higher.
        #[arg(long, default_value = "12", value_name = "N")]
        from: u64,
    },

    /// Remove legacy bold links to the "Additional information" section.
    #[command(name = "dedupe-nav")]
    DedupeNav {
        /// Only lessons numbered N or higher.
        #[arg(long, default_value = "9", value_name = "N")]
        from: u64,
    },

    /// Replace the placeholder template section with a short stub.
    #[command(name = "strip-templates")]
    StripTemplates {
        /// Only lessons numbered N or higher.
        #[arg(long, default_value = "0", value_name = "N")]
        from: u64,
    },

    /// Print the anchor slug of a heading title.
    Slug {
        /// Heading text.
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// List the headings of a file with level, line and slug.
    Headings {
        /// File path (relative to ROOT unless absolute).
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let root = cli.root.canonicalize().unwrap_or(cli.root);

    let mut ctx = PassContext::new(root, render_config);
    ctx.dry_run = cli.dry_run;
    ctx.quiet = cli.quiet;
    ctx.verbose = cli.verbose;

    match cli.command {
        Commands::Nav { from } => crate::passes::navigate::run_nav(&ctx, from),
        Commands::Check { from, strict } => crate::passes::check::run_check(&ctx, from, strict),
        Commands::Sections { from } => crate::passes::audit::run_sections(&ctx, from),
        Commands::Duplicates { from } => crate::passes::audit::run_duplicates(&ctx, from),
        Commands::Stubs { from } => crate::passes::audit::run_stubs(&ctx, from),
        Commands::DedupeNav { from } => crate::passes::cleanup::run_dedupe_nav(&ctx, from),
        Commands::StripTemplates { from } => {
            crate::passes::cleanup::run_strip_templates(&ctx, from)
        }
        Commands::Slug { text } => crate::passes::inspect::run_slug(&ctx, &text),
        Commands::Headings { file } => crate::passes::inspect::run_headings(&ctx, &file),
    }
}
