//! lessonkit - maintenance passes for a folder of numbered Markdown lessons
//!
//! lessonkit provides:
//! - Quick navigation block generation from headings
//! - Navigation link checks against heading anchors
//! - "Additional information" section audits (missing, duplicate, stub, template)
//! - In-place cleanup of legacy links and template boilerplate
//! - Unified output format (jsonl/json/md/raw)

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod lessons;
mod passes;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
