//! Train command handler: fits the entity model from annotated examples.

use std::path::{Path, PathBuf};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use scriptscan_core::model::{TrainingReport, train as train_model};
use tracing::info;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_separator;

/// Train from `data` (default `<workspace>/data`) and write the model to
/// `output` (default `<workspace>/model/entities.json`).
pub fn train(
    ctx: &CliContext,
    data: Option<&Path>,
    output: Option<&Path>,
    show_progress: bool,
) -> Result<(PathBuf, TrainingReport), CliError> {
    let data_dir = data.map_or_else(|| ctx.layout.data_dir(), Path::to_path_buf);
    let output = output.map_or_else(|| ctx.layout.model_path(), Path::to_path_buf);

    let pb = if show_progress {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} examples")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let (model, report) = train_model(&data_dir, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    })?;
    pb.finish_and_clear();

    model.save(&output)?;

    info!(
        target: "scriptscan.train",
        examples = report.examples,
        entries = report.entries,
        path = %output.display(),
        "Entity model saved"
    );
    Ok((output, report))
}

/// Execute the train command.
pub fn execute(ctx: &CliContext, data: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let (path, report) = train(ctx, data, output, true)?;

    print_separator(60);
    println!("Files:          {}", report.files);
    println!("Examples:       {}", report.examples);
    println!("Invalid spans:  {}", report.invalid_spans);
    println!("Entries:        {}", report.entries);
    let labels: Vec<&str> = report.labels.iter().map(|l| l.as_str()).collect();
    println!("Labels:         {}", labels.join(", "));
    if report.skipped_items > 0 {
        println!("Skipped items:  {}", report.skipped_items);
    }
    for skipped in &report.skipped_files {
        println!("Skipped:        {}", skipped.display());
    }
    print_separator(60);
    println!("Model written to {}", path.display());

    Ok(())
}
