use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::{score_submission, PointsBreakdown, ReceiptSubmission};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a receipt JSON document
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Print the breakdown as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.file)?;
    let submission: ReceiptSubmission = serde_json::from_str(&raw)?;
    let breakdown = score_submission(&submission)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        print!("{}", render_breakdown(&breakdown));
    }
    Ok(())
}

/// One line per rule followed by the total.
pub(crate) fn render_breakdown(breakdown: &PointsBreakdown) -> String {
    let width = breakdown
        .contributions
        .iter()
        .map(|contribution| contribution.rule.label().len())
        .max()
        .unwrap_or(0);

    let mut rendered = String::new();
    for contribution in &breakdown.contributions {
        let _ = writeln!(
            rendered,
            "{:<width$}  {:>4}",
            contribution.rule.label(),
            contribution.points,
        );
    }
    let _ = writeln!(rendered, "{:<width$}  {:>4}", "total", breakdown.total);
    rendered
}
