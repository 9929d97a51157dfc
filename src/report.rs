use std::io::{self, BufRead, Write};

use crate::error::{AppError, Step, StepFailure};
use crate::pipeline::PipelineReport;

/// Examples listed after verification.
pub const EXAMPLE_LIMIT: usize = 3;
/// Characters of each example description that are shown.
pub const PREVIEW_CHARS: usize = 50;

/// Writes the console summary of a run: one section per reached step and a
/// closing diagnostic if a step failed.
pub fn render<W: Write>(report: &PipelineReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "🚀 Extracting data from the scraper...")?;

    if let Some(ads) = report.ads_scraped {
        writeln!(out, "✅ Extracted {} ads!", ads)?;
        writeln!(out, "📤 Sending to the backend...")?;

        if let Some(result) = &report.processed {
            writeln!(out, "🎉 SUCCESS!")?;
            writeln!(out, "✅ Processed: {}", result.processed)?;
            writeln!(out, "⏭️  Skipped: {}", result.skipped)?;
            writeln!(out, "❌ Errors: {}", result.errors)?;
            writeln!(out, "📊 Total received: {}", result.total_received)?;
            if let Some(at) = result.processed_at() {
                writeln!(out, "🕒 Processed at: {}", at.to_rfc3339())?;
            }

            writeln!(out)?;
            writeln!(out, "🔍 Checking saved data...")?;

            if let Some(saved) = &report.verified {
                writeln!(out, "📊 Total ads in the database: {}", saved.pagination.total)?;

                if !saved.ads.is_empty() {
                    writeln!(out)?;
                    writeln!(out, "📝 Saved examples:")?;
                    for (i, ad) in saved.ads.iter().take(EXAMPLE_LIMIT).enumerate() {
                        writeln!(
                            out,
                            "{}. {} - {}",
                            i + 1,
                            ad.page_name_or_default(),
                            ad.description_preview(PREVIEW_CHARS)
                        )?;
                    }
                }
            }
        }
    }

    if let Some(failure) = &report.failure {
        writeln!(out, "{}", failure_line(failure))?;
    }

    Ok(())
}

/// The single diagnostic line printed for a failed step.
pub fn failure_line(failure: &StepFailure) -> String {
    match &failure.error {
        AppError::HttpStatus { body, .. } => {
            let source = match failure.step {
                Step::Scrape => "Scraper",
                Step::Forward => "Backend",
                Step::Verify => "Verify",
            };
            format!("❌ {} error: {}", source, body)
        }
        other => format!("❌ Error: {}", other),
    }
}

/// Prints the closing prompt and blocks until one line of input is read.
pub fn wait_for_enter<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    write!(out, "Press Enter to close...")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

/// Shows the closing prompt when `pause` is set, then flushes `out`.
pub fn finish<R: BufRead, W: Write>(input: &mut R, out: &mut W, pause: bool) -> io::Result<()> {
    if pause {
        wait_for_enter(input, out)?;
    }
    out.flush()
}
