use std::path::Path;

use anyhow::Result;

use crate::core::AppConfig;
use crate::triage::{TriageOutcome, reference_instant, triage_email};

pub async fn run(
    file: &Path,
    subject: &str,
    date_header: Option<&str>,
    config: &AppConfig,
) -> Result<()> {
    let raw_body = tokio::fs::read_to_string(file).await?;
    let reference = reference_instant(date_header);

    match triage_email(subject, &raw_body, reference, config).await {
        TriageOutcome::Event { document } => {
            println!("{}", document);
        }
        TriageOutcome::Classified { category } => {
            println!("{}", category);
        }
        TriageOutcome::ExtractionFailed => {
            println!("Event (no calendar event produced)");
        }
    }

    Ok(())
}
