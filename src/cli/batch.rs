use std::path::Path;

use anyhow::Result;

use crate::core::AppConfig;
use crate::triage::{TriageOutcome, reference_instant, triage_email};

/// Triages every file in a directory sequentially. Each email's
/// outcome is independent: a model failure or an unreadable file is
/// logged and the batch moves on.
pub async fn run(dir: &Path, config: &AppConfig) -> Result<()> {
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let subject = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let raw_body = match tokio::fs::read_to_string(&path).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!("Skipping {}: {}", path.display(), err);
                continue;
            }
        };

        // No Date header available for a bare file, so relative dates
        // resolve against the current instant
        let reference = reference_instant(None);

        match triage_email(&subject, &raw_body, reference, config).await {
            TriageOutcome::Event { document } => {
                println!("[Event] {}", subject);
                println!("{}", document);
            }
            TriageOutcome::Classified { category } => {
                println!("[{}] {}", category, subject);
            }
            TriageOutcome::ExtractionFailed => {
                println!("[Event] {} (no calendar event produced)", subject);
            }
        }
    }

    Ok(())
}
