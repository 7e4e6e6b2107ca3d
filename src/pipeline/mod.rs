// Batch pipelines, one per subcommand. Each runs to completion sequentially.

pub mod lemmas;
pub mod speeches;
pub mod topics;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar over corpus documents.
pub(crate) fn document_progress(len: usize, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!("  {label} [{{bar:30}}] {{pos}}/{{len}} ({{eta}})"))
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}
