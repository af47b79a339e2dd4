//! CLI-specific progress handling for butterfly-walk
//!
//! Shows how many Bellman-Ford columns have been filled.

use std::sync::Arc;

use butterfly_walk::ProgressCallback;
use indicatif::{ProgressBar, ProgressStyle};

/// Creates a progress bar over `total_columns` table columns
pub fn create_progress_bar(total_columns: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_columns);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} columns ({percent}%) ETA: {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

/// Progress manager for distance table computation
pub struct ProgressManager {
    pub pb: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_columns: u64, message: &str) -> Self {
        let pb = create_progress_bar(total_columns);

        eprintln!("{}", message);

        Self { pb }
    }

    /// Engine callback that drives this bar
    pub fn callback(&self) -> ProgressCallback {
        let pb = self.pb.clone();
        Arc::new(move |done: u64, total: u64| {
            if pb.length().unwrap_or(0) != total {
                pb.set_length(total);
            }
            pb.set_position(done);
            if done >= total {
                pb.finish_with_message("done");
            }
        })
    }
}
