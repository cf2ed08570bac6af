//! Background merge jobs.
//!
//! A [`MergeRunner`] runs at most one merge at a time on tokio's blocking
//! pool. Callers get a [`MergeHandle`] that streams [`MergeEvent`]s while the
//! job runs and yields the final [`MergeOutcome`].

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::OverwriteMode;
use crate::error::{PdfMergeError, Result};
use crate::io::{PdfWriter, WriteOptions, WriteStatistics};
use crate::merge::merger::{MergeProgress, MergeStatistics, Merger};
use crate::utils::same_file;

/// Everything a job needs to produce one merged file.
#[derive(Debug, Clone)]
pub struct MergeRequest {
    /// Input files, in merge order.
    pub inputs: Vec<PathBuf>,

    /// Destination file.
    pub output: PathBuf,

    /// What to do when `output` already exists.
    ///
    /// The job cannot ask anyone, so `Prompt` must be resolved by the caller
    /// beforehand; an unresolved `Prompt` is treated like `NoClobber`.
    pub overwrite_mode: OverwriteMode,

    /// How the output is written.
    pub write_options: WriteOptions,
}

impl MergeRequest {
    /// Request with default write options that refuses to overwrite.
    pub fn new(inputs: Vec<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            output: output.into(),
            overwrite_mode: OverwriteMode::NoClobber,
            write_options: WriteOptions::default(),
        }
    }

    /// Set the overwrite policy.
    pub fn with_overwrite_mode(mut self, mode: OverwriteMode) -> Self {
        self.overwrite_mode = mode;
        self
    }
}

/// Status updates sent while a job runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum MergeEvent {
    /// The job has started.
    Started {
        /// Number of inputs.
        total: usize,
    },

    /// An input is being added.
    Adding {
        /// 0-based position of the input.
        index: usize,
        /// Number of inputs.
        total: usize,
        /// File name shown to the user.
        name: String,
    },

    /// All inputs were merged; the output is being written.
    Saving {
        /// Destination file.
        path: PathBuf,
    },

    /// The output was written.
    Finished {
        /// Destination file.
        output: PathBuf,
        /// Number of files merged.
        files: usize,
        /// Pages in the output.
        pages: usize,
        /// Size of the output in bytes.
        file_size: u64,
    },
}

impl MergeEvent {
    /// Completed fraction in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        match self {
            Self::Started { .. } => 0.0,
            Self::Adding { index, total, .. } if *total > 0 => *index as f64 / *total as f64,
            Self::Adding { .. } => 0.0,
            Self::Saving { .. } | Self::Finished { .. } => 1.0,
        }
    }
}

impl From<MergeProgress> for MergeEvent {
    fn from(progress: MergeProgress) -> Self {
        match progress {
            MergeProgress::Adding { index, total, name } => Self::Adding { index, total, name },
        }
    }
}

/// What a successful job produced.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Merge statistics.
    pub statistics: MergeStatistics,

    /// Write statistics, including the output path and size.
    pub write: WriteStatistics,

    /// Inputs that went into the output, in order.
    pub merged_files: Vec<PathBuf>,
}

/// Runs merge jobs, one at a time.
#[derive(Debug, Clone, Default)]
pub struct MergeRunner {
    merging: Arc<AtomicBool>,
    merger: Merger,
}

impl MergeRunner {
    /// Create an idle runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a job is currently running.
    pub fn is_merging(&self) -> bool {
        self.merging.load(Ordering::Acquire)
    }

    /// Start a job on the blocking pool.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// `MergeInProgress` if another job started by this runner (or a clone
    /// of it) has not finished yet.
    pub fn start(&self, request: MergeRequest) -> Result<MergeHandle> {
        if self
            .merging
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(PdfMergeError::MergeInProgress);
        }
        let guard = BusyGuard(Arc::clone(&self.merging));

        let (sender, events) = mpsc::unbounded_channel();
        let merger = self.merger;

        tracing::debug!(
            inputs = request.inputs.len(),
            output = %request.output.display(),
            "starting merge job"
        );

        let task = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            let result = run(&merger, &request, &sender);
            if let Err(err) = &result {
                tracing::debug!(error = %err, "merge job failed");
            }
            result
        });

        Ok(MergeHandle { events, task })
    }
}

/// Clears the runner's busy flag when the job ends, however it ends.
#[derive(Debug)]
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn run(
    merger: &Merger,
    request: &MergeRequest,
    events: &mpsc::UnboundedSender<MergeEvent>,
) -> Result<MergeOutcome> {
    // Receivers may go away early; the job still completes.
    let send = |event: MergeEvent| {
        let _ = events.send(event);
    };

    if request
        .inputs
        .iter()
        .any(|input| same_file(input, &request.output))
    {
        return Err(PdfMergeError::invalid_config(format!(
            "Output file cannot be the same as an input file: {}",
            request.output.display()
        )));
    }
    check_overwrite(request)?;

    send(MergeEvent::Started {
        total: request.inputs.len(),
    });

    let mut result = merger.merge(&request.inputs, |progress| send(progress.into()))?;

    // The output may have appeared while inputs were being merged.
    check_overwrite(request)?;
    send(MergeEvent::Saving {
        path: request.output.clone(),
    });

    let writer = PdfWriter::with_options(request.write_options.clone());
    let write = writer.write(&mut result.document, &request.output)?;

    send(MergeEvent::Finished {
        output: write.output_path.clone(),
        files: result.statistics.files_merged,
        pages: result.statistics.total_pages,
        file_size: write.file_size,
    });

    Ok(MergeOutcome {
        statistics: result.statistics,
        write,
        merged_files: result.merged_files,
    })
}

fn check_overwrite(request: &MergeRequest) -> Result<()> {
    match request.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::Prompt | OverwriteMode::NoClobber if request.output.exists() => {
            Err(PdfMergeError::output_exists(&request.output))
        }
        OverwriteMode::Prompt | OverwriteMode::NoClobber => Ok(()),
    }
}

/// A running job.
#[derive(Debug)]
pub struct MergeHandle {
    events: mpsc::UnboundedReceiver<MergeEvent>,
    task: JoinHandle<Result<MergeOutcome>>,
}

impl MergeHandle {
    /// Next status update, or `None` once the job has stopped sending.
    pub async fn next_event(&mut self) -> Option<MergeEvent> {
        self.events.recv().await
    }

    /// Wait for the job and return its outcome. Pending events are dropped.
    pub async fn wait(self) -> Result<MergeOutcome> {
        self.task
            .await
            .map_err(|err| PdfMergeError::merge_failed(format!("merge task failed: {err}")))?
    }
}
