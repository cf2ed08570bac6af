//! Terminal progress bar for merge jobs.
//!
//! Drawn on stderr and only when stderr is a terminal, so redirected runs
//! stay free of control characters.
//!
//! # Examples
//!
//! ```
//! use pdfmerge::output::progress::{ProgressBar, ProgressStyle};
//!
//! let mut progress = ProgressBar::new(3, ProgressStyle::Bar);
//! for (i, name) in ["a.pdf", "b.pdf", "c.pdf"].iter().enumerate() {
//!     progress.set_message(format!("Adding {name}"));
//!     progress.update(i);
//! }
//! progress.finish_with_message("Saved");
//! ```

use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

/// Width of the bar itself, in cells.
const BAR_WIDTH: usize = 30;

/// Style of progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStyle {
    /// Classic progress bar: [=====>    ]
    Bar,
    /// Simple counter: 2/5
    Counter,
}

/// Progress bar for visual feedback during merges.
#[derive(Debug)]
pub struct ProgressBar {
    total: usize,
    current: usize,
    style: ProgressStyle,
    message: Option<String>,
    start_time: Instant,
    last_update: Instant,
    update_interval: Duration,
    enabled: bool,
}

impl ProgressBar {
    /// Create a new progress bar over `total` steps.
    pub fn new(total: usize, style: ProgressStyle) -> Self {
        let now = Instant::now();
        Self {
            total,
            current: 0,
            style,
            message: None,
            start_time: now,
            last_update: now,
            update_interval: Duration::from_millis(80),
            enabled: io::stderr().is_terminal(),
        }
    }

    /// Create a disabled progress bar (no output).
    pub fn disabled() -> Self {
        let mut pb = Self::new(0, ProgressStyle::Counter);
        pb.enabled = false;
        pb
    }

    /// Whether anything will be drawn.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Change the number of steps, e.g. once a job reports its size.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.current = self.current.min(total);
    }

    /// Set the message to display with the progress bar.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Update the progress bar to a specific value.
    ///
    /// Redraws are rate limited except for the final step and message
    /// changes are picked up on the next redraw.
    pub fn update(&mut self, current: usize) {
        self.current = current.min(self.total);

        if self.last_update.elapsed() < self.update_interval && self.current < self.total {
            return;
        }

        self.last_update = Instant::now();
        self.render();
    }

    /// Mark the progress bar as finished.
    pub fn finish(&mut self) {
        self.current = self.total;
        if self.enabled {
            self.render();
            eprintln!();
        }
    }

    /// Finish with a custom message.
    pub fn finish_with_message(&mut self, message: impl Into<String>) {
        self.set_message(message);
        self.finish();
    }

    /// Clear the progress bar from the terminal.
    pub fn clear(&self) {
        if self.enabled {
            eprint!("\r\x1b[K");
            io::stderr().flush().ok();
        }
    }

    fn render(&self) {
        if !self.enabled {
            return;
        }
        eprint!("\r\x1b[K{}", self.line());
        io::stderr().flush().ok();
    }

    /// The text that would be drawn.
    fn line(&self) -> String {
        let mut parts = Vec::with_capacity(4);

        if self.style == ProgressStyle::Bar {
            let filled = (BAR_WIDTH * self.current) / self.total.max(1);
            let head = if filled > 0 && filled < BAR_WIDTH { ">" } else { "" };
            let body = "=".repeat(filled.saturating_sub(head.len()));
            parts.push(format!("[{body}{head}{}]", " ".repeat(BAR_WIDTH - filled)));
            parts.push(format!("{:>3.0}%", self.percent()));
        }

        parts.push(format!("{}/{}", self.current, self.total));
        parts.push(format_duration(self.start_time.elapsed()));

        if let Some(ref msg) = self.message {
            parts.push(msg.clone());
        }

        parts.join(" ")
    }

    /// Get the current progress percentage.
    pub fn percent(&self) -> f64 {
        if self.total > 0 {
            (self.current as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Get the elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Format a duration as a human-readable string.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
