use std::fmt;
use std::time::Instant;

/// The three stages of a subtitle run, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Extract,
    Transcribe,
    Write,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Extract => "extract",
            Stage::Transcribe => "transcribe",
            Stage::Write => "write",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cross-cutting logger for pipeline orchestration events.
///
/// Decouples the use case from specific output mechanisms so callers can
/// observe pipeline behavior without changing the orchestration code.
pub trait PipelineLogger: Send {
    /// A stage is about to run.
    fn stage_started(&mut self, stage: Stage);

    /// Record how long a stage took.
    fn timing(&mut self, stage: Stage, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-pipeline summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn stage_started(&mut self, _stage: Stage) {}
    fn timing(&mut self, _stage: Stage, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger that forwards events to the `log` crate and keeps
/// per-stage timings for a summary at the end of the run.
pub struct LogPipelineLogger {
    timings: Vec<(Stage, f64)>,
    start_time: Instant,
}

impl LogPipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: Vec::new(),
            start_time: Instant::now(),
        }
    }

    /// Returns the formatted summary string, or `None` if no stage finished.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Pipeline summary ({} stages, {:.1}s total):",
            self.timings.len(),
            elapsed_ms / 1000.0
        )];

        for (stage, duration_ms) in &self.timings {
            let pct = if elapsed_ms > 0.0 {
                duration_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            let name = stage.name();
            lines.push(format!("  {name:10}: {duration_ms:8.0}ms  ({pct:4.1}%)"));
        }

        Some(lines.join("\n"))
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn stage_started(&mut self, stage: Stage) {
        log::info!("Starting stage: {stage}");
    }

    fn timing(&mut self, stage: Stage, duration_ms: f64) {
        log::debug!("Stage {stage} took {duration_ms:.0}ms");
        self.timings.push((stage, duration_ms));
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
