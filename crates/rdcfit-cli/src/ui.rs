use indicatif::{ProgressBar, ProgressStyle};
use rdcfit::engine::progress::{Progress, ProgressCallback};
use std::sync::Mutex;
use tracing::info;

/// Renders core progress events as an indicatif bar on stderr.
///
/// A task's bar is created on `TaskStart` and dropped on `TaskFinish`; phase
/// boundaries are surfaced as log lines so they interleave cleanly with the
/// tracing output.
#[derive(Default)]
pub struct CliProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback(&self) -> ProgressCallback<'_> {
        Box::new(move |event| self.handle(event))
    }

    fn handle(&self, event: Progress) {
        match event {
            Progress::PhaseStart { name } => info!("{name}"),
            Progress::PhaseFinish => {}
            Progress::TaskStart { total_steps } => {
                let bar = ProgressBar::new(total_steps);
                let style = ProgressStyle::with_template(
                    "{bar:40.cyan/blue} {pos}/{len} ({eta})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar());
                bar.set_style(style);
                if let Ok(mut slot) = self.bar.lock() {
                    *slot = Some(bar);
                }
            }
            Progress::TaskIncrement => {
                if let Ok(slot) = self.bar.lock() {
                    if let Some(bar) = slot.as_ref() {
                        bar.inc(1);
                    }
                }
            }
            Progress::TaskFinish => {
                if let Ok(mut slot) = self.bar.lock() {
                    if let Some(bar) = slot.take() {
                        bar.finish_and_clear();
                    }
                }
            }
        }
    }
}
