use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;

const BAR_TEMPLATE: &str = "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} - {msg}";

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Progress of repository sweeps and inspection polling is drawn with an
/// indicatif bar on stderr, keeping stdout free for command output.
/// A quiet reporter only prints errors.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
    quiet: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
            quiet: false,
        }
    }

    pub fn quiet() -> Self {
        Self {
            progress_bar: RefCell::new(None),
            quiet: true,
        }
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        let mut slot = self.progress_bar.borrow_mut();
        match slot.as_ref() {
            Some(pb) => {
                pb.set_length(total as u64);
                pb.clone()
            }
            None => {
                let pb = ProgressBar::new(total as u64);
                if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
                    pb.set_style(style.progress_chars("=>-"));
                }
                *slot = Some(pb.clone());
                pb
            }
        }
    }

    fn finish(&self) {
        if let Some(pb) = self.progress_bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        if self.quiet {
            return;
        }
        let pb = self.progress_bar(total);
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
    }

    fn report_error(&self, message: &str) {
        self.finish();
        eprintln!("{}", message);
    }

    fn report_completion(&self, message: &str) {
        self.finish();
        if !self.quiet {
            eprintln!("{}", message);
        }
    }
}
