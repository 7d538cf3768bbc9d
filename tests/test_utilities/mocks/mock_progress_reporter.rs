use artifactory_inspection::prelude::*;
use std::sync::{Arc, Mutex};

/// A call observed by [`MockProgressReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Message(String),
    Progress {
        current: usize,
        total: usize,
        message: Option<String>,
    },
    Error(String),
    Completion(String),
}

/// Mock ProgressReporter for testing that captures every call in order
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn progress_count(&self) -> usize {
        self.get_events()
            .iter()
            .filter(|event| matches!(event, ProgressEvent::Progress { .. }))
            .count()
    }

    pub fn last_event(&self) -> Option<ProgressEvent> {
        self.events.lock().unwrap().last().cloned()
    }

    fn record(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.record(ProgressEvent::Message(message.to_string()));
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.record(ProgressEvent::Progress {
            current,
            total,
            message: message.map(str::to_string),
        });
    }

    fn report_error(&self, message: &str) {
        self.record(ProgressEvent::Error(message.to_string()));
    }

    fn report_completion(&self, message: &str) {
        self.record(ProgressEvent::Completion(message.to_string()));
    }
}
