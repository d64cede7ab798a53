use outreach_mcp_server::validation::{EmailValidationEvent, EmailValidationListener};
use std::sync::{Arc, Mutex};

/// Listener that records the addresses it sees and can veto all of them.
#[allow(dead_code)]
#[derive(Clone)]
pub struct RecordingListener {
    seen: Arc<Mutex<Vec<String>>>,
    veto_reason: Option<String>,
}

#[allow(dead_code)]
impl RecordingListener {
    /// A listener that approves everything.
    pub fn approving() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
            veto_reason: None,
        }
    }

    /// A listener that marks every address invalid with `reason`.
    pub fn rejecting(reason: &str) -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
            veto_reason: Some(reason.to_string()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl EmailValidationListener for RecordingListener {
    fn on_email_validation(&self, event: &mut EmailValidationEvent) {
        self.seen.lock().unwrap().push(event.address().to_string());

        if let Some(reason) = &self.veto_reason {
            event.set_invalid(reason.clone());
        }
    }

    fn name(&self) -> &str {
        "recording"
    }
}
