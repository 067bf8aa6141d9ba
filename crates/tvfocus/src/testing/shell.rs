use crate::{ElementId, Shell, TransientKey};

/// A [`Shell`] that remembers what it was told.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingShell {
    /// Activated elements, in order.
    pub activated: Vec<ElementId>,
    /// Number of back requests.
    pub backs: usize,
    /// Expired transient timers, in order.
    pub expired: Vec<TransientKey>,
}

impl RecordingShell {
    /// Construct an empty shell.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Shell for RecordingShell {
    fn on_activate(&mut self, id: ElementId) {
        self.activated.push(id);
    }

    fn on_back(&mut self) {
        self.backs += 1;
    }

    fn on_transient_expired(&mut self, key: &TransientKey) {
        self.expired.push(key.clone());
    }
}
