//! Run options

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::entities::MembershipSet;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Addresses treated as roster members of every segment
    pub baseline: MembershipSet,
    /// Cleared by the interrupt handler; checked between segments
    pub running: Option<Arc<AtomicBool>>,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_baseline(mut self, baseline: MembershipSet) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn with_running_flag(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = Some(running);
        self
    }

    pub(crate) fn should_stop(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|flag| !flag.load(Ordering::SeqCst))
    }
}
