//! Reconciliation Policy - gate truncation notifications.

/// Decides whether a computed truncation status is delivered.
///
/// The last delivered status survives content changes: replacing content
/// notifies only if the status actually flips.
#[derive(Debug, Default, Clone)]
pub struct ReconciliationPolicy {
    immediate: bool,
    last_notified: Option<bool>,
}

impl ReconciliationPolicy {
    /// With `immediate` set, every reconciliation notifies.
    pub fn new(immediate: bool) -> Self {
        Self {
            immediate,
            last_notified: None,
        }
    }

    pub fn set_immediate(&mut self, immediate: bool) {
        self.immediate = immediate;
    }

    pub fn last_notified(&self) -> Option<bool> {
        self.last_notified
    }

    /// Observe a freshly computed status. Returns the status to deliver.
    pub fn observe(&mut self, truncated: bool) -> Option<bool> {
        if self.immediate || self.last_notified != Some(truncated) {
            self.last_notified = Some(truncated);
            Some(truncated)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_notifies() {
        let mut policy = ReconciliationPolicy::new(false);
        assert_eq!(policy.observe(false), Some(false));
        assert_eq!(policy.last_notified(), Some(false));
    }

    #[test]
    fn test_repeated_status_is_suppressed() {
        let mut policy = ReconciliationPolicy::new(false);
        assert_eq!(policy.observe(true), Some(true));
        assert_eq!(policy.observe(true), None);
        assert_eq!(policy.observe(false), Some(false));
        assert_eq!(policy.observe(false), None);
    }

    #[test]
    fn test_immediate_always_notifies() {
        let mut policy = ReconciliationPolicy::new(true);
        assert_eq!(policy.observe(true), Some(true));
        assert_eq!(policy.observe(true), Some(true));
        assert_eq!(policy.observe(false), Some(false));
    }
}
