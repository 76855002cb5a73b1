//! Scripted outages: after `fail_after` good answers, the next `fail_for` price
//! requests fail.
/// Outage window over 1-based price request numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutagePlan {
    fail_after: Option<u64>,
    fail_for: u64,
}

impl OutagePlan {
    /// Requests `fail_after + 1 ..= fail_after + fail_for` fail; no window when
    /// `fail_after` is `None`.
    pub fn new(fail_after: Option<u64>, fail_for: u64) -> Self {
        Self { fail_after, fail_for }
    }

    /// Whether request number `request` (starting at 1) should fail.
    pub fn is_failing(&self, request: u64) -> bool {
        match self.fail_after {
            Some(after) => request > after && request - after <= self.fail_for,
            None => false,
        }
    }

    /// Human readable window for the startup log.
    pub fn describe(&self) -> String {
        match self.fail_after {
            Some(after) if self.fail_for > 0 => {
                format!("requests {}..={} answer 503", after + 1, after + self.fail_for)
            }
            _ => "no outage".to_string(),
        }
    }
}
