/// Leading-edge rate limiter: lets one call through per `interval_ms` and drops
/// the rest. Nothing is queued.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: i64,
    last_call: Option<i64>,
}

impl Throttle {
    pub fn new(interval_ms: i64) -> Self {
        Self {
            interval_ms,
            last_call: None,
        }
    }

    /// Returns true when a call at `now` should be processed.
    pub fn admit(&mut self, now: i64) -> bool {
        match self.last_call {
            Some(last) if now - last < self.interval_ms => false,
            _ => {
                self.last_call = Some(now);
                true
            }
        }
    }
}
