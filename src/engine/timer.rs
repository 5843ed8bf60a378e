use std::time::Duration;

/// Time since the last committed character.
///
/// A character may only be committed once `elapsed` has reached the current
/// delay. Fast-forward drops the delay to zero until the line completes.
#[derive(Debug, Clone)]
pub struct RevealTimer {
    elapsed: Duration,
    delay: Duration,
    fast_forward: bool,
}

impl RevealTimer {
    pub fn new(delay: Duration) -> Self {
        RevealTimer {
            elapsed: Duration::ZERO,
            delay,
            fast_forward: false,
        }
    }

    pub fn accumulate(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    pub fn current_delay(&self) -> Duration {
        if self.fast_forward {
            Duration::ZERO
        } else {
            self.delay
        }
    }

    pub fn is_ready(&self) -> bool {
        self.elapsed >= self.current_delay()
    }

    /// Called after each commit.
    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn fast_forward(&mut self) {
        self.fast_forward = true;
    }

    pub fn is_fast_forward(&self) -> bool {
        self.fast_forward
    }

    /// Back to the normal per-character delay with a fresh count.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.fast_forward = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_only_after_delay() {
        let mut t = RevealTimer::new(Duration::from_millis(30));
        t.accumulate(Duration::from_millis(20));
        assert!(!t.is_ready());
        t.accumulate(Duration::from_millis(10));
        assert!(t.is_ready());
        t.restart();
        assert!(!t.is_ready());
        t.fast_forward();
        assert!(t.is_ready());
        t.reset();
        assert!(!t.is_ready());
    }
}
