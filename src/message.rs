use std::time::Duration;

/// On-screen text with a countdown measured in whole fixed steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientMessage {
    text: String,
    ticks_left: u32,
}

impl TransientMessage {
    pub fn new(text: impl Into<String>, duration: Duration, fixed_dt: Duration) -> Self {
        let steps = if fixed_dt.is_zero() {
            0.0
        } else {
            (duration.as_secs_f64() / fixed_dt.as_secs_f64()).round()
        };
        Self {
            text: text.into(),
            ticks_left: steps as u32,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn ticks_left(&self) -> u32 {
        self.ticks_left
    }

    pub fn remaining(&self, fixed_dt: Duration) -> Duration {
        fixed_dt * self.ticks_left
    }

    pub fn is_active(&self) -> bool {
        self.ticks_left > 0
    }

    /// Consumes one fixed step; returns whether the message is still showing.
    pub fn tick(&mut self) -> bool {
        self.ticks_left = self.ticks_left.saturating_sub(1);
        self.is_active()
    }
}
