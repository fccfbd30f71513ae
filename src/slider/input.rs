//! Debounced numeric text entry attached to a slider.

use std::time::Duration;

/// Text field whose typed value is committed after a quiet period.
///
/// Keystrokes only reschedule the commit so the handle never fights the
/// user mid-type. Arrow and wheel nudges commit immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericInput {
    text: String,
    debounce: Duration,
    deadline: Option<Duration>,
}

impl NumericInput {
    pub fn new(debounce: Duration) -> Self {
        Self {
            text: String::new(),
            debounce,
            deadline: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// A typed value is waiting for its quiet period to elapse.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Replace the live text and (re)schedule the commit.
    pub fn type_text(&mut self, text: &str, now: Duration) {
        self.text = text.to_string();
        self.deadline = Some(now + self.debounce);
    }

    /// Commit the typed value once the quiet period has elapsed.
    ///
    /// Returns `None` while waiting, or when the text is not a number (the
    /// pending commit is then dropped).
    pub fn poll(&mut self, now: Duration) -> Option<f64> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                let value = self.parsed();
                if value.is_none() {
                    tracing::warn!("Ignoring non-numeric slider input '{}'", self.text);
                }
                value
            }
            _ => None,
        }
    }

    /// Step the current value by `steps · step`, bypassing the debounce.
    pub fn nudge(&mut self, steps: i32, step: f64, fallback: f64) -> f64 {
        self.deadline = None;
        self.parsed().unwrap_or(fallback) + f64::from(steps) * step
    }

    /// Show a committed value.
    pub fn show(&mut self, value: f64) {
        self.text = format_value(value);
    }

    fn parsed(&self) -> Option<f64> {
        self.text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

fn format_value(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_commit_after_quiet_period() {
        let mut input = NumericInput::new(ms(400));
        input.type_text("4", ms(0));
        input.type_text("42", ms(300));
        assert_eq!(input.poll(ms(500)), None);
        assert!(input.is_pending());
        assert_eq!(input.poll(ms(700)), Some(42.0));
        assert!(!input.is_pending());
        assert_eq!(input.poll(ms(900)), None);
    }

    #[test]
    fn test_garbage_is_dropped() {
        let mut input = NumericInput::new(ms(100));
        input.type_text("4x", ms(0));
        assert_eq!(input.poll(ms(100)), None);
        assert!(!input.is_pending());
    }

    #[test]
    fn test_nudge_bypasses_debounce() {
        let mut input = NumericInput::new(ms(400));
        input.type_text("10", ms(0));
        assert_eq!(input.nudge(1, 1.0, 0.0), 11.0);
        assert!(!input.is_pending());
        input.type_text("", ms(0));
        assert_eq!(input.nudge(-1, 5.0, 20.0), 15.0);
    }

    #[test]
    fn test_show_formats_cleanly() {
        let mut input = NumericInput::new(ms(0));
        input.show(336.0);
        assert_eq!(input.text(), "336");
        input.show(0.30000000000000004);
        assert_eq!(input.text(), "0.3");
        input.show(-0.0);
        assert_eq!(input.text(), "0");
    }
}
