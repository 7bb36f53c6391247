//! Debounced re-highlighting for an editing widget
//!
//! Each edit reschedules a single pending recompute; the caller polls with
//! the current time from its event loop.

use crate::highlight::{highlight, Highlight};
use std::time::{Duration, Instant};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(250);

/// Single pending deadline, pushed back by every touch
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    /// Cancel any pending deadline and schedule a new one
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

/// Text buffer whose highlights are recomputed lazily after edits settle
#[derive(Debug, Clone, Default)]
pub struct LiveHighlighter {
    text: String,
    highlights: Vec<Highlight>,
    debouncer: Debouncer,
    recomputes: usize,
}

impl LiveHighlighter {
    pub fn new(delay: Duration) -> Self {
        Self { debouncer: Debouncer::new(delay), ..Default::default() }
    }

    /// Replace the buffer contents and schedule a recompute
    pub fn edit(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        self.debouncer.touch(now);
    }

    /// Recompute if the debounce delay elapsed; returns the fresh highlights
    pub fn poll(&mut self, now: Instant) -> Option<&[Highlight]> {
        if !self.debouncer.take_due(now) {
            return None;
        }
        self.highlights = highlight(&self.text);
        self.recomputes += 1;
        Some(&self.highlights)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Highlights from the last recompute (may lag behind the text)
    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn recomputes(&self) -> usize {
        self.recomputes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debouncer_reschedules() {
        let start = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(250));

        d.touch(start);
        d.touch(start + Duration::from_millis(200));
        assert!(!d.take_due(start + Duration::from_millis(300)));
        assert!(d.take_due(start + Duration::from_millis(450)));
        assert!(!d.is_pending());
        assert!(!d.take_due(start + Duration::from_millis(900)));
    }

    #[test]
    fn test_rapid_edits_coalesce() {
        let start = Instant::now();
        let mut live = LiveHighlighter::new(Duration::from_millis(250));

        for (i, text) in ["*", "*a", "*a*"].iter().enumerate() {
            live.edit(*text, start + Duration::from_millis(50 * i as u64));
            assert!(live.poll(start + Duration::from_millis(50 * i as u64 + 10)).is_none());
        }

        let highlights = live.poll(start + Duration::from_millis(400)).unwrap();
        assert_eq!(highlights.len(), 3);
        assert_eq!(live.recomputes(), 1);
        assert!(!live.is_pending());
    }
}
