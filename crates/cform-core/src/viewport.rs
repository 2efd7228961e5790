//! Viewport classification and resize debouncing
//!
//! Widths are classified in pixels against fixed breakpoints. A terminal
//! reports columns, so callers convert with a cell width first
//! (see [`Viewport::from_terminal`]).

use std::time::{Duration, Instant};

/// Widest width still classified as mobile
pub const MOBILE_MAX_PX: u32 = 568;
/// Widest width still classified as pad
pub const PAD_MAX_PX: u32 = 768;
/// Widest width still classified as horizontal pad
pub const HPAD_MAX_PX: u32 = 1024;
/// Narrowest width classified as widest
pub const WIDEST_MIN_PX: u32 = 1920;

/// Default trailing debounce window for resize events
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Breakpoint classification of the current window size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub mobile: bool,
    pub pad: bool,
    pub hpad: bool,
    pub wider: bool,
    pub widest: bool,
    /// mobile or pad
    pub phone: bool,
}

impl Viewport {
    /// Classify a window size given in pixels
    pub fn classify(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mobile: width <= MOBILE_MAX_PX,
            pad: width > MOBILE_MAX_PX && width <= PAD_MAX_PX,
            hpad: width > PAD_MAX_PX && width <= HPAD_MAX_PX,
            wider: width > HPAD_MAX_PX && width < WIDEST_MIN_PX,
            widest: width >= WIDEST_MIN_PX,
            phone: width <= PAD_MAX_PX,
        }
    }

    /// Classify a terminal size, treating each column as `cell_width_px`
    /// pixels wide
    pub fn from_terminal(cols: u16, rows: u16, cell_width_px: u16) -> Self {
        let cell = u32::from(cell_width_px.max(1));
        Self::classify(u32::from(cols) * cell, u32::from(rows))
    }
}

/// Trailing-edge debouncer for resize events.
///
/// Every event restarts the window; the last size is released once no new
/// event has arrived for the whole window.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    window: Duration,
    pending: Option<(u16, u16)>,
    last_event: Option<Instant>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_RESIZE_DEBOUNCE)
    }
}

impl ResizeDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            last_event: None,
        }
    }

    /// Record a resize event
    pub fn push(&mut self, cols: u16, rows: u16, now: Instant) {
        self.pending = Some((cols, rows));
        self.last_event = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Release the settled size once the window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<(u16, u16)> {
        let last = self.last_event?;
        if now.saturating_duration_since(last) >= self.window {
            self.last_event = None;
            self.pending.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints() {
        let v = Viewport::classify(568, 800);
        assert!(v.mobile && v.phone && !v.pad);

        let v = Viewport::classify(569, 800);
        assert!(v.pad && v.phone && !v.mobile);

        let v = Viewport::classify(768, 800);
        assert!(v.pad);

        let v = Viewport::classify(769, 800);
        assert!(v.hpad && !v.phone);

        let v = Viewport::classify(1024, 800);
        assert!(v.hpad && !v.wider);

        let v = Viewport::classify(1025, 800);
        assert!(v.wider);

        let v = Viewport::classify(1919, 800);
        assert!(v.wider && !v.widest);

        let v = Viewport::classify(1920, 800);
        assert!(v.widest && !v.wider);
    }

    #[test]
    fn test_exactly_one_width_class() {
        for width in [0, 300, 568, 569, 700, 768, 769, 1000, 1024, 1025, 1500, 1919, 1920, 4000] {
            let v = Viewport::classify(width, 0);
            let count = [v.mobile, v.pad, v.hpad, v.wider, v.widest]
                .iter()
                .filter(|b| **b)
                .count();
            assert_eq!(count, 1, "width {width}");
        }
    }

    #[test]
    fn test_from_terminal_uses_cell_width() {
        // 71 * 8 = 568
        assert!(Viewport::from_terminal(71, 24, 8).mobile);
        assert!(!Viewport::from_terminal(72, 24, 8).mobile);
        // 120 * 8 = 960, 130 * 8 = 1040
        assert!(Viewport::from_terminal(120, 40, 8).hpad);
        assert!(Viewport::from_terminal(130, 40, 8).wider);
        // zero cell width is clamped
        assert_eq!(Viewport::from_terminal(10, 5, 0).width, 10);
    }

    #[test]
    fn test_debouncer_releases_after_quiet_window() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(Duration::from_millis(500));

        debouncer.push(80, 24, start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(100)), None);
        assert!(debouncer.is_pending());
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(500)),
            Some((80, 24))
        );
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
    }

    #[test]
    fn test_debouncer_coalesces_bursts_to_last_size() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(Duration::from_millis(500));

        debouncer.push(80, 24, start);
        debouncer.push(90, 24, start + Duration::from_millis(300));
        debouncer.push(100, 30, start + Duration::from_millis(600));

        // 500ms after the first event, but only 200ms after the last
        assert_eq!(debouncer.poll(start + Duration::from_millis(800)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(1100)),
            Some((100, 30))
        );
    }
}
