//! One-shot reveal animation for cards.
//!
//! Cards start hidden.  The first frame a card sits inside the visible part
//! of the list, its fade starts; from then on it advances one step per frame
//! until fully shown.  Nothing ever moves a card back towards hidden.

use std::collections::HashMap;

/// Frames a fade takes from hidden to fully shown.
pub const REVEAL_TICKS: u8 = 6;

/// Columns a fully hidden card is shifted right by.
pub const REVEAL_OFFSET: u16 = 4;

#[derive(Debug, Default)]
pub struct RevealTracker {
    /// Frames elapsed since each card was first seen.  Absent means hidden.
    progress: HashMap<String, u8>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame.  `visible` names the cards currently in the
    /// viewport; cards already revealing keep going even if scrolled away.
    pub fn tick<'a>(&mut self, visible: impl IntoIterator<Item = &'a str>) {
        for step in self.progress.values_mut() {
            *step = (*step + 1).min(REVEAL_TICKS);
        }
        for name in visible {
            self.progress.entry(name.to_string()).or_insert(0);
        }
    }

    /// Visibility in `0.0..=1.0`.
    pub fn opacity(&self, name: &str) -> f32 {
        self.progress
            .get(name)
            .map_or(0.0, |&step| f32::from(step) / f32::from(REVEAL_TICKS))
    }

    /// Remaining horizontal offset for `name`.
    pub fn offset(&self, name: &str) -> u16 {
        let hidden = 1.0 - self.opacity(name);
        (hidden * f32::from(REVEAL_OFFSET)).round() as u16
    }

    pub fn is_revealed(&self, name: &str) -> bool {
        self.progress.get(name) == Some(&REVEAL_TICKS)
    }

    /// Whether any card is still mid-fade.
    pub fn animating(&self) -> bool {
        self.progress.values().any(|&step| step < REVEAL_TICKS)
    }

    /// Forget everything, e.g. when a new listing replaces the old cards.
    pub fn reset(&mut self) {
        self.progress.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_cards_are_hidden() {
        let tracker = RevealTracker::new();
        assert_eq!(tracker.opacity("a"), 0.0);
        assert_eq!(tracker.offset("a"), REVEAL_OFFSET);
        assert!(!tracker.animating());
    }

    #[test]
    fn visible_card_fades_in_over_ticks() {
        let mut tracker = RevealTracker::new();
        tracker.tick(["a"]);
        assert_eq!(tracker.opacity("a"), 0.0);
        assert!(tracker.animating());

        for _ in 0..REVEAL_TICKS {
            tracker.tick(["a"]);
        }
        assert!(tracker.is_revealed("a"));
        assert_eq!(tracker.opacity("a"), 1.0);
        assert_eq!(tracker.offset("a"), 0);
        assert!(!tracker.animating());
    }

    #[test]
    fn scrolled_away_card_keeps_revealing() {
        let mut tracker = RevealTracker::new();
        tracker.tick(["a"]);
        for _ in 0..REVEAL_TICKS {
            tracker.tick(Vec::<&str>::new());
        }
        assert!(tracker.is_revealed("a"), "leaving the viewport never re-hides");
    }

    #[test]
    fn only_visible_cards_start() {
        let mut tracker = RevealTracker::new();
        tracker.tick(["a"]);
        tracker.tick(["a"]);
        assert!(tracker.opacity("a") > 0.0);
        assert_eq!(tracker.opacity("b"), 0.0);
    }

    #[test]
    fn progress_is_monotonic() {
        let mut tracker = RevealTracker::new();
        let mut last = 0.0;
        for i in 0..10 {
            let visible: &[&str] = if i % 2 == 0 { &["a"] } else { &[] };
            tracker.tick(visible.iter().copied());
            let now = tracker.opacity("a");
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn reset_hides_everything() {
        let mut tracker = RevealTracker::new();
        tracker.tick(["a"]);
        tracker.tick(["a"]);
        tracker.reset();
        assert_eq!(tracker.opacity("a"), 0.0);
    }
}
