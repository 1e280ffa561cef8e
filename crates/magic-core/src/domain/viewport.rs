//! Scrollable window over a list of items.
//!
//! Invariant (whenever the list is non-empty):
//! `offset <= selected < offset + visible`.
//!
//! Every adjustment moves `offset` by the minimum amount needed to restore
//! the invariant; the window never jumps further than necessary.

/// The subset of items currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    visible: usize,
}

impl Viewport {
    /// A viewport showing `visible` rows (at least one) from the top.
    pub fn new(visible: usize) -> Self {
        Self {
            offset: 0,
            visible: visible.max(1),
        }
    }

    /// First visible item index.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of item rows available.
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// `true` when `len` items do not fit and the window must scroll.
    pub fn scrolls(&self, len: usize) -> bool {
        len > self.visible
    }

    /// Indices of the items on screen for a list of `len` items.
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        let end = (self.offset + self.visible).min(len);
        self.offset.min(end)..end
    }

    /// Items clipped above the window.
    pub fn more_above(&self) -> usize {
        self.offset
    }

    /// Items clipped below the window.
    pub fn more_below(&self, len: usize) -> usize {
        len.saturating_sub(self.offset + self.visible)
    }

    /// `true` if `index` is inside the window.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.offset && index < self.offset + self.visible
    }

    /// Adjust the offset so `selected` is visible. Returns `true` if the
    /// offset changed.
    pub fn follow(&mut self, selected: usize, len: usize) -> bool {
        let before = self.offset;

        if !self.scrolls(len) {
            self.offset = 0;
        } else {
            if selected < self.offset {
                self.offset = selected;
            } else if selected >= self.offset + self.visible {
                self.offset = selected + 1 - self.visible;
            }
            // A shrinking list or a growing window can leave blank rows.
            self.offset = self.offset.min(len - self.visible);
        }

        before != self.offset
    }

    /// Change the window height (after a terminal resize) and re-establish
    /// the invariant. Returns `true` if anything changed.
    pub fn resize(&mut self, visible: usize, selected: usize, len: usize) -> bool {
        let visible = visible.max(1);
        let resized = visible != self.visible;
        self.visible = visible;
        let moved = self.follow(selected, len);
        resized || moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_scroll_when_everything_fits() {
        let mut vp = Viewport::new(10);
        for selected in 0..5 {
            vp.follow(selected, 5);
            assert_eq!(vp.offset(), 0);
        }
        assert!(!vp.scrolls(5));
        assert_eq!(vp.more_below(5), 0);
    }

    #[test]
    fn scrolls_down_by_one() {
        let mut vp = Viewport::new(4);
        for selected in 0..4 {
            assert!(!vp.follow(selected, 20));
        }
        assert!(vp.follow(4, 20));
        assert_eq!(vp.offset(), 1);
        assert!(vp.follow(5, 20));
        assert_eq!(vp.offset(), 2);
    }

    #[test]
    fn scrolls_up_to_selection() {
        let mut vp = Viewport::new(4);
        vp.follow(10, 20);
        assert_eq!(vp.offset(), 7);
        // Moving within the window is free.
        assert!(!vp.follow(8, 20));
        assert!(vp.follow(6, 20));
        assert_eq!(vp.offset(), 6);
    }

    #[test]
    fn wrap_to_last_item_jumps_minimally() {
        let mut vp = Viewport::new(4);
        vp.follow(19, 20);
        assert_eq!(vp.offset(), 16);
        vp.follow(0, 20);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn minimal_adjustment_property() {
        let len = 23;
        let mut vp = Viewport::new(5);
        let mut selected = 0usize;
        // Walk the selection in an irregular pattern and check every step.
        let steps: [isize; 12] = [1, 1, 1, 1, 1, 1, -1, -1, 7, -3, 11, -22];
        for step in steps {
            let previous = vp.offset();
            selected = (selected as isize + step).rem_euclid(len as isize) as usize;
            vp.follow(selected, len);

            assert!(vp.offset() <= selected && selected < vp.offset() + vp.visible());
            let expected = if selected < previous {
                selected
            } else if selected >= previous + 5 {
                selected - 4
            } else {
                previous
            };
            assert_eq!(vp.offset(), expected, "selected {selected}");
        }
    }

    #[test]
    fn resize_clamps_offset() {
        let mut vp = Viewport::new(4);
        vp.follow(19, 20);
        assert!(vp.resize(10, 19, 20));
        assert_eq!(vp.offset(), 10);
        assert!(vp.resize(30, 19, 20));
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn range_and_indicators() {
        let mut vp = Viewport::new(4);
        vp.follow(6, 10);
        assert_eq!(vp.range(10), 3..7);
        assert_eq!(vp.more_above(), 3);
        assert_eq!(vp.more_below(10), 3);
        assert!(vp.contains(5));
        assert!(!vp.contains(7));
    }

    #[test]
    fn zero_height_is_promoted_to_one_row() {
        let vp = Viewport::new(0);
        assert_eq!(vp.visible(), 1);
    }
}
