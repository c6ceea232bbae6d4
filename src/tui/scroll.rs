// Scroll state for TUI panels
//
// Each component owns its scroll state; App just renders and routes input.
// Offsets are in rendered lines. Content is static between analyses, so
// there is no auto-follow: new content always starts at the top.

/// Scroll state for a single panel
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    /// Line at the top of the viewport
    offset: usize,

    /// Total number of lines in content
    total: usize,

    /// Number of lines visible in viewport
    viewport: usize,
}

impl ScrollState {
    /// Update content and viewport dimensions, clamping the offset
    ///
    /// Call this each render frame with current sizes.
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn page_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.viewport.max(1));
    }

    pub fn page_down(&mut self) {
        self.offset = (self.offset + self.viewport.max(1)).min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Scroll the minimum amount that brings `start..end` into view
    ///
    /// When the range is taller than the viewport its first line wins.
    pub fn reveal(&mut self, start: usize, end: usize) {
        if self.viewport == 0 {
            self.offset = start;
            return;
        }
        if end > self.offset + self.viewport {
            self.offset = end.saturating_sub(self.viewport);
        }
        if start < self.offset || end - start > self.viewport {
            self.offset = start;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    /// Visible line range `(start, end)`, end exclusive
    pub fn visible_range(&self) -> (usize, usize) {
        let end = (self.offset + self.viewport).min(self.total);
        (self.offset.min(end), end)
    }

    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    fn max_offset(&self) -> usize {
        // Before the first render the viewport is unknown; allow any offset
        if self.viewport == 0 {
            return self.total;
        }
        self.total.saturating_sub(self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(total: usize, viewport: usize) -> ScrollState {
        let mut s = ScrollState::default();
        s.update_dimensions(total, viewport);
        s
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut s = sized(30, 10);
        s.page_up();
        assert_eq!(s.offset(), 0);

        s.scroll_to_bottom();
        assert_eq!(s.offset(), 20);
        s.page_down();
        assert_eq!(s.offset(), 20);
    }

    #[test]
    fn test_paging() {
        let mut s = sized(25, 10);
        s.page_down();
        assert_eq!(s.visible_range(), (10, 20));
        s.page_down();
        assert_eq!(s.visible_range(), (15, 25));
        s.page_up();
        assert_eq!(s.offset(), 5);
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut s = sized(100, 10);
        s.scroll_to_bottom();
        s.update_dimensions(12, 10);
        assert_eq!(s.offset(), 2);
        assert!(s.needs_scrollbar());
        s.update_dimensions(5, 10);
        assert_eq!(s.offset(), 0);
        assert!(!s.needs_scrollbar());
    }

    #[test]
    fn test_reveal_moves_minimally() {
        let mut s = sized(50, 10);
        s.reveal(12, 15);
        assert_eq!(s.offset(), 5);

        // Already visible: no movement
        s.reveal(6, 9);
        assert_eq!(s.offset(), 5);

        s.reveal(2, 4);
        assert_eq!(s.offset(), 2);

        // Taller than viewport: top wins
        s.reveal(20, 40);
        assert_eq!(s.offset(), 20);
    }
}
