//! Fixed-size pagination with wrap-around.

/// Movies shown per carousel page.
pub const MOVIES_PER_PAGE: usize = 5;

/// People shown per actors page.
pub const PEOPLE_PER_PAGE: usize = 10;

/// Page cursor over a list whose length may change between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Pager {
    /// Creates a pager at page 0. A zero page size is treated as 1.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
        }
    }

    /// Current page (0-based).
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Items per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for a list of `len` items.
    #[must_use]
    pub const fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size)
    }

    /// Advances one page, wrapping to the first.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn next(&mut self, len: usize) {
        let total = self.total_pages(len);
        if total == 0 {
            self.page = 0;
            return;
        }
        self.page = (self.page + 1) % total;
    }

    /// Goes back one page, wrapping to the last.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn prev(&mut self, len: usize) {
        let total = self.total_pages(len);
        if total == 0 {
            self.page = 0;
            return;
        }
        self.page = (self.page % total + total - 1) % total;
    }

    /// Returns to page 0.
    pub const fn reset(&mut self) {
        self.page = 0;
    }

    /// Returns the slice shown on the current page (empty if out of range).
    #[must_use]
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.page.saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size).min(items.len());
        items.get(start..end).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        // Arrange
        let pager = Pager::new(MOVIES_PER_PAGE);

        // Act & Assert
        assert_eq!(pager.total_pages(0), 0);
        assert_eq!(pager.total_pages(5), 1);
        assert_eq!(pager.total_pages(6), 2);
        assert_eq!(pager.total_pages(20), 4);
    }

    #[test]
    fn test_next_wraps_to_first_page() {
        // Arrange
        let mut pager = Pager::new(5);

        // Act & Assert: 12 items -> 3 pages
        pager.next(12);
        assert_eq!(pager.page(), 1);
        pager.next(12);
        assert_eq!(pager.page(), 2);
        pager.next(12);
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_prev_wraps_to_last_page() {
        // Arrange
        let mut pager = Pager::new(10);

        // Act
        pager.prev(25);

        // Assert
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn test_empty_list_stays_on_first_page() {
        // Arrange
        let mut pager = Pager::new(5);

        // Act & Assert
        pager.next(0);
        assert_eq!(pager.page(), 0);
        pager.prev(0);
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_shrunk_list_wraps_from_stale_page() {
        // Arrange: on page 3 of a 20-item list
        let mut pager = Pager::new(5);
        for _ in 0..3 {
            pager.next(20);
        }
        assert_eq!(pager.page(), 3);

        // Act: list shrinks to 2 pages
        pager.prev(10);

        // Assert
        assert_eq!(pager.page(), 0);
    }

    #[test]
    fn test_window() {
        // Arrange
        let items: Vec<u32> = (0..12).collect();
        let mut pager = Pager::new(5);

        // Act & Assert
        assert_eq!(pager.window(&items), &[0, 1, 2, 3, 4]);
        pager.next(items.len());
        pager.next(items.len());
        assert_eq!(pager.window(&items), &[10, 11]);
        assert!(pager.window(&items[..3]).is_empty());
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        // Arrange & Act
        let pager = Pager::new(0);

        // Assert
        assert_eq!(pager.page_size(), 1);
    }
}
