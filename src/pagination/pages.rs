//! Page-number strip shown under paginated tables.

use std::collections::BTreeSet;

/// How many page links surround the edges and the current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageStrip {
    pub left_edge: usize,
    pub left_current: usize,
    pub right_current: usize,
    pub right_edge: usize,
}

impl Default for PageStrip {
    fn default() -> Self {
        Self {
            left_edge: 2,
            left_current: 2,
            right_current: 4,
            right_edge: 2,
        }
    }
}

impl PageStrip {
    /// Page numbers to render for `last_page` pages; `None` marks a gap.
    ///
    /// A `current_page` past the end is treated as the last page.
    pub fn pages(&self, last_page: usize, current_page: usize) -> Vec<Option<usize>> {
        if last_page == 0 {
            return Vec::new();
        }

        let current = current_page.clamp(1, last_page);
        let head = 1..=self.left_edge.min(last_page);
        let around = current.saturating_sub(self.left_current).max(1)
            ..=current.saturating_add(self.right_current).min(last_page);
        let tail = last_page.saturating_sub(self.right_edge).saturating_add(1)..=last_page;

        let visible: BTreeSet<usize> = head.chain(around).chain(tail).collect();

        let mut strip = Vec::with_capacity(visible.len() + 2);
        let mut previous = 0;
        for page in visible {
            if page > previous + 1 {
                strip.push(None);
            }
            strip.push(Some(page));
            previous = page;
        }
        strip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_pages_for_empty_result() {
        assert!(PageStrip::default().pages(0, 1).is_empty());
    }

    #[test]
    fn short_strip_has_no_gaps() {
        assert_eq!(
            PageStrip::default().pages(3, 2),
            vec![Some(1), Some(2), Some(3)]
        );
    }

    #[test]
    fn long_strip_collapses_both_sides() {
        assert_eq!(
            PageStrip::default().pages(20, 10),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
    }

    #[test]
    fn page_past_the_end_keeps_last_page() {
        assert_eq!(
            PageStrip::default().pages(3, 50),
            vec![Some(1), Some(2), Some(3)]
        );
        assert_eq!(
            PageStrip::default().pages(20, 500),
            vec![Some(1), Some(2), None, Some(18), Some(19), Some(20)]
        );
    }

    #[test]
    fn single_page_gap_is_still_marked() {
        let strip = PageStrip {
            left_edge: 1,
            left_current: 0,
            right_current: 0,
            right_edge: 1,
        };
        assert_eq!(strip.pages(5, 3), vec![Some(1), None, Some(3), None, Some(5)]);
    }
}
