//! src/view/pager.rs
//! ============================================================================
//! # Pagination Engine
//!
//! Pure functions only: `paginate` turns (total, page, page size) into a
//! clamped page window, and `PagerControl::build` turns the same inputs into
//! a renderable control model. Neither knows where the data came from, so
//! all three query modes share them.

/// Clamped slice bounds for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub clamped_page: u64,
    pub page_count: u64,
    pub window_start: usize,
    pub window_end: usize,
}

/// Compute the page window for `page` over `total` items.
///
/// `page_count = max(1, ceil(total / page_size))` and the requested page is
/// clamped into `[1, page_count]`; out-of-range requests never error.
pub fn paginate(total: usize, page: u64, page_size: usize) -> PageWindow {
    let page_size = page_size.max(1);
    let page_count = (total.div_ceil(page_size) as u64).max(1);
    let clamped_page = page.clamp(1, page_count);
    let window_start = (clamped_page as usize - 1) * page_size;
    let window_end = (window_start + page_size).min(total);
    PageWindow {
        clamped_page,
        page_count,
        window_start,
        window_end,
    }
}

/// How many numbered slots the control shows before eliding.
const MAX_PAGES_SHOWN: u64 = 5;

/// One slot in the rendered pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerSlot {
    Page { number: u64, active: bool },
    Ellipsis,
}

/// Renderable pagination control. Prev/Next are disabled, not hidden, at
/// the first/last page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerControl {
    pub prev_enabled: bool,
    pub prev_target: u64,
    pub next_enabled: bool,
    pub next_target: u64,
    pub slots: Vec<PagerSlot>,
}

impl PagerControl {
    /// Build the control, or `None` when a single page needs no control.
    pub fn build(total: usize, page: u64, page_size: usize) -> Option<Self> {
        let win = paginate(total, page, page_size);
        if win.page_count <= 1 {
            return None;
        }
        let page = win.clamped_page;
        let pages = win.page_count;

        let mut slots = Vec::new();
        if pages > MAX_PAGES_SHOWN {
            // Centered window, recentered so it never runs off either end.
            let mut start = page.saturating_sub(MAX_PAGES_SHOWN / 2).max(1);
            let end = (start + MAX_PAGES_SHOWN - 1).min(pages);
            if end - start + 1 < MAX_PAGES_SHOWN {
                start = end.saturating_sub(MAX_PAGES_SHOWN - 1).max(1);
            }
            if start > 1 {
                slots.push(PagerSlot::Page {
                    number: 1,
                    active: false,
                });
                slots.push(PagerSlot::Ellipsis);
            }
            for number in start..=end {
                slots.push(PagerSlot::Page {
                    number,
                    active: number == page,
                });
            }
            if end < pages {
                slots.push(PagerSlot::Ellipsis);
                slots.push(PagerSlot::Page {
                    number: pages,
                    active: false,
                });
            }
        } else {
            for number in 1..=pages {
                slots.push(PagerSlot::Page {
                    number,
                    active: number == page,
                });
            }
        }

        Some(PagerControl {
            prev_enabled: page > 1,
            prev_target: (page - 1).max(1),
            next_enabled: page < pages,
            next_target: (page + 1).min(pages),
            slots,
        })
    }
}
