//! Pagination state machine for the table widget.
//!
//! This module owns the page/size/total-page state and the page-window
//! computation, and renders the pagination strip itself. It does not fetch or
//! hold any page content; the [`datatable`](crate::datatable) widget composes
//! this model with a data source.
//!
//! Pages are 1-based: `page` always satisfies `1 <= page <= max(total_pages, 1)`.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_pagetable::pager::Model;
//!
//! let mut pager = Model::new().with_per_page(10);
//! pager.set_total_count(95); // 10 pages
//!
//! assert_eq!(pager.total_pages, 10);
//! assert_eq!(pager.page_window(), vec![1, 2, 3, 4, 5]);
//!
//! pager.select_page(5);
//! assert_eq!(pager.page_window(), vec![3, 4, 5, 6, 7]);
//! ```

use crate::key::{Binding, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use once_cell::sync::Lazy;

/// Page sizes offered by the widget's page-size selector.
pub const PAGE_SIZES: [usize; 7] = [5, 10, 25, 50, 100, 250, 500];

/// Number of page buttons shown around the current page by default.
pub const DEFAULT_WINDOW: usize = 5;

static ACTIVE_PAGE_STYLE: Lazy<Style> =
    Lazy::new(|| Style::new().foreground(Color::from("212")).bold(true));
static INACTIVE_PAGE_STYLE: Lazy<Style> = Lazy::new(|| Style::new().foreground(Color::from("240")));

/// Key bindings for pager navigation.
#[derive(Debug, Clone)]
pub struct PagerKeyMap {
    /// Key binding for the previous page. Default: PageUp, Left, 'h'.
    pub prev_page: Binding,
    /// Key binding for the next page. Default: PageDown, Right, 'l'.
    pub next_page: Binding,
    /// Key binding for the first page. Default: Home, 'g'.
    pub first_page: Binding,
    /// Key binding for the last page. Default: End, 'G'.
    pub last_page: Binding,
}

impl Default for PagerKeyMap {
    fn default() -> Self {
        Self {
            prev_page: Binding::new(vec![KeyCode::PageUp, KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "prev page"),
            next_page: Binding::new(vec![KeyCode::PageDown, KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "next page"),
            first_page: Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("home/g", "first page"),
            last_page: Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("end/G", "last page"),
        }
    }
}

impl KeyMapTrait for PagerKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.prev_page, &self.next_page],
            vec![&self.first_page, &self.last_page],
        ]
    }
}

/// Pagination model holding page, page size, and total-page state.
///
/// `total_pages` is derived from a record count via [`set_total_count`](Model::set_total_count)
/// and may be zero for an empty collection; the current page is still 1 in
/// that case so the invariant `1 <= page <= max(total_pages, 1)` always holds.
#[derive(Debug, Clone)]
pub struct Model {
    /// The current page, 1-based.
    pub page: usize,
    /// The number of records per page.
    pub per_page: usize,
    /// The total number of pages. Zero when the collection is empty.
    pub total_pages: usize,
    /// The maximum number of page buttons to display.
    pub window: usize,

    /// Style for the current page number in the pagination strip.
    pub active_style: Style,
    /// Style for the other page numbers in the pagination strip.
    pub inactive_style: Style,

    /// Key bindings.
    pub keymap: PagerKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: PAGE_SIZES[0],
            total_pages: 1,
            window: DEFAULT_WINDOW,
            active_style: ACTIVE_PAGE_STYLE.clone(),
            inactive_style: INACTIVE_PAGE_STYLE.clone(),
            keymap: PagerKeyMap::default(),
        }
    }
}

impl Model {
    /// Creates a pager with default settings: page 1 of 1, five records per
    /// page, a five-page window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of records per page (builder). Clamped to a minimum of 1.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Sets the page-window size (builder). Clamped to a minimum of 1.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    /// Sets the total number of pages directly (builder).
    pub fn with_total_pages(mut self, pages: usize) -> Self {
        self.set_total_pages(pages);
        self
    }

    /// Sets the styles for active and inactive page numbers (builder).
    pub fn with_styles(mut self, active: Style, inactive: Style) -> Self {
        self.active_style = active;
        self.inactive_style = inactive;
        self
    }

    /// Sets the total number of pages and re-clamps the current page.
    pub fn set_total_pages(&mut self, pages: usize) {
        self.total_pages = pages;
        self.clamp_page();
    }

    /// Derives `total_pages` from a total record count and re-clamps the
    /// current page. Zero records give zero pages.
    pub fn set_total_count(&mut self, count: u64) {
        self.total_pages = count.div_ceil(self.per_page as u64) as usize;
        self.clamp_page();
    }

    /// Sets the page size and resets the current page to 1.
    ///
    /// The reset is unconditional: there is no stable record offset to
    /// preserve position across a page-size change.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
        self.page = 1;
    }

    /// Advances to the next page; no-op on the last page.
    pub fn next_page(&mut self) {
        if self.page < self.total_pages {
            self.page += 1;
        }
    }

    /// Goes back to the previous page; no-op on the first page.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Jumps to page 1.
    pub fn go_to_first(&mut self) {
        self.page = 1;
    }

    /// Jumps to the last page.
    pub fn go_to_last(&mut self) {
        self.page = self.total_pages.max(1);
    }

    /// Selects a page, clamping the request into `[1, max(total_pages, 1)]`,
    /// and returns the page actually applied.
    ///
    /// Callers that care whether the request was out of range can compare the
    /// return value with what they asked for.
    pub fn select_page(&mut self, page: usize) -> usize {
        self.page = page.clamp(1, self.total_pages.max(1));
        self.page
    }

    /// Returns true if the pager is on the first page.
    pub fn on_first_page(&self) -> bool {
        self.page == 1
    }

    /// Returns true if the pager is on the last page (or the collection is
    /// empty).
    pub fn on_last_page(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Computes the contiguous run of page numbers to display.
    ///
    /// The window is centered on the current page, left-clamped at page 1 and
    /// right-clamped at `total_pages`; near either boundary it slides rather
    /// than shrinking, so its length is always `min(window, total_pages)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_pagetable::pager::Model;
    ///
    /// let mut pager = Model::new().with_total_pages(10);
    /// pager.select_page(10);
    /// assert_eq!(pager.page_window(), vec![6, 7, 8, 9, 10]);
    /// ```
    pub fn page_window(&self) -> Vec<usize> {
        if self.total_pages == 0 {
            return Vec::new();
        }
        // `page` is a pub field, so a host can move it out of range between
        // transitions; the window stays well-formed regardless.
        let page = self.page.clamp(1, self.total_pages);
        let half = self.window / 2;
        let mut start = page.saturating_sub(half).max(1);
        let end = self.total_pages.min(start + self.window - 1);
        if end - start + 1 < self.window {
            start = end.saturating_sub(self.window - 1).max(1);
        }
        (start..=end).collect()
    }

    /// Handles pager navigation keys.
    ///
    /// Useful when the pager is used standalone; the table widget drives the
    /// transitions through this method and watches `page` for changes.
    pub fn update(&mut self, msg: &Msg) {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.next_page.matches(key_msg) {
                self.next_page();
            } else if self.keymap.prev_page.matches(key_msg) {
                self.prev_page();
            } else if self.keymap.first_page.matches(key_msg) {
                self.go_to_first();
            } else if self.keymap.last_page.matches(key_msg) {
                self.go_to_last();
            }
        }
    }

    /// Renders the pagination strip: the window of page numbers with the
    /// current page highlighted.
    pub fn view(&self) -> String {
        let mut out = String::new();
        for (i, n) in self.page_window().into_iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let style = if n == self.page {
                &self.active_style
            } else {
                &self.inactive_style
            };
            out.push_str(&style.render(&n.to_string()));
        }
        out
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.total_pages.max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn pager(total_pages: usize, page: usize) -> Model {
        let mut p = Model::new().with_total_pages(total_pages);
        p.select_page(page);
        p
    }

    #[test]
    fn test_window_at_left_edge() {
        assert_eq!(pager(10, 1).page_window(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_at_right_edge() {
        assert_eq!(pager(10, 10).page_window(), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_window_centered_in_interior() {
        assert_eq!(pager(10, 5).page_window(), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_window_with_fewer_pages_than_window_size() {
        assert_eq!(pager(3, 2).page_window(), vec![1, 2, 3]);
    }

    #[test]
    fn test_window_slides_near_boundaries() {
        assert_eq!(pager(10, 2).page_window(), vec![1, 2, 3, 4, 5]);
        assert_eq!(pager(10, 9).page_window(), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_window_length_and_containment_for_all_pages() {
        for total in 0..=12usize {
            for page in 1..=total.max(1) {
                let p = pager(total, page);
                let w = p.page_window();
                assert_eq!(w.len(), p.window.min(total), "total={total} page={page}");
                assert!(w.iter().all(|&n| n >= 1 && n <= total));
                assert!(w.windows(2).all(|ab| ab[1] == ab[0] + 1));
            }
        }
    }

    #[test]
    fn test_window_tolerates_out_of_range_page_field() {
        // `page` is pub; a host can move it outside the invariant range
        // between transitions. The window must stay well-formed.
        let mut p = Model::new().with_total_pages(3);
        p.page = 100;
        assert_eq!(p.page_window(), vec![1, 2, 3]);

        p.page = 0;
        assert_eq!(p.page_window(), vec![1, 2, 3]);

        let mut p = Model::new().with_total_pages(10);
        p.page = 42;
        assert_eq!(p.page_window(), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_next_page_is_noop_on_last_page() {
        let mut p = pager(10, 10);
        p.next_page();
        assert_eq!(p.page, 10);
    }

    #[test]
    fn test_prev_page_is_noop_on_first_page() {
        let mut p = pager(10, 1);
        p.prev_page();
        assert_eq!(p.page, 1);
    }

    #[test]
    fn test_set_per_page_resets_to_first_page() {
        let mut p = pager(10, 7);
        p.set_per_page(25);
        assert_eq!(p.per_page, 25);
        assert_eq!(p.page, 1);

        p.set_per_page(0);
        assert_eq!(p.per_page, 1);
        assert_eq!(p.page, 1);
    }

    #[test]
    fn test_go_to_first_is_idempotent() {
        let mut p = pager(10, 6);
        p.go_to_first();
        let once = p.clone();
        p.go_to_first();
        assert_eq!(p.page, once.page);
        assert_eq!(p.page_window(), once.page_window());
    }

    #[test]
    fn test_go_to_last_lands_on_total_pages() {
        let mut p = pager(10, 3);
        p.go_to_last();
        assert_eq!(p.page, 10);

        let mut empty = pager(0, 1);
        empty.go_to_last();
        assert_eq!(empty.page, 1);
    }

    #[test]
    fn test_select_page_clamps_out_of_range_requests() {
        let mut p = pager(10, 1);
        assert_eq!(p.select_page(99), 10);
        assert_eq!(p.page, 10);
        assert_eq!(p.select_page(0), 1);
        assert_eq!(p.select_page(4), 4);
    }

    #[test]
    fn test_set_total_count_rounds_up() {
        let mut p = Model::new().with_per_page(10);
        p.set_total_count(95);
        assert_eq!(p.total_pages, 10);
        p.set_total_count(100);
        assert_eq!(p.total_pages, 10);
        p.set_total_count(101);
        assert_eq!(p.total_pages, 11);
    }

    #[test]
    fn test_empty_collection_has_zero_pages_and_empty_window() {
        let mut p = Model::new().with_per_page(10);
        p.set_total_count(0);
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.page, 1);
        assert!(p.page_window().is_empty());
    }

    #[test]
    fn test_shrinking_total_reclamps_current_page() {
        let mut p = pager(20, 18);
        p.set_total_pages(5);
        assert_eq!(p.page, 5);
    }

    #[test]
    fn test_update_handles_navigation_keys() {
        let mut p = pager(10, 5);
        p.update(&key(KeyCode::Right));
        assert_eq!(p.page, 6);
        p.update(&key(KeyCode::Left));
        assert_eq!(p.page, 5);
        p.update(&key(KeyCode::End));
        assert_eq!(p.page, 10);
        p.update(&key(KeyCode::Home));
        assert_eq!(p.page, 1);
        p.update(&key(KeyCode::Char('x')));
        assert_eq!(p.page, 1);
    }

    #[test]
    fn test_view_shows_window_numbers() {
        let p = pager(10, 5);
        let plain = String::from_utf8(strip_ansi_escapes::strip(p.view())).unwrap();
        assert_eq!(plain, "3 4 5 6 7");
    }
}
