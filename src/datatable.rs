//! The paginated table widget.
//!
//! `datatable::Model` composes the [`pager`](crate::pager) state machine with
//! a [`DataSource`]: it renders the current page of records as a table,
//! issues a fetch command whenever the page or page size changes, and applies
//! responses atomically when they arrive.
//!
//! # Stale responses
//!
//! Fetches are not cancelled when the user navigates again before the
//! previous response lands. Instead every fetch command carries the value of
//! a monotonic sequence counter, and [`update`](Model::update) discards any
//! [`FetchedMsg`]/[`FetchFailedMsg`] whose tag no longer matches, so a slow
//! response for an earlier page can never overwrite a faster response for a
//! later one.
//!
//! # Integration
//!
//! ```rust,ignore
//! use bubbletea_pagetable::prelude::*;
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//!
//! struct App {
//!     table: DataTable<Photo>,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let source = HttpSource::new("https://jsonplaceholder.typicode.com/photos");
//!         let mut table = DataTable::new(
//!             vec![Column::new("#"), Column::new("Title"), Column::new("URL")],
//!             source,
//!         );
//!         let cmd = table.init_cmd();
//!         (Self { table }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.table.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.table.view()
//!     }
//! }
//! ```

use std::sync::Arc;

use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use log::{debug, warn};
use unicode_width::UnicodeWidthStr;

use crate::error::Error;
use crate::key::{Binding, KeyMap as KeyMapTrait};
use crate::pager;
use crate::source::{DataSource, PageRequest, Record};

/// A table column: a header title and an optional fixed width.
///
/// Without a fixed width the column sizes itself to its widest cell.
#[derive(Debug, Clone)]
pub struct Column {
    /// Header text.
    pub title: String,
    /// Fixed display width, if any.
    pub width: Option<usize>,
}

impl Column {
    /// Creates a column with the given header title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: None,
        }
    }

    /// Fixes the column to the given display width (builder).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }
}

/// Message delivered when a page fetch resolved successfully.
///
/// `seq` is the fetch tag; the widget ignores the message unless it matches
/// the most recently issued fetch.
pub struct FetchedMsg<R> {
    /// Fetch tag, copied from the sequence counter at issue time.
    pub seq: u64,
    /// The records for the requested page.
    pub items: Vec<R>,
    /// Total record count across all pages.
    pub total_count: u64,
}

/// Message delivered when a page fetch failed.
pub struct FetchFailedMsg {
    /// Fetch tag, copied from the sequence counter at issue time.
    pub seq: u64,
    /// What went wrong.
    pub error: Error,
}

/// Key bindings owned by the table widget itself.
///
/// Page navigation (prev/next/first/last) is bound on the embedded pager's
/// [`PagerKeyMap`](crate::pager::PagerKeyMap).
#[derive(Debug, Clone)]
pub struct DataTableKeyMap {
    /// Cycles through the allowed page sizes. Default: 's'.
    pub cycle_page_size: Binding,
    /// Re-issues the fetch for the current page. Default: 'r'.
    pub refresh: Binding,
    /// Help-only entry for the digit keys that jump to a visible page number.
    pub select_window: Binding,
}

impl Default for DataTableKeyMap {
    fn default() -> Self {
        Self {
            cycle_page_size: Binding::new(vec![KeyCode::Char('s')]).with_help("s", "page size"),
            refresh: Binding::new(vec![KeyCode::Char('r')]).with_help("r", "refresh"),
            // Digits are matched directly in update(); this binding only
            // contributes the help text.
            select_window: Binding::new(vec![]).with_help("1-9", "jump to page"),
        }
    }
}

impl KeyMapTrait for DataTableKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.cycle_page_size, &self.refresh, &self.select_window]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![
            &self.cycle_page_size,
            &self.refresh,
            &self.select_window,
        ]]
    }
}

/// Styles for the table chrome.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Header row.
    pub header: Style,
    /// Status line (record counts).
    pub status: Style,
    /// Status line while a fetch is in flight.
    pub loading: Style,
    /// Status line after a failed fetch.
    pub error: Style,
    /// Key labels in the help line.
    pub help_key: Style,
    /// Descriptions in the help line.
    pub help_desc: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            header: Style::new().bold(true),
            status: Style::new().foreground(Color::from("240")),
            loading: Style::new().foreground(Color::from("212")),
            error: Style::new().foreground(Color::from("203")),
            help_key: Style::new().foreground(Color::from("241")),
            help_desc: Style::new().foreground(Color::from("239")),
        }
    }
}

/// The paginated table widget.
///
/// Owns the page state, the records for the current page, the loading flag,
/// and the data source. All mutation happens in [`update`](Model::update);
/// the presentation side only reads accessors and [`view`](Model::view).
pub struct Model<R: Record> {
    /// Pagination state and navigation key bindings.
    pub pager: pager::Model,
    /// Widget key bindings.
    pub keymap: DataTableKeyMap,
    /// Styles.
    pub styles: Styles,

    columns: Vec<Column>,
    records: Vec<R>,
    source: Arc<dyn DataSource<R>>,
    page_sizes: Vec<usize>,
    loading: bool,
    seq: u64,
    last_error: Option<String>,
}

impl<R: Record> Model<R> {
    /// Creates a table over the given columns and data source.
    ///
    /// Defaults: page 1, five records per page, a five-page window, and the
    /// [`PAGE_SIZES`](crate::pager::PAGE_SIZES) selector set.
    pub fn new(columns: Vec<Column>, source: impl DataSource<R> + 'static) -> Self {
        Self {
            pager: pager::Model::new(),
            keymap: DataTableKeyMap::default(),
            styles: Styles::default(),
            columns,
            records: Vec::new(),
            source: Arc::new(source),
            page_sizes: pager::PAGE_SIZES.to_vec(),
            loading: false,
            seq: 0,
            last_error: None,
        }
    }

    /// Sets the initial page size (builder). Clamped to a minimum of 1.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.pager.per_page = per_page.max(1);
        self
    }

    /// Sets the page-window size (builder).
    pub fn with_window(mut self, window: usize) -> Self {
        self.pager.window = window.max(1);
        self
    }

    /// Replaces the allowed page-size set (builder). Empty sets are ignored.
    pub fn with_page_sizes(mut self, sizes: Vec<usize>) -> Self {
        if !sizes.is_empty() {
            self.page_sizes = sizes;
        }
        self
    }

    /// Replaces the widget styles (builder).
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// The records currently displayed.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// The current page, 1-based.
    pub fn page(&self) -> usize {
        self.pager.page
    }

    /// The total number of pages. Zero for an empty collection.
    pub fn total_pages(&self) -> usize {
        self.pager.total_pages
    }

    /// The current page size.
    pub fn per_page(&self) -> usize {
        self.pager.per_page
    }

    /// True while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The message of the most recent fetch failure, until a fetch succeeds.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The visible window of page numbers.
    pub fn page_window(&self) -> Vec<usize> {
        self.pager.page_window()
    }

    /// Issues the initial fetch. Call once from the host model's `init`.
    pub fn init_cmd(&mut self) -> Cmd {
        self.fetch()
    }

    /// Selects a page, clamping out-of-range requests into
    /// `[1, max(total_pages, 1)]` and logging them as
    /// [`Error::InvalidPage`]. Returns a fetch command when the page changed.
    pub fn select_page(&mut self, page: usize) -> Option<Cmd> {
        let before = self.pager.page;
        let applied = self.pager.select_page(page);
        if applied != page {
            warn!(
                "{}",
                Error::InvalidPage {
                    requested: page,
                    total_pages: self.pager.total_pages,
                }
            );
        }
        (applied != before).then(|| self.fetch())
    }

    /// Sets the page size and resets to page 1, returning the fetch command.
    ///
    /// Values outside the allowed set are rejected with a warning and leave
    /// the state untouched.
    pub fn set_page_size(&mut self, per_page: usize) -> Option<Cmd> {
        if !self.page_sizes.contains(&per_page) {
            warn!(
                "page size {per_page} is not in the allowed set {:?}",
                self.page_sizes
            );
            return None;
        }
        self.pager.set_per_page(per_page);
        Some(self.fetch())
    }

    /// Processes key events and fetch results.
    ///
    /// Returns a fetch command whenever an intent changed the page or page
    /// size. Fetch results whose tag does not match the latest fetch are
    /// discarded.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg);
        }

        if let Some(fetched) = msg.downcast_ref::<FetchedMsg<R>>() {
            if fetched.seq != self.seq {
                debug!(
                    "discarding stale page response (tag {}, current {})",
                    fetched.seq, self.seq
                );
                return None;
            }
            self.records = fetched.items.clone();
            self.loading = false;
            self.last_error = None;
            let before = self.pager.page;
            self.pager.set_total_count(fetched.total_count);
            // A shrunken collection can invalidate the page we just fetched;
            // the re-clamped page needs its own fetch.
            if self.pager.page != before {
                return Some(self.fetch());
            }
            return None;
        }

        if let Some(failed) = msg.downcast_ref::<FetchFailedMsg>() {
            if failed.seq != self.seq {
                debug!(
                    "discarding stale fetch failure (tag {}, current {})",
                    failed.seq, self.seq
                );
                return None;
            }
            warn!("page fetch failed: {}", failed.error);
            self.loading = false;
            self.last_error = Some(failed.error.to_string());
            return None;
        }

        None
    }

    /// Renders the table, status line, pagination strip, and help line.
    pub fn view(&self) -> String {
        let widths = self.column_widths();
        let mut out = String::new();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, &w)| pad(&c.title, w))
            .collect();
        out.push_str(&self.styles.header.render(&header.join(" | ")));
        out.push('\n');

        for (i, &w) in widths.iter().enumerate() {
            if i > 0 {
                out.push_str("-+-");
            }
            out.push_str(&"-".repeat(w));
        }
        out.push('\n');

        if self.records.is_empty() && !self.loading {
            out.push_str(&self.styles.status.render("No records."));
            out.push('\n');
        } else {
            for record in &self.records {
                let cells: Vec<String> = record
                    .cells()
                    .iter()
                    .zip(&widths)
                    .map(|(c, &w)| pad(c, w))
                    .collect();
                out.push_str(&cells.join(" | "));
                out.push('\n');
            }
        }
        out.push('\n');

        let status = if self.loading {
            self.styles.loading.render("Fetching…")
        } else if let Some(err) = &self.last_error {
            self.styles.error.render(&format!("error: {err}"))
        } else {
            self.styles
                .status
                .render(&format!("{} record(s) on this page", self.records.len()))
        };
        out.push_str(&status);
        out.push('\n');

        out.push_str(&self.styles.status.render(&format!(
            "page {}/{} · {} per page · ",
            self.pager.page,
            self.pager.total_pages.max(1),
            self.pager.per_page
        )));
        out.push_str(&self.pager.view());
        out.push('\n');

        out.push_str(&self.help_view());
        out
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if self.keymap.cycle_page_size.matches(key_msg) {
            let next = self.next_page_size();
            self.pager.set_per_page(next);
            return Some(self.fetch());
        }
        if self.keymap.refresh.matches(key_msg) {
            return Some(self.fetch());
        }
        if let KeyCode::Char(c @ '1'..='9') = key_msg.key {
            let idx = (c as usize) - ('1' as usize);
            if let Some(&page) = self.pager.page_window().get(idx) {
                return self.select_page(page);
            }
            return None;
        }

        // Navigation keys belong to the pager; re-box the event for it and
        // fetch if the page moved.
        let before = self.pager.page;
        let nav: Msg = Box::new(KeyMsg {
            key: key_msg.key,
            modifiers: key_msg.modifiers,
        });
        self.pager.update(&nav);
        (self.pager.page != before).then(|| self.fetch())
    }

    fn next_page_size(&self) -> usize {
        let current = self.pager.per_page;
        match self.page_sizes.iter().position(|&s| s == current) {
            Some(i) => self.page_sizes[(i + 1) % self.page_sizes.len()],
            None => self.page_sizes[0],
        }
    }

    fn fetch(&mut self) -> Cmd {
        self.seq += 1;
        self.loading = true;
        let seq = self.seq;
        let req = PageRequest {
            page: self.pager.page,
            per_page: self.pager.per_page,
        };
        let source = Arc::clone(&self.source);
        Box::pin(async move {
            let msg: Msg = match source.fetch_page(req).await {
                Ok(resp) => {
                    let total = match resp.total_count {
                        Some(total) => Ok(total),
                        None => source.fetch_total_count().await,
                    };
                    match total {
                        Ok(total_count) => Box::new(FetchedMsg {
                            seq,
                            items: resp.items,
                            total_count,
                        }) as Msg,
                        Err(error) => Box::new(FetchFailedMsg { seq, error }) as Msg,
                    }
                }
                Err(error) => Box::new(FetchFailedMsg { seq, error }) as Msg,
            };
            Some(msg)
        })
    }

    fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                column.width.unwrap_or_else(|| {
                    self.records
                        .iter()
                        .filter_map(|r| r.cells().get(i).map(|c| c.width()))
                        .chain(std::iter::once(column.title.width()))
                        .max()
                        .unwrap_or(0)
                })
            })
            .collect()
    }

    fn help_view(&self) -> String {
        let bindings = self
            .pager
            .keymap
            .short_help()
            .into_iter()
            .chain(self.keymap.short_help());
        let parts: Vec<String> = bindings
            .map(|b| {
                format!(
                    "{} {}",
                    self.styles.help_key.render(&b.help.key),
                    self.styles.help_desc.render(&b.help.desc)
                )
            })
            .collect();
        let separator = self.styles.help_desc.render(" • ");
        parts.join(separator.as_str())
    }
}

/// Pads `s` with spaces to `width` display columns; wider strings pass
/// through unchanged.
fn pad(s: &str, width: usize) -> String {
    let current = s.width();
    if current >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - current))
    }
}
