#![warn(missing_docs)]

//! # bubbletea-pagetable
//!
//! A paginated data table component for [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs):
//! it renders one page of records fetched from a remote HTTP API, with
//! controls for page navigation, page size, and loading state.
//!
//! The crate follows the Elm Architecture pattern used throughout the
//! bubbletea ecosystem: the widget is a model with `update()` and `view()`
//! methods, and all I/O happens through commands resolved by the runtime.
//!
//! ## Pieces
//!
//! - [`pager::Model`]: the pagination state machine: current page, page
//!   size, total pages, and the sliding window of page numbers to display.
//! - [`datatable::Model`]: the table widget, composing the pager with a data
//!   source. It fires a fetch command whenever page or page size changes, and
//!   applies responses atomically, discarding stale ones by sequence tag.
//! - [`source::HttpSource`]: a [`DataSource`](source::DataSource) for JSON
//!   REST APIs with offset-style pagination parameters.
//!
//! ## Quick start
//!
//! ```rust
//! use bubbletea_pagetable::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Clone, Deserialize)]
//! struct Photo {
//!     id: u64,
//!     title: String,
//!     url: String,
//! }
//!
//! impl Record for Photo {
//!     fn key(&self) -> String {
//!         self.id.to_string()
//!     }
//!
//!     fn cells(&self) -> Vec<String> {
//!         vec![self.id.to_string(), self.title.clone(), self.url.clone()]
//!     }
//! }
//!
//! let source: HttpSource<Photo> =
//!     HttpSource::new("https://jsonplaceholder.typicode.com/photos");
//! let mut table = DataTable::new(
//!     vec![Column::new("#"), Column::new("Title"), Column::new("URL")],
//!     source,
//! );
//!
//! // In a bubbletea-rs app: return this command from init() and forward
//! // every message to table.update().
//! let _first_fetch = table.init_cmd();
//! ```
//!
//! ## Standalone pager
//!
//! The pager can be used on its own for anything that needs a page window:
//!
//! ```rust
//! use bubbletea_pagetable::pager::Model as Pager;
//!
//! let mut pager = Pager::new().with_per_page(10);
//! pager.set_total_count(95);
//! pager.select_page(5);
//! assert_eq!(pager.page_window(), vec![3, 4, 5, 6, 7]);
//! ```

pub mod datatable;
pub mod error;
pub mod key;
pub mod pager;
pub mod source;

pub use datatable::{
    Column, DataTableKeyMap, FetchFailedMsg, FetchedMsg, Model as DataTable,
    Styles as DataTableStyles,
};
pub use error::Error;
pub use key::{Binding, KeyMap};
pub use pager::{Model as Pager, PagerKeyMap, DEFAULT_WINDOW, PAGE_SIZES};
pub use source::{DataSource, HttpSource, PageRequest, PageResponse, Record};

/// Convenient single-import surface for applications.
pub mod prelude {
    pub use crate::datatable::{
        Column, DataTableKeyMap, FetchFailedMsg, FetchedMsg, Model as DataTable,
        Styles as DataTableStyles,
    };
    pub use crate::error::Error;
    pub use crate::key::{Binding, KeyMap};
    pub use crate::pager::{Model as Pager, PagerKeyMap, DEFAULT_WINDOW, PAGE_SIZES};
    pub use crate::source::{DataSource, HttpSource, PageRequest, PageResponse, Record};
}
