//! medcard-viewer: Terminal viewer for shared medical cards
//!
//! Fetches a record through the card API and renders one category tab at a
//! time. The vitals tab carries its own query state (recency window, sort and
//! page); every other tab is a pure view of the record.

pub mod client;
pub mod error;
pub mod render;
pub mod tab;
pub mod views;
pub mod vitals;

pub use client::{CardClient, IssueResponse, decode_data_url, record_id_from_link};
pub use error::{ParseOptionError, ViewerError};
pub use render::{Page, render_tab};
pub use tab::Tab;
pub use vitals::{SortField, SortOrder, TimeRange, VitalsQuery};
