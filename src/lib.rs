// src/lib.rs
//! Scrape marks from the Wirtualna Uczelnia student portal.
//!
//! [`mark::Mark::parse`] turns one grades-table cell into a mark; everything
//! else (login, page fetch, table walk, export) feeds it or consumes its output.

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod specs;

pub mod client;
pub mod csv;
pub mod file;
pub mod grades;
pub mod mark;
pub mod portal;
pub mod progress;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use grades::{GradeRow, GradesTable};
pub use mark::{Mark, MarkError};
pub use portal::{Credentials, Portal, PortalError};
