// src/specs/mod.rs
//! # Page specs
//!
//! One module per portal page. Each spec knows *where the data lives in the
//! HTML* and turns a fetched document into plain Rust values. Specs never do
//! networking; [`crate::client`] fetches, specs read.
//!
//! - `login` – the login form on the portal's main page: hidden ASP.NET state,
//!   the name attributes of the login/password inputs and the submit button.
//! - `marks` – the grades table on `OcenyP.aspx`: one [`crate::grades::GradeRow`]
//!   per data row.
//!
//! ## Conventions
//! - Elements are located by their ASP.NET control ids, case-insensitive tag
//!   scanning via `core::html`, no full-document regexes.
//! - Labels are cleaned (`core::sanitize::cell_text`); the mark cell is handed
//!   on verbatim so `Mark::parse` sees exactly what the page served.
//! - Specs are testable offline against saved HTML.

use thiserror::Error;

pub mod login;
pub mod marks;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("<{tag} id=\"{id}\"> not found on page")]
    ElementNotFound { tag: &'static str, id: String },

    #[error("<{tag} id=\"{id}\"> has no {attr} attribute")]
    MissingAttribute { tag: &'static str, id: String, attr: &'static str },

    #[error("grades row {index} has {cells} cells, expected at least {expected}")]
    ShortRow { index: usize, cells: usize, expected: usize },
}
