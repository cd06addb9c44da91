// src/portal.rs
//! The portal as seen by the rest of the crate: log in, hand back the rows of
//! the grades table. [`crate::client::WuClient`] is the real implementation;
//! anything else that yields [`GradeRow`]s (tests, fixtures) can stand in.

use std::fmt;

use thiserror::Error;

use crate::config::options::RowPolicy;
use crate::grades::{self, GradeRow, GradesError, GradesTable};
use crate::progress::Progress;
use crate::specs::PageError;

#[derive(Clone)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self { login: login.into(), password: password.into() }
    }
}

// Keep passwords out of logs and panic messages
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Page(#[from] PageError),

    #[error("login rejected for user {0:?}")]
    LoginRejected(String),

    #[error(transparent)]
    Grades(#[from] GradesError),
}

pub trait Portal {
    type Session;

    fn authenticate(&self, credentials: &Credentials) -> Result<Self::Session, PortalError>;

    /// One entry per data row of the grades table, in page order.
    fn fetch_grades_rows(&self, session: &Self::Session) -> Result<Vec<GradeRow>, PortalError>;
}

/// Log in, pull the grades table and fold it into a [`GradesTable`].
pub fn retrieve_marks<P: Portal>(
    portal: &P,
    credentials: &Credentials,
    policy: RowPolicy,
    mut progress: Option<&mut dyn Progress>,
) -> Result<GradesTable, PortalError> {
    if let Some(p) = progress.as_deref_mut() {
        p.log("Logging in…");
    }
    let session = portal.authenticate(credentials)?;
    logf!("Logged in as {}", credentials.login);

    if let Some(p) = progress.as_deref_mut() {
        p.log("Fetching grades…");
    }
    let rows = portal.fetch_grades_rows(&session)?;
    logf!("Grades table: {} rows", rows.len());

    Ok(grades::collect_marks(rows, policy, progress)?)
}
