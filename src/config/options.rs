// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub portal: PortalOptions,
    pub export: ExportOptions,
    pub rows: RowPolicy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalOptions {
    /// Address of the portal's main (login) page.
    pub url: String,
    pub timeout: Duration,
}

impl Default for PortalOptions {
    fn default() -> Self {
        Self {
            url: s!(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

/// What to do with a row whose mark cell is neither empty nor a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// Fail the whole retrieval.
    #[default]
    Abort,
    /// Log it, drop the row, keep going.
    Skip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field separator for the tabular formats.
    pub fn delim(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Json => None,
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("Unknown format: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// `None` writes to stdout.
    pub out: Option<PathBuf>,
    pub include_headers: bool,
}

impl ExportOptions {
    /// Resolve the target file. A directory (existing, or hinted by a trailing
    /// separator) gets a `marks.<ext>` file inside it.
    pub fn out_path(&self) -> Option<PathBuf> {
        let out = self.out.as_ref()?;
        let hinted = out.to_string_lossy().ends_with(['/', '\\']);
        if hinted || out.is_dir() {
            Some(out.join(join!("marks", ".", self.format.ext())))
        } else {
            Some(out.clone())
        }
    }
}

/// Where snapshots and the debug log live.
pub fn store_dir() -> PathBuf {
    PathBuf::from(STORE_DIR)
}
