// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for a11ybot

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for a11ybot.
///
/// Only the outer surfaces (reading pages, exporting reports, parsing CLI
/// input) can fail. Rule evaluation itself never produces an error.
#[derive(Error, Debug)]
pub enum A11yError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("Output format {0} is not available for this command")]
    UnsupportedFormat(String),

    #[error("Evaluation already in progress for {0}")]
    RunInProgress(PathBuf),
}

pub type Result<T> = std::result::Result<T, A11yError>;
