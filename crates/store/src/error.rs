// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;

/// Errors raised by the data-access layer.
///
/// The schema itself declares no foreign keys or checks, so the relationship
/// and value errors below are the only place those rules are enforced.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("Failed to connect to database: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("Failed to run migrations: {0}")]
    Migration(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("Connection pool error: {0}")]
    Pool(String),
    #[error("Unknown table: {0}")]
    UnknownTable(String),
    #[error("Team name must not be empty")]
    EmptyTeamName,
    #[error("User {0} is not registered")]
    UnknownUser(i64),
    #[error("Submission {0} does not exist")]
    UnknownSubmission(i64),
    #[error("Challenge {0} does not exist")]
    UnknownChallenge(String),
    #[error("Challenge {0} already exists")]
    DuplicateChallenge(String),
    #[error("Challenge points must not be negative, got {0}")]
    NegativePoints(i32),
    #[error("Invalid media source: {0}")]
    InvalidMediaSource(String),
}

/// Errors raised while reading settings from the environment.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Environment variable {0} is not set")]
    Missing(&'static str),
    #[error("Environment variable {name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}
