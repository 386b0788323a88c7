// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod db;
pub mod error;
pub mod queries;
pub mod settings;

pub use error::{SettingsError, StoreError};
pub use settings::Settings;
