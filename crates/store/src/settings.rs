// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::error::SettingsError;

const DEFAULT_POOL_SIZE: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Path (or `:memory:`) handed to SQLite, without any `sqlite:` scheme.
    pub database_url: String,
    pub pool_size: u32,
}

impl Settings {
    /// Reads settings from the process environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, SettingsError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Failed to load .env file: {e}");
            }
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let database_url = lookup("DATABASE_URL").ok_or(SettingsError::Missing("DATABASE_URL"))?;
        let database_url = strip_sqlite_scheme(&database_url).to_string();
        if database_url.is_empty() {
            return Err(SettingsError::Invalid {
                name: "DATABASE_URL",
                value: database_url,
            });
        }

        let pool_size = match lookup("DATABASE_POOL_SIZE") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(SettingsError::Invalid {
                        name: "DATABASE_POOL_SIZE",
                        value: raw,
                    });
                }
            },
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            database_url,
            pool_size,
        })
    }
}

fn strip_sqlite_scheme(url: &str) -> &str {
    url.strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_missing_database_url() {
        let result = Settings::from_lookup(lookup_from(&[]));
        assert_eq!(result, Err(SettingsError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_defaults_and_scheme_stripping() {
        let settings =
            Settings::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite://data/spree.db")]))
                .expect("Settings should load");
        assert_eq!(settings.database_url, "data/spree.db");
        assert_eq!(settings.pool_size, DEFAULT_POOL_SIZE);

        let settings = Settings::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite:spree.db")]))
            .expect("Settings should load");
        assert_eq!(settings.database_url, "spree.db");
    }

    #[test]
    fn test_invalid_pool_size() {
        for raw in ["0", "-1", "many"] {
            let result = Settings::from_lookup(lookup_from(&[
                ("DATABASE_URL", "spree.db"),
                ("DATABASE_POOL_SIZE", raw),
            ]));
            assert!(matches!(
                result,
                Err(SettingsError::Invalid {
                    name: "DATABASE_POOL_SIZE",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_explicit_pool_size() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("DATABASE_URL", ":memory:"),
            ("DATABASE_POOL_SIZE", " 8 "),
        ]))
        .expect("Settings should load");
        assert_eq!(settings.pool_size, 8);
    }
}
