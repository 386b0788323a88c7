// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::PathBuf;
use std::str::FromStr;

use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use url::Url;

use crate::db::DbConnection;
use crate::db::models::ConfigEntry;
use crate::db::schema::config;
use crate::error::StoreError;

/// Keys of the `config` table that have a known meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Where the event schedule image is loaded from.
    ScheduleSource,
    /// Where the city survival guide document is loaded from.
    CityGuide,
}

impl ConfigKey {
    pub fn name(self) -> &'static str {
        match self {
            ConfigKey::ScheduleSource => "schedule_source",
            ConfigKey::CityGuide => "city_guide",
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            ConfigKey::ScheduleSource => "file::assets/schedule.png",
            ConfigKey::CityGuide => "file::assets/survival_guide.pdf",
        }
    }
}

/// A document or image reference in the form `file::<path>` or `url::<url>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    File(PathBuf),
    Url(Url),
}

impl FromStr for MediaSource {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || StoreError::InvalidMediaSource(value.to_string());
        let (mode, location) = value.trim().split_once("::").ok_or_else(invalid)?;
        if location.is_empty() {
            return Err(invalid());
        }

        match mode {
            "file" => Ok(MediaSource::File(PathBuf::from(location))),
            "url" => Url::parse(location)
                .map(MediaSource::Url)
                .map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}

pub async fn get_value(conn: &mut DbConnection, name: &str) -> Result<Option<String>, StoreError> {
    Ok(config::table
        .find(name)
        .select(config::value)
        .first(conn)
        .await
        .optional()?)
}

pub async fn set_value(conn: &mut DbConnection, name: &str, value: &str) -> Result<(), StoreError> {
    diesel::insert_into(config::table)
        .values(ConfigEntry {
            name: name.to_string(),
            value: value.to_string(),
        })
        .on_conflict(config::name)
        .do_update()
        .set(config::value.eq(excluded(config::value)))
        .execute(conn)
        .await?;
    tracing::debug!("Set config {name:?} = {value:?}");
    Ok(())
}

pub async fn list_config(conn: &mut DbConnection) -> Result<Vec<ConfigEntry>, StoreError> {
    Ok(config::table
        .order_by(config::name)
        .select(ConfigEntry::as_select())
        .load(conn)
        .await?)
}

/// The stored source for `key`, or the key's default when nothing is stored.
pub async fn media_source(conn: &mut DbConnection, key: ConfigKey) -> Result<MediaSource, StoreError> {
    let value = get_value(conn, key.name()).await?;
    tracing::trace!("Loaded config {} = {:?}", key.name(), value);
    value.as_deref().unwrap_or(key.default_value()).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::fresh_db;

    #[test]
    fn test_parse_media_source() {
        assert_eq!(
            "file::assets/schedule.png".parse::<MediaSource>().unwrap(),
            MediaSource::File(PathBuf::from("assets/schedule.png"))
        );
        assert_eq!(
            "url::https://example.org/guide.pdf"
                .parse::<MediaSource>()
                .unwrap(),
            MediaSource::Url(Url::parse("https://example.org/guide.pdf").unwrap())
        );
    }

    #[test]
    fn test_parse_invalid_media_source() {
        for value in ["assets/schedule.png", "ftp::host/file", "file::", "url::not a url"] {
            assert!(
                matches!(
                    value.parse::<MediaSource>(),
                    Err(StoreError::InvalidMediaSource(_))
                ),
                "{value} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_values_round_trip_and_overwrite() {
        let (_db, mut conn) = fresh_db().await;
        assert!(get_value(&mut conn, "motd").await.unwrap().is_none());

        set_value(&mut conn, "motd", "Servus!").await.unwrap();
        set_value(&mut conn, "motd", "Prost!").await.unwrap();
        set_value(&mut conn, "city_guide", "file::guide.pdf").await.unwrap();

        assert_eq!(
            get_value(&mut conn, "motd").await.unwrap().as_deref(),
            Some("Prost!")
        );
        let names: Vec<String> = list_config(&mut conn)
            .await
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(names, vec!["city_guide".to_string(), "motd".to_string()]);
    }

    #[tokio::test]
    async fn test_media_source_falls_back_to_default() {
        let (_db, mut conn) = fresh_db().await;
        assert_eq!(
            media_source(&mut conn, ConfigKey::ScheduleSource).await.unwrap(),
            MediaSource::File(PathBuf::from("assets/schedule.png"))
        );

        set_value(
            &mut conn,
            ConfigKey::CityGuide.name(),
            "url::https://example.org/guide.pdf",
        )
        .await
        .unwrap();
        assert!(matches!(
            media_source(&mut conn, ConfigKey::CityGuide).await.unwrap(),
            MediaSource::Url(_)
        ));

        set_value(&mut conn, ConfigKey::ScheduleSource.name(), "carrier pigeon")
            .await
            .unwrap();
        assert!(media_source(&mut conn, ConfigKey::ScheduleSource).await.is_err());
    }
}
