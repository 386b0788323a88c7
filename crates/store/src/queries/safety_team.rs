// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::db::DbConnection;
use crate::db::models::SafetyContact;
use crate::db::schema::safety_team;
use crate::error::StoreError;

/// Hour (UTC) at which the roster switches to the next day's contacts.
const ROSTER_ROLLOVER_HOUR: u32 = 6;

/// The roster day covering `now`. Nights belong to the day they started on.
pub fn duty_date(now: DateTime<Utc>) -> NaiveDate {
    if now.hour() < ROSTER_ROLLOVER_HOUR {
        (now - Duration::hours(24)).date_naive()
    } else {
        now.date_naive()
    }
}

pub async fn on_duty(
    conn: &mut DbConnection,
    date: NaiveDate,
) -> Result<Vec<SafetyContact>, StoreError> {
    Ok(safety_team::table
        .filter(safety_team::date.eq(date))
        .order_by(safety_team::name)
        .select(SafetyContact::as_select())
        .load(conn)
        .await?)
}

pub async fn on_duty_at(
    conn: &mut DbConnection,
    now: DateTime<Utc>,
) -> Result<Vec<SafetyContact>, StoreError> {
    let date = duty_date(now);
    tracing::trace!("Safety team lookup for {date}");
    on_duty(conn, date).await
}

pub async fn list_safety_team(conn: &mut DbConnection) -> Result<Vec<SafetyContact>, StoreError> {
    Ok(safety_team::table
        .order_by((safety_team::date, safety_team::name))
        .select(SafetyContact::as_select())
        .load(conn)
        .await?)
}

/// Adds a contact to the roster. A contact is listed for one day; adding the
/// same name again replaces their phone and day.
pub async fn add_safety_contact(
    conn: &mut DbConnection,
    contact: SafetyContact,
) -> Result<(), StoreError> {
    diesel::insert_into(safety_team::table)
        .values(&contact)
        .on_conflict(safety_team::name)
        .do_update()
        .set((
            safety_team::phone.eq(excluded(safety_team::phone)),
            safety_team::date.eq(excluded(safety_team::date)),
        ))
        .execute(conn)
        .await?;
    tracing::debug!("Safety contact {:?} on duty {}", contact.name, contact.date);
    Ok(())
}
