// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::DbConnection;
use crate::db::models::{Challenge, NewChallenge};
use crate::db::schema::{challenges, judgement, submissions};
use crate::error::StoreError;

pub async fn list_challenges(conn: &mut DbConnection) -> Result<Vec<Challenge>, StoreError> {
    Ok(challenges::table
        .order_by(challenges::name)
        .select(Challenge::as_select())
        .load(conn)
        .await?)
}

pub async fn find_challenge(
    conn: &mut DbConnection,
    name: &str,
) -> Result<Option<Challenge>, StoreError> {
    Ok(challenges::table
        .find(name)
        .select(Challenge::as_select())
        .first(conn)
        .await
        .optional()?)
}

pub async fn create_challenge(
    conn: &mut DbConnection,
    new_challenge: NewChallenge,
) -> Result<Challenge, StoreError> {
    if new_challenge.points < 0 {
        return Err(StoreError::NegativePoints(new_challenge.points));
    }
    if find_challenge(conn, &new_challenge.name).await?.is_some() {
        return Err(StoreError::DuplicateChallenge(new_challenge.name));
    }

    diesel::insert_into(challenges::table)
        .values(&new_challenge)
        .execute(conn)
        .await?;
    tracing::debug!(
        "Created challenge {:?} worth {} point(s)",
        new_challenge.name,
        new_challenge.points
    );

    find_challenge(conn, &new_challenge.name)
        .await?
        .ok_or(StoreError::UnknownChallenge(new_challenge.name))
}

/// Challenges the team has not completed yet, i.e. without a valid judgement
/// on any of the team's submissions.
pub async fn remaining_challenges_for_team(
    conn: &mut DbConnection,
    team: &str,
) -> Result<Vec<Challenge>, StoreError> {
    let completed = judgement::table
        .inner_join(submissions::table.on(submissions::message_id.eq(judgement::submission_id)))
        .filter(submissions::team.eq(team))
        .filter(judgement::valid.eq(true))
        .select(judgement::challenge_name);

    Ok(challenges::table
        .filter(challenges::name.ne_all(completed))
        .order_by(challenges::name)
        .select(Challenge::as_select())
        .load(conn)
        .await?)
}
