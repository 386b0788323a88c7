// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::db::DbConnection;
use crate::db::models::Judgement;
use crate::db::schema::{judgement, submissions};
use crate::error::StoreError;
use crate::queries::challenges::find_challenge;
use crate::queries::submissions::find_submission;

const UNCLEAR: &str = "___unclear";
const INVALID: &str = "___invalid";

/// A judge's decision on a submission.
///
/// The sentinel verdicts are stored in `challenge_name` as `___unclear` and
/// `___invalid`; they never score.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verdict {
    Challenge(String),
    Unclear,
    Invalid,
}

impl Verdict {
    pub fn from_choice(choice: &str) -> Self {
        match choice {
            UNCLEAR => Verdict::Unclear,
            INVALID => Verdict::Invalid,
            name => Verdict::Challenge(name.to_string()),
        }
    }

    pub fn as_choice(&self) -> &str {
        match self {
            Verdict::Challenge(name) => name.as_str(),
            Verdict::Unclear => UNCLEAR,
            Verdict::Invalid => INVALID,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Challenge(_))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_choice())
    }
}

impl Judgement {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_choice(&self.challenge_name)
    }
}

/// Records `verdict` for a submission, replacing any earlier verdict on it.
///
/// A challenge verdict scores the challenge's points; the sentinels store zero
/// points and are marked invalid.
pub async fn judge(
    conn: &mut DbConnection,
    submission_id: i64,
    verdict: Verdict,
) -> Result<Judgement, StoreError> {
    if find_submission(conn, submission_id).await?.is_none() {
        return Err(StoreError::UnknownSubmission(submission_id));
    }

    let points = match &verdict {
        Verdict::Challenge(name) => {
            find_challenge(conn, name)
                .await?
                .ok_or_else(|| StoreError::UnknownChallenge(name.clone()))?
                .points
        }
        Verdict::Unclear | Verdict::Invalid => 0,
    };

    let record = Judgement {
        submission_id,
        challenge_name: verdict.as_choice().to_string(),
        points,
        valid: verdict.is_valid(),
    };

    diesel::insert_into(judgement::table)
        .values(&record)
        .on_conflict(judgement::submission_id)
        .do_update()
        .set((
            judgement::challenge_name.eq(excluded(judgement::challenge_name)),
            judgement::points.eq(excluded(judgement::points)),
            judgement::valid.eq(excluded(judgement::valid)),
        ))
        .execute(conn)
        .await?;
    tracing::debug!("Judged submission {submission_id} as {verdict} ({points} pts.)");

    Ok(record)
}

pub async fn find_judgement(
    conn: &mut DbConnection,
    submission_id: i64,
) -> Result<Option<Judgement>, StoreError> {
    Ok(judgement::table
        .find(submission_id)
        .select(Judgement::as_select())
        .first(conn)
        .await
        .optional()?)
}

pub async fn list_judgements(conn: &mut DbConnection) -> Result<Vec<Judgement>, StoreError> {
    Ok(judgement::table
        .order_by(judgement::submission_id)
        .select(Judgement::as_select())
        .load(conn)
        .await?)
}

/// Judgements on submissions made under `team`, valid or not.
pub async fn judgements_for_team(
    conn: &mut DbConnection,
    team: &str,
) -> Result<Vec<Judgement>, StoreError> {
    Ok(judgement::table
        .inner_join(submissions::table.on(submissions::message_id.eq(judgement::submission_id)))
        .filter(submissions::team.eq(team))
        .order_by(judgement::submission_id)
        .select(Judgement::as_select())
        .load(conn)
        .await?)
}
