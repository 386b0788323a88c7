// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use chrono::SubsecRound;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::DbConnection;
use crate::db::models::{NewSubmissionRow, Submission, SubmissionDetails, SubmissionKind};
use crate::db::schema::{forums, submissions, users};
use crate::error::StoreError;
use crate::queries::users::find_user;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    /// Id of the chat message carrying the photo or video.
    pub message_id: i64,
    pub user: i64,
    pub caption: String,
    pub kind: SubmissionKind,
}

/// Stores a submission under the sender's current team.
///
/// The team is copied into the row, so later team changes of the sender do not
/// move existing submissions.
pub async fn record_submission(
    conn: &mut DbConnection,
    new_submission: NewSubmission,
) -> Result<Submission, StoreError> {
    let Some(sender) = find_user(conn, new_submission.user).await? else {
        tracing::warn!(
            "Rejected submission {} from unregistered user {}",
            new_submission.message_id,
            new_submission.user
        );
        return Err(StoreError::UnknownUser(new_submission.user));
    };

    let message_id = new_submission.message_id;
    diesel::insert_into(submissions::table)
        .values(NewSubmissionRow {
            message_id,
            user: sender.id,
            team: sender.team,
            date: chrono::Utc::now().naive_utc().trunc_subsecs(0),
            caption: new_submission.caption,
            kind: new_submission.kind.code(),
        })
        .execute(conn)
        .await?;
    tracing::debug!("Recorded submission {message_id} from user {}", sender.id);

    find_submission(conn, message_id)
        .await?
        .ok_or(StoreError::UnknownSubmission(message_id))
}

pub async fn find_submission(
    conn: &mut DbConnection,
    message_id: i64,
) -> Result<Option<Submission>, StoreError> {
    Ok(submissions::table
        .find(message_id)
        .select(Submission::as_select())
        .first(conn)
        .await
        .optional()?)
}

enum DetailsFilter<'a> {
    All,
    MessageId(i64),
    Team(&'a str),
}

async fn load_details(
    conn: &mut DbConnection,
    filter: DetailsFilter<'_>,
) -> Result<Vec<SubmissionDetails>, StoreError> {
    let mut query = submissions::table
        .left_join(users::table.on(users::id.eq(submissions::user)))
        .left_join(forums::table.on(forums::name.eq(submissions::team)))
        .select((
            submissions::message_id,
            submissions::team,
            users::username.nullable(),
            users::first_name.nullable(),
            users::last_name.nullable(),
            submissions::date,
            submissions::caption,
            submissions::kind,
            forums::id.nullable(),
        ))
        .order_by(submissions::message_id)
        .into_boxed();

    match filter {
        DetailsFilter::All => {}
        DetailsFilter::MessageId(message_id) => {
            query = query.filter(submissions::message_id.eq(message_id));
        }
        DetailsFilter::Team(team) => {
            query = query.filter(submissions::team.eq(team));
        }
    }

    Ok(query.load::<SubmissionDetails>(conn).await?)
}

/// A submission with its sender's names and the forum thread of its team.
pub async fn submission_details(
    conn: &mut DbConnection,
    message_id: i64,
) -> Result<Option<SubmissionDetails>, StoreError> {
    Ok(load_details(conn, DetailsFilter::MessageId(message_id))
        .await?
        .into_iter()
        .next())
}

pub async fn list_submission_details(
    conn: &mut DbConnection,
) -> Result<Vec<SubmissionDetails>, StoreError> {
    load_details(conn, DetailsFilter::All).await
}

pub async fn submissions_for_team(
    conn: &mut DbConnection,
    team: &str,
) -> Result<Vec<SubmissionDetails>, StoreError> {
    load_details(conn, DetailsFilter::Team(team)).await
}
