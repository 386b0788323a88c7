// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::schema::*;

/// How a submission was sent in. Stored as an integer in the `type` column.
#[derive(Debug, PartialEq, Eq, Deserialize, Serialize, Clone, Copy, Hash)]
pub enum SubmissionKind {
    Photo,
    Video,
}

impl SubmissionKind {
    pub fn code(self) -> i32 {
        match self {
            SubmissionKind::Photo => 0,
            SubmissionKind::Video => 1,
        }
    }
}

impl TryFrom<i32> for SubmissionKind {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(SubmissionKind::Photo),
            1 => Ok(SubmissionKind::Video),
            other => Err(other),
        }
    }
}

/* =========================
 * USERS
 * ========================= */

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub team: String,
    pub created_at: NaiveDateTime,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.first_name)?;
        if let Some(last_name) = &self.last_name {
            write!(f, " {last_name}")?;
        }
        if let Some(username) = &self.username {
            write!(f, " @{username}")?;
        }
        Ok(())
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub team: String,
    pub created_at: NaiveDateTime,
}

/// Number of registered participants per team name.
#[derive(Queryable, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSummary {
    pub team: String,
    pub members: i64,
}

/* =========================
 * FORUMS
 * ========================= */

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[diesel(table_name = forums)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Forum {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = forums)]
pub struct NewForum {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/* =========================
 * SUBMISSIONS
 * ========================= */

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize)]
#[diesel(table_name = submissions)]
#[diesel(primary_key(message_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Submission {
    pub message_id: i64,
    pub user: i64,
    pub team: String,
    #[diesel(column_name = date)]
    pub submitted_at: NaiveDateTime,
    pub caption: String,
    pub kind: i32,
}

impl Submission {
    pub fn kind(&self) -> Option<SubmissionKind> {
        SubmissionKind::try_from(self.kind).ok()
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = submissions)]
pub struct NewSubmissionRow {
    pub message_id: i64,
    pub user: i64,
    pub team: String,
    pub date: NaiveDateTime,
    pub caption: String,
    pub kind: i32,
}

/// A submission joined with its sender and the forum thread of its team.
#[derive(Queryable, Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionDetails {
    pub message_id: i64,
    pub team: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub submitted_at: NaiveDateTime,
    pub caption: String,
    pub kind: i32,
    pub forum_id: Option<i32>,
}

impl fmt::Display for SubmissionDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let caption = if self.caption.is_empty() {
            "N/P"
        } else {
            self.caption.as_str()
        };
        write!(
            f,
            "Submission from @{} ({} {})\nTeam: {}\nTime: {}\nCaption: {}\nID: {}",
            self.username.as_deref().unwrap_or("-"),
            self.first_name.as_deref().unwrap_or("-"),
            self.last_name.as_deref().unwrap_or("NO-LASTNAME"),
            self.team,
            self.submitted_at.format("%Y-%m-%dT%H:%M:%S"),
            caption,
            self.message_id,
        )
    }
}

/* =========================
 * CHALLENGES
 * ========================= */

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = challenges)]
#[diesel(primary_key(name))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Challenge {
    pub name: String,
    pub short_name: String,
    pub description: Option<String>,
    pub points: i32,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = challenges)]
pub struct NewChallenge {
    pub name: String,
    pub short_name: String,
    pub description: Option<String>,
    pub points: i32,
}

/* =========================
 * JUDGEMENTS
 * ========================= */

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = judgement)]
#[diesel(primary_key(submission_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Judgement {
    pub submission_id: i64,
    pub challenge_name: String,
    pub points: i32,
    pub valid: bool,
}

/* =========================
 * CONFIG
 * ========================= */

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = config)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ConfigEntry {
    pub name: String,
    pub value: String,
}

/* =========================
 * SAFETY TEAM
 * ========================= */

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq, Serialize)]
#[diesel(table_name = safety_team)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SafetyContact {
    pub name: String,
    pub phone: String,
    pub date: NaiveDate,
}
