// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::BTreeSet;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::DbConnection;
use crate::db::models::{Forum, NewForum};
use crate::db::schema::{forums, users};
use crate::error::StoreError;

/// Differences between the registered teams and the forum threads that exist for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForumSyncPlan {
    /// Team names that have no forum yet, sorted.
    pub to_create: Vec<String>,
    /// Forums whose team no longer has any member, sorted by name.
    pub to_close: Vec<Forum>,
}

impl ForumSyncPlan {
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_close.is_empty()
    }
}

pub fn plan_forum_sync<'a>(
    teams: impl IntoIterator<Item = &'a str>,
    forums: &[Forum],
) -> ForumSyncPlan {
    let teams: BTreeSet<&str> = teams.into_iter().collect();
    let forum_names: BTreeSet<&str> = forums.iter().map(|f| f.name.as_str()).collect();

    let to_create = teams
        .iter()
        .filter(|team| !forum_names.contains(*team))
        .map(|team| team.to_string())
        .collect();

    let mut to_close: Vec<Forum> = forums
        .iter()
        .filter(|forum| !teams.contains(forum.name.as_str()))
        .cloned()
        .collect();
    to_close.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

    ForumSyncPlan {
        to_create,
        to_close,
    }
}

pub async fn forum_sync_plan(conn: &mut DbConnection) -> Result<ForumSyncPlan, StoreError> {
    let teams: Vec<String> = users::table
        .select(users::team)
        .distinct()
        .load(conn)
        .await?;
    let forums = list_forums(conn).await?;

    let plan = plan_forum_sync(teams.iter().map(String::as_str), &forums);
    tracing::debug!(
        "Forum sync: {} to create, {} to close",
        plan.to_create.len(),
        plan.to_close.len()
    );
    Ok(plan)
}

pub async fn list_forums(conn: &mut DbConnection) -> Result<Vec<Forum>, StoreError> {
    Ok(forums::table
        .order_by(forums::id)
        .select(Forum::as_select())
        .load(conn)
        .await?)
}

pub async fn find_forum_by_name(
    conn: &mut DbConnection,
    name: &str,
) -> Result<Option<Forum>, StoreError> {
    Ok(forums::table
        .filter(forums::name.eq(name))
        .order_by(forums::id)
        .select(Forum::as_select())
        .first(conn)
        .await
        .optional()?)
}

/// Stores the thread id the chat platform assigned to a team's forum.
pub async fn record_forum(conn: &mut DbConnection, id: i32, name: &str) -> Result<Forum, StoreError> {
    diesel::insert_into(forums::table)
        .values(NewForum {
            id,
            name: name.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        })
        .execute(conn)
        .await?;
    tracing::debug!("Recorded forum {id} for team {name:?}");

    Ok(forums::table
        .find(id)
        .select(Forum::as_select())
        .first(conn)
        .await?)
}

/// Returns whether a forum with this id existed.
pub async fn remove_forum(conn: &mut DbConnection, id: i32) -> Result<bool, StoreError> {
    let deleted = diesel::delete(forums::table.find(id)).execute(conn).await?;
    if deleted > 0 {
        tracing::debug!("Removed forum {id}");
    }
    Ok(deleted > 0)
}
