// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::db::DbConnection;
use crate::db::models::{NewUser, TeamSummary, User};
use crate::db::schema::users;
use crate::error::StoreError;

/// Identity of a participant as reported by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
}

/// Registers the participant in `team`, or moves them there if they are already registered.
///
/// Only the team changes for an existing participant; the name fields and the
/// registration time are kept from the first join.
pub async fn join_team(
    conn: &mut DbConnection,
    participant: Participant,
    team: &str,
) -> Result<User, StoreError> {
    let team = team.trim();
    if team.is_empty() {
        return Err(StoreError::EmptyTeamName);
    }

    let id = participant.id;
    let new_user = NewUser {
        id,
        username: participant.username,
        first_name: participant.first_name,
        last_name: participant.last_name,
        team: team.to_string(),
        created_at: chrono::Utc::now().naive_utc(),
    };

    diesel::insert_into(users::table)
        .values(&new_user)
        .on_conflict(users::id)
        .do_update()
        .set(users::team.eq(excluded(users::team)))
        .execute(conn)
        .await?;
    tracing::debug!("User {id} joined team {team:?}");

    find_user(conn, id)
        .await?
        .ok_or(StoreError::UnknownUser(id))
}

pub async fn find_user(conn: &mut DbConnection, user_id: i64) -> Result<Option<User>, StoreError> {
    Ok(users::table
        .find(user_id)
        .select(User::as_select())
        .first(conn)
        .await
        .optional()?)
}

pub async fn list_users(conn: &mut DbConnection) -> Result<Vec<User>, StoreError> {
    Ok(users::table
        .order_by(users::id)
        .select(User::as_select())
        .load(conn)
        .await?)
}

pub async fn list_users_by_team(conn: &mut DbConnection) -> Result<Vec<User>, StoreError> {
    Ok(users::table
        .order_by((users::team, users::id))
        .select(User::as_select())
        .load(conn)
        .await?)
}

/// Everyone in the same team as `user_id`, the user included.
/// Empty if the user never joined a team.
pub async fn team_members_of(
    conn: &mut DbConnection,
    user_id: i64,
) -> Result<Vec<User>, StoreError> {
    let Some(user) = find_user(conn, user_id).await? else {
        return Ok(Vec::new());
    };

    Ok(users::table
        .filter(users::team.eq(&user.team))
        .order_by(users::id)
        .select(User::as_select())
        .load(conn)
        .await?)
}

pub async fn list_teams(conn: &mut DbConnection) -> Result<Vec<TeamSummary>, StoreError> {
    Ok(users::table
        .group_by(users::team)
        .select((users::team, diesel::dsl::count_star()))
        .order_by(users::team)
        .load::<TeamSummary>(conn)
        .await?)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::testing::fresh_db;

    pub(crate) fn participant(id: i64, first_name: &str) -> Participant {
        Participant {
            id,
            username: Some(format!("{}_{id}", first_name.to_lowercase())),
            first_name: first_name.to_string(),
            last_name: None,
        }
    }

    #[tokio::test]
    async fn test_join_team_registers_user() {
        let (_db, mut conn) = fresh_db().await;
        let user = join_team(&mut conn, participant(1, "Anna"), "  Spree Rats ")
            .await
            .expect("Failed to join team");

        assert_eq!(user.id, 1);
        assert_eq!(user.team, "Spree Rats");
        assert_eq!(user.first_name, "Anna");
        assert_eq!(find_user(&mut conn, 1).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_rejoin_only_changes_team() {
        let (_db, mut conn) = fresh_db().await;
        let first = join_team(&mut conn, participant(1, "Anna"), "alpha")
            .await
            .unwrap();

        let renamed = Participant {
            first_name: "Annabelle".to_string(),
            ..participant(1, "Anna")
        };
        let second = join_team(&mut conn, renamed, "beta").await.unwrap();

        assert_eq!(second.team, "beta");
        assert_eq!(second.first_name, "Anna");
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(list_users(&mut conn).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_team_name_is_rejected() {
        let (_db, mut conn) = fresh_db().await;
        let result = join_team(&mut conn, participant(1, "Anna"), "   ").await;
        assert!(matches!(result, Err(StoreError::EmptyTeamName)));
        assert!(find_user(&mut conn, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_team_members_and_summaries() {
        let (_db, mut conn) = fresh_db().await;
        join_team(&mut conn, participant(3, "Carl"), "beta").await.unwrap();
        join_team(&mut conn, participant(1, "Anna"), "alpha").await.unwrap();
        join_team(&mut conn, participant(2, "Ben"), "alpha").await.unwrap();

        let members: Vec<i64> = team_members_of(&mut conn, 2)
            .await
            .unwrap()
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(members, vec![1, 2]);
        assert!(team_members_of(&mut conn, 42).await.unwrap().is_empty());

        assert_eq!(
            list_teams(&mut conn).await.unwrap(),
            vec![
                TeamSummary {
                    team: "alpha".to_string(),
                    members: 2,
                },
                TeamSummary {
                    team: "beta".to_string(),
                    members: 1,
                },
            ]
        );

        let by_team: Vec<i64> = list_users_by_team(&mut conn)
            .await
            .unwrap()
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(by_team, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_user_display() {
        let (_db, mut conn) = fresh_db().await;
        let full = join_team(
            &mut conn,
            Participant {
                id: 1,
                username: Some("anna".to_string()),
                first_name: "Anna".to_string(),
                last_name: Some("Schmidt".to_string()),
            },
            "alpha",
        )
        .await
        .unwrap();
        assert_eq!(full.to_string(), "Anna Schmidt @anna");

        let bare = join_team(
            &mut conn,
            Participant {
                id: 2,
                username: None,
                first_name: "Ben".to_string(),
                last_name: None,
            },
            "alpha",
        )
        .await
        .unwrap();
        assert_eq!(bare.to_string(), "Ben");
    }
}
