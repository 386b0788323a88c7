// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

diesel::table! {
    challenges (name) {
        name -> Text,
        short_name -> Text,
        #[sql_name = "desc"]
        description -> Nullable<Text>,
        points -> Integer,
    }
}

diesel::table! {
    config (name) {
        name -> Text,
        value -> Text,
    }
}

diesel::table! {
    forums (id) {
        id -> Integer,
        name -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    judgement (submission_id) {
        submission_id -> BigInt,
        challenge_name -> Text,
        points -> Integer,
        valid -> Bool,
    }
}

diesel::table! {
    safety_team (name) {
        name -> Text,
        phone -> Text,
        date -> Date,
    }
}

diesel::table! {
    submissions (message_id) {
        message_id -> BigInt,
        user -> BigInt,
        team -> Text,
        date -> Timestamp,
        caption -> Text,
        #[sql_name = "type"]
        kind -> Integer,
    }
}

diesel::table! {
    users (id) {
        id -> BigInt,
        username -> Nullable<Text>,
        first_name -> Text,
        last_name -> Nullable<Text>,
        team -> Text,
        created_at -> Timestamp,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    challenges,
    config,
    forums,
    judgement,
    safety_team,
    submissions,
    users,
);
