// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Typed access to each table. The schema leaves the relationships between
//! tables unenforced, so the writes in here check them before touching a row.

pub mod challenges;
pub mod config;
pub mod forums;
pub mod judgements;
pub mod safety_team;
pub mod submissions;
pub mod users;
