//! Profile directory contract and SQLite implementation.
//!
//! # Responsibility
//! - Resolve `for:` mention nicknames to canonical profiles.
//! - Provide the profile seeding API the reference store needs.
//!
//! # Invariants
//! - An empty or whitespace nickname resolves to `None`, never an error.
//! - Nickname lookup is case-insensitive.

use crate::model::notice::AccountId;
use crate::model::profile::{Profile, ProfileId};
use crate::repo::notice_store::{StoreError, StoreResult};
use rusqlite::{params, Connection, Row};

/// Lookup contract for resolving mention nicknames.
pub trait ProfileDirectory {
    /// Resolves `nickname` relative to `from`, returning `None` on a miss.
    ///
    /// How "relative" is scoped (subscriptions first, then global) is host
    /// policy; implementations only promise the empty-nickname no-match rule.
    fn resolve_relative(&self, from: &Profile, nickname: &str) -> StoreResult<Option<Profile>>;
}

/// SQLite-backed profile directory.
///
/// The reference adapter resolves nicknames globally against the `profiles`
/// table.
pub struct SqliteProfileDirectory<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProfileDirectory<'conn> {
    /// Constructs a directory from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts one profile and returns the persisted row.
    pub fn create_profile(
        &self,
        nickname: &str,
        fullname: Option<&str>,
        profile_url: &str,
        uri: &str,
        account_id: Option<AccountId>,
    ) -> StoreResult<Profile> {
        self.conn.execute(
            "INSERT INTO profiles (nickname, fullname, profile_url, uri, account_id)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![nickname, fullname, profile_url, uri, account_id],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get_profile(id)?
            .ok_or(StoreError::InconsistentState(
                "created profile not found in read-back",
            ))
    }

    /// Gets one profile by id.
    pub fn get_profile(&self, id: ProfileId) -> StoreResult<Option<Profile>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, nickname, fullname, profile_url, uri, account_id
             FROM profiles
             WHERE id = ?1;",
        )?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_profile_row(row)?));
        }

        Ok(None)
    }
}

impl ProfileDirectory for SqliteProfileDirectory<'_> {
    fn resolve_relative(&self, _from: &Profile, nickname: &str) -> StoreResult<Option<Profile>> {
        let trimmed = nickname.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let mut stmt = self.conn.prepare(
            "SELECT id, nickname, fullname, profile_url, uri, account_id
             FROM profiles
             WHERE nickname = ?1 COLLATE NOCASE;",
        )?;

        let mut rows = stmt.query([trimmed])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_profile_row(row)?));
        }

        Ok(None)
    }
}

fn parse_profile_row(row: &Row<'_>) -> StoreResult<Profile> {
    Ok(Profile {
        id: row.get("id")?,
        nickname: row.get("nickname")?,
        fullname: row.get("fullname")?,
        profile_url: row.get("profile_url")?,
        uri: row.get("uri")?,
        account_id: row.get("account_id")?,
    })
}
