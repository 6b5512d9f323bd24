//! Notice store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the `save_new` persistence API both plugin cores call.
//! - Own bookmark-record persistence, keyed by the owning notice.
//!
//! # Invariants
//! - `save_new` assigns `Verb::Post` when the caller passes no verb.
//! - `save_new` mints a `urn:uuid:` URI when the caller passes none.
//! - URI uniqueness is enforced here, not by the callers.

use crate::db::DbError;
use crate::model::bookmark::BookmarkRecord;
use crate::model::notice::{Notice, NoticeId, NoticeOptions, ObjectType, Source, Verb};
use crate::model::profile::ProfileId;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const NOTICE_SELECT_SQL: &str = "SELECT
    id,
    profile_id,
    content,
    rendered,
    source,
    verb,
    object_type,
    uri,
    urls,
    tags,
    reply_uris,
    scope,
    created_at
FROM notices";

pub type StoreResult<T> = Result<T, StoreError>;

/// Generic port error for notice/bookmark/profile persistence operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// A notice with the same URI already exists.
    DuplicateUri(String),
    /// Persisted state fails to parse back into the domain model.
    InvalidData(String),
    /// Write/read-back mismatch inside one operation.
    InconsistentState(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateUri(uri) => write!(f, "notice uri already exists: {uri}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::InconsistentState(details) => write!(f, "inconsistent store state: {details}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(inner, Some(message)) = &value {
            if inner.code == rusqlite::ErrorCode::ConstraintViolation
                && message.contains("notices.uri")
            {
                return Self::DuplicateUri(message.clone());
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence contract for notices and their bookmark records.
pub trait NoticeStore {
    /// Creates one notice and returns the persisted row.
    fn save_new(
        &self,
        author: ProfileId,
        content: &str,
        source: Source,
        options: NoticeOptions,
    ) -> StoreResult<Notice>;

    /// Attaches bookmark metadata to an already-saved notice.
    fn save_bookmark(&self, record: &BookmarkRecord) -> StoreResult<()>;

    /// Gets one notice by id.
    fn get_notice(&self, id: NoticeId) -> StoreResult<Option<Notice>>;

    /// Gets the bookmark record for one notice, when present.
    fn get_bookmark(&self, notice_id: NoticeId) -> StoreResult<Option<BookmarkRecord>>;
}

/// SQLite-backed notice store.
pub struct SqliteNoticeStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoticeStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoticeStore for SqliteNoticeStore<'_> {
    fn save_new(
        &self,
        author: ProfileId,
        content: &str,
        source: Source,
        options: NoticeOptions,
    ) -> StoreResult<Notice> {
        let verb = options.verb.unwrap_or(Verb::Post);
        let uri = options
            .uri
            .unwrap_or_else(|| format!("urn:uuid:{}", Uuid::new_v4()));

        self.conn.execute(
            "INSERT INTO notices (
                profile_id,
                content,
                rendered,
                source,
                verb,
                object_type,
                uri,
                urls,
                tags,
                reply_uris,
                scope
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                author,
                content,
                options.rendered.as_deref().unwrap_or(content),
                source.as_db(),
                verb.as_db(),
                options.object_type.map(ObjectType::as_db),
                uri,
                to_json_list(&options.urls)?,
                to_json_list(&options.tags)?,
                to_json_list(&options.reply_uris)?,
                options.scope,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get_notice(id)?
            .ok_or(StoreError::InconsistentState(
                "saved notice not found in read-back",
            ))
    }

    fn save_bookmark(&self, record: &BookmarkRecord) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO notice_bookmark (notice_id, title, description)
             VALUES (?1, ?2, ?3);",
            params![
                record.notice_id,
                record.title.as_str(),
                record.description.as_str(),
            ],
        )?;
        Ok(())
    }

    fn get_notice(&self, id: NoticeId) -> StoreResult<Option<Notice>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTICE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_notice_row(row)?));
        }

        Ok(None)
    }

    fn get_bookmark(&self, notice_id: NoticeId) -> StoreResult<Option<BookmarkRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT notice_id, title, description
             FROM notice_bookmark
             WHERE notice_id = ?1;",
        )?;

        let mut rows = stmt.query([notice_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(BookmarkRecord {
                notice_id: row.get("notice_id")?,
                title: row.get("title")?,
                description: row.get("description")?,
            }));
        }

        Ok(None)
    }
}

fn parse_notice_row(row: &Row<'_>) -> StoreResult<Notice> {
    let source_text: String = row.get("source")?;
    let source = Source::parse_db(&source_text).ok_or_else(|| {
        StoreError::InvalidData(format!("invalid source `{source_text}` in notices.source"))
    })?;

    let verb_text: String = row.get("verb")?;
    let verb = Verb::parse_db(&verb_text).ok_or_else(|| {
        StoreError::InvalidData(format!("invalid verb `{verb_text}` in notices.verb"))
    })?;

    let object_type = match row.get::<_, Option<String>>("object_type")? {
        Some(value) => Some(ObjectType::parse_db(&value).ok_or_else(|| {
            StoreError::InvalidData(format!(
                "invalid object type `{value}` in notices.object_type"
            ))
        })?),
        None => None,
    };

    Ok(Notice {
        id: row.get("id")?,
        profile_id: row.get("profile_id")?,
        content: row.get("content")?,
        rendered: row.get("rendered")?,
        source,
        verb,
        object_type,
        uri: row.get("uri")?,
        urls: from_json_list(&row.get::<_, String>("urls")?, "notices.urls")?,
        tags: from_json_list(&row.get::<_, String>("tags")?, "notices.tags")?,
        reply_uris: from_json_list(&row.get::<_, String>("reply_uris")?, "notices.reply_uris")?,
        scope: row.get("scope")?,
        created_at: row.get("created_at")?,
    })
}

fn to_json_list(values: &[String]) -> StoreResult<String> {
    serde_json::to_string(values)
        .map_err(|err| StoreError::InvalidData(format!("failed to encode list column: {err}")))
}

fn from_json_list(text: &str, column: &str) -> StoreResult<Vec<String>> {
    serde_json::from_str(text)
        .map_err(|_| StoreError::InvalidData(format!("invalid JSON list `{text}` in {column}")))
}
