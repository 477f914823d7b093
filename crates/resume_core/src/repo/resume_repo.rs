//! Resume persistence gateway and SQLite implementation.
//!
//! # Responsibility
//! - Store resume headers and their ordered sections per owner.
//! - Translate between list position and the persisted `sort_order`.
//!
//! # Invariants
//! - Every operation is scoped to one owner; foreign resumes read as absent.
//! - A persisted section never changes resume or kind.
//! - Multi-row writes run in one immediate transaction.
//! - Any section write bumps the owning resume's `updated_at`, and stamps
//!   are strictly increasing per owner.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::content::{ContentError, SectionContent};
use crate::model::resume::{OwnerId, ResumeId, ResumeRecord, SectionOrder, SectionRecord};
use crate::model::section::{fresh_id, SectionId, SectionKind};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Title given to resumes created without one.
pub const DEFAULT_RESUME_TITLE: &str = "New Resume";
const COPY_TITLE_SUFFIX: &str = " (Copy)";

const RESUME_SELECT_SQL: &str = "SELECT
    uuid,
    owner_id,
    title,
    created_at,
    updated_at
FROM resumes";

const SECTION_SELECT_SQL: &str = "SELECT
    id,
    resume_uuid,
    type,
    title,
    content,
    sort_order
FROM resume_sections";

const NEXT_STAMP_SQL: &str = "SELECT MAX(
    CAST(strftime('%s', 'now') AS INTEGER) * 1000,
    COALESCE((SELECT MAX(updated_at) + 1 FROM resumes WHERE owner_id = ?1), 0)
);";

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from resume gateway operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Persisted content JSON does not match its section kind.
    Content(ContentError),
    /// Resume does not exist or belongs to another owner.
    ResumeNotFound(ResumeId),
    /// Section does not exist in the addressed resume.
    SectionNotFound(SectionId),
    /// Section id is already used by another resume or another kind.
    SectionConflict(SectionId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted or supplied data cannot form a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Content(err) => write!(f, "{err}"),
            Self::ResumeNotFound(id) => write!(f, "resume not found: {id}"),
            Self::SectionNotFound(id) => write!(f, "resume section not found: {id}"),
            Self::SectionConflict(id) => {
                write!(f, "section id `{id}` belongs to another resume or kind")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "resume repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "resume repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid resume data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Content(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<ContentError> for RepoError {
    fn from(value: ContentError) -> Self {
        Self::Content(value)
    }
}

/// Owner-scoped resume storage.
pub trait ResumeRepository {
    /// Creates an empty resume. Blank titles become [`DEFAULT_RESUME_TITLE`].
    fn create_resume(&self, owner: OwnerId, title: &str) -> RepoResult<ResumeRecord>;
    /// Lists resumes, most recently updated first.
    fn list_resumes(&self, owner: OwnerId) -> RepoResult<Vec<ResumeRecord>>;
    fn get_resume(&self, owner: OwnerId, id: ResumeId) -> RepoResult<Option<ResumeRecord>>;
    /// Lists sections of one resume by ascending `order`.
    fn list_sections(&self, owner: OwnerId, resume_id: ResumeId)
        -> RepoResult<Vec<SectionRecord>>;
    /// Inserts or replaces one section.
    fn upsert_section(&self, owner: OwnerId, section: &SectionRecord) -> RepoResult<()>;
    fn delete_section(
        &self,
        owner: OwnerId,
        resume_id: ResumeId,
        section_id: &str,
    ) -> RepoResult<()>;
    /// Applies position updates atomically.
    fn reorder_sections(
        &self,
        owner: OwnerId,
        resume_id: ResumeId,
        orders: &[SectionOrder],
    ) -> RepoResult<()>;
    /// Makes the stored sections equal to `sections`: upserts every record and
    /// deletes stored sections that are not listed.
    fn sync_sections(
        &self,
        owner: OwnerId,
        resume_id: ResumeId,
        sections: &[SectionRecord],
    ) -> RepoResult<()>;
    fn rename_resume(&self, owner: OwnerId, id: ResumeId, title: &str) -> RepoResult<()>;
    /// Copies a resume and all its sections under fresh ids.
    fn duplicate_resume(&self, owner: OwnerId, id: ResumeId) -> RepoResult<ResumeRecord>;
    /// Deletes the sections, then the resume.
    fn delete_resume(&self, owner: OwnerId, id: ResumeId) -> RepoResult<()>;
}

/// SQLite-backed resume repository.
pub struct SqliteResumeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteResumeRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ResumeRepository for SqliteResumeRepository<'_> {
    fn create_resume(&self, owner: OwnerId, title: &str) -> RepoResult<ResumeRecord> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let record = insert_resume(&tx, owner, resolve_title(title))?;
        tx.commit()?;

        info!("event=resume_create module=repo status=ok");
        Ok(record)
    }

    fn list_resumes(&self, owner: OwnerId) -> RepoResult<Vec<ResumeRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RESUME_SELECT_SQL}
             WHERE owner_id = ?1
             ORDER BY updated_at DESC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([owner.to_string()])?;
        let mut resumes = Vec::new();
        while let Some(row) = rows.next()? {
            resumes.push(parse_resume_row(row)?);
        }
        Ok(resumes)
    }

    fn get_resume(&self, owner: OwnerId, id: ResumeId) -> RepoResult<Option<ResumeRecord>> {
        load_resume(self.conn, owner, id)
    }

    fn list_sections(
        &self,
        owner: OwnerId,
        resume_id: ResumeId,
    ) -> RepoResult<Vec<SectionRecord>> {
        ensure_owned(self.conn, owner, resume_id)?;
        load_sections(self.conn, resume_id)
    }

    fn upsert_section(&self, owner: OwnerId, section: &SectionRecord) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_owned(&tx, owner, section.resume_id)?;
        write_section(&tx, section)?;
        touch_resume(&tx, owner, section.resume_id)?;
        tx.commit()?;

        info!(
            "event=section_upsert module=repo status=ok kind={}",
            section.kind
        );
        Ok(())
    }

    fn delete_section(
        &self,
        owner: OwnerId,
        resume_id: ResumeId,
        section_id: &str,
    ) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_owned(&tx, owner, resume_id)?;
        let changed = tx.execute(
            "DELETE FROM resume_sections WHERE id = ?1 AND resume_uuid = ?2;",
            params![section_id, resume_id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::SectionNotFound(section_id.to_string()));
        }
        touch_resume(&tx, owner, resume_id)?;
        tx.commit()?;

        info!("event=section_delete module=repo status=ok");
        Ok(())
    }

    fn reorder_sections(
        &self,
        owner: OwnerId,
        resume_id: ResumeId,
        orders: &[SectionOrder],
    ) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_owned(&tx, owner, resume_id)?;
        for order in orders {
            let changed = tx.execute(
                "UPDATE resume_sections
                 SET sort_order = ?1
                 WHERE id = ?2 AND resume_uuid = ?3;",
                params![order.order, order.id, resume_id.to_string()],
            )?;
            if changed == 0 {
                return Err(RepoError::SectionNotFound(order.id.clone()));
            }
        }
        touch_resume(&tx, owner, resume_id)?;
        tx.commit()?;

        info!(
            "event=section_reorder module=repo status=ok count={}",
            orders.len()
        );
        Ok(())
    }

    fn sync_sections(
        &self,
        owner: OwnerId,
        resume_id: ResumeId,
        sections: &[SectionRecord],
    ) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_owned(&tx, owner, resume_id)?;

        let mut keep = HashSet::new();
        for section in sections {
            if section.resume_id != resume_id {
                return Err(RepoError::SectionConflict(section.id.clone()));
            }
            write_section(&tx, section)?;
            keep.insert(section.id.as_str());
        }

        let mut removed = 0usize;
        for stored in load_section_ids(&tx, resume_id)? {
            if !keep.contains(stored.as_str()) {
                tx.execute(
                    "DELETE FROM resume_sections WHERE id = ?1 AND resume_uuid = ?2;",
                    params![stored, resume_id.to_string()],
                )?;
                removed += 1;
            }
        }
        touch_resume(&tx, owner, resume_id)?;
        tx.commit()?;

        info!(
            "event=section_sync module=repo status=ok upserted={} removed={removed}",
            sections.len()
        );
        Ok(())
    }

    fn rename_resume(&self, owner: OwnerId, id: ResumeId, title: &str) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_owned(&tx, owner, id)?;
        tx.execute(
            "UPDATE resumes SET title = ?1 WHERE uuid = ?2;",
            params![resolve_title(title), id.to_string()],
        )?;
        touch_resume(&tx, owner, id)?;
        tx.commit()?;
        Ok(())
    }

    fn duplicate_resume(&self, owner: OwnerId, id: ResumeId) -> RepoResult<ResumeRecord> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let source = load_resume(&tx, owner, id)?.ok_or(RepoError::ResumeNotFound(id))?;
        let copy = insert_resume(&tx, owner, format!("{}{COPY_TITLE_SUFFIX}", source.title))?;

        let sections = load_sections(&tx, id)?;
        for section in &sections {
            let copied = SectionRecord {
                id: fresh_id(section.kind.as_str()),
                resume_id: copy.id,
                ..section.clone()
            };
            write_section(&tx, &copied)?;
        }
        tx.commit()?;

        info!(
            "event=resume_duplicate module=repo status=ok sections={}",
            sections.len()
        );
        Ok(copy)
    }

    fn delete_resume(&self, owner: OwnerId, id: ResumeId) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_owned(&tx, owner, id)?;
        tx.execute(
            "DELETE FROM resume_sections WHERE resume_uuid = ?1;",
            [id.to_string()],
        )?;
        tx.execute("DELETE FROM resumes WHERE uuid = ?1;", [id.to_string()])?;
        tx.commit()?;

        info!("event=resume_delete module=repo status=ok");
        Ok(())
    }
}

fn resolve_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        DEFAULT_RESUME_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

fn next_stamp(conn: &Connection, owner: OwnerId) -> RepoResult<i64> {
    Ok(conn.query_row(NEXT_STAMP_SQL, [owner.to_string()], |row| row.get(0))?)
}

fn insert_resume(conn: &Connection, owner: OwnerId, title: String) -> RepoResult<ResumeRecord> {
    let stamp = next_stamp(conn, owner)?;
    let record = ResumeRecord {
        id: Uuid::new_v4(),
        owner_id: owner,
        title,
        created_at: stamp,
        updated_at: stamp,
    };
    conn.execute(
        "INSERT INTO resumes (uuid, owner_id, title, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            record.id.to_string(),
            owner.to_string(),
            record.title.as_str(),
            record.created_at,
            record.updated_at,
        ],
    )?;
    Ok(record)
}

fn touch_resume(conn: &Connection, owner: OwnerId, id: ResumeId) -> RepoResult<()> {
    let stamp = next_stamp(conn, owner)?;
    conn.execute(
        "UPDATE resumes SET updated_at = ?1 WHERE uuid = ?2;",
        params![stamp, id.to_string()],
    )?;
    Ok(())
}

fn load_resume(
    conn: &Connection,
    owner: OwnerId,
    id: ResumeId,
) -> RepoResult<Option<ResumeRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{RESUME_SELECT_SQL}
         WHERE uuid = ?1 AND owner_id = ?2;"
    ))?;
    let mut rows = stmt.query(params![id.to_string(), owner.to_string()])?;
    match rows.next()? {
        Some(row) => Ok(Some(parse_resume_row(row)?)),
        None => Ok(None),
    }
}

fn ensure_owned(conn: &Connection, owner: OwnerId, id: ResumeId) -> RepoResult<()> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM resumes WHERE uuid = ?1 AND owner_id = ?2;",
            params![id.to_string(), owner.to_string()],
            |row| row.get(0),
        )
        .optional()?;
    found.map(|_| ()).ok_or(RepoError::ResumeNotFound(id))
}

fn load_sections(conn: &Connection, resume_id: ResumeId) -> RepoResult<Vec<SectionRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{SECTION_SELECT_SQL}
         WHERE resume_uuid = ?1
         ORDER BY sort_order ASC, id ASC;"
    ))?;
    let mut rows = stmt.query([resume_id.to_string()])?;
    let mut sections = Vec::new();
    while let Some(row) = rows.next()? {
        sections.push(parse_section_row(row)?);
    }
    Ok(sections)
}

fn load_section_ids(conn: &Connection, resume_id: ResumeId) -> RepoResult<Vec<SectionId>> {
    let mut stmt = conn.prepare("SELECT id FROM resume_sections WHERE resume_uuid = ?1;")?;
    let ids = stmt
        .query_map([resume_id.to_string()], |row| row.get(0))?
        .collect::<Result<Vec<SectionId>, _>>()?;
    Ok(ids)
}

fn write_section(conn: &Connection, section: &SectionRecord) -> RepoResult<()> {
    if section.kind != section.content.kind() {
        return Err(RepoError::InvalidData(format!(
            "section `{}` declares kind `{}` but carries `{}` content",
            section.id,
            section.kind,
            section.content.kind()
        )));
    }

    let existing: Option<(String, String)> = conn
        .query_row(
            "SELECT resume_uuid, type FROM resume_sections WHERE id = ?1;",
            [section.id.as_str()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;
    if let Some((resume_uuid, kind)) = existing {
        if resume_uuid != section.resume_id.to_string() || kind != section.kind.as_str() {
            return Err(RepoError::SectionConflict(section.id.clone()));
        }
    }

    conn.execute(
        "INSERT INTO resume_sections (id, resume_uuid, type, title, content, sort_order)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            content = excluded.content,
            sort_order = excluded.sort_order;",
        params![
            section.id.as_str(),
            section.resume_id.to_string(),
            section.kind.as_str(),
            section.title.as_str(),
            section.content.to_json_string()?,
            section.order,
        ],
    )?;
    Ok(())
}

fn parse_resume_row(row: &Row<'_>) -> RepoResult<ResumeRecord> {
    let id_text: String = row.get("uuid")?;
    let owner_text: String = row.get("owner_id")?;
    Ok(ResumeRecord {
        id: parse_uuid(&id_text, "resumes.uuid")?,
        owner_id: parse_uuid(&owner_text, "resumes.owner_id")?,
        title: row.get("title")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn parse_section_row(row: &Row<'_>) -> RepoResult<SectionRecord> {
    let resume_text: String = row.get("resume_uuid")?;
    let kind_text: String = row.get("type")?;
    let kind = SectionKind::parse(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid section type `{kind_text}` in resume_sections.type"
        ))
    })?;
    let content_text: String = row.get("content")?;

    Ok(SectionRecord {
        id: row.get("id")?,
        resume_id: parse_uuid(&resume_text, "resume_sections.resume_uuid")?,
        kind,
        title: row.get("title")?,
        content: SectionContent::from_json_str(kind, &content_text)?,
        order: row.get("sort_order")?,
    })
}

fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in ["resumes", "resume_sections"] {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}
