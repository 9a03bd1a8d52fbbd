//! SQLite storage layer for devconnector.
//!
//! Owns schema creation and every read and write the engines perform. Each
//! check-and-mutate the engines depend on is a single statement here: likes
//! rely on a `UNIQUE (post_id, user_id)` key with `INSERT OR IGNORE`, removals
//! report affected rows, and entry ordering comes from `AUTOINCREMENT`
//! sequence numbers rather than read-modify-write of an array.

use std::path::{Path, PathBuf};

use rusqlite::types::{ToSql, Type};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use crate::models::{Education, Experience, ProfilePatch, Social};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
    Serde(serde_json::Error),
    /// A uniqueness key rejected the write; carries the offending column(s),
    /// e.g. `profiles.handle`.
    AlreadyExists(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Sqlite(e) => write!(f, "sqlite error: {e}"),
            StorageError::Io(e) => write!(f, "io error: {e}"),
            StorageError::Serde(e) => write!(f, "serialization error: {e}"),
            StorageError::AlreadyExists(msg) => write!(f, "already exists: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Sqlite(e)
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serde(e)
    }
}

/// Map a write failure, turning UNIQUE violations into `AlreadyExists`.
fn write_error(e: rusqlite::Error) -> StorageError {
    if let rusqlite::Error::SqliteFailure(code, Some(msg)) = &e {
        if code.code == ErrorCode::ConstraintViolation {
            if let Some(columns) = msg.strip_prefix("UNIQUE constraint failed: ") {
                return StorageError::AlreadyExists(columns.to_string());
            }
        }
    }
    StorageError::Sqlite(e)
}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub created_at: i64,
}

/// Profile row. `skills` is stored as a JSON array, social links as columns.
#[derive(Debug, Clone)]
pub struct ProfileRow {
    pub id: String,
    pub user_id: String,
    pub handle: String,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Vec<String>,
    pub social: Social,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct PostRow {
    pub id: String,
    pub user_id: String,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct CommentRow {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub created_at: i64,
}

const PROFILE_COLUMNS: &str = "id, user_id, handle, company, website, location, bio, status,
     githubusername, skills, youtube, twitter, facebook, linkedin, instagram, created_at";

fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<ProfileRow> {
    let skills_json: String = row.get(9)?;
    let skills = serde_json::from_str(&skills_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e)))?;
    Ok(ProfileRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        handle: row.get(2)?,
        company: row.get(3)?,
        website: row.get(4)?,
        location: row.get(5)?,
        bio: row.get(6)?,
        status: row.get(7)?,
        githubusername: row.get(8)?,
        skills,
        social: Social {
            youtube: row.get(10)?,
            twitter: row.get(11)?,
            facebook: row.get(12)?,
            linkedin: row.get(13)?,
            instagram: row.get(14)?,
        },
        created_at: row.get(15)?,
    })
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        text: row.get(2)?,
        name: row.get(3)?,
        avatar: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<CommentRow> {
    Ok(CommentRow {
        id: row.get(0)?,
        post_id: row.get(1)?,
        user_id: row.get(2)?,
        text: row.get(3)?,
        name: row.get(4)?,
        avatar: row.get(5)?,
        created_at: row.get(6)?,
    })
}

// ---------------------------------------------------------------------------
// Storage handle
// ---------------------------------------------------------------------------

/// Main storage handle wrapping a SQLite connection.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open or create a database at the given path, creating its parent
    /// directory and the schema if needed.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let storage = Self { conn };
        storage.create_schema()?;
        Ok(storage)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let storage = Self { conn };
        storage.create_schema()?;
        Ok(storage)
    }

    fn create_schema(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS users (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                email       TEXT NOT NULL UNIQUE,
                avatar      TEXT NOT NULL,
                created_at  INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sessions (
                token_hash  TEXT PRIMARY KEY,
                user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at  INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS profiles (
                id              TEXT PRIMARY KEY,
                user_id         TEXT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
                handle          TEXT NOT NULL UNIQUE,
                company         TEXT,
                website         TEXT,
                location        TEXT,
                bio             TEXT,
                status          TEXT,
                githubusername  TEXT,
                skills          TEXT NOT NULL DEFAULT '[]',
                youtube         TEXT,
                twitter         TEXT,
                facebook        TEXT,
                linkedin        TEXT,
                instagram       TEXT,
                created_at      INTEGER NOT NULL
            );

            -- Newest entry has the highest seq.
            CREATE TABLE IF NOT EXISTS experience (
                seq         INTEGER PRIMARY KEY AUTOINCREMENT,
                id          TEXT NOT NULL UNIQUE,
                profile_id  TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
                title       TEXT NOT NULL,
                company     TEXT NOT NULL,
                location    TEXT,
                from_date   TEXT NOT NULL,
                to_date     TEXT,
                current     INTEGER NOT NULL DEFAULT 0,
                description TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_experience_profile
                ON experience(profile_id, seq);

            CREATE TABLE IF NOT EXISTS education (
                seq          INTEGER PRIMARY KEY AUTOINCREMENT,
                id           TEXT NOT NULL UNIQUE,
                profile_id   TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
                school       TEXT NOT NULL,
                degree       TEXT NOT NULL,
                fieldofstudy TEXT NOT NULL,
                from_date    TEXT NOT NULL,
                to_date      TEXT,
                current      INTEGER NOT NULL DEFAULT 0,
                description  TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_education_profile
                ON education(profile_id, seq);

            -- Posts keep their author snapshot after the author is deleted,
            -- so user_id carries no foreign key.
            CREATE TABLE IF NOT EXISTS posts (
                id          TEXT PRIMARY KEY,
                user_id     TEXT NOT NULL,
                text        TEXT NOT NULL,
                name        TEXT NOT NULL,
                avatar      TEXT NOT NULL,
                created_at  INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_posts_created
                ON posts(created_at);

            CREATE TABLE IF NOT EXISTS likes (
                seq         INTEGER PRIMARY KEY AUTOINCREMENT,
                post_id     TEXT NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
                user_id     TEXT NOT NULL,
                created_at  INTEGER NOT NULL,
                UNIQUE (post_id, user_id)
            );

            CREATE TABLE IF NOT EXISTS comments (
                seq         INTEGER PRIMARY KEY AUTOINCREMENT,
                id          TEXT NOT NULL UNIQUE,
                post_id     TEXT NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
                user_id     TEXT NOT NULL,
                text        TEXT NOT NULL,
                name        TEXT NOT NULL,
                avatar      TEXT NOT NULL,
                created_at  INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_comments_post
                ON comments(post_id, seq);
            ",
        )?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Users and sessions
    // -----------------------------------------------------------------------

    /// Insert a user. A duplicate email yields `AlreadyExists("users.email")`.
    pub fn insert_user(&self, row: &UserRow) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT INTO users (id, name, email, avatar, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![row.id, row.name, row.email, row.avatar, row.created_at],
            )
            .map_err(write_error)?;
        Ok(())
    }

    pub fn get_user(&self, user_id: &str) -> Result<Option<UserRow>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, email, avatar, created_at FROM users WHERE id = ?1",
        )?;
        let row = stmt
            .query_row(params![user_id], |row| {
                Ok(UserRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    avatar: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })
            .optional()?;
        Ok(row)
    }

    /// Delete a user. Sessions and the user's profile go with it.
    pub fn delete_user(&self, user_id: &str) -> Result<bool, StorageError> {
        let affected = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1", params![user_id])?;
        Ok(affected > 0)
    }

    pub fn insert_session(
        &self,
        token_hash: &str,
        user_id: &str,
        created_at: i64,
    ) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO sessions (token_hash, user_id, created_at) VALUES (?1, ?2, ?3)",
            params![token_hash, user_id, created_at],
        )?;
        Ok(())
    }

    /// Resolve a session token digest to the user it belongs to.
    pub fn get_session_user(&self, token_hash: &str) -> Result<Option<String>, StorageError> {
        let user_id = self
            .conn
            .query_row(
                "SELECT user_id FROM sessions WHERE token_hash = ?1",
                params![token_hash],
                |row| row.get(0),
            )
            .optional()?;
        Ok(user_id)
    }

    // -----------------------------------------------------------------------
    // Profiles
    // -----------------------------------------------------------------------

    /// Insert a profile. Handle or user collisions yield `AlreadyExists` with
    /// the offending column.
    pub fn insert_profile(&self, row: &ProfileRow) -> Result<(), StorageError> {
        let skills = serde_json::to_string(&row.skills)?;
        self.conn
            .execute(
                "INSERT INTO profiles
                 (id, user_id, handle, company, website, location, bio, status,
                  githubusername, skills, youtube, twitter, facebook, linkedin, instagram,
                  created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                params![
                    row.id,
                    row.user_id,
                    row.handle,
                    row.company,
                    row.website,
                    row.location,
                    row.bio,
                    row.status,
                    row.githubusername,
                    skills,
                    row.social.youtube,
                    row.social.twitter,
                    row.social.facebook,
                    row.social.linkedin,
                    row.social.instagram,
                    row.created_at,
                ],
            )
            .map_err(write_error)?;
        Ok(())
    }

    pub fn get_profile_by_user(&self, user_id: &str) -> Result<Option<ProfileRow>, StorageError> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = ?1");
        let row = self
            .conn
            .query_row(&sql, params![user_id], profile_from_row)
            .optional()?;
        Ok(row)
    }

    pub fn get_profile_by_handle(&self, handle: &str) -> Result<Option<ProfileRow>, StorageError> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE handle = ?1");
        let row = self
            .conn
            .query_row(&sql, params![handle], profile_from_row)
            .optional()?;
        Ok(row)
    }

    pub fn list_profiles(&self) -> Result<Vec<ProfileRow>, StorageError> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at, rowid");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], profile_from_row)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    /// Apply a sparse patch in a single UPDATE. Only the fields set in
    /// `patch` appear in the statement. Returns whether a profile matched.
    pub fn update_profile(&self, user_id: &str, patch: &ProfilePatch) -> Result<bool, StorageError> {
        let text_fields: [(&str, &Option<String>); 12] = [
            ("handle", &patch.handle),
            ("company", &patch.company),
            ("website", &patch.website),
            ("location", &patch.location),
            ("bio", &patch.bio),
            ("status", &patch.status),
            ("githubusername", &patch.githubusername),
            ("youtube", &patch.social.youtube),
            ("twitter", &patch.social.twitter),
            ("facebook", &patch.social.facebook),
            ("linkedin", &patch.social.linkedin),
            ("instagram", &patch.social.instagram),
        ];

        let mut assignments: Vec<String> = Vec::new();
        let mut bind_values: Vec<Box<dyn ToSql>> = Vec::new();

        for (column, value) in text_fields {
            if let Some(value) = value {
                assignments.push(format!("{column} = ?"));
                bind_values.push(Box::new(value.clone()));
            }
        }
        if let Some(skills) = &patch.skills {
            assignments.push("skills = ?".to_string());
            bind_values.push(Box::new(serde_json::to_string(skills)?));
        }

        if assignments.is_empty() {
            return Ok(self.get_profile_by_user(user_id)?.is_some());
        }

        let sql = format!(
            "UPDATE profiles SET {} WHERE user_id = ?",
            assignments.join(", ")
        );
        bind_values.push(Box::new(user_id.to_string()));
        let bind_refs: Vec<&dyn ToSql> = bind_values.iter().map(|b| b.as_ref()).collect();

        let affected = self
            .conn
            .execute(&sql, bind_refs.as_slice())
            .map_err(write_error)?;
        Ok(affected > 0)
    }

    // -----------------------------------------------------------------------
    // Experience and education
    // -----------------------------------------------------------------------

    pub fn insert_experience(&self, profile_id: &str, entry: &Experience) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO experience
             (id, profile_id, title, company, location, from_date, to_date, current, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                entry.id,
                profile_id,
                entry.title,
                entry.company,
                entry.location,
                entry.from,
                entry.to,
                entry.current as i32,
                entry.description,
            ],
        )?;
        Ok(())
    }

    /// Experience entries, newest first.
    pub fn list_experience(&self, profile_id: &str) -> Result<Vec<Experience>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, company, location, from_date, to_date, current, description
             FROM experience WHERE profile_id = ?1 ORDER BY seq DESC",
        )?;
        let rows = stmt.query_map(params![profile_id], |row| {
            Ok(Experience {
                id: row.get(0)?,
                title: row.get(1)?,
                company: row.get(2)?,
                location: row.get(3)?,
                from: row.get(4)?,
                to: row.get(5)?,
                current: row.get::<_, i32>(6)? != 0,
                description: row.get(7)?,
            })
        })?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    pub fn delete_experience(&self, profile_id: &str, entry_id: &str) -> Result<bool, StorageError> {
        let affected = self.conn.execute(
            "DELETE FROM experience WHERE profile_id = ?1 AND id = ?2",
            params![profile_id, entry_id],
        )?;
        Ok(affected > 0)
    }

    pub fn insert_education(&self, profile_id: &str, entry: &Education) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO education
             (id, profile_id, school, degree, fieldofstudy, from_date, to_date, current, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                entry.id,
                profile_id,
                entry.school,
                entry.degree,
                entry.fieldofstudy,
                entry.from,
                entry.to,
                entry.current as i32,
                entry.description,
            ],
        )?;
        Ok(())
    }

    /// Education entries, newest first.
    pub fn list_education(&self, profile_id: &str) -> Result<Vec<Education>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, school, degree, fieldofstudy, from_date, to_date, current, description
             FROM education WHERE profile_id = ?1 ORDER BY seq DESC",
        )?;
        let rows = stmt.query_map(params![profile_id], |row| {
            Ok(Education {
                id: row.get(0)?,
                school: row.get(1)?,
                degree: row.get(2)?,
                fieldofstudy: row.get(3)?,
                from: row.get(4)?,
                to: row.get(5)?,
                current: row.get::<_, i32>(6)? != 0,
                description: row.get(7)?,
            })
        })?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    pub fn delete_education(&self, profile_id: &str, entry_id: &str) -> Result<bool, StorageError> {
        let affected = self.conn.execute(
            "DELETE FROM education WHERE profile_id = ?1 AND id = ?2",
            params![profile_id, entry_id],
        )?;
        Ok(affected > 0)
    }

    // -----------------------------------------------------------------------
    // Posts
    // -----------------------------------------------------------------------

    pub fn insert_post(&self, row: &PostRow) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO posts (id, user_id, text, name, avatar, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                row.id,
                row.user_id,
                row.text,
                row.name,
                row.avatar,
                row.created_at
            ],
        )?;
        Ok(())
    }

    pub fn get_post(&self, post_id: &str) -> Result<Option<PostRow>, StorageError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, user_id, text, name, avatar, created_at FROM posts WHERE id = ?1",
                params![post_id],
                post_from_row,
            )
            .optional()?;
        Ok(row)
    }

    /// All posts, newest first. Posts created in the same millisecond come
    /// back in reverse insertion order.
    pub fn list_posts(&self) -> Result<Vec<PostRow>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, text, name, avatar, created_at
             FROM posts ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt.query_map([], post_from_row)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    /// Delete a post together with its likes and comments.
    pub fn delete_post(&self, post_id: &str) -> Result<bool, StorageError> {
        let affected = self
            .conn
            .execute("DELETE FROM posts WHERE id = ?1", params![post_id])?;
        Ok(affected > 0)
    }

    // -----------------------------------------------------------------------
    // Likes
    // -----------------------------------------------------------------------

    /// Record a like unless `user_id` already likes the post. Returns `false`
    /// when the like was already present; nothing is written in that case.
    pub fn insert_like(
        &self,
        post_id: &str,
        user_id: &str,
        created_at: i64,
    ) -> Result<bool, StorageError> {
        let affected = self.conn.execute(
            "INSERT OR IGNORE INTO likes (post_id, user_id, created_at) VALUES (?1, ?2, ?3)",
            params![post_id, user_id, created_at],
        )?;
        Ok(affected > 0)
    }

    /// Remove a like. Returns `false` when there was none.
    pub fn delete_like(&self, post_id: &str, user_id: &str) -> Result<bool, StorageError> {
        let affected = self.conn.execute(
            "DELETE FROM likes WHERE post_id = ?1 AND user_id = ?2",
            params![post_id, user_id],
        )?;
        Ok(affected > 0)
    }

    /// IDs of the users who like a post, most recent like first.
    pub fn list_likes(&self, post_id: &str) -> Result<Vec<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT user_id FROM likes WHERE post_id = ?1 ORDER BY seq DESC")?;
        let rows = stmt.query_map(params![post_id], |row| row.get(0))?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    // -----------------------------------------------------------------------
    // Comments
    // -----------------------------------------------------------------------

    pub fn insert_comment(&self, row: &CommentRow) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO comments (id, post_id, user_id, text, name, avatar, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                row.id,
                row.post_id,
                row.user_id,
                row.text,
                row.name,
                row.avatar,
                row.created_at
            ],
        )?;
        Ok(())
    }

    pub fn get_comment(
        &self,
        post_id: &str,
        comment_id: &str,
    ) -> Result<Option<CommentRow>, StorageError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, post_id, user_id, text, name, avatar, created_at
                 FROM comments WHERE post_id = ?1 AND id = ?2",
                params![post_id, comment_id],
                comment_from_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Comments on a post, newest first.
    pub fn list_comments(&self, post_id: &str) -> Result<Vec<CommentRow>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, post_id, user_id, text, name, avatar, created_at
             FROM comments WHERE post_id = ?1 ORDER BY seq DESC",
        )?;
        let rows = stmt.query_map(params![post_id], comment_from_row)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    /// Delete a comment only if `user_id` wrote it. Returns whether a row
    /// was removed.
    pub fn delete_comment_by_author(
        &self,
        post_id: &str,
        comment_id: &str,
        user_id: &str,
    ) -> Result<bool, StorageError> {
        let affected = self.conn.execute(
            "DELETE FROM comments WHERE post_id = ?1 AND id = ?2 AND user_id = ?3",
            params![post_id, comment_id, user_id],
        )?;
        Ok(affected > 0)
    }
}

/// Resolve the database path: `{data_dir}/devconnector.db`.
pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("devconnector.db")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
