use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::sync::{Arc, Mutex};

use crate::ids;
use crate::survey::{AnswerItem, Survey};

/// One respondent's stored submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub user_code: i64,
    pub answers: Vec<AnswerItem>,
    pub created_at: String,
}

#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open the database and create tables.
    pub fn new(database_path: &str) -> Result<Self> {
        let conn = Connection::open(database_path)
            .context(format!("Failed to open database at {}", database_path))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS surveys (
                survey_id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                questions TEXT NOT NULL,
                user_code INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create surveys table")?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS answers (
                user_code INTEGER PRIMARY KEY,
                survey_id TEXT NOT NULL,
                answers TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create answers table")?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_answers_survey ON answers (survey_id)",
            [],
        )
        .context("Failed to create answers index")?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS id_reserve (
                id TEXT PRIMARY KEY,
                status TEXT NOT NULL DEFAULT 'available'
            )",
            [],
        )
        .context("Failed to create id_reserve table")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    // ==================== Surveys ====================

    /// Persist a new survey. Fails if the survey id is already taken.
    pub fn insert_survey(&self, survey: &Survey) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let questions_json = serde_json::to_string(&survey.questions)
            .context("Failed to serialize questions")?;

        conn.execute(
            "INSERT INTO surveys (survey_id, title, description, questions, user_code, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                survey.survey_id,
                survey.title,
                survey.description,
                questions_json,
                survey.user_code,
                survey.created_at
            ],
        )
        .context("Failed to insert survey")?;

        Ok(())
    }

    pub fn survey_exists(&self, survey_id: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT COUNT(*) FROM surveys WHERE survey_id = ?1")?;
        let count: i64 = stmt.query_row(params![survey_id], |row| row.get(0))?;
        Ok(count > 0)
    }

    pub fn get_survey(&self, survey_id: &str) -> Result<Option<Survey>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT survey_id, title, description, questions, user_code, created_at
             FROM surveys WHERE survey_id = ?1",
        )?;

        let row: Option<(String, String, String, String, i64, String)> = stmt
            .query_row(params![survey_id], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })
            .optional()?;

        match row {
            Some((survey_id, title, description, questions_json, user_code, created_at)) => {
                let questions = serde_json::from_str(&questions_json)
                    .context("Failed to parse stored questions")?;
                Ok(Some(Survey {
                    survey_id,
                    title,
                    description,
                    questions,
                    user_code,
                    created_at,
                }))
            }
            None => Ok(None),
        }
    }

    /// Find the survey a creator code belongs to.
    pub fn find_survey_by_creator_code(&self, user_code: i64) -> Result<Option<Survey>> {
        let survey_id: Option<String> = {
            let conn = self.conn.lock().unwrap();
            let mut stmt = conn.prepare("SELECT survey_id FROM surveys WHERE user_code = ?1")?;
            stmt.query_row(params![user_code], |row| row.get(0))
                .optional()?
        };

        match survey_id {
            Some(id) => self.get_survey(&id),
            None => Ok(None),
        }
    }

    /// Find the survey a participant code answered.
    pub fn find_survey_id_by_participant_code(&self, user_code: i64) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT survey_id FROM answers WHERE user_code = ?1")?;
        let survey_id = stmt
            .query_row(params![user_code], |row| row.get(0))
            .optional()?;
        Ok(survey_id)
    }

    // ==================== Answers ====================

    /// Store one respondent's submission under a fresh user code.
    pub fn insert_submission(
        &self,
        survey_id: &str,
        user_code: i64,
        answers: &[AnswerItem],
    ) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let created_at = Utc::now().to_rfc3339();
        let answers_json =
            serde_json::to_string(answers).context("Failed to serialize answers")?;

        conn.execute(
            "INSERT INTO answers (user_code, survey_id, answers, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_code, survey_id, answers_json, created_at],
        )
        .context("Failed to insert submission")?;

        Ok(())
    }

    /// All submissions for a survey, oldest first.
    pub fn submissions_for_survey(&self, survey_id: &str) -> Result<Vec<Submission>> {
        let rows: Vec<(i64, String, String)> = {
            let conn = self.conn.lock().unwrap();
            let mut stmt = conn.prepare(
                "SELECT user_code, answers, created_at FROM answers
                 WHERE survey_id = ?1 ORDER BY created_at ASC",
            )?;

            let rows = stmt
                .query_map(params![survey_id], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        let mut submissions = Vec::with_capacity(rows.len());
        for (user_code, answers_json, created_at) in rows {
            let answers = serde_json::from_str(&answers_json)
                .context("Failed to parse stored answers")?;
            submissions.push(Submission {
                user_code,
                answers,
                created_at,
            });
        }

        Ok(submissions)
    }

    // ==================== Survey Code Reserve ====================

    /// Whether a survey code can still be claimed. Codes never seen before
    /// count as available; codes drawn into the reserve stay available until
    /// a survey claims them.
    pub fn is_id_available(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT status FROM id_reserve WHERE id = ?1")?;
        let status: Option<String> = stmt
            .query_row(params![id], |row| row.get(0))
            .optional()?;

        Ok(match status.as_deref() {
            Some("used") => false,
            _ => true,
        })
    }

    /// Mark a reserve code as consumed.
    pub fn mark_id_used(&self, id: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE id_reserve SET status = 'used' WHERE id = ?1",
            params![id],
        )
        .context("Failed to mark id as used")?;
        Ok(())
    }

    /// Record a creator-picked code as consumed, whether or not the reserve
    /// had seen it before.
    pub fn add_custom_id(&self, id: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO id_reserve (id, status) VALUES (?1, 'used')
             ON CONFLICT(id) DO UPDATE SET status = 'used'",
            params![id],
        )
        .context("Failed to record custom id")?;
        Ok(())
    }

    /// Draw available code suggestions, listing the preferred code first
    /// when it can still be claimed. Drawing does not consume the codes.
    pub fn draw_ids(&self, count: usize, preferred: Option<&str>) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut remaining = count;

        if let Some(preferred) = preferred {
            if ids::is_well_formed(preferred) && self.is_id_available(preferred)? {
                ids.push(preferred.to_string());
                remaining = remaining.saturating_sub(1);
            }
        }

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id FROM id_reserve WHERE status = 'available' AND id <> ?1 LIMIT ?2",
        )?;
        let drawn = stmt
            .query_map(params![preferred.unwrap_or(""), remaining as i64], |row| {
                row.get::<_, String>(0)
            })?
            .collect::<Result<Vec<_>, _>>()?;

        ids.extend(drawn);
        Ok(ids)
    }

    pub fn available_id_count(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT COUNT(*) FROM id_reserve WHERE status = 'available'")?;
        let count: i64 = stmt.query_row([], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Top the reserve back up to `min_available` claimable codes. Returns
    /// how many codes were added.
    pub fn replenish_reserve(&self, min_available: usize) -> Result<usize> {
        let available = self.available_id_count()?;
        if available >= min_available {
            return Ok(0);
        }

        let needed = min_available - available;
        let conn = self.conn.lock().unwrap();
        let mut added = 0;
        let mut attempts = 0;

        while added < needed {
            // The combination space is ~64k codes; give up long before a
            // full reserve could exhaust it.
            attempts += 1;
            if attempts > needed * 1000 {
                anyhow::bail!("Exhausted survey code space while replenishing reserve");
            }

            let candidate = ids::combo_id();
            let inserted = conn
                .execute(
                    "INSERT OR IGNORE INTO id_reserve (id, status) VALUES (?1, 'available')",
                    params![candidate],
                )
                .context("Failed to insert reserve id")?;
            added += inserted;
        }

        Ok(added)
    }
}

/// Whether a storage failure is a survey id collision. The availability
/// checks and the insert take the connection lock separately, so a
/// concurrent create can claim an id between the two.
pub fn is_duplicate_survey_id(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(failure, _))
            if failure.code == ErrorCode::ConstraintViolation
    )
}
