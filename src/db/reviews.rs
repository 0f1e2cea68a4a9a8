use data_encoding::BASE64URL_NOPAD;
use serde::{Deserialize, Serialize};

use super::Database;
use crate::errors::WardenError;
use crate::models::{Finding, Recommendation, ReviewRecord, ReviewStatus};
use crate::utils::time::now_ts;

const RECORD_COLUMNS: &str = "review_id, ts, status, aws_account_id, region, pillars, findings, \
     recommendations, score, error_message, created_at, updated_at";

/// Opaque continuation token for forward pagination: the sort position of the
/// last item on the previous page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub ts: String,
    pub review_id: String,
}

impl PageCursor {
    pub fn encode(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        BASE64URL_NOPAD.encode(&json)
    }

    pub fn decode(token: &str) -> Result<Self, WardenError> {
        let bytes = BASE64URL_NOPAD
            .decode(token.as_bytes())
            .map_err(|_| WardenError::Validation("Invalid nextToken".into()))?;
        serde_json::from_slice(&bytes)
            .map_err(|_| WardenError::Validation("Invalid nextToken".into()))
    }
}

#[derive(Debug)]
pub struct ReviewPage {
    pub items: Vec<ReviewRecord>,
    pub next: Option<PageCursor>,
}

/// Raw row as stored; JSON columns are decoded outside the rusqlite closure.
struct ReviewRow {
    review_id: String,
    ts: String,
    status: String,
    aws_account_id: String,
    region: String,
    pillars: String,
    findings: String,
    recommendations: String,
    score: Option<f64>,
    error_message: Option<String>,
    created_at: String,
    updated_at: String,
}

fn read_row(row: &rusqlite::Row) -> rusqlite::Result<ReviewRow> {
    Ok(ReviewRow {
        review_id: row.get(0)?,
        ts: row.get(1)?,
        status: row.get(2)?,
        aws_account_id: row.get(3)?,
        region: row.get(4)?,
        pillars: row.get(5)?,
        findings: row.get(6)?,
        recommendations: row.get(7)?,
        score: row.get(8)?,
        error_message: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

fn into_record(raw: ReviewRow) -> Result<ReviewRecord, WardenError> {
    let status = ReviewStatus::parse(&raw.status)
        .ok_or_else(|| WardenError::Database(format!("Unknown review status: {}", raw.status)))?;
    let pillars: Vec<String> = serde_json::from_str(&raw.pillars)
        .map_err(|e| WardenError::Database(format!("Corrupt pillars column: {}", e)))?;
    let findings: Vec<Finding> = serde_json::from_str(&raw.findings)
        .map_err(|e| WardenError::Database(format!("Corrupt findings column: {}", e)))?;
    let recommendations: Vec<Recommendation> = serde_json::from_str(&raw.recommendations)
        .map_err(|e| WardenError::Database(format!("Corrupt recommendations column: {}", e)))?;
    Ok(ReviewRecord {
        review_id: raw.review_id,
        timestamp: raw.ts,
        status,
        aws_account_id: raw.aws_account_id,
        region: raw.region,
        pillars,
        findings,
        recommendations,
        score: raw.score,
        error_message: raw.error_message,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
    })
}

impl Database {
    pub fn create_review(&self, record: &ReviewRecord) -> Result<(), WardenError> {
        let pillars = serde_json::to_string(&record.pillars)?;
        let findings = serde_json::to_string(&record.findings)?;
        let recommendations = serde_json::to_string(&record.recommendations)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO reviews (review_id, ts, status, aws_account_id, region, pillars, findings, recommendations, score, error_message, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            rusqlite::params![
                record.review_id,
                record.timestamp,
                record.status.as_str(),
                record.aws_account_id,
                record.region,
                pillars,
                findings,
                recommendations,
                record.score,
                record.error_message,
                record.created_at,
                record.updated_at,
            ],
        )
        .map_err(|e| WardenError::Database(format!("Failed to create review: {}", e)))?;
        Ok(())
    }

    /// Fetch the latest entry for a review id, or None if the id is unknown.
    pub fn latest_review(&self, review_id: &str) -> Result<Option<ReviewRecord>, WardenError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {RECORD_COLUMNS} FROM reviews WHERE review_id = ?1 ORDER BY ts DESC LIMIT 1"
            ))
            .map_err(|e| WardenError::Database(format!("Query failed: {}", e)))?;

        let result = stmt.query_row(rusqlite::params![review_id], read_row);
        match result {
            Ok(raw) => Ok(Some(into_record(raw)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(WardenError::Database(format!("Query error: {}", e))),
        }
    }

    /// Transition the latest entry for a review id to a non-completed status.
    ///
    /// Results (findings, recommendations, score) are cleared; only
    /// [`Database::complete_review`] writes them. Returns false when no entry
    /// exists for the id.
    pub fn update_review_status(
        &self,
        review_id: &str,
        status: ReviewStatus,
        error_message: Option<&str>,
    ) -> Result<bool, WardenError> {
        let conn = self.conn.lock().unwrap();
        let ts = match Self::latest_ts(&conn, review_id)? {
            Some(ts) => ts,
            None => return Ok(false),
        };
        conn.execute(
            "UPDATE reviews SET status = ?3, error_message = ?4, findings = '[]', \
             recommendations = '[]', score = NULL, updated_at = ?5 \
             WHERE review_id = ?1 AND ts = ?2",
            rusqlite::params![review_id, ts, status.as_str(), error_message, now_ts()],
        )
        .map_err(|e| WardenError::Database(format!("Update failed: {}", e)))?;
        Ok(true)
    }

    /// Transition the latest entry to COMPLETED with the merged results.
    /// Returns false when no entry exists for the id.
    pub fn complete_review(
        &self,
        review_id: &str,
        findings: &[Finding],
        recommendations: &[Recommendation],
        score: f64,
    ) -> Result<bool, WardenError> {
        let findings_json = serde_json::to_string(findings)?;
        let recommendations_json = serde_json::to_string(recommendations)?;
        let conn = self.conn.lock().unwrap();
        let ts = match Self::latest_ts(&conn, review_id)? {
            Some(ts) => ts,
            None => return Ok(false),
        };
        conn.execute(
            "UPDATE reviews SET status = 'COMPLETED', findings = ?3, recommendations = ?4, \
             score = ?5, error_message = NULL, updated_at = ?6 \
             WHERE review_id = ?1 AND ts = ?2",
            rusqlite::params![review_id, ts, findings_json, recommendations_json, score, now_ts()],
        )
        .map_err(|e| WardenError::Database(format!("Update failed: {}", e)))?;
        Ok(true)
    }

    /// Forward pagination over all entries, newest first. Fetches one extra
    /// row to decide whether a continuation cursor is needed.
    pub fn list_reviews(
        &self,
        limit: usize,
        cursor: Option<&PageCursor>,
    ) -> Result<ReviewPage, WardenError> {
        let conn = self.conn.lock().unwrap();
        let fetch = (limit + 1) as i64;

        let rows: Vec<ReviewRow> = match cursor {
            Some(cursor) => {
                let mut stmt = conn
                    .prepare(&format!(
                        "SELECT {RECORD_COLUMNS} FROM reviews \
                         WHERE ts < ?1 OR (ts = ?1 AND review_id < ?2) \
                         ORDER BY ts DESC, review_id DESC LIMIT ?3"
                    ))
                    .map_err(|e| WardenError::Database(format!("Query failed: {}", e)))?;
                let mapped = stmt
                    .query_map(rusqlite::params![cursor.ts, cursor.review_id, fetch], read_row)
                    .map_err(|e| WardenError::Database(format!("Query error: {}", e)))?;
                mapped
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .map_err(|e| WardenError::Database(format!("Row error: {}", e)))?
            }
            None => {
                let mut stmt = conn
                    .prepare(&format!(
                        "SELECT {RECORD_COLUMNS} FROM reviews \
                         ORDER BY ts DESC, review_id DESC LIMIT ?1"
                    ))
                    .map_err(|e| WardenError::Database(format!("Query failed: {}", e)))?;
                let mapped = stmt
                    .query_map(rusqlite::params![fetch], read_row)
                    .map_err(|e| WardenError::Database(format!("Query error: {}", e)))?;
                mapped
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .map_err(|e| WardenError::Database(format!("Row error: {}", e)))?
            }
        };

        let has_more = rows.len() > limit;
        let mut items = Vec::with_capacity(rows.len().min(limit));
        for raw in rows.into_iter().take(limit) {
            items.push(into_record(raw)?);
        }
        let next = if has_more {
            items.last().map(|last| PageCursor {
                ts: last.timestamp.clone(),
                review_id: last.review_id.clone(),
            })
        } else {
            None
        };
        Ok(ReviewPage { items, next })
    }

    fn latest_ts(
        conn: &rusqlite::Connection,
        review_id: &str,
    ) -> Result<Option<String>, WardenError> {
        let result = conn.query_row(
            "SELECT ts FROM reviews WHERE review_id = ?1 ORDER BY ts DESC LIMIT 1",
            rusqlite::params![review_id],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(ts) => Ok(Some(ts)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(WardenError::Database(format!("Query error: {}", e))),
        }
    }
}
