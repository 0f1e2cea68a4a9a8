use async_trait::async_trait;

use super::{JobQueue, QueueMessage, ReviewJob};
use crate::db::Database;
use crate::errors::WardenError;
use crate::utils::time::{now_ts, ts_after_secs};

const DEFAULT_VISIBILITY_TIMEOUT_SECS: i64 = 60;

/// Dispatch queue backed by the same SQLite database as the review store.
pub struct SqliteQueue {
    db: Database,
    visibility_timeout_secs: i64,
}

impl SqliteQueue {
    pub fn new(db: Database) -> Self {
        Self { db, visibility_timeout_secs: DEFAULT_VISIBILITY_TIMEOUT_SECS }
    }

    pub fn with_visibility_timeout(mut self, secs: i64) -> Self {
        self.visibility_timeout_secs = secs;
        self
    }
}

#[async_trait]
impl JobQueue for SqliteQueue {
    async fn enqueue(&self, job: &ReviewJob) -> Result<(), WardenError> {
        let body = serde_json::to_string(job)?;
        let message_id = uuid::Uuid::new_v4().to_string();
        let now = now_ts();
        let conn = self.db.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO queue_messages (message_id, review_id, body, enqueued_at, visible_at, receive_count) \
             VALUES (?1, ?2, ?3, ?4, ?4, 0)",
            rusqlite::params![message_id, job.review_id, body, now],
        )
        .map_err(|e| WardenError::Queue(format!("Failed to enqueue job: {}", e)))?;
        Ok(())
    }

    async fn receive(&self, max_messages: usize) -> Result<Vec<QueueMessage>, WardenError> {
        let now = now_ts();
        let invisible_until = ts_after_secs(self.visibility_timeout_secs);
        let conn = self.db.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(
                "SELECT message_id, review_id, body, receive_count FROM queue_messages \
                 WHERE visible_at <= ?1 ORDER BY enqueued_at ASC, message_id ASC LIMIT ?2",
            )
            .map_err(|e| WardenError::Queue(format!("Receive query failed: {}", e)))?;

        let rows = stmt
            .query_map(rusqlite::params![now, max_messages as i64], |row| {
                Ok(QueueMessage {
                    message_id: row.get(0)?,
                    review_id: row.get(1)?,
                    body: row.get(2)?,
                    receive_count: row.get::<_, u32>(3)?,
                })
            })
            .map_err(|e| WardenError::Queue(format!("Receive query error: {}", e)))?;

        let mut messages = Vec::new();
        for row in rows {
            let mut message =
                row.map_err(|e| WardenError::Queue(format!("Receive row error: {}", e)))?;
            message.receive_count += 1;
            messages.push(message);
        }

        for message in &messages {
            conn.execute(
                "UPDATE queue_messages SET visible_at = ?2, receive_count = ?3 WHERE message_id = ?1",
                rusqlite::params![message.message_id, invisible_until, message.receive_count],
            )
            .map_err(|e| WardenError::Queue(format!("Visibility update failed: {}", e)))?;
        }

        Ok(messages)
    }

    async fn acknowledge(&self, message_id: &str) -> Result<(), WardenError> {
        let conn = self.db.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM queue_messages WHERE message_id = ?1",
            rusqlite::params![message_id],
        )
        .map_err(|e| WardenError::Queue(format!("Acknowledge failed: {}", e)))?;
        Ok(())
    }

    async fn depth(&self) -> Result<usize, WardenError> {
        let conn = self.db.conn.lock().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM queue_messages", [], |row| row.get(0))
            .map_err(|e| WardenError::Queue(format!("Depth query failed: {}", e)))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job(review_id: &str) -> ReviewJob {
        ReviewJob {
            review_id: review_id.to_string(),
            aws_account_id: "123456789012".to_string(),
            region: "us-east-1".to_string(),
            pillars: vec!["all".to_string()],
            timestamp: now_ts(),
        }
    }

    #[tokio::test]
    async fn test_enqueue_receive_acknowledge() {
        let queue = SqliteQueue::new(Database::in_memory().unwrap());
        queue.enqueue(&sample_job("rev-1")).await.unwrap();
        assert_eq!(queue.depth().await.unwrap(), 1);

        let messages = queue.receive(10).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].review_id, "rev-1");
        assert_eq!(messages[0].receive_count, 1);

        let job = messages[0].job().unwrap();
        assert_eq!(job.review_id, "rev-1");
        assert_eq!(job.pillars, vec!["all".to_string()]);

        queue.acknowledge(&messages[0].message_id).await.unwrap();
        assert_eq!(queue.depth().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_received_message_is_invisible_until_timeout() {
        let queue = SqliteQueue::new(Database::in_memory().unwrap());
        queue.enqueue(&sample_job("rev-2")).await.unwrap();

        let first = queue.receive(10).await.unwrap();
        assert_eq!(first.len(), 1);

        // Still stored but not visible inside the timeout window.
        assert_eq!(queue.depth().await.unwrap(), 1);
        let second = queue.receive(10).await.unwrap();
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn test_unacknowledged_message_redelivered() {
        let queue = SqliteQueue::new(Database::in_memory().unwrap()).with_visibility_timeout(0);
        queue.enqueue(&sample_job("rev-3")).await.unwrap();

        let first = queue.receive(10).await.unwrap();
        assert_eq!(first[0].receive_count, 1);

        // Zero visibility timeout: the message reappears immediately.
        let second = queue.receive(10).await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].message_id, first[0].message_id);
        assert_eq!(second[0].receive_count, 2);
    }

    #[tokio::test]
    async fn test_receive_respects_max_messages() {
        let queue = SqliteQueue::new(Database::in_memory().unwrap());
        for i in 0..5 {
            queue.enqueue(&sample_job(&format!("rev-{}", i))).await.unwrap();
        }
        let batch = queue.receive(3).await.unwrap();
        assert_eq!(batch.len(), 3);
    }
}
