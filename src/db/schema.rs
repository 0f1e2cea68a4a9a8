pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS reviews (
    review_id TEXT NOT NULL,
    ts TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'PENDING',
    aws_account_id TEXT NOT NULL,
    region TEXT NOT NULL,
    pillars TEXT NOT NULL DEFAULT '[]',
    findings TEXT NOT NULL DEFAULT '[]',
    recommendations TEXT NOT NULL DEFAULT '[]',
    score REAL,
    error_message TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (review_id, ts)
);

CREATE TABLE IF NOT EXISTS queue_messages (
    message_id TEXT PRIMARY KEY,
    review_id TEXT NOT NULL,
    body TEXT NOT NULL,
    enqueued_at TEXT NOT NULL,
    visible_at TEXT NOT NULL,
    receive_count INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_reviews_status ON reviews(status);
CREATE INDEX IF NOT EXISTS idx_reviews_ts ON reviews(ts);
CREATE INDEX IF NOT EXISTS idx_queue_visible ON queue_messages(visible_at);
";
