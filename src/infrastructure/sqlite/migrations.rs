use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS alerts (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            timestamp TEXT,
            alert_type TEXT NOT NULL,
            state TEXT NOT NULL,
            latitude REAL,
            longitude REAL,
            address TEXT,
            description TEXT,
            sector TEXT,
            comuna TEXT,
            city TEXT,
            reporter_villa TEXT,
            reporter_comuna TEXT,
            silent INTEGER NOT NULL DEFAULT 0,
            attended_by TEXT,
            attended_at TEXT,
            attention_notes TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_alerts_timestamp ON alerts(timestamp);
        CREATE INDEX IF NOT EXISTS idx_alerts_state ON alerts(state);
        CREATE INDEX IF NOT EXISTS idx_alerts_sector ON alerts(sector);
        ",
    )
    .map_err(|e| format!("Migration failed: {e}"))
}
