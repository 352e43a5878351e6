//! SQL DDL for initializing the darts storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT (ids are never reused)
/// - `username` NOT NULL, duplicates allowed
/// - `create_date` / `update_date` as RFC3339 text
/// - indexes on `username` and `game`
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS darts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    game TEXT NOT NULL,
    game_type TEXT NOT NULL,
    throws INTEGER NULL,
    score INTEGER NULL,
    max_score INTEGER NULL,
    create_date TEXT NOT NULL, -- RFC3339
    update_date TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_darts_username ON darts(username);

CREATE INDEX IF NOT EXISTS idx_darts_game ON darts(game);
"#;

/// Columns in table order, shared by every SELECT and RETURNING clause.
pub const DARTS_COLUMNS: &str =
    "id, username, game, game_type, throws, score, max_score, create_date, update_date";
