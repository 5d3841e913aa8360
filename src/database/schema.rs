//! Esquema SQLite de la API local

/// Tablas e índices, en orden de creación
pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS quadricycles (
        id TEXT PRIMARY KEY,
        model TEXT NOT NULL,
        purchaseDate TEXT NOT NULL,
        clientName TEXT NOT NULL,
        whatsapp TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'active'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        quadId TEXT NOT NULL,
        reviewNumber INTEGER NOT NULL,
        label TEXT NOT NULL,
        scheduledDate TEXT NOT NULL,
        isCompleted INTEGER NOT NULL DEFAULT 0,
        isRefused INTEGER NOT NULL DEFAULT 0,
        daysFromPrevious INTEGER NOT NULL,
        observation TEXT,
        refusalReason TEXT,
        responsible TEXT,
        km TEXT,
        FOREIGN KEY(quadId) REFERENCES quadricycles(id) ON DELETE CASCADE
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_reviews_quad_number ON reviews(quadId, reviewNumber)",
];

/// Columnas añadidas después de la primera versión de la tabla reviews.
/// Se agregan con ALTER TABLE si una base existente no las tiene.
pub const REVIEW_COLUMN_UPGRADES: &[(&str, &str)] = &[
    ("isRefused", "ALTER TABLE reviews ADD COLUMN isRefused INTEGER NOT NULL DEFAULT 0"),
    ("refusalReason", "ALTER TABLE reviews ADD COLUMN refusalReason TEXT"),
];
