//! SQLite connection and schema management

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Every table the engine uses. Template tables are per-class and enforce
/// unique names within a class; instance tables hang off a character and
/// carry the play-time counters. `background_instances.character_id` is
/// UNIQUE so a character can never hold two backgrounds.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS campaigns (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        game_master TEXT NOT NULL,
        invite_code TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS campaign_members (
        campaign_id TEXT NOT NULL,
        player TEXT NOT NULL,
        joined_at TEXT NOT NULL,
        PRIMARY KEY (campaign_id, player)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS backgrounds (
        id TEXT PRIMARY KEY,
        class_kind TEXT NOT NULL,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        total_charges INTEGER,
        UNIQUE (class_kind, name)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS instincts (
        id TEXT PRIMARY KEY,
        class_kind TEXT NOT NULL,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        UNIQUE (class_kind, name)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS appearance_options (
        id TEXT PRIMARY KEY,
        class_kind TEXT NOT NULL,
        slot INTEGER NOT NULL,
        text TEXT NOT NULL,
        UNIQUE (class_kind, slot, text)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS places_of_origin (
        id TEXT PRIMARY KEY,
        class_kind TEXT NOT NULL,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        UNIQUE (class_kind, name)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS moves (
        id TEXT PRIMARY KEY,
        class_kind TEXT NOT NULL,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        required_move TEXT,
        min_level INTEGER,
        total_uses INTEGER,
        total_charges INTEGER,
        UNIQUE (class_kind, name)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS special_possessions (
        id TEXT PRIMARY KEY,
        class_kind TEXT NOT NULL,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        total_uses INTEGER,
        total_charges INTEGER,
        UNIQUE (class_kind, name)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS characters (
        id TEXT PRIMARY KEY,
        campaign_id TEXT NOT NULL,
        player TEXT NOT NULL,
        name TEXT NOT NULL,
        class_kind TEXT NOT NULL,
        level INTEGER NOT NULL,
        strength INTEGER NOT NULL,
        dexterity INTEGER NOT NULL,
        intelligence INTEGER NOT NULL,
        wisdom INTEGER NOT NULL,
        constitution INTEGER NOT NULL,
        charisma INTEGER NOT NULL,
        instinct_id TEXT NOT NULL,
        appearance1_id TEXT NOT NULL,
        appearance2_id TEXT NOT NULL,
        appearance3_id TEXT NOT NULL,
        appearance4_id TEXT NOT NULL,
        place_of_origin_id TEXT NOT NULL,
        payload TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_characters_campaign ON characters (campaign_id)",
    r#"
    CREATE TABLE IF NOT EXISTS background_instances (
        id TEXT PRIMARY KEY,
        character_id TEXT NOT NULL UNIQUE,
        background_id TEXT NOT NULL,
        background_name TEXT NOT NULL,
        charges_used INTEGER,
        total_charges INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS move_instances (
        id TEXT PRIMARY KEY,
        character_id TEXT NOT NULL,
        move_id TEXT NOT NULL,
        move_name TEXT NOT NULL,
        uses INTEGER,
        total_uses INTEGER,
        charges INTEGER,
        total_charges INTEGER,
        position INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_move_instances_character ON move_instances (character_id)",
    r#"
    CREATE TABLE IF NOT EXISTS possession_instances (
        id TEXT PRIMARY KEY,
        character_id TEXT NOT NULL,
        possession_id TEXT NOT NULL,
        possession_name TEXT NOT NULL,
        uses INTEGER,
        total_uses INTEGER,
        charges INTEGER,
        total_charges INTEGER,
        position INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_possession_instances_character ON possession_instances (character_id)",
];

/// Open the database file, creating it and its directory if needed
pub async fn connect(database_path: &str) -> Result<SqlitePool> {
    if let Some(parent) = std::path::Path::new(database_path).parent() {
        std::fs::create_dir_all(parent).context("Failed to create database directory")?;
    }

    let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", database_path))
        .await
        .context("Failed to connect to SQLite database")?;
    tracing::info!("Connected to SQLite database: {}", database_path);
    Ok(pool)
}

/// A throwaway private database; one connection, since every in-memory
/// connection is its own database
pub async fn connect_in_memory() -> Result<SqlitePool> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .context("Failed to open in-memory SQLite database")
}

pub async fn initialize_schema(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to initialize database schema")?;
    }
    tracing::debug!("Database schema initialized");
    Ok(())
}
