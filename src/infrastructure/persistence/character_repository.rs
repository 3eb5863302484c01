//! Character repository implementation for SQLite
//!
//! A character is stored across four tables: the characters row itself plus
//! its background, move, and possession instances. Creation writes all four
//! in one transaction so a character can never be observed half-built.

use anyhow::{Context, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::domain::entities::{
    BackgroundInstance, Character, CharacterSheet, MoveInstance, SpecialPossessionInstance,
    APPEARANCE_SLOTS,
};
use crate::domain::rules::MaterializedCharacter;
use crate::domain::value_objects::{CampaignId, CharacterId, StatAssignment};

const CHARACTER_COLUMNS: &str = r#"
    id, campaign_id, player, name, class_kind, level,
    strength, dexterity, intelligence, wisdom, constitution, charisma,
    instinct_id, appearance1_id, appearance2_id, appearance3_id, appearance4_id,
    place_of_origin_id, payload, created_at
"#;

type BackgroundInstanceRow = (String, String, String, String, Option<i32>, Option<i32>);
type MoveInstanceRow = (
    String,
    String,
    String,
    String,
    Option<i32>,
    Option<i32>,
    Option<i32>,
    Option<i32>,
    i32,
);

/// Repository for Character operations
pub struct CharacterRepository {
    pool: SqlitePool,
}

impl CharacterRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a materialized character and all of its instances atomically
    pub async fn create(&self, materialized: &MaterializedCharacter) -> Result<()> {
        let character = &materialized.character;
        let payload_json = serde_json::to_string(&character.payload)
            .context("Failed to serialize character payload")?;

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin character creation transaction")?;

        sqlx::query(&format!(
            "INSERT INTO characters ({CHARACTER_COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(character.id.to_string())
        .bind(character.campaign_id.to_string())
        .bind(&character.player)
        .bind(&character.name)
        .bind(character.class_kind.slug())
        .bind(character.level)
        .bind(i32::from(character.stats.strength))
        .bind(i32::from(character.stats.dexterity))
        .bind(i32::from(character.stats.intelligence))
        .bind(i32::from(character.stats.wisdom))
        .bind(i32::from(character.stats.constitution))
        .bind(i32::from(character.stats.charisma))
        .bind(character.instinct_id.to_string())
        .bind(character.appearance_ids[0].to_string())
        .bind(character.appearance_ids[1].to_string())
        .bind(character.appearance_ids[2].to_string())
        .bind(character.appearance_ids[3].to_string())
        .bind(character.place_of_origin_id.to_string())
        .bind(payload_json)
        .bind(character.created_at)
        .execute(&mut *tx)
        .await
        .context("Failed to insert character")?;

        let background = &materialized.background;
        sqlx::query(
            r#"
            INSERT INTO background_instances
                (id, character_id, background_id, background_name, charges_used, total_charges)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(background.id.to_string())
        .bind(background.character_id.to_string())
        .bind(background.background_id.to_string())
        .bind(&background.background_name)
        .bind(background.charges_used)
        .bind(background.total_charges)
        .execute(&mut *tx)
        .await
        .context("Failed to insert background instance")?;

        for instance in &materialized.moves {
            sqlx::query(
                r#"
                INSERT INTO move_instances
                    (id, character_id, move_id, move_name, uses, total_uses,
                     charges, total_charges, position)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(instance.id.to_string())
            .bind(instance.character_id.to_string())
            .bind(instance.move_id.to_string())
            .bind(&instance.move_name)
            .bind(instance.uses)
            .bind(instance.total_uses)
            .bind(instance.charges)
            .bind(instance.total_charges)
            .bind(instance.position)
            .execute(&mut *tx)
            .await
            .context("Failed to insert move instance")?;
        }

        for instance in &materialized.possessions {
            sqlx::query(
                r#"
                INSERT INTO possession_instances
                    (id, character_id, possession_id, possession_name, uses, total_uses,
                     charges, total_charges, position)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(instance.id.to_string())
            .bind(instance.character_id.to_string())
            .bind(instance.possession_id.to_string())
            .bind(&instance.possession_name)
            .bind(instance.uses)
            .bind(instance.total_uses)
            .bind(instance.charges)
            .bind(instance.total_charges)
            .bind(instance.position)
            .execute(&mut *tx)
            .await
            .context("Failed to insert possession instance")?;
        }

        tx.commit()
            .await
            .context("Failed to commit character creation")?;

        tracing::debug!("Created character: {} ({})", character.name, character.id);
        Ok(())
    }

    /// Get a character by ID
    pub async fn get(&self, id: CharacterId) -> Result<Option<Character>> {
        let row = sqlx::query(&format!(
            "SELECT {CHARACTER_COLUMNS} FROM characters WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch character")?;

        row.map(|row| row_to_character(&row)).transpose()
    }

    /// List all characters in a campaign, oldest first
    pub async fn list(&self, campaign_id: CampaignId) -> Result<Vec<Character>> {
        let rows = sqlx::query(&format!(
            "SELECT {CHARACTER_COLUMNS} FROM characters \
             WHERE campaign_id = ? ORDER BY created_at, name"
        ))
        .bind(campaign_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list characters")?;

        rows.iter().map(row_to_character).collect()
    }

    /// Load the full sheet: character, instances, and resolved descriptor names
    pub async fn sheet(&self, id: CharacterId) -> Result<Option<CharacterSheet>> {
        let character = match self.get(id).await? {
            Some(character) => character,
            None => return Ok(None),
        };

        let background = self
            .background_instance(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Character has no background instance: {}", id))?;
        let moves = self.move_instances(id).await?;
        let possessions = self.possession_instances(id).await?;

        let instinct = self
            .descriptor_text(
                "SELECT name FROM instincts WHERE id = ?",
                &character.instinct_id.to_string(),
            )
            .await?;
        let mut appearance: [String; APPEARANCE_SLOTS] = Default::default();
        for (slot, option_id) in character.appearance_ids.iter().enumerate() {
            appearance[slot] = self
                .descriptor_text(
                    "SELECT text FROM appearance_options WHERE id = ?",
                    &option_id.to_string(),
                )
                .await?;
        }
        let place_of_origin = self
            .descriptor_text(
                "SELECT name FROM places_of_origin WHERE id = ?",
                &character.place_of_origin_id.to_string(),
            )
            .await?;

        Ok(Some(CharacterSheet {
            character,
            background,
            moves,
            possessions,
            instinct,
            appearance,
            place_of_origin,
        }))
    }

    /// Get a character's background instance
    pub async fn background_instance(
        &self,
        character_id: CharacterId,
    ) -> Result<Option<BackgroundInstance>> {
        let row: Option<BackgroundInstanceRow> = sqlx::query_as(
            r#"
            SELECT id, character_id, background_id, background_name, charges_used, total_charges
            FROM background_instances WHERE character_id = ?
            "#,
        )
        .bind(character_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch background instance")?;

        row.map(background_instance_from_row).transpose()
    }

    /// Rewrite a character's class payload after a wizard step
    pub async fn update_payload(&self, character: &Character) -> Result<()> {
        let payload_json = serde_json::to_string(&character.payload)
            .context("Failed to serialize character payload")?;

        sqlx::query("UPDATE characters SET payload = ? WHERE id = ?")
            .bind(payload_json)
            .bind(character.id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to update character payload")?;

        tracing::debug!("Updated character payload: {}", character.id);
        Ok(())
    }

    /// Delete a character and its instances. Returns false when no such
    /// character exists.
    pub async fn delete(&self, id: CharacterId) -> Result<bool> {
        let id_string = id.to_string();
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin character deletion transaction")?;

        for table in [
            "background_instances",
            "move_instances",
            "possession_instances",
        ] {
            sqlx::query(&format!("DELETE FROM {table} WHERE character_id = ?"))
                .bind(&id_string)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to delete from {table}"))?;
        }

        let result = sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(&id_string)
            .execute(&mut *tx)
            .await
            .context("Failed to delete character")?;

        tx.commit()
            .await
            .context("Failed to commit character deletion")?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::debug!("Deleted character: {}", id);
        }
        Ok(deleted)
    }

    async fn move_instances(&self, character_id: CharacterId) -> Result<Vec<MoveInstance>> {
        let rows: Vec<MoveInstanceRow> = sqlx::query_as(
            r#"
            SELECT id, character_id, move_id, move_name, uses, total_uses,
                   charges, total_charges, position
            FROM move_instances WHERE character_id = ? ORDER BY position
            "#,
        )
        .bind(character_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch move instances")?;

        rows.into_iter().map(move_instance_from_row).collect()
    }

    async fn possession_instances(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<SpecialPossessionInstance>> {
        let rows: Vec<MoveInstanceRow> = sqlx::query_as(
            r#"
            SELECT id, character_id, possession_id, possession_name, uses, total_uses,
                   charges, total_charges, position
            FROM possession_instances WHERE character_id = ? ORDER BY position
            "#,
        )
        .bind(character_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch possession instances")?;

        rows.into_iter().map(possession_instance_from_row).collect()
    }

    /// Resolve one descriptor template name; the id came out of a character
    /// row, so a miss means the catalog lost a row the character references
    async fn descriptor_text(&self, sql: &str, id: &str) -> Result<String> {
        let text: Option<String> = sqlx::query_scalar(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to resolve descriptor template")?;
        text.ok_or_else(|| anyhow::anyhow!("Descriptor template not found: {}", id))
    }
}

fn row_to_character(row: &SqliteRow) -> Result<Character> {
    let id: String = row.try_get("id")?;
    let campaign_id: String = row.try_get("campaign_id")?;
    let class_kind: String = row.try_get("class_kind")?;
    let instinct_id: String = row.try_get("instinct_id")?;
    let place_of_origin_id: String = row.try_get("place_of_origin_id")?;
    let payload_json: String = row.try_get("payload")?;

    let appearance_columns = [
        "appearance1_id",
        "appearance2_id",
        "appearance3_id",
        "appearance4_id",
    ];
    let mut appearance_ids = [Default::default(); APPEARANCE_SLOTS];
    for (slot, column) in appearance_columns.iter().enumerate() {
        let raw: String = row.try_get(*column)?;
        appearance_ids[slot] = raw.parse()?;
    }

    Ok(Character {
        id: id.parse()?,
        campaign_id: campaign_id.parse()?,
        player: row.try_get("player")?,
        name: row.try_get("name")?,
        class_kind: class_kind.parse()?,
        level: row.try_get("level")?,
        stats: StatAssignment {
            strength: stat_column(row, "strength")?,
            dexterity: stat_column(row, "dexterity")?,
            intelligence: stat_column(row, "intelligence")?,
            wisdom: stat_column(row, "wisdom")?,
            constitution: stat_column(row, "constitution")?,
            charisma: stat_column(row, "charisma")?,
        },
        instinct_id: instinct_id.parse()?,
        appearance_ids,
        place_of_origin_id: place_of_origin_id.parse()?,
        payload: serde_json::from_str(&payload_json)
            .context("Failed to parse character payload")?,
        created_at: row.try_get("created_at")?,
    })
}

fn stat_column(row: &SqliteRow, column: &str) -> Result<i8> {
    let value: i32 = row.try_get(column)?;
    Ok(value as i8)
}

fn background_instance_from_row(row: BackgroundInstanceRow) -> Result<BackgroundInstance> {
    let (id, character_id, background_id, background_name, charges_used, total_charges) = row;
    Ok(BackgroundInstance {
        id: id.parse()?,
        character_id: character_id.parse()?,
        background_id: background_id.parse()?,
        background_name,
        charges_used,
        total_charges,
    })
}

fn move_instance_from_row(row: MoveInstanceRow) -> Result<MoveInstance> {
    let (id, character_id, move_id, move_name, uses, total_uses, charges, total_charges, position) =
        row;
    Ok(MoveInstance {
        id: id.parse()?,
        character_id: character_id.parse()?,
        move_id: move_id.parse()?,
        move_name,
        uses,
        total_uses,
        charges,
        total_charges,
        position,
    })
}

fn possession_instance_from_row(row: MoveInstanceRow) -> Result<SpecialPossessionInstance> {
    let (id, character_id, possession_id, name, uses, total_uses, charges, total_charges, position) =
        row;
    Ok(SpecialPossessionInstance {
        id: id.parse()?,
        character_id: character_id.parse()?,
        possession_id: possession_id.parse()?,
        possession_name: name,
        uses,
        total_uses,
        charges,
        total_charges,
        position,
    })
}
