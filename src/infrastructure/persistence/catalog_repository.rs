//! Playbook catalog repository implementation for SQLite
//!
//! Template rows are keyed by class and read-mostly: the seeder writes them
//! once at startup and everything else only queries.

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::domain::entities::{
    AppearanceOption, Background, Instinct, MoveRequirement, MoveTemplate, PlaceOfOrigin,
    SpecialPossession,
};
use crate::domain::rules::{ClassCatalog, ClassRules};
use crate::domain::value_objects::ClassKind;

type BackgroundRow = (String, String, String, String, Option<i32>);
type InstinctRow = (String, String, String, String);
type AppearanceRow = (String, String, i64, String);
type OriginRow = (String, String, String, String);
type MoveRow = (
    String,
    String,
    String,
    String,
    Option<String>,
    Option<i32>,
    Option<i32>,
    Option<i32>,
);
type PossessionRow = (String, String, String, String, Option<i32>, Option<i32>);

pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// True when no templates have been seeded yet
    pub async fn is_empty(&self) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT (SELECT COUNT(*) FROM backgrounds) + (SELECT COUNT(*) FROM moves)",
        )
        .fetch_one(&self.pool)
        .await
        .context("Failed to count catalog templates")?;
        Ok(count == 0)
    }

    /// Assemble the player-facing candidate sets for one class
    pub async fn class_catalog(&self, rules: &ClassRules) -> Result<ClassCatalog> {
        let class_kind = rules.class_kind;
        Ok(ClassCatalog::assemble(
            rules,
            self.backgrounds(class_kind).await?,
            self.instincts(class_kind).await?,
            self.appearance_options(class_kind).await?,
            self.places_of_origin(class_kind).await?,
            self.moves(class_kind).await?,
            self.special_possessions(class_kind).await?,
        ))
    }

    pub async fn backgrounds(&self, class_kind: ClassKind) -> Result<Vec<Background>> {
        let rows: Vec<BackgroundRow> = sqlx::query_as(
            r#"
            SELECT id, class_kind, name, description, total_charges
            FROM backgrounds WHERE class_kind = ?
            "#,
        )
        .bind(class_kind.slug())
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch backgrounds")?;

        rows.into_iter().map(background_from_row).collect()
    }

    pub async fn instincts(&self, class_kind: ClassKind) -> Result<Vec<Instinct>> {
        let rows: Vec<InstinctRow> = sqlx::query_as(
            r#"
            SELECT id, class_kind, name, description
            FROM instincts WHERE class_kind = ?
            "#,
        )
        .bind(class_kind.slug())
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch instincts")?;

        rows.into_iter().map(instinct_from_row).collect()
    }

    pub async fn appearance_options(&self, class_kind: ClassKind) -> Result<Vec<AppearanceOption>> {
        let rows: Vec<AppearanceRow> = sqlx::query_as(
            r#"
            SELECT id, class_kind, slot, text
            FROM appearance_options WHERE class_kind = ?
            "#,
        )
        .bind(class_kind.slug())
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch appearance options")?;

        rows.into_iter().map(appearance_from_row).collect()
    }

    pub async fn places_of_origin(&self, class_kind: ClassKind) -> Result<Vec<PlaceOfOrigin>> {
        let rows: Vec<OriginRow> = sqlx::query_as(
            r#"
            SELECT id, class_kind, name, description
            FROM places_of_origin WHERE class_kind = ?
            "#,
        )
        .bind(class_kind.slug())
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch places of origin")?;

        rows.into_iter().map(origin_from_row).collect()
    }

    /// All move templates for a class, including automatic grants and
    /// level-gated moves the catalog hides
    pub async fn moves(&self, class_kind: ClassKind) -> Result<Vec<MoveTemplate>> {
        let rows: Vec<MoveRow> = sqlx::query_as(
            r#"
            SELECT id, class_kind, name, description, required_move, min_level,
                   total_uses, total_charges
            FROM moves WHERE class_kind = ?
            "#,
        )
        .bind(class_kind.slug())
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch moves")?;

        rows.into_iter().map(move_from_row).collect()
    }

    /// All special possession templates for a class, including automatic grants
    pub async fn special_possessions(
        &self,
        class_kind: ClassKind,
    ) -> Result<Vec<SpecialPossession>> {
        let rows: Vec<PossessionRow> = sqlx::query_as(
            r#"
            SELECT id, class_kind, name, description, total_uses, total_charges
            FROM special_possessions WHERE class_kind = ?
            "#,
        )
        .bind(class_kind.slug())
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch special possessions")?;

        rows.into_iter().map(possession_from_row).collect()
    }

    pub async fn insert_background(&self, background: &Background) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO backgrounds (id, class_kind, name, description, total_charges)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(background.id.to_string())
        .bind(background.class_kind.slug())
        .bind(&background.name)
        .bind(&background.description)
        .bind(background.total_charges)
        .execute(&self.pool)
        .await
        .context("Failed to insert background")?;
        Ok(())
    }

    pub async fn insert_instinct(&self, instinct: &Instinct) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO instincts (id, class_kind, name, description)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(instinct.id.to_string())
        .bind(instinct.class_kind.slug())
        .bind(&instinct.name)
        .bind(&instinct.description)
        .execute(&self.pool)
        .await
        .context("Failed to insert instinct")?;
        Ok(())
    }

    pub async fn insert_appearance_option(&self, option: &AppearanceOption) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO appearance_options (id, class_kind, slot, text)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(option.id.to_string())
        .bind(option.class_kind.slug())
        .bind(option.slot as i64)
        .bind(&option.text)
        .execute(&self.pool)
        .await
        .context("Failed to insert appearance option")?;
        Ok(())
    }

    pub async fn insert_place_of_origin(&self, origin: &PlaceOfOrigin) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO places_of_origin (id, class_kind, name, description)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(origin.id.to_string())
        .bind(origin.class_kind.slug())
        .bind(&origin.name)
        .bind(&origin.description)
        .execute(&self.pool)
        .await
        .context("Failed to insert place of origin")?;
        Ok(())
    }

    pub async fn insert_move(&self, template: &MoveTemplate) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO moves (id, class_kind, name, description, required_move, min_level,
                               total_uses, total_charges)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(template.id.to_string())
        .bind(template.class_kind.slug())
        .bind(&template.name)
        .bind(&template.description)
        .bind(&template.requirement.required_move)
        .bind(template.requirement.min_level)
        .bind(template.total_uses)
        .bind(template.total_charges)
        .execute(&self.pool)
        .await
        .context("Failed to insert move")?;
        Ok(())
    }

    pub async fn insert_special_possession(&self, possession: &SpecialPossession) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO special_possessions (id, class_kind, name, description,
                                             total_uses, total_charges)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(possession.id.to_string())
        .bind(possession.class_kind.slug())
        .bind(&possession.name)
        .bind(&possession.description)
        .bind(possession.total_uses)
        .bind(possession.total_charges)
        .execute(&self.pool)
        .await
        .context("Failed to insert special possession")?;
        Ok(())
    }
}

fn background_from_row(row: BackgroundRow) -> Result<Background> {
    let (id, class_kind, name, description, total_charges) = row;
    Ok(Background {
        id: id.parse()?,
        class_kind: class_kind.parse()?,
        name,
        description,
        total_charges,
    })
}

fn instinct_from_row(row: InstinctRow) -> Result<Instinct> {
    let (id, class_kind, name, description) = row;
    Ok(Instinct {
        id: id.parse()?,
        class_kind: class_kind.parse()?,
        name,
        description,
    })
}

fn appearance_from_row(row: AppearanceRow) -> Result<AppearanceOption> {
    let (id, class_kind, slot, text) = row;
    Ok(AppearanceOption {
        id: id.parse()?,
        class_kind: class_kind.parse()?,
        slot: slot as usize,
        text,
    })
}

fn origin_from_row(row: OriginRow) -> Result<PlaceOfOrigin> {
    let (id, class_kind, name, description) = row;
    Ok(PlaceOfOrigin {
        id: id.parse()?,
        class_kind: class_kind.parse()?,
        name,
        description,
    })
}

fn move_from_row(row: MoveRow) -> Result<MoveTemplate> {
    let (id, class_kind, name, description, required_move, min_level, total_uses, total_charges) =
        row;
    Ok(MoveTemplate {
        id: id.parse()?,
        class_kind: class_kind.parse()?,
        name,
        description,
        requirement: MoveRequirement {
            required_move,
            min_level,
        },
        total_uses,
        total_charges,
    })
}

fn possession_from_row(row: PossessionRow) -> Result<SpecialPossession> {
    let (id, class_kind, name, description, total_uses, total_charges) = row;
    Ok(SpecialPossession {
        id: id.parse()?,
        class_kind: class_kind.parse()?,
        name,
        description,
        total_uses,
        total_charges,
    })
}
