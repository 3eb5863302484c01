//! Campaign repository implementation for SQLite

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::entities::{Campaign, CampaignMember};
use crate::domain::value_objects::CampaignId;

type CampaignRow = (String, String, String, String, String, DateTime<Utc>);
type MemberRow = (String, String, DateTime<Utc>);

pub struct CampaignRepository {
    pool: SqlitePool,
}

impl CampaignRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new campaign
    pub async fn create(&self, campaign: &Campaign) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO campaigns (id, name, description, game_master, invite_code, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(campaign.id.to_string())
        .bind(&campaign.name)
        .bind(&campaign.description)
        .bind(&campaign.game_master)
        .bind(&campaign.invite_code)
        .bind(campaign.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to create campaign")?;

        tracing::debug!("Created campaign: {} ({})", campaign.name, campaign.id);
        Ok(())
    }

    /// Get a campaign by ID
    pub async fn get(&self, id: CampaignId) -> Result<Option<Campaign>> {
        let row: Option<CampaignRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, game_master, invite_code, created_at
            FROM campaigns WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch campaign")?;

        row.map(campaign_from_row).transpose()
    }

    /// Look up a campaign by its invite code (codes are stored uppercase)
    pub async fn get_by_invite_code(&self, invite_code: &str) -> Result<Option<Campaign>> {
        let row: Option<CampaignRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, game_master, invite_code, created_at
            FROM campaigns WHERE invite_code = ?
            "#,
        )
        .bind(invite_code)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch campaign by invite code")?;

        row.map(campaign_from_row).transpose()
    }

    /// List all campaigns, newest first
    pub async fn list(&self) -> Result<Vec<Campaign>> {
        let rows: Vec<CampaignRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, game_master, invite_code, created_at
            FROM campaigns ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list campaigns")?;

        rows.into_iter().map(campaign_from_row).collect()
    }

    /// Record a player as a member of a campaign. Joining twice is a no-op
    /// and keeps the original joined_at.
    pub async fn add_member(&self, member: &CampaignMember) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO campaign_members (campaign_id, player, joined_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(member.campaign_id.to_string())
        .bind(&member.player)
        .bind(member.joined_at)
        .execute(&self.pool)
        .await
        .context("Failed to add campaign member")?;

        Ok(())
    }

    /// List a campaign's members in join order
    pub async fn list_members(&self, campaign_id: CampaignId) -> Result<Vec<CampaignMember>> {
        let rows: Vec<MemberRow> = sqlx::query_as(
            r#"
            SELECT campaign_id, player, joined_at
            FROM campaign_members WHERE campaign_id = ? ORDER BY joined_at, player
            "#,
        )
        .bind(campaign_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list campaign members")?;

        rows.into_iter().map(member_from_row).collect()
    }
}

fn campaign_from_row(row: CampaignRow) -> Result<Campaign> {
    let (id, name, description, game_master, invite_code, created_at) = row;
    Ok(Campaign {
        id: id.parse()?,
        name,
        description,
        game_master,
        invite_code,
        created_at,
    })
}

fn member_from_row(row: MemberRow) -> Result<CampaignMember> {
    let (campaign_id, player, joined_at) = row;
    Ok(CampaignMember {
        campaign_id: campaign_id.parse()?,
        player,
        joined_at,
    })
}
