//! Campaign entity - A table of players sharing one roster of characters

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::domain::value_objects::CampaignId;

/// Length of a campaign invite code
pub const INVITE_CODE_LEN: usize = 6;

/// Alphabet for invite codes; skips 0/O and 1/I to keep codes readable aloud
const INVITE_CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// A campaign run by one game master
#[derive(Debug, Clone)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub description: String,
    /// Name of the player who created the campaign and runs it
    pub game_master: String,
    /// Short shareable code other players redeem to join
    pub invite_code: String,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    pub fn new(name: impl Into<String>, game_master: impl Into<String>) -> Self {
        Self {
            id: CampaignId::new(),
            name: name.into(),
            description: String::new(),
            game_master: game_master.into(),
            invite_code: generate_invite_code(),
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the invite code, invalidating the old one
    pub fn regenerate_invite_code(&mut self) {
        self.invite_code = generate_invite_code();
    }
}

/// A player who has joined a campaign
#[derive(Debug, Clone)]
pub struct CampaignMember {
    pub campaign_id: CampaignId,
    pub player: String,
    pub joined_at: DateTime<Utc>,
}

impl CampaignMember {
    pub fn new(campaign_id: CampaignId, player: impl Into<String>) -> Self {
        Self {
            campaign_id,
            player: player.into(),
            joined_at: Utc::now(),
        }
    }
}

fn generate_invite_code() -> String {
    let mut rng = rand::thread_rng();
    (0..INVITE_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..INVITE_CODE_CHARSET.len());
            INVITE_CODE_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_campaign_gets_invite_code() {
        let campaign = Campaign::new("The Siege of Stonetop", "morgan");

        assert_eq!(campaign.invite_code.len(), INVITE_CODE_LEN);
        assert!(campaign
            .invite_code
            .bytes()
            .all(|b| INVITE_CODE_CHARSET.contains(&b)));
    }

    #[test]
    fn test_regenerate_replaces_code() {
        let mut campaign = Campaign::new("Winter Campaign", "morgan");
        let before = campaign.invite_code.clone();

        // 32^6 codes; a collision here means the generator is broken
        campaign.regenerate_invite_code();
        assert_ne!(campaign.invite_code, before);
    }
}
