//! Domain entities - Core business objects with identity

mod campaign;
mod character;
mod playbook;

pub use campaign::{Campaign, CampaignMember, INVITE_CODE_LEN};
pub use character::{
    AnimalCompanion, BackgroundInstance, Character, CharacterSheet, ClassPayload, Crew,
    MoveInstance, SacredPouch, SpecialPossessionInstance, TallTale,
};
pub use playbook::{
    AppearanceOption, Background, Instinct, MoveRequirement, MoveTemplate, PlaceOfOrigin,
    SpecialPossession, APPEARANCE_SLOTS,
};
