//! Wizard routing - Which onboarding step follows a successful creation
//!
//! A pure function of (class, background name). Wizard endpoints receive the
//! character id explicitly; no ambient "current character" state exists.

use crate::domain::value_objects::ClassKind;

/// Blessed background that unlocks the initiates step
pub const BLESSED_INITIATE: &str = "INITIATE";
/// Ranger background that unlocks the animal-companion step
pub const RANGER_BEAST_BONDED: &str = "BEAST-BONDED";
/// Would-Be Hero background that skips the background-details step
pub const HERO_IMPETUOUS_YOUTH: &str = "IMPETUOUS YOUTH";

/// The page a player lands on after creating a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// Character home page; no further onboarding
    Home,
    ChooseInitiates,
    TallTales,
    Invocations,
    Crew,
    AnimalCompanion,
    Arcana,
    BackgroundDetails,
}

impl WizardStep {
    /// URL fragment for the step, matching the wizard endpoints
    pub fn slug(&self) -> &'static str {
        match self {
            WizardStep::Home => "home",
            WizardStep::ChooseInitiates => "initiates",
            WizardStep::TallTales => "tall-tales",
            WizardStep::Invocations => "invocations",
            WizardStep::Crew => "crew",
            WizardStep::AnimalCompanion => "companion",
            WizardStep::Arcana => "arcana",
            WizardStep::BackgroundDetails => "background-details",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Route a freshly created character to its next onboarding step
pub fn next_step(class: ClassKind, background: &str) -> WizardStep {
    match class {
        ClassKind::Blessed if background == BLESSED_INITIATE => WizardStep::ChooseInitiates,
        ClassKind::Blessed => WizardStep::Home,
        ClassKind::Fox => WizardStep::TallTales,
        ClassKind::Lightbearer => WizardStep::Invocations,
        ClassKind::Marshal => WizardStep::Crew,
        ClassKind::Ranger if background == RANGER_BEAST_BONDED => WizardStep::AnimalCompanion,
        ClassKind::Ranger => WizardStep::Home,
        ClassKind::Seeker => WizardStep::Arcana,
        ClassKind::WouldBeHero if background == HERO_IMPETUOUS_YOUTH => WizardStep::Home,
        ClassKind::WouldBeHero => WizardStep::BackgroundDetails,
        ClassKind::Heavy | ClassKind::Judge => WizardStep::Home,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blessed_routing_depends_on_background() {
        assert_eq!(
            next_step(ClassKind::Blessed, "INITIATE"),
            WizardStep::ChooseInitiates
        );
        assert_eq!(next_step(ClassKind::Blessed, "VESSEL"), WizardStep::Home);
        assert_eq!(
            next_step(ClassKind::Blessed, "RAISED BY WOLVES"),
            WizardStep::Home
        );
    }

    #[test]
    fn test_fox_always_routes_to_tall_tales() {
        for background in ["THE NATURAL", "A LIFE OF CRIME", "THE SOLDIER"] {
            assert_eq!(next_step(ClassKind::Fox, background), WizardStep::TallTales);
        }
    }

    #[test]
    fn test_class_wide_steps() {
        assert_eq!(
            next_step(ClassKind::Lightbearer, "AURANT"),
            WizardStep::Invocations
        );
        assert_eq!(next_step(ClassKind::Marshal, "LUMINARY"), WizardStep::Crew);
        assert_eq!(
            next_step(ClassKind::Seeker, "ANTIQUARIAN"),
            WizardStep::Arcana
        );
    }

    #[test]
    fn test_ranger_routing_depends_on_background() {
        assert_eq!(
            next_step(ClassKind::Ranger, "BEAST-BONDED"),
            WizardStep::AnimalCompanion
        );
        assert_eq!(next_step(ClassKind::Ranger, "TRAPPER"), WizardStep::Home);
    }

    #[test]
    fn test_would_be_hero_impetuous_youth_skips_details() {
        assert_eq!(
            next_step(ClassKind::WouldBeHero, "IMPETUOUS YOUTH"),
            WizardStep::Home
        );
        assert_eq!(
            next_step(ClassKind::WouldBeHero, "DESTINED"),
            WizardStep::BackgroundDetails
        );
        assert_eq!(
            next_step(ClassKind::WouldBeHero, "UNPROVEN"),
            WizardStep::BackgroundDetails
        );
    }

    #[test]
    fn test_remaining_classes_route_home() {
        assert_eq!(next_step(ClassKind::Heavy, "SHERIFF"), WizardStep::Home);
        assert_eq!(next_step(ClassKind::Judge, "LEGACY"), WizardStep::Home);
    }
}
