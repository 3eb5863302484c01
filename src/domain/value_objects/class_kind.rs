//! Character class discriminant
//!
//! The nine Stonetop playbooks. Rather than one table per class, a character
//! row carries a `ClassKind` plus a class-specific payload; everything that
//! varies per class at creation time lives in the declarative rules table
//! (`domain::rules`).

use serde::{Deserialize, Serialize};

/// One of the nine playbooks a character can be built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Blessed,
    Fox,
    Heavy,
    Judge,
    Lightbearer,
    Marshal,
    Ranger,
    Seeker,
    WouldBeHero,
}

impl ClassKind {
    /// All classes, in playbook order
    pub const ALL: [ClassKind; 9] = [
        ClassKind::Blessed,
        ClassKind::Fox,
        ClassKind::Heavy,
        ClassKind::Judge,
        ClassKind::Lightbearer,
        ClassKind::Marshal,
        ClassKind::Ranger,
        ClassKind::Seeker,
        ClassKind::WouldBeHero,
    ];

    /// Human-readable playbook name, e.g. "The Fox"
    pub fn display_name(&self) -> &'static str {
        match self {
            ClassKind::Blessed => "The Blessed",
            ClassKind::Fox => "The Fox",
            ClassKind::Heavy => "The Heavy",
            ClassKind::Judge => "The Judge",
            ClassKind::Lightbearer => "The Lightbearer",
            ClassKind::Marshal => "The Marshal",
            ClassKind::Ranger => "The Ranger",
            ClassKind::Seeker => "The Seeker",
            ClassKind::WouldBeHero => "The Would-Be Hero",
        }
    }

    /// URL-friendly slug, e.g. "the-fox"
    pub fn slug(&self) -> &'static str {
        match self {
            ClassKind::Blessed => "the-blessed",
            ClassKind::Fox => "the-fox",
            ClassKind::Heavy => "the-heavy",
            ClassKind::Judge => "the-judge",
            ClassKind::Lightbearer => "the-lightbearer",
            ClassKind::Marshal => "the-marshal",
            ClassKind::Ranger => "the-ranger",
            ClassKind::Seeker => "the-seeker",
            ClassKind::WouldBeHero => "the-would-be-hero",
        }
    }
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for ClassKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "the-blessed" | "blessed" => Ok(ClassKind::Blessed),
            "the-fox" | "fox" => Ok(ClassKind::Fox),
            "the-heavy" | "heavy" => Ok(ClassKind::Heavy),
            "the-judge" | "judge" => Ok(ClassKind::Judge),
            "the-lightbearer" | "lightbearer" => Ok(ClassKind::Lightbearer),
            "the-marshal" | "marshal" => Ok(ClassKind::Marshal),
            "the-ranger" | "ranger" => Ok(ClassKind::Ranger),
            "the-seeker" | "seeker" => Ok(ClassKind::Seeker),
            "the-would-be-hero" | "would-be-hero" => Ok(ClassKind::WouldBeHero),
            _ => Err(anyhow::anyhow!("Unknown character class: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_slug_round_trip() {
        for class in ClassKind::ALL {
            assert_eq!(ClassKind::from_str(class.slug()).unwrap(), class);
        }
    }

    #[test]
    fn test_unknown_slug_rejected() {
        assert!(ClassKind::from_str("the-barbarian").is_err());
    }
}
