//! Stat values chosen at character creation
//!
//! Every character assigns six modifiers (STR, DEX, INT, WIS, CON, CHA).
//! Individual values are bounded to [-1, 3]; the multiset of all six must
//! match the class's allowed array, order-independent.

use serde::{Deserialize, Serialize};

/// Lowest modifier assignable at creation
pub const STAT_MIN: i8 = -1;
/// Highest modifier assignable at creation
pub const STAT_MAX: i8 = 3;

/// The six character stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    Strength,
    Dexterity,
    Intelligence,
    Wisdom,
    Constitution,
    Charisma,
}

impl StatKey {
    pub const ALL: [StatKey; 6] = [
        StatKey::Strength,
        StatKey::Dexterity,
        StatKey::Intelligence,
        StatKey::Wisdom,
        StatKey::Constitution,
        StatKey::Charisma,
    ];

    /// Snake-case field name used in forms and error reports
    pub fn field_name(&self) -> &'static str {
        match self {
            StatKey::Strength => "strength",
            StatKey::Dexterity => "dexterity",
            StatKey::Intelligence => "intelligence",
            StatKey::Wisdom => "wisdom",
            StatKey::Constitution => "constitution",
            StatKey::Charisma => "charisma",
        }
    }

    /// Three-letter abbreviation, e.g. "STR"
    pub fn abbreviation(&self) -> &'static str {
        match self {
            StatKey::Strength => "STR",
            StatKey::Dexterity => "DEX",
            StatKey::Intelligence => "INT",
            StatKey::Wisdom => "WIS",
            StatKey::Constitution => "CON",
            StatKey::Charisma => "CHA",
        }
    }
}

impl std::fmt::Display for StatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// The six modifiers a player assigned
///
/// Missing fields deserialize to 0 so an incomplete submission reaches
/// validation instead of failing at the parse step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatAssignment {
    pub strength: i8,
    pub dexterity: i8,
    pub intelligence: i8,
    pub wisdom: i8,
    pub constitution: i8,
    pub charisma: i8,
}

impl StatAssignment {
    pub fn get(&self, key: StatKey) -> i8 {
        match key {
            StatKey::Strength => self.strength,
            StatKey::Dexterity => self.dexterity,
            StatKey::Intelligence => self.intelligence,
            StatKey::Wisdom => self.wisdom,
            StatKey::Constitution => self.constitution,
            StatKey::Charisma => self.charisma,
        }
    }

    /// All six values paired with their stat, in canonical order
    pub fn entries(&self) -> [(StatKey, i8); 6] {
        [
            (StatKey::Strength, self.strength),
            (StatKey::Dexterity, self.dexterity),
            (StatKey::Intelligence, self.intelligence),
            (StatKey::Wisdom, self.wisdom),
            (StatKey::Constitution, self.constitution),
            (StatKey::Charisma, self.charisma),
        ]
    }

    /// Whether the six values form exactly the given multiset
    pub fn matches_array(&self, allowed: &StatArray) -> bool {
        let mut actual: Vec<i8> = self.entries().iter().map(|(_, v)| *v).collect();
        let mut expected = allowed.values.to_vec();
        actual.sort_unstable();
        expected.sort_unstable();
        actual == expected
    }

    /// Render as "STR +2, DEX +1, ..." for error reports
    pub fn describe(&self) -> String {
        self.entries()
            .iter()
            .map(|(key, value)| format!("{} {}", key, format_modifier(*value)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The multiset of modifiers a class allows, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatArray {
    pub values: [i8; 6],
}

impl StatArray {
    pub const fn new(values: [i8; 6]) -> Self {
        Self { values }
    }
}

impl std::fmt::Display for StatArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self.values.iter().map(|v| format_modifier(*v)).collect();
        write!(f, "{}", rendered.join(", "))
    }
}

/// Modifier with explicit sign, e.g. "+2", "0", "-1"
pub fn format_modifier(value: i8) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(values: [i8; 6]) -> StatAssignment {
        StatAssignment {
            strength: values[0],
            dexterity: values[1],
            intelligence: values[2],
            wisdom: values[3],
            constitution: values[4],
            charisma: values[5],
        }
    }

    #[test]
    fn test_matches_array_is_order_independent() {
        let allowed = StatArray::new([2, 1, 1, 0, 0, -1]);
        assert!(assignment([2, 1, 1, 0, 0, -1]).matches_array(&allowed));
        assert!(assignment([-1, 0, 0, 1, 1, 2]).matches_array(&allowed));
        assert!(assignment([0, 2, 1, -1, 1, 0]).matches_array(&allowed));
    }

    #[test]
    fn test_matches_array_rejects_wrong_multiset() {
        let allowed = StatArray::new([2, 1, 1, 0, 0, -1]);
        // Same sum, different shape
        assert!(!assignment([2, 2, 0, 0, 0, -1]).matches_array(&allowed));
        // Duplicate of a value that appears once
        assert!(!assignment([2, 1, 1, 0, -1, -1]).matches_array(&allowed));
    }

    #[test]
    fn test_format_modifier_signs() {
        assert_eq!(format_modifier(2), "+2");
        assert_eq!(format_modifier(0), "0");
        assert_eq!(format_modifier(-1), "-1");
    }

    #[test]
    fn test_stat_array_display() {
        let array = StatArray::new([2, 1, 1, 0, 0, -1]);
        assert_eq!(array.to_string(), "+2, +1, +1, 0, 0, -1");
    }
}
