//! Catalog assembly - The legal candidate set for every creation choice
//!
//! Takes the raw class-scoped template rows and produces the lists a player
//! may actually pick from: level-gated moves are dropped, automatically
//! granted moves/possessions are hidden, and every list has a deterministic
//! order so repeated lookups are identical.

use std::cmp::Ordering;

use crate::domain::entities::{
    AppearanceOption, Background, Instinct, MoveTemplate, PlaceOfOrigin, SpecialPossession,
    APPEARANCE_SLOTS,
};
use crate::domain::rules::class_rules::ClassRules;
use crate::domain::value_objects::{
    AppearanceOptionId, BackgroundId, ClassKind, InstinctId, MoveId, PlaceOfOriginId,
    SpecialPossessionId,
};

/// The candidate sets for one class, in presentation order
#[derive(Debug, Clone)]
pub struct ClassCatalog {
    pub class_kind: ClassKind,
    pub backgrounds: Vec<Background>,
    pub instincts: Vec<Instinct>,
    /// All four slots, ordered by (slot, name)
    pub appearance_options: Vec<AppearanceOption>,
    pub places_of_origin: Vec<PlaceOfOrigin>,
    /// Creation-selectable moves only; automatic grants are hidden
    pub moves: Vec<MoveTemplate>,
    pub special_possessions: Vec<SpecialPossession>,
}

impl ClassCatalog {
    /// Build the player-facing catalog from the full template rows
    pub fn assemble(
        rules: &ClassRules,
        mut backgrounds: Vec<Background>,
        mut instincts: Vec<Instinct>,
        mut appearance_options: Vec<AppearanceOption>,
        mut places_of_origin: Vec<PlaceOfOrigin>,
        moves: Vec<MoveTemplate>,
        possessions: Vec<SpecialPossession>,
    ) -> Self {
        backgrounds.sort_by(|a, b| a.name.cmp(&b.name));
        instincts.sort_by(|a, b| a.name.cmp(&b.name));
        appearance_options.sort_by(|a, b| a.slot.cmp(&b.slot).then_with(|| a.text.cmp(&b.text)));
        places_of_origin.sort_by(|a, b| a.name.cmp(&b.name));

        let mut moves: Vec<MoveTemplate> = moves
            .into_iter()
            .filter(|m| m.selectable_at_creation() && !rules.is_auto_move(&m.name))
            .collect();
        moves.sort_by(compare_moves);

        let mut special_possessions: Vec<SpecialPossession> = possessions
            .into_iter()
            .filter(|p| !rules.is_auto_possession(&p.name))
            .collect();
        special_possessions.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            class_kind: rules.class_kind,
            backgrounds,
            instincts,
            appearance_options,
            places_of_origin,
            moves,
            special_possessions,
        }
    }

    pub fn background(&self, id: BackgroundId) -> Option<&Background> {
        self.backgrounds.iter().find(|b| b.id == id)
    }

    pub fn instinct(&self, id: InstinctId) -> Option<&Instinct> {
        self.instincts.iter().find(|i| i.id == id)
    }

    /// Option for one appearance slot; an id from another slot does not match
    pub fn appearance_option(&self, slot: usize, id: AppearanceOptionId) -> Option<&AppearanceOption> {
        self.appearance_options
            .iter()
            .find(|o| o.id == id && o.slot == slot)
    }

    pub fn appearance_slot(&self, slot: usize) -> impl Iterator<Item = &AppearanceOption> {
        self.appearance_options.iter().filter(move |o| o.slot == slot)
    }

    pub fn place_of_origin(&self, id: PlaceOfOriginId) -> Option<&PlaceOfOrigin> {
        self.places_of_origin.iter().find(|p| p.id == id)
    }

    pub fn move_template(&self, id: MoveId) -> Option<&MoveTemplate> {
        self.moves.iter().find(|m| m.id == id)
    }

    pub fn special_possession(&self, id: SpecialPossessionId) -> Option<&SpecialPossession> {
        self.special_possessions.iter().find(|p| p.id == id)
    }

    /// True when every slot has at least one option and no list is empty
    pub fn is_complete(&self) -> bool {
        !self.backgrounds.is_empty()
            && !self.instincts.is_empty()
            && (0..APPEARANCE_SLOTS).all(|slot| self.appearance_slot(slot).next().is_some())
            && !self.places_of_origin.is_empty()
    }
}

/// Move presentation order: unlocked moves first, then by prerequisite move,
/// prerequisite level, and name
fn compare_moves(a: &MoveTemplate, b: &MoveTemplate) -> Ordering {
    nulls_first(&a.requirement.required_move, &b.requirement.required_move)
        .then_with(|| nulls_first(&a.requirement.min_level, &b.requirement.min_level))
        .then_with(|| a.name.cmp(&b.name))
}

fn nulls_first<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::class_rules::class_rules;

    fn fox_moves() -> Vec<MoveTemplate> {
        vec![
            MoveTemplate::new(ClassKind::Fox, "SKILL AT ARMS"),
            MoveTemplate::new(ClassKind::Fox, "LIGHT FINGERS").requires_move("ALL IN THE WRIST"),
            MoveTemplate::new(ClassKind::Fox, "AMBUSH"),
            MoveTemplate::new(ClassKind::Fox, "ALL IN THE WRIST"),
            MoveTemplate::new(ClassKind::Fox, "DANGER SENSE"),
        ]
    }

    #[test]
    fn test_unlocked_moves_sort_before_gated_ones() {
        let catalog = ClassCatalog::assemble(
            class_rules(ClassKind::Fox),
            vec![],
            vec![],
            vec![],
            vec![],
            fox_moves(),
            vec![],
        );

        let names: Vec<&str> = catalog.moves.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "ALL IN THE WRIST",
                "AMBUSH",
                "DANGER SENSE",
                "SKILL AT ARMS",
                "LIGHT FINGERS",
            ]
        );
    }

    #[test]
    fn test_level_gated_moves_are_hidden() {
        let mut moves = fox_moves();
        moves.push(MoveTemplate::new(ClassKind::Fox, "CROSSED PATHS").with_min_level(2));

        let catalog =
            ClassCatalog::assemble(class_rules(ClassKind::Fox), vec![], vec![], vec![], vec![], moves, vec![]);

        assert!(catalog.moves.iter().all(|m| m.name != "CROSSED PATHS"));
    }

    #[test]
    fn test_automatic_grants_are_hidden() {
        let moves = vec![
            MoveTemplate::new(ClassKind::Judge, "CENSURE"),
            MoveTemplate::new(ClassKind::Judge, "TRUTH-TELLER"),
            MoveTemplate::new(ClassKind::Judge, "CHRONICLER OF STONETOP"),
        ];
        let possessions = vec![
            SpecialPossession::new(ClassKind::Judge, "Scribe's tools"),
            SpecialPossession::new(ClassKind::Judge, "Writ of the Law"),
        ];

        let catalog = ClassCatalog::assemble(
            class_rules(ClassKind::Judge),
            vec![],
            vec![],
            vec![],
            vec![],
            moves,
            possessions,
        );

        let move_names: Vec<&str> = catalog.moves.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(move_names, vec!["TRUTH-TELLER"]);
        let possession_names: Vec<&str> = catalog
            .special_possessions
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(possession_names, vec!["Writ of the Law"]);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let build = || {
            ClassCatalog::assemble(
                class_rules(ClassKind::Fox),
                vec![
                    Background::new(ClassKind::Fox, "THE SOLDIER"),
                    Background::new(ClassKind::Fox, "A LIFE OF CRIME"),
                ],
                vec![],
                vec![],
                vec![],
                fox_moves(),
                vec![],
            )
        };

        let first = build();
        let second = build();
        let names = |c: &ClassCatalog| {
            (
                c.backgrounds.iter().map(|b| b.name.clone()).collect::<Vec<_>>(),
                c.moves.iter().map(|m| m.name.clone()).collect::<Vec<_>>(),
            )
        };
        assert_eq!(names(&first), names(&second));
        assert_eq!(first.backgrounds[0].name, "A LIFE OF CRIME");
    }

    #[test]
    fn test_appearance_options_group_by_slot() {
        let options = vec![
            AppearanceOption::new(ClassKind::Heavy, 1, "weary eyes"),
            AppearanceOption::new(ClassKind::Heavy, 0, "looming bearing"),
            AppearanceOption::new(ClassKind::Heavy, 1, "cold eyes"),
        ];
        let catalog = ClassCatalog::assemble(
            class_rules(ClassKind::Heavy),
            vec![],
            vec![],
            options,
            vec![],
            vec![],
            vec![],
        );

        let slot_one: Vec<&str> = catalog.appearance_slot(1).map(|o| o.text.as_str()).collect();
        assert_eq!(slot_one, vec!["cold eyes", "weary eyes"]);
        assert_eq!(catalog.appearance_options[0].text, "looming bearing");
    }
}
