//! Creation validation - Accumulate every violation before reporting
//!
//! Validation never short-circuits: a submission with a bad stat line, a
//! missing mandatory move, and an unanswered question block reports all three
//! at once. Field-level problems are keyed by field name; cross-field rule
//! violations land in one ordered non-field list. A submission that passes
//! comes back as a [`ValidatedCreation`] holding the resolved templates, so
//! later stages never re-check ids.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::hash::Hash;

use serde::Serialize;

use crate::domain::entities::{
    AppearanceOption, Background, Instinct, MoveTemplate, PlaceOfOrigin, SpecialPossession,
    APPEARANCE_SLOTS,
};
use crate::domain::rules::catalog::ClassCatalog;
use crate::domain::rules::class_rules::ClassRules;
use crate::domain::value_objects::{
    AppearanceOptionId, BackgroundId, InstinctId, MoveId, PlaceOfOriginId, SpecialPossessionId,
    StatAssignment, STAT_MAX, STAT_MIN,
};

pub const REQUIRED_FIELD: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Select a valid choice.";
pub const DUPLICATE_CHOICE: &str = "Duplicate selection.";

/// A raw creation submission, before any checking
#[derive(Debug, Clone, Default)]
pub struct CreationChoices {
    pub name: String,
    pub player: String,
    pub stats: StatAssignment,
    pub background_id: Option<BackgroundId>,
    pub instinct_id: Option<InstinctId>,
    pub appearance_ids: [Option<AppearanceOptionId>; APPEARANCE_SLOTS],
    pub place_of_origin_id: Option<PlaceOfOriginId>,
    /// Selected moves in submission order
    pub move_ids: Vec<MoveId>,
    pub special_possession_ids: Vec<SpecialPossessionId>,
    /// Answers to the class's detail questions, aligned by index
    pub detail_answers: Vec<String>,
    /// Values for the class's extra single-choice fields, keyed by field name
    pub extra_choices: BTreeMap<String, String>,
}

/// Everything wrong with a submission
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors {
    /// Per-field problems, keyed by field name
    pub field_errors: BTreeMap<String, Vec<String>>,
    /// Cross-field rule violations, in evaluation order
    pub non_field_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn add_field(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.field_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add(&mut self, message: impl Into<String>) {
        self.non_field_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.non_field_errors.is_empty()
    }

    pub fn field_error_count(&self) -> usize {
        self.field_errors.values().map(Vec::len).sum()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} field error(s), {} rule violation(s)",
            self.field_error_count(),
            self.non_field_errors.len()
        )
    }
}

/// A submission that passed validation, with every choice resolved to its
/// template
#[derive(Debug, Clone)]
pub struct ValidatedCreation {
    pub name: String,
    pub player: String,
    pub stats: StatAssignment,
    pub background: Background,
    pub instinct: Instinct,
    pub appearance: [AppearanceOption; APPEARANCE_SLOTS],
    pub place_of_origin: PlaceOfOrigin,
    /// Selected move templates in submission order
    pub moves: Vec<MoveTemplate>,
    pub possessions: Vec<SpecialPossession>,
    pub detail_answers: Vec<String>,
    pub extra_choices: BTreeMap<String, String>,
}

impl ValidatedCreation {
    /// Value of an extra single-choice field; validation guarantees presence
    pub fn extra_choice(&self, field: &str) -> String {
        self.extra_choices.get(field).cloned().unwrap_or_default()
    }
}

/// Check a full submission against the class rules and catalog
pub fn validate(
    rules: &ClassRules,
    catalog: &ClassCatalog,
    choices: &CreationChoices,
) -> Result<ValidatedCreation, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if choices.name.trim().is_empty() {
        errors.add_field("name", REQUIRED_FIELD);
    }
    if choices.player.trim().is_empty() {
        errors.add_field("player", REQUIRED_FIELD);
    }
    for (key, value) in choices.stats.entries() {
        if !(STAT_MIN..=STAT_MAX).contains(&value) {
            errors.add_field(
                key.field_name(),
                format!("Value must be between {STAT_MIN} and {STAT_MAX}."),
            );
        }
    }

    // Single choices resolve against the class catalog; anything outside it
    // (wrong class, wrong slot, hidden template) is an invalid choice
    let background = resolve_choice(&mut errors, "background", choices.background_id, |id| {
        catalog.background(id)
    });
    let instinct = resolve_choice(&mut errors, "instinct", choices.instinct_id, |id| {
        catalog.instinct(id)
    });
    let appearance: [Option<AppearanceOption>; APPEARANCE_SLOTS] = std::array::from_fn(|slot| {
        resolve_choice(
            &mut errors,
            &appearance_field(slot),
            choices.appearance_ids[slot],
            |id| catalog.appearance_option(slot, id),
        )
    });
    let place_of_origin = resolve_choice(
        &mut errors,
        "place_of_origin",
        choices.place_of_origin_id,
        |id| catalog.place_of_origin(id),
    );

    let moves = resolve_multi(&mut errors, "moves", &choices.move_ids, |id| {
        catalog.move_template(id)
    });
    let possessions = resolve_multi(
        &mut errors,
        "special_possessions",
        &choices.special_possession_ids,
        |id| catalog.special_possession(id),
    );

    for extra in rules.extra_choices {
        match choices.extra_choices.get(extra.field) {
            None => errors.add_field(extra.field, REQUIRED_FIELD),
            Some(value) if value.trim().is_empty() => errors.add_field(extra.field, REQUIRED_FIELD),
            Some(value) if !extra.options.contains(&value.as_str()) => {
                errors.add_field(extra.field, INVALID_CHOICE)
            }
            Some(_) => {}
        }
    }

    if let Some(section) = &rules.detail_section {
        if choices.detail_answers.len() > section.questions.len() {
            errors.add_field(
                section.field,
                format!("Provide at most {} answers.", section.questions.len()),
            );
        }
    }

    // Cross-field rules, evaluated in a fixed category order so the error
    // list reads the same way every time
    if !choices.stats.matches_array(&rules.stat_array) {
        errors.add(format!(
            "Stats must be the array {} in some order. You assigned {}.",
            rules.stat_array,
            choices.stats.describe(),
        ));
    }

    let selected_moves: HashSet<&str> = moves.iter().map(|m| m.name.as_str()).collect();

    for mv in &moves {
        if let Some(required) = &mv.requirement.required_move {
            if !selected_moves.contains(required.as_str()) {
                errors.add(format!("{} requires the {} move.", mv.name, required));
            }
        }
    }

    for name in rules.mandatory_moves {
        if !selected_moves.contains(name) {
            errors.add(format!("{name} is a required starting move."));
        }
    }

    if let Some(bg) = &background {
        for (background_name, move_name) in rules.background_required_moves {
            if bg.name == *background_name && !selected_moves.contains(move_name) {
                errors.add(format!(
                    "{move_name} is a required move for the {background_name} background."
                ));
            }
        }
    }

    for group in rules.either_or_moves {
        if !group.iter().any(|name| selected_moves.contains(name)) {
            errors.add(format!("{} move is required.", group.join(" or ")));
        }
    }

    if let Some(section) = &rules.detail_section {
        let answered = choices
            .detail_answers
            .iter()
            .filter(|answer| !answer.trim().is_empty())
            .count();
        if answered < section.min_answers {
            errors.add(format!(
                "You have answered {answered} questions. \
                 Please answer at least {} questions about the {}.",
                section.min_answers, section.label,
            ));
        }
    }

    let selected_possessions: HashSet<&str> =
        possessions.iter().map(|p| p.name.as_str()).collect();
    for name in rules.mandatory_possessions {
        if !selected_possessions.contains(name) {
            errors.add(format!("{name} is a required starting special possession."));
        }
    }

    // Every resolver above recorded an error for each None it returned, so a
    // failed assembly always carries errors
    let assembled = (|| {
        let [first, second, third, fourth] = appearance;
        Some(ValidatedCreation {
            name: choices.name.trim().to_string(),
            player: choices.player.trim().to_string(),
            stats: choices.stats,
            background: background?,
            instinct: instinct?,
            appearance: [first?, second?, third?, fourth?],
            place_of_origin: place_of_origin?,
            moves,
            possessions,
            detail_answers: choices.detail_answers.clone(),
            extra_choices: choices.extra_choices.clone(),
        })
    })();

    match assembled {
        Some(valid) if errors.is_empty() => Ok(valid),
        _ => Err(errors),
    }
}

/// Submission/error field key for an appearance slot ("appearance1"..)
pub fn appearance_field(slot: usize) -> String {
    format!("appearance{}", slot + 1)
}

fn resolve_choice<'c, I, T: Clone + 'c>(
    errors: &mut ValidationErrors,
    field: &str,
    selected: Option<I>,
    lookup: impl Fn(I) -> Option<&'c T>,
) -> Option<T> {
    match selected {
        None => {
            errors.add_field(field, REQUIRED_FIELD);
            None
        }
        Some(id) => match lookup(id) {
            Some(template) => Some(template.clone()),
            None => {
                errors.add_field(field, INVALID_CHOICE);
                None
            }
        },
    }
}

fn resolve_multi<'c, I: Copy + Eq + Hash, T: Clone + 'c>(
    errors: &mut ValidationErrors,
    field: &str,
    selected: &[I],
    lookup: impl Fn(I) -> Option<&'c T>,
) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();
    for id in selected {
        if !seen.insert(*id) {
            errors.add_field(field, DUPLICATE_CHOICE);
            continue;
        }
        match lookup(*id) {
            Some(template) => resolved.push(template.clone()),
            None => errors.add_field(field, INVALID_CHOICE),
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::class_rules::class_rules;
    use crate::domain::value_objects::{ClassKind, StatKey};

    fn create_test_catalog(
        class: ClassKind,
        backgrounds: Vec<Background>,
        moves: Vec<MoveTemplate>,
        possessions: Vec<SpecialPossession>,
    ) -> ClassCatalog {
        ClassCatalog::assemble(
            class_rules(class),
            backgrounds,
            vec![Instinct::new(class, "To endure")],
            (0..APPEARANCE_SLOTS)
                .map(|slot| AppearanceOption::new(class, slot, format!("look {slot}")))
                .collect(),
            vec![PlaceOfOrigin::new(class, "Stonetop")],
            moves,
            possessions,
        )
    }

    fn fox_catalog() -> ClassCatalog {
        let class = ClassKind::Fox;
        create_test_catalog(
            class,
            vec![
                Background::new(class, "THE NATURAL"),
                Background::new(class, "A LIFE OF CRIME"),
            ],
            vec![
                MoveTemplate::new(class, "ALL IN THE WRIST"),
                MoveTemplate::new(class, "DANGER SENSE"),
                MoveTemplate::new(class, "AMBUSH"),
                MoveTemplate::new(class, "SKILL AT ARMS"),
                MoveTemplate::new(class, "LIGHT FINGERS").requires_move("ALL IN THE WRIST"),
            ],
            vec![SpecialPossession::new(class, "Burglary kit")],
        )
    }

    fn legal_stats() -> StatAssignment {
        StatAssignment {
            strength: -1,
            dexterity: 2,
            intelligence: 1,
            wisdom: 1,
            constitution: 0,
            charisma: 0,
        }
    }

    fn background_id(catalog: &ClassCatalog, name: &str) -> BackgroundId {
        catalog
            .backgrounds
            .iter()
            .find(|b| b.name == name)
            .unwrap()
            .id
    }

    fn move_id(catalog: &ClassCatalog, name: &str) -> MoveId {
        catalog.moves.iter().find(|m| m.name == name).unwrap().id
    }

    fn base_choices(catalog: &ClassCatalog, background: &str) -> CreationChoices {
        CreationChoices {
            name: "Gwendyl".into(),
            player: "robin".into(),
            stats: legal_stats(),
            background_id: Some(background_id(catalog, background)),
            instinct_id: Some(catalog.instincts[0].id),
            appearance_ids: std::array::from_fn(|slot| {
                catalog.appearance_slot(slot).next().map(|o| o.id)
            }),
            place_of_origin_id: Some(catalog.places_of_origin[0].id),
            move_ids: Vec::new(),
            special_possession_ids: Vec::new(),
            detail_answers: Vec::new(),
            extra_choices: BTreeMap::new(),
        }
    }

    #[test]
    fn test_valid_fox_submission_resolves_templates() {
        let catalog = fox_catalog();
        let mut choices = base_choices(&catalog, "THE NATURAL");
        choices.move_ids = vec![move_id(&catalog, "AMBUSH"), move_id(&catalog, "DANGER SENSE")];

        let valid = validate(class_rules(ClassKind::Fox), &catalog, &choices).unwrap();

        assert_eq!(valid.background.name, "THE NATURAL");
        let names: Vec<&str> = valid.moves.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["AMBUSH", "DANGER SENSE"]);
    }

    #[test]
    fn test_empty_submission_reports_every_missing_field() {
        let catalog = fox_catalog();
        let choices = CreationChoices {
            stats: legal_stats(),
            ..CreationChoices::default()
        };

        let errors = validate(class_rules(ClassKind::Fox), &catalog, &choices).unwrap_err();

        for field in [
            "name",
            "player",
            "background",
            "instinct",
            "appearance1",
            "appearance2",
            "appearance3",
            "appearance4",
            "place_of_origin",
        ] {
            assert_eq!(
                errors.field_errors.get(field),
                Some(&vec![REQUIRED_FIELD.to_string()]),
                "missing required error for {field}"
            );
        }
    }

    #[test]
    fn test_stat_out_of_range_is_a_field_error() {
        let catalog = fox_catalog();
        let mut choices = base_choices(&catalog, "THE NATURAL");
        choices.move_ids = vec![move_id(&catalog, "AMBUSH")];
        choices.stats.strength = 4;
        choices.stats.dexterity = -2;

        let errors = validate(class_rules(ClassKind::Fox), &catalog, &choices).unwrap_err();

        assert_eq!(
            errors.field_errors.get("strength"),
            Some(&vec!["Value must be between -1 and 3.".to_string()])
        );
        assert!(errors.field_errors.contains_key("dexterity"));
    }

    #[test]
    fn test_stat_shape_violation_reports_expected_and_actual() {
        let catalog = fox_catalog();
        let mut choices = base_choices(&catalog, "THE NATURAL");
        choices.move_ids = vec![move_id(&catalog, "AMBUSH")];
        choices.stats = StatAssignment {
            strength: 2,
            dexterity: 2,
            intelligence: 1,
            wisdom: 0,
            constitution: 0,
            charisma: -1,
        };

        let errors = validate(class_rules(ClassKind::Fox), &catalog, &choices).unwrap_err();

        assert_eq!(
            errors.non_field_errors,
            vec![
                "Stats must be the array +2, +1, +1, 0, 0, -1 in some order. \
                 You assigned STR +2, DEX +2, INT +1, WIS 0, CON 0, CHA -1."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_stat_array_is_order_independent() {
        // legal_stats puts the +2 on DEX and the -1 on STR
        let catalog = fox_catalog();
        let mut choices = base_choices(&catalog, "THE NATURAL");
        choices.move_ids = vec![move_id(&catalog, "SKILL AT ARMS")];

        assert!(validate(class_rules(ClassKind::Fox), &catalog, &choices).is_ok());
    }

    #[test]
    fn test_move_prerequisite_must_be_selected() {
        let catalog = fox_catalog();
        let mut choices = base_choices(&catalog, "THE NATURAL");
        choices.move_ids = vec![move_id(&catalog, "AMBUSH"), move_id(&catalog, "LIGHT FINGERS")];

        let errors = validate(class_rules(ClassKind::Fox), &catalog, &choices).unwrap_err();
        assert_eq!(
            errors.non_field_errors,
            vec!["LIGHT FINGERS requires the ALL IN THE WRIST move.".to_string()]
        );

        choices.move_ids.push(move_id(&catalog, "ALL IN THE WRIST"));
        assert!(validate(class_rules(ClassKind::Fox), &catalog, &choices).is_ok());
    }

    #[test]
    fn test_fox_without_ambush_or_skill_at_arms() {
        let catalog = fox_catalog();
        let mut choices = base_choices(&catalog, "THE NATURAL");
        choices.move_ids = vec![
            move_id(&catalog, "ALL IN THE WRIST"),
            move_id(&catalog, "DANGER SENSE"),
        ];

        let errors = validate(class_rules(ClassKind::Fox), &catalog, &choices).unwrap_err();

        assert_eq!(
            errors.non_field_errors,
            vec!["AMBUSH or SKILL AT ARMS move is required.".to_string()]
        );
        assert!(errors.field_errors.is_empty());
    }

    #[test]
    fn test_each_missing_mandatory_move_is_named() {
        let class = ClassKind::Heavy;
        let catalog = create_test_catalog(
            class,
            vec![Background::new(class, "SHERIFF")],
            vec![
                MoveTemplate::new(class, "DANGEROUS"),
                MoveTemplate::new(class, "HARD TO KILL"),
                MoveTemplate::new(class, "ARMORED"),
            ],
            vec![],
        );
        let mut choices = base_choices(&catalog, "SHERIFF");
        choices.move_ids = vec![move_id(&catalog, "ARMORED")];

        let errors = validate(class_rules(class), &catalog, &choices).unwrap_err();

        assert_eq!(
            errors.non_field_errors,
            vec![
                "DANGEROUS is a required starting move.".to_string(),
                "HARD TO KILL is a required starting move.".to_string(),
            ]
        );
    }

    fn marshal_catalog() -> ClassCatalog {
        let class = ClassKind::Marshal;
        create_test_catalog(
            class,
            vec![
                Background::new(class, "LUMINARY"),
                Background::new(class, "HARROWED"),
            ],
            vec![
                MoveTemplate::new(class, "LOGISTICS"),
                MoveTemplate::new(class, "WE HAPPY FEW"),
                MoveTemplate::new(class, "OPEN ORDER"),
            ],
            vec![],
        )
    }

    fn answered(count: usize) -> Vec<String> {
        (0..8)
            .map(|i| {
                if i < count {
                    format!("answer {i}")
                } else {
                    String::new()
                }
            })
            .collect()
    }

    #[test]
    fn test_luminary_background_requires_we_happy_few() {
        let catalog = marshal_catalog();
        let mut choices = base_choices(&catalog, "LUMINARY");
        choices.move_ids = vec![move_id(&catalog, "LOGISTICS")];
        choices.detail_answers = answered(3);

        let errors = validate(class_rules(ClassKind::Marshal), &catalog, &choices).unwrap_err();
        assert_eq!(
            errors.non_field_errors,
            vec!["WE HAPPY FEW is a required move for the LUMINARY background.".to_string()]
        );

        // Another background does not trigger the requirement
        let mut other = base_choices(&catalog, "HARROWED");
        other.move_ids = vec![move_id(&catalog, "LOGISTICS")];
        other.detail_answers = answered(3);
        assert!(validate(class_rules(ClassKind::Marshal), &catalog, &other).is_ok());
    }

    #[test]
    fn test_war_story_minimum_answer_count() {
        let catalog = marshal_catalog();
        let mut choices = base_choices(&catalog, "HARROWED");
        choices.move_ids = vec![move_id(&catalog, "LOGISTICS")];
        choices.detail_answers = answered(2);

        let errors = validate(class_rules(ClassKind::Marshal), &catalog, &choices).unwrap_err();

        assert_eq!(
            errors.non_field_errors,
            vec![
                "You have answered 2 questions. \
                 Please answer at least 3 questions about the war story."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_blank_answers_do_not_count() {
        let catalog = marshal_catalog();
        let mut choices = base_choices(&catalog, "HARROWED");
        choices.move_ids = vec![move_id(&catalog, "LOGISTICS")];
        choices.detail_answers = vec![
            "The siege of Marshedge".to_string(),
            "   ".to_string(),
            "I held the east gate".to_string(),
        ];

        let errors = validate(class_rules(ClassKind::Marshal), &catalog, &choices).unwrap_err();
        assert!(errors.non_field_errors[0].starts_with("You have answered 2 questions."));
    }

    #[test]
    fn test_mandatory_possession_is_enforced() {
        let class = ClassKind::Ranger;
        let catalog = create_test_catalog(
            class,
            vec![Background::new(class, "TRAPPER")],
            vec![
                MoveTemplate::new(class, "EXPERT TRACKER"),
                MoveTemplate::new(class, "EAGLE EYE"),
            ],
            vec![
                SpecialPossession::new(class, "Compound bow"),
                SpecialPossession::new(class, "Traveling gear"),
            ],
        );
        let mut choices = base_choices(&catalog, "TRAPPER");
        choices.move_ids = vec![move_id(&catalog, "EXPERT TRACKER")];
        choices.detail_answers = answered(3);
        choices.special_possession_ids = vec![catalog
            .special_possessions
            .iter()
            .find(|p| p.name == "Traveling gear")
            .unwrap()
            .id];

        let errors = validate(class_rules(class), &catalog, &choices).unwrap_err();
        assert_eq!(
            errors.non_field_errors,
            vec!["Compound bow is a required starting special possession.".to_string()]
        );

        choices.special_possession_ids.push(
            catalog
                .special_possessions
                .iter()
                .find(|p| p.name == "Compound bow")
                .unwrap()
                .id,
        );
        assert!(validate(class_rules(class), &catalog, &choices).is_ok());
    }

    #[test]
    fn test_duplicate_move_selection_is_a_field_error() {
        let catalog = fox_catalog();
        let mut choices = base_choices(&catalog, "THE NATURAL");
        let ambush = move_id(&catalog, "AMBUSH");
        choices.move_ids = vec![ambush, ambush];

        let errors = validate(class_rules(ClassKind::Fox), &catalog, &choices).unwrap_err();
        assert_eq!(
            errors.field_errors.get("moves"),
            Some(&vec![DUPLICATE_CHOICE.to_string()])
        );
    }

    #[test]
    fn test_selecting_a_hidden_automatic_move_is_rejected() {
        let class = ClassKind::Judge;
        let censure = MoveTemplate::new(class, "CENSURE");
        let censure_id = censure.id;
        let catalog = create_test_catalog(
            class,
            vec![Background::new(class, "LEGACY")],
            vec![censure, MoveTemplate::new(class, "TRUTH-TELLER")],
            vec![],
        );
        let mut choices = base_choices(&catalog, "LEGACY");
        choices.move_ids = vec![censure_id];

        let errors = validate(class_rules(class), &catalog, &choices).unwrap_err();
        assert_eq!(
            errors.field_errors.get("moves"),
            Some(&vec![INVALID_CHOICE.to_string()])
        );
    }

    #[test]
    fn test_choice_from_another_class_is_rejected() {
        let catalog = fox_catalog();
        let mut choices = base_choices(&catalog, "THE NATURAL");
        choices.move_ids = vec![move_id(&catalog, "AMBUSH")];
        choices.background_id = Some(BackgroundId::new());

        let errors = validate(class_rules(ClassKind::Fox), &catalog, &choices).unwrap_err();
        assert_eq!(
            errors.field_errors.get("background"),
            Some(&vec![INVALID_CHOICE.to_string()])
        );
    }

    #[test]
    fn test_blessed_extra_choices_are_validated() {
        let class = ClassKind::Blessed;
        let catalog = create_test_catalog(
            class,
            vec![Background::new(class, "INITIATE")],
            vec![
                MoveTemplate::new(class, "SPIRIT TONGUE"),
                MoveTemplate::new(class, "CALL THE SPIRITS"),
            ],
            vec![SpecialPossession::new(class, "Sacred pouch").with_uses(3)],
        );
        let mut choices = base_choices(&catalog, "INITIATE");
        choices.move_ids = vec![
            move_id(&catalog, "SPIRIT TONGUE"),
            move_id(&catalog, "CALL THE SPIRITS"),
        ];
        choices.special_possession_ids = vec![catalog.special_possessions[0].id];

        let errors = validate(class_rules(class), &catalog, &choices).unwrap_err();
        for field in [
            "sacred_pouch_origin",
            "sacred_pouch_material",
            "sacred_pouch_aesthetics",
        ] {
            assert_eq!(
                errors.field_errors.get(field),
                Some(&vec![REQUIRED_FIELD.to_string()]),
                "missing required error for {field}"
            );
        }

        choices
            .extra_choices
            .insert("sacred_pouch_origin".into(), "stolen from a dragon".into());
        choices
            .extra_choices
            .insert("sacred_pouch_material".into(), "supple doeskin".into());
        choices
            .extra_choices
            .insert("sacred_pouch_aesthetics".into(), "plain and travel-worn".into());
        let errors = validate(class_rules(class), &catalog, &choices).unwrap_err();
        assert_eq!(
            errors.field_errors.get("sacred_pouch_origin"),
            Some(&vec![INVALID_CHOICE.to_string()])
        );

        choices.extra_choices.insert(
            "sacred_pouch_origin".into(),
            "made by your own hands".into(),
        );
        assert!(validate(class_rules(class), &catalog, &choices).is_ok());
    }

    #[test]
    fn test_violations_accumulate_in_category_order() {
        let catalog = fox_catalog();
        let mut choices = base_choices(&catalog, "THE NATURAL");
        // Bad stat shape, a broken prerequisite, and no AMBUSH/SKILL AT ARMS
        choices.stats.charisma = 3;
        choices.move_ids = vec![move_id(&catalog, "LIGHT FINGERS")];

        let errors = validate(class_rules(ClassKind::Fox), &catalog, &choices).unwrap_err();

        assert_eq!(errors.non_field_errors.len(), 3);
        assert!(errors.non_field_errors[0].starts_with("Stats must be the array"));
        assert_eq!(
            errors.non_field_errors[1],
            "LIGHT FINGERS requires the ALL IN THE WRIST move."
        );
        assert_eq!(
            errors.non_field_errors[2],
            "AMBUSH or SKILL AT ARMS move is required."
        );
    }

    #[test]
    fn test_stat_field_entries_cover_all_six() {
        let stats = legal_stats();
        let keys: Vec<&str> = StatKey::ALL.iter().map(|k| k.field_name()).collect();
        assert_eq!(
            keys,
            vec![
                "strength",
                "dexterity",
                "intelligence",
                "wisdom",
                "constitution",
                "charisma"
            ]
        );
        assert_eq!(stats.get(StatKey::Dexterity), 2);
    }
}
