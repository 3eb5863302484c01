//! Instance materialization - Turn a validated submission into rows
//!
//! Selected templates become per-character instances in submission order;
//! the class's automatic grants are appended after them. The result is a
//! plain bundle of records for the persistence layer to write in one
//! transaction. An automatic-grant name with no matching template is a seed
//! fault, never a user error.

use std::fmt;

use thiserror::Error;

use crate::domain::entities::{
    Background, BackgroundInstance, Character, ClassPayload, MoveInstance, MoveTemplate,
    SacredPouch, SpecialPossession, SpecialPossessionInstance,
};
use crate::domain::rules::class_rules::ClassRules;
use crate::domain::rules::validation::ValidatedCreation;
use crate::domain::value_objects::{CampaignId, ClassKind};

/// A creation submission turned into records, ready to persist together
#[derive(Debug, Clone)]
pub struct MaterializedCharacter {
    pub character: Character,
    pub background: BackgroundInstance,
    pub moves: Vec<MoveInstance>,
    pub possessions: Vec<SpecialPossessionInstance>,
}

/// The rules table referenced a template the seeded catalog does not carry
#[derive(Debug, Clone, Error)]
#[error("{class} rules reference {kind} '{name}' but no such template is seeded")]
pub struct MissingTemplate {
    pub class: ClassKind,
    pub kind: TemplateKind,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Background,
    Move,
    SpecialPossession,
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TemplateKind::Background => "background",
            TemplateKind::Move => "move",
            TemplateKind::SpecialPossession => "special possession",
        };
        write!(f, "{label}")
    }
}

/// Build the character and all its instance records
///
/// `all_moves` / `all_possessions` are the full class template rows, hidden
/// automatic grants included.
pub fn materialize(
    campaign_id: CampaignId,
    rules: &ClassRules,
    valid: &ValidatedCreation,
    all_moves: &[MoveTemplate],
    all_possessions: &[SpecialPossession],
) -> Result<MaterializedCharacter, MissingTemplate> {
    let character = Character::new(
        campaign_id,
        valid.player.clone(),
        valid.name.clone(),
        rules.class_kind,
        valid.stats,
        valid.instinct.id,
        [
            valid.appearance[0].id,
            valid.appearance[1].id,
            valid.appearance[2].id,
            valid.appearance[3].id,
        ],
        valid.place_of_origin.id,
        build_payload(rules, valid),
    );

    let background = BackgroundInstance::from_template(character.id, &valid.background);

    // Player picks keep their submission order; automatic grants follow
    let mut moves = Vec::with_capacity(valid.moves.len() + rules.auto_moves.len());
    for template in &valid.moves {
        moves.push(MoveInstance::from_template(
            character.id,
            template,
            moves.len() as i32,
        ));
    }
    for name in rules.auto_moves {
        let template = find_move(rules.class_kind, all_moves, name)?;
        moves.push(MoveInstance::from_template(
            character.id,
            template,
            moves.len() as i32,
        ));
    }

    let mut possessions =
        Vec::with_capacity(valid.possessions.len() + rules.auto_possessions.len());
    for template in &valid.possessions {
        possessions.push(SpecialPossessionInstance::from_template(
            character.id,
            template,
            possessions.len() as i32,
        ));
    }
    for name in rules.auto_possessions {
        let template = find_possession(rules.class_kind, all_possessions, name)?;
        possessions.push(SpecialPossessionInstance::from_template(
            character.id,
            template,
            possessions.len() as i32,
        ));
    }

    Ok(MaterializedCharacter {
        character,
        background,
        moves,
        possessions,
    })
}

/// Verify every template name the rules reference exists in the seeded rows;
/// run once at startup so grant lookups cannot fail mid-creation
pub fn verify_rules_coverage(
    rules: &ClassRules,
    backgrounds: &[Background],
    moves: &[MoveTemplate],
    possessions: &[SpecialPossession],
) -> Result<(), MissingTemplate> {
    for name in rules.referenced_move_names() {
        find_move(rules.class_kind, moves, name)?;
    }
    for name in rules.referenced_possession_names() {
        find_possession(rules.class_kind, possessions, name)?;
    }
    for name in rules.referenced_background_names() {
        if !backgrounds.iter().any(|b| b.name == name) {
            return Err(MissingTemplate {
                class: rules.class_kind,
                kind: TemplateKind::Background,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn build_payload(rules: &ClassRules, valid: &ValidatedCreation) -> ClassPayload {
    match rules.class_kind {
        ClassKind::Blessed => ClassPayload::Blessed {
            sacred_pouch: SacredPouch {
                origin: valid.extra_choice("sacred_pouch_origin"),
                material: valid.extra_choice("sacred_pouch_material"),
                aesthetics: valid.extra_choice("sacred_pouch_aesthetics"),
            },
            initiates: Vec::new(),
        },
        ClassKind::Fox => ClassPayload::Fox {
            tall_tales: Vec::new(),
        },
        ClassKind::Heavy => ClassPayload::Heavy {},
        ClassKind::Judge => ClassPayload::Judge {},
        ClassKind::Lightbearer => ClassPayload::Lightbearer {
            invocations: Vec::new(),
        },
        ClassKind::Marshal => ClassPayload::Marshal {
            war_story: valid.detail_answers.clone(),
            crew: None,
        },
        ClassKind::Ranger => ClassPayload::Ranger {
            something_wicked: valid.detail_answers.clone(),
            companion: None,
        },
        ClassKind::Seeker => ClassPayload::Seeker {
            initial_arcana: Vec::new(),
        },
        ClassKind::WouldBeHero => ClassPayload::WouldBeHero {
            background_details: String::new(),
        },
    }
}

fn find_move<'a>(
    class: ClassKind,
    moves: &'a [MoveTemplate],
    name: &str,
) -> Result<&'a MoveTemplate, MissingTemplate> {
    moves.iter().find(|m| m.name == name).ok_or_else(|| MissingTemplate {
        class,
        kind: TemplateKind::Move,
        name: name.to_string(),
    })
}

fn find_possession<'a>(
    class: ClassKind,
    possessions: &'a [SpecialPossession],
    name: &str,
) -> Result<&'a SpecialPossession, MissingTemplate> {
    possessions
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| MissingTemplate {
            class,
            kind: TemplateKind::SpecialPossession,
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AppearanceOption, Instinct, PlaceOfOrigin, APPEARANCE_SLOTS};
    use crate::domain::rules::catalog::ClassCatalog;
    use crate::domain::rules::class_rules::class_rules;
    use crate::domain::rules::validation::{validate, CreationChoices};
    use crate::domain::value_objects::StatAssignment;

    fn judge_templates() -> (Vec<MoveTemplate>, Vec<SpecialPossession>) {
        let class = ClassKind::Judge;
        let moves = vec![
            MoveTemplate::new(class, "CENSURE"),
            MoveTemplate::new(class, "CHRONICLER OF STONETOP"),
            MoveTemplate::new(class, "TRUTH-TELLER"),
            MoveTemplate::new(class, "BINDING ARBITRATION").with_uses(2),
        ];
        let possessions = vec![
            SpecialPossession::new(class, "Scribe's tools"),
            SpecialPossession::new(class, "Writ of the Law"),
        ];
        (moves, possessions)
    }

    fn judge_catalog(moves: &[MoveTemplate], possessions: &[SpecialPossession]) -> ClassCatalog {
        let class = ClassKind::Judge;
        ClassCatalog::assemble(
            class_rules(class),
            vec![Background::new(class, "LEGACY").with_charges(3)],
            vec![Instinct::new(class, "To keep the peace")],
            (0..APPEARANCE_SLOTS)
                .map(|slot| AppearanceOption::new(class, slot, format!("look {slot}")))
                .collect(),
            vec![PlaceOfOrigin::new(class, "Stonetop")],
            moves.to_vec(),
            possessions.to_vec(),
        )
    }

    fn legal_stats() -> StatAssignment {
        StatAssignment {
            strength: 0,
            dexterity: 0,
            intelligence: 1,
            wisdom: 2,
            constitution: 1,
            charisma: -1,
        }
    }

    fn validated_judge() -> (ValidatedCreation, Vec<MoveTemplate>, Vec<SpecialPossession>) {
        let (moves, possessions) = judge_templates();
        let catalog = judge_catalog(&moves, &possessions);
        let choices = CreationChoices {
            name: "Rhianwen".into(),
            player: "ada".into(),
            stats: legal_stats(),
            background_id: Some(catalog.backgrounds[0].id),
            instinct_id: Some(catalog.instincts[0].id),
            appearance_ids: std::array::from_fn(|slot| {
                catalog.appearance_slot(slot).next().map(|o| o.id)
            }),
            place_of_origin_id: Some(catalog.places_of_origin[0].id),
            move_ids: vec![
                catalog
                    .moves
                    .iter()
                    .find(|m| m.name == "BINDING ARBITRATION")
                    .unwrap()
                    .id,
                catalog
                    .moves
                    .iter()
                    .find(|m| m.name == "TRUTH-TELLER")
                    .unwrap()
                    .id,
            ],
            special_possession_ids: vec![catalog
                .special_possessions
                .iter()
                .find(|p| p.name == "Writ of the Law")
                .unwrap()
                .id],
            ..CreationChoices::default()
        };
        let valid = validate(class_rules(ClassKind::Judge), &catalog, &choices).unwrap();
        (valid, moves, possessions)
    }

    #[test]
    fn test_player_selections_precede_automatic_grants() {
        let (valid, moves, possessions) = validated_judge();

        let materialized = materialize(
            CampaignId::new(),
            class_rules(ClassKind::Judge),
            &valid,
            &moves,
            &possessions,
        )
        .unwrap();

        let move_names: Vec<&str> = materialized
            .moves
            .iter()
            .map(|m| m.move_name.as_str())
            .collect();
        assert_eq!(
            move_names,
            vec![
                "BINDING ARBITRATION",
                "TRUTH-TELLER",
                "CENSURE",
                "CHRONICLER OF STONETOP",
            ]
        );
        let positions: Vec<i32> = materialized.moves.iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);

        let possession_names: Vec<&str> = materialized
            .possessions
            .iter()
            .map(|p| p.possession_name.as_str())
            .collect();
        assert_eq!(possession_names, vec!["Writ of the Law", "Scribe's tools"]);
    }

    #[test]
    fn test_instances_copy_tracked_totals() {
        let (valid, moves, possessions) = validated_judge();
        let materialized = materialize(
            CampaignId::new(),
            class_rules(ClassKind::Judge),
            &valid,
            &moves,
            &possessions,
        )
        .unwrap();

        let arbitration = &materialized.moves[0];
        assert_eq!(arbitration.uses, Some(0));
        assert_eq!(arbitration.total_uses, Some(2));

        let censure = &materialized.moves[2];
        assert_eq!(censure.uses, None);
        assert_eq!(censure.total_uses, None);
    }

    #[test]
    fn test_background_instance_created_once_with_charges() {
        let (valid, moves, possessions) = validated_judge();
        let materialized = materialize(
            CampaignId::new(),
            class_rules(ClassKind::Judge),
            &valid,
            &moves,
            &possessions,
        )
        .unwrap();

        assert_eq!(materialized.background.background_id, valid.background.id);
        assert_eq!(materialized.background.background_name, "LEGACY");
        assert_eq!(materialized.background.charges_used, Some(0));
        assert_eq!(materialized.background.total_charges, Some(3));
        assert_eq!(
            materialized.background.character_id,
            materialized.character.id
        );
    }

    #[test]
    fn test_missing_automatic_template_is_a_seed_fault() {
        let (valid, moves, possessions) = validated_judge();
        let without_censure: Vec<MoveTemplate> =
            moves.into_iter().filter(|m| m.name != "CENSURE").collect();

        let err = materialize(
            CampaignId::new(),
            class_rules(ClassKind::Judge),
            &valid,
            &without_censure,
            &possessions,
        )
        .unwrap_err();

        assert_eq!(err.kind, TemplateKind::Move);
        assert_eq!(err.name, "CENSURE");
        assert_eq!(err.class, ClassKind::Judge);
    }

    #[test]
    fn test_marshal_payload_carries_war_story() {
        let class = ClassKind::Marshal;
        let moves = vec![
            MoveTemplate::new(class, "LOGISTICS"),
            MoveTemplate::new(class, "WE HAPPY FEW"),
        ];
        let catalog = ClassCatalog::assemble(
            class_rules(class),
            vec![Background::new(class, "HARROWED")],
            vec![Instinct::new(class, "To hold the line")],
            (0..APPEARANCE_SLOTS)
                .map(|slot| AppearanceOption::new(class, slot, format!("look {slot}")))
                .collect(),
            vec![PlaceOfOrigin::new(class, "Marshedge")],
            moves.clone(),
            vec![],
        );
        let choices = CreationChoices {
            name: "Idris".into(),
            player: "sam".into(),
            stats: legal_stats(),
            background_id: Some(catalog.backgrounds[0].id),
            instinct_id: Some(catalog.instincts[0].id),
            appearance_ids: std::array::from_fn(|slot| {
                catalog.appearance_slot(slot).next().map(|o| o.id)
            }),
            place_of_origin_id: Some(catalog.places_of_origin[0].id),
            move_ids: vec![catalog
                .moves
                .iter()
                .find(|m| m.name == "LOGISTICS")
                .unwrap()
                .id],
            detail_answers: vec![
                "The Lygos campaigns".into(),
                "A sergeant of the line".into(),
                "I brought my people home".into(),
            ],
            ..CreationChoices::default()
        };
        let valid = validate(class_rules(class), &catalog, &choices).unwrap();

        let materialized =
            materialize(CampaignId::new(), class_rules(class), &valid, &moves, &[]).unwrap();

        match &materialized.character.payload {
            ClassPayload::Marshal { war_story, crew } => {
                assert_eq!(war_story.len(), 3);
                assert_eq!(war_story[0], "The Lygos campaigns");
                assert!(crew.is_none());
            }
            other => panic!("expected Marshal payload, got {other:?}"),
        }
    }

    #[test]
    fn test_rules_coverage_check_catches_missing_names() {
        let (moves, possessions) = judge_templates();
        let backgrounds = vec![Background::new(ClassKind::Judge, "LEGACY")];

        assert!(verify_rules_coverage(
            class_rules(ClassKind::Judge),
            &backgrounds,
            &moves,
            &possessions
        )
        .is_ok());

        let missing_tools: Vec<SpecialPossession> = possessions
            .into_iter()
            .filter(|p| p.name != "Scribe's tools")
            .collect();
        let err = verify_rules_coverage(
            class_rules(ClassKind::Judge),
            &backgrounds,
            &moves,
            &missing_tools,
        )
        .unwrap_err();
        assert_eq!(err.kind, TemplateKind::SpecialPossession);
        assert_eq!(err.name, "Scribe's tools");
    }
}
