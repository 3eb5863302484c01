//! Stonetop playbook seed
//!
//! Inserts the nine class playbooks on first startup. On every startup the
//! stored catalog is re-verified against the class rules, so a character
//! creation can never fail a grant lookup at materialization time.

use anyhow::{Context, Result};

use crate::domain::entities::{
    AppearanceOption, Background, Instinct, MoveTemplate, PlaceOfOrigin, SpecialPossession,
    APPEARANCE_SLOTS,
};
use crate::domain::rules::{class_rules, verify_rules_coverage};
use crate::domain::value_objects::ClassKind;

use super::SqliteRepository;

/// Candidate rows for one class
struct ClassSeed {
    backgrounds: Vec<Background>,
    instincts: Vec<Instinct>,
    appearance_options: Vec<AppearanceOption>,
    places_of_origin: Vec<PlaceOfOrigin>,
    moves: Vec<MoveTemplate>,
    special_possessions: Vec<SpecialPossession>,
}

/// Seed the catalog when empty, then verify every rules table is covered
pub async fn seed_catalog(repository: &SqliteRepository) -> Result<()> {
    let catalog = repository.catalog();

    if catalog.is_empty().await? {
        for seed in class_seeds() {
            for background in &seed.backgrounds {
                catalog.insert_background(background).await?;
            }
            for instinct in &seed.instincts {
                catalog.insert_instinct(instinct).await?;
            }
            for option in &seed.appearance_options {
                catalog.insert_appearance_option(option).await?;
            }
            for origin in &seed.places_of_origin {
                catalog.insert_place_of_origin(origin).await?;
            }
            for template in &seed.moves {
                catalog.insert_move(template).await?;
            }
            for possession in &seed.special_possessions {
                catalog.insert_special_possession(possession).await?;
            }
        }
        tracing::info!("Seeded the Stonetop playbook catalog");
    }

    verify_catalog(repository).await
}

/// Every template name the rules reference must exist, and every class must
/// offer at least one candidate per choice
async fn verify_catalog(repository: &SqliteRepository) -> Result<()> {
    let catalog = repository.catalog();

    for class_kind in ClassKind::ALL {
        let rules = class_rules(class_kind);
        let backgrounds = catalog.backgrounds(class_kind).await?;
        let moves = catalog.moves(class_kind).await?;
        let possessions = catalog.special_possessions(class_kind).await?;

        verify_rules_coverage(rules, &backgrounds, &moves, &possessions).with_context(|| {
            format!(
                "Catalog does not cover the rules for {}",
                class_kind.display_name()
            )
        })?;

        if !catalog.class_catalog(rules).await?.is_complete() {
            anyhow::bail!(
                "Catalog for {} is missing candidate rows",
                class_kind.display_name()
            );
        }
    }

    tracing::debug!("Verified playbook catalog coverage for all classes");
    Ok(())
}

fn class_seeds() -> Vec<ClassSeed> {
    vec![
        blessed_seed(),
        fox_seed(),
        heavy_seed(),
        judge_seed(),
        lightbearer_seed(),
        marshal_seed(),
        ranger_seed(),
        seeker_seed(),
        would_be_hero_seed(),
    ]
}

fn instincts(class_kind: ClassKind, entries: &[(&str, &str)]) -> Vec<Instinct> {
    entries
        .iter()
        .map(|(name, description)| {
            Instinct::new(class_kind, *name).with_description(*description)
        })
        .collect()
}

fn appearance_options(
    class_kind: ClassKind,
    options: [[&str; 2]; APPEARANCE_SLOTS],
) -> Vec<AppearanceOption> {
    options
        .iter()
        .enumerate()
        .flat_map(|(slot, texts)| {
            texts
                .iter()
                .map(move |text| AppearanceOption::new(class_kind, slot, *text))
        })
        .collect()
}

fn places_of_origin(class_kind: ClassKind, entries: &[(&str, &str)]) -> Vec<PlaceOfOrigin> {
    entries
        .iter()
        .map(|(name, description)| {
            PlaceOfOrigin::new(class_kind, *name).with_description(*description)
        })
        .collect()
}

const STONETOP: (&str, &str) = ("Stonetop", "The village itself, under the old standing stones");
const MARSHEDGE: (&str, &str) = ("Marshedge", "The fen-side trade town east along the Highway");
const GORDINS_DELVE: (&str, &str) = ("Gordin's Delve", "The rough mining town in the foothills");
const BARRIER_PASS: (&str, &str) = ("Barrier Pass", "The cold garrison route over the mountains");
const THE_STEPLANDS: (&str, &str) = ("The Steplands", "The open Hillfolk country south of town");
const LYGOS: (&str, &str) = ("Lygos", "The distant southern city on the Azure Sea");

fn blessed_seed() -> ClassSeed {
    let class = ClassKind::Blessed;
    ClassSeed {
        backgrounds: vec![
            Background::new(class, "INITIATE")
                .with_description("Trained among Danu's initiates; they still answer your call"),
            Background::new(class, "RAISED BY WOLVES")
                .with_description("The Wild took you in before the village ever did"),
            Background::new(class, "VESSEL")
                .with_description("Danu works through your body, and it costs you")
                .with_charges(3),
        ],
        instincts: instincts(
            class,
            &[
                ("DEVOTION", "To put the Mother's work before your own"),
                ("HARMONY", "To mend what is out of balance"),
                ("DREAD", "To heed the omens no one else will"),
            ],
        ),
        appearance_options: appearance_options(
            class,
            [
                ["serene bearing", "wild bearing"],
                ["deep knowing eyes", "storm-gray eyes"],
                ["long loose hair", "braided hair hung with beads"],
                ["woven charms", "painted sigils"],
            ],
        ),
        places_of_origin: places_of_origin(class, &[STONETOP, MARSHEDGE, THE_STEPLANDS]),
        moves: vec![
            MoveTemplate::new(class, "SPIRIT TONGUE")
                .with_description("You hear and address the spirits of flame, stone, and stream"),
            MoveTemplate::new(class, "CALL THE SPIRITS")
                .with_description("Perform a rite to rouse the spirits of the land to action"),
            MoveTemplate::new(class, "BORROW POWER")
                .with_description("Let Danu pour through the vessel; keep what you can hold"),
            MoveTemplate::new(class, "AMULETS & TALISMANS")
                .with_description("Craft small wards against spirits and ill fortune")
                .with_charges(3),
            MoveTemplate::new(class, "DANU'S GRACE")
                .with_description("The Mother shields those who keep her ways"),
            MoveTemplate::new(class, "TRACKLESS STEP")
                .with_description("The Wild parts for you and closes behind you"),
            MoveTemplate::new(class, "WIDE WANDERER")
                .with_description("You have walked far crinkles of the world and remember them"),
        ],
        special_possessions: vec![
            SpecialPossession::new(class, "Sacred pouch")
                .with_description("Herbs, ash, and tokens for the rites")
                .with_uses(3),
            SpecialPossession::new(class, "Healer's kit")
                .with_description("Salves and stitched linen for battlefield mending")
                .with_uses(4),
            SpecialPossession::new(class, "Ritual vestments")
                .with_description("Garb that marks you as Danu's own at gatherings"),
            SpecialPossession::new(class, "Patient donkey")
                .with_description("Sure-footed, placid, and unbothered by spirits"),
        ],
    }
}

fn fox_seed() -> ClassSeed {
    let class = ClassKind::Fox;
    ClassSeed {
        backgrounds: vec![
            Background::new(class, "THE NATURAL")
                .with_description("Nobody taught you; you were simply always this quick"),
            Background::new(class, "A LIFE OF CRIME")
                .with_description("You ran with a crew in Lygos and left owing people"),
            Background::new(class, "THE SOLDIER")
                .with_description("You scouted and skirmished for a southern company"),
        ],
        instincts: instincts(
            class,
            &[
                ("CURIOSITY", "To poke at what should be left alone"),
                ("MISCHIEF", "To tweak the nose of authority"),
                ("AVARICE", "To pocket what is shiny and unattended"),
            ],
        ),
        appearance_options: appearance_options(
            class,
            [
                ["restless bearing", "easy bearing"],
                ["laughing eyes", "darting eyes"],
                ["crooked smile", "quick bright smile"],
                ["patched traveling garb", "somebody else's fine garb"],
            ],
        ),
        places_of_origin: places_of_origin(class, &[STONETOP, GORDINS_DELVE, LYGOS]),
        moves: vec![
            MoveTemplate::new(class, "AMBUSH")
                .with_description("Strike from hiding with sudden, decisive violence"),
            MoveTemplate::new(class, "SKILL AT ARMS")
                .with_description("Trained, practical bladework that keeps you alive"),
            MoveTemplate::new(class, "ALL IN THE WRIST")
                .with_description("Knives, cards, and coins go where you mean them to"),
            MoveTemplate::new(class, "LIGHT FINGERS")
                .with_description("What you brush against tends to come away with you")
                .requires_move("ALL IN THE WRIST"),
            MoveTemplate::new(class, "DANGER SENSE")
                .with_description("A prickle at the neck warns you a half-beat early"),
            MoveTemplate::new(class, "CATLIKE")
                .with_description("Walls, rooftops, and window ledges are all roads to you"),
        ],
        special_possessions: vec![
            SpecialPossession::new(class, "Burglary kit")
                .with_description("Picks, wax, a pry bar, and a muffled lantern")
                .with_uses(3),
            SpecialPossession::new(class, "Disguise kit")
                .with_description("Paints, padding, and a few well-worn faces")
                .with_uses(3),
            SpecialPossession::new(class, "Lucky charm")
                .with_description("It has not failed you yet, which proves it works"),
            SpecialPossession::new(class, "Throwing knives")
                .with_description("Balanced steel for the space between you and trouble"),
        ],
    }
}

fn heavy_seed() -> ClassSeed {
    let class = ClassKind::Heavy;
    ClassSeed {
        backgrounds: vec![
            Background::new(class, "SHERIFF")
                .with_description("You keep what passes for the peace in Stonetop"),
            Background::new(class, "BLOODLETTER")
                .with_description("Violence comes easily; the quiet after it does not"),
            Background::new(class, "STORIED VETERAN")
                .with_description("Songs about you reached the village before you did"),
        ],
        instincts: instincts(
            class,
            &[
                ("WRATH", "To answer harm with greater harm"),
                ("VIGILANCE", "To stand between the village and the dark"),
                ("PRIDE", "To never be seen to falter"),
            ],
        ),
        appearance_options: appearance_options(
            class,
            [
                ["looming bearing", "stolid bearing"],
                ["hard flat eyes", "tired eyes"],
                ["old knife scars", "burn-mottled scars"],
                ["battered mail", "heavy furs"],
            ],
        ),
        places_of_origin: places_of_origin(class, &[STONETOP, GORDINS_DELVE, BARRIER_PASS]),
        moves: vec![
            MoveTemplate::new(class, "DANGEROUS")
                .with_description("Everyone in reach knows exactly what you could do"),
            MoveTemplate::new(class, "HARD TO KILL")
                .with_description("You have been left for dead before; it did not take"),
            MoveTemplate::new(class, "ARMORED")
                .with_description("You wear iron like other people wear wool"),
            MoveTemplate::new(class, "ON THE WARPATH")
                .with_description("Once loosed, you do not stop until it is finished"),
            MoveTemplate::new(class, "SEEN IT ALL")
                .with_description("Horror is just another Tuesday; you keep your head"),
            MoveTemplate::new(class, "UNSTOPPABLE")
                .with_description("Doors, lines of spears, and bad odds part before you"),
        ],
        special_possessions: vec![
            SpecialPossession::new(class, "Distinctive weapon")
                .with_description("Named steel with a history the village retells"),
            SpecialPossession::new(class, "Tower shield")
                .with_description("A wall of oak and hide that others shelter behind"),
            SpecialPossession::new(class, "Trophies of war")
                .with_description("Grim keepsakes that buy respect in rough company"),
        ],
    }
}

fn judge_seed() -> ClassSeed {
    let class = ClassKind::Judge;
    ClassSeed {
        backgrounds: vec![
            Background::new(class, "LEGACY")
                .with_description("The Chronicle has passed through your family for generations"),
            Background::new(class, "PENITENT")
                .with_description("You took up the Lens to atone for what you did"),
            Background::new(class, "PROPHET")
                .with_description("Aratis speaks to you more directly than is comfortable"),
        ],
        instincts: instincts(
            class,
            &[
                ("RIGHTEOUSNESS", "To hold everyone, including yourself, to the Law"),
                ("DOUBT", "To test every claim before trusting it"),
            ],
        ),
        appearance_options: appearance_options(
            class,
            [
                ["upright bearing", "weary bearing"],
                ["piercing eyes", "searching eyes"],
                ["close-cropped hair", "iron-gray hair"],
                ["plain sturdy robes", "travel-stained robes"],
            ],
        ),
        places_of_origin: places_of_origin(class, &[STONETOP, MARSHEDGE, BARRIER_PASS]),
        moves: vec![
            MoveTemplate::new(class, "CENSURE")
                .with_description("Aratis lends weight to your judgment against the guilty"),
            MoveTemplate::new(class, "CHRONICLER OF STONETOP")
                .with_description("You keep the Chronicle and can search its generations"),
            MoveTemplate::new(class, "BINDING ARBITRATION")
                .with_description("Both parties will accept your ruling, one way or another"),
            MoveTemplate::new(class, "TRUTH-TELLER")
                .with_description("Lies curdle audibly in your presence"),
            MoveTemplate::new(class, "ARMOR OF FAITH")
                .with_description("Certainty turns aside blows that should have landed"),
            MoveTemplate::new(class, "WORDS OF THE PROPHETS")
                .with_description("Recall the precedent or parable the moment demands"),
            MoveTemplate::new(class, "ARBITER")
                .with_description("Preside over disputes beyond Stonetop's walls")
                .with_min_level(2),
        ],
        special_possessions: vec![
            SpecialPossession::new(class, "Scribe's tools")
                .with_description("Ink, vellum, and the patience to use them properly"),
            SpecialPossession::new(class, "Writ of the Law")
                .with_description("A copied digest of Aratis's judgments, much thumbed"),
            SpecialPossession::new(class, "Aldermen's seal")
                .with_description("Stamped lead that opens doors in Marshedge"),
            SpecialPossession::new(class, "Censer and tapers")
                .with_description("For oaths sworn properly, with smoke rising")
                .with_uses(3),
        ],
    }
}

fn lightbearer_seed() -> ClassSeed {
    let class = ClassKind::Lightbearer;
    ClassSeed {
        backgrounds: vec![
            Background::new(class, "AURANT")
                .with_description("Ordained in the southern temples of Helior"),
            Background::new(class, "ITINERANT PRIEST")
                .with_description("You carry the flame from village to village"),
            Background::new(class, "FIRST SPARK")
                .with_description("The Sun God chose you without asking any clergy"),
        ],
        instincts: instincts(
            class,
            &[
                ("ZEAL", "To burn brighter than the dark requires"),
                ("HOPE", "To kindle courage where it has guttered out"),
            ],
        ),
        appearance_options: appearance_options(
            class,
            [
                ["radiant bearing", "humble bearing"],
                ["bright unblinking eyes", "sun-squint eyes"],
                ["shaved head", "crown of golden hair"],
                ["sun-marked vestments", "ash-gray traveling robes"],
            ],
        ),
        places_of_origin: places_of_origin(class, &[STONETOP, MARSHEDGE, LYGOS]),
        moves: vec![
            MoveTemplate::new(class, "CONSECRATED FLAME")
                .with_description("Fire you bless burns what the dark sends against you"),
            MoveTemplate::new(class, "INVOKE THE SUN GOD")
                .with_description("Call on Helior for light, warmth, and revelation"),
            MoveTemplate::new(class, "LUMINOUS SHIELD")
                .with_description("A veil of daylight stands between your people and harm"),
            MoveTemplate::new(class, "PURIFYING FLAME")
                .with_description("Corruption and contagion wither in your fire"),
            MoveTemplate::new(class, "LIGHT OF DAY")
                .with_description("Make noon where you stand, whatever the hour"),
        ],
        special_possessions: vec![
            SpecialPossession::new(class, "Brazier of the dawn")
                .with_description("Consecrated iron that holds an ember overnight"),
            SpecialPossession::new(class, "Blessed lantern")
                .with_description("Its flame does not gutter in wind or wicked air"),
            SpecialPossession::new(class, "Vial of sun-oil")
                .with_description("Pressed and blessed at midsummer; burns fierce and clean")
                .with_uses(3),
        ],
    }
}

fn marshal_seed() -> ClassSeed {
    let class = ClassKind::Marshal;
    ClassSeed {
        backgrounds: vec![
            Background::new(class, "LUMINARY")
                .with_description("People follow you because you make them believe"),
            Background::new(class, "PRODIGY")
                .with_description("You read a battlefield the way scribes read a page"),
            Background::new(class, "SURVIVOR")
                .with_description("You led the remnant home when no one else could"),
        ],
        instincts: instincts(
            class,
            &[
                ("DUTY", "To spend yourself before you spend your people"),
                ("AMBITION", "To build something the Maker would notice"),
            ],
        ),
        appearance_options: appearance_options(
            class,
            [
                ["commanding bearing", "watchful bearing"],
                ["steady eyes", "appraising eyes"],
                ["lash scars", "arrow-pucker scars"],
                ["polished harness", "campaign-worn leathers"],
            ],
        ),
        places_of_origin: places_of_origin(class, &[STONETOP, BARRIER_PASS, MARSHEDGE]),
        moves: vec![
            MoveTemplate::new(class, "LOGISTICS")
                .with_description("Count spears, sacks, and days; know what will run out first"),
            MoveTemplate::new(class, "WE HAPPY FEW")
                .with_description("Your chosen crew fights far beyond its numbers"),
            MoveTemplate::new(class, "DRILL INSTRUCTOR")
                .with_description("Turn farmhands into something that holds a line"),
            MoveTemplate::new(class, "HOLD THE LINE")
                .with_description("Where you plant your standard, the line does not break"),
            MoveTemplate::new(class, "EYES EVERYWHERE")
                .with_description("Scouts, gossips, and sentries all report to you"),
        ],
        special_possessions: vec![
            SpecialPossession::new(class, "Signal horn")
                .with_description("One note rallies; two notes scatter and regroup"),
            SpecialPossession::new(class, "Campaign maps")
                .with_description("Hand-drawn country from the Delve to the Pass"),
            SpecialPossession::new(class, "Old standard")
                .with_description("A faded banner that still straightens backs"),
        ],
    }
}

fn ranger_seed() -> ClassSeed {
    let class = ClassKind::Ranger;
    ClassSeed {
        backgrounds: vec![
            Background::new(class, "BEAST-BONDED")
                .with_description("An animal of the Wild shares your fire and your hunts"),
            Background::new(class, "FAR WANDERER")
                .with_description("You have ranged further than any map in Stonetop"),
            Background::new(class, "TRAPPER")
                .with_description("You make your living from snares, pelts, and patience"),
        ],
        instincts: instincts(
            class,
            &[
                ("WANDERLUST", "To see what is over the next ridge"),
                ("WARINESS", "To trust the Wild's signs over men's words"),
            ],
        ),
        appearance_options: appearance_options(
            class,
            [
                ["quiet bearing", "coiled bearing"],
                ["far-looking eyes", "moss-green eyes"],
                ["wind-tangled hair", "short-cropped hair"],
                ["weathered cloak", "forest leathers"],
            ],
        ),
        places_of_origin: places_of_origin(class, &[STONETOP, THE_STEPLANDS, GORDINS_DELVE]),
        moves: vec![
            MoveTemplate::new(class, "EXPERT TRACKER")
                .with_description("A bent stem and a half print tell you the whole story"),
            MoveTemplate::new(class, "EAGLE EYE")
                .with_description("You pick out detail at distances others call impossible"),
            MoveTemplate::new(class, "CALLED SHOT")
                .with_description("Name the eye, the knee, or the rope; the arrow agrees")
                .requires_move("EAGLE EYE"),
            MoveTemplate::new(class, "STALKER'S PATIENCE")
                .with_description("You can wait in cover longer than anything you hunt"),
            MoveTemplate::new(class, "WILD SPEECH")
                .with_description("Beasts and birds take your meaning, and you theirs"),
        ],
        special_possessions: vec![
            SpecialPossession::new(class, "Compound bow")
                .with_description("Horn and sinew, pulled by you alone"),
            SpecialPossession::new(class, "Snares and deadfalls")
                .with_description("Set by nightfall, full by morning")
                .with_uses(3),
            SpecialPossession::new(class, "Camouflaged cloak")
                .with_description("At ten paces in cover you simply are not there"),
        ],
    }
}

fn seeker_seed() -> ClassSeed {
    let class = ClassKind::Seeker;
    ClassSeed {
        backgrounds: vec![
            Background::new(class, "ANTIQUARIAN")
                .with_description("You trade in the Makers' leavings, carefully"),
            Background::new(class, "COLLECTOR")
                .with_description("Your family hoards arcana; you catalog the hoard"),
            Background::new(class, "EXILE")
                .with_description("Lygos cast you out for what you would not stop studying"),
        ],
        instincts: instincts(
            class,
            &[
                ("OBSESSION", "To pull the thread no matter what unravels"),
                ("WONDER", "To stand amazed where others stand afraid"),
            ],
        ),
        appearance_options: appearance_options(
            class,
            [
                ["eager bearing", "guarded bearing"],
                ["quick hungry eyes", "shadowed eyes"],
                ["ink-stained hands", "scarred careful hands"],
                ["scholar's coat", "faded heirloom finery"],
            ],
        ),
        places_of_origin: places_of_origin(class, &[STONETOP, MARSHEDGE, LYGOS]),
        moves: vec![
            MoveTemplate::new(class, "WELL VERSED")
                .with_description("Old lore surfaces when you need it, mostly accurate"),
            MoveTemplate::new(class, "WORK WITH WHAT YOU'VE GOT")
                .with_description("Improvise a working from whatever arcana are at hand"),
            MoveTemplate::new(class, "THE COLLECTION")
                .with_description("Somewhere in your things is exactly the right piece"),
            MoveTemplate::new(class, "POLYGLOT")
                .with_description("Dead scripts and trade cants open to you alike"),
            MoveTemplate::new(class, "DOWSING")
                .with_description("The old workings tug at you from under the soil"),
        ],
        special_possessions: vec![
            SpecialPossession::new(class, "Field journal")
                .with_description("Rubbings, sketches, and marginal arguments with yourself"),
            SpecialPossession::new(class, "Surveyor's tools")
                .with_description("Line, level, and lenses for reading ruins"),
            SpecialPossession::new(class, "Collection of oddments")
                .with_description("Minor arcana of uncertain purpose, traded carefully")
                .with_charges(3),
        ],
    }
}

fn would_be_hero_seed() -> ClassSeed {
    let class = ClassKind::WouldBeHero;
    ClassSeed {
        backgrounds: vec![
            Background::new(class, "IMPETUOUS YOUTH")
                .with_description("Too young, too eager, and already out the gate"),
            Background::new(class, "DESTINED")
                .with_description("An omen at your birth; the village is still deciding"),
            Background::new(class, "UNPROVEN")
                .with_description("Everyone remembers your failure; you remember it most"),
        ],
        instincts: instincts(
            class,
            &[
                ("BRAVADO", "To leap before anyone can tell you not to"),
                ("YEARNING", "To matter the way the old songs matter"),
            ],
        ),
        appearance_options: appearance_options(
            class,
            [
                ["eager bearing", "awkward bearing"],
                ["shining eyes", "defiant eyes"],
                ["unruly hair", "carefully combed hair"],
                ["hand-me-down armor", "patchwork cloak"],
            ],
        ),
        places_of_origin: places_of_origin(class, &[STONETOP, GORDINS_DELVE, MARSHEDGE]),
        moves: vec![
            MoveTemplate::new(class, "NEVER GONNA KEEP ME DOWN")
                .with_description("Knocked flat, you get up; it is the one thing you are best at"),
            MoveTemplate::new(class, "ANGEL ON YOUR SHOULDER")
                .with_description("Something watches over you, for reasons unknown"),
            MoveTemplate::new(class, "POTENTIAL FOR GREATNESS")
                .with_description("You learn in a season what takes others years"),
            MoveTemplate::new(class, "HEART OF GOLD")
                .with_description("Even people who doubt you find themselves helping you"),
            MoveTemplate::new(class, "LOOK OUT!")
                .with_description("You shove someone clear of harm just in time"),
        ],
        special_possessions: vec![
            SpecialPossession::new(class, "Grandmother's charm")
                .with_description("Old wood, older words, warm to the touch"),
            SpecialPossession::new(class, "Training weapon")
                .with_description("Notched practice steel you refuse to replace"),
            SpecialPossession::new(class, "Well-worn boots")
                .with_description("They have further to go and they know it"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        seed_catalog(&repository).await.unwrap();
        let first = repository
            .catalog()
            .moves(ClassKind::Fox)
            .await
            .unwrap()
            .len();

        seed_catalog(&repository).await.unwrap();

        let second = repository
            .catalog()
            .moves(ClassKind::Fox)
            .await
            .unwrap()
            .len();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_every_class_catalog_is_complete_and_selectable() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        seed_catalog(&repository).await.unwrap();

        for class_kind in ClassKind::ALL {
            let catalog = repository
                .catalog()
                .class_catalog(class_rules(class_kind))
                .await
                .unwrap();
            assert!(
                catalog.is_complete(),
                "{} catalog is incomplete",
                class_kind.display_name()
            );
            assert!(catalog.moves.iter().all(MoveTemplate::selectable_at_creation));
        }
    }

    #[tokio::test]
    async fn test_missing_rules_template_fails_startup_verification() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        seed_catalog(&repository).await.unwrap();

        // Corrupt the stored catalog: drop a template the Judge rules grant
        sqlx::query("DELETE FROM moves WHERE class_kind = ? AND name = ?")
            .bind(ClassKind::Judge.slug())
            .bind("CENSURE")
            .execute(&repository.pool)
            .await
            .unwrap();

        let err = seed_catalog(&repository).await.unwrap_err();
        let message = format!("{err:#}");
        assert!(
            message.contains("Catalog does not cover the rules for The Judge"),
            "unexpected error: {message}"
        );
        assert!(message.contains("CENSURE"), "unexpected error: {message}");
    }

    #[tokio::test]
    async fn test_judge_hidden_moves_stay_out_of_the_candidate_list() {
        let repository = SqliteRepository::in_memory().await.unwrap();
        seed_catalog(&repository).await.unwrap();

        let catalog = repository
            .catalog()
            .class_catalog(class_rules(ClassKind::Judge))
            .await
            .unwrap();
        let names: Vec<&str> = catalog.moves.iter().map(|m| m.name.as_str()).collect();
        assert!(!names.contains(&"CENSURE"));
        assert!(!names.contains(&"CHRONICLER OF STONETOP"));
        assert!(!names.contains(&"ARBITER"));

        // The full rows still carry the hidden templates for materialization
        let all = repository.catalog().moves(ClassKind::Judge).await.unwrap();
        assert!(all.iter().any(|m| m.name == "CENSURE"));
        assert!(all.iter().any(|m| m.name == "ARBITER"));
    }
}
