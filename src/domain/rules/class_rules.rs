//! Per-class creation rules as one declarative table
//!
//! Every class-specific constraint the creation flow enforces lives here as
//! `'static` data: the legal stat array, mandatory and automatic starting
//! moves, either-or move groups, background-conditional move requirements,
//! mandatory starting possessions, free-text detail sections, and extra
//! single-choice fields. One generic validation/materialization path consumes
//! this table; there is no per-class code.

use crate::domain::entities::APPEARANCE_SLOTS;
use crate::domain::value_objects::{ClassKind, StatArray};

/// Stat array shared by eight of the nine classes
pub const STANDARD_STAT_ARRAY: StatArray = StatArray::new([2, 1, 1, 0, 0, -1]);

/// The Would-Be Hero starts weaker and grows into the role
pub const HERO_STAT_ARRAY: StatArray = StatArray::new([1, 0, 0, 0, 0, -1]);

/// Creation rules for one class
#[derive(Debug)]
pub struct ClassRules {
    pub class_kind: ClassKind,
    /// Allowed multiset of the six stat values, order-independent
    pub stat_array: StatArray,
    /// Moves every character of this class must select
    pub mandatory_moves: &'static [&'static str],
    /// Groups of moves of which at least one must be selected
    pub either_or_moves: &'static [&'static [&'static str]],
    /// (background name, move name): the move is required when that
    /// background is chosen
    pub background_required_moves: &'static [(&'static str, &'static str)],
    /// Moves granted automatically and hidden from the choice list
    pub auto_moves: &'static [&'static str],
    /// Possessions granted automatically and hidden from the choice list
    pub auto_possessions: &'static [&'static str],
    /// Possessions every character of this class must select
    pub mandatory_possessions: &'static [&'static str],
    /// Optional free-text question section with a minimum answer count
    pub detail_section: Option<DetailSection>,
    /// Extra single-choice fields outside the shared catalog tables
    pub extra_choices: &'static [ChoiceField],
    /// Display labels for the four appearance slots
    pub appearance_labels: [&'static str; APPEARANCE_SLOTS],
}

/// A block of optional free-text questions, at least `min_answers` of which
/// must be answered
#[derive(Debug, Clone, Copy)]
pub struct DetailSection {
    /// Field key in submissions and error reports
    pub field: &'static str,
    /// Human label used in the minimum-answer error message
    pub label: &'static str,
    pub questions: &'static [&'static str],
    pub min_answers: usize,
}

/// A one-of-N choice field declared by the rules rather than the catalog
#[derive(Debug, Clone, Copy)]
pub struct ChoiceField {
    pub field: &'static str,
    pub options: &'static [&'static str],
}

impl ClassRules {
    pub fn is_auto_move(&self, name: &str) -> bool {
        self.auto_moves.contains(&name)
    }

    pub fn is_auto_possession(&self, name: &str) -> bool {
        self.auto_possessions.contains(&name)
    }

    /// Every move name this table refers to; all must exist in the catalog
    pub fn referenced_move_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.mandatory_moves
            .iter()
            .copied()
            .chain(self.either_or_moves.iter().flat_map(|group| group.iter().copied()))
            .chain(self.background_required_moves.iter().map(|(_, mv)| *mv))
            .chain(self.auto_moves.iter().copied())
    }

    /// Every possession name this table refers to
    pub fn referenced_possession_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.auto_possessions
            .iter()
            .copied()
            .chain(self.mandatory_possessions.iter().copied())
    }

    /// Every background name this table refers to
    pub fn referenced_background_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.background_required_moves.iter().map(|(bg, _)| *bg)
    }
}

/// Look up the rules for a class
pub fn class_rules(class: ClassKind) -> &'static ClassRules {
    match class {
        ClassKind::Blessed => &BLESSED_RULES,
        ClassKind::Fox => &FOX_RULES,
        ClassKind::Heavy => &HEAVY_RULES,
        ClassKind::Judge => &JUDGE_RULES,
        ClassKind::Lightbearer => &LIGHTBEARER_RULES,
        ClassKind::Marshal => &MARSHAL_RULES,
        ClassKind::Ranger => &RANGER_RULES,
        ClassKind::Seeker => &SEEKER_RULES,
        ClassKind::WouldBeHero => &WOULD_BE_HERO_RULES,
    }
}

static BLESSED_RULES: ClassRules = ClassRules {
    class_kind: ClassKind::Blessed,
    stat_array: STANDARD_STAT_ARRAY,
    mandatory_moves: &["SPIRIT TONGUE", "CALL THE SPIRITS"],
    either_or_moves: &[],
    background_required_moves: &[("VESSEL", "BORROW POWER")],
    auto_moves: &[],
    auto_possessions: &[],
    mandatory_possessions: &["Sacred pouch"],
    detail_section: None,
    extra_choices: &[
        ChoiceField {
            field: "sacred_pouch_origin",
            options: &[
                "passed down through your family",
                "made by your own hands",
                "a gift from the one who taught you",
                "taken from a dead holy one",
            ],
        },
        ChoiceField {
            field: "sacred_pouch_material",
            options: &[
                "woven grass and reeds",
                "supple doeskin",
                "patched and re-patched wool",
                "tanned hide and sinew",
            ],
        },
        ChoiceField {
            field: "sacred_pouch_aesthetics",
            options: &[
                "plain and travel-worn",
                "stitched with bright thread",
                "hung with beads and feathers",
                "stained with old ash",
            ],
        },
    ],
    appearance_labels: ["bearing", "eyes", "hair", "adornment"],
};

static FOX_RULES: ClassRules = ClassRules {
    class_kind: ClassKind::Fox,
    stat_array: STANDARD_STAT_ARRAY,
    mandatory_moves: &[],
    either_or_moves: &[&["AMBUSH", "SKILL AT ARMS"]],
    background_required_moves: &[],
    auto_moves: &[],
    auto_possessions: &[],
    mandatory_possessions: &[],
    detail_section: None,
    extra_choices: &[],
    appearance_labels: ["bearing", "eyes", "smile", "garb"],
};

static HEAVY_RULES: ClassRules = ClassRules {
    class_kind: ClassKind::Heavy,
    stat_array: STANDARD_STAT_ARRAY,
    mandatory_moves: &["DANGEROUS", "HARD TO KILL"],
    either_or_moves: &[],
    background_required_moves: &[],
    auto_moves: &[],
    auto_possessions: &[],
    mandatory_possessions: &[],
    detail_section: None,
    extra_choices: &[],
    appearance_labels: ["bearing", "eyes", "scars", "garb"],
};

static JUDGE_RULES: ClassRules = ClassRules {
    class_kind: ClassKind::Judge,
    stat_array: STANDARD_STAT_ARRAY,
    mandatory_moves: &[],
    either_or_moves: &[],
    background_required_moves: &[],
    auto_moves: &["CENSURE", "CHRONICLER OF STONETOP"],
    auto_possessions: &["Scribe's tools"],
    mandatory_possessions: &[],
    detail_section: None,
    extra_choices: &[],
    appearance_labels: ["bearing", "eyes", "hair", "garb"],
};

static LIGHTBEARER_RULES: ClassRules = ClassRules {
    class_kind: ClassKind::Lightbearer,
    stat_array: STANDARD_STAT_ARRAY,
    mandatory_moves: &["CONSECRATED FLAME", "INVOKE THE SUN GOD"],
    either_or_moves: &[],
    background_required_moves: &[],
    auto_moves: &[],
    auto_possessions: &[],
    mandatory_possessions: &[],
    detail_section: None,
    extra_choices: &[],
    appearance_labels: ["bearing", "eyes", "hair", "garb"],
};

static MARSHAL_RULES: ClassRules = ClassRules {
    class_kind: ClassKind::Marshal,
    stat_array: STANDARD_STAT_ARRAY,
    mandatory_moves: &["LOGISTICS"],
    either_or_moves: &[],
    background_required_moves: &[("LUMINARY", "WE HAPPY FEW")],
    auto_moves: &[],
    auto_possessions: &[],
    mandatory_possessions: &[],
    detail_section: Some(DetailSection {
        field: "war_story",
        label: "war story",
        questions: &[
            "What was the war, and who fought it?",
            "What was your role in the fighting?",
            "What did you do that you are proud of?",
            "What did you do that still haunts you?",
            "Who served beside you, and what happened to them?",
            "Who commanded you, and what did you learn from them?",
            "How did the war end for you?",
            "What keepsake from the war do you still carry?",
        ],
        min_answers: 3,
    }),
    extra_choices: &[],
    appearance_labels: ["bearing", "eyes", "scars", "garb"],
};

static RANGER_RULES: ClassRules = ClassRules {
    class_kind: ClassKind::Ranger,
    stat_array: STANDARD_STAT_ARRAY,
    mandatory_moves: &["EXPERT TRACKER"],
    either_or_moves: &[],
    background_required_moves: &[],
    auto_moves: &[],
    auto_possessions: &[],
    mandatory_possessions: &["Compound bow"],
    detail_section: Some(DetailSection {
        field: "something_wicked",
        label: "something wicked",
        questions: &[
            "What did you see out there, and where?",
            "What sign does it leave behind?",
            "Who else believes you about it?",
            "What harm has it already done?",
            "Why do you think it has come now?",
            "What do the old stories say about it?",
            "What almost worked against it?",
            "What do you fear it wants?",
        ],
        min_answers: 3,
    }),
    extra_choices: &[],
    appearance_labels: ["bearing", "eyes", "hair", "garb"],
};

static SEEKER_RULES: ClassRules = ClassRules {
    class_kind: ClassKind::Seeker,
    stat_array: STANDARD_STAT_ARRAY,
    mandatory_moves: &["WELL VERSED", "WORK WITH WHAT YOU'VE GOT"],
    either_or_moves: &[],
    background_required_moves: &[],
    auto_moves: &[],
    auto_possessions: &[],
    mandatory_possessions: &[],
    detail_section: None,
    extra_choices: &[],
    appearance_labels: ["bearing", "eyes", "hands", "garb"],
};

static WOULD_BE_HERO_RULES: ClassRules = ClassRules {
    class_kind: ClassKind::WouldBeHero,
    stat_array: HERO_STAT_ARRAY,
    mandatory_moves: &["NEVER GONNA KEEP ME DOWN"],
    either_or_moves: &[],
    background_required_moves: &[],
    auto_moves: &[],
    auto_possessions: &[],
    mandatory_possessions: &[],
    detail_section: None,
    extra_choices: &[],
    appearance_labels: ["bearing", "eyes", "hair", "garb"],
};
