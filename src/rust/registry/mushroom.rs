//! The attribute table of the mushroom specimen form, in payload order.

use super::attribute::{AttributeDefinition, Choice};

pub const CAP_DIAMETER: &str = "cap_diameter";
pub const STEM_HEIGHT: &str = "stem_height";
pub const STEM_WIDTH: &str = "stem_width";
pub const GILL_SPACING: &str = "gill_spacing";
pub const DOES_BRUISE_BLEED: &str = "does_bruise_bleed";
pub const HAS_RING: &str = "has_ring";
pub const CAP_SHAPE: &str = "cap_shape";
pub const CAP_SURFACE: &str = "cap_surface";
pub const STEM_SURFACE: &str = "stem_surface";
pub const CAP_COLOR: &str = "cap_color";
pub const GILL_COLOR: &str = "gill_color";
pub const STEM_COLOR: &str = "stem_color";
pub const VEIL_COLOR: &str = "veil_color";
pub const SPORE_PRINT_COLOR: &str = "spore_print_color";
pub const GILL_ATTACHMENT: &str = "gill_attachment";
pub const STEM_ROOT: &str = "stem_root";
pub const RING_TYPE: &str = "ring_type";
pub const HABITAT: &str = "habitat";
pub const SEASON: &str = "season";

pub const GILL_SPACINGS: &[Choice] = &[Choice::new("close", 0), Choice::new("distant", 1)];

pub const CAP_SHAPES: &[Choice] = &[
    Choice::new("bell", 3),
    Choice::new("conical", 4),
    Choice::new("convex", 0),
    Choice::new("flat", 1),
    Choice::new("sunken", 5),
    Choice::new("spherical", 2),
    Choice::new("others", 6),
];

/// Shared by cap and stem surface.
pub const SURFACES: &[Choice] = &[
    Choice::new("dry", 7),
    Choice::new("fibrous", 9),
    Choice::new("grooves", 0),
    Choice::new("scaly", 3),
    Choice::new("smooth", 5),
    Choice::new("shiny", 1),
    Choice::new("leathery", 6),
    Choice::new("silky", 10),
    Choice::new("sticky", 2),
    Choice::new("wrinkled", 8),
    Choice::new("fleshy", 4),
];

/// Shared by every colour attribute.
pub const COLOR_PALETTE: &[Choice] = &[
    Choice::new("brown", 2),
    Choice::new("buff", 9),
    Choice::new("gray", 3),
    Choice::new("green", 4),
    Choice::new("pink", 7),
    Choice::new("purple", 8),
    Choice::new("red", 1),
    Choice::new("white", 5),
    Choice::new("yellow", 6),
    Choice::new("blue", 10),
    Choice::new("orange", 0),
    Choice::new("black", 11),
];

pub const GILL_ATTACHMENTS: &[Choice] = &[
    Choice::new("adnate", 1),
    Choice::new("adnexed", 4),
    Choice::new("decurrent", 2),
    Choice::new("free", 0),
    Choice::new("sinuate", 3),
    Choice::new("pores", 5),
    Choice::new("no attachment", 6),
];

pub const STEM_ROOTS: &[Choice] = &[
    Choice::new("bulbous", 1),
    Choice::new("swollen", 0),
    Choice::new("club", 3),
    Choice::new("filamentous", 4),
    Choice::new("rooted", 2),
];

/// Code 4 is deliberately absent: it is the "no ring" sentinel.
pub const RING_TYPES: &[Choice] = &[
    Choice::new("evanescent", 2),
    Choice::new("flaring", 6),
    Choice::new("grooved", 0),
    Choice::new("large", 3),
    Choice::new("pendant", 1),
    Choice::new("zone", 7),
    Choice::new("movable", 5),
];

pub const HABITATS: &[Choice] = &[
    Choice::new("grasses", 2),
    Choice::new("leaves", 4),
    Choice::new("meadows", 1),
    Choice::new("paths", 5),
    Choice::new("heaths", 3),
    Choice::new("urban", 7),
    Choice::new("waste", 6),
    Choice::new("woods", 0),
];

pub const SEASONS: &[Choice] = &[
    Choice::new("spring", 3),
    Choice::new("summer", 1),
    Choice::new("autumn", 2),
    Choice::new("winter", 0),
];

pub(crate) fn definitions() -> Vec<AttributeDefinition> {
    vec![
        AttributeDefinition::continuous(CAP_DIAMETER, "Cap diameter (cm)", 0.38, 62.34, 10.0),
        AttributeDefinition::continuous(STEM_HEIGHT, "Stem height (cm)", 0.0, 33.92, 5.0),
        AttributeDefinition::continuous(STEM_WIDTH, "Stem width (mm)", 0.0, 103.91, 10.0),
        AttributeDefinition::discrete(GILL_SPACING, "Gill spacing", GILL_SPACINGS, 0),
        AttributeDefinition::flag(DOES_BRUISE_BLEED, "Does it bruise or bleed?"),
        AttributeDefinition::flag(HAS_RING, "Has ring"),
        AttributeDefinition::discrete(CAP_SHAPE, "Cap shape", CAP_SHAPES, 0),
        AttributeDefinition::discrete(CAP_SURFACE, "Cap surface", SURFACES, 7),
        AttributeDefinition::discrete(STEM_SURFACE, "Stem surface", SURFACES, 7),
        AttributeDefinition::discrete(CAP_COLOR, "Cap color", COLOR_PALETTE, 2),
        AttributeDefinition::discrete(GILL_COLOR, "Gill color", COLOR_PALETTE, 2),
        AttributeDefinition::discrete(STEM_COLOR, "Stem color", COLOR_PALETTE, 2),
        AttributeDefinition::discrete(VEIL_COLOR, "Veil color", COLOR_PALETTE, 2),
        AttributeDefinition::discrete(SPORE_PRINT_COLOR, "Spore print color", COLOR_PALETTE, 2),
        AttributeDefinition::discrete(GILL_ATTACHMENT, "Gill attachment", GILL_ATTACHMENTS, 1),
        AttributeDefinition::discrete(STEM_ROOT, "Stem root", STEM_ROOTS, 1),
        AttributeDefinition::discrete(RING_TYPE, "Ring type", RING_TYPES, 2).shown_when(HAS_RING),
        AttributeDefinition::discrete(HABITAT, "Habitat", HABITATS, 0),
        AttributeDefinition::discrete(SEASON, "Season", SEASONS, 3),
    ]
}
