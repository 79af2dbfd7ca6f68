//! Tarot and Tree-of-Life correspondences keyed by constellation.
//!
//! Everything here is static lookup data. The only behavior is filtering
//! and assembling readings from a resolved constellation.

use serde::Serialize;

use crate::{Constellation, ConstellationTable, CrossQuarter, Season, prelude::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Element {
    Fire,
    Water,
    Air,
    Earth,
    /// Ophiuchus and the seasonal special cards
    Ether,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Planet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// Major arcana card of one constellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConstellationCard {
    pub title:         &'static str,
    pub constellation: Constellation,
    pub element:       Element,
    /// Nominal transit length; independent of the constellation's date interval
    pub transit_days:  u16,
    pub keywords:      &'static [&'static str],
    pub description:   &'static str,
}

#[rustfmt::skip]
static CONSTELLATION_CARDS: [ConstellationCard; 13] = [
    ConstellationCard {
        title: "The Transformation", constellation: Constellation::Scorpius, element: Element::Water, transit_days: 6,
        keywords: &["intensity", "transformation", "rebirth", "power"],
        description: "Represents the intense but brief period of transformation",
    },
    ConstellationCard {
        title: "The Healer", constellation: Constellation::Ophiuchus, element: Element::Ether, transit_days: 18,
        keywords: &["healing", "transformation", "wisdom", "rebirth"],
        description: "Represents the healing journey and transformation through wisdom",
    },
    ConstellationCard {
        title: "The Archer", constellation: Constellation::Sagittarius, element: Element::Fire, transit_days: 33,
        keywords: &["adventure", "exploration", "philosophy", "freedom"],
        description: "Symbolizes the journey of exploration and higher knowledge",
    },
    ConstellationCard {
        title: "The Sea Goat", constellation: Constellation::Capricornus, element: Element::Earth, transit_days: 28,
        keywords: &["ambition", "discipline", "structure", "achievement"],
        description: "Represents the balance between earthly and spiritual realms",
    },
    ConstellationCard {
        title: "The Water Bearer", constellation: Constellation::Aquarius, element: Element::Air, transit_days: 24,
        keywords: &["innovation", "humanitarianism", "progress", "revolution"],
        description: "Symbolizes the flow of new ideas and collective consciousness",
    },
    ConstellationCard {
        title: "The Fishes", constellation: Constellation::Pisces, element: Element::Water, transit_days: 38,
        keywords: &["intuition", "dreams", "compassion", "mysticism"],
        description: "Represents the deep connection to the subconscious and spiritual realms",
    },
    ConstellationCard {
        title: "The Ram", constellation: Constellation::Aries, element: Element::Fire, transit_days: 25,
        keywords: &["initiative", "courage", "leadership", "new beginnings"],
        description: "Symbolizes the spark of creation and the drive to begin anew",
    },
    ConstellationCard {
        title: "The Bull", constellation: Constellation::Taurus, element: Element::Earth, transit_days: 37,
        keywords: &["stability", "sensuality", "determination", "abundance"],
        description: "Represents the grounding force of nature and material wealth",
    },
    ConstellationCard {
        title: "The Twins", constellation: Constellation::Gemini, element: Element::Air, transit_days: 31,
        keywords: &["duality", "communication", "adaptability", "curiosity"],
        description: "Symbolizes the dance of opposites and the power of connection",
    },
    ConstellationCard {
        title: "The Crab", constellation: Constellation::Cancer, element: Element::Water, transit_days: 21,
        keywords: &["nurturing", "protection", "intuition", "home"],
        description: "Represents the protective shell and the nurturing heart",
    },
    ConstellationCard {
        title: "The Lion", constellation: Constellation::Leo, element: Element::Fire, transit_days: 37,
        keywords: &["creativity", "leadership", "vitality", "self-expression"],
        description: "Symbolizes the radiant power of the sun and creative force",
    },
    ConstellationCard {
        title: "The Harvest", constellation: Constellation::Virgo, element: Element::Earth, transit_days: 45,
        keywords: &["abundance", "fertility", "nurturing", "practicality"],
        description: "Symbolizes the longest constellation transit and earthly abundance",
    },
    ConstellationCard {
        title: "The Scales", constellation: Constellation::Libra, element: Element::Air, transit_days: 23,
        keywords: &["balance", "harmony", "justice", "partnership"],
        description: "Represents the eternal quest for balance and harmony",
    },
];

/// All constellation cards in table order.
pub fn constellation_cards() -> &'static [ConstellationCard] {
    &CONSTELLATION_CARDS
}

pub fn card_for(constellation: Constellation) -> &'static ConstellationCard {
    // Table order matches Constellation::ALL
    &CONSTELLATION_CARDS[constellation as usize]
}

/// Cards whose nominal transit lies within `min..=max` days.
pub fn cards_by_transit(min: u16, max: u16) -> Vec<&'static ConstellationCard> {
    CONSTELLATION_CARDS
        .iter()
        .filter(|card| (min..=max).contains(&card.transit_days))
        .collect()
}

/// Sephirah correspondence of a constellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeOfLife {
    pub sephirah:         &'static str,
    pub title:            &'static str,
    pub hebrew_letter:    &'static str,
    pub planet:           Planet,
    pub traditional_name: &'static str,
    pub color:            &'static str,
}

/// Tree-of-Life entry for a constellation. Gemini, Taurus and Aries carry none.
#[rustfmt::skip]
pub const fn tree_of_life(constellation: Constellation) -> Option<TreeOfLife> {
    let entry = match constellation {
        Constellation::Ophiuchus   => ("Keter",    "The Crown",         "א", Planet::Uranus,  "The Fool",           "White"),
        Constellation::Sagittarius => ("Chokhmah", "The Wisdom",        "ב", Planet::Mercury, "The Magician",       "Gray"),
        Constellation::Pisces      => ("Binah",    "The Understanding", "ג", Planet::Moon,    "The High Priestess", "Black"),
        Constellation::Cancer      => ("Chesed",   "The Mercy",         "ד", Planet::Venus,   "The Empress",        "Blue"),
        Constellation::Scorpius    => ("Gevurah",  "The Severity",      "ה", Planet::Mars,    "The Tower",          "Red"),
        Constellation::Leo         => ("Tiferet",  "The Beauty",        "ו", Planet::Sun,     "The Sun",            "Yellow"),
        Constellation::Libra       => ("Netzach",  "The Victory",       "ז", Planet::Jupiter, "The Star",           "Green"),
        Constellation::Capricornus => ("Hod",      "The Splendor",      "ח", Planet::Neptune, "The Moon",           "Orange"),
        Constellation::Aquarius    => ("Yesod",    "The Foundation",    "ט", Planet::Saturn,  "The World",          "Purple"),
        Constellation::Virgo       => ("Malkuth",  "The Kingdom",       "ת", Planet::Pluto,   "The World",          "Brown"),
        Constellation::Aries | Constellation::Taurus | Constellation::Gemini => return None,
    };
    let (sephirah, title, hebrew_letter, planet, traditional_name, color) = entry;
    Some(TreeOfLife {
        sephirah,
        title,
        hebrew_letter,
        planet,
        traditional_name,
        color,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spread {
    pub name:        &'static str,
    pub cards:       u8,
    pub description: &'static str,
}

pub static SPREADS: [Spread; 5] = [
    Spread {
        name:        "Constellation Path",
        cards:       3,
        description: "A three-card spread showing past, present, and future through the constellations",
    },
    Spread {
        name:        "Elemental Cross",
        cards:       4,
        description: "A four-card spread exploring the influence of each element",
    },
    Spread {
        name:        "Solar Journey",
        cards:       7,
        description: "A seven-card spread following the sun's path through the zodiac",
    },
    Spread {
        name:        "Cosmic Mirror",
        cards:       5,
        description: "A five-card spread reflecting the relationship between microcosm and macrocosm",
    },
    Spread {
        name:        "Great Year Cycle",
        cards:       13,
        description: "A comprehensive spread using all 13 constellation cards",
    },
];

/// A Constellation Path reading: the previous, current and next
/// constellation cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reading {
    pub past:    &'static ConstellationCard,
    pub present: &'static ConstellationCard,
    pub future:  &'static ConstellationCard,
}

impl Reading {
    /// Builds the reading around `present` using the table's neighbours.
    pub fn around(table: &ConstellationTable, present: Constellation) -> Self {
        let past = table.previous(present).unwrap_or(present);
        let future = table.next(present).unwrap_or(present);
        Self {
            past:    card_for(past),
            present: card_for(present),
            future:  card_for(future),
        }
    }

    pub const fn spread() -> &'static Spread {
        &SPREADS[0]
    }
}

/// Seasonal marker or cross-quarter festival carrying a special card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Marker {
    Season(Season),
    CrossQuarter(CrossQuarter),
}

/// Card drawn when a date falls near a seasonal marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecialCard {
    pub title:       &'static str,
    pub keywords:    &'static [&'static str],
    pub description: &'static str,
}

#[rustfmt::skip]
pub const fn special_card(marker: Marker) -> SpecialCard {
    let (title, keywords, description): (&str, &[&str], &str) = match marker {
        Marker::Season(Season::WinterSolstice) => ("The Winter Solstice",
            &["rebirth", "potential", "cosmic mystery", "new beginnings"],
            "The longest night, representing the depth of cosmic mystery and the promise of rebirth"),
        Marker::CrossQuarter(CrossQuarter::Imbolc) => ("The Imbolc",
            &["awakening", "purification", "inspiration", "potential"],
            "The first stirrings of spring, representing spiritual awakening and purification"),
        Marker::Season(Season::SpringEquinox) => ("The Spring Equinox",
            &["balance", "renewal", "growth", "harmony"],
            "Perfect balance between light and dark, representing cosmic harmony and renewal"),
        Marker::CrossQuarter(CrossQuarter::Beltane) => ("The Beltane",
            &["union", "fertility", "passion", "creation"],
            "The height of spring, representing the union of cosmic forces and creative power"),
        Marker::Season(Season::SummerSolstice) => ("The Summer Solstice",
            &["power", "illumination", "manifestation", "abundance"],
            "The longest day, representing the height of cosmic power and manifestation"),
        Marker::CrossQuarter(CrossQuarter::Lughnasadh) => ("The Lughnasadh",
            &["harvest", "gratitude", "sacrifice", "abundance"],
            "The first harvest, representing cosmic abundance and the cycle of giving and receiving"),
        Marker::Season(Season::AutumnEquinox) => ("The Autumn Equinox",
            &["harvest", "reflection", "preparation", "balance"],
            "Perfect balance between light and dark, representing cosmic harvest and preparation"),
        Marker::CrossQuarter(CrossQuarter::Samhain) => ("The Samhain",
            &["transition", "ancestors", "mystery", "veil"],
            "The thinning of the veil between worlds, representing cosmic transition and mystery"),
    };
    SpecialCard { title, keywords, description }
}
