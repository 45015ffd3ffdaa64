//! Species kinds and their numeric profiles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad class of a species. Animals move, plants spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Class {
    Animal,
    Plant,
}

/// Closed set of species living in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    Human,
    Wolf,
    Sheep,
    Fox,
    Turtle,
    Antelope,
    Grass,
    Guarana,
    Milkweed,
    WolfBerries,
    SosnowskyHogweed,
}

/// Static numbers every fresh instance of a kind starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub class: Class,
    pub power: i32,
    pub initiative: i32,
    /// Percent chance per spread attempt (plants only)
    pub spread_chance: u32,
    /// Single character used by text renderers
    pub symbol: char,
    pub name: &'static str,
}

const fn animal(power: i32, initiative: i32, symbol: char, name: &'static str) -> Profile {
    Profile {
        class: Class::Animal,
        power,
        initiative,
        spread_chance: 0,
        symbol,
        name,
    }
}

const fn plant(power: i32, spread_chance: u32, symbol: char, name: &'static str) -> Profile {
    Profile {
        class: Class::Plant,
        power,
        initiative: 0,
        spread_chance,
        symbol,
        name,
    }
}

impl Kind {
    pub const ALL: [Kind; 11] = [
        Kind::Human,
        Kind::Wolf,
        Kind::Sheep,
        Kind::Fox,
        Kind::Turtle,
        Kind::Antelope,
        Kind::Grass,
        Kind::Guarana,
        Kind::Milkweed,
        Kind::WolfBerries,
        Kind::SosnowskyHogweed,
    ];

    pub fn profile(self) -> Profile {
        match self {
            Kind::Human => animal(5, 4, 'H', "Human"),
            Kind::Wolf => animal(9, 5, 'W', "Wolf"),
            Kind::Sheep => animal(4, 4, 'S', "Sheep"),
            Kind::Fox => animal(3, 7, 'F', "Fox"),
            Kind::Turtle => animal(2, 1, 'T', "Turtle"),
            Kind::Antelope => animal(4, 4, 'A', "Antelope"),
            Kind::Grass => plant(0, 10, 'g', "Grass"),
            Kind::Guarana => plant(0, 5, 'u', "Guarana"),
            Kind::Milkweed => plant(0, 5, 'm', "Milkweed"),
            Kind::WolfBerries => plant(99, 5, 'b', "Wolf Berries"),
            Kind::SosnowskyHogweed => plant(10, 5, 'h', "Sosnowsky's Hogweed"),
        }
    }

    pub fn class(self) -> Class {
        self.profile().class
    }

    pub fn is_animal(self) -> bool {
        self.class() == Class::Animal
    }

    pub fn is_plant(self) -> bool {
        self.class() == Class::Plant
    }

    pub fn symbol(self) -> char {
        self.profile().symbol
    }

    pub fn name(self) -> &'static str {
        self.profile().name
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_symbols_are_unique() {
        let symbols: HashSet<char> = Kind::ALL.iter().map(|k| k.symbol()).collect();
        assert_eq!(symbols.len(), Kind::ALL.len());
    }

    #[test]
    fn test_plants_never_take_initiative() {
        for kind in Kind::ALL.iter().filter(|k| k.is_plant()) {
            assert_eq!(kind.profile().initiative, 0, "{kind}");
            assert!(kind.profile().spread_chance > 0, "{kind}");
        }
    }

    #[test]
    fn test_animals_do_not_spread() {
        for kind in Kind::ALL.iter().filter(|k| k.is_animal()) {
            assert_eq!(kind.profile().spread_chance, 0, "{kind}");
            assert!(kind.profile().initiative > 0, "{kind}");
        }
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&Kind::WolfBerries).unwrap();
        let kind: Kind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, Kind::WolfBerries);
    }
}
