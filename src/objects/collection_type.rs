//! The closed set of object collections the site knows how to present.
//!
//! Collection names double as data file stems (`Objects/<name>.json`) and as the
//! type tag attached to every loaded record.

use std::fmt;

use convert_case::{Case, Casing};

use crate::recognized::Recognized;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionType {
    Module,
    ModuleStat,
    ModuleRarity,
    Pilot,
    PilotClass,
    PilotPersonality,
    PilotTalent,
    PilotTalentType,
    PilotType,
    Rarity,
}

impl CollectionType {
    /// All known collection types.
    pub const ALL: &'static [CollectionType] = &[
        Self::Module,
        Self::ModuleStat,
        Self::ModuleRarity,
        Self::Pilot,
        Self::PilotClass,
        Self::PilotPersonality,
        Self::PilotTalent,
        Self::PilotTalentType,
        Self::PilotType,
        Self::Rarity,
    ];

    /// The collection name as used in data file names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Module => "Module",
            Self::ModuleStat => "ModuleStat",
            Self::ModuleRarity => "ModuleRarity",
            Self::Pilot => "Pilot",
            Self::PilotClass => "PilotClass",
            Self::PilotPersonality => "PilotPersonality",
            Self::PilotTalent => "PilotTalent",
            Self::PilotTalentType => "PilotTalentType",
            Self::PilotType => "PilotType",
            Self::Rarity => "Rarity",
        }
    }

    /// URL segment of the collection's pages.
    pub fn url_slug(&self) -> &'static str {
        match self {
            Self::Module => "modules",
            Self::ModuleStat => "module_stats",
            Self::ModuleRarity => "module_rarities",
            Self::Pilot => "pilots",
            Self::PilotClass => "pilot_classes",
            Self::PilotPersonality => "pilot_personalities",
            Self::PilotTalent => "pilot_talents",
            Self::PilotTalentType => "pilot_talent_types",
            Self::PilotType => "pilot_types",
            Self::Rarity => "rarities",
        }
    }

    /// Resolves a collection name. Besides the exact name, snake or kebab
    /// spellings such as `pilot_talent` are accepted.
    pub fn from_name(name: &str) -> Recognized<Self> {
        Self::from_exact_name(name)
            .or_else(|| Self::from_exact_name(&name.to_case(Case::Pascal)))
            .map(Recognized::Known)
            .unwrap_or_else(|| Recognized::Unknown(name.to_string()))
    }

    fn from_exact_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|ty| ty.name() == name)
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Recognized<CollectionType> {
    /// The file stem to load: the canonical name when known, the raw name otherwise.
    pub fn name(&self) -> &str {
        match self {
            Recognized::Known(ty) => ty.name(),
            Recognized::Unknown(raw) => raw.as_str(),
        }
    }

    pub fn url_slug(&self) -> Option<&'static str> {
        self.known().map(CollectionType::url_slug)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn names_round_trip() {
        for ty in CollectionType::ALL {
            assert_eq!(CollectionType::from_name(ty.name()), Recognized::Known(*ty));
        }
    }

    #[test]
    fn accepts_snake_case() {
        assert_eq!(
            CollectionType::from_name("pilot_talent_type"),
            Recognized::Known(CollectionType::PilotTalentType)
        );
        assert_eq!(
            CollectionType::from_name("rarity"),
            Recognized::Known(CollectionType::Rarity)
        );
    }

    #[test]
    fn unknown_collection_keeps_raw_name() {
        let ty = CollectionType::from_name("Ability");
        assert_eq!(ty.unknown().map(String::as_str), Some("Ability"));
        assert_eq!(ty.name(), "Ability");
        assert_eq!(ty.url_slug(), None);
    }

    #[test]
    fn url_slugs() {
        assert_eq!(CollectionType::Module.url_slug(), "modules");
        assert_eq!(CollectionType::Rarity.url_slug(), "rarities");
        assert_eq!(CollectionType::PilotClass.url_slug(), "pilot_classes");
    }
}
