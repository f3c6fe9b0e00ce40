//! Typed shapes of the records in each known collection.
//!
//! Fields the site reads are spelled out; fields that are genuinely open-ended
//! (module scalars, buff definitions, ...) are kept in an `extra` map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use variantly::Variantly;

use crate::error::{ErrorKind, IResult};
use crate::localization::LocalizationKey;
use crate::recognized::Recognized;

use super::TaggedRecord;
use super::collection_type::CollectionType;

/// Value of a record's `production_status`.
///
/// Current data uses the label `"Ready"`; some older snapshots store a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductionStatus {
    Flag(bool),
    Label(String),
}

impl ProductionStatus {
    pub const READY: &'static str = "Ready";

    pub fn is_ready(&self) -> bool {
        matches!(self, ProductionStatus::Label(label) if label == Self::READY)
    }
}

/// Base shape shared by every game-data record.
pub trait ParseObject {
    fn id(&self) -> &str;

    fn production_status(&self) -> Option<&ProductionStatus>;

    fn is_production_ready(&self) -> bool {
        self.production_status()
            .is_some_and(ProductionStatus::is_ready)
    }
}

macro_rules! impl_parse_object {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ParseObject for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn production_status(&self) -> Option<&ProductionStatus> {
                    self.production_status.as_ref()
                }
            }
        )+
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    pub currency_id: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    pub stat_id: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_status: Option<ProductionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_icon_path: Option<String>,
    /// Only present on modules that are ready for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizationKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizationKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_rarity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleStat {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_status: Option<ProductionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_name: Option<LocalizationKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<LocalizationKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_scaler: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_exponent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_baseline: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_pattern: Option<LocalizationKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_is_better: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRarity {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_status: Option<ProductionStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotLevel {
    pub talent_type_id: String,
    #[serde(default)]
    pub talents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reputation_cost: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_cost: Option<Cost>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pilot {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_status: Option<ProductionStatus>,
    pub first_name: LocalizationKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_name: Option<LocalizationKey>,
    pub image_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<LocalizationKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pilot_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pilot_class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<Cost>,
    #[serde(default)]
    pub levels: Vec<PilotLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub image_path: String,
    pub hex: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotClass {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_status: Option<ProductionStatus>,
    pub name: LocalizationKey,
    pub badge: Badge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotPersonality {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_status: Option<ProductionStatus>,
    pub name: LocalizationKey,
    pub icon_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotTalent {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_status: Option<ProductionStatus>,
    pub name: LocalizationKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizationKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_description: Option<LocalizationKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_ui_description: Option<LocalizationKey>,
    pub image_path: String,
    #[serde(default)]
    pub stats: Vec<StatValue>,
    /// cooldown, buffs, reactivation policy and the like
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotTalentType {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_status: Option<ProductionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizationKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizationKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotType {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_status: Option<ProductionStatus>,
    pub rarity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizationKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_reward_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_extended_bio: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_change_talents: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rarity {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_status: Option<ProductionStatus>,
    pub name: LocalizationKey,
    pub hex: String,
}

impl_parse_object!(
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
);

/// A record of any known collection, in its typed form.
#[derive(Debug, Clone, PartialEq, Variantly)]
pub enum GameObject {
    Module(Module),
    ModuleStat(ModuleStat),
    ModuleRarity(ModuleRarity),
    Pilot(Pilot),
    PilotClass(PilotClass),
    PilotPersonality(PilotPersonality),
    PilotTalent(PilotTalent),
    PilotTalentType(PilotTalentType),
    PilotType(PilotType),
    Rarity(Rarity),
}

impl GameObject {
    /// Converts a loaded record into the typed shape named by its tag.
    pub fn from_record(record: &TaggedRecord) -> IResult<Self> {
        let ty = match record.collection_type() {
            Recognized::Known(ty) => *ty,
            Recognized::Unknown(raw) => {
                return Err(ErrorKind::UnsupportedType {
                    collection_type: raw.clone(),
                });
            }
        };

        let value = Value::Object(record.fields().clone());
        let object = match ty {
            CollectionType::Module => Self::Module(serde_json::from_value(value)?),
            CollectionType::ModuleStat => Self::ModuleStat(serde_json::from_value(value)?),
            CollectionType::ModuleRarity => Self::ModuleRarity(serde_json::from_value(value)?),
            CollectionType::Pilot => Self::Pilot(serde_json::from_value(value)?),
            CollectionType::PilotClass => Self::PilotClass(serde_json::from_value(value)?),
            CollectionType::PilotPersonality => {
                Self::PilotPersonality(serde_json::from_value(value)?)
            }
            CollectionType::PilotTalent => Self::PilotTalent(serde_json::from_value(value)?),
            CollectionType::PilotTalentType => {
                Self::PilotTalentType(serde_json::from_value(value)?)
            }
            CollectionType::PilotType => Self::PilotType(serde_json::from_value(value)?),
            CollectionType::Rarity => Self::Rarity(serde_json::from_value(value)?),
        };
        Ok(object)
    }

    pub fn collection_type(&self) -> CollectionType {
        match self {
            Self::Module(_) => CollectionType::Module,
            Self::ModuleStat(_) => CollectionType::ModuleStat,
            Self::ModuleRarity(_) => CollectionType::ModuleRarity,
            Self::Pilot(_) => CollectionType::Pilot,
            Self::PilotClass(_) => CollectionType::PilotClass,
            Self::PilotPersonality(_) => CollectionType::PilotPersonality,
            Self::PilotTalent(_) => CollectionType::PilotTalent,
            Self::PilotTalentType(_) => CollectionType::PilotTalentType,
            Self::PilotType(_) => CollectionType::PilotType,
            Self::Rarity(_) => CollectionType::Rarity,
        }
    }

    fn as_parse_object(&self) -> &dyn ParseObject {
        match self {
            Self::Module(object) => object,
            Self::ModuleStat(object) => object,
            Self::ModuleRarity(object) => object,
            Self::Pilot(object) => object,
            Self::PilotClass(object) => object,
            Self::PilotPersonality(object) => object,
            Self::PilotTalent(object) => object,
            Self::PilotTalentType(object) => object,
            Self::PilotType(object) => object,
            Self::Rarity(object) => object,
        }
    }
}

impl ParseObject for GameObject {
    fn id(&self) -> &str {
        self.as_parse_object().id()
    }

    fn production_status(&self) -> Option<&ProductionStatus> {
        self.as_parse_object().production_status()
    }
}
