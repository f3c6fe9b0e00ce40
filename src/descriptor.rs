//! Uniform display views over typed game objects.
//!
//! List and reference widgets show any object as an icon, a name, and
//! optionally a color and a tooltip. Each object kind stores those in
//! different fields; [`describe`] and [`page_ref`] pick them out.

use serde::Serialize;

use crate::error::{ErrorKind, IResult};
use crate::localization::LocalizationKey;
use crate::objects::{GameObject, ParseObject};

/// What a reference to another object renders as.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Descriptor<'a> {
    pub text: &'a LocalizationKey,
    pub icon_path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<&'a LocalizationKey>,
    /// Whether the reference links to the object's own page.
    pub use_href: bool,
}

/// Heading data for an object's own page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageRef<'a> {
    pub text: &'a LocalizationKey,
    pub icon_path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'a str>,
}

fn unsupported(object: &GameObject) -> ErrorKind {
    ErrorKind::UnsupportedType {
        collection_type: object.collection_type().name().to_string(),
    }
}

fn required_name<'a>(
    object: &GameObject,
    name: Option<&'a LocalizationKey>,
) -> IResult<&'a LocalizationKey> {
    name.ok_or_else(|| ErrorKind::MissingName {
        collection_type: object.collection_type().name().to_string(),
        id: object.id().to_string(),
    })
}

/// Describes `object` for reference lists and hover cards.
///
/// A module without a name is an error: only modules that are not ready for
/// display omit it, and those should have been filtered out already.
pub fn describe(object: &GameObject) -> IResult<Descriptor<'_>> {
    let descriptor = match object {
        GameObject::Module(module) => Descriptor {
            text: required_name(object, module.name.as_ref())?,
            icon_path: module.inventory_icon_path.as_deref().unwrap_or_default(),
            color: None,
            hover: module.description.as_ref(),
            use_href: true,
        },
        GameObject::PilotClass(class) => Descriptor {
            text: &class.name,
            icon_path: &class.badge.image_path,
            color: Some(class.badge.hex.as_str()),
            hover: None,
            use_href: true,
        },
        GameObject::Pilot(pilot) => Descriptor {
            text: &pilot.first_name,
            icon_path: &pilot.image_path,
            color: None,
            hover: None,
            use_href: true,
        },
        GameObject::PilotTalent(talent) => Descriptor {
            text: &talent.name,
            icon_path: &talent.image_path,
            color: None,
            hover: talent.description.as_ref(),
            use_href: true,
        },
        GameObject::PilotTalentType(talent_type) => Descriptor {
            text: required_name(object, talent_type.name.as_ref())?,
            icon_path: talent_type.image_path.as_deref().unwrap_or_default(),
            color: None,
            hover: talent_type.description.as_ref(),
            use_href: true,
        },
        GameObject::PilotPersonality(personality) => Descriptor {
            text: &personality.name,
            icon_path: &personality.icon_path,
            color: None,
            hover: None,
            use_href: true,
        },
        GameObject::Rarity(rarity) => Descriptor {
            text: &rarity.name,
            icon_path: "",
            color: Some(rarity.hex.as_str()),
            hover: None,
            use_href: false,
        },
        GameObject::ModuleStat(_) | GameObject::ModuleRarity(_) | GameObject::PilotType(_) => {
            return Err(unsupported(object));
        }
    };
    Ok(descriptor)
}

/// Page heading for `object`. Covers the same kinds as [`describe`] plus
/// pilot types, and never carries hover text.
pub fn page_ref(object: &GameObject) -> IResult<PageRef<'_>> {
    if let GameObject::PilotType(pilot_type) = object {
        return Ok(PageRef {
            text: required_name(object, pilot_type.name.as_ref())?,
            icon_path: "",
            color: None,
        });
    }

    let Descriptor {
        text,
        icon_path,
        color,
        ..
    } = describe(object)?;
    Ok(PageRef {
        text,
        icon_path,
        color,
    })
}
