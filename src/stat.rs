//! Stat values embedded in talent descriptions.
//!
//! Talent text contains placeholders for stat values. Each value is scaled
//! and formatted according to its [`ModuleStat`] before it is substituted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::Collection;
use crate::error::IResult;
use crate::localization::{LocalizationKey, default_string};
use crate::objects::types::{ModuleStat, StatValue};

/// Pattern used by stats that predate per-stat unit patterns.
pub const DEFAULT_UNIT_PATTERN: &str = "{Amount}{Unit}";

/// Display parameters for one stat referenced by a talent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatValueChoice<'a> {
    pub pattern: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<&'a LocalizationKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_exponent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_key: Option<&'a str>,
    /// Scaled values, keyed by choice index. Talents only ever use choice 0.
    pub choices: BTreeMap<u32, f64>,
}

impl StatValueChoice<'_> {
    /// Formats choice `index` with `unit_text` as the unit.
    pub fn format(&self, index: u32, unit_text: &str) -> Option<String> {
        let value = *self.choices.get(&index)?;
        Some(format_stat_value(
            value,
            self.pattern,
            unit_text,
            self.decimal_places,
        ))
    }
}

/// Builds the display parameters for every stat in `stats` that has a
/// matching entry in `module_stats`. Unknown stat ids are skipped.
pub fn stat_value_choices<'a>(
    stats: &[StatValue],
    module_stats: &'a Collection<ModuleStat>,
) -> IResult<Collection<StatValueChoice<'a>>> {
    let mut choices = Collection::with_capacity(stats.len());
    for StatValue { stat_id, value } in stats {
        let Some(stat) = module_stats.get(stat_id.as_str()) else {
            continue;
        };

        let pattern = default_string(stat.unit_pattern.as_ref())?.unwrap_or(DEFAULT_UNIT_PATTERN);
        let scaled = value * stat.unit_scaler.unwrap_or(1.0);

        choices.insert(
            stat_id.clone(),
            StatValueChoice {
                pattern,
                unit_name: stat.unit_name.as_ref(),
                unit_exponent: stat.unit_exponent,
                decimal_places: stat.decimal_places,
                short_key: stat.short_key.as_deref(),
                choices: BTreeMap::from([(0, scaled)]),
            },
        );
    }
    Ok(choices)
}

/// Substitutes `value` and `unit_text` into `pattern`.
///
/// `{Amount}` gets the value with `decimal_places` fixed decimals, or its
/// shortest form when unset. Only the first occurrence of each placeholder
/// is replaced.
pub fn format_stat_value(
    value: f64,
    pattern: &str,
    unit_text: &str,
    decimal_places: Option<u32>,
) -> String {
    let amount = match decimal_places {
        Some(places) => format!("{value:.prec$}", prec = places as usize),
        None => value.to_string(),
    };
    pattern
        .replacen("{Amount}", &amount, 1)
        .replacen("{Unit}", unit_text, 1)
}
