use serde::Serialize;

use crate::data::Collection;
use crate::objects::types::{Pilot, PilotTalent};

/// `level` of a talent no pilot grants.
pub const LEVEL_NOT_FOUND: i32 = -1;

/// A talent together with where a pilot unlocks it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedTalent<T = PilotTalent> {
    #[serde(flatten)]
    pub talent: T,
    /// Talent type of the granting level, empty if not granted anywhere.
    pub talent_type_id: String,
    /// 1-based pilot level, or [`LEVEL_NOT_FOUND`].
    pub level: i32,
}

impl<T> EnrichedTalent<T> {
    pub fn is_granted(&self) -> bool {
        self.level != LEVEL_NOT_FOUND
    }
}

/// Finds the first pilot level that grants `talent_id`, scanning pilots in
/// collection order and each pilot's levels in order.
pub fn find_granting_level<'a>(
    talent_id: &str,
    pilots: &'a Collection<Pilot>,
) -> Option<(usize, &'a str)> {
    pilots.values().find_map(|pilot| {
        pilot
            .levels
            .iter()
            .enumerate()
            .find(|(_, level)| level.talents.iter().any(|talent| talent == talent_id))
            .map(|(idx, level)| (idx + 1, level.talent_type_id.as_str()))
    })
}

/// Attaches to every talent the talent type and level at which some pilot
/// grants it. Talents nobody grants get [`LEVEL_NOT_FOUND`] and an empty type.
///
/// The result has exactly the keys of `talents`, in the same order.
pub fn enrich_talents<T: Clone>(
    talents: &Collection<T>,
    pilots: &Collection<Pilot>,
) -> Collection<EnrichedTalent<T>> {
    talents.map_values(|id, talent| {
        let (level, talent_type_id) = match find_granting_level(id, pilots) {
            Some((level, talent_type_id)) => (level as i32, talent_type_id.to_string()),
            None => (LEVEL_NOT_FOUND, String::new()),
        };

        EnrichedTalent {
            talent: talent.clone(),
            talent_type_id,
            level,
        }
    })
}

#[cfg(test)]
mod test {
    use serde_json::{Value, json};

    use super::*;

    fn pilots(value: Value) -> Collection<Pilot> {
        serde_json::from_value(value).unwrap()
    }

    fn pilot(id: &str, levels: Value) -> Value {
        json!({
            "id": id,
            "first_name": {"InvariantString": id},
            "image_path": "/Textures/pilot.png",
            "levels": levels
        })
    }

    fn talents(ids: &[&str]) -> Collection<Value> {
        ids.iter()
            .map(|id| (id.to_string(), json!({"id": id})))
            .collect()
    }

    fn summary(enriched: &Collection<EnrichedTalent<Value>>) -> Vec<(&str, i32, &str)> {
        enriched
            .iter()
            .map(|(id, talent)| (id.as_str(), talent.level, talent.talent_type_id.as_str()))
            .collect()
    }

    #[test]
    fn levels_are_one_based() {
        let pilots = pilots(json!({
            "P1": pilot("P1", json!([
                {"talent_type_id": "T1", "talents": ["A"]},
                {"talent_type_id": "T2", "talents": ["B"]}
            ]))
        }));

        let enriched = enrich_talents(&talents(&["A", "B", "C"]), &pilots);
        assert_eq!(
            summary(&enriched),
            [("A", 1, "T1"), ("B", 2, "T2"), ("C", LEVEL_NOT_FOUND, "")]
        );
        assert!(!enriched.get("C").unwrap().is_granted());
        assert_eq!(enriched.get("A").unwrap().talent, json!({"id": "A"}));
    }

    #[test]
    fn third_level_is_level_three() {
        let pilots = pilots(json!({
            "P1": pilot("P1", json!([
                {"talent_type_id": "T1", "talents": []},
                {"talent_type_id": "T2", "talents": ["X"]},
                {"talent_type_id": "T3", "talents": ["Y", "Z"]}
            ]))
        }));

        let enriched = enrich_talents(&talents(&["Z"]), &pilots);
        assert_eq!(summary(&enriched), [("Z", 3, "T3")]);
    }

    #[test]
    fn empty_inputs() {
        let pilots_with_levels = pilots(json!({
            "P1": pilot("P1", json!([{"talent_type_id": "T1", "talents": ["A"]}]))
        }));
        assert!(enrich_talents(&Collection::<Value>::new(), &pilots_with_levels).is_empty());

        let enriched = enrich_talents(&talents(&["A", "B"]), &Collection::new());
        assert_eq!(
            summary(&enriched),
            [("A", LEVEL_NOT_FOUND, ""), ("B", LEVEL_NOT_FOUND, "")]
        );

        let no_levels = pilots(json!({"P1": pilot("P1", json!([]))}));
        let enriched = enrich_talents(&talents(&["A"]), &no_levels);
        assert_eq!(summary(&enriched), [("A", LEVEL_NOT_FOUND, "")]);
    }

    #[test]
    fn first_pilot_in_file_order_wins() {
        let pilots = pilots(json!({
            "P2": pilot("P2", json!([
                {"talent_type_id": "T9", "talents": []},
                {"talent_type_id": "T8", "talents": ["A"]}
            ])),
            "P1": pilot("P1", json!([{"talent_type_id": "T1", "talents": ["A"]}]))
        }));

        let enriched = enrich_talents(&talents(&["A"]), &pilots);
        assert_eq!(summary(&enriched), [("A", 2, "T8")]);
    }

    #[test]
    fn enriched_talent_serializes_flat() {
        let talent: PilotTalent = serde_json::from_value(json!({
            "id": "TAL_1",
            "name": {"InvariantString": "Overclock"},
            "image_path": "/Textures/overclock.png",
            "cooldown": 12.0
        }))
        .unwrap();
        let pilots = pilots(json!({
            "P1": pilot("P1", json!([{"talent_type_id": "TT_Attack", "talents": ["TAL_1"]}]))
        }));
        let talents: Collection<PilotTalent> = [("TAL_1".to_string(), talent)].into_iter().collect();

        let value = serde_json::to_value(enrich_talents(&talents, &pilots)).unwrap();
        assert_eq!(value["TAL_1"]["id"], "TAL_1");
        assert_eq!(value["TAL_1"]["cooldown"], 12.0);
        assert_eq!(value["TAL_1"]["level"], 1);
        assert_eq!(value["TAL_1"]["talent_type_id"], "TT_Attack");
    }
}
