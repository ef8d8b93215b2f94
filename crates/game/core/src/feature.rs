//! Feature definitions and normalization of raw feature entries.
//!
//! A feature is a visual/interactive attachment on a node (the ship, a gem, a
//! person to talk to) that points at the action it represents. Raw entries may
//! be partial; [`normalize_feature`] merges them with the canonical definition
//! for their kind, instance fields winning, field by field.

/// Known feature kinds. Unrecognized type strings map to [`FeatureKind::Unknown`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FeatureKind {
    Ship,
    Gem,
    Person,
    #[default]
    Unknown,
}

impl FeatureKind {
    /// Parses a type string, mapping anything unrecognized to `Unknown`.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or(FeatureKind::Unknown)
    }
}

/// Broad role of a feature, used by renderers to pick a presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum FeatureCategory {
    Structure,
    Pickup,
    Character,
    Decor,
}

/// Canonical definition for a feature kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureDefinition {
    pub kind: FeatureKind,
    pub title: &'static str,
    pub category: FeatureCategory,
}

const FALLBACK_FEATURE: FeatureDefinition = FeatureDefinition {
    kind: FeatureKind::Unknown,
    title: "Unknown Feature",
    category: FeatureCategory::Decor,
};

static FEATURES: [FeatureDefinition; 3] = [
    FeatureDefinition {
        kind: FeatureKind::Ship,
        title: "Ship",
        category: FeatureCategory::Structure,
    },
    FeatureDefinition {
        kind: FeatureKind::Gem,
        title: "Gem",
        category: FeatureCategory::Pickup,
    },
    FeatureDefinition {
        kind: FeatureKind::Person,
        title: "Castaway",
        category: FeatureCategory::Character,
    },
];

/// Looks up the definition for a kind; `Unknown` gets the fallback record.
pub fn feature_definition(kind: FeatureKind) -> &'static FeatureDefinition {
    FEATURES
        .iter()
        .find(|definition| definition.kind == kind)
        .unwrap_or(&FALLBACK_FEATURE)
}

/// Fully resolved feature attached to a node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Feature {
    pub id: String,
    pub kind: FeatureKind,
    pub title: String,
    pub category: FeatureCategory,
    /// Action this feature anchors to; must exist on the same node.
    pub action_id: Option<String>,
    pub item: Option<String>,
    pub amount: Option<u32>,
    /// Biome the art should match (the ship is drawn per dock variant).
    pub biome_variant: Option<String>,
}

impl Feature {
    /// Builds a feature from its kind's canonical definition.
    pub fn new(id: impl Into<String>, kind: FeatureKind) -> Self {
        let definition = feature_definition(kind);
        Self {
            id: id.into(),
            kind,
            title: definition.title.to_string(),
            category: definition.category,
            action_id: None,
            item: None,
            amount: None,
            biome_variant: None,
        }
    }

    #[must_use]
    pub fn with_action(mut self, action_id: impl Into<String>) -> Self {
        self.action_id = Some(action_id.into());
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: impl Into<String>, amount: u32) -> Self {
        self.item = Some(item.into());
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn with_biome_variant(mut self, biome: impl Into<String>) -> Self {
        self.biome_variant = Some(biome.into());
        self
    }
}

/// A raw, possibly partial feature record as authored in content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FeatureEntry {
    pub id: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: Option<String>,
    pub title: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "actionId"))]
    pub action_id: Option<String>,
    pub item: Option<String>,
    pub amount: Option<u32>,
    #[cfg_attr(feature = "serde", serde(alias = "biomeVariant"))]
    pub biome_variant: Option<String>,
}

impl FeatureEntry {
    /// Fills every field this entry leaves unset from `fallback`.
    pub fn fill_missing_from(&mut self, fallback: &FeatureEntry) {
        fn fill<T: Clone>(slot: &mut Option<T>, fallback: &Option<T>) {
            if slot.is_none() {
                slot.clone_from(fallback);
            }
        }
        fill(&mut self.id, &fallback.id);
        fill(&mut self.kind, &fallback.kind);
        fill(&mut self.title, &fallback.title);
        fill(&mut self.action_id, &fallback.action_id);
        fill(&mut self.item, &fallback.item);
        fill(&mut self.amount, &fallback.amount);
        fill(&mut self.biome_variant, &fallback.biome_variant);
    }
}

/// Merges a raw entry with its canonical definition.
///
/// A missing entry normalizes to `None`, never to a placeholder. A missing id
/// is derived from the action id, then from the kind.
pub fn normalize_feature(entry: Option<&FeatureEntry>) -> Option<Feature> {
    let entry = entry?;
    let kind = entry
        .kind
        .as_deref()
        .map(FeatureKind::parse_lenient)
        .unwrap_or_default();
    let definition = feature_definition(kind);

    let id = match (&entry.id, &entry.action_id) {
        (Some(id), _) => id.clone(),
        (None, Some(action_id)) => format!("{action_id}_feature"),
        (None, None) => format!("{kind}_feature"),
    };

    Some(Feature {
        id,
        kind,
        title: entry
            .title
            .clone()
            .unwrap_or_else(|| definition.title.to_string()),
        category: definition.category,
        action_id: entry.action_id.clone(),
        item: entry.item.clone(),
        amount: entry.amount,
        biome_variant: entry.biome_variant.clone(),
    })
}

/// Normalizes a sequence of entries, dropping the missing ones.
pub fn normalize_features<'a, I>(entries: I) -> Vec<Feature>
where
    I: IntoIterator<Item = Option<&'a FeatureEntry>>,
{
    entries.into_iter().filter_map(normalize_feature).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_fields_override_definition() {
        let entry = FeatureEntry {
            id: Some("beach_gem".into()),
            kind: Some("gem".into()),
            title: Some("Shiny Gem".into()),
            action_id: Some("beach_pick_gem".into()),
            item: Some("gem".into()),
            amount: Some(1),
            biome_variant: None,
        };

        let feature = normalize_feature(Some(&entry)).unwrap();
        assert_eq!(feature.kind, FeatureKind::Gem);
        assert_eq!(feature.title, "Shiny Gem");
        assert_eq!(feature.category, FeatureCategory::Pickup);
        assert_eq!(feature.action_id.as_deref(), Some("beach_pick_gem"));
    }

    #[test]
    fn definition_fills_missing_fields() {
        let entry = FeatureEntry {
            kind: Some("SHIP".into()),
            action_id: Some("ship_leave".into()),
            ..FeatureEntry::default()
        };

        let feature = normalize_feature(Some(&entry)).unwrap();
        assert_eq!(feature.kind, FeatureKind::Ship);
        assert_eq!(feature.title, "Ship");
        assert_eq!(feature.id, "ship_leave_feature");
    }

    #[test]
    fn fill_keeps_authored_fields() {
        let mut entry = FeatureEntry {
            kind: Some("gem".into()),
            title: Some("Beach Gem".into()),
            action_id: Some("beach_pick_gem".into()),
            ..FeatureEntry::default()
        };
        let catalogue = FeatureEntry {
            kind: Some("person".into()),
            title: Some("Sea Glass".into()),
            item: Some("gem".into()),
            amount: Some(1),
            ..FeatureEntry::default()
        };

        entry.fill_missing_from(&catalogue);
        assert_eq!(entry.kind.as_deref(), Some("gem"));
        assert_eq!(entry.title.as_deref(), Some("Beach Gem"));
        assert_eq!(entry.item.as_deref(), Some("gem"));
        assert_eq!(entry.amount, Some(1));
        assert_eq!(entry.id, None);
    }

    #[test]
    fn unknown_type_uses_fallback_definition() {
        let entry = FeatureEntry {
            kind: Some("volcano".into()),
            ..FeatureEntry::default()
        };

        let feature = normalize_feature(Some(&entry)).unwrap();
        assert_eq!(feature.kind, FeatureKind::Unknown);
        assert_eq!(feature.title, "Unknown Feature");
        assert_eq!(feature.category, FeatureCategory::Decor);
        assert_eq!(feature.id, "unknown_feature");
    }

    #[test]
    fn missing_entries_are_dropped() {
        let gem = FeatureEntry {
            kind: Some("gem".into()),
            ..FeatureEntry::default()
        };
        assert!(normalize_feature(None).is_none());

        let features = normalize_features([None, Some(&gem), None]);
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].kind, FeatureKind::Gem);
    }
}
