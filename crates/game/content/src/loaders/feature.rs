//! Raw feature entry loader and the feature catalogue.
//!
//! A catalogue is a JSON array of feature entries keyed by action id. When a
//! layout is dressed, every layout feature anchored to a catalogued action
//! takes the catalogue's value for each field it leaves unset.

use std::path::Path;

use island_core::{Feature, FeatureEntry, ManualLayout, normalize_features};

use crate::loaders::{LoadResult, read_file};

/// Loader for feature entries from JSON files.
///
/// The file must hold an array. Entries that are not objects or do not match
/// the entry shape are skipped with a warning instead of failing the load.
pub struct FeatureLoader;

impl FeatureLoader {
    /// Load the usable raw entries of a catalogue file.
    pub fn load_catalogue(path: &Path) -> LoadResult<Vec<FeatureEntry>> {
        let content = read_file(path)?;
        let entries = Self::parse_entries(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;
        Ok(entries.into_iter().flatten().collect())
    }

    /// Fills unset fields of layout features from catalogue entries sharing
    /// their action id. Returns the number of features touched.
    pub fn dress_layout(layout: &mut ManualLayout, catalogue: &[FeatureEntry]) -> usize {
        let mut dressed = 0;
        for entry in layout.nodes.iter_mut().flat_map(|node| node.features.iter_mut()) {
            let Some(action_id) = entry.action_id.as_deref() else {
                continue;
            };
            if let Some(fallback) = catalogue
                .iter()
                .find(|fallback| fallback.action_id.as_deref() == Some(action_id))
            {
                entry.fill_missing_from(fallback);
                dressed += 1;
            }
        }
        tracing::debug!("Dressed {} features of layout '{}'", dressed, layout.id);
        dressed
    }

    /// Parse and normalize features from JSON text.
    pub fn parse(content: &str) -> LoadResult<Vec<Feature>> {
        let entries = Self::parse_entries(content)?;
        Ok(normalize_features(entries.iter().map(Option::as_ref)))
    }

    /// Parse raw entries, keeping a `None` slot for every unusable one.
    pub fn parse_entries(content: &str) -> LoadResult<Vec<Option<FeatureEntry>>> {
        let values: Vec<serde_json::Value> = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse features JSON: {}", e))?;

        Ok(values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                if !value.is_object() {
                    tracing::warn!("Skipping feature entry {}: not an object", index);
                    return None;
                }
                serde_json::from_value(value)
                    .map_err(|e| tracing::warn!("Skipping feature entry {}: {}", index, e))
                    .ok()
            })
            .collect())
    }
}
