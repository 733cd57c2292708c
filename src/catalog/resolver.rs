use crate::error::{Error, Result};

use super::node::{CatalogNode, LayerNode, MapSource, MapSourceState, ZOrderEntry};

fn resolve_map_source<'a>(map_sources: &'a MapSourceState, name: &str) -> Result<&'a MapSource> {
    map_sources
        .get(name)
        .ok_or_else(|| Error::MissingMapSource(name.to_string()))
}

/// Whether every sub-layer referenced by `layer` is switched on.
///
/// A reference to a map source missing from the snapshot turns the whole layer off, as does
/// a snapshot that has not been loaded yet.
pub fn is_layer_on(map_sources: Option<&MapSourceState>, layer: &LayerNode) -> bool {
    let Some(map_sources) = map_sources else {
        return false;
    };
    layer.src.iter().all(|source_ref| {
        match resolve_map_source(map_sources, &source_ref.map_source_name) {
            Ok(map_source) => map_source.is_sub_layer_on(&source_ref.layer_name),
            Err(err) => {
                log::debug!("Treating layer as off: {}", err);
                false
            }
        }
    })
}

/// Draw order of `layer`.
///
/// Only the first source reference counts, even for layers combining several map sources.
pub fn z_value(map_sources: &MapSourceState, layer: &LayerNode) -> Result<i64> {
    let first_source = layer.src.first().ok_or(Error::LayerWithoutSource)?;
    Ok(resolve_map_source(map_sources, &first_source.map_source_name)?.z_index)
}

/// Visible layers of the catalog, front to back.
///
/// Layers are sorted by descending z-index. The sort is stable, so layers sharing a z-index
/// keep their catalog order (see [`CatalogNode::layers`]).
pub fn z_ordered_layers<'a>(
    catalog: &'a CatalogNode,
    map_sources: Option<&MapSourceState>,
) -> Vec<ZOrderEntry<'a>> {
    let Some(map_sources) = map_sources else {
        return Vec::new();
    };
    let mut entries: Vec<ZOrderEntry> = catalog
        .layers()
        .into_iter()
        .filter(|layer| is_layer_on(Some(map_sources), layer))
        .filter_map(|layer| match z_value(map_sources, layer) {
            Ok(z_index) => Some(ZOrderEntry { z_index, layer }),
            Err(err) => {
                log::warn!("Skipping layer {:?} in draw order: {}", layer.title, err);
                None
            }
        })
        .collect();
    entries.sort_by(|a, b| b.z_index.cmp(&a.z_index));
    entries
}
