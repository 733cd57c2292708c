use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Reference from a catalog layer to a sub-layer of a map source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    pub map_source_name: String,
    pub layer_name: String,
}

impl SourceRef {
    pub fn new(map_source_name: &str, layer_name: &str) -> Self {
        Self {
            map_source_name: map_source_name.to_string(),
            layer_name: layer_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupNode {
    #[serde(default)]
    pub title: Option<String>,
    pub children: Vec<CatalogNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerNode {
    #[serde(default)]
    pub title: Option<String>,
    pub src: Vec<SourceRef>,
}

impl LayerNode {
    pub fn new(title: &str, src: Vec<SourceRef>) -> Self {
        Self {
            title: Some(title.to_string()),
            src,
        }
    }
}

/// Node of the user-facing layer tree. Nodes with `children` are groups, all others are
/// layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogNode {
    Group(GroupNode),
    Layer(LayerNode),
}

impl CatalogNode {
    /// All layers below this node, depth first, parents before children and siblings in
    /// their listed order.
    pub fn layers(&self) -> Vec<&LayerNode> {
        let mut layers = Vec::new();
        collect_layers(self, &mut layers);
        layers
    }
}

fn collect_layers<'a>(node: &'a CatalogNode, layers: &mut Vec<&'a LayerNode>) {
    match node {
        CatalogNode::Group(group) => {
            for child in &group.children {
                collect_layers(child, layers);
            }
        }
        CatalogNode::Layer(layer) => layers.push(layer),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSourceLayer {
    pub name: String,
    pub on: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSource {
    pub z_index: i64,
    pub layers: Vec<MapSourceLayer>,
}

impl MapSource {
    pub fn is_sub_layer_on(&self, name: &str) -> bool {
        self.layers
            .iter()
            .any(|layer| layer.name == name && layer.on)
    }
}

/// Snapshot of every map source, keyed by name.
pub type MapSourceState = HashMap<String, MapSource>;

/// A visible layer paired with the draw order of its map source.
#[derive(Debug, Clone, PartialEq)]
pub struct ZOrderEntry<'a> {
    pub z_index: i64,
    pub layer: &'a LayerNode,
}

#[cfg(test)]
mod tests {
    use super::{CatalogNode, MapSourceState, SourceRef};

    #[test]
    fn test_deserialize_catalog() {
        let catalog: CatalogNode = serde_yaml::from_str(
            r#"
title: root
children:
  - title: Roads
    src: [{mapSourceName: osm, layerName: roads}]
  - title: Water
    children:
      - title: Rivers
        src:
          - {mapSourceName: hydro, layerName: rivers}
          - {mapSourceName: hydro, layerName: labels}
      - children: []
  - src: []
"#,
        )
        .unwrap();

        let layers = catalog.layers();
        let titles: Vec<Option<&str>> = layers
            .iter()
            .map(|layer| layer.title.as_deref())
            .collect();
        assert_eq!(vec![Some("Roads"), Some("Rivers"), None], titles);
        assert_eq!(
            vec![
                SourceRef::new("hydro", "rivers"),
                SourceRef::new("hydro", "labels")
            ],
            layers[1].src
        );
    }

    #[test]
    fn test_deserialize_map_sources() {
        let map_sources: MapSourceState = serde_yaml::from_str(
            r#"
osm:
  zIndex: 3
  layers:
    - {name: roads, on: true}
    - {name: labels, on: false}
"#,
        )
        .unwrap();
        let osm = &map_sources["osm"];
        assert_eq!(3, osm.z_index);
        assert!(osm.is_sub_layer_on("roads"));
        assert!(!osm.is_sub_layer_on("labels"));
        assert!(!osm.is_sub_layer_on("water"));
    }
}
