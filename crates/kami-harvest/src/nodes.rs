//! Harvest node directory and name-based affinity classification.
//!
//! Nodes are known by index. The built-in table (`data/nodes.yaml`) covers
//! the game map; configured nodes are merged over it. A node's affinity is
//! taken from an explicit tag when one is given and recognised, otherwise
//! classified from keywords in its name.

use std::collections::BTreeMap;

use kami_types::{Affinity, NodeIndex, NodeInfo};
use serde::Deserialize;
use tracing::warn;

use crate::config::{ConfigError, NodeConfig};

/// The built-in node table.
pub const BUILTIN_NODES_YAML: &str = include_str!("../data/nodes.yaml");

/// Top-level shape of a node YAML document.
#[derive(Debug, Deserialize)]
struct NodesFile {
    nodes: Vec<NodeConfig>,
}

/// Classify a node's affinity from keywords in its name.
///
/// Case-insensitive, first rule wins:
///
/// | Keyword                                                  | Affinity |
/// |----------------------------------------------------------|----------|
/// | `scrap`                                                  | Scrap    |
/// | `insect`, `centipedes`                                   | Insect   |
/// | `eerie`, `skeleton`, `graves`, `black pool`, `skull`     | Eerie    |
/// | anything else                                            | Normal   |
pub fn classify_node_name(name: &str) -> Affinity {
    const INSECT: [&str; 2] = ["insect", "centipedes"];
    const EERIE: [&str; 5] = ["eerie", "skeleton", "graves", "black pool", "skull"];

    let lowered = name.to_lowercase();
    if lowered.contains("scrap") {
        Affinity::Scrap
    } else if INSECT.iter().any(|k| lowered.contains(k)) {
        Affinity::Insect
    } else if EERIE.iter().any(|k| lowered.contains(k)) {
        Affinity::Eerie
    } else {
        Affinity::Normal
    }
}

/// Resolve a configured node into its directory entry.
fn node_info(node: NodeConfig) -> NodeInfo {
    let affinity = match node.affinity.as_deref() {
        None => classify_node_name(&node.name),
        Some(raw) => Affinity::parse_lenient(raw).unwrap_or_else(|| {
            warn!(
                node = %node.index,
                name = %node.name,
                affinity = raw,
                "Unrecognised node affinity; classifying from name"
            );
            classify_node_name(&node.name)
        }),
    };
    NodeInfo {
        index: node.index,
        name: node.name,
        affinity,
    }
}

/// Lookup table from node index to [`NodeInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeDirectory {
    nodes: BTreeMap<NodeIndex, NodeInfo>,
}

impl NodeDirectory {
    /// Create an empty directory.
    pub const fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }

    /// The built-in node table.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml(BUILTIN_NODES_YAML)
    }

    /// Build a directory from a YAML document with a top-level `nodes` list.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let file: NodesFile = serde_yml::from_str(yaml)?;
        let mut directory = Self::new();
        for node in file.nodes {
            let index = node.index;
            if directory.nodes.contains_key(&index) {
                return Err(ConfigError::DuplicateNode(index));
            }
            directory.insert(node);
        }
        Ok(directory)
    }

    /// Add or replace a node.
    pub fn insert(&mut self, node: NodeConfig) {
        let info = node_info(node);
        self.nodes.insert(info.index, info);
    }

    /// Merge configured nodes over this directory.
    pub fn extend(&mut self, nodes: impl IntoIterator<Item = NodeConfig>) {
        for node in nodes {
            self.insert(node);
        }
    }

    /// Look up a node without logging.
    pub fn get(&self, index: NodeIndex) -> Option<&NodeInfo> {
        self.nodes.get(&index)
    }

    /// Look up a requested node, logging when it is unknown.
    pub fn resolve(&self, index: NodeIndex) -> Option<&NodeInfo> {
        let found = self.nodes.get(&index);
        if found.is_none() {
            warn!(node = %index, "Unknown harvest node; using neutral affinity");
        }
        found
    }

    /// Iterate over nodes in index order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeInfo> {
        self.nodes.values()
    }

    /// Number of known nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no nodes are known.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn node(index: u32, name: &str, affinity: Option<&str>) -> NodeConfig {
        NodeConfig {
            index: NodeIndex(index),
            name: name.to_owned(),
            affinity: affinity.map(str::to_owned),
        }
    }

    #[test]
    fn names_classify_by_keyword() {
        assert_eq!(classify_node_name("Scrap Confluence"), Affinity::Scrap);
        assert_eq!(classify_node_name("Scrap-Littered Undergrowth"), Affinity::Scrap);
        assert_eq!(classify_node_name("Forest: Insect Node"), Affinity::Insect);
        assert_eq!(classify_node_name("Centipedes"), Affinity::Insect);
        assert_eq!(classify_node_name("Lost Skeleton"), Affinity::Eerie);
        assert_eq!(classify_node_name("Trash-Strewn Graves"), Affinity::Eerie);
        assert_eq!(classify_node_name("BLACK POOL"), Affinity::Eerie);
        assert_eq!(classify_node_name("Guardian Skull"), Affinity::Eerie);
        assert_eq!(classify_node_name("Misty Riverside"), Affinity::Normal);
    }

    #[test]
    fn scrap_wins_over_later_rules() {
        assert_eq!(classify_node_name("Scrap Skull Heap"), Affinity::Scrap);
    }

    #[test]
    fn builtin_table_loads() {
        let directory = NodeDirectory::builtin().unwrap();
        assert!(!directory.is_empty());
        assert_eq!(
            directory.get(NodeIndex(10)).map(|n| n.affinity),
            Some(Affinity::Insect)
        );
        assert_eq!(
            directory.get(NodeIndex(59)).map(|n| n.affinity),
            Some(Affinity::Eerie)
        );
        assert_eq!(
            directory.get(NodeIndex(1)).map(|n| n.name.as_str()),
            Some("Misty Riverside")
        );
    }

    #[test]
    fn explicit_affinity_overrides_name() {
        let mut directory = NodeDirectory::new();
        directory.extend([
            node(1, "Misty Riverside", Some("insect")),
            node(2, "Scrap Paths", Some("not-a-type")),
        ]);
        assert_eq!(
            directory.get(NodeIndex(1)).map(|n| n.affinity),
            Some(Affinity::Insect)
        );
        assert_eq!(
            directory.get(NodeIndex(2)).map(|n| n.affinity),
            Some(Affinity::Scrap)
        );
    }

    #[test]
    fn configured_nodes_replace_builtin_entries() {
        let mut directory = NodeDirectory::builtin().unwrap();
        let before = directory.len();
        directory.extend([node(1, "Renamed Graves", None), node(9_999, "New Scrap", None)]);
        assert_eq!(Some(directory.len()), before.checked_add(1));
        assert_eq!(
            directory.get(NodeIndex(1)).map(|n| n.affinity),
            Some(Affinity::Eerie)
        );
    }

    #[test]
    fn unknown_node_resolves_to_none() {
        let directory = NodeDirectory::new();
        assert!(directory.resolve(NodeIndex(404)).is_none());
    }

    #[test]
    fn duplicate_rows_in_table_are_rejected() {
        let yaml = "nodes:\n  - { index: 1, name: \"A\" }\n  - { index: 1, name: \"B\" }\n";
        assert!(matches!(
            NodeDirectory::from_yaml(yaml),
            Err(ConfigError::DuplicateNode(NodeIndex(1)))
        ));
    }
}
