use crate::flow::FlowEdgeDefinition;
use crate::model::{NodeKind, UpdlNode};
use ahash::AHashMap;
use tracing::{debug, warn};

/// Whether an edge `child -> owner` expresses ownership.
pub fn accepts_owner(child: NodeKind, owner: NodeKind) -> bool {
    use NodeKind::*;
    matches!(
        (child, owner),
        (Entity, Space)
            | (Component, Entity)
            | (Event, Entity)
            | (Action, Event)
            | (Data, Space)
            | (Data, Data)
            | (Camera, Space)
            | (Light, Space)
    )
}

/// Resolved ownership of every node, built once from the flow edges.
///
/// Edges whose endpoints are missing, or whose kinds do not form an entry of
/// the ownership schema, are ignored. When a child has several owner edges the
/// last one in edge order wins. `space -> space` edges form the scene chain
/// instead, pointing from a scene to its successor.
#[derive(Debug, Clone, Default)]
pub struct OwnershipIndex {
    owners: AHashMap<String, String>,
    children: AHashMap<String, Vec<String>>,
    next_scene: AHashMap<String, String>,
    previous_scene: AHashMap<String, String>,
}

impl OwnershipIndex {
    pub fn resolve(nodes: &[UpdlNode], edges: &[FlowEdgeDefinition]) -> Self {
        let kinds: AHashMap<&str, NodeKind> = nodes.iter().map(|n| (n.id(), n.kind())).collect();

        let mut owners = AHashMap::new();
        let mut next_scene = AHashMap::new();
        let mut previous_scene = AHashMap::new();

        for edge in edges {
            let (Some(&source_kind), Some(&target_kind)) = (
                kinds.get(edge.source.as_str()),
                kinds.get(edge.target.as_str()),
            ) else {
                debug!(edge_id = %edge.id, "Skipping dangling edge {} -> {}", edge.source, edge.target);
                continue;
            };
            if edge.source == edge.target {
                debug!(edge_id = %edge.id, "Skipping self-referencing edge on '{}'", edge.source);
                continue;
            }

            if source_kind == NodeKind::Space && target_kind == NodeKind::Space {
                Self::link(&mut next_scene, &edge.source, &edge.target, "successor");
                Self::link(&mut previous_scene, &edge.target, &edge.source, "predecessor");
            } else if accepts_owner(source_kind, target_kind) {
                Self::link(&mut owners, &edge.source, &edge.target, "owner");
            } else {
                debug!(
                    edge_id = %edge.id,
                    "Ignoring {} -> {} edge: not an ownership relation",
                    source_kind,
                    target_kind
                );
            }
        }

        // Listed in node order so assembled collections follow the flow's node array.
        let mut children: AHashMap<String, Vec<String>> = AHashMap::new();
        for node in nodes {
            if let Some(owner) = owners.get(node.id()) {
                children
                    .entry(owner.clone())
                    .or_default()
                    .push(node.id().to_string());
            }
        }

        Self {
            owners,
            children,
            next_scene,
            previous_scene,
        }
    }

    fn link(map: &mut AHashMap<String, String>, from: &str, to: &str, relation: &str) {
        if let Some(previous) = map.insert(from.to_string(), to.to_string()) {
            if previous != to {
                warn!(
                    node_id = %from,
                    "Competing {} edges ('{}' and '{}'); the last one wins",
                    relation,
                    previous,
                    to
                );
            }
        }
    }

    pub fn owner_of(&self, id: &str) -> Option<&str> {
        self.owners.get(id).map(String::as_str)
    }

    pub fn children_of(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn next_scene(&self, space_id: &str) -> Option<&str> {
        self.next_scene.get(space_id).map(String::as_str)
    }

    pub fn previous_scene(&self, space_id: &str) -> Option<&str> {
        self.previous_scene.get(space_id).map(String::as_str)
    }

    pub fn is_chained(&self, space_id: &str) -> bool {
        self.next_scene.contains_key(space_id) || self.previous_scene.contains_key(space_id)
    }

    pub fn has_scene_chain(&self) -> bool {
        !self.next_scene.is_empty()
    }
}
