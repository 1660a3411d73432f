use super::resolver::OwnershipIndex;
use crate::model::{Data, MultiSceneResult, SceneData, Space};
use ahash::{AHashMap, AHashSet};
use tracing::warn;

/// Orders the chained Spaces by following `space -> space` edges.
///
/// The root is the first chained Space (node order) without a predecessor; in a
/// pure cycle the first chained Space is used. Traversal stops at a revisited Space.
pub fn order_scene_chain<'s>(spaces: &'s [Space], index: &OwnershipIndex) -> Vec<&'s Space> {
    let chained: Vec<&Space> = spaces.iter().filter(|s| index.is_chained(&s.id)).collect();
    let root = match chained
        .iter()
        .find(|s| index.previous_scene(&s.id).is_none())
    {
        Some(root) => *root,
        None => match chained.first() {
            Some(first) => {
                warn!(space_id = %first.id, "Scene chain has no start; starting from the first chained Space");
                *first
            }
            None => return Vec::new(),
        },
    };

    let by_id: AHashMap<&str, &Space> = spaces.iter().map(|s| (s.id.as_str(), s)).collect();
    let mut visited = AHashSet::new();
    let mut order = Vec::new();
    let mut current = Some(root);
    while let Some(space) = current {
        if !visited.insert(space.id.as_str()) {
            warn!(space_id = %space.id, "Scene chain loops back; stopping");
            break;
        }
        order.push(space);
        current = index
            .next_scene(&space.id)
            .and_then(|id| by_id.get(id).copied());
    }

    for space in spaces.iter().filter(|s| !visited.contains(s.id.as_str())) {
        warn!(space_id = %space.id, "Space is not part of the scene chain and is ignored");
    }
    order
}

/// Builds the multi-scene view when at least two Spaces are chained.
///
/// The terminal scene is the results scene when it has neither entities nor
/// data. Otherwise, if any scene carries scoring data, a synthetic results
/// scene is appended after it.
pub fn classify(spaces: &[Space], index: &OwnershipIndex) -> Option<MultiSceneResult> {
    if spaces.len() < 2 {
        return None;
    }
    let chain = order_scene_chain(spaces, index);
    if chain.len() < 2 {
        return None;
    }

    let mut scenes: Vec<SceneData> = chain
        .iter()
        .enumerate()
        .map(|(i, space)| SceneData {
            scene_index: i,
            space_id: space.id.clone(),
            space_data: (*space).clone(),
            data_nodes: space.flattened_datas(),
            object_nodes: space.entities.clone(),
            next_scene_id: chain.get(i + 1).map(|next| next.id.clone()),
            is_last_scene: false,
            is_results_scene: false,
        })
        .collect();

    let has_scoring = scenes
        .iter()
        .any(|s| s.data_nodes.iter().any(Data::is_scoring));

    if let Some(terminal) = scenes.last_mut() {
        if terminal.space_data.entities.is_empty() && terminal.data_nodes.is_empty() {
            terminal.is_results_scene = true;
        } else if has_scoring {
            let results_id = format!("{}-results", terminal.space_id);
            terminal.next_scene_id = Some(results_id.clone());
            let scene_index = terminal.scene_index + 1;
            scenes.push(SceneData {
                scene_index,
                space_id: results_id.clone(),
                space_data: Space {
                    id: results_id,
                    name: "Results".to_string(),
                    show_points: Some(true),
                    ..Default::default()
                },
                data_nodes: Vec::new(),
                object_nodes: Vec::new(),
                next_scene_id: None,
                is_last_scene: false,
                is_results_scene: true,
            });
        }
    }
    if let Some(last) = scenes.last_mut() {
        last.is_last_scene = true;
    }

    Some(MultiSceneResult {
        total_scenes: scenes.len(),
        scenes,
    })
}
