use super::space::{Data, Entity, Space};
use serde::Serialize;

/// One stage of a multi-scene flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneData {
    pub scene_index: usize,
    pub space_id: String,
    pub space_data: Space,
    pub data_nodes: Vec<Data>,
    pub object_nodes: Vec<Entity>,
    pub next_scene_id: Option<String>,
    pub is_last_scene: bool,
    pub is_results_scene: bool,
}

impl SceneData {
    /// Whether the scene carries anything to play: data, objects or entities.
    pub fn has_content(&self) -> bool {
        !self.data_nodes.is_empty()
            || !self.object_nodes.is_empty()
            || !self.space_data.entities.is_empty()
    }
}

/// Ordered view of a chain of Spaces connected by `space -> space` edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSceneResult {
    pub total_scenes: usize,
    pub scenes: Vec<SceneData>,
}

impl MultiSceneResult {
    pub fn results_scene(&self) -> Option<&SceneData> {
        self.scenes.iter().find(|s| s.is_results_scene)
    }
}

/// Output of one processing run. `multi_scene` is set when two or more Spaces
/// are chained; otherwise only `updl_space` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updl_space: Option<Space>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_scene: Option<MultiSceneResult>,
}

impl ProcessingResult {
    pub fn is_multi_scene(&self) -> bool {
        self.multi_scene.is_some()
    }

    /// Every Space in the result, in scene order.
    pub fn spaces(&self) -> Vec<&Space> {
        match (&self.updl_space, &self.multi_scene) {
            (_, Some(multi)) => multi.scenes.iter().map(|s| &s.space_data).collect(),
            (Some(space), None) => vec![space],
            (None, None) => Vec::new(),
        }
    }
}
