//! Generic scene graph output: a plain tree of typed nodes with their
//! properties, mirroring the assembled Space.

use super::{EmitOutput, EmitTarget, SceneEmitter};
use crate::config::GenerationOptions;
use crate::error::EmitError;
use crate::mode::{GameMode, determine_game_mode};
use crate::model::{
    Action, Camera, Component, Data, Entity, Event, Light, NodeKind, ProcessingResult, Space,
    Transform, Vec3,
};
use serde::Serialize;
use serde_json::{Map, Value, json};

pub const SCENE_GRAPH_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneGraphNode {
    pub id: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneGraphNode>,
}

fn vec3(v: &Vec3) -> Value {
    json!([v.x, v.y, v.z])
}

fn transform(t: &Transform) -> Value {
    json!({
        "position": vec3(&t.position),
        "rotation": vec3(&t.rotation),
        "scale": vec3(&t.scale),
    })
}

fn insert_opt<T: Into<Value>>(map: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v.into());
    }
}

impl SceneGraphNode {
    fn leaf(id: &str, kind: NodeKind, name: Option<&str>, properties: Map<String, Value>) -> Self {
        Self {
            id: id.to_string(),
            kind,
            name: name.map(str::to_string),
            properties,
            children: Vec::new(),
        }
    }

    pub fn from_space(space: &Space) -> Self {
        let mut properties = Map::new();
        insert_opt(&mut properties, "spaceType", space.space_type.clone());
        insert_opt(&mut properties, "backgroundColor", space.background_color.clone());
        insert_opt(&mut properties, "showPoints", space.show_points);
        let leads = &space.lead_collection;
        if leads.is_enabled() {
            let mut lead_map = Map::new();
            insert_opt(&mut lead_map, "collectName", leads.collect_name);
            insert_opt(&mut lead_map, "collectEmail", leads.collect_email);
            insert_opt(&mut lead_map, "collectPhone", leads.collect_phone);
            properties.insert("leadCollection".to_string(), Value::Object(lead_map));
        }

        let children = space
            .entities
            .iter()
            .map(Self::from_entity)
            .chain(space.datas.iter().map(Self::from_data))
            .chain(space.cameras.iter().map(Self::from_camera))
            .chain(space.lights.iter().map(Self::from_light))
            .collect();

        Self {
            children,
            ..Self::leaf(&space.id, NodeKind::Space, Some(&space.name), properties)
        }
    }

    fn from_entity(entity: &Entity) -> Self {
        let mut properties = Map::new();
        properties.insert("entityType".to_string(), entity.entity_type.clone().into());
        properties.insert("transform".to_string(), transform(&entity.transform));
        if !entity.tags.is_empty() {
            properties.insert("tags".to_string(), entity.tags.clone().into());
        }

        let children = entity
            .components
            .iter()
            .map(Self::from_component)
            .chain(entity.events.iter().map(Self::from_event))
            .collect();

        Self {
            children,
            ..Self::leaf(&entity.id, NodeKind::Entity, Some(&entity.name), properties)
        }
    }

    fn from_component(component: &Component) -> Self {
        let mut properties = component.properties.clone();
        properties.insert(
            "componentType".to_string(),
            component.component_type.clone().into(),
        );
        Self::leaf(&component.id, NodeKind::Component, None, properties)
    }

    fn from_event(event: &Event) -> Self {
        let mut properties = event.properties.clone();
        properties.insert("eventType".to_string(), event.event_type.clone().into());
        Self {
            children: event.actions.iter().map(Self::from_action).collect(),
            ..Self::leaf(&event.id, NodeKind::Event, None, properties)
        }
    }

    fn from_action(action: &Action) -> Self {
        let mut properties = action.properties.clone();
        properties.insert("actionType".to_string(), action.action_type.clone().into());
        insert_opt(&mut properties, "target", action.target.clone());
        Self::leaf(&action.id, NodeKind::Action, None, properties)
    }

    fn from_data(data: &Data) -> Self {
        let mut properties = Map::new();
        properties.insert("dataType".to_string(), data.data_type.clone().into());
        properties.insert("content".to_string(), data.content.clone().into());
        insert_opt(&mut properties, "isCorrect", data.is_correct);
        insert_opt(&mut properties, "nextSpace", data.next_space.clone());
        insert_opt(&mut properties, "pointsValue", data.points_value.clone());
        insert_opt(&mut properties, "enablePoints", data.enable_points);
        Self {
            children: data.answers.iter().map(Self::from_data).collect(),
            ..Self::leaf(&data.id, NodeKind::Data, None, properties)
        }
    }

    fn from_camera(camera: &Camera) -> Self {
        let mut properties = Map::new();
        properties.insert("transform".to_string(), transform(&camera.transform));
        insert_opt(&mut properties, "fov", camera.fov);
        insert_opt(&mut properties, "near", camera.near);
        insert_opt(&mut properties, "far", camera.far);
        Self::leaf(&camera.id, NodeKind::Camera, Some(&camera.name), properties)
    }

    fn from_light(light: &Light) -> Self {
        let mut properties = Map::new();
        properties.insert("lightType".to_string(), light.light_type.clone().into());
        properties.insert("transform".to_string(), transform(&light.transform));
        insert_opt(&mut properties, "color", light.color.clone());
        insert_opt(&mut properties, "intensity", light.intensity);
        Self::leaf(&light.id, NodeKind::Light, Some(&light.name), properties)
    }

    /// Depth-first search by node id.
    pub fn find(&self, id: &str) -> Option<&SceneGraphNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, including itself.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }
}

/// Emits the scene graph of a single Space.
pub fn emit(space: &Space) -> SceneGraphNode {
    SceneGraphNode::from_space(space)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneGraphScene {
    pub index: usize,
    pub is_results_scene: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_scene_id: Option<String>,
    pub root: SceneGraphNode,
}

/// The full document: every scene of a processed flow in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneGraph {
    pub version: u32,
    pub game_mode: GameMode,
    pub scenes: Vec<SceneGraphScene>,
}

impl SceneGraph {
    pub fn from_result(
        result: &ProcessingResult,
        options: &GenerationOptions,
    ) -> Result<Self, EmitError> {
        let scenes: Vec<SceneGraphScene> = match (&result.multi_scene, &result.updl_space) {
            (Some(multi), _) => multi
                .scenes
                .iter()
                .map(|scene| SceneGraphScene {
                    index: scene.scene_index,
                    is_results_scene: scene.is_results_scene,
                    next_scene_id: scene.next_scene_id.clone(),
                    root: emit(&scene.space_data),
                })
                .collect(),
            (None, Some(space)) => vec![SceneGraphScene {
                index: 0,
                is_results_scene: false,
                next_scene_id: None,
                root: emit(space),
            }],
            (None, None) => return Err(EmitError::NoScene),
        };

        Ok(Self {
            version: SCENE_GRAPH_VERSION,
            game_mode: determine_game_mode(result, options),
            scenes,
        })
    }
}

pub struct SceneGraphEmitter;

impl SceneEmitter for SceneGraphEmitter {
    fn target(&self) -> EmitTarget {
        EmitTarget::SceneGraph
    }

    fn emit(
        &self,
        result: &ProcessingResult,
        options: &GenerationOptions,
    ) -> Result<EmitOutput, EmitError> {
        let graph = SceneGraph::from_result(result, options)?;
        let content = if options.pretty {
            serde_json::to_string_pretty(&graph)
        } else {
            serde_json::to_string(&graph)
        }
        .map_err(|e| EmitError::Serialization(e.to_string()))?;

        Ok(EmitOutput {
            target: EmitTarget::SceneGraph,
            media_type: "application/json",
            content,
        })
    }
}
