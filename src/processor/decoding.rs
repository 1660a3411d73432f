use crate::error::DecodeError;
use crate::flow::FlowNodeDefinition;
use crate::model::{
    Action, Camera, Component, Data, Entity, Event, LeadCollection, Light, NodeKind, Space,
    Transform, UpdlNode, Vec3,
};
use ahash::AHashMap;
use serde_json::{Map, Number, Value};
use tracing::debug;

static NULL: Value = Value::Null;

/// Defines the contract for decoding an editor node type into a typed `UpdlNode`.
pub trait NodeDecoder: Send + Sync {
    fn node_type(&self) -> &str;
    fn decode(&self, node: &FlowNodeDefinition) -> Result<UpdlNode, DecodeError>;
}

/// Typed access to a node's raw `inputs` map. Scalars of the wrong JSON type
/// are treated as absent; no coercion is performed.
pub struct Inputs<'a> {
    node: &'a FlowNodeDefinition,
    kind: NodeKind,
}

impl<'a> Inputs<'a> {
    pub fn new(node: &'a FlowNodeDefinition, kind: NodeKind) -> Self {
        Self { node, kind }
    }

    pub fn id(&self) -> String {
        self.node.id.clone()
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.node.inputs.get(key).filter(|v| !v.is_null())
    }

    fn mismatch(&self, key: &str, expected: &str) {
        debug!(
            node_id = %self.node.id,
            kind = %self.kind,
            "Ignoring input '{}': expected {}",
            key,
            expected
        );
    }

    /// A string input, copied as written.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            _ => {
                self.mismatch(key, "a string");
                None
            }
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            _ => {
                self.mismatch(key, "a boolean");
                None
            }
        }
    }

    /// A number input kept exactly as written (integers stay integers).
    pub fn json_number(&self, key: &str) -> Option<Number> {
        match self.get(key)? {
            Value::Number(n) => Some(n.clone()),
            _ => {
                self.mismatch(key, "a number");
                None
            }
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            _ => {
                self.mismatch(key, "a number");
                None
            }
        }
    }

    /// Display name: the first present key, then the editor label, then the node id.
    pub fn name(&self, keys: &[&str]) -> String {
        keys.iter()
            .filter_map(|key| self.text(key))
            .find(|name| !name.trim().is_empty())
            .or_else(|| self.node.label.clone())
            .unwrap_or_else(|| self.node.id.clone())
    }

    /// A list of strings, given either as a JSON array or a comma-separated string.
    pub fn strings(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Every input not listed in `known`, for type-specific fields.
    pub fn extra(&self, known: &[&str]) -> Map<String, Value> {
        self.node
            .inputs
            .iter()
            .filter(|(k, v)| !v.is_null() && !known.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn vec3(&self, field: &str, value: &Value, default: Vec3) -> Result<Vec3, DecodeError> {
        let invalid = |message: &str| DecodeError::InvalidInput {
            node_id: self.node.id.clone(),
            kind: self.kind,
            field: field.to_string(),
            message: message.to_string(),
        };
        match value {
            Value::Null => Ok(default),
            Value::Number(n) if field.ends_with("scale") => {
                n.as_f64().map(Vec3::splat).ok_or_else(|| invalid("scale is not a number"))
            }
            Value::Array(items) => {
                let numbers: Option<Vec<f64>> = items.iter().map(Value::as_f64).collect();
                match numbers.as_deref() {
                    Some([x, y, z]) => Ok(Vec3::new(*x, *y, *z)),
                    _ => Err(invalid("expected an array of three numbers")),
                }
            }
            Value::Object(map) => {
                let axis = |name: &str, fallback: f64| -> Result<f64, DecodeError> {
                    match map.get(name) {
                        None | Some(Value::Null) => Ok(fallback),
                        Some(v) => v
                            .as_f64()
                            .ok_or_else(|| invalid(&format!("axis '{}' is not a number", name))),
                    }
                };
                Ok(Vec3::new(
                    axis("x", default.x)?,
                    axis("y", default.y)?,
                    axis("z", default.z)?,
                ))
            }
            _ => Err(invalid("expected an array or an {x, y, z} object")),
        }
    }

    /// Reads `transform: { pos, rot, scale }`, falling back to top-level
    /// `position`/`rotation`/`scale` inputs.
    pub fn transform(&self) -> Result<Transform, DecodeError> {
        let defaults = Transform::default();
        let source: &Map<String, Value> = match self.get("transform") {
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(DecodeError::InvalidInput {
                    node_id: self.node.id.clone(),
                    kind: self.kind,
                    field: "transform".to_string(),
                    message: "expected an object".to_string(),
                });
            }
            None => &self.node.inputs,
        };
        let pick = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| source.get(*k))
                .unwrap_or(&NULL)
        };

        Ok(Transform {
            position: self.vec3("transform.pos", pick(&["pos", "position"]), defaults.position)?,
            rotation: self.vec3("transform.rot", pick(&["rot", "rotation"]), defaults.rotation)?,
            scale: self.vec3("transform.scale", pick(&["scale"]), defaults.scale)?,
        })
    }
}

fn decode_space(i: &Inputs) -> Result<UpdlNode, DecodeError> {
    Ok(UpdlNode::Space(Space {
        id: i.id(),
        name: i.name(&["spaceName", "name"]),
        space_type: i.text("spaceType"),
        background_color: i.text("backgroundColor"),
        show_points: i.flag("showPoints"),
        lead_collection: LeadCollection {
            collect_name: i.flag("collectLeadName"),
            collect_email: i.flag("collectLeadEmail"),
            collect_phone: i.flag("collectLeadPhone"),
        },
        ..Default::default()
    }))
}

fn decode_entity(i: &Inputs) -> Result<UpdlNode, DecodeError> {
    Ok(UpdlNode::Entity(Entity {
        id: i.id(),
        name: i.name(&["entityName", "name"]),
        entity_type: i.text("entityType").unwrap_or_else(|| "default".to_string()),
        transform: i.transform()?,
        tags: i.strings("tags"),
        ..Default::default()
    }))
}

fn decode_component(i: &Inputs) -> Result<UpdlNode, DecodeError> {
    Ok(UpdlNode::Component(Component {
        id: i.id(),
        component_type: i
            .text("componentType")
            .unwrap_or_else(|| "custom".to_string()),
        properties: i.extra(&["componentType"]),
    }))
}

fn decode_event(i: &Inputs) -> Result<UpdlNode, DecodeError> {
    Ok(UpdlNode::Event(Event {
        id: i.id(),
        event_type: i.text("eventType").unwrap_or_else(|| "OnStart".to_string()),
        properties: i.extra(&["eventType"]),
        actions: Vec::new(),
    }))
}

fn decode_action(i: &Inputs) -> Result<UpdlNode, DecodeError> {
    Ok(UpdlNode::Action(Action {
        id: i.id(),
        action_type: i.text("actionType").unwrap_or_else(|| "Log".to_string()),
        target: i.text("target"),
        properties: i.extra(&["actionType", "target"]),
    }))
}

fn decode_data(i: &Inputs) -> Result<UpdlNode, DecodeError> {
    Ok(UpdlNode::Data(Data {
        id: i.id(),
        data_type: i.text("dataType").unwrap_or_else(|| "Data".to_string()),
        content: ["content", "question", "text"]
            .iter()
            .find_map(|k| i.text(k))
            .unwrap_or_default(),
        is_correct: i.flag("isCorrect"),
        next_space: i.text("nextSpace"),
        points_value: i.json_number("pointsValue"),
        enable_points: i.flag("enablePoints"),
        answers: Vec::new(),
    }))
}

fn decode_camera(i: &Inputs) -> Result<UpdlNode, DecodeError> {
    Ok(UpdlNode::Camera(Camera {
        id: i.id(),
        name: i.name(&["cameraName", "name"]),
        fov: i.number("fov"),
        near: i.number("near"),
        far: i.number("far"),
        transform: i.transform()?,
    }))
}

fn decode_light(i: &Inputs) -> Result<UpdlNode, DecodeError> {
    Ok(UpdlNode::Light(Light {
        id: i.id(),
        name: i.name(&["lightName", "name"]),
        light_type: i
            .text("lightType")
            .unwrap_or_else(|| "directional".to_string()),
        color: i.text("color"),
        intensity: i.number("intensity"),
        transform: i.transform()?,
    }))
}

/// Master macro to define the built-in decoders, their registration, and their creation by name.
macro_rules! define_node_decoders {
    ( $( ($struct_name:ident, $type_name:literal, $kind:path, $decode_fn:ident) ),* $(,)? ) => {
        $(
            struct $struct_name;
            impl NodeDecoder for $struct_name {
                fn node_type(&self) -> &str { $type_name }
                fn decode(&self, node: &FlowNodeDefinition) -> Result<UpdlNode, DecodeError> {
                    $decode_fn(&Inputs::new(node, $kind))
                }
            }
        )*

        pub(super) fn register_default_decoders(registry: &mut AHashMap<String, Box<dyn NodeDecoder>>) {
            $( registry.insert($type_name.to_string(), Box::new($struct_name)); )*
        }

        pub(super) fn create_decoder_by_name(name: &str) -> Option<Box<dyn NodeDecoder>> {
            match name {
                $( $type_name => Some(Box::new($struct_name)), )*
                _ => None,
            }
        }
    };
}

define_node_decoders! {
    (SpaceDecoder, "Space", NodeKind::Space, decode_space),
    (EntityDecoder, "Entity", NodeKind::Entity, decode_entity),
    (ComponentDecoder, "Component", NodeKind::Component, decode_component),
    (EventDecoder, "Event", NodeKind::Event, decode_event),
    (ActionDecoder, "Action", NodeKind::Action, decode_action),
    (DataDecoder, "Data", NodeKind::Data, decode_data),
    (CameraDecoder, "Camera", NodeKind::Camera, decode_camera),
    (LightDecoder, "Light", NodeKind::Light, decode_light),
}
