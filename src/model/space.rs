use serde::Serialize;
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::splat(0.0);
    pub const ONE: Vec3 = Vec3::splat(1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Vec3::ZERO
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Which identifying fields a scene asks the player for. Flags are carried
/// exactly as declared on the Space; `None` means the input was absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadCollection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collect_name: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collect_email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collect_phone: Option<bool>,
}

impl LeadCollection {
    pub fn collects_name(&self) -> bool {
        self.collect_name == Some(true)
    }

    pub fn is_enabled(&self) -> bool {
        [self.collect_name, self.collect_email, self.collect_phone]
            .iter()
            .any(|flag| *flag == Some(true))
    }
}

/// The root aggregate of one scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_points: Option<bool>,
    pub lead_collection: LeadCollection,
    pub entities: Vec<Entity>,
    pub datas: Vec<Data>,
    pub cameras: Vec<Camera>,
    pub lights: Vec<Light>,
}

impl Space {
    pub fn shows_points(&self) -> bool {
        self.show_points == Some(true)
    }

    /// Depth-first flattening of the Space's data nodes (each question followed by its answers).
    pub fn flattened_datas(&self) -> Vec<Data> {
        let mut out = Vec::new();
        for data in &self.datas {
            data.flatten_into(&mut out);
        }
        out
    }

    /// True when no entity, data, camera or light is attached.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
            && self.datas.is_empty()
            && self.cameras.is_empty()
            && self.lights.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub entity_type: String,
    pub transform: Transform,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub components: Vec<Component>,
    pub events: Vec<Event>,
}

impl Entity {
    /// First attached component of the given type (case-insensitive).
    pub fn component(&self, component_type: &str) -> Option<&Component> {
        self.components
            .iter()
            .find(|c| c.component_type.eq_ignore_ascii_case(component_type))
    }
}

/// A behaviour or appearance modifier. Fields specific to the component type
/// are kept in `properties`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    pub component_type: String,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Component {
    pub fn number(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(Value::as_f64)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub event_type: String,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: String,
    pub action_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Action {
    pub fn number(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(Value::as_f64)
    }
}

/// Questions, answers and other scene content. Answers hang off their
/// question through `answers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Data {
    pub id: String,
    pub data_type: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_space: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_value: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_points: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<Data>,
}

impl Data {
    /// Questions and points-enabled data contribute to a score.
    pub fn is_scoring(&self) -> bool {
        self.data_type.eq_ignore_ascii_case("question") || self.enable_points == Some(true)
    }

    /// This node without its answers.
    pub fn without_answers(&self) -> Data {
        Data {
            id: self.id.clone(),
            data_type: self.data_type.clone(),
            content: self.content.clone(),
            is_correct: self.is_correct,
            next_space: self.next_space.clone(),
            points_value: self.points_value.clone(),
            enable_points: self.enable_points,
            answers: Vec::new(),
        }
    }

    fn flatten_into(&self, out: &mut Vec<Data>) {
        let mut stack = vec![self];
        while let Some(data) = stack.pop() {
            out.push(data.without_answers());
            stack.extend(data.answers.iter().rev());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fov: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub near: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub far: Option<f64>,
    pub transform: Transform,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Light {
    pub id: String,
    pub name: String,
    pub light_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    pub transform: Transform,
}
