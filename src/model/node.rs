use super::space::{Action, Camera, Component, Data, Entity, Event, Light, Space};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of every UPDL node kind the processor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Space,
    Entity,
    Component,
    Event,
    Action,
    Data,
    Camera,
    Light,
}

impl NodeKind {
    pub const ALL: [NodeKind; 8] = [
        NodeKind::Space,
        NodeKind::Entity,
        NodeKind::Component,
        NodeKind::Event,
        NodeKind::Action,
        NodeKind::Data,
        NodeKind::Camera,
        NodeKind::Light,
    ];

    /// The editor type name registered by default for this kind.
    pub fn type_name(self) -> &'static str {
        match self {
            NodeKind::Space => "Space",
            NodeKind::Entity => "Entity",
            NodeKind::Component => "Component",
            NodeKind::Event => "Event",
            NodeKind::Action => "Action",
            NodeKind::Data => "Data",
            NodeKind::Camera => "Camera",
            NodeKind::Light => "Light",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A decoded node. Each variant carries its strongly-typed fields with empty
/// child collections; the assembler fills those in from the ownership index.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdlNode {
    Space(Space),
    Entity(Entity),
    Component(Component),
    Event(Event),
    Action(Action),
    Data(Data),
    Camera(Camera),
    Light(Light),
}

impl UpdlNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            UpdlNode::Space(_) => NodeKind::Space,
            UpdlNode::Entity(_) => NodeKind::Entity,
            UpdlNode::Component(_) => NodeKind::Component,
            UpdlNode::Event(_) => NodeKind::Event,
            UpdlNode::Action(_) => NodeKind::Action,
            UpdlNode::Data(_) => NodeKind::Data,
            UpdlNode::Camera(_) => NodeKind::Camera,
            UpdlNode::Light(_) => NodeKind::Light,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            UpdlNode::Space(n) => &n.id,
            UpdlNode::Entity(n) => &n.id,
            UpdlNode::Component(n) => &n.id,
            UpdlNode::Event(n) => &n.id,
            UpdlNode::Action(n) => &n.id,
            UpdlNode::Data(n) => &n.id,
            UpdlNode::Camera(n) => &n.id,
            UpdlNode::Light(n) => &n.id,
        }
    }
}
