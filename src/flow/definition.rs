use serde_json::{Map, Value};

/// The complete, canonical definition of a UPDL flow, ready for processing.
/// This is the target structure for any custom editor format conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowDefinition {
    pub nodes: Vec<FlowNodeDefinition>,
    pub edges: Vec<FlowEdgeDefinition>,
}

/// A single untyped node as produced by the visual editor.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNodeDefinition {
    pub id: String,
    /// Editor node type name (e.g. `"Space"`, `"Entity"`), matched against the decoder registry.
    pub node_type: String,
    pub label: Option<String>,
    pub inputs: Map<String, Value>,
}

/// A directed connection. For ownership edges `source` is the child and
/// `target` the owner; for `space -> space` edges `source` precedes `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowEdgeDefinition {
    pub id: String,
    pub source: String,
    pub target: String,
}
