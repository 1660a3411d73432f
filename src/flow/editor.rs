//! The visual editor's JSON flow format and the loader that reads it.
//!
//! Shape: `{ nodes: [{ id, data: { name, label, inputs } }], edges: [{ id, source, target }] }`.
//! Handles on edges are accepted and ignored; ownership is implied by the node
//! kinds at both ends.

use super::conversion::IntoFlow;
use super::definition::{FlowDefinition, FlowEdgeDefinition, FlowNodeDefinition};
use crate::error::{FlowConversionError, ParseError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Complete editor flow as stored by the front end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorFlow {
    pub nodes: Vec<EditorNode>,
    pub edges: Vec<EditorEdge>,
}

/// Editor node with ID and payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorNode {
    pub id: String,
    /// Canvas-level node type. Usually a generic renderer name such as `customNode`,
    /// only used when `data.name` is absent.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub data: EditorNodeData,
}

/// Node payload: the UPDL type name, a display label and the raw input values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorNodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub inputs: Map<String, Value>,
}

/// Editor edge connecting two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorEdge {
    #[serde(default)]
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

/// Parses a flow JSON string into the editor model.
///
/// Fails with `ParseError` when the text is not JSON or lacks the `nodes`/`edges` arrays.
pub fn parse_flow(flow_json: &str) -> Result<EditorFlow, ParseError> {
    let value: Value =
        serde_json::from_str(flow_json).map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    EditorFlow::from_value(value)
}

impl EditorFlow {
    /// Builds the editor model from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, ParseError> {
        {
            let object = value.as_object().ok_or_else(|| {
                ParseError::InvalidShape("expected an object with 'nodes' and 'edges'".to_string())
            })?;
            for field in ["nodes", "edges"] {
                if !object.get(field).is_some_and(Value::is_array) {
                    return Err(ParseError::MissingArray { field });
                }
            }
        }
        serde_json::from_value(value).map_err(|e| ParseError::InvalidShape(e.to_string()))
    }
}

impl IntoFlow for EditorFlow {
    fn into_flow(self) -> Result<FlowDefinition, FlowConversionError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|node| FlowNodeDefinition {
                node_type: node.data.name.or(node.node_type).unwrap_or_default(),
                label: node.data.label,
                inputs: node.data.inputs,
                id: node.id,
            })
            .collect();

        let edges = self
            .edges
            .into_iter()
            .map(|edge| FlowEdgeDefinition {
                id: if edge.id.is_empty() {
                    format!("{}->{}", edge.source, edge.target)
                } else {
                    edge.id
                },
                source: edge.source,
                target: edge.target,
            })
            .collect();

        Ok(FlowDefinition { nodes, edges })
    }
}
