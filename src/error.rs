use crate::model::NodeKind;
use thiserror::Error;

/// Errors raised by the graph loader when the flow JSON itself is malformed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Failed to parse flow JSON: {0}")]
    InvalidJson(String),

    #[error("Flow data is missing the required '{field}' array")]
    MissingArray { field: &'static str },

    #[error("Flow data has an invalid shape: {0}")]
    InvalidShape(String),
}

/// Errors that can occur when converting a custom user format into a `FlowDefinition`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowConversionError {
    #[error("Invalid custom flow data: {0}")]
    ValidationError(String),
}

/// Errors surfaced by `UpdlProcessor`. Anything short of a malformed flow
/// degrades to an omission instead of an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Conversion(#[from] FlowConversionError),
}

/// A node decoder rejected a node. The processor logs these and drops the node.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Node '{node_id}' ({kind}) has an invalid input '{field}': {message}")]
    InvalidInput {
        node_id: String,
        kind: NodeKind,
        field: String,
        message: String,
    },
}

/// Errors that can occur while emitting a scene graph or runtime bundle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmitError {
    #[error("The processed flow contains no scene to emit")]
    NoScene,

    #[error("Failed to serialize emitted output: {0}")]
    Serialization(String),
}
