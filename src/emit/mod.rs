use crate::config::GenerationOptions;
use crate::error::EmitError;
use crate::model::ProcessingResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod mmoomm;
pub mod scene_graph;

/// The available output targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmitTarget {
    /// Serializable scene graph for a generic renderer.
    SceneGraph,
    /// PlayCanvas HTML bundle with generated MMOOMM entity behaviour.
    Mmoomm,
}

/// A generated artifact, ready to be served or written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitOutput {
    pub target: EmitTarget,
    pub media_type: &'static str,
    pub content: String,
}

/// An output backend that turns a processed flow into an artifact.
pub trait SceneEmitter: Send + Sync {
    fn target(&self) -> EmitTarget;

    fn emit(
        &self,
        result: &ProcessingResult,
        options: &GenerationOptions,
    ) -> Result<EmitOutput, EmitError>;
}

/// Returns the built-in emitter for a target.
pub fn emitter_for(target: EmitTarget) -> Box<dyn SceneEmitter> {
    match target {
        EmitTarget::SceneGraph => Box::new(scene_graph::SceneGraphEmitter),
        EmitTarget::Mmoomm => Box::new(mmoomm::MmoommEmitter::new()),
    }
}

/// Quotes a string as a JavaScript literal that is also safe inside a `<script>` element.
pub(crate) fn js_string(s: &str) -> String {
    js_value(&Value::String(s.to_string()))
}

/// Any JSON value as a JavaScript expression. The result never closes a
/// `<script>` element and never contains a line terminator, so it is also
/// safe in a `//` comment.
pub(crate) fn js_value(value: &Value) -> String {
    value
        .to_string()
        .replace("</", "<\\/")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// Formats a number for generated code; non-finite values become `0`.
pub(crate) fn js_number(n: f64) -> String {
    if n.is_finite() {
        format!("{}", n)
    } else {
        "0".to_string()
    }
}
