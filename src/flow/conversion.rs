use super::definition::FlowDefinition;
use crate::error::FlowConversionError;

/// A trait for custom editor formats that can be converted into a `FlowDefinition`.
///
/// This is the extension point that keeps the processor format-agnostic. The
/// built-in editor format (`EditorFlow`) implements it; other front ends can
/// provide their own translation layer.
///
/// # Example
///
/// ```rust
/// use updl::flow::{FlowDefinition, FlowEdgeDefinition, FlowNodeDefinition, IntoFlow};
/// use updl::error::FlowConversionError;
///
/// struct MyNode { id: String, kind: String }
/// struct MyGraph { nodes: Vec<MyNode>, links: Vec<(String, String)> }
///
/// impl IntoFlow for MyGraph {
///     fn into_flow(self) -> Result<FlowDefinition, FlowConversionError> {
///         let nodes = self
///             .nodes
///             .into_iter()
///             .map(|n| FlowNodeDefinition {
///                 id: n.id,
///                 node_type: n.kind,
///                 label: None,
///                 inputs: Default::default(),
///             })
///             .collect();
///         let edges = self
///             .links
///             .into_iter()
///             .enumerate()
///             .map(|(i, (source, target))| FlowEdgeDefinition {
///                 id: format!("link-{}", i),
///                 source,
///                 target,
///             })
///             .collect();
///         Ok(FlowDefinition { nodes, edges })
///     }
/// }
/// ```
pub trait IntoFlow {
    /// Consumes the object and converts it into a UPDL flow.
    fn into_flow(self) -> Result<FlowDefinition, FlowConversionError>;
}

impl IntoFlow for FlowDefinition {
    fn into_flow(self) -> Result<FlowDefinition, FlowConversionError> {
        Ok(self)
    }
}
