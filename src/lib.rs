//! # UPDL - Flow to Scene Compiler
//!
//! **UPDL** (Universal Platform Description Language) turns the node graphs
//! drawn in a visual flow editor into playable 3D experiences. A flow is a set
//! of untyped nodes (Space, Entity, Component, Event, Action, Data, Camera,
//! Light) connected by edges; this crate reconstructs the semantic tree those
//! edges describe and emits it for a renderer.
//!
//! ## Pipeline
//!
//! 1.  **Load**: parse the editor's JSON (`{ nodes, edges }`) with [`flow::parse_flow`],
//!     or bring your own format by implementing [`flow::IntoFlow`].
//! 2.  **Resolve**: decode each node into a typed [`model::UpdlNode`] and work
//!     out who owns whom from the kinds at both ends of every edge.
//! 3.  **Assemble**: build a [`model::Space`] tree per scene.
//! 4.  **Classify**: when Spaces are chained (`space -> space` edges), produce
//!     an ordered [`model::MultiSceneResult`] with a results scene.
//! 5.  **Emit**: choose single-player or multiplayer with [`mode::determine_game_mode`]
//!     and generate either a scene graph or a PlayCanvas bundle through [`emit::emitter_for`].
//!
//! Malformed input (bad JSON, missing `nodes`/`edges`) is the only error the
//! processor reports. Dangling edges, unknown node types and orphans are
//! skipped and logged through `tracing`.
//!
//! ## Quick Start
//!
//! ```rust
//! use updl::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let flow = r#"{
//!         "nodes": [
//!             { "id": "space-1", "data": { "name": "Space", "inputs": { "spaceName": "Belt" } } },
//!             { "id": "rock-1", "data": { "name": "Entity", "inputs": { "entityType": "asteroid" } } }
//!         ],
//!         "edges": [ { "id": "e1", "source": "rock-1", "target": "space-1" } ]
//!     }"#;
//!
//!     let result = process_flow_data(flow)?;
//!     let space = result.updl_space.as_ref().expect("single scene");
//!     assert_eq!(space.name, "Belt");
//!     assert_eq!(space.entities.len(), 1);
//!
//!     let bundle = emitter_for(EmitTarget::Mmoomm).emit(&result, &GenerationOptions::default())?;
//!     assert_eq!(bundle.media_type, "text/html");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod emit;
pub mod error;
pub mod flow;
pub mod mode;
pub mod model;
pub mod prelude;
pub mod processor;

use error::ProcessError;
use model::ProcessingResult;
use processor::UpdlProcessor;

/// Processes a flow JSON string with the default node decoders.
///
/// Shorthand for `UpdlProcessor::new().process_flow_data(flow_json)`.
pub fn process_flow_data(flow_json: &str) -> Result<ProcessingResult, ProcessError> {
    UpdlProcessor::new().process_flow_data(flow_json)
}
