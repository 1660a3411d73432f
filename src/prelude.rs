//! Prelude module for convenient imports
//!
//! Re-exports the types needed to process a flow and emit a scene.
//!
//! # Example
//!
//! ```rust,no_run
//! use updl::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let flow_json = std::fs::read_to_string("path/to/flow.json")?;
//!
//! let processor = UpdlProcessor::builder()
//!     .with_type_mapping("SceneNode", "Space")
//!     .build();
//! let result = processor.process_flow_data(&flow_json)?;
//!
//! let options = GenerationOptions::default().with_game_mode(GameMode::Multiplayer);
//! let output = emitter_for(EmitTarget::SceneGraph).emit(&result, &options)?;
//! println!("{}", output.content);
//! # Ok(())
//! # }
//! ```

// Processing
pub use crate::process_flow_data;
pub use crate::processor::UpdlProcessor;

// Flow input
pub use crate::flow::{
    EditorFlow, FlowDefinition, FlowEdgeDefinition, FlowNodeDefinition, IntoFlow, parse_flow,
};

// Model
pub use crate::model::{
    DisplaySpace, Entity, MultiSceneResult, NodeKind, ProcessingResult, SceneData, Space,
};

// Mode detection and output
pub use crate::config::GenerationOptions;
pub use crate::emit::{EmitOutput, EmitTarget, SceneEmitter, emitter_for};
pub use crate::mode::{GameMode, detect_multiplayer_mode, determine_game_mode};

// Error types
pub use crate::error::{EmitError, ParseError, ProcessError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
