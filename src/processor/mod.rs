use crate::error::ProcessError;
use crate::flow::{EditorFlow, FlowDefinition, IntoFlow, parse_flow};
use crate::model::{ProcessingResult, Space, UpdlNode};
use ahash::{AHashMap, AHashSet};
use serde_json::Value;
use tracing::{debug, info, warn};

pub mod assembler;
pub mod classifier;
pub mod decoding;
pub mod resolver;

use assembler::SpaceAssembler;
use decoding::*;
use resolver::OwnershipIndex;

/// Compiles UPDL flows into assembled Spaces and multi-scene views.
///
/// A processor holds no per-run state, so one instance can be shared across
/// threads and reused for any number of flows.
pub struct UpdlProcessor {
    registry: AHashMap<String, Box<dyn NodeDecoder>>,
}

pub struct UpdlProcessorBuilder {
    registry: AHashMap<String, Box<dyn NodeDecoder>>,
}

impl UpdlProcessorBuilder {
    pub fn new() -> Self {
        let mut registry: AHashMap<String, Box<dyn NodeDecoder>> = AHashMap::new();
        register_default_decoders(&mut registry);
        Self { registry }
    }

    /// Decodes editor nodes named `user_type_name` with the built-in decoder for `updl_type_name`.
    pub fn with_type_mapping(mut self, user_type_name: &str, updl_type_name: &str) -> Self {
        if let Some(decoder) = create_decoder_by_name(updl_type_name) {
            self.registry.insert(user_type_name.to_string(), decoder);
        } else {
            warn!("Cannot map '{}': unknown UPDL node type '{}'", user_type_name, updl_type_name);
        }
        self
    }

    pub fn with_custom_decoder(mut self, decoder: Box<dyn NodeDecoder>) -> Self {
        self.registry.insert(decoder.node_type().to_string(), decoder);
        self
    }

    pub fn build(self) -> UpdlProcessor {
        UpdlProcessor {
            registry: self.registry,
        }
    }
}

impl Default for UpdlProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for UpdlProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdlProcessor {
    pub fn new() -> Self {
        UpdlProcessorBuilder::new().build()
    }

    pub fn builder() -> UpdlProcessorBuilder {
        UpdlProcessorBuilder::new()
    }

    /// Parses and processes a flow JSON string. Only a malformed flow is an error.
    pub fn process_flow_data(&self, flow_json: &str) -> Result<ProcessingResult, ProcessError> {
        let flow = parse_flow(flow_json)?.into_flow()?;
        Ok(self.process(&flow))
    }

    /// Same as `process_flow_data` for a flow that is already parsed into JSON.
    pub fn process_value(&self, value: Value) -> Result<ProcessingResult, ProcessError> {
        let flow = EditorFlow::from_value(value)?.into_flow()?;
        Ok(self.process(&flow))
    }

    /// Processes any format that converts into a `FlowDefinition`.
    pub fn process_flow<F: IntoFlow>(&self, flow: F) -> Result<ProcessingResult, ProcessError> {
        Ok(self.process(&flow.into_flow()?))
    }

    /// Decodes every node with a registered decoder. Unknown types, duplicate ids
    /// and rejected nodes are dropped.
    pub fn decode_nodes(&self, flow: &FlowDefinition) -> Vec<UpdlNode> {
        let mut seen = AHashSet::new();
        let mut nodes = Vec::with_capacity(flow.nodes.len());

        for node in &flow.nodes {
            let Some(decoder) = self.registry.get(&node.node_type) else {
                debug!(node_id = %node.id, "Skipping node of unknown type '{}'", node.node_type);
                continue;
            };
            if !seen.insert(node.id.as_str()) {
                warn!(node_id = %node.id, "Duplicate node id; keeping the first occurrence");
                continue;
            }
            match decoder.decode(node) {
                Ok(decoded) => nodes.push(decoded),
                Err(e) => warn!(node_id = %node.id, "Dropping node: {}", e),
            }
        }
        nodes
    }

    /// Runs resolution, assembly and classification on a canonical flow.
    pub fn process(&self, flow: &FlowDefinition) -> ProcessingResult {
        let nodes = self.decode_nodes(flow);
        let index = OwnershipIndex::resolve(&nodes, &flow.edges);

        for node in &nodes {
            if !matches!(node, UpdlNode::Space(_)) && index.owner_of(node.id()).is_none() {
                debug!(node_id = %node.id(), "Dropping orphan {} node", node.kind());
            }
        }

        let table: AHashMap<&str, &UpdlNode> = nodes.iter().map(|n| (n.id(), n)).collect();
        let assembler = SpaceAssembler::new(&table, &index);
        let spaces: Vec<Space> = nodes
            .iter()
            .filter_map(|node| match node {
                UpdlNode::Space(space) => Some(assembler.assemble(space)),
                _ => None,
            })
            .collect();

        let result = match classifier::classify(&spaces, &index) {
            Some(multi_scene) => ProcessingResult {
                updl_space: None,
                multi_scene: Some(multi_scene),
            },
            None => {
                if spaces.len() > 1 {
                    warn!(
                        "{} Spaces found without a scene chain; using '{}'",
                        spaces.len(),
                        spaces[0].id
                    );
                }
                ProcessingResult {
                    updl_space: spaces.into_iter().next(),
                    multi_scene: None,
                }
            }
        };

        info!(
            nodes = nodes.len(),
            edges = flow.edges.len(),
            scenes = result.spaces().len(),
            multi_scene = result.is_multi_scene(),
            "Processed UPDL flow"
        );
        result
    }
}
