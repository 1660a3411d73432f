//! Tests for the editor flow loader and the `IntoFlow` conversion.
mod common;
use common::*;
use serde_json::json;
use updl::error::{FlowConversionError, ParseError, ProcessError};
use updl::prelude::*;

#[test]
fn test_parse_flow_reads_nodes_and_edges() {
    let parsed = parse_flow(&single_scene_flow()).expect("valid flow");
    assert_eq!(parsed.nodes.len(), 8);
    assert_eq!(parsed.edges.len(), 7);
    assert_eq!(parsed.nodes[0].data.name.as_deref(), Some("Space"));
    assert_eq!(parsed.edges[0].source, "asteroid-1");
    assert_eq!(parsed.edges[0].target, "space-1");
}

#[test]
fn test_parse_flow_rejects_invalid_json() {
    let err = parse_flow("{ nodes: [").unwrap_err();
    assert!(matches!(err, ParseError::InvalidJson(_)));
}

#[test]
fn test_parse_flow_requires_both_arrays() {
    let err = parse_flow(r#"{ "edges": [] }"#).unwrap_err();
    assert_eq!(err, ParseError::MissingArray { field: "nodes" });

    let err = parse_flow(r#"{ "nodes": [] }"#).unwrap_err();
    assert_eq!(err, ParseError::MissingArray { field: "edges" });

    let err = parse_flow(r#"{ "nodes": {}, "edges": [] }"#).unwrap_err();
    assert_eq!(err, ParseError::MissingArray { field: "nodes" });
}

#[test]
fn test_parse_flow_rejects_non_object_root() {
    let err = parse_flow("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, ParseError::InvalidShape(_)));
}

#[test]
fn test_process_flow_data_surfaces_parse_errors() {
    let err = process_flow_data("not json").unwrap_err();
    assert!(matches!(err, ProcessError::Parse(ParseError::InvalidJson(_))));
    assert!(err.to_string().contains("Failed to parse flow JSON"));
}

#[test]
fn test_empty_flow_is_not_an_error() {
    let result = process(r#"{ "nodes": [], "edges": [] }"#);
    assert!(result.updl_space.is_none());
    assert!(result.multi_scene.is_none());
}

#[test]
fn test_edge_handles_are_accepted_and_missing_ids_are_derived() {
    let flow_json = json!({
        "nodes": [
            { "id": "s", "data": { "name": "Space", "inputs": {} } },
            { "id": "e", "data": { "name": "Entity", "inputs": {} } }
        ],
        "edges": [
            { "source": "e", "target": "s", "sourceHandle": "out", "targetHandle": "in" }
        ]
    })
    .to_string();

    let flow = parse_flow(&flow_json).unwrap().into_flow().unwrap();
    assert_eq!(flow.edges[0].id, "e->s");

    let result = process(&flow_json);
    assert_eq!(result.updl_space.unwrap().entities.len(), 1);
}

#[test]
fn test_node_type_falls_back_to_canvas_type() {
    let flow_json = json!({
        "nodes": [
            { "id": "s", "type": "Space", "data": { "inputs": { "spaceName": "Fallback" } } }
        ],
        "edges": []
    })
    .to_string();

    let flow = parse_flow(&flow_json).unwrap().into_flow().unwrap();
    assert_eq!(flow.nodes[0].node_type, "Space");
    assert_eq!(process(&flow_json).updl_space.unwrap().name, "Fallback");
}

#[test]
fn test_process_value_accepts_parsed_json() {
    let value: serde_json::Value = serde_json::from_str(&single_scene_flow()).unwrap();
    let from_value = UpdlProcessor::new().process_value(value).unwrap();
    let from_string = process(&single_scene_flow());
    assert_eq!(from_value, from_string);
}

#[test]
fn test_custom_format_through_into_flow() {
    struct Outline {
        scenes: Vec<(&'static str, Vec<&'static str>)>,
    }

    impl IntoFlow for Outline {
        fn into_flow(self) -> std::result::Result<FlowDefinition, FlowConversionError> {
            let mut nodes = Vec::new();
            let mut edges = Vec::new();
            for (scene, entities) in self.scenes {
                nodes.push(FlowNodeDefinition {
                    id: scene.to_string(),
                    node_type: "Space".to_string(),
                    label: Some(scene.to_uppercase()),
                    inputs: Default::default(),
                });
                for entity in entities {
                    if entity.is_empty() {
                        return Err(FlowConversionError::ValidationError(
                            "empty entity id".to_string(),
                        ));
                    }
                    nodes.push(FlowNodeDefinition {
                        id: entity.to_string(),
                        node_type: "Entity".to_string(),
                        label: None,
                        inputs: Default::default(),
                    });
                    edges.push(FlowEdgeDefinition {
                        id: format!("{}-{}", entity, scene),
                        source: entity.to_string(),
                        target: scene.to_string(),
                    });
                }
            }
            Ok(FlowDefinition { nodes, edges })
        }
    }

    let processor = UpdlProcessor::new();
    let result = processor
        .process_flow(Outline {
            scenes: vec![("lobby", vec!["rock", "ring"])],
        })
        .unwrap();
    let space = result.updl_space.unwrap();
    assert_eq!(space.name, "LOBBY");
    assert_eq!(space.entities.len(), 2);

    let err = processor
        .process_flow(Outline {
            scenes: vec![("lobby", vec![""])],
        })
        .unwrap_err();
    assert!(matches!(err, ProcessError::Conversion(_)));
}
