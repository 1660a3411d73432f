//! Tests for node decoding, ownership resolution and Space assembly.
mod common;
use common::*;
use serde_json::json;
use updl::error::DecodeError;
use updl::model::{UpdlNode, Vec3};
use updl::prelude::*;
use updl::processor::assembler::MAX_DATA_DEPTH;
use updl::processor::decoding::{Inputs, NodeDecoder};
use updl::processor::resolver::{OwnershipIndex, accepts_owner};

#[cfg(test)]
mod assembly_tests {
    use super::*;

    #[test]
    fn test_single_scene_tree_is_assembled() {
        let result = process(&single_scene_flow());
        assert!(result.multi_scene.is_none());
        let space = result.updl_space.expect("single space");

        assert_eq!(space.id, "space-1");
        assert_eq!(space.name, "Asteroid Belt");
        assert_eq!(space.background_color.as_deref(), Some("#000010"));
        assert_eq!(space.entities.len(), 2);

        let asteroid = &space.entities[0];
        assert_eq!(asteroid.id, "asteroid-1");
        assert_eq!(asteroid.name, "Rock");
        assert_eq!(asteroid.entity_type, "asteroid");
        assert_eq!(asteroid.tags, vec!["minable", "rock"]);
        assert_eq!(asteroid.transform.position, Vec3::new(10.0, 0.0, -5.0));
        assert_eq!(asteroid.transform.rotation, Vec3::new(0.0, 45.0, 0.0));
        assert_eq!(asteroid.transform.scale, Vec3::splat(2.0));

        let types: Vec<_> = asteroid
            .components
            .iter()
            .map(|c| c.component_type.as_str())
            .collect();
        assert_eq!(types, vec!["render", "mineable"]);
        assert_eq!(
            asteroid.component("MINEABLE").and_then(|c| c.number("maxYield")),
            Some(3.0)
        );

        assert_eq!(asteroid.events.len(), 1);
        assert_eq!(asteroid.events[0].event_type, "OnClick");
        assert_eq!(asteroid.events[0].actions.len(), 1);
        assert_eq!(asteroid.events[0].actions[0].action_type, "Rotate");
        assert_eq!(asteroid.events[0].actions[0].number("y"), Some(90.0));

        let gate = &space.entities[1];
        assert_eq!(gate.transform.position, Vec3::new(0.0, 0.0, 40.0));
        assert_eq!(gate.transform.scale, Vec3::ONE);
        assert_eq!(
            gate.component("portal").and_then(|c| c.text("targetWorld")),
            Some("kubio")
        );
    }

    #[test]
    fn test_children_follow_node_order_not_edge_order() {
        let flow_json = flow(
            vec![
                node("s", "Space", json!({})),
                node("a", "Entity", json!({})),
                node("b", "Entity", json!({})),
                node("c", "Entity", json!({})),
            ],
            vec![edge("1", "c", "s"), edge("2", "a", "s"), edge("3", "b", "s")],
        );
        let space = process(&flow_json).updl_space.unwrap();
        let ids: Vec<_> = space.entities.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_orphans_and_dangling_edges_are_dropped() {
        let flow_json = flow(
            vec![
                node("s", "Space", json!({})),
                node("kept", "Entity", json!({})),
                node("orphan", "Entity", json!({})),
                node("lost-component", "Component", json!({ "componentType": "render" })),
            ],
            vec![
                edge("1", "kept", "s"),
                edge("2", "lost-component", "missing-entity"),
                edge("3", "ghost", "s"),
            ],
        );
        let space = process(&flow_json).updl_space.unwrap();
        assert_eq!(space.entities.len(), 1);
        assert_eq!(space.entities[0].id, "kept");
        assert!(space.entities[0].components.is_empty());
    }

    #[test]
    fn test_edges_outside_the_schema_are_ignored() {
        let flow_json = flow(
            vec![
                node("s", "Space", json!({})),
                node("e", "Entity", json!({})),
                node("c", "Component", json!({})),
                node("a", "Action", json!({})),
            ],
            vec![
                edge("1", "e", "s"),
                // Component owned directly by a Space, Action by an Entity: both invalid.
                edge("2", "c", "s"),
                edge("3", "a", "e"),
            ],
        );
        let space = process(&flow_json).updl_space.unwrap();
        assert_eq!(space.entities.len(), 1);
        assert!(space.entities[0].components.is_empty());
        assert!(space.entities[0].events.is_empty());
    }

    #[test]
    fn test_competing_owner_edges_last_one_wins() {
        let flow_json = flow(
            vec![
                node("s", "Space", json!({})),
                node("first", "Entity", json!({})),
                node("second", "Entity", json!({})),
                node("c", "Component", json!({ "componentType": "render" })),
            ],
            vec![
                edge("1", "first", "s"),
                edge("2", "second", "s"),
                edge("3", "c", "first"),
                edge("4", "c", "second"),
            ],
        );
        let space = process(&flow_json).updl_space.unwrap();
        assert!(space.entities[0].components.is_empty());
        assert_eq!(space.entities[1].components.len(), 1);
    }

    #[test]
    fn test_unknown_node_types_are_skipped() {
        let flow_json = flow(
            vec![
                node("s", "Space", json!({})),
                node("x", "Sparkle", json!({})),
                node("e", "Entity", json!({})),
            ],
            vec![edge("1", "x", "s"), edge("2", "e", "s")],
        );
        let space = process(&flow_json).updl_space.unwrap();
        assert_eq!(space.entities.len(), 1);
    }

    #[test]
    fn test_duplicate_node_ids_keep_the_first() {
        let flow_json = flow(
            vec![
                node("s", "Space", json!({})),
                node("e", "Entity", json!({ "entityName": "first" })),
                node("e", "Entity", json!({ "entityName": "second" })),
            ],
            vec![edge("1", "e", "s")],
        );
        let space = process(&flow_json).updl_space.unwrap();
        assert_eq!(space.entities.len(), 1);
        assert_eq!(space.entities[0].name, "first");
    }

    #[test]
    fn test_invalid_transform_drops_only_that_node() {
        let flow_json = flow(
            vec![
                node("s", "Space", json!({})),
                node("bad", "Entity", json!({ "transform": { "pos": [1, 2] } })),
                node("good", "Entity", json!({ "position": [1, 2, 3] })),
            ],
            vec![edge("1", "bad", "s"), edge("2", "good", "s")],
        );
        let space = process(&flow_json).updl_space.unwrap();
        assert_eq!(space.entities.len(), 1);
        assert_eq!(space.entities[0].id, "good");
        assert_eq!(space.entities[0].transform.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_space_flags_are_copied_verbatim() {
        let flow_json = flow(
            vec![
                node(
                    "s",
                    "Space",
                    json!({ "showPoints": false, "collectLeadName": true, "collectLeadPhone": "yes" }),
                ),
            ],
            vec![],
        );
        let space = process(&flow_json).updl_space.unwrap();
        assert_eq!(space.show_points, Some(false));
        assert_eq!(space.lead_collection.collect_name, Some(true));
        assert_eq!(space.lead_collection.collect_email, None);
        // Wrong JSON type: treated as absent, never coerced.
        assert_eq!(space.lead_collection.collect_phone, None);
    }

    #[test]
    fn test_data_values_pass_through_without_coercion() {
        let flow_json = flow(
            vec![
                node("s", "Space", json!({})),
                node(
                    "q",
                    "Data",
                    json!({ "dataType": "Question", "content": "Q?", "pointsValue": "10", "enablePoints": true }),
                ),
                node(
                    "a",
                    "Data",
                    json!({ "dataType": "Answer", "content": "A", "isCorrect": true, "pointsValue": 2.5 }),
                ),
            ],
            vec![edge("1", "q", "s"), edge("2", "a", "q")],
        );
        let space = process(&flow_json).updl_space.unwrap();
        let question = &space.datas[0];
        assert_eq!(question.points_value, None);
        assert_eq!(question.enable_points, Some(true));
        assert_eq!(question.answers.len(), 1);
        assert_eq!(question.answers[0].points_value, serde_json::Number::from_f64(2.5));
        assert_eq!(question.answers[0].is_correct, Some(true));

        let flat = space.flattened_datas();
        assert_eq!(flat.len(), 2);
        assert!(flat[0].answers.is_empty());
        assert_eq!(flat[1].id, "a");
    }

    #[test]
    fn test_event_actions_keep_node_order() {
        let flow_json = flow(
            vec![
                node("s", "Space", json!({})),
                node("e", "Entity", json!({})),
                node("ev", "Event", json!({ "eventType": "OnStart" })),
                node("a-log", "Action", json!({ "actionType": "Log", "message": "go" })),
                node("a-move", "Action", json!({ "actionType": "Move", "x": 2 })),
                node("a-fire", "Action", json!({ "actionType": "EmitEvent", "eventName": "done" })),
            ],
            vec![
                edge("1", "e", "s"),
                edge("2", "ev", "e"),
                edge("3", "a-fire", "ev"),
                edge("4", "a-log", "ev"),
                edge("5", "a-move", "ev"),
            ],
        );
        let space = process(&flow_json).updl_space.unwrap();
        let actions = &space.entities[0].events[0].actions;
        assert_eq!(actions.len(), 3);
        let types: Vec<_> = actions.iter().map(|a| a.action_type.as_str()).collect();
        assert_eq!(types, vec!["Log", "Move", "EmitEvent"]);
        assert_eq!(actions[1].number("x"), Some(2.0));
    }

    #[test]
    fn test_deep_answer_chains_are_truncated() {
        const CHAIN: usize = 5000;
        let mut nodes = vec![node("s", "Space", json!({}))];
        let mut edges = vec![edge("root", "d-0", "s")];
        for i in 0..CHAIN {
            nodes.push(node(&format!("d-{}", i), "Data", json!({ "content": "x" })));
            if i > 0 {
                edges.push(edge(&format!("e-{}", i), &format!("d-{}", i), &format!("d-{}", i - 1)));
            }
        }
        let space = process(&flow(nodes, edges)).updl_space.unwrap();

        let mut depth = 0;
        let mut current = &space.datas[0];
        while let Some(answer) = current.answers.first() {
            depth += 1;
            current = answer;
        }
        assert_eq!(depth, MAX_DATA_DEPTH);
        assert_eq!(current.id, format!("d-{}", MAX_DATA_DEPTH));

        let flat = space.flattened_datas();
        assert_eq!(flat.len(), MAX_DATA_DEPTH + 1);
        assert!(flat.iter().all(|d| d.answers.is_empty()));
        assert_eq!(updl::emit::scene_graph::emit(&space).count(), MAX_DATA_DEPTH + 2);
        let rendered = DisplaySpace { space: &space }.to_string();
        assert_eq!(rendered.matches("Data: Data").count(), MAX_DATA_DEPTH + 1);
    }

    #[test]
    fn test_string_inputs_are_not_trimmed() {
        let flow_json = flow(
            vec![
                node("s", "Space", json!({ "spaceName": "   " })),
                node("d", "Data", json!({ "content": "  ", "nextSpace": " " })),
                node("e", "Entity", json!({})),
                node("ev", "Event", json!({})),
                node("a", "Action", json!({ "actionType": "Move", "target": " " })),
            ],
            vec![
                edge("1", "d", "s"),
                edge("2", "e", "s"),
                edge("3", "ev", "e"),
                edge("4", "a", "ev"),
            ],
        );
        let space = process(&flow_json).updl_space.unwrap();
        // Blank names still fall back to the node id.
        assert_eq!(space.name, "s");
        assert_eq!(space.datas[0].content, "  ");
        assert_eq!(space.datas[0].next_space.as_deref(), Some(" "));
        assert_eq!(space.entities[0].events[0].actions[0].target.as_deref(), Some(" "));
    }

    #[test]
    fn test_points_value_keeps_its_json_number() {
        let flow_json = flow(
            vec![
                node("s", "Space", json!({})),
                node("q", "Data", json!({ "dataType": "Question", "pointsValue": 5 })),
                node("big", "Data", json!({ "pointsValue": 9007199254740993u64 })),
            ],
            vec![edge("1", "q", "s"), edge("2", "big", "s")],
        );
        let space = process(&flow_json).updl_space.unwrap();
        let question = serde_json::to_value(&space.datas[0]).unwrap();
        assert_eq!(question["pointsValue"].to_string(), "5");
        assert_eq!(question["pointsValue"].as_u64(), Some(5));

        let big = serde_json::to_string(&space.datas[1]).unwrap();
        assert!(big.contains("\"pointsValue\":9007199254740993"));
    }

    #[test]
    fn test_cameras_and_lights_attach_to_space() {
        let flow_json = flow(
            vec![
                node("s", "Space", json!({})),
                node("cam", "Camera", json!({ "fov": 60, "position": [0, 5, 20] })),
                node("sun", "Light", json!({ "lightType": "point", "intensity": 2, "color": "#ffeecc" })),
            ],
            vec![edge("1", "cam", "s"), edge("2", "sun", "s")],
        );
        let space = process(&flow_json).updl_space.unwrap();
        assert_eq!(space.cameras.len(), 1);
        assert_eq!(space.cameras[0].fov, Some(60.0));
        assert_eq!(space.cameras[0].transform.position, Vec3::new(0.0, 5.0, 20.0));
        assert_eq!(space.lights[0].light_type, "point");
        assert_eq!(space.lights[0].intensity, Some(2.0));
    }

    #[test]
    fn test_processing_is_deterministic() {
        let processor = UpdlProcessor::new();
        let first = processor.process_flow_data(&auth_game_flow()).unwrap();
        let second = processor.process_flow_data(&auth_game_flow()).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_processor_is_shareable_across_threads() {
        let processor = UpdlProcessor::new();
        let expected = processor.process_flow_data(&single_scene_flow()).unwrap();
        let flow_json = single_scene_flow();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| processor.process_flow_data(&flow_json).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}

#[cfg(test)]
mod registry_tests {
    use super::*;

    #[test]
    fn test_type_mapping_reuses_builtin_decoders() {
        let flow_json = flow(
            vec![
                node("s", "SceneNode", json!({ "spaceName": "Mapped" })),
                node("e", "ObjectNode", json!({})),
            ],
            vec![edge("1", "e", "s")],
        );

        let default = process(&flow_json);
        assert!(default.updl_space.is_none());

        let processor = UpdlProcessor::builder()
            .with_type_mapping("SceneNode", "Space")
            .with_type_mapping("ObjectNode", "Entity")
            .with_type_mapping("Ignored", "NotAType")
            .build();
        let space = processor.process_flow_data(&flow_json).unwrap().updl_space.unwrap();
        assert_eq!(space.name, "Mapped");
        assert_eq!(space.entities.len(), 1);
    }

    struct PlanetDecoder;

    impl NodeDecoder for PlanetDecoder {
        fn node_type(&self) -> &str {
            "Planet"
        }

        fn decode(
            &self,
            node: &FlowNodeDefinition,
        ) -> std::result::Result<UpdlNode, DecodeError> {
            let inputs = Inputs::new(node, NodeKind::Entity);
            Ok(UpdlNode::Entity(Entity {
                id: inputs.id(),
                name: inputs.name(&["planetName"]),
                entity_type: "planet".to_string(),
                transform: inputs.transform()?,
                ..Default::default()
            }))
        }
    }

    #[test]
    fn test_custom_decoder_participates_in_resolution() {
        let flow_json = flow(
            vec![
                node("s", "Space", json!({})),
                node("p", "Planet", json!({ "planetName": "Kubio", "scale": 8 })),
            ],
            vec![edge("1", "p", "s")],
        );
        let processor = UpdlProcessor::builder()
            .with_custom_decoder(Box::new(PlanetDecoder))
            .build();
        let space = processor.process_flow_data(&flow_json).unwrap().updl_space.unwrap();
        assert_eq!(space.entities[0].name, "Kubio");
        assert_eq!(space.entities[0].entity_type, "planet");
        assert_eq!(space.entities[0].transform.scale, Vec3::splat(8.0));
    }

    #[test]
    fn test_ownership_schema() {
        assert!(accepts_owner(NodeKind::Entity, NodeKind::Space));
        assert!(accepts_owner(NodeKind::Action, NodeKind::Event));
        assert!(accepts_owner(NodeKind::Data, NodeKind::Data));
        assert!(!accepts_owner(NodeKind::Space, NodeKind::Entity));
        assert!(!accepts_owner(NodeKind::Component, NodeKind::Space));
        assert!(!accepts_owner(NodeKind::Action, NodeKind::Entity));
    }

    #[test]
    fn test_ownership_index_tracks_scene_chain() {
        let processor = UpdlProcessor::new();
        let flow = parse_flow(&auth_game_flow()).unwrap().into_flow().unwrap();
        let nodes = processor.decode_nodes(&flow);
        let index = OwnershipIndex::resolve(&nodes, &flow.edges);

        assert!(index.has_scene_chain());
        assert_eq!(index.next_scene("space-auth"), Some("space-game"));
        assert_eq!(index.previous_scene("space-game"), Some("space-auth"));
        assert_eq!(index.owner_of("answer-2"), Some("question-1"));
        assert_eq!(index.owner_of("space-auth"), None);
        assert_eq!(index.children_of("question-1"), ["answer-1", "answer-2"]);
        assert!(index.children_of("ship-1").is_empty());
    }
}
