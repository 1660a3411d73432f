//! Tests for the generic scene graph output.
mod common;
use common::*;
use serde_json::Value;
use updl::emit::scene_graph::{SCENE_GRAPH_VERSION, SceneGraph, emit};
use updl::prelude::*;

#[test]
fn test_scene_graph_mirrors_the_space_tree() {
    let space = process(&single_scene_flow()).updl_space.unwrap();
    let root = emit(&space);

    assert_eq!(root.id, "space-1");
    assert_eq!(root.kind, NodeKind::Space);
    assert_eq!(root.name.as_deref(), Some("Asteroid Belt"));
    assert_eq!(root.children.len(), 2);
    // space + 2 entities + 3 components + 1 event + 1 action
    assert_eq!(root.count(), 8);

    let asteroid = root.find("asteroid-1").unwrap();
    assert_eq!(asteroid.kind, NodeKind::Entity);
    assert_eq!(asteroid.properties["entityType"], "asteroid");
    assert_eq!(asteroid.properties["transform"]["position"][0], 10.0);

    let action = root.find("action-1").unwrap();
    assert_eq!(action.kind, NodeKind::Action);
    assert_eq!(action.properties["actionType"], "Rotate");
    assert_eq!(action.properties["y"], 90);

    let mineable = root.find("mineable-1").unwrap();
    assert_eq!(mineable.properties["componentType"], "mineable");
    assert_eq!(mineable.properties["resourceType"], "ice");

    assert!(root.find("nope").is_none());
}

#[test]
fn test_scene_graph_document_for_multi_scene_flow() {
    let result = process(&auth_game_flow());
    let graph = SceneGraph::from_result(&result, &GenerationOptions::default()).unwrap();

    assert_eq!(graph.version, SCENE_GRAPH_VERSION);
    assert_eq!(graph.game_mode, GameMode::Multiplayer);
    assert_eq!(graph.scenes.len(), 3);
    assert!(graph.scenes[2].is_results_scene);
    assert_eq!(graph.scenes[0].next_scene_id.as_deref(), Some("space-game"));

    let question = graph.scenes[1].root.find("question-1").unwrap();
    assert_eq!(question.children.len(), 2);
    assert_eq!(question.properties["pointsValue"], 5);
    let answer = question.find("answer-1").unwrap();
    assert_eq!(answer.properties["isCorrect"], true);

    let auth = &graph.scenes[0].root;
    assert_eq!(auth.properties["leadCollection"]["collectName"], true);
}

#[test]
fn test_scene_graph_emitter_outputs_json() {
    let result = process(&single_scene_flow());
    let compact = GenerationOptions::default().with_pretty(false);
    let output = emitter_for(EmitTarget::SceneGraph)
        .emit(&result, &compact)
        .unwrap();

    assert_eq!(output.target, EmitTarget::SceneGraph);
    assert_eq!(output.media_type, "application/json");
    assert!(!output.content.contains('\n'));

    let value: Value = serde_json::from_str(&output.content).unwrap();
    assert_eq!(value["version"], SCENE_GRAPH_VERSION);
    assert_eq!(value["gameMode"], "singleplayer");
    assert_eq!(value["scenes"][0]["root"]["kind"], "space");
    assert_eq!(value["scenes"][0]["isResultsScene"], false);

    let pretty = emitter_for(EmitTarget::SceneGraph)
        .emit(&result, &GenerationOptions::default())
        .unwrap();
    assert!(pretty.content.contains('\n'));
}

#[test]
fn test_empty_result_has_no_scene_to_emit() {
    let result = ProcessingResult::default();
    let err = emitter_for(EmitTarget::SceneGraph)
        .emit(&result, &GenerationOptions::default())
        .unwrap_err();
    assert_eq!(err, EmitError::NoScene);
    assert_eq!(
        emitter_for(EmitTarget::Mmoomm)
            .emit(&result, &GenerationOptions::default())
            .unwrap_err(),
        EmitError::NoScene
    );
}

#[test]
fn test_display_space_renders_a_tree() {
    let space = process(&single_scene_flow()).updl_space.unwrap();
    let rendered = DisplaySpace { space: &space }.to_string();

    assert!(rendered.starts_with("Space: Asteroid Belt (space-1)"));
    assert!(rendered.contains("├── Entity: asteroid-1 <asteroid>"));
    assert!(rendered.contains("└── Entity: gate-1 <gate>"));
    assert!(rendered.contains("render"));
    assert!(rendered.contains("Rotate"));
}
