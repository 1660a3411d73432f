//! Common test utilities for building UPDL flows.
use serde_json::{Value, json};
use updl::prelude::*;

/// Editor node in the `{ id, data: { name, inputs } }` shape.
#[allow(dead_code)]
pub fn node(id: &str, name: &str, inputs: Value) -> Value {
    json!({ "id": id, "type": "customNode", "data": { "name": name, "inputs": inputs } })
}

/// Editor edge from `source` (child or earlier scene) to `target` (owner or later scene).
#[allow(dead_code)]
pub fn edge(id: &str, source: &str, target: &str) -> Value {
    json!({ "id": id, "source": source, "target": target })
}

#[allow(dead_code)]
pub fn flow(nodes: Vec<Value>, edges: Vec<Value>) -> String {
    json!({ "nodes": nodes, "edges": edges }).to_string()
}

#[allow(dead_code)]
pub fn process(flow_json: &str) -> ProcessingResult {
    process_flow_data(flow_json).expect("flow should process")
}

/// One Space with an asteroid (render + mineable components, click event
/// with a rotate action) and a gate.
#[allow(dead_code)]
pub fn single_scene_flow() -> String {
    flow(
        vec![
            node(
                "space-1",
                "Space",
                json!({ "spaceName": "Asteroid Belt", "backgroundColor": "#000010" }),
            ),
            node(
                "asteroid-1",
                "Entity",
                json!({
                    "entityName": "Rock",
                    "entityType": "asteroid",
                    "transform": { "pos": [10, 0, -5], "rot": [0, 45, 0], "scale": [2, 2, 2] },
                    "tags": "minable, rock"
                }),
            ),
            node(
                "render-1",
                "Component",
                json!({ "componentType": "render", "primitive": "sphere", "color": "#8b7355" }),
            ),
            node(
                "mineable-1",
                "Component",
                json!({ "componentType": "mineable", "resourceType": "ice", "maxYield": 3 }),
            ),
            node("event-1", "Event", json!({ "eventType": "OnClick" })),
            node("action-1", "Action", json!({ "actionType": "Rotate", "y": 90 })),
            node(
                "gate-1",
                "Entity",
                json!({
                    "entityName": "Jump Gate",
                    "entityType": "gate",
                    "transform": { "pos": { "x": 0, "y": 0, "z": 40 } }
                }),
            ),
            node(
                "portal-1",
                "Component",
                json!({ "componentType": "portal", "targetWorld": "kubio", "cooldownTime": 5000 }),
            ),
        ],
        vec![
            edge("e1", "asteroid-1", "space-1"),
            edge("e2", "render-1", "asteroid-1"),
            edge("e3", "mineable-1", "asteroid-1"),
            edge("e4", "event-1", "asteroid-1"),
            edge("e5", "action-1", "event-1"),
            edge("e6", "gate-1", "space-1"),
            edge("e7", "portal-1", "gate-1"),
        ],
    )
}

/// Auth scene collecting the player's name, chained to a game scene with a
/// five-point question and two answers.
#[allow(dead_code)]
pub fn auth_game_flow() -> String {
    flow(
        vec![
            // Game scene listed first: ordering must come from the chain.
            node(
                "space-game",
                "Space",
                json!({ "spaceName": "Game", "showPoints": true }),
            ),
            node(
                "space-auth",
                "Space",
                json!({ "spaceName": "Login", "collectLeadName": true, "collectLeadEmail": false }),
            ),
            node(
                "lead-data",
                "Data",
                json!({ "dataType": "Lead", "content": "Who are you?" }),
            ),
            node(
                "question-1",
                "Data",
                json!({
                    "dataType": "Question",
                    "content": "Which resource is mined?",
                    "pointsValue": 5,
                    "enablePoints": true
                }),
            ),
            node(
                "answer-1",
                "Data",
                json!({ "dataType": "Answer", "content": "Ice", "isCorrect": true }),
            ),
            node(
                "answer-2",
                "Data",
                json!({ "dataType": "Answer", "content": "Cheese", "isCorrect": false }),
            ),
            node("ship-1", "Entity", json!({ "entityType": "ship" })),
        ],
        vec![
            edge("edge-auth-game", "space-auth", "space-game"),
            edge("edge-lead", "lead-data", "space-auth"),
            edge("edge-q", "question-1", "space-game"),
            edge("edge-a1", "answer-1", "question-1"),
            edge("edge-a2", "answer-2", "question-1"),
            edge("edge-ship", "ship-1", "space-game"),
        ],
    )
}

/// Three chained scenes without scoring data; the last one is empty.
#[allow(dead_code)]
pub fn three_scene_flow() -> String {
    flow(
        vec![
            node("s1", "Space", json!({ "spaceName": "Intro" })),
            node("s2", "Space", json!({ "spaceName": "Mine" })),
            node("s3", "Space", json!({ "spaceName": "Outro" })),
            node("e1", "Entity", json!({ "entityType": "asteroid" })),
            node("e2", "Entity", json!({ "entityType": "station" })),
        ],
        vec![
            edge("c2", "s2", "s3"),
            edge("c1", "s1", "s2"),
            edge("o1", "e1", "s1"),
            edge("o2", "e2", "s2"),
        ],
    )
}
