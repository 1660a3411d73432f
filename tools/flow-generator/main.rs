use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value, json};
use std::fs;
use updl::flow::{EditorEdge, EditorFlow, EditorNode, EditorNodeData};

const ENTITY_TYPES: [&str; 4] = ["asteroid", "gate", "station", "default"];
const RESOURCES: [&str; 3] = ["asteroidMass", "ice", "platinum"];
const COLORS: [&str; 5] = ["#8b7355", "#4fc3f7", "#9e9e9e", "#e57373", "#81c784"];

/// A CLI tool to generate random UPDL flows for testing the processor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// Number of chained scenes (Spaces)
    #[arg(long, default_value_t = 1)]
    scenes: usize,

    /// Entities per scene
    #[arg(long, default_value_t = 5)]
    entities: usize,

    /// Questions per scene, each with three answers
    #[arg(long, default_value_t = 0)]
    questions: usize,

    /// Start with an auth scene that collects the player's name
    #[arg(long)]
    auth: bool,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

/// Accumulates nodes and edges while keeping ids unique.
struct FlowBuilder {
    flow: EditorFlow,
}

impl FlowBuilder {
    fn node(&mut self, id: String, name: &str, inputs: Value) -> String {
        let inputs = match inputs {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.flow.nodes.push(EditorNode {
            id: id.clone(),
            node_type: Some("customNode".to_string()),
            data: EditorNodeData {
                name: Some(name.to_string()),
                label: None,
                inputs,
            },
        });
        id
    }

    fn edge(&mut self, source: &str, target: &str) {
        self.flow.edges.push(EditorEdge {
            id: format!("edge-{}", self.flow.edges.len()),
            source: source.to_string(),
            target: target.to_string(),
            source_handle: None,
            target_handle: None,
        });
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.scenes == 0 {
        eprintln!("Error: --scenes must be at least 1");
        std::process::exit(1);
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    println!(
        "Generating flow (scenes: {}, entities: {}, questions: {}, seed: {})...",
        cli.scenes, cli.entities, cli.questions, seed
    );

    let mut builder = FlowBuilder {
        flow: EditorFlow::default(),
    };
    let mut previous: Option<String> = None;

    if cli.auth {
        let auth = builder.node(
            "space-auth".to_string(),
            "Space",
            json!({ "spaceName": "Login", "collectLeadName": true }),
        );
        previous = Some(auth);
    }

    for scene in 0..cli.scenes {
        let space = builder.node(
            format!("space-{}", scene),
            "Space",
            json!({
                "spaceName": format!("Sector {}", scene + 1),
                "backgroundColor": COLORS.choose(&mut rng).copied().unwrap_or("#000000"),
                "showPoints": cli.questions > 0,
            }),
        );
        if let Some(prev) = &previous {
            builder.edge(prev, &space);
        }

        for e in 0..cli.entities {
            generate_entity(&mut builder, &mut rng, &space, scene, e);
        }
        for q in 0..cli.questions {
            generate_question(&mut builder, &mut rng, &space, scene, q);
        }
        previous = Some(space);
    }

    let json_output = serde_json::to_string_pretty(&builder.flow)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated {} nodes and {} edges to '{}'",
        builder.flow.nodes.len(),
        builder.flow.edges.len(),
        cli.output
    );

    Ok(())
}

fn generate_entity(builder: &mut FlowBuilder, rng: &mut StdRng, space: &str, scene: usize, n: usize) {
    let entity_type = ENTITY_TYPES.choose(rng).copied().unwrap_or("default");
    let id = builder.node(
        format!("entity-{}-{}", scene, n),
        "Entity",
        json!({
            "entityName": format!("{} {}", entity_type, n),
            "entityType": entity_type,
            "transform": {
                "pos": [
                    rng.random_range(-50.0..50.0),
                    rng.random_range(-10.0..10.0),
                    rng.random_range(-50.0..50.0),
                ],
                "rot": [0.0, rng.random_range(0.0..360.0), 0.0],
                "scale": rng.random_range(1.0..4.0),
            },
        }),
    );
    builder.edge(&id, space);

    let render = builder.node(
        format!("render-{}-{}", scene, n),
        "Component",
        json!({
            "componentType": "render",
            "color": COLORS.choose(rng).copied().unwrap_or("#ffffff"),
        }),
    );
    builder.edge(&render, &id);

    let behaviour = match entity_type {
        "asteroid" => Some(json!({
            "componentType": "mineable",
            "resourceType": RESOURCES.choose(rng).copied().unwrap_or("asteroidMass"),
            "maxYield": rng.random_range(1..10),
        })),
        "gate" => Some(json!({
            "componentType": "portal",
            "targetWorld": format!("sector-{}", rng.random_range(1..9)),
            "cooldownTime": 2000,
        })),
        "station" => Some(json!({
            "componentType": "trading",
            "pricePerTon": rng.random_range(5..25),
        })),
        _ => None,
    };
    if let Some(inputs) = behaviour {
        let component = builder.node(format!("behaviour-{}-{}", scene, n), "Component", inputs);
        builder.edge(&component, &id);
    }

    if rng.random_bool(0.3) {
        let event = builder.node(
            format!("event-{}-{}", scene, n),
            "Event",
            json!({ "eventType": "OnClick" }),
        );
        builder.edge(&event, &id);
        let action = builder.node(
            format!("action-{}-{}", scene, n),
            "Action",
            json!({ "actionType": "Rotate", "y": 45 }),
        );
        builder.edge(&action, &event);
    }
}

fn generate_question(builder: &mut FlowBuilder, rng: &mut StdRng, space: &str, scene: usize, n: usize) {
    let question = builder.node(
        format!("question-{}-{}", scene, n),
        "Data",
        json!({
            "dataType": "Question",
            "content": format!("Question {} of sector {}?", n + 1, scene + 1),
            "enablePoints": true,
            "pointsValue": rng.random_range(1..=10),
        }),
    );
    builder.edge(&question, space);

    let correct = rng.random_range(0..3);
    for a in 0..3 {
        let answer = builder.node(
            format!("answer-{}-{}-{}", scene, n, a),
            "Data",
            json!({
                "dataType": "Answer",
                "content": format!("Answer {}", a + 1),
                "isCorrect": a == correct,
            }),
        );
        builder.edge(&answer, &question);
    }
}
