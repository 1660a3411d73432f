//! PlayCanvas template for space-mining (MMOOMM) experiences.
//!
//! Entities are dispatched on their `entityType` to an [`EntityTypeGenerator`];
//! types without a registered archetype fall back to [`DefaultEntityGenerator`].
//! Global [`SystemGenerator`]s are emitted once per bundle, ahead of the scene.

pub mod bundle;
pub mod components;
pub mod entities;
pub mod systems;

pub use entities::{
    AsteroidConfig, AsteroidGenerator, DefaultEntityGenerator, EntityTypeGenerator, GateConfig,
    GateGenerator, ShipConfig, ShipGenerator, StationConfig, StationGenerator, generate_asteroid,
    generate_gate, generate_ship, generate_station,
};
pub use systems::{HelperSystem, PhysicsSystem, SystemGenerator, order_systems};

use super::{EmitOutput, EmitTarget, SceneEmitter, js_number, js_string};
use crate::config::{DEFAULT_TITLE, GenerationOptions};
use crate::error::EmitError;
use crate::mode::{GameMode, detect_multiplayer_mode, determine_game_mode};
use crate::model::{Entity, ProcessingResult, Space};
use ahash::AHashMap;
use bundle::{DEFAULT_MULTIPLAYER_SERVER_URL, Document, render_document};
use itertools::Itertools;
use tracing::{debug, info};

/// Generates the HTML bundle of an MMOOMM experience.
pub struct MmoommEmitter {
    generators: AHashMap<String, Box<dyn EntityTypeGenerator>>,
    fallback: Box<dyn EntityTypeGenerator>,
    systems: Vec<Box<dyn SystemGenerator>>,
}

impl Default for MmoommEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl MmoommEmitter {
    /// Emitter with the built-in archetypes (asteroid, gate, ship, station) and
    /// the physics and helper systems.
    pub fn new() -> Self {
        Self {
            generators: AHashMap::new(),
            fallback: Box::new(DefaultEntityGenerator),
            systems: systems::default_systems(),
        }
        .with_entity_generator(AsteroidGenerator)
        .with_entity_generator(GateGenerator)
        .with_entity_generator(ShipGenerator)
        .with_entity_generator(StationGenerator)
    }

    /// Registers (or replaces) the archetype for the generator's `entityType`.
    pub fn with_entity_generator<G: EntityTypeGenerator + 'static>(mut self, generator: G) -> Self {
        self.generators.insert(
            generator.entity_type().to_ascii_lowercase(),
            Box::new(generator),
        );
        self
    }

    /// Adds a system, replacing any registered one of the same name.
    pub fn with_system<S: SystemGenerator + 'static>(mut self, system: S) -> Self {
        let boxed: Box<dyn SystemGenerator> = Box::new(system);
        match self.systems.iter().position(|s| s.name() == boxed.name()) {
            Some(i) => self.systems[i] = boxed,
            None => self.systems.push(boxed),
        }
        self
    }

    fn generator_for(&self, entity_type: &str) -> &dyn EntityTypeGenerator {
        match self.generators.get(&entity_type.to_ascii_lowercase()) {
            Some(generator) => generator.as_ref(),
            None => {
                debug!(entity_type, "No archetype registered, using default");
                self.fallback.as_ref()
            }
        }
    }

    /// Self-contained block creating one entity with its archetype behaviour,
    /// components and events.
    pub fn generate_entity(&self, entity: &Entity) -> String {
        let generator = self.generator_for(&entity.entity_type);
        let t = &entity.transform;
        let tags: String = entity
            .tags
            .iter()
            .map(|tag| format!("    entity.tags.add({});\n", js_string(tag)))
            .collect();
        let events: String = entity.events.iter().map(components::generate_event).collect();

        format!(
            "// Entity {id} ({entity_type})\n(function () {{\n    const entity = new pc.Entity({name});\n    entity.setLocalPosition({px}, {py}, {pz});\n    entity.setLocalEulerAngles({rx}, {ry}, {rz});\n    entity.setLocalScale({sx}, {sy}, {sz});\n{render}{tags}{behaviour}{events}    app.root.addChild(entity);\n}})();\n",
            id = js_string(&entity.id),
            entity_type = js_string(&entity.entity_type),
            name = js_string(&entity.name),
            px = js_number(t.position.x),
            py = js_number(t.position.y),
            pz = js_number(t.position.z),
            rx = js_number(t.rotation.x),
            ry = js_number(t.rotation.y),
            rz = js_number(t.rotation.z),
            sx = js_number(t.scale.x),
            sy = js_number(t.scale.y),
            sz = js_number(t.scale.z),
            render = components::generate_render(entity, generator.appearance()),
            behaviour = generator.generate(entity),
        )
    }

    /// Global systems in dependency order.
    pub fn generate_systems(&self) -> String {
        order_systems(&self.systems)
            .into_iter()
            .map(|system| system.generate())
            .join("\n")
    }

    /// Camera, lights and entities of the game space, in the scope of `app`.
    pub fn generate_scene_script(&self, space: &Space, mode: GameMode) -> String {
        let entities = space
            .entities
            .iter()
            .sorted_by_key(|entity| !entity.entity_type.eq_ignore_ascii_case("ship"))
            .map(|entity| self.generate_entity(entity))
            .join("\n");
        format!(
            "    app.root.name = {name};\n    app.fire('updl:mode', {mode});\n{camera}{lights}\n{entities}",
            name = js_string(&space.name),
            mode = js_string(&mode.to_string()),
            camera = bundle::generate_camera(space),
            lights = bundle::generate_lights(space),
        )
    }
}

/// The Space holding the playable content: the detected game scene in
/// multiplayer flows, else the single space, else the first scene with entities.
pub fn select_game_space(result: &ProcessingResult) -> Option<&Space> {
    let detection = detect_multiplayer_mode(result);
    if let Some(game) = detection.game_space {
        return Some(&game.space_data);
    }
    if let Some(space) = &result.updl_space {
        return Some(space);
    }
    let multi = result.multi_scene.as_ref()?;
    multi
        .scenes
        .iter()
        .find(|scene| !scene.space_data.entities.is_empty())
        .or_else(|| multi.scenes.first())
        .map(|scene| &scene.space_data)
}

impl SceneEmitter for MmoommEmitter {
    fn target(&self) -> EmitTarget {
        EmitTarget::Mmoomm
    }

    fn emit(
        &self,
        result: &ProcessingResult,
        options: &GenerationOptions,
    ) -> Result<EmitOutput, EmitError> {
        let space = select_game_space(result).ok_or(EmitError::NoScene)?;
        let mode = determine_game_mode(result, options);
        let title = options
            .title
            .as_deref()
            .or(Some(space.name.as_str()).filter(|name| !name.is_empty()))
            .unwrap_or(DEFAULT_TITLE);
        let server_url = options
            .multiplayer_server_url
            .as_deref()
            .unwrap_or(DEFAULT_MULTIPLAYER_SERVER_URL);

        let systems_script = self.generate_systems();
        let scene_script = self.generate_scene_script(space, mode);
        let content = render_document(&Document {
            title,
            playcanvas_url: &options.playcanvas_url,
            mode,
            server_url,
            systems_script: &systems_script,
            scene_script: &scene_script,
        });

        info!(
            space = %space.id,
            %mode,
            entities = space.entities.len(),
            bytes = content.len(),
            "Generated MMOOMM bundle"
        );

        Ok(EmitOutput {
            target: EmitTarget::Mmoomm,
            media_type: "text/html",
            content,
        })
    }
}
