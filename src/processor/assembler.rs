use super::resolver::OwnershipIndex;
use crate::model::{Data, Entity, Event, Space, UpdlNode};
use ahash::AHashMap;
use tracing::warn;

/// Levels of answers kept below a top-level Data node. Deeper nodes are dropped.
pub const MAX_DATA_DEPTH: usize = 32;

/// Builds the semantic tree of a Space from the decoded nodes and the ownership index.
pub struct SpaceAssembler<'a> {
    nodes: &'a AHashMap<&'a str, &'a UpdlNode>,
    index: &'a OwnershipIndex,
}

impl<'a> SpaceAssembler<'a> {
    pub fn new(nodes: &'a AHashMap<&'a str, &'a UpdlNode>, index: &'a OwnershipIndex) -> Self {
        Self { nodes, index }
    }

    /// Copies the Space's own fields verbatim and attaches everything it owns.
    pub fn assemble(&self, space: &Space) -> Space {
        let mut assembled = Space {
            entities: Vec::new(),
            datas: Vec::new(),
            cameras: Vec::new(),
            lights: Vec::new(),
            ..space.clone()
        };

        for child in self.children(&space.id) {
            match child {
                UpdlNode::Entity(entity) => assembled.entities.push(self.assemble_entity(entity)),
                UpdlNode::Data(data) => assembled.datas.push(self.assemble_data(data, 0)),
                UpdlNode::Camera(camera) => assembled.cameras.push(camera.clone()),
                UpdlNode::Light(light) => assembled.lights.push(light.clone()),
                _ => {}
            }
        }
        assembled
    }

    fn children(&self, owner_id: &str) -> Vec<&'a UpdlNode> {
        self.index
            .children_of(owner_id)
            .iter()
            .filter_map(|id| self.nodes.get(id.as_str()).copied())
            .collect()
    }

    fn assemble_entity(&self, entity: &Entity) -> Entity {
        let mut assembled = Entity {
            components: Vec::new(),
            events: Vec::new(),
            ..entity.clone()
        };
        for child in self.children(&entity.id) {
            match child {
                UpdlNode::Component(component) => assembled.components.push(component.clone()),
                UpdlNode::Event(event) => assembled.events.push(self.assemble_event(event)),
                _ => {}
            }
        }
        assembled
    }

    fn assemble_event(&self, event: &Event) -> Event {
        let actions = self
            .children(&event.id)
            .into_iter()
            .filter_map(|child| match child {
                UpdlNode::Action(action) => Some(action.clone()),
                _ => None,
            })
            .collect();
        Event {
            actions,
            ..event.clone()
        }
    }

    // Owner chains are acyclic below a Space; the depth bound keeps every
    // consumer of the nested answers off deep recursion.
    fn assemble_data(&self, data: &Data, depth: usize) -> Data {
        let mut answers = Vec::new();
        for child in self.children(&data.id) {
            let UpdlNode::Data(answer) = child else {
                continue;
            };
            if depth >= MAX_DATA_DEPTH {
                warn!(
                    data_id = %answer.id,
                    owner = %data.id,
                    "Dropping Data nested more than {} levels deep",
                    MAX_DATA_DEPTH
                );
                continue;
            }
            answers.push(self.assemble_data(answer, depth + 1));
        }
        Data {
            answers,
            ..data.clone()
        }
    }
}
