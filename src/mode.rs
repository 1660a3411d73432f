//! Classifies a processed flow as a single-player or multiplayer experience.

use crate::config::GenerationOptions;
use crate::model::{ProcessingResult, SceneData};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// An auth scene may hold at most this many entities (a near-empty login screen).
pub const MAX_AUTH_SCENE_ENTITIES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    SinglePlayer,
    Multiplayer,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::SinglePlayer => f.write_str("singleplayer"),
            GameMode::Multiplayer => f.write_str("multiplayer"),
        }
    }
}

/// Outcome of the multiplayer heuristic. The scenes are only set when it matched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MultiplayerDetection<'a> {
    pub is_multiplayer: bool,
    pub auth_space: Option<&'a SceneData>,
    pub game_space: Option<&'a SceneData>,
}

/// A flow is multiplayer when its first scene collects the player's name and is
/// nearly empty, and its second scene carries the game content.
pub fn detect_multiplayer_mode(result: &ProcessingResult) -> MultiplayerDetection<'_> {
    let Some(multi) = &result.multi_scene else {
        return MultiplayerDetection::default();
    };
    if multi.total_scenes < 2 {
        return MultiplayerDetection::default();
    }
    let (Some(first), Some(second)) = (multi.scenes.first(), multi.scenes.get(1)) else {
        return MultiplayerDetection::default();
    };

    let collects_name = first.space_data.lead_collection.collects_name();
    let minimal_auth = first.space_data.entities.len() <= MAX_AUTH_SCENE_ENTITIES;
    let game_content = second.has_content();
    debug!(
        collects_name,
        minimal_auth, game_content, "Evaluated multiplayer heuristic"
    );

    if collects_name && minimal_auth && game_content {
        MultiplayerDetection {
            is_multiplayer: true,
            auth_space: Some(first),
            game_space: Some(second),
        }
    } else {
        MultiplayerDetection::default()
    }
}

/// An explicit `game_mode` option wins; otherwise the heuristic decides.
pub fn determine_game_mode(result: &ProcessingResult, options: &GenerationOptions) -> GameMode {
    if let Some(mode) = options.game_mode {
        return mode;
    }
    if detect_multiplayer_mode(result).is_multiplayer {
        GameMode::Multiplayer
    } else {
        GameMode::SinglePlayer
    }
}

/// Whether the flow produced anything worth rendering.
pub fn has_content(result: &ProcessingResult) -> bool {
    match (&result.multi_scene, &result.updl_space) {
        (Some(multi), _) => multi.scenes.iter().any(SceneData::has_content),
        (None, Some(space)) => !space.entities.is_empty() || !space.datas.is_empty(),
        (None, None) => false,
    }
}
