use crate::error::ParseError;
use crate::mode::GameMode;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLAYCANVAS_URL: &str = "https://code.playcanvas.com/playcanvas-stable.min.js";
pub const DEFAULT_TITLE: &str = "UPDL Experience";

/// Settings consumed by the emitters. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    /// Overrides the detected game mode.
    pub game_mode: Option<GameMode>,
    /// Document title; defaults to the game scene's name.
    pub title: Option<String>,
    pub playcanvas_url: String,
    pub multiplayer_server_url: Option<String>,
    /// Pretty-print scene graph JSON.
    pub pretty: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            game_mode: None,
            title: None,
            playcanvas_url: DEFAULT_PLAYCANVAS_URL.to_string(),
            multiplayer_server_url: None,
            pretty: true,
        }
    }
}

impl GenerationOptions {
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(|e| ParseError::InvalidJson(e.to_string()))
    }

    pub fn with_game_mode(mut self, mode: GameMode) -> Self {
        self.game_mode = Some(mode);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_playcanvas_url(mut self, url: impl Into<String>) -> Self {
        self.playcanvas_url = url.into();
        self
    }

    pub fn with_multiplayer_server_url(mut self, url: impl Into<String>) -> Self {
        self.multiplayer_server_url = Some(url.into());
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
