use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use url::Url;

/// Runtime configuration, resolved once in `main` before the app starts.
///
/// Sources, later ones winning: built-in defaults, an optional JSON file
/// named by `ARCADE_CONFIG`, then individual environment variables.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArcadeConfig {
    /// Path to the cabinet GLB model. An empty path skips loading entirely
    /// and goes straight to the procedural fallback.
    pub model_path: String,
    /// URL of the page this scene is embedded in. Drives the landing-page
    /// signal that suppresses in-screen notification banners.
    pub page_url: Option<String>,
    /// `false` swaps the tone synthesizer for a silent null object.
    pub audio_enabled: bool,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            model_path: "assets/arcade.glb".to_string(),
            page_url: None,
            audio_enabled: true,
        }
    }
}

impl ArcadeConfig {
    pub fn from_env() -> Self {
        let mut config = match std::env::var("ARCADE_CONFIG") {
            Ok(path) => match std::fs::read_to_string(&path) {
                Ok(text) => match serde_json::from_str::<ArcadeConfig>(&text) {
                    Ok(config) => config,
                    Err(err) => {
                        eprintln!("ignoring unparseable config {path}: {err}");
                        ArcadeConfig::default()
                    }
                },
                Err(err) => {
                    eprintln!("ignoring unreadable config {path}: {err}");
                    ArcadeConfig::default()
                }
            },
            Err(_) => ArcadeConfig::default(),
        };

        if let Ok(path) = std::env::var("ARCADE_MODEL") {
            config.model_path = path;
        }
        if let Ok(url) = std::env::var("ARCADE_PAGE_URL") {
            config.page_url = Some(url);
        }
        if let Ok(value) = std::env::var("ARCADE_AUDIO") {
            config.audio_enabled = !matches!(value.as_str(), "off" | "0" | "false");
        }

        if let Err(reason) = config.validate() {
            eprintln!("invalid arcade config ({reason}), falling back to defaults");
            return ArcadeConfig::default();
        }
        config
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(url) = &self.page_url {
            Url::parse(url).map_err(|err| format!("page_url: {err}"))?;
        }
        Ok(())
    }

    /// Whether the scene sits on the primary landing page. Banners and other
    /// notification chrome are suppressed there. An unset or unparseable URL
    /// counts as the landing page, which keeps the quiet default.
    pub fn is_primary_page(&self) -> bool {
        let Some(raw) = &self.page_url else {
            return true;
        };
        let Ok(url) = Url::parse(raw) else {
            return true;
        };
        let path = url.path();
        path.is_empty() || path == "/" || path.ends_with("/index.html")
    }
}
