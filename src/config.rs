//! Configuration management

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub render: RenderConfig,
    pub store: StoreConfig,
    pub media: MediaConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Defaults for extraction runs when the request omits parameters
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub scale: f32,
    pub quality: f32,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum extraction runs kept in memory before LRU eviction
    pub max_extractions: usize,
}

#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// tikwm-compatible TikTok lookup endpoint
    pub tikwm_endpoint: String,
    /// External YouTube MP4/MP3 conversion service
    pub converter_endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            render: RenderConfig {
                scale: 2.0,
                quality: 0.92,
            },
            store: StoreConfig {
                max_extractions: 16,
            },
            media: MediaConfig {
                tikwm_endpoint: "https://www.tikwm.com".to_string(),
                converter_endpoint: "https://api.vevioz.com/apis/button".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    /// for anything unset or unparseable
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.server.port),
            },
            render: RenderConfig {
                scale: env::var("RENDER_SCALE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.render.scale),
                quality: env::var("RENDER_QUALITY")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.render.quality),
            },
            store: StoreConfig {
                max_extractions: env::var("STORE_MAX_EXTRACTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.store.max_extractions),
            },
            media: MediaConfig {
                tikwm_endpoint: env::var("TIKWM_ENDPOINT").unwrap_or(defaults.media.tikwm_endpoint),
                converter_endpoint: env::var("CONVERTER_ENDPOINT")
                    .unwrap_or(defaults.media.converter_endpoint),
            },
        }
    }
}
