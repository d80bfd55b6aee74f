use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use ptcgp_odds_core::{Affects, CardCatalog, CardDefinition, Policy};

pub const CARDS_FILE: &str = "cards.json";
pub const SERVER_FILE: &str = "server.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    pub web_root: PathBuf,
    pub assets_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:7878".to_string(),
            web_root: PathBuf::from("web"),
            assets_dir: PathBuf::from("assets"),
        }
    }
}
