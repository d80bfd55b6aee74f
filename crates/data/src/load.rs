use crate::schema::{CardCatalog, CardDefinition, ServerConfig, CARDS_FILE, SERVER_FILE};
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Catalog from `dir/cards.json`, or the built-in one when the file is absent.
pub fn load_catalog(dir: &Path) -> anyhow::Result<CardCatalog> {
    let path = dir.join(CARDS_FILE);
    if !path.exists() {
        return Ok(CardCatalog::standard());
    }
    load_catalog_file(&path)
}

pub fn load_catalog_file(path: &Path) -> anyhow::Result<CardCatalog> {
    let cards: Vec<CardDefinition> = load_json(path)?;
    parse_catalog(cards).with_context(|| format!("build catalog from {}", path.display()))
}

pub fn parse_catalog_str(raw: &str) -> anyhow::Result<CardCatalog> {
    let cards: Vec<CardDefinition> = serde_json::from_str(raw).context("parse card catalog")?;
    parse_catalog(cards)
}

fn parse_catalog(cards: Vec<CardDefinition>) -> anyhow::Result<CardCatalog> {
    for card in &cards {
        if card.name.trim().is_empty() {
            anyhow::bail!("card with empty name");
        }
    }
    Ok(CardCatalog::new(cards)?)
}

/// Settings from `dir/server.json` layered over the defaults.
pub fn load_server_config(dir: &Path) -> anyhow::Result<ServerConfig> {
    let path = dir.join(SERVER_FILE);
    if !path.exists() {
        return Ok(ServerConfig {
            assets_dir: dir.to_path_buf(),
            ..ServerConfig::default()
        });
    }
    let mut config: ServerConfig = load_json(&path)?;
    config.assets_dir = dir.to_path_buf();
    Ok(config)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}
