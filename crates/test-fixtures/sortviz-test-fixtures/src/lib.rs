//! Shared JSON fixtures for sortviz tests and benches.
//!
//! Everything is addressed by name through `fixtures/manifest.json`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    scenarios: HashMap<String, String>,
    transcripts: HashMap<String, String>,
}

/// An input array and its ascending permutation.
#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    pub input: Vec<i64>,
    pub sorted: Vec<i64>,
    #[serde(default)]
    pub note: Option<String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a str> {
    map.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod scenarios {
    use super::*;

    /// Scenario names, sorted for stable iteration.
    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.scenarios.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn load(name: &str) -> Result<Scenario> {
        let rel = lookup(&MANIFEST.scenarios, "scenario", name)?;
        super::load_json(rel)
    }

    /// Every scenario, by name.
    pub fn all() -> Result<Vec<(String, Scenario)>> {
        keys()
            .into_iter()
            .map(|k| load(&k).map(|s| (k, s)))
            .collect()
    }
}

pub mod transcripts {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.transcripts.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.transcripts, "transcript", name)?;
        read_to_string(rel)
    }

    /// Load into a caller-defined type (the event type lives in the engine crate).
    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.transcripts, "transcript", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.transcripts, "transcript", name)?;
        Ok(resolve_path(rel))
    }
}
