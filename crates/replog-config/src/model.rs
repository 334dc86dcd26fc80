//! The `config.json` schema: `{ "Hosts": [...], "debug": bool }`.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
    Master,
    Secondary,
}

fn active_from_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let n = u8::deserialize(deserializer)?;
    Ok(n == 1)
}

/// One entry of the `Hosts` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostEntry {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HostKind,
    pub hostname: String,
    pub port: u16,
    #[serde(deserialize_with = "active_from_int")]
    pub active: bool,
}

impl HostEntry {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.hostname, self.port)
    }
}

/// The full contents of `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostsFile {
    #[serde(rename = "Hosts")]
    pub hosts: Vec<HostEntry>,
    #[serde(default)]
    pub debug: bool,
}

impl HostsFile {
    pub fn master(&self) -> Option<&HostEntry> {
        self.hosts.iter().find(|h| h.kind == HostKind::Master)
    }

    /// Active secondaries, in config order — this is also the order the
    /// coordinator fans replication out in.
    pub fn active_secondaries(&self) -> Vec<&HostEntry> {
        self.hosts
            .iter()
            .filter(|h| h.kind == HostKind::Secondary && h.active)
            .collect()
    }

    pub fn secondary_by_id(&self, id: u32) -> Option<&HostEntry> {
        self.hosts
            .iter()
            .find(|h| h.kind == HostKind::Secondary && h.id == id)
    }
}
