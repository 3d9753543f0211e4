//! Node configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use scarab_ocs::LtsId;

/// Node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Address this node listens on
    pub listen_addr: String,

    /// 1-based index of this node within its LTS node set (0 until joined)
    pub node_index: u32,

    /// Path where this node's LTS share is stored
    pub share_path: PathBuf,

    /// Identifier of the accepted LTS, once a ceremony has run
    pub lts_id: Option<LtsId>,

    /// Addresses of the other nodes in the set
    pub peers: Vec<String>,

    /// Whether to run in development mode
    pub dev_mode: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:7770".to_string(),
            node_index: 0,
            share_path: Self::default_share_path(),
            lts_id: None,
            peers: Vec::new(),
            dev_mode: false,
        }
    }
}

impl NodeConfig {
    fn default_share_path() -> PathBuf {
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share")))
            .unwrap_or_else(|| PathBuf::from("/var/lib"))
            .join("scarab")
            .join("lts_share.json")
    }

    /// Load configuration from file
    pub fn load(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Create the share directory if it doesn't exist
    pub fn ensure_directories(&self) -> crate::Result<()> {
        if let Some(parent) = self.share_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node.json");
        let mut config = NodeConfig::default();
        config.node_index = 2;
        config.lts_id = Some(LtsId::new([7; 32]));
        config.peers = vec!["127.0.0.1:7771".to_string()];
        config.save(&path).unwrap();

        let loaded = NodeConfig::load(&path).unwrap();
        assert_eq!(loaded.node_index, 2);
        assert_eq!(loaded.lts_id, config.lts_id);
        assert_eq!(loaded.peers, config.peers);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = NodeConfig::load(std::path::Path::new("/nonexistent/node.json"));
        assert!(err.is_err());
    }
}
