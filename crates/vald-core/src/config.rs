use serde::{Deserialize, Serialize};

use crate::distance::DistanceType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub dimension: usize,
    pub distance: DistanceType,
    /// Reported as `Object.Location.name` and as the key of the per-agent
    /// index details.
    pub agent_name: String,
    pub agent_ips: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dimension: 128,
            distance: DistanceType::L2,
            agent_name: "vald-agent-0".to_string(),
            agent_ips: vec!["127.0.0.1".to_string()],
        }
    }
}
