use serde::{Deserialize, Serialize};

/// Where an object is stored: the agent name, the object id and the agent's
/// advertised addresses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub name: String,
    pub uuid: String,
    pub ips: Vec<String>,
}
