//! Motion engine configuration contracts that can be shared across crates.

use serde::{Deserialize, Serialize};

use crate::{reference_joints, JointSpec};

/// Default temporal offset between diffed frames (seconds).
pub const DEFAULT_DELTA_S: f64 = 5.0;

/// Motion engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Temporal offset for the alignment pass (seconds)
    pub delta_s: f64,

    /// Joint set to compute angles for
    pub joints: Vec<JointSpec>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            delta_s: DEFAULT_DELTA_S,
            joints: reference_joints(),
        }
    }
}

impl EngineConfig {
    /// Config with the reference joint set and a custom delta.
    pub fn with_delta(delta_s: f64) -> Self {
        Self {
            delta_s,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.delta_s, 5.0);
        assert_eq!(config.joints.len(), 6);
    }
}
