use crate::error::{ScenarioError, ScenarioResult};
use bytering::{ITEM_LEN_PREFIX, ITEM_MAX_LEN, MAX_CAPACITY};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioKind {
    /// Pump a continuous byte stream through the ring in bounded steps.
    Stream { total_bytes: u64, step: usize },
    /// Write and read back length-prefixed items of varying size.
    Framed { items: u32, max_len: usize },
    /// Write fixed-size records with eviction, then drain the survivors.
    Overwrite { record: usize, writes: u32 },
}

#[derive(Clone, Copy, Debug)]
pub struct ScenarioConfig {
    pub kind: ScenarioKind,
    pub capacity: usize,
}

impl ScenarioConfig {
    pub fn stream(capacity: usize, total_bytes: u64, step: usize) -> Self {
        Self {
            kind: ScenarioKind::Stream { total_bytes, step },
            capacity,
        }
    }

    pub fn framed(capacity: usize, items: u32, max_len: usize) -> Self {
        Self {
            kind: ScenarioKind::Framed { items, max_len },
            capacity,
        }
    }

    pub fn overwrite(capacity: usize, record: usize, writes: u32) -> Self {
        Self {
            kind: ScenarioKind::Overwrite { record, writes },
            capacity,
        }
    }

    pub fn validate(&self) -> ScenarioResult<()> {
        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            return Err(ScenarioError::InvalidConfig("capacity out of range"));
        }
        match self.kind {
            ScenarioKind::Stream { step, .. } => {
                if step == 0 || step > self.capacity {
                    return Err(ScenarioError::InvalidConfig(
                        "stream step must fit the ring",
                    ));
                }
            }
            ScenarioKind::Framed { max_len, .. } => {
                if max_len > ITEM_MAX_LEN {
                    return Err(ScenarioError::InvalidConfig(
                        "item length exceeds the framing range",
                    ));
                }
                if ITEM_LEN_PREFIX + max_len > self.capacity {
                    return Err(ScenarioError::InvalidConfig(
                        "largest item does not fit the ring",
                    ));
                }
            }
            ScenarioKind::Overwrite { record, .. } => {
                if record == 0 || record > self.capacity {
                    return Err(ScenarioError::InvalidConfig("record must fit the ring"));
                }
                if self.capacity % record != 0 {
                    return Err(ScenarioError::InvalidConfig(
                        "capacity must hold a whole number of records",
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Validation coverage for scenario configuration.

    use super::*;

    #[test]
    fn accepts_well_formed_configs() {
        assert!(ScenarioConfig::stream(64, 10_000, 16).validate().is_ok());
        assert!(ScenarioConfig::framed(96, 300, 40).validate().is_ok());
        assert!(ScenarioConfig::overwrite(64, 16, 23).validate().is_ok());
    }

    #[test]
    fn rejects_zero_capacity() {
        let config = ScenarioConfig::stream(0, 100, 8);
        assert!(matches!(
            config.validate(),
            Err(ScenarioError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_stream_step_beyond_capacity() {
        let config = ScenarioConfig::stream(32, 100, 33);
        assert!(matches!(
            config.validate(),
            Err(ScenarioError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_item_beyond_framing_range() {
        let config = ScenarioConfig::framed(1 << 20, 10, ITEM_MAX_LEN + 1);
        assert!(matches!(
            config.validate(),
            Err(ScenarioError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_item_larger_than_ring() {
        let config = ScenarioConfig::framed(16, 10, 32);
        assert!(matches!(
            config.validate(),
            Err(ScenarioError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_ragged_overwrite_records() {
        let config = ScenarioConfig::overwrite(20, 8, 5);
        assert!(matches!(
            config.validate(),
            Err(ScenarioError::InvalidConfig(_))
        ));
    }
}
