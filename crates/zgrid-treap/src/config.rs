//! Treap configuration parameters.

/// How writes treat coordinates outside the 20-bit codec domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoordPolicy {
    /// Writes fail with `GridError::CoordinateOutOfRange`; reads of such
    /// coordinates return `None`.
    #[default]
    Reject,
    /// Coordinates silently wrap to their low 20 bits.
    Wrap,
}

/// Configuration for a [`SpatialTreap`](crate::SpatialTreap).
///
/// Fixed at construction; clones of a treap share their configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreapConfig {
    /// Seed for the node priority generator.
    ///
    /// `None` (the default) draws a fresh seed per treap. A fixed seed
    /// makes tree shapes reproducible, which tests rely on.
    pub seed: Option<u64>,

    /// Handling of coordinates outside the codec domain.
    ///
    /// Default: [`CoordPolicy::Reject`].
    pub coord_policy: CoordPolicy,
}

impl TreapConfig {
    /// Default coordinate policy.
    pub const DEFAULT_COORD_POLICY: CoordPolicy = CoordPolicy::Reject;

    /// Create a config with an unseeded generator and the default policy.
    pub fn new() -> Self {
        Self {
            seed: None,
            coord_policy: Self::DEFAULT_COORD_POLICY,
        }
    }

    /// Use a fixed priority seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the coordinate policy.
    pub fn coord_policy(mut self, policy: CoordPolicy) -> Self {
        self.coord_policy = policy;
        self
    }
}

impl Default for TreapConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rejects_and_is_unseeded() {
        let config = TreapConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.coord_policy, CoordPolicy::Reject);
    }

    #[test]
    fn setters_chain() {
        let config = TreapConfig::new().seed(7).coord_policy(CoordPolicy::Wrap);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.coord_policy, CoordPolicy::Wrap);
    }
}
