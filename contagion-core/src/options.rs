use crate::error::EngineError;

/// Name of the only recognised engine option.
pub const ACCOUNT_FOR_RADII_IN_DIST: &str = "account_for_radii_in_dist";

/// Tunables read by the tick pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Subtract both radii from the centre-to-centre distance before it is
    /// handed to proximity hooks (edge-to-edge instead of centre-to-centre).
    pub account_for_radii_in_dist: bool,
}

impl EngineOptions {
    /// Set an option by name. Unknown names are rejected, never ignored.
    pub fn set(&mut self, key: &str, value: bool) -> Result<(), EngineError> {
        match key {
            ACCOUNT_FOR_RADII_IN_DIST => {
                self.account_for_radii_in_dist = value;
                Ok(())
            }
            other => Err(EngineError::UnknownOption(other.to_string())),
        }
    }

    /// Apply a batch of named options, stopping at the first unknown name.
    pub fn apply<'a, I>(&mut self, entries: I) -> Result<(), EngineError>
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_centre_distance() {
        assert!(!EngineOptions::default().account_for_radii_in_dist);
    }

    #[test]
    fn set_known_option() {
        let mut options = EngineOptions::default();
        options.set(ACCOUNT_FOR_RADII_IN_DIST, true).unwrap();
        assert!(options.account_for_radii_in_dist);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut options = EngineOptions::default();
        let err = options.set("wrap_edges", true).unwrap_err();
        assert_eq!(err, EngineError::UnknownOption("wrap_edges".to_string()));
        assert_eq!(options, EngineOptions::default());
    }

    #[test]
    fn apply_stops_at_first_unknown() {
        let mut options = EngineOptions::default();
        let result = options.apply([("bogus", true), (ACCOUNT_FOR_RADII_IN_DIST, true)]);
        assert!(matches!(result, Err(EngineError::UnknownOption(_))));
        assert!(!options.account_for_radii_in_dist);
    }
}
