use rand::{Rng, RngCore};

/// Decides how likely a contact is to pass the infection on.
pub trait TransmissionPolicy {
    /// Percent chance, 0..=100, for a carrier/host mask pairing.
    fn chance(&self, carrier_masked: bool, host_masked: bool) -> u32;

    /// Roll a whole number in 0..=100 and compare it with [`chance`].
    ///
    /// [`chance`]: TransmissionPolicy::chance
    fn transmits(&self, carrier_masked: bool, host_masked: bool, rng: &mut dyn RngCore) -> bool {
        rng.gen_range(0..=100u32) < self.chance(carrier_masked, host_masked)
    }
}

/// Fixed percentages by who is wearing a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskTable {
    pub unmasked_to_unmasked: u32,
    pub unmasked_to_masked: u32,
    pub masked_to_unmasked: u32,
    pub masked_to_masked: u32,
}

impl Default for MaskTable {
    fn default() -> Self {
        MaskTable {
            unmasked_to_unmasked: 95,
            unmasked_to_masked: 70,
            masked_to_unmasked: 5,
            masked_to_masked: 2,
        }
    }
}

impl TransmissionPolicy for MaskTable {
    fn chance(&self, carrier_masked: bool, host_masked: bool) -> u32 {
        match (carrier_masked, host_masked) {
            (false, false) => self.unmasked_to_unmasked,
            (false, true) => self.unmasked_to_masked,
            (true, false) => self.masked_to_unmasked,
            (true, true) => self.masked_to_masked,
        }
    }
}
