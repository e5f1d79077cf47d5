//! Assignment parameters.

/// Tunable parameters for secondary structure assignment.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Hydrogen bond energy cutoff in kcal/mol. A candidate bond is
    /// accepted when its energy is strictly below this value.
    pub hbond_cutoff: f64,
    /// Minimum number of residues in a reported helix.
    pub min_helix_length: usize,
    /// Minimum number of residues per strand in a reported ladder.
    pub min_strand_length: usize,
    /// Whether to merge adjacent ladders across beta bulges.
    pub merge_bulges: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hbond_cutoff: -0.5,
            min_helix_length: 3,
            min_strand_length: 3,
            merge_bulges: true,
        }
    }
}
