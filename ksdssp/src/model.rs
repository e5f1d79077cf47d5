//! A protein model and the assignment driver.

use ksdssp_core::Summarizable;

use crate::config::Config;
use crate::hbond;
use crate::helix::{self, Helix};
use crate::ladder::{self, Ladder};
use crate::sheet::{self, Sheet};
use crate::types::Residue;

/// A directed n x n hydrogen bond matrix, row-major.
///
/// `get(i, j)` is true when the carbonyl of residue `i` bonds the
/// amide of residue `j`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BondMatrix {
    size: usize,
    bonds: Vec<bool>,
}

impl BondMatrix {
    /// Create an empty matrix for `size` residues.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            bonds: vec![false; size * size],
        }
    }

    /// Number of residues covered by the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the carbonyl of `i` bonds the amide of `j`. Out-of-range
    /// indices read as unbonded.
    pub fn get(&self, i: usize, j: usize) -> bool {
        if i >= self.size || j >= self.size {
            return false;
        }
        self.bonds[i * self.size + j]
    }

    /// Set one directed entry.
    pub fn set(&mut self, i: usize, j: usize, bonded: bool) {
        self.bonds[i * self.size + j] = bonded;
    }
}

/// One coordinate set from a PDB file, with its assignment results.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Model {
    /// Residues in file order.
    pub residues: Vec<Residue>,
    /// Serial number from the MODEL record, if any.
    pub model_number: Option<i32>,
    /// Hydrogen bond matrix (empty until [`assign`](Model::assign) runs).
    pub bonds: BondMatrix,
    /// Assigned helices.
    pub helices: Vec<Helix>,
    /// Assigned ladders.
    pub ladders: Vec<Ladder>,
    /// Assigned sheets.
    pub sheets: Vec<Sheet>,
}

impl Model {
    /// Create a model with no assignments yet.
    pub fn new(residues: Vec<Residue>, model_number: Option<i32>) -> Self {
        let bonds = BondMatrix::new(residues.len());
        Self {
            residues,
            model_number,
            bonds,
            helices: Vec::new(),
            ladders: Vec::new(),
            sheets: Vec::new(),
        }
    }

    /// Number of residues.
    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    /// Whether the carbonyl of residue `i` bonds the amide of residue `j`.
    pub fn bonded(&self, i: usize, j: usize) -> bool {
        self.bonds.get(i, j)
    }

    /// Run the full Kabsch-Sander assignment on this model: synthesize
    /// amide hydrogens, compute the bond matrix, then assign helices,
    /// ladders, and sheets in that order.
    pub fn assign(&mut self, config: &Config) {
        hbond::add_amide_hydrogens(&mut self.residues);
        self.bonds = hbond::compute_matrix(&self.residues, config.hbond_cutoff);
        self.helices = helix::assign_helices(&mut self.residues, &self.bonds, config);
        self.ladders = ladder::find_ladders(&mut self.residues, &self.bonds, config);
        self.sheets = sheet::assemble(&mut self.ladders, &self.residues);
    }
}

impl Summarizable for Model {
    fn summary(&self) -> String {
        let number = self
            .model_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".into());
        format!(
            "Model {}: {} residue(s), {} helix(es), {} ladder(s), {} sheet(s)",
            number,
            self.residue_count(),
            self.helices.len(),
            self.ladders.len(),
            self.sheets.len(),
        )
    }
}

/// Assign every model in a run.
pub fn assign_all(models: &mut [Model], config: &Config) {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        models.par_iter_mut().for_each(|m| m.assign(config));
    }

    #[cfg(not(feature = "parallel"))]
    for model in models.iter_mut() {
        model.assign(config);
    }
}
