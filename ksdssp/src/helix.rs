//! Turn and helix assignment.
//!
//! A residue whose carbonyl bonds the amide of residue i+n forms an
//! n-turn. Two consecutive n-turns make the overlapping residues
//! helical; maximal helical runs above the minimum length are reported
//! with a PDB helix class derived from the CA dihedral at the start of
//! the run.

use crate::config::Config;
use crate::geometry::dihedral_points;
use crate::model::BondMatrix;
use crate::types::{Point3D, Residue, ResidueFlags};

/// A maximal helical run with its PDB helix class.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Helix {
    /// Index of the first residue.
    pub from: usize,
    /// Index of the last residue (inclusive).
    pub to: usize,
    /// PDB helix class: 1 right-handed alpha, 5 right-handed 3-10,
    /// 6 left-handed alpha, 0 unclassified.
    pub code: u8,
}

impl Helix {
    /// Number of residues in the run.
    pub fn length(&self) -> usize {
        self.to - self.from + 1
    }
}

/// Mark n-turn donor, acceptor, and gap flags from the bond matrix.
fn mark_turns(residues: &mut [Residue], bonds: &BondMatrix, order: usize) {
    let n = residues.len();
    if n <= order {
        return;
    }
    let (acceptor, gap, donor) = match order {
        3 => (
            ResidueFlags::T3_ACCEPTOR,
            ResidueFlags::T3_GAP,
            ResidueFlags::T3_DONOR,
        ),
        _ => (
            ResidueFlags::T4_ACCEPTOR,
            ResidueFlags::T4_GAP,
            ResidueFlags::T4_DONOR,
        ),
    };
    for i in 0..n - order {
        if bonds.get(i, i + order) {
            residues[i].flags.insert(acceptor);
            for j in 1..order {
                residues[i + j].flags.insert(gap);
            }
            residues[i + order].flags.insert(donor);
        }
    }
}

/// Mark helix membership where two consecutive n-turns overlap.
fn mark_helices(residues: &mut [Residue], order: usize) {
    let n = residues.len();
    if n <= order {
        return;
    }
    let (acceptor, helix) = match order {
        3 => (ResidueFlags::T3_ACCEPTOR, ResidueFlags::HELIX_3),
        _ => (ResidueFlags::T4_ACCEPTOR, ResidueFlags::HELIX_4),
    };
    for i in 1..n - order {
        if residues[i - 1].flags.contains(acceptor) && residues[i].flags.contains(acceptor) {
            for j in 0..order {
                residues[i + j].flags.insert(helix);
            }
        }
    }
}

/// Collect maximal runs of helical residues, including a run that
/// extends to the end of the chain.
fn collect_runs(residues: &[Residue], min_length: usize) -> Vec<Helix> {
    let helical = ResidueFlags::HELIX_3 | ResidueFlags::HELIX_4;
    let mut runs = Vec::new();
    let mut first: Option<usize> = None;
    for (i, residue) in residues.iter().enumerate() {
        if residue.flags.intersects(helical) {
            first.get_or_insert(i);
        } else if let Some(f) = first.take() {
            if i - f >= min_length {
                runs.push(Helix {
                    from: f,
                    to: i - 1,
                    code: 0,
                });
            }
        }
    }
    if let Some(f) = first {
        if residues.len() - f >= min_length {
            runs.push(Helix {
                from: f,
                to: residues.len() - 1,
                code: 0,
            });
        }
    }
    runs
}

/// PDB helix class from the CA dihedral of the first four residues.
fn classify(residues: &[Residue], helix: &Helix) -> u8 {
    if helix.from + 3 >= residues.len() {
        return 0;
    }
    let mut ca = [Point3D::zero(); 4];
    for (k, slot) in ca.iter_mut().enumerate() {
        match residues[helix.from + k].atom_coords("CA") {
            Some(p) => *slot = p,
            None => return 0,
        }
    }
    let angle = dihedral_points(&ca[0], &ca[1], &ca[2], &ca[3]);
    let flags = residues[helix.from].flags;
    if angle > 0.0 {
        if flags.contains(ResidueFlags::HELIX_4) {
            1
        } else if flags.contains(ResidueFlags::HELIX_3) {
            5
        } else {
            0
        }
    } else if flags.contains(ResidueFlags::HELIX_4) {
        6
    } else {
        0
    }
}

/// Assign 3-turns, 4-turns, and helices. The 3-turn passes run to
/// completion before the 4-turn passes so the flag state matches the
/// order the residue summary reports it.
pub fn assign_helices(
    residues: &mut [Residue],
    bonds: &BondMatrix,
    config: &Config,
) -> Vec<Helix> {
    mark_turns(residues, bonds, 3);
    mark_helices(residues, 3);
    mark_turns(residues, bonds, 4);
    mark_helices(residues, 4);

    let mut helices = collect_runs(residues, config.min_helix_length);
    for h in &mut helices {
        h.code = classify(residues, h);
    }
    helices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Atom, ResidueId};

    fn make_residues(n: usize) -> Vec<Residue> {
        (0..n)
            .map(|i| {
                Residue::new(ResidueId {
                    name: "ALA".into(),
                    chain_id: 'A',
                    seq_num: i as i32 + 1,
                    i_code: None,
                })
            })
            .collect()
    }

    fn matrix_with(n: usize, bonds: &[(usize, usize)]) -> BondMatrix {
        let mut m = BondMatrix::new(n);
        for &(i, j) in bonds {
            m.set(i, j, true);
        }
        m
    }

    #[test]
    fn single_turn_marks_flags() {
        let mut residues = make_residues(8);
        let bonds = matrix_with(8, &[(2, 5)]);
        mark_turns(&mut residues, &bonds, 3);
        assert!(residues[2].flags.contains(ResidueFlags::T3_ACCEPTOR));
        assert!(residues[3].flags.contains(ResidueFlags::T3_GAP));
        assert!(residues[4].flags.contains(ResidueFlags::T3_GAP));
        assert!(residues[5].flags.contains(ResidueFlags::T3_DONOR));
        assert!(!residues[2].flags.contains(ResidueFlags::T4_ACCEPTOR));
    }

    #[test]
    fn single_turn_is_not_a_helix() {
        let mut residues = make_residues(8);
        let bonds = matrix_with(8, &[(2, 5)]);
        let helices = assign_helices(&mut residues, &bonds, &Config::default());
        assert!(helices.is_empty());
    }

    #[test]
    fn consecutive_turns_form_a_helix() {
        let mut residues = make_residues(10);
        let bonds = matrix_with(10, &[(2, 6), (3, 7), (4, 8)]);
        let helices = assign_helices(&mut residues, &bonds, &Config::default());
        assert_eq!(helices.len(), 1);
        assert_eq!((helices[0].from, helices[0].to), (3, 7));
        assert_eq!(helices[0].length(), 5);
        // No CA atoms, so the run is unclassifiable.
        assert_eq!(helices[0].code, 0);
    }

    #[test]
    fn short_runs_are_dropped() {
        let mut residues = make_residues(6);
        residues[1].flags.insert(ResidueFlags::HELIX_4);
        residues[2].flags.insert(ResidueFlags::HELIX_4);
        assert!(collect_runs(&residues, 3).is_empty());
        residues[3].flags.insert(ResidueFlags::HELIX_4);
        assert_eq!(collect_runs(&residues, 3).len(), 1);
    }

    #[test]
    fn trailing_run_is_closed() {
        let mut residues = make_residues(6);
        for r in residues.iter_mut().skip(3) {
            r.flags.insert(ResidueFlags::HELIX_3);
        }
        let runs = collect_runs(&residues, 3);
        assert_eq!(runs.len(), 1);
        assert_eq!((runs[0].from, runs[0].to), (3, 5));
    }

    fn with_ca(mut residues: Vec<Residue>, coords: [Point3D; 4]) -> Vec<Residue> {
        for (r, c) in residues.iter_mut().zip(coords) {
            r.atoms.push(Atom::new("CA", c));
        }
        residues
    }

    #[test]
    fn classification_follows_dihedral_sign() {
        // A +90 degree CA dihedral (right-handed twist).
        let right = [
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(0.0, 1.0, 0.0),
            Point3D::new(0.0, 1.0, -1.0),
        ];
        // Mirrored through the xy plane: -90 degrees.
        let left = [
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(0.0, 1.0, 0.0),
            Point3D::new(0.0, 1.0, 1.0),
        ];
        let h = Helix {
            from: 0,
            to: 3,
            code: 0,
        };

        let mut alpha = with_ca(make_residues(4), right);
        alpha[0].flags.insert(ResidueFlags::HELIX_4);
        assert_eq!(classify(&alpha, &h), 1);

        let mut three_ten = with_ca(make_residues(4), right);
        three_ten[0].flags.insert(ResidueFlags::HELIX_3);
        assert_eq!(classify(&three_ten, &h), 5);

        let mut left_alpha = with_ca(make_residues(4), left);
        left_alpha[0].flags.insert(ResidueFlags::HELIX_4);
        assert_eq!(classify(&left_alpha, &h), 6);
    }

    #[test]
    fn classification_needs_four_alpha_carbons() {
        let mut residues = make_residues(4);
        residues[0].flags.insert(ResidueFlags::HELIX_4);
        let h = Helix {
            from: 0,
            to: 3,
            code: 0,
        };
        assert_eq!(classify(&residues, &h), 0);

        let short = make_residues(3);
        let h2 = Helix {
            from: 0,
            to: 2,
            code: 0,
        };
        assert_eq!(classify(&short, &h2), 0);
    }
}
