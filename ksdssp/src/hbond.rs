//! Backbone hydrogen bond detection.
//!
//! Implements the Kabsch-Sander electrostatic model: each candidate
//! C=O...H-N pair is scored by a four-term Coulomb sum and accepted
//! when the energy falls below a cutoff.

use crate::geometry::bisect;
use crate::model::BondMatrix;
use crate::types::{Atom, Residue, ResidueFlags};

/// Electrostatic coupling constant q1 * q2 * f in kcal/mol * Angstrom
/// (0.42 * 0.20 * 332).
const COUPLING: f64 = 27.888;

/// Squared C...N distance above which no bond is possible.
const MAX_CN_DIST_SQ: f64 = 49.0;

/// N-H bond length in Angstroms for synthesized amide hydrogens.
const NH_BOND_LENGTH: f64 = 1.01;

/// Synthesize missing amide hydrogens from backbone geometry.
///
/// The H direction is the double bisection of the CA-N and C(prev)-N
/// unit vectors with the O(prev)-C(prev) unit vector; the atom is
/// placed 1.01 Angstroms from N. Residues that already carry an "H"
/// atom keep it. Chain-initial residues, residues following a TER
/// record, and residues with incomplete backbones are skipped.
pub fn add_amide_hydrogens(residues: &mut [Residue]) {
    for i in 1..residues.len() {
        if residues[i - 1].flags.contains(ResidueFlags::TER) {
            continue;
        }
        if residues[i].get_atom("H").is_some() {
            continue;
        }
        let (Some(prev_c), Some(prev_o)) = (
            residues[i - 1].atom_coords("C"),
            residues[i - 1].atom_coords("O"),
        ) else {
            log::debug!(
                "no amide H for residue {}: preceding carbonyl missing",
                residues[i].id
            );
            continue;
        };

        let residue = &mut residues[i];
        let (Some(n), Some(ca)) = (residue.atom_coords("N"), residue.atom_coords("CA")) else {
            log::debug!("no amide H for residue {}: backbone incomplete", residue.id);
            continue;
        };

        let v1 = ca.sub(&n).normalize();
        let v2 = prev_c.sub(&n).normalize();
        let v3 = prev_o.sub(&prev_c).normalize();
        let hdir = bisect(&bisect(&v1, &v2), &v3);
        residue.atoms.push(Atom {
            name: "H".into(),
            coords: n.sub(&hdir.scale(NH_BOND_LENGTH)),
        });
    }
}

/// Kabsch-Sander energy of the candidate bond from the carbonyl of
/// `acceptor` to the amide of `donor`, or `None` when either group is
/// incomplete or the C...N distance exceeds 7 Angstroms.
pub fn hbond_energy(acceptor: &Residue, donor: &Residue) -> Option<f64> {
    let c = acceptor.atom_coords("C")?;
    let o = acceptor.atom_coords("O")?;
    let n = donor.atom_coords("N")?;
    let h = donor.atom_coords("H")?;

    let cn_sq = c.distance_sq_to(&n);
    if cn_sq > MAX_CN_DIST_SQ {
        return None;
    }

    let r_on = o.distance_to(&n);
    let r_ch = c.distance_to(&h);
    let r_oh = o.distance_to(&h);
    let r_cn = cn_sq.sqrt();
    Some(COUPLING * (1.0 / r_on + 1.0 / r_ch - 1.0 / r_oh - 1.0 / r_cn))
}

/// Whether the carbonyl of `acceptor` hydrogen-bonds the amide of
/// `donor` under the given energy cutoff.
pub fn is_bonded(acceptor: &Residue, donor: &Residue, cutoff: f64) -> bool {
    match hbond_energy(acceptor, donor) {
        Some(energy) => energy < cutoff,
        None => false,
    }
}

/// Compute the full directed bond matrix. `m[i][j]` is true when the
/// carbonyl of residue `i` bonds the amide of residue `j`. Pairs closer
/// than two positions apart in sequence are never bonded.
pub fn compute_matrix(residues: &[Residue], cutoff: f64) -> BondMatrix {
    let n = residues.len();
    let mut matrix = BondMatrix::new(n);
    for i in 0..n {
        for j in (i + 2)..n {
            if is_bonded(&residues[i], &residues[j], cutoff) {
                matrix.set(i, j, true);
            }
            if is_bonded(&residues[j], &residues[i], cutoff) {
                matrix.set(j, i, true);
            }
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point3D, ResidueId};

    fn make_res(seq: i32, atoms: &[(&str, f64, f64, f64)]) -> Residue {
        let mut r = Residue::new(ResidueId {
            name: "ALA".into(),
            chain_id: 'A',
            seq_num: seq,
            i_code: None,
        });
        for (name, x, y, z) in atoms {
            r.atoms.push(Atom::new(name, Point3D::new(*x, *y, *z)));
        }
        r
    }

    fn acceptor() -> Residue {
        make_res(1, &[("C", 0.0, 0.0, 0.0), ("O", 0.0, -1.23, 0.0)])
    }

    fn donor(seq: i32) -> Residue {
        make_res(seq, &[("N", 0.0, -4.2, 0.0), ("H", 0.0, -3.2, 0.0)])
    }

    #[test]
    fn energy_of_ideal_pair() {
        let e = hbond_energy(&acceptor(), &donor(3)).unwrap();
        assert!((e - (-2.6914)).abs() < 1e-3);
    }

    #[test]
    fn bond_respects_cutoff() {
        assert!(is_bonded(&acceptor(), &donor(3), -0.5));
        assert!(is_bonded(&acceptor(), &donor(3), -2.6));
        assert!(!is_bonded(&acceptor(), &donor(3), -2.8));
    }

    #[test]
    fn distant_pair_is_never_bonded() {
        let far = make_res(3, &[("N", 0.0, -50.0, 0.0), ("H", 0.0, -49.0, 0.0)]);
        assert_eq!(hbond_energy(&acceptor(), &far), None);
    }

    #[test]
    fn incomplete_groups_are_never_bonded() {
        let no_h = make_res(3, &[("N", 0.0, -4.2, 0.0)]);
        assert!(!is_bonded(&acceptor(), &no_h, -0.5));
        let no_o = make_res(1, &[("C", 0.0, 0.0, 0.0)]);
        assert!(!is_bonded(&no_o, &donor(3), -0.5));
    }

    #[test]
    fn matrix_skips_sequence_neighbors() {
        // Residues 0 and 2 are in bonding geometry; residue 1 is far away.
        let residues = vec![
            acceptor(),
            make_res(2, &[("N", 50.0, 0.0, 0.0), ("H", 51.0, 0.0, 0.0)]),
            donor(3),
        ];
        let m = compute_matrix(&residues, -0.5);
        assert!(m.get(0, 2));
        assert!(!m.get(2, 0));
        assert!(!m.get(0, 1));
        assert!(!m.get(1, 0));
    }

    fn backbone(seq: i32, x: f64) -> Residue {
        make_res(
            seq,
            &[
                ("N", x, 0.0, 0.0),
                ("CA", x + 1.0, 0.9, 0.0),
                ("C", x + 2.0, 0.0, 0.0),
                ("O", x + 2.0, -1.23, 0.0),
            ],
        )
    }

    #[test]
    fn hydrogens_synthesized_after_first_residue() {
        let mut residues = vec![backbone(1, 0.0), backbone(2, 3.4), backbone(3, 6.8)];
        add_amide_hydrogens(&mut residues);
        assert!(residues[0].get_atom("H").is_none());
        assert!(residues[1].get_atom("H").is_some());
        assert!(residues[2].get_atom("H").is_some());

        // Placed at the N-H bond length from the amide nitrogen.
        let n = residues[1].atom_coords("N").unwrap();
        let h = residues[1].atom_coords("H").unwrap();
        assert!((n.distance_to(&h) - 1.01).abs() < 1e-10);
    }

    #[test]
    fn hydrogens_not_synthesized_after_terminator() {
        let mut residues = vec![backbone(1, 0.0), backbone(2, 3.4), backbone(3, 6.8)];
        residues[1].flags.insert(ResidueFlags::TER);
        add_amide_hydrogens(&mut residues);
        assert!(residues[1].get_atom("H").is_some());
        assert!(residues[2].get_atom("H").is_none());
    }

    #[test]
    fn explicit_hydrogen_is_kept() {
        let mut residues = vec![backbone(1, 0.0), backbone(2, 3.4)];
        let original = Point3D::new(3.0, -1.0, 0.0);
        residues[1].atoms.push(Atom::new("H", original));
        add_amide_hydrogens(&mut residues);
        assert_eq!(residues[1].atom_coords("H"), Some(original));
        assert_eq!(
            residues[1].atoms.iter().filter(|a| a.name == "H").count(),
            1
        );
    }

    #[test]
    fn incomplete_backbone_is_skipped() {
        let mut residues = vec![
            make_res(1, &[("N", 0.0, 0.0, 0.0), ("CA", 1.0, 0.9, 0.0)]),
            backbone(2, 3.4),
        ];
        add_amide_hydrogens(&mut residues);
        assert!(residues[1].get_atom("H").is_none());
    }
}
