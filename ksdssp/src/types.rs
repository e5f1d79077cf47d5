//! Core types for protein backbone representation.

use std::fmt;

use ksdssp_core::Annotated;

/// A point in 3D Cartesian space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    /// Create a new point.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin.
    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point3D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Squared Euclidean distance to another point.
    pub fn distance_sq_to(&self, other: &Point3D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Dot product.
    pub fn dot(&self, other: &Point3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    pub fn cross(&self, other: &Point3D) -> Point3D {
        Point3D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Vector magnitude.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction, or zero if magnitude is zero.
    pub fn normalize(&self) -> Point3D {
        let n = self.norm();
        if n < 1e-15 {
            Point3D::zero()
        } else {
            Point3D {
                x: self.x / n,
                y: self.y / n,
                z: self.z / n,
            }
        }
    }

    /// Vector addition.
    pub fn add(&self, other: &Point3D) -> Point3D {
        Point3D {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    /// Vector subtraction.
    pub fn sub(&self, other: &Point3D) -> Point3D {
        Point3D {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    /// Scalar multiplication.
    pub fn scale(&self, s: f64) -> Point3D {
        Point3D {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

/// A single atom in a protein model.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Atom {
    /// Atom name with surrounding whitespace trimmed (e.g. "CA", "N").
    pub name: String,
    /// 3D coordinates in Angstroms.
    pub coords: Point3D,
}

impl Atom {
    /// Create a new atom.
    pub fn new(name: &str, coords: Point3D) -> Self {
        Self {
            name: name.trim().to_string(),
            coords,
        }
    }
}

/// Identity of a residue within a PDB file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResidueId {
    /// Three-letter residue name (e.g. "ALA", "GLY").
    pub name: String,
    /// Single-character chain identifier.
    pub chain_id: char,
    /// Sequence number from the PDB file.
    pub seq_num: i32,
    /// Insertion code.
    pub i_code: Option<char>,
}

impl fmt::Display for ResidueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:4}{}[{}]",
            self.seq_num,
            self.chain_id,
            self.i_code.unwrap_or(' ')
        )
    }
}

/// Per-residue state bits accumulated during assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResidueFlags(u16);

impl ResidueFlags {
    /// Donor of an (i, i+3) turn hydrogen bond.
    pub const T3_DONOR: ResidueFlags = ResidueFlags(0x0001);
    /// Acceptor of an (i, i+3) turn hydrogen bond.
    pub const T3_ACCEPTOR: ResidueFlags = ResidueFlags(0x0002);
    /// Interior residue of an (i, i+3) turn.
    pub const T3_GAP: ResidueFlags = ResidueFlags(0x0004);
    /// Member of a 3-10 helix.
    pub const HELIX_3: ResidueFlags = ResidueFlags(0x0008);
    /// Donor of an (i, i+4) turn hydrogen bond.
    pub const T4_DONOR: ResidueFlags = ResidueFlags(0x0010);
    /// Acceptor of an (i, i+4) turn hydrogen bond.
    pub const T4_ACCEPTOR: ResidueFlags = ResidueFlags(0x0020);
    /// Interior residue of an (i, i+4) turn.
    pub const T4_GAP: ResidueFlags = ResidueFlags(0x0040);
    /// Member of an alpha helix.
    pub const HELIX_4: ResidueFlags = ResidueFlags(0x0080);
    /// Member of a parallel bridge.
    pub const PARA_BRIDGE: ResidueFlags = ResidueFlags(0x0100);
    /// Member of an antiparallel bridge.
    pub const ANTI_BRIDGE: ResidueFlags = ResidueFlags(0x0200);
    /// Chain terminator (TER record) follows this residue.
    pub const TER: ResidueFlags = ResidueFlags(0x8000);

    /// Whether all bits of `other` are set.
    pub fn contains(&self, other: ResidueFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any bit of `other` is set.
    pub fn intersects(&self, other: ResidueFlags) -> bool {
        self.0 & other.0 != 0
    }

    /// Set the bits of `other`.
    pub fn insert(&mut self, other: ResidueFlags) {
        self.0 |= other.0;
    }
}

impl std::ops::BitOr for ResidueFlags {
    type Output = ResidueFlags;

    fn bitor(self, rhs: ResidueFlags) -> ResidueFlags {
        ResidueFlags(self.0 | rhs.0)
    }
}

/// A residue with its atoms and assignment state.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Residue {
    /// Residue identity.
    pub id: ResidueId,
    /// Atoms belonging to this residue.
    pub atoms: Vec<Atom>,
    /// Assignment state bits.
    pub flags: ResidueFlags,
}

impl Residue {
    /// Create a residue with no atoms.
    pub fn new(id: ResidueId) -> Self {
        Self {
            id,
            atoms: Vec::new(),
            flags: ResidueFlags::default(),
        }
    }

    /// Get an atom by name, returning the first match.
    pub fn get_atom(&self, name: &str) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.name == name)
    }

    /// Coordinates of a named atom, if present.
    pub fn atom_coords(&self, name: &str) -> Option<Point3D> {
        self.get_atom(name).map(|a| a.coords)
    }
}

impl Annotated for Residue {
    fn name(&self) -> &str {
        &self.id.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_id(seq: i32) -> ResidueId {
        ResidueId {
            name: "ALA".into(),
            chain_id: 'A',
            seq_num: seq,
            i_code: None,
        }
    }

    #[test]
    fn point3d_arithmetic() {
        let a = Point3D::new(1.0, 2.0, 3.0);
        let b = Point3D::new(4.0, 5.0, 6.0);
        assert_eq!(a.add(&b), Point3D::new(5.0, 7.0, 9.0));
        assert_eq!(a.sub(&b), Point3D::new(-3.0, -3.0, -3.0));
        assert!((a.dot(&b) - 32.0).abs() < 1e-10);
        assert!((a.scale(2.0).x - 2.0).abs() < 1e-10);
        assert!((a.distance_to(&b) - (27.0_f64).sqrt()).abs() < 1e-10);
        assert!((a.distance_sq_to(&b) - 27.0).abs() < 1e-10);
    }

    #[test]
    fn point3d_cross_product() {
        let x = Point3D::new(1.0, 0.0, 0.0);
        let y = Point3D::new(0.0, 1.0, 0.0);
        let z = x.cross(&y);
        assert!((z.x).abs() < 1e-10);
        assert!((z.y).abs() < 1e-10);
        assert!((z.z - 1.0).abs() < 1e-10);
    }

    #[test]
    fn normalize_zero_vector() {
        assert_eq!(Point3D::zero().normalize(), Point3D::zero());
    }

    #[test]
    fn residue_flags_ops() {
        let mut f = ResidueFlags::default();
        assert!(!f.contains(ResidueFlags::T3_DONOR));
        f.insert(ResidueFlags::T3_DONOR);
        f.insert(ResidueFlags::HELIX_4);
        assert!(f.contains(ResidueFlags::T3_DONOR));
        assert!(f.contains(ResidueFlags::HELIX_4));
        assert!(f.contains(ResidueFlags::T3_DONOR | ResidueFlags::HELIX_4));
        assert!(!f.contains(ResidueFlags::T3_DONOR | ResidueFlags::T3_ACCEPTOR));
    }

    #[test]
    fn residue_atom_lookup() {
        let mut r = Residue::new(make_id(1));
        r.atoms.push(Atom::new(" CA ", Point3D::new(1.0, 0.0, 0.0)));
        r.atoms.push(Atom::new(" N  ", Point3D::new(0.0, 0.0, 0.0)));
        assert!(r.get_atom("CA").is_some());
        assert!(r.get_atom("CB").is_none());
        assert_eq!(r.atom_coords("N"), Some(Point3D::zero()));
    }

    #[test]
    fn residue_annotated_name() {
        let r = Residue::new(make_id(1));
        assert_eq!(r.name(), "ALA");
        assert_eq!(r.description(), None);
    }

    #[test]
    fn residue_id_display() {
        let id = make_id(42);
        assert_eq!(id.to_string(), "  42A[ ]");
        let with_icode = ResidueId {
            i_code: Some('B'),
            ..make_id(7)
        };
        assert_eq!(with_icode.to_string(), "   7A[B]");
    }
}
