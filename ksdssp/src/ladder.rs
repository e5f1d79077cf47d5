//! Bridge and ladder detection.
//!
//! Bridges are single inter-strand pairings read off the hydrogen bond
//! matrix; runs of bridges along a diagonal form ladders. Ladders
//! separated by a beta bulge are merged, then ladders whose strands
//! fall below the minimum length are discarded.

use crate::config::Config;
use crate::model::BondMatrix;
use crate::types::{Residue, ResidueFlags};

/// Largest sequence gap, per strand, that still counts as a bulge.
const MAX_BULGE_GAP: isize = 4;

/// Relative orientation of two bridged strands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BridgeType {
    Parallel,
    Antiparallel,
}

/// Bridge matrix cell. Claimed cells already belong to a ladder.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Para,
    Anti,
    ParaClaimed,
    AntiClaimed,
}

/// A run of bridges between two strands.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ladder {
    /// Strand orientation.
    pub kind: BridgeType,
    /// First residue index of each strand.
    start: [usize; 2],
    /// Last residue index of each strand (inclusive).
    end: [usize; 2],
    /// Ladder sharing each strand, filled in during sheet assembly.
    pub neighbor: [Option<usize>; 2],
    /// Owning sheet, filled in during sheet assembly.
    pub sheet: Option<usize>,
    /// Whether this ladder was produced by a bulge merge.
    pub bulge: bool,
    /// Display name, assigned with the owning sheet.
    pub name: char,
}

impl Ladder {
    /// Create a ladder, normalizing each strand so start <= end.
    pub fn new(kind: BridgeType, s0: usize, e0: usize, s1: usize, e1: usize) -> Self {
        let (s0, e0) = if s0 <= e0 { (s0, e0) } else { (e0, s0) };
        let (s1, e1) = if s1 <= e1 { (s1, e1) } else { (e1, s1) };
        Self {
            kind,
            start: [s0, s1],
            end: [e0, e1],
            neighbor: [None, None],
            sheet: None,
            bulge: false,
            name: '?',
        }
    }

    /// First residue of a strand.
    pub fn start(&self, side: usize) -> usize {
        self.start[side]
    }

    /// Last residue of a strand (inclusive).
    pub fn end(&self, side: usize) -> usize {
        self.end[side]
    }

    /// Number of residues in a strand.
    pub fn strand_length(&self, side: usize) -> usize {
        self.end[side] - self.start[side] + 1
    }

    /// First pair of strand sides (self, other) whose residue ranges
    /// intersect, if any.
    pub fn overlaps(&self, other: &Ladder) -> Option<(usize, usize)> {
        for i in 0..2 {
            for j in 0..2 {
                if self.end[i] >= other.start[j] && other.end[j] >= self.start[i] {
                    return Some((i, j));
                }
            }
        }
        None
    }

    /// Number of linked neighbors.
    pub fn neighbor_count(&self) -> usize {
        self.neighbor.iter().filter(|n| n.is_some()).count()
    }

    /// The neighbor that is not `prev`. Walking a linear chain of
    /// ladders with this visits each one once in strand order.
    pub fn other_neighbor(&self, prev: Option<usize>) -> Option<usize> {
        if self.neighbor[0] == prev {
            self.neighbor[1]
        } else {
            self.neighbor[0]
        }
    }

    /// Take the sheet's name, lowercased for parallel ladders.
    pub fn set_name(&mut self, sheet_name: char) {
        self.name = match self.kind {
            BridgeType::Parallel => sheet_name.to_ascii_lowercase(),
            BridgeType::Antiparallel => sheet_name.to_ascii_uppercase(),
        };
    }
}

/// Merge two ladders separated by a beta bulge: same orientation, gaps
/// of at most four residues per strand, and at most one residue on at
/// least one strand.
fn merge_bulge(a: &Ladder, b: &Ladder) -> Option<Ladder> {
    if a.kind != b.kind {
        return None;
    }
    let (l1, l2) = if a.start(0) <= b.start(0) { (a, b) } else { (b, a) };

    let d0 = l2.start(0) as isize - l1.end(0) as isize;
    if !(0..=MAX_BULGE_GAP).contains(&d0) {
        return None;
    }
    let d1 = match l1.kind {
        BridgeType::Parallel => l2.start(1) as isize - l1.end(1) as isize,
        BridgeType::Antiparallel => l1.start(1) as isize - l2.end(1) as isize,
    };
    if !(0..=MAX_BULGE_GAP).contains(&d1) {
        return None;
    }
    if d0 > 1 && d1 > 1 {
        return None;
    }

    let (s1, e1) = match l1.kind {
        BridgeType::Parallel => (l1.start(1), l2.end(1)),
        BridgeType::Antiparallel => (l2.start(1), l1.end(1)),
    };
    let mut merged = Ladder::new(l1.kind, l1.start(0), l2.end(0), s1, e1);
    merged.bulge = true;
    Some(merged)
}

/// Merge the first mergeable pair found, scanning in ladder order.
/// Ladders already produced by a merge are left alone.
fn merge_step(ladders: &mut Vec<Ladder>) -> bool {
    for a in 0..ladders.len() {
        if ladders[a].bulge {
            continue;
        }
        for b in (a + 1)..ladders.len() {
            if ladders[b].bulge {
                continue;
            }
            if let Some(merged) = merge_bulge(&ladders[a], &ladders[b]) {
                ladders.remove(b);
                ladders.remove(a);
                ladders.push(merged);
                return true;
            }
        }
    }
    false
}

/// Detect bridges, extract ladders along bridge diagonals, merge
/// bulges, and prune short strands.
pub fn find_ladders(
    residues: &mut [Residue],
    bonds: &BondMatrix,
    config: &Config,
) -> Vec<Ladder> {
    let n = residues.len();
    let mut cells = vec![Cell::Empty; n * n];

    for i in 1..n {
        for j in (i + 2)..n.saturating_sub(1) {
            let parallel = (bonds.get(i - 1, j) && bonds.get(j, i + 1))
                || (bonds.get(j - 1, i) && bonds.get(i, j + 1));
            let antiparallel = (bonds.get(i, j) && bonds.get(j, i))
                || (bonds.get(i - 1, j + 1) && bonds.get(j - 1, i + 1));
            if parallel {
                cells[i * n + j] = Cell::Para;
                residues[i].flags.insert(ResidueFlags::PARA_BRIDGE);
                residues[j].flags.insert(ResidueFlags::PARA_BRIDGE);
            } else if antiparallel {
                cells[i * n + j] = Cell::Anti;
                residues[i].flags.insert(ResidueFlags::ANTI_BRIDGE);
                residues[j].flags.insert(ResidueFlags::ANTI_BRIDGE);
            }
        }
    }

    // Walk each unclaimed bridge's diagonal. Row-major scan order makes
    // every bridge the top-left (parallel) or top-right (antiparallel)
    // corner of its ladder.
    let mut ladders = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            match cells[i * n + j] {
                Cell::Para => {
                    let mut k = 0;
                    while i + k < n && j + k < n && cells[(i + k) * n + (j + k)] == Cell::Para {
                        cells[(i + k) * n + (j + k)] = Cell::ParaClaimed;
                        k += 1;
                    }
                    k -= 1;
                    ladders.push(Ladder::new(BridgeType::Parallel, i, i + k, j, j + k));
                }
                Cell::Anti => {
                    let mut k = 0;
                    while i + k < n && k <= j && cells[(i + k) * n + (j - k)] == Cell::Anti {
                        cells[(i + k) * n + (j - k)] = Cell::AntiClaimed;
                        k += 1;
                    }
                    k -= 1;
                    ladders.push(Ladder::new(BridgeType::Antiparallel, i, i + k, j - k, j));
                }
                _ => {}
            }
        }
    }

    if config.merge_bulges {
        while merge_step(&mut ladders) {}
    }

    ladders.retain(|l| {
        l.strand_length(0) >= config.min_strand_length
            && l.strand_length(1) >= config.min_strand_length
    });
    ladders
}
