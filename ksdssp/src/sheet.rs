//! Sheet assembly.
//!
//! Ladders whose strand ranges overlap belong to the same sheet. Each
//! strand side of a ladder can be shared with at most one other ladder;
//! further claimants are reported and skipped, so every assembled sheet
//! is a linear (or cyclic) chain of ladders.

use crate::ladder::Ladder;
use crate::types::Residue;

/// A connected group of ladders.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sheet {
    /// Single-letter display name, 'A' through 'Z', wrapping.
    pub name: char,
    /// Member ladders in discovery (pre-order) order.
    pub ladders: Vec<usize>,
}

/// Group ladders into sheets, linking neighbors and naming each ladder
/// after its sheet.
pub fn assemble(ladders: &mut [Ladder], residues: &[Residue]) -> Vec<Sheet> {
    let mut sheets: Vec<Sheet> = Vec::new();
    let mut name = 'A';
    for start in 0..ladders.len() {
        if ladders[start].sheet.is_some() {
            continue;
        }
        let mut sheet = Sheet {
            name,
            ladders: Vec::new(),
        };
        name = if name == 'Z' {
            'A'
        } else {
            (name as u8 + 1) as char
        };
        link_component(ladders, residues, start, sheets.len(), &mut sheet);
        sheets.push(sheet);
    }
    sheets
}

/// Depth-first link of every ladder reachable from `start`, using an
/// explicit stack of (ladder, next candidate) frames.
fn link_component(
    ladders: &mut [Ladder],
    residues: &[Residue],
    start: usize,
    sheet_index: usize,
    sheet: &mut Sheet,
) {
    let enter = |ladders: &mut [Ladder], sheet: &mut Sheet, idx: usize| {
        ladders[idx].sheet = Some(sheet_index);
        ladders[idx].set_name(sheet.name);
        sheet.ladders.push(idx);
    };

    enter(ladders, sheet, start);
    let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
    while let Some((cur, next)) = stack.pop() {
        let mut j = next;
        while j < ladders.len() {
            if j == cur || ladders[j].sheet.is_some() {
                j += 1;
                continue;
            }
            let overlap = ladders[j].overlaps(&ladders[cur]);
            let Some((side_j, side_cur)) = overlap else {
                j += 1;
                continue;
            };
            if let Some(taken) = ladders[j].neighbor[side_j] {
                report_conflict(ladders, residues, j, side_j, cur, taken);
                j += 1;
                continue;
            }
            if let Some(taken) = ladders[cur].neighbor[side_cur] {
                report_conflict(ladders, residues, cur, side_cur, j, taken);
                j += 1;
                continue;
            }
            ladders[j].neighbor[side_j] = Some(cur);
            ladders[cur].neighbor[side_cur] = Some(j);
            // Descend into j; resume cur after it.
            stack.push((cur, j + 1));
            enter(ladders, sheet, j);
            stack.push((j, 0));
            break;
        }
    }
}

fn report_conflict(
    ladders: &[Ladder],
    residues: &[Residue],
    ladder: usize,
    side: usize,
    claimant: usize,
    taken: usize,
) {
    let range = |idx: usize, s: usize| {
        let l = &ladders[idx];
        format!(
            "{}-{}",
            residues[l.start(s)].id.to_string().trim(),
            residues[l.end(s)].id.to_string().trim()
        )
    };
    log::warn!(
        "strand {} of ladder {} already pairs ladder {}; ignoring pairing with ladder {} ({})",
        range(ladder, side),
        ladder,
        taken,
        claimant,
        range(claimant, 0),
    );
}

/// First ladder of a sheet for traversal: an end of the chain when one
/// exists, otherwise (cyclic sheets) the discovery head.
pub fn first_ladder(sheet: &Sheet, ladders: &[Ladder]) -> usize {
    sheet
        .ladders
        .iter()
        .copied()
        .find(|&i| ladders[i].neighbor_count() == 1)
        .unwrap_or(sheet.ladders[0])
}

/// Whether the sheet's ladders form a closed cycle.
pub fn is_cyclic(sheet: &Sheet, ladders: &[Ladder]) -> bool {
    ladders[first_ladder(sheet, ladders)].neighbor_count() > 1
}

/// Member ladders in strand order, walking neighbor links from
/// [`first_ladder`]. A cyclic sheet stops when the walk returns to the
/// start.
pub fn strand_order(sheet: &Sheet, ladders: &[Ladder]) -> Vec<usize> {
    let head = first_ladder(sheet, ladders);
    let mut order = Vec::new();
    let mut prev: Option<usize> = None;
    let mut cur = Some(head);
    while let Some(c) = cur {
        if c == head && prev.is_some() {
            break;
        }
        order.push(c);
        let next = ladders[c].other_neighbor(prev);
        prev = Some(c);
        cur = next;
    }
    order
}
