//! PDB record and summary report output.
//!
//! HELIX and SHEET records use the fixed-column PDB v2 layout. Strand
//! records are derived by walking each sheet's ladders in strand order;
//! every consecutive ladder pair contributes the union of its shared
//! strand sides plus a registration pair naming the bonded N and O
//! atoms.

use std::cmp::{max, min};
use std::io::Write;

use ksdssp_core::{Annotated, Result};

use crate::ladder::{BridgeType, Ladder};
use crate::model::Model;
use crate::sheet::{self, Sheet};
use crate::types::{Residue, ResidueFlags, ResidueId};

fn icode(id: &ResidueId) -> char {
    id.i_code.unwrap_or(' ')
}

/// Sheet identifier for the given zero-based serial: A..Z, then AA..AZ
/// and onward, at most three letters.
pub fn sheet_id_string(sid: usize) -> String {
    let mut digits = vec![(b'A' + (sid % 26) as u8) as char];
    let mut rest = sid / 26;
    while digits.len() < 3 && rest > 0 {
        digits.push((b'A' + (rest % 26) as u8 - 1) as char);
        rest /= 26;
    }
    digits.iter().rev().collect()
}

/// One HELIX record, 76 columns with the helix length in 72-76.
pub fn format_helix_record(
    serial: usize,
    from: &ResidueId,
    to: &ResidueId,
    code: u8,
    length: usize,
) -> String {
    let body = format!(
        "HELIX  {:>3} {:>3} {:>3} {} {:>4}{} {:>3} {} {:>4}{}{:>2}",
        serial,
        serial,
        from.name,
        from.chain_id,
        from.seq_num,
        icode(from),
        to.name,
        to.chain_id,
        to.seq_num,
        icode(to),
        code,
    );
    format!("{:<71}{:>5}", body, length)
}

/// One SHEET record, with an optional registration pair
/// (current-strand N residue, previous-strand O residue).
pub fn format_sheet_record(
    strand: usize,
    sheet_id: &str,
    count: usize,
    from: &ResidueId,
    to: &ResidueId,
    sense: i32,
    registration: Option<(&ResidueId, &ResidueId)>,
) -> String {
    let mut record = format!(
        "SHEET  {:>3} {:>3}{:>2} {:>3} {}{:>4}{} {:>3} {}{:>4}{}{:>2}",
        strand,
        sheet_id,
        count,
        from.name,
        from.chain_id,
        from.seq_num,
        icode(from),
        to.name,
        to.chain_id,
        to.seq_num,
        icode(to),
        sense,
    );
    if let Some((n_res, o_res)) = registration {
        record.push_str(&format!(
            " {:<4}{:>3} {}{:>4}{} {:<4}{:>3} {}{:>4}{}",
            " N",
            n_res.name,
            n_res.chain_id,
            n_res.seq_num,
            icode(n_res),
            " O",
            o_res.name,
            o_res.chain_id,
            o_res.seq_num,
            icode(o_res),
        ));
    }
    record.trim_end().to_string()
}

/// Registration of a ladder against the strand on side `prev`: the
/// sense and the (N residue, O residue) indices of one bond between the
/// two strands.
fn registration(model: &Model, ladder: &Ladder, prev: usize) -> (i32, usize, usize) {
    let cur = 1 - prev;
    let interior = |i: usize| (i + 1).min(model.residue_count().saturating_sub(1));
    match ladder.kind {
        BridgeType::Parallel => {
            if model.bonded(ladder.start(prev), ladder.start(cur) + 1) {
                (1, interior(ladder.start(cur)), ladder.start(prev))
            } else {
                (1, ladder.start(cur), interior(ladder.start(prev)))
            }
        }
        BridgeType::Antiparallel => {
            if model.bonded(ladder.start(prev), ladder.end(cur)) {
                (-1, ladder.end(cur), ladder.start(prev))
            } else {
                (
                    -1,
                    ladder.end(cur).saturating_sub(1),
                    interior(ladder.start(prev)),
                )
            }
        }
    }
}

/// Write all HELIX records, then all SHEET records, for every model in
/// the run. Helix serials and sheet identifiers continue across models.
pub fn write_records<W: Write>(out: &mut W, models: &[Model]) -> Result<()> {
    let mut serial = 0usize;
    for model in models {
        for helix in &model.helices {
            serial += 1;
            let from = &model.residues[helix.from].id;
            let to = &model.residues[helix.to].id;
            writeln!(
                out,
                "{}",
                format_helix_record(serial, from, to, helix.code, helix.length())
            )?;
        }
    }

    let mut sheet_serial = 0usize;
    for model in models {
        for sheet in &model.sheets {
            write_sheet(out, model, sheet, &sheet_id_string(sheet_serial))?;
            sheet_serial += 1;
        }
    }
    Ok(())
}

fn write_sheet<W: Write>(out: &mut W, model: &Model, sheet: &Sheet, id: &str) -> Result<()> {
    let ladders = &model.ladders;
    let order = sheet::strand_order(sheet, ladders);
    if order.len() != sheet.ladders.len() {
        log::warn!(
            "sheet {}: strand walk visited {} of {} ladders",
            sheet.name,
            order.len(),
            sheet.ladders.len()
        );
    }
    if order.is_empty() {
        return Ok(());
    }

    let res = |i: usize| &model.residues[i].id;
    let ladder_count = order.len();
    let first = order[0];
    let cyclic = sheet::is_cyclic(sheet, ladders);
    let count = if cyclic { ladder_count } else { ladder_count + 1 };

    // Side of the most recently handled ladder that faces the strand
    // before it; the closing strand reads it after the loop.
    let mut last_shared = 0usize;
    // For cyclic sheets the first strand is re-emitted at the end,
    // carrying the registration against the closing ladder.
    let mut closing: Option<(usize, usize, i32, usize, usize)> = None;

    if cyclic {
        let last = order[ladder_count - 1];
        let (of, ol) = ladders[first].overlaps(&ladders[last]).unwrap_or((0, 0));
        let from = min(ladders[first].start(of), ladders[last].start(ol));
        let to = max(ladders[first].end(of), ladders[last].end(ol));
        writeln!(
            out,
            "{}",
            format_sheet_record(1, id, count, res(from), res(to), 0, None)
        )?;
        let (sense, n_idx, o_idx) = registration(model, &ladders[last], ol);
        closing = Some((from, to, sense, n_idx, o_idx));
    } else {
        let side = if ladder_count == 1 {
            0
        } else {
            let (of, _) = ladders[first].overlaps(&ladders[order[1]]).unwrap_or((1, 0));
            1 - of
        };
        writeln!(
            out,
            "{}",
            format_sheet_record(
                1,
                id,
                count,
                res(ladders[first].start(side)),
                res(ladders[first].end(side)),
                0,
                None,
            )
        )?;
    }

    for i in 1..ladder_count {
        let l = &ladders[order[i]];
        let pl = &ladders[order[i - 1]];
        let (ol, op) = l.overlaps(pl).unwrap_or((0, 0));
        let from = min(l.start(ol), pl.start(op));
        let to = max(l.end(ol), pl.end(op));
        let (sense, n_idx, o_idx) = registration(model, pl, 1 - op);
        writeln!(
            out,
            "{}",
            format_sheet_record(
                i + 1,
                id,
                count,
                res(from),
                res(to),
                sense,
                Some((res(n_idx), res(o_idx))),
            )
        )?;
        last_shared = ol;
    }

    if let Some((from, to, sense, n_idx, o_idx)) = closing {
        writeln!(
            out,
            "{}",
            format_sheet_record(
                1,
                id,
                count,
                res(from),
                res(to),
                sense,
                Some((res(n_idx), res(o_idx))),
            )
        )?;
    } else {
        let last = &ladders[order[ladder_count - 1]];
        let side = 1 - last_shared;
        let (sense, n_idx, o_idx) = registration(model, last, last_shared);
        writeln!(
            out,
            "{}",
            format_sheet_record(
                ladder_count + 1,
                id,
                count,
                res(last.start(side)),
                res(last.end(side)),
                sense,
                Some((res(n_idx), res(o_idx))),
            )
        )?;
    }
    Ok(())
}

/// Write a plain-text report of every model's helices, ladders, sheets,
/// and per-residue assignment state.
pub fn write_summary<W: Write>(out: &mut W, models: &[Model]) -> Result<()> {
    for model in models {
        writeln!(out, "Helix Summary")?;
        for h in &model.helices {
            writeln!(
                out,
                "{:>2}: {} -> {}",
                h.code, model.residues[h.from].id, model.residues[h.to].id
            )?;
        }
        writeln!(out)?;

        writeln!(out, "Ladder Summary")?;
        for l in &model.ladders {
            writeln!(
                out,
                "{} {} -> {} {:<12} {} -> {}",
                l.name,
                model.residues[l.start(0)].id,
                model.residues[l.end(0)].id,
                match l.kind {
                    BridgeType::Parallel => "parallel",
                    BridgeType::Antiparallel => "antiparallel",
                },
                model.residues[l.start(1)].id,
                model.residues[l.end(1)].id,
            )?;
        }
        writeln!(out)?;

        writeln!(out, "Sheet Summary")?;
        for s in &model.sheets {
            writeln!(out, "Sheet {}:", s.name)?;
            for &li in &sheet::strand_order(s, &model.ladders) {
                let l = &model.ladders[li];
                let name_of = |n: Option<usize>| {
                    n.map(|i| model.ladders[i].name).unwrap_or('-')
                };
                writeln!(
                    out,
                    "\tLadder {}: {} {}",
                    l.name,
                    name_of(l.neighbor[0]),
                    name_of(l.neighbor[1]),
                )?;
            }
        }
        writeln!(out)?;

        writeln!(out, "Residue Summary")?;
        for r in &model.residues {
            writeln!(out, "{}", residue_summary_line(r))?;
        }
    }
    Ok(())
}

fn residue_summary_line(r: &Residue) -> String {
    let flags = r.flags;
    let summary = if flags.contains(ResidueFlags::HELIX_3) {
        'G'
    } else if flags.contains(ResidueFlags::HELIX_4) {
        'H'
    } else if flags.intersects(ResidueFlags::PARA_BRIDGE | ResidueFlags::ANTI_BRIDGE) {
        'E'
    } else {
        ' '
    };

    let turn3 = if flags.contains(ResidueFlags::T3_DONOR | ResidueFlags::T3_ACCEPTOR) {
        'X'
    } else if flags.contains(ResidueFlags::T3_ACCEPTOR) {
        '>'
    } else if flags.contains(ResidueFlags::T3_DONOR) {
        '<'
    } else if flags.contains(ResidueFlags::T3_GAP) {
        '3'
    } else {
        ' '
    };

    let turn4 = if flags.contains(ResidueFlags::T4_DONOR | ResidueFlags::T4_ACCEPTOR) {
        'X'
    } else if flags.contains(ResidueFlags::T4_ACCEPTOR) {
        '>'
    } else if flags.contains(ResidueFlags::T4_DONOR) {
        '<'
    } else if flags.contains(ResidueFlags::T4_GAP) {
        '4'
    } else {
        ' '
    };

    let bridge = if flags.contains(ResidueFlags::PARA_BRIDGE | ResidueFlags::ANTI_BRIDGE) {
        '+'
    } else if flags.contains(ResidueFlags::PARA_BRIDGE) {
        'p'
    } else if flags.contains(ResidueFlags::ANTI_BRIDGE) {
        'A'
    } else {
        ' '
    };

    format!(
        "{:>4.4} {} -> {} {} {} {}",
        r.name(),
        r.id,
        summary,
        turn3,
        turn4,
        bridge
    )
}
