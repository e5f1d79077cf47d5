//! PDB format reader.
//!
//! Parses ATOM, TER, MODEL, END, and ENDMDL records from PDB-format text
//! and groups the residues into one [`Model`] per coordinate set. HETATM
//! and all other record types are ignored.

use ksdssp_core::{KsdsspError, Result};

use crate::model::Model;
use crate::types::{Atom, Point3D, Residue, ResidueFlags, ResidueId};

/// One ATOM record, parsed but not yet grouped into a residue.
#[derive(Debug, Clone)]
pub struct AtomRecord {
    /// Atom name, trimmed.
    pub name: String,
    /// Residue identity this atom belongs to.
    pub residue: ResidueId,
    /// Coordinates in Angstroms.
    pub coords: Point3D,
}

/// A single parsed record of interest.
#[derive(Debug, Clone)]
pub enum PdbRecord {
    /// An ATOM coordinate record.
    Atom(AtomRecord),
    /// A TER chain terminator.
    Ter,
    /// A MODEL record with its serial number.
    ModelNumber(i32),
    /// An END or ENDMDL record.
    End,
}

/// Parse one line of PDB text. Returns `None` for record types that the
/// reader does not care about.
pub fn parse_record(line: &str) -> Result<Option<PdbRecord>> {
    if line.starts_with("ATOM  ") {
        return Ok(Some(PdbRecord::Atom(parse_atom_record(line)?)));
    }
    if line.starts_with("TER") {
        return Ok(Some(PdbRecord::Ter));
    }
    if line.starts_with("MODEL") {
        let number = safe_slice(line, 10, 14)
            .trim()
            .parse::<i32>()
            .map_err(|e| KsdsspError::Parse(format!("bad model number: {}", e)))?;
        return Ok(Some(PdbRecord::ModelNumber(number)));
    }
    if line.starts_with("END") {
        // Covers both END and ENDMDL.
        return Ok(Some(PdbRecord::End));
    }
    Ok(None)
}

/// Parse PDB-format text into one [`Model`] per coordinate set.
///
/// A TER record marks the preceding residue as a chain terminator and
/// closes the current model; END and ENDMDL close it as well. Models
/// with no residues are dropped.
///
/// # Errors
///
/// Returns an error if a record is malformed or if the input contains
/// no ATOM records at all.
pub fn read_models(input: &str) -> Result<Vec<Model>> {
    let mut models: Vec<Model> = Vec::new();
    let mut residues: Vec<Residue> = Vec::new();
    let mut model_number: Option<i32> = None;

    for (lineno, line) in input.lines().enumerate() {
        let record = parse_record(line).map_err(|e| match e {
            KsdsspError::Parse(msg) => {
                KsdsspError::Parse(format!("line {}: {}", lineno + 1, msg))
            }
            other => other,
        })?;
        match record {
            None => {}
            Some(PdbRecord::Atom(atom)) => {
                if residues.last().map(|r| &r.id) != Some(&atom.residue) {
                    residues.push(Residue::new(atom.residue.clone()));
                }
                if let Some(residue) = residues.last_mut() {
                    residue.atoms.push(Atom {
                        name: atom.name,
                        coords: atom.coords,
                    });
                }
            }
            Some(PdbRecord::Ter) => {
                if let Some(residue) = residues.last_mut() {
                    residue.flags.insert(ResidueFlags::TER);
                }
                flush(&mut models, &mut residues, model_number);
            }
            Some(PdbRecord::ModelNumber(number)) => {
                model_number = Some(number);
            }
            Some(PdbRecord::End) => {
                flush(&mut models, &mut residues, model_number);
                model_number = None;
            }
        }
    }
    flush(&mut models, &mut residues, model_number);

    if models.is_empty() {
        return Err(KsdsspError::InvalidInput("no ATOM records found".into()));
    }
    Ok(models)
}

/// Read and parse a PDB file from disk.
pub fn read_models_file(path: impl AsRef<std::path::Path>) -> Result<Vec<Model>> {
    let contents = std::fs::read_to_string(path)?;
    read_models(&contents)
}

fn flush(models: &mut Vec<Model>, residues: &mut Vec<Residue>, model_number: Option<i32>) {
    if !residues.is_empty() {
        models.push(Model::new(std::mem::take(residues), model_number));
    }
}

fn parse_atom_record(line: &str) -> Result<AtomRecord> {
    // PDB format is fixed-width columns. We need at least 54 chars for coords.
    if line.len() < 54 {
        return Err(KsdsspError::Parse(format!(
            "ATOM record too short ({} chars): {}",
            line.len(),
            line
        )));
    }

    let name = safe_slice(line, 12, 16).trim().to_string();
    let res_name = safe_slice(line, 17, 20).trim().to_string();
    let chain_id = safe_slice(line, 21, 22).chars().next().unwrap_or(' ');
    let seq_num = safe_slice(line, 22, 26)
        .trim()
        .parse::<i32>()
        .map_err(|e| KsdsspError::Parse(format!("bad residue seq number: {}", e)))?;
    let i_code = {
        let c = safe_slice(line, 26, 27).chars().next().unwrap_or(' ');
        if c == ' ' {
            None
        } else {
            Some(c)
        }
    };

    let x = safe_slice(line, 30, 38)
        .trim()
        .parse::<f64>()
        .map_err(|e| KsdsspError::Parse(format!("bad x coordinate: {}", e)))?;
    let y = safe_slice(line, 38, 46)
        .trim()
        .parse::<f64>()
        .map_err(|e| KsdsspError::Parse(format!("bad y coordinate: {}", e)))?;
    let z = safe_slice(line, 46, 54)
        .trim()
        .parse::<f64>()
        .map_err(|e| KsdsspError::Parse(format!("bad z coordinate: {}", e)))?;

    Ok(AtomRecord {
        name,
        residue: ResidueId {
            name: res_name,
            chain_id,
            seq_num,
            i_code,
        },
        coords: Point3D::new(x, y, z),
    })
}

/// Safe substring that handles short lines gracefully. Byte columns that
/// run past the line or split a multi-byte character read as empty.
fn safe_slice(s: &str, start: usize, end: usize) -> &str {
    s.get(start..end.min(s.len())).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_pdb() -> &'static str {
        "\
ATOM      1  N   THR A   1       2.464   9.901  13.546  1.00 10.00           N\n\
ATOM      2  CA  THR A   1       2.135  10.226  12.120  1.00 10.00           C\n\
ATOM      3  C   THR A   1       3.427  10.018  11.354  1.00 10.00           C\n\
ATOM      4  O   THR A   1       3.426  10.335  10.184  1.00 10.00           O\n\
ATOM      5  N   ILE A   2       4.462   9.470  11.952  1.00 10.00           N\n\
ATOM      6  CA  ILE A   2       5.735   9.197  11.275  1.00 10.00           C\n\
TER       7      ILE A   2\n\
END\n"
    }

    #[test]
    fn parse_single_model() {
        let models = read_models(minimal_pdb()).unwrap();
        assert_eq!(models.len(), 1);
        let m = &models[0];
        assert_eq!(m.residues.len(), 2);
        assert_eq!(m.residues[0].id.name, "THR");
        assert_eq!(m.residues[0].atoms.len(), 4);
        assert_eq!(m.residues[1].atoms.len(), 2);
        assert_eq!(m.model_number, None);
    }

    #[test]
    fn ter_flags_last_residue() {
        let models = read_models(minimal_pdb()).unwrap();
        let m = &models[0];
        assert!(!m.residues[0].flags.contains(ResidueFlags::TER));
        assert!(m.residues[1].flags.contains(ResidueFlags::TER));
    }

    #[test]
    fn hetatm_is_ignored() {
        let input = "\
ATOM      1  CA  ALA A   1       1.000   2.000   3.000  1.00  0.00           C\n\
HETATM    2  O   HOH A   2       4.000   5.000   6.000  1.00  0.00           O\n\
END\n";
        let models = read_models(input).unwrap();
        assert_eq!(models[0].residues.len(), 1);
    }

    #[test]
    fn model_records_number_coordinate_sets() {
        let input = "\
MODEL        1\n\
ATOM      1  CA  ALA A   1       1.000   2.000   3.000  1.00  0.00           C\n\
ENDMDL\n\
MODEL        2\n\
ATOM      1  CA  ALA A   1       1.100   2.100   3.100  1.00  0.00           C\n\
ENDMDL\n\
END\n";
        let models = read_models(input).unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].model_number, Some(1));
        assert_eq!(models[1].model_number, Some(2));
    }

    #[test]
    fn ter_splits_chains_into_models() {
        let input = "\
ATOM      1  CA  ALA A   1       1.000   2.000   3.000  1.00  0.00           C\n\
TER\n\
ATOM      2  CA  ALA B   1       4.000   5.000   6.000  1.00  0.00           C\n\
END\n";
        let models = read_models(input).unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].residues[0].id.chain_id, 'A');
        assert_eq!(models[1].residues[0].id.chain_id, 'B');
    }

    #[test]
    fn insertion_codes_split_residues() {
        let input = "\
ATOM      1  CA  ALA A  10       1.000   2.000   3.000  1.00  0.00           C\n\
ATOM      2  CA  ALA A  10A      4.000   5.000   6.000  1.00  0.00           C\n\
END\n";
        let models = read_models(input).unwrap();
        let m = &models[0];
        assert_eq!(m.residues.len(), 2);
        assert_eq!(m.residues[0].id.i_code, None);
        assert_eq!(m.residues[1].id.i_code, Some('A'));
    }

    #[test]
    fn malformed_record_is_an_error() {
        assert!(read_models("ATOM   BAD\n").is_err());
    }

    #[test]
    fn non_ascii_atom_record_is_an_error() {
        // The multi-byte residue name shifts every later column off its
        // byte offset; the record must fail cleanly, not panic.
        let input =
            "ATOM      1  CA  ALÉ A   1       1.000   2.000   3.000  1.00  0.00           C\n";
        assert!(matches!(
            read_models(input),
            Err(KsdsspError::Parse(_))
        ));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(read_models("END\n").is_err());
    }
}
