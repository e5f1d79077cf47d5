//! Kabsch-Sander secondary structure assignment for protein models.
//!
//! - **PDB reading** — Multi-model coordinate input with [`pdb::read_models`]
//! - **Hydrogen bonds** — Electrostatic bond detection in [`hbond`]
//! - **Helices** — Turn and helix assignment in [`helix`]
//! - **Sheets** — Bridge, ladder, and sheet assembly in [`ladder`] and [`sheet`]
//! - **Output** — PDB HELIX/SHEET records and summary reports in [`emit`]
//!
//! # Quick start
//!
//! ```
//! use ksdssp::{assign_all, read_models, Config};
//!
//! let pdb_text = "\
//! ATOM      1  N   ALA A   1       1.000   2.000   3.000  1.00  0.00           N
//! ATOM      2  CA  ALA A   1       2.000   2.000   3.000  1.00  0.00           C
//! ATOM      3  C   ALA A   1       3.000   2.000   3.000  1.00  0.00           C
//! ATOM      4  O   ALA A   1       3.000   3.000   3.000  1.00  0.00           O
//! TER
//! END
//! ";
//!
//! let mut models = read_models(pdb_text).unwrap();
//! assign_all(&mut models, &Config::default());
//! assert_eq!(models.len(), 1);
//! assert!(models[0].helices.is_empty());
//! ```

pub mod config;
pub mod emit;
pub mod geometry;
pub mod hbond;
pub mod helix;
pub mod ladder;
pub mod model;
pub mod pdb;
pub mod sheet;
pub mod types;

pub use config::Config;
pub use emit::{write_records, write_summary};
pub use helix::Helix;
pub use ladder::{BridgeType, Ladder};
pub use model::{assign_all, BondMatrix, Model};
pub use pdb::{read_models, read_models_file};
pub use sheet::Sheet;
pub use types::{Atom, Point3D, Residue, ResidueFlags, ResidueId};
