use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::system::MolecularSystem;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

const MIN_ATOM_RECORD_LEN: usize = 54;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    pub id_code: Option<String>,
    pub title: Option<String>,
    pub model_serial: Option<usize>,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record ({length} chars, need at least 54)")]
    LineTooShort { length: usize },
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn column_char(line: &str, index: usize) -> Option<char> {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| !c.is_whitespace())
}

fn parse_coordinate(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

/// Reader for the fixed-column Protein Data Bank format.
///
/// Only the first model of a multi-model file is read. For atoms with alternate
/// locations the highest-occupancy conformer is kept.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        let mut system = MolecularSystem::new();
        let mut metadata = PdbMetadata::default();
        let mut atom_records = 0usize;
        let mut title_parts: Vec<String> = Vec::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = line.get(0..6).unwrap_or(&line).trim_end();

            match record_type {
                "ATOM" | "HETATM" => {
                    if line.len() < MIN_ATOM_RECORD_LEN {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort { length: line.len() },
                        });
                    }

                    let serial: usize = slice_and_trim(&line, 6, 11).parse().unwrap_or(0);
                    let name = slice_and_trim(&line, 12, 16);
                    let alt_loc = column_char(&line, 16);
                    let res_name = slice_and_trim(&line, 17, 20);
                    let chain_id = column_char(&line, 21).unwrap_or(' ');
                    let res_seq_str = slice_and_trim(&line, 22, 26);
                    let insertion_code = column_char(&line, 26);

                    if name.is_empty() {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::MissingRequiredField {
                                columns: "13-16".into(),
                            },
                        });
                    }
                    let res_seq: isize = res_seq_str.parse().map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidInt {
                            columns: "23-26".into(),
                            value: res_seq_str.into(),
                        },
                    })?;

                    let x = parse_coordinate(&line, line_num, 30, 38)?;
                    let y = parse_coordinate(&line, line_num, 38, 46)?;
                    let z = parse_coordinate(&line, line_num, 46, 54)?;
                    let occupancy: f64 = slice_and_trim(&line, 54, 60).parse().unwrap_or(1.0);

                    let chain = system.add_chain(chain_id);
                    let residue_id = system
                        .add_residue(
                            chain,
                            res_seq,
                            insertion_code,
                            res_name,
                            record_type == "HETATM",
                        )
                        .ok_or_else(|| {
                            PdbError::Inconsistency(format!(
                                "Chain '{}' vanished while adding residue {}",
                                chain_id, res_seq
                            ))
                        })?;

                    let existing_name = system
                        .residue(residue_id)
                        .map(|r| r.name.as_str())
                        .unwrap_or(res_name);
                    if existing_name != res_name {
                        // Point mutants share a residue slot through alternate locations;
                        // the residue read first is kept.
                        if alt_loc.is_some() {
                            debug!(
                                "Line {}: skipping alternate {} atom {} of residue {}{}",
                                line_num, res_name, name, chain_id, res_seq
                            );
                            continue;
                        }
                        return Err(PdbError::Inconsistency(format!(
                            "line {}: residue {}{} is both {} and {}",
                            line_num, chain_id, res_seq, existing_name, res_name
                        )));
                    }

                    let atom = Atom {
                        serial,
                        name: name.to_string(),
                        residue_id,
                        position: Point3::new(x, y, z),
                        occupancy,
                        alt_loc,
                    };
                    system.add_atom_to_residue(residue_id, atom);
                    atom_records += 1;
                }
                "HEADER" => {
                    let id_code = slice_and_trim(&line, 62, 66);
                    if !id_code.is_empty() {
                        metadata.id_code = Some(id_code.to_string());
                    }
                }
                "TITLE" => {
                    let part = line.get(10..).unwrap_or("").trim();
                    if !part.is_empty() {
                        title_parts.push(part.to_string());
                    }
                }
                "MODEL" => {
                    if metadata.model_serial.is_some() {
                        break;
                    }
                    metadata.model_serial =
                        Some(slice_and_trim(&line, 10, 14).parse().unwrap_or(1));
                }
                "ENDMDL" | "END" => break,
                _ => {}
            }
        }

        if atom_records == 0 {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }
        if !title_parts.is_empty() {
            metadata.title = Some(title_parts.join(" "));
        }
        Ok((system, metadata))
    }
}
