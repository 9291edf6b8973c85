//! Plain-text body files.
//!
//! The first non-blank line holds the body count `n`. Each of the next `n` non-blank
//! lines holds one record of six whitespace-separated fields:
//!
//! ```text
//! index x y mass vx vy
//! ```
//!
//! Output uses the same layout with six decimals per float, sorted by index. Escaped
//! bodies are written with their negative sentinel mass.
//!
//! # Example
//!
//! ```
//! use rs_nbody::io::{read_bodies, write_bodies};
//!
//! let input = "2\n0 1.0 2.0 1.5 0.0 0.0\n1 3.0 2.0 1.5 0.0 0.1\n";
//! let bodies = read_bodies(input.as_bytes()).unwrap();
//! assert_eq!(bodies.len(), 2);
//! assert_eq!(bodies[1].velocity, (0.0, 0.1));
//!
//! let mut out = Vec::new();
//! write_bodies(&mut out, &bodies).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "2\n0 1.000000 2.000000 1.500000 0.000000 0.000000\n1 3.000000 2.000000 1.500000 0.000000 0.100000\n"
//! );
//! ```
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use log::{debug, error};

use crate::bodies::Body;
use crate::utils::SimulationError;

const FIELDS_PER_RECORD: usize = 6;

fn parse_field<T: FromStr>(token: &str, name: &str, line: usize) -> Result<T, SimulationError> {
    token.parse().map_err(|_| SimulationError::Parse {
        line,
        message: format!("invalid {} '{}'", name, token),
    })
}

fn parse_record(text: &str, line: usize) -> Result<Body, SimulationError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != FIELDS_PER_RECORD {
        return Err(SimulationError::Parse {
            line,
            message: format!("expected {} fields, found {}", FIELDS_PER_RECORD, tokens.len()),
        });
    }
    let id: usize = parse_field(tokens[0], "index", line)?;
    let x: f64 = parse_field(tokens[1], "x position", line)?;
    let y: f64 = parse_field(tokens[2], "y position", line)?;
    let mass: f64 = parse_field(tokens[3], "mass", line)?;
    let vx: f64 = parse_field(tokens[4], "x velocity", line)?;
    let vy: f64 = parse_field(tokens[5], "y velocity", line)?;

    if ![x, y, vx, vy].iter().all(|v| v.is_finite()) {
        return Err(SimulationError::Parse {
            line,
            message: format!("non-finite position or velocity for body #{}", id),
        });
    }
    Body::new(id, (x, y), (vx, vy), mass)
}

/// Reads a body file from any buffered reader.
///
/// # Errors
///
/// `Parse` for a malformed count or record, a missing record, or trailing records;
/// `InvalidMass` for a mass that is not strictly positive; `Io` if reading fails.
pub fn read_bodies<R: BufRead>(reader: R) -> Result<Vec<Body>, SimulationError> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|text| (i + 1, text)))
        .filter(|line| !matches!(line, Ok((_, text)) if text.trim().is_empty()));

    let (count_line, count_text) = match lines.next() {
        Some(line) => line?,
        None => {
            return Err(SimulationError::Parse {
                line: 1,
                message: "missing body count".to_string(),
            })
        }
    };
    let count: usize = parse_field(count_text.trim(), "body count", count_line)?;

    let mut bodies = Vec::with_capacity(count);
    let mut last_line = count_line;
    for line in lines {
        let (number, text) = line?;
        if bodies.len() == count {
            return Err(SimulationError::Parse {
                line: number,
                message: format!("unexpected record after {} bodies", count),
            });
        }
        bodies.push(parse_record(&text, number)?);
        last_line = number;
    }

    if bodies.len() < count {
        return Err(SimulationError::Parse {
            line: last_line + 1,
            message: format!("expected {} bodies, found {}", count, bodies.len()),
        });
    }
    Ok(bodies)
}

pub fn read_bodies_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Body>, SimulationError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        error!("Failed to open {}: {}", path.display(), e);
        SimulationError::from(e)
    })?;
    let bodies = read_bodies(BufReader::new(file))?;
    debug!("Read {} bodies from {}", bodies.len(), path.display());
    Ok(bodies)
}

/// Writes `bodies` sorted by index, six decimals per float.
pub fn write_bodies<W: Write>(mut writer: W, bodies: &[Body]) -> Result<(), SimulationError> {
    let mut ordered: Vec<&Body> = bodies.iter().collect();
    ordered.sort_by_key(|b| b.id);

    writeln!(writer, "{}", ordered.len())?;
    for b in ordered {
        writeln!(
            writer,
            "{} {:.6} {:.6} {:.6} {:.6} {:.6}",
            b.id, b.position.0, b.position.1, b.mass, b.velocity.0, b.velocity.1
        )?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_bodies_to_path<P: AsRef<Path>>(path: P, bodies: &[Body]) -> Result<(), SimulationError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        error!("Failed to create {}: {}", path.display(), e);
        SimulationError::from(e)
    })?;
    write_bodies(BufWriter::new(file), bodies)?;
    debug!("Wrote {} bodies to {}", bodies.len(), path.display());
    Ok(())
}
