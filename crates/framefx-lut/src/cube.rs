//! Adobe/Resolve .cube LUT format support.
//!
//! The .cube format is a simple text-based LUT format widely supported
//! by DaVinci Resolve, Adobe applications, and many other tools. One
//! file carries either a 1D or a 3D table; [`read`] returns the matching
//! [`Lut`] variant.
//!
//! # Format
//!
//! ```text
//! # Comment
//! TITLE "LUT Name"
//! LUT_3D_SIZE 33
//! DOMAIN_MIN 0.0 0.0 0.0
//! DOMAIN_MAX 1.0 1.0 1.0
//! 0.0 0.0 0.0
//! ...
//! 1.0 1.0 1.0
//! ```
//!
//! Data rows are in file-domain units (normally [0, 1]) and are scaled
//! into the engine's 0..=255 channel range on load. 3D rows are ordered
//! R-fastest, then G, then B — the same order [`crate::Lut3D`] stores
//! them.
//!
//! # Example
//!
//! ```rust,ignore
//! use framefx_lut::cube;
//!
//! let lut = cube::read("grade.cube")?;
//! let rgb = lut.lookup(framefx_lut::Rgb::new(128, 64, 32));
//! ```

use crate::{Lut, Lut1D, Lut3D, LutError, LutResult};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Scale between the file's normalized units and 8-bit channel units.
const FILE_TO_CHANNEL: f32 = 255.0;

/// Reads a LUT from a .cube file.
///
/// The size directive in the file selects the returned [`Lut`] variant.
/// A missing or unreadable file surfaces as [`LutError::Io`]; malformed
/// content as [`LutError::Format`] with the offending line.
pub fn read<P: AsRef<Path>>(path: P) -> LutResult<Lut> {
    let file = File::open(path.as_ref())?;
    parse(BufReader::new(file))
}

/// Which size directive the file declared.
#[derive(Debug, Clone, Copy)]
enum SizeDirective {
    OneD(usize),
    ThreeD(usize),
}

/// Parses a LUT from a reader.
pub fn parse<R: BufRead>(reader: R) -> LutResult<Lut> {
    let mut size: Option<SizeDirective> = None;
    let mut domain_min = [0.0_f32; 3];
    let mut domain_max = [1.0_f32; 3];
    let mut domain_line: Option<usize> = None;
    let mut data: Vec<[f32; 3]> = Vec::new();
    let mut last_line = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = line?;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with("TITLE") {
            continue;
        } else if line.starts_with("LUT_1D_SIZE") {
            if size.is_some() {
                return Err(LutError::format(line_no, "duplicate size directive"));
            }
            size = Some(SizeDirective::OneD(parse_size(line, line_no)?));
        } else if line.starts_with("LUT_3D_SIZE") {
            if size.is_some() {
                return Err(LutError::format(line_no, "duplicate size directive"));
            }
            size = Some(SizeDirective::ThreeD(parse_size(line, line_no)?));
        } else if line.starts_with("DOMAIN_MIN") {
            domain_min = parse_domain(line, line_no)?;
            domain_line = Some(line_no);
        } else if line.starts_with("DOMAIN_MAX") {
            domain_max = parse_domain(line, line_no)?;
            domain_line = Some(line_no);
        } else if line.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(LutError::format(
                line_no,
                format!("unrecognized directive: {line}"),
            ));
        } else {
            data.push(parse_row(line, line_no)?);
        }
    }

    let size = size.ok_or_else(|| {
        LutError::format(last_line, "missing LUT_1D_SIZE or LUT_3D_SIZE directive")
    })?;

    for axis in 0..3 {
        if domain_max[axis] - domain_min[axis] == 0.0 {
            return Err(LutError::format(
                domain_line.unwrap_or(last_line),
                format!("zero-width domain on axis {axis}"),
            ));
        }
    }

    // Scale samples and domain from file units into channel units.
    let min = domain_min.map(|v| v * FILE_TO_CHANNEL);
    let max = domain_max.map(|v| v * FILE_TO_CHANNEL);
    let scaled: Vec<[f32; 3]> = data
        .iter()
        .map(|rgb| rgb.map(|v| v * FILE_TO_CHANNEL))
        .collect();

    match size {
        SizeDirective::OneD(n) => {
            if scaled.len() != n {
                return Err(LutError::format(
                    last_line,
                    format!("expected {} data rows, found {}", n, scaled.len()),
                ));
            }
            let r = scaled.iter().map(|rgb| rgb[0]).collect();
            let g = scaled.iter().map(|rgb| rgb[1]).collect();
            let b = scaled.iter().map(|rgb| rgb[2]).collect();
            Ok(Lut::OneD(Lut1D::from_channels(r, g, b, min, max)?))
        }
        SizeDirective::ThreeD(n) => {
            let expected = n * n * n;
            if scaled.len() != expected {
                return Err(LutError::format(
                    last_line,
                    format!("expected {} data rows, found {}", expected, scaled.len()),
                ));
            }
            Ok(Lut::ThreeD(Lut3D::from_data(scaled, n)?.with_domain(min, max)))
        }
    }
}

/// Writes a 1D LUT to a .cube file.
pub fn write_1d<P: AsRef<Path>>(path: P, lut: &Lut1D) -> LutResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Generated by framefx-lut")?;
    writeln!(writer, "LUT_1D_SIZE {}", lut.size())?;
    write_domain(&mut writer, lut.domain())?;
    writeln!(writer)?;

    let (r, g, b) = lut.channels();
    for i in 0..lut.size() {
        writeln!(
            writer,
            "{:.6} {:.6} {:.6}",
            r[i] / FILE_TO_CHANNEL,
            g[i] / FILE_TO_CHANNEL,
            b[i] / FILE_TO_CHANNEL
        )?;
    }

    Ok(())
}

/// Writes a 3D LUT to a .cube file (rows R-fastest, then G, then B).
pub fn write_3d<P: AsRef<Path>>(path: P, lut: &Lut3D) -> LutResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Generated by framefx-lut")?;
    writeln!(writer, "LUT_3D_SIZE {}", lut.size())?;
    write_domain(&mut writer, lut.domain())?;
    writeln!(writer)?;

    // Memory order is already the file's row order.
    for rgb in lut.data() {
        writeln!(
            writer,
            "{:.6} {:.6} {:.6}",
            rgb[0] / FILE_TO_CHANNEL,
            rgb[1] / FILE_TO_CHANNEL,
            rgb[2] / FILE_TO_CHANNEL
        )?;
    }

    Ok(())
}

fn write_domain<W: Write>(writer: &mut W, domain: ([f32; 3], [f32; 3])) -> LutResult<()> {
    let (min, max) = domain;
    if min != [0.0; 3] || max != [FILE_TO_CHANNEL; 3] {
        let min = min.map(|v| v / FILE_TO_CHANNEL);
        let max = max.map(|v| v / FILE_TO_CHANNEL);
        writeln!(writer, "DOMAIN_MIN {} {} {}", min[0], min[1], min[2])?;
        writeln!(writer, "DOMAIN_MAX {} {} {}", max[0], max[1], max[2])?;
    }
    Ok(())
}

// Helper functions

fn parse_size(line: &str, line_no: usize) -> LutResult<usize> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(LutError::format(line_no, "malformed size directive"));
    }
    let size: usize = parts[1]
        .parse()
        .map_err(|_| LutError::format(line_no, format!("invalid size value: {}", parts[1])))?;
    if size < 2 {
        return Err(LutError::format(
            line_no,
            format!("LUT size must be at least 2, got {size}"),
        ));
    }
    Ok(size)
}

fn parse_domain(line: &str, line_no: usize) -> LutResult<[f32; 3]> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 4 {
        return Err(LutError::format(line_no, "domain needs exactly 3 values"));
    }
    Ok([
        parse_value(parts[1], line_no)?,
        parse_value(parts[2], line_no)?,
        parse_value(parts[3], line_no)?,
    ])
}

fn parse_row(line: &str, line_no: usize) -> LutResult<[f32; 3]> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(LutError::format(
            line_no,
            format!("data row needs exactly 3 values, found {}", parts.len()),
        ));
    }
    Ok([
        parse_value(parts[0], line_no)?,
        parse_value(parts[1], line_no)?,
        parse_value(parts[2], line_no)?,
    ])
}

fn parse_value(token: &str, line_no: usize) -> LutResult<f32> {
    let value: f32 = token
        .parse()
        .map_err(|_| LutError::format(line_no, format!("non-numeric value: {token}")))?;
    if !value.is_finite() {
        return Err(LutError::format(
            line_no,
            format!("non-finite value: {token}"),
        ));
    }
    Ok(value)
}
