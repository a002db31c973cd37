//! Color lookup tables.
//!
//! Two file formats are understood:
//!
//! - **1-D tables**: 256 rows of three integers `0..=255`, one row per input
//!   level, applied independently per channel. Values may be separated by
//!   whitespace, `,` or `;`, and `#` starts a comment.
//! - **`.cube` 3-D tables**: `LUT_3D_SIZE N` followed by exactly `N^3` rows
//!   of three floats, red varying fastest. `TITLE` is ignored and optional
//!   `DOMAIN_MIN`/`DOMAIN_MAX` rescale the output values. Lookups are
//!   trilinear.
//!
//! Parsing is all-or-nothing: a malformed file yields a [`LutError`] and no
//! table.

use std::path::Path;

use thiserror::Error;

use crate::color::Rgb;

/// Largest accepted `LUT_3D_SIZE`.
pub const MAX_CUBE_SIZE: usize = 256;

/// Errors that can occur while loading a lookup table.
#[derive(Debug, Error)]
pub enum LutError {
    #[error("failed to read LUT file: {0}")]
    Io(#[from] std::io::Error),

    #[error("LUT_3D_SIZE is missing")]
    MissingSize,

    #[error("invalid LUT_3D_SIZE {0} (expected 2..={max})", max = MAX_CUBE_SIZE)]
    InvalidSize(String),

    #[error("expected {expected} LUT rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("LUT value out of range (0-255): {0}")]
    ValueOutOfRange(i64),

    #[error("invalid LUT domain: DOMAIN_MIN must be below DOMAIN_MAX")]
    InvalidDomain,

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// A per-channel 256-entry table.
#[derive(Debug, Clone, PartialEq)]
pub struct Lut1d {
    table: Vec<[u8; 3]>,
}

impl Lut1d {
    #[inline]
    pub fn apply(&self, c: Rgb) -> Rgb {
        Rgb::new(
            self.table[c.r as usize][0],
            self.table[c.g as usize][1],
            self.table[c.b as usize][2],
        )
    }
}

/// A cubic grid of output colors, normalized to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lut3d {
    size: usize,
    data: Vec<[f32; 3]>,
}

/// Grid position of one input channel.
struct Sample {
    i0: usize,
    i1: usize,
    t: f32,
}

impl Lut3d {
    /// Grid points per axis.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn at(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        self.data[(b * self.size + g) * self.size + r]
    }

    fn locate(&self, v: u8) -> Sample {
        let pos = v as f32 / 255.0 * (self.size - 1) as f32;
        let i0 = (pos.floor() as usize).min(self.size - 1);
        let i1 = (i0 + 1).min(self.size - 1);
        Sample {
            i0,
            i1,
            t: pos - i0 as f32,
        }
    }

    /// Trilinear lookup over the 8 grid points surrounding `c`.
    pub fn sample(&self, c: Rgb) -> Rgb {
        let x = self.locate(c.r);
        let y = self.locate(c.g);
        let z = self.locate(c.b);

        let mut out = [0u8; 3];
        for (ch, slot) in out.iter_mut().enumerate() {
            let c00 = lerp(self.at(x.i0, y.i0, z.i0)[ch], self.at(x.i1, y.i0, z.i0)[ch], x.t);
            let c10 = lerp(self.at(x.i0, y.i1, z.i0)[ch], self.at(x.i1, y.i1, z.i0)[ch], x.t);
            let c01 = lerp(self.at(x.i0, y.i0, z.i1)[ch], self.at(x.i1, y.i0, z.i1)[ch], x.t);
            let c11 = lerp(self.at(x.i0, y.i1, z.i1)[ch], self.at(x.i1, y.i1, z.i1)[ch], x.t);
            let c0 = lerp(c00, c10, y.t);
            let c1 = lerp(c01, c11, y.t);
            *slot = (lerp(c0, c1, z.t) * 255.0 + 0.5).clamp(0.0, 255.0) as u8;
        }
        Rgb::from_bytes(out)
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A loaded lookup table.
#[derive(Debug, Clone, PartialEq)]
pub enum Lut {
    OneD(Lut1d),
    ThreeD(Lut3d),
}

impl Lut {
    /// Load a table from disk. Files ending in `.cube` (any case) are parsed
    /// as 3-D tables; everything else as a 1-D table.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LutError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_cube = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("cube"));

        let lut = if is_cube {
            Self::parse_cube(&text)?
        } else {
            Self::parse_1d(&text)?
        };
        tracing::debug!(path = %path.display(), kind = lut.kind(), "Loaded LUT");
        Ok(lut)
    }

    /// Parse a 1-D table.
    pub fn parse_1d(text: &str) -> Result<Self, LutError> {
        let mut values: Vec<u8> = Vec::with_capacity(256 * 3);

        for (n, line) in text.lines().enumerate() {
            let line = strip_comment(line);
            let tokens = line
                .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
                .filter(|t| !t.is_empty());
            for token in tokens {
                let v: i64 = token.parse().map_err(|_| LutError::Parse {
                    line: n + 1,
                    message: format!("'{}' is not an integer", token),
                })?;
                if !(0..=255).contains(&v) {
                    return Err(LutError::ValueOutOfRange(v));
                }
                values.push(v as u8);
            }
        }

        if values.len() != 256 * 3 {
            return Err(LutError::RowCount {
                expected: 256,
                found: values.len() / 3,
            });
        }

        let table = values
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Ok(Lut::OneD(Lut1d { table }))
    }

    /// Parse a `.cube` 3-D table.
    pub fn parse_cube(text: &str) -> Result<Self, LutError> {
        let mut size: Option<usize> = None;
        let mut domain_min: Option<[f32; 3]> = None;
        let mut domain_max: Option<[f32; 3]> = None;
        let mut rows: Vec<[f32; 3]> = Vec::new();

        for (n, line) in text.lines().enumerate() {
            let line_no = n + 1;
            let mut tokens = strip_comment(line).split_whitespace();
            let Some(first) = tokens.next() else {
                continue;
            };

            match first {
                "TITLE" => {}
                "LUT_3D_SIZE" => {
                    let raw = tokens.next().unwrap_or_default();
                    let n: usize = raw
                        .parse()
                        .map_err(|_| LutError::InvalidSize(raw.to_string()))?;
                    if !(2..=MAX_CUBE_SIZE).contains(&n) {
                        return Err(LutError::InvalidSize(raw.to_string()));
                    }
                    size = Some(n);
                }
                "DOMAIN_MIN" => domain_min = Some(parse_triplet(tokens, line_no)?),
                "DOMAIN_MAX" => domain_max = Some(parse_triplet(tokens, line_no)?),
                keyword if keyword.starts_with(|c: char| c.is_ascii_alphabetic()) => {
                    tracing::debug!(line = line_no, keyword, "Ignoring .cube keyword");
                }
                _ => {
                    let rest = std::iter::once(first).chain(tokens);
                    rows.push(parse_triplet(rest, line_no)?);
                }
            }
        }

        let size = size.ok_or(LutError::MissingSize)?;
        let expected = size * size * size;
        if rows.len() != expected {
            return Err(LutError::RowCount {
                expected,
                found: rows.len(),
            });
        }

        normalize(&mut rows, domain_min, domain_max)?;
        Ok(Lut::ThreeD(Lut3d { size, data: rows }))
    }

    /// Remap one color.
    #[inline]
    pub fn apply(&self, c: Rgb) -> Rgb {
        match self {
            Lut::OneD(lut) => lut.apply(c),
            Lut::ThreeD(lut) => lut.sample(c),
        }
    }

    /// Short description, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Lut::OneD(_) => "1d",
            Lut::ThreeD(_) => "3d",
        }
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_triplet<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<[f32; 3], LutError> {
    let mut out = [0.0f32; 3];
    for slot in out.iter_mut() {
        let token = tokens.next().ok_or_else(|| LutError::Parse {
            line,
            message: "expected three values".to_string(),
        })?;
        *slot = token.parse().map_err(|_| LutError::Parse {
            line,
            message: format!("'{}' is not a number", token),
        })?;
    }
    if let Some(extra) = tokens.next() {
        return Err(LutError::Parse {
            line,
            message: format!("unexpected value '{}'", extra),
        });
    }
    Ok(out)
}

/// Bring every row into `[0, 1]`: by the declared domain if there is one,
/// otherwise by the largest value when that exceeds 1.
fn normalize(
    rows: &mut [[f32; 3]],
    domain_min: Option<[f32; 3]>,
    domain_max: Option<[f32; 3]>,
) -> Result<(), LutError> {
    if domain_min.is_some() || domain_max.is_some() {
        let lo = domain_min.unwrap_or([0.0; 3]);
        let hi = domain_max.unwrap_or([1.0; 3]);
        if (0..3).any(|c| hi[c] <= lo[c]) {
            return Err(LutError::InvalidDomain);
        }
        for row in rows.iter_mut() {
            for c in 0..3 {
                row[c] = ((row[c] - lo[c]) / (hi[c] - lo[c])).clamp(0.0, 1.0);
            }
        }
        return Ok(());
    }

    let max = rows
        .iter()
        .flat_map(|r| r.iter().copied())
        .fold(1.0f32, f32::max);
    for v in rows.iter_mut().flat_map(|r| r.iter_mut()) {
        *v = (*v / max).clamp(0.0, 1.0);
    }
    Ok(())
}
