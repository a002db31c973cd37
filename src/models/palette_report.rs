use std::fmt;

use msx1_quantize::palette::{FIRST_DARK_DITHER_INDEX, NUM_BASIC_COLORS};
use msx1_quantize::{ColorSystem, PaletteCatalog};
use serde::Serialize;

/// Printable description of the palette catalog for one color system.
#[derive(Debug, Clone, Serialize)]
pub struct PaletteReport {
    pub color_system: String,
    pub basic: Vec<BasicEntry>,
    pub extended: Vec<ExtendedEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BasicEntry {
    pub index: usize,
    /// Hardware color code (1-based)
    pub code: usize,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtendedEntry {
    pub index: usize,
    /// Search color (MSX1 reference)
    pub color: String,
    pub kind: EntryKind,
    pub width: usize,
    pub height: usize,
    /// Basic indices of the dither tile, row-major
    pub cells: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Basic,
    Line,
    Dark,
}

impl PaletteReport {
    pub fn new(catalog: &PaletteCatalog, system: ColorSystem) -> Self {
        let basic = catalog
            .basic(system)
            .iter()
            .enumerate()
            .map(|(index, c)| BasicEntry {
                index,
                code: index + 1,
                color: c.to_string(),
            })
            .collect();

        let extended = catalog
            .palette()
            .iter()
            .enumerate()
            .filter_map(|(index, c)| {
                let pattern = catalog.pattern(index)?;
                let kind = if index < NUM_BASIC_COLORS {
                    EntryKind::Basic
                } else if index < FIRST_DARK_DITHER_INDEX {
                    EntryKind::Line
                } else {
                    EntryKind::Dark
                };
                Some(ExtendedEntry {
                    index,
                    color: c.to_string(),
                    kind,
                    width: pattern.width(),
                    height: pattern.height(),
                    cells: pattern.cells().to_vec(),
                })
            })
            .collect();

        Self {
            color_system: system.to_string(),
            basic,
            extended,
        }
    }
}

impl fmt::Display for PaletteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Basic colors ({}):", self.color_system)?;
        for e in &self.basic {
            writeln!(f, "  {:2}  code {:2}  {}", e.index, e.code, e.color)?;
        }
        writeln!(f, "\nExtended palette (search colors):")?;
        for e in &self.extended {
            let cells: Vec<String> = e.cells.iter().map(|c| c.to_string()).collect();
            writeln!(
                f,
                "  {:2}  {}  {:5}  {}x{}  [{}]",
                e.index,
                e.color,
                format!("{:?}", e.kind).to_lowercase(),
                e.width,
                e.height,
                cells.join(" ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_covers_catalog() {
        let report = PaletteReport::new(PaletteCatalog::global(), ColorSystem::Msx1);
        assert_eq!(report.basic.len(), 15);
        assert_eq!(report.extended.len(), 95);
        assert_eq!(report.basic[0].code, 1);
        assert_eq!(report.extended[22].cells, vec![0, 14]);
        assert_eq!(report.extended[89].kind, EntryKind::Dark);
    }

    #[test]
    fn test_msx2_basic_colors() {
        let report = PaletteReport::new(PaletteCatalog::global(), ColorSystem::Msx2);
        assert_eq!(report.color_system, "msx2");
        assert_eq!(report.basic[1].color, "#22DD22");
    }

    #[test]
    fn test_json_shape() {
        let report = PaletteReport::new(PaletteCatalog::global(), ColorSystem::Msx1);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["extended"][15]["kind"], "line");
        assert_eq!(value["basic"][14]["color"], "#FFFFFF");
    }
}
