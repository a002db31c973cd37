pub mod config;
pub mod palette_report;

pub use config::{ConvertSettings, OutputFormat};
pub use palette_report::{BasicEntry, EntryKind, ExtendedEntry, PaletteReport};
