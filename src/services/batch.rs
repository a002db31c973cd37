use std::path::{Path, PathBuf};

use msx1_quantize::Quantizer;

use crate::error::ConvertError;
use crate::models::{ConvertSettings, OutputFormat};
use crate::rendering::{decode_png, encode_png, encode_sc2, encode_sc5};

/// What happened to each input of a batch run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchReport {
    /// (input, output) pairs that were written
    pub processed: Vec<(PathBuf, PathBuf)>,
    /// Inputs whose output already existed
    pub skipped: Vec<PathBuf>,
    /// Inputs that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    /// A batch succeeds when at least one file was written.
    pub fn is_success(&self) -> bool {
        !self.processed.is_empty()
    }
}

/// Converts single PNG files or whole directories with one set of settings
pub struct BatchConverter {
    settings: ConvertSettings,
    quantizer: Quantizer,
}

impl BatchConverter {
    /// Validate the settings and build the engine. Fails before any file is
    /// touched when the settings or the LUT are invalid.
    pub fn new(settings: ConvertSettings) -> Result<Self, ConvertError> {
        let quantizer = settings.quantizer()?;
        Ok(Self {
            settings,
            quantizer,
        })
    }

    pub fn settings(&self) -> &ConvertSettings {
        &self.settings
    }

    /// Convert `input` (a file or a directory) into `output_dir`.
    pub fn run(&self, input: &Path, output_dir: &Path) -> Result<BatchReport, ConvertError> {
        let inputs = collect_inputs(input)?;
        if inputs.is_empty() {
            return Err(ConvertError::NoInputs(input.to_path_buf()));
        }
        std::fs::create_dir_all(output_dir)?;

        tracing::info!(
            files = inputs.len(),
            format = %self.settings.format,
            color_system = %self.settings.color_system,
            eight_dot = %self.settings.eight_dot,
            "Starting batch"
        );

        let mut report = BatchReport::default();
        for path in inputs {
            let out_path = output_dir.join(self.settings.output_file_name(&path));

            if out_path.exists() && !self.settings.force {
                tracing::warn!(output = %out_path.display(), "Output exists, skipping (use --force)");
                report.skipped.push(path);
                continue;
            }

            match self.convert_file(&path, &out_path) {
                Ok(()) => {
                    tracing::info!(
                        input = %path.display(),
                        output = %out_path.display(),
                        "Processed"
                    );
                    report.processed.push((path, out_path));
                }
                Err(e) => {
                    tracing::warn!(input = %path.display(), %e, "Conversion failed");
                    report.failed.push((path, e.to_string()));
                }
            }
        }

        tracing::info!(
            processed = report.processed.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Batch finished"
        );
        Ok(report)
    }

    /// Convert one PNG file and write the result.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<(), ConvertError> {
        let data = std::fs::read(input)?;
        let bytes = self.convert_bytes(&data)?;
        std::fs::write(output, bytes)?;
        Ok(())
    }

    /// Convert PNG bytes to the configured output format.
    pub fn convert_bytes(&self, data: &[u8]) -> Result<Vec<u8>, ConvertError> {
        let mut image = decode_png(data)?;
        self.quantizer
            .quantize_image(&mut image.pixels, image.width, image.height)?;

        let system = self.settings.color_system;
        match self.settings.format {
            OutputFormat::Png => encode_png(&image),
            OutputFormat::Sc5 => Ok(encode_sc5(&image.pixels, image.width, image.height, system)),
            OutputFormat::Sc2 => Ok(encode_sc2(&image.pixels, image.width, image.height, system)),
        }
    }
}

/// The PNG files to convert: `input` itself when it is a `.png` file,
/// otherwise the `.png` files directly inside it, sorted by path. The
/// extension check is case-insensitive; a single non-PNG file yields nothing.
pub fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    if !input.exists() {
        return Err(ConvertError::MissingInput(input.to_path_buf()));
    }
    if input.is_file() {
        if !has_png_extension(input) {
            tracing::warn!(input = %input.display(), "Not a PNG file, skipping");
            return Ok(Vec::new());
        }
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(input)? {
        let path = entry?.path();
        if path.is_file() && has_png_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn has_png_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}
