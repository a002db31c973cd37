use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use msx1_quantize::{
    ColorSystem, DistanceMetric, EightDotMode, HsbWeights, PreprocessOptions, Quantizer,
};
use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    /// SCREEN2 VRAM image (256x192, pattern + color tables)
    Sc2,
    /// SCREEN5 bitmap (256x212, 4 bits per pixel)
    Sc5,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Sc2 => "sc2",
            OutputFormat::Sc5 => "sc5",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "sc2" => Ok(OutputFormat::Sc2),
            "sc5" => Ok(OutputFormat::Sc5),
            other => Err(format!("unknown output format '{}' (expected png, sc2 or sc5)", other)),
        }
    }
}

/// Conversion settings, loadable from a YAML preset.
///
/// Every key is optional; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertSettings {
    pub format: OutputFormat,

    #[serde(with = "as_str")]
    pub color_system: ColorSystem,

    pub dither: bool,

    pub dark_dither: bool,

    /// Emit the matched extended palette color instead of a basic color
    pub palette_preview: bool,

    /// Master switch for sharpen, LUT, posterize and the HSB adjustments
    pub preprocess: bool,

    #[serde(with = "as_str")]
    pub eight_dot: EightDotMode,

    /// `rgb` or `hsb`
    #[serde(with = "as_str")]
    pub distance: DistanceMetric,

    pub weight_h: f32,
    pub weight_s: f32,
    pub weight_b: f32,

    pub posterize: u32,
    pub saturation: f32,
    pub gamma: f32,
    pub highlight: f32,
    pub hue: f32,
    pub sharpness: f32,

    /// 1-D table or `.cube` file applied before posterization
    pub lut: Option<PathBuf>,

    pub out_prefix: String,
    pub out_suffix: String,

    /// Overwrite existing outputs
    pub force: bool,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        let weights = HsbWeights::default();
        Self {
            format: OutputFormat::Png,
            color_system: ColorSystem::Msx1,
            dither: true,
            dark_dither: true,
            palette_preview: false,
            preprocess: true,
            eight_dot: EightDotMode::Best1,
            distance: DistanceMetric::Hsb(weights),
            weight_h: weights.hue(),
            weight_s: weights.saturation(),
            weight_b: weights.brightness(),
            posterize: 16,
            saturation: 1.0,
            gamma: 1.0,
            highlight: 1.0,
            hue: 0.0,
            sharpness: 0.0,
            lut: None,
            out_prefix: String::new(),
            out_suffix: String::new(),
            force: false,
        }
    }
}

impl ConvertSettings {
    /// Load settings from a YAML preset file.
    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConvertError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let settings: Self = serde_yaml::from_str(&content).map_err(|e| ConvertError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::info!(
            path = %path.display(),
            format = %settings.format,
            eight_dot = %settings.eight_dot,
            "Loaded settings"
        );
        Ok(settings)
    }

    /// Reject combinations the output format cannot represent.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.format == OutputFormat::Sc2 && self.eight_dot.is_none() {
            return Err(ConvertError::InvalidSetting(
                "sc2 output requires an 8-dot mode other than none".to_string(),
            ));
        }
        Ok(())
    }

    /// The distance metric with the configured HSB weights applied.
    pub fn metric(&self) -> DistanceMetric {
        match self.distance {
            DistanceMetric::Rgb => DistanceMetric::Rgb,
            DistanceMetric::Hsb(_) => DistanceMetric::Hsb(HsbWeights::new(
                self.weight_h,
                self.weight_s,
                self.weight_b,
            )),
        }
    }

    pub fn preprocess_options(&self) -> PreprocessOptions {
        if !self.preprocess {
            return PreprocessOptions::none();
        }
        PreprocessOptions::new()
            .posterize(self.posterize)
            .saturation(self.saturation)
            .gamma(self.gamma)
            .highlight(self.highlight)
            .hue(self.hue)
            .sharpen(self.sharpness)
    }

    /// Validate and build the engine. A configured LUT is loaded here, so a
    /// broken table fails before any image is touched.
    pub fn quantizer(&self) -> Result<Quantizer, ConvertError> {
        self.validate()?;
        let mut quantizer = Quantizer::new()
            .color_system(self.color_system)
            .dither(self.dither)
            .dark_dither(self.dark_dither)
            .direct_palette(self.palette_preview)
            .metric(self.metric())
            .preprocess(self.preprocess_options())
            .eight_dot(self.eight_dot);

        if self.preprocess {
            if let Some(path) = &self.lut {
                quantizer = quantizer.load_lut(path)?;
            }
        }
        Ok(quantizer)
    }

    /// Output file name for an input file: prefix + stem + suffix + extension.
    pub fn output_file_name(&self, input: &Path) -> String {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        format!(
            "{}{}{}.{}",
            self.out_prefix,
            stem,
            self.out_suffix,
            self.format.extension()
        )
    }
}

/// Serialize through `Display`, deserialize through `FromStr`.
mod as_str {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
