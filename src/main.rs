use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use msx1_quantize::{ColorSystem, DistanceMetric, EightDotMode, PaletteCatalog};
use msx1pq::models::{ConvertSettings, OutputFormat, PaletteReport};
use msx1pq::services::BatchConverter;

#[derive(Parser)]
#[command(name = "msx1pq", version)]
#[command(about = "MSX1 palette quantizer - convert PNG images to MSX1/MSX2 colors")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PNG file, or every PNG in a directory
    Convert(ConvertArgs),
    /// Print the palette tables and dither patterns
    Palette {
        /// Color system whose basic colors are listed: msx1 or msx2
        #[arg(long, default_value = "msx1")]
        color_system: ColorSystem,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Input PNG file or directory
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory (created if missing)
    #[arg(short, long)]
    output: PathBuf,

    /// YAML preset; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prefix added to output file names
    #[arg(long)]
    out_prefix: Option<String>,

    /// Suffix added before the output file extension
    #[arg(long)]
    out_suffix: Option<String>,

    /// Output format: png, sc2 or sc5
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Same as --format sc5
    #[arg(long, hide = true, conflicts_with_all = ["format", "out_sc2"])]
    out_sc5: bool,

    /// Same as --format sc2
    #[arg(long, hide = true, conflicts_with = "format")]
    out_sc2: bool,

    /// Color system of the output: msx1 or msx2
    #[arg(long)]
    color_system: Option<ColorSystem>,

    /// Match against dither colors (default)
    #[arg(long, overrides_with = "no_dither")]
    dither: bool,

    /// Match against the 15 basic colors only
    #[arg(long)]
    no_dither: bool,

    /// Include the dark 2x4 dither colors (default)
    #[arg(long, overrides_with = "no_dark_dither")]
    dark_dither: bool,

    /// Exclude the dark 2x4 dither colors
    #[arg(long)]
    no_dark_dither: bool,

    /// Output the matched palette colors without resolving dithers (preview)
    #[arg(long, alias = "palette92")]
    palette_preview: bool,

    /// Skip sharpen, LUT, posterize and HSB adjustments
    #[arg(long)]
    no_preprocess: bool,

    /// 8-dot/2-color mode: none, fast, basic, best, best-attr or best-trans
    #[arg(long, alias = "8dot")]
    eight_dot: Option<EightDotMode>,

    /// Color distance: rgb or hsb
    #[arg(long)]
    distance: Option<DistanceMetric>,

    /// HSB hue weight (0-1)
    #[arg(long)]
    weight_h: Option<f32>,

    /// HSB saturation weight (0-1)
    #[arg(long)]
    weight_s: Option<f32>,

    /// HSB brightness weight (0-1)
    #[arg(long)]
    weight_b: Option<f32>,

    /// Posterize levels (0-255, 0 or 1 disables)
    #[arg(long)]
    pre_posterize: Option<u32>,

    /// Saturation boost
    #[arg(long)]
    pre_sat: Option<f32>,

    /// Gamma (darkens midtones)
    #[arg(long)]
    pre_gamma: Option<f32>,

    /// Highlight lift
    #[arg(long)]
    pre_highlight: Option<f32>,

    /// Hue rotation in degrees
    #[arg(long, allow_negative_numbers = true)]
    pre_hue: Option<f32>,

    /// Sharpness (0-1)
    #[arg(long)]
    pre_sharpness: Option<f32>,

    /// LUT file: 256-row 1-D table or .cube
    #[arg(long)]
    pre_lut: Option<PathBuf>,

    /// Overwrite existing outputs
    #[arg(short, long)]
    force: bool,
}

impl ConvertArgs {
    /// Preset file (or defaults) with command-line overrides applied.
    fn settings(&self) -> anyhow::Result<ConvertSettings> {
        let mut s = match &self.config {
            Some(path) => ConvertSettings::load(path)?,
            None => ConvertSettings::default(),
        };

        if let Some(v) = &self.out_prefix {
            s.out_prefix = v.clone();
        }
        if let Some(v) = &self.out_suffix {
            s.out_suffix = v.clone();
        }
        if let Some(v) = self.format {
            s.format = v;
        }
        if self.out_sc5 {
            s.format = OutputFormat::Sc5;
        }
        if self.out_sc2 {
            s.format = OutputFormat::Sc2;
        }
        if let Some(v) = self.color_system {
            s.color_system = v;
        }
        if let Some(v) = flag(self.dither, self.no_dither) {
            s.dither = v;
        }
        if let Some(v) = flag(self.dark_dither, self.no_dark_dither) {
            s.dark_dither = v;
        }
        if self.palette_preview {
            s.palette_preview = true;
        }
        if self.no_preprocess {
            s.preprocess = false;
        }
        if let Some(v) = self.eight_dot {
            s.eight_dot = v;
        }
        if let Some(v) = self.distance {
            s.distance = v;
        }
        if let Some(v) = self.weight_h {
            s.weight_h = v;
        }
        if let Some(v) = self.weight_s {
            s.weight_s = v;
        }
        if let Some(v) = self.weight_b {
            s.weight_b = v;
        }
        if let Some(v) = self.pre_posterize {
            s.posterize = v;
        }
        if let Some(v) = self.pre_sat {
            s.saturation = v;
        }
        if let Some(v) = self.pre_gamma {
            s.gamma = v;
        }
        if let Some(v) = self.pre_highlight {
            s.highlight = v;
        }
        if let Some(v) = self.pre_hue {
            s.hue = v;
        }
        if let Some(v) = self.pre_sharpness {
            s.sharpness = v;
        }
        if let Some(v) = &self.pre_lut {
            s.lut = Some(v.clone());
        }
        if self.force {
            s.force = true;
        }
        Ok(s)
    }
}

/// Resolve a `--x` / `--no-x` pair; `None` when neither was given.
fn flag(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert_command(&args),
        Some(Commands::Palette { color_system, json }) => run_palette_command(color_system, json),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Convert files (no output unless RUST_LOG asks for more than info)
fn run_convert_command(args: &ConvertArgs) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "msx1pq=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let settings = args.settings()?;
    let converter = BatchConverter::new(settings)?;
    let report = converter.run(&args.input, &args.output)?;

    for (input, output) in &report.processed {
        println!("Processed: {} -> {}", input.display(), output.display());
    }
    for input in &report.skipped {
        println!("Skipped: {}", input.display());
    }
    for (input, error) in &report.failed {
        eprintln!("Failed: {} ({error})", input.display());
    }

    if !report.is_success() {
        anyhow::bail!("no file was converted");
    }
    Ok(())
}

fn run_palette_command(color_system: ColorSystem, json: bool) -> anyhow::Result<()> {
    let report = PaletteReport::new(PaletteCatalog::global(), color_system);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    let defaults = ConvertSettings::default();

    println!("msx1pq v{VERSION} - MSX1 palette quantizer");
    println!("Converts PNG images to MSX1/MSX2 colors, SCREEN2 and SCREEN5\n");

    println!("Defaults:");
    println!("  Format:        {}", defaults.format);
    println!("  Color system:  {}", defaults.color_system);
    println!(
        "  Dither:        {} (dark dither {})",
        on_off(defaults.dither),
        on_off(defaults.dark_dither)
    );
    println!("  8-dot mode:    {}", defaults.eight_dot);
    println!(
        "  Distance:      {} (weights h={} s={} b={})",
        defaults.distance, defaults.weight_h, defaults.weight_s, defaults.weight_b
    );
    println!("  Posterize:     {}", defaults.posterize);

    println!("\nCommands:");
    println!("  msx1pq convert   Convert a PNG file or directory");
    println!("  msx1pq palette   Print the palette tables");
    println!("\nRun 'msx1pq --help' for more details.");
}

fn on_off(v: bool) -> &'static str {
    if v {
        "on"
    } else {
        "off"
    }
}
