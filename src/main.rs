//! # envi-convert
//!
//! Command-line converter from multi-band satellite GeoTIFFs to ENVI.
//!
//! ## Usage
//!
//! ```bash
//! # EnMAP scene, written band interleaved by pixel next to the input
//! envi-convert convert enmap SCENE-SPECTRAL_IMAGE.TIF -m SCENE-METADATA.XML
//!
//! # Directory of Hyperion single-band files, band sequential
//! envi-convert convert hyperion EO1H0440342002212110PY/ -i bsq -o hyperion.hdr
//!
//! # Print the header a WorldView-3 conversion would write
//! envi-convert header worldview3 wv3.tif
//! ```

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

use envi_convert::io::{
    BandTable, EnMapAdapter, GdalDriver, HyperionAdapter, PixxelAdapter, ScaleTable,
    SensorAdapter, WorldView3Adapter,
};
use envi_convert::{Conversion, ConvertOptions, Converter, Interleave};

/// Exit status when the source or metadata path does not exist
const MISSING_INPUT_EXIT: i32 = 1;

/// envi-convert - Satellite GeoTIFF to ENVI converter
#[derive(Parser)]
#[command(name = "envi-convert")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SensorArg {
    Enmap,
    Hyperion,
    Pixxel,
    Worldview3,
}

#[derive(Args)]
struct SceneArgs {
    /// Sensor that produced the scene
    #[arg(value_enum)]
    sensor: SensorArg,

    /// GeoTIFF to convert (Hyperion also accepts a directory of band files)
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Scene metadata XML (EnMAP and Pixxel)
    #[arg(short, long, value_name = "METADATA")]
    metadata: Option<PathBuf>,

    /// Output interleave (bsq, bil or bip)
    #[arg(short, long, value_parser = parse_interleave)]
    interleave: Option<Interleave>,

    /// Z-score normalize the cube (Pixxel)
    #[arg(long)]
    normalize: bool,

    /// Fail when wavelength or FWHM counts differ from the band count
    #[arg(long)]
    strict: bool,

    /// TOML file with conversion options; flags given here override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a scene to an ENVI header and raw cube
    Convert {
        #[command(flatten)]
        scene: SceneArgs,

        /// Output header path (defaults to the source with a .hdr extension)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Print the ENVI header a conversion would write
    Header {
        #[command(flatten)]
        scene: SceneArgs,
    },
}

fn parse_interleave(value: &str) -> std::result::Result<Interleave, String> {
    value.parse().map_err(|e: envi_convert::EnviError| e.to_string())
}

/// Calibration tables, built once per process
struct Tables {
    hyperion: BandTable,
    hyperion_scaling: ScaleTable,
    worldview3: BandTable,
}

impl Tables {
    fn load() -> Self {
        Self {
            hyperion: BandTable::hyperion(),
            hyperion_scaling: ScaleTable::hyperion(),
            worldview3: BandTable::worldview3(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Convert { scene, output } => run_convert(&scene, output),
        Commands::Header { scene } => run_header(&scene),
    }
}

/// First input path given on the command line that does not exist
fn missing_input(scene: &SceneArgs) -> Option<&Path> {
    std::iter::once(scene.source.as_path())
        .chain(scene.metadata.as_deref())
        .find(|path| !path.exists())
}

/// Header path to write: `--output` if given, else the source with `.hdr`
fn header_target(output: Option<PathBuf>, conversion: &Conversion) -> PathBuf {
    output.unwrap_or_else(|| conversion.default_header_path())
}

fn resolve_options(scene: &SceneArgs) -> Result<ConvertOptions> {
    let mut options = match &scene.config {
        Some(path) => ConvertOptions::from_toml_file(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => ConvertOptions::default(),
    };

    if let Some(interleave) = scene.interleave {
        options.interleave = interleave;
    }
    options.normalize |= scene.normalize;
    options.strict_band_count |= scene.strict;
    Ok(options)
}

fn build_adapter<'a>(
    scene: &SceneArgs,
    options: &ConvertOptions,
    driver: &'a GdalDriver,
    tables: &'a Tables,
) -> Result<Box<dyn SensorAdapter + 'a>> {
    if let Some(path) = missing_input(scene) {
        eprintln!("File path {} does not exist", path.display());
        std::process::exit(MISSING_INPUT_EXIT);
    }

    let adapter: Box<dyn SensorAdapter + 'a> = match scene.sensor {
        SensorArg::Hyperion => Box::new(HyperionAdapter::new(
            driver,
            &scene.source,
            &tables.hyperion,
            &tables.hyperion_scaling,
        )),
        SensorArg::Worldview3 => {
            Box::new(WorldView3Adapter::new(driver, &scene.source, &tables.worldview3))
        }
        SensorArg::Enmap => {
            let Some(metadata) = &scene.metadata else {
                bail!("EnMAP conversion needs the scene metadata XML (--metadata)");
            };
            Box::new(EnMapAdapter::new(driver, &scene.source, metadata))
        }
        SensorArg::Pixxel => {
            let Some(metadata) = &scene.metadata else {
                bail!("Pixxel conversion needs the scene metadata XML (--metadata)");
            };
            Box::new(
                PixxelAdapter::new(driver, &scene.source, metadata)
                    .with_normalization(options.normalize),
            )
        }
    };
    Ok(adapter)
}

fn run_convert(scene: &SceneArgs, output: Option<PathBuf>) -> Result<()> {
    let options = resolve_options(scene)?;
    let driver = GdalDriver;
    let tables = Tables::load();
    let adapter = build_adapter(scene, &options, &driver, &tables)?;

    let started = Instant::now();
    info!("Converting {} to {}", scene.source.display(), options.interleave);

    let converter = Converter::new(options);
    let conversion = converter
        .run(adapter.as_ref())
        .with_context(|| format!("Failed to convert {}", scene.source.display()))?;

    let header_path = header_target(output, &conversion);
    let written = conversion
        .write(&converter.writer(), &header_path)
        .with_context(|| format!("Failed to write {}", header_path.display()))?;

    println!("Header: {}", written.header_path.display());
    println!("Raw:    {}", written.raw_path.display());
    println!("Conversion time: {:.3?}", started.elapsed());
    Ok(())
}

fn run_header(scene: &SceneArgs) -> Result<()> {
    let options = resolve_options(scene)?;
    let driver = GdalDriver;
    let tables = Tables::load();
    let adapter = build_adapter(scene, &options, &driver, &tables)?;

    let conversion = Converter::new(options)
        .run(adapter.as_ref())
        .with_context(|| format!("Failed to convert {}", scene.source.display()))?;
    print!("{}", conversion.header_text());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use envi_convert::{Dimensions, EnviMetadata, PixelCube};
    use ndarray::Array3;

    fn scene_args(args: &[&str]) -> (SceneArgs, Option<PathBuf>) {
        let cli = Cli::try_parse_from(args).expect("arguments should parse");
        match cli.command {
            Commands::Convert { scene, output } => (scene, output),
            Commands::Header { scene } => (scene, None),
        }
    }

    fn conversion_of(source: &str) -> Conversion {
        let dims = Dimensions::new(1, 1, 1);
        Conversion {
            metadata: EnviMetadata::builder().dimensions(dims).build().unwrap(),
            cube: PixelCube::new(Array3::zeros((1, 1, 1)), Interleave::Bip, &dims).unwrap(),
            source_path: PathBuf::from(source),
        }
    }

    #[test]
    fn test_missing_source_is_reported() {
        let (scene, _) = scene_args(&["envi-convert", "convert", "worldview3", "/no/such/scene.tif"]);
        assert_eq!(missing_input(&scene), Some(Path::new("/no/such/scene.tif")));
        assert_eq!(MISSING_INPUT_EXIT, 1);
    }

    #[test]
    fn test_missing_metadata_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("scene.tif");
        std::fs::write(&source, b"").unwrap();
        let source_arg = source.to_string_lossy().into_owned();

        let (scene, _) = scene_args(&["envi-convert", "header", "enmap", &source_arg]);
        assert_eq!(missing_input(&scene), None);

        let (scene, _) =
            scene_args(&["envi-convert", "header", "enmap", &source_arg, "-m", "/no/such/meta.xml"]);
        assert_eq!(missing_input(&scene), Some(Path::new("/no/such/meta.xml")));
    }

    #[test]
    fn test_default_header_path() {
        let (_, output) = scene_args(&["envi-convert", "convert", "pixxel", "/data/scene.tif"]);
        assert_eq!(
            header_target(output, &conversion_of("/data/scene.tif")),
            PathBuf::from("/data/scene.hdr")
        );

        let (_, output) =
            scene_args(&["envi-convert", "convert", "pixxel", "/data/scene.tif", "-o", "/out/x.hdr"]);
        assert_eq!(
            header_target(output, &conversion_of("/data/scene.tif")),
            PathBuf::from("/out/x.hdr")
        );
    }

    #[test]
    fn test_flags_override_options() {
        let (scene, _) =
            scene_args(&["envi-convert", "-v", "convert", "pixxel", "s.tif", "-i", "bsq", "--strict"]);
        let options = resolve_options(&scene).unwrap();
        assert_eq!(options.interleave, Interleave::Bsq);
        assert!(options.strict_band_count);
        assert!(!options.normalize);

        assert!(Cli::try_parse_from(["envi-convert", "convert", "pixxel", "s.tif", "-i", "bsx"]).is_err());
    }
}
