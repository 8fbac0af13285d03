use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use prnu_extract::logger;
use prnu_extract::prnu::{
    ExtractionConfig, ImageToResidualPipeline, InputFormat, ResidualFormat, TiffCompression,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "prnu-extract")]
#[command(version, about = "Extract PRNU sensor noise residuals from photographs", long_about = None)]
struct Cli {
    /// Input image file(s)
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory (defaults to each input's directory)
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Residual output format
    #[arg(long, value_enum, default_value_t = FormatArg::Tiff)]
    format: FormatArg,

    /// TIFF compression
    #[arg(long, value_enum, default_value_t = CompressionArg::None)]
    compression: CompressionArg,

    /// Input decoder selection
    #[arg(long, value_enum, default_value_t = InputArg::Auto)]
    input_format: InputArg,

    /// Reject images whose width or height exceeds this
    #[arg(long, value_name = "PIXELS")]
    max_dimension: Option<usize>,

    /// Enable debug logging with per-stage timings
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Tiff,
    Text,
}

#[derive(Clone, Copy, ValueEnum)]
enum CompressionArg {
    None,
    Lzw,
    DeflateFast,
    Deflate,
    DeflateBest,
}

#[derive(Clone, Copy, ValueEnum)]
enum InputArg {
    Auto,
    Standard,
    Raw,
}

impl Cli {
    fn config(&self) -> ExtractionConfig {
        ExtractionConfig::builder()
            .output_format(match self.format {
                FormatArg::Tiff => ResidualFormat::Tiff,
                FormatArg::Text => ResidualFormat::Text,
            })
            .compression(match self.compression {
                CompressionArg::None => TiffCompression::None,
                CompressionArg::Lzw => TiffCompression::Lzw,
                CompressionArg::DeflateFast => TiffCompression::DeflateFast,
                CompressionArg::Deflate => TiffCompression::DeflateBalanced,
                CompressionArg::DeflateBest => TiffCompression::DeflateBest,
            })
            .input_format(match self.input_format {
                InputArg::Auto => InputFormat::Auto,
                InputArg::Standard => InputFormat::Standard,
                InputArg::Raw => InputFormat::Raw,
            })
            .max_dimension(self.max_dimension)
            .build()
    }
}

/// `<dir>/<stem>.prnu.<ext>`
fn output_path(input: &Path, out_dir: Option<&Path>, format: ResidualFormat) -> anyhow::Result<PathBuf> {
    let stem = input
        .file_stem()
        .with_context(|| format!("{} has no file name", input.display()))?;
    let extension = match format {
        ResidualFormat::Tiff => "prnu.tiff",
        ResidualFormat::Text => "prnu.txt",
    };
    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    Ok(dir.join(format!("{}.{}", stem.to_string_lossy(), extension)))
}

/// Output path per input, in order. Inputs without a file name, and inputs
/// whose output would overwrite an earlier input's, get an error instead.
fn plan_outputs(
    inputs: &[PathBuf],
    out_dir: Option<&Path>,
    format: ResidualFormat,
) -> Vec<anyhow::Result<PathBuf>> {
    let mut taken = HashSet::new();
    inputs
        .iter()
        .map(|input| {
            let output = output_path(input, out_dir, format)?;
            if !taken.insert(output.clone()) {
                bail!(
                    "{} would overwrite the residual of an earlier input",
                    output.display()
                );
            }
            Ok(output)
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(if cli.verbose { "debug" } else { "info" });

    info!("Starting prnu-extract...");

    if let Some(dir) = &cli.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }

    let config = cli.config();
    info!("Output format: {:?}", config.output_format);
    info!("Compression: {:?}", config.compression);

    let mut pipeline = ImageToResidualPipeline::new(config);
    let mut failures = 0usize;

    let outputs = plan_outputs(&cli.inputs, cli.out_dir.as_deref(), pipeline.config().output_format);

    for (input, output) in cli.inputs.iter().zip(outputs) {
        let output = match output {
            Ok(output) => output,
            Err(e) => {
                error!(input = %input.display(), "Skipped: {:#}", e);
                failures += 1;
                continue;
            }
        };
        match pipeline.convert_file(input, &output) {
            Ok((width, height)) => info!(
                input = %input.display(),
                output = %output.display(),
                width,
                height,
                "Residual written"
            ),
            Err(e) => {
                error!(input = %input.display(), "Extraction failed: {}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} images failed", failures, cli.inputs.len());
    }

    info!("Processed {} images", cli.inputs.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_next_to_input() {
        let outputs = plan_outputs(&[PathBuf::from("shots/a.jpg")], None, ResidualFormat::Tiff);
        assert_eq!(outputs[0].as_ref().unwrap(), &PathBuf::from("shots/a.prnu.tiff"));
    }

    #[test]
    fn test_missing_file_name_does_not_stop_batch() {
        let inputs = [PathBuf::from("a.jpg"), PathBuf::from("/"), PathBuf::from("b.png")];
        let outputs = plan_outputs(&inputs, Some(Path::new("out")), ResidualFormat::Text);

        assert_eq!(outputs.len(), 3);
        assert_eq!(outputs[0].as_ref().unwrap(), &PathBuf::from("out/a.prnu.txt"));
        assert!(outputs[1].is_err());
        assert_eq!(outputs[2].as_ref().unwrap(), &PathBuf::from("out/b.prnu.txt"));
    }

    #[test]
    fn test_same_stem_in_out_dir_is_not_overwritten() {
        let inputs = [PathBuf::from("day1/img.jpg"), PathBuf::from("day2/img.png")];

        let outputs = plan_outputs(&inputs, Some(Path::new("out")), ResidualFormat::Tiff);
        assert!(outputs[0].is_ok());
        assert!(outputs[1].is_err());

        let outputs = plan_outputs(&inputs, None, ResidualFormat::Tiff);
        assert!(outputs.iter().all(|o| o.is_ok()));
    }
}
