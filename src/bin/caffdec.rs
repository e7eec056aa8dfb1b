use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "caffdec", version, about = "Decode CIFF/CAFF files into raster images")]
struct Cli {
    /// Log decoder progress to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a bare CIFF image.
    Ciff(CiffArgs),
    /// Convert a CAFF animation (first frame, or every frame).
    Caff(CaffArgs),
    /// Print the decoded metadata as JSON.
    Info(InfoArgs),
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output path. Defaults to the input path plus the format extension.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Raster format to write.
    #[arg(long, value_enum, default_value_t = FormatChoice::Jpeg)]
    format: FormatChoice,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Args, Debug)]
struct CiffArgs {
    /// Input CIFF file.
    input: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct CaffArgs {
    /// Input CAFF file.
    input: PathBuf,

    #[command(flatten)]
    output: OutputArgs,

    /// Decode every block and write every frame (`<stem>-NNNN.<ext>` after the first).
    #[arg(long)]
    all_frames: bool,

    /// Reject credits dates that do not exist (e.g. 30 February).
    #[arg(long)]
    strict_dates: bool,
}

#[derive(Args, Debug)]
struct InfoArgs {
    /// Input CIFF or CAFF file; the format is detected from its leading bytes.
    input: PathBuf,

    /// Decode every block instead of stopping at the first frame.
    #[arg(long)]
    all_frames: bool,

    /// Reject credits dates that do not exist.
    #[arg(long)]
    strict_dates: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Jpeg,
    Png,
}

impl From<FormatChoice> for caffdec::OutputFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Jpeg => caffdec::OutputFormat::Jpeg,
            FormatChoice::Png => caffdec::OutputFormat::Png,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Ciff(args) => cmd_ciff(args),
        Command::Caff(args) => cmd_caff(args),
        Command::Info(args) => cmd_info(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "caffdec=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read input '{}'", path.display()))
}

fn decode_config(all_frames: bool, strict_dates: bool) -> caffdec::DecodeConfig {
    let mut cfg = caffdec::DecodeConfig::default();
    if all_frames {
        cfg = cfg.all_frames();
    }
    if strict_dates {
        cfg = cfg.strict_calendar();
    }
    cfg
}

fn encode_config(input: &Path, output: &OutputArgs) -> caffdec::EncodeConfig {
    let format = caffdec::OutputFormat::from(output.format);
    let out = output
        .out
        .clone()
        .unwrap_or_else(|| caffdec::default_output_path(input, format));
    let mut cfg = caffdec::EncodeConfig::new(out, format);
    cfg.overwrite = !output.no_overwrite;
    cfg
}

fn write_frames(
    decoded: &caffdec::Decoded,
    all_frames: bool,
    cfg: caffdec::EncodeConfig,
) -> anyhow::Result<()> {
    let mut sink = caffdec::RasterFileSink::new(cfg);
    caffdec::export_frames(decoded, all_frames, &mut sink)?;
    for path in sink.written() {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_ciff(args: CiffArgs) -> anyhow::Result<()> {
    let bytes = read_input(&args.input)?;
    let image = caffdec::decode_ciff(&bytes)
        .with_context(|| format!("decode CIFF '{}'", args.input.display()))?;

    let cfg = encode_config(&args.input, &args.output);
    write_frames(&caffdec::Decoded::Ciff(image), false, cfg)
}

fn cmd_caff(args: CaffArgs) -> anyhow::Result<()> {
    let bytes = read_input(&args.input)?;
    let config = decode_config(args.all_frames, args.strict_dates);
    let file = caffdec::decode_caff(&bytes, &config)
        .with_context(|| format!("decode CAFF '{}'", args.input.display()))?;

    let cfg = encode_config(&args.input, &args.output);
    write_frames(&caffdec::Decoded::Caff(file), args.all_frames, cfg)
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let bytes = read_input(&args.input)?;
    let format = caffdec::Format::detect(&bytes)
        .with_context(|| format!("'{}' is neither CIFF nor CAFF", args.input.display()))?;
    let config = decode_config(args.all_frames, args.strict_dates);
    let decoded = caffdec::decode(&bytes, format, &config)
        .with_context(|| format!("decode {:?} '{}'", format, args.input.display()))?;

    let summary = caffdec::Summary::from_decoded(&decoded);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
