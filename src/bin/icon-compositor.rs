use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use icon_compositor::{Composition, Design, ExportConfig};
use tracing::{debug, info};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "icon-compositor", version, about)]
struct Cli {
    /// Built-in design to render.
    #[arg(long, value_enum)]
    design: Option<Design>,

    /// Composition JSON to render instead of a built-in design.
    #[arg(long, value_name = "FILE", conflicts_with = "design")]
    composition: Option<PathBuf>,

    /// Directory the PNG files are written to.
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Canvas size in pixels for built-in designs.
    #[arg(long)]
    size: Option<u32>,

    /// Export configuration JSON. Flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Smooth shape edges.
    #[arg(long)]
    anti_alias: bool,

    /// Print the composition as JSON and exit without rendering.
    #[arg(long)]
    dump_json: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = resolve_config(&cli)?;
    debug!(?config, "resolved export configuration");

    let composition = match &cli.composition {
        Some(path) => Composition::load(path)
            .with_context(|| format!("load composition '{}'", path.display()))?,
        None => config
            .design
            .composition(config.size)
            .with_context(|| format!("build design '{}'", config.design.name()))?,
    };

    if cli.dump_json {
        println!("{}", composition.to_json_pretty()?);
        return Ok(());
    }

    info!(
        "Rendering '{}' ({}x{})",
        composition.name, composition.size, composition.size
    );
    let report = icon_compositor::export(&composition, &config)
        .with_context(|| format!("export icons to '{}'", config.out_dir.display()))?;
    debug!(icon = %report.icon.display(), foreground = %report.foreground.display(), "export finished");

    Ok(())
}

fn resolve_config(cli: &Cli) -> anyhow::Result<ExportConfig> {
    let mut config = match &cli.config {
        Some(path) => ExportConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => ExportConfig::default(),
    };

    if let Some(design) = cli.design {
        config.design = design;
    }
    if let Some(out_dir) = &cli.out_dir {
        config.out_dir = out_dir.clone();
    }
    if let Some(size) = cli.size {
        config.size = size;
    }
    config.anti_alias |= cli.anti_alias;

    config.validate()?;
    Ok(config)
}
