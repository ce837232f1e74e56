//! `inp2rad`: convert an Abaqus/CalculiX `.inp` deck into OpenRadioss
//! starter (`<stem>_0000.rad`) and engine (`<stem>_0001.rad`) decks.
//!
//! Set `RUST_LOG=info` (or `debug`) for progress output.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};

use mesh_skin::algs::boundary::NonManifoldHandling;
use mesh_skin::config::ConverterConfig;
use mesh_skin::convert::convert;
use mesh_skin::io::MeshReader;
use mesh_skin::io::inp::{InpReadOptions, InpReader};
use mesh_skin::io::radioss::RadiossWriter;
use mesh_skin::topology::point::NodeId;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NonManifold {
    /// Log the face and leave it out of the skin
    Warn,
    /// Abort the conversion
    Error,
}

impl From<NonManifold> for NonManifoldHandling {
    fn from(mode: NonManifold) -> Self {
        match mode {
            NonManifold::Warn => NonManifoldHandling::Warn,
            NonManifold::Error => NonManifoldHandling::Error,
        }
    }
}

/// Convert a tetrahedral .inp mesh into OpenRadioss decks with contact skins
#[derive(Parser, Debug)]
#[command(name = "inp2rad", version, about, long_about = None)]
struct Cli {
    /// Input .inp deck
    #[arg(name = "INPUT")]
    input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// JSON converter configuration (part roles, deck settings)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Drop skin faces touching this node (repeatable)
    #[arg(long = "exclude-node", value_name = "ID")]
    exclude_nodes: Vec<u64>,

    /// Handling of faces shared by more than two elements
    #[arg(long, value_enum)]
    non_manifold: Option<NonManifold>,

    /// Check that elements and element sets only reference defined entities
    #[arg(long)]
    strict: bool,
}

fn output_paths(input: &Path, dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let Some(stem) = input.file_stem().and_then(|s| s.to_str()) else {
        bail!("cannot derive an output name from {}", input.display());
    };
    Ok((
        dir.join(format!("{stem}_0000.rad")),
        dir.join(format!("{stem}_0001.rad")),
    ))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ConverterConfig::from_path(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => ConverterConfig::default(),
    };
    config
        .boundary
        .excluded_nodes
        .extend(cli.exclude_nodes.iter().copied().map(NodeId::new));
    if let Some(mode) = cli.non_manifold {
        config.boundary.non_manifold = mode.into();
    }

    let reader = InpReader::new(InpReadOptions {
        validate_references: cli.strict,
    });
    let file = File::open(&cli.input)
        .with_context(|| format!("opening {}", cli.input.display()))?;
    let mesh = reader
        .read(file)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let conversion = convert(&mesh, &config).context("extracting skins")?;
    if conversion.parts.is_empty() {
        log::warn!("no element group found; the starter deck will contain nodes only");
    }

    let (starter_path, engine_path) = output_paths(&cli.input, &cli.output_dir)?;
    let writer = RadiossWriter::from_config(&config);

    let starter = File::create(&starter_path)
        .with_context(|| format!("creating {}", starter_path.display()))?;
    writer
        .write_starter(BufWriter::new(starter), &mesh, &conversion)
        .with_context(|| format!("writing {}", starter_path.display()))?;
    log::info!("wrote {}", starter_path.display());

    let engine = File::create(&engine_path)
        .with_context(|| format!("creating {}", engine_path.display()))?;
    writer
        .write_engine(BufWriter::new(engine))
        .with_context(|| format!("writing {}", engine_path.display()))?;
    log::info!("wrote {}", engine_path.display());

    Ok(())
}
