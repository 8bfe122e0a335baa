use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use seedmap::MapType;
use seedmap_tools::{config_file::load_config, logging, manifest::SeedManifest};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Pick a good seed for every map slot of a new save
    Create {
        /// Base seed of the save
        #[arg(short, long)]
        base_seed: u64,
        #[arg(short, long, default_value_t = 16)]
        slots: u32,
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..16))]
        map_type: Option<u8>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 64)]
        max_attempts: u32,
        /// Where to write the manifest JSON
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Regenerate every slot of a manifest and check its fingerprints
    Verify { path: PathBuf },
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose).context("Failed to install logger")?;

    match args.command {
        Command::Create { base_seed, slots, map_type, config, max_attempts, output } => {
            let config = load_config(config.as_deref())?;
            let manifest = SeedManifest::build(
                &config,
                base_seed,
                slots,
                map_type.map(MapType::new),
                max_attempts,
            )
            .context("Failed to build seed manifest")?;
            manifest
                .write_atomic(&output)
                .with_context(|| format!("Failed to write manifest: {}", output.display()))?;

            let rerolls: u32 = manifest.entries.iter().map(|entry| entry.rerolls).sum();
            println!("Wrote {} slots to {} ({rerolls} rerolls)", slots, output.display());
        }
        Command::Verify { path } => {
            let manifest = SeedManifest::load(&path)
                .with_context(|| format!("Failed to verify manifest: {}", path.display()))?;
            let slots = manifest.entries.len();
            println!("Manifest OK: {slots} slots, base seed {}", manifest.base_seed);
        }
    }

    Ok(())
}
