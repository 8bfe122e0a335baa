use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use seedmap::{MapGenerator, MapType, find_good_map};
use seedmap_tools::{config_file::load_config, logging, render::render_ascii, report::MapReport};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed of the generation attempt
    #[arg(short, long, default_value_t = 0)]
    seed: u32,
    /// Exit mask (bit 0 north, 1 west, 2 south, 3 east); rolled when omitted
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..16))]
    map_type: Option<u8>,
    /// JSON file overriding generator settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Step to the following seeds until a good map appears
    #[arg(short, long)]
    regenerate: bool,
    #[arg(long, default_value_t = 64)]
    max_attempts: u32,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose).context("Failed to install logger")?;

    let generator = MapGenerator::try_new(load_config(args.config.as_deref())?)
        .context("Invalid generator config")?;
    let map_type = args.map_type.map(MapType::new);

    let (map, discarded) = if args.regenerate {
        let Some(found) = find_good_map(&generator, args.seed, map_type, args.max_attempts) else {
            bail!("no good map within {} attempts from seed {}", args.max_attempts, args.seed);
        };
        (found.map, found.discarded)
    } else {
        (generator.generate(args.seed, map_type), 0)
    };

    match args.format {
        Format::Text => {
            print!("{}", render_ascii(&map));
            println!("Seed: {} (final {})", map.seed, map.final_seed);
            println!("Size: {}x{}  Map type: {:#06b}", map.width, map.height, map.map_type.bits());
            if discarded > 0 {
                println!("Discarded: {discarded}");
            }
            match map.bad_reason {
                Some(reason) => println!("Bad map: {reason}"),
                None => println!("Fingerprint: {:016x}", map.fingerprint()),
            }
        }
        Format::Json => {
            let json = serde_json::to_string_pretty(&MapReport::new(&map, discarded))
                .context("Failed to serialize map report")?;
            println!("{json}");
        }
    }

    Ok(())
}
