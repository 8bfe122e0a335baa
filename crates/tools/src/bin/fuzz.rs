use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use seedmap::{BadMapReason, MapGenerator, MapType};
use seedmap_tools::{config_file::load_config, logging};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 10_000)]
    iterations: u32,
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

fn random_map_type(rng: &mut ChaCha8Rng) -> Option<MapType> {
    if rng.next_u32() % 2 == 0 { None } else { Some(MapType::new(rng.next_u32() as u8)) }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    let generator = MapGenerator::try_new(load_config(args.config.as_deref())?)?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    println!("Fuzzing {} maps from seed {}...", args.iterations, args.seed);
    let (mut path_hits, mut exhausted) = (0_u32, 0_u32);
    for _ in 0..args.iterations {
        let seed = rng.next_u32();
        let map_type = random_map_type(&mut rng);
        let map = generator.generate(seed, map_type);

        if generator.generate(seed, map_type).fingerprint() != map.fingerprint() {
            bail!("seed {seed} ({map_type:?}) is not deterministic");
        }
        match map.bad_reason {
            Some(BadMapReason::PathHitEntity { .. }) => path_hits += 1,
            Some(BadMapReason::PlacementExhausted { .. }) => exhausted += 1,
            None => {
                if let Err(violation) = map.check_invariants(generator.config()) {
                    bail!("seed {seed} ({map_type:?}) broke an invariant: {violation}");
                }
            }
        }
    }

    let good = args.iterations - path_hits - exhausted;
    println!("Good: {good}  Path hits: {path_hits}  Exhausted placements: {exhausted}");
    Ok(())
}
