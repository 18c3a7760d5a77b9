use anyhow::{Result, bail};
use cave_core::mapgen::regions::is_single_region;
use cave_core::{
    Cave, CaveConfig, CaveGenerator, CellKind, ExitPlacement, GenerationError, RegionRetention,
    path_distance,
};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_config(rng: &mut ChaCha8Rng) -> CaveConfig {
    let neighborhood_radius = choose(rng, &[1_u32, 1, 2]);
    let (floors_to_wall, walls_to_floor) =
        if neighborhood_radius == 1 { choose(rng, &[(5, 3), (5, 4), (6, 3)]) } else { (13, 10) };
    CaveConfig {
        width: choose(rng, &[10_i64, 16, 24, 40, 64]),
        height: choose(rng, &[10_i64, 12, 20, 32]),
        wall_birth_probability: choose(rng, &[0.35, 0.4, 0.45, 0.5]),
        floors_to_wall_conversion: floors_to_wall,
        walls_to_floor_conversion: walls_to_floor,
        number_of_steps: choose(rng, &[0_u32, 3, 4, 6]),
        neighborhood_radius,
        connected_cave: choose(rng, &[true, true, false]),
        region_retention: choose(rng, &[RegionRetention::Largest, RegionRetention::Random]),
        exit_placement: choose(
            rng,
            &[ExitPlacement::RandomSampling { attempts: 64 }, ExitPlacement::FarthestQuartile],
        ),
        min_distance_between_entry_and_exit: choose(rng, &[3_u32, 6, 10]),
        ..CaveConfig::default()
    }
}

fn check_invariants(config: &CaveConfig, cave: &Cave) -> Result<()> {
    for pos in cave.grid.positions() {
        if cave.grid.is_border(pos) && cave.kind_at(pos) != CellKind::Wall {
            bail!("border cell {pos:?} is not a wall");
        }
    }
    if config.connected_cave && !is_single_region(&cave.grid) {
        bail!("connected cave has more than one floor region");
    }
    match path_distance(&cave.grid, cave.entrance, cave.exit) {
        Some(distance) if distance >= config.min_distance_between_entry_and_exit => Ok(()),
        Some(distance) => bail!("entrance/exit path length {distance} is too short"),
        None => bail!("exit is unreachable from the entrance"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting cave fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut failures = 0_u32;

    for run in 0..args.runs {
        let config = random_config(&mut rng);
        let cave_seed = rng.next_u64();
        match CaveGenerator::new(config.clone()).generate(cave_seed) {
            Ok(cave) => {
                if let Err(error) = check_invariants(&config, &cave) {
                    bail!("Invariant failed on run {run} (seed {cave_seed}, {config:?}): {error}");
                }
            }
            Err(GenerationError::GenerationFailed { attempts, last_failure }) => {
                warn!("run {run}: gave up after {attempts} attempts ({last_failure})");
                failures += 1;
            }
            Err(error) => bail!("run {run}: unexpected configuration error: {error}"),
        }
    }

    println!("Fuzzing completed: {} runs, {} exhausted their attempt budget.", args.runs, failures);
    Ok(())
}
