use mirror_room_json::save_experiment;
use mirror_room_random::{
    rand::{self, rngs::StdRng, Rng, SeedableRng},
    random_experiment,
};

use std::{env, error::Error};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut args = env::args().skip(1);

    let file_path = args
        .next()
        .ok_or("please provide a path to serialize the experiment json data")?;

    let num_walls = args.next().and_then(|arg| arg.parse().ok());

    let seed = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| rand::thread_rng().gen());

    log::info!("seed: {seed}");

    let mut rng = StdRng::seed_from_u64(seed);
    let num_walls = num_walls.unwrap_or_else(|| rng.gen_range(mirror_room::Room::REGULAR_SIDES));

    save_experiment(file_path, &random_experiment(num_walls, &mut rng))
}
