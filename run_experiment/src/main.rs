use mirror_room::outline;
use mirror_room_json::{load_experiment, serde_json, JsonSer};

use std::error::Error;

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logger();

    let mut args = std::env::args().skip(1);

    let file_path = args
        .next()
        .ok_or("expected a file path as a first argument.")?;

    let mut experiment = load_experiment(&file_path)?;

    if let Some(arg) = args.next() {
        experiment.max_reflections = arg
            .parse()
            .map_err(|_| format!("expected a number as second argument, got {arg:?}"))?;
    }

    for (i, wall) in experiment.room.walls().iter().enumerate() {
        log::info!("{i}: {wall}");
    }

    let path = experiment.run();

    log::info!(
        "ray fired from {:?} at {}° bounced {} times",
        experiment.origin,
        experiment.angle.degrees(),
        path.bounces()
    );
    log::debug!(
        "{} lines to draw",
        outline(&(&experiment.room, &path)).len()
    );

    println!("{}", serde_json::to_string_pretty(&path.to_json())?);

    Ok(())
}
