//! Worm Gate entry point
//!
//! Native: plays one headless round from JSON asset files, either from a
//! scripted input file or with the autopilot steering.
//! WASM: the browser binding lives in `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;
    use std::fs;
    use std::path::Path;

    use worm_gate::Settings;
    use worm_gate::assets::{Level, SpriteIndex, Spriteset, Tileset};
    use worm_gate::platform::ticks::{FixedStepTicks, block_on};
    use worm_gate::sim::{InputSignal, Round, RoundResult, choose_direction};

    /// Simulated frame interval (ms)
    const FRAME_MS: f64 = 16.0;
    /// Autopilot gives up after this much simulated time (ms)
    const TIME_LIMIT_MS: f64 = 120_000.0;

    const USAGE: &str = "usage: worm-gate <level.json> <tileset.json> [seed] [script.json]";

    pub fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
        let (level_path, tileset_path) = match args {
            [level, tileset, ..] => (level, tileset),
            _ => return Err(USAGE.into()),
        };
        let seed = match args.get(2) {
            Some(seed) => seed.parse::<u64>()?,
            None => 0,
        };

        let level = Level::from_json(&fs::read_to_string(level_path)?)?;
        let tileset = Tileset::from_json(&fs::read_to_string(tileset_path)?)?;
        check_sprites(&tileset, Path::new(tileset_path))?;
        let settings = Settings::load();
        let mut round = Round::new(&level, &tileset, settings.tuning, seed)?;

        let result = match args.get(3) {
            Some(script_path) => {
                let script: Vec<(f64, InputSignal)> =
                    serde_json::from_str(&fs::read_to_string(script_path)?)?;
                log::info!("Replaying {} scripted inputs", script.len());
                let mut ticks = FixedStepTicks::new(FRAME_MS).with_script(script);
                Some(block_on(round.start(&mut ticks))?)
            }
            None => autopilot(&mut round)?,
        };

        for event in round.drain_events()? {
            log::debug!("Event: {:?}", event);
        }
        match result {
            Some(RoundResult::Won) => println!("won, {} targets left", round.targets_left()?),
            Some(RoundResult::Lost) => println!("lost, {} targets left", round.targets_left()?),
            None => println!("undecided after {}s", TIME_LIMIT_MS / 1000.0),
        }
        round.dispose()?;
        Ok(())
    }

    /// Spritesets are looked up as `<name>.json` next to the tileset file
    fn check_sprites(tileset: &Tileset, tileset_path: &Path) -> Result<(), Box<dyn Error>> {
        let dir = tileset_path.parent().unwrap_or(Path::new("."));
        let mut spritesets = Vec::new();
        for name in tileset.spriteset_files() {
            let path = dir.join(format!("{}.json", name));
            spritesets.push(Spriteset::from_json(&fs::read_to_string(&path)?)?);
        }
        tileset.check_sprites(&SpriteIndex::new(&spritesets))?;
        log::info!("{} spritesets checked", spritesets.len());
        Ok(())
    }

    /// Demo mode: greedy steering until the round ends or time runs out
    fn autopilot(round: &mut Round) -> Result<Option<RoundResult>, Box<dyn Error>> {
        round.begin()?;
        let mut now = 0.0;
        while now <= TIME_LIMIT_MS {
            if let Some(dir) = choose_direction(round)? {
                round.change_dir(dir)?;
            }
            for event in round.drain_events()? {
                log::info!("{:.0}ms: {:?}", now, event);
            }
            if let Some(result) = round.tick(now)?.result() {
                return Ok(Some(result));
            }
            now += FRAME_MS;
        }
        log::warn!("Autopilot ran out of time");
        Ok(None)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Worm Gate (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = headless::run(&args) {
        log::error!("{}", err);
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
