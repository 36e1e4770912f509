use clap::Parser;
use contagion_config::{
    load_config, ConfigError, PopulationSettings, SenderConfig, SenderType, SerializerType,
    TransmissionSettings,
};
use contagion_core::{Bounds, Engine, EngineError, EngineOptions, TickOutcome};
use contagion_simulation::{populate, Census, MaskTable, PartyScene, TransmissionPolicy};
use contagion_transport::{
    BinarySerializer, FileSender, JsonSerializer, NullSender, Sender, Serializer, StdioSender,
    StreamSurface, TransportError,
};
use hdrhistogram::Histogram;
use log::{debug, error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;
use std::sync::atomic::Ordering;
use std::time::Instant;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the simulation configuration file (.json or .toml)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Override the seed from the configuration file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Present frames as fast as they are produced
    #[arg(long)]
    unpaced: bool,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("could not install Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("could not create frame time histogram: {0}")]
    Histogram(#[from] hdrhistogram::CreationError),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), RunError> {
    let config = load_config(&args.config)?;
    info!("Using configuration from {}", args.config.display());

    let mut options = EngineOptions::default();
    options.apply(config.engine.iter().map(|(key, value)| (key.as_str(), *value)))?;

    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    info!("Seed {}", seed);
    let rng = ChaCha8Rng::seed_from_u64(seed);

    let bounds = Bounds::new(config.world.width, config.world.height);
    let mut engine = Engine::new(bounds, config.framerate, options, Box::new(rng));

    let census = census_from(&config.population);
    let policy: Rc<dyn TransmissionPolicy> = Rc::new(mask_table_from(&config.transmission));
    populate(&mut engine, &census, &policy, config.backdrop);
    // Activate the initial population so the first frame already shows it.
    let summary = engine.commit();
    info!("{} people at the party ({} agents)", census.population(), summary.added);

    let mut scene = PartyScene::new(census, bounds);
    if config.backdrop {
        scene = scene.without_room();
    }

    let serializer = create_serializer(config.render.serializer);
    let sender = create_sender(&config.render.sender)?;
    let mut surface = StreamSurface::new(serializer, sender);
    if args.unpaced {
        surface = surface.without_pacing();
    }
    let closed = surface.close_handle();
    ctrlc::set_handler(move || closed.store(true, Ordering::SeqCst))?;

    info!("Running simulation at {} FPS...", config.framerate);
    let mut frame_times = Histogram::<u64>::new(3)?;

    while !engine.is_over() {
        if tick_limit_reached(args.ticks, engine.tick_count()) {
            engine.set_game_over();
            break;
        }

        let frame_start = Instant::now();
        match engine.tick(&mut surface, &scene)? {
            TickOutcome::Rendered => {}
            TickOutcome::TornDown => info!("Output closed, stopping"),
            TickOutcome::Halted => break,
        }
        frame_times.saturating_record(frame_start.elapsed().as_micros() as u64);

        let tally = engine.tally();
        if tally.affected_this_tick > 0 {
            debug!(
                "tick {}: {} newly affected, {} in total",
                engine.tick_count(),
                tally.affected_this_tick,
                tally.affected
            );
        }
    }

    info!(
        "Finished after {} ticks: {} of {} susceptible people affected",
        engine.tick_count(),
        engine.tally().affected,
        scene.census().susceptible()
    );
    if frame_times.len() > 0 {
        info!(
            "Frame time (us): p50 {} p90 {} p99 {} max {}",
            frame_times.value_at_quantile(0.5),
            frame_times.value_at_quantile(0.9),
            frame_times.value_at_quantile(0.99),
            frame_times.max()
        );
    }
    Ok(())
}

fn tick_limit_reached(limit: Option<u64>, ticks_run: u64) -> bool {
    limit.map_or(false, |limit| ticks_run >= limit)
}

fn census_from(population: &PopulationSettings) -> Census {
    Census {
        masked_susceptible: population.masked_susceptible,
        unmasked_susceptible: population.unmasked_susceptible,
        contagious: population.contagious,
        contagious_masked: population.contagious_masked,
    }
}

fn mask_table_from(settings: &TransmissionSettings) -> MaskTable {
    MaskTable {
        unmasked_to_unmasked: settings.unmasked_to_unmasked,
        unmasked_to_masked: settings.unmasked_to_masked,
        masked_to_unmasked: settings.masked_to_unmasked,
        masked_to_masked: settings.masked_to_masked,
    }
}

fn create_serializer(serializer_type: SerializerType) -> Box<dyn Serializer> {
    match serializer_type {
        SerializerType::Json => Box::new(JsonSerializer),
        SerializerType::Binary => Box::new(BinarySerializer),
    }
}

fn create_sender(config: &SenderConfig) -> Result<Box<dyn Sender>, RunError> {
    let sender: Box<dyn Sender> = match (config.sender_type, &config.path) {
        (SenderType::Stdio, _) => Box::new(StdioSender::new()),
        (SenderType::Null, _) => Box::new(NullSender::default()),
        (SenderType::File, Some(path)) => {
            info!("Writing frames to {}", path.display());
            Box::new(FileSender::create(path)?)
        }
        (SenderType::File, None) => {
            let message = "The 'file' sender needs a 'path'.".to_string();
            return Err(ConfigError::Validation(message).into());
        }
    };
    Ok(sender)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn census_mirrors_population() {
        let population = PopulationSettings {
            masked_susceptible: 4,
            unmasked_susceptible: 6,
            contagious: 2,
            contagious_masked: true,
        };
        let census = census_from(&population);
        assert_eq!(census.population(), population.total());
        assert!(census.contagious_masked);
    }

    #[test]
    fn tick_limit_is_checked_before_the_first_tick() {
        assert!(tick_limit_reached(Some(0), 0));
        assert!(!tick_limit_reached(Some(2), 1));
        assert!(tick_limit_reached(Some(2), 2));
        assert!(!tick_limit_reached(None, 1_000));
    }

    #[test]
    fn mask_table_defaults_match_settings_defaults() {
        assert_eq!(mask_table_from(&TransmissionSettings::default()), MaskTable::default());
    }

    #[test]
    fn file_sender_without_path_is_an_error() {
        let config = SenderConfig { sender_type: SenderType::File, path: None };
        assert!(matches!(create_sender(&config), Err(RunError::Config(_))));
    }
}
