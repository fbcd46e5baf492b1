//! StackPlus - stack shrinking blocks as high as you can
//!
//! Headless runner: loads the configured level and lets the autopilot play
//! one round at a fixed frame rate, logging what happens.

use stackplus::app::{AppState, Page, PageEvent};
use stackplus::config::AppConfig;
use stackplus::systems::{Autopilot, SimulationSystem};
use stackplus_core::{
    CatalogError, GameSession, LevelTable, RonScoreFile, ScoreStore, ShapeCatalog, TickEvents,
};

const FRAME_DT: f64 = 1.0 / 60.0;

fn main() {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    if let Err(e) = run(&config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = match &config.catalog.path {
        Some(path) => ShapeCatalog::load(path)?,
        None => ShapeCatalog::builtin()?,
    };
    let levels = LevelTable::builtin();
    for shape in levels.missing_shapes(&catalog) {
        log::warn!("Level '{}' has no shape in the catalog", shape);
    }
    let mut scores = RonScoreFile::open(&config.scores.path)?;

    let mut app = AppState::new(config.settings.clone());
    app.handle(PageEvent::Loaded, &levels, &scores);
    app.handle(PageEvent::OpenLevels, &levels, &scores);

    if !app.handle(PageEvent::Play(config.game.level.clone()), &levels, &scores) {
        if levels.get(&config.game.level).is_none() {
            return Err(CatalogError::NotFound(config.game.level.clone()).into());
        }
        let fallback = levels
            .unlocked(&scores)
            .map(|level| level.shape.clone())
            .find(|shape| catalog.contains(shape))
            .ok_or("no playable level")?;
        log::warn!("Playing '{}' instead of '{}'", fallback, config.game.level);
        app.handle(PageEvent::Play(fallback), &levels, &scores);
    }

    let shape = match app.page() {
        Page::Game(shape) => shape.clone(),
        page => return Err(format!("expected a game page, on {:?}", page).into()),
    };

    let polygon = catalog.get(&shape)?;
    log::info!(
        "Playing {} ({} vertices, area {:.2})",
        levels.display_name(&shape),
        polygon.len(),
        polygon.area()
    );

    let session_config = config.game.to_session_config(app.settings());
    let best = scores.high_score(&shape);
    let mut session = match config.debug.seed {
        Some(seed) => GameSession::with_seed(shape.as_str(), polygon, session_config, best, seed),
        None => GameSession::new(shape.as_str(), polygon, session_config, best),
    };

    let mut simulation = SimulationSystem::fixed(FRAME_DT);
    let mut pilot = Autopilot::new(config.debug.autoplay_yaw_error, config.debug.seed);

    let mut frames = 0;
    while !session.is_over() && frames < config.debug.max_frames {
        let input = pilot.input(&session);
        let result = simulation.update(&mut session, &mut scores, input);
        frames += 1;

        if result.events.contains(TickEvents::STACKED) && !session.is_over() {
            log::info!(
                "Stacked block {} (area {:.3})",
                session.score(),
                session.control().polygon().area()
            );
        }
        if result.events.contains(TickEvents::TIMER_WARNING) {
            log::debug!("Placement timer running low");
        }
        if result.new_record {
            log::info!("New high score on {}: {}", levels.display_name(&shape), session.score());
        }
    }

    if !session.is_over() {
        log::info!("Stopping after {} frames", frames);
    }
    log::info!(
        "Round over: score {}, best {}, {:.1}s played",
        session.score(),
        scores.high_score(&shape),
        f64::from(frames) * FRAME_DT
    );

    app.handle(PageEvent::Back, &levels, &scores);
    app.handle(PageEvent::Quit, &levels, &scores);
    Ok(())
}
