//! Headless tank duel
//!
//! Usage: `tank_combat [config.toml|config.ron]`

use combat_engine::config::Config;
use combat_engine::foundation::logging;
use tank_combat::{GameConfig, GameError, Match};

fn main() -> Result<(), GameError> {
    logging::init_with_level("info");

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load_from_file(&path)?,
        None => {
            log::warn!("No configuration given, using built-in defaults");
            GameConfig::default()
        }
    };

    let mut game = Match::new(&config)?;
    let summary = game.run();

    for (player, hits) in summary.hits_by_player.iter().enumerate() {
        log::info!("Player {}: {} hits", player, hits);
    }
    Ok(())
}
