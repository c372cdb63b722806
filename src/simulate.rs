use hashbrown::HashMap;
use rand::{rngs::StdRng, SeedableRng};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    config::SimulationConfig,
    error::Result,
    ludo::{Color, Die, Game, GameOutcome, Geometry},
};

/// How a single headless game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    pub rolls: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimulationReport {
    pub games: u32,
    pub wins: HashMap<Color, u32>,
    /// Games that hit the roll cap without a winner.
    pub unfinished: u32,
    pub total_rolls: u64,
}

impl SimulationReport {
    pub fn win_rate(&self, color: Color) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins.get(&color).copied().unwrap_or(0) as f32 / self.games as f32 * 100.0
    }

    fn record(&mut self, record: GameRecord) {
        self.games += 1;
        self.total_rolls += record.rolls as u64;
        match record.outcome {
            GameOutcome::Win(color) => *self.wins.entry(color).or_insert(0) += 1,
            GameOutcome::Ongoing => self.unfinished += 1,
        }
    }
}

/// Plays one game to the end with every animation settled instantly.
/// Stops after `max_rolls` rolls if nobody has won by then.
pub fn play_game(players: &[Color], seed: u64, max_rolls: u32) -> Result<GameRecord> {
    let mut game = Game::new(players, Geometry::default())?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rolls = 0;

    while rolls < max_rolls && game.outcome() == GameOutcome::Ongoing {
        if game.roll(Die::roll(&mut rng)) {
            rolls += 1;
        }
        game.settle();
    }

    Ok(GameRecord {
        outcome: game.outcome(),
        rolls,
    })
}

/// Plays `config.games` games in parallel. Game `n` is seeded with `config.seed + n`,
/// so a batch is reproducible regardless of scheduling.
pub fn run_batch(players: &[Color], config: &SimulationConfig) -> Result<SimulationReport> {
    let records = (0..config.games)
        .into_par_iter()
        .map(|n| play_game(players, config.seed.wrapping_add(n as u64), config.max_rolls))
        .collect::<Result<Vec<_>>>()?;

    let mut report = SimulationReport::default();
    for record in records {
        report.record(record);
    }
    log::info!(
        "played {} games, {} unfinished, {} rolls",
        report.games,
        report.unfinished,
        report.total_rolls
    );
    Ok(report)
}
