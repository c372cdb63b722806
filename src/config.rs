use std::{fs, io, path::{Path, PathBuf}, time::Duration};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    ludo::{Color, Geometry},
};

pub const DEFAULT_CONFIG_PATH: &str = "ludo.toml";

/// Environment variable overriding [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_PATH_VAR: &str = "LUDO_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seating order. The first color rolls first.
    pub players: Vec<Color>,
    pub window: WindowConfig,
    pub board: Geometry,
    pub motion: MotionConfig,
    pub assets: AssetConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Distance a token covers in one frame at `target_fps`.
    pub speed: f32,
    pub target_fps: f64,
    /// Scale the per-frame distance by the real frame time.
    pub scale_by_elapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub board: PathBuf,
    /// Horizontal sheet of six equally wide dice faces.
    pub dice: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Play `games` games without a window and exit.
    pub headless: bool,
    pub games: u32,
    pub seed: u64,
    pub max_rolls: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            players: vec![Color::Red, Color::Green],
            window: WindowConfig::default(),
            board: Geometry::default(),
            motion: MotionConfig::default(),
            assets: AssetConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 720,
            height: 720,
            title: "Ludo - Red vs Green (4 Tokens)".to_string(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        MotionConfig {
            speed: 3.0,
            target_fps: 60.0,
            scale_by_elapsed: true,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        AssetConfig {
            board: PathBuf::from("resource/ludo.jpg"),
            dice: PathBuf::from("resource/dice.png"),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            headless: false,
            games: 1000,
            seed: 0,
            max_rolls: 10_000,
        }
    }
}

impl MotionConfig {
    /// Distance to move tokens this frame given the time since the last one.
    pub fn step(&self, elapsed: Duration) -> f32 {
        if self.scale_by_elapsed {
            self.speed * (self.target_fps * elapsed.as_secs_f64()) as f32
        } else {
            self.speed
        }
    }
}

impl Config {
    pub fn parse(source: &str, path: &Path) -> Result<Self> {
        let config: Config = toml::from_str(source).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(source) => Config::parse(&source, path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no config at {path:?}, using defaults");
                Ok(Config::default())
            }
            Err(source) => Err(Error::ConfigRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Path named by [`CONFIG_PATH_VAR`], or [`DEFAULT_CONFIG_PATH`].
    pub fn path_from_env() -> PathBuf {
        std::env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn validate(&self) -> Result<()> {
        if !Color::is_valid_seating(&self.players) {
            return Err(Error::InvalidPlayers(self.players.clone()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::InvalidConfig("window size must be non-zero".to_string()));
        }
        if !(self.board.cell > 0.0) {
            return Err(Error::InvalidConfig(format!("cell size {} must be positive", self.board.cell)));
        }
        if !(self.motion.speed > 0.0) || !(self.motion.target_fps > 0.0) {
            return Err(Error::InvalidConfig("motion speed and target_fps must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = Config::parse("", Path::new("ludo.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.board, Geometry { cell: 45.0, offset: 35.0 });
        assert_eq!(config.motion.speed, 3.0);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let source = r#"
            players = ["blue", "yellow", "red"]

            [board]
            cell = 40.0

            [motion]
            scale_by_elapsed = false

            [simulation]
            headless = true
            games = 12
        "#;
        let config = Config::parse(source, Path::new("ludo.toml")).unwrap();
        assert_eq!(config.players, vec![Color::Blue, Color::Yellow, Color::Red]);
        assert_eq!(config.board, Geometry { cell: 40.0, offset: 35.0 });
        assert!(!config.motion.scale_by_elapsed);
        assert_eq!(config.motion.target_fps, 60.0);
        assert!(config.simulation.headless);
        assert_eq!(config.simulation.games, 12);
        assert_eq!(config.simulation.max_rolls, 10_000);
        assert_eq!(config.window.width, 720);
    }

    #[test]
    fn test_rejects_bad_values() {
        let path = Path::new("ludo.toml");
        assert!(matches!(Config::parse("players = [\"red\"]", path), Err(Error::InvalidPlayers(_))));
        assert!(matches!(
            Config::parse("players = [\"red\", \"red\"]", path),
            Err(Error::InvalidPlayers(_))
        ));
        assert!(matches!(Config::parse("players = [\"pink\", \"red\"]", path), Err(Error::ConfigParse { .. })));
        assert!(matches!(Config::parse("[motion]\nspeed = 0.0", path), Err(Error::InvalidConfig(_))));
        assert!(matches!(Config::parse("[board]\ncell = -1.0", path), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = Config::load(Path::new("does/not/exist/ludo.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_motion_step() {
        let mut motion = MotionConfig::default();
        let frame = Duration::from_secs_f64(1.0 / 60.0);
        assert!((motion.step(frame) - 3.0).abs() < 1e-4);
        assert!((motion.step(frame * 2) - 6.0).abs() < 1e-4);
        motion.scale_by_elapsed = false;
        assert_eq!(motion.step(frame * 2), 3.0);
    }
}
