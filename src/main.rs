use std::{path::Path, sync::OnceLock};

use ludo::{
    config::{Config, MotionConfig},
    simulate::run_batch,
    Color, Die, Error, Game, Phase,
};
use nannou::{
    color::{self, Srgb},
    event::{Key, Update},
    frame::Frame,
    draw::Draw,
    geom::{vec2, Rect, Vec2},
    wgpu, App, LoopMode,
};

const TOKEN_RADIUS: f32 = 14.0;
const DICE_SIZE: f32 = 64.0;

static CONFIG: OnceLock<Config> = OnceLock::new();

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = CONFIG.get_or_init(load_config);
    if config.simulation.headless {
        run_games(config);
        return;
    }

    nannou::app(model).update(update).run();
}

fn load_config() -> Config {
    let path = Config::path_from_env();
    match Config::load(&path) {
        Ok(config) => config,
        Err(e) => {
            match std::error::Error::source(&e) {
                Some(source) => log::error!("{e}: {source}"),
                None => log::error!("{e}"),
            }
            log::warn!("falling back to default config");
            Config::default()
        }
    }
}

fn run_games(config: &Config) {
    let report = match run_batch(&config.players, &config.simulation) {
        Ok(report) => report,
        Err(e) => {
            log::error!("simulation failed: {e}");
            return;
        }
    };

    println!("============================================");
    println!("Games: {}, Unfinished: {}", report.games, report.unfinished);
    for &player in &config.players {
        let wins = report.wins.get(&player).copied().unwrap_or(0);
        println!("{player} Wins: {wins}, Win Rate: {:.2}%", report.win_rate(player));
    }
    if report.games > 0 {
        println!("Average Rolls per Game: {:.1}", report.total_rolls as f64 / report.games as f64);
    }
    println!("============================================");
}

struct Model {
    game: Game,
    motion: MotionConfig,
    window: Vec2,
    board_texture: Option<wgpu::Texture>,
    dice_texture: Option<wgpu::Texture>,
    roll_requested: bool,
}

fn model(app: &App) -> Model {
    let config = CONFIG.get_or_init(load_config);

    app.set_loop_mode(LoopMode::rate_fps(config.motion.target_fps));
    app.new_window()
        .size(config.window.width, config.window.height)
        .title(&config.window.title)
        .key_pressed(key_pressed)
        .view(view)
        .build()
        .unwrap();

    let game = Game::new(&config.players, config.board).expect("config players are validated on load");

    Model {
        game,
        motion: config.motion,
        window: vec2(config.window.width as f32, config.window.height as f32),
        board_texture: load_texture(app, &config.assets.board),
        dice_texture: load_texture(app, &config.assets.dice),
        roll_requested: false,
    }
}

fn load_texture(app: &App, path: &Path) -> Option<wgpu::Texture> {
    wgpu::Texture::from_path(app, path)
        .map_err(|e| Error::Asset {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
        .inspect_err(|e| log::warn!("{e}, drawing without it"))
        .ok()
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if key == Key::Space {
        model.roll_requested = true;
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    if std::mem::take(&mut model.roll_requested) && model.game.can_roll() {
        model.game.roll(Die::roll(&mut rand::rng()));
    }

    let step = model.motion.step(update.since_last);
    if let Some(resolution) = model.game.tick(step) {
        let turn = model.game.turn();
        log::debug!("resolved {resolution:?}, {} to roll", turn.active);
    }
}

/// Converts a board coordinate (origin top left, y down) to nannou's centred, y up space.
fn to_screen(point: Vec2, window: Vec2) -> Vec2 {
    vec2(point.x - window.x / 2.0, window.y / 2.0 - point.y)
}

/// Screen rect for a board rect given by its top left corner and size.
fn screen_rect(x: f32, y: f32, w: f32, h: f32, window: Vec2) -> Rect {
    let centre = to_screen(vec2(x + w / 2.0, y + h / 2.0), window);
    Rect::from_x_y_w_h(centre.x, centre.y, w, h)
}

fn rgb_of(color: Color) -> Srgb<u8> {
    match color {
        Color::Red => color::RED,
        Color::Green => color::GREEN,
        Color::Yellow => color::GOLD,
        Color::Blue => color::BLUE,
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(color::WHITE);

    let window = model.window;
    match &model.board_texture {
        Some(texture) => {
            draw.texture(texture).x_y(0.0, 0.0).wh(window);
        }
        None => draw_plain_board(&draw, model),
    }

    // Dice
    let turn = model.game.turn();
    let die = turn.last_roll.unwrap_or_default();
    let dice_rect = screen_rect(window.x - 80.0, 20.0, DICE_SIZE, DICE_SIZE, window);
    match &model.dice_texture {
        Some(texture) => {
            draw.texture(texture)
                .xy(dice_rect.xy())
                .wh(dice_rect.wh())
                .area(die.sprite_area());
        }
        None => {
            draw.rect().xy(dice_rect.xy()).wh(dice_rect.wh()).color(color::BLACK);
            draw.text(&die.to_string())
                .xy(dice_rect.xy())
                .font_size(32)
                .color(color::WHITE);
        }
    }

    for (color, token) in model.game.all_tokens() {
        draw.ellipse()
            .xy(to_screen(token.position(), window))
            .radius(TOKEN_RADIUS)
            .color(rgb_of(color));
    }

    // Turn banner
    let (banner_color, banner_text) = match turn.phase {
        Phase::Over(winner) => (winner, format!("{winner} wins!")),
        _ => (turn.active, format!("{}'s Turn", turn.active)),
    };
    let banner = screen_rect(20.0, 100.0, 130.0, 30.0, window);
    draw.rect().xy(banner.xy()).wh(banner.wh()).color(rgb_of(banner_color));
    draw.text(&banner_text)
        .xy(banner.xy())
        .w_h(banner.w() - 20.0, banner.h())
        .left_justify()
        .align_text_middle_y()
        .font_size(18)
        .color(color::WHITE);

    let hint = screen_rect(20.0, 140.0, 200.0, 20.0, window);
    draw.text("SPACE to roll")
        .xy(hint.xy())
        .wh(hint.wh())
        .left_justify()
        .align_text_middle_y()
        .font_size(18)
        .color(color::DARKGRAY);

    if let Err(e) = draw.to_frame(app, &frame) {
        log::error!("failed to render frame: {e:?}");
    }
}

/// Stand-in for the board image: loop cells in grey, home lanes in their color.
fn draw_plain_board(draw: &Draw, model: &Model) {
    let track = model.game.track();
    let cell = track.geometry().cell * 0.95;

    for &point in track.main_loop() {
        draw.rect()
            .xy(to_screen(point, model.window))
            .w_h(cell, cell)
            .color(color::LIGHTGRAY);
    }
    for &color in model.game.players() {
        for &point in track.home_stretch(color) {
            draw.rect()
                .xy(to_screen(point, model.window))
                .w_h(cell, cell)
                .color(rgb_of(color));
        }
        let entry = track.waypoint(color, color.entry_index());
        draw.rect()
            .xy(to_screen(entry, model.window))
            .w_h(cell, cell)
            .color(rgb_of(color));
    }
}
