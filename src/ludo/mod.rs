mod color;
pub use color::Color;

mod path;
pub use path::Geometry;
pub use path::Track;
pub use path::{home_stretch_path, main_loop_path};
pub use path::{FINAL_INDEX, HOME_STRETCH_LEN, MAIN_LOOP_LEN, TRACK_LEN};

mod token;
pub use token::Token;
pub use token::TokenState;
pub use token::TOKENS_PER_PLAYER;

mod dice;
pub use dice::Die;

mod resolver;
pub use resolver::Resolution;
pub use resolver::resolve_turn;

mod game;
pub use game::Game;
pub use game::GameOutcome;
pub use game::Phase;
pub use game::TurnState;
