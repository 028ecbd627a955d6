pub mod attach;
pub mod channel;
pub mod constants;
pub mod motion;
pub mod palette;
pub mod render;
pub mod scene;

pub static BALL_WGSL: &str = include_str!("../shaders/ball.wgsl");

pub use attach::*;
pub use channel::*;
pub use constants::*;
pub use motion::*;
pub use palette::*;
pub use render::*;
pub use scene::*;
