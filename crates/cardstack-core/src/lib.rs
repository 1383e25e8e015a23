pub mod agents;
pub mod camera;
pub mod constants;
pub mod deck;
pub mod error;
pub mod formation;
pub mod frame;
pub mod obstacles;
pub mod path;
pub mod render;
pub mod scene;
pub mod smoothing;

pub use agents::*;
pub use camera::*;
pub use constants::*;
pub use deck::*;
pub use error::*;
pub use formation::*;
pub use frame::*;
pub use obstacles::*;
pub use path::*;
pub use render::*;
pub use scene::*;
pub use smoothing::*;
