//! Per-frame agent updates for the railway world.
//!
//! Every agent advances by a fixed amount per frame rather than per second,
//! so behaviour scales with the host's refresh rate. Timed decisions (sheep
//! grazing, next move) use elapsed seconds.

pub mod ambient;
pub mod sheep;
pub mod sky;
pub mod train;

pub use ambient::*;
pub use sheep::*;
pub use sky::*;
pub use train::*;
