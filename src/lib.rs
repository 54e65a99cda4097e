//! Pooled firework particle bursts.
//!
//! A [`FireworksSystem`] owns a fixed pool of particles that ignite after a
//! random delay, fly a parabolic arc while fading to black, and recycle in
//! place. Hosts advance it once per frame and read the interleaved
//! position/color buffers plus a whole-effect visibility.

pub mod config;
pub mod constants;
pub mod error;
pub mod particles;

pub use config::FireworksConfig;
pub use error::{FireworksError, FireworksResult};
pub use particles::{FireworkVertex, FireworksStats, FireworksSystem, FireworksUpdate};
