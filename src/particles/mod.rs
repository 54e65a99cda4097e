pub mod color;
pub mod damping;
pub mod fireworks;
pub mod particle_data;
pub mod spawn;
pub mod update;

pub use damping::{damp, Visibility};
pub use fireworks::{FireworksStats, FireworksSystem, FireworksUpdate};
pub use particle_data::{prepare_render_data, FireworkData, FireworkVertex};
pub use spawn::{Ignition, SpawnParams};
pub use update::{Kinematics, ParticleStep};
