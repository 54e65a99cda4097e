// Fireworks Constants - SINGLE SOURCE OF TRUTH
//
// Every default the simulator and its configuration fall back to lives here.
// `FireworksConfig::default()` is built from these values.

/// Motion constants
pub mod physics {
    /// Downward acceleration applied to the vertical axis (units/s²)
    pub const GRAVITY: f32 = -4.0;

    /// Distance below the anchor at which a falling particle is recycled
    pub const FLOOR_OFFSET: f32 = 1.5;

    /// Nominal frame time used by the headless driver (seconds)
    pub const FRAME_TIME: f32 = 1.0 / 60.0;
}

/// Pool sizing
pub mod pool {
    pub const DEFAULT_BURST_COUNT: usize = 100;
    pub const DEFAULT_PARTICLES_PER_BURST: usize = 10;
    pub const DEFAULT_PARTICLE_COUNT: usize = DEFAULT_BURST_COUNT * DEFAULT_PARTICLES_PER_BURST;

    /// Maximum number of particles one pool may hold
    pub const MAX_PARTICLES: usize = 1_000_000;
}

/// Per-reset random draws
pub mod spawn {
    /// Center of the burst origin distribution, in front of and above a camera at the origin
    pub const DEFAULT_ANCHOR: [f32; 3] = [0.0, 2.0, -10.0];

    /// Origin box: x half-width, vertical span (above anchor only), z half-depth
    pub const ORIGIN_HALF_EXTENT: [f32; 3] = [6.0, 4.0, 3.0];

    /// Initial speed range (units/s)
    pub const SPEED_RANGE: [f32; 2] = [1.0, 2.4];

    /// Lifetime range (seconds)
    pub const LIFETIME_RANGE: [f32; 2] = [1.6, 2.9];

    /// Pre-ignition delay range (seconds); age starts at the negated draw
    pub const DELAY_RANGE: [f32; 2] = [0.0, 1.0];

    /// Polar angle compression; 1.0 samples the full sphere
    pub const CONE_BIAS: f32 = 0.6;

    pub const SATURATION: f32 = 1.0;
    pub const LIGHTNESS: f32 = 0.6;
}

/// Whole-effect opacity
pub mod visibility {
    pub const TARGET: f32 = 0.85;
    pub const ACTIVATE_RATE: f32 = 2.5;
    pub const DEACTIVATE_RATE: f32 = 5.0;
}
