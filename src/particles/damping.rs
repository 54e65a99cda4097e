/// Frame-rate independent approach of `value` toward `target`.
///
/// The blend factor `1 - exp(-rate * dt)` lies in `[0, 1)` for `dt >= 0`,
/// so the result never passes the target.
pub fn damp(value: f32, target: f32, rate: f32, dt: f32) -> f32 {
    value + (target - value) * (1.0 - (-rate * dt).exp())
}

/// Negative or non-finite frame deltas advance nothing
pub fn sanitize_delta(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

/// Whole-effect opacity, faded in while active and out while inactive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    pub value: f32,
    pub target: f32,
    pub activate_rate: f32,
    pub deactivate_rate: f32,
}

impl Visibility {
    pub fn new(target: f32, activate_rate: f32, deactivate_rate: f32) -> Self {
        Self {
            value: 0.0,
            target,
            activate_rate,
            deactivate_rate,
        }
    }

    pub fn step(&mut self, dt: f32, active: bool) -> f32 {
        self.value = if active {
            damp(self.value, self.target, self.activate_rate, dt)
        } else {
            damp(self.value, 0.0, self.deactivate_rate, dt)
        };
        self.value
    }
}
