//! Cosmetic animation state: the wall emissive pulse and the route fade-in.
//!
//! Both are pure view effects driven by the frame loop; neither feeds back
//! into navigation state.

/// Sinusoidal emissive oscillation for the walls while a session is active.
#[derive(Debug, Clone)]
pub struct PulseClock {
    elapsed: f32,
    active: bool,
}

impl Default for PulseClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseClock {
    /// Create an idle pulse clock.
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            active: false,
        }
    }

    /// Advance by `dt` seconds. Time only accrues while active.
    pub fn update(&mut self, dt: f32) {
        if self.active {
            self.elapsed += dt;
        }
    }

    /// Enable or disable the pulse.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.elapsed = 0.0;
        }
    }

    /// Current emissive intensity: `0.2 + sin(2t) * 0.1` while active, the
    /// resting `0.2` otherwise.
    pub fn intensity(&self) -> f32 {
        if self.active {
            0.2 + (self.elapsed * 2.0).sin() * 0.1
        } else {
            0.2
        }
    }
}

/// Per-frame opacity ramp for the route when a session starts.
///
/// The route fades in by a fixed increment each frame rather than by wall
/// time, mirroring the original's frame-callback animation.
#[derive(Debug, Clone, Default)]
pub struct PathReveal {
    opacity: f32,
    revealing: bool,
}

impl PathReveal {
    const STEP: f32 = 0.02;

    /// Restart the ramp from fully transparent.
    pub fn begin(&mut self) {
        self.opacity = 0.0;
        self.revealing = true;
    }

    /// Hide the route and stop ramping.
    pub fn clear(&mut self) {
        self.opacity = 0.0;
        self.revealing = false;
    }

    /// Advance one frame.
    pub fn advance_frame(&mut self) {
        if self.revealing && self.opacity < 1.0 {
            self.opacity = (self.opacity + Self::STEP).min(1.0);
        }
    }

    /// Current opacity in `0.0..=1.0`.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

/// GPU uniform for the scene-wide pulse.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    /// x = emissive intensity, y = elapsed seconds, zw = padding.
    pub pulse: [f32; 4],
}

impl SceneUniform {
    /// Build the uniform from the pulse clock.
    pub fn from_pulse(pulse: &PulseClock) -> Self {
        Self {
            pulse: [pulse.intensity(), pulse.elapsed, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_oscillates_around_the_resting_level() {
        let mut pulse = PulseClock::new();
        pulse.set_active(true);
        let mut seen_above = false;
        let mut seen_below = false;
        for _ in 0..200 {
            pulse.update(0.016);
            let v = pulse.intensity();
            assert!((0.1..=0.3).contains(&v));
            seen_above |= v > 0.25;
            seen_below |= v < 0.15;
        }
        assert!(seen_above && seen_below);
    }

    #[test]
    fn inactive_pulse_rests() {
        let mut pulse = PulseClock::new();
        pulse.update(10.0);
        assert_eq!(pulse.intensity(), 0.2);
    }

    #[test]
    fn reveal_ramps_to_full_opacity_in_fifty_frames() {
        let mut reveal = PathReveal::default();
        reveal.begin();
        for _ in 0..49 {
            reveal.advance_frame();
            assert!(reveal.opacity() < 1.0);
        }
        reveal.advance_frame();
        assert_eq!(reveal.opacity(), 1.0);
        reveal.advance_frame();
        assert_eq!(reveal.opacity(), 1.0);
    }

    #[test]
    fn clear_hides_the_route() {
        let mut reveal = PathReveal::default();
        reveal.begin();
        reveal.advance_frame();
        reveal.clear();
        assert_eq!(reveal.opacity(), 0.0);
        reveal.advance_frame();
        assert_eq!(reveal.opacity(), 0.0);
    }
}
