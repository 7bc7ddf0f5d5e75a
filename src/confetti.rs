//! Confetti burst played when a level unlocks.
//!
//! The engine is host-agnostic: the browser feeds it animation-frame
//! timestamps and a canvas-backed [`Surface`]; tests feed it simulated time and
//! a recording surface. Only one burst plays at a time and it ends on its own
//! once `duration_ms` has elapsed since the first frame.

use rand::Rng;

use crate::config::ConfettiConfig;

/// Drawing area in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Minimal drawing capability the engine needs.
pub trait Surface {
    fn clear(&mut self, viewport: Viewport);
    /// Fill a closed four-point polygon.
    fn fill_kite(&mut self, points: [(f64, f64); 4], color: &str);
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// Random phase; `cos(phase)` varies the fall speed per particle.
    pub phase: f64,
    pub color: String,
    pub tilt: f64,
    pub tilt_angle: f64,
    pub tilt_angle_increment: f64,
}

impl Particle {
    fn random<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, cfg: &ConfettiConfig) -> Self {
        let hue: f64 = rng.gen_range(0.0..360.0);
        Self {
            x: rng.gen_range(0.0..viewport.width.max(1.0)),
            // start above the visible area
            y: rng.gen_range(-viewport.height.max(1.0)..0.0),
            radius: rng.gen_range(cfg.min_radius..cfg.max_radius),
            phase: rng.gen_range(0.0..cfg.phase_range),
            color: format!("hsl({hue:.0}, 100%, 50%)"),
            tilt: rng.gen_range(-10.0..0.0),
            tilt_angle: 0.0,
            tilt_angle_increment: rng.gen_range(cfg.min_tilt_increment..cfg.max_tilt_increment),
        }
    }

    fn step(&mut self, tilt_amplitude: f64) {
        self.tilt_angle += self.tilt_angle_increment;
        self.y += (self.phase.cos() + 3.0 + self.radius / 2.0) / 2.0;
        self.tilt = self.tilt_angle.sin() * tilt_amplitude;
    }

    /// Diamond centred on the drifted position.
    pub fn kite(&self) -> [(f64, f64); 4] {
        let cx = self.x + self.tilt;
        let half = self.radius / 2.0;
        [
            (cx + half, self.y),
            (cx, self.y + self.tilt + half),
            (cx - half, self.y),
            (cx, self.y - self.tilt - half),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// No burst playing; nothing drawn.
    Idle,
    /// Frame drawn; request another.
    Running,
    /// Duration elapsed; surface cleared and engine ready for a new start.
    Finished,
}

pub struct ConfettiEngine {
    cfg: ConfettiConfig,
    particles: Vec<Particle>,
    viewport: Viewport,
    started_at: Option<f64>,
    running: bool,
}

impl ConfettiEngine {
    pub fn new(cfg: ConfettiConfig) -> Self {
        Self {
            cfg,
            particles: Vec::new(),
            viewport: Viewport::default(),
            started_at: None,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Spawn a new burst. Returns `false` (and changes nothing) while a burst
    /// is already playing.
    pub fn start<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) -> bool {
        if self.running {
            tracing::debug!("confetti already running; start ignored");
            return false;
        }
        self.viewport = viewport;
        self.particles = (0..self.cfg.particle_count)
            .map(|_| Particle::random(rng, viewport, &self.cfg))
            .collect();
        self.started_at = None;
        self.running = true;
        true
    }

    /// Advance and redraw every particle for the frame at `timestamp` (ms).
    /// The clock starts at the first frame after [`start`](Self::start).
    pub fn frame<S: Surface + ?Sized>(&mut self, timestamp: f64, surface: &mut S) -> FrameStatus {
        if !self.running {
            return FrameStatus::Idle;
        }
        let start = *self.started_at.get_or_insert(timestamp);
        let elapsed = timestamp - start;

        surface.clear(self.viewport);
        for p in &mut self.particles {
            p.step(self.cfg.tilt_amplitude);
            surface.fill_kite(p.kite(), &p.color);
        }

        if elapsed < self.cfg.duration_ms {
            FrameStatus::Running
        } else {
            surface.clear(self.viewport);
            self.particles.clear();
            self.started_at = None;
            self.running = false;
            FrameStatus::Finished
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[derive(Default)]
    struct RecordingSurface {
        clears: usize,
        kites: usize,
        drawn_since_clear: usize,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, _: Viewport) {
            self.clears += 1;
            self.drawn_since_clear = 0;
        }
        fn fill_kite(&mut self, _: [(f64, f64); 4], _: &str) {
            self.kites += 1;
            self.drawn_since_clear += 1;
        }
    }

    const VIEW: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    fn engine() -> (ConfettiEngine, SmallRng) {
        (
            ConfettiEngine::new(ConfettiConfig::default()),
            SmallRng::seed_from_u64(0x5eed),
        )
    }

    #[test]
    fn second_start_is_ignored() {
        let (mut e, mut rng) = engine();
        assert!(e.start(VIEW, &mut rng));
        let first = e.particles().to_vec();
        assert!(!e.start(VIEW, &mut rng));
        assert_eq!(e.particles().len(), 150);
        assert_eq!(e.particles(), &first[..]);
    }

    #[test]
    fn particles_spawn_within_bounds() {
        let (mut e, mut rng) = engine();
        e.start(VIEW, &mut rng);
        for p in e.particles() {
            assert!((0.0..800.0).contains(&p.x));
            assert!((-600.0..0.0).contains(&p.y));
            assert!((4.0..10.0).contains(&p.radius));
            assert!((0.05..0.12).contains(&p.tilt_angle_increment));
            assert!(p.color.starts_with("hsl(") && p.color.ends_with(", 100%, 50%)"));
        }
    }

    #[test]
    fn frame_redraws_every_particle_after_clearing() {
        let (mut e, mut rng) = engine();
        e.start(VIEW, &mut rng);
        let mut s = RecordingSurface::default();
        assert_eq!(e.frame(1000.0, &mut s), FrameStatus::Running);
        assert_eq!(s.clears, 1);
        assert_eq!(s.drawn_since_clear, 150);
    }

    #[test]
    fn particles_always_fall() {
        let (mut e, mut rng) = engine();
        e.start(VIEW, &mut rng);
        let before: Vec<f64> = e.particles().iter().map(|p| p.y).collect();
        e.frame(0.0, &mut RecordingSurface::default());
        for (p, y0) in e.particles().iter().zip(before) {
            // cos >= -1, so each step moves at least (2 + r/2) / 2 px
            assert!(p.y - y0 >= (2.0 + p.radius / 2.0) / 2.0 - 1e-9);
            assert!(p.tilt.abs() <= 15.0);
        }
    }

    #[test]
    fn burst_ends_after_duration_and_can_restart() {
        let (mut e, mut rng) = engine();
        e.start(VIEW, &mut rng);
        let mut s = RecordingSurface::default();
        let mut t = 500.0;
        while e.frame(t, &mut s) == FrameStatus::Running {
            t += 16.0;
            assert!(t < 500.0 + 3100.0, "burst did not stop");
        }
        assert!(t - 500.0 >= 3000.0);
        assert!(!e.is_running());
        assert!(e.particles().is_empty());
        assert_eq!(s.drawn_since_clear, 0);
        assert_eq!(e.frame(t + 16.0, &mut s), FrameStatus::Idle);
        assert!(e.start(VIEW, &mut rng));
    }

    #[test]
    fn kite_is_centred_on_drifted_position() {
        let p = Particle {
            x: 100.0,
            y: 50.0,
            radius: 8.0,
            phase: 0.0,
            color: "hsl(0, 100%, 50%)".into(),
            tilt: 2.0,
            tilt_angle: 0.0,
            tilt_angle_increment: 0.1,
        };
        assert_eq!(
            p.kite(),
            [(106.0, 50.0), (102.0, 56.0), (98.0, 50.0), (102.0, 44.0)]
        );
    }
}
