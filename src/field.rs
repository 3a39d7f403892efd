// Ambient particle field: drifting dots that bounce off the edges, get shoved
// by the pointer, and are joined by fading lines when close together.
//
// The simulator is frame-rate dependent: every `step`
// advances each particle by exactly one velocity, however long the frame took.

use crate::canvas::Canvas;
use crate::config::FieldConfig;
use crate::scheduler::FrameScheduler;
use crate::types::Surface;
use rand::Rng;
use rand::rngs::StdRng;

/// One drifting dot.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,      // px/frame
    pub vy: f32,      // px/frame
    pub size: f32,    // disc radius
    pub opacity: f32,
}

impl Particle {
    fn spawn(rng: &mut StdRng, surface: Surface, cfg: &FieldConfig) -> Self {
        // `random::<f32>()` is in [0,1), so every range below is half-open and
        // a zero-sized surface just pins particles at 0.
        let mut uniform = |lo: f32, hi: f32| lo + (hi - lo) * rng.random::<f32>();
        Self {
            x: uniform(0.0, surface.width as f32),
            y: uniform(0.0, surface.height as f32),
            vx: uniform(-cfg.max_speed, cfg.max_speed),
            vy: uniform(-cfg.max_speed, cfg.max_speed),
            size: uniform(cfg.size_range.0, cfg.size_range.1),
            opacity: uniform(cfg.opacity_range.0, cfg.opacity_range.1),
        }
    }

    /// Move one frame, reflect off the bounds, then apply the pointer force.
    fn advance(&mut self, bounds: Surface, pointer: PointerState, cfg: &FieldConfig) {
        self.x += self.vx;
        self.y += self.vy;

        // Reflect-on-exceed: only the velocity flips, position stays where it
        // overshot and comes back on the next frame.
        if self.x < 0.0 || self.x > bounds.width as f32 {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > bounds.height as f32 {
            self.vy = -self.vy;
        }

        let dx = pointer.x - self.x;
        let dy = pointer.y - self.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if let Some(force) = pointer_force(cfg, distance) {
            self.x -= dx * force * cfg.pull;
            self.y -= dy * force * cfg.pull;
        }
    }

    fn distance_to(&self, other: &Particle) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Last known pointer position in surface pixels. Starts at
/// `FieldConfig::pointer_start` until the first move event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

/// Density policy: small population below the width breakpoint.
pub fn particle_count(cfg: &FieldConfig, viewport_width: usize) -> usize {
    if viewport_width < cfg.breakpoint { cfg.small_count } else { cfg.large_count }
}

/// Pointer force factor, 1 at the pointer falling linearly to 0 at the
/// influence radius. None at or beyond the radius.
pub fn pointer_force(cfg: &FieldConfig, distance: f32) -> Option<f32> {
    (distance < cfg.pointer_radius).then(|| (cfg.pointer_radius - distance) / cfg.pointer_radius)
}

/// Link alpha for a pair at `distance`; None when too far apart to link.
pub fn link_alpha(cfg: &FieldConfig, distance: f32) -> Option<f32> {
    (distance < cfg.link_distance).then(|| cfg.link_alpha * (1.0 - distance / cfg.link_distance))
}

pub struct FieldSimulator {
    cfg: FieldConfig,
    surface: Surface,
    particles: Vec<Particle>,
    pointer: PointerState,
    rng: StdRng,
    generation: u64,
}

impl FieldSimulator {
    /// Bind to `surface` and populate. With no surface there is nothing to
    /// animate, so no simulator is built and the caller wires no events.
    pub fn initialize(surface: Option<Surface>, cfg: FieldConfig, rng: StdRng) -> Option<Self> {
        let Some(surface) = surface else {
            log::info!("no drawing surface, particle field disabled");
            return None;
        };
        let mut sim = Self {
            cfg,
            surface,
            particles: Vec::new(),
            pointer: PointerState { x: cfg.pointer_start.0, y: cfg.pointer_start.1 },
            rng,
            generation: 0,
        };
        let n = sim.populate();
        log::info!("populated {n} particles on {}x{}", surface.width, surface.height);
        Some(sim)
    }

    /// New viewport bounds. All particles are discarded and regenerated, even
    /// when the size did not change.
    pub fn on_resize(&mut self, surface: Surface) {
        log::debug!(
            "resize {}x{} -> {}x{}",
            self.surface.width, self.surface.height, surface.width, surface.height
        );
        self.surface = surface;
        let n = self.populate();
        log::debug!("repopulated {n} particles");
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.pointer = PointerState { x, y };
        }
    }

    /// Advance and draw one frame, then ask `scheduler` for the next one.
    pub fn step<C, S>(&mut self, canvas: &mut C, scheduler: &mut S)
    where
        C: Canvas + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        let (cw, ch) = canvas.size();
        if self.surface.is_empty() || (cw, ch) != (self.surface.width, self.surface.height) {
            log::debug!(
                "skipping frame: canvas {cw}x{ch}, field {}x{}",
                self.surface.width, self.surface.height
            );
            scheduler.request_frame();
            return;
        }

        let cfg = self.cfg;
        let bounds = self.surface;
        let pointer = self.pointer;

        canvas.clear();
        for i in 0..self.particles.len() {
            self.particles[i].advance(bounds, pointer, &cfg);

            let p = &self.particles[i];
            canvas.fill_circle(p.x, p.y, p.size, cfg.color.with_alpha(p.opacity));

            // Later particles have not moved yet this frame; links use their
            // previous positions.
            for other in &self.particles[i + 1..] {
                if let Some(alpha) = link_alpha(&cfg, p.distance_to(other)) {
                    canvas.stroke_line(p.x, p.y, other.x, other.y, cfg.color.with_alpha(alpha));
                }
            }
        }

        scheduler.request_frame();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[cfg(test)]
    fn surface(&self) -> Surface {
        self.surface
    }

    #[cfg(test)]
    fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Bumped on every (re)population.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn populate(&mut self) -> usize {
        let n = particle_count(&self.cfg, self.surface.width);
        let (surface, cfg) = (self.surface, self.cfg);
        self.particles = (0..n).map(|_| Particle::spawn(&mut self.rng, surface, &cfg)).collect();
        self.generation += 1;
        n
    }

    #[cfg(test)]
    fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }
}
