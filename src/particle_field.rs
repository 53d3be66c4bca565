use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Surface area (in px²) covered by one particle
pub const AREA_PER_PARTICLE: f32 = 15000.0;
/// Pointer influence radius
pub const REPULSION_RADIUS: f32 = 150.0;
/// Pairs closer than this get a connecting line
pub const LINK_DISTANCE: f32 = 100.0;
/// Elastic return divisor (bigger = slower return to anchor)
const RETURN_DIVISOR: f32 = 20.0;

/// GPU-aligned particle structure (32 bytes)
/// The particle slice is uploaded as-is as the instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Particle {
    pub position: [f32; 2], // Rendered position (x, y)
    pub size: f32,          // Radius
    pub density: f32,       // Repulsion multiplier, fixed at creation
    pub anchor: [f32; 2],   // Elastic rest position
    pub velocity: [f32; 2], // Drift applied to the anchor
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, size: f32, density: f32) -> Self {
        Self {
            position: position.to_array(),
            size,
            density,
            anchor: position.to_array(),
            velocity: velocity.to_array(),
        }
    }

    /// Random particle inside `[0, bounds.x) × [0, bounds.y)`
    fn random<R: Rng>(rng: &mut R, bounds: Vec2) -> Self {
        let position = Vec2::new(rng.gen_range(0.0..bounds.x), rng.gen_range(0.0..bounds.y));
        let velocity = Vec2::new(rng.gen_range(-0.05..0.05), rng.gen_range(-0.05..0.05));
        let size = rng.gen_range(0.5..2.5);
        let density = rng.gen_range(1.0..31.0);

        Self::new(position, velocity, size, density)
    }
}

/// Pointer position in surface coordinates
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pointer(pub Vec2);

impl Pointer {
    /// Far off-surface, so repulsion is always zero
    pub const ABSENT: Pointer = Pointer(Vec2::new(-1000.0, -1000.0));

    pub fn is_absent(&self) -> bool {
        *self == Self::ABSENT
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Self::ABSENT
    }
}

/// Everything a particle update reads besides the particle itself
#[derive(Copy, Clone, Debug)]
pub struct FieldContext {
    pub bounds: Vec2,
    pub pointer: Pointer,
}

impl FieldContext {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            bounds: Vec2::new(width, height),
            pointer: Pointer::ABSENT,
        }
    }
}

/// A proximity line between two particles
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub particle_a: usize,
    pub particle_b: usize,
    pub alpha: f32,
}

/// Number of particles for a surface: one per 15000 px², rounded down
pub fn particle_count(width: f32, height: f32) -> usize {
    if width <= 0.0 || height <= 0.0 {
        return 0;
    }
    (width * height / AREA_PER_PARTICLE).floor() as usize
}

/// Advance one particle by one frame: drift, wrap, spring, repel
pub fn step(particle: &mut Particle, ctx: &FieldContext) {
    let bounds = ctx.bounds;
    let mut anchor = Vec2::from_array(particle.anchor) + Vec2::from_array(particle.velocity);
    let mut position = Vec2::from_array(particle.position);

    // Wrap the anchor and drag the particle along, otherwise it would
    // fly across the whole surface towards its new anchor
    if anchor.x < 0.0 {
        anchor.x = bounds.x;
        position.x = anchor.x;
    }
    if anchor.x > bounds.x {
        anchor.x = 0.0;
        position.x = anchor.x;
    }
    if anchor.y < 0.0 {
        anchor.y = bounds.y;
        position.y = anchor.y;
    }
    if anchor.y > bounds.y {
        anchor.y = 0.0;
        position.y = anchor.y;
    }

    position += (anchor - position) / RETURN_DIVISOR;

    let to_pointer = ctx.pointer.0 - position;
    let mut distance = to_pointer.length();
    if distance < REPULSION_RADIUS {
        if distance == 0.0 {
            distance = 0.1;
        }
        let force = (REPULSION_RADIUS - distance) / REPULSION_RADIUS;
        position -= to_pointer / distance * force * particle.density;
    }

    particle.anchor = anchor.to_array();
    particle.position = position.to_array();
}

/// Opacity of the line between two particles `distance` apart
pub fn link_alpha(distance: f32) -> f32 {
    (0.1 - distance / 1000.0).max(0.0)
}

/// Owner of the particle set and the simulation context
pub struct ParticleField {
    particles: Vec<Particle>,
    ctx: FieldContext,
    rng: StdRng,
}

impl ParticleField {
    /// Create a field for the given surface size
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Deterministic field, mostly for tests
    pub fn with_seed(width: f32, height: f32, seed: u64) -> Self {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: f32, height: f32, rng: StdRng) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            ctx: FieldContext::new(width, height),
            rng,
        };
        field.populate();
        field
    }

    /// Regenerate the full particle set for the current bounds
    fn populate(&mut self) {
        let bounds = self.ctx.bounds;
        let count = particle_count(bounds.x, bounds.y);

        self.particles = (0..count)
            .map(|_| Particle::random(&mut self.rng, bounds))
            .collect();
    }

    /// New surface size: old particles are discarded
    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.bounds = Vec2::new(width, height);
        self.populate();
        log::debug!(
            "Particle field resized to {}x{} ({} particles)",
            width,
            height,
            self.particles.len()
        );
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.ctx.pointer = Pointer(Vec2::new(x, y));
    }

    pub fn clear_pointer(&mut self) {
        self.ctx.pointer = Pointer::ABSENT;
    }

    /// Advance every particle by one frame
    pub fn update(&mut self) {
        let ctx = self.ctx;
        for particle in self.particles.iter_mut() {
            step(particle, &ctx);
        }
    }

    /// All pairs closer than `LINK_DISTANCE`, naive O(n²)
    pub fn connections(&self) -> Vec<Connection> {
        let mut connections = Vec::new();

        for (i, a) in self.particles.iter().enumerate() {
            let pa = Vec2::from_array(a.position);
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let distance = pa.distance(Vec2::from_array(b.position));
                if distance < LINK_DISTANCE {
                    connections.push(Connection {
                        particle_a: i,
                        particle_b: j,
                        alpha: link_alpha(distance),
                    });
                }
            }
        }

        connections
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn context(&self) -> &FieldContext {
        &self.ctx
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Get particles as byte slice for GPU upload (zero-copy)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }
}
