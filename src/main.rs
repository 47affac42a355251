//! Coding Collisions entry point
//!
//! Runs the simulation headless: a scripted spawn input stands in for the
//! space bar and every frame is tessellated into a CPU-side mesh.
//!
//! Usage: `coding-collisions [settings.json]`

fn main() {
    use coding_collisions::sim::{TickInput, World, frame};
    use coding_collisions::{MeshRenderer, SimConfig};

    env_logger::init();
    log::info!("Coding Collisions (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load_or_default(path),
        None => SimConfig::default(),
    };
    let demo = config.demo.clone();

    let mut world = World::new(config);
    let mut mesh = MeshRenderer::default();

    let mut collisions = 0;
    let mut bounces = 0;
    let mut destroyed = 0;
    let mut peak_triangles = 0;

    for frame_index in 0..demo.frames {
        let input = TickInput {
            spawn: demo.spawn_every > 0 && frame_index.is_multiple_of(demo.spawn_every),
            quit: false,
        };

        mesh.clear();
        let report = frame(&mut world, &input, &mut mesh);
        if report.stopped {
            break;
        }

        collisions += report.particle_collisions();
        bounces += report.wall_bounces();
        destroyed += report.bricks_deactivated();
        peak_triangles = peak_triangles.max(mesh.triangle_count());
    }

    let smallest = world
        .particles
        .iter()
        .map(|p| p.radius)
        .fold(f32::INFINITY, f32::min);
    let slowest = world
        .particles
        .iter()
        .map(|p| p.speed)
        .fold(f32::INFINITY, f32::min);

    log::info!(
        "Finished {} ticks (seed {}): {} particles, {} particle collisions, {} wall bounces",
        world.time_ticks,
        world.seed,
        world.particles.len(),
        collisions,
        bounces
    );
    log::info!(
        "Bricks destroyed: {} ({} still standing), peak frame size {} triangles",
        destroyed,
        world.active_bricks().count(),
        peak_triangles
    );
    if !world.particles.is_empty() {
        log::info!("Smallest radius {:e}, slowest speed {}", smallest, slowest);
    }

    println!(
        "seed={} ticks={} particles={} bricks_standing={}",
        world.seed,
        world.time_ticks,
        world.particles.len(),
        world.active_bricks().count()
    );
}
