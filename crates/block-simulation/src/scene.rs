//! Startup scene: invisible walls around the canvas and three block stacks

use crate::body::{Body, PendingBody};
use block_physics::{BodyOptions, PhysicsWorld};
use block_renderer::{Color, PALETTE};
use glam::Vec2;
use rand::Rng;

/// Thickness of the boundary walls, so fast blocks cannot tunnel out
pub const WALL_THICKNESS: f32 = 1000.0;

/// Side length of every block
pub const BLOCK_SIZE: f32 = 30.0;

/// Columns and rows of the two small side stacks
pub const SIDE_STACK_DIMENSIONS: (u32, u32) = (5, 5);

/// Columns and rows of the large middle stack
pub const MIDDLE_STACK_DIMENSIONS: (u32, u32) = (15, 15);

/// Offset of the left stack's top-left corner from `(width / 2, height)`
pub const LEFT_STACK_OFFSET: Vec2 = Vec2::new(-450.0, -150.0);

/// Offset of the right stack's top-left corner from `(width / 2, height)`
pub const RIGHT_STACK_OFFSET: Vec2 = Vec2::new(300.0, -150.0);

/// Offset of the middle stack's top-left corner from `(width / 2, height)`
pub const MIDDLE_STACK_OFFSET: Vec2 = Vec2::new(-225.0, -450.0);

/// Everything the scene builder put into the world
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Drawable dynamic blocks
    pub bodies: Vec<Body>,
    /// Static walls enclosing the canvas
    pub boundaries: Vec<Body>,
}

/// Pick one palette color uniformly at random
pub fn choose_color(rng: &mut impl Rng) -> Color {
    PALETTE[rng.random_range(0..PALETTE.len())]
}

/// Lay out a `columns` x `rows` grid of equally sized blocks.
///
/// `origin` is the top-left corner of the grid; blocks are returned row by row.
pub fn stack(
    origin: Vec2,
    columns: u32,
    rows: u32,
    block: Vec2,
    gap: Vec2,
    color: Color,
) -> Vec<PendingBody> {
    let pitch = block + gap;

    (0..rows)
        .flat_map(|row| (0..columns).map(move |column| (column, row)))
        .map(|(column, row)| {
            let center = origin + Vec2::new(column as f32, row as f32) * pitch + block * 0.5;
            Body::rectangle(
                center.x,
                center.y,
                block.x,
                block.y,
                color,
                BodyOptions::default(),
            )
        })
        .collect()
}

/// Four static walls whose inner faces sit on the canvas edges
pub fn boundaries(width: f32, height: f32) -> Vec<PendingBody> {
    let t = WALL_THICKNESS;
    let invisible = Color::transparent();
    let fixed = BodyOptions::fixed();

    vec![
        // Top
        Body::rectangle(width / 2.0, -t / 2.0, width + t, t, invisible, fixed),
        // Bottom
        Body::rectangle(width / 2.0, height + t / 2.0, width + t, t, invisible, fixed),
        // Left
        Body::rectangle(-t / 2.0, height / 2.0, t, height + t, invisible, fixed),
        // Right
        Body::rectangle(width + t / 2.0, height / 2.0, t, height + t, invisible, fixed),
    ]
}

/// Populate `world` with the walls and the three stacks for a `width` x `height` canvas
pub fn build_scene(
    world: &mut PhysicsWorld,
    width: f32,
    height: f32,
    rng: &mut impl Rng,
) -> Scene {
    let anchor = Vec2::new(width / 2.0, height);
    let block = Vec2::splat(BLOCK_SIZE);

    // Side stacks share a color
    let side_color = choose_color(rng);
    let (side_columns, side_rows) = SIDE_STACK_DIMENSIONS;
    let mut blocks = stack(
        anchor + LEFT_STACK_OFFSET,
        side_columns,
        side_rows,
        block,
        Vec2::ZERO,
        side_color,
    );
    blocks.extend(stack(
        anchor + RIGHT_STACK_OFFSET,
        side_columns,
        side_rows,
        block,
        Vec2::ZERO,
        side_color,
    ));

    let middle_color = choose_color(rng);
    let (middle_columns, middle_rows) = MIDDLE_STACK_DIMENSIONS;
    blocks.extend(stack(
        anchor + MIDDLE_STACK_OFFSET,
        middle_columns,
        middle_rows,
        block,
        Vec2::ZERO,
        middle_color,
    ));

    let walls = boundaries(width, height);

    // One batch: walls first, then blocks
    let descs = walls.iter().chain(&blocks).map(PendingBody::desc);
    let handles = world.add_rectangles(descs);
    let (wall_handles, block_handles) = handles.split_at(walls.len());

    let scene = Scene {
        bodies: blocks
            .into_iter()
            .zip(block_handles)
            .map(|(pending, handle)| pending.attach(*handle))
            .collect(),
        boundaries: walls
            .into_iter()
            .zip(wall_handles)
            .map(|(pending, handle)| pending.attach(*handle))
            .collect(),
    };

    log::info!(
        "✓ Scene built: {} blocks, {} walls ({}x{})",
        scene.bodies.len(),
        scene.boundaries.len(),
        width,
        height
    );
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn build(width: f32, height: f32, seed: u64) -> (PhysicsWorld, Scene) {
        let mut world = PhysicsWorld::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let scene = build_scene(&mut world, width, height, &mut rng);
        (world, scene)
    }

    #[test]
    fn test_scene_body_counts() {
        let (world, scene) = build(800.0, 600.0, 1);

        assert_eq!(scene.boundaries.len(), 4);
        assert_eq!(scene.bodies.len(), 275);
        assert_eq!(world.body_count(), 279);

        for wall in &scene.boundaries {
            assert_eq!(world.is_static(wall.handle), Some(true));
            assert!(wall.color.is_transparent());
        }
        for block in &scene.bodies {
            assert_eq!(world.is_static(block.handle), Some(false));
            assert_eq!(block.size, Vec2::splat(BLOCK_SIZE));
        }
    }

    #[test]
    fn test_boundaries_enclose_canvas() {
        let (width, height) = (800.0, 600.0);
        let (world, scene) = build(width, height, 2);

        // Inner faces of (top, bottom, left, right)
        let faces: Vec<(Vec2, Vec2)> = scene
            .boundaries
            .iter()
            .map(|wall| {
                let center = world.body_state(wall.handle).unwrap().position;
                (center - wall.size * 0.5, center + wall.size * 0.5)
            })
            .collect();

        let (top_min, top_max) = faces[0];
        let (bottom_min, bottom_max) = faces[1];
        let (left_min, left_max) = faces[2];
        let (right_min, right_max) = faces[3];

        assert_eq!(top_max.y, 0.0);
        assert_eq!(bottom_min.y, height);
        assert_eq!(left_max.x, 0.0);
        assert_eq!(right_min.x, width);

        // Horizontal walls reach past both vertical inner faces
        for (min, max) in [faces[0], faces[1]] {
            assert!(min.x <= 0.0 && max.x >= width);
        }
        // Vertical walls reach past both horizontal inner faces
        for (min, max) in [faces[2], faces[3]] {
            assert!(min.y <= 0.0 && max.y >= height);
        }

        // Corners are covered by overlap, not left open
        assert!(top_min.x < left_max.x && bottom_max.x > right_min.x);
        assert!(left_min.y < top_max.y && right_max.y > bottom_min.y);
    }

    #[test]
    fn test_stack_layout() {
        let blocks = stack(
            Vec2::new(100.0, 50.0),
            3,
            2,
            Vec2::splat(30.0),
            Vec2::ZERO,
            PALETTE[0],
        );

        assert_eq!(blocks.len(), 6);
        assert_eq!(blocks[0].desc().center, Vec2::new(115.0, 65.0));
        assert_eq!(blocks[2].desc().center, Vec2::new(175.0, 65.0));
        assert_eq!(blocks[3].desc().center, Vec2::new(115.0, 95.0));
    }

    #[test]
    fn test_stack_gap() {
        let blocks = stack(
            Vec2::ZERO,
            2,
            1,
            Vec2::splat(10.0),
            Vec2::new(4.0, 0.0),
            PALETTE[0],
        );
        assert_eq!(blocks[1].desc().center.x - blocks[0].desc().center.x, 14.0);
    }

    #[test]
    fn test_stacks_rest_on_floor() {
        let (width, height) = (1280.0, 720.0);
        let (world, scene) = build(width, height, 3);

        let bottom = scene
            .bodies
            .iter()
            .map(|block| world.body_state(block.handle).unwrap().position.y + BLOCK_SIZE * 0.5)
            .fold(f32::MIN, f32::max);
        assert_eq!(bottom, height);

        let first = world.body_state(scene.bodies[0].handle).unwrap().position;
        assert_eq!(first, Vec2::new(width / 2.0 - 450.0 + 15.0, height - 150.0 + 15.0));

        let middle_first = world.body_state(scene.bodies[50].handle).unwrap().position;
        assert_eq!(
            middle_first,
            Vec2::new(width / 2.0 - 225.0 + 15.0, height - 450.0 + 15.0)
        );
    }

    #[test]
    fn test_stack_colors() {
        let (_, scene) = build(800.0, 600.0, 4);

        let side = scene.bodies[0].color;
        assert!(scene.bodies[..50].iter().all(|block| block.color == side));

        let middle = scene.bodies[50].color;
        assert!(scene.bodies[50..].iter().all(|block| block.color == middle));

        assert!(PALETTE.contains(&side));
        assert!(PALETTE.contains(&middle));
    }

    #[test]
    fn test_seeded_colors_are_reproducible() {
        let (_, a) = build(800.0, 600.0, 42);
        let (_, b) = build(800.0, 600.0, 42);

        assert_eq!(a.bodies[0].color, b.bodies[0].color);
        assert_eq!(a.bodies[274].color, b.bodies[274].color);
    }

    #[test]
    fn test_choose_color_covers_palette() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; PALETTE.len()];
        for _ in 0..500 {
            let color = choose_color(&mut rng);
            let index = PALETTE.iter().position(|c| *c == color).unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
