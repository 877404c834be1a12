//! Drawable rigid bodies

use block_physics::{BodyHandle, BodyOptions, PhysicsWorld, RectangleDesc};
use block_renderer::{Canvas, Color};
use glam::Vec2;

/// A rectangle in the physics world plus what it looks like on screen.
///
/// Position and rotation are never cached here; `draw` always reads them back
/// from the world through `handle`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub size: Vec2,
    pub color: Color,
    pub handle: BodyHandle,
}

/// A body waiting for its handle from a batch insert
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingBody {
    desc: RectangleDesc,
    color: Color,
}

impl PendingBody {
    pub fn desc(&self) -> RectangleDesc {
        self.desc
    }

    pub fn attach(self, handle: BodyHandle) -> Body {
        Body {
            size: self.desc.size,
            color: self.color,
            handle,
        }
    }
}

impl Body {
    /// Describe a rectangle centered at `(x, y)`
    pub fn rectangle(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
        options: BodyOptions,
    ) -> PendingBody {
        PendingBody {
            desc: RectangleDesc::new(x, y, width, height, options),
            color,
        }
    }

    /// Fill the body at its current position and angle, glowing in its own color
    pub fn draw(&self, world: &PhysicsWorld, canvas: &mut Canvas, glow: f32) {
        let Some(state) = world.body_state(self.handle) else {
            log::warn!("skipping draw of missing body {:?}", self.handle);
            return;
        };

        let mut scope = canvas.save();
        scope.set_fill(self.color);
        scope.set_shadow(self.color, glow);
        scope.translate(state.position);
        scope.rotate(state.angle);
        scope.fill_rect(
            -self.size.x * 0.5,
            -self.size.y * 0.5,
            self.size.x,
            self.size.y,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use block_renderer::PALETTE;

    fn spawn(world: &mut PhysicsWorld, pending: PendingBody) -> Body {
        let handle = world.add_rectangles([pending.desc()])[0];
        pending.attach(handle)
    }

    fn block(x: f32, y: f32, color: Color) -> PendingBody {
        Body::rectangle(x, y, 30.0, 30.0, color, BodyOptions::default())
    }

    #[test]
    fn test_attach_keeps_size_and_color() {
        let mut world = PhysicsWorld::new();
        let pending = Body::rectangle(10.0, 20.0, 30.0, 40.0, PALETTE[3], Default::default());
        let body = spawn(&mut world, pending);

        assert_eq!(body.size, Vec2::new(30.0, 40.0));
        assert_eq!(body.color, PALETTE[3]);
        assert!(world.contains(body.handle));
    }

    #[test]
    fn test_draw_emits_one_rect_at_body_position() {
        let mut world = PhysicsWorld::new();
        let body = spawn(&mut world, block(100.0, 200.0, PALETTE[1]));
        let mut canvas = Canvas::new(800, 600).unwrap();

        body.draw(&world, &mut canvas, 12.0);

        let rects = canvas.instances();
        assert_eq!(rects.len(), 1);
        assert!((rects[0].center[0] - 100.0).abs() < 1e-4);
        assert!((rects[0].center[1] - 200.0).abs() < 1e-4);
        assert_eq!(rects[0].half_size, [15.0, 15.0]);
        assert_eq!(rects[0].fill, PALETTE[1].to_array());
        assert_eq!(rects[0].glow_color, PALETTE[1].to_array());
        assert_eq!(rects[0].glow_radius, 12.0);
    }

    #[test]
    fn test_draw_follows_rotation() {
        let mut world = PhysicsWorld::new();
        let options = BodyOptions {
            angle: std::f32::consts::FRAC_PI_2,
            ..BodyOptions::fixed()
        };
        let body = spawn(
            &mut world,
            Body::rectangle(50.0, 50.0, 60.0, 20.0, PALETTE[0], options),
        );
        let mut canvas = Canvas::new(800, 600).unwrap();

        body.draw(&world, &mut canvas, 0.0);

        let axes = canvas.instances()[0].axes;
        assert!(axes[0].abs() < 1e-5);
        assert!((axes[1] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_draw_does_not_leak_paint_state() {
        let mut world = PhysicsWorld::new();
        let body = spawn(&mut world, block(100.0, 200.0, PALETTE[4]));
        let mut canvas = Canvas::new(800, 600).unwrap();
        let before = *canvas.state();

        body.draw(&world, &mut canvas, 5.0);
        body.draw(&world, &mut canvas, 5.0);

        assert_eq!(*canvas.state(), before);
        // Second draw starts from the same untransformed state
        assert_eq!(canvas.instances()[0], canvas.instances()[1]);
    }

    #[test]
    fn test_invisible_wall_draws_nothing() {
        let mut world = PhysicsWorld::new();
        let invisible = Color::transparent();
        let pending = Body::rectangle(0.0, 0.0, 100.0, 100.0, invisible, BodyOptions::fixed());
        let wall = spawn(&mut world, pending);
        let mut canvas = Canvas::new(800, 600).unwrap();

        wall.draw(&world, &mut canvas, 30.0);

        assert!(canvas.instances().is_empty());
    }
}
