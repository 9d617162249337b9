pub mod layout;
pub mod render;
pub mod shapes;

use color_eyre::eyre::Result;

use crate::{
    constants::snowman::BODY_COLOR,
    snowman::layout::SnowmanLayout,
    turtle::Surface,
};

/// Draws the whole figure onto `surface` in one pass and hides the cursor afterwards.
///
/// `scale` must be positive. Errors raised by the surface are returned unchanged.
pub fn draw_snowman<S: Surface + ?Sized>(surface: &mut S, scale: f64, speed: u8, caption: &str) -> Result<()> {
    let shapes = SnowmanLayout::new(scale).shapes(caption)?;
    log::info!("Drawing snowman: scale={scale} speed={speed} shapes={}", shapes.len());

    surface.set_speed(speed)?;
    surface.set_color(BODY_COLOR)?;
    render::render(surface, &shapes)?;
    surface.hide_cursor()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use color_eyre::eyre::{eyre, Result};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        constants::snowman::CAPTION,
        turtle::{Align, Font, Mark, PenColor, Point, SurfaceCommand, Turtle},
    };

    /// Fails on the n-th operation, standing in for a display that went away.
    struct FlakySurface {
        inner: Turtle,
        budget: usize,
    }

    impl FlakySurface {
        fn tick(&mut self) -> Result<()> {
            if self.budget == 0 {
                return Err(eyre!("display unavailable"));
            }
            self.budget -= 1;
            Ok(())
        }
    }

    impl Surface for FlakySurface {
        fn pen_up(&mut self) -> Result<()> {
            self.tick()?;
            self.inner.pen_up()
        }

        fn pen_down(&mut self) -> Result<()> {
            self.tick()?;
            self.inner.pen_down()
        }

        fn move_to(&mut self, to: Point) -> Result<()> {
            self.tick()?;
            self.inner.move_to(to)
        }

        fn set_heading(&mut self, degrees: f64) -> Result<()> {
            self.tick()?;
            self.inner.set_heading(degrees)
        }

        fn forward(&mut self, distance: f64) -> Result<()> {
            self.tick()?;
            self.inner.forward(distance)
        }

        fn turn_left(&mut self, degrees: f64) -> Result<()> {
            self.tick()?;
            self.inner.turn_left(degrees)
        }

        fn set_color(&mut self, color: PenColor) -> Result<()> {
            self.tick()?;
            self.inner.set_color(color)
        }

        fn set_fill_color(&mut self, color: PenColor) -> Result<()> {
            self.tick()?;
            self.inner.set_fill_color(color)
        }

        fn set_pen_size(&mut self, width: f64) -> Result<()> {
            self.tick()?;
            self.inner.set_pen_size(width)
        }

        fn set_speed(&mut self, speed: u8) -> Result<()> {
            self.tick()?;
            self.inner.set_speed(speed)
        }

        fn begin_fill(&mut self) -> Result<()> {
            self.tick()?;
            self.inner.begin_fill()
        }

        fn end_fill(&mut self) -> Result<()> {
            self.tick()?;
            self.inner.end_fill()
        }

        fn stroke_circle(&mut self, radius: f64) -> Result<()> {
            self.tick()?;
            self.inner.stroke_circle(radius)
        }

        fn place_dot(&mut self, diameter: f64) -> Result<()> {
            self.tick()?;
            self.inner.place_dot(diameter)
        }

        fn write_text(&mut self, text: &str, align: Align, font: &Font) -> Result<()> {
            self.tick()?;
            self.inner.write_text(text, align, font)
        }

        fn hide_cursor(&mut self) -> Result<()> {
            self.tick()?;
            self.inner.hide_cursor()
        }

        fn position(&self) -> Point {
            self.inner.position()
        }

        fn heading(&self) -> f64 {
            self.inner.heading()
        }
    }

    fn circles(turtle: &Turtle) -> Vec<(Point, f64)> {
        turtle
            .marks()
            .iter()
            .filter_map(|mark| match mark {
                Mark::Circle { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_unit_scale_end_to_end() -> Result<()> {
        let mut turtle = Turtle::new();
        draw_snowman(&mut turtle, 1.0, 0, CAPTION)?;

        let circles = circles(&turtle);
        let expected = [(Point::new(0.0, -50.0), 50.0), (Point::new(0.0, 30.0), 30.0), (Point::new(0.0, 80.0), 20.0)];
        assert_eq!(circles.len(), expected.len());
        for ((center, radius), (want_center, want_radius)) in circles.into_iter().zip(expected) {
            assert!(center.distance_to(&want_center) < 1e-9, "{center:?} != {want_center:?}");
            assert_eq!(radius, want_radius);
        }

        assert_eq!(turtle.commands().first(), Some(&SurfaceCommand::SetSpeed { speed: 0 }));
        assert_eq!(turtle.commands().last(), Some(&SurfaceCommand::HideCursor));
        assert!(!turtle.pen().visible);
        Ok(())
    }

    #[test]
    fn test_circle_commands_start_at_bottom() -> Result<()> {
        let mut turtle = Turtle::new();
        draw_snowman(&mut turtle, 1.0, 0, CAPTION)?;

        let radii: Vec<f64> = turtle
            .commands()
            .iter()
            .filter_map(|command| match command {
                SurfaceCommand::StrokeCircle { radius } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![50.0, 30.0, 20.0]);
        assert!(turtle.commands().contains(&SurfaceCommand::MoveTo { to: Point::new(0.0, -100.0) }));
        Ok(())
    }

    #[test]
    fn test_drawing_is_deterministic() -> Result<()> {
        let mut first = Turtle::new();
        let mut second = Turtle::new();
        draw_snowman(&mut first, 1.5, 3, CAPTION)?;
        draw_snowman(&mut second, 1.5, 3, CAPTION)?;

        assert_eq!(first.commands(), second.commands());
        assert_eq!(first.marks(), second.marks());
        Ok(())
    }

    #[test]
    fn test_caption_is_written_last() -> Result<()> {
        let mut turtle = Turtle::new();
        draw_snowman(&mut turtle, 2.0, 0, "Ho ho ho")?;

        match turtle.marks().last() {
            Some(Mark::Text { text, font, anchor, .. }) => {
                assert_eq!(text, "Ho ho ho");
                assert_eq!(font.size, 16);
                assert_eq!(*anchor, Point::new(160.0 + 100.0, 380.0 + 40.0));
            },
            other => panic!("unexpected mark {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_bubble_fill_sits_under_its_outline() -> Result<()> {
        let mut turtle = Turtle::new();
        draw_snowman(&mut turtle, 1.0, 0, CAPTION)?;

        let white = turtle
            .marks()
            .iter()
            .position(|mark| matches!(mark, Mark::Polygon { color: PenColor::White, .. }))
            .ok_or_else(|| eyre!("bubble fill missing"))?;
        assert!(matches!(turtle.marks()[white + 1], Mark::Line { color: PenColor::Black, .. }));
        Ok(())
    }

    #[test]
    fn test_surface_errors_are_propagated() {
        let mut surface = FlakySurface { inner: Turtle::new(), budget: 25 };
        let err = draw_snowman(&mut surface, 1.0, 0, CAPTION).unwrap_err();
        assert_eq!(err.to_string(), "display unavailable");
        assert_eq!(surface.inner.commands().len(), 25);
    }
}
