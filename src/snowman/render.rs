//! Replays shape descriptors against a [`Surface`].
//!
//! Every shape sets the pen attributes it relies on before touching the canvas, so nothing one shape
//! leaves behind (colour, heading, pen width, pen state) changes how the next one looks.

use color_eyre::eyre::Result;

use crate::{
    snowman::shapes::{PathStep, Shape},
    turtle::{Point, Surface},
};

fn lift_to<S: Surface + ?Sized>(surface: &mut S, to: Point) -> Result<()> {
    surface.pen_up()?;
    surface.move_to(to)
}

fn apply_step<S: Surface + ?Sized>(surface: &mut S, step: &PathStep) -> Result<()> {
    match *step {
        PathStep::Forward(distance) => surface.forward(distance),
        PathStep::Left(degrees) => surface.turn_left(degrees),
        PathStep::SetHeading(degrees) => surface.set_heading(degrees),
        PathStep::MoveTo(to) => surface.move_to(to),
        PathStep::PenUp => surface.pen_up(),
        PathStep::PenDown => surface.pen_down(),
    }
}

pub fn render_shape<S: Surface + ?Sized>(surface: &mut S, shape: &Shape) -> Result<()> {
    match shape {
        Shape::Circle { center, radius, color, width } => {
            lift_to(surface, Point::new(center.x, center.y - radius))?;
            surface.set_heading(0.0)?;
            surface.set_color(*color)?;
            surface.set_pen_size(*width)?;
            surface.pen_down()?;
            surface.stroke_circle(*radius)?;
        },
        Shape::Rectangle { corner, width, height, color, line_width } => {
            lift_to(surface, *corner)?;
            surface.set_heading(0.0)?;
            surface.pen_down()?;
            surface.set_color(*color)?;
            surface.set_fill_color(*color)?;
            surface.set_pen_size(*line_width)?;
            surface.begin_fill()?;
            for _ in 0..2 {
                surface.forward(*width)?;
                surface.turn_left(90.0)?;
                surface.forward(*height)?;
                surface.turn_left(90.0)?;
            }
            surface.end_fill()?;
        },
        Shape::Dot { center, diameter, color } => {
            lift_to(surface, *center)?;
            surface.set_color(*color)?;
            surface.pen_down()?;
            surface.place_dot(*diameter)?;
        },
        Shape::Stroke { from, heading, length, color, width } => {
            lift_to(surface, *from)?;
            surface.set_heading(*heading)?;
            surface.set_color(*color)?;
            surface.set_pen_size(*width)?;
            surface.pen_down()?;
            surface.forward(*length)?;
        },
        Shape::Path { start, heading, steps, outline, fill, width } => {
            lift_to(surface, *start)?;
            surface.set_heading(*heading)?;
            surface.set_color(*outline)?;
            surface.set_fill_color(*fill)?;
            surface.set_pen_size(*width)?;
            surface.pen_down()?;
            surface.begin_fill()?;
            for step in steps {
                apply_step(surface, step)?;
            }
            surface.end_fill()?;
        },
        Shape::Text { anchor, text, align, font, color } => {
            lift_to(surface, *anchor)?;
            surface.set_color(*color)?;
            surface.write_text(text, *align, font)?;
        },
    }
    Ok(())
}

pub fn render<S: Surface + ?Sized>(surface: &mut S, shapes: &[Shape]) -> Result<()> {
    for shape in shapes {
        log::trace!("rendering {}", shape.name());
        render_shape(surface, shape)?;
    }
    Ok(())
}
