use serde::{Deserialize, Serialize};

use crate::turtle::{Align, Font, PenColor, Point};

/// A single pen instruction inside a [`Shape::Path`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathStep {
    Forward(f64),
    Left(f64),
    SetHeading(f64),
    MoveTo(Point),
    PenUp,
    PenDown,
}

/// A drawing primitive and everything needed to put it on a surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Outline only.
    Circle { center: Point, radius: f64, color: PenColor, width: f64 },
    /// Filled; `corner` is where tracing starts, the rectangle extends right and up from it.
    Rectangle { corner: Point, width: f64, height: f64, color: PenColor, line_width: f64 },
    Dot { center: Point, diameter: f64, color: PenColor },
    Stroke { from: Point, heading: f64, length: f64, color: PenColor, width: f64 },
    /// A filled contour traced step by step from `start`.
    Path { start: Point, heading: f64, steps: Vec<PathStep>, outline: PenColor, fill: PenColor, width: f64 },
    Text { anchor: Point, text: String, align: Align, font: Font, color: PenColor },
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Circle { .. } => "circle",
            Shape::Rectangle { .. } => "rectangle",
            Shape::Dot { .. } => "dot",
            Shape::Stroke { .. } => "stroke",
            Shape::Path { .. } => "path",
            Shape::Text { .. } => "text",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_names() {
        let stroke =
            Shape::Stroke { from: Point::new(1.0, 2.0), heading: 0.0, length: 3.0, color: PenColor::Brown, width: 1.0 };
        assert_eq!(stroke.name(), "stroke");

        let dot = Shape::Dot { center: Point::ORIGIN, diameter: 1.0, color: PenColor::Black };
        assert_eq!(dot.name(), "dot");
    }
}
