use serde::{Deserialize, Serialize};

use super::{PenColor, Point};

/// Everything a turtle remembers between two drawing operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenState {
    pub position: Point,
    /// Degrees, normalised to `[0, 360)`.
    pub heading: f64,
    pub pen_down: bool,
    pub stroke_color: PenColor,
    pub fill_color: PenColor,
    pub pen_size: f64,
    pub visible: bool,
    pub speed: u8,
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            heading: 0.0,
            pen_down: true,
            stroke_color: PenColor::Black,
            fill_color: PenColor::Black,
            pen_size: 1.0,
            visible: true,
            speed: 0,
        }
    }
}

impl PenState {
    pub fn set_heading(&mut self, degrees: f64) {
        self.heading = normalize_heading(degrees);
    }

    pub fn turn_left(&mut self, degrees: f64) {
        self.set_heading(self.heading + degrees);
    }

    /// Where the pen would end up after moving `distance` along its heading.
    pub fn ahead(&self, distance: f64) -> Point {
        self.position.advance(self.heading, distance)
    }

    /// Centre of the circle a pen traces when it turns left with the given radius.
    pub fn circle_center(&self, radius: f64) -> Point {
        self.position.advance(self.heading + 90.0, radius)
    }
}

pub fn normalize_heading(degrees: f64) -> f64 {
    let heading = degrees.rem_euclid(360.0);
    if heading >= 360.0 {
        0.0
    } else {
        heading
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_normalize_heading() {
        assert_eq!(normalize_heading(-90.0), 270.0);
        assert_eq!(normalize_heading(450.0), 90.0);
        assert_eq!(normalize_heading(360.0), 0.0);
        assert_eq!(normalize_heading(30.0), 30.0);
    }

    #[test]
    fn test_turn_left_wraps() {
        let mut pen = PenState::default();
        pen.set_heading(300.0);
        pen.turn_left(120.0);
        assert_eq!(pen.heading, 60.0);
    }

    #[test]
    fn test_circle_center_is_left_of_heading() {
        let pen = PenState { position: Point::new(0.0, -50.0), ..PenState::default() };
        let center = pen.circle_center(50.0);
        assert!(center.x.abs() < 1e-9);
        assert!(center.y.abs() < 1e-9);
    }
}
