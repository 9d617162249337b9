//! Turtle-style drawing surface.
//!
//! Coordinates follow the classic turtle convention: the origin is the centre of the canvas, `y` grows
//! upwards and headings are degrees counter-clockwise from the positive `x` axis.

pub mod canvas;
pub mod pen;

use color_eyre::eyre::Result;
use derive_builder::Builder;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub use crate::turtle::{
    canvas::{Mark, Turtle},
    pen::PenState,
};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point `distance` away along `heading` degrees.
    pub fn advance(&self, heading: f64, distance: f64) -> Point {
        let radians = heading.to_radians();
        Point { x: self.x + distance * radians.cos(), y: self.y + distance * radians.sin() }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Heading in degrees from `self` towards `other`.
    pub fn heading_to(&self, other: &Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PenColor {
    #[default]
    Black,
    White,
    Red,
    Blue,
    Orange,
    Brown,
}

impl From<PenColor> for Color {
    fn from(color: PenColor) -> Self {
        match color {
            PenColor::Black => Color::Black,
            PenColor::White => Color::White,
            PenColor::Red => Color::Red,
            PenColor::Blue => Color::Blue,
            PenColor::Orange => Color::Rgb(255, 165, 0),
            PenColor::Brown => Color::Rgb(165, 42, 42),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct Font {
    #[builder(default = "\"Arial\".to_string()")]
    pub family: String,
    pub size: u32,
    #[builder(default)]
    pub bold: bool,
}

/// One operation issued against a [`Surface`], in the order it was issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceCommand {
    PenUp,
    PenDown,
    MoveTo { to: Point },
    SetHeading { degrees: f64 },
    Forward { distance: f64 },
    TurnLeft { degrees: f64 },
    SetColor { color: PenColor },
    SetFillColor { color: PenColor },
    SetPenSize { width: f64 },
    SetSpeed { speed: u8 },
    BeginFill,
    EndFill,
    StrokeCircle { radius: f64 },
    PlaceDot { diameter: f64 },
    WriteText { text: String, align: Align, font: Font },
    HideCursor,
}

pub trait Surface {
    fn pen_up(&mut self) -> Result<()>;
    fn pen_down(&mut self) -> Result<()>;
    fn move_to(&mut self, to: Point) -> Result<()>;
    fn set_heading(&mut self, degrees: f64) -> Result<()>;
    fn forward(&mut self, distance: f64) -> Result<()>;
    fn turn_left(&mut self, degrees: f64) -> Result<()>;
    fn set_color(&mut self, color: PenColor) -> Result<()>;
    fn set_fill_color(&mut self, color: PenColor) -> Result<()>;
    fn set_pen_size(&mut self, width: f64) -> Result<()>;
    fn set_speed(&mut self, speed: u8) -> Result<()>;
    fn begin_fill(&mut self) -> Result<()>;
    fn end_fill(&mut self) -> Result<()>;
    /// Strokes a full circle whose centre lies `radius` to the left of the current heading.
    fn stroke_circle(&mut self, radius: f64) -> Result<()>;
    fn place_dot(&mut self, diameter: f64) -> Result<()>;
    fn write_text(&mut self, text: &str, align: Align, font: &Font) -> Result<()>;
    fn hide_cursor(&mut self) -> Result<()>;
    fn position(&self) -> Point;
    fn heading(&self) -> f64;
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_advance_along_heading() {
        let p = Point::ORIGIN.advance(90.0, 10.0);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);

        let p = Point::new(1.0, 1.0).advance(180.0, 2.0);
        assert!((p.x + 1.0).abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_heading_to() {
        assert!((Point::ORIGIN.heading_to(&Point::new(0.0, 5.0)) - 90.0).abs() < 1e-9);
        assert!((Point::ORIGIN.heading_to(&Point::new(-5.0, 0.0)) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_pen_color_names() {
        assert_eq!(PenColor::from_str("orange").unwrap(), PenColor::Orange);
        assert_eq!(PenColor::Brown.to_string(), "brown");
        assert!(PenColor::from_str("mauve").is_err());
    }

    #[test]
    fn test_font_builder_defaults() {
        let font = FontBuilder::default().size(16u32).bold(true).build().unwrap();
        assert_eq!(font.family, "Arial");
        assert_eq!(font.size, 16);
        assert!(font.bold);
    }

    #[test]
    fn test_command_serializes_with_op_tag() {
        let json = serde_json::to_string(&SurfaceCommand::StrokeCircle { radius: 50.0 }).unwrap();
        assert_eq!(json, r#"{"op":"stroke_circle","radius":50.0}"#);
    }
}
