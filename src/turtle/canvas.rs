use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};

use super::{
    pen::{normalize_heading, PenState},
    Align, Font, PenColor, Point, Surface, SurfaceCommand,
};

/// Vertices used to approximate a stroked circle inside a fill contour.
const CIRCLE_FILL_STEPS: usize = 60;

/// Something left behind on the canvas by the turtle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mark {
    Line { from: Point, to: Point, color: PenColor, width: f64 },
    Circle { center: Point, radius: f64, color: PenColor, width: f64 },
    Dot { center: Point, diameter: f64, color: PenColor },
    Polygon { vertices: Vec<Point>, color: PenColor },
    Text { anchor: Point, text: String, align: Align, font: Font, color: PenColor },
}

impl Mark {
    /// Labels count as their anchor only; their printed width depends on the display.
    fn extent(&self) -> (Point, Point) {
        match self {
            Mark::Line { from, to, .. } => {
                (Point::new(from.x.min(to.x), from.y.min(to.y)), Point::new(from.x.max(to.x), from.y.max(to.y)))
            },
            Mark::Circle { center, radius, .. } => {
                (Point::new(center.x - radius, center.y - radius), Point::new(center.x + radius, center.y + radius))
            },
            Mark::Dot { center, diameter, .. } => {
                let r = diameter / 2.0;
                (Point::new(center.x - r, center.y - r), Point::new(center.x + r, center.y + r))
            },
            Mark::Polygon { vertices, .. } => vertices.iter().fold(
                (Point::new(f64::INFINITY, f64::INFINITY), Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY)),
                |(min, max), v| {
                    (Point::new(min.x.min(v.x), min.y.min(v.y)), Point::new(max.x.max(v.x), max.y.max(v.y)))
                },
            ),
            Mark::Text { anchor, .. } => (*anchor, *anchor),
        }
    }
}

#[derive(Debug)]
struct PendingFill {
    slot: usize,
    vertices: Vec<Point>,
}

/// The default [`Surface`]: tracks pen state, records every command and collects marks.
#[derive(Debug, Default)]
pub struct Turtle {
    pen: PenState,
    commands: Vec<SurfaceCommand>,
    marks: Vec<Mark>,
    fill: Option<PendingFill>,
}

impl Turtle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pen(&self) -> &PenState {
        &self.pen
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Lower-left and upper-right corners enclosing every mark, if anything was drawn.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        self.marks.iter().map(Mark::extent).reduce(|(min_a, max_a), (min_b, max_b)| {
            (
                Point::new(min_a.x.min(min_b.x), min_a.y.min(min_b.y)),
                Point::new(max_a.x.max(max_b.x), max_a.y.max(max_b.y)),
            )
        })
    }

    fn record(&mut self, command: SurfaceCommand) {
        log::trace!("{command:?}");
        self.commands.push(command);
    }

    fn travel(&mut self, to: Point) {
        let from = self.pen.position;
        if self.pen.pen_down {
            self.marks.push(Mark::Line { from, to, color: self.pen.stroke_color, width: self.pen.pen_size });
        }
        if let Some(fill) = self.fill.as_mut() {
            fill.vertices.push(to);
        }
        self.pen.position = to;
    }
}

impl Surface for Turtle {
    fn pen_up(&mut self) -> Result<()> {
        self.record(SurfaceCommand::PenUp);
        self.pen.pen_down = false;
        Ok(())
    }

    fn pen_down(&mut self) -> Result<()> {
        self.record(SurfaceCommand::PenDown);
        self.pen.pen_down = true;
        Ok(())
    }

    fn move_to(&mut self, to: Point) -> Result<()> {
        self.record(SurfaceCommand::MoveTo { to });
        self.travel(to);
        Ok(())
    }

    fn set_heading(&mut self, degrees: f64) -> Result<()> {
        self.record(SurfaceCommand::SetHeading { degrees });
        self.pen.set_heading(degrees);
        Ok(())
    }

    fn forward(&mut self, distance: f64) -> Result<()> {
        self.record(SurfaceCommand::Forward { distance });
        let to = self.pen.ahead(distance);
        self.travel(to);
        Ok(())
    }

    fn turn_left(&mut self, degrees: f64) -> Result<()> {
        self.record(SurfaceCommand::TurnLeft { degrees });
        self.pen.turn_left(degrees);
        Ok(())
    }

    fn set_color(&mut self, color: PenColor) -> Result<()> {
        self.record(SurfaceCommand::SetColor { color });
        self.pen.stroke_color = color;
        Ok(())
    }

    fn set_fill_color(&mut self, color: PenColor) -> Result<()> {
        self.record(SurfaceCommand::SetFillColor { color });
        self.pen.fill_color = color;
        Ok(())
    }

    fn set_pen_size(&mut self, width: f64) -> Result<()> {
        self.record(SurfaceCommand::SetPenSize { width });
        self.pen.pen_size = width;
        Ok(())
    }

    fn set_speed(&mut self, speed: u8) -> Result<()> {
        self.record(SurfaceCommand::SetSpeed { speed });
        self.pen.speed = speed;
        Ok(())
    }

    fn begin_fill(&mut self) -> Result<()> {
        self.record(SurfaceCommand::BeginFill);
        self.fill = Some(PendingFill { slot: self.marks.len(), vertices: vec![self.pen.position] });
        Ok(())
    }

    fn end_fill(&mut self) -> Result<()> {
        self.record(SurfaceCommand::EndFill);
        if let Some(PendingFill { slot, vertices }) = self.fill.take() {
            if vertices.len() > 2 {
                // Fills sit beneath the outline drawn while they were open.
                self.marks.insert(slot, Mark::Polygon { vertices, color: self.pen.fill_color });
            }
        }
        Ok(())
    }

    fn stroke_circle(&mut self, radius: f64) -> Result<()> {
        self.record(SurfaceCommand::StrokeCircle { radius });
        let center = self.pen.circle_center(radius);
        if self.pen.pen_down {
            self.marks.push(Mark::Circle { center, radius, color: self.pen.stroke_color, width: self.pen.pen_size });
        }
        if let Some(fill) = self.fill.as_mut() {
            let start = center.heading_to(&self.pen.position);
            fill.vertices.extend((1..=CIRCLE_FILL_STEPS).map(|step| {
                center.advance(normalize_heading(start + 360.0 * step as f64 / CIRCLE_FILL_STEPS as f64), radius)
            }));
        }
        Ok(())
    }

    fn place_dot(&mut self, diameter: f64) -> Result<()> {
        self.record(SurfaceCommand::PlaceDot { diameter });
        self.marks.push(Mark::Dot { center: self.pen.position, diameter, color: self.pen.stroke_color });
        Ok(())
    }

    fn write_text(&mut self, text: &str, align: Align, font: &Font) -> Result<()> {
        self.record(SurfaceCommand::WriteText { text: text.to_string(), align, font: font.clone() });
        self.marks.push(Mark::Text {
            anchor: self.pen.position,
            text: text.to_string(),
            align,
            font: font.clone(),
            color: self.pen.stroke_color,
        });
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.record(SurfaceCommand::HideCursor);
        self.pen.visible = false;
        Ok(())
    }

    fn position(&self) -> Point {
        self.pen.position
    }

    fn heading(&self) -> f64 {
        self.pen.heading
    }
}
