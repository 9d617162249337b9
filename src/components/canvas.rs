use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Line as TextLine,
    widgets::{
        canvas::{Canvas, Circle, Context, Line, Points},
        Widget,
    },
};

use crate::turtle::{Align, Mark, Point};

/// Sides of the polygon standing in for a dot.
const DOT_SIDES: usize = 24;

const BACKGROUND: Color = Color::White;

/// Paints turtle marks onto a braille canvas, scaled to fit the area.
#[derive(Debug)]
pub struct SnowmanCanvas<'a> {
    marks: &'a [Mark],
    bounds: Option<(Point, Point)>,
    padding: f64,
}

impl<'a> SnowmanCanvas<'a> {
    pub fn new(marks: &'a [Mark], bounds: Option<(Point, Point)>) -> Self {
        Self { marks, bounds, padding: 0.0 }
    }

    pub fn padding(self, padding: f64) -> Self {
        Self { padding, ..self }
    }
}

/// Canvas-space bounds showing `min..max` plus `padding` in `area`, with circles staying round.
///
/// A terminal cell is taken to be twice as tall as it is wide.
pub fn fit_bounds(min: Point, max: Point, area: Rect, padding: f64) -> ([f64; 2], [f64; 2]) {
    let width = (max.x - min.x + 2.0 * padding).max(f64::EPSILON);
    let height = (max.y - min.y + 2.0 * padding).max(f64::EPSILON);
    let columns = area.width.max(1) as f64;
    let rows = area.height.max(1) as f64;

    let column_unit = (width / columns).max(height / (2.0 * rows));
    let half_x = column_unit * columns / 2.0;
    let half_y = column_unit * 2.0 * rows / 2.0;
    let center = Point::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0);

    ([center.x - half_x, center.x + half_x], [center.y - half_y, center.y + half_y])
}

/// Left and right edges of a label printed one character per cell, `column_unit` canvas units wide.
pub fn label_span(anchor_x: f64, align: Align, chars: usize, column_unit: f64) -> (f64, f64) {
    let width = chars as f64 * column_unit;
    let left = match align {
        Align::Left => anchor_x,
        Align::Center => anchor_x - width / 2.0,
        Align::Right => anchor_x - width,
    };
    (left, left + width)
}

/// Zooms out around the same centre until every label fits horizontally, where it can fit at all.
pub fn fit_labels(x_bounds: [f64; 2], y_bounds: [f64; 2], marks: &[Mark], area: Rect) -> ([f64; 2], [f64; 2]) {
    let columns = area.width.max(1) as f64;
    let rows = area.height.max(1) as f64;
    let center = Point::new((x_bounds[0] + x_bounds[1]) / 2.0, (y_bounds[0] + y_bounds[1]) / 2.0);
    let half_columns = columns / 2.0;

    let mut column_unit = (x_bounds[1] - x_bounds[0]) / columns;
    for mark in marks {
        let Mark::Text { anchor, text, align, .. } = mark else {
            continue;
        };
        let chars = text.chars().count() as f64;
        let left_share = match align {
            Align::Left => 0.0,
            Align::Center => 0.5,
            Align::Right => 1.0,
        };
        let offset = anchor.x - center.x;
        // Each edge needs `unit * room >= distance`; labels wider than the area are left to clip.
        let edges = [(half_columns - left_share * chars, -offset), (half_columns - (1.0 - left_share) * chars, offset)];
        for (room, distance) in edges {
            if room > 0.0 && distance > 0.0 {
                column_unit = column_unit.max(distance / room);
            }
        }
    }

    let half_x = column_unit * half_columns;
    let half_y = column_unit * rows;
    ([center.x - half_x, center.x + half_x], [center.y - half_y, center.y + half_y])
}

/// Sample points inside `vertices` using the even-odd rule, one per `step` cell.
///
/// The contour is closed implicitly; self-intersections carve holes the way a turtle fill does.
pub fn scanline_fill(vertices: &[Point], step: (f64, f64)) -> Vec<(f64, f64)> {
    let (x_step, y_step) = step;
    if vertices.len() < 3 || x_step <= 0.0 || y_step <= 0.0 {
        return Vec::new();
    }

    let min_y = vertices.iter().map(|v| v.y).fold(f64::INFINITY, f64::min);
    let max_y = vertices.iter().map(|v| v.y).fold(f64::NEG_INFINITY, f64::max);
    let edges: Vec<(Point, Point)> =
        vertices.iter().zip(vertices.iter().cycle().skip(1)).map(|(a, b)| (*a, *b)).collect();

    let mut points = Vec::new();
    let mut y = min_y + y_step / 2.0;
    while y < max_y {
        let mut crossings: Vec<f64> = edges
            .iter()
            .filter(|(a, b)| (a.y <= y && b.y > y) || (b.y <= y && a.y > y))
            .map(|(a, b)| a.x + (y - a.y) / (b.y - a.y) * (b.x - a.x))
            .collect();
        crossings.sort_by(f64::total_cmp);

        for span in crossings.chunks_exact(2) {
            let mut x = span[0] + x_step / 2.0;
            while x < span[1] {
                points.push((x, y));
                x += x_step;
            }
        }
        y += y_step;
    }
    points
}

fn disk(center: Point, diameter: f64) -> Vec<Point> {
    (0..DOT_SIDES).map(|i| center.advance(360.0 * i as f64 / DOT_SIDES as f64, diameter / 2.0)).collect()
}

fn paint_mark(ctx: &mut Context<'_>, mark: &Mark, step: (f64, f64)) {
    match mark {
        Mark::Line { from, to, color, .. } => {
            ctx.draw(&Line::new(from.x, from.y, to.x, to.y, Color::from(*color)));
        },
        Mark::Circle { center, radius, color, .. } => {
            ctx.draw(&Circle { x: center.x, y: center.y, radius: *radius, color: Color::from(*color) });
        },
        Mark::Dot { center, diameter, color } => {
            let mut coords = scanline_fill(&disk(*center, *diameter), step);
            if coords.is_empty() {
                coords.push((center.x, center.y));
            }
            ctx.draw(&Points { coords: &coords, color: Color::from(*color) });
        },
        Mark::Polygon { vertices, color } => {
            let coords = scanline_fill(vertices, step);
            ctx.draw(&Points { coords: &coords, color: Color::from(*color) });
        },
        Mark::Text { anchor, text, align, font, color } => {
            // Braille packs two dot columns into a cell.
            let (x, _) = label_span(anchor.x, *align, text.chars().count(), step.0 * 2.0);
            let mut style = Style::default().fg(Color::from(*color));
            if font.bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            ctx.print(x, anchor.y, TextLine::styled(text.clone(), style));
        },
    }
}

impl Widget for SnowmanCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let Some((min, max)) = self.bounds else {
            return;
        };
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (x_bounds, y_bounds) = fit_bounds(min, max, area, self.padding);
        let (x_bounds, y_bounds) = fit_labels(x_bounds, y_bounds, self.marks, area);
        // Braille packs 2x4 dots into a cell.
        let step = (
            (x_bounds[1] - x_bounds[0]) / (area.width as f64 * 2.0),
            (y_bounds[1] - y_bounds[0]) / (area.height as f64 * 4.0),
        );

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(BACKGROUND)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                for mark in self.marks {
                    paint_mark(ctx, mark, step);
                    // Later marks cover earlier ones cell by cell.
                    ctx.layer();
                }
            })
            .render(area, buf);
    }
}
