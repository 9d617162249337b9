//! Pure geometry of the snowman: turns a scale into an ordered list of [`Shape`]s.

use std::f64::consts::PI;

use color_eyre::eyre::Result;

use crate::{
    constants::snowman::*,
    snowman::shapes::{PathStep, Shape},
    turtle::{Align, FontBuilder, PenColor, Point},
};

/// Circle outline centred on `center`, traced from its lowest point.
pub fn circle(center: Point, radius: f64, color: PenColor) -> Shape {
    Shape::Circle { center, radius, color, width: HAIRLINE }
}

/// Filled rectangle anchored at `corner`; black unless a colour is given.
pub fn rectangle(corner: Point, width: f64, height: f64, color: Option<PenColor>) -> Shape {
    Shape::Rectangle { corner, width, height, color: color.unwrap_or(HAT_COLOR), line_width: HAIRLINE }
}

/// A palm dot and three fingers fanning out from `anchor` around `direction`.
pub fn hand(anchor: Point, direction: f64, scale: f64) -> Vec<Shape> {
    let palm = Shape::Dot { center: anchor, diameter: PALM_SIZE * scale, color: ARM_COLOR };
    let fingers = FINGER_SPREAD.iter().map(|offset| Shape::Stroke {
        from: anchor,
        heading: direction + offset,
        length: FINGER_LENGTH * scale,
        color: ARM_COLOR,
        width: ARM_WIDTH * scale,
    });

    std::iter::once(palm).chain(fingers).collect()
}

/// Heading in degrees from `tail_start` towards the canvas origin.
pub fn tail_heading(tail_start: Point) -> f64 {
    (-tail_start.y).atan2(-tail_start.x).to_degrees()
}

fn rounded_corner(radius: f64) -> impl Iterator<Item = PathStep> {
    let step = (2.0 * PI * radius) / 360.0;
    std::iter::repeat([PathStep::Forward(step), PathStep::Left(1.0)]).take(ARC_STEPS).flatten()
}

/// Rounded speech bubble whose lower-left corner sits at `anchor`, with a tail and a centred caption.
pub fn speech_bubble(anchor: Point, text: &str, scale: f64) -> Result<Vec<Shape>> {
    let width = BUBBLE_WIDTH * scale;
    let height = BUBBLE_HEIGHT * scale;
    let radius = BUBBLE_CORNER_RADIUS * scale;

    let mut steps = Vec::with_capacity(4 * (2 * ARC_STEPS + 1) + 11);
    for side in [width, height, width, height] {
        steps.push(PathStep::Forward(side - 2.0 * radius));
        steps.extend(rounded_corner(radius));
    }

    let tail_start = Point::new(anchor.x + width / 3.0, anchor.y);
    let tip = Point::new(tail_start.x + TAIL_TIP_OFFSET * scale, anchor.y);
    let back = Point::new(tail_start.x - TAIL_BACK_OFFSET * scale, anchor.y);
    let drop = Point::new(tail_start.x, anchor.y - TAIL_HEIGHT * scale);

    // The tail is traced inside the same fill as the body, pen-up hops included.
    steps.extend([
        PathStep::PenUp,
        PathStep::MoveTo(tip),
        PathStep::SetHeading(tail_heading(tail_start)),
        PathStep::PenDown,
        PathStep::PenUp,
        PathStep::MoveTo(back),
        PathStep::PenUp,
        PathStep::MoveTo(tip),
        PathStep::PenDown,
        PathStep::MoveTo(drop),
        PathStep::MoveTo(back),
        PathStep::MoveTo(tip),
    ]);

    let body = Shape::Path {
        start: Point::new(anchor.x + radius, anchor.y),
        heading: 0.0,
        steps,
        outline: BUBBLE_OUTLINE,
        fill: BUBBLE_FILL,
        width: ARM_WIDTH * scale,
    };
    let caption = Shape::Text {
        anchor: Point::new(anchor.x + width / 2.0, anchor.y + height / 2.0),
        text: text.to_string(),
        align: Align::Center,
        font: FontBuilder::default().family(CAPTION_FONT).size((CAPTION_SIZE * scale) as u32).bold(true).build()?,
        color: CAPTION_COLOR,
    };

    Ok(vec![body, caption])
}

/// Positions of the three stacked body circles for one scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnowmanLayout {
    pub scale: f64,
    pub bottom_radius: f64,
    pub middle_radius: f64,
    pub head_radius: f64,
    pub bottom_center: Point,
    pub middle_center: Point,
    pub head_center: Point,
}

impl SnowmanLayout {
    pub fn new(scale: f64) -> Self {
        let bottom_radius = BOTTOM_RADIUS * scale;
        let middle_radius = MIDDLE_RADIUS * scale;
        let head_radius = HEAD_RADIUS * scale;

        let bottom_y = BOTTOM_CENTER_Y * scale;
        let middle_y = bottom_y + bottom_radius + middle_radius;
        let head_y = middle_y + middle_radius + head_radius;

        Self {
            scale,
            bottom_radius,
            middle_radius,
            head_radius,
            bottom_center: Point::new(0.0, bottom_y),
            middle_center: Point::new(0.0, middle_y),
            head_center: Point::new(0.0, head_y),
        }
    }

    pub fn body(&self) -> Vec<Shape> {
        vec![
            circle(self.bottom_center, self.bottom_radius, BODY_COLOR),
            circle(self.middle_center, self.middle_radius, BODY_COLOR),
            circle(self.head_center, self.head_radius, BODY_COLOR),
        ]
    }

    pub fn hat(&self) -> Vec<Shape> {
        let s = self.scale;
        let base_width = HAT_BASE_WIDTH * s;
        let base_height = HAT_BASE_HEIGHT * s;
        let top_width = HAT_TOP_WIDTH * s;
        let top_height = HAT_TOP_HEIGHT * s;
        let hat_y = self.head_center.y + self.head_radius - base_height * HAT_SINK_RATIO;

        let stripe_height = base_height * HAT_STRIPE_RATIO;
        let stripe_y = hat_y + (base_height - stripe_height) / 2.0;

        vec![
            rectangle(Point::new(-base_width / 2.0, hat_y), base_width, base_height, None),
            rectangle(Point::new(-base_width / 2.0, stripe_y), base_width, stripe_height, Some(HAT_STRIPE_COLOR)),
            rectangle(Point::new(-top_width / 2.0, hat_y + base_height), top_width, top_height, None),
        ]
    }

    pub fn eye_positions(&self) -> [Point; 2] {
        let y = self.head_center.y + self.head_radius * EYE_HEIGHT_RATIO;
        let x = EYE_OFFSET_X * self.scale;
        [Point::new(-x, y), Point::new(x, y)]
    }

    pub fn face(&self) -> Vec<Shape> {
        let eyes = self.eye_positions().into_iter().map(|center| Shape::Dot {
            center,
            diameter: EYE_SIZE * self.scale,
            color: EYE_COLOR,
        });
        let side = NOSE_SIDE * self.scale;
        let nose = Shape::Path {
            start: self.head_center,
            heading: NOSE_HEADING,
            steps: std::iter::repeat([PathStep::Forward(side), PathStep::Left(120.0)]).take(3).flatten().collect(),
            outline: NOSE_COLOR,
            fill: NOSE_COLOR,
            width: HAIRLINE,
        };

        eyes.chain(std::iter::once(nose)).collect()
    }

    pub fn button_positions(&self) -> Vec<Point> {
        let spacing = self.middle_radius * BUTTON_SPACING_RATIO;
        let top = self.middle_center.y + self.middle_radius;
        (0..BUTTON_COUNT).map(|i| Point::new(0.0, top - spacing * (i as f64 + 0.5))).collect()
    }

    pub fn buttons(&self) -> Vec<Shape> {
        self.button_positions()
            .into_iter()
            .map(|center| Shape::Dot { center, diameter: BUTTON_SIZE * self.scale, color: BUTTON_COLOR })
            .collect()
    }

    /// Where the arms leave the middle circle, left first.
    pub fn arm_roots(&self) -> [(Point, f64); 2] {
        let y = self.middle_center.y;
        [(Point::new(-self.middle_radius, y), LEFT_ARM_HEADING), (Point::new(self.middle_radius, y), RIGHT_ARM_HEADING)]
    }

    pub fn arms(&self) -> Vec<Shape> {
        let length = ARM_LENGTH * self.scale;
        self.arm_roots()
            .into_iter()
            .flat_map(|(from, heading)| {
                let arm = Shape::Stroke { from, heading, length, color: ARM_COLOR, width: ARM_WIDTH * self.scale };
                let end = from.advance(heading, length);
                std::iter::once(arm).chain(hand(end, heading, self.scale))
            })
            .collect()
    }

    pub fn bubble_anchor(&self) -> Point {
        Point::new(BUBBLE_ANCHOR.0 * self.scale, BUBBLE_ANCHOR.1 * self.scale)
    }

    /// Every shape of the figure in drawing order.
    pub fn shapes(&self, caption: &str) -> Result<Vec<Shape>> {
        let bubble = speech_bubble(self.bubble_anchor(), caption, self.scale)?;
        Ok([self.body(), self.hat(), self.face(), self.buttons(), self.arms(), bubble].into_iter().flatten().collect())
    }
}
