//! Base dimensions of the figure. Every length here is multiplied by the scale before use.

use crate::turtle::PenColor;

pub const BOTTOM_RADIUS: f64 = 50.0;
pub const MIDDLE_RADIUS: f64 = 30.0;
pub const HEAD_RADIUS: f64 = 20.0;
pub const BOTTOM_CENTER_Y: f64 = -50.0;
pub const BODY_COLOR: PenColor = PenColor::Blue;

pub const HAT_BASE_WIDTH: f64 = 40.0;
pub const HAT_BASE_HEIGHT: f64 = 15.0;
pub const HAT_TOP_WIDTH: f64 = 30.0;
pub const HAT_TOP_HEIGHT: f64 = 25.0;
/// Fraction of the brim height that sinks into the head.
pub const HAT_SINK_RATIO: f64 = 0.1;
/// Stripe height as a fraction of the brim height.
pub const HAT_STRIPE_RATIO: f64 = 0.4;
pub const HAT_COLOR: PenColor = PenColor::Black;
pub const HAT_STRIPE_COLOR: PenColor = PenColor::Red;

pub const EYE_OFFSET_X: f64 = 7.0;
pub const EYE_HEIGHT_RATIO: f64 = 0.2;
pub const EYE_SIZE: f64 = 5.0;
pub const EYE_COLOR: PenColor = PenColor::Black;

pub const NOSE_SIDE: f64 = 8.0;
pub const NOSE_HEADING: f64 = -90.0;
pub const NOSE_COLOR: PenColor = PenColor::Orange;

pub const BUTTON_COUNT: usize = 3;
/// Button pitch as a fraction of the middle radius.
pub const BUTTON_SPACING_RATIO: f64 = 0.6;
pub const BUTTON_SIZE: f64 = 6.0;
pub const BUTTON_COLOR: PenColor = PenColor::Black;

pub const ARM_LENGTH: f64 = 40.0;
pub const ARM_WIDTH: f64 = 3.0;
pub const LEFT_ARM_HEADING: f64 = 150.0;
pub const RIGHT_ARM_HEADING: f64 = 30.0;
pub const ARM_COLOR: PenColor = PenColor::Brown;

pub const PALM_SIZE: f64 = 0.5;
pub const FINGER_LENGTH: f64 = 10.0;
pub const FINGER_SPREAD: [f64; 3] = [-20.0, 0.0, 20.0];

pub const BUBBLE_ANCHOR: (f64, f64) = (80.0, 190.0);
pub const BUBBLE_WIDTH: f64 = 100.0;
pub const BUBBLE_HEIGHT: f64 = 40.0;
pub const BUBBLE_CORNER_RADIUS: f64 = 15.0;
pub const BUBBLE_OUTLINE: PenColor = PenColor::Black;
pub const BUBBLE_FILL: PenColor = PenColor::White;
/// Straight segments per rounded corner; the pen turns one degree after each.
pub const ARC_STEPS: usize = 90;
pub const TAIL_TIP_OFFSET: f64 = 20.0;
pub const TAIL_BACK_OFFSET: f64 = 1.0;
pub const TAIL_HEIGHT: f64 = 20.0;

pub const CAPTION: &str = "Merry Christmas!";
pub const CAPTION_FONT: &str = "Arial";
pub const CAPTION_SIZE: f64 = 8.0;
pub const CAPTION_COLOR: PenColor = PenColor::Black;

/// Surface default pen width, used for outlines that are not scaled.
pub const HAIRLINE: f64 = 1.0;
