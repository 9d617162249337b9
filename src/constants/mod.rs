pub mod snowman;

pub const TITLE: &str = "Festive Snowman";

pub const FOOTER_HEIGHT: u16 = 1;
pub const CANVAS_PADDING: f64 = 10.0;
