use clap::Parser;

use crate::{config::SnowmanConfig, utils::version};

fn positive_number(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|_| format!("`{raw}` is not a number"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("expected a positive number, got {raw}"))
    }
}

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 1.0, value_parser = positive_number)]
    pub tick_rate: f64,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 10.0, value_parser = positive_number)]
    pub frame_rate: f64,

    /// Size multiplier for the whole figure
    #[arg(short, long, value_name = "FLOAT", value_parser = positive_number)]
    pub scale: Option<f64>,

    /// Turtle speed, 0 being the fastest
    #[arg(long, value_name = "INT")]
    pub speed: Option<u8>,

    /// Text inside the speech bubble
    #[arg(short, long, value_name = "TEXT")]
    pub caption: Option<String>,

    /// Print the recorded drawing commands as JSON instead of opening the terminal view
    #[arg(long)]
    pub dump: bool,
}

impl Cli {
    /// Command line values win over the configuration file.
    pub fn apply(&self, settings: &mut SnowmanConfig) {
        if let Some(scale) = self.scale {
            settings.scale = scale;
        }
        if let Some(speed) = self.speed {
            settings.speed = speed;
        }
        if let Some(caption) = &self.caption {
            settings.caption.clone_from(caption);
        }
    }
}
