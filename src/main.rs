pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod constants;
pub mod pages;
pub mod snowman;
pub mod tui;
pub mod turtle;
pub mod utils;

use clap::Parser;
use color_eyre::eyre::Result;

use crate::{
    app::App,
    cli::Cli,
    config::Config,
    snowman::draw_snowman,
    turtle::Turtle,
    utils::{initialize_logging, initialize_panic_handler},
};

fn dump(config: &Config) -> Result<()> {
    let mut turtle = Turtle::new();
    let settings = &config.snowman;
    draw_snowman(&mut turtle, settings.scale, settings.speed, &settings.caption)?;
    println!("{}", serde_json::to_string_pretty(turtle.commands())?);
    Ok(())
}

async fn tokio_main() -> Result<()> {
    let args = Cli::parse();

    initialize_logging()?;

    initialize_panic_handler()?;

    let mut config = Config::new()?;
    args.apply(&mut config.snowman);

    if args.dump {
        return dump(&config);
    }

    let mut app = App::new(config, args.tick_rate, args.frame_rate);
    app.run().await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
