use color_eyre::eyre::Result;
use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::{layout::Rect, Frame};
use tracing::debug;

use super::Page;
use crate::{
    action::Action,
    components::canvas::SnowmanCanvas,
    config::{Config, SnowmanConfig},
    constants::CANVAS_PADDING,
    snowman::draw_snowman,
    turtle::Turtle,
};

/// Shows the finished drawing until the user asks to leave.
#[derive(Default)]
pub struct SnowmanPage {
    settings: SnowmanConfig,
    turtle: Turtle,
}

impl SnowmanPage {
    pub fn new(settings: SnowmanConfig) -> Self {
        Self { settings, ..Default::default() }
    }

    pub fn turtle(&self) -> &Turtle {
        &self.turtle
    }
}

impl Page for SnowmanPage {
    fn register_config_handler(&mut self, config: Config) -> Result<()> {
        self.settings = config.snowman;
        Ok(())
    }

    fn init(&mut self) -> Result<()> {
        self.turtle = Turtle::new();
        draw_snowman(&mut self.turtle, self.settings.scale, self.settings.speed, &self.settings.caption)?;
        debug!("Recorded {} commands, {} marks", self.turtle.commands().len(), self.turtle.marks().len());
        Ok(())
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match mouse.kind {
            MouseEventKind::Down(_) => Ok(Some(Action::Quit)),
            _ => Ok(None),
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>, rect: Rect) -> Result<()> {
        let canvas = SnowmanCanvas::new(self.turtle.marks(), self.turtle.bounds()).padding(CANVAS_PADDING);
        f.render_widget(canvas, rect);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyModifiers, MouseButton};
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::{tui::Event, turtle::SurfaceCommand};

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent { kind, column: 3, row: 4, modifiers: KeyModifiers::empty() }
    }

    #[test]
    fn test_init_draws_with_configured_scale() -> Result<()> {
        let settings = SnowmanConfig { scale: 1.5, speed: 3, ..Default::default() };
        let mut page = SnowmanPage::new(settings);
        page.init()?;

        let commands = page.turtle().commands();
        assert_eq!(commands.first(), Some(&SurfaceCommand::SetSpeed { speed: 3 }));
        assert_eq!(commands.last(), Some(&SurfaceCommand::HideCursor));
        let (min, max) = page.turtle().bounds().unwrap();
        // Bottom of the lowest body circle.
        assert!((min.y - -150.0).abs() < 1e-6);
        assert!(max.y > 0.0);
        Ok(())
    }

    #[test]
    fn test_init_twice_does_not_duplicate() -> Result<()> {
        let mut page = SnowmanPage::new(SnowmanConfig::default());
        page.init()?;
        let first = page.turtle().commands().len();
        page.init()?;
        assert_eq!(page.turtle().commands().len(), first);
        Ok(())
    }

    #[test]
    fn test_config_handler_replaces_settings() -> Result<()> {
        let mut page = SnowmanPage::default();
        let mut config = Config::default();
        config.snowman.caption = "Ho ho ho".to_string();
        page.register_config_handler(config)?;
        page.init()?;

        let caption = page.turtle().commands().iter().find_map(|command| match command {
            SurfaceCommand::WriteText { text, .. } => Some(text.clone()),
            _ => None,
        });
        assert_eq!(caption.as_deref(), Some("Ho ho ho"));
        Ok(())
    }

    #[test]
    fn test_click_quits() -> Result<()> {
        let mut page = SnowmanPage::default();
        let click = Event::Mouse(mouse(MouseEventKind::Down(MouseButton::Left)));
        assert_eq!(page.handle_events(Some(click))?, Some(Action::Quit));

        let right = Event::Mouse(mouse(MouseEventKind::Down(MouseButton::Right)));
        assert_eq!(page.handle_events(Some(right))?, Some(Action::Quit));

        assert_eq!(page.handle_events(Some(Event::Mouse(mouse(MouseEventKind::Moved))))?, None);
        assert_eq!(page.handle_events(Some(Event::Tick))?, None);
        Ok(())
    }

    #[test]
    fn test_draw_shows_caption() -> Result<()> {
        let mut page = SnowmanPage::new(SnowmanConfig { scale: 1.0, ..Default::default() });
        page.init()?;

        let mut terminal = Terminal::new(TestBackend::new(80, 40))?;
        terminal.draw(|f| {
            let area = f.area();
            page.draw(f, area).unwrap();
        })?;

        let content: String = terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect();
        assert!(content.contains("Merry Christmas!"));
        Ok(())
    }
}
