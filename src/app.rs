use color_eyre::eyre::Result;
use ratatui::{
    layout::{Constraint, Layout},
    prelude::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Paragraph},
};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::{
    action::Action,
    config::Config,
    constants::FOOTER_HEIGHT,
    pages::{snowman::SnowmanPage, Page},
    tui::{self, Event},
};

/// Footer line telling the user how to leave.
pub fn exit_hint(keys: &[String]) -> String {
    match keys {
        [] => "Click to exit".to_string(),
        keys => format!("Press {} or click to exit", keys.join(", ")),
    }
}

pub struct App {
    config: Config,
    tick_rate: f64,
    frame_rate: f64,
    should_quit: bool,
    page: SnowmanPage,
}

impl App {
    pub fn new(config: Config, tick_rate: f64, frame_rate: f64) -> Self {
        let page = SnowmanPage::new(config.snowman.clone());
        Self { config, tick_rate, frame_rate, should_quit: false, page }
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = tui::Tui::new()?;
        tui.tick_rate(self.tick_rate);
        tui.frame_rate(self.frame_rate);
        tui.mouse(true);
        tui.title(&self.config.snowman.title)?;
        tui.enter()?;

        self.page.register_config_handler(self.config.clone())?;
        self.page.init()?;

        loop {
            if let Some(e) = tui.next().await {
                match &e {
                    Event::Error => action_tx.send(Action::Error("Failed to read terminal event".to_string()))?,
                    Event::Tick => action_tx.send(Action::Tick)?,
                    Event::Init | Event::Render => action_tx.send(Action::Render)?,
                    Event::Resize(x, y) => action_tx.send(Action::Resize(*x, *y))?,
                    Event::Key(key) => {
                        if let Some(action) = self.config.keybindings.get(key) {
                            log::info!("Got action: {action:?}");
                            action_tx.send(action.clone())?;
                        }
                    },
                    Event::Mouse(_) => {},
                }
                if let Some(action) = self.page.handle_events(Some(e))? {
                    action_tx.send(action)?;
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    log::debug!("{action:?}");
                }
                match &action {
                    Action::Tick => {},
                    Action::Quit => self.should_quit = true,
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        self.render(&mut tui, &action_tx)?;
                    },
                    Action::Render => self.render(&mut tui, &action_tx)?,
                    Action::Error(message) => log::error!("{message}"),
                }
                if let Some(action) = self.page.update(action)? {
                    action_tx.send(action)?
                }
            }
            if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn render(&mut self, tui: &mut tui::Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
        let title = format!(" {} ", self.config.snowman.title);
        let hint = exit_hint(&self.config.keybindings.keys_for(&Action::Quit));

        tui.draw(|f| {
            let [body, footer] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(FOOTER_HEIGHT)]).areas(f.area());

            let border = Block::bordered()
                .border_type(BorderType::Rounded)
                .title(Line::from(title).centered())
                .title_style(Style::default().add_modifier(Modifier::BOLD));
            let inner = border.inner(body);
            f.render_widget(border, body);

            if let Err(e) = self.page.draw(f, inner) {
                if action_tx.send(Action::Error(format!("Failed to draw: {e:?}"))).is_err() {
                    log::error!("Failed to draw: {e:?}");
                }
            }

            f.render_widget(Paragraph::new(hint).centered().style(Style::default().fg(Color::DarkGray)), footer);
        })?;

        Ok(())
    }
}
