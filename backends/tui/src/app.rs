use std::io::BufRead;

use crossterm::style::{Attribute, ContentStyle};
use greeter_core::{GreetEvent, Greeter, GreeterConfig, MemorySurface};
use tracing::info;

use crate::{
    error::TuiError,
    renderer::{RenderFrame, Renderer},
    terminal::Terminal,
};

const PROMPT: &str = "name> ";

/// Help line shown under the widget.
pub const HELP: &str = "type a name and press Enter · empty line greets · :focus · :name <text> · :q";

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the display name.
    SetName(String),
    /// Press the greet button.
    Greet,
    /// Focus the name input.
    Focus,
    /// Leave the loop.
    Quit,
}

impl Command {
    /// Parses a line read from the terminal.
    ///
    /// An empty line greets, `:q`/`:quit` quits, `:focus` focuses the input and
    /// `:name <text>` sets the name verbatim (so an empty name can be entered).
    /// Anything else is taken as the new name.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        match line.trim() {
            "" => Self::Greet,
            ":q" | ":quit" => Self::Quit,
            ":focus" => Self::Focus,
            ":name" => Self::SetName(String::new()),
            _ => line.strip_prefix(":name ").map_or_else(
                || Self::SetName(line.to_owned()),
                |rest| Self::SetName(rest.trim_start().to_owned()),
            ),
        }
    }
}

/// A greeter running in the terminal.
#[derive(Debug)]
pub struct TuiApp {
    terminal: Terminal,
    renderer: Renderer,
    greeter: Greeter<MemorySurface, Vec<GreetEvent>>,
    status: Option<String>,
}

impl TuiApp {
    /// Applies one command. Returns `false` when the app should stop.
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::SetName(name) => self.greeter.set_display_name(&name),
            Command::Greet => {
                self.greeter.handle_greet_action();
                for event in self.greeter.sink_mut().drain(..) {
                    info!(count = event.click_count, "greeted {}", event.display_name);
                    self.status = Some(event.composed_message);
                }
            }
            Command::Focus => {
                if !self.greeter.focus_name_input() {
                    self.status = Some("nothing to focus".into());
                }
            }
            Command::Quit => return false,
        }
        true
    }

    /// Runs the input loop until `:q` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or drawing fails.
    pub fn run(&mut self, input: impl BufRead) -> Result<(), TuiError> {
        self.greeter.on_attach();
        self.draw()?;
        for line in input.lines() {
            if !self.handle(Command::parse(&line?)) {
                break;
            }
            self.draw()?;
        }
        self.greeter.on_detach();
        Ok(())
    }

    /// Renders the widget and flushes it to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error when the terminal cannot be written to.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let frame = self.render_to_frame();
        self.terminal.render(&frame, PROMPT)
    }

    /// Lays out the widget, status and help without drawing.
    #[must_use]
    pub fn render_to_frame(&self) -> RenderFrame {
        let (tree, focused) = self
            .greeter
            .with_surface(|surface| (surface.tree().to_vec(), surface.focused().map(str::to_owned)));
        let mut frame = self.renderer.render(&tree, focused.as_deref());

        frame.push_blank();
        if let Some(status) = &self.status {
            let mut style = ContentStyle::new();
            style.attributes.set(Attribute::Bold);
            frame.push_text(status.clone(), style);
        }
        let mut dim = ContentStyle::new();
        dim.attributes.set(Attribute::Dim);
        frame.push_text(HELP, dim);
        frame
    }

    /// The hosted widget.
    #[must_use]
    pub const fn greeter(&self) -> &Greeter<MemorySurface, Vec<GreetEvent>> {
        &self.greeter
    }

    /// Provides immutable access to the terminal handle.
    #[must_use]
    pub const fn terminal(&self) -> &Terminal {
        &self.terminal
    }
}

/// Builder for [`TuiApp`] instances.
#[derive(Debug, Default)]
pub struct TuiAppBuilder {
    terminal: Option<Terminal>,
    config: GreeterConfig,
    slot: Option<String>,
}

impl TuiAppBuilder {
    /// Creates a new builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the terminal handle used by the application.
    #[must_use]
    pub fn with_terminal(mut self, terminal: Terminal) -> Self {
        self.terminal = Some(terminal);
        self
    }

    /// Sets the widget configuration.
    #[must_use]
    pub fn with_config(mut self, config: GreeterConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets text shown in the widget's slot area.
    #[must_use]
    pub fn with_slot(mut self, slot: Option<String>) -> Self {
        self.slot = slot;
        self
    }

    /// Consumes the builder and produces a [`TuiApp`].
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialised.
    pub fn build(self) -> Result<TuiApp, TuiError> {
        let terminal = match self.terminal {
            Some(terminal) => terminal,
            None => Terminal::stdout()?,
        };

        Ok(TuiApp {
            terminal,
            renderer: Renderer::new().with_slot(self.slot),
            greeter: Greeter::new(self.config, MemorySurface::new(), Vec::new()),
            status: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greeter_core::{Locale, Variant};

    fn buffered_app(config: GreeterConfig) -> TuiApp {
        TuiAppBuilder::new()
            .with_terminal(Terminal::buffered())
            .with_config(config)
            .build()
            .expect("building app should succeed")
    }

    fn screen(app: &TuiApp) -> String {
        let snapshot = app.terminal().snapshot().expect("buffered terminal");
        String::from_utf8(snapshot.to_vec()).expect("snapshot should be valid utf8")
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse(""), Command::Greet);
        assert_eq!(Command::parse("  \r\n"), Command::Greet);
        assert_eq!(Command::parse(":q"), Command::Quit);
        assert_eq!(Command::parse(":focus"), Command::Focus);
        assert_eq!(Command::parse("Ann\n"), Command::SetName("Ann".into()));
        assert_eq!(Command::parse(":name"), Command::SetName(String::new()));
        assert_eq!(Command::parse(":name  Bo"), Command::SetName("Bo".into()));
        assert_eq!(
            Command::parse(":namesake"),
            Command::SetName(":namesake".into())
        );
    }

    #[test]
    fn scripted_session() {
        let mut app = buffered_app(GreeterConfig::default());
        app.run("Ann\n\n\n:q\nignored\n".as_bytes())
            .expect("session should succeed");

        let state = app.greeter().state();
        assert_eq!(state.display_name, "Ann");
        assert_eq!(state.click_count, 2);
        assert!(app.greeter().sink().is_empty());
        assert!(!app.greeter().is_attached());

        let screen = screen(&app);
        assert!(screen.contains("Hello, Ann!"), "{screen}");
        assert!(screen.contains("2 clicks"), "{screen}");
        assert!(screen.contains("Hello, Ann! (Click #2)"), "{screen}");
        assert!(screen.ends_with(PROMPT));
    }

    #[test]
    fn empty_name_falls_back_in_spanish() {
        let config = GreeterConfig::builder()
            .variant(Variant::Vanilla)
            .locale(Locale::Spanish)
            .initial_name("Ann")
            .build();
        let mut app = buffered_app(config);
        app.handle(Command::parse(":name"));
        app.draw().expect("draw should succeed");
        assert!(screen(&app).contains("¡Hola, Mundo!"));
    }

    #[test]
    fn focus_marks_the_input() {
        let mut app = buffered_app(GreeterConfig::default());
        assert!(app.handle(Command::Focus));
        assert!(app.status.is_none());
        assert!(!app.handle(Command::Quit));
    }
}
