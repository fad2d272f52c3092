use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::MoveTo,
    execute, queue,
    style::{Print, PrintStyledContent},
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::{
    error::TuiError,
    renderer::{RenderFrame, RenderLine},
};

/// Represents the concrete output target the terminal backend writes to.
#[derive(Debug)]
enum TerminalTarget {
    Stdout {
        handle: Stdout,
        alternate_screen: bool,
    },
    Buffer(Vec<u8>),
}

impl TerminalTarget {
    /// Line input stays cooked so the host can read whole lines from stdin.
    fn stdout() -> Result<Self, TuiError> {
        let mut handle = io::stdout();
        execute!(handle, EnterAlternateScreen)?;
        Ok(Self::Stdout {
            handle,
            alternate_screen: true,
        })
    }

    const fn buffered() -> Self {
        Self::Buffer(Vec::new())
    }

    fn write_frame(&mut self, frame: &RenderFrame, prompt: &str) -> Result<(), TuiError> {
        match self {
            Self::Stdout { handle, .. } => {
                queue!(handle, MoveTo(0, 0), Clear(ClearType::All))?;
                for line in frame.lines() {
                    write_line_stdout(handle, line)?;
                    queue!(handle, Print("\n"))?;
                }
                queue!(handle, Print(prompt))?;
                handle.flush()?;
                Ok(())
            }
            Self::Buffer(buffer) => {
                buffer.clear();
                for line in frame.lines() {
                    write_line_buffer(buffer, line);
                    buffer.push(b'\n');
                }
                buffer.extend_from_slice(prompt.as_bytes());
                Ok(())
            }
        }
    }
}

impl Drop for TerminalTarget {
    fn drop(&mut self) {
        if let Self::Stdout {
            handle,
            alternate_screen: true,
        } = self
        {
            let _ = execute!(handle, LeaveAlternateScreen);
        }
    }
}

fn write_line_stdout(handle: &mut Stdout, line: &RenderLine) -> Result<(), TuiError> {
    for segment in line.segments() {
        queue!(handle, PrintStyledContent(segment.as_styled_content()))?;
    }
    Ok(())
}

fn write_line_buffer(buffer: &mut Vec<u8>, line: &RenderLine) {
    for segment in line.segments() {
        buffer.extend_from_slice(segment.content().as_bytes());
    }
}

/// Thin wrapper around the concrete terminal output target.
#[derive(Debug)]
pub struct Terminal {
    target: TerminalTarget,
}

impl Terminal {
    /// Creates a terminal bound to the process `stdout` handle on the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the alternate screen cannot be entered.
    pub fn stdout() -> Result<Self, TuiError> {
        Ok(Self {
            target: TerminalTarget::stdout()?,
        })
    }

    /// Creates a buffered terminal useful for tests.
    #[must_use]
    pub const fn buffered() -> Self {
        Self {
            target: TerminalTarget::buffered(),
        }
    }

    /// Draws a frame followed by an input prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn render(&mut self, frame: &RenderFrame, prompt: &str) -> Result<(), TuiError> {
        self.target.write_frame(frame, prompt)
    }

    /// Returns the buffered contents when the terminal was created via [`Self::buffered`].
    #[must_use]
    pub fn snapshot(&self) -> Option<&[u8]> {
        match &self.target {
            TerminalTarget::Buffer(buffer) => Some(buffer.as_slice()),
            TerminalTarget::Stdout { .. } => None,
        }
    }
}
