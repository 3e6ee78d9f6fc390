use std::io::{self, IsTerminal, Read, Write};

/// The process streams plus what we know about the terminal behind stdout.
pub trait Terminal {
    fn input(&mut self) -> &mut dyn Read;
    /// Standard output and standard error, borrowed together.
    fn out_and_err(&mut self) -> (&mut dyn Write, &mut dyn Write);
    fn is_terminal_output(&self) -> bool;
    fn color_enabled(&self) -> bool;
    /// `(width, height)` in cells, when stdout is a terminal that reports it.
    fn size(&self) -> Option<(u16, u16)>;
}

pub struct SystemTerminal {
    stdin: io::Stdin,
    stdout: io::Stdout,
    stderr: io::Stderr,
    is_tty: bool,
    no_color: bool,
}

impl SystemTerminal {
    pub fn from_env() -> Self {
        let stdout = io::stdout();
        let is_tty = stdout.is_terminal();
        Self {
            stdin: io::stdin(),
            stdout,
            stderr: io::stderr(),
            is_tty,
            no_color: std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
        }
    }
}

impl Terminal for SystemTerminal {
    fn input(&mut self) -> &mut dyn Read {
        &mut self.stdin
    }

    fn out_and_err(&mut self) -> (&mut dyn Write, &mut dyn Write) {
        (&mut self.stdout, &mut self.stderr)
    }

    fn is_terminal_output(&self) -> bool {
        self.is_tty
    }

    fn color_enabled(&self) -> bool {
        self.is_tty && !self.no_color
    }

    fn size(&self) -> Option<(u16, u16)> {
        if !self.is_tty {
            return None;
        }
        crossterm::terminal::size().ok()
    }
}
