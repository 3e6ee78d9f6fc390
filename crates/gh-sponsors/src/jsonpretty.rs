//! Indented JSON with optional ANSI highlighting for terminals.
use std::io::{self, Write};

use owo_colors::{OwoColorize, Style};
use serde_json::Value;

struct Palette {
    delim: Style,
    key: Style,
    string: Style,
    boolean: Style,
    null: Style,
}

impl Palette {
    fn terminal() -> Self {
        Self {
            delim: Style::new().bold(),
            key: Style::new().blue().bold(),
            string: Style::new().green(),
            boolean: Style::new().yellow(),
            null: Style::new().cyan(),
        }
    }
}

/// Write `value` with one `indent` per nesting level, followed by a newline.
pub fn write(out: &mut dyn Write, value: &Value, indent: &str, colorize: bool) -> io::Result<()> {
    let mut printer = Printer {
        out,
        indent,
        colorize,
        palette: Palette::terminal(),
    };
    printer.value(value, 0)?;
    writeln!(printer.out)
}

struct Printer<'a> {
    out: &'a mut dyn Write,
    indent: &'a str,
    colorize: bool,
    palette: Palette,
}

impl Printer<'_> {
    fn paint(&mut self, text: &str, style: Style) -> io::Result<()> {
        if self.colorize {
            write!(self.out, "{}", text.style(style))
        } else {
            self.out.write_all(text.as_bytes())
        }
    }

    fn newline(&mut self, depth: usize) -> io::Result<()> {
        writeln!(self.out)?;
        for _ in 0..depth {
            self.out.write_all(self.indent.as_bytes())?;
        }
        Ok(())
    }

    fn quoted(s: &str) -> String {
        Value::from(s).to_string()
    }

    fn value(&mut self, value: &Value, depth: usize) -> io::Result<()> {
        match value {
            Value::Null => self.paint("null", self.palette.null),
            Value::Bool(b) => self.paint(if *b { "true" } else { "false" }, self.palette.boolean),
            Value::Number(n) => write!(self.out, "{n}"),
            Value::String(s) => self.paint(&Self::quoted(s), self.palette.string),
            Value::Array(items) => {
                self.paint("[", self.palette.delim)?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.paint(",", self.palette.delim)?;
                    }
                    self.newline(depth + 1)?;
                    self.value(item, depth + 1)?;
                }
                if !items.is_empty() {
                    self.newline(depth)?;
                }
                self.paint("]", self.palette.delim)
            }
            Value::Object(map) => {
                self.paint("{", self.palette.delim)?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        self.paint(",", self.palette.delim)?;
                    }
                    self.newline(depth + 1)?;
                    self.paint(&Self::quoted(key), self.palette.key)?;
                    self.paint(":", self.palette.delim)?;
                    self.out.write_all(b" ")?;
                    self.value(item, depth + 1)?;
                }
                if !map.is_empty() {
                    self.newline(depth)?;
                }
                self.paint("}", self.palette.delim)
            }
        }
    }
}
