use std::io::Write;

use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::traits::Renderer;
use crate::presentation::view_models::{CommandResultViewModel, CreateView, StatusLevel};
use crate::presentation::views::Style;

pub struct ConsoleRenderer {
    json_mode: bool,
    style: Style,
}

impl ConsoleRenderer {
    /// Colour follows whether stdout is a terminal.
    pub fn new(json_mode: bool) -> Self {
        let style = if std::io::stdout().is_terminal() {
            Style::colored()
        } else {
            Style::plain()
        };
        Self { json_mode, style }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Text (or JSON) for a result, without writing it anywhere.
    pub fn format<T>(&self, result: &CommandResultViewModel<T>) -> Result<String>
    where
        T: Serialize + CreateView,
    {
        if self.json_mode {
            return Ok(format!("{}\n", serde_json::to_string_pretty(result)?));
        }

        let mut out = String::new();
        if let Some(badge) = &result.badge {
            let label = match (self.style.color, badge.level) {
                (true, StatusLevel::Success) => badge.label.green().to_string(),
                (true, StatusLevel::Warning) => badge.label.yellow().to_string(),
                (true, StatusLevel::Info) => badge.label.bold().to_string(),
                (false, _) => badge.label.clone(),
            };
            out.push_str(&format!("{} {}\n\n", badge.marker(), label));
        }

        out.push_str(&result.content.create_view(self.style).to_string());

        if !result.suggestions.is_empty() {
            out.push_str(&format!("\n{}\n", self.style.warn("Tips:")));
            for tip in &result.suggestions {
                out.push_str(&format!("  - {}", tip.description));
                if let Some(cmd) = &tip.command {
                    out.push_str(&format!(": {}", self.style.accent(cmd)));
                }
                out.push('\n');
            }
        }
        Ok(out)
    }
}

impl Renderer for ConsoleRenderer {
    fn render<T>(&self, result: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + CreateView,
    {
        let text = self.format(&result)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
