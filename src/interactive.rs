use anyhow::{anyhow, Context, Result};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::io::{BufRead, Write};

/// The human on the other side of a run: answers free text and yes/no
/// questions and receives warnings as soon as they are detected.
pub trait Prompter {
    fn ask_text(&mut self, label: &str) -> Result<String>;

    /// Must not return until a recognised yes/no answer was given.
    fn ask_yes_no(&mut self, label: &str) -> Result<bool>;

    fn warn(&mut self, message: &str) -> Result<()> {
        eprintln!(
            "{} {}",
            "⚠".yellow().bold(),
            format!("WARNING: {message}").yellow()
        );
        Ok(())
    }
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn ask_text(&mut self, label: &str) -> Result<String> {
        (**self).ask_text(label)
    }

    fn ask_yes_no(&mut self, label: &str) -> Result<bool> {
        (**self).ask_yes_no(label)
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        (**self).warn(message)
    }
}

/// Interactive prompts on a terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn ask_text(&mut self, label: &str) -> Result<String> {
        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("Failed to read answer for '{label}'"))?;
        Ok(answer)
    }

    fn ask_yes_no(&mut self, label: &str) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(format!("{label}?"))
            .interact()
            .with_context(|| format!("Failed to read answer for '{label}'"))
    }
}

/// Plain line based prompts, for piped input.
///
/// Text prompts look like `Label: `, yes/no prompts like `Label? [y/n]: ` and
/// are repeated until the answer is exactly `y` or `n`.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn read_answer(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{prompt}").context("Failed to write prompt")?;
        self.writer.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("Failed to read answer")?;
        if read == 0 {
            return Err(anyhow!("Input ended while waiting for '{}'", prompt.trim_end()));
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask_text(&mut self, label: &str) -> Result<String> {
        self.read_answer(&format!("{label}: "))
    }

    fn ask_yes_no(&mut self, label: &str) -> Result<bool> {
        let prompt = format!("{label}? [y/n]: ");
        loop {
            match self.read_answer(&prompt)?.trim() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => continue,
            }
        }
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "WARNING: {message}").context("Failed to write warning")
    }
}
