//! Interactive console gates.
//!
//! User-facing prompts and menus go to stdout; operational logs stay on
//! tracing. End-of-input is treated as declining.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use vflow_models::ExportPlatform;

/// Width of the section separator line.
const SEPARATOR_WIDTH: usize = 30;

/// The user's selection in the export menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportChoice {
    /// Export to this platform.
    Platform(ExportPlatform),
    /// End the export loop.
    End,
}

/// Line-based console for phase gates and menus.
pub struct Console {
    lines: Lines<BufReader<Stdin>>,
}

impl Console {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print a separator line between workflow sections.
    pub fn separator() {
        println!("{}", "-".repeat(SEPARATOR_WIDTH));
    }

    /// Print a section header.
    pub fn section(title: &str) {
        println!("----- {} -----", title);
    }

    /// Wait for the user to press enter.
    pub async fn pause(&mut self) -> std::io::Result<()> {
        println!("Press enter to continue...");
        self.lines.next_line().await?;
        Ok(())
    }

    /// Ask a yes/no question. Anything other than `y`/`Y` is a no.
    pub async fn confirm(&mut self, question: &str) -> std::io::Result<bool> {
        print!("{} (Y/N) ", question);
        std::io::stdout().flush()?;
        let answer = self.lines.next_line().await?.unwrap_or_default();
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }

    /// Read one line after a prompt.
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<String> {
        print!("{} ", prompt);
        std::io::stdout().flush()?;
        Ok(self
            .lines
            .next_line()
            .await?
            .unwrap_or_default()
            .trim()
            .to_string())
    }

    /// Show the export platform menu until a valid choice is made.
    pub async fn export_menu(&mut self) -> std::io::Result<ExportChoice> {
        loop {
            println!("Options:");
            println!("  1) TensorFlow");
            println!("  2) CoreML");
            println!("  3) Other platform");
            println!("  E) End program");

            let choice = self.read_line("Select an option:").await?;
            match choice.as_str() {
                "1" => return Ok(ExportChoice::Platform(ExportPlatform::tensorflow())),
                "2" => return Ok(ExportChoice::Platform(ExportPlatform::coreml())),
                "3" => {
                    let name = self.read_line("Type the platform name:").await?;
                    let extension = self
                        .read_line(&format!(
                            "Now type the file extension for the {} exported model:",
                            name
                        ))
                        .await?;
                    if name.is_empty() || extension.is_empty() {
                        println!("Option not supported.");
                        continue;
                    }
                    return Ok(ExportChoice::Platform(ExportPlatform::custom(name, extension)));
                }
                "e" | "E" | "" => return Ok(ExportChoice::End),
                _ => println!("Option not supported."),
            }
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
