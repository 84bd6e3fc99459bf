use std::io::{self, Write};

use anyhow::{anyhow, Result};
use bat::WrappingMode;
use breeze::models::message::{Message, MessageContent};
use cliclack::{input, spinner};

use super::{Input, Prompt, Theme};

pub struct CliclackPrompt {
    spinner: cliclack::ProgressBar,
    theme: Theme,
}

impl CliclackPrompt {
    pub fn new() -> Self {
        CliclackPrompt {
            spinner: spinner(),
            theme: Theme::Dark,
        }
    }

    fn theme_name(&self) -> &'static str {
        match self.theme {
            Theme::Light => "GitHub",
            Theme::Dark => "zenburn",
        }
    }
}

fn print_tool_request(content: &str, theme: &str, tool_name: &str) -> Result<()> {
    bat::PrettyPrinter::new()
        .input(
            bat::Input::from_bytes(content.as_bytes()).name(format!("Tool Request: {}", tool_name)),
        )
        .theme(theme)
        .language("JSON")
        .grid(true)
        .header(true)
        .wrapping_mode(WrappingMode::Character)
        .print()
        .map_err(|e| anyhow!("Failed to render tool request: {}", e))?;
    Ok(())
}

fn print_tool_response(content: &str, theme: &str, language: &str) -> Result<()> {
    bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()).name("Tool Response:"))
        .theme(theme)
        .language(language)
        .grid(true)
        .header(true)
        .wrapping_mode(WrappingMode::Character)
        .print()
        .map_err(|e| anyhow!("Failed to render tool response: {}", e))?;
    Ok(())
}

fn print(content: &str, theme: &str) -> Result<()> {
    bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme(theme)
        .language("Markdown")
        .wrapping_mode(WrappingMode::Character)
        .print()
        .map_err(|e| anyhow!("Failed to render reply: {}", e))?;
    Ok(())
}

impl Prompt for CliclackPrompt {
    fn render(&mut self, message: Box<Message>) -> Result<()> {
        let theme = self.theme_name();

        for message_content in &message.content {
            match message_content {
                MessageContent::Text(text) => print(&text.text, theme)?,
                MessageContent::ToolRequest(tool_request) => match &tool_request.tool_call {
                    Ok(call) => print_tool_request(
                        &serde_json::to_string_pretty(&call.arguments)?,
                        theme,
                        &call.name,
                    )?,
                    Err(e) => print(&e.to_string(), theme)?,
                },
                MessageContent::ToolResponse(tool_response) => match &tool_response.tool_result {
                    Ok(output) => {
                        let language = if output.starts_with('{') {
                            "JSON"
                        } else {
                            "Markdown"
                        };
                        print_tool_response(output, theme, language)?;
                    }
                    Err(e) => print(&e.to_string(), theme)?,
                },
            }
        }

        println!();
        io::stdout().flush()?;
        Ok(())
    }

    fn show_busy(&mut self) {
        self.spinner = spinner();
        self.spinner.start("awaiting reply");
    }

    fn hide_busy(&self) {
        self.spinner.stop("");
    }

    fn get_input(&mut self) -> Result<Input> {
        let message_text: String = input("Question:").placeholder("").interact()?;
        let message_text = message_text.trim();

        if message_text.eq_ignore_ascii_case("exit")
            || message_text.eq_ignore_ascii_case("/exit")
            || message_text.eq_ignore_ascii_case("/quit")
        {
            Ok(Input::exit())
        } else if message_text.eq_ignore_ascii_case("/t") {
            self.theme = match self.theme {
                Theme::Light => {
                    println!("Switching to Dark theme");
                    Theme::Dark
                }
                Theme::Dark => {
                    println!("Switching to Light theme");
                    Theme::Light
                }
            };
            Ok(Input::ask_again())
        } else if message_text.eq_ignore_ascii_case("/?") {
            println!("Commands:");
            println!("exit - Exit the session");
            println!("/t - Toggle Light/Dark theme");
            println!("/? - Display this help message");
            Ok(Input::ask_again())
        } else {
            Ok(Input::message(message_text))
        }
    }

    fn close(&self) {
        // No cleanup required
    }
}
