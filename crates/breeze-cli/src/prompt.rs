use anyhow::Result;
use breeze::models::message::Message;
use console::style;

pub mod cliclack;
#[cfg(test)]
pub mod mock;

pub trait Prompt {
    fn render(&mut self, message: Box<Message>) -> Result<()>;
    fn get_input(&mut self) -> Result<Input>;
    fn show_busy(&mut self);
    fn hide_busy(&self);
    fn close(&self);
    fn breeze_ready(&self) {
        println!(
            "Ask about the weather in any city {}",
            style("- type \"exit\" to end the session").dim()
        );
        println!();
    }
}

pub struct Input {
    pub input_type: InputType,
    pub content: Option<String>, // Optional content as sometimes the user may be issuing a command eg. (Exit)
}

impl Input {
    pub fn message<S: Into<String>>(content: S) -> Self {
        Self {
            input_type: InputType::Message,
            content: Some(content.into()),
        }
    }

    pub fn exit() -> Self {
        Self {
            input_type: InputType::Exit,
            content: None,
        }
    }

    pub fn ask_again() -> Self {
        Self {
            input_type: InputType::AskAgain,
            content: None,
        }
    }
}

pub enum InputType {
    AskAgain, // Ask the user for input again. Control flow command.
    Message,  // User sent a question
    Exit,     // User wants to exit the session
}

pub enum Theme {
    Light,
    Dark,
}
