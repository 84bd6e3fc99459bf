use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use breeze::models::message::Message;

use super::{Input, Prompt};

/// Replays scripted input and records everything rendered
#[derive(Clone, Default)]
pub struct MockPrompt {
    inputs: Arc<Mutex<VecDeque<Input>>>,
    rendered: Arc<Mutex<Vec<Message>>>,
}

impl MockPrompt {
    pub fn new(inputs: Vec<Input>) -> Self {
        Self {
            inputs: Arc::new(Mutex::new(inputs.into())),
            rendered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn rendered(&self) -> Vec<Message> {
        self.rendered.lock().unwrap().clone()
    }

    pub fn rendered_text(&self) -> Vec<String> {
        self.rendered()
            .iter()
            .filter_map(|message| message.text())
            .collect()
    }
}

impl Prompt for MockPrompt {
    fn render(&mut self, message: Box<Message>) -> Result<()> {
        self.rendered.lock().unwrap().push(*message);
        Ok(())
    }

    fn get_input(&mut self) -> Result<Input> {
        Ok(self
            .inputs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(Input::exit))
    }

    fn show_busy(&mut self) {}

    fn hide_busy(&self) {}

    fn close(&self) {}

    fn breeze_ready(&self) {}
}
