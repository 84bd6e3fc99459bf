use anyhow::Result;

use crate::prompt::{InputType, Prompt};
use breeze::models::message::Message;
use breeze::responder::Responder;

pub struct Session<'a> {
    responder: Box<dyn Responder>,
    prompt: Box<dyn Prompt + 'a>,
}

impl<'a> Session<'a> {
    pub fn new(responder: Box<dyn Responder>, prompt: Box<dyn Prompt + 'a>) -> Self {
        Session { responder, prompt }
    }

    /// Answer questions until the user exits. A failed question is reported and the loop goes on.
    pub async fn start(&mut self) -> Result<()> {
        self.prompt.breeze_ready();

        loop {
            let input = self.prompt.get_input()?;
            match input.input_type {
                InputType::Message => {
                    if let Some(question) = input.content {
                        if let Err(e) = self.answer(&question).await {
                            self.prompt.render(raw_message(&format!("Error: {}", e)))?;
                        }
                    }
                }
                InputType::Exit => break,
                InputType::AskAgain => continue,
            }
        }

        self.prompt.close();
        Ok(())
    }

    /// Answer a single question and return. A failed question is returned as the error.
    pub async fn headless_start(&mut self, question: &str) -> Result<()> {
        let result = self.answer(question).await;
        self.prompt.close();
        result
    }

    async fn answer(&mut self, question: &str) -> Result<()> {
        self.prompt.show_busy();
        let result = self.responder.respond(question).await;
        self.prompt.hide_busy();

        for message in result?.exchange {
            self.prompt.render(Box::new(message))?;
        }
        Ok(())
    }
}

fn raw_message(content: &str) -> Box<Message> {
    Box::new(Message::assistant().with_text(content))
}
