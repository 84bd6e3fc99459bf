mod prompt;
mod session;

use anyhow::Result;
use breeze::configuration::{AgentSettings, Strategy};
use breeze::responder::get_responder;
use clap::Parser;

use crate::prompt::cliclack::CliclackPrompt;
use crate::session::Session;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Answering strategy, model or keyword (overrides BREEZE_STRATEGY)
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Answer a single question and exit
    #[arg(short, long)]
    question: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut settings = AgentSettings::new()?;
    if let Some(strategy) = cli.strategy {
        settings.strategy = strategy;
    }

    let responder = get_responder(settings)?;
    let mut session = Session::new(responder, Box::new(CliclackPrompt::new()));

    match cli.question {
        Some(question) => session.headless_start(&question).await,
        None => session.start().await,
    }
}
