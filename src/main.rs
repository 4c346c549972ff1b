use anyhow::Result;
use luis_sdk::{converse, ClientConfig, Dialog, LuisClient, PredictionResult, Prompter, Reply};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Asks the user on the terminal for each dialog answer.
struct ConsolePrompter {
    lines: Lines<BufReader<Stdin>>,
}

impl ConsolePrompter {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn ask(&mut self, question: &str) -> luis_sdk::Result<String> {
        println!("{}", question);
        let line = self.lines.next_line().await?.unwrap_or_default();
        Ok(line.trim().to_string())
    }
}

impl Prompter for ConsolePrompter {
    async fn answer(&mut self, dialog: &Dialog) -> luis_sdk::Result<Reply> {
        let prompt = dialog.prompt().unwrap_or("Please answer:");
        Ok(Reply::new(self.ask(prompt).await?))
    }
}

fn print_result(res: &PredictionResult) {
    println!("---------------------------------------------");
    println!("Response:");
    println!("Query: {}", res.query());
    println!("Top Scoring Intent: {}", res.top_intent().name);
    if let Some(dialog) = res.dialog() {
        println!("Dialog Prompt: {}", dialog.prompt().unwrap_or("None"));
        println!("Dialog Parameter Name: {}", dialog.parameter_name().unwrap_or("None"));
        println!("Dialog Status: {}", dialog.status());
    }
    println!("Entities:");
    for entity in res.entities() {
        println!("\"{}\":", entity.name);
        match entity.score {
            Some(score) => println!("Type: {}, Score: {}", entity.entity_type, score),
            None => println!("Type: {}, Score: None", entity.entity_type),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut prompter = ConsolePrompter::new();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) if e.is_missing_input() => {
            let app_id = prompter.ask("Please enter your app Id:").await?;
            let app_key = prompter.ask("Please input your subscription key:").await?;
            ClientConfig::new(app_id, app_key)
        }
        Err(e) => return Err(e.into()),
    };
    let client = LuisClient::new(config)?;

    let text = prompter.ask("Please input the text to predict:").await?;
    let result = converse(&client, &text, &mut prompter).await?;
    print_result(&result);

    Ok(())
}
