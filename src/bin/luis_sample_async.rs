use anyhow::Result;
use luis_sdk::{ClientConfig, Handlers, LuisClient, PredictionResult};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn on_success(res: PredictionResult) {
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
        println!("\"{}\": Type: {}, Score: {:?}", entity.name, entity.entity_type, entity.score);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) if e.is_missing_input() => {
            println!("Please enter your app Id:");
            let app_id = lines.next_line().await?.unwrap_or_default();
            println!("Please input your subscription key:");
            let app_key = lines.next_line().await?.unwrap_or_default();
            ClientConfig::new(app_id.trim(), app_key.trim())
        }
        Err(e) => return Err(e.into()),
    };
    let client = LuisClient::new(config)?;

    println!("Please input the text to predict:");
    let text = lines.next_line().await?.unwrap_or_default();

    let handle = client.predict_with_handlers(
        &text,
        Handlers::new(on_success, |err| eprintln!("Prediction failed: {}", err)),
    )?;
    println!("-------\nMain task waiting on the prediction\n-------");

    handle.await?;
    Ok(())
}
