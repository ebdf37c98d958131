//! `codeloom chat` — Interactive or single-message chat mode.

use codeloom_config::AppConfig;
use codeloom_core::error::Error;
use std::io::Write;
use tokio::io::{self, AsyncBufReadExt, BufReader};

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| Error::Config {
        message: format!("failed to load config: {e}"),
    })?;
    let mut session = super::build_session(&config)?;

    if let Some(msg) = message {
        // Single message mode
        let response = session.process_message(&msg).await;
        println!("{response}");
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  CodeLoom — interactive mode");
    println!();
    println!("  Backend:    {}", config.backend);
    println!("  Classifier: {}", config.classifier);
    println!("  Tools:      read_file, add_file, list_files");
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or Ctrl+D to quit.");
    println!();

    let stdin = io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            print!("  You > ");
            std::io::stdout().flush()?;
            continue;
        }
        if matches!(line, "exit" | "quit" | "/exit" | "/quit" | ":q") {
            break;
        }

        let response = session.process_message(line).await;
        println!();
        for out in response.lines() {
            println!("  Assistant > {out}");
        }
        println!();

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    Ok(())
}
