pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod http;
pub mod input;
pub mod llm;
pub mod recommendation;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::Cli;
use colored::Colorize;
use std::io::{self, Write};

use crate::config::settings::AppConfig;
use crate::input::InputValidator;
use crate::llm::OllamaClient;
use crate::services::assignment::AssignmentService;
use crate::services::classification::ClassificationService;
use crate::services::ingestion::IngestionService;
use crate::services::prediction::PredictionService;

pub fn interpret() -> Cli {
    Cli::parse()
}

/// Environment-based config with command-line overrides applied.
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::from_env()?;
    if let Some(path) = &cli.database {
        config.database.path = path.clone();
    }
    Ok(config)
}

pub fn handle_init(config: &AppConfig) -> Result<()> {
    database::setup::open_initialized(&config.database.path)?;
    println!("Database ready at {}", config.database.path);
    Ok(())
}

pub fn handle_read(config: AppConfig, file: Option<&str>) -> Result<()> {
    println!("Read mode activated");
    let path = file.unwrap_or(&config.ingest.receipt_file).to_string();
    let service = IngestionService::new(config);
    service.run(&path, &mut io::stdout().lock())?;
    Ok(())
}

pub fn handle_assign(config: AppConfig) -> Result<()> {
    println!("Assign mode activated");
    let mut conn = database::setup::open_initialized(&config.database.path)?;
    let mut validator = InputValidator::new(io::stdin().lock(), io::stdout());
    let service = AssignmentService::new(config.assign);
    service.run(&mut conn, &mut validator)?;
    Ok(())
}

pub fn handle_classify(mut config: AppConfig, model: Option<String>) -> Result<()> {
    println!("Classify mode activated");
    if let Some(model) = model {
        config.ollama.model = model;
    }

    let mut conn = database::setup::open_initialized(&config.database.path)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let summary = runtime.block_on(async {
        let client = OllamaClient::new(&config.ollama)?;
        let service = ClassificationService::new(client)?;
        service.run(&mut conn).await
    })?;

    println!(
        "{}",
        format!(
            "Assigned {} purchases, skipped {}",
            summary.assigned, summary.skipped
        )
        .green()
    );
    Ok(())
}

pub fn handle_predict(config: AppConfig, at: Option<&str>) -> Result<()> {
    println!("Predict mode activated");
    let mut conn = database::setup::open_initialized(&config.database.path)?;
    let service = PredictionService::new(config.prediction);
    service.run(&mut conn, at, &mut io::stdout().lock())?;
    Ok(())
}

pub fn handle_categories(config: &AppConfig) -> Result<()> {
    let mut conn = database::setup::open_initialized(&config.database.path)?;
    let categories = database::categories::list_all(&mut conn)?;

    if categories.is_empty() {
        println!("No categories yet. Add one with `add-category <name>`.");
    }
    for category in categories {
        println!("  [{}] {}", category.id, category.name.bold());
    }
    Ok(())
}

pub fn handle_add_category(config: &AppConfig, name: &str) -> Result<()> {
    let mut conn = database::setup::open_initialized(&config.database.path)?;
    let category = database::categories::insert_category(&mut conn, name.trim())?;
    println!("Added category [{}] {}", category.id, category.name);
    Ok(())
}

pub fn handle_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    let mut out = io::stdout();
    clap_complete::generate(shell, &mut command, name, &mut out);
    out.flush()?;
    Ok(())
}
