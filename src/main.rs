use anyhow::Result;

use what_am_i_buying::cli::{Cli, Command};
use what_am_i_buying::{
    handle_add_category, handle_assign, handle_categories, handle_classify, handle_completions,
    handle_init, handle_predict, handle_read, interpret, load_config,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    if let Command::Completions { shell } = &cli.command {
        return handle_completions(*shell);
    }

    let config = load_config(cli)?;
    match &cli.command {
        Command::Init => handle_init(&config),
        Command::Read { file } => handle_read(config, file.as_deref()),
        Command::Assign => handle_assign(config),
        Command::Classify { model } => handle_classify(config, model.clone()),
        Command::Predict { at } => handle_predict(config, at.as_deref()),
        Command::Categories => handle_categories(&config),
        Command::AddCategory { name } => handle_add_category(&config, name),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
