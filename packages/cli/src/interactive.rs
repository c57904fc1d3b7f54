//! Menu-driven mode used when no subcommand is given.

use dialoguer::{Input, Select};
use livability_calculator_models::{CalculatorType, FormFields};
use livability_config::ClientConfig;
use livability_typeahead::DropdownEntry;

use crate::search::SearchSession;
use crate::terminal::entry_label;

enum Tool {
    Search,
    Calculate,
}

impl Tool {
    const ALL: &[Self] = &[Self::Search, Self::Calculate];

    const fn label(&self) -> &'static str {
        match self {
            Self::Search => "Search locations",
            Self::Calculate => "Run a financial calculator",
        }
    }
}

/// Asks what to do, then does it.
pub async fn run(config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Search => search(config).await,
        Tool::Calculate => calculate(config).await,
    }
}

async fn search(config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let query: String = Input::new().with_prompt("Location").interact_text()?;

    let session = SearchSession::start(config)?;
    let snapshot = session.type_text(&query).await?;
    let results = snapshot.selection.results();

    if results.is_empty() {
        println!("No matching locations.");
    } else {
        let mut labels: Vec<String> = results
            .iter()
            .map(|r| entry_label(&DropdownEntry::from(r)))
            .collect();
        labels.push("Done".to_string());

        let choice = Select::new()
            .with_prompt("Show details for")
            .items(&labels)
            .default(0)
            .interact()?;
        if choice < results.len() {
            session.select(choice).await?;
        }
    }

    session.finish().await
}

async fn calculate(config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let kinds = CalculatorType::all();
    let titles: Vec<&str> = kinds.iter().map(|k| k.title()).collect();

    let idx = Select::new()
        .with_prompt("Calculator")
        .items(&titles)
        .default(0)
        .interact()?;
    let kind = kinds[idx];

    let mut fields = FormFields::new();
    for &name in kind.form_fields() {
        let value: String = Input::new()
            .with_prompt(name)
            .allow_empty(true)
            .interact_text()?;
        let value = value.trim();
        if !value.is_empty() {
            fields.insert(name.to_string(), value.to_string());
        }
    }

    crate::calc::run(config, kind.as_ref(), fields).await
}
