//! Runs one calculator submission from the terminal.

use livability_calculator::{CalculatorRenderer, HttpCalculator};
use livability_calculator_models::FormFields;
use livability_config::ClientConfig;

use crate::terminal::{JsonCharts, TerminalCalculatorView};

/// `livability calc <type> [field=value ...]`.
pub async fn run(
    config: &ClientConfig,
    calculator: &str,
    fields: FormFields,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = HttpCalculator::new(&config.calculator.base_url, config.http.timeout())?;
    let mut renderer = CalculatorRenderer::new(service, TerminalCalculatorView, JsonCharts);

    let outcome = renderer.submit(calculator, &fields).await;
    renderer.clear_charts();
    outcome?;

    Ok(())
}
