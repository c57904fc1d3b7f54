//! Plain-text renderers for the typeahead and calculator views.

use livability_calculator::{CalculatorView, ChartBackend};
use livability_calculator_models::{ChartData, ChartSlot, Summary};
use livability_locator_models::{CrimeTier, SafetyTier};
use livability_typeahead::{DetailPanel, DropdownEntry, TypeaheadView};

const fn safety_badge(tier: SafetyTier) -> &'static str {
    match tier {
        SafetyTier::High => "[safe]",
        SafetyTier::Medium => "[fair]",
        SafetyTier::Low => "[unsafe]",
    }
}

const fn crime_badge(tier: CrimeTier) -> &'static str {
    match tier {
        CrimeTier::Low => "(low crime)",
        CrimeTier::Medium => "(medium crime)",
        CrimeTier::High => "(high crime)",
        CrimeTier::Unknown => "(crime n/a)",
    }
}

/// Formats a dropdown row.
pub fn entry_label(entry: &DropdownEntry) -> String {
    format!(
        "{} - {} {} {:.1}/10 {}",
        entry.label,
        entry.zone,
        safety_badge(entry.safety_tier),
        entry.safety_rating,
        crime_badge(entry.crime_tier),
    )
}

/// Prints typeahead effects to stdout as they happen.
#[derive(Debug, Default)]
pub struct TerminalTypeaheadView {
    entries: Vec<DropdownEntry>,
}

impl TypeaheadView for TerminalTypeaheadView {
    fn show_dropdown(&mut self, entries: &[DropdownEntry]) {
        self.entries = entries.to_vec();
        println!();
        for (i, entry) in entries.iter().enumerate() {
            println!("  {i:>2}. {}", entry_label(entry));
        }
    }

    fn hide_dropdown(&mut self) {
        self.entries.clear();
    }

    fn highlight(&mut self, index: Option<usize>) {
        if let Some(entry) = index.and_then(|i| self.entries.get(i)) {
            println!("  > {}", entry.label);
        }
    }

    fn set_query_text(&mut self, text: &str) {
        println!("Selected: {text}");
    }

    fn show_loading(&mut self) {
        println!("Loading...");
    }

    fn hide_loading(&mut self) {}

    fn show_error(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn hide_error(&mut self) {}

    fn show_detail(&mut self, detail: &DetailPanel) {
        println!();
        println!(
            "{} {} {}",
            detail.title,
            safety_badge(detail.safety_tier),
            crime_badge(detail.crime_tier)
        );
        for field in &detail.fields {
            println!("  {:<20} {}", field.label, field.value);
        }
        if !detail.pros.is_empty() {
            println!("  Pros:");
            for pro in &detail.pros {
                println!("    + {pro}");
            }
        }
        if !detail.cons.is_empty() {
            println!("  Cons:");
            for con in &detail.cons {
                println!("    - {con}");
            }
        }
    }

    fn hide_detail(&mut self) {}
}

/// Prints calculator summaries to stdout.
#[derive(Debug, Default)]
pub struct TerminalCalculatorView;

impl CalculatorView for TerminalCalculatorView {
    fn show_loading(&mut self) {
        println!("Calculating...");
    }

    fn hide_loading(&mut self) {}

    fn show_error(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn hide_error(&mut self) {}

    fn show_summary(&mut self, summary: &Summary) {
        println!();
        println!("{}", summary.title);
        for line in &summary.lines {
            println!("  {:<28} {}", line.label, line.value);
        }
    }
}

/// "Draws" charts by dumping their datasets as JSON.
#[derive(Debug, Default)]
pub struct JsonCharts;

impl ChartBackend for JsonCharts {
    type Handle = ChartSlot;

    fn create(&mut self, slot: ChartSlot, data: &ChartData) -> ChartSlot {
        match serde_json::to_string_pretty(data) {
            Ok(json) => println!("\n[{slot} chart]\n{json}"),
            Err(e) => log::error!("Failed to encode {slot} chart: {e}"),
        }
        slot
    }

    fn release(&mut self, handle: ChartSlot) {
        log::trace!("released {handle} chart");
    }
}
