use super::ui;
use crate::core::currency::Currency;
use crate::core::rates::{RateProvider, RateStore};
use anyhow::Result;
use comfy_table::Cell;

pub async fn run<P: RateProvider>(store: &mut RateStore<P>, base: Currency) -> Result<()> {
    let pb = ui::new_spinner("Fetching rates...");
    store.refresh(base).await;
    pb.finish_and_clear();

    // The store may have landed on the fallback base instead of the
    // requested one; render whatever it actually holds.
    let state = store.state();
    println!(
        "{}\n",
        ui::style_text(&format!("Rates for 1 {}", state.base), ui::StyleType::Title)
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell("Rate"),
    ]);

    for currency in Currency::ALL {
        if currency == state.base {
            continue;
        }
        let Some(rate) = state.table.get(&currency) else {
            continue;
        };
        table.add_row(vec![
            Cell::new(currency.code()),
            Cell::new(currency.label()),
            ui::rate_cell(*rate),
        ]);
    }
    println!("{table}");

    if let Some(status) = super::status_line(state) {
        println!("\n{status}");
    }
    Ok(())
}
