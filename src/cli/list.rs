use super::ui;
use crate::core::currency::Currency;
use comfy_table::Cell;

pub fn run() {
    println!(
        "{}\n",
        ui::style_text("Supported currencies", ui::StyleType::Title)
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Currency")]);
    for currency in Currency::ALL {
        table.add_row(vec![Cell::new(currency.code()), Cell::new(currency.label())]);
    }
    println!("{table}");
}
