use super::ui;
use crate::core::convert::{Conversion, Converter};
use crate::core::currency::Currency;
use crate::core::rates::RateProvider;
use anyhow::Result;

pub async fn run<P: RateProvider>(
    converter: &mut Converter<P>,
    amount: f64,
    from: Currency,
    to: Currency,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching rates...");
    let conversion = converter.convert(amount, from, to).await;
    pb.finish_and_clear();

    match conversion {
        Conversion::Empty => println!("—"),
        Conversion::Converted {
            amount,
            unit_rate,
            from,
            to,
        } => {
            println!(
                "{} {}",
                ui::style_text(&ui::format_amount(amount), ui::StyleType::ResultValue),
                to
            );
            println!("1 {} = {} {}", from, ui::format_rate(unit_rate), to);
        }
    }

    if let Some(status) = super::status_line(converter.store().state()) {
        println!("{status}");
    }
    Ok(())
}
