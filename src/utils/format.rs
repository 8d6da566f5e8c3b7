/// Renders an amount with two decimals, keeping the sign ahead of the symbol (`-$12.50`).
pub fn format_amount(amount: f64, symbol: &str) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded < 0.0 {
        format!("-{symbol}{:.2}", rounded.abs())
    } else {
        format!("{symbol}{:.2}", rounded.abs())
    }
}
