//! SMS alert text

use rust_decimal::{Decimal, RoundingStrategy};
use types::Symbol;

use crate::signals::SignalAction;

const PRICE_FRACTION_DIGITS: u32 = 3;

/// Render the alert body:
///
/// ```text
/// 🟢 BTC STRONG BUY!
/// Price: $37,012.5
/// Confidence: 91%
/// Position: 2.0% in band
/// ```
pub fn format_alert(
    symbol: &Symbol,
    action: SignalAction,
    price: Decimal,
    confidence: f64,
    position: f64,
) -> String {
    format!(
        "{} {} {}!\nPrice: ${}\nConfidence: {}%\nPosition: {}% in band",
        action.glyph(),
        symbol,
        action.label(),
        format_price(price),
        confidence.round(),
        format_position(position)
    )
}

/// One fraction digit, exact halves rounded away from zero (`2.25` → `2.3`)
pub fn format_position(position: f64) -> String {
    match Decimal::from_f64_retain(position) {
        Some(exact) => {
            let rounded = exact.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.1}", rounded)
        }
        None => format!("{:.1}", position),
    }
}

/// Group thousands with commas and keep at most three fraction digits,
/// dropping trailing zeros (`1234567.891` → `1,234,567.891`, `0.10` → `0.1`).
pub fn format_price(price: Decimal) -> String {
    let rounded = price
        .round_dp_with_strategy(PRICE_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();

    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + integer.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_position_halves_round_up() {
        assert_eq!(format_position(2.25), "2.3");
        assert_eq!(format_position(0.25), "0.3");
        assert_eq!(format_position(2.04), "2.0");
        assert_eq!(format_position(100.0), "100.0");
        assert_eq!(format_position(0.0), "0.0");
    }

    #[test]
    fn test_price_grouping_and_rounding() {
        assert_eq!(format_price(dec!(37012.50000000)), "37,012.5");
        assert_eq!(format_price(dec!(1234567.8915)), "1,234,567.892");
        assert_eq!(format_price(dec!(999)), "999");
        assert_eq!(format_price(dec!(1000)), "1,000");
        assert_eq!(format_price(dec!(0.00001)), "0");
        assert_eq!(format_price(dec!(0.1234)), "0.123");
        assert_eq!(format_price(dec!(-2500.5)), "-2,500.5");
    }

    #[test]
    fn test_alert_layout() {
        let body = format_alert(
            &Symbol::parse("BTC").unwrap(),
            SignalAction::StrongBuy,
            dec!(37012.5),
            91.4,
            2.04,
        );
        assert_eq!(
            body,
            "🟢 BTC STRONG BUY!\nPrice: $37,012.5\nConfidence: 91%\nPosition: 2.0% in band"
        );
    }

    #[test]
    fn test_sell_alert_uses_red_glyph() {
        let body = format_alert(
            &Symbol::parse("ZEC").unwrap(),
            SignalAction::StrongSell,
            dec!(42.1),
            100.0,
            100.0,
        );
        assert!(body.starts_with("🔴 ZEC STRONG SELL!\n"));
        assert!(body.ends_with("Position: 100.0% in band"));
    }
}
