use serde_json::Value;
use tracing::warn;

use super::RawPoolRecord;

/// Lenient numeric extraction: current API payloads serve `price`/`tvl` as
/// JSON numbers, older ones as decimal strings.
fn parse_decimal(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Validate one raw pool record and extract its (price, liquidity) pair.
///
/// Records whose price or tvl fails to parse to a finite positive number are
/// rejected; rejection is advisory-logged and otherwise silent.
pub fn filter_record(record: &RawPoolRecord) -> Option<(f64, f64)> {
    let price = parse_decimal(&record.price);
    let liquidity = parse_decimal(&record.tvl);

    match (price, liquidity) {
        (Some(price), Some(liquidity))
            if price.is_finite() && liquidity.is_finite() && price > 0.0 && liquidity > 0.0 =>
        {
            Some((price, liquidity))
        }
        _ => {
            warn!("Skipping invalid pool record: {:?}", record);
            None
        }
    }
}
