use std::collections::BTreeMap;

use super::filter::filter_record;
use super::{AggregatedPoolData, LiquidityPoint, RawPoolRecord};

/// Pool type tag that triggers the synthetic spread (case-sensitive)
pub const CONCENTRATED_POOL_TYPE: &str = "Concentrated";

/// Prices are bucketed at 1e-8 resolution
const PRICE_KEY_SCALE: f64 = 1e8;

const SPREAD_SAMPLES: usize = 10;
/// Total spread window width as a fraction of the reported price (±5%)
const SPREAD_RANGE: f64 = 0.1;

fn price_key(price: f64) -> u64 {
    (price * PRICE_KEY_SCALE).round() as u64
}

fn key_to_price(key: u64) -> f64 {
    key as f64 / PRICE_KEY_SCALE
}

/// Fold validated pool records into price buckets and a liquidity total.
///
/// Standard pools land in the bucket of their own price. Concentrated pools
/// contribute only their synthetic spread samples to the buckets, while
/// their reported tvl still counts once toward `total_liquidity`.
pub fn aggregate_records(records: &[RawPoolRecord]) -> AggregatedPoolData {
    let mut buckets: BTreeMap<u64, f64> = BTreeMap::new();
    let mut total_liquidity = 0.0;

    for record in records {
        let Some((price, liquidity)) = filter_record(record) else {
            continue;
        };

        total_liquidity += liquidity;

        if record.pool_type.as_deref() == Some(CONCENTRATED_POOL_TYPE) {
            for point in spread_points(price, liquidity) {
                *buckets.entry(price_key(point.price)).or_insert(0.0) += point.liquidity_usd;
            }
        } else {
            *buckets.entry(price_key(price)).or_insert(0.0) += liquidity;
        }
    }

    let points = buckets
        .into_iter()
        .map(|(key, liquidity)| LiquidityPoint {
            price: key_to_price(key),
            liquidity_usd: liquidity,
        })
        .collect();

    AggregatedPoolData {
        liquidity_points: shape_points(points),
        total_liquidity,
    }
}

/// Flat synthetic spread for a concentrated pool: ten equally weighted
/// samples across a symmetric ±5% window around the reported price,
/// endpoints included. The sample liquidity sums back to the input.
///
/// Returns no samples for a non-finite or non-positive price; callers are
/// expected to validate upstream but this guards independently.
pub fn spread_points(price: f64, liquidity: f64) -> Vec<LiquidityPoint> {
    let mut points = Vec::with_capacity(SPREAD_SAMPLES);

    if !price.is_finite() || price <= 0.0 {
        return points;
    }

    for i in 0..SPREAD_SAMPLES {
        let sample_price = price
            * (1.0 - SPREAD_RANGE / 2.0 + SPREAD_RANGE * i as f64 / (SPREAD_SAMPLES - 1) as f64);
        let liquidity_usd = liquidity / SPREAD_SAMPLES as f64;

        if sample_price.is_finite()
            && liquidity_usd.is_finite()
            && sample_price > 0.0
            && liquidity_usd > 0.0
        {
            points.push(LiquidityPoint {
                price: sample_price,
                liquidity_usd,
            });
        }
    }

    points
}

/// Final gate before points leave the aggregator: drop anything non-finite
/// or non-positive and sort ascending by price. Shaping already-shaped
/// output is a no-op.
pub fn shape_points(mut points: Vec<LiquidityPoint>) -> Vec<LiquidityPoint> {
    points.retain(|p| {
        p.price.is_finite() && p.liquidity_usd.is_finite() && p.price > 0.0 && p.liquidity_usd > 0.0
    });
    points.sort_by(|a, b| {
        a.price
            .partial_cmp(&b.price)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(price: &str, tvl: &str, pool_type: Option<&str>) -> RawPoolRecord {
        RawPoolRecord {
            price: json!(price),
            tvl: json!(tvl),
            pool_type: pool_type.map(str::to_string),
        }
    }

    #[test]
    fn merges_standard_pools_by_price_bucket() {
        let records = vec![
            record("2", "100", Some("Standard")),
            record("2", "50", Some("Standard")),
            record("3", "75", Some("Standard")),
        ];

        let result = aggregate_records(&records);

        assert!((result.total_liquidity - 225.0).abs() < 1e-9);
        assert_eq!(result.liquidity_points.len(), 2);
        assert_eq!(result.liquidity_points[0].price, 2.0);
        assert!((result.liquidity_points[0].liquidity_usd - 150.0).abs() < 1e-9);
        assert_eq!(result.liquidity_points[1].price, 3.0);
        assert!((result.liquidity_points[1].liquidity_usd - 75.0).abs() < 1e-9);
    }

    #[test]
    fn buckets_prices_at_1e8_resolution() {
        // Agree to 8 fractional digits, so they merge
        let records = vec![
            record("1.000000004", "10", None),
            record("1.0000000041", "20", None),
        ];

        let result = aggregate_records(&records);
        assert_eq!(result.liquidity_points.len(), 1);
        assert!((result.liquidity_points[0].liquidity_usd - 30.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_records_contribute_nothing() {
        let records = vec![
            record("abc", "100", None),
            record("2", "-5", None),
            record("0", "100", None),
            record("2", "abc", None),
        ];

        let result = aggregate_records(&records);
        assert_eq!(result.total_liquidity, 0.0);
        assert!(result.liquidity_points.is_empty());
    }

    #[test]
    fn concentrated_pool_expands_to_ten_buckets() {
        let records = vec![record("10", "100", Some(CONCENTRATED_POOL_TYPE))];

        let result = aggregate_records(&records);

        // The tvl counts once toward the total, not once per sample
        assert!((result.total_liquidity - 100.0).abs() < 1e-9);
        assert_eq!(result.liquidity_points.len(), 10);
        for point in &result.liquidity_points {
            assert!(point.price >= 9.5 - 1e-9 && point.price <= 10.5 + 1e-9);
            assert!((point.liquidity_usd - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn concentrated_match_is_case_sensitive() {
        let records = vec![record("10", "100", Some("concentrated"))];

        let result = aggregate_records(&records);

        // Unrecognized tag gets standard-pool treatment
        assert_eq!(result.liquidity_points.len(), 1);
        assert_eq!(result.liquidity_points[0].price, 10.0);
        assert!((result.liquidity_points[0].liquidity_usd - 100.0).abs() < 1e-9);
    }

    #[test]
    fn output_is_ascending_with_unique_prices() {
        let records = vec![
            record("5", "10", None),
            record("1", "10", None),
            record("3", "40", Some(CONCENTRATED_POOL_TYPE)),
            record("3", "20", None),
            record("0.00000001", "1", None),
        ];

        let result = aggregate_records(&records);

        for pair in result.liquidity_points.windows(2) {
            assert!(pair[0].price < pair[1].price);
        }
    }

    #[test]
    fn spread_sums_back_to_input_liquidity() {
        let points = spread_points(10.0, 100.0);

        assert_eq!(points.len(), 10);
        let sum: f64 = points.iter().map(|p| p.liquidity_usd).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((points[0].price - 9.5).abs() < 1e-9);
        assert!((points[9].price - 10.5).abs() < 1e-9);
    }

    #[test]
    fn spread_rejects_degenerate_prices() {
        assert!(spread_points(0.0, 100.0).is_empty());
        assert!(spread_points(-1.0, 100.0).is_empty());
        assert!(spread_points(f64::NAN, 100.0).is_empty());
        assert!(spread_points(f64::INFINITY, 100.0).is_empty());
    }

    #[test]
    fn spread_drops_non_positive_samples() {
        // Zero liquidity yields zero-weight samples, all dropped
        assert!(spread_points(10.0, 0.0).is_empty());
    }

    #[test]
    fn shaping_is_idempotent_on_valid_points() {
        let points = vec![
            LiquidityPoint {
                price: 1.0,
                liquidity_usd: 10.0,
            },
            LiquidityPoint {
                price: 2.0,
                liquidity_usd: 20.0,
            },
        ];

        let once = shape_points(points);
        let twice = shape_points(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn shaping_drops_invalid_points_and_sorts() {
        let points = vec![
            LiquidityPoint {
                price: 2.0,
                liquidity_usd: 20.0,
            },
            LiquidityPoint {
                price: -1.0,
                liquidity_usd: 10.0,
            },
            LiquidityPoint {
                price: 1.0,
                liquidity_usd: f64::NAN,
            },
            LiquidityPoint {
                price: 1.0,
                liquidity_usd: 10.0,
            },
        ];

        let shaped = shape_points(points);
        assert_eq!(shaped.len(), 2);
        assert_eq!(shaped[0].price, 1.0);
        assert_eq!(shaped[1].price, 2.0);
    }
}
