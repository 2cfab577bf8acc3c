//! Probability and expected-value arithmetic on decimal prices.

use crate::errors::{AppError, Result};

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

fn check_price(price: f64) -> Result<()> {
    if price.is_finite() && price > 1.0 {
        Ok(())
    } else {
        Err(AppError::InvalidPrice(price))
    }
}

fn check_probability(p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(AppError::InvalidProbability(p))
    }
}

/// Break-even win probability of a decimal price, `1 / price`, to 4 places.
pub fn implied_probability(price: f64) -> Result<f64> {
    check_price(price)?;
    Ok(round_to(1.0 / price, 4))
}

/// Expected profit of a `stake` bet at `price` given a true win probability,
/// rounded to cents.
///
/// `EV = p * (price - 1) * stake - (1 - p) * stake`
pub fn expected_value(win_probability: f64, price: f64, stake: f64) -> Result<f64> {
    check_probability(win_probability)?;
    check_price(price)?;
    let win_amount = (price - 1.0) * stake;
    let lose_amount = -stake;
    Ok(round_to(
        win_probability * win_amount + (1.0 - win_probability) * lose_amount,
        2,
    ))
}

/// Unweighted mean of `1 / price` across quotes. `None` for an empty slice.
pub fn mean_implied(prices: &[f64]) -> Result<Option<f64>> {
    if prices.is_empty() {
        return Ok(None);
    }
    let mut sum = 0.0;
    for &price in prices {
        check_price(price)?;
        sum += 1.0 / price;
    }
    Ok(Some(sum / prices.len() as f64))
}

/// Scale two probabilities so they sum to 1.
pub fn normalize_pair(a: f64, b: f64) -> Result<(f64, f64)> {
    check_probability(a)?;
    check_probability(b)?;
    let total = a + b;
    if total <= 0.0 {
        return Err(AppError::InvalidProbability(total));
    }
    Ok((a / total, b / total))
}

/// Percentage-point gap between a fair probability and an offer's implied one.
pub fn edge_pct(fair_probability: f64, implied_probability: f64) -> f64 {
    round_to((fair_probability - implied_probability) * 100.0, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implied_probability_of_even_money_is_half() {
        assert_eq!(implied_probability(2.0).unwrap(), 0.5);
        assert_eq!(implied_probability(2.1).unwrap(), 0.4762);
    }

    #[test]
    fn implied_probability_strictly_decreases_with_price() {
        let prices = [1.01, 1.25, 1.5, 1.91, 2.0, 2.5, 4.0, 10.0, 50.0];
        let probs: Vec<f64> = prices
            .iter()
            .map(|&p| implied_probability(p).unwrap())
            .collect();
        assert!(probs.windows(2).all(|w| w[0] > w[1]), "{probs:?}");
    }

    #[test]
    fn implied_probability_rejects_non_decimal_prices() {
        for bad in [1.0, 0.5, 0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(implied_probability(bad), Err(AppError::InvalidPrice(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn expected_value_at_certainty_bounds() {
        assert_eq!(expected_value(1.0, 2.0, 100.0).unwrap(), 100.0);
        assert_eq!(expected_value(0.0, 2.0, 100.0).unwrap(), -100.0);
        assert_eq!(expected_value(0.5, 2.0, 100.0).unwrap(), 0.0);
    }

    #[test]
    fn expected_value_is_linear_in_stake() {
        let base = expected_value(0.55, 1.95, 100.0).unwrap();
        let double = expected_value(0.55, 1.95, 200.0).unwrap();
        let tenth = expected_value(0.55, 1.95, 10.0).unwrap();
        assert!((double - 2.0 * base).abs() < 0.011);
        assert!((tenth - base / 10.0).abs() < 0.011);
    }

    #[test]
    fn expected_value_validates_inputs() {
        assert!(matches!(
            expected_value(1.2, 2.0, 100.0),
            Err(AppError::InvalidProbability(_))
        ));
        assert!(matches!(
            expected_value(-0.1, 2.0, 100.0),
            Err(AppError::InvalidProbability(_))
        ));
        assert!(matches!(
            expected_value(0.5, 1.0, 100.0),
            Err(AppError::InvalidPrice(_))
        ));
    }

    #[test]
    fn mean_implied_averages_inverse_prices() {
        let mean = mean_implied(&[2.0, 4.0]).unwrap().unwrap();
        assert!((mean - 0.375).abs() < 1e-12);
        assert_eq!(mean_implied(&[]).unwrap(), None);
    }

    #[test]
    fn normalize_pair_sums_to_one() {
        let (a, b) = normalize_pair(0.4762, 0.4762).unwrap();
        assert!((a + b - 1.0).abs() < 1e-12);
        assert!((a - 0.5).abs() < 1e-12);
        assert!(normalize_pair(0.0, 0.0).is_err());
    }

    #[test]
    fn edge_is_in_percentage_points() {
        assert_eq!(edge_pct(0.55, 0.5), 5.0);
        assert_eq!(edge_pct(0.45, 0.5), -5.0);
    }
}
