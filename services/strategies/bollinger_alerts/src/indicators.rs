//! Bollinger Band indicator
//!
//! The band is a population standard deviation envelope around the simple
//! moving average of the trailing `period` closes. It is recomputed from the
//! full close series on every evaluation.

use serde::Serialize;

/// Position reported when the band has zero width
pub const DEGENERATE_POSITION: f64 = 50.0;

/// Upper, middle and lower band levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl Band {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Compute the band over the last `period` closes.
///
/// Returns `None` when fewer than `period` closes are available or `period` is zero.
pub fn compute_band(closes: &[f64], period: usize, width: f64) -> Option<Band> {
    if period == 0 || closes.len() < period {
        return None;
    }

    let window = &closes[closes.len() - period..];
    let n = period as f64;

    let middle = window.iter().sum::<f64>() / n;
    let variance = window
        .iter()
        .map(|&x| {
            let diff = x - middle;
            diff * diff
        })
        .sum::<f64>()
        / n;
    let deviation = variance.sqrt();

    Some(Band {
        upper: middle + width * deviation,
        middle,
        lower: middle - width * deviation,
    })
}

/// Percentage placement of `price` between the lower and upper band, clamped to [0, 100].
///
/// A zero-width (or non-finite width) band yields [`DEGENERATE_POSITION`].
/// A non-finite price yields `None`.
pub fn compute_position(price: f64, band: Option<&Band>) -> Option<f64> {
    let band = band?;
    if !price.is_finite() {
        return None;
    }

    let width = band.width();
    if width == 0.0 || !width.is_finite() {
        return Some(DEGENERATE_POSITION);
    }

    let position = (price - band.lower) / width * 100.0;
    Some(position.clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_short_series_has_no_band() {
        let closes = vec![1.0; 19];
        assert!(compute_band(&closes, 20, 2.0).is_none());
        assert!(compute_band(&[], 20, 2.0).is_none());
        assert!(compute_band(&[1.0, 2.0], 0, 2.0).is_none());
    }

    #[test]
    fn test_population_deviation_over_trailing_window() {
        // Leading values fall outside the window and must be ignored
        let mut closes = vec![1_000.0, -1_000.0];
        closes.extend([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);

        let band = compute_band(&closes, 8, 2.0).unwrap();

        // mean 5, population std dev 2
        assert!(approx(band.middle, 5.0));
        assert!(approx(band.upper, 9.0));
        assert!(approx(band.lower, 1.0));
    }

    #[test]
    fn test_constant_series_is_degenerate_mid_band() {
        let mut closes = vec![10.0; 20];
        closes.push(10.0);

        let band = compute_band(&closes, 20, 2.0).unwrap();
        assert_eq!(
            band,
            Band {
                upper: 10.0,
                middle: 10.0,
                lower: 10.0
            }
        );
        assert_eq!(compute_position(10.0, Some(&band)), Some(DEGENERATE_POSITION));
        assert_eq!(compute_position(12.0, Some(&band)), Some(DEGENERATE_POSITION));
    }

    #[test]
    fn test_position_is_clamped() {
        let band = Band {
            upper: 110.0,
            middle: 100.0,
            lower: 90.0,
        };

        assert_eq!(compute_position(100.0, Some(&band)), Some(50.0));
        assert_eq!(compute_position(91.0, Some(&band)), Some(5.0));
        assert_eq!(compute_position(50.0, Some(&band)), Some(0.0));
        assert_eq!(compute_position(500.0, Some(&band)), Some(100.0));
        assert_eq!(compute_position(100.0, None), None);
        assert_eq!(compute_position(f64::NAN, Some(&band)), None);
    }

    #[test]
    fn test_position_in_range_for_varied_inputs() {
        let band = Band {
            upper: 3.5,
            middle: 2.0,
            lower: 0.5,
        };
        for i in -50..50 {
            let price = i as f64 * 0.37;
            let position = compute_position(price, Some(&band)).unwrap();
            assert!((0.0..=100.0).contains(&position), "{price} -> {position}");
        }
    }
}
