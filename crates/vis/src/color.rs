/// Fill for boundary features whose FIPS code has no record group.
pub const FALLBACK_FILL: &str = "#cccccc";

// Sequential palette endpoints, light to dark.
const PALETTE_START: [u8; 3] = [0xff, 0xff, 0xb2];
const PALETTE_END: [u8; 3] = [0xbd, 0x00, 0x26];

/// A logarithmic sequential color scale over per-state maximum test counts.
///
/// The domain is ascending, `[min, max]` of the observed group maxima, and
/// colors darken monotonically with increasing value. The reference
/// implementation ordered its domain `(max, min)`, inverting the ramp; that
/// ordering looked unintentional and is deliberately not reproduced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    ln_min: f64,
    ln_max: f64,
}

impl ColorScale {
    /// Builds a scale over the given values, typically the per-state maxima
    /// of cumulative test totals. Returns `None` when there are no values.
    pub fn over_maxima<I>(values: I) -> Option<ColorScale>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut values = values.into_iter();
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(min, max), value| {
            (min.min(value), max.max(value))
        });

        Some(Self {
            // Values are floored at 1 so that zero totals stay finite.
            ln_min: (min.max(1) as f64).ln(),
            ln_max: (max.max(1) as f64).ln(),
        })
    }

    /// Position of a value within the domain, in `[0, 1]`.
    /// A degenerate single-value domain maps to the dark end.
    pub fn fraction(&self, value: u64) -> f64 {
        if self.ln_max <= self.ln_min {
            return 1.0;
        }

        let ln_value = (value.max(1) as f64).ln();
        ((ln_value - self.ln_min) / (self.ln_max - self.ln_min)).clamp(0.0, 1.0)
    }

    /// The fill color for a value, as a `#rrggbb` string.
    pub fn color(&self, value: u64) -> String {
        interpolate(self.fraction(value))
    }
}

/// The palette color at a fraction in `[0, 1]`, light to dark.
pub fn interpolate(fraction: f64) -> String {
    let t = fraction.clamp(0.0, 1.0);
    let channel = |i: usize| {
        let start = PALETTE_START[i] as f64;
        let end = PALETTE_END[i] as f64;
        (start + t * (end - start)).round() as u8
    };

    format!("#{:02x}{:02x}{:02x}", channel(0), channel(1), channel(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_endpoints_map_to_opposite_palette_ends() {
        let scale = ColorScale::over_maxima(vec![120, 4500, 88000]).unwrap();

        assert_eq!(scale.color(120), "#ffffb2");
        assert_eq!(scale.color(88000), "#bd0026");
    }

    #[test]
    fn colors_darken_monotonically() {
        let scale = ColorScale::over_maxima(vec![10, 100000]).unwrap();

        let low = scale.fraction(10);
        let mid = scale.fraction(1000);
        let high = scale.fraction(100000);

        assert!(low < mid);
        assert!(mid < high);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let scale = ColorScale::over_maxima(vec![10, 100000]).unwrap();

        assert_eq!(scale.color(1000), scale.color(1000));
        assert_eq!(
            ColorScale::over_maxima(vec![10, 100000]),
            Some(scale)
        );
    }

    #[test]
    fn out_of_domain_values_clamp() {
        let scale = ColorScale::over_maxima(vec![10, 1000]).unwrap();

        assert_eq!(scale.fraction(1), 0.0);
        assert_eq!(scale.fraction(5000), 1.0);
    }

    #[test]
    fn degenerate_domain_maps_to_the_dark_end() {
        let scale = ColorScale::over_maxima(vec![42]).unwrap();

        assert_eq!(scale.fraction(42), 1.0);
        assert_eq!(scale.color(42), "#bd0026");
    }

    #[test]
    fn no_values_yield_no_scale() {
        assert!(ColorScale::over_maxima(vec![]).is_none());
    }
}
