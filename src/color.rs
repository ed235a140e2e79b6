use crate::error::GeometryError;

/// An 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorRgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorRgb {
    pub const fn new(r: u8, g: u8, b: u8) -> ColorRgb {
        ColorRgb { r, g, b }
    }
}

/// A two-color linear gradient sampled over [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gradient {
    pub start: ColorRgb,
    pub end: ColorRgb,
}

impl Default for Gradient {
    /// Blue at t = 0, red at t = 1.
    fn default() -> Gradient {
        Gradient {
            start: ColorRgb::new(0, 0, 255),
            end: ColorRgb::new(255, 0, 0),
        }
    }
}

impl Gradient {
    pub const fn new(start: ColorRgb, end: ColorRgb) -> Gradient {
        Gradient { start, end }
    }

    /// Samples the gradient at `t`, clamping `t` into [0, 1] first.
    ///
    /// Channels interpolate linearly and round to the nearest integer, so
    /// `sample(0.0)` and `sample(1.0)` reproduce the endpoints exactly.
    pub fn sample(&self, t: f64) -> ColorRgb {
        let t = t.clamp(0.0, 1.0);
        ColorRgb {
            r: lerp_channel(self.start.r, self.end.r, t),
            g: lerp_channel(self.start.g, self.end.g, t),
            b: lerp_channel(self.start.b, self.end.b, t),
        }
    }
}

fn lerp_channel(c0: u8, c1: u8, t: f64) -> u8 {
    let v = c0 as f64 + t * (c1 as f64 - c0 as f64);
    v.round().clamp(0.0, 255.0) as u8
}

/// Rescales `values` to [0, 1] by min-max normalization.
///
/// Fails with [`GeometryError::DegenerateRange`] when all values are equal,
/// since `(v - min) / (max - min)` would divide by zero, and with
/// [`GeometryError::EmptyAttributes`] when there are no values at all.
/// Callers that want to render a constant field anyway should map every cell
/// to a fixed midpoint color instead; see the pipeline.
pub fn normalize(values: &[f64]) -> Result<Vec<f64>, GeometryError> {
    if values.is_empty() {
        return Err(GeometryError::EmptyAttributes);
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    if !(max > min) {
        return Err(GeometryError::DegenerateRange(min));
    }
    let span = max - min;
    Ok(values.iter().map(|&v| (v - min) / span).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        let out = normalize(&[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(out, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_normalize_constant_field_fails() {
        let err = normalize(&[7.0, 7.0, 7.0]).unwrap_err();
        assert_eq!(err, GeometryError::DegenerateRange(7.0));
        assert_eq!(normalize(&[1.0]).unwrap_err(), GeometryError::DegenerateRange(1.0));
    }

    #[test]
    fn test_normalize_empty_field_is_named() {
        assert_eq!(normalize(&[]).unwrap_err(), GeometryError::EmptyAttributes);
    }

    #[test]
    fn test_gradient_endpoints_exact() {
        let g = Gradient::default();
        assert_eq!(g.sample(0.0), ColorRgb::new(0, 0, 255));
        assert_eq!(g.sample(1.0), ColorRgb::new(255, 0, 0));
    }

    #[test]
    fn test_gradient_midpoint_rounds_to_nearest() {
        let g = Gradient::new(ColorRgb::new(0, 0, 0), ColorRgb::new(255, 0, 0));
        assert_eq!(g.sample(0.5), ColorRgb::new(128, 0, 0));
    }

    #[test]
    fn test_gradient_clamps_out_of_range() {
        let g = Gradient::default();
        assert_eq!(g.sample(-3.0), g.sample(0.0));
        assert_eq!(g.sample(42.0), g.sample(1.0));
    }
}
