//! Piecewise-linear interpolation from a value domain to output values
//!
//! Output values are plain numbers or carry an angle unit (`"45deg"`,
//! `"0.5rad"`), so rotations can be tweened the same way as offsets.

use super::value::AnimatedValue;
use super::{AnimationError, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Unit attached to an output value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Plain number (offsets, scale, opacity)
    #[default]
    None,
    /// Angle in degrees
    Degrees,
    /// Angle in radians
    Radians,
}

impl Unit {
    /// Suffix used when formatting
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::Degrees => "deg",
            Unit::Radians => "rad",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::None => f.write_str("number"),
            other => f.write_str(other.suffix()),
        }
    }
}

/// A number with an optional unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputValue {
    /// Magnitude
    pub value: f64,
    /// Unit
    pub unit: Unit,
}

impl OutputValue {
    /// Plain number
    pub const fn number(value: f64) -> Self {
        Self {
            value,
            unit: Unit::None,
        }
    }

    /// Angle in degrees
    pub const fn degrees(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Degrees,
        }
    }

    /// Angle in radians
    pub const fn radians(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Radians,
        }
    }

    /// Value as degrees; plain numbers are taken to already be degrees
    pub fn to_degrees(&self) -> f64 {
        match self.unit {
            Unit::Radians => self.value.to_degrees(),
            Unit::None | Unit::Degrees => self.value,
        }
    }
}

impl From<f64> for OutputValue {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl fmt::Display for OutputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

impl FromStr for OutputValue {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (number, unit) = if let Some(n) = trimmed.strip_suffix("deg") {
            (n, Unit::Degrees)
        } else if let Some(n) = trimmed.strip_suffix("rad") {
            (n, Unit::Radians)
        } else {
            (trimmed, Unit::None)
        };

        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| AnimationError::InvalidOutput(s.to_string()))?;
        if !value.is_finite() {
            return Err(AnimationError::InvalidOutput(s.to_string()));
        }

        Ok(Self { value, unit })
    }
}

impl TryFrom<&str> for OutputValue {
    type Error = AnimationError;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

/// Behavior outside the input range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Extrapolate {
    /// Continue the edge segment linearly
    #[default]
    Extend,
    /// Hold the edge output
    Clamp,
    /// Return the input unchanged
    Identity,
}

/// Input and output ranges plus edge behavior
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationConfig {
    /// Domain breakpoints, non-decreasing
    pub input_range: Vec<f64>,
    /// Output at each breakpoint
    pub output_range: Vec<OutputValue>,
    /// Behavior below the first breakpoint
    pub extrapolate_left: Extrapolate,
    /// Behavior above the last breakpoint
    pub extrapolate_right: Extrapolate,
}

impl InterpolationConfig {
    /// Create a config that extends linearly on both sides
    pub fn new<I, O, V>(input_range: I, output_range: O) -> Self
    where
        I: IntoIterator<Item = f64>,
        O: IntoIterator<Item = V>,
        V: Into<OutputValue>,
    {
        Self {
            input_range: input_range.into_iter().collect(),
            output_range: output_range.into_iter().map(Into::into).collect(),
            extrapolate_left: Extrapolate::Extend,
            extrapolate_right: Extrapolate::Extend,
        }
    }

    /// Create a config from textual outputs such as `"0deg"`
    pub fn parse<I>(input_range: I, output_range: &[&str]) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let outputs = output_range
            .iter()
            .map(|s| s.parse::<OutputValue>())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(input_range, outputs))
    }

    /// Set both edge behaviors
    pub fn extrapolate(mut self, extrapolate: Extrapolate) -> Self {
        self.extrapolate_left = extrapolate;
        self.extrapolate_right = extrapolate;
        self
    }

    /// Clamp on both sides
    pub fn clamped(self) -> Self {
        self.extrapolate(Extrapolate::Clamp)
    }
}

/// A validated interpolation
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    input: Vec<f64>,
    output: Vec<f64>,
    unit: Unit,
    extrapolate_left: Extrapolate,
    extrapolate_right: Extrapolate,
}

impl Interpolation {
    /// Validate a config
    pub fn new(config: InterpolationConfig) -> Result<Self> {
        let InterpolationConfig {
            input_range,
            output_range,
            extrapolate_left,
            extrapolate_right,
        } = config;

        if input_range.len() < 2 {
            return Err(AnimationError::RangeTooShort(input_range.len()));
        }
        if input_range.len() != output_range.len() {
            return Err(AnimationError::RangeLengthMismatch {
                input: input_range.len(),
                output: output_range.len(),
            });
        }
        for (i, x) in input_range.iter().enumerate() {
            if !x.is_finite() || (i > 0 && *x < input_range[i - 1]) {
                return Err(AnimationError::NonMonotonicInput(i));
            }
        }

        let unit = output_range[0].unit;
        for out in &output_range {
            if out.unit != unit {
                return Err(AnimationError::MixedUnits {
                    first: unit,
                    other: out.unit,
                });
            }
            if !out.value.is_finite() {
                return Err(AnimationError::InvalidOutput(out.to_string()));
            }
        }

        Ok(Self {
            input: input_range,
            output: output_range.into_iter().map(|o| o.value).collect(),
            unit,
            extrapolate_left,
            extrapolate_right,
        })
    }

    /// Unit of every output
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Map an input to its output
    pub fn map(&self, x: f64) -> OutputValue {
        let i = self.segment(x);
        let value = self.map_segment(
            x,
            (self.input[i], self.input[i + 1]),
            (self.output[i], self.output[i + 1]),
        );
        OutputValue {
            value,
            unit: self.unit,
        }
    }

    // Index of the segment containing x; edge segments cover everything outside.
    fn segment(&self, x: f64) -> usize {
        let last = self.input.len() - 1;
        let mut i = 1;
        while i < last && self.input[i] < x {
            i += 1;
        }
        i - 1
    }

    fn map_segment(
        &self,
        x: f64,
        (in_min, in_max): (f64, f64),
        (out_min, out_max): (f64, f64),
    ) -> f64 {
        let mut x = x;

        if x < in_min {
            match self.extrapolate_left {
                Extrapolate::Identity => return x,
                Extrapolate::Clamp => x = in_min,
                Extrapolate::Extend => {}
            }
        }
        if x > in_max {
            match self.extrapolate_right {
                Extrapolate::Identity => return x,
                Extrapolate::Clamp => x = in_max,
                Extrapolate::Extend => {}
            }
        }

        if out_min == out_max {
            return out_min;
        }
        // Zero-width segment
        if in_min == in_max {
            return if x <= in_min { out_min } else { out_max };
        }

        let progress = (x - in_min) / (in_max - in_min);
        out_min + progress * (out_max - out_min)
    }
}

/// An interpolation bound to a live animated value
#[derive(Debug, Clone)]
pub struct AnimatedInterpolation {
    source: AnimatedValue,
    interpolation: Arc<Interpolation>,
}

impl AnimatedInterpolation {
    pub(crate) fn new(source: AnimatedValue, interpolation: Interpolation) -> Self {
        Self {
            source,
            interpolation: Arc::new(interpolation),
        }
    }

    /// Resolve against the source's current value
    pub fn value(&self) -> OutputValue {
        self.interpolation.map(self.source.value())
    }

    /// Value this binding reads from
    pub fn source(&self) -> &AnimatedValue {
        &self.source
    }

    /// The underlying mapping
    pub fn interpolation(&self) -> &Interpolation {
        &self.interpolation
    }
}

/// Map a `[0, 1]` progress value onto two outputs
///
/// Shorthand for the common "tween between A and B" case. Outputs are
/// numbers, [`OutputValue`]s or unit strings such as `"180deg"`.
pub fn interpolate_unit<V>(value: &AnimatedValue, outputs: [V; 2]) -> Result<AnimatedInterpolation>
where
    V: TryInto<OutputValue>,
    AnimationError: From<<V as TryInto<OutputValue>>::Error>,
{
    let [from, to] = outputs;
    let outputs: [OutputValue; 2] = [from.try_into()?, to.try_into()?];
    value.interpolate(InterpolationConfig::new([0.0, 1.0], outputs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interp(input: &[f64], output: &[f64]) -> Interpolation {
        Interpolation::new(InterpolationConfig::new(
            input.iter().copied(),
            output.iter().copied(),
        ))
        .unwrap()
    }

    #[test]
    fn test_linear_two_point() {
        let i = interp(&[0.0, 100.0], &[-100.0, 0.0]);
        assert_eq!(i.map(0.0).value, -100.0);
        assert_eq!(i.map(25.0).value, -75.0);
        assert_eq!(i.map(100.0).value, 0.0);
    }

    #[test]
    fn test_extends_past_edges_by_default() {
        let i = interp(&[0.0, 100.0], &[-100.0, 0.0]);
        assert_eq!(i.map(130.0).value, 30.0);
        assert_eq!(i.map(-20.0).value, -120.0);
    }

    #[test]
    fn test_clamp_and_identity() {
        let clamped = Interpolation::new(
            InterpolationConfig::new([0.0, 1.0], [10.0, 30.0]).clamped(),
        )
        .unwrap();
        assert_eq!(clamped.map(2.0).value, 30.0);
        assert_eq!(clamped.map(-1.0).value, 10.0);

        let identity = Interpolation::new(
            InterpolationConfig::new([0.0, 1.0], [10.0, 30.0]).extrapolate(Extrapolate::Identity),
        )
        .unwrap();
        assert_eq!(identity.map(5.0).value, 5.0);
        assert_eq!(identity.map(0.5).value, 20.0);
    }

    #[test]
    fn test_multi_segment() {
        let i = interp(&[0.0, 0.7, 1.0], &[0.0, 70.0, 100.0]);
        assert!((i.map(0.35).value - 35.0).abs() < 1e-9);
        assert!((i.map(0.85).value - 85.0).abs() < 1e-9);
        assert_eq!(i.map(0.7).value, 70.0);
    }

    #[test]
    fn test_degenerate_domain_does_not_divide_by_zero() {
        let i = interp(&[0.0, 0.0], &[-5.0, 5.0]);
        assert_eq!(i.map(0.0).value, -5.0);
        assert_eq!(i.map(-3.0).value, -5.0);
        assert_eq!(i.map(3.0).value, 5.0);

        let zero = interp(&[0.0, 0.0], &[0.0, 0.0]);
        assert_eq!(zero.map(50.0).value, 0.0);
    }

    #[test]
    fn test_units_are_carried() {
        let config = InterpolationConfig::parse([0.0, 1.0], &["0deg", "180deg"]).unwrap();
        let i = Interpolation::new(config).unwrap();
        let half = i.map(0.5);
        assert_eq!(half, OutputValue::degrees(90.0));
        assert_eq!(half.to_string(), "90deg");
    }

    #[test]
    fn test_parse_output_values() {
        assert_eq!("45deg".parse::<OutputValue>().unwrap(), OutputValue::degrees(45.0));
        assert_eq!(" 1.5rad".parse::<OutputValue>().unwrap(), OutputValue::radians(1.5));
        assert_eq!("12".parse::<OutputValue>().unwrap(), OutputValue::number(12.0));
        assert!(matches!(
            "wide".parse::<OutputValue>(),
            Err(AnimationError::InvalidOutput(_))
        ));
    }

    #[test]
    fn test_radians_to_degrees() {
        let out = OutputValue::radians(std::f64::consts::PI);
        assert!((out.to_degrees() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            Interpolation::new(InterpolationConfig::new([0.0], [1.0])),
            Err(AnimationError::RangeTooShort(1))
        );
        assert_eq!(
            Interpolation::new(InterpolationConfig::new([0.0, 1.0], [1.0, 2.0, 3.0])),
            Err(AnimationError::RangeLengthMismatch { input: 2, output: 3 })
        );
        assert_eq!(
            Interpolation::new(InterpolationConfig::new([0.0, 2.0, 1.0], [1.0, 2.0, 3.0])),
            Err(AnimationError::NonMonotonicInput(2))
        );
        assert_eq!(
            Interpolation::new(InterpolationConfig::new(
                [0.0, 1.0],
                [OutputValue::degrees(0.0), OutputValue::number(1.0)]
            )),
            Err(AnimationError::MixedUnits {
                first: Unit::Degrees,
                other: Unit::None,
            })
        );
    }

    #[test]
    fn test_interpolate_unit_helper() {
        let value = AnimatedValue::new(0.0);
        let translate = interpolate_unit(&value, [0.0, 500.0]).unwrap();
        value.set_value(0.5);
        assert_eq!(translate.value().value, 250.0);
    }

    #[test]
    fn test_interpolate_unit_with_unit_strings() {
        let value = AnimatedValue::new(0.0);
        let rotate = interpolate_unit(&value, ["0deg", "180deg"]).unwrap();
        value.set_value(0.25);
        assert_eq!(rotate.value(), OutputValue::degrees(45.0));

        assert_eq!(
            interpolate_unit(&value, ["0deg", "half"]).unwrap_err(),
            AnimationError::InvalidOutput("half".to_string())
        );
    }
}
