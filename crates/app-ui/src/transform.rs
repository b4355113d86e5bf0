//! Transform styles with live animated bindings
//!
//! A [`TransformStyle`] is built once (and rebuilt only when something it
//! was derived from changes, such as a measured width). Resolving it reads
//! the current animated values, so the renderer calls
//! [`TransformStyle::resolve`] every frame without rebuilding anything.

use crate::animation::{AnimatedInterpolation, AnimatedValue, OutputValue};
use serde::{Deserialize, Serialize};

/// Source of a transform's value
#[derive(Debug, Clone)]
pub enum TransformValue {
    /// Constant
    Static(OutputValue),
    /// Animated value used as is
    Value(AnimatedValue),
    /// Interpolated animated value
    Interpolated(AnimatedInterpolation),
}

impl TransformValue {
    /// Current value
    pub fn current(&self) -> OutputValue {
        match self {
            TransformValue::Static(value) => *value,
            TransformValue::Value(value) => OutputValue::number(value.value()),
            TransformValue::Interpolated(binding) => binding.value(),
        }
    }

    /// Whether the value changes over time
    pub fn is_animated(&self) -> bool {
        !matches!(self, TransformValue::Static(_))
    }
}

impl From<f64> for TransformValue {
    fn from(value: f64) -> Self {
        TransformValue::Static(OutputValue::number(value))
    }
}

impl From<OutputValue> for TransformValue {
    fn from(value: OutputValue) -> Self {
        TransformValue::Static(value)
    }
}

impl From<AnimatedValue> for TransformValue {
    fn from(value: AnimatedValue) -> Self {
        TransformValue::Value(value)
    }
}

impl From<AnimatedInterpolation> for TransformValue {
    fn from(binding: AnimatedInterpolation) -> Self {
        TransformValue::Interpolated(binding)
    }
}

/// One entry of a transform list
#[derive(Debug, Clone)]
pub enum Transform {
    /// Horizontal translation
    TranslateX(TransformValue),
    /// Vertical translation
    TranslateY(TransformValue),
    /// Rotation; plain numbers are degrees
    Rotate(TransformValue),
    /// Uniform scale
    Scale(TransformValue),
}

impl Transform {
    /// Horizontal translation
    pub fn translate_x(value: impl Into<TransformValue>) -> Self {
        Transform::TranslateX(value.into())
    }

    /// Vertical translation
    pub fn translate_y(value: impl Into<TransformValue>) -> Self {
        Transform::TranslateY(value.into())
    }

    /// Rotation
    pub fn rotate(value: impl Into<TransformValue>) -> Self {
        Transform::Rotate(value.into())
    }

    /// Uniform scale
    pub fn scale(value: impl Into<TransformValue>) -> Self {
        Transform::Scale(value.into())
    }

    /// Resolve against current values
    pub fn resolve(&self) -> ResolvedTransform {
        match self {
            Transform::TranslateX(v) => ResolvedTransform::TranslateX(v.current().value),
            Transform::TranslateY(v) => ResolvedTransform::TranslateY(v.current().value),
            Transform::Rotate(v) => ResolvedTransform::Rotate(v.current().to_degrees()),
            Transform::Scale(v) => ResolvedTransform::Scale(v.current().value),
        }
    }

    fn value(&self) -> &TransformValue {
        match self {
            Transform::TranslateX(v)
            | Transform::TranslateY(v)
            | Transform::Rotate(v)
            | Transform::Scale(v) => v,
        }
    }
}

/// A transform with concrete numbers, ready for the renderer
///
/// Serializes the way view runtimes expect a transform entry, e.g.
/// `{"translateX": -40.0}`. Rotation is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolvedTransform {
    /// Horizontal translation
    TranslateX(f64),
    /// Vertical translation
    TranslateY(f64),
    /// Rotation in degrees
    Rotate(f64),
    /// Uniform scale
    Scale(f64),
}

/// Ordered list of transforms
#[derive(Debug, Clone, Default)]
pub struct TransformStyle {
    transforms: Vec<Transform>,
}

impl TransformStyle {
    /// Create a style from transforms, applied in order
    pub fn new(transforms: Vec<Transform>) -> Self {
        Self { transforms }
    }

    /// Append a transform
    pub fn with(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    /// The transforms
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Whether any entry is animated
    pub fn is_animated(&self) -> bool {
        self.transforms.iter().any(|t| t.value().is_animated())
    }

    /// Resolve every entry against current values
    pub fn resolve(&self) -> Vec<ResolvedTransform> {
        self.transforms.iter().map(Transform::resolve).collect()
    }
}

/// A transform style rebuilt only when its dependency key changes
///
/// Mirrors memoizing a style on a dependency list: `get` returns the cached
/// style while the key is unchanged and calls the builder otherwise.
#[derive(Debug)]
pub struct MemoTransformStyle<K> {
    cached: Option<(K, TransformStyle)>,
}

impl<K> Default for MemoTransformStyle<K> {
    fn default() -> Self {
        Self { cached: None }
    }
}

impl<K: PartialEq + Clone> MemoTransformStyle<K> {
    /// Empty cache
    pub fn new() -> Self {
        Self { cached: None }
    }

    /// Cached style for `key`, building it if the key changed
    pub fn get<F>(&mut self, key: &K, build: F) -> &TransformStyle
    where
        F: FnOnce() -> TransformStyle,
    {
        if !matches!(&self.cached, Some((cached, _)) if cached == key) {
            self.cached = None;
        }
        let (_, style) = self.cached.get_or_insert_with(|| (key.clone(), build()));
        style
    }
}
