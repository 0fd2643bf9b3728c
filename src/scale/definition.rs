//! Named step patterns and their text form.

use std::fmt;

use super::error::ScaleError;

/// A named, non-empty cycle of positive semitone steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleDefinition {
    name: String,
    steps: Vec<u32>,
}

impl ScaleDefinition {
    /// Create a definition, rejecting empty names and invalid patterns.
    pub fn new(name: impl Into<String>, steps: Vec<u32>) -> Result<Self, ScaleError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ScaleError::EmptyName);
        }
        validate_pattern(&steps)?;
        Ok(Self { name, steps })
    }

    /// Create a definition from comma-separated steps, e.g. `"2, 2, 1, 2, 2, 2, 1"`.
    pub fn parse(name: impl Into<String>, pattern: &str) -> Result<Self, ScaleError> {
        Self::new(name, parse_pattern(pattern)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[u32] {
        &self.steps
    }

    /// The scales a fresh store is seeded with.
    pub fn defaults() -> Vec<ScaleDefinition> {
        [
            ("major", vec![2, 2, 1, 2, 2, 2, 1]),
            ("minor", vec![2, 1, 2, 2, 1, 3, 1]),
            ("mixolydian", vec![1, 2, 2, 2, 1, 2, 2]),
        ]
        .into_iter()
        .map(|(name, steps)| ScaleDefinition {
            name: name.to_string(),
            steps,
        })
        .collect()
    }
}

impl fmt::Display for ScaleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, format_pattern(&self.steps))
    }
}

/// Check that a pattern is non-empty and every step is positive.
pub fn validate_pattern(steps: &[u32]) -> Result<(), ScaleError> {
    if steps.is_empty() {
        return Err(ScaleError::EmptyPattern);
    }
    if let Some(index) = steps.iter().position(|&s| s == 0) {
        return Err(ScaleError::NonPositiveStep { index, step: 0 });
    }
    Ok(())
}

/// Parse comma-separated steps. Whitespace around each step is ignored.
pub fn parse_pattern(text: &str) -> Result<Vec<u32>, ScaleError> {
    if text.trim().is_empty() {
        return Err(ScaleError::EmptyPattern);
    }
    let steps = text
        .split(',')
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            let step: i64 = token
                .parse()
                .map_err(|_| ScaleError::InvalidStep(token.to_string()))?;
            if step <= 0 {
                return Err(ScaleError::NonPositiveStep { index, step });
            }
            u32::try_from(step).map_err(|_| ScaleError::InvalidStep(token.to_string()))
        })
        .collect::<Result<Vec<u32>, ScaleError>>()?;
    validate_pattern(&steps)?;
    Ok(steps)
}

/// Inverse of [`parse_pattern`].
pub fn format_pattern(steps: &[u32]) -> String {
    steps
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
