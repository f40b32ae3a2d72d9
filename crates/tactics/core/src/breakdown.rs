//! Score accumulation with an optional explanation side channel.
//!
//! Every scorer in the crate builds its total through [`ScoreSheet`]. When
//! recording is disabled the breakdown is never allocated and the totals are
//! identical, so explanation can be switched off without changing decisions.

use std::fmt;

/// Ordered list of `(reason, contribution)` pairs, or nothing.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breakdown {
    entries: Option<Vec<(String, f32)>>,
}

impl Breakdown {
    pub fn recording() -> Self {
        Self {
            entries: Some(Vec::new()),
        }
    }

    pub fn disabled() -> Self {
        Self { entries: None }
    }

    pub fn new(record: bool) -> Self {
        if record {
            Self::recording()
        } else {
            Self::disabled()
        }
    }

    pub fn is_recording(&self) -> bool {
        self.entries.is_some()
    }

    pub fn push(&mut self, reason: &str, value: f32) {
        if let Some(entries) = self.entries.as_mut() {
            entries.push((reason.to_owned(), value));
        }
    }

    /// Contribution recorded under `reason`, if any.
    pub fn get(&self, reason: &str) -> Option<f32> {
        self.entries
            .as_ref()?
            .iter()
            .find(|(r, _)| r == reason)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, reason: &str) -> bool {
        self.get(reason).is_some()
    }

    pub fn entries(&self) -> &[(String, f32)] {
        self.entries.as_deref().unwrap_or(&[])
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (reason, value) in self.entries() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{reason}={value:+.2}")?;
            first = false;
        }
        Ok(())
    }
}

/// Running total plus its breakdown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreSheet {
    total: f32,
    breakdown: Breakdown,
}

impl ScoreSheet {
    pub fn new(record: bool) -> Self {
        Self {
            total: 0.0,
            breakdown: Breakdown::new(record),
        }
    }

    /// Adds a contribution (negative values are penalties).
    pub fn add(&mut self, reason: &str, value: f32) {
        self.total += value;
        self.breakdown.push(reason, value);
    }

    /// Multiplies the running total; the breakdown records the factor itself.
    pub fn scale(&mut self, reason: &str, factor: f32) {
        self.total *= factor;
        self.breakdown.push(reason, factor);
    }

    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn finish(self) -> (f32, Breakdown) {
        (self.total, self.breakdown)
    }
}
