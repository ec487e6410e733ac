// SPDX-FileCopyrightText: 2026 Postcraft Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Result type of a single worker call.

/// What a worker produced.
///
/// `Degraded` means the worker fell back to a deterministic value because the
/// backend answer was unusable; the pipeline carries on. Failures that must
/// abort the pipeline are the `Err` side of the worker's `Result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutput<T> {
    Structured(T),
    Degraded { value: T, reason: String },
}

impl<T> StageOutput<T> {
    pub fn value(&self) -> &T {
        match self {
            StageOutput::Structured(value) | StageOutput::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            StageOutput::Structured(value) | StageOutput::Degraded { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, StageOutput::Degraded { .. })
    }

    /// The fallback reason, when degraded.
    pub fn reason(&self) -> Option<&str> {
        match self {
            StageOutput::Structured(_) => None,
            StageOutput::Degraded { reason, .. } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let ok = StageOutput::Structured(1);
        assert_eq!(*ok.value(), 1);
        assert!(!ok.is_degraded());
        assert_eq!(ok.reason(), None);

        let degraded = StageOutput::Degraded {
            value: 2,
            reason: "bad json".into(),
        };
        assert!(degraded.is_degraded());
        assert_eq!(degraded.reason(), Some("bad json"));
        assert_eq!(degraded.into_value(), 2);
    }
}
