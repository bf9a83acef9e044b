// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Error types for sizing and planning operations

use std::fmt;

/// ErrorKind is all kinds of Error of cuckoo-sizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The argument provided is invalid.
    InvalidArgument,
    /// A logarithm or square root was asked to leave its domain.
    ArithmeticDomain,
    /// The partition search exceeded its iteration cap.
    PlannerDidNotConverge,
}

impl ErrorKind {
    /// Convert this error kind instance into static str.
    pub const fn into_static(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::ArithmeticDomain => "ArithmeticDomain",
            ErrorKind::PlannerDidNotConverge => "PlannerDidNotConverge",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.into_static())
    }
}

/// Error is the error struct returned by all fallible cuckoo-sizing functions.
///
/// # Examples
///
/// ```
/// # use cuckoo_sizing::error::Error;
/// # use cuckoo_sizing::error::ErrorKind;
/// let err = Error::new(ErrorKind::InvalidArgument, "key count must be positive");
/// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
/// assert_eq!(err.message(), "key count must be positive");
/// ```
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<(&'static str, String)>,
}

impl Error {
    /// Create a new Error with error kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: vec![],
        }
    }

    /// Add more context in error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Return error's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return error's message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Return the context pairs attached to this error, in insertion order.
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }
}

// Convenient constructors used within cuckoo-sizing crate.
impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, msg)
    }

    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArithmeticDomain, msg)
    }

    pub(crate) fn not_converged(stage: &'static str, cap: usize) -> Self {
        Self::new(
            ErrorKind::PlannerDidNotConverge,
            format!("{stage} exceeded the iteration cap of {cap}"),
        )
    }

    /// Rejects NaN, infinities and values not strictly greater than zero.
    pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(Self::invalid_argument(format!("{name} must be a positive finite number"))
                .with_context(name, value))
        }
    }

    /// Rejects NaN, infinities and negative values.
    pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(
                Self::invalid_argument(format!("{name} must be a non-negative finite number"))
                    .with_context(name, value),
            )
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // If alternate has been specified, we will print like Debug.
        if f.alternate() {
            let mut de = f.debug_struct("Error");
            de.field("kind", &self.kind);
            de.field("message", &self.message);
            de.field("context", &self.context);
            return de.finish();
        }

        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }
        writeln!(f)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "Context:")?;
            for (k, v) in self.context.iter() {
                writeln!(f, "   {k}: {v}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if !self.context.is_empty() {
            write!(f, ", context: {{ ")?;
            for (i, (k, v)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}: {v}")?;
            }
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn test_format_consistency() {
        let err = Error::new(ErrorKind::ArithmeticDomain, "ln of a negative number");
        assert_snapshot!(err, @"ArithmeticDomain => ln of a negative number");
    }

    #[test]
    fn test_format_with_multiple_contexts() {
        let err = Error::invalid_argument("bad layout")
            .with_context("chunks", 0)
            .with_context("buckets_per_chunk", 4096);
        assert_snapshot!(err, @"InvalidArgument, context: { chunks: 0, buckets_per_chunk: 4096 } => bad layout");
    }

    #[test]
    fn test_debug_format() {
        let err = Error::invalid_argument("bad layout")
            .with_context("chunks", 0)
            .with_context("buckets_per_chunk", 4096);
        assert_snapshot!(format!("{err:?}"), @r"
        InvalidArgument => bad layout

        Context:
           chunks: 0
           buckets_per_chunk: 4096
        ");

        let err = Error::domain("");
        assert_eq!(format!("{err:?}"), "ArithmeticDomain\n");
        assert!(format!("{err:#?}").starts_with("Error {"));
    }

    #[test]
    fn test_require_positive_rejects_nan_and_zero() {
        assert!(Error::require_positive("keys", f64::NAN).is_err());
        assert!(Error::require_positive("keys", 0.0).is_err());
        assert!(Error::require_positive("keys", f64::INFINITY).is_err());
        assert_eq!(Error::require_positive("keys", 3.5).unwrap(), 3.5);

        let err = Error::require_positive("keys", -1.0).unwrap_err();
        assert_snapshot!(err, @"InvalidArgument, context: { keys: -1 } => keys must be a positive finite number");
    }

    #[test]
    fn test_not_converged_kind() {
        let err = Error::not_converged("commit rounds", 22);
        assert_eq!(err.kind(), ErrorKind::PlannerDidNotConverge);
        assert_eq!(err.message(), "commit rounds exceeded the iteration cap of 22");
    }
}
