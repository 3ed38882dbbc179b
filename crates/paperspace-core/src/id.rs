//! Strongly-typed identifiers for Paperspace resources.
//!
//! Paperspace identifiers are opaque strings (`psxxxxxx`, `tezxxxxx`, ...).
//! Wrapping them keeps a script ID from being passed where a machine ID is
//! expected, and `parse_str` rejects values that would corrupt an endpoint
//! path when interpolated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Macro to generate strongly-typed identifier wrapper types.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an identifier without checking it.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Converts to the inner `String`.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Parses an identifier, rejecting values unsafe for use in a path.
            ///
            /// # Errors
            ///
            /// Returns an error if the string is empty, is `.` or `..`, or
            /// contains `/`, a backslash, `?`, `#`, `%` or whitespace.
            pub fn parse_str(input: &str) -> Result<Self> {
                validate_id(input).map(|()| Self(input.to_string()))
            }

            /// Checks that the identifier can be placed in an endpoint path.
            ///
            /// # Errors
            ///
            /// Returns [`Error::InvalidId`] under the same rules as
            /// [`Self::parse_str`].
            pub fn validate(&self) -> Result<()> {
                validate_id(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(wrapper: $name) -> Self {
                wrapper.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_str(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

fn validate_id(input: &str) -> Result<()> {
    if input.is_empty() {
        return Err(Error::InvalidId("identifier is empty".to_string()));
    }
    if input == "." || input == ".." {
        return Err(Error::InvalidId(input.to_string()));
    }
    if input
        .chars()
        .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace())
    {
        return Err(Error::InvalidId(input.to_string()));
    }
    Ok(())
}

id_type!(MachineId, "Identifier of a Paperspace machine.");
id_type!(ScriptId, "Identifier of a startup script.");
id_type!(NetworkId, "Identifier of a private network.");
id_type!(TeamId, "Identifier of a team.");
id_type!(UserId, "Identifier of a user.");
id_type!(TemplateId, "Identifier of a machine template.");
