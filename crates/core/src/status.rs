//! Text-backed enums for project/task status and project currency.
//!
//! Each variant's wire form matches the value stored in the corresponding
//! `TEXT` column and allowed by its `ck_*` check constraint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// The stored/wire representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        $label,
                        [$( $text ),+].join(", ")
                    ))),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

define_text_enum! {
    /// Project lifecycle status.
    ProjectStatus ("project status") {
        #[default]
        New = "NEW",
        InProgress = "IN_PROGRESS",
        InReview = "IN_REVIEW",
        Done = "DONE",
        Paused = "PAUSED",
    }
}

define_text_enum! {
    /// Task lifecycle status.
    TaskStatus ("task status") {
        #[default]
        Pending = "PENDING",
        InProgress = "IN_PROGRESS",
        Done = "DONE",
    }
}

define_text_enum! {
    /// Currency tag carried by a project's `initial_cost`.
    Currency ("currency") {
        #[default]
        Usd = "USD",
        Ars = "ARS",
    }
}
