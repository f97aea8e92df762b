//! Text-backed status enums.
//!
//! Each enum serializes to the lowercase string stored in the matching
//! `TEXT` column, whose `CHECK` constraint lists the same values. Parsing an
//! unknown string yields a [`CoreError::Validation`] so handlers can reject
//! bad filters and patches with 400 before touching the database.
//!
//! None of these enums encode transition rules: any value may overwrite any
//! other.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// The string stored in the database.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $val ),+
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
                    $( $val => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        $label,
                        [$( $val ),+].join(", ")
                    ))),
                }
            }
        }
    };
}

define_text_enum! {
    /// Project lifecycle status.
    ProjectStatus ("project status") {
        Draft = "draft",
        Generating = "generating",
        Reviewing = "reviewing",
        Completed = "completed",
    }
}

define_text_enum! {
    /// Generation progress of an image or video row.
    GenerationStatus ("generation status") {
        Pending = "pending",
        Generating = "generating",
        Completed = "completed",
        Failed = "failed",
    }
}

define_text_enum! {
    /// Human review decision on an image or video row.
    ReviewStatus ("review status") {
        Pending = "pending",
        Approved = "approved",
        Rejected = "rejected",
    }
}

define_text_enum! {
    /// Progress of a reference-video analysis.
    AnalysisStatus ("analysis status") {
        Pending = "pending",
        Analyzing = "analyzing",
        Completed = "completed",
        Failed = "failed",
    }
}

define_text_enum! {
    /// Prompt template grouping.
    PromptCategory ("prompt category") {
        Style = "style",
        Transition = "transition",
        Scene = "scene",
        Character = "character",
    }
}

define_text_enum! {
    /// Entity kinds that audit log entries can point at.
    ResourceType ("resource type") {
        Image = "image",
        Video = "video",
        Project = "project",
    }
}

/// Parse an optional query-string filter, treating an empty string as absent.
pub fn parse_filter<T>(raw: Option<&str>) -> Result<Option<T>, CoreError>
where
    T: FromStr<Err = CoreError>,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}
