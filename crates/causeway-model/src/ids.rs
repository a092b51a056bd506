// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    InvalidUuid(&'static str),
    InvalidFormat(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::InvalidUuid(name) => write!(f, "{name} must be a valid UUID"),
            Self::InvalidFormat(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ParseError {}

macro_rules! uuid_id {
    ($name:ident, $label:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn parse(input: &str) -> Result<Self, ParseError> {
                if input.is_empty() {
                    return Err(ParseError::Empty($label));
                }
                Uuid::parse_str(input)
                    .map(Self)
                    .map_err(|_| ParseError::InvalidUuid($label))
            }

            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                // Hyphenated lowercase: the canonical TEXT form stored in the
                // content database. Lexicographic order of this form matches
                // the byte order of the underlying UUID, which keeps the SQL
                // tie-break and the in-memory Ord in agreement.
                write!(f, "{}", self.0.hyphenated())
            }
        }
    };
}

uuid_id!(PostId, "post_id");
uuid_id!(OrgId, "organization_id");
uuid_id!(MediaId, "media_id");
uuid_id!(OpportunityId, "opportunity_id");
