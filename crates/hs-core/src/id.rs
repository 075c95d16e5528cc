use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Wrap an existing identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh random identifier.
            pub fn new_random() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// The identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of a character document. Assigned once, never reassigned.
    CharacterId
);
string_id!(
    /// Identifier of a skill, unique within its owning list only.
    SkillId
);
string_id!(
    /// Identifier of an inventory item, unique within the inventory.
    ItemId
);
string_id!(
    /// Identifier of a summon, unique within the character's summon list.
    SummonId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_distinct() {
        assert_ne!(SkillId::new_random(), SkillId::new_random());
    }

    #[test]
    fn display_is_verbatim() {
        assert_eq!(CharacterId::from("char_default").to_string(), "char_default");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&SummonId::new("s1")).unwrap();
        assert_eq!(json, "\"s1\"");
    }
}
