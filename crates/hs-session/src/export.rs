//! Roster export.

use std::sync::Arc;

use hs_core::Character;

/// Serialize the roster as pretty-printed JSON. The output uses the same
/// shape as stored records' `data` field.
pub fn export_roster(roster: &[Arc<Character>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(roster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_every_document() {
        let roster = vec![
            Arc::new(hs_core::bootstrap_character()),
            Arc::new(Character::blank("Gon")),
        ];
        let json = export_roster(&roster).unwrap();
        let back: Vec<Character> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[1].name, "Gon");
        assert!(json.contains("\"armorClass\": 15"));
    }
}
