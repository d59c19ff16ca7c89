//! Known-entity digest for regeneration prompts.

use slate_db::models::character::Character;
use slate_db::models::location::Location;
use slate_db::models::story_asset::StoryAsset;

/// Render the story's existing named entities as a compact digest for the
/// regeneration prompt. Returns an empty string when there is nothing to
/// preserve, which callers treat as "parse from scratch".
pub fn entity_digest(
    characters: &[Character],
    locations: &[Location],
    assets: &[StoryAsset],
) -> String {
    let mut lines = Vec::new();

    if !characters.is_empty() {
        let names: Vec<String> = characters
            .iter()
            .map(|c| {
                if c.role.is_empty() {
                    c.name.clone()
                } else {
                    format!("{} ({})", c.name, c.role)
                }
            })
            .collect();
        lines.push(format!("Characters: {}", names.join(", ")));
    }

    if !locations.is_empty() {
        let names: Vec<String> = locations
            .iter()
            .map(|l| {
                if l.location_type.is_empty() {
                    l.name.clone()
                } else {
                    format!("{} ({})", l.name, l.location_type)
                }
            })
            .collect();
        lines.push(format!("Locations: {}", names.join(", ")));
    }

    if !assets.is_empty() {
        let names: Vec<String> = assets
            .iter()
            .map(|a| {
                if a.asset_type.is_empty() {
                    a.name.clone()
                } else {
                    format!("{} ({})", a.name, a.asset_type)
                }
            })
            .collect();
        lines.push(format!("Assets: {}", names.join(", ")));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(name: &str, role: &str) -> Character {
        Character {
            id: 1,
            story_id: 1,
            name: name.to_string(),
            description: String::new(),
            role: role.to_string(),
            appearances: 0,
        }
    }

    #[test]
    fn digest_lists_entities_with_kinds() {
        let characters = vec![character("Mara", "protagonist"), character("Jax", "")];
        let digest = entity_digest(&characters, &[], &[]);
        assert_eq!(digest, "Characters: Mara (protagonist), Jax");
    }

    #[test]
    fn empty_story_yields_empty_digest() {
        assert_eq!(entity_digest(&[], &[], &[]), "");
    }
}
