//! Prompt construction for the script-analysis completion request.

/// System prompt pinning the completion to bare JSON output.
pub const SYSTEM_PROMPT: &str = "You are a professional script analyzer for 3D production. \
Always return valid JSON only, no markdown, no code blocks. \
Return ONLY the JSON object, nothing else.";

/// Build the user prompt embedding the story text and the exact JSON shape
/// the parser decodes.
pub fn build_user_prompt(story_text: &str) -> String {
    format!(
        r#"You are a professional script analyzer for 3D production and animation.

IMPORTANT: Understand that SEQUENCES and SHOTS are two different things:
- SEQUENCE: A group of related shots that form a complete scene or narrative unit (like a scene in a movie)
- SHOT: An individual camera shot within a sequence (a single camera take)

Analyze this story/script and extract structured data in JSON format:

{story_text}

Return a JSON object with this exact structure:
{{
    "characters": [
        {{
            "name": "character name",
            "description": "physical and personality description",
            "role": "protagonist/antagonist/supporting",
            "appearances": number of times character appears
        }}
    ],
    "locations": [
        {{
            "name": "location name",
            "description": "detailed location description",
            "type": "indoor/outdoor/fantasy/sci-fi/realistic",
            "scenes": number of scenes in this location
        }}
    ],
    "assets": [
        {{
            "name": "asset name",
            "type": "model/prop/environment/effect",
            "description": "what this asset is",
            "complexity": "low/medium/high"
        }}
    ],
    "sequences": [
        {{
            "sequence_number": 1,
            "title": "sequence title or name",
            "description": "what happens in this sequence (the overall scene/narrative unit)",
            "location": "location name",
            "characters": ["character names in this sequence"],
            "estimated_time": "time estimate for entire sequence",
            "total_shots": number of shots in this sequence
        }}
    ],
    "shots": [
        {{
            "shot_number": 1,
            "sequence_number": 1,
            "description": "what happens in this specific shot (individual camera take)",
            "characters": ["character names in this shot"],
            "location": "location name",
            "camera_angle": "close-up/wide/medium/etc",
            "complexity": "low/medium/high",
            "estimated_time": "time estimate for this shot like '1-2 days'",
            "special_requirements": ["any special effects or requirements"]
        }}
    ],
    "summary": "brief summary of the story",
    "total_sequences": number,
    "total_shots": number,
    "estimated_total_time": "overall time estimate"
}}

CRITICAL:
- Each SHOT must belong to a SEQUENCE (use sequence_number to link them)
- SEQUENCES are higher level - they group related shots together
- SHOTS are individual camera takes within sequences
- A sequence can have multiple shots
- Extract both sequences AND shots separately

Be thorough and extract all details. Return ONLY valid JSON, no additional text."#
    )
}

/// Build the regeneration prompt: the standard analysis request prefixed
/// with a digest of entities that already exist for the story.
///
/// Steering the completion towards the exact known names keeps the
/// downstream reconciliation on its strong match paths.
pub fn build_regeneration_prompt(story_text: &str, known_entities: &str) -> String {
    let base = build_user_prompt(story_text);
    format!(
        "This story has been analyzed before. The following entities already exist \
and their names MUST be reused verbatim wherever the story refers to them. \
Do not rename, merge or re-spell them:\n\n{known_entities}\n\n{base}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_embeds_story_text() {
        let prompt = build_user_prompt("Mara enters the lab.");
        assert!(prompt.contains("Mara enters the lab."));
        assert!(prompt.contains("\"sequence_number\": 1"));
        assert!(prompt.contains("Return ONLY valid JSON"));
    }

    #[test]
    fn regeneration_prompt_leads_with_known_entities() {
        let prompt =
            build_regeneration_prompt("Mara enters the lab.", "Characters: Mara (protagonist)");
        assert!(prompt.starts_with("This story has been analyzed before."));
        assert!(prompt.contains("Characters: Mara (protagonist)"));
        assert!(prompt.contains("Mara enters the lab."));
    }
}
