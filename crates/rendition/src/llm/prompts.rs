//! Prompt templates and response parsing for translation providers.

use serde::Deserialize;

use crate::error::{RenditionError, Result};

use super::provider::{GenerationRequest, LlmConfig};

/// Build the user prompt for a generation request.
pub fn translation_prompt(request: &GenerationRequest, config: &LlmConfig) -> String {
    let mut prompt = String::new();

    // Earlier accepted pairs, in the same format the text store writes.
    for example in &request.examples {
        prompt.push_str(&format!(
            "Original: {}\nTranslation: {}\n\n",
            example.original, example.translation
        ));
    }

    if !request.prior_translations.is_empty() {
        prompt.push_str("Translations accepted earlier in this session:\n");
        for prior in &request.prior_translations {
            prompt.push_str(&format!("  - {}\n", prior));
        }
        prompt.push('\n');
    }

    if let Some(instructions) = &request.instructions {
        prompt.push_str("## Instructions\n");
        prompt.push_str(instructions.trim());
        prompt.push_str("\n\n");
    }

    let count = config.candidate_count;
    let example_lines = EXAMPLE_TRANSLATIONS
        .iter()
        .cycle()
        .take(count)
        .map(|t| format!("      \"{}\"", t))
        .collect::<Vec<_>>()
        .join(",\n");

    prompt.push_str(&format!(
        r#"Considering the examples above, translate the following sentence into {language} in {count} different variations, showing subtle nuances where possible. Respond with a JSON blob inside a code block like the example below:
```json
{{
  "original_phrase": "The big red fox ate a steak at McDonalds.",
  "translations": [
{example_lines}
  ]
}}
```

Original sentence: {source}
"#,
        language = config.target_language,
        source = request.source,
    ));

    prompt
}

const EXAMPLE_TRANSLATIONS: [&str; 4] = [
    "A grande raposa vermelha comeu um bife no McDonald's.",
    "A raposa grande e ruiva comeu um bife no McDonald's.",
    "A raposa vermelha e grande devorou um filé no McDonald's.",
    "Uma raposa grande, de pelo avermelhado, comeu um bife no McDonald's.",
];

/// System prompt shared by all providers.
pub fn system_prompt(config: &LlmConfig) -> String {
    format!(
        r#"You are a professional translator working into {}.

Guidelines:
- Preserve the meaning of the original sentence exactly
- Vary word choice, register and word order between alternatives
- Follow the style of the example translations you are given
- Always respond with valid JSON when requested"#,
        config.target_language
    )
}

#[derive(Debug, Deserialize)]
struct CandidateResponse {
    translations: Vec<String>,
}

/// Extract the candidate list from a model response.
///
/// Accepts bare JSON or JSON inside a fenced code block (with or without a
/// language tag). The `translations` array must hold exactly `expected`
/// non-blank strings.
pub fn parse_candidates(response: &str, expected: usize) -> Result<Vec<String>> {
    let json_str = extract_json(response);

    let parsed: CandidateResponse = serde_json::from_str(json_str).map_err(|e| {
        RenditionError::Generation(format!("Failed to parse LLM JSON response: {}", e))
    })?;

    let candidates: Vec<String> = parsed
        .translations
        .into_iter()
        .map(|t| t.trim().to_string())
        .collect();

    if candidates.len() != expected || candidates.iter().any(|c| c.is_empty()) {
        return Err(RenditionError::Generation(
            "LLM did not return the expected format".to_string(),
        ));
    }

    Ok(candidates)
}

fn extract_json(response: &str) -> &str {
    let block = if response.contains("```") {
        response.split("```").nth(1).unwrap_or(response)
    } else {
        response
    };

    // Skip a language tag such as `json` before the object starts.
    match (block.find('{'), block.rfind('}')) {
        (Some(start), Some(end)) if start < end => &block[start..=end],
        _ => block.trim(),
    }
}
