//! Prompt construction and response parsing for the AI endpoints.

use crate::models::CaptionRequest;

pub const CAPTION_SYSTEM_PROMPT: &str = "You are a creative Pinterest caption writer. \
Create engaging, scroll-stopping captions that drive engagement.";

pub const HASHTAG_SYSTEM_PROMPT: &str =
    "You are a Pinterest hashtag expert. Suggest relevant, trending hashtags.";

/// Shown in place of a generated image when no provider key is configured.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/800x600?text=AI+Generated+Image";

/// User prompt for a caption request.
pub fn caption_prompt(request: &CaptionRequest) -> String {
    let mut prompt = format!(
        "Create a compelling Pinterest caption about: {}\nTone: {}\n",
        request.topic.trim(),
        request.tone
    );

    let keywords: Vec<&str> = request
        .keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    if !keywords.is_empty() {
        prompt.push_str(&format!(
            "Include these keywords naturally: {}\n",
            keywords.join(", ")
        ));
    }

    prompt.push_str(
        "\nThe caption should be engaging, include relevant hashtags, and be optimized \
         for Pinterest. Keep it under 500 characters.",
    );
    prompt
}

pub fn hashtag_prompt(topic: &str) -> String {
    format!(
        "Suggest 10-15 relevant Pinterest hashtags for a post about: {}\n\
         Return only the hashtags, one per line, with the # symbol.",
        topic.trim()
    )
}

/// Keep the lines of a model reply that are hashtags.
pub fn parse_hashtags(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_prompt_with_keywords() {
        let request = CaptionRequest {
            topic: "  autumn decor ".to_string(),
            tone: "casual".to_string(),
            keywords: vec!["cozy".to_string(), " ".to_string(), "pumpkin".to_string()],
        };
        let prompt = caption_prompt(&request);

        assert!(prompt.starts_with("Create a compelling Pinterest caption about: autumn decor\n"));
        assert!(prompt.contains("Tone: casual\n"));
        assert!(prompt.contains("Include these keywords naturally: cozy, pumpkin\n"));
        assert!(prompt.ends_with("Keep it under 500 characters."));
    }

    #[test]
    fn test_caption_prompt_without_keywords() {
        let request = CaptionRequest {
            topic: "desk setup".to_string(),
            tone: "professional".to_string(),
            keywords: Vec::new(),
        };
        assert!(!caption_prompt(&request).contains("keywords"));
    }

    #[test]
    fn test_parse_hashtags() {
        let reply = "Here you go:\n#HomeDecor\n  #FallVibes  \n\n- #NotThisOne\n#Cozy";
        assert_eq!(
            parse_hashtags(reply),
            vec!["#HomeDecor", "#FallVibes", "#Cozy"]
        );
        assert!(parse_hashtags("no tags here").is_empty());
    }
}
