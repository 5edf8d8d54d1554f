//! Style-templated prompt composition.
//!
//! Each [`WritingStyle`] maps to a fixed template with `{context}`,
//! `{topic}`, and `{words}` placeholders; composition is literal string
//! substitution (inputs are natural-language text, nothing to escape).
//! An empty context still renders the same template — the context line
//! just tells the model to rely on its general knowledge.

use crate::models::WritingStyle;

const ACADEMIC_TEMPLATE: &str = "\
You are a scholarly writer with expertise in academic writing.
Using the following context: {context}
Write a well-researched article about: {topic}
Include relevant technical details and cite theoretical frameworks where applicable.
The response should be approximately {words} words.
Focus on methodology, findings, and academic implications.";

const TECHNICAL_TEMPLATE: &str = "\
You are a technical expert writing for professionals.
Using the following context: {context}
Create a technical article about: {topic}
Include relevant technical concepts, methodologies, and practical implementations.
The response should be approximately {words} words.
Focus on technical accuracy and actionable insights.";

const CONVERSATIONAL_TEMPLATE: &str = "\
You are a skilled writer creating content for a general audience.
Using the following context: {context}
Write an engaging and accessible article about: {topic}
Explain complex concepts in simple terms and use relatable examples.
The response should be approximately {words} words.
Focus on clarity and practical applications.";

const JOURNALISTIC_TEMPLATE: &str = "\
You are a professional journalist.
Using the following context: {context}
Write a well-balanced news article about: {topic}
Present facts objectively and include relevant quotes or references.
The response should be approximately {words} words.
Focus on clarity, accuracy, and newsworthiness.";

/// Rendered in place of the context when no passages were retrieved.
const EMPTY_CONTEXT: &str = "(no reference material available; rely on your general knowledge)";

fn template_for(style: WritingStyle) -> &'static str {
    match style {
        WritingStyle::Academic => ACADEMIC_TEMPLATE,
        WritingStyle::Technical => TECHNICAL_TEMPLATE,
        WritingStyle::Conversational => CONVERSATIONAL_TEMPLATE,
        WritingStyle::Journalistic => JOURNALISTIC_TEMPLATE,
    }
}

/// Merge retrieved context, topic, and target length into one prompt.
pub fn compose(context: &str, topic: &str, target_word_count: u32, style: WritingStyle) -> String {
    let context = if context.trim().is_empty() {
        EMPTY_CONTEXT
    } else {
        context
    };

    template_for(style)
        .replace("{context}", context)
        .replace("{topic}", topic)
        .replace("{words}", &target_word_count.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_all_placeholders() {
        let prompt = compose("", "Cats", 500, WritingStyle::Technical);
        assert!(prompt.contains("Cats"));
        assert!(prompt.contains("500"));
        assert!(!prompt.contains("{context}"));
        assert!(!prompt.contains("{topic}"));
        assert!(!prompt.contains("{words}"));
    }

    #[test]
    fn empty_context_falls_back_to_general_knowledge() {
        let prompt = compose("   ", "Rust", 100, WritingStyle::Academic);
        assert!(prompt.contains("general knowledge"));
    }

    #[test]
    fn context_is_inserted_verbatim() {
        let prompt = compose("The moon is made of rock.", "The moon", 250, WritingStyle::Journalistic);
        assert!(prompt.contains("The moon is made of rock."));
        assert!(!prompt.contains("general knowledge"));
    }

    #[test]
    fn each_style_has_a_distinct_template() {
        let styles = [
            WritingStyle::Academic,
            WritingStyle::Technical,
            WritingStyle::Conversational,
            WritingStyle::Journalistic,
        ];
        let prompts: Vec<String> = styles
            .iter()
            .map(|s| compose("ctx", "topic", 300, *s))
            .collect();
        for i in 0..prompts.len() {
            for j in (i + 1)..prompts.len() {
                assert_ne!(prompts[i], prompts[j]);
            }
        }
    }
}
