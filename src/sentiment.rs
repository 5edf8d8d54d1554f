//! Lexicon-based sentiment scoring for generated text.
//!
//! Each lexicon entry carries a polarity (emotional valence, `[-1, 1]`)
//! and a subjectivity (opinion vs. fact, `[0, 1]`) weight. A text's score
//! is the mean over its matched tokens; a negator immediately before a
//! matched word flips and dampens its polarity, and an intensifier scales
//! it. Text with no matched tokens (including empty text) scores 0.0 on
//! both axes.
//!
//! Classification thresholds:
//! - polarity `> 0` → Positive, `< 0` → Negative, `== 0` → Neutral
//!   (exact comparison, no epsilon)
//! - subjectivity `< 0.3` → Objective, `> 0.7` → Subjective, otherwise
//!   Balanced (the boundary values 0.3 and 0.7 map to Balanced)
//!
//! `analyze` is a pure function: no side effects, deterministic for
//! identical input.

use crate::models::{SentimentLabel, SentimentScore, ToneLabel};

/// `(word, polarity, subjectivity)` entries, lowercase.
const LEXICON: &[(&str, f32, f32)] = &[
    ("amazing", 0.6, 0.9),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("balanced", 0.1, 0.25),
    ("beautiful", 0.85, 1.0),
    ("beneficial", 0.5, 0.45),
    ("best", 1.0, 0.3),
    ("boring", -0.6, 0.8),
    ("brilliant", 0.9, 0.9),
    ("broken", -0.4, 0.4),
    ("clear", 0.1, 0.3),
    ("challenging", -0.2, 0.5),
    ("compelling", 0.6, 0.7),
    ("complex", -0.1, 0.35),
    ("confusing", -0.5, 0.7),
    ("correct", 0.3, 0.3),
    ("dangerous", -0.6, 0.7),
    ("difficult", -0.5, 0.6),
    ("disappointing", -0.6, 0.7),
    ("dreadful", -0.9, 1.0),
    ("effective", 0.6, 0.55),
    ("efficient", 0.5, 0.5),
    ("elegant", 0.6, 0.75),
    ("enjoy", 0.4, 0.5),
    ("excellent", 1.0, 1.0),
    ("exciting", 0.45, 0.8),
    ("fail", -0.5, 0.4),
    ("failed", -0.5, 0.4),
    ("fantastic", 0.4, 0.9),
    ("fascinating", 0.7, 0.9),
    ("flawed", -0.45, 0.5),
    ("fragile", -0.3, 0.5),
    ("fun", 0.3, 0.2),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("harmful", -0.6, 0.55),
    ("hate", -0.8, 0.9),
    ("helpful", 0.55, 0.5),
    ("horrible", -1.0, 1.0),
    ("impressive", 0.8, 0.9),
    ("inadequate", -0.5, 0.5),
    ("incorrect", -0.3, 0.3),
    ("innovative", 0.5, 0.6),
    ("interesting", 0.5, 0.5),
    ("love", 0.5, 0.6),
    ("mediocre", -0.3, 0.6),
    ("notable", 0.2, 0.3),
    ("perfect", 1.0, 1.0),
    ("pleasant", 0.7, 0.8),
    ("poor", -0.4, 0.6),
    ("popular", 0.4, 0.6),
    ("powerful", 0.5, 0.7),
    ("practical", 0.3, 0.4),
    ("precise", 0.3, 0.4),
    ("problematic", -0.5, 0.6),
    ("promising", 0.5, 0.6),
    ("reliable", 0.5, 0.45),
    ("remarkable", 0.75, 0.75),
    ("risky", -0.4, 0.6),
    ("robust", 0.4, 0.4),
    ("sad", -0.5, 1.0),
    ("significant", 0.35, 0.45),
    ("simple", 0.2, 0.36),
    ("slow", -0.3, 0.4),
    ("stable", 0.3, 0.35),
    ("striking", 0.6, 0.7),
    ("strong", 0.4, 0.45),
    ("successful", 0.75, 0.95),
    ("terrible", -1.0, 1.0),
    ("tricky", -0.3, 0.6),
    ("trivial", -0.1, 0.4),
    ("trustworthy", 0.5, 0.5),
    ("ugly", -0.7, 1.0),
    ("unclear", -0.3, 0.4),
    ("unreliable", -0.5, 0.45),
    ("useful", 0.3, 0.3),
    ("useless", -0.5, 0.4),
    ("valuable", 0.5, 0.5),
    ("weak", -0.4, 0.5),
    ("wonderful", 1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("wrong", -0.5, 0.54),
];

const NEGATORS: &[&str] = &["not", "no", "never", "neither", "nor", "cannot"];

/// `(word, multiplier)` — scales the polarity of the following word.
const INTENSIFIERS: &[(&str, f32)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("quite", 1.1),
    ("somewhat", 0.7),
    ("slightly", 0.6),
];

/// Score `text` for polarity and subjectivity and map to labels.
pub fn analyze(text: &str) -> SentimentScore {
    let mut polarities: Vec<f32> = Vec::new();
    let mut subjectivities: Vec<f32> = Vec::new();

    let mut negated = false;
    let mut intensity = 1.0f32;

    for raw in text.split_whitespace() {
        let token = normalize(raw);
        if token.is_empty() {
            continue;
        }

        if NEGATORS.contains(&token.as_str()) || token.ends_with("n't") {
            negated = true;
            continue;
        }

        if let Some(&(_, factor)) = INTENSIFIERS.iter().find(|(w, _)| *w == token) {
            intensity *= factor;
            continue;
        }

        if let Some(&(_, polarity, subjectivity)) = LEXICON.iter().find(|(w, _, _)| *w == token) {
            let mut p = polarity * intensity;
            if negated {
                // A negated word carries the opposite, weakened valence.
                p *= -0.5;
            }
            polarities.push(p.clamp(-1.0, 1.0));
            subjectivities.push(subjectivity.clamp(0.0, 1.0));
        }

        // Modifiers only reach the immediately following word.
        negated = false;
        intensity = 1.0;
    }

    let polarity = mean(&polarities);
    let subjectivity = mean(&subjectivities);

    let sentiment = if polarity > 0.0 {
        SentimentLabel::Positive
    } else if polarity < 0.0 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    let tone = if subjectivity < 0.3 {
        ToneLabel::Objective
    } else if subjectivity > 0.7 {
        ToneLabel::Subjective
    } else {
        ToneLabel::Balanced
    };

    SentimentScore {
        polarity,
        subjectivity,
        sentiment,
        tone,
    }
}

fn normalize(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
        .to_lowercase()
}

fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f32>() / values.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_text() {
        let score = analyze("I love this!");
        assert!(score.polarity > 0.0);
        assert_eq!(score.sentiment, SentimentLabel::Positive);
    }

    #[test]
    fn negative_text() {
        let score = analyze("I hate this.");
        assert!(score.polarity < 0.0);
        assert_eq!(score.sentiment, SentimentLabel::Negative);
    }

    #[test]
    fn empty_text_is_neutral() {
        let score = analyze("");
        assert_eq!(score.polarity, 0.0);
        assert_eq!(score.subjectivity, 0.0);
        assert_eq!(score.sentiment, SentimentLabel::Neutral);
        assert_eq!(score.tone, ToneLabel::Objective);
    }

    #[test]
    fn unmatched_text_is_neutral() {
        let score = analyze("The database stores rows in pages.");
        assert_eq!(score.polarity, 0.0);
        assert_eq!(score.sentiment, SentimentLabel::Neutral);
    }

    #[test]
    fn negation_flips_polarity() {
        let positive = analyze("This is good.");
        let negated = analyze("This is not good.");
        assert!(positive.polarity > 0.0);
        assert!(negated.polarity < 0.0);
    }

    #[test]
    fn intensifier_strengthens_polarity() {
        let plain = analyze("This is good.");
        let boosted = analyze("This is very good.");
        assert!(boosted.polarity > plain.polarity);
    }

    #[test]
    fn subjectivity_boundary_values_are_balanced() {
        // "useful" carries subjectivity exactly 0.3.
        let lower = analyze("useful");
        assert_eq!(lower.subjectivity, 0.3);
        assert_eq!(lower.tone, ToneLabel::Balanced);

        // Mix of 1.0 and 0.4 averages to exactly 0.7.
        let upper = analyze("wonderful robust");
        assert!((upper.subjectivity - 0.7).abs() < 1e-6);
        assert_eq!(upper.tone, ToneLabel::Balanced);
    }

    #[test]
    fn objective_and_subjective_tones() {
        assert_eq!(analyze("a balanced account").tone, ToneLabel::Objective);
        assert_eq!(analyze("a happy ending").tone, ToneLabel::Subjective);
    }

    #[test]
    fn deterministic() {
        let a = analyze("A remarkable and effective approach.");
        let b = analyze("A remarkable and effective approach.");
        assert_eq!(a.polarity, b.polarity);
        assert_eq!(a.subjectivity, b.subjectivity);
    }
}
