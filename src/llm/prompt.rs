//! Prompt builder for the tutor.
//!
//! [`PromptBuilder`] is a family of pure functions that turn session state
//! into model input:
//! * **Reply** (`reply_messages`) — the full conversation history, verbatim.
//! * **Analysis** (`analysis`) — transcript + strict JSON output template.
//! * **Repair** (`repair`) — broken model output + parse error.
//! * **Quiz** (`quiz`) — `(system_msg, user_msg)` with few-shot `Q:`/`A:` pairs.

use crate::feedback::FeedbackRecord;
use crate::llm::client::ChatMessage;

// ---------------------------------------------------------------------------
// Instructions
// ---------------------------------------------------------------------------

const ANALYSIS_INSTRUCTION: &str = "\
Analyze the following conversation and provide feedback for improvement in the **You** section only \
(i.e., the person learning English). Output a single valid **JSON object** with the following exact keys:

1. \"grammar_mistakes\": A dictionary where each key is a sentence spoken by \"You\" that contains a \
grammar issue, and the value is the corrected version. Focus on tense, articles, prepositions, and \
subject-verb agreement.

2. \"better_vocabulary\": A dictionary where each key is a simple, awkward, or repetitive word/phrase \
used by \"You\", and the value is a more fluent, natural, or advanced alternative.

3. \"better_phrases\": A dictionary where each key is an unnatural or informal sentence/phrase used by \
\"You\", and the value is a more appropriate, fluent, or professional version. This includes:
- Awkward sentence structures (even if grammatically correct)
- Redundant expressions
- Improvements for formality (especially suitable for academic, interview, or visa contexts)

Instructions:
- DO NOT duplicate corrections across sections.
- If no suggestions for a section, return an empty object: {}
- Limit each correction list (1-3) to a maximum of 7 relevant items.
- Ensure the output is a **valid JSON object** with no markdown, extra text, or formatting.
";

const REPAIR_INSTRUCTION: &str = "\
Please fix the JSON content above so it can be loaded and dumped.
Ensure the output is a **valid JSON object** with no markdown, extra text, or formatting.";

const QUIZ_SYSTEM_INSTRUCTION: &str =
    "You are an English tutor helping the user correct grammar mistakes.";

const QUIZ_INSTRUCTION: &str = "\
You are a helpful English tutor.
Using the following list of grammar mistakes and corrected phrases, create short one-line quiz questions.
Each question should ask the user to choose or correct a phrase to avoid a past mistake. Then provide the correct answer.
Provide questions in such a way as to check whether I am making use of better phrases.
";

const QUIZ_EXAMPLES: &str = "
Examples:
Q: Which is correct? \"I taked\" or \"I took\"?
A: I took.

Q: Fix this sentence: \"I not even start.\"
A: I haven't even started.
";

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds the prompts sent to the hosted model.
///
/// # Example
/// ```rust
/// use english_tutor::llm::PromptBuilder;
///
/// let prompt = PromptBuilder::analysis("You: I goes home\nSystem: Nice!\n");
/// assert!(prompt.contains("grammar_mistakes"));
/// assert!(prompt.ends_with("You: I goes home\nSystem: Nice!\n"));
/// ```
pub struct PromptBuilder;

impl PromptBuilder {
    /// Reply prompt: the whole history, system message first.
    pub fn reply_messages(history: &[ChatMessage]) -> Vec<ChatMessage> {
        history.to_vec()
    }

    /// Analysis prompt embedding the full transcript after the template.
    pub fn analysis(transcript: &str) -> String {
        let mut prompt = String::with_capacity(ANALYSIS_INSTRUCTION.len() + transcript.len() + 16);
        prompt.push_str(ANALYSIS_INSTRUCTION);
        prompt.push_str("\nConversation:\n");
        prompt.push_str(transcript);
        prompt
    }

    /// "Fix this JSON" prompt for output that failed to parse.
    pub fn repair(invalid: &str, error: &str) -> String {
        format!(
            "JSON: {invalid}\n\nParsing failed with: {error}\n\n{REPAIR_INSTRUCTION}"
        )
    }

    /// Build a **(system_msg, user_msg)** pair asking for `Q:`/`A:` lines.
    ///
    /// Each category lists the learner's original wording (the mapping keys),
    /// one per line.
    pub fn quiz(feedback: &FeedbackRecord) -> (String, String) {
        let mut user_msg = String::with_capacity(1024);
        user_msg.push_str(QUIZ_INSTRUCTION);
        user_msg.push_str(QUIZ_EXAMPLES);

        for (title, entries) in [
            ("Grammar Mistakes", &feedback.grammar_mistakes),
            ("Corrected Phrases", &feedback.better_phrases),
            ("Better vocabulary", &feedback.better_vocabulary),
        ] {
            user_msg.push_str(&format!("\n{title}:\n"));
            for original in entries.keys() {
                user_msg.push_str(original);
                user_msg.push('\n');
            }
        }

        user_msg.push_str("\nGenerate similar quiz questions and answers for each item\n");

        (QUIZ_SYSTEM_INSTRUCTION.to_string(), user_msg)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_echoes_history_in_order() {
        let history = vec![
            ChatMessage::system("persona"),
            ChatMessage::user("You: hello"),
            ChatMessage::assistant("Hi there"),
        ];
        assert_eq!(PromptBuilder::reply_messages(&history), history);
    }

    #[test]
    fn analysis_names_all_three_keys() {
        let prompt = PromptBuilder::analysis("You: I has a dog\n");

        assert!(prompt.contains("\"grammar_mistakes\""));
        assert!(prompt.contains("\"better_vocabulary\""));
        assert!(prompt.contains("\"better_phrases\""));
        assert!(prompt.contains("maximum of 7"));
        assert!(prompt.contains("no markdown"));
    }

    #[test]
    fn analysis_embeds_transcript_last() {
        let transcript = "You: I has a dog\nSystem: What is its name?\n";
        let prompt = PromptBuilder::analysis(transcript);
        assert!(prompt.ends_with(&format!("Conversation:\n{transcript}")));
    }

    #[test]
    fn repair_embeds_invalid_text_and_error() {
        let prompt = PromptBuilder::repair("{\"grammar_mistakes\": {", "EOF while parsing");

        assert!(prompt.contains("{\"grammar_mistakes\": {"));
        assert!(prompt.contains("EOF while parsing"));
        assert!(prompt.contains("valid JSON object"));
    }

    #[test]
    fn quiz_lists_original_wording_per_category() {
        let mut feedback = FeedbackRecord::default();
        feedback
            .grammar_mistakes
            .insert("I taked the bus".into(), "I took the bus".into());
        feedback
            .better_vocabulary
            .insert("very big".into(), "enormous".into());

        let (system, user) = PromptBuilder::quiz(&feedback);

        assert!(system.contains("English tutor"));
        assert!(user.contains("Grammar Mistakes:\nI taked the bus\n"));
        assert!(user.contains("Better vocabulary:\nvery big\n"));
        assert!(user.contains("Corrected Phrases:\n"));
        // only the learner's wording goes in, never the fix
        assert!(!user.contains("enormous"));
    }

    #[test]
    fn quiz_includes_few_shot_examples() {
        let (_, user) = PromptBuilder::quiz(&FeedbackRecord::default());
        assert!(user.contains("Q: Which is correct?"));
        assert!(user.contains("A: I haven't even started."));
    }
}
