use crate::llm::client::ChatMessage;

const SUMMARY_SYSTEM_PROMPT: &str = "You are an assistant that writes concise, factual meeting summaries.\n\
Return ONLY strict JSON with exactly these keys:\n\
- \"points\": array of strings (key takeaways)\n\
- \"decisions\": array of strings\n\
- \"action_items\": array of objects with string fields \"owner\", \"task\", \"due\"\n\
\n\
Rules:\n\
- Use only information present in the transcript.\n\
- Use empty arrays when there is nothing to report.\n\
- Use an empty string for an unknown owner or due date.\n\
- No prose, no markdown, no code fences.";

/// Build the two-message summary prompt.
pub fn build_summary_messages(instruction: &str, transcript: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SUMMARY_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Instruction:\n{instruction}\n\nTranscript:\n{transcript}"
        )),
    ]
}
