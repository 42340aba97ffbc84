use crate::types::{PromptStyle, SummaryPrompt};

/// Built-in minutes instructions
pub const DEFAULT_INSTRUCTIONS: &str = "너는 전문적인 회의록 요약가야.
제공된 대화 내용을 바탕으로 다음 형식에 맞춰 한국어로 작성해줘:
1. 주제별 핵심 요약
2. 주요 결정 사항 및 할 일(Action Items)
3. 전체적인 결론
4. 모든 대화 내용";

const LLAMA3_BEGIN: &str = "<|begin_of_text|>";
const LLAMA3_EOT: &str = "<|eot_id|>";

/// Builds the prompt handed to the summarization backend
///
/// Output is deterministic for a given transcript; the transcript is
/// embedded verbatim.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    instructions: String,
    style: PromptStyle,
}

impl PromptBuilder {
    pub fn new(style: PromptStyle) -> Self {
        Self {
            instructions: DEFAULT_INSTRUCTIONS.to_owned(),
            style,
        }
    }

    /// Replace the built-in instruction text
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn style(&self) -> PromptStyle {
        self.style
    }

    pub fn build(&self, transcript: &str) -> SummaryPrompt {
        let text = match self.style {
            PromptStyle::Plain => format!("{}\n내용: {transcript}", self.instructions),
            PromptStyle::Llama3Chat => {
                let mut text = String::with_capacity(self.instructions.len() + transcript.len() + 160);
                text.push_str(LLAMA3_BEGIN);
                push_llama3_turn(&mut text, "system", &self.instructions);
                push_llama3_turn(&mut text, "user", transcript);
                push_llama3_header(&mut text, "assistant");
                text
            }
        };

        SummaryPrompt::new(text)
    }
}

fn push_llama3_header(out: &mut String, role: &str) {
    out.push_str("<|start_header_id|>");
    out.push_str(role);
    out.push_str("<|end_header_id|>\n\n");
}

fn push_llama3_turn(out: &mut String, role: &str, content: &str) {
    push_llama3_header(out, role);
    out.push_str(content);
    out.push_str(LLAMA3_EOT);
}
