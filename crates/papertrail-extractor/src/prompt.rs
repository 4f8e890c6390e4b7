//! Prompt engineering for summarization and structured extraction

use papertrail_domain::FieldSpec;

/// Build the prompt for one summarization pass.
///
/// The wording asks for specificity so that identifying details (dates,
/// names, addresses) survive repeated reduction passes.
pub fn summarization_prompt(text: &str) -> String {
    format!(
        "Summarize the following text ensuring that details are still specific:\n```\n{}\n```",
        text
    )
}

/// Builds the structured-extraction prompt
pub struct PromptBuilder<'a> {
    text: &'a str,
    filename: &'a str,
    fields: &'a FieldSpec,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for one document.
    pub fn new(text: &'a str, filename: &'a str, fields: &'a FieldSpec) -> Self {
        Self {
            text,
            filename,
            fields,
        }
    }

    /// Build the complete extraction prompt.
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Field list
        prompt.push_str(
            "Return in the json format with the following fields extracted from the input text:\n",
        );
        for name in self.fields.names() {
            prompt.push_str(&format!("- {}\n", name));
        }
        prompt.push_str("\n\n");

        // 2. Confidence, strictness, and normalization rules
        prompt.push_str(EXTRACTION_RULES);
        prompt.push_str("\n\n\n");

        // 3. The text to analyze
        prompt.push_str("Here is the input text: \n```\n");
        prompt.push_str(self.text);
        prompt.push_str("\n```\n\n\n");

        // 4. Filename as auxiliary context (it often encodes metadata)
        prompt.push_str("Here is also the input text's filename: \n```\n");
        prompt.push_str(self.filename);
        prompt.push_str("\n```\n");

        prompt
    }
}

const EXTRACTION_RULES: &str = "\
Additionally, add a confidence score between 0 and 1 to the same payload that \
indicates how certain you are about the correctness of the details.\n\n\n\
Only answer with a json and nothing more.\n\n\n\
If you couldn't find certain details, mark them as `null`.\n\n\n\
Normalise the date to YYYY-mm-dd.\n\n\n\
Normalise the location to \"number street, city, state, postcode\"";
