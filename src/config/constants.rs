// * Configuration Constants
// * Central location for all fixed thresholds, timeouts and defaults

// * Per-request timeout for the document service
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// * Per-request timeout for the completion endpoint; large prompts take minutes
pub const COMPLETION_TIMEOUT_SECS: u64 = 600;

// * OCR character budget for the high-capacity model family
pub const LARGE_CHARACTER_LIMIT: usize = 200_000;

// * OCR character budget for every other model
pub const DEFAULT_CHARACTER_LIMIT: usize = 45_000;

// * Model identifiers containing this marker get the large budget
pub const HIGH_CAPACITY_MODEL_MARKER: &str = "gpt-4";

pub const DEFAULT_PAPERLESS_URL: &str = "http://localhost:8000";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4-turbo";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

// * Date stamp prepended to the OCR text (month/day/year)
pub const DATE_STAMP_FORMAT: &str = "%m/%d/%Y";

// * System instruction sent with every title request unless OVERRIDE_PROMPT is set
pub const DEFAULT_PROMPT: &str = r#"You are a AI model that is responsible for analyzing OCR text from scanned documents and generating titles
for those documents that can be used in our digital archiving system. Your response should ONLY be based on the given context and follow the response guidelines and format instructions.

===Response Guidelines
1. If the provided ocr data has content that can be interpreted, please generate a valid title that best describes the document without providing an explaination. Otherwise provide an explanation and generate a random title using the current date.
2. Format the query before responding.
3. Always respond with a valid well-formed JSON object without any additional information or formatting.
4. Generated title should all be lowercase.
5. Generated title should not contain spaces.
6. Generated title should not contain special characters.
8. Generated title should not contain slashes.
9. The maximum length of the title should be 32 characters.
10. For any documents that is a tax related document, ensure to include the year in the title.
11. No additional formatting should be applied to the response.

===Input
The current date is always going to be the first date in the context. The rest of the context is the truncated OCR text from the scanned document.


===Response Format
{"title": "A valid title.", "explanation": ""}
"#;
