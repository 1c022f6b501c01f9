pub const JUDGMENT_SYSTEM_PROMPT: &str =
    "You are an assistant specialised in detecting misconduct in English language tests.";

pub const REPORT_SYSTEM_PROMPT: &str =
    "You are an English test misconduct detection assistant. Keep your analysis concise.";

pub const JUDGMENT_INSTRUCTIONS: &str = "You are reviewing one answer from an unproctored English test.
Assess how likely it is that the test-taker cheated, using the answer and the behavior recorded while they worked.";

pub const JUDGMENT_EVALUATION_CRITERIA: &str = "## EVALUATION CRITERIA

### 1. Machine translation
The answer is likely machine translated when it shows:
- phrasing typical of translation tools, such as stiff literal constructions
- unnatural word order characteristic of automatic translation
- grammatically correct sentences a native speaker would not produce
- fluency well beyond what the question's difficulty suggests

### 2. Suspicious behavior
- switching windows right after copying (possible use of a translation site)
- long mouse inactivity together with a high quality answer (possible substitute)
- unusually fast typing (possible pasting)
- frequent paste operations

### 3. Consistency
- mismatch between the question's difficulty and the quality of the answer";

pub const JUDGMENT_OUTPUT_FORMAT: &str = "## OUTPUT FORMAT

Return a single JSON object, no prose and no markdown, with these fields:
- riskScore: number from 0 to 100
- translationLikelihood: number from 0 to 100
- reasons: array of strings
- suspiciousPatterns: array of pattern names
- answerQuality: number from 0 to 1
- recommendation: string with the suggested action

The object must conform to this JSON schema:";

pub const REPORT_INSTRUCTIONS: &str = "In about 200 words, state the likelihood of misconduct (low, medium or high), the concrete reasons for it, and your recommendation for the teacher.";
