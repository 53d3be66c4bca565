// Remote assistant: Gemini generateContent
// Answers strictly from the bundled portfolio content, as plain terminal text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::assistant::{AssistantError, Mode, Responder};
use crate::config::AppConfig;
use crate::content::{portfolio, Language};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Refusal line the model must use for unrelated topics
pub const OUT_OF_SCOPE: &str = "[ERROR 404]: Topic out of scope. Access denied.";

/// System instruction: persona, full content database and output rules
pub fn system_instruction(lang: Language) -> Result<String, AssistantError> {
    let content = portfolio(lang);
    let database = serde_json::to_string(content)?;

    Ok(format!(
        r#"ROLE:
You are the interactive CLI (Command Line Interface) backend for the portfolio of {name}.
Your objective is to query the provided database and return information strictly as raw terminal output.

CONTEXT DATABASE:
{database}

CRITICAL INSTRUCTIONS (MUST FOLLOW):
1. NO MARKDOWN: Your output must be strictly PLAIN TEXT.
  - FORBIDDEN: **bold**, *italics*, # headers, [links], and `code blocks`.
  - Use simple spacing or uppercase for emphasis if needed, but no formatting characters.

2. STRICT GROUNDING:
  - You rely ONLY on the "CONTEXT DATABASE".
  - Do NOT use external knowledge or general AI knowledge.
  - If the answer is not in the JSON, do not invent it.

3. OFF-TOPIC HANDLER:
  - If the user asks about a topic not present in the data (e.g., recipes, general knowledge, math, politics), REJECT the request immediately.
  - Return a standard error message simulating a permission denial.
  - Format: "{out_of_scope}" followed by a suggestion of valid commands.

4. PERSONA & TONE:
  - Act like a Linux Bash Terminal.
  - Be concise, efficient, and slightly robotic.
  - Start responses with a status indicator like "[OK]", "[INFO]", or ">" where appropriate.
  - Language: {language}.

EXAMPLE BEHAVIOR:
User: "Show me skills"
You: "> Accessing skills module... [OK]
    LANGUAGES: Java, Python, Haskell
    TOOLS: Docker, Git, Bash
    STATUS: Ready to deploy"

User: "Tell me a joke"
You: "[ERROR 403]: Function 'joke' not found in kernel.
    > SUGGESTED COMMANDS: 'view projects', 'check experience', 'contact info'"
"#,
        name = content.personal.name,
        database = database,
        out_of_scope = OUT_OF_SCOPE,
        language = lang.name(),
    ))
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction")]
    system_instruction: GeminiContent,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

impl GeminiContent {
    fn text(text: &str) -> Self {
        Self {
            parts: vec![GeminiPart {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

/// Text of the first candidate; empty when the model produced nothing
fn parse_response(body: &str) -> Result<String, AssistantError> {
    let response: GeminiResponse = serde_json::from_str(body)?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
        .unwrap_or_default();

    Ok(text)
}

pub struct GeminiResponder {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiResponder {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }

    /// Fails with `MissingApiKey` when no credential is configured
    pub fn from_config(config: &AppConfig) -> Result<Self, AssistantError> {
        let api_key = config.api_key.clone().ok_or(AssistantError::MissingApiKey)?;
        Ok(Self::new(api_key, config.model.clone()))
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", GEMINI_API_BASE, self.model)
    }
}

#[async_trait]
impl Responder for GeminiResponder {
    async fn respond(&self, prompt: &str, lang: Language) -> Result<String, AssistantError> {
        log::debug!("Gemini request ({}, {}): {:?}", self.model, lang, prompt);

        let request = GeminiRequest {
            contents: vec![GeminiContent::text(prompt)],
            system_instruction: GeminiContent::text(&system_instruction(lang)?),
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AssistantError::Api { status, body });
        }

        parse_response(&body)
    }

    fn mode(&self) -> Mode {
        Mode::Online
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_instruction_embeds_content() {
        let instruction = system_instruction(Language::Es).unwrap();
        assert!(instruction.contains("portfolio of César Becerra Valencia"));
        assert!(instruction.contains("\"company\":\"Aruss Technologies\""));
        assert!(instruction.contains("Analista de Soporte TI"));
        assert!(instruction.contains(OUT_OF_SCOPE));
        assert!(instruction.contains("Language: Spanish."));

        let instruction = system_instruction(Language::En).unwrap();
        assert!(instruction.contains("Language: English."));
        assert!(instruction.contains("Financial Dashboard"));
    }

    #[test]
    fn test_request_shape() {
        let request = GeminiRequest {
            contents: vec![GeminiContent::text("hola")],
            system_instruction: GeminiContent::text("rules"),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hola");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "rules");
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"> [OK] "},{"text":"Java"}]}}]}"#;
        assert_eq!(parse_response(body).unwrap(), "> [OK] Java");

        // Indentation is part of the terminal output
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"  - Java\n  - Rust\n"}]}}]}"#;
        assert_eq!(parse_response(body).unwrap(), "  - Java\n  - Rust\n");

        assert_eq!(parse_response(r#"{"candidates":[]}"#).unwrap(), "");
        assert_eq!(parse_response(r#"{"promptFeedback":{}}"#).unwrap(), "");
        assert!(matches!(parse_response("not json"), Err(AssistantError::Decode(_))));
    }

    #[test]
    fn test_from_config() {
        assert!(matches!(
            GeminiResponder::from_config(&AppConfig::default()),
            Err(AssistantError::MissingApiKey)
        ));

        let config = AppConfig {
            api_key: Some("AIzaTestKey".to_string()),
            ..AppConfig::default()
        };
        let gemini = GeminiResponder::from_config(&config).unwrap();
        assert_eq!(
            gemini.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(gemini.mode(), Mode::Online);
    }
}
