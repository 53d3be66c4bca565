// Terminal assistant strategies
// Remote (Gemini) when a credential is configured, local keyword matcher otherwise.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::AppConfig;
use crate::content::{portfolio, Language};
use crate::gemini::GeminiResponder;

/// Errors from a responder. Never shown to the user verbatim.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Which strategy is answering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Online,
    Demo,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Online => "Online",
            Mode::Demo => "Demo Mode",
        }
    }
}

/// Turns one free-text prompt into response text
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, prompt: &str, lang: Language) -> Result<String, AssistantError>;

    fn mode(&self) -> Mode;
}

/// Pick the strategy once, from configuration
pub fn responder_for(config: &AppConfig) -> Box<dyn Responder> {
    match GeminiResponder::from_config(config) {
        Ok(gemini) => {
            log::info!("Assistant online ({})", config.model);
            Box::new(gemini)
        }
        Err(e) => {
            log::info!("{}, assistant running in demo mode", e);
            Box::new(DemoResponder)
        }
    }
}

/// Keyword categories, tested in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Experience,
    Projects,
    Skills,
    Contact,
    Certificates,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Experience,
        Topic::Projects,
        Topic::Skills,
        Topic::Contact,
        Topic::Certificates,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Topic::Experience => &["experiencia", "experience", "work", "trabajo"],
            Topic::Projects => &["proyecto", "project", "portfolio"],
            Topic::Skills => &["stack", "habilidad", "skill", "tech"],
            Topic::Contact => &["contacto", "contact", "email", "mail"],
            Topic::Certificates => &["cert", "curso", "course", "udemy", "coursera", "platzi", "datacamp"],
        }
    }

    /// First topic whose keywords appear in the input
    pub fn detect(input: &str) -> Option<Topic> {
        let input = input.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|topic| topic.keywords().iter().any(|k| input.contains(k)))
    }
}

/// Result of the local matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalAnswer {
    Answer(Topic, String),
    Unrecognized(&'static str),
}

impl LocalAnswer {
    pub fn text(&self) -> &str {
        match self {
            LocalAnswer::Answer(_, text) => text.as_str(),
            LocalAnswer::Unrecognized(text) => *text,
        }
    }
}

pub fn unrecognized_text(lang: Language) -> &'static str {
    lang.pick(
        "Comando no reconocido. Intenta: 'experiencia', 'proyectos', 'certificados', 'stack'.",
        "Command not recognized. Try: 'experience', 'projects', 'certificates', 'stack'.",
    )
}

pub fn demo_notice(lang: Language) -> &'static str {
    lang.pick(
        "\n\n[SYSTEM]: Modo Demo activo. Para IA real, configura GEMINI_API_KEY en .env.",
        "\n\n[SYSTEM]: Demo Mode active. For real AI, configure GEMINI_API_KEY in .env.",
    )
}

/// Deterministic keyword answer built from the bundled content
pub fn local_match(input: &str, lang: Language) -> LocalAnswer {
    let content = portfolio(lang);

    let Some(topic) = Topic::detect(input) else {
        return LocalAnswer::Unrecognized(unrecognized_text(lang));
    };

    let text = match topic {
        Topic::Experience => content
            .experience
            .iter()
            .map(|e| format!("{}: {} @ {}", e.period, e.role, e.company))
            .collect::<Vec<_>>()
            .join("\n"),
        Topic::Projects => content
            .projects
            .iter()
            .map(|p| format!("- {} [{}]", p.title, p.tech_stack.join(", ")))
            .collect::<Vec<_>>()
            .join("\n"),
        Topic::Skills => {
            let names: Vec<&str> = content.skills.iter().map(|s| s.name).collect();
            format!("Stack: {}.", names.join(", "))
        }
        Topic::Contact => format!(
            "{}: {}",
            lang.pick("Escríbeme a", "Email me at"),
            content.personal.email
        ),
        Topic::Certificates => content
            .certificates
            .iter()
            .map(|c| format!("- {} ({})", c.title, c.issuer))
            .collect::<Vec<_>>()
            .join("\n"),
    };

    LocalAnswer::Answer(topic, text)
}

/// Offline strategy: keyword matcher plus a hint on how to go online
pub struct DemoResponder;

#[async_trait]
impl Responder for DemoResponder {
    async fn respond(&self, prompt: &str, lang: Language) -> Result<String, AssistantError> {
        Ok(match local_match(prompt, lang) {
            LocalAnswer::Answer(_, text) => text,
            LocalAnswer::Unrecognized(text) => format!("{}{}", text, demo_notice(lang)),
        })
    }

    fn mode(&self) -> Mode {
        Mode::Demo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_lines() {
        let answer = local_match("Háblame de tu TRABAJO", Language::Es);
        assert_eq!(
            answer.text(),
            "05/2024 — 11/2024: Analista de Soporte TI / Backend Support @ Aruss Technologies\n\
             12/2025 — Presente: Chief Technology Officer (CTO) @ VLC Marketing"
        );

        let expected: Vec<String> = portfolio(Language::En)
            .experience
            .iter()
            .map(|e| format!("{}: {} @ {}", e.period, e.role, e.company))
            .collect();
        let answer = local_match("where did you work?", Language::En);
        assert_eq!(answer, LocalAnswer::Answer(Topic::Experience, expected.join("\n")));
    }

    #[test]
    fn test_topic_precedence() {
        assert_eq!(Topic::detect("trabajo en un project"), Some(Topic::Experience));
        assert_eq!(Topic::detect("project stack"), Some(Topic::Projects));
        assert_eq!(Topic::detect("tech contact"), Some(Topic::Skills));
        assert_eq!(Topic::detect("email about the datacamp cert"), Some(Topic::Contact));
        assert_eq!(Topic::detect("Udemy"), Some(Topic::Certificates));
        assert_eq!(Topic::detect("what's the weather"), None);
    }

    #[test]
    fn test_other_topics() {
        let skills = local_match("skills?", Language::En);
        assert!(skills.text().starts_with("Stack: Java, Python, Haskell"));
        assert!(skills.text().ends_with("REST APIs."));

        assert_eq!(
            local_match("contacto", Language::Es).text(),
            "Escríbeme a: cesarbecerravalencia@gmail.com"
        );

        let certs = local_match("certificates", Language::En);
        assert_eq!(certs.text().lines().count(), 4);
        assert!(certs.text().starts_with("- Introduction to SQL (DataCamp)"));

        let projects = local_match("projects", Language::En);
        assert_eq!(projects.text().lines().count(), 3);
        assert!(projects.text().contains("- Financial Dashboard [Next.js, D3.js, Firebase]"));
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(
            local_match("what's the weather", Language::En),
            LocalAnswer::Unrecognized(unrecognized_text(Language::En))
        );
    }

    #[tokio::test]
    async fn test_demo_responder_appends_notice() {
        let text = DemoResponder.respond("what's the weather", Language::En).await.unwrap();
        assert_eq!(
            text,
            format!("{}{}", unrecognized_text(Language::En), demo_notice(Language::En))
        );

        let text = DemoResponder.respond("experiencia", Language::Es).await.unwrap();
        assert!(!text.contains("[SYSTEM]"));
        assert_eq!(DemoResponder.mode(), Mode::Demo);
    }

    #[test]
    fn test_responder_selection() {
        let config = AppConfig::default();
        assert_eq!(responder_for(&config).mode(), Mode::Demo);

        let config = AppConfig {
            api_key: Some("key".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(responder_for(&config).mode(), Mode::Online);
    }
}
