use std::time::{SystemTime, UNIX_EPOCH};

use crate::assistant::{Mode, Responder};
use crate::content::Language;

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    System,
    Assistant,
}

impl Author {
    pub fn label(self) -> &'static str {
        match self {
            Author::User => "YOU",
            Author::System => "SYSTEM",
            Author::Assistant => "AI",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalMessage {
    pub id: u64,
    pub author: Author,
    pub content: String,
    /// Unix time in milliseconds
    pub timestamp: u64,
}

/// Built-in commands, recognised before routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
}

impl Command {
    pub fn parse(input: &str) -> Option<Command> {
        match input.trim().to_lowercase().as_str() {
            "help" => Some(Command::Help),
            "clear" => Some(Command::Clear),
            _ => None,
        }
    }
}

/// A user input that has to go through the responder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub lang: Language,
}

pub fn welcome_text(lang: Language) -> &'static str {
    lang.pick(
        "Bienvenido a Portfolio OS v1.0. Escribe \"help\" para ver comandos o pregunta lo que quieras.",
        "Welcome to Portfolio OS v1.0. Type \"help\" for commands or just ask anything.",
    )
}

pub fn help_text(lang: Language) -> &'static str {
    lang.pick(
        "Comandos disponibles:\n- help: Ver este menú\n- clear: Limpiar terminal\n\nO pregunta:\n\"¿Cuál es tu experiencia?\"\n\"Háblame de tus proyectos\"\n\"¿Qué certificaciones tienes?\"",
        "Available commands:\n- help: Show this menu\n- clear: Clear terminal\n\nOr ask:\n\"What is your experience?\"\n\"Tell me about your projects\"",
    )
}

pub fn system_error_text(lang: Language) -> &'static str {
    lang.pick("Error del sistema.", "System error.")
}

pub fn no_response_text(lang: Language) -> &'static str {
    lang.pick("Sin respuesta generada.", "No response generated.")
}

/// Route a prompt through the responder; failures become a chat reply
pub async fn resolve(responder: &dyn Responder, prompt: &Prompt) -> String {
    match responder.respond(&prompt.text, prompt.lang).await {
        Ok(text) if text.is_empty() => no_response_text(prompt.lang).to_string(),
        Ok(text) => text,
        Err(e) => {
            log::error!("Assistant error: {}", e);
            system_error_text(prompt.lang).to_string()
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Chat widget state: conversation plus the responder picked at startup
pub struct Terminal {
    responder: Box<dyn Responder>,
    language: Language,
    history: Vec<TerminalMessage>,
    next_id: u64,
    loading: bool,
}

impl Terminal {
    pub fn new(responder: Box<dyn Responder>, language: Language) -> Self {
        Self {
            responder,
            language,
            history: Vec::new(),
            next_id: 0,
            loading: false,
        }
    }

    /// Append the localized welcome message
    pub fn greet(&mut self) {
        self.push(Author::System, welcome_text(self.language).to_string());
    }

    /// Switch language; the conversation restarts with a new welcome
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.history.clear();
        self.greet();
    }

    fn push(&mut self, author: Author, content: String) {
        self.history.push(TerminalMessage {
            id: self.next_id,
            author,
            content,
            timestamp: now_millis(),
        });
        self.next_id += 1;
    }

    /// Record a submission and handle built-in commands.
    /// Returns the prompt to resolve when the input is not a command.
    pub fn accept(&mut self, input: &str) -> Option<Prompt> {
        if input.trim().is_empty() {
            return None;
        }

        self.push(Author::User, input.to_string());

        match Command::parse(input) {
            Some(Command::Clear) => {
                self.history.clear();
                None
            }
            Some(Command::Help) => {
                self.push(Author::System, help_text(self.language).to_string());
                None
            }
            None => {
                self.loading = true;
                Some(Prompt {
                    text: input.to_string(),
                    lang: self.language,
                })
            }
        }
    }

    /// Append the assistant reply for a resolved prompt
    pub fn complete(&mut self, text: String) {
        self.push(Author::Assistant, text);
        self.loading = false;
    }

    /// Accept, resolve and complete in one go
    pub async fn submit(&mut self, input: &str) {
        if let Some(prompt) = self.accept(input) {
            let text = resolve(self.responder.as_ref(), &prompt).await;
            self.complete(text);
        }
    }

    pub fn responder(&self) -> &dyn Responder {
        self.responder.as_ref()
    }

    pub fn messages(&self) -> &[TerminalMessage] {
        &self.history
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn mode(&self) -> Mode {
        self.responder.mode()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::{demo_notice, unrecognized_text, AssistantError, DemoResponder};
    use crate::content::portfolio;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Online responder that always fails and counts calls
    struct FailingResponder {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Responder for FailingResponder {
        async fn respond(&self, _prompt: &str, _lang: Language) -> Result<String, AssistantError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AssistantError::MissingApiKey)
        }

        fn mode(&self) -> Mode {
            Mode::Online
        }
    }

    struct EchoResponder(&'static str);

    #[async_trait]
    impl Responder for EchoResponder {
        async fn respond(&self, _prompt: &str, _lang: Language) -> Result<String, AssistantError> {
            Ok(self.0.to_string())
        }

        fn mode(&self) -> Mode {
            Mode::Online
        }
    }

    fn failing() -> (Terminal, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let responder = FailingResponder {
            calls: calls.clone(),
        };
        (Terminal::new(Box::new(responder), Language::En), calls)
    }

    fn demo(lang: Language) -> Terminal {
        Terminal::new(Box::new(DemoResponder), lang)
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("help"), Some(Command::Help));
        assert_eq!(Command::parse("  CLEAR \n"), Some(Command::Clear));
        assert_eq!(Command::parse("help me"), None);
        assert_eq!(Command::parse("clr"), None);
    }

    #[tokio::test]
    async fn test_clear_empties_history() {
        let mut terminal = demo(Language::Es);
        terminal.greet();
        terminal.submit("experiencia").await;
        terminal.submit("help").await;
        assert_eq!(terminal.messages().len(), 5);

        terminal.submit("Clear").await;
        assert!(terminal.messages().is_empty());
        assert!(!terminal.is_loading());
    }

    #[tokio::test]
    async fn test_help_does_not_call_responder() {
        let (mut terminal, calls) = failing();
        terminal.submit("help").await;

        let messages = terminal.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].author, Author::User);
        assert_eq!(messages[1].author, Author::System);
        assert_eq!(messages[1].content, help_text(Language::En));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let mut terminal = demo(Language::Es);
        terminal.submit("HELP").await;
        assert_eq!(terminal.messages()[1].content, help_text(Language::Es));
        assert_ne!(help_text(Language::Es), help_text(Language::En));
    }

    #[tokio::test]
    async fn test_demo_experience_answer() {
        let mut terminal = demo(Language::En);
        terminal.submit("tell me about your work").await;

        let expected = portfolio(Language::En)
            .experience
            .iter()
            .map(|e| format!("{}: {} @ {}", e.period, e.role, e.company))
            .collect::<Vec<_>>()
            .join("\n");

        let reply = terminal.messages().last().unwrap();
        assert_eq!(reply.author, Author::Assistant);
        assert_eq!(reply.content, expected);
    }

    #[tokio::test]
    async fn test_demo_unrecognized_gets_notice() {
        let mut terminal = demo(Language::Es);
        terminal.submit("what's the weather").await;

        let expected = format!(
            "{}{}",
            unrecognized_text(Language::Es),
            demo_notice(Language::Es)
        );
        assert_eq!(terminal.messages()[1].content, expected);
        assert_eq!(terminal.mode(), Mode::Demo);
    }

    #[tokio::test]
    async fn test_demo_precedence() {
        let mut terminal = demo(Language::Es);
        terminal.submit("trabajo y project").await;

        let expected = portfolio(Language::Es)
            .experience
            .iter()
            .map(|e| format!("{}: {} @ {}", e.period, e.role, e.company))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(terminal.messages()[1].content, expected);
    }

    #[tokio::test]
    async fn test_remote_failure_becomes_system_error() {
        let (mut terminal, calls) = failing();
        terminal.submit("what are your skills?").await;

        let messages = terminal.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].author, Author::User);
        assert_eq!(messages[0].content, "what are your skills?");
        assert_eq!(messages[1].author, Author::Assistant);
        assert_eq!(messages[1].content, "System error.");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!terminal.is_loading());
    }

    #[tokio::test]
    async fn test_empty_remote_reply() {
        let mut terminal = Terminal::new(Box::new(EchoResponder("")), Language::Es);
        terminal.submit("hola").await;
        assert_eq!(terminal.messages()[1].content, "Sin respuesta generada.");

        // Only a truly empty reply falls back, whitespace is kept as sent
        let mut terminal = Terminal::new(Box::new(EchoResponder("   \n")), Language::En);
        terminal.submit("hi").await;
        assert_eq!(terminal.messages()[1].content, "   \n");

        let mut terminal = Terminal::new(Box::new(EchoResponder("> [OK]")), Language::En);
        terminal.submit("hi").await;
        assert_eq!(terminal.messages()[1].content, "> [OK]");
    }

    #[test]
    fn test_accept_sets_loading_until_complete() {
        let mut terminal = demo(Language::En);
        assert_eq!(terminal.accept("   "), None);
        assert!(terminal.messages().is_empty());

        let prompt = terminal.accept("projects").unwrap();
        assert_eq!(prompt.text, "projects");
        assert_eq!(prompt.lang, Language::En);
        assert!(terminal.is_loading());

        terminal.complete("done".to_string());
        assert!(!terminal.is_loading());
        assert_eq!(terminal.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_ids_unique_and_language_switch() {
        let mut terminal = demo(Language::Es);
        terminal.greet();
        terminal.submit("stack").await;
        terminal.submit("clear").await;
        terminal.submit("cert").await;

        let ids: Vec<u64> = terminal.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![4, 5]);

        terminal.set_language(Language::En);
        assert_eq!(terminal.language(), Language::En);
        assert_eq!(terminal.messages().len(), 1);
        assert_eq!(terminal.messages()[0].content, welcome_text(Language::En));
    }
}
