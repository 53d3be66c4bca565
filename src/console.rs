use std::io::{self, Write};

use crate::content::Language;
use crate::terminal::{Author, Terminal, TerminalMessage};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// `lang es` / `lang en`: the console's language toggle
pub fn language_switch(input: &str) -> Option<Language> {
    let mut words = input.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some(keyword), Some(tag), None) if keyword.eq_ignore_ascii_case("lang") => {
            tag.parse().ok()
        }
        _ => None,
    }
}

pub fn prompt_label(lang: Language) -> &'static str {
    lang.pick("Escribe un comando...", "Type a command...")
}

/// Prints a terminal conversation to a text stream, newest last
#[derive(Debug, Default)]
pub struct Transcript {
    shown: usize,
    last_id: Option<u64>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print the status line shown above the conversation
    pub fn header<W: Write>(&self, out: &mut W, terminal: &Terminal) -> io::Result<()> {
        writeln!(
            out,
            "user@portfolio:~  [{}]  lang={}",
            terminal.mode().label(),
            terminal.language()
        )
    }

    /// Clear the screen and print the header and the whole conversation
    pub fn redraw<W: Write>(&mut self, out: &mut W, terminal: &Terminal) -> io::Result<()> {
        write!(out, "{}", CLEAR_SCREEN)?;
        self.header(out, terminal)?;
        self.shown = 0;
        self.last_id = None;
        self.sync(out, terminal.messages())
    }

    /// Bring the output up to date with `messages`.
    /// Ids only grow, so anything above the last printed id is new. If some
    /// printed message is gone the history was cleared: redraw from scratch.
    pub fn sync<W: Write>(&mut self, out: &mut W, messages: &[TerminalMessage]) -> io::Result<()> {
        let is_old = |m: &&TerminalMessage| self.last_id.is_some_and(|last| m.id <= last);
        if messages.iter().filter(is_old).count() != self.shown {
            write!(out, "{}", CLEAR_SCREEN)?;
            self.shown = 0;
        }

        for message in messages.iter().skip(self.shown) {
            write_message(out, message)?;
        }
        self.shown = messages.len();
        self.last_id = messages.last().map(|m| m.id).or(self.last_id);
        out.flush()
    }
}

fn write_message<W: Write>(out: &mut W, message: &TerminalMessage) -> io::Result<()> {
    writeln!(out, "{}", message.author.label())?;
    match message.author {
        Author::User => writeln!(out, "{}", message.content)?,
        Author::System | Author::Assistant => writeln!(out, "> {}", message.content)?,
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::DemoResponder;
    use crate::content::Language;

    fn render(transcript: &mut Transcript, terminal: &Terminal) -> String {
        let mut out = Vec::new();
        transcript.sync(&mut out, terminal.messages()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_prints_only_new_messages() {
        let mut terminal = Terminal::new(Box::new(DemoResponder), Language::En);
        let mut transcript = Transcript::new();

        terminal.greet();
        let first = render(&mut transcript, &terminal);
        assert!(first.starts_with("SYSTEM\n> Welcome to Portfolio OS"));

        terminal.submit("email").await;
        let second = render(&mut transcript, &terminal);
        assert_eq!(
            second,
            "YOU\nemail\n\nAI\n> Email me at: cesarbecerravalencia@gmail.com\n\n"
        );

        assert_eq!(render(&mut transcript, &terminal), "");
    }

    #[tokio::test]
    async fn test_clear_redraws() {
        let mut terminal = Terminal::new(Box::new(DemoResponder), Language::En);
        let mut transcript = Transcript::new();

        terminal.submit("stack").await;
        render(&mut transcript, &terminal);

        terminal.submit("clear").await;
        assert_eq!(render(&mut transcript, &terminal), CLEAR_SCREEN);

        terminal.submit("help").await;
        let out = render(&mut transcript, &terminal);
        assert!(out.starts_with("YOU\nhelp\n\nSYSTEM\n> Available commands:"));

        // cleared and refilled to the same length between two syncs
        terminal.submit("clear").await;
        terminal.submit("help").await;
        let out = render(&mut transcript, &terminal);
        assert!(out.starts_with(CLEAR_SCREEN));
        assert_eq!(out.matches("Available commands:").count(), 1);
    }

    #[test]
    fn test_language_switch_parse() {
        assert_eq!(language_switch("lang en"), Some(Language::En));
        assert_eq!(language_switch("  LANG  ES "), Some(Language::Es));
        assert_eq!(language_switch("lang fr"), None);
        assert_eq!(language_switch("lang"), None);
        assert_eq!(language_switch("lang en now"), None);
        assert_eq!(language_switch("language en"), None);
    }

    #[tokio::test]
    async fn test_language_switch_redraws_with_new_welcome() {
        let mut terminal = Terminal::new(Box::new(DemoResponder), Language::Es);
        let mut transcript = Transcript::new();
        terminal.greet();
        terminal.submit("stack").await;
        render(&mut transcript, &terminal);

        let lang = language_switch("lang en").unwrap();
        terminal.set_language(lang);
        let mut out = Vec::new();
        transcript.redraw(&mut out, &terminal).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with(CLEAR_SCREEN));
        assert!(out.contains("lang=en\nSYSTEM\n> Welcome to Portfolio OS"));
        assert!(!out.contains("Bienvenido"));
        assert!(!out.contains("YOU"));
        assert_eq!(prompt_label(terminal.language()), "Type a command...");

        // Later messages are appended, not redrawn
        terminal.submit("email").await;
        assert!(render(&mut transcript, &terminal).starts_with("YOU\nemail\n"));
    }

    #[test]
    fn test_header_shows_mode() {
        let terminal = Terminal::new(Box::new(DemoResponder), Language::Es);
        let mut out = Vec::new();
        Transcript::new().header(&mut out, &terminal).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "user@portfolio:~  [Demo Mode]  lang=es\n"
        );
    }
}
