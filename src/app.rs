use crate::ai::Model;
use crate::consult::Consultant;
use crate::language::Language;
use crate::session::Session;
use crate::speech::play_audio;
use crate::types::{ChatMessage, Role, format_timestamp};
use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

const HELP: &str = "\
Describe your symptoms (e.g. 'I have a sore throat and fever'), or use a command:
  /model <Gemma2-9b-It|llama3-8b-8192>   choose the model
  /lang <language>                       English, Tamil, Hindi, Malayalam, Kannada, Telugu, Marathi
  /key <api-key>                         set the GROQ API key
  /speak                                 read the last reply aloud and save it as audio
  /history                               show the conversation so far
  /settings                              show current settings
  /help                                  show this help
  /quit                                  exit";

#[derive(Debug, PartialEq)]
pub enum Command {
    Ask(String),
    Model(Model),
    Language(Language),
    ApiKey(String),
    Speak,
    History,
    Settings,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Ask(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name.to_ascii_lowercase().as_str() {
        "model" => match arg.parse::<Model>() {
            Ok(model) => Command::Model(model),
            Err(err) => Command::Invalid(err.to_string()),
        },
        "lang" | "language" => match arg.parse::<Language>() {
            Ok(lang) => Command::Language(lang),
            Err(err) => Command::Invalid(err.to_string()),
        },
        "key" if arg.is_empty() => Command::Invalid("usage: /key <api-key>".to_string()),
        "key" => Command::ApiKey(arg.to_string()),
        "speak" => Command::Speak,
        "history" => Command::History,
        "settings" => Command::Settings,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command '/{other}', try /help")),
    }
}

/// Blank lines and API keys never reach the line editor's history.
fn keeps_history(command: &Command) -> bool {
    !matches!(command, Command::Empty | Command::ApiKey(_))
}

fn print_turn(msg: &ChatMessage) {
    let stamp = format_timestamp(msg.created_at)
        .map(|t| format!(" {t}"))
        .unwrap_or_default();
    match msg.role {
        Role::User => println!("{}{}\n{}\n", "🧑 You".bright_cyan().bold(), stamp.bright_black(), msg.content),
        Role::Assistant => println!(
            "{}{}\n{}\n",
            "🩺 Consultant".green().bold(),
            stamp.bright_black(),
            msg.content
        ),
        Role::System => {}
    }
}

fn print_error(err: impl std::fmt::Display) {
    eprintln!("{}", format!("❌ Error: {err}").red());
}

fn print_settings(consultant: &Consultant) {
    let settings = consultant.settings();
    println!("{}", "🌐 Settings".bright_cyan().bold());
    println!("  model:     {}", settings.model);
    println!("  language:  {}", settings.language);
    println!(
        "  backend:   {}",
        consultant
            .backend_description()
            .unwrap_or_else(|| "none (missing API key)".to_string())
    );
    println!(
        "  api key:   {}",
        if settings.has_api_key() { "set" } else { "missing" }
    );
    println!("  audio:     {}", settings.audio_path.display());
    if let Some(player) = &settings.player {
        println!("  player:    {player}");
    }
    println!();
}

/// Answer one question and print the reply; used for `--ask`.
pub async fn run_once(consultant: &Consultant, question: &str) -> Result<()> {
    let mut session = Session::new();
    let reply = consultant.ask(&mut session, question).await?;
    println!("{reply}");
    Ok(())
}

/// Run interactive REPL mode
pub async fn run_repl(mut consultant: Consultant) -> Result<()> {
    println!("{}", "🩺 Multilingual Medical Consultant Chatbot".bright_cyan().bold());
    println!("{}", "Type /help for commands, /quit to exit\n".bright_black());
    if consultant.backend_description().is_none() {
        println!("{}", "🔑 No GROQ API key set. Use /key <api-key> or set GROQ_API_KEY.\n".yellow());
    }

    let mut session = Session::new();
    let mut editor = DefaultEditor::new()?;

    loop {
        let line = match editor.readline("symptoms> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };

        let command = parse_command(&line);
        if keeps_history(&command) {
            editor.add_history_entry(line.as_str())?;
        }

        match command {
            Command::Empty => {}
            Command::Ask(text) => {
                match consultant.ask(&mut session, &text).await {
                    Ok(_) => {
                        if let Some(reply) = session.last_assistant() {
                            print_turn(reply);
                        }
                    }
                    Err(err) => print_error(err),
                }
            }
            Command::Model(model) => {
                consultant.set_model(model);
                println!("{}", format!("Model set to {model}").bright_black());
            }
            Command::Language(language) => {
                consultant.set_language(language);
                println!("{}", format!("Replies will be in {language}").bright_black());
            }
            Command::ApiKey(key) => {
                consultant.set_api_key(key);
                println!("{}", "API key updated".bright_black());
            }
            Command::Speak => speak_last(&consultant, &session).await,
            Command::History => {
                if session.is_empty() {
                    println!("{}", "No messages yet.".bright_black());
                }
                for turn in session.display(consultant.settings().history_order) {
                    print_turn(turn);
                }
            }
            Command::Settings => print_settings(&consultant),
            Command::Help => println!("{HELP}\n"),
            Command::Quit => break,
            Command::Invalid(message) => print_error(message),
        }
    }

    Ok(())
}

async fn speak_last(consultant: &Consultant, session: &Session) {
    let Some(reply) = session.last_assistant() else {
        print_error("There is no reply to read aloud yet.");
        return;
    };

    match consultant.speak(&reply.content).await {
        Ok(path) => {
            println!("{}", format!("🔊 Audio saved to {}", path.display()).green());
            if let Some(player) = &consultant.settings().player
                && let Err(err) = play_audio(player, &path).await
            {
                print_error(err);
            }
        }
        Err(err) => print_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_question() {
        assert_eq!(
            parse_command("  I have a headache  "),
            Command::Ask("I have a headache".to_string())
        );
        assert_eq!(parse_command("   "), Command::Empty);
    }

    #[test]
    fn parses_setting_commands() {
        assert_eq!(parse_command("/model llama3-8b-8192"), Command::Model(Model::Llama3_8b));
        assert_eq!(parse_command("/lang Tamil"), Command::Language(Language::Tamil));
        assert_eq!(parse_command("/language kn"), Command::Language(Language::Kannada));
        assert_eq!(parse_command("/key gsk_abc"), Command::ApiKey("gsk_abc".to_string()));
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse_command("/speak"), Command::Speak);
        assert_eq!(parse_command("/HISTORY"), Command::History);
        assert_eq!(parse_command("/settings"), Command::Settings);
        assert_eq!(parse_command("/help"), Command::Help);
        assert_eq!(parse_command("/exit"), Command::Quit);
    }

    #[test]
    fn api_keys_stay_out_of_history() {
        assert!(!keeps_history(&parse_command("/key gsk_secret")));
        assert!(!keeps_history(&parse_command("  ")));
        assert!(keeps_history(&parse_command("chest pain")));
        assert!(keeps_history(&parse_command("/lang Tamil")));
    }

    #[test]
    fn reports_bad_arguments() {
        assert!(matches!(parse_command("/model gpt-4o"), Command::Invalid(_)));
        assert!(matches!(parse_command("/lang French"), Command::Invalid(_)));
        assert!(matches!(parse_command("/key"), Command::Invalid(_)));
        assert!(matches!(parse_command("/dance"), Command::Invalid(_)));
    }
}
