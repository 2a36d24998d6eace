use crate::types::{ChatMessage, Role};

const SYSTEM_TEMPLATE: &str = r#"
You are a highly knowledgeable medical consultant. Based on the symptoms provided, suggest possible conditions, recommended treatments or medications, and the type of specialist doctor the patient should consult.
Symptom: {problem}
"#;

const USER_TEMPLATE: &str = "{text}";

/// Two-part consultant prompt: system instructions plus the user message.
#[derive(Clone, Copy, Debug, Default)]
pub struct PromptTemplate;

impl PromptTemplate {
    pub fn format(&self, problem: &str, text: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(fill(SYSTEM_TEMPLATE, "{problem}", problem)),
            ChatMessage {
                role: Role::User,
                content: fill(USER_TEMPLATE, "{text}", text),
                created_at: None,
            },
        ]
    }

    /// Flattened text form, used for debug output.
    pub fn render(&self, problem: &str, text: &str) -> String {
        self.format(problem, text)
            .into_iter()
            .map(|msg| match msg.role {
                Role::System => format!("System: {}", msg.content),
                Role::User => format!("Human: {}", msg.content),
                Role::Assistant => format!("AI: {}", msg.content),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// Single pass, so placeholders inside the substituted value stay literal.
fn fill(template: &str, placeholder: &str, value: &str) -> String {
    match template.split_once(placeholder) {
        Some((head, tail)) => format!("{head}{value}{tail}"),
        None => template.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_exact_text_into_both_parts() {
        let input = "I have a sore throat and fever";
        let messages = PromptTemplate.format(input, input);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.contains(&format!("Symptom: {input}\n")));
        assert!(messages[0].content.contains("medical consultant"));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, input);
    }

    #[test]
    fn leaves_braces_in_user_text_alone() {
        let input = "rash shaped like {text} and {problem}";
        let messages = PromptTemplate.format(input, input);
        assert!(messages[0].content.contains(input));
        assert_eq!(messages[1].content, input);
    }

    #[test]
    fn renders_flattened_prompt() {
        let rendered = PromptTemplate.render("headache", "headache");
        assert!(rendered.starts_with("System: "));
        assert!(rendered.ends_with("Human: headache"));
    }
}
