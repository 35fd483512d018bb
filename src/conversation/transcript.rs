use crate::web::models::{Message, Role};

use super::prompts::TRIGGER_PHRASE;

/// Renders the conversation as one `"<speaker>: <content>"` line per message.
pub fn render(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", speaker(m.role), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "👤 Usuario",
        Role::Assistant => "🤖 Asistente",
        Role::System => "🛠️ Sistema",
    }
}

/// True when the last turn is the user asking for results.
pub fn requests_results(messages: &[Message]) -> bool {
    messages.last().is_some_and(|last| {
        last.role == Role::User && last.content.trim().to_lowercase() == TRIGGER_PHRASE
    })
}
