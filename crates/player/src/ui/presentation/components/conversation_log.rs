use dioxus::prelude::*;

use casebook_domain::ConversationEntry;

/// Transcript of one character's interrogation, oldest first
#[component]
pub fn ConversationLog(character_name: String, entries: Vec<ConversationEntry>) -> Element {
    rsx! {
        div {
            class: "conversation-log",
            if entries.is_empty() {
                p { class: "muted", "You have not questioned {character_name} yet." }
            }
            for (idx, entry) in entries.iter().enumerate() {
                div {
                    key: "{idx}",
                    class: "conversation-log__exchange",
                    p {
                        class: "conversation-log__question",
                        span { class: "label", "You: " }
                        "{entry.question}"
                    }
                    p {
                        class: "conversation-log__answer",
                        span { class: "label", "{character_name}: " }
                        "{entry.response}"
                    }
                    span {
                        class: "conversation-log__time",
                        {entry.timestamp.with_timezone(&chrono::Local).format("%H:%M").to_string()}
                    }
                }
            }
        }
    }
}
