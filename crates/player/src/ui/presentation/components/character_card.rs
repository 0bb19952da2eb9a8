//! Character card - one suspect or witness in the case roster

use dioxus::prelude::*;

use casebook_domain::{Character, CharacterId};

#[derive(Props, Clone, PartialEq)]
pub struct CharacterCardProps {
    pub character: Character,
    /// Whether the question box currently addresses this character
    pub active: bool,
    /// Exchanges already recorded with this character
    pub exchanges: usize,
    pub on_select: EventHandler<CharacterId>,
}

#[component]
pub fn CharacterCard(props: CharacterCardProps) -> Element {
    let character = props.character.clone();
    let id = character.id.clone();
    let class = if props.active {
        "character-card character-card--active"
    } else {
        "character-card"
    };

    rsx! {
        div {
            class: "{class}",
            onclick: move |_| props.on_select.call(id.clone()),

            div {
                class: "character-card__header",
                div { class: "character-card__avatar", "{character.initials()}" }
                div {
                    h3 { class: "character-card__name", "{character.name}" }
                    if character.is_dynamic {
                        span { class: "badge badge--new", "Discovered" }
                    }
                }
            }

            if !character.description.is_empty() {
                p { class: "character-card__description", "{character.description}" }
            }
            if !character.alibi.is_empty() {
                p {
                    class: "character-card__alibi",
                    span { class: "label", "Alibi: " }
                    "{character.alibi}"
                }
            }
            if let Some(motive) = character.motive.as_ref() {
                p {
                    class: "character-card__motive",
                    span { class: "label", "Possible motive: " }
                    "{motive}"
                }
            }
            if props.exchanges > 0 {
                p { class: "character-card__count", "{props.exchanges} question(s) asked" }
            }
        }
    }
}
