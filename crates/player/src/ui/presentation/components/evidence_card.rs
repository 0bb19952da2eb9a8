use dioxus::prelude::*;

use casebook_domain::{Evidence, EvidenceId};

/// Evidence item with a selection toggle for the theory
#[component]
pub fn EvidenceCard(evidence: Evidence, selected: bool, on_toggle: EventHandler<EvidenceId>) -> Element {
    let id = evidence.id.clone();
    let class = match (selected, evidence.is_key_evidence) {
        (true, _) => "evidence-card evidence-card--selected",
        (false, true) => "evidence-card evidence-card--key",
        (false, false) => "evidence-card",
    };

    rsx! {
        div {
            class: "{class}",
            onclick: move |_| on_toggle.call(id.clone()),

            div {
                class: "evidence-card__header",
                input {
                    r#type: "checkbox",
                    checked: selected,
                    readonly: true,
                }
                h4 { "{evidence.name}" }
                if evidence.is_key_evidence {
                    span { class: "badge badge--key", "Key" }
                }
            }
            p { class: "evidence-card__description", "{evidence.description}" }
            if !evidence.location_found.is_empty() {
                p {
                    class: "evidence-card__meta",
                    span { class: "label", "Found: " }
                    "{evidence.location_found}"
                }
            }
            if !evidence.significance.is_empty() {
                p {
                    class: "evidence-card__meta",
                    span { class: "label", "Significance: " }
                    "{evidence.significance}"
                }
            }
        }
    }
}
