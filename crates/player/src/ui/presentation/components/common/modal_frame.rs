use dioxus::prelude::*;

/// Overlay with a titled panel; clicking the backdrop closes it.
#[component]
pub fn ModalFrame(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                div {
                    class: "modal__header",
                    h2 { "{title}" }
                    button {
                        class: "modal__close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                div { class: "modal__body", {children} }
            }
        }
    }
}
