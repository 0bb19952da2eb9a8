//! Gallery modal - crime scene image and every generated visual scene

use dioxus::prelude::*;

use casebook_domain::{Case, VisualScene};

use super::common::ModalFrame;

#[component]
pub fn GalleryModal(case: Case, on_close: EventHandler<()>) -> Element {
    let mut focused: Signal<Option<usize>> = use_signal(|| None);
    let scenes = case.visual_scenes.clone();
    let focused_scene: Option<VisualScene> = focused().and_then(|idx| scenes.get(idx).cloned());

    rsx! {
        ModalFrame {
            title: "Case Gallery".to_string(),
            on_close: move |_| on_close.call(()),

            section {
                class: "gallery__crime-scene",
                h3 { "Crime Scene" }
                if let Some(url) = case.crime_scene_image_url.as_ref().filter(|u| !u.trim().is_empty()) {
                    img { class: "gallery__image", src: "{url}", alt: "Crime scene" }
                } else {
                    p { class: "muted", "The crime scene image is still being generated." }
                }
                p { class: "gallery__caption", "{case.crime_scene_description}" }
            }

            if let Some(scene) = focused_scene {
                section {
                    class: "gallery__focus",
                    button {
                        class: "button button--ghost",
                        onclick: move |_| focused.set(None),
                        "← Back to all scenes"
                    }
                    img { class: "gallery__image", src: "{scene.image_url}", alt: "{scene.title}" }
                    h4 { "{scene.title}" }
                    p { "{scene.description}" }
                    if let Some(who) = scene.character_involved.as_ref() {
                        p { class: "gallery__meta", "From the testimony of {who}" }
                    }
                    if !scene.context.is_empty() {
                        p { class: "gallery__meta", "{scene.context}" }
                    }
                }
            } else {
                section {
                    class: "gallery__scenes",
                    h3 { "Visual Scenes ({scenes.len()})" }
                    if scenes.is_empty() {
                        p { class: "muted", "Scenes appear here as witnesses describe what they saw." }
                    }
                    div {
                        class: "gallery__grid",
                        for (idx, scene) in scenes.iter().enumerate() {
                            div {
                                key: "{scene.id}-{idx}",
                                class: "gallery__thumb",
                                onclick: move |_| focused.set(Some(idx)),
                                img { src: "{scene.image_url}", alt: "{scene.title}" }
                                span { "{scene.title}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
