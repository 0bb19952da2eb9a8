//! Notification stack - discoveries and new scenes, newest last
//!
//! Expiry is driven by the notification queue; this only renders and
//! forwards dismissals.

use dioxus::prelude::*;

use casebook_domain::NotificationId;

use crate::application::{Notification, NotificationKind};

#[component]
pub fn NotificationStack(
    notifications: Vec<Notification>,
    on_dismiss: EventHandler<NotificationId>,
) -> Element {
    rsx! {
        div {
            class: "notification-stack",
            for notification in notifications.iter() {
                NotificationToast {
                    key: "{notification.id}",
                    notification: notification.clone(),
                    on_dismiss: move |id| on_dismiss.call(id),
                }
            }
        }
    }
}

#[component]
fn NotificationToast(notification: Notification, on_dismiss: EventHandler<NotificationId>) -> Element {
    let id = notification.id.clone();

    rsx! {
        div {
            class: "toast",
            {match &notification.kind {
                NotificationKind::CharacterDiscovered { character, discovered_through, context } => rsx! {
                    div {
                        class: "toast__body",
                        span { class: "toast__icon", "🔍" }
                        div {
                            h4 { "New character discovered" }
                            p { class: "toast__title", "{character.name}" }
                            if !discovered_through.is_empty() {
                                p { class: "toast__meta", "Through {discovered_through}" }
                            }
                            if !context.is_empty() {
                                p { class: "toast__meta", "{context}" }
                            }
                        }
                    }
                },
                NotificationKind::SceneGenerated { scene } => rsx! {
                    div {
                        class: "toast__body",
                        img { class: "toast__thumb", src: "{scene.image_url}", alt: "{scene.title}" }
                        div {
                            h4 { "New visual scene" }
                            p { class: "toast__title", "{scene.title}" }
                            if let Some(who) = scene.character_involved.as_ref() {
                                p { class: "toast__meta", "From {who}'s testimony" }
                            }
                        }
                    }
                },
            }}
            button {
                class: "toast__close",
                onclick: move |_| on_dismiss.call(id.clone()),
                "×"
            }
        }
    }
}
