//! Simple test fixtures used across unit tests.

use casebook_domain::{Case, Character, Evidence};
use serde_json::{json, Value};

use crate::ports::outbound::ApiError;

/// An HTTP 500 carrying `msg` as the server text
pub fn api_failure(msg: &str) -> ApiError {
    ApiError::from_status(500, Some("Internal Server Error"), msg)
}

/// Case "case-1" with two suspects, three evidence items and no image yet
pub fn sample_case() -> Case {
    let mut case = Case::new("case-1", "Murder at Ashworth Manor");
    case.setting = "A country manor, 1923".to_string();
    case.victim_name = "Lord Ashworth".to_string();
    case.crime_scene_description = "The study, door locked from inside".to_string();
    case.characters = vec![
        Character::new("c1", "Mrs. Hale")
            .with_description("Housekeeper")
            .with_alibi("Polishing silver in the pantry"),
        Character::new("c2", "Lady Ashworth")
            .with_description("The widow")
            .with_alibi("Reading in the library"),
    ];
    case.evidence = vec![
        Evidence::new("e1", "Broken pocket watch").key(),
        Evidence::new("e2", "Muddy boots"),
        Evidence::new("e3", "Torn letter").key(),
    ];
    case
}

/// Wire form of [`sample_case`]
pub fn sample_case_json() -> Value {
    serde_json::to_value(sample_case()).unwrap_or(Value::Null)
}

/// A generated scene as the backend reports it
pub fn scene_json(id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Scene {id}"),
        "description": "A rendered moment from testimony",
        "image_url": format!("https://img/{id}.png"),
        "generated_from": "testimony",
        "context": "Questioning"
    })
}
