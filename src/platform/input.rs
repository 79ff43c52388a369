//! Raw input decoding

use crate::sim::InputEvent;

/// Map a browser `KeyboardEvent.key` value to a semantic event
pub fn decode_key(key: &str) -> Option<InputEvent> {
    match key {
        " " | "Spacebar" => Some(InputEvent::Impulse),
        "ArrowUp" | "w" | "W" => Some(InputEvent::MenuUp),
        "ArrowDown" | "s" | "S" => Some(InputEvent::MenuDown),
        "Enter" => Some(InputEvent::Confirm),
        _ => None,
    }
}
