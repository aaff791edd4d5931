//! Host-application bridge
//!
//! On game over the embedding app (a mobile webview shell) gets one message
//! with the final score and high score. Delivery is best effort: no bridge
//! global, no message, no error.

use serde::Serialize;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// The single message the host receives
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GameEndMessage<'a> {
    event: &'a str,
    score: u32,
    high_score: u32,
}

/// Serialize the game-end payload. Split out so the wire format is testable
/// off-browser.
pub fn game_end_payload(score: u32, high_score: u32) -> String {
    let msg = GameEndMessage {
        event: "gameEnd",
        score,
        high_score,
    };
    // A struct of three scalars cannot fail to serialize
    serde_json::to_string(&msg).unwrap_or_default()
}

#[derive(Debug, Default)]
pub struct HostBridge;

impl HostBridge {
    pub fn new() -> Self {
        Self
    }

    /// Post the game-end message to `FlutterBridge.postMessage` if the host
    /// installed one
    #[cfg(target_arch = "wasm32")]
    pub fn notify_game_end(&self, score: u32, high_score: u32) {
        use wasm_bindgen::JsValue;

        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(bridge) = js_sys::Reflect::get(&window, &JsValue::from_str("FlutterBridge"))
        else {
            return;
        };
        if bridge.is_undefined() || bridge.is_null() {
            log::debug!("no host bridge installed, skipping gameEnd message");
            return;
        }
        let Ok(post) = js_sys::Reflect::get(&bridge, &JsValue::from_str("postMessage")) else {
            return;
        };
        let Ok(post) = post.dyn_into::<js_sys::Function>() else {
            return;
        };

        let payload = game_end_payload(score, high_score);
        if post
            .call1(&bridge, &JsValue::from_str(&payload))
            .is_err()
        {
            log::warn!("host bridge rejected gameEnd message");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn notify_game_end(&self, score: u32, high_score: u32) {
        log::info!("game end: score {score}, high score {high_score}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_matches_host_contract() {
        let payload = game_end_payload(7, 12);
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["event"], "gameEnd");
        assert_eq!(value["score"], 7);
        assert_eq!(value["highScore"], 12);
    }
}
