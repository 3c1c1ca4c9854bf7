//! WebSocket message types for live recomposition

use citydash::prelude::Composition;
use serde::{Deserialize, Serialize};

use crate::models::ControlsRequest;

/// Messages sent from server to clients
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected { seq: u64, connection_id: String },

    /// Charts for the latest control snapshot
    Composition {
        seq: u64,
        #[serde(flatten)]
        composition: Composition,
    },

    /// The last client message could not be handled
    Error { seq: u64, message: String },
}

/// Messages sent from clients to server
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A control changed; carries a snapshot of all of them
    Controls { state: ControlsRequest },

    /// Go back to the variant's default controls
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use citydash::prelude::NO_SELECTION_MESSAGE;

    #[test]
    fn client_messages_parse() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"controls","state":{"checklist":["top5"]}}"#).unwrap();
        let ClientMessage::Controls { state } = msg else {
            panic!("expected controls message");
        };
        assert_eq!(state.checklist, Some(vec!["top5".to_string()]));

        let reset: ClientMessage = serde_json::from_str(r#"{"type":"reset"}"#).unwrap();
        assert!(matches!(reset, ClientMessage::Reset));
    }

    #[test]
    fn composition_message_is_flattened() {
        let msg = ServerMessage::Composition {
            seq: 3,
            composition: Composition::NoSelection {
                message: NO_SELECTION_MESSAGE.to_string(),
                status: None,
            },
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "composition");
        assert_eq!(json["seq"], 3);
        assert_eq!(json["outcome"], "no_selection");
    }
}
