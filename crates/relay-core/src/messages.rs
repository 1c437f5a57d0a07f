//! Inter-context message protocol.
//!
//! Every request carries an `action` discriminator. Replies are optional:
//! `updateMoveList` is a notification and never gets one. On the wire:
//!
//! | Request                              | Reply                 |
//! |--------------------------------------|-----------------------|
//! | `{"action":"getTabUrl"}`             | `{"url": "..."}`      |
//! | `{"action":"updateMoveList","moves":[..]}` | none            |
//! | `{"action":"getMoveList"}`           | `{"moves": [..]}`     |
//! | `{"action":"getReadiness"}`          | `{"ready": bool}`     |

use serde::{Deserialize, Serialize};

use crate::models::MoveList;

/// A message addressed to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    GetTabUrl,
    UpdateMoveList { moves: MoveList },
    GetMoveList,
    GetReadiness,
}

impl Request {
    /// The wire name of the action, for logging.
    pub fn action(&self) -> &'static str {
        match self {
            Request::GetTabUrl => "getTabUrl",
            Request::UpdateMoveList { .. } => "updateMoveList",
            Request::GetMoveList => "getMoveList",
            Request::GetReadiness => "getReadiness",
        }
    }

    /// `false` for fire-and-forget notifications.
    pub fn expects_reply(&self) -> bool {
        !matches!(self, Request::UpdateMoveList { .. })
    }
}

/// A reply from the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    TabUrl { url: String },
    Moves { moves: MoveList },
    Readiness { ready: bool },
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        let req = Request::UpdateMoveList {
            moves: MoveList::from(["1", "e4"]),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "action": "updateMoveList", "moves": ["1", "e4"] })
        );
        assert_eq!(
            serde_json::to_value(Request::GetTabUrl).unwrap(),
            json!({ "action": "getTabUrl" })
        );
    }

    #[test]
    fn test_request_parses_from_wire() {
        let req: Request = serde_json::from_str(r#"{"action":"getReadiness"}"#).unwrap();
        assert_eq!(req, Request::GetReadiness);

        let req: Request =
            serde_json::from_str(r#"{"action":"updateMoveList","moves":["1","d4","Nf6"]}"#)
                .unwrap();
        assert_eq!(
            req,
            Request::UpdateMoveList {
                moves: MoveList::from(["1", "d4", "Nf6"])
            }
        );
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let parsed = serde_json::from_str::<Request>(r#"{"action":"flushMoves"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_response_shapes() {
        assert_eq!(
            serde_json::to_value(Response::Readiness { ready: true }).unwrap(),
            json!({ "ready": true })
        );
        let resp: Response = serde_json::from_str(r#"{"moves":["1","e4"]}"#).unwrap();
        assert_eq!(
            resp,
            Response::Moves {
                moves: MoveList::from(["1", "e4"])
            }
        );
        let resp: Response = serde_json::from_str(r#"{"url":"https://www.chess.com/play"}"#).unwrap();
        assert_eq!(
            resp,
            Response::TabUrl {
                url: "https://www.chess.com/play".to_string()
            }
        );
    }

    #[test]
    fn test_only_update_is_a_notification() {
        assert!(Request::GetTabUrl.expects_reply());
        assert!(Request::GetMoveList.expects_reply());
        assert!(Request::GetReadiness.expects_reply());
        assert!(!Request::UpdateMoveList {
            moves: MoveList::new()
        }
        .expects_reply());
        assert_eq!(Request::GetMoveList.action(), "getMoveList");
    }
}
