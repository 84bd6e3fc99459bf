use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// The author of a message. Tool results travel in user messages and are
/// emitted with the `tool` role on the wire.
pub enum Role {
    User,
    Assistant,
}
