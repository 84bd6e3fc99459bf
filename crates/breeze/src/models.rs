//! These models represent the objects passed around by the agent
//!
//! There are two formats we need to interact with:
//! - openai style chat completion messages/tools, sent from the agent to the LLM
//! - tool requests, sent from the agent to the systems providing the tools
//!
//! We always immediately convert the wire format into the internal structs using the
//! helpers in `providers::utils`, so the internal models are not an exact match to it.
pub mod message;
pub mod role;
pub mod tool;
