//! Sheetmark Shared - Types exchanged with the host UI layer
//!
//! This crate contains everything that crosses the boundary between the host
//! sheet and the favorites engine:
//! - Host document shapes (actor and embedded item JSON) and their conversion
//!   into domain snapshots
//! - Drag-and-drop payload decoding into reorder intents
//! - Sheet requests (the command interface) and their responses
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, thiserror and tracing
//! 2. **No business logic** - Pure data types, parsing and conversion
//! 3. **Raw ids in requests** - requests carry plain strings, validated on conversion

pub mod documents;
pub mod drop;
pub mod error;
pub mod requests;
pub mod responses;

pub use documents::{HostActorDocument, HostItemDocument};
pub use drop::DropPayload;
pub use error::SharedError;
pub use requests::SheetRequest;
pub use responses::{ErrorCode, ResponseResult};
