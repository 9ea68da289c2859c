//! Text encoders for the sanitization pass (HTML, XML, JavaScript escaping).
//!
//! Encoders are pure `&str -> String` transforms. They are deliberately NOT
//! idempotent: re-encoding already-encoded text escapes the escapes. The
//! engine runs the pass exactly once per validate call; callers invoking
//! `encode` by hand own that contract.

#![forbid(unsafe_code)]

mod escape;
mod registry;

pub use escape::{HtmlEncoder, JavascriptEncoder, WebEncoder, XmlEncoder};
pub use registry::{resolve, EncoderKind};

/// A single text transform applied to a textual attribute in place.
pub trait Encoder: Send + Sync {
    fn encode(&self, input: &str) -> String;
}
