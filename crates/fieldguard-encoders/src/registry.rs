use crate::escape::{HtmlEncoder, JavascriptEncoder, WebEncoder, XmlEncoder};
use crate::Encoder;

/// Declarative encoder descriptor attached to a textual attribute.
///
/// The closed set replaces provider-annotation indirection: resolution is a
/// match over the tag. `Custom` takes a plain function for one-off encoders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncoderKind {
    Html,
    Xml,
    Javascript,
    /// JavaScript-then-HTML composition.
    Web,
    Custom(fn(&str) -> String),
}

struct FnEncoder(fn(&str) -> String);

impl Encoder for FnEncoder {
    fn encode(&self, input: &str) -> String {
        (self.0)(input)
    }
}

/// Maps a descriptor to its encoder instance. Encoders are stateless, so
/// instances are interchangeable per kind.
pub fn resolve(kind: EncoderKind) -> Box<dyn Encoder> {
    match kind {
        EncoderKind::Html => Box::new(HtmlEncoder),
        EncoderKind::Xml => Box::new(XmlEncoder),
        EncoderKind::Javascript => Box::new(JavascriptEncoder),
        EncoderKind::Web => Box::new(WebEncoder),
        EncoderKind::Custom(f) => Box::new(FnEncoder(f)),
    }
}
