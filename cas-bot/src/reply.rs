/// A reply to send back to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// A plain text message.
    Text(String),

    /// A PNG image with a caption.
    Image {
        png: Vec<u8>,
        caption: String,
    },
}

impl Reply {
    /// Returns the text of a text reply.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text(text) => Some(text),
            Reply::Image { .. } => None,
        }
    }
}
