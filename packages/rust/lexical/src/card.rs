//! Ghost editor cards.
//!
//! Each card kind has a fixed shape. Required fields go through `new`, every
//! optional field starts from the editor's default (empty string, `null`
//! dimensions, `false` toggles) via `Default`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ghostkit_shared::Result;

use crate::node::Node;

const CARD_VERSION: u32 = 1;

/// A card block, tagged by its Lexical `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Card {
    Button(ButtonCard),
    Toggle(ToggleCard),
    Video(VideoCard),
    Audio(AudioCard),
    File(FileCard),
    Product(ProductCard),
    Paywall(PaywallCard),
    Embed(EmbedCard),
}

impl Card {
    /// The Lexical `type` string.
    pub fn kind(&self) -> &'static str {
        match self {
            Card::Button(_) => "button",
            Card::Toggle(_) => "toggle",
            Card::Video(_) => "video",
            Card::Audio(_) => "audio",
            Card::File(_) => "file",
            Card::Product(_) => "product",
            Card::Paywall(_) => "paywall",
            Card::Embed(_) => "embed",
        }
    }

    /// Convert into a generic node so it can be placed in a document.
    pub fn to_node(&self) -> Result<Node> {
        Ok(serde_json::from_value(serde_json::to_value(self)?)?)
    }

    /// Read a card back from a generic node. Fails for non-card kinds.
    pub fn from_node(node: &Node) -> Result<Self> {
        Ok(serde_json::from_value(serde_json::to_value(node)?)?)
    }
}

macro_rules! impl_into_card {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Card {
                fn from(card: $ty) -> Self {
                    Card::$variant(card)
                }
            }
        )*
    };
}

impl_into_card! {
    ButtonCard => Button,
    ToggleCard => Toggle,
    VideoCard => Video,
    AudioCard => Audio,
    FileCard => File,
    ProductCard => Product,
    PaywallCard => Paywall,
    EmbedCard => Embed,
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonCard {
    pub version: u32,
    pub button_text: String,
    /// `left` or `center`.
    pub alignment: String,
    pub button_url: String,
}

impl ButtonCard {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            button_text: text.into(),
            button_url: url.into(),
            ..Default::default()
        }
    }
}

impl Default for ButtonCard {
    fn default() -> Self {
        Self {
            version: CARD_VERSION,
            button_text: String::new(),
            alignment: "center".into(),
            button_url: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Toggle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToggleCard {
    pub version: u32,
    pub heading: String,
    pub content: String,
}

impl ToggleCard {
    pub fn new(heading: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            version: CARD_VERSION,
            heading: heading.into(),
            content: content.into(),
        }
    }
}

impl Default for ToggleCard {
    fn default() -> Self {
        Self::new("", "")
    }
}

// ---------------------------------------------------------------------------
// Video
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoCard {
    pub version: u32,
    pub src: String,
    pub caption: String,
    pub file_name: String,
    pub mime_type: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Seconds.
    pub duration: f64,
    pub thumbnail_src: String,
    pub custom_thumbnail_src: String,
    pub thumbnail_width: Option<u32>,
    pub thumbnail_height: Option<u32>,
    /// `regular`, `wide` or `full`.
    pub card_width: String,
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl VideoCard {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Default::default()
        }
    }
}

impl Default for VideoCard {
    fn default() -> Self {
        Self {
            version: CARD_VERSION,
            src: String::new(),
            caption: String::new(),
            file_name: String::new(),
            mime_type: String::new(),
            width: None,
            height: None,
            duration: 0.0,
            thumbnail_src: String::new(),
            custom_thumbnail_src: String::new(),
            thumbnail_width: None,
            thumbnail_height: None,
            card_width: "regular".into(),
            looping: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Audio
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AudioCard {
    pub version: u32,
    pub src: String,
    pub title: String,
    pub mime_type: String,
    pub duration: f64,
    pub thumbnail_src: String,
}

impl AudioCard {
    pub fn new(src: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}

impl Default for AudioCard {
    fn default() -> Self {
        Self {
            version: CARD_VERSION,
            src: String::new(),
            title: String::new(),
            mime_type: String::new(),
            duration: 0.0,
            thumbnail_src: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// File
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileCard {
    pub version: u32,
    pub src: String,
    pub file_title: String,
    pub file_caption: String,
    pub file_name: String,
    /// Bytes.
    pub file_size: Option<u64>,
}

impl FileCard {
    pub fn new(src: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            file_name: file_name.into(),
            ..Default::default()
        }
    }
}

impl Default for FileCard {
    fn default() -> Self {
        Self {
            version: CARD_VERSION,
            src: String::new(),
            file_title: String::new(),
            file_caption: String::new(),
            file_name: String::new(),
            file_size: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductCard {
    pub version: u32,
    pub product_image_src: String,
    pub product_image_width: Option<u32>,
    pub product_image_height: Option<u32>,
    pub product_title: String,
    pub product_description: String,
    pub product_rating_enabled: bool,
    pub product_star_rating: u8,
    pub product_button_enabled: bool,
    pub product_button: String,
    pub product_url: String,
}

impl ProductCard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            product_title: title.into(),
            ..Default::default()
        }
    }

    /// Enable the call-to-action button.
    pub fn with_button(mut self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.product_button_enabled = true;
        self.product_button = label.into();
        self.product_url = url.into();
        self
    }
}

impl Default for ProductCard {
    fn default() -> Self {
        Self {
            version: CARD_VERSION,
            product_image_src: String::new(),
            product_image_width: None,
            product_image_height: None,
            product_title: String::new(),
            product_description: String::new(),
            product_rating_enabled: false,
            product_star_rating: 5,
            product_button_enabled: false,
            product_button: String::new(),
            product_url: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Paywall
// ---------------------------------------------------------------------------

/// Public preview divider; has no content of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaywallCard {
    pub version: u32,
}

impl Default for PaywallCard {
    fn default() -> Self {
        Self {
            version: CARD_VERSION,
        }
    }
}

// ---------------------------------------------------------------------------
// Embed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmbedCard {
    pub version: u32,
    pub url: String,
    /// oEmbed type (`video`, `rich`, ...).
    pub embed_type: String,
    pub html: String,
    pub metadata: Map<String, Value>,
    pub caption: String,
}

impl EmbedCard {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            ..Default::default()
        }
    }
}

impl Default for EmbedCard {
    fn default() -> Self {
        Self {
            version: CARD_VERSION,
            url: String::new(),
            embed_type: String::new(),
            html: String::new(),
            metadata: Map::new(),
            caption: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn value_of(card: impl Into<Card>) -> Value {
        let card: Card = card.into();
        serde_json::to_value(card).unwrap()
    }

    #[test]
    fn button_defaults() {
        assert_eq!(
            value_of(ButtonCard::new("Subscribe Now", "#/portal/signup")),
            json!({
                "type": "button",
                "version": 1,
                "buttonText": "Subscribe Now",
                "alignment": "center",
                "buttonUrl": "#/portal/signup"
            })
        );
    }

    #[test]
    fn video_unset_dimensions_are_null() {
        let value = value_of(VideoCard::new("https://cdn.example.com/v.mp4"));
        assert_eq!(value["type"], "video");
        assert_eq!(value["width"], Value::Null);
        assert_eq!(value["height"], Value::Null);
        assert_eq!(value["caption"], "");
        assert_eq!(value["cardWidth"], "regular");
        assert_eq!(value["loop"], false);
    }

    #[test]
    fn product_defaults_and_button() {
        let value = value_of(ProductCard::new("Book").with_button("Buy", "https://shop"));
        assert_eq!(value["productStarRating"], 5);
        assert_eq!(value["productRatingEnabled"], false);
        assert_eq!(value["productButtonEnabled"], true);
        assert_eq!(value["productImageWidth"], Value::Null);
    }

    #[test]
    fn paywall_is_bare() {
        assert_eq!(
            value_of(PaywallCard::default()),
            json!({"type": "paywall", "version": 1})
        );
    }

    #[test]
    fn embed_and_file_defaults() {
        let embed = value_of(EmbedCard::new("https://youtu.be/x", "<iframe></iframe>"));
        assert_eq!(embed["metadata"], json!({}));
        assert_eq!(embed["caption"], "");

        let file = value_of(FileCard::new("https://cdn/x.pdf", "x.pdf"));
        assert_eq!(file["fileSize"], Value::Null);
        assert_eq!(file["fileTitle"], "");
    }

    #[test]
    fn card_to_node_and_back() {
        let card: Card = ToggleCard::new("FAQ", "<p>Answer</p>").into();
        let node = card.to_node().unwrap();
        assert_eq!(node.kind, "toggle");
        assert_eq!(node.kind, card.kind());
        assert_eq!(Card::from_node(&node).unwrap(), card);
    }

    #[test]
    fn partial_card_fills_defaults() {
        let node: Node =
            serde_json::from_value(json!({"type": "audio", "src": "a.mp3"})).unwrap();
        match Card::from_node(&node).unwrap() {
            Card::Audio(audio) => {
                assert_eq!(audio.src, "a.mp3");
                assert_eq!(audio.version, 1);
                assert_eq!(audio.title, "");
            }
            other => panic!("expected audio card, got {other:?}"),
        }
    }

    #[test]
    fn non_card_node_is_rejected() {
        let node = Node::new("paragraph");
        assert!(Card::from_node(&node).is_err());
    }
}
