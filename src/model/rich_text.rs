use super::Mention;
use crate::codec::{wire_serde, Discriminated, Envelope, Family, Registry, WireObject};
use crate::error::{DecodeError, EncodeError};
use crate::types::Color;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rich text item with formatting annotations.
///
/// The `text_type` field carries the content variant (text, mention, or
/// equation); `plain_text` and `href` are filled in by the API on reads and
/// may be left empty when writing.
#[derive(Debug, Clone, PartialEq)]
pub struct RichTextItem {
    pub text_type: RichTextType,
    pub annotations: Option<Annotations>,
    pub plain_text: Option<String>,
    pub href: Option<String>,
}

/// The kind of rich text content.
#[derive(Debug, Clone, PartialEq)]
pub enum RichTextType {
    Text(TextContent),
    Mention(Mention),
    Equation(EquationData),
}

impl RichTextType {
    pub fn type_name(&self) -> &'static str {
        match self {
            RichTextType::Text(_) => "text",
            RichTextType::Mention(_) => "mention",
            RichTextType::Equation(_) => "equation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationData {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

impl RichTextItem {
    /// A bare text span, the usual shape for write requests:
    /// ```ignore
    /// RichTextItem::text("Lacinato kale")
    /// ```
    pub fn text(content: impl Into<String>) -> Self {
        Self::from_type(RichTextType::Text(TextContent {
            content: content.into(),
            link: None,
        }))
    }

    /// A text span pointing at `url`.
    pub fn link(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self::from_type(RichTextType::Text(TextContent {
            content: content.into(),
            link: Some(Link { url: url.into() }),
        }))
    }

    pub fn equation(expression: impl Into<String>) -> Self {
        Self::from_type(RichTextType::Equation(EquationData {
            expression: expression.into(),
        }))
    }

    pub fn mention(mention: Mention) -> Self {
        Self::from_type(RichTextType::Mention(mention))
    }

    fn from_type(text_type: RichTextType) -> Self {
        Self {
            text_type,
            annotations: None,
            plain_text: None,
            href: None,
        }
    }

    /// The readable text of the span: `plain_text` when the API supplied
    /// it, otherwise whatever the payload itself carries.
    pub fn as_plain_text(&self) -> &str {
        if let Some(plain_text) = &self.plain_text {
            return plain_text;
        }
        match &self.text_type {
            RichTextType::Text(text) => &text.content,
            RichTextType::Equation(equation) => &equation.expression,
            RichTextType::Mention(_) => "",
        }
    }

    fn materialize(env: &Envelope<'_>, text_type: RichTextType) -> Result<Self, DecodeError> {
        let fields = env.fields();
        Ok(Self {
            text_type,
            annotations: fields.optional("annotations")?,
            plain_text: fields.optional("plain_text")?,
            href: fields.optional("href")?,
        })
    }
}

/// Concatenated plain text of a rich text list.
pub fn plain_text(items: &[RichTextItem]) -> String {
    items.iter().map(RichTextItem::as_plain_text).collect()
}

static REGISTRY: Lazy<Registry<RichTextItem>> = Lazy::new(|| {
    Registry::new(Family::RichText)
        .with("text", |env| {
            RichTextItem::materialize(env, RichTextType::Text(env.value()?))
        })
        .with("mention", |env| {
            RichTextItem::materialize(env, RichTextType::Mention(env.nested()?))
        })
        .with("equation", |env| {
            RichTextItem::materialize(env, RichTextType::Equation(env.value()?))
        })
});

impl Discriminated for RichTextItem {
    fn registry() -> &'static Registry<Self> {
        &REGISTRY
    }

    fn tag(&self) -> &str {
        self.text_type.type_name()
    }

    fn encode(&self) -> Result<Value, EncodeError> {
        let wire = WireObject::tagged(Self::TAG_FIELD, self.tag())
            .optional("plain_text", self.plain_text.as_ref())?
            .optional("href", self.href.as_ref())?
            .optional("annotations", self.annotations.as_ref())?;
        let wire = match &self.text_type {
            RichTextType::Text(text) => wire.field("text", text)?,
            RichTextType::Mention(mention) => wire.field("mention", mention)?,
            RichTextType::Equation(equation) => wire.field("equation", equation)?,
        };
        Ok(wire.build())
    }
}

wire_serde!(RichTextItem);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn decodes_annotated_link() {
        let raw = json!({
            "type": "text",
            "text": {"content": "Lacinato kale", "link": {"url": "https://en.wikipedia.org/wiki/Lacinato_kale"}},
            "annotations": {"bold": true, "italic": false, "strikethrough": false, "underline": false, "code": false, "color": "green"},
            "plain_text": "Lacinato kale",
            "href": "https://en.wikipedia.org/wiki/Lacinato_kale"
        });

        let item: RichTextItem = decode(&raw).unwrap();
        let annotations = item.annotations.clone().unwrap();
        assert!(annotations.bold);
        assert_eq!(annotations.color, Color::Green);
        assert_eq!(item.as_plain_text(), "Lacinato kale");
        match &item.text_type {
            RichTextType::Text(text) => assert_eq!(
                text.link.as_ref().map(|link| link.url.as_str()),
                Some("https://en.wikipedia.org/wiki/Lacinato_kale")
            ),
            other => panic!("expected text, got {other:?}"),
        }

        assert_eq!(decode::<RichTextItem>(&encode(&item).unwrap()).unwrap(), item);
    }

    #[test]
    fn write_side_span_encodes_minimally() {
        let wire = encode(&RichTextItem::text("Lacinato kale")).unwrap();
        assert_eq!(
            wire,
            json!({"type": "text", "text": {"content": "Lacinato kale"}})
        );
    }

    #[test]
    fn equation_round_trips() {
        let item = RichTextItem::equation("e=mc^2");
        let wire = encode(&item).unwrap();
        assert_eq!(wire, json!({"type": "equation", "equation": {"expression": "e=mc^2"}}));
        assert_eq!(decode::<RichTextItem>(&wire).unwrap(), item);
    }

    #[test]
    fn unknown_span_type_is_an_error() {
        let err = decode::<RichTextItem>(&json!({"type": "sparkle", "sparkle": {}})).unwrap_err();
        assert!(err.is_unknown_type());
    }

    #[test]
    fn plain_text_concatenates_spans() {
        let items = vec![RichTextItem::text("Lacinato "), RichTextItem::text("kale")];
        assert_eq!(plain_text(&items), "Lacinato kale");
    }
}
