use super::common::BlockCommon;
use super::rich_text::{plain_text, RichTextItem};
use crate::codec::{wire_serde, Discriminated, Envelope, Family, Fields, Registry, WireObject};
use crate::error::{DecodeError, EncodeError};
use crate::types::BlockId;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// Block represents all Notion block types this client can read and write.
///
/// Any other block type decodes to [`Block::Unsupported`], which keeps the
/// original type name and payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(TextBlock),
    Heading1(TextBlock),
    Heading2(TextBlock),
    Heading3(TextBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    ToDo(ToDoBlock),
    Toggle(TextBlock),
    ChildPage(ChildPageBlock),
    Unsupported(UnsupportedBlock),
}

/// Text run plus nested children, the payload of every text-bearing block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlockContent {
    pub text: Vec<RichTextItem>,
    pub children: Vec<Block>,
}

impl TextBlockContent {
    fn from_fields(payload: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            text: payload.list("text")?,
            children: payload.list_or_empty("children")?,
        })
    }

    fn to_payload(&self) -> Result<WireObject, EncodeError> {
        WireObject::new()
            .field("text", &self.text)?
            .non_empty("children", &self.children)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

impl TextBlock {
    fn materialize(env: &Envelope<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            common: env.shared()?,
            content: TextBlockContent::from_fields(&env.payload()?)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChildPageBlock {
    pub common: BlockCommon,
    pub title: String,
}

/// A block type with no typed variant.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    /// The wire `type`, e.g. `"unsupported"` or `"image"`.
    pub block_type: String,
    /// Payload stored under the type key, if the key was present. A
    /// present `null` is kept as `Some(Value::Null)`.
    pub payload: Option<Value>,
}

impl Block {
    pub fn paragraph(text: Vec<RichTextItem>) -> Self {
        Block::Paragraph(TextBlock::from_text(text))
    }

    /// Heading of the given level; levels outside 1..=3 clamp to the nearest one.
    pub fn heading(level: u8, text: Vec<RichTextItem>) -> Self {
        let block = TextBlock::from_text(text);
        match level {
            0 | 1 => Block::Heading1(block),
            2 => Block::Heading2(block),
            _ => Block::Heading3(block),
        }
    }

    pub fn bulleted_list_item(text: Vec<RichTextItem>) -> Self {
        Block::BulletedListItem(TextBlock::from_text(text))
    }

    pub fn numbered_list_item(text: Vec<RichTextItem>) -> Self {
        Block::NumberedListItem(TextBlock::from_text(text))
    }

    pub fn to_do(text: Vec<RichTextItem>, checked: bool) -> Self {
        Block::ToDo(ToDoBlock {
            common: BlockCommon::default(),
            content: TextBlockContent {
                text,
                children: Vec::new(),
            },
            checked,
        })
    }

    pub fn toggle(text: Vec<RichTextItem>) -> Self {
        Block::Toggle(TextBlock::from_text(text))
    }

    /// Replaces the nested children of a text-bearing block. Blocks that
    /// cannot hold children are returned unchanged.
    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        if let Some(content) = self.content_mut() {
            content.children = children;
        }
        self
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Get the block's ID; `None` for blocks built locally for a write.
    pub fn id(&self) -> Option<&BlockId> {
        self.common().id.as_ref()
    }

    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Get block type name
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::ChildPage(_) => "child_page",
            Block::Unsupported(b) => &b.block_type,
        }
    }

    pub fn content(&self) -> Option<&TextBlockContent> {
        match self {
            Block::Paragraph(b)
            | Block::Heading1(b)
            | Block::Heading2(b)
            | Block::Heading3(b)
            | Block::BulletedListItem(b)
            | Block::NumberedListItem(b)
            | Block::Toggle(b) => Some(&b.content),
            Block::ToDo(b) => Some(&b.content),
            Block::ChildPage(_) | Block::Unsupported(_) => None,
        }
    }

    fn content_mut(&mut self) -> Option<&mut TextBlockContent> {
        match self {
            Block::Paragraph(b)
            | Block::Heading1(b)
            | Block::Heading2(b)
            | Block::Heading3(b)
            | Block::BulletedListItem(b)
            | Block::NumberedListItem(b)
            | Block::Toggle(b) => Some(&mut b.content),
            Block::ToDo(b) => Some(&mut b.content),
            Block::ChildPage(_) | Block::Unsupported(_) => None,
        }
    }

    /// Nested children carried inline in the payload.
    pub fn children(&self) -> &[Block] {
        self.content()
            .map(|content| content.children.as_slice())
            .unwrap_or(&[])
    }

    /// Plain text of the block's text run, or the title of a child page.
    pub fn plain_text(&self) -> String {
        match self {
            Block::ChildPage(b) => b.title.clone(),
            _ => self
                .content()
                .map(|content| plain_text(&content.text))
                .unwrap_or_default(),
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Block::Unsupported(_))
    }

    /// First unsupported block in this block or any of its descendants.
    pub fn find_unsupported(&self) -> Option<&UnsupportedBlock> {
        match self {
            Block::Unsupported(b) => Some(b),
            _ => self.children().iter().find_map(Block::find_unsupported),
        }
    }
}

impl TextBlock {
    fn from_text(text: Vec<RichTextItem>) -> Self {
        Self {
            common: BlockCommon::default(),
            content: TextBlockContent {
                text,
                children: Vec::new(),
            },
        }
    }
}

fn unsupported(env: &Envelope<'_>) -> Result<Block, DecodeError> {
    Ok(Block::Unsupported(UnsupportedBlock {
        common: env.shared()?,
        block_type: env.tag().to_string(),
        payload: if env.fields().contains(env.tag()) {
            Some(env.value()?)
        } else {
            None
        },
    }))
}

static REGISTRY: Lazy<Registry<Block>> = Lazy::new(|| {
    Registry::new(Family::Block)
        .with("paragraph", |env| Ok(Block::Paragraph(TextBlock::materialize(env)?)))
        .with("heading_1", |env| Ok(Block::Heading1(TextBlock::materialize(env)?)))
        .with("heading_2", |env| Ok(Block::Heading2(TextBlock::materialize(env)?)))
        .with("heading_3", |env| Ok(Block::Heading3(TextBlock::materialize(env)?)))
        .with("bulleted_list_item", |env| {
            Ok(Block::BulletedListItem(TextBlock::materialize(env)?))
        })
        .with("numbered_list_item", |env| {
            Ok(Block::NumberedListItem(TextBlock::materialize(env)?))
        })
        .with("to_do", |env| {
            let payload = env.payload()?;
            Ok(Block::ToDo(ToDoBlock {
                common: env.shared()?,
                content: TextBlockContent::from_fields(&payload)?,
                checked: payload.optional("checked")?.unwrap_or(false),
            }))
        })
        .with("toggle", |env| Ok(Block::Toggle(TextBlock::materialize(env)?)))
        .with("child_page", |env| {
            Ok(Block::ChildPage(ChildPageBlock {
                common: env.shared()?,
                title: env.payload()?.get("title")?,
            }))
        })
        .with("unsupported", unsupported)
        .with_fallback(unsupported)
});

impl Discriminated for Block {
    fn registry() -> &'static Registry<Self> {
        &REGISTRY
    }

    fn tag(&self) -> &str {
        self.block_type()
    }

    fn encode(&self) -> Result<Value, EncodeError> {
        let tag = self.block_type();
        let wire = WireObject::tagged(Self::TAG_FIELD, tag)
            .value("object", json!("block"))
            .shared(self.common())?;
        let wire = match self {
            Block::Paragraph(b)
            | Block::Heading1(b)
            | Block::Heading2(b)
            | Block::Heading3(b)
            | Block::BulletedListItem(b)
            | Block::NumberedListItem(b)
            | Block::Toggle(b) => wire.value(tag, b.content.to_payload()?.build()),
            Block::ToDo(b) => {
                let payload = b.content.to_payload()?.field("checked", &b.checked)?;
                wire.value(tag, payload.build())
            }
            Block::ChildPage(b) => wire.value(tag, json!({ "title": b.title })),
            Block::Unsupported(b) => match &b.payload {
                Some(payload) => wire.value(tag, payload.clone()),
                None => wire,
            },
        };
        Ok(wire.build())
    }
}

wire_serde!(Block);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_heading_2() {
        let raw = json!({
            "type": "heading_2",
            "heading_2": {"text": [{"type": "text", "text": {"content": "Lacinato kale"}}]}
        });

        let block: Block = decode(&raw).unwrap();
        assert!(matches!(block, Block::Heading2(_)));
        assert_eq!(block.plain_text(), "Lacinato kale");
        assert!(block.id().is_none());
    }

    #[test]
    fn to_do_reads_checked() {
        let raw = json!({
            "object": "block",
            "id": "a2a4e3b1-1b1c-4b8c-9c4c-3f1d1e2b6a01",
            "type": "to_do",
            "to_do": {"text": [], "checked": true}
        });

        match decode::<Block>(&raw).unwrap() {
            Block::ToDo(todo) => {
                assert!(todo.checked);
                assert_eq!(
                    todo.common.id.unwrap().as_str(),
                    "a2a4e3b1-1b1c-4b8c-9c4c-3f1d1e2b6a01"
                );
            }
            other => panic!("expected to_do, got {other:?}"),
        }
    }

    #[test]
    fn unknown_type_becomes_unsupported() {
        let raw = json!({
            "object": "block",
            "id": "5e1b3b1c-7e0a-4b0e-8a4f-2f6b2c9b3d10",
            "type": "image",
            "has_children": false,
            "image": {"type": "external", "external": {"url": "https://example.org/kale.png"}}
        });

        let block: Block = decode(&raw).unwrap();
        assert!(block.is_unsupported());
        assert_eq!(block.block_type(), "image");

        let wire = encode(&block).unwrap();
        assert_eq!(wire["type"], json!("image"));
        assert_eq!(wire["image"], raw["image"]);
    }

    #[test]
    fn null_and_missing_unsupported_payloads_stay_distinct() {
        let with_null = Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::default(),
            block_type: "image".to_string(),
            payload: Some(Value::Null),
        });
        let wire = encode(&with_null).unwrap();
        assert_eq!(wire["image"], Value::Null);
        assert_eq!(decode::<Block>(&wire).unwrap(), with_null);

        let without = decode::<Block>(&json!({"type": "image"})).unwrap();
        match &without {
            Block::Unsupported(b) => assert_eq!(b.payload, None),
            other => panic!("expected unsupported, got {other:?}"),
        }
        assert_eq!(decode::<Block>(&encode(&without).unwrap()).unwrap(), without);
    }

    #[test]
    fn fallback_materializes_unknown_types() {
        let fallback = Block::registry().fallback().unwrap();
        let raw = json!({"type": "table", "table": {"table_width": 2}});
        let env = Envelope::peek(&raw, Family::Block, "type").unwrap();
        let block = fallback(&env).unwrap();
        assert_eq!(block.block_type(), "table");
        assert!(block.is_unsupported());
    }

    #[test]
    fn explicit_unsupported_type_is_registered() {
        let block: Block =
            decode(&json!({"type": "unsupported", "unsupported": {}})).unwrap();
        assert_eq!(block.block_type(), "unsupported");
        assert!(Block::registry().contains("unsupported"));
    }

    #[test]
    fn write_side_paragraph_encodes_minimally() {
        let block = Block::paragraph(vec![RichTextItem::text("You made this page using the Notion API.")]);
        assert_eq!(
            encode(&block).unwrap(),
            json!({
                "type": "paragraph",
                "object": "block",
                "paragraph": {
                    "text": [{"type": "text", "text": {"content": "You made this page using the Notion API."}}]
                }
            })
        );
    }

    #[test]
    fn heading_levels_clamp() {
        assert_eq!(Block::heading(1, vec![]).block_type(), "heading_1");
        assert_eq!(Block::heading(2, vec![]).block_type(), "heading_2");
        assert_eq!(Block::heading(9, vec![]).block_type(), "heading_3");
    }

    #[test]
    fn finds_nested_unsupported_block() {
        let raw = json!({"type": "embed", "embed": {"url": "https://example.org"}});
        let nested: Block = decode(&raw).unwrap();
        let tree = Block::toggle(vec![RichTextItem::text("outer")])
            .with_children(vec![Block::paragraph(vec![]).with_children(vec![nested])]);

        let found = tree.find_unsupported().unwrap();
        assert_eq!(found.block_type, "embed");
        assert!(Block::paragraph(vec![]).find_unsupported().is_none());
    }

    #[test]
    fn child_page_round_trips() {
        let raw = json!({
            "object": "block",
            "id": "3a7f7c4e-8f1e-4d8b-a3d5-1c0a5f1f2e33",
            "type": "child_page",
            "has_children": true,
            "child_page": {"title": "Lacinato kale"}
        });

        let block: Block = decode(&raw).unwrap();
        assert_eq!(block.plain_text(), "Lacinato kale");
        assert!(block.has_children());
        assert_eq!(encode(&block).unwrap(), raw);
    }
}
