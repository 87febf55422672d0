//! Decoding blocks off the wire: known kinds, nesting, and unknown kinds.

mod common;

use common::{paragraph_block, text_span};
use notion_typed::codec::{decode, encode};
use notion_typed::model::{Block, TextBlockContent};
use notion_typed::{DecodeError, Family, PaginatedList, WireFormat};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn heading_two_decodes_to_one_text_span() {
    let block: Block = decode(&json!({
        "type": "heading_2",
        "heading_2": {"text": [{"type": "text", "text": {"content": "Lacinato kale"}}]}
    }))
    .unwrap();

    match &block {
        Block::Heading2(heading) => {
            let TextBlockContent { text, children } = &heading.content;
            assert_eq!(text.len(), 1);
            assert_eq!(text[0].as_plain_text(), "Lacinato kale");
            assert!(children.is_empty());
        }
        other => panic!("expected heading_2, got {other:?}"),
    }
    assert_eq!(block.block_type(), "heading_2");
    assert!(block.id().is_none());
}

#[test]
fn unknown_block_type_becomes_unsupported() {
    let raw = json!({
        "object": "block",
        "id": "9bc30ad4-9373-46a5-84ab-0a7845ee52e6",
        "has_children": false,
        "type": "synced_block",
        "synced_block": {"synced_from": null}
    });

    let block: Block = decode(&raw).unwrap();
    assert!(block.is_unsupported());
    assert_eq!(block.block_type(), "synced_block");
    assert_eq!(
        block.id().map(|id| id.as_str()),
        Some("9bc30ad4-9373-46a5-84ab-0a7845ee52e6")
    );
    match &block {
        Block::Unsupported(unsupported) => {
            assert_eq!(unsupported.payload, Some(json!({"synced_from": null})));
        }
        other => panic!("expected unsupported, got {other:?}"),
    }

    // The original discriminant and payload survive a round trip.
    let encoded = encode(&block).unwrap();
    assert_eq!(encoded["type"], json!("synced_block"));
    assert_eq!(encoded["synced_block"], json!({"synced_from": null}));
}

#[test]
fn explicit_unsupported_type_is_registered() {
    let block: Block = decode(&json!({
        "object": "block",
        "id": "9bc30ad4-9373-46a5-84ab-0a7845ee52e6",
        "type": "unsupported"
    }))
    .unwrap();
    assert!(block.is_unsupported());
    assert_eq!(block.block_type(), "unsupported");
}

#[test]
fn children_decode_recursively() {
    let raw = json!({
        "object": "block",
        "id": "a1",
        "has_children": true,
        "type": "toggle",
        "toggle": {
            "text": [text_span("level 1")],
            "children": [{
                "object": "block",
                "id": "a2",
                "has_children": true,
                "type": "bulleted_list_item",
                "bulleted_list_item": {
                    "text": [text_span("level 2")],
                    "children": [{
                        "object": "block",
                        "id": "a3",
                        "type": "to_do",
                        "to_do": {"text": [text_span("level 3")], "checked": true}
                    }]
                }
            }]
        }
    });

    let block: Block = decode(&raw).unwrap();
    assert_eq!(block.plain_text(), "level 1");

    let second = &block.children()[0];
    assert_eq!(second.block_type(), "bulleted_list_item");
    assert_eq!(second.plain_text(), "level 2");

    let third = &second.children()[0];
    match third {
        Block::ToDo(to_do) => {
            assert!(to_do.checked);
            assert_eq!(third.plain_text(), "level 3");
        }
        other => panic!("expected to_do, got {other:?}"),
    }

    assert_eq!(decode::<Block>(&encode(&block).unwrap()).unwrap(), block);
}

#[test]
fn nested_unknown_blocks_are_found() {
    let raw = json!({
        "type": "paragraph",
        "paragraph": {
            "text": [],
            "children": [{"type": "embed", "embed": {"url": "https://example.com"}}]
        }
    });

    let block: Block = decode(&raw).unwrap();
    let unsupported = block.find_unsupported().unwrap();
    assert_eq!(unsupported.block_type, "embed");
}

#[test]
fn child_page_carries_its_title() {
    let block: Block = decode(&json!({
        "object": "block",
        "id": "c7d2b1a0-1111-2222-3333-444455556666",
        "has_children": true,
        "type": "child_page",
        "child_page": {"title": "Recipes"}
    }))
    .unwrap();

    assert_eq!(block.plain_text(), "Recipes");
    assert!(block.has_children());
    assert!(block.children().is_empty());
}

#[test]
fn missing_discriminant_is_malformed() {
    let err = decode::<Block>(&json!({"object": "block", "paragraph": {"text": []}})).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::MalformedEnvelope {
            family: Family::Block,
            ..
        }
    ));

    let err = decode::<Block>(&json!({"type": 7})).unwrap_err();
    assert!(matches!(err, DecodeError::MalformedEnvelope { .. }));
}

#[test]
fn malformed_payload_is_not_swallowed_by_fallback() {
    let err = decode::<Block>(&json!({
        "type": "paragraph",
        "paragraph": {"text": "not a list"}
    }))
    .unwrap_err();
    assert!(!err.is_unknown_type());
}

#[test]
fn block_list_keeps_wire_order() {
    let raw = json!({
        "object": "list",
        "results": [
            paragraph_block("b1", "first"),
            {"object": "block", "id": "b2", "type": "image", "image": {}},
            paragraph_block("b3", "third")
        ],
        "has_more": true,
        "next_cursor": "b3"
    });

    let list = PaginatedList::<Block>::from_wire(&raw).unwrap();
    let texts: Vec<String> = list.iter().map(Block::plain_text).collect();
    assert_eq!(texts, vec!["first", "", "third"]);
    assert!(list.results[1].is_unsupported());
    assert!(list.has_more);
    assert_eq!(list.next_cursor.as_deref(), Some("b3"));
}
