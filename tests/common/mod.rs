//! Shared test support: an in-memory transport and wire fixtures.
#![allow(dead_code)]

use notion_typed::{ApiRequest, ApiResponse, AppError, Transport};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays canned responses in order and records every request it sees.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        self.respond_raw(status, body.to_string())
    }

    pub fn respond_raw(self, status: u16, body: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(ApiResponse {
            status,
            data: body.into().into_bytes(),
            url: "https://api.notion.com/mock".to_string(),
        });
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AppError> {
        self.requests.lock().unwrap().push(request);
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("MockTransport ran out of canned responses");
        Ok(response)
    }
}

pub fn text_span(content: &str) -> Value {
    json!({
        "type": "text",
        "text": {"content": content, "link": null},
        "plain_text": content,
        "href": null,
        "annotations": {
            "bold": false, "italic": false, "strikethrough": false,
            "underline": false, "code": false, "color": "default"
        }
    })
}

pub fn paragraph_block(id: &str, content: &str) -> Value {
    json!({
        "object": "block",
        "id": id,
        "created_time": "2021-05-13T16:48:00.000Z",
        "last_edited_time": "2021-05-13T16:48:00.000Z",
        "has_children": false,
        "type": "paragraph",
        "paragraph": {"text": [text_span(content)]}
    })
}

pub fn database(id: &str, title: &str) -> Value {
    json!({
        "object": "database",
        "id": id,
        "created_time": "2021-05-13T16:48:00.000Z",
        "last_edited_time": "2021-05-13T16:48:00.000Z",
        "title": [text_span(title)],
        "properties": {
            "Name": {"id": "title", "type": "title", "title": {}},
            "In stock": {"id": "{>U;", "type": "checkbox", "checkbox": {}},
            "Price": {"id": "BJXS", "type": "number", "number": {"format": "dollar"}}
        }
    })
}

pub fn page(id: &str, name: &str, in_stock: bool) -> Value {
    json!({
        "object": "page",
        "id": id,
        "created_time": "2021-05-13T16:48:00.000Z",
        "last_edited_time": "2021-05-13T16:48:00.000Z",
        "parent": {"type": "database_id", "database_id": "897e5a76-ae52-4b48-9fdf-e71f5945d1af"},
        "archived": false,
        "url": "https://www.notion.so/page",
        "properties": {
            "Name": {"id": "title", "type": "title", "title": [text_span(name)]},
            "In stock": {"id": "{>U;", "type": "checkbox", "checkbox": in_stock}
        }
    })
}

pub fn list(results: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "object": "list",
        "results": results,
        "has_more": next_cursor.is_some(),
        "next_cursor": next_cursor
    })
}

pub fn error_body(status: u16, code: &str, message: &str) -> Value {
    json!({"object": "error", "status": status, "code": code, "message": message})
}
