// ABOUTME: Abstraction over the external image index queried by tag search
// ABOUTME: Lets the search operation run against Cloudinary or any stand-in index

use async_trait::async_trait;

use crate::constants::search;
use crate::error::IndexError;
use crate::types::SearchResponse;

/// Anything that can answer a Cloudinary-style search expression
#[async_trait]
pub trait ImageIndex: Send + Sync {
    async fn search(&self, expression: &str) -> Result<SearchResponse, IndexError>;
}

/// `resource_type:image AND tags=<tag>`, quoting the tag when it would not
/// survive as a bare token.
pub fn tag_expression(tag: &str) -> String {
    format!(
        "resource_type:{} AND tags={}",
        search::RESOURCE_TYPE,
        quote_value(tag)
    )
}

fn quote_value(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | ':' | '(' | ')' | '=' | '<' | '>'));

    if !needs_quotes {
        return value.to_string();
    }

    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
