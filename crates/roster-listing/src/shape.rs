use crate::error::{ListError, Result};
use crate::page::Page;
use crate::pagination;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a listing response keeps its items and totals.
///
/// Paths are dot-separated (`meta.total`). A body that is a bare JSON array
/// is taken as the item list. Missing totals are derived from what arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseShape {
    pub items: String,
    pub total: String,
    pub total_pages: String,
}

impl Default for ResponseShape {
    fn default() -> Self {
        Self {
            items: "data".into(),
            total: "total".into(),
            total_pages: "totalPages".into(),
        }
    }
}

fn pointer(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    path.split('.')
        .map(|segment| segment.replace('~', "~0").replace('/', "~1"))
        .fold(String::new(), |mut acc, segment| {
            acc.push('/');
            acc.push_str(&segment);
            acc
        })
}

fn count(body: &Value, path: &str) -> Option<usize> {
    body.pointer(&pointer(path))
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
}

impl ResponseShape {
    /// Decode a response body for the page that was requested.
    pub fn decode<T: DeserializeOwned>(
        &self,
        mut body: Value,
        page: usize,
        page_size: usize,
    ) -> Result<Page<T>> {
        let page_size = page_size.max(1);
        let total = count(&body, &self.total);
        let total_pages = count(&body, &self.total_pages);

        let raw_items = if body.is_array() {
            body.take()
        } else {
            body.pointer_mut(&pointer(&self.items))
                .map(Value::take)
                .ok_or_else(|| ListError::Decode(format!("missing `{}` in response", self.items)))?
        };
        let items: Vec<T> = serde_json::from_value(raw_items)?;

        let total_items =
            total.unwrap_or_else(|| page.saturating_sub(1) * page_size + items.len());
        let total_pages = total_pages
            .unwrap_or_else(|| pagination::total_pages(total_items, page_size))
            .max(1);

        Ok(Page {
            items,
            total_items,
            page,
            page_size,
            total_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u32,
    }

    #[test]
    fn default_envelope() {
        let body = json!({ "data": [{ "id": 1 }, { "id": 2 }], "total": 42, "totalPages": 5 });
        let page: Page<Row> = ResponseShape::default().decode(body, 2, 10).unwrap();
        assert_eq!(page.items, vec![Row { id: 1 }, Row { id: 2 }]);
        assert_eq!(page.total_items, 42);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.page, 2);
    }

    #[test]
    fn nested_paths() {
        let shape = ResponseShape {
            items: "result.rows".into(),
            total: "result.meta.count".into(),
            total_pages: "result.meta.pages".into(),
        };
        let body = json!({ "result": { "rows": [{ "id": 7 }], "meta": { "count": 11 } } });
        let page: Page<Row> = shape.decode(body, 1, 10).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_items, 11);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn bare_array_without_totals() {
        let body = json!([{ "id": 1 }, { "id": 2 }, { "id": 3 }]);
        let page: Page<Row> = ResponseShape::default().decode(body, 3, 10).unwrap();
        assert_eq!(page.total_items, 23);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn missing_items_is_decode_error() {
        let body = json!({ "rows": [] });
        let err = ResponseShape::default().decode::<Row>(body, 1, 10).unwrap_err();
        assert!(matches!(err, ListError::Decode(_)));
    }

    #[test]
    fn wrong_item_type_is_decode_error() {
        let body = json!({ "data": [{ "name": "x" }] });
        let err = ResponseShape::default().decode::<Row>(body, 1, 10).unwrap_err();
        assert!(matches!(err, ListError::Decode(_)));
    }

    #[test]
    fn dot_paths_become_pointers() {
        assert_eq!(pointer("data"), "/data");
        assert_eq!(pointer("meta.total"), "/meta/total");
        assert_eq!(pointer(""), "");
    }
}
