use crate::state::ListState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Names of the query-string parameters a listing endpoint expects.
///
/// Filter keys map to themselves unless renamed with
/// [`filter`](QueryParams::filter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    pub page: String,
    pub limit: String,
    pub search: String,
    pub filters: BTreeMap<String, String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: "page".into(),
            limit: "limit".into(),
            search: "search".into(),
            filters: BTreeMap::new(),
        }
    }
}

impl QueryParams {
    /// Send filter `key` under the parameter name `param`.
    pub fn filter(mut self, key: impl Into<String>, param: impl Into<String>) -> Self {
        self.filters.insert(key.into(), param.into());
        self
    }

    fn filter_param<'a>(&'a self, key: &'a str) -> &'a str {
        self.filters.get(key).map_or(key, String::as_str)
    }

    /// Query pairs for `state`. An empty search is omitted, as is every
    /// filter that is not set.
    pub fn encode(&self, state: &ListState) -> Vec<(String, String)> {
        let mut pairs = vec![
            (self.page.clone(), state.page().to_string()),
            (self.limit.clone(), state.page_size().to_string()),
        ];
        if !state.search().is_empty() {
            pairs.push((self.search.clone(), state.search().to_owned()));
        }
        for (key, value) in state.filters() {
            pairs.push((self.filter_param(key).to_owned(), value.clone()));
        }
        pairs
    }
}
