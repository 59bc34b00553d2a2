use itunes_catalog::CatalogItem;
use search_session::SearchState;
use serde::Serialize;

pub(crate) const NOTHING_FOUND: &str = "(Nothing found)";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ViewStatus {
    Idle,
    Loading,
    Populated,
    Empty,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ResultRow {
    pub(crate) name: String,
    pub(crate) artist: String,
    #[serde(rename = "type")]
    pub(crate) type_label: String,
    pub(crate) price: f64,
    pub(crate) currency: String,
    pub(crate) genre: String,
    pub(crate) store_url: String,
    pub(crate) image_small: String,
    pub(crate) image_large: String,
    pub(crate) selectable: bool,
}

impl ResultRow {
    fn nothing_found() -> Self {
        Self {
            name: NOTHING_FOUND.to_string(),
            artist: String::new(),
            type_label: String::new(),
            price: 0.0,
            currency: String::new(),
            genre: String::new(),
            store_url: String::new(),
            image_small: String::new(),
            image_large: String::new(),
            selectable: false,
        }
    }
}

impl From<&CatalogItem> for ResultRow {
    fn from(item: &CatalogItem) -> Self {
        Self {
            name: item.name().to_string(),
            artist: item.artist().to_string(),
            type_label: item.type_label().to_string(),
            price: item.price(),
            currency: item.currency().to_string(),
            genre: item.genre(),
            store_url: item.store_url().to_string(),
            image_small: item.image_small().to_string(),
            image_large: item.image_large().to_string(),
            selectable: true,
        }
    }
}

/// What a search surface renders for the current state of its session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct SessionView {
    pub(crate) status: ViewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) query: Option<String>,
    pub(crate) rows: Vec<ResultRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<&'static str>,
}

impl From<&SearchState> for SessionView {
    fn from(state: &SearchState) -> Self {
        let query = state.query().map(ToString::to_string);

        match state {
            SearchState::Idle => Self {
                status: ViewStatus::Idle,
                query,
                rows: vec![],
                message: None,
            },
            SearchState::Loading { .. } => Self {
                status: ViewStatus::Loading,
                query,
                rows: vec![],
                message: None,
            },
            SearchState::Populated { items, .. } if items.is_empty() => Self {
                status: ViewStatus::Empty,
                query,
                rows: vec![ResultRow::nothing_found()],
                message: None,
            },
            SearchState::Populated { items, .. } => Self {
                status: ViewStatus::Populated,
                query,
                rows: items.iter().map(ResultRow::from).collect(),
                message: None,
            },
            SearchState::Failed { reason, .. } => Self {
                status: ViewStatus::Failed,
                query,
                rows: vec![],
                message: Some(reason.user_message()),
            },
        }
    }
}
