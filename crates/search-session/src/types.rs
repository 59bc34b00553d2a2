use itunes_catalog::CatalogItem;

pub const GENERIC_FAILURE_MESSAGE: &str = "Could not complete the search. Please try again.";

/// Sequence number of a submitted query within one session.
///
/// Zero means nothing has been submitted yet.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug, Default)]
pub struct RequestToken(pub(crate) u64);

impl std::ops::Deref for RequestToken {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum FailureReason {
    NetworkError,
    ParseError,
}

impl FailureReason {
    /// Message shown to the user. It is the same for every failure kind.
    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::NetworkError => write!(f, "NetworkError"),
            FailureReason::ParseError => write!(f, "ParseError"),
        }
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading {
        query: String,
    },
    Populated {
        query: String,
        items: Vec<CatalogItem>,
    },
    Failed {
        query: String,
        reason: FailureReason,
    },
}

impl SearchState {
    pub fn query(&self) -> Option<&str> {
        match self {
            SearchState::Idle => None,
            SearchState::Loading { query }
            | SearchState::Populated { query, .. }
            | SearchState::Failed { query, .. } => Some(query),
        }
    }

    pub fn items(&self) -> &[CatalogItem] {
        match self {
            SearchState::Populated { items, .. } => items,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading { .. })
    }

    /// Whether a search finished without any matches.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, SearchState::Populated { items, .. } if items.is_empty())
    }
}
