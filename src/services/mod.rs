mod search_service;
pub(crate) use search_service::*;
