use serde::Serialize;
use uuid::Uuid;

#[derive(Eq, PartialEq, Clone, Copy, Hash, Debug, Serialize)]
pub(crate) struct SessionId(pub(crate) Uuid);

impl SessionId {
    pub(crate) fn new() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl From<Uuid> for SessionId {
    fn from(uuid: Uuid) -> Self {
        SessionId(uuid)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
