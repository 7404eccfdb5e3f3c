use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Generic `{ "success": bool }` acknowledgement returned by delete endpoints.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
