/// Identifies one outgoing fetch so late responses to superseded requests can
/// be recognised and dropped.
pub type RequestId = u64;

/// Hands out strictly increasing request ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestCounter {
    last: RequestId,
}

impl RequestCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> RequestId {
        self.last += 1;
        self.last
    }
}
