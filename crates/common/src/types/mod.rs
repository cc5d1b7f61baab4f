use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Success envelope shared by every API response: `{"success": true, "data": ...}`.
#[derive(Serialize, Deserialize, Debug)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Success envelope carrying a collection plus its length.
#[derive(Serialize, Deserialize, Debug)]
pub struct CountedEnvelope<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> CountedEnvelope<T> {
    pub fn ok(data: Vec<T>) -> Self {
        Self { success: true, count: data.len(), data }
    }
}

/// Error envelope: `{"success": false, "error": "..."}`.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { success: false, error: error.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_success_flag() {
        let v = serde_json::to_value(Envelope::ok(42)).unwrap();
        assert_eq!(v["success"], true);
        assert_eq!(v["data"], 42);
    }

    #[test]
    fn counted_envelope_reports_len() {
        let v = serde_json::to_value(CountedEnvelope::ok(vec!["a", "b"])).unwrap();
        assert_eq!(v["count"], 2);
    }
}
