//! The `{ "data": ... }` success envelope.
//!
//! Every successful JSON response nests its payload under a `data` key,
//! keeping it distinguishable from the `{ "error", "code" }` shape that
//! [`AppError`](crate::error::AppError) produces. Handlers construct
//! [`DataResponse`] directly; the envelope is never assembled by hand.

use serde::Serialize;

/// Standard `{ "data": T }` success envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_nests_payload_under_data() {
        let value = serde_json::to_value(DataResponse {
            data: vec![1, 2, 3],
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({ "data": [1, 2, 3] }));
    }
}
