use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AssignmentPayload {
    pub client_id: String,
    pub product_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_snake_case() {
        let payload: AssignmentPayload =
            serde_json::from_str(r#"{"client_id": "client1", "product_id": "p1"}"#).unwrap();
        assert_eq!(payload.client_id, "client1");
        assert_eq!(payload.product_id, "p1");
    }
}
