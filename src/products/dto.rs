use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub category: String,
    pub unit: String,
    #[serde(default)]
    pub image: Option<String>,
}
