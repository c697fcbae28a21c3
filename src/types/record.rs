use serde::Deserialize;

/// One synthetic browser fingerprint: the literal `User-Agent` header value
/// plus the navigator, screen and network attributes observed alongside it.
///
/// Records are plain values. The store they live in is loaded once and never
/// mutated, so a record reference stays valid for the store's lifetime.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAgentRecord {
    pub platform: String,
    pub vendor: String,
    /// The literal header value.
    pub user_agent: String,
    pub screen_width: u32,
    pub screen_height: u32,
    #[serde(default)]
    pub connection: Option<Connection>,
    /// Relative selection probability. Not normalized; absent in the source
    /// data means 0, which a weighted draw never picks but the uniform
    /// fallback still can.
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub oscpu: Option<String>,
    pub app_name: String,
    #[serde(default)]
    pub plugins_length: u32,
}

/// Network information attached to a record. Every field is optional; a
/// filter referencing an absent field treats the record as a non-match.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub effective_type: Option<String>,
    #[serde(default)]
    pub downlink: Option<f64>,
    #[serde(default)]
    pub rtt: Option<f64>,
    #[serde(default)]
    pub downlink_max: Option<f64>,
}
