// =============================================================================
// Shared types used across the Meridian direction scanner
// =============================================================================

use serde::{Deserialize, Serialize};

/// Inbound webhook payload carrying one set of indicator readings for a
/// symbol. `corr` is optional on the wire and defaults to 0 when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorPayload {
    pub symbol: String,
    pub price: f64,
    /// Opaque timestamp string from the alert source, passed through as-is.
    pub time: String,
    pub trend: f64,
    pub momentum: f64,
    pub vola: f64,
    #[serde(default)]
    pub corr: f64,
}

/// Latest computed state for a symbol. Replaced wholesale on every update;
/// there is no deletion path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolState {
    /// Upper-cased symbol identifier.
    pub symbol: String,
    pub price: f64,
    pub time: String,
    pub trend: f64,
    pub momentum: f64,
    pub vola: f64,
    /// Clamped `corr` input, served under its storage name.
    pub flow: f64,
    /// Sum of the four clamped indicators, in [-400, 400].
    pub score: f64,
    pub tag: DirectionTag,
    pub strength: Strength,
    pub velocity: f64,
}

/// Directional read of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectionTag {
    #[serde(rename = "STRONG UP")]
    StrongUp,
    #[serde(rename = "UP BIAS")]
    UpBias,
    #[serde(rename = "CHOP")]
    Chop,
    #[serde(rename = "DOWN BIAS")]
    DownBias,
    #[serde(rename = "STRONG DOWN")]
    StrongDown,
}

impl Default for DirectionTag {
    fn default() -> Self {
        Self::Chop
    }
}

impl std::fmt::Display for DirectionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrongUp => write!(f, "STRONG UP"),
            Self::UpBias => write!(f, "UP BIAS"),
            Self::Chop => write!(f, "CHOP"),
            Self::DownBias => write!(f, "DOWN BIAS"),
            Self::StrongDown => write!(f, "STRONG DOWN"),
        }
    }
}

/// Magnitude tier of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    #[serde(rename = "EXTREME")]
    Extreme,
    #[serde(rename = "STRONG")]
    Strong,
    #[serde(rename = "MODERATE")]
    Moderate,
    #[serde(rename = "WEAK")]
    Weak,
    #[serde(rename = "NONE")]
    None,
}

impl Default for Strength {
    fn default() -> Self {
        Self::None
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extreme => write!(f, "EXTREME"),
            Self::Strong => write!(f, "STRONG"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::Weak => write!(f, "WEAK"),
            Self::None => write!(f, "NONE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_corr_defaults_to_zero() {
        let json = r#"{
            "symbol": "btcusdt",
            "price": 64250.5,
            "time": "2024-11-02T14:30:00Z",
            "trend": 80.0,
            "momentum": 55.0,
            "vola": -10.0
        }"#;
        let payload: IndicatorPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.symbol, "btcusdt");
        assert_eq!(payload.corr, 0.0);
    }

    #[test]
    fn enums_serialize_to_wire_strings() {
        assert_eq!(
            serde_json::to_string(&DirectionTag::StrongUp).unwrap(),
            r#""STRONG UP""#
        );
        assert_eq!(
            serde_json::to_string(&DirectionTag::DownBias).unwrap(),
            r#""DOWN BIAS""#
        );
        assert_eq!(
            serde_json::to_string(&Strength::Extreme).unwrap(),
            r#""EXTREME""#
        );
        assert_eq!(serde_json::to_string(&Strength::None).unwrap(), r#""NONE""#);
    }

    #[test]
    fn enum_display_matches_wire_strings() {
        assert_eq!(DirectionTag::UpBias.to_string(), "UP BIAS");
        assert_eq!(Strength::Moderate.to_string(), "MODERATE");
    }
}
