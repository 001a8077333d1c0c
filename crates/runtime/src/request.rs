use economics::PowerProfile;
use serde::Serialize;

use crate::error::ScenarioError;

pub const DEFAULT_KWH_PRICE: f64 = 0.15;
pub const DEFAULT_WATTS: f64 = 3_200.0;
pub const DEFAULT_UPTIME_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "camelCase")]
pub enum MinedSource {
    Direct { amount: f64 },
    PoolAccount { token: String },
}

impl MinedSource {
    /// A non-blank pool token wins over a directly supplied amount.
    pub fn from_parts(
        pool_token: Option<String>,
        coin_mined: Option<f64>,
    ) -> Result<Self, ScenarioError> {
        match (pool_token, coin_mined) {
            (Some(token), _) if !token.trim().is_empty() => Ok(Self::PoolAccount { token }),
            (_, Some(amount)) => Ok(Self::Direct { amount }),
            _ => Err(ScenarioError::MissingMinedSource),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRequest {
    /// `MM/DD/YYYY`.
    pub start_date: String,
    pub power: PowerProfile,
    pub fixed_costs: f64,
    pub electric_costs: Option<f64>,
    pub mined: MinedSource,
}

impl Default for ScenarioRequest {
    fn default() -> Self {
        Self {
            start_date: String::new(),
            power: PowerProfile {
                kwh_price: DEFAULT_KWH_PRICE,
                watts: DEFAULT_WATTS,
                uptime_percent: DEFAULT_UPTIME_PERCENT,
            },
            fixed_costs: 0.0,
            electric_costs: None,
            mined: MinedSource::Direct { amount: 0.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MinedSource, ScenarioRequest, DEFAULT_WATTS};
    use crate::error::ScenarioError;

    #[test]
    fn pool_token_takes_precedence_over_direct_amount() {
        let source = MinedSource::from_parts(Some("abc".to_owned()), Some(1.5)).unwrap();

        assert_eq!(
            source,
            MinedSource::PoolAccount {
                token: "abc".to_owned()
            }
        );
    }

    #[test]
    fn blank_token_falls_back_to_direct_amount() {
        let source = MinedSource::from_parts(Some("  ".to_owned()), Some(1.5)).unwrap();

        assert_eq!(source, MinedSource::Direct { amount: 1.5 });
    }

    #[test]
    fn missing_both_sources_is_rejected() {
        let err = MinedSource::from_parts(None, None).unwrap_err();

        assert!(matches!(err, ScenarioError::MissingMinedSource));
    }

    #[test]
    fn default_request_uses_reference_rig() {
        let request = ScenarioRequest::default();

        assert_eq!(request.power.watts, DEFAULT_WATTS);
        assert_eq!(request.electric_costs, None);
    }
}
