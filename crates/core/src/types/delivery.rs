//! How a finished order reaches the customer.

use serde::{Deserialize, Serialize};

/// Error returned when a delivery method string is not recognised.
///
/// Unknown methods are rejected rather than mapped to a default, so a typo
/// can never silently produce a free order.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid delivery method: {0:?} (expected \"delivery\" or \"self-pickup\")")]
pub struct DeliveryMethodError(pub String);

/// Delivery method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMethod {
    /// Courier delivery to an address (外送). Subject to the delivery fee.
    #[default]
    Delivery,
    /// Customer collects the order at the store (自取). Always free.
    SelfPickup,
}

impl DeliveryMethod {
    /// Whether this method needs a delivery address.
    #[must_use]
    pub const fn requires_address(&self) -> bool {
        matches!(self, Self::Delivery)
    }

    /// Label shown in the storefront.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Delivery => "外送",
            Self::SelfPickup => "自取",
        }
    }
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delivery => write!(f, "delivery"),
            Self::SelfPickup => write!(f, "self-pickup"),
        }
    }
}

impl std::str::FromStr for DeliveryMethod {
    type Err = DeliveryMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delivery" | "外送" => Ok(Self::Delivery),
            "self-pickup" | "自取" => Ok(Self::SelfPickup),
            _ => Err(DeliveryMethodError(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_methods() {
        assert_eq!("delivery".parse::<DeliveryMethod>().unwrap(), DeliveryMethod::Delivery);
        assert_eq!(
            "self-pickup".parse::<DeliveryMethod>().unwrap(),
            DeliveryMethod::SelfPickup
        );
        assert_eq!("外送".parse::<DeliveryMethod>().unwrap(), DeliveryMethod::Delivery);
        assert_eq!("自取".parse::<DeliveryMethod>().unwrap(), DeliveryMethod::SelfPickup);
    }

    #[test]
    fn test_parse_rejects_unknown_methods() {
        for raw in ["", "Delivery", "pickup", "drone", "self_pickup"] {
            let err = raw.parse::<DeliveryMethod>().unwrap_err();
            assert_eq!(err, DeliveryMethodError(raw.to_string()));
        }
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for method in [DeliveryMethod::Delivery, DeliveryMethod::SelfPickup] {
            assert_eq!(method.to_string().parse::<DeliveryMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&DeliveryMethod::SelfPickup).unwrap();
        assert_eq!(json, "\"self-pickup\"");
        assert!(serde_json::from_str::<DeliveryMethod>("\"teleport\"").is_err());
    }

    #[test]
    fn test_only_delivery_requires_address() {
        assert!(DeliveryMethod::Delivery.requires_address());
        assert!(!DeliveryMethod::SelfPickup.requires_address());
        assert_eq!(DeliveryMethod::default(), DeliveryMethod::Delivery);
    }
}
