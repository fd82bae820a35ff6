//! Gateway Settings
//!
//! The host persists gateway settings as a flat key/value map. Raw settings
//! are validated once into an immutable [`BehalfConfig`], which is then
//! passed by reference into every operation; nothing reads settings from
//! ambient state after startup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use checkout_core::OrderStatus;

use crate::error::{GatewayError, Result};

/// Raw persisted settings, keyed exactly as the host stores them
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BehalfSettings {
    /// Checkbox value, `"yes"` or `"no"`
    pub enabled: Option<String>,

    /// Payment method title shown at checkout
    pub title: Option<String>,

    /// Payment method description shown above the widget
    pub description: Option<String>,

    /// Instructions shown under the widget at checkout
    pub behalf_instructions: Option<String>,

    /// Instructions for the thank-you page and order emails
    pub instructions: Option<String>,

    /// Client token received from Behalf
    pub behalf_token: Option<String>,

    /// Status slug orders are marked with after checkout
    pub behalf_order_status: Option<String>,
}

impl BehalfSettings {
    /// Read from the host's flat key/value settings store
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).cloned();
        Self {
            enabled: get("enabled"),
            title: get("title"),
            description: get("description"),
            behalf_instructions: get("behalf_instructions"),
            instructions: get("instructions"),
            behalf_token: get("behalf_token"),
            behalf_order_status: get("behalf_order_status"),
        }
    }

    /// Read from environment variables
    pub fn from_env() -> Self {
        let get = |key: &str| std::env::var(key).ok();
        Self {
            enabled: get("BEHALF_ENABLED"),
            title: get("BEHALF_TITLE"),
            description: get("BEHALF_DESCRIPTION"),
            behalf_instructions: get("BEHALF_WIDGET_INSTRUCTIONS"),
            instructions: get("BEHALF_EMAIL_INSTRUCTIONS"),
            behalf_token: get("BEHALF_TOKEN"),
            behalf_order_status: get("BEHALF_ORDER_STATUS"),
        }
    }

    /// Validate into an immutable gateway configuration
    ///
    /// Unknown status slugs are rejected here, at settings time, so checkout
    /// never sees an invalid target status.
    pub fn validate(self) -> Result<BehalfConfig> {
        let defaults = BehalfConfig::default();

        let target_order_status = match self.behalf_order_status.as_deref() {
            None | Some("") => defaults.target_order_status,
            Some(slug) => slug.parse::<OrderStatus>().map_err(|_| {
                GatewayError::InvalidConfig(format!("unknown order status: {slug}"))
            })?,
        };

        let enabled = match self.enabled.as_deref() {
            None | Some("") => defaults.enabled,
            Some("yes") => true,
            Some("no") => false,
            Some(other) => {
                return Err(GatewayError::InvalidConfig(format!(
                    "enabled must be \"yes\" or \"no\", got {other:?}"
                )));
            }
        };

        Ok(BehalfConfig {
            enabled,
            title: or_default(self.title, defaults.title),
            checkout_description: or_default(self.description, defaults.checkout_description),
            widget_instructions: or_default(self.behalf_instructions, defaults.widget_instructions),
            email_instructions: or_default(self.instructions, defaults.email_instructions),
            client_token: self.behalf_token.unwrap_or_default(),
            target_order_status,
        })
    }
}

fn or_default(value: Option<String>, default: String) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default,
    }
}

/// Immutable gateway configuration
///
/// Built once from validated settings; read-only for the life of a checkout
/// session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehalfConfig {
    /// Whether the gateway is offered at checkout
    pub enabled: bool,

    /// Payment method title shown at checkout
    pub title: String,

    /// Description shown above the widget
    pub checkout_description: String,

    /// Instructions shown under the widget
    pub widget_instructions: String,

    /// Instructions for the thank-you page and order emails
    pub email_instructions: String,

    /// Client token received from Behalf
    pub client_token: String,

    /// Status assigned to orders after checkout
    pub target_order_status: OrderStatus,
}

impl Default for BehalfConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Net 30/60/90 and Financing by Behalf".into(),
            checkout_description: "With Behalf, you can apply for Net Terms and Financing \
                right here and get a decision. Or if you have a Behalf account, login here.</br>\
                Once you have logged in, click continue to open Behalf in a new window or tab \
                and complete the payment. Then return here, and finish the checkout."
                .into(),
            widget_instructions: "You can apply right here and get a decision, or log in if \
                you already have a Behalf account.</br>Once you have logged in, click continue \
                to open Behalf in a new window or tab and complete the payment. Then return \
                here, and finish the checkout."
                .into(),
            email_instructions: "<b>You selected Behalf.com as your payment method. If you \
                have already completed the payment with Behalf, we will verify it shortly. If \
                you have not already completed your payment, please \
                <a href=\"https://app.behalf.com/users/signin\">Login to your behalf.com \
                account</a> and complete the Payment, and then let us know.</b>"
                .into(),
            client_token: String::new(),
            target_order_status: OrderStatus::Pending,
        }
    }
}

impl BehalfConfig {
    /// Whether a client token is present
    pub fn has_token(&self) -> bool {
        !self.client_token.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_settings_empty() {
        let config = BehalfSettings::default().validate().unwrap();
        assert!(config.enabled);
        assert_eq!(config.target_order_status, OrderStatus::Pending);
        assert_eq!(config.title, "Net 30/60/90 and Financing by Behalf");
        assert!(!config.has_token());
    }

    #[test]
    fn test_target_status_accepts_prefixed_and_bare_slugs() {
        for slug in ["wc-on-hold", "on-hold"] {
            let config = BehalfSettings {
                behalf_order_status: Some(slug.into()),
                ..Default::default()
            }
            .validate()
            .unwrap();
            assert_eq!(config.target_order_status, OrderStatus::OnHold);
        }
    }

    #[test]
    fn test_unknown_status_rejected_at_settings_time() {
        let err = BehalfSettings {
            behalf_order_status: Some("wc-paid-in-full".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidConfig(_)));
    }

    #[test]
    fn test_enabled_checkbox_values() {
        let on = BehalfSettings {
            enabled: Some("yes".into()),
            ..Default::default()
        };
        assert!(on.validate().unwrap().enabled);

        let off = BehalfSettings {
            enabled: Some("no".into()),
            ..Default::default()
        };
        assert!(!off.validate().unwrap().enabled);

        let bad = BehalfSettings {
            enabled: Some("maybe".into()),
            ..Default::default()
        };
        assert!(matches!(
            bad.validate().unwrap_err(),
            GatewayError::InvalidConfig(_)
        ));
    }

    #[test]
    fn test_from_map_reads_host_keys() {
        let mut map = HashMap::new();
        map.insert("behalf_token".to_string(), "tok_live_123".to_string());
        map.insert("behalf_order_status".to_string(), "wc-on-hold".to_string());
        map.insert("title".to_string(), "Behalf Financing".to_string());

        let config = BehalfSettings::from_map(&map).validate().unwrap();
        assert_eq!(config.client_token, "tok_live_123");
        assert_eq!(config.target_order_status, OrderStatus::OnHold);
        assert_eq!(config.title, "Behalf Financing");
    }
}
