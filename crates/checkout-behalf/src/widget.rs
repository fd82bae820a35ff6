//! Behalf Payment Widget
//!
//! Renders the checkout fragment that mounts the Behalf-hosted widget: a
//! container element plus a bootstrap script for the remote SDK. All payment
//! collection happens inside the widget; nothing here talks to Behalf
//! server-side.

use serde::Serialize;

use crate::config::BehalfConfig;

/// Remote SDK entry point
pub const SDK_URL: &str = "https://sdk.behalf.com/sdk/v4/behalf_payment_sdk.js";

/// Id of the element the SDK mounts into
pub const WIDGET_ELEMENT_ID: &str = "behalf-payment-element";

/// Client-side SDK configuration object
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig<'a> {
    client_token: &'a str,
    show_promo: bool,
    call_to_action: CallToAction,
}

#[derive(Clone, Debug, Serialize)]
struct CallToAction {
    workflow: &'static str,
}

impl<'a> WidgetConfig<'a> {
    pub fn new(client_token: &'a str) -> Self {
        Self {
            client_token,
            show_promo: true,
            call_to_action: CallToAction {
                workflow: "redirect",
            },
        }
    }

    /// Serialize for the inline bootstrap script
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("widget config serializes")
    }
}

/// Render the widget fragment: container, bootstrap script, remote SDK tag
///
/// Output is byte-identical across calls for the same client token.
pub fn render_widget(config: &BehalfConfig) -> String {
    let sdk_config = WidgetConfig::new(&config.client_token).to_json();
    format!(
        r##"<div id="{id}"> </div>
<style>
 #{id} {{
 min-width: 320px;
 }}
</style>
<script>
 window.behalfPaymentReady = function() {{
 var config = {sdk_config};
 BehalfPayment.init(config);
 BehalfPayment.load("#{id}");
 }};
</script>
<script src="{SDK_URL}" async></script>"##,
        id = WIDGET_ELEMENT_ID,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_config_shape() {
        let json = WidgetConfig::new("tok_abc").to_json();
        assert_eq!(
            json,
            r#"{"clientToken":"tok_abc","showPromo":true,"callToAction":{"workflow":"redirect"}}"#
        );
    }

    #[test]
    fn test_widget_is_deterministic() {
        let config = BehalfConfig {
            client_token: "tok_abc".into(),
            ..Default::default()
        };
        assert_eq!(render_widget(&config), render_widget(&config));
    }

    #[test]
    fn test_widget_contains_sdk_bootstrap() {
        let config = BehalfConfig {
            client_token: "tok_abc".into(),
            ..Default::default()
        };
        let html = render_widget(&config);

        assert!(html.contains(r#"<div id="behalf-payment-element">"#));
        assert!(html.contains("tok_abc"));
        assert!(html.contains("BehalfPayment.init(config)"));
        assert!(html.contains(r##"BehalfPayment.load("#behalf-payment-element")"##));
        assert!(html.contains(SDK_URL));
    }

    #[test]
    fn test_only_token_varies_between_configs() {
        let a = BehalfConfig {
            client_token: "tok_a".into(),
            ..Default::default()
        };
        let b = BehalfConfig {
            client_token: "tok_b".into(),
            ..Default::default()
        };
        assert_eq!(
            render_widget(&a).replace("tok_a", "tok_b"),
            render_widget(&b)
        );
    }
}
