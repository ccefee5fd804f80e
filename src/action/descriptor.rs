//! Descriptor, manifest and message construction.

use super::types::*;
use super::{STAKE_ACTION_PATH, STAKE_PAGE_PATTERN};
use crate::config::ActionConfig;

/// Build the GET descriptor for requests arriving at `origin`
/// (`scheme://host[:port]`).
///
/// Pure: the same config and origin always give the same value.
pub fn stake_descriptor(config: &ActionConfig, origin: &str) -> ActionGetResponse {
    let mut actions: Vec<LinkedAction> = config
        .preset_amounts
        .iter()
        .map(|amount| LinkedAction {
            kind: LinkedActionType::Transaction,
            label: format!("Stake {} SOL", amount),
            href: format!("{}?amount={}", STAKE_ACTION_PATH, amount),
            parameters: vec![],
        })
        .collect();

    actions.push(LinkedAction {
        kind: LinkedActionType::Transaction,
        label: "Choose amount".to_string(),
        href: format!("{}?amount={{amount}}", STAKE_ACTION_PATH),
        parameters: vec![ActionParameter {
            name: "amount".to_string(),
            label: "SOL to stake".to_string(),
            kind: "number".to_string(),
            min: Some(config.min_amount),
            required: Some(true),
        }],
    });

    ActionGetResponse {
        kind: ActionType::Action,
        title: config.title.clone(),
        label: config.label.clone(),
        description: config.description.clone(),
        icon: resolve_url(origin, &config.icon),
        links: ActionLinks { actions },
    }
}

/// Discovery rules mapping the website path to the action API.
pub fn actions_manifest() -> ActionsManifest {
    ActionsManifest {
        rules: vec![ActionRule {
            path_pattern: STAKE_PAGE_PATTERN.to_string(),
            api_path: STAKE_ACTION_PATH.to_string(),
        }],
    }
}

/// Human-readable summary returned alongside the transaction.
pub fn stake_message(config: &ActionConfig, sol_amount: f64) -> String {
    format!("Stake {} SOL with {}", sol_amount, config.validator_name)
}

fn resolve_url(origin: &str, target: &str) -> String {
    if target.starts_with("https://") || target.starts_with("http://") {
        return target.to_string();
    }
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        target.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_links() {
        let descriptor = stake_descriptor(&ActionConfig::default(), "https://stake.example");
        let value = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(value["type"], "action");
        assert_eq!(value["icon"], "https://stake.example/yonta-logo.png");

        let actions = value["links"]["actions"].as_array().unwrap();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0]["label"], "Stake 1 SOL");
        assert_eq!(actions[0]["href"], "/stake-action?amount=1");
        assert!(actions[0].get("parameters").is_none());
        assert_eq!(actions[1]["href"], "/stake-action?amount=5");
        assert_eq!(actions[2]["href"], "/stake-action?amount={amount}");
        assert_eq!(actions[2]["parameters"][0]["name"], "amount");
        assert_eq!(actions[2]["parameters"][0]["type"], "number");
        assert_eq!(actions[2]["parameters"][0]["min"], 0.01);
        for action in actions {
            assert_eq!(action["type"], "transaction");
        }
    }

    #[test]
    fn test_descriptor_is_deterministic() {
        let config = ActionConfig::default();
        let a = serde_json::to_vec(&stake_descriptor(&config, "http://localhost:8080")).unwrap();
        let b = serde_json::to_vec(&stake_descriptor(&config, "http://localhost:8080")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fractional_presets() {
        let config = ActionConfig {
            preset_amounts: vec![0.5],
            ..ActionConfig::default()
        };
        let descriptor = stake_descriptor(&config, "http://localhost");
        assert_eq!(descriptor.links.actions[0].label, "Stake 0.5 SOL");
        assert_eq!(descriptor.links.actions[0].href, "/stake-action?amount=0.5");
    }

    #[test]
    fn test_resolve_url() {
        assert_eq!(resolve_url("http://a.b/", "/icon.png"), "http://a.b/icon.png");
        assert_eq!(resolve_url("http://a.b", "icon.png"), "http://a.b/icon.png");
        assert_eq!(
            resolve_url("http://a.b", "https://cdn.example/icon.png"),
            "https://cdn.example/icon.png"
        );
    }

    #[test]
    fn test_stake_message() {
        let config = ActionConfig::default();
        assert_eq!(stake_message(&config, 1.0), "Stake 1 SOL with Yonta Labs");
        assert_eq!(stake_message(&config, 2.5), "Stake 2.5 SOL with Yonta Labs");
    }

    #[test]
    fn test_manifest() {
        let manifest = actions_manifest();
        assert_eq!(manifest.rules.len(), 1);
        assert_eq!(manifest.rules[0].path_pattern, "/stake");
        assert_eq!(manifest.rules[0].api_path, "/stake-action");
    }
}
