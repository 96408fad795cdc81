// Tests covering rule files layered over the built-in tables via configuration.
use std::fs;

use anyhow::Result;
use eventcanon::core::{CanonConfig, RuleToggle};
use eventcanon::rules::RuleError;
use eventcanon::{EventBuilder, Metadata, RuleRegistry};
use tempfile::tempdir;

#[test]
fn directory_of_rule_files_extends_registry() -> Result<()> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("wallet.yaml"),
        r#"
domain: wallet
allowlist: [cta_clicked]
rules:
  - id: sankalp_form_submitted
    trigger: cta_clicked
    condition: {type: equals, field: cta_text, value: Recharge Now}
    action: {type: by_channel, web: recharge_started, app: recharge_started_app}
"#,
    )?;
    fs::write(
        dir.path().join("chat.yml"),
        r#"
domain: chat
allowlist: [message_sent]
rules:
  - id: first_message
    trigger: message_sent
    condition: {type: truthy, field: is_first_user}
    action: {type: rename, to: first_chat_message}
"#,
    )?;

    let config = CanonConfig {
        rules_path: Some(dir.path().to_path_buf()),
        ..CanonConfig::default()
    };
    let registry = RuleRegistry::from_config(&config)?;

    let cta = EventBuilder::new("cta_clicked")
        .property("cta_text", "Recharge Now")
        .property("user_channel", "web")
        .build();
    let verdict = registry.evaluate("wallet", cta, &Metadata::empty())?;
    assert_eq!(verdict.event_name(), Some("recharge_started"));

    let message = EventBuilder::new("message_sent")
        .property("is_first_user", true)
        .build();
    let verdict = registry.evaluate("chat", message, &Metadata::empty())?;
    assert_eq!(verdict.event_name(), Some("first_chat_message"));

    assert_eq!(
        registry.domains().collect::<Vec<_>>(),
        vec!["chat", "puja", "wallet"]
    );
    Ok(())
}

#[test]
fn toggle_for_unknown_domain_fails() {
    let config = CanonConfig {
        enable_rules: vec![RuleToggle {
            domain: "chat".into(),
            rule_id: "anything".into(),
        }],
        ..CanonConfig::default()
    };
    assert!(matches!(
        RuleRegistry::from_config(&config),
        Err(RuleError::UnknownDomain(_))
    ));
}

#[test]
fn missing_rules_path_fails() {
    let config = CanonConfig {
        rules_path: Some("/nonexistent/eventcanon/rules".into()),
        ..CanonConfig::default()
    };
    assert!(matches!(
        RuleRegistry::from_config(&config),
        Err(RuleError::MissingPath(_))
    ));
}
