use colored::*;
use eventcanon_rules::{DropReason, RuleAction, RuleRegistry, RuleSet};

pub fn print_domains(registry: &RuleRegistry) {
    for domain in registry.domains() {
        println!("{}", domain.bold());
    }
}

pub fn print_rules(set: &RuleSet) {
    println!("{} {}", "Domain:".green().bold(), set.domain.bold());
    println!("  Allowlist: {}", set.allowlist.sorted().join(", "));
    println!("  Rules (scan order):");
    for (position, rule) in set.rules.iter().enumerate() {
        let state = if rule.enabled {
            "on ".green()
        } else {
            "off".red()
        };
        println!(
            "  {:>2}. [{}] {} <- {} => {}",
            position + 1,
            state,
            rule.id.bold(),
            rule.trigger,
            describe_action(&rule.action)
        );
        if let Some(description) = &rule.description {
            println!("        {}", description.dimmed());
        }
    }
}

pub fn print_dropped(name: Option<&str>, reason: DropReason) {
    eprintln!(
        "{} {} ({})",
        "✘ dropped".yellow().bold(),
        name.unwrap_or("<unnamed>"),
        reason.as_str()
    );
}

fn describe_action(action: &RuleAction) -> String {
    match action {
        RuleAction::Rename { to } => to.clone(),
        RuleAction::ByChannel { web, app } => format!("web: {web} | other: {app}"),
        RuleAction::ByValue { field, cases } => {
            let cases: Vec<String> = cases
                .iter()
                .map(|(value, to)| format!("{value} -> {to}"))
                .collect();
            format!("{} {{ {} }}", field.key(), cases.join(", "))
        }
    }
}
