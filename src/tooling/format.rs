//! Format resources and reservation results for the terminal or as JSON.

use crate::admin::ReleaseOutcome;
use crate::resource::{ExternalResource, StashInfo};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::{json, Value};

/// Bold, underlined heading
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn state_label(resource: &ExternalResource) -> String {
    if !resource.is_enabled() {
        format!("{}", "disabled".red())
    } else if resource.is_reserved() {
        format!("{}", "reserved".yellow())
    } else {
        format!("{}", "available".green())
    }
}

/// JSON view of a resource; children are summarized by count
pub fn resource_json(resource: &ExternalResource) -> Value {
    json!({
        "id": resource.id(),
        "device_id": resource.device_id(),
        "description": resource.description(),
        "enabled": resource.is_enabled(),
        "available": resource.is_available(),
        "reserved": resource.stash().map(stash_json),
        "children": resource.children().len(),
    })
}

pub fn stash_json(stash: &StashInfo) -> Value {
    json!({
        "stash_type": stash.stash_type(),
        "holder_id": stash.holder_id(),
        "created_at": stash.lease().created_at().to_rfc3339(),
        "expires": stash.lease().expires(),
        "key": stash.key(),
    })
}

/// Table of resources for one node
pub fn format_resources_text(node: &str, resources: &[ExternalResource]) -> String {
    let mut out = format!("{}\n\n", format_section_heading(&format!("Resources on {}", node)));
    if resources.is_empty() {
        out.push_str("  No resources.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Device", "Description", "State", "Holder", "Expires"]);
    for resource in resources {
        let stash = resource.stash();
        table.add_row(vec![
            resource.id().to_string(),
            resource.device_id().to_string(),
            resource.description().to_string(),
            state_label(resource),
            stash.map(|s| s.holder_id().to_string()).unwrap_or_else(|| "-".to_string()),
            stash
                .map(|s| s.lease().expires().to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_resource_detail_text(node: &str, resource: &ExternalResource) -> String {
    let mut out = format!(
        "{}\n\n",
        format_section_heading(&format!("{} on {}", resource.id(), node))
    );
    out.push_str(&format!("  Device:      {}\n", resource.device_id()));
    out.push_str(&format!("  Description: {}\n", resource.description()));
    out.push_str(&format!("  State:       {}\n", state_label(resource)));
    if let Some(stash) = resource.stash() {
        out.push_str(&format!("  Stash type:  {}\n", stash.stash_type()));
        out.push_str(&format!("  Holder:      {}\n", stash.holder_id()));
        out.push_str(&format!(
            "  Leased at:   {}\n",
            stash.lease().created_at().to_rfc3339()
        ));
        out.push_str(&format!("  Expires:     {}\n", stash.lease().expires()));
    }
    out.push_str(&format!("  Children:    {}\n", resource.children().len()));
    out
}

pub fn format_release_text(outcome: &ReleaseOutcome) -> String {
    match &outcome.previous {
        Some(stash) => format!(
            "Released {} on {} (was held by {}).",
            outcome.resource_id,
            outcome.node,
            stash.holder_id()
        ),
        None => format!(
            "{} on {} was not reserved; nothing to release.",
            outcome.resource_id, outcome.node
        ),
    }
}
