use crate::integration::support::scenario_fleet;
use resource_dispatcher::config::{DispatcherConfig, StoreBackend};
use resource_dispatcher::tooling::cli::{CliContext, Commands};
use resource_dispatcher::ApiError;
use tempfile::TempDir;

fn resources_json(cli: &CliContext, available: bool) -> serde_json::Value {
    let output = cli
        .execute(&Commands::Resources {
            node: "nodeX".to_string(),
            available,
            format: "json".to_string(),
        })
        .unwrap();
    serde_json::from_str(&output).unwrap()
}

fn listed_ids(value: &serde_json::Value) -> Vec<String> {
    value["resources"]
        .as_array()
        .expect("resources array should exist")
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn resources_json_contract_has_required_fields() {
    let (_, fleet) = scenario_fleet();
    let cli = CliContext::with_fleet(fleet);
    let parsed = resources_json(&cli, false);

    assert_eq!(parsed["node"], "nodeX");
    assert_eq!(listed_ids(&parsed), vec!["R1", "R2", "R3"]);
    let r2 = &parsed["resources"][1];
    assert!(r2.get("device_id").and_then(|v| v.as_str()).is_some());
    assert!(r2.get("enabled").and_then(|v| v.as_bool()).is_some());
    assert_eq!(r2["available"], false);
    assert_eq!(r2["reserved"]["holder_id"], "somebuild");
}

#[test]
fn release_command_then_available_listing() {
    let (_, fleet) = scenario_fleet();
    let cli = CliContext::with_fleet(fleet);
    assert_eq!(listed_ids(&resources_json(&cli, true)), vec!["R3"]);

    let output = cli
        .execute(&Commands::Release {
            node: "nodeX".to_string(),
            id: "R2".to_string(),
        })
        .unwrap();
    assert!(output.contains("somebuild"));
    assert_eq!(listed_ids(&resources_json(&cli, true)), vec!["R2", "R3"]);
}

#[test]
fn lookup_errors_carry_descriptive_messages() {
    let (_, fleet) = scenario_fleet();
    let cli = CliContext::with_fleet(fleet);

    let err = cli
        .execute(&Commands::Release {
            node: "missingNode".to_string(),
            id: "R2".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::NodeNotFound(_)));
    assert_eq!(err.to_string(), "No node with name missingNode exists in the fleet.");

    let err = cli
        .execute(&Commands::Show {
            node: "nodeX".to_string(),
            id: "R7".to_string(),
            format: "text".to_string(),
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "No resource with id R7 exists on node nodeX.");
}

#[test]
fn reserve_then_unreserve_with_returned_key() {
    let (_, fleet) = scenario_fleet();
    let cli = CliContext::with_fleet(fleet);

    let output = cli
        .execute(&Commands::Reserve {
            node: "nodeX".to_string(),
            id: "R3".to_string(),
            holder: "build#12".to_string(),
            expires: "end-of-build".to_string(),
            external: false,
            key: None,
        })
        .unwrap();
    let stash: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(stash["holder_id"], "build#12");
    assert_eq!(stash["expires"], "end-of-build");
    let key = stash["key"].as_str().unwrap().to_string();
    assert!(listed_ids(&resources_json(&cli, true)).is_empty());

    cli.execute(&Commands::Unreserve {
        node: "nodeX".to_string(),
        id: "R3".to_string(),
        key,
    })
    .unwrap();
    assert_eq!(listed_ids(&resources_json(&cli, true)), vec!["R3"]);
}

#[test]
fn unknown_format_is_rejected() {
    let (_, fleet) = scenario_fleet();
    let cli = CliContext::with_fleet(fleet);
    let err = cli
        .execute(&Commands::Resources {
            node: "nodeX".to_string(),
            available: false,
            format: "yaml".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument(_)));
}

#[test]
fn import_toml_into_sled_store_and_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let fleet_file = temp_dir.path().join("fleet.toml");
    std::fs::write(
        &fleet_file,
        r#"
[[nodes]]
name = "rack-1"

[[nodes.metadata.children]]
kind = "tree"
name = "devices"

[[nodes.metadata.children.children]]
kind = "resource"
id = "phone-1"
device_id = "SN-0001"
description = "Test handset"

[[nodes]]
name = "rack-2"
"#,
    )
    .unwrap();

    let mut config = DispatcherConfig::default();
    config.store.backend = StoreBackend::Sled;
    config.store.path = Some(temp_dir.path().join("store"));

    {
        let cli = CliContext::new(&config).unwrap();
        let output = cli
            .execute(&Commands::Import {
                file: fleet_file.clone(),
            })
            .unwrap();
        assert_eq!(output, "Imported 2 node(s).");
    }

    let cli = CliContext::new(&config).unwrap();
    assert_eq!(cli.execute(&Commands::Nodes).unwrap(), "rack-1\nrack-2");
    let output = cli
        .execute(&Commands::Show {
            node: "rack-1".to_string(),
            id: "phone-1".to_string(),
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["device_id"], "SN-0001");
    assert_eq!(parsed["available"], true);
    assert_eq!(parsed["node"], "rack-1");
}
