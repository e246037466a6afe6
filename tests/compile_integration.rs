//! End-to-end compile tests: specification and document files on disk
//! in, compiled configuration out.

use std::io::Write;
use std::net::Ipv4Addr;

use tempfile::NamedTempFile;

use nodespec::compile::{compile_configuration, AgentRequirement, CompileError};
use nodespec::config::{load_document_file, load_table_file, DriverCustomization, NetworkError};

const DOCUMENT: &str = r#"
driver: vagrant
network: 10.0.0.0/24
last_octet: 10
suites:
  - name: default
    run_list:
      - recipe[apt]
      - recipe[postgresql::server]
    data_bags_path: data_bags
    attributes:
      postgresql:
        listen: "0.0.0.0"
  - name: standalone
    run_list:
      - recipe[apt]
"#;

const TABLE: &str = r#"
- Operating System: ubuntu
  Version: "18.04"
  Chef Version: "11.4.0"
  Run List: base,web
  Server Name: web-1
- Operating System: centos
  Version: "7"
  Run List: base
  Server Name: db-1
"#;

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn compiles_specification_files_end_to_end() {
    let document_file = temp_file(DOCUMENT);
    let table_file = temp_file(TABLE);

    let document = load_document_file(document_file.path()).unwrap();
    let table = load_table_file(table_file.path()).unwrap();

    let mut customization = DriverCustomization::new();
    customization.set_memory(1024).unwrap();

    let config = compile_configuration(&table, &document, &customization).unwrap();

    assert_eq!(config.driver_plugin, "vagrant");

    // Platforms in row order, addresses strictly increasing from .2
    assert_eq!(config.platforms.len(), 2);
    let web = &config.platforms[0];
    assert_eq!(web.name, "web-1");
    assert_eq!(web.base_image_name, "opscode-ubuntu-18.04");
    assert_eq!(
        web.base_image_url,
        "https://opscode-vm-bento.s3.amazonaws.com/vagrant/virtualbox/opscode_ubuntu-18.04_chef-provisionerless.box"
    );
    assert_eq!(web.address, Ipv4Addr::new(10, 0, 0, 2));
    assert_eq!(web.agent, AgentRequirement::Pinned("11.4.0".to_string()));
    assert_eq!(web.run_list, vec!["base", "web"]);
    assert_eq!(web.customizations.get("memory"), Some(&1024));

    let db = &config.platforms[1];
    assert_eq!(db.base_image_name, "opscode-centos-7");
    assert_eq!(db.address, Ipv4Addr::new(10, 0, 0, 3));
    assert_eq!(db.agent, AgentRequirement::Required(true));

    // Both platforms share the same process-wide customizations.
    assert_eq!(web.customizations, db.customizations);

    // Default suite resolution: one descriptor per row, all sourced from
    // the catalog's first entry.
    assert_eq!(config.suites.len(), 2);
    assert_eq!(config.suites[0], config.suites[1]);
    assert_eq!(config.suites[0].name, "default");
    assert_eq!(config.suites[0].run_list[1], "recipe[postgresql::server]");
}

#[test]
fn compiled_output_serializes_to_stable_json() {
    let document = load_document_file(temp_file(DOCUMENT).path()).unwrap();
    let table = load_table_file(temp_file(TABLE).path()).unwrap();

    let config =
        compile_configuration(&table, &document, &DriverCustomization::new()).unwrap();
    let json = serde_json::to_value(&config).unwrap();

    assert_eq!(json["platforms"][0]["address"], "10.0.0.2");
    assert_eq!(json["platforms"][0]["agent"], "11.4.0");
    assert_eq!(json["platforms"][1]["agent"], true);
    assert_eq!(
        json["suites"][0]["attributes"]["postgresql"]["listen"],
        "0.0.0.0"
    );

    // Round-trips through the same shape.
    let reparsed: nodespec::compile::CompiledConfiguration =
        serde_json::from_value(json).unwrap();
    assert_eq!(reparsed, config);
}

#[test]
fn missing_network_key_fails_the_whole_load() {
    let document = load_document_file(
        temp_file("driver: vagrant\nsuites:\n  - name: default\n").path(),
    )
    .unwrap();
    let table = load_table_file(temp_file(TABLE).path()).unwrap();

    let err = compile_configuration(&table, &document, &DriverCustomization::new())
        .unwrap_err();
    assert!(matches!(err, CompileError::MissingConfigKey("network")));
}

#[test]
fn address_space_too_small_for_table_is_reported() {
    // /30: network .0, reserved .1, usable .2, broadcast .3 - room for
    // exactly one platform, the table has two.
    let document = load_document_file(
        temp_file("driver: vagrant\nnetwork: 10.0.0.0/30\nsuites:\n  - name: default\n")
            .path(),
    )
    .unwrap();
    let table = load_table_file(temp_file(TABLE).path()).unwrap();

    let err = compile_configuration(&table, &document, &DriverCustomization::new())
        .unwrap_err();
    assert!(matches!(
        err,
        CompileError::Network(NetworkError::AddressSpaceExhausted(_))
    ));
}

#[test]
fn by_name_suite_resolution_end_to_end() {
    let document_yaml = format!("{DOCUMENT}resolve_suites_by_name: true\n");
    let table_yaml = r#"
- Operating System: ubuntu
  Version: "18.04"
  Run List: base
  Server Name: app-1
  Suite: standalone
"#;
    let document = load_document_file(temp_file(&document_yaml).path()).unwrap();
    let table = load_table_file(temp_file(table_yaml).path()).unwrap();

    let config =
        compile_configuration(&table, &document, &DriverCustomization::new()).unwrap();
    assert_eq!(config.suites[0].name, "standalone");
    assert_eq!(config.suites[0].run_list, vec!["recipe[apt]"]);
}
