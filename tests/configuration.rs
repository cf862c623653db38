// Copyright @yucwang 2026

mod common;

use common::init_logger;
use lumiere::core::computation_node::ComputationNode;
use lumiere::core::config_loader::load_integrator_config;
use lumiere::core::error::RenderError;
use lumiere::integrators::{ create_integrator, load_integrator };
use std::fs;

#[test]
fn test_load_from_file() {
    init_logger();
    let path = std::env::temp_dir().join(format!("lumiere-config-{}.xml", std::process::id()));
    fs::write(&path, r#"<scene>
        <integrator type="av">
            <float name="length" value="0.5"/>
        </integrator>
    </scene>"#).unwrap();

    let config = load_integrator_config(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(config.kind, "av");
    assert_eq!(config.props.get_float_required("length").unwrap(), 0.5);
    let integrator = create_integrator(&config.kind, &config.props).unwrap();
    assert_eq!(integrator.to_string(), "AverageVisibility[rayLength = 0.5]");
}

#[test]
fn test_missing_file() {
    let path = std::env::temp_dir().join("lumiere-config-that-does-not-exist.xml");
    assert!(matches!(load_integrator_config(&path), Err(RenderError::Io(_))));
}

#[test]
fn test_configuration_errors() {
    assert!(matches!(load_integrator("<scene><integrator type=\"bidir\"/></scene>"),
                     Err(RenderError::UnknownIntegrator(_))));

    let wrong_type = "<scene><integrator type=\"photonmapper\">\
                      <float name=\"photonCount\" value=\"10\"/></integrator></scene>";
    assert!(matches!(load_integrator(wrong_type), Err(RenderError::PropertyType { .. })));

    let negative = "<scene><integrator type=\"photonmapper\">\
                    <float name=\"photonRadius\" value=\"-1\"/></integrator></scene>";
    assert!(matches!(load_integrator(negative), Err(RenderError::InvalidProperty { .. })));

    let no_length = "<scene><integrator type=\"av\"/></scene>";
    assert!(matches!(load_integrator(no_length), Err(RenderError::InvalidProperty { .. })));

    assert!(matches!(load_integrator("<scene/>"), Err(RenderError::Parse(_))));
}
