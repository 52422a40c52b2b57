#![allow(dead_code)]

use std::path::Path;

use cairn::models::{
    EleFeatureValue, Feature, FeatureValue, FeatureValueBuffer, GeoCoord, NameFeatureValue,
    TagCondition, TypeConfig, TypeDefinition,
};
use cairn::{DatabaseInfo, DatabaseWriter};

pub struct TestNode {
    pub id: i64,
    pub type_name: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub name: Option<&'static str>,
    pub ele: Option<u32>,
}

pub fn peak(
    id: i64,
    lat: f64,
    lon: f64,
    name: Option<&'static str>,
    ele: Option<u32>,
) -> TestNode {
    TestNode {
        id,
        type_name: "natural_peak",
        lat,
        lon,
        name,
        ele,
    }
}

fn definition(name: &str, key: &str, value: &str) -> TypeDefinition {
    TypeDefinition {
        name: name.to_string(),
        conditions: vec![TagCondition::new(key, Some(value))],
        features: vec![Feature::Name, Feature::Ele],
    }
}

pub fn mountain_types() -> TypeConfig {
    TypeConfig::new(vec![
        definition("natural_peak", "natural", "peak"),
        definition("natural_saddle", "natural", "saddle"),
    ])
    .unwrap()
}

pub fn write_database(dir: &Path, type_config: TypeConfig, nodes: &[TestNode]) -> DatabaseInfo {
    let mut writer = DatabaseWriter::create(dir, type_config).unwrap();

    for node in nodes {
        let type_info = writer.type_config().type_info(node.type_name).unwrap().clone();
        let mut buffer = FeatureValueBuffer::new(&type_info);
        if let Some(name) = node.name {
            buffer
                .set(&type_info, FeatureValue::Name(NameFeatureValue::new(name)))
                .unwrap();
        }
        if let Some(ele) = node.ele {
            buffer
                .set(&type_info, FeatureValue::Ele(EleFeatureValue::new(ele)))
                .unwrap();
        }
        writer
            .add_node(node.id, GeoCoord::new(node.lat, node.lon), buffer)
            .unwrap();
    }

    writer.finish(Some("test.osm.pbf")).unwrap()
}

/// Peaks and a saddle around the Vienna basin plus one far away
pub fn vienna_nodes() -> Vec<TestNode> {
    vec![
        peak(1, 47.7672, 15.8069, Some("Schneeberg"), Some(2076)),
        peak(2, 47.7167, 15.7333, Some("Rax"), Some(2007)),
        peak(3, 47.8500, 16.0500, None, Some(1132)),
        peak(4, 48.2700, 16.3300, Some("Kahlenberg"), None),
        peak(5, 47.0742, 12.6947, Some("Grossglockner"), Some(3798)),
        TestNode {
            id: 6,
            type_name: "natural_saddle",
            lat: 47.7500,
            lon: 15.7700,
            name: Some("Saddle"),
            ele: Some(1800),
        },
    ]
}
