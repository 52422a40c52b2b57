//! Mapping of OSM node tags onto typed nodes.

use anyhow::Result;
use osmpbfreader::Tags;

use cairn::models::{
    EleFeatureValue, Feature, FeatureValue, FeatureValueBuffer, GeoCoord, NameFeatureValue,
    TypeConfig, TypeInfo,
};

/// Meters per foot
const FOOT: f64 = 0.3048;

/// Coordinate and feature values of an OSM node, if its tags match a type
pub fn extract_node(
    node: &osmpbfreader::Node,
    type_config: &TypeConfig,
) -> Result<Option<(GeoCoord, FeatureValueBuffer)>> {
    let Some(type_info) = classify(type_config, &node.tags) else {
        return Ok(None);
    };

    let coord = GeoCoord::new(node.lat(), node.lon());
    if !coord.is_valid() {
        return Ok(None);
    }

    let buffer = feature_buffer(type_info, &node.tags)?;
    Ok(Some((coord, buffer)))
}

pub fn classify<'a>(type_config: &'a TypeConfig, tags: &Tags) -> Option<&'a TypeInfo> {
    type_config.classify(|key: &str| tags.get(key).map(|v| v.as_str()))
}

/// Fill the features the type carries from `name` and `ele`
pub fn feature_buffer(type_info: &TypeInfo, tags: &Tags) -> Result<FeatureValueBuffer> {
    let mut buffer = FeatureValueBuffer::new(type_info);

    if type_info.has_feature(Feature::Name) {
        if let Some(name) = tags.get("name").map(|v| v.trim()).filter(|v| !v.is_empty()) {
            buffer.set(type_info, FeatureValue::Name(NameFeatureValue::new(name)))?;
        }
    }

    if type_info.has_feature(Feature::Ele) {
        if let Some(ele) = tags.get("ele").and_then(|v| parse_ele(v)) {
            buffer.set(type_info, FeatureValue::Ele(EleFeatureValue::new(ele)))?;
        }
    }

    Ok(buffer)
}

/// Parse an `ele` tag into whole meters.
///
/// Accepts `2076`, `2076 m`, `2076.4`, `2076,4`, `6811 ft` and `6811'`.
/// Negative and unparseable values yield `None`.
pub fn parse_ele(raw: &str) -> Option<u32> {
    let lower = raw.trim().to_ascii_lowercase();

    let (number, factor) = if let Some(n) = lower
        .strip_suffix("ft")
        .or_else(|| lower.strip_suffix('\''))
    {
        (n, FOOT)
    } else if let Some(n) = lower.strip_suffix('m') {
        (n, 1.0)
    } else {
        (lower.as_str(), 1.0)
    };

    let value: f64 = number.trim().replace(',', ".").parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let meters = (value * factor).round();
    if meters > u32::MAX as f64 {
        return None;
    }
    Some(meters as u32)
}
