//! Text output of a peak search.

use std::cmp::Reverse;
use std::io::{self, Write};

use cairn::db::NodeRegionSearchResultEntry;
use cairn::{EleFeatureValueReader, GeoCoord, NameFeatureValueReader, Node, TypeConfig};

/// The two attribute readers the report needs
pub struct PeakReaders {
    name: NameFeatureValueReader,
    ele: EleFeatureValueReader,
}

impl PeakReaders {
    pub fn new(type_config: &TypeConfig) -> Self {
        Self {
            name: NameFeatureValueReader::new(type_config),
            ele: EleFeatureValueReader::new(type_config),
        }
    }

    pub fn name<'a>(&self, node: &'a Node) -> Option<&'a str> {
        self.name
            .get_value(node.feature_value_buffer())
            .map(|v| v.name())
    }

    pub fn ele(&self, node: &Node) -> Option<u32> {
        self.ele
            .get_value(node.feature_value_buffer())
            .map(|v| v.ele())
    }
}

/// Header with the total count, then one line per peak with name and elevation.
///
/// Peaks missing either attribute are counted but not listed.
pub fn list_peaks<W: Write>(
    out: &mut W,
    center: GeoCoord,
    entries: &[NodeRegionSearchResultEntry],
    readers: &PeakReaders,
) -> io::Result<()> {
    writeln!(
        out,
        "Found {} peaks around {}:",
        entries.len(),
        center.display_text()
    )?;

    for entry in entries {
        let node = entry.node();
        let (Some(name), Some(ele)) = (readers.name(node), readers.ele(node)) else {
            continue; // there is no name or elevation for this peak
        };
        writeln!(out, "  {} \t({} m a.s.l.)", name, ele)?;
    }

    Ok(())
}

/// Stable sort, highest first. Missing elevation counts as 0.
pub fn rank_by_elevation(entries: &mut [NodeRegionSearchResultEntry], readers: &PeakReaders) {
    entries.sort_by_key(|e| Reverse(readers.ele(e.node()).unwrap_or(0)));
}

/// Report the first entry of a ranked list
pub fn report_highest<W: Write>(
    out: &mut W,
    ranked: &[NodeRegionSearchResultEntry],
    readers: &PeakReaders,
) -> io::Result<()> {
    let Some(highest) = ranked.first() else {
        return writeln!(out, "No peak found");
    };

    let node = highest.node();
    let name = readers.name(node).unwrap_or("No name");
    let ele = readers
        .ele(node)
        .map(|e| e.to_string())
        .unwrap_or_else(|| "?".to_string());

    writeln!(out, "Highest peak around: {} ({} m a.s.l.)", name, ele)
}
