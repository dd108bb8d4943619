//! # Kalimba Visualization
//!
//! Lays out a 17-tine kalimba and colors each tine from the palette.
//!
//! Tines are listed in their physical left-to-right order. The center tine
//! (index 8, note `1`) is the longest; lengths fall off as a parabola toward
//! both edges, from 85% of the body height at the center to 50% at the
//! outermost tines.
//!
//! Notes missing from the palette are drawn gray rather than black so an
//! unassigned tine still reads as a tine.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;

use crate::error::KalimbaError;
use crate::palette::Palette;

/// Physical tine order, left to right
pub const TINE_ORDER: [&str; 17] = [
    "2''", "7'", "5'", "3'", "1'", "6", "4", "2", "1", "3", "5", "7", "2'", "4'", "6'", "1''", "3''",
];

/// Index of the longest tine
pub const CENTER_TINE: usize = 8;

/// Fill for tines whose note has no palette entry
pub const TINE_FALLBACK: &str = "gray";

const MAX_HEIGHT_RATIO: f64 = 0.85;
const MIN_HEIGHT_RATIO: f64 = 0.5;
const LABEL_SPACE: f64 = 24.0;

/// Size of the kalimba body and tines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TineDimensions {
    pub width: f64,
    pub height: f64,
    pub tine_width: f64,
}

impl Default for TineDimensions {
    fn default() -> Self {
        Self {
            width: 384.0,
            height: 384.0,
            tine_width: 12.0,
        }
    }
}

/// One laid-out tine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tine {
    pub note: String,
    pub index: usize,
    /// Horizontal center as a percentage of the body width
    pub left_percent: f64,
    pub height: f64,
    pub color: String,
}

/// Compute position, length and color of every tine.
pub fn tine_layout(palette: &Palette, dims: &TineDimensions) -> Vec<Tine> {
    let count = TINE_ORDER.len();
    let max_height = dims.height * MAX_HEIGHT_RATIO;
    let min_height = dims.height * MIN_HEIGHT_RATIO;
    let range = max_height - min_height;
    let edge = (count - 1 - CENTER_TINE) as f64;
    let max_distance_sq = edge * edge;

    TINE_ORDER
        .iter()
        .enumerate()
        .map(|(index, note)| {
            let distance = index.abs_diff(CENTER_TINE) as f64;
            Tine {
                note: note.to_string(),
                index,
                left_percent: (index + 1) as f64 * 100.0 / (count + 1) as f64,
                height: max_height - range * (distance * distance) / max_distance_sq,
                color: palette.get(note).unwrap_or(TINE_FALLBACK).to_string(),
            }
        })
        .collect()
}

/// Draw the tines as a standalone SVG document.
pub fn tines_to_svg(tines: &[Tine], dims: &TineDimensions) -> Result<String, KalimbaError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let total_height = dims.height + LABEL_SPACE;

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
    svg.push_attribute(("width", fmt(dims.width).as_str()));
    svg.push_attribute(("height", fmt(total_height).as_str()));
    svg.push_attribute((
        "viewBox",
        format!("0 0 {} {}", fmt(dims.width), fmt(total_height)).as_str(),
    ));
    emit(&mut writer, Event::Start(svg))?;

    // Kalimba body
    let mut body = BytesStart::new("rect");
    body.push_attribute(("x", "0"));
    body.push_attribute(("y", fmt(LABEL_SPACE).as_str()));
    body.push_attribute(("width", fmt(dims.width).as_str()));
    body.push_attribute(("height", fmt(dims.height).as_str()));
    body.push_attribute(("rx", fmt(dims.width / 2.0).as_str()));
    body.push_attribute(("fill", "#FEF3C7"));
    body.push_attribute(("stroke", "#B45309"));
    body.push_attribute(("stroke-width", "2"));
    emit(&mut writer, Event::Empty(body))?;

    let bottom = LABEL_SPACE + dims.height;
    for tine in tines {
        let center = tine.left_percent * dims.width / 100.0;
        let top = bottom - tine.height;

        let mut rect = BytesStart::new("rect");
        rect.push_attribute(("x", fmt(center - dims.tine_width / 2.0).as_str()));
        rect.push_attribute(("y", fmt(top).as_str()));
        rect.push_attribute(("width", fmt(dims.tine_width).as_str()));
        rect.push_attribute(("height", fmt(tine.height).as_str()));
        rect.push_attribute(("rx", "3"));
        rect.push_attribute(("fill", tine.color.as_str()));
        rect.push_attribute(("stroke", "#9CA3AF"));
        emit(&mut writer, Event::Empty(rect))?;

        let mut label = BytesStart::new("text");
        label.push_attribute(("x", fmt(center).as_str()));
        label.push_attribute(("y", fmt(top - 6.0).as_str()));
        label.push_attribute(("text-anchor", "middle"));
        label.push_attribute(("font-size", "12"));
        label.push_attribute(("font-weight", "bold"));
        emit(&mut writer, Event::Start(label))?;
        emit(&mut writer, Event::Text(BytesText::new(&tine.note)))?;
        emit(&mut writer, Event::End(BytesEnd::new("text")))?;
    }

    emit(&mut writer, Event::End(BytesEnd::new("svg")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| KalimbaError::Render(e.to_string()))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), KalimbaError> {
    writer
        .write_event(event)
        .map_err(|e| KalimbaError::Render(e.to_string()))
}

/// Compact number formatting for SVG attributes.
fn fmt(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}
