//! Plain-text rendering of a [`Summary`].

use std::fmt::Write;

use crate::field::FieldPeak;
use crate::load::LoadDirection;
use crate::summary::{CriticalPoint, Governing, SafetyStatus, Summary};

/// Render a textual summary of the tapered beam analysis.
///
/// The report lists the load case, both headline stresses with their factors
/// of safety, and which location governs. When a field peak is supplied it is
/// appended so the raster maximum can be compared with the corner scan.
#[must_use]
pub fn render_summary(summary: &Summary, field_peak: Option<&FieldPeak>) -> String {
    let mut output = String::new();

    let direction = match summary.load.effective_direction() {
        LoadDirection::Downward => "downward",
        LoadDirection::Upward => "upward",
    };
    writeln!(
        &mut output,
        "Tapered cantilever (load = {:.1} N {direction} at x = {:.1} mm)",
        summary.load.magnitude.abs(),
        summary.load.position_x
    )
    .expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Material: {} (yield = {:.1} MPa, E = {:.0} MPa)",
        summary.material.name, summary.material.yield_strength, summary.material.modulus
    )
    .expect("writing to string cannot fail");

    write_point(
        &mut output,
        &format!(
            "Point A, corner region ({} points scanned)",
            summary.corner_candidates
        ),
        &summary.corner,
    );
    write_point(&mut output, "Point B, taper foot", &summary.taper_foot);

    let governing = match summary.governing() {
        Governing::Corner => "point A",
        Governing::TaperFoot => "point B",
    };
    writeln!(
        &mut output,
        "Governing: {governing} ({})",
        status_label(summary.status())
    )
    .expect("writing to string cannot fail");

    if let Some(peak) = field_peak {
        writeln!(
            &mut output,
            "Field peak: {:.2} MPa at ({:.0}, {:.0}) mm",
            peak.stress, peak.location.x, peak.location.y
        )
        .expect("writing to string cannot fail");
    }

    output
}

/// Append one critical point to the report.
fn write_point(output: &mut String, title: &str, point: &CriticalPoint) {
    let location = point.location.map_or_else(
        || "no stressed point".to_owned(),
        |at| format!("({:.0}, {:.0}) mm", at.x, at.y),
    );
    let factor = if point.factor_of_safety.is_finite() {
        format!("{:.2}", point.factor_of_safety)
    } else {
        "inf".to_owned()
    };
    writeln!(
        output,
        "{title}: {:.2} MPa at {location}, factor of safety {factor} [{}]",
        point.stress,
        status_label(point.status)
    )
    .expect("writing to string cannot fail");
}

/// Human-readable form of a status.
fn status_label(status: SafetyStatus) -> &'static str {
    match status {
        SafetyStatus::Safe => "safe",
        SafetyStatus::Marginal => "marginal",
        SafetyStatus::Overstressed => "overstressed",
    }
}
