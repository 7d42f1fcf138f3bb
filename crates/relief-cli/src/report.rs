//! Plain-text rendering of a delivery outcome.

use relief_planner::DeliveryOutcome;

/// Display units per map unit of distance.
pub const DISTANCE_SCALE: f64 = 100.0;

/// Display units per unit of travel time.
pub const TIME_SCALE: f64 = 60.0;

/// Render an outcome as a short multi-line report.
pub fn render(outcome: &DeliveryOutcome) -> String {
    let path = outcome
        .path
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ");

    let mut lines = vec![
        format!("Path: {path}"),
        format!(
            "Distance: {:.1} ({:.2} map units)",
            outcome.distance * DISTANCE_SCALE,
            outcome.distance
        ),
    ];
    if outcome.time.is_finite() {
        lines.push(format!("Time: {:.1}", outcome.time * TIME_SCALE));
    } else {
        lines.push("Time: unbounded (a vehicle cannot move in this weather)".to_owned());
    }
    lines.extend(outcome.manifest.iter().map(|(vehicle, supplies)| {
        let names = supplies
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Vehicle {vehicle}: {names}")
    }));
    lines.extend(
        outcome
            .dropped
            .iter()
            .map(|supply| format!("Left at depot: {} x{}", supply.supply_type, supply.quantity)),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use relief_types::{Position, Supply, SupplyType, VehicleId};

    use super::*;

    fn make_outcome(time: f64) -> DeliveryOutcome {
        DeliveryOutcome {
            path: vec![Position::new(0.0, 0.0), Position::new(1.0, 0.0)],
            distance: 1.0,
            time,
            vehicle_times: BTreeMap::new(),
            manifest: [(VehicleId(2), vec![SupplyType::Water, SupplyType::Medicine])]
                .into_iter()
                .collect(),
            loads: Vec::new(),
            dropped: vec![Supply::new(SupplyType::Food, 4.0)],
        }
    }

    #[test]
    fn renders_scaled_figures_and_manifest() {
        let text = render(&make_outcome(0.5));
        assert!(text.contains("Path: (0, 0) -> (1, 0)"));
        assert!(text.contains("Distance: 100.0"));
        assert!(text.contains("Time: 30.0"));
        assert!(text.contains("Vehicle 2: Water, Medicine"));
        assert!(text.contains("Left at depot: Food x4"));
        assert_eq!(text.lines().count(), 5);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn infinite_time_is_spelled_out() {
        let text = render(&make_outcome(f64::INFINITY));
        assert!(text.contains("unbounded"));
    }
}
