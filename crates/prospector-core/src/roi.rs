//! Annual ROI estimate for call automation, driven by fleet size.

use serde::Serialize;

const AUTOMATION_RATE: f64 = 0.8;
const MINUTES_SAVED_PER_CALL: f64 = 15.0;
const VIOLATION_REDUCTION: f64 = 0.5;
const COST_PER_VIOLATION: f64 = 2_500.0;
const RETENTION_IMPROVEMENT: f64 = 0.1;
const DRIVER_REPLACEMENT_COST: f64 = 7_500.0;
const IMPLEMENTATION_COST_PER_TRUCK: f64 = 50.0;

/// Operating assumptions for one fleet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiInputs {
    pub fleet_size: u32,
    pub daily_calls_per_truck: f64,
    pub coord_cost_per_call: f64,
    pub violations_per_month: f64,
}

impl RoiInputs {
    /// Default assumptions: 4 calls per truck per day at $3.50 each, and
    /// 2 violations a month.
    #[must_use]
    pub fn for_fleet(fleet_size: u32) -> Self {
        Self {
            fleet_size,
            daily_calls_per_truck: 4.0,
            coord_cost_per_call: 3.5,
            violations_per_month: 2.0,
        }
    }
}

/// Yearly figures, rounded to whole units (hours, incidents, dollars).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiEstimate {
    pub inputs: RoiInputs,
    pub hours_saved: i64,
    pub violations_prevented: i64,
    pub call_cost_savings: i64,
    pub violation_cost_savings: i64,
    pub retention_savings: i64,
    pub total_savings: i64,
    pub implementation_cost: i64,
    pub net_roi: i64,
    /// `None` for an empty fleet, where there is nothing to divide by.
    pub roi_percentage: Option<i64>,
}

#[must_use]
pub fn estimate_roi(inputs: &RoiInputs) -> RoiEstimate {
    let fleet = f64::from(inputs.fleet_size);

    let calls_per_year = inputs.daily_calls_per_truck * fleet * 365.0;
    let automated_calls = calls_per_year * AUTOMATION_RATE;
    let hours_saved = automated_calls * MINUTES_SAVED_PER_CALL / 60.0;

    let violations_prevented = (inputs.violations_per_month * 12.0 * VIOLATION_REDUCTION).round();

    let call_cost_savings = automated_calls * inputs.coord_cost_per_call;
    let violation_cost_savings = violations_prevented * COST_PER_VIOLATION;
    let retention_savings = fleet * RETENTION_IMPROVEMENT * DRIVER_REPLACEMENT_COST;
    let total_savings = call_cost_savings + violation_cost_savings + retention_savings;

    let implementation_cost = fleet * IMPLEMENTATION_COST_PER_TRUCK;
    let net_roi = total_savings - implementation_cost;
    let roi_percentage =
        (implementation_cost > 0.0).then(|| whole(net_roi * 100.0 / implementation_cost));

    RoiEstimate {
        inputs: *inputs,
        hours_saved: whole(hours_saved),
        violations_prevented: whole(violations_prevented),
        call_cost_savings: whole(call_cost_savings),
        violation_cost_savings: whole(violation_cost_savings),
        retention_savings: whole(retention_savings),
        total_savings: whole(total_savings),
        implementation_cost: whole(implementation_cost),
        net_roi: whole(net_roi),
        roi_percentage,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn whole(value: f64) -> i64 {
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_inputs_for_five_thousand_trucks() {
        let roi = estimate_roi(&RoiInputs::for_fleet(5_000));
        assert_eq!(roi.hours_saved, 1_460_000);
        assert_eq!(roi.violations_prevented, 12);
        assert_eq!(roi.call_cost_savings, 20_440_000);
        assert_eq!(roi.violation_cost_savings, 30_000);
        assert_eq!(roi.retention_savings, 3_750_000);
        assert_eq!(roi.total_savings, 24_220_000);
        assert_eq!(roi.implementation_cost, 250_000);
        assert_eq!(roi.net_roi, 23_970_000);
        assert_eq!(roi.roi_percentage, Some(9_588));
    }

    #[test]
    fn small_fleet() {
        let roi = estimate_roi(&RoiInputs::for_fleet(100));
        assert_eq!(roi.hours_saved, 29_200);
        assert_eq!(roi.call_cost_savings, 408_800);
        assert_eq!(roi.retention_savings, 75_000);
        assert_eq!(roi.total_savings, 513_800);
        assert_eq!(roi.implementation_cost, 5_000);
        assert_eq!(roi.net_roi, 508_800);
        assert_eq!(roi.roi_percentage, Some(10_176));
    }

    #[test]
    fn violations_prevented_rounds_half_of_yearly_count() {
        let inputs = RoiInputs {
            violations_per_month: 0.25,
            ..RoiInputs::for_fleet(1_000)
        };
        // 3 per year, half is 1.5, rounded to 2
        let roi = estimate_roi(&inputs);
        assert_eq!(roi.violations_prevented, 2);
        assert_eq!(roi.violation_cost_savings, 5_000);
    }

    #[test]
    fn empty_fleet_has_no_percentage() {
        let roi = estimate_roi(&RoiInputs::for_fleet(0));
        assert_eq!(roi.implementation_cost, 0);
        assert_eq!(roi.total_savings, 30_000);
        assert_eq!(roi.roi_percentage, None);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(estimate_roi(&RoiInputs::for_fleet(100))).expect("json");
        assert_eq!(json["netRoi"], 508_800);
        assert_eq!(json["inputs"]["dailyCallsPerTruck"], 4.0);
    }
}
