//! Adapters for historically-evolved saved-document shapes.
//!
//! Documents persisted by earlier releases stored service payloads three
//! different ways: flat numeric fields, `{value, type}` display wrappers,
//! and (oldest) string-encoded `"count|rate"` combos. Each adapter is a pure
//! `raw payload -> field map` function; they are tried newest-first and the
//! first one that yields any usable field wins. Unrecognized fields are
//! dropped silently -- a malformed field never fails a document load.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;

use super::forms::*;
use super::frequency::Frequency;
use super::money::decimal_from_value;
use super::service::ServiceKind;

type FieldMap = BTreeMap<String, Decimal>;

/// `fixtureCount` → `fixture_count`, lowercased.
fn normalize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '-' || c == ' ' {
            out.push('_');
        } else {
            out.push(c);
        }
    }
    out
}

/// Current schema: plain numbers (or numeric strings) keyed by field name.
fn adapt_flat(obj: &serde_json::Map<String, Value>) -> FieldMap {
    let mut map = FieldMap::new();
    for (key, value) in obj {
        if matches!(value, Value::Number(_) | Value::String(_)) {
            if value.as_str().map(|s| s.contains('|')).unwrap_or(false) {
                continue; // combo encoding, handled by the oldest adapter
            }
            if let Some(d) = decimal_from_value(value) {
                map.insert(normalize_key(key), d);
            }
        }
    }
    map
}

/// Intermediate schema: each field wrapped as `{ "value": ..., "type": ... }`
/// for display formatting.
fn adapt_display_wrapped(obj: &serde_json::Map<String, Value>) -> FieldMap {
    let mut map = FieldMap::new();
    for (key, value) in obj {
        if let Value::Object(inner) = value {
            if let Some(d) = inner.get("value").and_then(decimal_from_value) {
                map.insert(normalize_key(key), d);
            }
        }
    }
    map
}

/// Oldest schema: `"count|rate"` strings, e.g. `"fixtures": "3|5.50"`.
fn adapt_string_combo(obj: &serde_json::Map<String, Value>) -> FieldMap {
    let mut map = FieldMap::new();
    for (key, value) in obj {
        let Some(s) = value.as_str() else { continue };
        let Some((count, rate)) = s.split_once('|') else { continue };
        let key = normalize_key(key);
        if let Some(d) = decimal_from_value(&Value::String(count.to_string())) {
            map.insert(key.clone(), d);
        }
        if let Some(d) = decimal_from_value(&Value::String(rate.to_string())) {
            map.insert(format!("{key}_rate"), d);
        }
    }
    map
}

/// Run the adapter cascade over one service payload.
pub fn numeric_fields(raw: &Value) -> FieldMap {
    let Value::Object(obj) = raw else {
        return FieldMap::new();
    };
    for adapter in [adapt_flat, adapt_display_wrapped, adapt_string_combo] {
        let map = adapter(obj);
        if !map.is_empty() {
            return map;
        }
    }
    FieldMap::new()
}

fn field(map: &FieldMap, aliases: &[&str]) -> Option<Decimal> {
    aliases.iter().find_map(|a| map.get(*a).copied())
}

fn bool_field(raw: &Value, aliases: &[&str]) -> bool {
    aliases
        .iter()
        .find_map(|a| raw.get(*a).and_then(Value::as_bool))
        .unwrap_or(false)
}

fn frequency_field(raw: &Value, default: Frequency) -> Frequency {
    raw.get("frequency")
        .or_else(|| raw.get("serviceFrequency"))
        .and_then(Value::as_str)
        .and_then(Frequency::parse_loose)
        .unwrap_or(default)
}

fn custom_lines(raw: &Value) -> Vec<CustomLine> {
    let items = raw
        .get("custom_lines")
        .or_else(|| raw.get("customFields"))
        .and_then(Value::as_array);
    let Some(items) = items else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let label = item
                .get("label")
                .or_else(|| item.get("name"))
                .and_then(Value::as_str)?
                .to_string();
            let amount = item
                .get("amount")
                .or_else(|| item.get("price"))
                .and_then(decimal_from_value);
            Some(CustomLine { label, amount })
        })
        .collect()
}

fn sani_clean_from(raw: &Value) -> SaniCleanForm {
    let map = numeric_fields(raw);
    let location = raw
        .get("location")
        .and_then(Value::as_str)
        .map(normalize_key);
    SaniCleanForm {
        fixtures: field(&map, &["fixtures", "fixture_count"]),
        location: match location.as_deref() {
            Some("outside_beltway") | Some("outside") => Geography::OutsideBeltway,
            _ => Geography::InsideBeltway,
        },
        all_inclusive: bool_field(raw, &["all_inclusive", "allInclusive"]),
        first_time_install: bool_field(raw, &["first_time_install", "firstTimeInstall"]),
        dirty_install: bool_field(raw, &["dirty_install", "dirtyInstall"]),
        frequency: frequency_field(raw, Frequency::Weekly),
        fixture_rate: field(&map, &["fixture_rate", "fixtures_rate", "rate_per_fixture"]),
        minimum_per_visit: field(&map, &["minimum_per_visit", "minimum"]),
        custom_per_visit: field(&map, &["custom_per_visit", "custom_per_visit_total"]),
        custom_monthly: field(&map, &["custom_monthly", "custom_monthly_total"]),
        custom_lines: custom_lines(raw),
    }
}

fn sani_scrub_from(raw: &Value) -> SaniScrubForm {
    let map = numeric_fields(raw);
    SaniScrubForm {
        fixtures: field(&map, &["fixtures", "fixture_count"]),
        non_bathroom_sqft: field(&map, &["non_bathroom_sqft", "non_bathroom_area", "area_sqft"]),
        frequency: frequency_field(raw, Frequency::Monthly),
        fixture_rate: field(&map, &["fixture_rate", "fixtures_rate", "rate_per_fixture"]),
        custom_per_visit: field(&map, &["custom_per_visit", "custom_per_visit_total"]),
        custom_monthly: field(&map, &["custom_monthly", "custom_monthly_total"]),
        custom_lines: custom_lines(raw),
    }
}

fn rpm_windows_from(raw: &Value) -> RpmWindowForm {
    let map = numeric_fields(raw);
    RpmWindowForm {
        inside_panes: field(&map, &["inside_panes", "panes_inside"]),
        outside_panes: field(&map, &["outside_panes", "panes_outside"]),
        frequency: frequency_field(raw, Frequency::Monthly),
        inside_pane_rate: field(&map, &["inside_pane_rate", "inside_panes_rate"]),
        outside_pane_rate: field(&map, &["outside_pane_rate", "outside_panes_rate"]),
        custom_per_visit: field(&map, &["custom_per_visit", "custom_per_visit_total"]),
        custom_monthly: field(&map, &["custom_monthly", "custom_monthly_total"]),
        custom_lines: custom_lines(raw),
    }
}

fn power_scrub_from(raw: &Value) -> PowerScrubForm {
    let areas = raw
        .get("areas")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let area = match item.get("area").and_then(Value::as_str).map(normalize_key)?.as_str() {
                        "dumpster_pad" | "dumpster" => ScrubArea::DumpsterPad,
                        "sidewalk" => ScrubArea::Sidewalk,
                        "patio" => ScrubArea::Patio,
                        "drive_thru" | "drive_through" => ScrubArea::DriveThru,
                        _ => return None,
                    };
                    let map = numeric_fields(item);
                    Some(ScrubAreaSelection {
                        area,
                        enabled: item.get("enabled").and_then(Value::as_bool).unwrap_or(true),
                        sqft: field(&map, &["sqft", "square_feet"]),
                        rate: field(&map, &["rate", "sqft_rate"]),
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    let map = numeric_fields(raw);
    PowerScrubForm {
        areas,
        frequency: frequency_field(raw, Frequency::Monthly),
        custom_per_visit: field(&map, &["custom_per_visit", "custom_per_visit_total"]),
        custom_monthly: field(&map, &["custom_monthly", "custom_monthly_total"]),
        custom_lines: custom_lines(raw),
    }
}

fn janitorial_from(raw: &Value) -> JanitorialForm {
    let map = numeric_fields(raw);
    JanitorialForm {
        hours: field(&map, &["hours", "hours_per_visit"]),
        workers: field(&map, &["workers", "worker_count"]),
        frequency: frequency_field(raw, Frequency::Weekly),
        hourly_rate: field(&map, &["hourly_rate", "hours_rate", "rate_per_hour"]),
        custom_per_visit: field(&map, &["custom_per_visit", "custom_per_visit_total"]),
        custom_monthly: field(&map, &["custom_monthly", "custom_monthly_total"]),
        custom_lines: custom_lines(raw),
    }
}

fn sanipod_from(raw: &Value) -> SanipodForm {
    let map = numeric_fields(raw);
    SanipodForm {
        pods: field(&map, &["pods", "pod_count", "units"]),
        frequency: frequency_field(raw, Frequency::Weekly),
        pod_rate: field(&map, &["pod_rate", "pods_rate", "rate_per_pod"]),
        custom_per_visit: field(&map, &["custom_per_visit", "custom_per_visit_total"]),
        custom_monthly: field(&map, &["custom_monthly", "custom_monthly_total"]),
        custom_lines: custom_lines(raw),
    }
}

fn foaming_drain_from(raw: &Value) -> FoamingDrainForm {
    let map = numeric_fields(raw);
    FoamingDrainForm {
        drains: field(&map, &["drains", "drain_count"]),
        frequency: frequency_field(raw, Frequency::Monthly),
        drain_rate: field(&map, &["drain_rate", "drains_rate", "rate_per_drain"]),
        custom_per_visit: field(&map, &["custom_per_visit", "custom_per_visit_total"]),
        custom_monthly: field(&map, &["custom_monthly", "custom_monthly_total"]),
        custom_lines: custom_lines(raw),
    }
}

fn carpet_clean_from(raw: &Value) -> CarpetCleanForm {
    let map = numeric_fields(raw);
    let method = raw
        .get("method")
        .and_then(Value::as_str)
        .map(normalize_key);
    CarpetCleanForm {
        sqft: field(&map, &["sqft", "square_feet", "carpet_sqft"]),
        method: match method.as_deref() {
            Some("bonnet") => CarpetMethod::Bonnet,
            _ => CarpetMethod::HotWaterExtraction,
        },
        frequency: frequency_field(raw, Frequency::Quarterly),
        sqft_rate: field(&map, &["sqft_rate", "rate_per_sqft"]),
        custom_per_visit: field(&map, &["custom_per_visit", "custom_per_visit_total"]),
        custom_monthly: field(&map, &["custom_monthly", "custom_monthly_total"]),
        custom_lines: custom_lines(raw),
    }
}

fn strip_wax_from(raw: &Value) -> StripWaxForm {
    let map = numeric_fields(raw);
    StripWaxForm {
        sqft: field(&map, &["sqft", "square_feet", "floor_sqft"]),
        frequency: frequency_field(raw, Frequency::Biannual),
        sqft_rate: field(&map, &["sqft_rate", "rate_per_sqft"]),
        custom_per_visit: field(&map, &["custom_per_visit", "custom_per_visit_total"]),
        custom_monthly: field(&map, &["custom_monthly", "custom_monthly_total"]),
        custom_lines: custom_lines(raw),
    }
}

fn grease_trap_from(raw: &Value) -> GreaseTrapForm {
    let map = numeric_fields(raw);
    GreaseTrapForm {
        traps: field(&map, &["traps", "trap_count"]),
        frequency: frequency_field(raw, Frequency::Quarterly),
        trap_rate: field(&map, &["trap_rate", "traps_rate", "rate_per_trap"]),
        custom_per_visit: field(&map, &["custom_per_visit", "custom_per_visit_total"]),
        custom_monthly: field(&map, &["custom_monthly", "custom_monthly_total"]),
        custom_lines: custom_lines(raw),
    }
}

fn electrostatic_from(raw: &Value) -> ElectrostaticForm {
    let map = numeric_fields(raw);
    ElectrostaticForm {
        sqft: field(&map, &["sqft", "square_feet"]),
        rooms: field(&map, &["rooms", "room_count"]),
        frequency: frequency_field(raw, Frequency::Monthly),
        room_rate: field(&map, &["room_rate", "rooms_rate", "rate_per_room"]),
        custom_per_visit: field(&map, &["custom_per_visit", "custom_per_visit_total"]),
        custom_monthly: field(&map, &["custom_monthly", "custom_monthly_total"]),
        custom_lines: custom_lines(raw),
    }
}

fn microfiber_from(raw: &Value) -> MicrofiberForm {
    let map = numeric_fields(raw);
    MicrofiberForm {
        stations: field(&map, &["stations", "station_count", "mop_stations"]),
        frequency: frequency_field(raw, Frequency::Weekly),
        station_rate: field(&map, &["station_rate", "stations_rate", "rate_per_station"]),
        custom_per_visit: field(&map, &["custom_per_visit", "custom_per_visit_total"]),
        custom_monthly: field(&map, &["custom_monthly", "custom_monthly_total"]),
        custom_lines: custom_lines(raw),
    }
}

fn global_charge(raw: &Value, keys: &[&str], default_frequency: Frequency) -> GlobalCharge {
    for key in keys {
        let Some(node) = raw.get(*key) else { continue };
        // Newer documents: { amount, frequency }; older: a bare number.
        if let Some(amount) = decimal_from_value(node) {
            return GlobalCharge {
                amount: Some(amount),
                frequency: default_frequency,
            };
        }
        if node.is_object() {
            let amount = node.get("amount").and_then(decimal_from_value);
            let frequency = node
                .get("frequency")
                .and_then(Value::as_str)
                .and_then(Frequency::parse_loose)
                .unwrap_or(default_frequency);
            return GlobalCharge { amount, frequency };
        }
    }
    GlobalCharge {
        amount: None,
        frequency: default_frequency,
    }
}

/// Fold a persisted document (any recognized vintage) into the canonical
/// agreement form. Services live either under a `services` object or at the
/// top level keyed by service key.
pub fn agreement_from_document(raw: &Value) -> AgreementForm {
    let services = raw.get("services").unwrap_or(raw);
    let payload = |kind: ServiceKind| {
        services
            .get(kind.key())
            .filter(|v| v.is_object())
    };

    AgreementForm {
        contract_months: raw
            .get("contract_months")
            .or_else(|| raw.get("contractMonths"))
            .and_then(decimal_from_value)
            .and_then(|d| d.to_u32())
            .filter(|m| *m > 0)
            .unwrap_or(12),
        primary_frequency: raw
            .get("primary_frequency")
            .or_else(|| raw.get("primaryFrequency"))
            .and_then(Value::as_str)
            .and_then(Frequency::parse_loose),
        trip_charge: global_charge(raw, &["trip_charge", "tripCharge"], Frequency::Monthly),
        parking_charge: global_charge(raw, &["parking_charge", "parkingCharge"], Frequency::Monthly),
        sani_clean: payload(ServiceKind::SaniClean).map(sani_clean_from),
        sani_scrub: payload(ServiceKind::SaniScrub).map(sani_scrub_from),
        rpm_windows: payload(ServiceKind::RpmWindows).map(rpm_windows_from),
        power_scrub: payload(ServiceKind::PowerScrub).map(power_scrub_from),
        janitorial: payload(ServiceKind::Janitorial).map(janitorial_from),
        sanipod: payload(ServiceKind::Sanipod).map(sanipod_from),
        foaming_drain: payload(ServiceKind::FoamingDrain).map(foaming_drain_from),
        carpet_clean: payload(ServiceKind::CarpetClean).map(carpet_clean_from),
        strip_wax: payload(ServiceKind::StripWax).map(strip_wax_from),
        grease_trap: payload(ServiceKind::GreaseTrap).map(grease_trap_from),
        electrostatic: payload(ServiceKind::Electrostatic).map(electrostatic_from),
        microfiber: payload(ServiceKind::Microfiber).map(microfiber_from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn flat_schema_wins_over_wrappers() {
        let raw = json!({ "fixtures": 4, "fixture_rate": "5.25" });
        let map = numeric_fields(&raw);
        assert_eq!(map.get("fixtures"), Some(&dec!(4)));
        assert_eq!(map.get("fixture_rate"), Some(&dec!(5.25)));
    }

    #[test]
    fn display_wrapped_schema_is_accepted() {
        let raw = json!({
            "fixtures": { "value": "6", "type": "number" },
            "fixtureRate": { "value": 4.75, "type": "currency" }
        });
        let map = numeric_fields(&raw);
        assert_eq!(map.get("fixtures"), Some(&dec!(6)));
        assert_eq!(map.get("fixture_rate"), Some(&dec!(4.75)));
    }

    #[test]
    fn string_combo_schema_splits_count_and_rate() {
        let raw = json!({ "fixtures": "3|5.50" });
        let map = numeric_fields(&raw);
        assert_eq!(map.get("fixtures"), Some(&dec!(3)));
        assert_eq!(map.get("fixtures_rate"), Some(&dec!(5.50)));
    }

    #[test]
    fn unrecognized_fields_are_dropped_not_fatal() {
        let raw = json!({ "fixtures": 2, "weird": {"nested": [1, 2]}, "note": "call first" });
        let map = numeric_fields(&raw);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn document_load_recovers_forms_and_globals() {
        let raw = json!({
            "contractMonths": 24,
            "tripCharge": { "amount": "15", "frequency": "weekly" },
            "parkingCharge": 10,
            "services": {
                "sani_clean": {
                    "fixtures": "5",
                    "allInclusive": true,
                    "frequency": "1x per week"
                },
                "janitorial": {
                    "hours": { "value": 2.5 },
                    "workers": { "value": 2 }
                }
            }
        });
        let form = agreement_from_document(&raw);
        assert_eq!(form.contract_months, 24);
        assert_eq!(form.trip_charge.amount, Some(dec!(15)));
        assert_eq!(form.trip_charge.frequency, Frequency::Weekly);
        assert_eq!(form.parking_charge.amount, Some(dec!(10)));

        let sani = form.sani_clean.expect("sani_clean form");
        assert_eq!(sani.fixtures, Some(dec!(5)));
        assert!(sani.all_inclusive);
        assert_eq!(sani.frequency, Frequency::Weekly);

        let jan = form.janitorial.expect("janitorial form");
        assert_eq!(jan.hours, Some(dec!(2.5)));
        assert_eq!(jan.workers, Some(dec!(2)));
        assert!(form.carpet_clean.is_none());
    }
}
