//! Pricing payload normalization.
//!
//! Two generations of the pricing agent are in the wild: one writes a
//! structured `pricing_check` object (cost range, breakdown, feasibility,
//! funding recommendations), the other a flat line-item table. Both are
//! reconciled here; anything else falls through to the raw variant.

use rfx_protocol::{
    BreakdownRow, CostRange, FeasibilityVerdict, FundingRecommendation, LineItem, PricingView,
    StructuredEstimate, TabularEstimate,
};
use serde_json::Value;

use crate::normalize::fields::{
    first_array, first_f64, first_str, format_bare, format_currency, resolve_currency,
};

/// Recognized breakdown keys and their display labels, in fixed display
/// order. Unrecognized keys are not rendered.
const BREAKDOWN_LABELS: [(&str, &str); 6] = [
    ("infra_monthly", "Infrastructure (monthly)"),
    ("migration_per_app_total", "Application migration"),
    ("data_migration_total", "Data migration"),
    ("pm_and_testing", "PM & testing"),
    ("contingency", "Contingency"),
    ("duration_months", "Duration (months)"),
];

/// Normalize a pricing payload into one of the three canonical variants.
pub fn normalize_pricing(payload: &Value) -> PricingView {
    if let Some(check) = payload.get("pricing_check") {
        return structured(check);
    }
    if let Some(items) = tabular_items(payload) {
        return tabular(items);
    }
    PricingView::RawFallback {
        raw: payload.clone(),
    }
}

fn structured(check: &Value) -> PricingView {
    let range = check.get("estimated_cost_range");
    let currency = resolve_currency(
        range
            .and_then(|r| r.get("currency"))
            .and_then(Value::as_str),
    );
    let cost_range = CostRange {
        low: range.and_then(|r| first_f64(r, &["low"])).unwrap_or(0.0),
        high: range.and_then(|r| first_f64(r, &["high"])).unwrap_or(0.0),
        currency: currency.clone(),
    };

    let breakdown = check
        .get("breakdown")
        .map(|rows| render_breakdown(rows, &currency))
        .unwrap_or_default();

    let feasibility = check.get("feasibility").map(|f| {
        let verdict = first_str(f, &["feasibility", "verdict"])
            .unwrap_or("Unknown")
            .to_string();
        FeasibilityVerdict {
            feasible: verdict.eq_ignore_ascii_case("feasible"),
            funding_gap_absolute: first_f64(f, &["funding_gap_absolute"]),
            funding_gap_pct: first_f64(f, &["funding_gap_pct"]),
            verdict,
        }
    });

    let funding_recommendations = check
        .get("funding_recommendations")
        .and_then(Value::as_array)
        .map(|recs| {
            recs.iter()
                .map(|rec| FundingRecommendation {
                    rec_type: first_str(rec, &["type", "kind"]).unwrap_or("Funding").to_string(),
                    amount: first_f64(rec, &["amount"]).unwrap_or(0.0),
                    rationale: first_str(rec, &["rationale", "reason"])
                        .unwrap_or_default()
                        .to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    let summary = first_str(check, &["llm_summary", "summary"]).map(str::to_string);

    PricingView::Structured(StructuredEstimate {
        cost_range,
        breakdown,
        feasibility,
        funding_recommendations,
        summary,
    })
}

/// Render recognized breakdown rows in the fixed label-table order.
///
/// `duration_months` is a bare number; every other row is an amount in
/// the resolved currency.
fn render_breakdown(rows: &Value, currency: &str) -> Vec<BreakdownRow> {
    BREAKDOWN_LABELS
        .iter()
        .copied()
        .filter_map(|(key, label)| {
            let amount = first_f64(rows, &[key])?;
            let value = if key == "duration_months" {
                format_bare(amount)
            } else {
                format_currency(amount, currency)
            };
            Some(BreakdownRow {
                key: key.to_string(),
                label: label.to_string(),
                value,
            })
        })
        .collect()
}

/// Locate the line-item array: the payload itself, or a conventional
/// wrapper field.
fn tabular_items(payload: &Value) -> Option<&Vec<Value>> {
    if let Some(items) = payload.as_array() {
        return Some(items);
    }
    first_array(payload, &["items", "lineItems", "line_items", "pricing"])
}

fn tabular(items: &[Value]) -> PricingView {
    let line_items: Vec<LineItem> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let description = first_str(item, &["description", "item", "name", "label"])
                .map(str::to_string)
                .unwrap_or_else(|| format!("Line {}", index + 1));
            let quantity = first_f64(item, &["quantity", "qty", "units"]).unwrap_or(1.0);
            let unit_price = first_f64(
                item,
                &["unitPrice", "pricePerUnit", "unit_rate", "rate", "unit_price", "price"],
            )
            .unwrap_or(0.0);
            let total = first_f64(item, &["total", "extendedPrice", "amount"])
                .unwrap_or(quantity * unit_price);
            LineItem {
                description,
                quantity,
                unit_price,
                total,
            }
        })
        .collect();

    let grand_total = line_items.iter().map(|item| item.total).sum();
    PricingView::Tabular(TabularEstimate {
        line_items,
        grand_total,
    })
}
