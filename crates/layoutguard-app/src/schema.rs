//! JSON Schemas for the config file and the report.

use anyhow::Context;
use layoutguard_settings::LayoutguardConfigV1;
use layoutguard_types::LayoutguardReport;

pub fn config_schema_json() -> anyhow::Result<String> {
    let schema = schemars::schema_for!(LayoutguardConfigV1);
    serde_json::to_string_pretty(&schema).context("serialize config schema")
}

pub fn report_schema_json() -> anyhow::Result<String> {
    let schema = schemars::schema_for!(LayoutguardReport);
    serde_json::to_string_pretty(&schema).context("serialize report schema")
}
