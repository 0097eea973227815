//! Simulated weather lookup
//!
//! Known West Java cities have fixed readings; any other location gets a
//! reading derived from its name so the same query always answers the same.

use super::{str_param, ParamType, ParameterSchema, Tool, ToolResult};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

struct Reading {
    temp_c: f64,
    condition: &'static str,
    humidity: u8,
}

const KNOWN: &[(&str, f64, &str, u8)] = &[
    ("bandung", 23.0, "Cloudy (mendung)", 78),
    ("jakarta", 31.0, "Sunny (cerah)", 70),
    ("bogor", 24.0, "Rain showers (hujan)", 90),
    ("garut", 22.0, "Partly cloudy (rada mendung)", 80),
    ("tasikmalaya", 26.0, "Sunny (cerah)", 75),
    ("cirebon", 30.0, "Hot and humid (hareudang)", 72),
];

const CONDITIONS: &[&str] = &[
    "Sunny (cerah)",
    "Cloudy (mendung)",
    "Rain showers (hujan)",
    "Windy (angin)",
];

fn reading_for(location: &str) -> Reading {
    let key = location.trim().to_lowercase();
    if let Some((_, temp_c, condition, humidity)) = KNOWN.iter().find(|(name, ..)| *name == key) {
        return Reading {
            temp_c: *temp_c,
            condition: *condition,
            humidity: *humidity,
        };
    }

    let sum: u32 = key.bytes().map(u32::from).sum();
    Reading {
        temp_c: 15.0 + f64::from(sum % 16),
        condition: CONDITIONS[(sum as usize / 7) % CONDITIONS.len()],
        humidity: 55 + (sum % 40) as u8,
    }
}

/// Tool that simulates a weather report
pub struct WeatherTool;

impl WeatherTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WeatherTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "weather"
    }

    fn description(&self) -> &str {
        "Get current weather for a location (demo: simulated readings)."
    }

    fn parameters(&self) -> ParameterSchema {
        ParameterSchema::new()
            .required("location", ParamType::String, "City name")
            .optional(
                "unit",
                ParamType::String,
                "\"celsius\" (default) or \"fahrenheit\"",
            )
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let location = str_param(&params, "location")
            .ok_or_else(|| anyhow::anyhow!("Location must not be empty"))?;
        let reading = reading_for(location);

        let (temp, unit) = match str_param(&params, "unit").map(str::to_lowercase).as_deref() {
            None | Some("celsius") | Some("c") => (reading.temp_c, "°C"),
            Some("fahrenheit") | Some("f") => (reading.temp_c * 9.0 / 5.0 + 32.0, "°F"),
            Some(other) => anyhow::bail!("Unsupported unit: {}", other),
        };

        Ok(ToolResult::success(format!(
            "Weather in {}: {}, {:.0}{}, humidity {}%",
            location, reading.condition, temp, unit, reading.humidity
        )))
    }
}
