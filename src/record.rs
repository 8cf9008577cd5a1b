//! Record types for the Electric Vehicle Population dataset.

use serde::{Deserialize, Deserializer, Serialize};

/// Source literal identifying a battery electric vehicle.
pub const BEV_LABEL: &str = "Battery Electric Vehicle (BEV)";
/// Source literal identifying a plug-in hybrid.
pub const PHEV_LABEL: &str = "Plug-in Hybrid Electric Vehicle (PHEV)";

/// Electric vehicle drivetrain category.
///
/// The dataset uses exactly two literal strings for this column; anything
/// else is treated as "neither" (`None` on the record) and stays out of the
/// type-specific counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VehicleType {
    #[serde(rename = "Battery Electric Vehicle (BEV)")]
    BatteryElectric,
    #[serde(rename = "Plug-in Hybrid Electric Vehicle (PHEV)")]
    PluginHybrid,
}

impl VehicleType {
    /// Matches the two known source literals exactly.
    pub fn from_source(raw: &str) -> Option<Self> {
        match raw {
            BEV_LABEL => Some(VehicleType::BatteryElectric),
            PHEV_LABEL => Some(VehicleType::PluginHybrid),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::BatteryElectric => BEV_LABEL,
            VehicleType::PluginHybrid => PHEV_LABEL,
        }
    }
}

/// One row of the source dataset.
///
/// Numeric columns use `Option` rather than a sentinel zero: the source data
/// writes an empty or unparsable value when a year, range, or MSRP is
/// unknown, and `None` keeps that distinct from a legitimate zero.
/// Missing columns deserialize to their defaults, never to an error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VehicleRecord {
    #[serde(default, rename = "VIN (1-10)")]
    pub vin: String,
    #[serde(default, rename = "County")]
    pub county: String,
    #[serde(default, rename = "City")]
    pub city: String,
    #[serde(default, rename = "State")]
    pub state: String,
    #[serde(default, rename = "Postal Code")]
    pub postal_code: String,
    #[serde(default, rename = "Model Year", deserialize_with = "lenient_u16")]
    pub model_year: Option<u16>,
    #[serde(default, rename = "Make")]
    pub make: String,
    #[serde(default, rename = "Model")]
    pub model: String,
    #[serde(
        default,
        rename = "Electric Vehicle Type",
        deserialize_with = "lenient_vehicle_type"
    )]
    pub vehicle_type: Option<VehicleType>,
    #[serde(default, rename = "Clean Alternative Fuel Vehicle (CAFV) Eligibility")]
    pub cafv_eligibility: String,
    #[serde(default, rename = "Electric Range", deserialize_with = "lenient_u32")]
    pub electric_range: Option<u32>,
    #[serde(default, rename = "Base MSRP", deserialize_with = "lenient_u32")]
    pub base_msrp: Option<u32>,
    #[serde(default, rename = "Legislative District")]
    pub legislative_district: String,
    #[serde(default, rename = "DOL Vehicle ID")]
    pub dol_vehicle_id: String,
    #[serde(default, rename = "Vehicle Location")]
    pub vehicle_location: String,
    #[serde(default, rename = "Electric Utility")]
    pub electric_utility: String,
    #[serde(default, rename = "2020 Census Tract")]
    pub census_tract: String,
}

/// Coercion contract for numeric columns: parse as integer, otherwise `None`.
/// A parse failure is never propagated as an error.
fn lenient_u16<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().ok())
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().ok())
}

fn lenient_vehicle_type<'de, D>(deserializer: D) -> Result<Option<VehicleType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(VehicleType::from_source(raw.trim()))
}
