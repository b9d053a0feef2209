use crate::error::LengthError;

/// Exact, 1 / 0.3048.
pub const INTERNATIONAL_FEET_PER_METER: f64 = 3.280839895013123;

/// Approximation of the exact 0.999998000004 ratio, kept for output compatibility with existing
/// length reports.
pub const US_SURVEY_FEET_PER_INTERNATIONAL_FOOT: f64 = 0.999998;

pub const FEET_PER_MILE: f64 = 5280.0;

pub fn meters_to_international_feet(meters: f64) -> f64 {
    meters * INTERNATIONAL_FEET_PER_METER
}

/// Linear unit of a CRS, classified from the unit name reported by GDAL.
#[derive(Debug, Clone, PartialEq)]
pub enum LinearUnit {
    Meter,
    UsSurveyFoot,
    InternationalFoot,
    Degree,
    Unrecognized(String),
}

impl LinearUnit {
    /// Classify a unit name. Accepts the OGC/PROJ names ("metre", "US survey foot", "foot",
    /// "degree") as well as the ESRI spellings found in `.prj` files ("Meter", "Foot_US").
    pub fn from_name(name: &str) -> Self {
        let normalized = name.trim().to_lowercase();
        match normalized.as_str() {
            "metre" | "meter" | "m" => LinearUnit::Meter,
            "us survey foot" | "foot_us" | "us_survey_foot" | "foot_survey_us" | "ftus" => {
                LinearUnit::UsSurveyFoot
            }
            "foot" | "international foot" | "international_foot" | "ft" => {
                LinearUnit::InternationalFoot
            }
            // GDAL appends the definition source for some geographic CRSs, e.g.
            // "degree (supplied to define the CRS)".
            unit if unit == "degree" || unit.starts_with("degree ") => LinearUnit::Degree,
            _ => LinearUnit::Unrecognized(name.to_string()),
        }
    }
}

/// Convert a length accumulated in `unit` to feet.
///
/// Meters become international feet, international feet become US survey feet, and US survey
/// feet are kept as they are. Degree lengths only arise after lines were reprojected to UTM, so
/// they are meters and converted as such.
pub fn to_feet(length: f64, unit: &LinearUnit) -> Result<f64, LengthError> {
    match unit {
        LinearUnit::Meter | LinearUnit::Degree => Ok(meters_to_international_feet(length)),
        LinearUnit::UsSurveyFoot => Ok(length),
        LinearUnit::InternationalFoot => Ok(length * US_SURVEY_FEET_PER_INTERNATIONAL_FOOT),
        LinearUnit::Unrecognized(name) => Err(LengthError::UnsupportedUnit(name.clone())),
    }
}

/// Miles, rounded to three decimals.
pub fn feet_to_rounded_miles(feet: f64) -> f64 {
    round_to_decimals(feet / FEET_PER_MILE, 3)
}

/// Rounds the exact binary value of `value`. Scaling by 10^decimals first would round twice and
/// bump values just below a half step, e.g. 1.0005 to 1.001.
fn round_to_decimals(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}
