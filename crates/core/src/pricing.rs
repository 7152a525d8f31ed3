//! Pricing engine.
//!
//! Computes the base cost of a print run from slicing results and the
//! cost constants kept in the catalog tables. Pure arithmetic on f64;
//! callers convert the result to cents at the storage boundary.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const DEFAULT_COST_PER_MIN: f64 = 0.50;
pub const DEFAULT_COST_PER_KG: f64 = 20.00;
pub const DEFAULT_MARKUP: f64 = 1.6;
pub const DEFAULT_PROFILE_MULTIPLIER: f64 = 1.05;

/// Cost constants resolved from print profile and material rows, with
/// defaults filling any gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostConstants {
    pub cost_per_min: f64,
    pub cost_per_kg: f64,
    pub markup: f64,
    pub profile_multiplier: f64,
}

impl Default for CostConstants {
    fn default() -> Self {
        CostConstants {
            cost_per_min: DEFAULT_COST_PER_MIN,
            cost_per_kg: DEFAULT_COST_PER_KG,
            markup: DEFAULT_MARKUP,
            profile_multiplier: DEFAULT_PROFILE_MULTIPLIER,
        }
    }
}

impl CostConstants {
    /// Overlay values from a print profile row. `None` fields keep the
    /// defaults.
    pub fn with_profile(
        mut self,
        cost_multiplier: Option<f64>,
        markup_multiplier: Option<f64>,
        cost_per_min: Option<f64>,
    ) -> Self {
        if let Some(multiplier) = cost_multiplier {
            self.profile_multiplier = multiplier;
        }
        if let Some(markup) = markup_multiplier {
            self.markup = markup;
        }
        if let Some(per_min) = cost_per_min {
            self.cost_per_min = per_min;
        }
        self
    }

    /// Overlay the material's cost per kilogram.
    pub fn with_material(mut self, cost_per_kg: Option<f64>) -> Self {
        if let Some(per_kg) = cost_per_kg {
            self.cost_per_kg = per_kg;
        }
        self
    }
}

/// Slicing results plus the knobs an admin may turn per quote.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PricingInput {
    pub print_time_min: f64,
    pub material_g: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub manual_surcharge: f64,
}

fn default_quantity() -> u32 {
    1
}

/// Result of a pricing run. The markup factor is returned alongside so
/// the admin endpoint can apply it when turning the estimate into a
/// final quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingResult {
    pub base_cost: f64,
    pub markup_factor: f64,
}

/// Compute the base cost for a print run.
///
/// Material and runtime costs are summed per unit, scaled by the
/// profile multiplier, multiplied by the quantity, and topped up with
/// the manual surcharge. Markup and VAT are applied downstream.
pub fn calculate_pricing(
    input: PricingInput,
    constants: CostConstants,
) -> Result<PricingResult, CoreError> {
    if !input.print_time_min.is_finite() || input.print_time_min < 0.0 {
        return Err(CoreError::Validation(format!(
            "print time must be a non-negative number of minutes, got {}",
            input.print_time_min
        )));
    }
    if !input.material_g.is_finite() || input.material_g < 0.0 {
        return Err(CoreError::Validation(format!(
            "material weight must be a non-negative number of grams, got {}",
            input.material_g
        )));
    }
    if input.quantity == 0 {
        return Err(CoreError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }
    if !input.manual_surcharge.is_finite() || input.manual_surcharge < 0.0 {
        return Err(CoreError::Validation(format!(
            "surcharge must be a non-negative amount, got {}",
            input.manual_surcharge
        )));
    }

    let material_cost = (input.material_g / 1000.0) * constants.cost_per_kg;
    let runtime_cost = input.print_time_min * constants.cost_per_min;
    let raw_cost_per_unit = (material_cost + runtime_cost) * constants.profile_multiplier;
    let base_cost = raw_cost_per_unit * f64::from(input.quantity) + input.manual_surcharge;

    Ok(PricingResult {
        base_cost,
        markup_factor: constants.markup,
    })
}
