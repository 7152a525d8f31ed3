//! Bill-of-materials parsing and expansion into production jobs.
//!
//! A BOM document lists parts inside assemblies plus loose parts. Only
//! parts that are printed in house survive the filter, and each unit of
//! a part's quantity becomes its own job on the print queue.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Process tag for parts printed on our own machines.
pub const PROCESS_FDM_PRINT: &str = "FDM_PRINT";

const DEFAULT_NOZZLE_DIAMETER: f64 = 0.4;
const DEFAULT_JOB_PRIORITY: i32 = 3;

#[derive(Debug, Clone, Deserialize)]
pub struct BomDocument {
    #[serde(default)]
    pub assemblies: Vec<BomAssembly>,
    #[serde(default)]
    pub loose_parts: Vec<BomPart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BomAssembly {
    #[serde(default)]
    pub parts: Vec<BomPart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BomPart {
    #[serde(default = "default_part_name")]
    pub part_name: String,
    #[serde(default)]
    pub is_bought: bool,
    #[serde(default)]
    pub process: String,
    #[serde(default = "default_part_quantity")]
    pub quantity: u32,
    pub material_id: Option<DbId>,
    pub profile_id: Option<DbId>,
    pub color: Option<String>,
    #[serde(default)]
    pub print_time: f64,
    pub nozzle: Option<f64>,
    #[serde(default)]
    pub dim_x: f64,
    #[serde(default)]
    pub dim_y: f64,
    #[serde(default)]
    pub dim_z: f64,
}

fn default_part_name() -> String {
    "Unnamed part".to_string()
}

fn default_part_quantity() -> u32 {
    1
}

/// One unit of work for the print queue, ready to insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedJob {
    pub part_name: String,
    pub priority: i32,
    pub material_id: Option<DbId>,
    pub profile_id: Option<DbId>,
    pub color: Option<String>,
    pub nozzle_diameter: f64,
    pub print_time_min: f64,
    pub dim_x: f64,
    pub dim_y: f64,
    pub dim_z: f64,
}

impl BomDocument {
    pub fn from_json(raw: &str) -> Result<BomDocument, CoreError> {
        serde_json::from_str(raw)
            .map_err(|e| CoreError::Validation(format!("invalid BOM document: {e}")))
    }

    /// All in-house printable parts, assemblies first, then loose parts.
    pub fn printable_parts(&self) -> Vec<&BomPart> {
        self.assemblies
            .iter()
            .flat_map(|assembly| assembly.parts.iter())
            .chain(self.loose_parts.iter())
            .filter(|part| !part.is_bought && part.process == PROCESS_FDM_PRINT)
            .collect()
    }

    /// Expand printable parts into individual jobs. A part with
    /// quantity N yields N jobs so each physical print is tracked on
    /// its own.
    pub fn plan_jobs(&self) -> Vec<PlannedJob> {
        self.printable_parts()
            .into_iter()
            .flat_map(|part| {
                let job = PlannedJob {
                    part_name: part.part_name.clone(),
                    priority: DEFAULT_JOB_PRIORITY,
                    material_id: part.material_id,
                    profile_id: part.profile_id,
                    color: part.color.clone(),
                    nozzle_diameter: part.nozzle.unwrap_or(DEFAULT_NOZZLE_DIAMETER),
                    print_time_min: part.print_time,
                    dim_x: part.dim_x,
                    dim_y: part.dim_y,
                    dim_z: part.dim_z,
                };
                std::iter::repeat_n(job, part.quantity as usize)
            })
            .collect()
    }
}
