//! Column names shared across the pipeline.

pub const POTENTIAL: &str = "Potential";
pub const CURRENT: &str = "Current";

pub const NHE: &str = "NHE";
pub const PH: &str = "pH";
pub const CONSTANT: &str = "Constant";
pub const AREA: &str = "Area (cm^2)";
pub const RESISTANCE: &str = "R";

/// Reference-corrected potential.
pub const E_RHE: &str = "E(RHE)";
/// Current normalized by electrode area.
pub const CURRENT_DENSITY: &str = "Current Density";

/// Metadata columns propagated down the table after the merge.
pub const FILLED: [&str; 5] = [NHE, PH, CONSTANT, RESISTANCE, AREA];
