use crate::error::{GolombError, Result};

/// The order must leave at least one payload bit inside the value width.
pub fn order_in_range(k: u32, width: u32) -> Result<()> {
    if k >= width {
        return Err(GolombError::Validation(format!(
            "order must be < value width, got k={} for {} bit values",
            k, width
        )));
    }
    Ok(())
}

/// Adaptivity factors >= the value width shift every magnitude to zero and
/// the filter would never move.
pub fn factor_in_range(a: u32, width: u32) -> Result<()> {
    if a >= width {
        return Err(GolombError::Validation(format!(
            "adaptivity factor must be < value width, got a={} for {} bit values",
            a, width
        )));
    }
    Ok(())
}
