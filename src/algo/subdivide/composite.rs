//! Schemes composed from other passes and the dual construction.

use crate::algo::dual::dual_of;
use crate::error::Result;

use super::cutting;
use super::smooth;
use super::soup::PolySoup;

/// Honeycomb subdivision: the dual of sqrt(3), which turns a triangulated
/// surface into hexagonal cells.
pub(super) fn honeycomb(soup: &PolySoup) -> Result<PolySoup> {
    dual_of(&smooth::sqrt3(soup)?, false)
}

/// Dual pentagonal subdivision: pentagonalize the dual, then dualize back.
pub(super) fn dual_pentagon(soup: &PolySoup, scale: f64) -> Result<PolySoup> {
    let dual = dual_of(soup, false)?;
    dual_of(&cutting::pentagon(&dual, scale)?, false)
}

/// Dual 12.6.4 subdivision: the dual of the omnitruncation, built by
/// rectifying and then truncating at `scale`.
pub(super) fn dual_1264(soup: &PolySoup, scale: f64) -> Result<PolySoup> {
    let rectified = cutting::simplest(soup)?;
    let truncated = cutting::vertex_cut(&rectified, scale)?;
    dual_of(&truncated, false)
}
