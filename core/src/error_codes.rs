//! Stable error codes embedded in user-facing error messages.

pub(crate) const CONFIG_INVALID_MIN_SIM: &str = "TXDIFF_CFG_001";
pub(crate) const CONFIG_INVALID_JUNK: &str = "TXDIFF_CFG_002";
pub(crate) const CONFIG_INVALID_PROTECT: &str = "TXDIFF_CFG_003";
