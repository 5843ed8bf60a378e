//! Error taxonomy for the dialog engine.
//!
//! Asset failures are recovered inside the session (placeholder + log);
//! they are only surfaced to callers that use the capabilities directly.

use thiserror::Error;

/// Which external capability failed to produce its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Glyphs,
    Backdrop,
    Portrait,
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Asset::Glyphs => f.write_str("glyphs"),
            Asset::Backdrop => f.write_str("backdrop"),
            Asset::Portrait => f.write_str("portrait"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("{asset} unavailable: {reason}")]
    AssetUnavailable { asset: Asset, reason: String },
}

impl DialogError {
    pub fn unavailable(asset: Asset, reason: impl Into<String>) -> Self {
        DialogError::AssetUnavailable {
            asset,
            reason: reason.into(),
        }
    }
}
