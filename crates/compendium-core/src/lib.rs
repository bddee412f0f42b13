//! compendium-core
//!
//! Core of the SBC compendium, a catalog of single-board computers:
//! - declarative schema of every catalog entity
//! - document normalization and the validating parser
//! - variant resolution (`_common` fallback)
//! - manufacturer projection
//! - document assembly and presentation helpers (screens, byte sizes)
//!
//! The crate performs no I/O. Hosts fetch the document and pass bytes in.

pub mod config;
pub mod document;
pub mod errors;
pub mod model;
pub mod pipeline;
pub mod projection;
pub mod resolve;
pub mod schema;
pub mod screens;
pub mod units;

pub use crate::errors::{CompendiumError, CompendiumResult, ValidationError, ValidationErrorKind};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::config::CoreConfig;
    pub use crate::model::{
        Attribution, Author, Cpu, CpuCache, CpuCacheLayer, Image, License, Link, Manufacturer,
        Root, Sbc, SbcVariant, SbcVariantRam, Soc, SocCpu, COMMON_SBC_VARIANT_KEY,
    };
    pub use crate::pipeline::{ingest, parse};
    pub use crate::projection::{project_by_manufacturer, ManufacturerProjection};
    pub use crate::resolve::EffectiveVariant;
    pub use crate::screens::{ScreenId, ScreenRegistry};
    pub use crate::{CompendiumError, CompendiumResult};
}
