//! Core data model: build targets, variant identity, output layout.

pub mod flag;
pub mod layout;
pub mod target;
pub mod variant;

pub use layout::OutputLayout;
pub use target::{Arch, BuildTarget, Configuration, FeatureFlags, HostOs, Platform, VariantKey};
pub use variant::{PackageManifest, VariantIdentity};
