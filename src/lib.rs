pub mod api;
pub mod config;
pub mod error;
pub mod utils;
pub mod xml;

#[cfg(test)]
mod testdata;

pub use api::{
    ApiCharAttribs, ApiCharSheet, ApiCertTree, ApiSkillTree, CertCatalog, EveApiData,
    SkillCatalog,
};
pub use config::Settings;
pub use error::ApiError;
