pub mod attribs;
pub mod base;
pub mod cert_tree;
pub mod char_sheet;
pub mod skill_tree;

pub use attribs::{ApiAttrib, ApiCharAttribs};
pub use base::{ApiBase, EveApiData};
pub use cert_tree::{ApiCert, ApiCertCategory, ApiCertClass, ApiCertDep, ApiCertTree, CertCatalog};
pub use char_sheet::{
    ApiCharSheet, ApiCharSheetCert, ApiCharSheetSkill, API_CHAR_SHEET_MIN_CACHE_TIME,
};
pub use skill_tree::{ApiSkill, ApiSkillDep, ApiSkillGroup, ApiSkillTree, SkillCatalog};
