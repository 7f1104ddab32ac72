use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use super::base::ApiBase;
use super::skill_tree::ApiSkillDep;
use crate::error::ApiError;
use crate::xml::{self, XmlNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiCertDep {
    pub cert_id: i32,
    pub grade: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiCert {
    pub id: i32,
    pub grade: i32,
    pub class_id: i32,
    pub corp_id: i32,
    pub description: String,
    pub skill_deps: Vec<ApiSkillDep>,
    pub cert_deps: Vec<ApiCertDep>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiCertClass {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiCertCategory {
    pub id: i32,
    pub name: String,
}

/// Lookup of static certificate data by id.
pub trait CertCatalog {
    fn get_certificate_for_id(&self, id: i32) -> Option<Arc<ApiCert>>;
    fn get_class_for_id(&self, id: i32) -> Option<Arc<ApiCertClass>>;
}

#[derive(Debug, Clone, Default)]
pub struct ApiCertTree {
    certificates: HashMap<i32, Arc<ApiCert>>,
    classes: HashMap<i32, Arc<ApiCertClass>>,
    categories: HashMap<i32, ApiCertCategory>,
}

impl ApiCertTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cert: ApiCert) {
        self.certificates.insert(cert.id, Arc::new(cert));
    }

    pub fn insert_class(&mut self, class: ApiCertClass) {
        self.classes.insert(class.id, Arc::new(class));
    }

    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    pub fn get_category_for_id(&self, id: i32) -> Option<&ApiCertCategory> {
        self.categories.get(&id)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(ApiError::from)
            .with_context(|| format!("failed to read certificate tree {}", path.display()))?;
        Self::from_xml(&bytes)
            .with_context(|| format!("failed to parse certificate tree {}", path.display()))
    }

    pub fn from_xml(bytes: &[u8]) -> Result<Self> {
        let root = xml::parse(bytes)?;
        let (_, result) = ApiBase::read_envelope(&root)?;

        let categories = result
            .rowset("categories")
            .ok_or_else(|| ApiError::malformed("missing categories rowset"))?;

        let mut tree = Self::new();
        for category_row in categories.rows() {
            tree.parse_category_row(category_row)?;
        }

        log::debug!(
            "Loaded certificate tree with {} certificates in {} classes",
            tree.certificates.len(),
            tree.classes.len()
        );
        Ok(tree)
    }

    fn parse_category_row(&mut self, row: &XmlNode) -> Result<(), ApiError> {
        let category_id: i32 = row.required_attr("categoryID")?;
        self.categories.insert(
            category_id,
            ApiCertCategory {
                id: category_id,
                name: row.attr("categoryName").unwrap_or_default().to_string(),
            },
        );

        let Some(classes) = row.rowset("classes") else {
            return Ok(());
        };

        for class_row in classes.rows() {
            let class_id: i32 = class_row.required_attr("classID")?;
            self.insert_class(ApiCertClass {
                id: class_id,
                name: class_row.attr("className").unwrap_or_default().to_string(),
                category_id,
            });

            if let Some(certs) = class_row.rowset("certificates") {
                for cert_row in certs.rows() {
                    let cert = parse_cert_row(cert_row, class_id)?;
                    self.insert(cert);
                }
            }
        }

        Ok(())
    }
}

impl CertCatalog for ApiCertTree {
    fn get_certificate_for_id(&self, id: i32) -> Option<Arc<ApiCert>> {
        self.certificates.get(&id).cloned()
    }

    fn get_class_for_id(&self, id: i32) -> Option<Arc<ApiCertClass>> {
        self.classes.get(&id).cloned()
    }
}

fn parse_cert_row(row: &XmlNode, class_id: i32) -> Result<ApiCert, ApiError> {
    let mut skill_deps = Vec::new();
    if let Some(required) = row.rowset("requiredSkills") {
        for dep in required.rows() {
            skill_deps.push(ApiSkillDep {
                skill_id: dep.required_attr("typeID")?,
                level: dep.required_attr("level")?,
            });
        }
    }

    let mut cert_deps = Vec::new();
    if let Some(required) = row.rowset("requiredCertificates") {
        for dep in required.rows() {
            cert_deps.push(ApiCertDep {
                cert_id: dep.required_attr("certificateID")?,
                grade: dep.required_attr("grade")?,
            });
        }
    }

    Ok(ApiCert {
        id: row.required_attr("certificateID")?,
        grade: row.required_attr("grade")?,
        class_id,
        corp_id: row.parse_attr("corporationID")?.unwrap_or(0),
        description: row.attr("description").unwrap_or_default().to_string(),
        skill_deps,
        cert_deps,
    })
}
