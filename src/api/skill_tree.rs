use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use super::attribs::ApiAttrib;
use super::base::ApiBase;
use crate::error::ApiError;
use crate::xml::{self, XmlNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiSkillDep {
    pub skill_id: i32,
    pub level: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiSkill {
    pub id: i32,
    pub group_id: i32,
    pub name: String,
    pub description: String,
    pub rank: i32,
    pub primary: ApiAttrib,
    pub secondary: ApiAttrib,
    pub published: bool,
    pub deps: Vec<ApiSkillDep>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiSkillGroup {
    pub id: i32,
    pub name: String,
}

/// Lookup of static skill data by type id.
pub trait SkillCatalog {
    fn get_skill_for_id(&self, id: i32) -> Option<Arc<ApiSkill>>;
}

#[derive(Debug, Clone, Default)]
pub struct ApiSkillTree {
    skills: HashMap<i32, Arc<ApiSkill>>,
    groups: HashMap<i32, ApiSkillGroup>,
}

impl ApiSkillTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, skill: ApiSkill) {
        self.skills.insert(skill.id, Arc::new(skill));
    }

    pub fn insert_group(&mut self, group: ApiSkillGroup) {
        self.groups.insert(group.id, group);
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn get_group_for_id(&self, id: i32) -> Option<&ApiSkillGroup> {
        self.groups.get(&id)
    }

    pub fn skills(&self) -> impl Iterator<Item = &Arc<ApiSkill>> {
        self.skills.values()
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(ApiError::from)
            .with_context(|| format!("failed to read skill tree {}", path.display()))?;
        Self::from_xml(&bytes)
            .with_context(|| format!("failed to parse skill tree {}", path.display()))
    }

    pub fn from_xml(bytes: &[u8]) -> Result<Self> {
        let root = xml::parse(bytes)?;
        let (_, result) = ApiBase::read_envelope(&root)?;

        let groups = result
            .rowset("skillGroups")
            .ok_or_else(|| ApiError::malformed("missing skillGroups rowset"))?;

        let mut tree = Self::new();
        for group_row in groups.rows() {
            tree.parse_group_row(group_row)?;
        }

        log::debug!(
            "Loaded skill tree with {} skills in {} groups",
            tree.skills.len(),
            tree.groups.len()
        );
        Ok(tree)
    }

    fn parse_group_row(&mut self, row: &XmlNode) -> Result<(), ApiError> {
        let group_id: i32 = row.required_attr("groupID")?;
        self.insert_group(ApiSkillGroup {
            id: group_id,
            name: row.attr("groupName").unwrap_or_default().to_string(),
        });

        if let Some(skills) = row.rowset("skills") {
            for skill_row in skills.rows() {
                let skill = parse_skill_row(skill_row, group_id)?;
                self.insert(skill);
            }
        }

        Ok(())
    }
}

impl SkillCatalog for ApiSkillTree {
    fn get_skill_for_id(&self, id: i32) -> Option<Arc<ApiSkill>> {
        self.skills.get(&id).cloned()
    }
}

fn parse_skill_row(row: &XmlNode, group_id: i32) -> Result<ApiSkill, ApiError> {
    let id: i32 = row.required_attr("typeID")?;

    let attributes = row
        .child("requiredAttributes")
        .ok_or_else(|| ApiError::malformed(format!("skill {} has no requiredAttributes", id)))?;
    let primary = parse_attrib(attributes, "primaryAttribute", id)?;
    let secondary = parse_attrib(attributes, "secondaryAttribute", id)?;

    let rank = match row.child("rank") {
        Some(node) => node.parse_text()?,
        None => return Err(ApiError::malformed(format!("skill {} has no rank", id))),
    };

    let mut deps = Vec::new();
    if let Some(required) = row.rowset("requiredSkills") {
        for dep in required.rows() {
            deps.push(ApiSkillDep {
                skill_id: dep.required_attr("typeID")?,
                level: dep.required_attr("skillLevel")?,
            });
        }
    }

    Ok(ApiSkill {
        id,
        group_id: row.parse_attr("groupID")?.unwrap_or(group_id),
        name: row.attr("typeName").unwrap_or_default().to_string(),
        description: row.child_text("description").unwrap_or_default().to_string(),
        rank,
        primary,
        secondary,
        published: row.parse_attr::<i32>("published")?.map_or(true, |p| p != 0),
        deps,
    })
}

fn parse_attrib(node: &XmlNode, tag: &str, skill_id: i32) -> Result<ApiAttrib, ApiError> {
    let value = node.child_text(tag).unwrap_or_default();
    value.parse().map_err(|_| {
        ApiError::malformed(format!(
            "skill {} has invalid {}: {:?}",
            skill_id, tag, value
        ))
    })
}
