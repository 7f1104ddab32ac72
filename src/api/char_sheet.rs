use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use super::attribs::{ApiAttrib, ApiCharAttribs};
use super::base::{ApiBase, EveApiData};
use super::cert_tree::{ApiCert, CertCatalog};
use super::skill_tree::{ApiSkill, SkillCatalog};
use crate::error::ApiError;
use crate::utils;
use crate::xml::{self, XmlNode};

/// The minimum amount of seconds the sheet is cached.
pub const API_CHAR_SHEET_MIN_CACHE_TIME: i64 = 1800;

const ENHANCER_TAGS: [(&str, ApiAttrib); 5] = [
    ("intelligenceBonus", ApiAttrib::Intelligence),
    ("memoryBonus", ApiAttrib::Memory),
    ("charismaBonus", ApiAttrib::Charisma),
    ("perceptionBonus", ApiAttrib::Perception),
    ("willpowerBonus", ApiAttrib::Willpower),
];

#[derive(Debug, Clone, Serialize)]
pub struct ApiCharSheetSkill {
    pub id: i32,
    pub level: i32,
    pub points: u32,
    /// Most SP the skill can hold at its current level.
    pub points_max: u32,
    pub points_start: u32,
    pub points_dest: u32,
    pub completed: f64,
    pub details: Arc<ApiSkill>,
}

impl ApiCharSheetSkill {
    fn new(details: Arc<ApiSkill>, level: i32, points: u32) -> Self {
        let mut skill = Self {
            id: details.id,
            level,
            points,
            points_max: 0,
            points_start: 0,
            points_dest: 0,
            completed: 0.0,
            details,
        };
        skill.update_progress();
        skill
    }

    fn update_progress(&mut self) {
        let rank = self.details.rank;
        self.points_start = ApiCharSheet::calc_start_sp(self.level, rank);
        self.points_dest = ApiCharSheet::calc_dest_sp(self.level, rank);
        self.points_max = self.points_dest;
        self.points = self
            .points
            .min(ApiCharSheet::calc_start_sp(utils::MAX_SKILL_LEVEL, rank));

        self.completed = if self.points_dest <= self.points_start {
            1.0
        } else {
            let done = self.points as f64 - self.points_start as f64;
            let span = (self.points_dest - self.points_start) as f64;
            (done / span).clamp(0.0, 1.0)
        };
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiCharSheetCert {
    pub id: i32,
    pub details: Arc<ApiCert>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ApiCharSheet {
    pub valid: bool,
    pub api: ApiBase,

    pub char_id: String,
    pub name: String,
    pub birthday: String,
    pub race: String,
    pub bloodline: String,
    pub ancestry: String,
    pub gender: String,
    pub corp: String,
    pub corp_id: String,
    pub alliance: String,
    pub alliance_id: String,
    pub balance: String,

    pub clone_name: String,
    pub clone_sp: u32,
    pub free_sp: u32,
    pub last_respec: String,
    pub last_timed_respec: String,
    pub free_respecs: u32,
    pub last_clone_jump: String,

    pub base: ApiCharAttribs,
    pub implant: ApiCharAttribs,
    pub total: ApiCharAttribs,

    pub skills: Vec<ApiCharSheetSkill>,
    pub certs: Vec<ApiCharSheetCert>,

    pub total_sp: u32,
    pub skills_at: [u32; 6],
}

impl ApiCharSheet {
    pub fn create() -> Self {
        Self::default()
    }

    /// Replaces the sheet with the contents of `data`. On error the sheet
    /// is left untouched.
    pub fn set_api_data(
        &mut self,
        data: &EveApiData,
        skills: &dyn SkillCatalog,
        certs: &dyn CertCatalog,
    ) -> Result<()> {
        if let Some(exception) = &data.exception {
            log::warn!("Character sheet fetched with problems: {}", exception);
        }

        let root = xml::parse(&data.data).context("Failed to parse character sheet XML")?;

        let mut sheet = Self::create();
        sheet
            .parse_eveapi_tag(&root, skills, certs)
            .context("Failed to read character sheet")?;
        sheet.api.locally_cached = data.locally_cached;
        sheet.total = sheet.base + sheet.implant;
        sheet.recompute_statistics();
        sheet.valid = true;

        log::debug!(
            "Parsed character sheet for {} ({} skills, {} certificates, {} SP)",
            sheet.name,
            sheet.skills.len(),
            sheet.certs.len(),
            sheet.total_sp
        );

        *self = sheet;
        Ok(())
    }

    fn parse_eveapi_tag(
        &mut self,
        root: &XmlNode,
        skills: &dyn SkillCatalog,
        certs: &dyn CertCatalog,
    ) -> Result<(), ApiError> {
        let (api, result) = ApiBase::read_envelope(root)?;
        self.api = api;
        self.parse_result_tag(result, skills, certs)
    }

    fn parse_result_tag(
        &mut self,
        node: &XmlNode,
        skills: &dyn SkillCatalog,
        certs: &dyn CertCatalog,
    ) -> Result<(), ApiError> {
        for child in &node.children {
            let text = || child.text().to_string();
            match child.name.as_str() {
                "characterID" => self.char_id = text(),
                "name" => self.name = text(),
                "DoB" => self.birthday = text(),
                "race" => self.race = text(),
                "bloodLine" => self.bloodline = text(),
                "ancestry" => self.ancestry = text(),
                "gender" => self.gender = text(),
                "corporationName" => self.corp = text(),
                "corporationID" => self.corp_id = text(),
                "allianceName" => self.alliance = text(),
                "allianceID" => self.alliance_id = text(),
                "balance" => self.balance = text(),
                "cloneName" => self.clone_name = text(),
                "cloneSkillPoints" => self.clone_sp = child.parse_text()?,
                "freeSkillPoints" => self.free_sp = child.parse_text()?,
                "freeRespecs" => self.free_respecs = child.parse_text()?,
                "lastRespecDate" => self.last_respec = text(),
                "lastTimedRespec" => self.last_timed_respec = text(),
                "cloneJumpDate" => self.last_clone_jump = text(),
                "attributes" => self.parse_attribute_tag(child)?,
                "attributeEnhancers" => self.parse_attrib_enhancers_tag(child)?,
                "rowset" => match child.attr("name") {
                    Some("skills") => self.parse_skills_tag(child, skills)?,
                    Some("certificates") => self.parse_certificates_tag(child, certs)?,
                    _ => {}
                },
                _ => {}
            }
        }
        Ok(())
    }

    fn parse_attribute_tag(&mut self, node: &XmlNode) -> Result<(), ApiError> {
        for attrib in ApiAttrib::ALL {
            if let Some(value) = node.child(attrib.as_str()) {
                *self.base.get_mut(attrib) = value.parse_text()?;
            }
        }
        Ok(())
    }

    fn parse_attrib_enhancers_tag(&mut self, node: &XmlNode) -> Result<(), ApiError> {
        for (tag, attrib) in ENHANCER_TAGS {
            *self.implant.get_mut(attrib) += find_implant_bonus(node, tag)?;
        }
        Ok(())
    }

    fn parse_skills_tag(
        &mut self,
        node: &XmlNode,
        catalog: &dyn SkillCatalog,
    ) -> Result<(), ApiError> {
        for row in node.rows() {
            let id: i32 = row.required_attr("typeID")?;
            let points: u32 = row.parse_attr("skillpoints")?.unwrap_or(0);
            let level: Option<i32> = row.parse_attr("level")?;

            if let Some(level) = level {
                if !(0..=utils::MAX_SKILL_LEVEL).contains(&level) {
                    return Err(ApiError::malformed(format!(
                        "skill {} has invalid level {}",
                        id, level
                    )));
                }
            }

            if self.is_skill_known(id) {
                log::warn!("Skill {} listed twice in character sheet, skipping", id);
                continue;
            }

            let Some(details) = catalog.get_skill_for_id(id) else {
                log::warn!("Skill {} not found in skill tree, skipping", id);
                continue;
            };

            let level = level
                .unwrap_or_else(|| utils::level_for_sp(details.rank as i64, points as i64));
            self.skills.push(ApiCharSheetSkill::new(details, level, points));
        }
        Ok(())
    }

    fn parse_certificates_tag(
        &mut self,
        node: &XmlNode,
        catalog: &dyn CertCatalog,
    ) -> Result<(), ApiError> {
        for row in node.rows() {
            let id: i32 = row.required_attr("certificateID")?;
            match catalog.get_certificate_for_id(id) {
                Some(details) => self.certs.push(ApiCharSheetCert { id, details }),
                None => log::warn!("Certificate {} not found in certificate tree, skipping", id),
            }
        }
        Ok(())
    }

    fn recompute_statistics(&mut self) {
        self.total_sp = 0;
        self.skills_at = [0; 6];
        for skill in &self.skills {
            self.total_sp = self.total_sp.saturating_add(skill.points);
            self.skills_at[skill.level as usize] += 1;
        }
    }

    pub fn is_skill_known(&self, id: i32) -> bool {
        self.skills.iter().any(|s| s.id == id)
    }

    /// Linear lookup; fine for the few hundred skills a character has.
    pub fn get_skill_for_id(&self, id: i32) -> Option<&ApiCharSheetSkill> {
        self.skills.iter().find(|s| s.id == id)
    }

    pub fn get_level_for_skill(&self, id: i32) -> i32 {
        self.get_skill_for_id(id).map_or(0, |s| s.level)
    }

    pub fn get_cert_for_id(&self, id: i32) -> Option<&ApiCharSheetCert> {
        self.certs.iter().find(|c| c.id == id)
    }

    /// Highest grade held in the certificate class, if any.
    pub fn get_grade_for_class(&self, class_id: i32) -> Option<i32> {
        self.certs
            .iter()
            .filter(|c| c.details.class_id == class_id)
            .map(|c| c.details.grade)
            .max()
    }

    /// Whether every skill `skill` requires is trained to the needed level.
    pub fn has_prerequisites_for(&self, skill: &ApiSkill) -> bool {
        skill
            .deps
            .iter()
            .all(|dep| self.get_level_for_skill(dep.skill_id) >= dep.level)
    }

    /// Whether the character meets the skill and certificate requirements of
    /// `cert`. A required certificate is met by any held certificate of the
    /// same class at or above its grade.
    pub fn can_claim_cert(&self, cert: &ApiCert, catalog: &dyn CertCatalog) -> bool {
        let skills_met = cert
            .skill_deps
            .iter()
            .all(|dep| self.get_level_for_skill(dep.skill_id) >= dep.level);
        if !skills_met {
            return false;
        }

        cert.cert_deps.iter().all(|dep| {
            let Some(required) = catalog.get_certificate_for_id(dep.cert_id) else {
                log::warn!(
                    "Certificate {} required by {} not found in certificate tree",
                    dep.cert_id,
                    cert.id
                );
                return false;
            };
            self.get_grade_for_class(required.class_id)
                .is_some_and(|grade| grade >= required.grade)
        })
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    pub fn known_skills_at(&self, level: i32) -> u32 {
        usize::try_from(level)
            .ok()
            .and_then(|l| self.skills_at.get(l).copied())
            .unwrap_or(0)
    }

    /// Sets the trained level of a skill, adding it if the character does
    /// not have it yet. Statistics are kept in sync.
    pub fn add_char_skill(&mut self, catalog: &dyn SkillCatalog, skill_id: i32, level: i32) {
        if !(0..=utils::MAX_SKILL_LEVEL).contains(&level) {
            log::warn!("Ignoring skill {} with invalid level {}", skill_id, level);
            return;
        }

        if let Some(skill) = self.skills.iter_mut().find(|s| s.id == skill_id) {
            if skill.level == level {
                return;
            }

            let old_level = skill.level;
            let old_points = skill.points;
            skill.level = level;
            skill.points = Self::calc_start_sp(level, skill.details.rank);
            skill.update_progress();
            let new_points = skill.points;

            self.skills_at[old_level as usize] -= 1;
            self.skills_at[level as usize] += 1;
            self.total_sp = self
                .total_sp
                .saturating_sub(old_points)
                .saturating_add(new_points);
            return;
        }

        let Some(details) = catalog.get_skill_for_id(skill_id) else {
            log::warn!("Cannot add skill {}: not found in skill tree", skill_id);
            return;
        };

        let points = Self::calc_start_sp(level, details.rank);
        let skill = ApiCharSheetSkill::new(details, level, points);
        self.total_sp = self.total_sp.saturating_add(skill.points);
        self.skills_at[level as usize] += 1;
        self.skills.push(skill);
    }

    /// SP per hour for the skill using the character's total attributes.
    pub fn get_spph_for_skill(&self, skill: &ApiSkill) -> u32 {
        self.get_spph_for_skill_with(skill, &self.total)
    }

    /// SP per hour for the skill using the given attributes.
    pub fn get_spph_for_skill_with(&self, skill: &ApiSkill, attribs: &ApiCharAttribs) -> u32 {
        let primary = attribs.get(skill.primary);
        let secondary = attribs.get(skill.secondary);
        let sp_per_minute = utils::calculate_sp_per_minute(primary, secondary);
        (sp_per_minute * 60.0).round().max(0.0) as u32
    }

    /// SP at the start of `level` for a skill of `rank`.
    pub fn calc_start_sp(level: i32, rank: i32) -> u32 {
        let level = level.clamp(0, utils::MAX_SKILL_LEVEL);
        u32::try_from(utils::calculate_sp_for_level(rank as i64, level)).unwrap_or(u32::MAX)
    }

    /// SP needed to finish `level`; level V is already the end of the curve.
    pub fn calc_dest_sp(level: i32, rank: i32) -> u32 {
        let next = (level + 1).min(utils::MAX_SKILL_LEVEL);
        Self::calc_start_sp(next, rank)
    }
}

fn find_implant_bonus(node: &XmlNode, name: &str) -> Result<f64, ApiError> {
    match node.child(name).and_then(|bonus| bonus.child("augmentatorValue")) {
        Some(value) => value.parse_text(),
        None => Ok(0.0),
    }
}
