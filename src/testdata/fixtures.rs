use crate::api::{ApiCertTree, ApiSkillTree};

pub const SKILL_TREE_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<eveapi version="2">
  <currentTime>2010-05-01 12:00:00</currentTime>
  <result>
    <rowset name="skillGroups" key="groupID" columns="groupName,groupID">
      <row groupName="Gunnery" groupID="255">
        <rowset name="skills" key="typeID" columns="typeName,groupID,typeID">
          <row typeName="Gunnery" groupID="255" typeID="3300" published="1">
            <description>Basic turret operation skill.</description>
            <rank>5</rank>
            <rowset name="requiredSkills" key="typeID" columns="typeID,skillLevel" />
            <requiredAttributes>
              <primaryAttribute>perception</primaryAttribute>
              <secondaryAttribute>willpower</secondaryAttribute>
            </requiredAttributes>
          </row>
          <row typeName="Small Hybrid Turret" groupID="255" typeID="3301" published="1">
            <description>Operation of small hybrid turrets.</description>
            <rank>2</rank>
            <rowset name="requiredSkills" key="typeID" columns="typeID,skillLevel">
              <row typeID="3300" skillLevel="1" />
            </rowset>
            <requiredAttributes>
              <primaryAttribute>perception</primaryAttribute>
              <secondaryAttribute>willpower</secondaryAttribute>
            </requiredAttributes>
          </row>
        </rowset>
      </row>
      <row groupName="Science" groupID="275">
        <rowset name="skills" key="typeID" columns="typeName,groupID,typeID">
          <row typeName="Science" groupID="275" typeID="3402" published="1">
            <description>Basic understanding of scientific principles.</description>
            <rank>1</rank>
            <rowset name="requiredSkills" key="typeID" columns="typeID,skillLevel" />
            <requiredAttributes>
              <primaryAttribute>intelligence</primaryAttribute>
              <secondaryAttribute>memory</secondaryAttribute>
            </requiredAttributes>
          </row>
        </rowset>
      </row>
    </rowset>
  </result>
  <cachedUntil>2010-05-02 12:00:00</cachedUntil>
</eveapi>"#;

pub const CERT_TREE_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<eveapi version="2">
  <currentTime>2010-05-01 12:00:00</currentTime>
  <result>
    <rowset name="categories" key="categoryID" columns="categoryID,categoryName">
      <row categoryID="3" categoryName="Core">
        <rowset name="classes" key="classID" columns="classID,className">
          <row classID="2" className="Core Fitness">
            <rowset name="certificates" key="certificateID" columns="certificateID,grade,corporationID,description">
              <row certificateID="5" grade="1" corporationID="1000125" description="Basic fitting.">
                <rowset name="requiredSkills" key="typeID" columns="typeID,level">
                  <row typeID="3300" level="1" />
                </rowset>
                <rowset name="requiredCertificates" key="certificateID" columns="certificateID,grade" />
              </row>
              <row certificateID="6" grade="2" corporationID="1000125" description="Standard fitting.">
                <rowset name="requiredSkills" key="typeID" columns="typeID,level">
                  <row typeID="3300" level="4" />
                </rowset>
                <rowset name="requiredCertificates" key="certificateID" columns="certificateID,grade">
                  <row certificateID="5" grade="1" />
                </rowset>
              </row>
            </rowset>
          </row>
          <row classID="7" className="Small Hybrid Turret">
            <rowset name="certificates" key="certificateID" columns="certificateID,grade,corporationID,description">
              <row certificateID="20" grade="1" corporationID="1000125" description="Basic hybrids." />
            </rowset>
          </row>
        </rowset>
      </row>
    </rowset>
  </result>
  <cachedUntil>2010-05-02 12:00:00</cachedUntil>
</eveapi>"#;

pub const FULL_CHAR_SHEET_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<eveapi version="2">
  <currentTime>2010-05-01 12:00:00</currentTime>
  <result>
    <characterID>150337897</characterID>
    <name>corpslave</name>
    <DoB>2006-01-01 00:00:00</DoB>
    <race>Minmatar</race>
    <bloodLine>Brutor</bloodLine>
    <ancestry>Slave Child</ancestry>
    <gender>Female</gender>
    <corporationName>corpexport Corp</corporationName>
    <corporationID>150337746</corporationID>
    <allianceName />
    <allianceID>0</allianceID>
    <cloneName>Clone Grade Pi</cloneName>
    <cloneSkillPoints>54600000</cloneSkillPoints>
    <freeSkillPoints>1000</freeSkillPoints>
    <freeRespecs>2</freeRespecs>
    <cloneJumpDate>2010-04-01 08:00:00</cloneJumpDate>
    <lastRespecDate>2010-03-01 12:00:00</lastRespecDate>
    <lastTimedRespec>2009-03-01 12:00:00</lastTimedRespec>
    <balance>190210393.87</balance>
    <attributeEnhancers>
      <intelligenceBonus>
        <augmentatorName>Snake Delta</augmentatorName>
        <augmentatorValue>3</augmentatorValue>
      </intelligenceBonus>
      <willpowerBonus>
        <augmentatorName>Genolution Core Augmentation CA-1</augmentatorName>
        <augmentatorValue>1</augmentatorValue>
      </willpowerBonus>
    </attributeEnhancers>
    <attributes>
      <intelligence>6</intelligence>
      <memory>4</memory>
      <charisma>7</charisma>
      <perception>12</perception>
      <willpower>10</willpower>
    </attributes>
    <rowset name="skills" key="typeID" columns="typeID,skillpoints,level,published">
      <row typeID="3300" skillpoints="512000" level="4" published="1" />
      <row typeID="3301" skillpoints="2830" level="2" published="1" />
      <row typeID="99999" skillpoints="250" level="1" published="0" />
      <row typeID="3402" skillpoints="0" />
    </rowset>
    <rowset name="certificates" key="certificateID" columns="certificateID">
      <row certificateID="5" />
      <row certificateID="6" />
      <row certificateID="424" />
    </rowset>
    <rowset name="corporationRoles" key="roleID" columns="roleID,roleName" />
  </result>
  <cachedUntil>2010-05-01 13:00:00</cachedUntil>
</eveapi>"#;

pub const ERROR_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<eveapi version="2">
  <currentTime>2010-05-01 12:00:00</currentTime>
  <error code="105">Invalid characterID.</error>
  <cachedUntil>2010-05-01 12:00:00</cachedUntil>
</eveapi>"#;

pub fn skill_tree() -> ApiSkillTree {
    ApiSkillTree::from_xml(SKILL_TREE_XML.as_bytes()).unwrap()
}

pub fn cert_tree() -> ApiCertTree {
    ApiCertTree::from_xml(CERT_TREE_XML.as_bytes()).unwrap()
}

/// A sheet with fixed attributes, no implants and the given
/// `(type_id, skillpoints, level)` skills and certificate ids.
pub fn char_sheet_xml(skills: &[(i32, u32, Option<i32>)], certs: &[i32]) -> String {
    let skill_rows: String = skills
        .iter()
        .map(|(id, points, level)| match level {
            Some(level) => format!(
                r#"<row typeID="{}" skillpoints="{}" level="{}" />"#,
                id, points, level
            ),
            None => format!(r#"<row typeID="{}" skillpoints="{}" />"#, id, points),
        })
        .collect();
    let cert_rows: String = certs
        .iter()
        .map(|id| format!(r#"<row certificateID="{}" />"#, id))
        .collect();

    format!(
        r#"<eveapi version="2">
  <currentTime>2010-05-01 12:00:00</currentTime>
  <result>
    <characterID>90000001</characterID>
    <name>Test Pilot</name>
    <attributes>
      <intelligence>20</intelligence>
      <memory>19</memory>
      <charisma>17</charisma>
      <perception>27</perception>
      <willpower>21</willpower>
    </attributes>
    <rowset name="skills" key="typeID" columns="typeID,skillpoints,level">{}</rowset>
    <rowset name="certificates" key="certificateID" columns="certificateID">{}</rowset>
  </result>
  <cachedUntil>2010-05-01 13:00:00</cachedUntil>
</eveapi>"#,
        skill_rows, cert_rows
    )
}
