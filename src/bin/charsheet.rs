use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use skillmon_charsheet::api::ApiAttrib;
use skillmon_charsheet::{
    ApiCertTree, ApiCharSheet, ApiSkillTree, EveApiData, Settings, SkillCatalog,
};

/// Inspect an EVE API character sheet.
#[derive(Debug, Parser)]
#[command(name = "charsheet", version)]
struct Cli {
    /// Character sheet XML as returned by the API
    sheet: PathBuf,

    /// SkillTree.xml
    #[arg(long, env = "SKILLMON_SKILL_TREE")]
    skill_tree: Option<PathBuf>,

    /// CertificateTree.xml
    #[arg(long, env = "SKILLMON_CERT_TREE")]
    cert_tree: Option<PathBuf>,

    /// Print the whole sheet as JSON
    #[arg(long)]
    json: bool,

    /// Show training speed for these skill ids
    #[arg(long = "spph", value_name = "SKILL_ID")]
    spph: Vec<i32>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = Settings::from_env()?;
    let cli = Cli::parse();

    let skill_tree_path = cli
        .skill_tree
        .or(settings.skill_tree_path)
        .context("No skill tree given; pass --skill-tree or set SKILLMON_SKILL_TREE")?;
    let skill_tree = ApiSkillTree::load_from_file(&skill_tree_path)?;

    let cert_tree = match cli.cert_tree.or(settings.cert_tree_path) {
        Some(path) => ApiCertTree::load_from_file(&path)?,
        None => {
            log::info!("No certificate tree configured, certificates will be skipped");
            ApiCertTree::default()
        }
    };

    let data = EveApiData::from_file(&cli.sheet)?;
    let mut sheet = ApiCharSheet::create();
    sheet.set_api_data(&data, &skill_tree, &cert_tree)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&sheet)?);
        return Ok(());
    }

    println!("{} ({})", sheet.name, sheet.char_id);
    println!("  {} {} {}, {}", sheet.gender, sheet.race, sheet.bloodline, sheet.corp);
    println!("  Balance: {} ISK", sheet.balance);
    println!("  Clone: {} ({} SP)", sheet.clone_name, sheet.clone_sp);
    println!();

    println!("Attributes (base + implant = total)");
    for attrib in ApiAttrib::ALL {
        println!(
            "  {:<13} {:>4} + {:>2} = {:>4}",
            attrib.as_str(),
            sheet.base.get(attrib),
            sheet.implant.get(attrib),
            sheet.total.get(attrib)
        );
    }
    println!();

    println!("Skills: {} known, {} SP", sheet.skill_count(), sheet.total_sp);
    for level in 0..=5 {
        println!("  Level {}: {}", level, sheet.known_skills_at(level));
    }
    println!("Certificates: {}", sheet.certs.len());

    for skill_id in &cli.spph {
        match skill_tree.get_skill_for_id(*skill_id) {
            Some(skill) => println!(
                "{} (level {}): {} SP/h",
                skill.name,
                sheet.get_level_for_skill(*skill_id),
                sheet.get_spph_for_skill(&skill)
            ),
            None => println!("Skill {} is not in the skill tree", skill_id),
        }
    }

    if let Some(until) = sheet.api.effective_cached_until(settings.min_cache_secs) {
        println!();
        println!("Cached until {}", until.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    Ok(())
}
