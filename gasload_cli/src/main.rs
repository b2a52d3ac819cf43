//! # Gasload CLI
//!
//! Command-line front end for residential gas load diversity assessments.
//! Project files are the JSON documents read and written by
//! `gasload_core::file_io`.
//!
//! Usage:
//!   gasload <command> [args] [options]
//!
//! Set `RUST_LOG=debug` for diagnostic output.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use gasload_core::appliance::ApplianceEntry;
use gasload_core::calculations::{ConvertedTotals, LoadLine};
use gasload_core::errors::{CalcError, CalcResult};
use gasload_core::file_io::{load_project, save_project};
use gasload_core::pdf::{render_report_pdf, report_file_name};
use gasload_core::project::{info_keys, Project};
use gasload_core::reference::{Category, DiversityStandard, SeasonalClass};
use gasload_core::units::{format_quantity, format_with_unit, from_base, EnergyUnit};

/// Options that take a value
const VALUE_OPTIONS: [&str; 10] = [
    "--category",
    "--rating",
    "--units",
    "--equipment",
    "--diversity",
    "--source",
    "--standard",
    "--output",
    "--gas-energy",
    "--name",
];

/// Parsed command line: positional arguments plus `--option value` pairs.
/// `--info key=value` may repeat and keeps its order.
#[derive(Debug, Default)]
struct Args {
    positional: Vec<String>,
    options: HashMap<String, String>,
    info: Vec<(String, String)>,
    json: bool,
}

impl Args {
    fn parse(raw: &[String]) -> CalcResult<Self> {
        let mut args = Args::default();
        let mut i = 0;
        while i < raw.len() {
            let arg = raw[i].as_str();
            match arg {
                "--json" => args.json = true,
                "--info" => {
                    let value = raw
                        .get(i + 1)
                        .ok_or_else(|| CalcError::invalid_input(arg, "", "Option requires a value"))?;
                    args.info.push(parse_info_pair(value)?);
                    i += 1;
                }
                _ if VALUE_OPTIONS.contains(&arg) => {
                    let value = raw
                        .get(i + 1)
                        .ok_or_else(|| CalcError::invalid_input(arg, "", "Option requires a value"))?;
                    args.options.insert(arg.to_string(), value.clone());
                    i += 1;
                }
                _ if arg.starts_with("--") => {
                    return Err(CalcError::invalid_input("option", arg, "Unknown option"));
                }
                _ => args.positional.push(arg.to_string()),
            }
            i += 1;
        }
        Ok(args)
    }

    fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    /// Positional argument `index`, or an InvalidInput naming `what`
    fn require(&self, index: usize, what: &str) -> CalcResult<&str> {
        self.positional
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| CalcError::invalid_input(what, "", "Missing argument"))
    }

    fn number(&self, name: &str) -> CalcResult<Option<f64>> {
        self.option(name)
            .map(|v| {
                v.trim()
                    .parse::<f64>()
                    .map_err(|_| CalcError::invalid_input(name, v, "Expected a number"))
            })
            .transpose()
    }

    fn units(&self) -> CalcResult<Option<EnergyUnit>> {
        self.option("--units").map(EnergyUnit::from_str_flexible).transpose()
    }

    fn standard(&self) -> CalcResult<Option<DiversityStandard>> {
        self.option("--standard")
            .map(DiversityStandard::from_str_flexible)
            .transpose()
    }
}

/// Split `key=value`; the key must be non-blank, the value may be empty.
fn parse_info_pair(pair: &str) -> CalcResult<(String, String)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.to_string())),
        _ => Err(CalcError::invalid_input("--info", pair, "Expected key=value")),
    }
}

fn main() {
    env_logger::init();

    let raw: Vec<String> = env::args().skip(1).collect();
    let Some(command) = raw.first().cloned() else {
        print_usage();
        std::process::exit(1);
    };

    if command == "--help" || command == "-h" || command == "help" {
        print_usage();
        return;
    }

    let result = Args::parse(&raw[1..]).and_then(|args| run(&command, &args));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        std::process::exit(1);
    }
}

fn run(command: &str, args: &Args) -> CalcResult<()> {
    match command {
        "catalog" => cmd_catalog(args),
        "init" => cmd_init(args),
        "add" => cmd_add(args),
        "edit" => cmd_edit(args),
        "remove" => cmd_remove(args),
        "set-info" => cmd_set_info(args),
        "summary" => cmd_summary(args),
        "details" => cmd_details(args),
        "set-standard" => cmd_set_standard(args),
        "report" => cmd_report(args),
        other => Err(CalcError::invalid_input(
            "command",
            other,
            "Unknown command (run `gasload --help`)",
        )),
    }
}

/// Load the project named by the first positional argument and apply the
/// `--gas-energy` override.
fn open_project(args: &Args) -> CalcResult<(PathBuf, Project)> {
    let path = PathBuf::from(args.require(0, "file")?);
    let mut project = load_project(&path)?;
    if let Some(g) = args.number("--gas-energy")? {
        project.set_gas_energy_content(g);
    }
    Ok((path, project))
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_catalog(args: &Args) -> CalcResult<()> {
    let standard = args.standard()?.unwrap_or_default();
    println!("Diversity factors: {}", standard.display_name());

    for category in Category::ALL {
        println!();
        match category.default_diversity() {
            Some(defaults) => println!(
                "{} [{}] (default {}%)",
                category.name(),
                category.seasonal_class(),
                format_quantity(defaults.get(standard))
            ),
            None => println!("{} [{}]", category.name(), category.seasonal_class()),
        }

        if category.is_custom() {
            println!("  (freeform equipment; use --source <category> to borrow its default)");
        }
        for item in category.equipment() {
            println!("  {:<48} {:>5}%", item.name, format_quantity(item.diversity.get(standard)));
        }
    }
    Ok(())
}

fn cmd_init(args: &Args) -> CalcResult<()> {
    let path = Path::new(args.require(0, "file")?);
    if path.exists() {
        return Err(CalcError::invalid_input(
            "file",
            path.display().to_string(),
            "File already exists",
        ));
    }

    let mut project = Project::new();
    if let Some(name) = args.option("--name") {
        project.set_info(info_keys::PROJECT_NAME, name);
    }
    for (key, value) in &args.info {
        project.set_info(key.as_str(), value.as_str());
    }
    project.stamp_default_dates(Utc::now().date_naive());
    if let Some(standard) = args.standard()? {
        project.set_diversity_standard(standard);
    }
    if let Some(unit) = args.units()? {
        project.set_results_units(unit);
    }
    if let Some(g) = args.number("--gas-energy")? {
        project.set_gas_energy_content(g);
    }

    save_project(&project, path)?;
    println!("Created {}", path.display());
    Ok(())
}

fn cmd_add(args: &Args) -> CalcResult<()> {
    let (path, mut project) = open_project(args)?;

    let category_name = args
        .option("--category")
        .ok_or_else(|| CalcError::invalid_input("--category", "", "Missing option"))?;
    let category = Category::from_str_flexible(category_name)?;
    let rating = args
        .number("--rating")?
        .ok_or_else(|| CalcError::invalid_input("--rating", "", "Missing option"))?;
    let units = args.units()?.unwrap_or_default();
    let standard = project.diversity_standard;

    let source = args.option("--source").map(Category::from_str_flexible).transpose()?;

    let entry = if category.is_custom() {
        let name = args.option("--equipment").unwrap_or("Custom Appliance");
        let mut entry = ApplianceEntry::custom(name, rating, units, None, standard);
        entry.set_diversity_source(source, standard)?;
        entry
    } else {
        if let Some(source) = source {
            return Err(CalcError::invalid_input(
                "--source",
                source.name(),
                format!("Only Custom appliances take a diversity source, not {}", category.name()),
            ));
        }
        let equipment = args.option("--equipment").ok_or_else(|| {
            CalcError::invalid_input(
                "--equipment",
                "",
                format!("Required for {} (run `gasload catalog`)", category.name()),
            )
        })?;
        ApplianceEntry::from_catalog(category, equipment, rating, units, standard)?
    };
    let entry = match args.number("--diversity")? {
        Some(diversity) => entry.with_diversity(diversity),
        None => entry,
    };

    let line = format!(
        "{} {} @ {}%",
        entry.label(),
        format_with_unit(entry.rating, entry.units),
        format_quantity(entry.diversity)
    );
    let id = project.add_appliance(entry);
    save_project(&project, &path)?;

    println!("Added {}: {}", id, line);
    Ok(())
}

fn cmd_remove(args: &Args) -> CalcResult<()> {
    let (path, mut project) = open_project(args)?;
    let id = args.require(1, "id")?;

    let removed = project.remove_appliance(id)?;
    save_project(&project, &path)?;

    println!("Removed {}: {}", removed.id, removed.label());
    Ok(())
}

/// Apply `--category`, `--equipment`, `--source`, `--rating`, `--units` and
/// `--diversity` to one appliance, in that order, so an explicit diversity
/// wins over the one a category, equipment or source change selects.
fn cmd_edit(args: &Args) -> CalcResult<()> {
    const EDIT_OPTIONS: [&str; 6] = ["--category", "--equipment", "--source", "--rating", "--units", "--diversity"];

    let (path, mut project) = open_project(args)?;
    let id = args.require(1, "id")?;
    if !EDIT_OPTIONS.iter().any(|name| args.option(name).is_some()) {
        return Err(CalcError::invalid_input(
            "edit",
            id,
            "Nothing to change (use --category, --equipment, --source, --rating, --units or --diversity)",
        ));
    }

    let standard = project.diversity_standard;
    let entry = project
        .get_appliance_mut(id)
        .ok_or_else(|| CalcError::appliance_not_found(id))?;

    if let Some(name) = args.option("--category") {
        entry.set_category(Category::from_str_flexible(name)?, standard);
    }
    if let Some(name) = args.option("--equipment") {
        entry.set_equipment(name, standard)?;
    }
    if let Some(name) = args.option("--source") {
        let source = match name.trim() {
            "" | "none" => None,
            other => Some(Category::from_str_flexible(other)?),
        };
        entry.set_diversity_source(source, standard)?;
    }
    if let Some(rating) = args.number("--rating")? {
        entry.rating = rating;
    }
    if let Some(units) = args.units()? {
        entry.units = units;
    }
    if let Some(diversity) = args.number("--diversity")? {
        entry.diversity = diversity;
    }

    let line = format!(
        "{} {} @ {}%",
        entry.label(),
        format_with_unit(entry.rating, entry.units),
        format_quantity(entry.diversity)
    );
    save_project(&project, &path)?;

    println!("Updated {}: {}", id, line);
    Ok(())
}

/// Set projectInfo fields from `key=value` positionals and `--info` options.
fn cmd_set_info(args: &Args) -> CalcResult<()> {
    let (path, mut project) = open_project(args)?;

    let mut pairs = args
        .positional
        .iter()
        .skip(1)
        .map(|pair| parse_info_pair(pair))
        .collect::<CalcResult<Vec<_>>>()?;
    pairs.extend(args.info.iter().cloned());
    if pairs.is_empty() {
        return Err(CalcError::invalid_input("set-info", "", "Expected at least one key=value"));
    }

    for (key, value) in &pairs {
        project.set_info(key.as_str(), value.as_str());
    }
    save_project(&project, &path)?;

    println!("Updated {} field(s) in {}", pairs.len(), path.display());
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryOutput {
    project_name: Option<String>,
    diversity_standard: DiversityStandard,
    gas_energy_content: f64,
    appliance_count: usize,
    governing_season: &'static str,
    totals: ConvertedTotals,
}

fn cmd_summary(args: &Args) -> CalcResult<()> {
    let (_, mut project) = open_project(args)?;
    if let Some(standard) = args.standard()? {
        project.set_diversity_standard(standard);
    }
    let unit = args.units()?.unwrap_or(project.results_units);
    let g = project.gas_energy_content();
    let result = project.recompute();
    let totals = result.in_unit(unit, g);

    if args.json {
        let output = SummaryOutput {
            project_name: project.info(info_keys::PROJECT_NAME),
            diversity_standard: project.diversity_standard,
            gas_energy_content: g,
            appliance_count: project.appliance_count(),
            governing_season: result.governing_season(),
            totals,
        };
        let json = serde_json::to_string_pretty(&output).map_err(|e| CalcError::serialization(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    if let Some(name) = project.info(info_keys::PROJECT_NAME) {
        println!("{}", name);
    }
    println!(
        "{} appliances, {}, {} BTU/ft3",
        project.appliance_count(),
        project.diversity_standard.display_name(),
        format_quantity(g)
    );
    println!();
    print_totals(&totals, result.governing_season());
    Ok(())
}

fn cmd_details(args: &Args) -> CalcResult<()> {
    let (_, project) = open_project(args)?;
    let unit = args.units()?.unwrap_or(project.results_units);
    let g = project.gas_energy_content();
    let breakdown = project.breakdown();
    let result = project.recompute();

    for season in SeasonalClass::ALL {
        println!("{} Loads", season.display_name());
        let lines = breakdown.lines(season);
        if lines.is_empty() {
            println!("  (none)");
        }
        for line in lines {
            print_line(line, unit, g);
        }
        println!(
            "  {:<40} {:>38}",
            "Subtotal",
            format_with_unit(from_base(breakdown.subtotal(season).value(), unit, g), unit)
        );
        println!();
    }

    print_totals(&result.in_unit(unit, g), result.governing_season());
    Ok(())
}

fn cmd_set_standard(args: &Args) -> CalcResult<()> {
    let (path, mut project) = open_project(args)?;
    let standard = DiversityStandard::from_str_flexible(args.require(1, "standard")?)?;

    let summary = project.set_diversity_standard(standard);
    save_project(&project, &path)?;

    println!(
        "Switched to {}: {} entries updated, {} unchanged",
        standard.display_name(),
        summary.updated.len(),
        summary.unchanged.len()
    );
    Ok(())
}

fn cmd_report(args: &Args) -> CalcResult<()> {
    let (_, project) = open_project(args)?;
    let unit = args.units()?.unwrap_or(project.results_units);
    let output = args
        .option("--output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(report_file_name(&project)));

    let pdf_bytes = render_report_pdf(&project, unit)?;
    fs::write(&output, &pdf_bytes).map_err(|e| {
        CalcError::file_error("write report", output.display().to_string(), e.to_string())
    })?;

    println!("Wrote {} ({} bytes)", output.display(), pdf_bytes.len());
    Ok(())
}

// ============================================================================
// Output
// ============================================================================

fn print_line(line: &LoadLine, unit: EnergyUnit, g: f64) {
    println!(
        "  {:<40} {:>18} x {:>5}% = {:>18}",
        line.name,
        format_with_unit(line.rating_in(unit, g), unit),
        format_quantity(line.diversity),
        format_with_unit(line.diversified_in(unit, g), unit)
    );
}

fn print_totals(totals: &ConvertedTotals, governing: &str) {
    println!("Total Connected Load:  {}", format_with_unit(totals.connected, totals.unit));
    println!("Winter Peak:           {}", format_with_unit(totals.winter_peak, totals.unit));
    println!("Summer Peak:           {}", format_with_unit(totals.summer_peak, totals.unit));
    println!(
        "Design Load:           {} ({} governs)",
        format_with_unit(totals.design, totals.unit),
        governing
    );
}

fn print_usage() {
    println!("Gasload - Residential Gas Load Diversity Calculator");
    println!();
    println!("USAGE:");
    println!("    gasload <command> [args] [options]");
    println!();
    println!("COMMANDS:");
    println!("    catalog [--standard S]                 List categories, equipment and diversity factors");
    println!("    init <file> [--name N] [--info KEY=VALUE]... [--standard S] [--units U]");
    println!("                                           Create an empty project file dated today");
    println!("    add <file> --category C --rating R [--units U] [--equipment E]");
    println!("               [--diversity D] [--source CAT]");
    println!("                                           Add an appliance");
    println!("    edit <file> <id> [--category C] [--equipment E] [--source CAT|none]");
    println!("                     [--rating R] [--units U] [--diversity D]");
    println!("                                           Change an appliance");
    println!("    remove <file> <id>                     Remove an appliance");
    println!("    set-info <file> KEY=VALUE...           Set project details (projectName, streetAddress,");
    println!("                                           town, state, doc, gIntake, assessedBy,");
    println!("                                           assessmentDate, revisionNumber, revisionDate)");
    println!("    summary <file> [--units U] [--standard S] [--json]");
    println!("                                           Print load totals");
    println!("    details <file> [--units U]             Print the seasonal breakdown");
    println!("    set-standard <file> <S>                Switch diversity standard and save");
    println!("    report <file> [--units U] [--output out.pdf]");
    println!("                                           Write the PDF report");
    println!();
    println!("OPTIONS:");
    println!("    --gas-energy <N>   Gas energy content in BTU/ft3 (saved by commands that write the file)");
    println!("    -h, --help         Show this help message");
    println!();
    println!("VALUES:");
    println!("    Standards: default, ashrae, iapmo");
    println!("    Units:     BTU/hr, MMBTU/hr, CFH");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let args = Args::parse(&strings(&[
            "job.json",
            "--category",
            "Heating",
            "--rating",
            "100000",
            "--json",
        ]))
        .unwrap();
        assert_eq!(args.positional, vec!["job.json"]);
        assert_eq!(args.option("--category"), Some("Heating"));
        assert_eq!(args.number("--rating").unwrap(), Some(100_000.0));
        assert!(args.json);
    }

    #[test]
    fn test_parse_errors() {
        let err = Args::parse(&strings(&["job.json", "--bogus"])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err = Args::parse(&strings(&["job.json", "--rating"])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let args = Args::parse(&strings(&["--rating", "lots"])).unwrap();
        assert!(args.number("--rating").is_err());
        assert!(args.require(0, "file").is_err());
    }

    #[test]
    fn test_units_and_standard() {
        let args = Args::parse(&strings(&["--units", "cfh", "--standard", "ASHRAE"])).unwrap();
        assert_eq!(args.units().unwrap(), Some(EnergyUnit::Cfh));
        assert_eq!(args.standard().unwrap(), Some(DiversityStandard::Ashrae));
        assert!(Args::default().units().unwrap().is_none());
    }

    #[test]
    fn test_unknown_command() {
        let err = run("frobnicate", &Args::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_parse_info_pairs() {
        let args = Args::parse(&strings(&["job.json", "--info", "doc=D-12", "--info", "gIntake=G 7=A"])).unwrap();
        assert_eq!(
            args.info,
            vec![
                ("doc".to_string(), "D-12".to_string()),
                ("gIntake".to_string(), "G 7=A".to_string())
            ]
        );

        for bad in ["doc", "=D-12", " =x"] {
            let err = Args::parse(&strings(&["job.json", "--info", bad])).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT", "input {}", bad);
        }
    }

    // ------------------------------------------------------------------
    // Commands against a project file
    // ------------------------------------------------------------------

    /// Run a command with `file` as its first positional argument.
    fn run_on(command: &str, file: &Path, rest: &[&str]) -> CalcResult<()> {
        let mut raw = vec![file.display().to_string()];
        raw.extend(strings(rest));
        run(command, &Args::parse(&raw)?)
    }

    fn new_project_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("job.json");
        run_on("init", &path, &["--name", "Birch Rd"]).unwrap();
        path
    }

    #[test]
    fn test_init_sets_details_and_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.json");
        run_on(
            "init",
            &path,
            &["--name", "Birch Rd", "--info", "doc=D-12", "--info", "revisionDate=2024-01-02", "--standard", "iapmo"],
        )
        .unwrap();

        let project = load_project(&path).unwrap();
        assert_eq!(project.info(info_keys::PROJECT_NAME).as_deref(), Some("Birch Rd"));
        assert_eq!(project.info(info_keys::DOC).as_deref(), Some("D-12"));
        assert_eq!(project.info(info_keys::REVISION_DATE).as_deref(), Some("2024-01-02"));
        assert_eq!(project.diversity_standard, DiversityStandard::Iapmo);

        let assessed = project.info(info_keys::ASSESSMENT_DATE).unwrap();
        assert!(chrono::NaiveDate::parse_from_str(&assessed, "%Y-%m-%d").is_ok());

        let err = run_on("init", &path, &[]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_set_info_updates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_project_file(&dir);

        run_on("set-info", &path, &["town=Salem", "state=MA", "--info", "assessedBy=R. Singh"]).unwrap();
        let project = load_project(&path).unwrap();
        assert_eq!(project.info(info_keys::TOWN).as_deref(), Some("Salem"));
        assert_eq!(project.info(info_keys::STATE).as_deref(), Some("MA"));
        assert_eq!(project.info(info_keys::ASSESSED_BY).as_deref(), Some("R. Singh"));

        assert!(run_on("set-info", &path, &[]).is_err());
        assert!(run_on("set-info", &path, &["town"]).is_err());
    }

    #[test]
    fn test_add_takes_catalog_diversity() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_project_file(&dir);

        run_on(
            "add",
            &path,
            &["--category", "heating", "--equipment", "Forced Air Furnace (<225k BTU/hr)", "--rating", "100000"],
        )
        .unwrap();

        let project = load_project(&path).unwrap();
        assert_eq!(project.appliance_count(), 1);
        let entry = &project.appliances[0];
        assert_eq!(entry.category, "Heating");
        assert_eq!(entry.diversity, 75.0);
        assert_eq!(project.recompute().winter_peak_btu.value(), 75_000.0);
    }

    #[test]
    fn test_add_custom_with_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_project_file(&dir);

        run_on(
            "add",
            &path,
            &["--category", "Custom", "--equipment", "Pizza Oven", "--rating", "60000", "--source", "Cooking"],
        )
        .unwrap();

        let project = load_project(&path).unwrap();
        let entry = &project.appliances[0];
        assert!(entry.is_custom());
        assert_eq!(entry.equipment, "Pizza Oven");
        assert_eq!(entry.diversity, 15.0);
        assert_eq!(entry.diversity_source.as_deref(), Some("Cooking"));
    }

    #[test]
    fn test_add_rejects_misplaced_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_project_file(&dir);

        let err = run_on(
            "add",
            &path,
            &["--category", "Cooking", "--equipment", "Range/Oven", "--rating", "50000", "--source", "Heating"],
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err = run_on("add", &path, &["--category", "Custom", "--rating", "50000", "--source", "Custom"]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        assert_eq!(load_project(&path).unwrap().appliance_count(), 0);
    }

    #[test]
    fn test_set_standard_and_remove_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_project_file(&dir);
        run_on(
            "add",
            &path,
            &["--category", "Heating", "--equipment", "Forced Air Furnace (<225k BTU/hr)", "--rating", "100000"],
        )
        .unwrap();

        run_on("set-standard", &path, &["ashrae"]).unwrap();
        let project = load_project(&path).unwrap();
        assert_eq!(project.diversity_standard, DiversityStandard::Ashrae);
        assert_eq!(project.appliances[0].diversity, 90.0);

        let id = project.appliances[0].id.clone();
        run_on("remove", &path, &[id.as_str()]).unwrap();
        assert!(load_project(&path).unwrap().appliances.is_empty());

        let err = run_on("remove", &path, &[id.as_str()]).unwrap_err();
        assert_eq!(err.error_code(), "APPLIANCE_NOT_FOUND");
    }

    /// Edit appliance `id`, then read it back from the saved file.
    fn edit_and_reload(path: &Path, id: &str, rest: &[&str]) -> CalcResult<ApplianceEntry> {
        let mut all = vec![id];
        all.extend_from_slice(rest);
        run_on("edit", path, &all)?;
        load_project(path)?
            .get_appliance(id)
            .cloned()
            .ok_or_else(|| CalcError::appliance_not_found(id))
    }

    #[test]
    fn test_edit_appliance() {
        let dir = tempfile::tempdir().unwrap();
        let path = new_project_file(&dir);
        run_on(
            "add",
            &path,
            &["--category", "Hot Water", "--equipment", "Tank Water Heater (<50 gal)", "--rating", "40000"],
        )
        .unwrap();
        let id = load_project(&path).unwrap().appliances[0].id.clone();
        let edited = |rest: &[&str]| edit_and_reload(&path, &id, rest);

        let entry = edited(&["--equipment", "On-Demand Water Heater"]).unwrap();
        assert_eq!(entry.diversity, 25.0);

        let entry = edited(&["--category", "Custom"]).unwrap();
        assert!(entry.is_custom());
        assert_eq!((entry.rating, entry.diversity), (0.0, 0.0));
        assert_eq!(entry.equipment, "");

        let entry = edited(&["--equipment", "Kiln", "--source", "cooking", "--rating", "5", "--units", "cfh"]).unwrap();
        assert_eq!(entry.equipment, "Kiln");
        assert_eq!(entry.diversity, 15.0);
        assert_eq!(entry.diversity_source.as_deref(), Some("Cooking"));
        assert_eq!(entry.rating, 5.0);
        assert_eq!(entry.units, EnergyUnit::Cfh);

        let entry = edited(&["--source", "Heating", "--diversity", "40"]).unwrap();
        assert_eq!(entry.diversity_source.as_deref(), Some("Heating"));
        assert_eq!(entry.diversity, 40.0);

        let entry = edited(&["--source", "none"]).unwrap();
        assert!(entry.diversity_source.is_none());
        assert_eq!(entry.diversity, 40.0);

        let entry = edited(&["--category", "Heating"]).unwrap();
        assert_eq!(entry.equipment, "Forced Air Furnace (<225k BTU/hr)");
        assert_eq!(entry.diversity, 75.0);

        assert_eq!(edited(&["--source", "Cooking"]).unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(edited(&["--equipment", "Kiln"]).unwrap_err().error_code(), "EQUIPMENT_NOT_FOUND");
        assert_eq!(edited(&[]).unwrap_err().error_code(), "INVALID_INPUT");

        let err = run_on("edit", &path, &["appliance-missing", "--rating", "1"]).unwrap_err();
        assert_eq!(err.error_code(), "APPLIANCE_NOT_FOUND");
    }
}
