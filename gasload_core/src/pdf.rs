//! # PDF Generation Module
//!
//! Renders the load diversity report for a project using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected via placeholder replacement before compilation
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Report Layout
//!
//! 1. Project details
//! 2. Appliance list with individual loads
//! 3. Winter and summer peak calculations (seasonal + year-round subtotals)
//! 4. Final load summary
//! 5. Methodology and disclaimer
//!
//! Every page carries the report title, project name and street address in
//! the header, and the generation date and "Page i of n" in the footer.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gasload_core::pdf::{render_report_pdf, report_file_name};
//! use gasload_core::project::Project;
//! use gasload_core::units::EnergyUnit;
//!
//! let project = Project::new().with_info("projectName", "Maple St");
//! let pdf_bytes = render_report_pdf(&project, EnergyUnit::Cfh).unwrap();
//! std::fs::write(report_file_name(&project), pdf_bytes).unwrap();
//! ```

use std::collections::HashMap;

use chrono::Utc;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculations::{LoadLine, SeasonalBreakdown};
use crate::errors::{CalcError, CalcResult};
use crate::project::{info_keys, Project};
use crate::reference::SeasonalClass;
use crate::units::{format_quantity, format_with_unit, from_base, Btuh, EnergyUnit};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    /// Fonts bundled with typst-assets (Libertinus Serif, New Computer Modern, DejaVu Sans Mono)
    fn load_fonts() -> Vec<Font> {
        typst_assets::fonts()
            .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
            .collect()
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// Report Template
// ============================================================================

const REPORT_TITLE: &str = "Residential Load Diversity Report";

const DISCLAIMER: &str = "This report is an estimation tool intended for sizing of UTILITY-OWNED ASSETS \
(service line, meter, regulator) only. The diversity factors used are standard engineering practice for \
this purpose. Sizing of CUSTOMER-OWNED interior gas piping is governed by NFPA 54 (National Fuel Gas Code), \
as adopted by the local Authority Having Jurisdiction (AHJ). NFPA 54 generally requires piping to be sized \
for the maximum connected load of all appliances. The diversity factors in this report MUST NOT be used for \
interior piping design unless explicitly permitted by the AHJ. All final designs must be verified by a \
qualified professional and approved by the local gas utility.";

const REPORT_TEMPLATE: &str = r##"
#set page(
  paper: "us-letter",
  margin: (top: 0.9in, bottom: 0.9in, x: 0.75in),
  header: [
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt, weight: "bold")[{{TITLE}}]],
      align(center)[#text(size: 9pt)[{{HEADER_NAME}}]],
      align(right)[#text(size: 9pt)[{{HEADER_ADDRESS}}]],
    )
    #v(-6pt)
    #line(length: 100%, stroke: 0.5pt + gray)
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr),
      align(left)[#text(size: 8pt, fill: gray)[Report generated on {{DATE}}]],
      align(right)[#text(size: 8pt, fill: gray)[Page #counter(page).display("1 of 1", both: true)]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 10pt)

== Project Details

#table(
  columns: (auto, 1fr),
  inset: 6pt,
  stroke: none,
  fill: (_, row) => if calc.odd(row) { rgb("#f5f5f5") },
  [Project Name], [{{PROJECT_NAME}}],
  [Address], [{{ADDRESS}}],
  [DOC], [{{DOC}}],
  [G-Intake \#], [{{G_INTAKE}}],
  [Assessed by], [{{ASSESSED_BY}}],
  [Assessment Date], [{{ASSESSMENT_DATE}}],
  [Revision \#], [{{REVISION}}],
)

#v(8pt)

== Appliance List & Individual Loads

#table(
  columns: (2fr, 1fr, 1fr, 1fr),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, right, right),
  table.header(
    [*Equipment Type*], [*Max Input ({{UNIT}})*], [*Diversity Factor*], [*Diversified Load ({{UNIT}})*],
  ),
{{APPLIANCE_ROWS}}
)

#v(8pt)

== Detailed Load Calculation Analysis

=== Winter Peak Calculation

{{WINTER_TABLE}}
#v(4pt)
{{YEAR_ROUND_TABLE}}
#v(4pt)
#block(width: 100%, fill: rgb("#e7f1ff"), inset: 8pt)[
  Total Winter Peak = {{WINTER_SUB}} (Winter) + {{YEAR_ROUND_SUB}} (Year-Round) = *{{WINTER_TOTAL}}*
]

#v(8pt)

=== Summer Peak Calculation

{{SUMMER_TABLE}}
#v(4pt)
{{YEAR_ROUND_TABLE}}
#v(4pt)
#block(width: 100%, fill: rgb("#e7f1ff"), inset: 8pt)[
  Total Summer Peak = {{SUMMER_SUB}} (Summer) + {{YEAR_ROUND_SUB}} (Year-Round) = *{{SUMMER_TOTAL}}*
]

#v(8pt)

== Final Load Summary

#table(
  columns: (1fr, 1fr),
  inset: 6pt,
  stroke: 0.5pt,
  [*Total Connected Load*], [{{CONNECTED}}],
  [Winter Peak (Diversified)], [{{WINTER_TOTAL}}],
  [Summer Peak (Diversified)], [{{SUMMER_TOTAL}}],
  table.cell(fill: rgb("#d3e5ff"))[*Design Load (Worst Case)*],
  table.cell(fill: rgb("#d3e5ff"))[*{{DESIGN}}*],
)

#v(8pt)

=== Calculation Methodology & Sources

The Diversified Load for each appliance is calculated as: Max Input Rating × (Diversity Factor / 100).
The Design Load is the greater of the Winter and Summer peak loads.
The diversity factors used in this calculation are based on the {{STANDARD}} standard.
For code-compliant sizing, factors should be verified with the local utility or a qualified engineer.
Gas energy content was assumed to be {{GAS_ENERGY}} BTU/ft³.

#v(8pt)

=== Important Disclaimer

#block(width: 100%, stroke: 0.5pt + gray, inset: 8pt)[
  #text(size: 9pt, fill: rgb("#505050"))[{{DISCLAIMER}}]
]
"##;

/// Render the load diversity report for a project.
///
/// Totals and per-appliance loads are expressed in `unit`; CFH conversions
/// use the project's gas energy content.
///
/// # Errors
///
/// `Internal` if Typst compilation or PDF export fails.
pub fn render_report_pdf(project: &Project, unit: EnergyUnit) -> CalcResult<Vec<u8>> {
    let source = build_report_source(project, unit);

    let world = PdfWorld::new(source);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::Internal {
            message: format!("Typst compilation failed: {}", error_msgs.join("; ")),
        }
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::Internal {
            message: format!("PDF rendering failed: {}", error_msgs.join("; ")),
        }
    })?;

    log::info!(
        "rendered report: {} appliances, {} ({} bytes)",
        project.appliance_count(),
        unit,
        pdf_bytes.len()
    );
    Ok(pdf_bytes)
}

/// Suggested file name for a project's report: `<projectName>.pdf`, or
/// `load-report.pdf` when the project is unnamed.
///
/// Path separators, characters Windows rejects in file names, and control
/// characters become `-`, so the name never points outside the target
/// directory.
pub fn report_file_name(project: &Project) -> String {
    let name: String = project
        .info(info_keys::PROJECT_NAME)
        .unwrap_or_else(|| "load-report".to_string())
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    match name.trim_matches('.') {
        "" => "load-report.pdf".to_string(),
        _ => format!("{}.pdf", name),
    }
}

/// Build the Typst source for a project's report.
fn build_report_source(project: &Project, unit: EnergyUnit) -> String {
    let g = project.gas_energy_content();
    let breakdown = project.breakdown();
    let result = project.recompute();
    let display = |btu: Btuh| format_with_unit(from_base(btu.value(), unit, g), unit);
    let plain = |btu: Btuh| format_quantity(from_base(btu.value(), unit, g));

    let values: HashMap<&str, String> = HashMap::from([
        ("TITLE", REPORT_TITLE.to_string()),
        ("DATE", Utc::now().format("%Y-%m-%d").to_string()),
        ("APPLIANCE_ROWS", build_appliance_rows(&project.lines(), unit, g)),
        ("WINTER_TABLE", build_seasonal_table(&breakdown, SeasonalClass::Winter, unit, g)),
        ("SUMMER_TABLE", build_seasonal_table(&breakdown, SeasonalClass::Summer, unit, g)),
        ("YEAR_ROUND_TABLE", build_seasonal_table(&breakdown, SeasonalClass::YearRound, unit, g)),
        ("WINTER_SUB", plain(breakdown.subtotal(SeasonalClass::Winter))),
        ("SUMMER_SUB", plain(breakdown.subtotal(SeasonalClass::Summer))),
        ("YEAR_ROUND_SUB", plain(breakdown.subtotal(SeasonalClass::YearRound))),
        ("WINTER_TOTAL", display(breakdown.winter_total())),
        ("SUMMER_TOTAL", display(breakdown.summer_total())),
        ("CONNECTED", display(result.connected_btu)),
        ("DESIGN", display(result.design_btu())),
        ("GAS_ENERGY", format_quantity(g)),
        ("STANDARD", escape_typst(project.diversity_standard.display_name())),
        ("DISCLAIMER", escape_typst(DISCLAIMER)),
        ("UNIT", unit.label().to_string()),
        ("HEADER_NAME", info_or_na(project, info_keys::PROJECT_NAME)),
        ("HEADER_ADDRESS", info_or_na(project, info_keys::STREET_ADDRESS)),
        ("PROJECT_NAME", info_or_na(project, info_keys::PROJECT_NAME)),
        ("ADDRESS", escape_typst(&address_line(project))),
        ("DOC", info_or_na(project, info_keys::DOC)),
        ("G_INTAKE", info_or_na(project, info_keys::G_INTAKE)),
        ("ASSESSED_BY", info_or_na(project, info_keys::ASSESSED_BY)),
        ("ASSESSMENT_DATE", info_or_na(project, info_keys::ASSESSMENT_DATE)),
        ("REVISION", escape_typst(&revision_line(project))),
    ]);

    fill_template(REPORT_TEMPLATE, &values)
}

/// Replace each `{{NAME}}` in `template` with its value in one pass.
///
/// Inserted values are never scanned again, so user text that happens to
/// contain `{{...}}` is kept literally. Unknown names are left as written.
fn fill_template(template: &str, values: &HashMap<&str, String>) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = &after[..end];
                match values.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Escaped projectInfo value, or "N/A"
fn info_or_na(project: &Project, key: &str) -> String {
    project
        .info(key)
        .map(|v| escape_typst(&v))
        .unwrap_or_else(|| "N/A".to_string())
}

/// "street, town, state" with blank parts skipped
fn address_line(project: &Project) -> String {
    let parts: Vec<String> = [info_keys::STREET_ADDRESS, info_keys::TOWN, info_keys::STATE]
        .iter()
        .filter_map(|key| project.info(key))
        .collect();
    if parts.is_empty() {
        "N/A".to_string()
    } else {
        parts.join(", ")
    }
}

/// "3 (on 2024-05-01)", "3", or "N/A"
fn revision_line(project: &Project) -> String {
    match (
        project.info(info_keys::REVISION_NUMBER),
        project.info(info_keys::REVISION_DATE),
    ) {
        (Some(number), Some(date)) => format!("{} (on {})", number, date),
        (Some(number), None) => number,
        (None, Some(date)) => format!("N/A (on {})", date),
        (None, None) => "N/A".to_string(),
    }
}

/// Escape special Typst characters in user-provided text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' | '_' | '#' | '$' | '@' | '<' | '>' | '\\' | '`' | '[' | ']' | '/' | '~' | '=' | '-'
            | '+' => format!("\\{}", c),
            _ => c.to_string(),
        })
        .collect()
}

fn build_appliance_rows(lines: &[LoadLine], unit: EnergyUnit, g: f64) -> String {
    if lines.is_empty() {
        return "  table.cell(colspan: 4)[_No appliances entered_],".to_string();
    }
    lines
        .iter()
        .map(|line| {
            format!(
                "  [{}], [{}], [{}%], [{}],",
                escape_typst(&line.name),
                format_quantity(line.rating_in(unit, g)),
                format_quantity(line.diversity),
                format_quantity(line.diversified_in(unit, g)),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One seasonal table: title row, one row per appliance, subtotal footer.
fn build_seasonal_table(breakdown: &SeasonalBreakdown, season: SeasonalClass, unit: EnergyUnit, g: f64) -> String {
    let title = match season {
        SeasonalClass::Winter => "Winter Loads",
        SeasonalClass::Summer => "Summer Loads",
        SeasonalClass::YearRound => "Year-Round Loads",
    };
    let lines = breakdown.lines(season);

    let rows = if lines.is_empty() {
        "  [No appliances in this category], [], [], [],".to_string()
    } else {
        lines
            .iter()
            .map(|line| {
                format!(
                    "  [{}], [{}], [{}%], [{}],",
                    escape_typst(&line.name),
                    format_with_unit(line.rating_in(unit, g), unit),
                    format_quantity(line.diversity),
                    format_with_unit(line.diversified_in(unit, g), unit),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let subtotal = from_base(breakdown.subtotal(season).value(), unit, g);
    format!(
        r##"#table(
  columns: (2fr, 1fr, 1fr, 1fr),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, right, right),
  table.header(table.cell(colspan: 4, align: center, fill: rgb("#e9ecef"))[*{}*]),
{}
  table.footer(table.cell(colspan: 3, align: right)[*Subtotal*], [*{}*]),
)"##,
        title,
        rows,
        format_with_unit(subtotal, unit)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appliance::ApplianceEntry;
    use crate::reference::{Category, DiversityStandard};

    fn sample_project() -> Project {
        let mut project = Project::new()
            .with_info("projectName", "Cedar Lane #4")
            .with_info("streetAddress", "12 Cedar Lane")
            .with_info("town", "Springfield")
            .with_info("state", "MA")
            .with_info("revisionNumber", "2")
            .with_info("revisionDate", "2024-03-01");
        project.add_appliance(ApplianceEntry::new(
            "Heating",
            "Forced Air Furnace (<225k BTU/hr)",
            100_000.0,
            EnergyUnit::BtuPerHour,
            75.0,
        ));
        project.add_appliance(ApplianceEntry::new(
            "Hot Water",
            "Tank Water Heater (<50 gal)",
            40_000.0,
            EnergyUnit::BtuPerHour,
            35.0,
        ));
        project.add_appliance(
            ApplianceEntry::from_catalog(
                Category::PoolSpaHeaters,
                "Pool Heater",
                0.25,
                EnergyUnit::MmbtuPerHour,
                DiversityStandard::Default,
            )
            .unwrap(),
        );
        project
    }

    #[test]
    fn test_escape_typst() {
        assert_eq!(escape_typst("Unit #4 [rear]"), "Unit \\#4 \\[rear\\]");
        assert_eq!(escape_typst("a*b_c"), "a\\*b\\_c");
        assert_eq!(escape_typst("http://x"), "http:\\/\\/x");
        assert_eq!(escape_typst("Plain text, 123"), "Plain text, 123");
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name(&sample_project()), "Cedar Lane #4.pdf");
        assert_eq!(report_file_name(&Project::new()), "load-report.pdf");
    }

    #[test]
    fn test_report_file_name_strips_separators() {
        let slash = Project::new().with_info("projectName", "Unit 4/5 Main St");
        assert_eq!(report_file_name(&slash), "Unit 4-5 Main St.pdf");

        let windows = Project::new().with_info("projectName", "C:\\jobs\\Lot 7?");
        assert_eq!(report_file_name(&windows), "C--jobs-Lot 7-.pdf");

        let dots = Project::new().with_info("projectName", "..");
        assert_eq!(report_file_name(&dots), "load-report.pdf");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(report_file_name(&slash));
        std::fs::write(&path, b"%PDF").unwrap();
        assert_eq!(path.parent(), Some(dir.path()));
    }

    #[test]
    fn test_fill_template_single_pass() {
        let values: HashMap<&str, String> =
            HashMap::from([("A", "{{B}}".to_string()), ("B", "bee".to_string())]);
        assert_eq!(fill_template("[{{A}}] [{{B}}]", &values), "[{{B}}] [bee]");
        assert_eq!(fill_template("{{MISSING}} and {{open", &values), "{{MISSING}} and {{open");
    }

    #[test]
    fn test_user_text_with_placeholder_syntax_stays_literal() {
        let mut project = Project::new()
            .with_info("projectName", "Job {{DOC}}")
            .with_info("doc", "D-77");
        project.add_appliance(ApplianceEntry::custom(
            "Heater {{DESIGN}}",
            10_000.0,
            EnergyUnit::BtuPerHour,
            None,
            DiversityStandard::Default,
        ));
        let source = build_report_source(&project, EnergyUnit::BtuPerHour);

        assert!(source.contains("[Project Name], [Job {{DOC}}]"));
        assert!(source.contains("[DOC], [D\\-77]"));
        assert!(!source.contains("Job D\\-77"));
        assert!(source.contains("Heater {{DESIGN}}"));
    }

    #[test]
    fn test_detail_lines() {
        let project = sample_project();
        assert_eq!(address_line(&project), "12 Cedar Lane, Springfield, MA");
        assert_eq!(revision_line(&project), "2 (on 2024-03-01)");

        let empty = Project::new().with_info("town", "Salem");
        assert_eq!(address_line(&empty), "Salem");
        assert_eq!(revision_line(&empty), "N/A");
    }

    #[test]
    fn test_report_source_contents() {
        let source = build_report_source(&sample_project(), EnergyUnit::BtuPerHour);

        assert!(source.contains("Cedar Lane \\#4"));
        assert!(source.contains("Total Winter Peak = 75,000 (Winter) + 14,000 (Year-Round) = *89,000 BTU/hr*"));
        assert!(source.contains("Total Summer Peak = 250,000 (Summer) + 14,000 (Year-Round) = *264,000 BTU/hr*"));
        assert!(source.contains("[*Total Connected Load*], [390,000 BTU/hr]"));
        assert!(source.contains("[*264,000 BTU/hr*]"));
        assert!(source.contains("Utility Standard (Default) standard"));
        assert!(source.contains("1,036 BTU/ft³"));
        assert!(!source.contains("{{"));
    }

    #[test]
    fn test_empty_season_placeholder() {
        let mut project = Project::new();
        project.add_appliance(ApplianceEntry::new("Heating", "Furnace", 50_000.0, EnergyUnit::BtuPerHour, 80.0));
        let source = build_report_source(&project, EnergyUnit::Cfh);
        assert!(source.contains("[No appliances in this category]"));
        assert!(source.contains("Max Input (CFH)"));
    }

    #[test]
    fn test_pdf_generation() {
        let pdf = render_report_pdf(&sample_project(), EnergyUnit::Cfh);
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }

    #[test]
    fn test_empty_project_pdf() {
        let pdf_bytes = render_report_pdf(&Project::new(), EnergyUnit::BtuPerHour).unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"));
    }
}
