//! Wide → long reshaping of statistical tables.
//!
//! A wide table has one row per dimension combination and one column per time
//! period. Reshaping unpivots the period columns, drops rows that cannot be
//! loaded, and folds the remaining identifier columns into the dimension and
//! attribute signatures used by `SeriesMetadata`.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use sustaingraph_store::LongRow;
use sustaingraph_store::schema::{
    COLUMN_QUALIFIER_MARKER, GEO_COLUMN, NO_ATTRIBUTES_CODE, NO_ATTRIBUTES_DESCRIPTION,
    NO_DIMENSIONS_CODE, NO_DIMENSIONS_DESCRIPTION, SIGNATURE_SEPARATOR, SUBNATIONAL_CODE_LENGTHS,
    UNIT_COLUMN,
};
use tracing::{debug, info, warn};

use crate::provider::{DimensionDictionaries, WideTable};

/// Lower-cases a raw header and truncates it at the qualifier marker.
#[must_use]
pub fn normalize_column_name(name: &str) -> String {
    let head = name
        .split(COLUMN_QUALIFIER_MARKER)
        .next()
        .unwrap_or(name);
    head.trim().to_lowercase()
}

/// Time columns are named by digits only (`2015`).
#[must_use]
pub fn is_time_column(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|ch| ch.is_ascii_digit())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Geo,
    Time,
    Attribute,
    Dimension,
}

impl ColumnRole {
    fn of(normalized: &str) -> Self {
        if normalized == GEO_COLUMN {
            Self::Geo
        } else if is_time_column(normalized) {
            Self::Time
        } else if normalized == UNIT_COLUMN {
            Self::Attribute
        } else {
            Self::Dimension
        }
    }
}

/// Column roles of one table, computed once before any row is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    names: Vec<String>,
    roles: Vec<ColumnRole>,
    geo: usize,
    attribute: Option<usize>,
    dimensions: Vec<usize>,
    times: Vec<usize>,
}

impl ColumnLayout {
    /// Returns `None` when the table has no area column.
    #[must_use]
    pub fn classify(columns: &[String]) -> Option<Self> {
        let names: Vec<String> = columns.iter().map(|name| normalize_column_name(name)).collect();
        let roles: Vec<ColumnRole> = names.iter().map(|name| ColumnRole::of(name)).collect();

        let geo = roles.iter().position(|role| *role == ColumnRole::Geo)?;
        let attribute = roles.iter().position(|role| *role == ColumnRole::Attribute);
        let indices_of = |wanted: ColumnRole| -> Vec<usize> {
            roles
                .iter()
                .enumerate()
                .filter(|(index, role)| {
                    **role == wanted && *index != geo && Some(*index) != attribute
                })
                .map(|(index, _)| index)
                .collect()
        };
        let dimensions = indices_of(ColumnRole::Dimension);
        let times = indices_of(ColumnRole::Time);

        Some(Self {
            names,
            roles,
            geo,
            attribute,
            dimensions,
            times,
        })
    }

    #[must_use]
    pub fn role(&self, index: usize) -> Option<ColumnRole> {
        self.roles.get(index).copied()
    }

    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn dimension_names(&self) -> Vec<&str> {
        self.dimensions.iter().map(|index| self.names[*index].as_str()).collect()
    }

    #[must_use]
    pub fn time_names(&self) -> Vec<&str> {
        self.times.iter().map(|index| self.names[*index].as_str()).collect()
    }

    #[must_use]
    pub fn has_attribute(&self) -> bool {
        self.attribute.is_some()
    }

    /// Normalized names of the columns that need a description dictionary.
    #[must_use]
    pub fn described_columns(&self) -> Vec<&str> {
        let mut names = self.dimension_names();
        if let Some(index) = self.attribute {
            names.push(self.names[index].as_str());
        }
        names
    }
}

/// (column, code) pair that had no entry in its dictionary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UnresolvedDescription {
    pub column: String,
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReshapeReport {
    /// Wide rows removed because their area code is not sub-national.
    pub subnational_filtered_rows: usize,
    /// Long rows produced by unpivoting the remaining wide rows.
    pub unpivoted_rows: usize,
    pub dropped_missing_identifier: usize,
    pub dropped_missing_value: usize,
    pub dropped_invalid_value: usize,
    pub dropped_unknown_area: usize,
    pub unknown_areas: BTreeSet<String>,
    pub unresolved_descriptions: BTreeSet<UnresolvedDescription>,
    pub output_rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReshapeOutput {
    pub rows: Vec<LongRow>,
    pub report: ReshapeReport,
}

struct Signature {
    dim_codes: String,
    dim_desc: String,
    att_codes: String,
    att_desc: String,
}

/// Reshapes a wide table into long observation rows.
///
/// Returns `None` when the table has no area column, which makes the dataset
/// not applicable to this loader.
#[must_use]
pub fn reshape(
    table: &WideTable,
    known_areas: &HashSet<String>,
    subnational: bool,
    dictionaries: &DimensionDictionaries,
) -> Option<ReshapeOutput> {
    let Some(layout) = ColumnLayout::classify(&table.columns) else {
        info!("table has no area column, skipping");
        return None;
    };
    debug!(
        dimensions = ?layout.dimension_names(),
        periods = layout.times.len(),
        attribute = layout.has_attribute(),
        "classified columns"
    );

    let mut report = ReshapeReport::default();
    let mut rows = Vec::new();
    let periods = layout.times.len();

    for cells in &table.rows {
        let cell = |index: usize| {
            cells
                .get(index)
                .and_then(Option::as_deref)
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let geo = cell(layout.geo);
        if subnational
            && !geo.is_some_and(|code| SUBNATIONAL_CODE_LENGTHS.contains(&code.chars().count()))
        {
            report.subnational_filtered_rows += 1;
            continue;
        }
        report.unpivoted_rows += periods;

        let Some(geo) = geo else {
            report.dropped_missing_identifier += periods;
            continue;
        };
        let Some(signature) = build_signature(&layout, &cell, dictionaries, &mut report) else {
            report.dropped_missing_identifier += periods;
            continue;
        };

        for &time_index in &layout.times {
            let Some(raw) = cell(time_index) else {
                report.dropped_missing_value += 1;
                continue;
            };
            let value = match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                _ => {
                    report.dropped_invalid_value += 1;
                    continue;
                }
            };
            if !known_areas.contains(geo) {
                report.dropped_unknown_area += 1;
                report.unknown_areas.insert(geo.to_string());
                continue;
            }
            rows.push(LongRow {
                geo: geo.to_string(),
                time: layout.names[time_index].clone(),
                value,
                dim_codes: signature.dim_codes.clone(),
                dim_desc: signature.dim_desc.clone(),
                att_codes: signature.att_codes.clone(),
                att_desc: signature.att_desc.clone(),
            });
        }
    }

    report.output_rows = rows.len();
    if !report.unknown_areas.is_empty() {
        warn!(
            dropped = report.dropped_unknown_area,
            areas = report.unknown_areas.len(),
            "rows dropped for areas missing from the graph"
        );
    }
    if !report.unresolved_descriptions.is_empty() {
        warn!(
            count = report.unresolved_descriptions.len(),
            "codes without a description, raw code used instead"
        );
    }
    info!(
        unpivoted = report.unpivoted_rows,
        missing_values = report.dropped_missing_value,
        invalid_values = report.dropped_invalid_value,
        missing_identifiers = report.dropped_missing_identifier,
        unknown_area = report.dropped_unknown_area,
        subnational_filtered = report.subnational_filtered_rows,
        output = report.output_rows,
        "reshaped table"
    );

    Some(ReshapeOutput { rows, report })
}

fn build_signature<'a>(
    layout: &ColumnLayout,
    cell: &impl Fn(usize) -> Option<&'a str>,
    dictionaries: &DimensionDictionaries,
    report: &mut ReshapeReport,
) -> Option<Signature> {
    let mut describe = |index: usize, code: &str| -> String {
        let column = &layout.names[index];
        if let Some(description) = dictionaries.get(column).and_then(|dict| dict.get(code)) {
            return description.clone();
        }
        report.unresolved_descriptions.insert(UnresolvedDescription {
            column: column.clone(),
            code: code.to_string(),
        });
        code.to_string()
    };

    let (dim_codes, dim_desc) = if layout.dimensions.is_empty() {
        (
            NO_DIMENSIONS_CODE.to_string(),
            NO_DIMENSIONS_DESCRIPTION.to_string(),
        )
    } else {
        let mut codes = Vec::with_capacity(layout.dimensions.len());
        let mut descriptions = Vec::with_capacity(layout.dimensions.len());
        for &index in &layout.dimensions {
            let code = cell(index)?;
            descriptions.push(describe(index, code));
            codes.push(code);
        }
        (
            codes.join(SIGNATURE_SEPARATOR),
            descriptions.join(SIGNATURE_SEPARATOR),
        )
    };

    let (att_codes, att_desc) = match layout.attribute {
        None => (
            NO_ATTRIBUTES_CODE.to_string(),
            NO_ATTRIBUTES_DESCRIPTION.to_string(),
        ),
        Some(index) => {
            let code = cell(index)?;
            (code.to_string(), describe(index, code))
        }
    };

    Some(Signature {
        dim_codes,
        dim_desc,
        att_codes,
        att_desc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::CodeDictionary;

    fn table(columns: &[&str], rows: &[&[Option<&str>]]) -> WideTable {
        WideTable::new(
            columns.iter().map(ToString::to_string).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.map(ToString::to_string)).collect())
                .collect(),
        )
    }

    fn known(codes: &[&str]) -> HashSet<String> {
        codes.iter().map(ToString::to_string).collect()
    }

    fn dictionary(entries: &[(&str, &str)]) -> CodeDictionary {
        entries
            .iter()
            .map(|(code, desc)| ((*code).to_string(), (*desc).to_string()))
            .collect()
    }

    #[test]
    fn normalizes_header_names() {
        assert_eq!(normalize_column_name("GEO\\TIME_PERIOD"), "geo");
        assert_eq!(normalize_column_name(" Unit "), "unit");
        assert!(is_time_column("2015"));
        assert!(!is_time_column("2015Q1"));
        assert!(!is_time_column(""));
    }

    #[test]
    fn classify_assigns_roles() {
        let columns: Vec<String> = ["freq", "unit", "geo\\TIME_PERIOD", "2015", "2016"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let layout = ColumnLayout::classify(&columns).expect("geo column present");
        assert_eq!(layout.role(0), Some(ColumnRole::Dimension));
        assert_eq!(layout.role(1), Some(ColumnRole::Attribute));
        assert_eq!(layout.role(2), Some(ColumnRole::Geo));
        assert_eq!(layout.role(3), Some(ColumnRole::Time));
        assert_eq!(layout.dimension_names(), vec!["freq"]);
        assert_eq!(layout.time_names(), vec!["2015", "2016"]);
        assert_eq!(layout.described_columns(), vec!["freq", "unit"]);
    }

    #[test]
    fn table_without_area_column_is_not_applicable() {
        let wide = table(&["unit", "2015"], &[&[Some("PC"), Some("1.0")]]);
        assert!(reshape(&wide, &known(&["EL30"]), false, &DimensionDictionaries::new()).is_none());
    }

    #[test]
    fn rows_for_unknown_areas_are_dropped() {
        let wide = table(
            &["geo\\TIME_PERIOD", "2015", "2016"],
            &[
                &[Some("EL30"), Some("1.0"), Some("2.0")],
                &[Some("XX99"), Some("3.0"), Some("4.0")],
            ],
        );
        let output = reshape(&wide, &known(&["EL30"]), false, &DimensionDictionaries::new())
            .expect("area column present");
        assert_eq!(output.rows.len(), 2);
        assert!(output.rows.iter().all(|row| row.geo == "EL30"));
        assert_eq!(output.report.dropped_unknown_area, 2);
        assert!(output.report.unknown_areas.contains("XX99"));
    }

    #[test]
    fn missing_dimensions_and_unit_use_sentinels() {
        let wide = table(&["geo", "2015"], &[&[Some("EL30"), Some("7.5")]]);
        let output = reshape(&wide, &known(&["EL30"]), false, &DimensionDictionaries::new())
            .expect("area column present");
        let row = &output.rows[0];
        assert_eq!(row.dim_codes, "NA");
        assert_eq!(row.dim_desc, "Not available");
        assert_eq!(row.att_codes, "NA");
        assert_eq!(row.att_desc, "Not Available");
        assert_eq!(row.time, "2015");
        assert!((row.value - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn signatures_follow_column_order_and_dictionaries() {
        let wide = table(
            &["freq", "nace_r2", "unit", "geo\\TIME_PERIOD", "2015"],
            &[
                &[Some("A"), Some("B-E"), Some("PC"), Some("EL30"), Some("1.0")],
                &[Some("A"), Some("B-E"), Some("PC"), Some("EL41"), Some("2.0")],
            ],
        );
        let mut dictionaries = DimensionDictionaries::new();
        dictionaries.insert("freq".to_string(), dictionary(&[("A", "Annual")]));
        dictionaries.insert("nace_r2".to_string(), dictionary(&[("B-E", "Industry")]));
        dictionaries.insert("unit".to_string(), dictionary(&[("PC", "Percentage")]));

        let output = reshape(&wide, &known(&["EL30", "EL41"]), false, &dictionaries)
            .expect("area column present");
        assert_eq!(output.rows.len(), 2);
        for row in &output.rows {
            assert_eq!(row.dim_codes, "A|B-E");
            assert_eq!(row.dim_desc, "Annual|Industry");
            assert_eq!(row.att_codes, "PC");
            assert_eq!(row.att_desc, "Percentage");
        }
        assert_eq!(output.rows[0].signature(), output.rows[1].signature());
        assert!(output.report.unresolved_descriptions.is_empty());
    }

    #[test]
    fn unresolved_codes_fall_back_and_are_reported() {
        let wide = table(
            &["unit", "geo", "2015"],
            &[&[Some("THS"), Some("EL30"), Some("1.0")]],
        );
        let output = reshape(&wide, &known(&["EL30"]), false, &DimensionDictionaries::new())
            .expect("area column present");
        assert_eq!(output.rows[0].att_desc, "THS");
        assert!(output.report.unresolved_descriptions.contains(&UnresolvedDescription {
            column: "unit".to_string(),
            code: "THS".to_string(),
        }));
    }

    #[test]
    fn subnational_filter_keeps_nuts_lengths() {
        let wide = table(
            &["geo", "2015"],
            &[
                &[Some("EL"), Some("1.0")],
                &[Some("EL3"), Some("2.0")],
                &[Some("EL30"), Some("3.0")],
                &[Some("EL303"), Some("4.0")],
                &[Some("EU27_2020"), Some("5.0")],
            ],
        );
        let areas = known(&["EL", "EL3", "EL30", "EL303", "EU27_2020"]);
        let output = reshape(&wide, &areas, true, &DimensionDictionaries::new())
            .expect("area column present");
        let geos: Vec<&str> = output.rows.iter().map(|row| row.geo.as_str()).collect();
        assert_eq!(geos, vec!["EL3", "EL30", "EL303"]);
        assert_eq!(output.report.subnational_filtered_rows, 2);
    }

    #[test]
    fn missing_and_invalid_cells_are_counted() {
        let wide = table(
            &["unit", "geo", "2015", "2016", "2017"],
            &[
                &[Some("PC"), Some("EL30"), None, Some("n/a"), Some("3.0")],
                &[None, Some("EL30"), Some("1.0"), Some("2.0"), Some("3.0")],
            ],
        );
        let mut dictionaries = DimensionDictionaries::new();
        dictionaries.insert("unit".to_string(), dictionary(&[("PC", "Percentage")]));
        let output = reshape(&wide, &known(&["EL30"]), false, &dictionaries)
            .expect("area column present");
        assert_eq!(output.rows.len(), 1);
        assert_eq!(output.rows[0].time, "2017");
        assert_eq!(output.report.unpivoted_rows, 6);
        assert_eq!(output.report.dropped_missing_value, 1);
        assert_eq!(output.report.dropped_invalid_value, 1);
        assert_eq!(output.report.dropped_missing_identifier, 3);
    }
}
