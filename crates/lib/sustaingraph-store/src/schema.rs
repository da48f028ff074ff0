pub const LABEL_INDICATOR: &str = "Indicator";
pub const LABEL_SERIES_METADATA: &str = "SeriesMetadata";
pub const LABEL_OBSERVATION: &str = "Observation";
pub const LABEL_GEO_AREA: &str = "GeoArea";
pub const LABEL_POLICY_FRAMEWORK: &str = "PolicyFramework";
pub const LABEL_SDG: &str = "SDG";

pub const GEO_COLUMN: &str = "geo";
pub const UNIT_COLUMN: &str = "unit";

/// Marker separating a column name from a trailing qualifier (`geo\time_period`).
pub const COLUMN_QUALIFIER_MARKER: char = '\\';
pub const SIGNATURE_SEPARATOR: &str = "|";

pub const NO_DIMENSIONS_CODE: &str = "NA";
pub const NO_DIMENSIONS_DESCRIPTION: &str = "Not available";
pub const NO_ATTRIBUTES_CODE: &str = "NA";
pub const NO_ATTRIBUTES_DESCRIPTION: &str = "Not Available";

/// Area code lengths that denote a sub-national (NUTS 1-3) level.
pub const SUBNATIONAL_CODE_LENGTHS: [usize; 3] = [3, 4, 5];

pub const HAPPINESS_INDICATOR_CODE: &str = "happiness_score";
pub const HAPPINESS_SOURCE_NAME: &str = "TPS";
pub const HAPPINESS_PROVIDER_URL: &str = "https://worldhappiness.report/archive/";
pub const HAPPINESS_ATTRIBUTES_CODE: &str = "CLS";
pub const HAPPINESS_ATTRIBUTES_DESCRIPTION: &str = "Cantril Ladder Score";
pub const HAPPINESS_DIMENSIONS_CODE: &str = "A";
pub const HAPPINESS_DIMENSIONS_DESCRIPTION: &str = "Annual";
pub const HAPPINESS_SCORE_COLUMN: &str = "Happiness score";
pub const HAPPINESS_INDICATOR_DESCRIPTION: &str = "The World Happiness Report is a publication of the United Nations Sustainable Development Solutions Network. It contains articles and rankings of national happiness, based on respondent ratings of their own lives, which the report also correlates with various (quality of) life factors.";

pub const SDG_PREFIX: &str = "sdg_";
