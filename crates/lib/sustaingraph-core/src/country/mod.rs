//! Country name → ISO 3166-1 alpha-3 resolution.

mod registry;

use serde::Serialize;

pub use registry::CountryRecord;
use registry::{COUNTRIES, OVERRIDES};

/// Resolves one country name.
///
/// Registry names are tried first, then official names, then common names.
/// The override table is consulted before the registry and wins over it,
/// including entries that force a name to stay unresolved.
#[must_use]
pub fn resolve_code(name: &str) -> Option<&'static str> {
    if let Some((_, code)) = OVERRIDES.iter().find(|(known, _)| *known == name) {
        return *code;
    }
    COUNTRIES
        .iter()
        .find(|record| record.name == name)
        .or_else(|| {
            COUNTRIES
                .iter()
                .find(|record| record.official_name == Some(name))
        })
        .or_else(|| {
            COUNTRIES
                .iter()
                .find(|record| record.common_name == Some(name))
        })
        .map(|record| record.alpha3)
}

/// Resolves every name, preserving order. Unknown names yield `None`.
pub fn resolve_codes<I, S>(names: I) -> Vec<Option<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| resolve_code(name.as_ref()).map(str::to_string))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountryResolution {
    pub codes: Vec<Option<String>>,
    pub unresolved: Vec<String>,
}

/// Resolves names and collects the distinct unresolved ones for reporting.
pub fn resolve_countries<I, S>(names: I) -> CountryResolution
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut resolution = CountryResolution::default();
    for name in names {
        let name = name.as_ref();
        let code = resolve_code(name);
        if code.is_none() && !resolution.unresolved.iter().any(|known| known == name) {
            resolution.unresolved.push(name.to_string());
        }
        resolution.codes.push(code.map(str::to_string));
    }
    resolution
}

/// Looks up a registry entry by alpha-3 code.
#[must_use]
pub fn lookup_alpha3(alpha3: &str) -> Option<&'static CountryRecord> {
    COUNTRIES
        .iter()
        .find(|record| record.alpha3.eq_ignore_ascii_case(alpha3))
}
