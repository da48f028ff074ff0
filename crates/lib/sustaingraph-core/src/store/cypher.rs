//! Cypher statements issued by the loaders and query tools.

use sustaingraph_store::GeoCodeKind;

/// Upserts one `SeriesMetadata` signature under an existing `Series`.
pub const SERIES_METADATA_UPSERT: &str = "\
MATCH (s:Series {code: $s_code})
MERGE (sm:SeriesMetadata {attributesCode: $att_code, dimensionsCode: $d_code, attributesDescription: $att_desc, dimensionsDescription: $dim_desc, seriesCode: $s_code})
MERGE (s)-[:HAS_METADATA]->(sm)";

/// Upserts the happiness indicator, one of its series, and the series' fixed metadata.
pub const HAPPINESS_SERIES_UPSERT: &str = "\
MATCH (so:Source {name: $source})
MERGE (i:Indicator {code: $ind_code, description: $ind_desc})
MERGE (i)-[:COMES_FROM]->(so)
MERGE (s:Series {code: $s_code, dataProviderURL: $url, description: 'Happiness  Score: ' + $s_desc})
MERGE (i)-[:HAS_SERIES]->(s)
MERGE (sm:SeriesMetadata {attributesCode: $att_code, dimensionsCode: $d_code, attributesDescription: $att_desc, dimensionsDescription: $dim_desc, seriesCode: $s_code})
MERGE (s)-[:HAS_METADATA]->(sm)";

/// Area codes of every `GeoArea` carrying a Eurostat code.
pub const KNOWN_EU_AREAS: &str = "\
MATCH (ga:GeoArea) WHERE ga.EUcode IS NOT NULL
RETURN collect(DISTINCT ga.EUcode) AS codes";

/// Area codes of every `GeoArea` carrying an ISO alpha-3 code.
pub const KNOWN_ISO_AREAS: &str = "\
MATCH (ga:GeoArea) WHERE ga.ISOalpha3code IS NOT NULL
RETURN collect(DISTINCT ga.ISOalpha3code) AS codes";

/// ISO alpha-3 codes of European areas and EU members.
pub const KNOWN_EUROPEAN_COUNTRIES: &str = "\
MATCH (r:Region {name: 'Europe'})-[:HAS_SUBREGION]->(sr:SubRegion)-[:HAS_AREA]->(a:Area)
MATCH (eu:EuropeanUnion)<-[:BELONGS_TO]-(eua:Area)
WITH collect(DISTINCT a.ISOalpha3code) + collect(DISTINCT eua.ISOalpha3code) AS geocodes
UNWIND geocodes AS code
RETURN collect(DISTINCT code) AS codes";

/// Builds the batched observation upsert, matching areas by `kind`.
#[must_use]
pub fn observation_upsert(kind: GeoCodeKind) -> String {
    format!(
        "\
UNWIND $parameters AS row
MATCH (ga:GeoArea), (sm:SeriesMetadata {{attributesCode: row.att, dimensionsCode: row.dim, seriesCode: row.code}}), (i:Indicator {{code: row.ind_code}})
WHERE row.geo = ga.{property}
MERGE (sm)-[:HAS_OBSERVATION {{attributesCode: row.att, dimensionsCode: row.dim, seriesCode: row.code, time: date(row.year), geoCode: row.geo}}]->(o:Observation {{time: date(row.year)}})
MERGE (o)-[:REFERS_TO_AREA]->(ga)
SET o.value = toFloat(row.value)
MERGE (i)-[:HAS_OBSERVATIONS]->(ga)",
        property = kind.property()
    )
}

pub const REGIONAL_PROFILE: &str = "\
MATCH (ga:GeoArea) WHERE ga.EUcode = $geo_id OR ga.ISOalpha3code = $geo_id
MATCH (ga)<-[:REFERS_TO_AREA]-(o:Observation)<-[:HAS_OBSERVATION]-(sm:SeriesMetadata)
MATCH (sm)<-[:HAS_METADATA]-(s:Series)<-[:HAS_SERIES]-(i:Indicator)
WHERE sm.seriesCode STARTS WITH $sdg_prefix
RETURN ga.name AS region, i.code AS indicator_code, i.description AS indicator_desc, o.value AS value, toString(o.time) AS time
ORDER BY o.time DESC
LIMIT 30";

pub const PEER_REGIONS: &str = "\
MATCH (target:GeoArea) WHERE target.EUcode = $geo_id OR target.ISOalpha3code = $geo_id
MATCH (target)<-[:REFERS_TO_AREA]-(:Observation)<-[:HAS_OBSERVATION]-(sm:SeriesMetadata)
WHERE sm.seriesCode STARTS WITH $sdg_prefix
WITH collect(DISTINCT sm.seriesCode) AS target_series, $geo_id AS target_geo_id
MATCH (peer:GeoArea)
WHERE NOT coalesce(peer.EUcode, '') = target_geo_id AND NOT coalesce(peer.ISOalpha3code, '') = target_geo_id
MATCH (peer)<-[:REFERS_TO_AREA]-(:Observation)<-[:HAS_OBSERVATION]-(psm:SeriesMetadata)
WHERE psm.seriesCode IN target_series
WITH peer, count(DISTINCT psm.seriesCode) AS shared, size(target_series) AS total
WHERE shared >= 2
RETURN peer.name AS peer_name, peer.EUcode AS peer_geo_id, shared AS shared_indicators, total AS total_indicators
ORDER BY shared DESC
LIMIT 5";

pub const INDICATOR_TREND: &str = "\
MATCH (ga:GeoArea) WHERE ga.EUcode = $geo_id OR ga.ISOalpha3code = $geo_id
MATCH (ga)<-[:REFERS_TO_AREA]-(o:Observation)<-[:HAS_OBSERVATION]-(sm:SeriesMetadata {seriesCode: $indicator_id})
RETURN toString(o.time) AS time, o.value AS value
ORDER BY o.time ASC";

/// Scans every policy framework. `$sdg_id` and `$geo_id` are bound but not yet used.
pub const POLICY_MAPPING: &str = "\
MATCH (pf:PolicyFramework)
OPTIONAL MATCH (pf)-[:HAS_SUBPART]->(pa)
RETURN pf.name AS framework_name, pf.description AS description, collect(DISTINCT pa.name)[0..3] AS policy_areas
LIMIT 10";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_upsert_matches_configured_property() {
        let eu = observation_upsert(GeoCodeKind::EuCode);
        assert!(eu.contains("WHERE row.geo = ga.EUcode"));
        assert!(eu.contains("(i:Indicator {code: row.ind_code})"));
        let iso = observation_upsert(GeoCodeKind::IsoAlpha3);
        assert!(iso.contains("WHERE row.geo = ga.ISOalpha3code"));
    }

    #[test]
    fn peer_exclusion_tolerates_missing_area_codes() {
        // NUTS regions have no ISO code; a bare `<>` against null drops them.
        assert!(PEER_REGIONS.contains("NOT coalesce(peer.EUcode, '') = target_geo_id"));
        assert!(PEER_REGIONS.contains("NOT coalesce(peer.ISOalpha3code, '') = target_geo_id"));
        assert!(!PEER_REGIONS.contains("<>"));
    }
}
