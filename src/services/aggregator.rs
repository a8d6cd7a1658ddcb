// src/services/aggregator.rs
// DOCUMENTATION: Preference-driven place search aggregation
// PURPOSE: One text-search call per (geography, district) pair, deduplicated

use crate::errors::PlacesError;
use crate::models::SearchHit;
use crate::services::GooglePlacesClient;
use std::collections::HashSet;

/// Results requested per pair call
pub const SEARCH_RESULTS_PER_PAIR: u32 = 8;

/// Text-search abstraction
/// DOCUMENTATION: The aggregator only needs "query in, hits out"; the
/// concrete Google client implements this, tests substitute stubs
#[allow(async_fn_in_trait)]
pub trait SearchProvider {
    async fn search_text(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<SearchHit>, PlacesError>;
}

impl SearchProvider for GooglePlacesClient {
    async fn search_text(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<SearchHit>, PlacesError> {
        let places = self.text_search(query, max_results).await?;

        // Hits missing an ID, name or position cannot be cached; drop them
        Ok(places
            .into_iter()
            .filter_map(|place| {
                let google_place_id = place.id?;
                let name = place.display_name?.text;
                let location = place.location?;
                Some(SearchHit {
                    google_place_id,
                    name,
                    latitude: location.latitude,
                    longitude: location.longitude,
                })
            })
            .collect())
    }
}

/// Search aggregation over user preferences
/// DOCUMENTATION: Sequential calls, one per pair; a failed pair is logged
/// and skipped, never fatal to the batch
pub struct PlaceAggregator;

impl PlaceAggregator {
    /// Natural-language query for one (geography, district) pair
    pub fn build_query(geography: &str, district: &str) -> String {
        format!(
            "tourist destinations in the {} regions of {}, Kerala",
            geography, district
        )
    }

    /// Run one search per (geography, district) pair and merge the results
    /// DOCUMENTATION: Output carries no duplicate external IDs and keeps
    /// first-seen order
    pub async fn search_by_preferences<P: SearchProvider>(
        provider: &P,
        districts: &[String],
        geographies: &[String],
    ) -> Vec<SearchHit> {
        let mut all_hits = Vec::new();

        for geography in geographies {
            for district in districts {
                let query = Self::build_query(geography, district);

                match provider.search_text(&query, SEARCH_RESULTS_PER_PAIR).await {
                    Ok(hits) => {
                        log::debug!("Pair query '{}' returned {} hits", query, hits.len());
                        all_hits.extend(hits);
                    }
                    Err(e) => {
                        log::warn!("Search failed for '{}', skipping pair: {}", query, e);
                    }
                }
            }
        }

        Self::dedupe(all_hits)
    }

    /// Deduplicate hits by external place ID, preserving first-seen order
    pub fn dedupe(hits: Vec<SearchHit>) -> Vec<SearchHit> {
        let mut seen = HashSet::new();
        hits.into_iter()
            .filter(|hit| seen.insert(hit.google_place_id.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn hit(id: &str, name: &str) -> SearchHit {
        SearchHit {
            google_place_id: id.to_string(),
            name: name.to_string(),
            latitude: 9.59,
            longitude: 76.42,
        }
    }

    /// Stub provider returning canned hits, erroring for marked queries
    struct StubProvider {
        hits_per_call: Vec<SearchHit>,
        fail_on: Option<&'static str>,
        queries: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn new(hits_per_call: Vec<SearchHit>) -> Self {
            Self {
                hits_per_call,
                fail_on: None,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    impl SearchProvider for StubProvider {
        async fn search_text(
            &self,
            query: &str,
            _max_results: u32,
        ) -> Result<Vec<SearchHit>, PlacesError> {
            self.queries.lock().unwrap().push(query.to_string());

            if let Some(marker) = self.fail_on {
                if query.contains(marker) {
                    return Err(PlacesError::UpstreamUnavailable("stub failure".to_string()));
                }
            }

            Ok(self.hits_per_call.clone())
        }
    }

    #[test]
    fn test_build_query_format() {
        assert_eq!(
            PlaceAggregator::build_query("Lakes & Backwaters", "Kottayam"),
            "tourist destinations in the Lakes & Backwaters regions of Kottayam, Kerala"
        );
    }

    #[test]
    fn test_dedupe_preserves_first_seen_order() {
        let hits = vec![
            hit("a", "Alpha"),
            hit("b", "Beta"),
            hit("a", "Alpha again"),
            hit("c", "Gamma"),
            hit("b", "Beta again"),
        ];

        let unique = PlaceAggregator::dedupe(hits);

        let ids: Vec<&str> = unique.iter().map(|h| h.google_place_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(unique[0].name, "Alpha");
    }

    #[tokio::test]
    async fn test_shared_id_across_pairs_yields_one_hit() {
        // Two results sharing one external ID collapse to a single place
        let provider = StubProvider::new(vec![
            hit("ChIJ_vembanad", "Vembanad Lake"),
            hit("ChIJ_vembanad", "Vembanad Lake Viewpoint"),
        ]);

        let result = PlaceAggregator::search_by_preferences(
            &provider,
            &["Kottayam".to_string()],
            &["Lakes & Backwaters".to_string()],
        )
        .await;

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].google_place_id, "ChIJ_vembanad");
        assert_eq!(result[0].name, "Vembanad Lake");
    }

    #[tokio::test]
    async fn test_one_call_per_pair() {
        let provider = StubProvider::new(vec![]);

        PlaceAggregator::search_by_preferences(
            &provider,
            &["Kottayam".to_string(), "Idukki".to_string()],
            &["Hills & Mountains".to_string()],
        )
        .await;

        let queries = provider.queries.lock().unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(
            queries[0],
            "tourist destinations in the Hills & Mountains regions of Kottayam, Kerala"
        );
        assert_eq!(
            queries[1],
            "tourist destinations in the Hills & Mountains regions of Idukki, Kerala"
        );
    }

    #[tokio::test]
    async fn test_failed_pair_is_skipped_not_fatal() {
        let mut provider = StubProvider::new(vec![hit("a", "Alpha")]);
        provider.fail_on = Some("Idukki");

        let result = PlaceAggregator::search_by_preferences(
            &provider,
            &["Kottayam".to_string(), "Idukki".to_string()],
            &["Forests & Wildlife".to_string()],
        )
        .await;

        // The Idukki pair failed, the Kottayam pair still produced its hit
        assert_eq!(result.len(), 1);
        assert_eq!(provider.queries.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_no_duplicate_ids_in_output() {
        let provider = StubProvider::new(vec![hit("x", "X"), hit("y", "Y"), hit("x", "X")]);

        let result = PlaceAggregator::search_by_preferences(
            &provider,
            &["Alappuzha".to_string(), "Kollam".to_string()],
            &["Beach & Coastal".to_string(), "Lakes & Backwaters".to_string()],
        )
        .await;

        let mut ids: Vec<&str> = result.iter().map(|h| h.google_place_id.as_str()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
