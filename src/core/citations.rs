//! Citation lookup and the source search filter.

use super::catalog::{Catalog, Source, StatCard};

/// A resolvable citation on a stat card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationMarker<'a> {
    pub source_id: &'a str,
    /// 1-based, fixed by the catalog's canonical order.
    pub number: usize,
}

/// Markers for `card`, in the card's own order.  Ids that do not resolve
/// to a source are dropped.
pub fn citation_markers<'a>(card: &'a StatCard, catalog: &Catalog) -> Vec<CitationMarker<'a>> {
    card.source_ids
        .iter()
        .filter_map(|id| {
            catalog.source(id)?;
            let number = catalog.citation_number(id)?;
            Some(CitationMarker {
                source_id: id.as_str(),
                number,
            })
        })
        .collect()
}

/// Case-insensitive substring filter over org, title, quote and year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceQuery {
    needle: String,
}

impl SourceQuery {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, source: &Source) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        [&source.org, &source.title, &source.quote, &source.year]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }

    /// Matching sources in citation order, paired with their numbers.
    pub fn filter<'a>(&self, catalog: &'a Catalog) -> Vec<(usize, &'a Source)> {
        catalog
            .ordered_sources()
            .enumerate()
            .filter(|(_, source)| self.matches(source))
            .map(|(pos, source)| (pos + 1, source))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ocean_query_finds_jambeck() {
        let catalog = Catalog::builtin().unwrap();
        let hits = SourceQuery::new("ocean").filter(&catalog);
        assert!(hits.iter().any(|(_, s)| s.id == "S_JAMBECK_2015_OCEAN"));
        for (_, s) in &hits {
            let haystack = format!("{} {} {} {}", s.org, s.title, s.quote, s.year).to_lowercase();
            assert!(haystack.contains("ocean"), "{} should not match", s.id);
        }
        assert!(hits.len() < catalog.source_count());
    }

    #[test]
    fn query_is_case_insensitive() {
        let catalog = Catalog::builtin().unwrap();
        let lower = SourceQuery::new("unep").filter(&catalog);
        let upper = SourceQuery::new("UNEP").filter(&catalog);
        assert_eq!(lower.len(), upper.len());
        assert!(!lower.is_empty());
    }

    #[test]
    fn year_matches() {
        let catalog = Catalog::builtin().unwrap();
        let hits = SourceQuery::new("2017").filter(&catalog);
        assert!(hits.iter().all(|(_, s)| s.year == "2017"));
        assert_eq!(hits.len(), 4);
    }

    #[test]
    fn empty_query_lists_everything_in_citation_order() {
        let catalog = Catalog::builtin().unwrap();
        let all = SourceQuery::new("   ").filter(&catalog);
        assert_eq!(all.len(), 14);
        let numbers: Vec<usize> = all.iter().map(|(n, _)| *n).collect();
        assert_eq!(numbers, (1..=14).collect::<Vec<_>>());
    }

    #[test]
    fn unknown_ids_are_omitted_from_markers() {
        let catalog = Catalog::builtin().unwrap();
        let card = StatCard {
            id: "c".into(),
            text: "t".into(),
            source_ids: vec!["S_MISSING".into(), "S_WRAP_2024_LIFETIME".into()],
        };
        let markers = citation_markers(&card, &catalog);
        assert_eq!(
            markers,
            vec![CitationMarker {
                source_id: "S_WRAP_2024_LIFETIME",
                number: 14
            }]
        );
    }
}
