use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use yatr_types::LangPair;

/// Queryable index over the supported source -> destination pairs.
///
/// Built once per language list and never mutated afterwards. Listings are
/// ordered by display name (case-insensitive), ties broken by code.
#[derive(Debug, Clone, Default)]
pub struct LanguageGraph {
    names: HashMap<String, String>,
    sources: Vec<String>,
    destinations: HashMap<String, Vec<String>>,
    pair_count: usize,
}

impl LanguageGraph {
    pub fn build(pairs: &[LangPair]) -> Self {
        let mut names: HashMap<String, String> = HashMap::new();
        let mut edges: HashMap<String, HashSet<String>> = HashMap::new();

        for pair in pairs {
            if !pair.is_valid() {
                tracing::warn!("Skipping language pair with empty code: {:?}", pair);
                continue;
            }

            // Later entries overwrite earlier names for the same code
            names.insert(pair.from_code().to_string(), pair.from_name().to_string());
            names.insert(pair.to_code().to_string(), pair.to_name().to_string());

            edges
                .entry(pair.from_code().to_string())
                .or_default()
                .insert(pair.to_code().to_string());
        }

        let pair_count = edges.values().map(HashSet::len).sum();

        let mut sources: Vec<String> = edges.keys().cloned().collect();
        sort_by_name(&mut sources, &names);

        let destinations = edges
            .into_iter()
            .map(|(from, to)| {
                let mut to: Vec<String> = to.into_iter().collect();
                sort_by_name(&mut to, &names);
                (from, to)
            })
            .collect();

        Self {
            names,
            sources,
            destinations,
            pair_count,
        }
    }

    /// Every code that can be translated from
    pub fn source_languages(&self) -> &[String] {
        &self.sources
    }

    /// Valid destinations for a source, empty for unknown codes
    pub fn destinations_for(&self, source_code: &str) -> &[String] {
        self.destinations
            .get(source_code)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    pub fn contains_pair(&self, from_code: &str, to_code: &str) -> bool {
        self.destinations_for(from_code)
            .iter()
            .any(|code| code == to_code)
    }

    /// Full pair with display names, if the direction is supported
    pub fn pair(&self, from_code: &str, to_code: &str) -> Option<LangPair> {
        if !self.contains_pair(from_code, to_code) {
            return None;
        }

        Some(LangPair::new(
            from_code,
            to_code,
            self.display_name(from_code).unwrap_or_default(),
            self.display_name(to_code).unwrap_or_default(),
        ))
    }

    /// Number of distinct directions
    pub fn len(&self) -> usize {
        self.pair_count
    }

    pub fn is_empty(&self) -> bool {
        self.pair_count == 0
    }
}

fn sort_by_name(codes: &mut [String], names: &HashMap<String, String>) {
    codes.sort_by(|a, b| compare_codes(a, b, names));
}

fn compare_codes(a: &str, b: &str, names: &HashMap<String, String>) -> Ordering {
    let name_a = names.get(a).map(String::as_str).unwrap_or(a).to_lowercase();
    let name_b = names.get(b).map(String::as_str).unwrap_or(b).to_lowercase();

    name_a.cmp(&name_b).then_with(|| a.cmp(b))
}
