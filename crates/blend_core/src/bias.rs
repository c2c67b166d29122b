//! Preference-hint heuristic.
//!
//! Turns free text such as "more leather, less citrus" into per-component
//! percentage-point deltas. This is best-effort keyword matching; the blend
//! engine only depends on the [`BiasInference`] trait, so the heuristic can be
//! replaced without touching the allocation math.

use std::collections::HashMap;

use crate::{ComponentId, ScentComponent};

/// Cue words that raise a component when they precede its name.
const INTENSIFY_PREFIX: &[&str] = &[
    "more", "extra", "heavier", "heavy", "stronger", "strong", "boost", "bolder", "richer",
    "amplify",
];
/// Cue words that lower a component when they precede its name.
const REDUCE_PREFIX: &[&str] = &[
    "less", "light", "lighter", "subtle", "softer", "soft", "fewer", "reduce", "reduced", "lower",
    "minimal", "hint", "tone",
];
const INTENSIFY_SUFFIX: &[&str] = &["forward", "heavy", "heavier", "dominant", "up"];
const REDUCE_SUFFIX: &[&str] = &["light", "lighter", "subtle", "down"];
/// Words that start a new clause inside a comma-free run of text.
const CLAUSE_BREAKS: &[&str] = &["and", "but", "with", "while", "plus"];

/// How many words before a name are searched for a cue.
const PREFIX_WINDOW: usize = 3;

pub trait BiasInference {
    /// Signed percentage-point adjustment per component id. Components the
    /// hint does not move are absent from the map.
    fn infer(&self, hint: &str, components: &[ScentComponent]) -> HashMap<ComponentId, i32>;
}

/// Default heuristic: cue words near a component name, one fixed step per component.
#[derive(Debug, Clone, Copy)]
pub struct KeywordBias {
    step_percent: u32,
}

impl KeywordBias {
    pub fn new(step_percent: u32) -> Self {
        Self { step_percent }
    }
}

impl Default for KeywordBias {
    fn default() -> Self {
        Self::new(crate::CatalogConstants::default().bias_step_percent)
    }
}

impl BiasInference for KeywordBias {
    fn infer(&self, hint: &str, components: &[ScentComponent]) -> HashMap<ComponentId, i32> {
        let step = i32::try_from(self.step_percent).unwrap_or(i32::MAX);
        let patterns = name_patterns(components);
        let mut net: HashMap<&ComponentId, i32> = HashMap::new();

        for clause in clauses(hint) {
            let mut matched = scan_clause(&clause, &patterns.full);
            if matched.is_empty() {
                matched = scan_clause(&clause, &patterns.short);
            }
            for (id, direction) in matched {
                *net.entry(id).or_insert(0) += direction;
            }
        }

        net.into_iter()
            .filter(|(_, direction)| *direction != 0)
            .map(|(id, direction)| (id.clone(), direction.signum() * step))
            .collect()
    }
}

/// Infers deltas with the default step.
pub fn infer_bias_from_hint(
    hint: &str,
    components: &[ScentComponent],
) -> HashMap<ComponentId, i32> {
    KeywordBias::default().infer(hint, components)
}

struct NamePatterns<'a> {
    /// Every word of each component name.
    full: Vec<(&'a ComponentId, Vec<String>)>,
    /// Last word of multi-word names, only where no other component shares it.
    short: Vec<(&'a ComponentId, Vec<String>)>,
}

fn name_patterns(components: &[ScentComponent]) -> NamePatterns<'_> {
    let full: Vec<(&ComponentId, Vec<String>)> = components
        .iter()
        .map(|c| (&c.id, words(&c.name)))
        .filter(|(_, tokens)| !tokens.is_empty())
        .collect();

    let mut last_word_counts: HashMap<String, usize> = HashMap::new();
    for (_, tokens) in &full {
        if let Some(last) = tokens.last() {
            *last_word_counts.entry(last.clone()).or_insert(0) += 1;
        }
    }
    let short = full
        .iter()
        .filter(|(_, tokens)| tokens.len() > 1)
        .filter_map(|(id, tokens)| {
            let last = tokens.last()?;
            (last_word_counts.get(last.as_str()) == Some(&1)).then(|| (*id, vec![last.clone()]))
        })
        .collect();

    NamePatterns { full, short }
}

/// Direction of every name occurrence in one clause.
fn scan_clause<'a>(
    clause: &[String],
    patterns: &[(&'a ComponentId, Vec<String>)],
) -> Vec<(&'a ComponentId, i32)> {
    let mut spans = Vec::new();
    for (id, tokens) in patterns {
        let len = tokens.len();
        if len > clause.len() {
            continue;
        }
        for start in 0..=clause.len() - len {
            let window = &clause[start..start + len];
            if window.iter().zip(tokens).all(|(w, t)| same_word(w, t)) {
                spans.push((*id, start, start + len));
            }
        }
    }
    spans.sort_by_key(|&(_, start, _)| start);

    // A prefix search never reaches back past an earlier name or the
    // suffix cue that belongs to it.
    let mut boundary = 0;
    let mut found = Vec::new();
    for (id, start, end) in spans {
        if let Some(direction) = cue_direction(clause, boundary.min(start), start, end) {
            found.push((id, direction));
        }
        let claimed = if suffix_direction(clause.get(end)).is_some() {
            end + 1
        } else {
            end
        };
        boundary = boundary.max(claimed);
    }
    found
}

/// Nearest cue before the name (not before `floor`) wins; otherwise the
/// word right after it.
fn cue_direction(clause: &[String], floor: usize, start: usize, end: usize) -> Option<i32> {
    let window_start = start.saturating_sub(PREFIX_WINDOW).max(floor);
    for word in clause[window_start..start].iter().rev() {
        if INTENSIFY_PREFIX.contains(&word.as_str()) {
            return Some(1);
        }
        if REDUCE_PREFIX.contains(&word.as_str()) {
            return Some(-1);
        }
    }
    suffix_direction(clause.get(end))
}

fn suffix_direction(word: Option<&String>) -> Option<i32> {
    let word = word?.as_str();
    if INTENSIFY_SUFFIX.contains(&word) {
        Some(1)
    } else if REDUCE_SUFFIX.contains(&word) {
        Some(-1)
    } else {
        None
    }
}

/// Case-folded equality that tolerates a plural `s`/`es` on either side.
fn same_word(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let (long, short) = if a.len() > b.len() { (a, b) } else { (b, a) };
    long.strip_prefix(short)
        .is_some_and(|suffix| suffix == "s" || suffix == "es")
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn clauses(hint: &str) -> Vec<Vec<String>> {
    let mut out = Vec::new();
    for chunk in hint.split([',', ';', '.', '!', '?', '\n']) {
        let mut current = Vec::new();
        for word in words(chunk) {
            if CLAUSE_BREAKS.contains(&word.as_str()) {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            } else {
                current.push(word);
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blend(names: &[&str]) -> Vec<ScentComponent> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| ScentComponent::new(format!("f{i}"), *name))
            .collect()
    }

    fn delta(map: &HashMap<ComponentId, i32>, id: &str) -> Option<i32> {
        map.get(&ComponentId::from(id)).copied()
    }

    #[test]
    fn more_and_less_cues() {
        let components = blend(&["Leather", "Citrus"]);
        let deltas = infer_bias_from_hint("more leather, less citrus", &components);
        assert_eq!(delta(&deltas, "f0"), Some(5));
        assert_eq!(delta(&deltas, "f1"), Some(-5));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let components = blend(&["Vanilla"]);
        let deltas = infer_bias_from_hint("MORE VANILLA please", &components);
        assert_eq!(delta(&deltas, "f0"), Some(5));
    }

    #[test]
    fn postfix_forward_cue() {
        let components = blend(&["Leather", "Tobacco"]);
        let deltas = infer_bias_from_hint("leather forward", &components);
        assert_eq!(delta(&deltas, "f0"), Some(5));
        assert_eq!(delta(&deltas, "f1"), None);
    }

    #[test]
    fn suffix_cue_stays_with_its_own_name() {
        let components = blend(&["Leather", "Citrus"]);
        let deltas = infer_bias_from_hint("leather heavy citrus light", &components);
        assert_eq!(delta(&deltas, "f0"), Some(5));
        assert_eq!(delta(&deltas, "f1"), Some(-5));
    }

    #[test]
    fn prefix_search_stops_at_earlier_name() {
        let components = blend(&["Leather", "Citrus"]);
        let deltas = infer_bias_from_hint("more leather citrus", &components);
        assert_eq!(delta(&deltas, "f0"), Some(5));
        assert_eq!(delta(&deltas, "f1"), None);
    }

    #[test]
    fn conjunction_splits_clauses() {
        let components = blend(&["Leather", "Citrus"]);
        let deltas = infer_bias_from_hint("more leather but subtle citrus", &components);
        assert_eq!(delta(&deltas, "f0"), Some(5));
        assert_eq!(delta(&deltas, "f1"), Some(-5));
    }

    #[test]
    fn nearest_cue_wins_without_punctuation() {
        let components = blend(&["Leather", "Citrus"]);
        let deltas = infer_bias_from_hint("more leather less citrus", &components);
        assert_eq!(delta(&deltas, "f0"), Some(5));
        assert_eq!(delta(&deltas, "f1"), Some(-5));
    }

    #[test]
    fn plural_names_match() {
        let components = blend(&["Rose", "Berry"]);
        let deltas = infer_bias_from_hint("less roses, more berries", &components);
        assert_eq!(delta(&deltas, "f0"), Some(-5));
        // "berries" is not a plain s/es plural of "berry"
        assert_eq!(delta(&deltas, "f1"), None);
    }

    #[test]
    fn multi_word_name_full_match() {
        let components = blend(&["Black Pepper", "Sea Salt"]);
        let deltas = infer_bias_from_hint("a touch more sea salt", &components);
        assert_eq!(delta(&deltas, "f1"), Some(5));
        assert_eq!(delta(&deltas, "f0"), None);
    }

    #[test]
    fn unique_last_word_matches_partially() {
        let components = blend(&["Black Pepper", "Sea Salt"]);
        let deltas = infer_bias_from_hint("less pepper", &components);
        assert_eq!(delta(&deltas, "f0"), Some(-5));
    }

    #[test]
    fn shared_last_word_is_ambiguous() {
        let components = blend(&["Vanilla Bean", "Tonka Bean"]);
        let deltas = infer_bias_from_hint("more bean", &components);
        assert!(deltas.is_empty());
    }

    #[test]
    fn name_without_cue_is_ignored() {
        let components = blend(&["Leather", "Citrus"]);
        let deltas = infer_bias_from_hint("I like leather", &components);
        assert!(deltas.is_empty());
    }

    #[test]
    fn opposing_mentions_cancel() {
        let components = blend(&["Leather", "Citrus"]);
        let deltas = infer_bias_from_hint("more leather, less leather", &components);
        assert!(deltas.is_empty());
    }

    #[test]
    fn repeated_mentions_stay_one_step() {
        let components = blend(&["Leather", "Citrus"]);
        let deltas = infer_bias_from_hint("more leather, extra leather", &components);
        assert_eq!(delta(&deltas, "f0"), Some(5));
    }

    #[test]
    fn custom_step_size() {
        let components = blend(&["Leather", "Citrus"]);
        let deltas = KeywordBias::new(8).infer("less citrus", &components);
        assert_eq!(delta(&deltas, "f1"), Some(-8));
    }

    #[test]
    fn unknown_names_produce_nothing() {
        let components = blend(&["Leather", "Citrus"]);
        assert!(infer_bias_from_hint("more oud, less musk", &components).is_empty());
        assert!(infer_bias_from_hint("", &components).is_empty());
        assert!(infer_bias_from_hint("sweeter", &components).is_empty());
    }
}
