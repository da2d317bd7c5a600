//! The session's name ↔ pseudonym map.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

use tracing::{debug, info, warn};

use crate::config::NamingConfig;
use crate::error::CoreError;
use crate::models::pair::PseudonymPair;
use crate::models::value::Value;
use crate::normalize::{collapse_whitespace, given_name, normalize};
use crate::scheme::NamingScheme;
use crate::shuffle::shuffle_seeded;
use crate::substitute::{SubstituteOptions, Substituter};

type CachedSubstituter = OnceLock<Result<Substituter, regex::Error>>;

/// A bijection between the distinct normalized names of one batch and
/// their pseudonyms.
///
/// Only [`PseudonymMap::build`] creates one; there are no mutating methods.
/// Compiled substitution patterns are cached on first use.
#[derive(Debug, Clone, Default)]
pub struct PseudonymMap {
    pairs: Vec<PseudonymPair>,
    real_to_pseudo: BTreeMap<String, String>,
    pseudo_to_real: BTreeMap<String, String>,
    anonymiser: CachedSubstituter,
    alias_anonymiser: CachedSubstituter,
    reidentifier: CachedSubstituter,
}

impl PseudonymMap {
    /// Normalize, deduplicate (first seen wins), optionally shuffle by seed,
    /// then label each name in order.
    ///
    /// Blank names are dropped; an empty list gives an empty map.
    pub fn build<I, S>(names: I, config: &NamingConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut clean = Vec::new();
        for raw in names {
            let name = normalize(raw.as_ref());
            if name.is_empty() || !seen.insert(name.clone()) {
                continue;
            }
            clean.push(name);
        }

        if let Some(seed) = config.seed {
            shuffle_seeded(&mut clean, seed);
        }

        let mut map = Self::default();
        for (index, real) in clean.into_iter().enumerate() {
            let pseudo = map.next_label(&config.scheme, config.start_at, index);
            map.real_to_pseudo.insert(real.clone(), pseudo.clone());
            map.pseudo_to_real.insert(pseudo.clone(), real.clone());
            map.pairs.push(PseudonymPair { real, pseudo });
        }

        info!(
            entries = map.pairs.len(),
            scheme = %config.scheme,
            seeded = config.seed.is_some(),
            "built pseudonym map"
        );
        map
    }

    /// Generate the label for `index`, keeping labels unique. Labels are
    /// stored whitespace-collapsed, the form substitution looks them up in,
    /// so "P 1" and "P  1" count as the same label. Only custom schemes can
    /// need the fallbacks.
    fn next_label(&self, scheme: &NamingScheme, start_at: u32, index: usize) -> String {
        let mut label = collapse_whitespace(&scheme.generate(start_at, index));
        if label.is_empty() {
            warn!(index, "naming scheme produced a blank label, using the default scheme");
            label = collapse_whitespace(&NamingScheme::default().generate(start_at, index));
        }
        if !self.pseudo_to_real.contains_key(&label) {
            return label;
        }

        warn!(index, "naming scheme repeated a label, adding a suffix");
        let mut suffix = 2u64;
        loop {
            let candidate = format!("{label}-{suffix}");
            if !self.pseudo_to_real.contains_key(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in assignment order.
    pub fn pairs(&self) -> &[PseudonymPair] {
        &self.pairs
    }

    pub fn real_to_pseudo(&self) -> &BTreeMap<String, String> {
        &self.real_to_pseudo
    }

    pub fn pseudo_to_real(&self) -> &BTreeMap<String, String> {
        &self.pseudo_to_real
    }

    /// Pseudonym for a raw name; the query is normalized first.
    pub fn pseudonym_for(&self, name: &str) -> Option<&str> {
        self.real_to_pseudo.get(&normalize(name)).map(String::as_str)
    }

    pub fn real_name_for(&self, pseudo: &str) -> Option<&str> {
        self.pseudo_to_real.get(pseudo.trim()).map(String::as_str)
    }

    /// `Pupil-003 ⟷ Alice Smith` lines, in assignment order.
    pub fn display_lines(&self) -> Vec<String> {
        self.pairs.iter().map(ToString::to_string).collect()
    }

    /// Given name → pseudonym for each given name owned by exactly one
    /// pupil. Single-word names are already map keys and are left out.
    pub fn given_name_aliases(&self) -> BTreeMap<String, String> {
        let mut owners: HashMap<&str, Vec<&PseudonymPair>> = HashMap::new();
        for pair in &self.pairs {
            if let Some(given) = given_name(&pair.real) {
                owners.entry(given).or_default().push(pair);
            }
        }

        let mut ambiguous = 0usize;
        let mut aliases = BTreeMap::new();
        for (given, pairs) in owners {
            match pairs.as_slice() {
                [pair] if pair.real != given => {
                    aliases.insert(given.to_string(), pair.pseudo.clone());
                }
                [_] => {}
                _ => ambiguous += 1,
            }
        }

        if ambiguous > 0 {
            debug!(ambiguous, "given names shared by several pupils were not aliased");
        }
        aliases
    }

    fn anonymiser(&self, alias_given_names: bool) -> Result<&Substituter, CoreError> {
        let cached = if alias_given_names {
            self.alias_anonymiser.get_or_init(|| {
                let aliases = self.given_name_aliases();
                Substituter::new(
                    self.real_to_pseudo
                        .iter()
                        .chain(aliases.iter())
                        .map(|(real, pseudo)| (real.as_str(), pseudo.as_str())),
                )
            })
        } else {
            self.anonymiser.get_or_init(|| {
                Substituter::new(
                    self.real_to_pseudo
                        .iter()
                        .map(|(real, pseudo)| (real.as_str(), pseudo.as_str())),
                )
            })
        };
        cached.as_ref().map_err(|e| CoreError::Pattern(e.clone()))
    }

    fn reidentifier(&self) -> Result<&Substituter, CoreError> {
        self.reidentifier
            .get_or_init(|| {
                Substituter::new(
                    self.pseudo_to_real
                        .iter()
                        .map(|(pseudo, real)| (pseudo.as_str(), real.as_str())),
                )
            })
            .as_ref()
            .map_err(|e| CoreError::Pattern(e.clone()))
    }

    /// [`crate::substitute::anonymise`] with this map's cached pattern.
    ///
    /// `extra_names` adds nothing here: every name with a mapping entry is
    /// already a key.
    pub fn anonymise(&self, input: &Value, options: &SubstituteOptions) -> Result<Value, CoreError> {
        Ok(self
            .anonymiser(options.alias_given_names)?
            .apply(input, &options.fields))
    }

    pub fn reidentify(&self, input: &Value, options: &SubstituteOptions) -> Result<Value, CoreError> {
        Ok(self.reidentifier()?.apply(input, &options.fields))
    }

    pub fn anonymise_text(&self, text: &str) -> Result<String, CoreError> {
        Ok(self.anonymiser(false)?.replace_text(text))
    }

    pub fn reidentify_text(&self, text: &str) -> Result<String, CoreError> {
        Ok(self.reidentifier()?.replace_text(text))
    }
}
