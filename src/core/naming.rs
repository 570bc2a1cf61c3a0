//! Naming conventions for scaffolded active objects and regions.
//!
//! A PascalCase identifier such as `CompositeAct` is rendered three ways in
//! generated sources:
//! - class: `CompositeAct`
//! - variable: `compositeAct`
//! - event: `COMPOSITE_ACT`
//!
//! Scaffolding swaps every rendering of a template identifier for the
//! rendering of the new identifier.

use crate::error::{Error, Result};
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

// ============================================================================
// Types
// ============================================================================

/// The three lexical renderings of one logical identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSet {
    pub class: String,
    pub var: String,
    pub event: String,
}

/// Which rendering of a name is being substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NameForm {
    Class,
    Var,
    Event,
}

/// How source names are matched during substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Source names are matched as plain text.
    #[default]
    Literal,
    /// Source names are compiled as regular expressions. Replacement text is
    /// still inserted verbatim.
    Pattern,
}

impl MatchMode {
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "literal" => Ok(MatchMode::Literal),
            "pattern" | "regex" => Ok(MatchMode::Pattern),
            _ => Err(Error::validation_invalid_argument(
                "match_mode",
                format!("Unknown match mode '{}'. Use: literal, pattern", s),
                None,
                None,
            )),
        }
    }
}

/// A source name set and the name set that replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamePair {
    pub from: NameSet,
    pub to: NameSet,
}

impl NamePair {
    pub fn new(from: &str, to: &str) -> Result<Self> {
        Self::with_mode(from, to, MatchMode::Literal)
    }

    /// Build a pair for `mode`.
    ///
    /// The target is always a validated identifier. In [`MatchMode::Pattern`]
    /// the source is taken as written and each of its renderings must compile
    /// as a regular expression.
    pub fn with_mode(from: &str, to: &str, mode: MatchMode) -> Result<Self> {
        let to = derive_names(to)?;
        let from = match mode {
            MatchMode::Literal => derive_names(from)?,
            MatchMode::Pattern => {
                if from.is_empty() {
                    return Err(Error::validation_invalid_identifier(
                        "identifier",
                        from,
                        "Identifier cannot be empty",
                    ));
                }
                let names = NameSet::from_identifier(from);
                for (_, source) in names.forms() {
                    compile_pattern(source)?;
                }
                names
            }
        };
        Ok(Self { from, to })
    }
}

// ============================================================================
// Derivation
// ============================================================================

impl NameSet {
    /// Derive the renderings without validating the identifier.
    ///
    /// Input that is not PascalCase still yields a name set, usually with the
    /// whole string treated as one word.
    pub fn from_identifier(identifier: &str) -> Self {
        let words = split_words(identifier);

        let var = words
            .iter()
            .enumerate()
            .map(|(i, w)| if i == 0 { w.to_lowercase() } else { w.clone() })
            .collect::<String>();

        let event = words
            .iter()
            .map(|w| w.to_uppercase())
            .collect::<Vec<_>>()
            .join("_");

        Self {
            class: identifier.to_string(),
            var,
            event,
        }
    }

    /// Renderings in substitution order.
    pub fn forms(&self) -> [(NameForm, &str); 3] {
        [
            (NameForm::Class, self.class.as_str()),
            (NameForm::Var, self.var.as_str()),
            (NameForm::Event, self.event.as_str()),
        ]
    }

    pub fn get(&self, form: NameForm) -> &str {
        match form {
            NameForm::Class => &self.class,
            NameForm::Var => &self.var,
            NameForm::Event => &self.event,
        }
    }
}

/// Split an identifier into words.
///
/// A word starts at every ASCII uppercase letter that is directly followed by
/// an ASCII lowercase letter, except at the start of the string. Runs of
/// capitals stay attached to the preceding word (`AOWashing` splits into
/// `AO`, `Washing`) and digits never start a word (`Sensor2Act` splits into
/// `Sensor2`, `Act`). Whitespace also separates words.
pub fn split_words(identifier: &str) -> Vec<String> {
    let chars: Vec<char> = identifier.chars().collect();
    let mut spaced = String::with_capacity(identifier.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        let starts_word = i > 0
            && c.is_ascii_uppercase()
            && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
        if starts_word {
            spaced.push(' ');
        }
        spaced.push(c);
    }

    spaced.split_whitespace().map(str::to_string).collect()
}

/// Check that `identifier` can be used as a scaffold name.
///
/// Accepts an ASCII uppercase letter followed by ASCII letters and digits.
pub fn validate_identifier(identifier: &str, field: &str) -> Result<()> {
    let Some(first) = identifier.chars().next() else {
        return Err(Error::validation_invalid_identifier(
            field,
            identifier,
            "Identifier cannot be empty",
        ));
    };

    if !first.is_ascii_uppercase() {
        return Err(Error::validation_invalid_identifier(
            field,
            identifier,
            "Identifier must start with an uppercase letter",
        ));
    }

    if let Some(bad) = identifier.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(Error::validation_invalid_identifier(
            field,
            identifier,
            format!("Identifier contains invalid character '{}'", bad),
        ));
    }

    Ok(())
}

/// Validate `identifier` and derive its name set.
pub fn derive_names(identifier: &str) -> Result<NameSet> {
    validate_identifier(identifier, "identifier")?;
    Ok(NameSet::from_identifier(identifier))
}

// ============================================================================
// Substitution
// ============================================================================

/// Replace every rendering of `from` with the matching rendering of `to`,
/// matching literally. Forms are applied class, var, event.
pub fn substitute_names(text: &str, from: &NameSet, to: &NameSet) -> String {
    let mut buf = text.to_string();
    for (form, source) in from.forms() {
        if source.is_empty() {
            continue;
        }
        buf = buf.replace(source, to.get(form));
    }
    buf
}

/// Like [`substitute_names`], with an explicit matching mode.
///
/// In [`MatchMode::Pattern`] each source rendering is compiled as a regular
/// expression; an invalid pattern is an error rather than a panic.
pub fn substitute_names_with(
    text: &str,
    from: &NameSet,
    to: &NameSet,
    mode: MatchMode,
) -> Result<String> {
    match mode {
        MatchMode::Literal => Ok(substitute_names(text, from, to)),
        MatchMode::Pattern => {
            let mut buf = text.to_string();
            for (form, source) in from.forms() {
                if source.is_empty() {
                    continue;
                }
                let re = compile_pattern(source)?;
                buf = re.replace_all(&buf, NoExpand(to.get(form))).into_owned();
            }
            Ok(buf)
        }
    }
}

fn compile_pattern(source: &str) -> Result<Regex> {
    Regex::new(source).map_err(|e| Error::validation_invalid_pattern(source, e.to_string()))
}

/// Replace the first match of `from` in `file_name` with `to`.
///
/// Returns `None` when `from` does not occur in the name.
pub fn replace_first(
    file_name: &str,
    from: &str,
    to: &str,
    mode: MatchMode,
) -> Result<Option<String>> {
    if from.is_empty() {
        return Ok(None);
    }
    let (start, end) = match mode {
        MatchMode::Literal => match file_name.find(from) {
            Some(pos) => (pos, pos + from.len()),
            None => return Ok(None),
        },
        MatchMode::Pattern => match compile_pattern(from)?.find(file_name) {
            Some(m) => (m.start(), m.end()),
            None => return Ok(None),
        },
    };

    let mut renamed = String::with_capacity(file_name.len() + to.len());
    renamed.push_str(&file_name[..start]);
    renamed.push_str(to);
    renamed.push_str(&file_name[end..]);
    Ok(Some(renamed))
}

/// An ordered list of name pairs applied to each file of a scaffold pass.
///
/// Pairs run in insertion order. Push region pairs before active object
/// pairs so a region name containing the active object name is rewritten
/// whole.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionPlan {
    pub mode: MatchMode,
    pub pairs: Vec<NamePair>,
}

impl SubstitutionPlan {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            pairs: Vec::new(),
        }
    }

    pub fn with_pair(mut self, pair: NamePair) -> Self {
        self.pairs.push(pair);
        self
    }

    pub fn apply(&self, text: &str) -> Result<String> {
        let mut buf = text.to_string();
        for pair in &self.pairs {
            buf = substitute_names_with(&buf, &pair.from, &pair.to, self.mode)?;
        }
        Ok(buf)
    }
}

// ============================================================================
// Tests
// ============================================================================
