//! Issuer profiles and the registry that orders them.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RegistryError;
use crate::models::statement::Field;

use super::issuers;

/// Uncompiled issuer profile, as stored in profile files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerDefinition {
    /// Issuer name, unique within a registry.
    pub name: String,

    /// Patterns recognizing this issuer, tried in order.
    pub identifiers: Vec<String>,

    /// Fallback chain per field. Fields absent here are never attempted.
    #[serde(default)]
    pub fields: BTreeMap<Field, Vec<String>>,
}

impl IssuerDefinition {
    /// Create a definition with identifier patterns and no fields.
    pub fn new(name: impl Into<String>, identifiers: &[&str]) -> Self {
        Self {
            name: name.into(),
            identifiers: identifiers.iter().map(|p| p.to_string()).collect(),
            fields: BTreeMap::new(),
        }
    }

    /// Add the fallback chain for a field.
    pub fn field(mut self, field: Field, patterns: &[&str]) -> Self {
        self.fields
            .insert(field, patterns.iter().map(|p| p.to_string()).collect());
        self
    }
}

/// A compiled issuer profile. Immutable once built.
#[derive(Debug, Clone)]
pub struct IssuerProfile {
    name: String,
    identifiers: Vec<Regex>,
    fields: Vec<(Field, Vec<Regex>)>,
}

impl IssuerProfile {
    /// Compile a definition.
    ///
    /// All patterns are case-insensitive; field patterns are also
    /// multi-line so `^`/`$` anchor at line boundaries.
    pub fn compile(definition: &IssuerDefinition) -> Result<Self, RegistryError> {
        let name = definition.name.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if definition.identifiers.is_empty() {
            return Err(RegistryError::NoIdentifiers(name.to_string()));
        }

        let identifiers = definition
            .identifiers
            .iter()
            .map(|pattern| compile_pattern(name, pattern, false))
            .collect::<Result<Vec<_>, _>>()?;

        let fields = definition
            .fields
            .iter()
            .map(|(field, patterns)| {
                let compiled = patterns
                    .iter()
                    .map(|pattern| compile_pattern(name, pattern, true))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((*field, compiled))
            })
            .collect::<Result<Vec<_>, RegistryError>>()?;

        Ok(Self {
            name: name.to_string(),
            identifiers,
            fields,
        })
    }

    /// Issuer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier patterns in priority order.
    pub fn identifiers(&self) -> &[Regex] {
        &self.identifiers
    }

    /// Defined fields with their fallback chains, in canonical field order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &[Regex])> {
        self.fields
            .iter()
            .map(|(field, patterns)| (*field, patterns.as_slice()))
    }

    /// Fallback chain for one field, if this profile defines it.
    pub fn patterns(&self, field: Field) -> Option<&[Regex]> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, patterns)| patterns.as_slice())
    }

    /// Number of fields this profile defines.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Convert back into the uncompiled form.
    pub fn to_definition(&self) -> IssuerDefinition {
        IssuerDefinition {
            name: self.name.clone(),
            identifiers: self.identifiers.iter().map(|r| r.as_str().to_string()).collect(),
            fields: self
                .fields
                .iter()
                .map(|(field, patterns)| {
                    (*field, patterns.iter().map(|r| r.as_str().to_string()).collect())
                })
                .collect(),
        }
    }
}

fn compile_pattern(issuer: &str, pattern: &str, multi_line: bool) -> Result<Regex, RegistryError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(multi_line)
        .build()
        .map_err(|source| RegistryError::InvalidPattern {
            issuer: issuer.to_string(),
            pattern: pattern.to_string(),
            source,
        })
}

/// Ordered, immutable set of issuer profiles.
///
/// Order is detection priority: when several profiles match a document,
/// the earliest one wins.
#[derive(Debug, Clone)]
pub struct IssuerRegistry {
    profiles: Vec<IssuerProfile>,
}

impl IssuerRegistry {
    /// Registry with the built-in issuers.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_definitions(Self::builtin_definitions())
    }

    /// Definitions of the built-in issuers, in priority order.
    pub fn builtin_definitions() -> Vec<IssuerDefinition> {
        issuers::builtin_definitions()
    }

    /// Compile definitions into a registry, keeping their order.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = IssuerDefinition>,
    ) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        let mut profiles = Vec::new();

        for definition in definitions {
            let profile = IssuerProfile::compile(&definition)?;
            if !seen.insert(profile.name.to_lowercase()) {
                return Err(RegistryError::DuplicateIssuer(profile.name));
            }
            profiles.push(profile);
        }

        debug!("Built issuer registry with {} profiles", profiles.len());
        Ok(Self { profiles })
    }

    /// Load a registry from a JSON array of definitions.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        Self::from_definitions(Self::load_definitions(path)?)
    }

    /// Read a JSON array of definitions without compiling them.
    pub fn load_definitions(path: &Path) -> Result<Vec<IssuerDefinition>, RegistryError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::Load(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| RegistryError::Load(format!("{}: {}", path.display(), e)))
    }

    /// Profiles in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &IssuerProfile> {
        self.profiles.iter()
    }

    /// Look up a profile by exact name.
    pub fn get(&self, name: &str) -> Option<&IssuerProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Uncompiled definitions of every profile, in priority order.
    pub fn definitions(&self) -> Vec<IssuerDefinition> {
        self.profiles.iter().map(IssuerProfile::to_definition).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_registry_compiles() {
        let registry = IssuerRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get("RBL Bank").unwrap().field_count(), 6);
        assert!(registry.get("HDFC Bank").is_none());
    }

    #[test]
    fn test_definitions_round_trip() {
        let registry = IssuerRegistry::builtin().unwrap();
        assert_eq!(registry.definitions(), IssuerRegistry::builtin_definitions());
    }

    #[test]
    fn test_fields_in_canonical_order() {
        let def = IssuerDefinition::new("Test", &["test"])
            .field(Field::PreviousBalance, &["a"])
            .field(Field::CardNumber, &["b"]);
        let profile = IssuerProfile::compile(&def).unwrap();

        let fields: Vec<Field> = profile.fields().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![Field::CardNumber, Field::PreviousBalance]);
        assert!(profile.patterns(Field::CreditLimit).is_none());
    }

    #[test]
    fn test_invalid_pattern() {
        let def = IssuerDefinition::new("Broken", &["(unclosed"]);
        let err = IssuerRegistry::from_definitions([def]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidPattern { ref issuer, .. } if issuer == "Broken"));
    }

    #[test]
    fn test_duplicate_issuer() {
        let defs = [
            IssuerDefinition::new("Same", &["a"]),
            IssuerDefinition::new("same", &["b"]),
        ];
        assert!(matches!(
            IssuerRegistry::from_definitions(defs),
            Err(RegistryError::DuplicateIssuer(_))
        ));
    }

    #[test]
    fn test_profile_without_identifiers() {
        let def = IssuerDefinition::new("Silent", &[]);
        assert!(matches!(
            IssuerProfile::compile(&def),
            Err(RegistryError::NoIdentifiers(_))
        ));
        let def = IssuerDefinition::new("  ", &["x"]);
        assert!(matches!(IssuerProfile::compile(&def), Err(RegistryError::EmptyName)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        let defs = vec![
            IssuerDefinition::new("Demo Card", &[r"Demo\s+Card"])
                .field(Field::TotalAmountDue, &[r"Due:\s*(\S+)"]),
        ];
        std::fs::write(&path, serde_json::to_string(&defs).unwrap()).unwrap();

        let registry = IssuerRegistry::from_file(&path).unwrap();
        assert_eq!(registry.definitions(), defs);

        let missing = IssuerRegistry::from_file(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(RegistryError::Load(_))));
    }
}
