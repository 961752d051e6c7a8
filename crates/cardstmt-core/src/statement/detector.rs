//! Issuer detection.

use tracing::{debug, trace};

use super::registry::{IssuerProfile, IssuerRegistry};

/// Names the issuer of a statement from its text.
pub struct IssuerDetector<'r> {
    registry: &'r IssuerRegistry,
}

impl<'r> IssuerDetector<'r> {
    pub fn new(registry: &'r IssuerRegistry) -> Self {
        Self { registry }
    }

    /// Find the first profile, in registry order, with a matching identifier.
    ///
    /// Ties between profiles go to registry order, never to pattern specificity.
    pub fn identify(&self, text: &str) -> Option<&'r IssuerProfile> {
        for profile in self.registry.iter() {
            for pattern in profile.identifiers() {
                if let Some(m) = pattern.find(text) {
                    debug!(
                        "Identified issuer {} via /{}/ at {}",
                        profile.name(),
                        pattern.as_str(),
                        m.start()
                    );
                    return Some(profile);
                }
                trace!("{}: /{}/ did not match", profile.name(), pattern.as_str());
            }
        }

        debug!("No issuer profile matched {} characters of text", text.len());
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::registry::IssuerDefinition;

    fn registry() -> IssuerRegistry {
        IssuerRegistry::builtin().unwrap()
    }

    #[test]
    fn test_identify_by_brand_name() {
        let registry = registry();
        let detector = IssuerDetector::new(&registry);

        assert_eq!(detector.identify("Welcome to Axis  Bank").unwrap().name(), "Axis Bank");
        assert_eq!(detector.identify("idfc first bank ltd").unwrap().name(), "IDFC FIRST Bank");
    }

    #[test]
    fn test_identify_by_domain_and_regulatory_id() {
        let registry = registry();
        let detector = IssuerDetector::new(&registry);

        assert_eq!(detector.identify("visit www.RBLBANK.com").unwrap().name(), "RBL Bank");
        assert_eq!(detector.identify("GSTIN AAACU2414K3ZD").unwrap().name(), "Axis Bank");
        assert_eq!(
            detector.identify("CIN: L65190GJ1994PLC021012").unwrap().name(),
            "ICICI Bank"
        );
    }

    #[test]
    fn test_registry_order_breaks_ties() {
        let registry = registry();
        let detector = IssuerDetector::new(&registry);

        // AMEX card statement that also mentions ICICI: ICICI is registered first.
        let text = "American Express Card\nPay via ICICI Bank net banking";
        assert_eq!(detector.identify(text).unwrap().name(), "ICICI Bank");
    }

    #[test]
    fn test_specificity_does_not_matter() {
        let registry = IssuerRegistry::from_definitions([
            IssuerDefinition::new("Loose", &["bank"]),
            IssuerDefinition::new("Exact", &[r"Exact\s+Bank\s+Ltd"]),
        ])
        .unwrap();
        let detector = IssuerDetector::new(&registry);

        assert_eq!(detector.identify("Exact Bank Ltd").unwrap().name(), "Loose");
    }

    #[test]
    fn test_unknown_issuer() {
        let registry = registry();
        let detector = IssuerDetector::new(&registry);

        assert!(detector.identify("Statement of account\nHDFC Bank").is_none());
        assert!(detector.identify("").is_none());
    }
}
