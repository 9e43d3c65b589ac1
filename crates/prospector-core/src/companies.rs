use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Fleet size at or above which a carrier is pitched as a large enterprise.
pub const LARGE_FLEET_THRESHOLD: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyType {
    DigitalPlatform,
    RegionalCarrier,
    OwnerOperator,
    SpecialtyCarrier,
    LargeCarrier,
}

impl std::fmt::Display for CompanyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompanyType::DigitalPlatform => write!(f, "digital platform"),
            CompanyType::RegionalCarrier => write!(f, "regional carrier"),
            CompanyType::OwnerOperator => write!(f, "owner operator"),
            CompanyType::SpecialtyCarrier => write!(f, "specialty carrier"),
            CompanyType::LargeCarrier => write!(f, "large carrier"),
        }
    }
}

/// Which buyer personas the analysis prompt should steer toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutreachSegment {
    LargeCarrier,
    OwnerOperatorNetwork,
    SpecialtyCarrier,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub id: u32,
    pub name: String,
    #[serde(alias = "fleet_size")]
    pub fleet_size: u32,
    #[serde(alias = "company_type")]
    pub company_type: CompanyType,
    #[serde(default)]
    pub headquarters: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CompanyProfile {
    #[must_use]
    pub fn outreach_segment(&self) -> OutreachSegment {
        match self.company_type {
            CompanyType::OwnerOperator => OutreachSegment::OwnerOperatorNetwork,
            CompanyType::SpecialtyCarrier => OutreachSegment::SpecialtyCarrier,
            CompanyType::LargeCarrier => OutreachSegment::LargeCarrier,
            _ if self.fleet_size >= LARGE_FLEET_THRESHOLD => OutreachSegment::LargeCarrier,
            _ => OutreachSegment::General,
        }
    }
}

/// The list of known prospects served by `/companies` and used as prompt hints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyCatalog {
    pub companies: Vec<CompanyProfile>,
}

impl CompanyCatalog {
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&CompanyProfile> {
        self.companies.iter().find(|c| c.id == id)
    }

    /// Case-insensitive lookup by company name, ignoring surrounding whitespace.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&CompanyProfile> {
        let wanted = name.trim().to_lowercase();
        self.companies
            .iter()
            .find(|c| c.name.to_lowercase() == wanted)
    }
}

/// Load and validate the company catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<CompanyCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: CompanyCatalog = serde_yaml::from_str(&content)?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

fn validate_catalog(catalog: &CompanyCatalog) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();

    for company in &catalog.companies {
        if company.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "company name must be non-empty".to_string(),
            ));
        }

        if !seen_ids.insert(company.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate company id {} ('{}')",
                company.id, company.name
            )));
        }

        if !seen_names.insert(company.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate company name: '{}'",
                company.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "companies_test.rs"]
mod tests;
