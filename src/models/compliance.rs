//! Compliance tier selected by the user.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceTier {
    #[default]
    Standard,
    Enhanced,
    Strict,
}

impl ComplianceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceTier::Standard => "standard",
            ComplianceTier::Enhanced => "enhanced",
            ComplianceTier::Strict => "strict",
        }
    }
}

impl FromStr for ComplianceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(ComplianceTier::Standard),
            "enhanced" => Ok(ComplianceTier::Enhanced),
            "strict" => Ok(ComplianceTier::Strict),
            other => Err(format!(
                "Unknown compliance tier '{other}' (expected standard, enhanced or strict)"
            )),
        }
    }
}

impl std::fmt::Display for ComplianceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tier() {
        assert_eq!("strict".parse(), Ok(ComplianceTier::Strict));
        assert_eq!(" Enhanced ".parse(), Ok(ComplianceTier::Enhanced));
        assert_eq!("standard".parse(), Ok(ComplianceTier::Standard));
        assert!("paranoid".parse::<ComplianceTier>().is_err());
    }

    #[test]
    fn test_tier_order_follows_strictness() {
        assert!(ComplianceTier::Standard < ComplianceTier::Enhanced);
        assert!(ComplianceTier::Enhanced < ComplianceTier::Strict);
    }
}
