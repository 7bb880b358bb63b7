//! Per-provider rate table.
//!
//! Prices are static configuration, not live quotes. The built-in table can be
//! replaced by a JSON file with the same shape as [`RateTable::default`].

use crate::error::CostError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Azure,
    Gcp,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Aws => "aws",
            Provider::Azure => "azure",
            Provider::Gcp => "gcp",
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aws" => Ok(Provider::Aws),
            "azure" => Ok(Provider::Azure),
            "gcp" => Ok(Provider::Gcp),
            other => Err(format!(
                "Unknown provider '{other}' (expected aws, azure or gcp)"
            )),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

/// Unit prices for one provider, in USD.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ProviderRates {
    /// Per instance-hour.
    pub compute: f64,
    /// Per GB transferred out.
    pub networking: f64,
    /// Per GB-month.
    pub storage: f64,
    /// Per load balancer hour.
    #[serde(rename = "lb")]
    pub load_balancer: f64,
    /// Per NAT gateway hour.
    #[serde(rename = "nat")]
    pub nat_gateway: f64,
}

impl ProviderRates {
    fn scaled(&self, multiplier: f64) -> ProviderRates {
        ProviderRates {
            compute: self.compute * multiplier,
            networking: self.networking * multiplier,
            storage: self.storage * multiplier,
            load_balancer: self.load_balancer * multiplier,
            nat_gateway: self.nat_gateway * multiplier,
        }
    }
}

/// Base rates per provider plus regional price multipliers.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RateTable {
    pub providers: BTreeMap<Provider, ProviderRates>,
    pub regions: BTreeMap<String, f64>,
}

/// Rate table as written on disk. Provider names stay strings so parse errors
/// can name the provider in their JSON path.
#[derive(Deserialize, Debug)]
struct RawRateTable {
    providers: BTreeMap<String, ProviderRates>,
    #[serde(default)]
    regions: BTreeMap<String, f64>,
}

impl Default for RateTable {
    fn default() -> Self {
        let providers = BTreeMap::from([
            (
                Provider::Aws,
                ProviderRates {
                    compute: 0.0464,
                    networking: 0.09,
                    storage: 0.10,
                    load_balancer: 0.0225,
                    nat_gateway: 0.045,
                },
            ),
            (
                Provider::Azure,
                ProviderRates {
                    compute: 0.0496,
                    networking: 0.087,
                    storage: 0.0184,
                    load_balancer: 0.028,
                    nat_gateway: 0.046,
                },
            ),
            (
                Provider::Gcp,
                ProviderRates {
                    compute: 0.0475,
                    networking: 0.12,
                    storage: 0.020,
                    load_balancer: 0.025,
                    nat_gateway: 0.045,
                },
            ),
        ]);
        let regions = BTreeMap::from([
            ("us-east-1".to_string(), 1.0),
            ("us-west-2".to_string(), 1.05),
            ("eu-west-1".to_string(), 1.15),
            ("ap-southeast-1".to_string(), 1.25),
        ]);
        RateTable { providers, regions }
    }
}

impl RateTable {
    /// Read a rate table from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<RateTable, CostError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CostError::RateTableIo {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Reading rate table: {}", path.display());
        RateTable::from_json(&json, &path.display().to_string())
    }

    /// Parse a rate table, reporting the JSON path of the first bad value.
    pub fn from_json(json: &str, source_name: &str) -> Result<RateTable, CostError> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let raw: RawRateTable =
            serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
                CostError::RateTableParse {
                    path: source_name.to_string(),
                    json_path: e.path().to_string(),
                    message: e.inner().to_string(),
                }
            })?;

        let mut providers = BTreeMap::new();
        for (name, rates) in raw.providers {
            let provider = name.parse::<Provider>().map_err(|message| CostError::RateTableParse {
                path: source_name.to_string(),
                json_path: format!("providers.{name}"),
                message,
            })?;
            providers.insert(provider, rates);
        }
        Ok(RateTable {
            providers,
            regions: raw.regions,
        })
    }

    /// Regional multiplier, `None` when the region is not in the table.
    pub fn region_multiplier(&self, region: &str) -> Option<f64> {
        self.regions.get(region).copied()
    }

    /// Rates for `provider` in `region`. Unknown regions are priced at the base rate.
    pub fn rates_for(&self, provider: Provider, region: &str) -> Result<ProviderRates, CostError> {
        let base = self
            .providers
            .get(&provider)
            .ok_or_else(|| CostError::UnknownProvider(provider.to_string()))?;
        Ok(base.scaled(self.region_multiplier(region).unwrap_or(1.0)))
    }
}
