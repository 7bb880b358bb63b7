//! Calculation front door for UIs and the CLI.
//!
//! Wraps the pure engine, the cost estimator and the scenario planner, and
//! reports every calculation to an [`EventSink`].

use crate::cost::{estimate_costs, CostEstimate, CostInput, RateTable};
use crate::error::{CostError, SubnetError};
use crate::models::{ComplianceTier, Ipv4, SubnetReport};
use crate::processing::{calculate, plan_scenario, Scenario, ScenarioPlan, SubnetQuery};
use crate::telemetry::{new_session_id, CalculationEvent, CalculationType, EventSink};
use serde_json::json;

pub struct Calculator<S: EventSink> {
    sink: S,
    rates: RateTable,
    session_id: String,
}

impl<S: EventSink> Calculator<S> {
    pub fn new(sink: S, rates: RateTable) -> Calculator<S> {
        Calculator {
            sink,
            rates,
            session_id: new_session_id(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Validate text inputs and compute a subnet report.
    pub fn subnet(
        &mut self,
        ip: &str,
        prefix_length: &str,
        hosts_required: &str,
        az_count: u32,
        compliance_tier: ComplianceTier,
    ) -> Result<SubnetReport, SubnetError> {
        let params = json!({
            "ipAddress": ip,
            "prefixLength": prefix_length,
            "hostsRequired": hosts_required,
            "azCount": az_count,
            "complianceTier": compliance_tier,
        });
        let result = SubnetQuery::parse(ip, prefix_length, hosts_required, az_count, compliance_tier)
            .and_then(|query| calculate(&query));

        match &result {
            Ok(report) => {
                log::debug!(
                    "subnet {} -> {} usable hosts, score {}",
                    report.cidr_notation(),
                    report.usable_hosts,
                    report.security_score
                );
                self.emit(CalculationEvent::performed(
                    CalculationType::Subnet,
                    params,
                    &self.session_id,
                ));
            }
            Err(e) => {
                log::debug!("subnet input rejected: {}: {e}", e.field());
                self.emit(CalculationEvent::failed(
                    CalculationType::Subnet,
                    params,
                    e.field(),
                    &self.session_id,
                ));
            }
        }
        result
    }

    /// Price a deployment against the configured rate table.
    pub fn cost(&mut self, input: &CostInput) -> Result<CostEstimate, CostError> {
        let params = json!({
            "provider": input.provider,
            "region": input.region,
            "instanceCount": input.instance_count,
            "dataTransferGb": input.data_transfer_gb,
            "azCount": input.az_count,
        });
        let estimate = match estimate_costs(input, &self.rates) {
            Ok(estimate) => estimate,
            Err(e) => {
                log::debug!("cost input rejected: {}: {e}", e.field());
                self.emit(CalculationEvent::failed(
                    CalculationType::Cost,
                    params,
                    e.field(),
                    &self.session_id,
                ));
                return Err(e);
            }
        };
        if estimate.region_multiplier.is_none() {
            log::warn!(
                "Region {} not in rate table, using base {} rates",
                input.region,
                input.provider
            );
        }
        self.emit(CalculationEvent::performed(
            CalculationType::Cost,
            params,
            &self.session_id,
        ));
        Ok(estimate)
    }

    /// Lay out a reference architecture inside `parent`.
    pub fn scenario(&mut self, scenario: &Scenario, parent: Ipv4) -> Result<ScenarioPlan, SubnetError> {
        let params = json!({
            "scenario": scenario.name,
            "parent": parent,
        });
        match plan_scenario(scenario, parent) {
            Ok(plan) => {
                self.emit(CalculationEvent::performed(
                    CalculationType::Scenario,
                    params,
                    &self.session_id,
                ));
                Ok(plan)
            }
            Err(e) => {
                self.emit(CalculationEvent::failed(
                    CalculationType::Scenario,
                    params,
                    e.field(),
                    &self.session_id,
                ));
                Err(e)
            }
        }
    }

    fn emit(&mut self, event: CalculationEvent) {
        self.sink.record(&event);
    }
}
