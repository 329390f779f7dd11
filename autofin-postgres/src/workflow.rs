//! Persisting a complete quote: client, vehicle, calculation and the
//! manager session that produced it, all in one transaction.

use autofin_api::{
    ApiError, ApprovalStatus, Assessment, CalculationParameters, CalculationResult, Calculator,
    ClientProfile, FinancingType, ProductConfigurator, ProductRule, Recommendation, ScoringEngine,
    ScoringSystem, SmartCalculator, VehicleSpec,
};
use autofin_db::models::{
    CalculationModel, ClientModel, SessionData, UserSessionModel, VehicleModel,
};
use autofin_db::repository::CreateBatch;
use autofin_db::utils::bounded;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use std::error::Error;
use std::net::IpAddr;
use tracing::{info, warn};
use uuid::Uuid;

use crate::postgres_repositories::{PostgresRepositories, QuotingRepositories};

#[derive(Debug, Clone)]
pub struct ManagerContext {
    pub user_id: String,
    pub ip_address: Option<IpAddr>,
    pub user_agent: Option<String>,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub client: ClientProfile,
    pub vehicle: VehicleSpec,
    pub stock_id: Option<String>,
    pub financing_type: FinancingType,
    pub initial_payment: Decimal,
    pub months: i32,
    pub insurance_included: bool,
    pub life_insurance: bool,
    /// Explicit product; otherwise the first matching active product is used
    pub product_code: Option<String>,
    pub manager: ManagerContext,
}

impl QuoteRequest {
    /// The vehicle price is the financed amount.
    pub fn parameters(&self) -> CalculationParameters {
        let mut params = CalculationParameters::new(
            self.financing_type,
            self.vehicle.price,
            self.initial_payment,
            self.months,
        )
        .with_vehicle(self.vehicle.clone());
        params.insurance_included = self.insurance_included;
        params.life_insurance = self.life_insurance;
        params
    }
}

#[derive(Debug, Clone)]
pub struct QuoteOutcome {
    pub client: ClientModel,
    pub vehicle: VehicleModel,
    pub calculation: CalculationModel,
    pub session: UserSessionModel,
    pub result: CalculationResult,
    pub assessment: Assessment,
    pub product: Option<ProductRule>,
    /// Every product available for the vehicle, priced at its minimum initial payment
    pub recommendations: Vec<Recommendation>,
}

pub struct QuoteWorkflow<C: Calculator = SmartCalculator, S: ScoringEngine = ScoringSystem> {
    calculator: C,
    scoring: S,
    encryption_key: String,
}

impl QuoteWorkflow {
    pub fn new(encryption_key: impl Into<String>) -> Self {
        Self::with_engines(SmartCalculator::default(), ScoringSystem::default(), encryption_key)
    }
}

impl<C: Calculator, S: ScoringEngine> QuoteWorkflow<C, S> {
    pub fn with_engines(calculator: C, scoring: S, encryption_key: impl Into<String>) -> Self {
        Self {
            calculator,
            scoring,
            encryption_key: encryption_key.into(),
        }
    }

    /// Records the quote and commits. Nothing is written when any step fails.
    pub async fn submit(
        &self,
        repositories: &PostgresRepositories,
        request: &QuoteRequest,
        now: DateTime<Utc>,
    ) -> Result<QuoteOutcome, Box<dyn Error + Send + Sync>> {
        let repos = repositories.create_quoting_repositories().await?;
        let outcome = self.record(&repos, request, now).await?;
        repos.commit().await?;
        Ok(outcome)
    }

    /// Validates, scores, prices and writes the quote inside `repos`'
    /// transaction without committing it.
    ///
    /// Rejected applications are still stored so the decision can be audited.
    pub async fn record(
        &self,
        repos: &QuotingRepositories,
        request: &QuoteRequest,
        now: DateTime<Utc>,
    ) -> Result<QuoteOutcome, Box<dyn Error + Send + Sync>> {
        request.client.check()?;
        let mut params = request.parameters();
        self.calculator.validate_parameters(&params)?;

        let today = now.date_naive();
        let configurator = ProductConfigurator::new(
            repos
                .product_config_repository
                .find_active_on(today)
                .await?
                .iter()
                .map(|p| p.to_rule())
                .collect(),
        );
        let product = self
            .select_product(repos, &configurator, request, today)
            .await?;
        if let Some(rule) = &product {
            params = params.with_base_rate(rule.base_rate);
        }
        let recommendations = configurator.recommendations(
            &request.client,
            &request.vehicle,
            &self.calculator,
            today,
        )?;

        let assessment = self.scoring.assess_client(&request.client, &params, today)?;
        if assessment.status == ApprovalStatus::Rejected {
            warn!(score = %assessment.score, reasons = ?assessment.reasons, "application rejected");
        }

        let mut result = self.calculator.calculate(&params, today)?;
        result.approval_status = assessment.status;
        result.approval_score = assessment.score;

        let encrypted = repos
            .client_repository
            .encrypt_full_name(&request.client.full_name, &self.encryption_key)
            .await?;
        let client = repos
            .client_repository
            .upsert_by_passport_hash(&ClientModel::from_profile(
                Uuid::new_v4(),
                &request.client,
                encrypted,
                now,
            )?)
            .await?;
        let vehicle = repos
            .vehicle_repository
            .upsert_by_vin_hash(&VehicleModel::from_spec(
                Uuid::new_v4(),
                &request.vehicle,
                request.stock_id.as_deref(),
                now,
            )?)
            .await?;

        let calculation = CalculationModel {
            id: Uuid::new_v4(),
            client_id: client.id,
            vehicle_id: vehicle.id,
            financing_type: params.financing_type,
            amount: params.amount,
            initial_payment: params.initial_payment,
            months: params.months,
            monthly_payment: result.monthly_payment,
            total_payment: result.total_payment,
            effective_rate: result.effective_rate,
            approval_status: result.approval_status,
            approval_score: result.approval_score,
            session_data: Json(SessionData {
                product_config_id: product.as_ref().and_then(|p| p.id),
                insurance_included: params.insurance_included,
                life_insurance: params.life_insurance,
                conditions: Some(result.conditions.clone()),
                reasons: assessment.reasons.clone(),
            }),
            created_at: now,
        };
        repos
            .calculation_repository
            .create_batch(vec![calculation.clone()])
            .await?;

        let session = UserSessionModel {
            id: Uuid::new_v4(),
            user_id: bounded(&request.manager.user_id, "user_id")?,
            client_id: client.id,
            calculation_id: calculation.id,
            ip_address: request.manager.ip_address,
            user_agent: request.manager.user_agent.clone(),
            started_at: request.manager.started_at,
            ended_at: Some(now),
        };
        repos
            .user_session_repository
            .create_batch(vec![session.clone()])
            .await?;

        info!(
            calculation_id = %calculation.id,
            status = %calculation.approval_status,
            monthly_payment = %calculation.monthly_payment,
            "quote recorded"
        );

        Ok(QuoteOutcome {
            client,
            vehicle,
            calculation,
            session,
            result,
            assessment,
            product,
            recommendations,
        })
    }

    async fn select_product(
        &self,
        repos: &QuotingRepositories,
        configurator: &ProductConfigurator,
        request: &QuoteRequest,
        today: NaiveDate,
    ) -> Result<Option<ProductRule>, Box<dyn Error + Send + Sync>> {
        let fits = |rule: &ProductRule| {
            rule.financing_type == request.financing_type
                && ProductConfigurator::is_product_available(rule, &request.vehicle)
                && (rule.min_amount..=rule.max_amount).contains(&request.vehicle.price)
                && (rule.min_months..=rule.max_months).contains(&request.months)
                && request.initial_payment
                    >= ProductConfigurator::min_initial_payment(rule, request.vehicle.price)
        };

        match &request.product_code {
            Some(code) => {
                let product = repos
                    .product_config_repository
                    .find_by_code(code)
                    .await?
                    .ok_or_else(|| ApiError::NotFound(format!("Product '{code}'")))?;
                if !product.is_valid_on(today) {
                    return Err(ApiError::validation(format!(
                        "Product '{code}' is not available on {today}"
                    ))
                    .into());
                }
                let rule = product.to_rule();
                if !fits(&rule) {
                    return Err(ApiError::validation(format!(
                        "Product '{code}' does not cover this vehicle, term or initial payment"
                    ))
                    .into());
                }
                Ok(Some(rule))
            }
            None => Ok(configurator.rules().iter().find(|rule| fits(rule)).cloned()),
        }
    }
}
