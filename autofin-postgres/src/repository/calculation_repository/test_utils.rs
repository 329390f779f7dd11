#[cfg(test)]
pub mod test_utils {
    use autofin_api::{
        ApprovalStatus, CalculationConditions, ClientProfile, FinancingType, VehicleCategory,
    };
    use autofin_db::models::{
        CalculationModel, ClientModel, SessionData, UserSessionModel, VehicleModel,
    };
    use autofin_db::repository::CreateBatch;
    use chrono::{Duration, SubsecRound, Utc};
    use heapless::String as HeaplessString;
    use rust_decimal_macros::dec;
    use sqlx::types::Json;
    use uuid::Uuid;

    use crate::postgres_repositories::QuotingRepositories;
    use crate::repository::client_repository::test_utils::test_utils::insert_test_client;
    use crate::repository::vehicle_repository::test_utils::test_utils::create_test_vehicle;

    pub struct TestQuote {
        pub client: ClientModel,
        pub profile: ClientProfile,
        pub vehicle: VehicleModel,
        pub calculation: CalculationModel,
        pub session: UserSessionModel,
    }

    pub fn create_test_calculation(client_id: Uuid, vehicle_id: Uuid) -> CalculationModel {
        CalculationModel {
            id: Uuid::new_v4(),
            client_id,
            vehicle_id,
            financing_type: FinancingType::Credit,
            amount: dec!(3200000),
            initial_payment: dec!(640000),
            months: 60,
            monthly_payment: dec!(62105.18),
            total_payment: dec!(3726310.80),
            effective_rate: dec!(14.20),
            approval_status: ApprovalStatus::PreApproved,
            approval_score: dec!(82.5),
            session_data: Json(SessionData {
                product_config_id: None,
                insurance_included: true,
                life_insurance: false,
                conditions: Some(CalculationConditions {
                    base_rate: dec!(15.9),
                    vehicle_type: VehicleCategory::New,
                    residual_value: None,
                    insurance_included: true,
                    life_insurance: false,
                }),
                reasons: vec!["Test quote".to_string()],
            }),
            created_at: Utc::now().trunc_subsecs(6),
        }
    }

    pub fn create_test_session(calculation: &CalculationModel) -> UserSessionModel {
        UserSessionModel {
            id: Uuid::new_v4(),
            user_id: HeaplessString::try_from("test.manager").unwrap(),
            client_id: calculation.client_id,
            calculation_id: calculation.id,
            ip_address: Some("192.168.10.5".parse().unwrap()),
            user_agent: Some("autofin-tests".to_string()),
            started_at: calculation.created_at - Duration::minutes(10),
            ended_at: None,
        }
    }

    /// Client, vehicle, calculation and open session, linked together.
    pub async fn insert_test_quote(
        repos: &QuotingRepositories,
    ) -> Result<TestQuote, Box<dyn std::error::Error + Send + Sync>> {
        let (client, profile) = insert_test_client(&repos.client_repository).await?;
        let vehicle = create_test_vehicle();
        repos.vehicle_repository.create_batch(vec![vehicle.clone()]).await?;

        let calculation = create_test_calculation(client.id, vehicle.id);
        repos
            .calculation_repository
            .create_batch(vec![calculation.clone()])
            .await?;

        let session = create_test_session(&calculation);
        repos
            .user_session_repository
            .create_batch(vec![session.clone()])
            .await?;

        Ok(TestQuote {
            client,
            profile,
            vehicle,
            calculation,
            session,
        })
    }
}
