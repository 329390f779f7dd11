#[cfg(test)]
pub mod test_utils {
    use autofin_api::{ClientProfile, EmploymentType};
    use autofin_db::models::ClientModel;
    use chrono::{NaiveDate, SubsecRound, Utc};
    use rand::Rng;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::repository::ClientRepositoryImpl;
    use crate::test_helper::TEST_ENCRYPTION_KEY;

    /// Profile with a random passport number, so passport hashes do not collide.
    pub fn create_test_profile() -> ClientProfile {
        let mut rng = rand::thread_rng();
        ClientProfile {
            full_name: "Орлов Сергей Викторович".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1986, 4, rng.gen_range(1..=28)).unwrap(),
            passport_series: "4520".to_string(),
            passport_number: format!("{:06}", rng.gen_range(0..1_000_000)),
            phone: "+79160001122".to_string(),
            email: "orlov.sv@example.ru".to_string(),
            monthly_income: dec!(160000),
            employment_type: EmploymentType::Employed,
            experience_months: 48,
        }
    }

    pub fn create_test_client(profile: &ClientProfile, full_name_encrypted: Vec<u8>) -> ClientModel {
        let now = Utc::now().trunc_subsecs(6);
        ClientModel::from_profile(Uuid::new_v4(), profile, full_name_encrypted, now).unwrap()
    }

    pub async fn insert_test_client(
        repo: &ClientRepositoryImpl,
    ) -> Result<(ClientModel, ClientProfile), Box<dyn std::error::Error + Send + Sync>> {
        use autofin_db::repository::CreateBatch;

        let profile = create_test_profile();
        let encrypted = repo
            .encrypt_full_name(&profile.full_name, TEST_ENCRYPTION_KEY)
            .await?;
        let client = create_test_client(&profile, encrypted);
        let saved = repo.create_batch(vec![client]).await?;
        Ok((saved.into_iter().next().ok_or("client not saved")?, profile))
    }
}
