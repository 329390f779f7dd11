use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ApiError;

/// Kind of financing offered for a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "financing_type", rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum FinancingType {
    /// Installment loan
    Credit,
    Leasing,
}

impl std::fmt::Display for FinancingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinancingType::Credit => write!(f, "credit"),
            FinancingType::Leasing => write!(f, "leasing"),
        }
    }
}

impl FromStr for FinancingType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit" => Ok(FinancingType::Credit),
            "leasing" => Ok(FinancingType::Leasing),
            _ => Err(ApiError::validation(
                "Financing type must be 'credit' or 'leasing'",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "vehicle_category", rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    New,
    Used,
}

impl std::fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleCategory::New => write!(f, "new"),
            VehicleCategory::Used => write!(f, "used"),
        }
    }
}

impl FromStr for VehicleCategory {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(VehicleCategory::New),
            "used" => Ok(VehicleCategory::Used),
            _ => Err(ApiError::validation("Vehicle category must be 'new' or 'used'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "employment_type", rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    Employed,
    SelfEmployed,
    BusinessOwner,
}

impl std::fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmploymentType::Employed => write!(f, "employed"),
            EmploymentType::SelfEmployed => write!(f, "self_employed"),
            EmploymentType::BusinessOwner => write!(f, "business_owner"),
        }
    }
}

impl FromStr for EmploymentType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employed" => Ok(EmploymentType::Employed),
            "self_employed" => Ok(EmploymentType::SelfEmployed),
            "business_owner" => Ok(EmploymentType::BusinessOwner),
            _ => Err(ApiError::validation(
                "Employment type must be 'employed', 'self_employed' or 'business_owner'",
            )),
        }
    }
}

/// Outcome of the pre-approval check.
///
/// `Pending` marks a calculation that has not been scored yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "approval_status", rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    PreApproved,
    ConditionalApproval,
    Rejected,
}

impl ApprovalStatus {
    pub fn description(&self) -> &'static str {
        match self {
            ApprovalStatus::PreApproved => "Pre-approved",
            ApprovalStatus::ConditionalApproval => "Approved with conditions",
            ApprovalStatus::Rejected => "Rejected",
            ApprovalStatus::Pending => "Under review",
        }
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "pending"),
            ApprovalStatus::PreApproved => write!(f, "pre_approved"),
            ApprovalStatus::ConditionalApproval => write!(f, "conditional_approval"),
            ApprovalStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for ApprovalStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApprovalStatus::Pending),
            "pre_approved" => Ok(ApprovalStatus::PreApproved),
            "conditional_approval" => Ok(ApprovalStatus::ConditionalApproval),
            "rejected" => Ok(ApprovalStatus::Rejected),
            _ => Err(ApiError::validation(format!("Unknown approval status '{s}'"))),
        }
    }
}
