//! Usage operation schema
//!
//! The wire shape nests key and account figures; accessors give the flat view.
//! Every figure is optional and an absent figure is not zero.

use crate::codec::nullable;
use serde::{Deserialize, Serialize};

/// Usage of the API key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyUsage {
    /// Credits used by this key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<f64>,

    /// Credit limit of this key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
}

/// Plan and pay-as-you-go usage of the account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountUsage {
    /// Name of the current plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_plan: Option<String>,

    /// Credits used on the current plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_usage: Option<f64>,

    /// Credit limit of the current plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_limit: Option<f64>,

    /// Pay-as-you-go credits used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paygo_usage: Option<f64>,

    /// Pay-as-you-go credit limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paygo_limit: Option<f64>,
}

/// Response from the `/usage` endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageResponse {
    /// Figures for the calling key
    #[serde(default, deserialize_with = "nullable")]
    pub key: KeyUsage,

    /// Figures for the owning account
    #[serde(default, deserialize_with = "nullable")]
    pub account: AccountUsage,
}

impl UsageResponse {
    /// Credits used by the key
    pub fn key_usage(&self) -> Option<f64> {
        self.key.usage
    }

    /// Credit limit of the key
    pub fn key_limit(&self) -> Option<f64> {
        self.key.limit
    }

    /// Name of the current plan
    pub fn plan_name(&self) -> Option<&str> {
        self.account.current_plan.as_deref()
    }

    /// Credits used on the plan
    pub fn plan_usage(&self) -> Option<f64> {
        self.account.plan_usage
    }

    /// Credit limit of the plan
    pub fn plan_limit(&self) -> Option<f64> {
        self.account.plan_limit
    }

    /// Pay-as-you-go credits used
    pub fn paygo_usage(&self) -> Option<f64> {
        self.account.paygo_usage
    }

    /// Pay-as-you-go credit limit
    pub fn paygo_limit(&self) -> Option<f64> {
        self.account.paygo_limit
    }
}
