//! Work center model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WorkCenter {
    pub id: i32,
    pub name: String,
    pub code: Option<String>,
    pub company_id: Option<i32>,
    pub cost: Decimal,
    pub cost_per_hour: Decimal,
    pub capacity: Decimal,
    /// Target hours per day
    pub daily_target: Decimal,
    pub work_rate: Decimal,
    /// `cost_per_hour / work_rate`, zero when the rate is not positive
    pub hourly_rate: Decimal,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Work center with its company name
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct WorkCenterDetails {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub work_center: WorkCenter,
    pub company_name: Option<String>,
}

/// Work center payload used by both create and full update; missing numbers
/// take the creation defaults.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct WorkCenterInput {
    #[validate(length(min = 1, message = "Work center name is required"))]
    pub name: String,
    pub code: Option<String>,
    pub company_id: Option<i32>,
    pub cost: Option<Decimal>,
    pub cost_per_hour: Option<Decimal>,
    pub capacity: Option<Decimal>,
    pub daily_target: Option<Decimal>,
    pub work_rate: Option<Decimal>,
}

/// Resolved numeric attributes of a work center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkCenterRates {
    pub cost: Decimal,
    pub cost_per_hour: Decimal,
    pub capacity: Decimal,
    pub daily_target: Decimal,
    pub work_rate: Decimal,
    pub hourly_rate: Decimal,
}

impl WorkCenterInput {
    pub fn rates(&self) -> WorkCenterRates {
        let cost_per_hour = self.cost_per_hour.unwrap_or(Decimal::ZERO);
        let work_rate = self.work_rate.unwrap_or(Decimal::ONE);
        WorkCenterRates {
            cost: self.cost.unwrap_or(Decimal::ZERO),
            cost_per_hour,
            capacity: self.capacity.unwrap_or(Decimal::ONE),
            daily_target: self.daily_target.unwrap_or(Decimal::from(8)),
            work_rate,
            hourly_rate: hourly_rate(cost_per_hour, work_rate),
        }
    }
}

pub fn hourly_rate(cost_per_hour: Decimal, work_rate: Decimal) -> Decimal {
    if work_rate > Decimal::ZERO {
        cost_per_hour.checked_div(work_rate).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hourly_rate() {
        assert_eq!(hourly_rate(Decimal::from(250), Decimal::from(2)), Decimal::from(125));
        assert_eq!(hourly_rate(Decimal::from(250), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(hourly_rate(Decimal::from(250), Decimal::from(-1)), Decimal::ZERO);
    }

    #[test]
    fn test_rates_defaults() {
        let input: WorkCenterInput =
            serde_json::from_str(r#"{"name": "Assembly Line 1", "cost_per_hour": 90}"#).unwrap();
        let rates = input.rates();
        assert_eq!(rates.cost, Decimal::ZERO);
        assert_eq!(rates.capacity, Decimal::ONE);
        assert_eq!(rates.daily_target, Decimal::from(8));
        assert_eq!(rates.work_rate, Decimal::ONE);
        assert_eq!(rates.hourly_rate, Decimal::from(90));
    }
}
