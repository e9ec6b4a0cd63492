// Financing calculator: fixed-rate amortizing loan plus an affordability rating
// derived from the share of monthly income the payment consumes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Loan terms offered on the financing page
pub const ALLOWED_TERMS: [u32; 6] = [24, 36, 48, 60, 72, 84];

// Debt-to-income breakpoints, in percent
const EXCELLENT_MAX_RATIO: f64 = 15.0;
const GOOD_MAX_RATIO: f64 = 25.0;
const FAIR_MAX_RATIO: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoanParameters {
    pub vehicle_price: f64,
    pub down_payment: f64,
    pub trade_in_value: f64,
    pub monthly_income: f64,
    pub term_months: u32,
    pub annual_rate_percent: f64,
}

impl Default for LoanParameters {
    fn default() -> Self {
        Self {
            vehicle_price: 25_000.0,
            down_payment: 5_000.0,
            trade_in_value: 0.0,
            monthly_income: 3_500.0,
            term_months: 60,
            annual_rate_percent: 4.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoanInputError {
    #[error("{field} must be a non-negative amount")]
    NegativeAmount { field: &'static str },
    #[error("loan term of {0} months is not offered")]
    UnsupportedTerm(u32),
}

impl LoanParameters {
    pub fn financed_principal(&self) -> f64 {
        self.vehicle_price - self.down_payment - self.trade_in_value
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    // Form-level checks. The calculator itself never fails; it only declines to produce a result.
    pub fn validate(&self) -> Result<(), LoanInputError> {
        let amounts = [
            ("vehiclePrice", self.vehicle_price),
            ("downPayment", self.down_payment),
            ("tradeInValue", self.trade_in_value),
            ("monthlyIncome", self.monthly_income),
            ("annualRatePercent", self.annual_rate_percent),
        ];
        for (field, value) in amounts {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(LoanInputError::NegativeAmount { field });
            }
        }
        if !ALLOWED_TERMS.contains(&self.term_months) {
            return Err(LoanInputError::UnsupportedTerm(self.term_months));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffordabilityTier {
    Excellent,
    Good,
    Fair,
    Challenging,
}

impl AffordabilityTier {
    // Ratio is payment / income in percent; breakpoints are inclusive upper bounds
    pub fn from_ratio(debt_to_income_percent: f64) -> Self {
        if debt_to_income_percent <= EXCELLENT_MAX_RATIO {
            AffordabilityTier::Excellent
        } else if debt_to_income_percent <= GOOD_MAX_RATIO {
            AffordabilityTier::Good
        } else if debt_to_income_percent <= FAIR_MAX_RATIO {
            AffordabilityTier::Fair
        } else {
            AffordabilityTier::Challenging
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_amount: f64,
    pub debt_to_income_percent: Option<f64>,
    pub affordability: Option<AffordabilityTier>,
}

// None when income is zero or negative
pub fn classify_affordability(
    monthly_payment: f64,
    monthly_income: f64,
) -> Option<(f64, AffordabilityTier)> {
    if !(monthly_income > 0.0) {
        return None;
    }
    let ratio = monthly_payment / monthly_income * 100.0;
    ratio
        .is_finite()
        .then(|| (ratio, AffordabilityTier::from_ratio(ratio)))
}

// Standard annuity payment, evaluated as P * r / (1 - (1+r)^-n) so large terms
// never overflow the compounding factor. Returns None instead of a zero or NaN
// payment when the principal, rate or term is not strictly positive, or when the
// payment itself is not finite.
pub fn compute_loan(params: &LoanParameters) -> Option<LoanResult> {
    let principal = params.financed_principal();
    let rate = params.monthly_rate();
    let term = params.term_months;

    if !(principal > 0.0) || !(rate > 0.0) || term == 0 {
        tracing::debug!(principal, rate, term, "Loan parameters do not produce a result");
        return None;
    }

    let periods = f64::from(term);
    let discount = 1.0 - (1.0 + rate).powf(-periods);
    // A rate below f64 resolution leaves 1 + r == 1; the loan is then interest-free
    let monthly_payment = if discount > 0.0 {
        principal * rate / discount
    } else {
        principal / periods
    };
    if !monthly_payment.is_finite() {
        tracing::warn!(principal, rate, term, "Loan computation overflowed");
        return None;
    }

    let total_amount = monthly_payment * periods;
    let total_interest = total_amount - principal;
    let affordability = classify_affordability(monthly_payment, params.monthly_income);

    Some(LoanResult {
        monthly_payment,
        total_interest,
        total_amount,
        debt_to_income_percent: affordability.map(|(ratio, _)| ratio),
        affordability: affordability.map(|(_, tier)| tier),
    })
}
