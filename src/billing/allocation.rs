use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::input::{BillInputs, Readings};

/// 일반 부하 중 공용 냉방(AC) 풀로 보는 비율 (50%).
pub const DEFAULT_AC_POOL_FRACTION: f64 = 0.50;

/// 공용 냉방 풀 중 임차인이 부담하는 비율 (3.4%).
pub const DEFAULT_TENANT_AC_SHARE: f64 = 0.034;

/// 공용 전력 배분 정책.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationPolicy {
    /// 일반 부하 → 공용 냉방 풀 비율 (0~1)
    pub ac_pool_fraction: f64,
    /// 공용 냉방 풀 → 임차인 부담 비율 (0~1)
    pub tenant_ac_share: f64,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            ac_pool_fraction: DEFAULT_AC_POOL_FRACTION,
            tenant_ac_share: DEFAULT_TENANT_AC_SHARE,
        }
    }
}

/// 청구서 계산 결과. 한 번 만들어지면 바뀌지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// 평균 단가 [NIS/KW]
    pub rate: f64,
    /// 임차인 직접 계량분 [KW]
    pub direct_kw: f64,
    /// 공용 냉방 풀에서 배분된 몫 [KW]
    pub shared_allocation_kw: f64,
    /// 청구 전력량 [KW]
    pub billed_kw: f64,
    /// 청구 금액 [NIS]
    pub billed_nis: f64,
}

impl Invoice {
    /// 설비 계량값이 전체 계량값보다 커서 배분 몫이 음수가 된 경우 true.
    ///
    /// 값은 보정하지 않고 그대로 두며, 화면에서 경고만 표시한다.
    pub fn has_negative_allocation(&self) -> bool {
        self.shared_allocation_kw < 0.0
    }
}

/// 계산 도중 발생 가능한 오류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BillingError {
    /// 전체 전력량 또는 전체 요금이 비어 있거나 0이다.
    #[error("Please enter the main bill details.")]
    MissingRequiredInput,
}

/// 원문 입력으로 청구서를 계산한다.
pub fn calculate(inputs: &BillInputs, policy: &AllocationPolicy) -> Result<Invoice, BillingError> {
    let readings = inputs.parse();
    debug!(?readings, "parsed readings");
    calculate_readings(&readings, policy)
}

/// 숫자로 해석된 검침값으로 청구서를 계산한다.
pub fn calculate_readings(
    readings: &Readings,
    policy: &AllocationPolicy,
) -> Result<Invoice, BillingError> {
    if readings.total_energy_kw == 0.0 || readings.total_cost_nis == 0.0 {
        warn!("main bill details missing");
        return Err(BillingError::MissingRequiredInput);
    }

    let rate = readings.total_cost_nis / readings.total_energy_kw;
    let general_pool_kw = readings.total_energy_kw - readings.machine_energy_kw;
    let ac_pool_kw = general_pool_kw * policy.ac_pool_fraction;
    let tenant_ac_share_kw = ac_pool_kw * policy.tenant_ac_share;

    let billed_kw = readings.tenant_energy_kw + tenant_ac_share_kw;
    let billed_nis = billed_kw * rate;

    let invoice = Invoice {
        rate,
        direct_kw: readings.tenant_energy_kw,
        shared_allocation_kw: tenant_ac_share_kw,
        billed_kw,
        billed_nis,
    };
    if invoice.has_negative_allocation() {
        warn!(
            general_pool_kw,
            shared_allocation_kw = invoice.shared_allocation_kw,
            "machine meter exceeds facility total, shared allocation is negative"
        );
    }
    info!(rate, billed_kw, billed_nis, "invoice calculated");
    Ok(invoice)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn reference_scenario() {
        let inputs = BillInputs::new("10000", "5000", "2000", "50");
        let invoice = calculate(&inputs, &AllocationPolicy::default()).unwrap();
        assert_abs_diff_eq!(invoice.rate, 0.5);
        assert_abs_diff_eq!(invoice.direct_kw, 50.0);
        assert_abs_diff_eq!(invoice.shared_allocation_kw, 136.0, epsilon = 1e-9);
        assert_abs_diff_eq!(invoice.billed_kw, 186.0, epsilon = 1e-9);
        assert_abs_diff_eq!(invoice.billed_nis, 93.0, epsilon = 1e-9);
        assert!(!invoice.has_negative_allocation());
    }

    #[test]
    fn custom_policy_is_applied() {
        let policy = AllocationPolicy {
            ac_pool_fraction: 1.0,
            tenant_ac_share: 0.1,
        };
        let inputs = BillInputs::new("1000", "2000", "0", "10");
        let invoice = calculate(&inputs, &policy).unwrap();
        assert_abs_diff_eq!(invoice.shared_allocation_kw, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(invoice.billed_nis, 220.0, epsilon = 1e-9);
    }

    #[test]
    fn negative_flag_follows_shared_allocation() {
        let inputs = BillInputs::new("1000", "500", "3000", "10");
        let flagged = calculate(&inputs, &AllocationPolicy::default()).unwrap();
        assert!(flagged.has_negative_allocation());

        // 냉방 풀 비율이 0이면 일반 풀이 음수여도 배분 몫은 0이므로 경고 대상이 아니다.
        let no_pool = AllocationPolicy {
            ac_pool_fraction: 0.0,
            tenant_ac_share: DEFAULT_TENANT_AC_SHARE,
        };
        let silent = calculate(&inputs, &no_pool).unwrap();
        assert_eq!(silent.shared_allocation_kw, 0.0);
        assert!(!silent.has_negative_allocation());
    }

    #[test]
    fn missing_cost_is_rejected() {
        let inputs = BillInputs::new("10000", "", "2000", "50");
        assert_eq!(
            calculate(&inputs, &AllocationPolicy::default()),
            Err(BillingError::MissingRequiredInput)
        );
    }

    #[test]
    fn negative_zero_total_is_rejected() {
        let inputs = BillInputs::new("-0", "5000", "", "");
        assert_eq!(
            calculate(&inputs, &AllocationPolicy::default()),
            Err(BillingError::MissingRequiredInput)
        );
    }

    #[test]
    fn error_message() {
        assert_eq!(
            BillingError::MissingRequiredInput.to_string(),
            "Please enter the main bill details."
        );
    }
}
