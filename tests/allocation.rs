//! 청구서 배분 공식 회귀 테스트.
use approx::{assert_abs_diff_eq, assert_relative_eq};
use tenant_invoice::billing::{
    calculate, AllocationPolicy, BillInputs, BillingError, DEFAULT_AC_POOL_FRACTION,
    DEFAULT_TENANT_AC_SHARE,
};

fn policy() -> AllocationPolicy {
    AllocationPolicy::default()
}

#[test]
fn worked_example() {
    // 10000 KW / 5000 NIS, 웨이브 머신 2000 KW, 임차인 50 KW
    let invoice = calculate(&BillInputs::new("10000", "5000", "2000", "50"), &policy())
        .expect("valid bill");
    assert_abs_diff_eq!(invoice.rate, 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(invoice.direct_kw, 50.0, epsilon = 1e-12);
    assert_abs_diff_eq!(invoice.shared_allocation_kw, 136.0, epsilon = 1e-9);
    assert_abs_diff_eq!(invoice.billed_kw, 186.0, epsilon = 1e-9);
    assert_abs_diff_eq!(invoice.billed_nis, 93.0, epsilon = 1e-9);
}

#[test]
fn identities_hold_over_a_grid() {
    let totals = [1.0, 850.5, 10_000.0, 123_456.0];
    let costs = [0.01, 420.0, 5_000.0, 98_765.4];
    let machines = [0.0, 300.0, 9_000.0];
    let tenants = [0.0, 12.5, 400.0];
    for &t in &totals {
        for &c in &costs {
            for &m in &machines {
                for &b in &tenants {
                    let inputs =
                        BillInputs::new(t.to_string(), c.to_string(), m.to_string(), b.to_string());
                    let inv = calculate(&inputs, &policy()).unwrap();
                    assert_relative_eq!(inv.rate, c / t, max_relative = 1e-12);
                    let expected_kw =
                        b + (t - m) * DEFAULT_AC_POOL_FRACTION * DEFAULT_TENANT_AC_SHARE;
                    assert_relative_eq!(inv.billed_kw, expected_kw, max_relative = 1e-12);
                    assert_eq!(inv.billed_kw, inv.direct_kw + inv.shared_allocation_kw);
                    assert_eq!(inv.billed_nis, inv.billed_kw * inv.rate);
                }
            }
        }
    }
}

#[test]
fn calculation_is_idempotent() {
    let inputs = BillInputs::new("7777.7", "3210.99", "1234.5", "88.8");
    let a = calculate(&inputs, &policy()).unwrap();
    let b = calculate(&inputs, &policy()).unwrap();
    assert_eq!(a.rate.to_bits(), b.rate.to_bits());
    assert_eq!(a.billed_kw.to_bits(), b.billed_kw.to_bits());
    assert_eq!(a.billed_nis.to_bits(), b.billed_nis.to_bits());
    assert_eq!(a, b);
}

#[test]
fn zero_or_empty_total_energy_is_rejected() {
    for total in ["0", "", "abc", "0.0", "-0"] {
        for cost in ["5000", "", "1"] {
            let inputs = BillInputs::new(total, cost, "2000", "50");
            assert_eq!(
                calculate(&inputs, &policy()),
                Err(BillingError::MissingRequiredInput),
                "total={total:?} cost={cost:?}"
            );
        }
    }
}

#[test]
fn zero_cost_is_rejected() {
    let inputs = BillInputs::new("10000", "0", "2000", "50");
    assert_eq!(
        calculate(&inputs, &policy()),
        Err(BillingError::MissingRequiredInput)
    );
}

#[test]
fn non_numeric_optional_fields_count_as_zero() {
    let inv = calculate(&BillInputs::new("10000", "5000", "abc", "abc"), &policy()).unwrap();
    assert_abs_diff_eq!(inv.direct_kw, 0.0);
    // 머신 0 → 일반 풀 10000 → 냉방 풀 5000 → 임차인 170
    assert_abs_diff_eq!(inv.shared_allocation_kw, 170.0, epsilon = 1e-9);
    assert_abs_diff_eq!(inv.billed_nis, 85.0, epsilon = 1e-9);
}

#[test]
fn machine_above_total_gives_negative_share_unclamped() {
    // 설비 계량값이 전체보다 크면 배분 몫이 음수가 되어 청구액이 줄어든다. 보정하지 않는다.
    let inv = calculate(&BillInputs::new("1000", "500", "3000", "10"), &policy()).unwrap();
    assert_abs_diff_eq!(inv.shared_allocation_kw, -34.0, epsilon = 1e-9);
    assert_abs_diff_eq!(inv.billed_kw, -24.0, epsilon = 1e-9);
    assert_abs_diff_eq!(inv.billed_nis, -12.0, epsilon = 1e-9);
    assert!(inv.has_negative_allocation());
}

#[test]
fn negative_readings_are_not_validated() {
    let inv = calculate(&BillInputs::new("-1000", "500", "", ""), &policy()).unwrap();
    assert_abs_diff_eq!(inv.rate, -0.5);
}

#[test]
fn trailing_text_is_ignored() {
    let inv = calculate(&BillInputs::new("10000kW", "5000 NIS", "2000", " 50"), &policy()).unwrap();
    assert_abs_diff_eq!(inv.billed_nis, 93.0, epsilon = 1e-9);
}
