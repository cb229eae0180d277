use super::allocation::{calculate, AllocationPolicy, BillingError, Invoice};
use super::input::BillInputs;

/// 계산기 화면의 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorState {
    /// 아직 성공한 계산이 없다.
    NoResult,
    /// 마지막으로 성공한 계산 결과를 보여주는 중이다.
    HasResult,
}

/// 입력 네 필드와 마지막 계산 결과를 함께 보관한다.
///
/// 계산이 실패해도 이전 결과는 지우지 않는다.
#[derive(Debug, Clone, Default)]
pub struct BillingCalculator {
    policy: AllocationPolicy,
    inputs: BillInputs,
    result: Option<Invoice>,
}

impl BillingCalculator {
    pub fn new(policy: AllocationPolicy) -> Self {
        Self {
            policy,
            inputs: BillInputs::default(),
            result: None,
        }
    }

    pub fn policy(&self) -> &AllocationPolicy {
        &self.policy
    }

    pub fn inputs(&self) -> &BillInputs {
        &self.inputs
    }

    /// 입력 필드를 직접 편집한다(GUI 텍스트 박스 바인딩용).
    pub fn inputs_mut(&mut self) -> &mut BillInputs {
        &mut self.inputs
    }

    pub fn set_inputs(&mut self, inputs: BillInputs) {
        self.inputs = inputs;
    }

    /// 현재 입력으로 계산한다. 성공하면 이전 결과를 새 결과로 바꾼다.
    pub fn calculate(&mut self) -> Result<&Invoice, BillingError> {
        let invoice = calculate(&self.inputs, &self.policy)?;
        Ok(self.result.insert(invoice))
    }

    pub fn result(&self) -> Option<&Invoice> {
        self.result.as_ref()
    }

    pub fn state(&self) -> CalculatorState {
        if self.result.is_some() {
            CalculatorState::HasResult
        } else {
            CalculatorState::NoResult
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_result() {
        let calc = BillingCalculator::new(AllocationPolicy::default());
        assert_eq!(calc.state(), CalculatorState::NoResult);
        assert!(calc.result().is_none());
        assert_eq!(calc.inputs(), &BillInputs::default());
    }

    #[test]
    fn failure_keeps_no_result() {
        let mut calc = BillingCalculator::new(AllocationPolicy::default());
        assert_eq!(calc.calculate(), Err(BillingError::MissingRequiredInput));
        assert_eq!(calc.state(), CalculatorState::NoResult);
    }

    #[test]
    fn failure_keeps_previous_result() {
        let mut calc = BillingCalculator::new(AllocationPolicy::default());
        calc.set_inputs(BillInputs::new("10000", "5000", "2000", "50"));
        let first = *calc.calculate().unwrap();

        calc.inputs_mut().total_energy_kw.clear();
        assert!(calc.calculate().is_err());
        assert_eq!(calc.state(), CalculatorState::HasResult);
        assert_eq!(calc.result(), Some(&first));
    }

    #[test]
    fn success_replaces_previous_result() {
        let mut calc = BillingCalculator::new(AllocationPolicy::default());
        calc.set_inputs(BillInputs::new("10000", "5000", "2000", "50"));
        calc.calculate().unwrap();

        calc.inputs_mut().tenant_energy_kw = "100".into();
        let second = *calc.calculate().unwrap();
        assert_eq!(calc.result(), Some(&second));
        assert!((second.direct_kw - 100.0).abs() < 1e-12);
    }
}
